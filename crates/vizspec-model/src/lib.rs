//! Data model for incrementally composed visualization specifications.
//!
//! The types here are plain data: field descriptors and their catalog,
//! filters, encodes, the [`MainView`] they compose into, and the renderable
//! [`VisSpec`]. Mutation rules live in `vizspec-core`.

pub mod encode;
pub mod error;
pub mod field;
pub mod filter;
pub mod ids;
pub mod spec;
pub mod view;

pub use encode::{Aggregate, Encode};
pub use error::{ModelError, Result};
pub use field::{AnalyticType, FieldCatalog, FieldDescriptor};
pub use filter::{Filter, FilterKind, FilterRule, FilterValue};
pub use ids::FieldId;
pub use spec::{SpecSource, SpecType, VisSpec};
pub use view::{MainView, ResolvedEncode, ResolvedView};
