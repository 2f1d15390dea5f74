//! Incremental composition engine for a single "main view" chart.
//!
//! The engine keeps three pieces of state consistent while a user builds a
//! chart field by field:
//!
//! - **View state**: the [`MainView`](vizspec_model::MainView) with its
//!   fields, filters and encodes ([`view_state`]).
//! - **Spec source**: whether the derived spec or a hand-edited buffer
//!   renders ([`source`], [`editor`]).
//! - **Neighbor selection**: a single-slot wildcard highlight ([`selection`]).
//!
//! [`Session`] owns all three and is the entry point for callers. Spec
//! generation and favorites storage are collaborators behind the
//! [`SpecDeriver`] and [`CollectionStore`] traits.

pub mod action;
pub mod collection;
pub mod derive;
pub mod describe;
pub mod editor;
pub mod error;
pub mod notify;
pub mod selection;
pub mod session;
pub mod settings;
pub mod source;
pub mod view_state;

pub use action::Action;
pub use collection::{CollectionEntry, CollectionStore, Fingerprint, MemoryCollection};
pub use derive::{BasicSpecDeriver, SpecDeriver};
pub use describe::{EncodePill, FieldPill, FilterPill, Pills, describe};
pub use editor::{BufferEditor, SpecEditor};
pub use error::{CoreError, Result};
pub use notify::{ChangeKind, ChangeListener, ChangeNotice, ListenerId, Notifier};
pub use selection::{FieldMode, NeighborSelection};
pub use session::{Session, SessionSnapshot};
pub use settings::{CollectionSettings, DeriveSettings, DisplaySettings, SessionSettings};
pub use source::SpecSourceSwitch;
pub use view_state::ViewState;
