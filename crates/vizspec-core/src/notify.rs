//! Change notification for session consumers.
//!
//! Every state-changing command bumps the session version by exactly one and
//! notifies listeners, in registration order, with the new effective spec.
//! Absorbed no-ops notify nobody.

use std::fmt;

use serde::Serialize;
use vizspec_model::VisSpec;

/// What a command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Fields,
    Filters,
    Encodes,
    SpecSource,
    Neighbors,
    EditorBuffer,
    Catalog,
    Reset,
}

/// Published after each committed change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeNotice {
    pub kind: ChangeKind,
    pub version: u64,
    /// Spec a renderer should draw now.
    pub effective_spec: Option<VisSpec>,
}

/// Receiver of [`ChangeNotice`]s.
pub trait ChangeListener {
    fn on_change(&mut self, notice: &ChangeNotice);
}

impl<F> ChangeListener for F
where
    F: FnMut(&ChangeNotice),
{
    fn on_change(&mut self, notice: &ChangeNotice) {
        self(notice);
    }
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered listener registry.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&mut self, notice: &ChangeNotice) {
        for (_, listener) in &mut self.listeners {
            listener.on_change(notice);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}
