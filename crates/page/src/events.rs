use html::Id;

/// Events the picker may dispatch on a host element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntheticEvent {
    /// `new Event('input', { bubbles: true })`
    Input,
    /// `ClipboardEvent('paste')` carrying `text/plain` data.
    Paste { text: String },
}

impl SyntheticEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SyntheticEvent::Input => "input",
            SyntheticEvent::Paste { .. } => "paste",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Delivered; no listener cancelled it.
    Delivered,
    /// A host listener handled the event and called `preventDefault`.
    Handled,
    /// The target is no longer in the document.
    Detached,
}

/// One dispatched event, as recorded by [`Page`](crate::Page).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub target: Id,
    pub event: SyntheticEvent,
    pub outcome: DispatchOutcome,
}
