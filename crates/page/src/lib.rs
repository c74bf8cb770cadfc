//! Host-page boundary.
//!
//! [`HostPage`] is the only way the picker touches a page; [`Page`] is the
//! in-memory implementation used by the driver binary and by tests.

pub mod clipboard;
pub mod events;
pub mod form_controls;
mod host;
mod page;

pub use clipboard::{Clipboard, ClipboardError, ClipboardPolicy};
pub use events::{DispatchOutcome, DispatchedEvent, SyntheticEvent};
pub use form_controls::{ElementKind, element_kind};
pub use host::HostPage;
pub use page::Page;
