//! The contract between the picker and the page it runs in.
//!
//! Everything the picker reads from or writes to the host page goes through
//! [`HostPage`]. Element ids are lookups, not ownership: the page may drop any
//! element at any time, so every accessor returns `None` (or a no-op result)
//! for a detached id instead of failing.

use crate::clipboard::ClipboardError;
use crate::events::{DispatchOutcome, SyntheticEvent};
use crate::form_controls::ElementKind;
use core_types::{Point, Viewport};
use css::{ComputedStyle, SelectorList};
use html::{Id, Node};
use layout::Rectangle;

pub trait HostPage {
    // =========================================================================
    // Reads
    // =========================================================================

    /// Host of the page origin, e.g. `chatgpt.com`.
    fn origin_host(&self) -> &str;

    fn viewport(&self) -> Viewport;

    /// `querySelectorAll` over the whole document, in document order.
    fn query_selector_all(&self, selectors: &SelectorList) -> Vec<Id>;

    /// Is `id` still attached to the document?
    fn is_connected(&self, id: Id) -> bool;

    /// `getBoundingClientRect` in viewport coordinates. `None` when detached
    /// or not rendered.
    fn bounding_rect(&self, id: Id) -> Option<Rectangle>;

    /// `getComputedStyle`, reduced to what visibility checks need.
    fn computed_style(&self, id: Id) -> Option<ComputedStyle>;

    fn attribute(&self, id: Id, name: &str) -> Option<String>;

    fn element_kind(&self, id: Id) -> ElementKind;

    /// Is `descendant` inside (or equal to) `ancestor`?
    fn contains(&self, ancestor: Id, descendant: Id) -> bool;

    /// `elementFromPoint`.
    fn hit_test(&self, point: Point) -> Option<Id>;

    /// Value of a native text control.
    fn value(&self, id: Id) -> Option<String>;

    /// `textContent`.
    fn text_content(&self, id: Id) -> Option<String>;

    fn focused(&self) -> Option<Id>;

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set the value of a native text control. Returns `false` if `id` is not
    /// a connected text control.
    fn set_value(&mut self, id: Id, value: &str) -> bool;

    /// Replace the element's children with one text node.
    fn set_text_content(&mut self, id: Id, text: &str) -> bool;

    fn focus(&mut self, id: Id) -> bool;

    /// Select everything inside `id` so the next paste replaces it.
    fn select_contents(&mut self, id: Id) -> bool;

    fn dispatch(&mut self, target: Id, event: SyntheticEvent) -> DispatchOutcome;

    /// `navigator.clipboard.writeText`.
    fn clipboard_write(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Append a subtree to `<body>`; returns the id of its root.
    fn append_to_body(&mut self, node: Node) -> Option<Id>;

    fn remove(&mut self, id: Id) -> bool;

    fn set_attribute(&mut self, id: Id, name: &str, value: &str) -> bool;

    /// Set one inline style property, keeping the others.
    fn set_style(&mut self, id: Id, property: &str, value: &str) -> bool;
}
