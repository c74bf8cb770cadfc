//! Overlay Controller: owns the floating toggle + dropdown and its
//! [`AttachmentState`].
//!
//! ```text
//!   Absent ──found──▶ Visible ◀──found── Hidden
//!                        │                  ▲
//!                        └──── not found ───┘
//!   any ──reset──▶ Absent
//! ```
//!
//! Hiding toggles `display` on the container instead of removing it, so the
//! dropdown's open/closed state survives and nothing flickers.

mod dom;
mod placement;

pub use dom::{
    DROPDOWN_SELECTOR, HELPER_ATTR, LIST_SELECTOR, PROMPT_ATTR, ROOT_SELECTOR, TOGGLE_SELECTOR,
    build_overlay, content_height, row_count,
};
pub use placement::{DropDirection, Placement, place};

use crate::catalog::{EntryRef, PromptCatalog};
use crate::config::OverlayConfig;
use crate::geometry::check_rect;
use crate::locator::Candidate;
use css::SelectorList;
use dom::px;
use html::Id;
use layout::Rectangle;
use page::HostPage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Absent,
    AttachedVisible,
    AttachedHidden,
}

/// What one detection pass did to the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Absent → Visible.
    Attached,
    /// Hidden → Visible.
    Shown,
    /// Visible → Hidden.
    Hidden,
    /// The host dropped our node; a fresh or adopted one replaced it.
    Reattached,
    Repositioned,
    Unchanged,
}

/// Lookup key for the current target. The page owns the element; this is
/// revalidated with `is_connected` before every use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetRef {
    pub id: Id,
    pub selector: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentState {
    pub overlay: Id,
    pub toggle: Id,
    pub dropdown: Id,
    /// Scrolled row container inside the dropdown.
    pub list: Id,
    pub target: Option<TargetRef>,
    pub visible: bool,
    pub last_rect: Option<Rectangle>,
    pub dropdown_open: bool,
    pub placement: Option<Placement>,
    /// How far the list is scrolled up inside the dropdown, in px.
    pub dropdown_scroll: f32,
}

/// Where a click landed, from the overlay's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    Toggle,
    Select(EntryRef),
    /// Inside the overlay but not on anything actionable.
    Inside,
    Outside,
}

#[derive(Debug)]
pub struct OverlayController {
    config: OverlayConfig,
    catalog: PromptCatalog,
    attachment: Option<AttachmentState>,
}

impl OverlayController {
    pub fn new(config: OverlayConfig, catalog: PromptCatalog) -> Self {
        Self {
            config,
            catalog,
            attachment: None,
        }
    }

    pub fn state(&self) -> OverlayState {
        match &self.attachment {
            None => OverlayState::Absent,
            Some(a) if a.visible => OverlayState::AttachedVisible,
            Some(_) => OverlayState::AttachedHidden,
        }
    }

    pub fn attachment(&self) -> Option<&AttachmentState> {
        self.attachment.as_ref()
    }

    pub fn overlay_id(&self) -> Option<Id> {
        self.attachment.as_ref().map(|a| a.overlay)
    }

    pub fn target(&self) -> Option<&TargetRef> {
        self.attachment.as_ref().and_then(|a| a.target.as_ref())
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn is_open(&self) -> bool {
        self.attachment.as_ref().is_some_and(|a| a.dropdown_open)
    }

    /// Apply one detection pass's result.
    pub fn apply_pass<P: HostPage + ?Sized>(
        &mut self,
        page: &mut P,
        found: Option<&Candidate>,
    ) -> Transition {
        let Some(candidate) = found else {
            return self.hide(page);
        };

        let before = self.state();
        let reattached = match &self.attachment {
            Some(a) if page.is_connected(a.overlay) => false,
            _ => {
                let Some(fresh) = self.mount(page) else {
                    log::warn!(target: "picker.overlay", "cannot mount overlay: page has no body");
                    return Transition::Unchanged;
                };
                let carried = self.attachment.take();
                self.attachment = Some(AttachmentState {
                    dropdown_open: carried.as_ref().is_some_and(|a| a.dropdown_open),
                    visible: false,
                    ..fresh
                });
                carried.is_some()
            }
        };

        let Some(att) = self.attachment.as_mut() else {
            return Transition::Unchanged;
        };
        att.target = Some(TargetRef {
            id: candidate.id,
            selector: candidate.selector.clone(),
        });
        att.last_rect = Some(candidate.rect);
        let was_visible = att.visible;
        if !was_visible {
            page.set_style(att.overlay, "display", "block");
            att.visible = true;
        }
        let dropdown_open = att.dropdown_open;
        let moved = self.reposition(page, Some(candidate.rect));
        if reattached {
            // The fresh node starts closed; restore what the user had.
            self.set_dropdown(page, dropdown_open);
        }

        let transition = match before {
            _ if reattached => Transition::Reattached,
            OverlayState::Absent => Transition::Attached,
            OverlayState::AttachedHidden => Transition::Shown,
            OverlayState::AttachedVisible if moved => Transition::Repositioned,
            OverlayState::AttachedVisible => Transition::Unchanged,
        };
        if transition != Transition::Unchanged {
            log::debug!(
                target: "picker.overlay",
                "{transition:?}: target {:?} via {:?} at {:?}",
                candidate.id,
                candidate.selector,
                candidate.rect
            );
        }
        transition
    }

    fn hide<P: HostPage + ?Sized>(&mut self, page: &mut P) -> Transition {
        let Some(att) = self.attachment.as_mut() else {
            return Transition::Unchanged;
        };
        att.target = None;
        if !att.visible {
            return Transition::Unchanged;
        }
        att.visible = false;
        if page.is_connected(att.overlay) {
            page.set_style(att.overlay, "display", "none");
        }
        log::debug!(target: "picker.overlay", "Hidden: target no longer locatable");
        Transition::Hidden
    }

    /// Adopt an existing overlay node or insert a new one. Never leaves more
    /// than one in the document.
    fn mount<P: HostPage + ?Sized>(&self, page: &mut P) -> Option<AttachmentState> {
        let roots = query(page, ROOT_SELECTOR);
        let mut adopted = None;
        for root in roots {
            if adopted.is_none() {
                if let Some(parts) = parts_of(page, root) {
                    adopted = Some(parts);
                    continue;
                }
            }
            log::debug!(target: "picker.overlay", "removing stray overlay node {root:?}");
            page.remove(root);
        }

        let (overlay, toggle, dropdown, list) = match adopted {
            Some(parts) => {
                log::debug!(target: "picker.overlay", "adopting overlay node {:?}", parts.0);
                page.set_style(parts.0, "display", "none");
                page.set_style(parts.2, "display", "none");
                page.set_style(parts.3, "top", &px(0.0));
                parts
            }
            None => {
                let root = page.append_to_body(build_overlay(&self.catalog, &self.config))?;
                parts_of(page, root)?
            }
        };
        Some(AttachmentState {
            overlay,
            toggle,
            dropdown,
            list,
            target: None,
            visible: false,
            last_rect: None,
            dropdown_open: false,
            placement: None,
            dropdown_scroll: 0.0,
        })
    }

    /// Recompute placement for `anchor` (or the fallback spot) and write it
    /// to the overlay. Returns whether anything moved.
    pub fn reposition<P: HostPage + ?Sized>(
        &mut self,
        page: &mut P,
        anchor: Option<Rectangle>,
    ) -> bool {
        let viewport = page.viewport();
        let trusted = anchor.filter(|r| match check_rect(r, viewport) {
            Ok(()) => true,
            Err(e) => {
                log::debug!(target: "picker.overlay", "invalid anchor {r:?} ({e}); using fallback position");
                false
            }
        });
        let content = content_height(&self.catalog, &self.config);
        let placement = place(trusted.as_ref(), viewport, &self.config, content);

        let Some(att) = self.attachment.as_mut() else {
            return false;
        };
        if att.placement == Some(placement) {
            return false;
        }
        att.placement = Some(placement);

        let t = placement.toggle;
        let d = placement.dropdown;
        page.set_style(att.overlay, "left", &px(t.x));
        page.set_style(att.overlay, "top", &px(t.y));
        page.set_style(att.dropdown, "left", &px(d.x - t.x));
        page.set_style(att.dropdown, "top", &px(d.y - t.y));
        page.set_style(att.dropdown, "height", &px(d.height));
        let direction = match placement.direction {
            DropDirection::Down => "down",
            DropDirection::Up => "up",
        };
        page.set_attribute(att.dropdown, "data-direction", direction);

        let max_scroll = (content - d.height).max(0.0);
        if att.dropdown_scroll > max_scroll {
            att.dropdown_scroll = max_scroll;
            page.set_style(att.list, "top", &px(-max_scroll));
        }
        true
    }

    /// Scroll the open dropdown's rows by `delta_y` px, clamped to the
    /// content. Returns whether the offset changed.
    pub fn scroll_dropdown<P: HostPage + ?Sized>(&mut self, page: &mut P, delta_y: f32) -> bool {
        let content = content_height(&self.catalog, &self.config);
        let Some(att) = self.attachment.as_mut() else {
            return false;
        };
        let Some(placement) = att.placement else {
            return false;
        };
        if !att.visible || !att.dropdown_open || !delta_y.is_finite() {
            return false;
        }
        let max_scroll = (content - placement.dropdown.height).max(0.0);
        let scroll = (att.dropdown_scroll + delta_y).clamp(0.0, max_scroll);
        if scroll == att.dropdown_scroll {
            return false;
        }
        att.dropdown_scroll = scroll;
        page.set_style(att.list, "top", &px(-scroll));
        log::trace!(target: "picker.overlay", "dropdown scrolled to {scroll}px of {max_scroll}px");
        true
    }

    /// Whether `target` is the open dropdown or inside it.
    pub fn is_over_dropdown<P: HostPage + ?Sized>(&self, page: &P, target: Option<Id>) -> bool {
        match (&self.attachment, target) {
            (Some(att), Some(target)) => {
                att.visible && att.dropdown_open && page.contains(att.dropdown, target)
            }
            _ => false,
        }
    }

    /// Classify a click on `target` (the element under the pointer).
    pub fn classify_click<P: HostPage + ?Sized>(&self, page: &P, target: Option<Id>) -> ClickAction {
        let (Some(att), Some(target)) = (&self.attachment, target) else {
            return ClickAction::Outside;
        };
        if !att.visible || !page.contains(att.overlay, target) {
            return ClickAction::Outside;
        }
        if page.contains(att.toggle, target) {
            return ClickAction::Toggle;
        }
        match page
            .attribute(target, PROMPT_ATTR)
            .and_then(|k| k.parse::<EntryRef>().ok())
        {
            Some(entry) => ClickAction::Select(entry),
            None => ClickAction::Inside,
        }
    }

    pub fn toggle<P: HostPage + ?Sized>(&mut self, page: &mut P) -> bool {
        let open = !self.is_open();
        self.set_dropdown(page, open)
    }

    pub fn close<P: HostPage + ?Sized>(&mut self, page: &mut P) -> bool {
        self.set_dropdown(page, false)
    }

    fn set_dropdown<P: HostPage + ?Sized>(&mut self, page: &mut P, open: bool) -> bool {
        let Some(att) = self.attachment.as_mut() else {
            return false;
        };
        att.dropdown_open = open;
        page.set_style(att.dropdown, "display", if open { "block" } else { "none" });
        log::trace!(target: "picker.overlay", "dropdown {}", if open { "opened" } else { "closed" });
        true
    }

    /// Swap in a new catalog, rebuilding the dropdown in place of the old node.
    pub fn set_catalog<P: HostPage + ?Sized>(&mut self, page: &mut P, catalog: PromptCatalog) {
        self.catalog = catalog;
        let Some(old) = self.attachment.take() else {
            return;
        };
        if page.is_connected(old.overlay) {
            page.remove(old.overlay);
        }
        let Some(fresh) = self.mount(page) else {
            return;
        };
        self.attachment = Some(AttachmentState {
            target: old.target,
            last_rect: old.last_rect,
            ..fresh
        });
        if old.visible {
            if let Some(att) = self.attachment.as_mut() {
                att.visible = true;
                page.set_style(att.overlay, "display", "block");
            }
        }
        self.reposition(page, old.last_rect);
        self.set_dropdown(page, old.dropdown_open);
    }

    /// Tear down: remove the overlay node and forget all state.
    pub fn reset<P: HostPage + ?Sized>(&mut self, page: &mut P) {
        if let Some(att) = self.attachment.take() {
            if page.is_connected(att.overlay) {
                page.remove(att.overlay);
            }
            log::debug!(target: "picker.overlay", "reset");
        }
    }
}

fn query<P: HostPage + ?Sized>(page: &P, selector: &str) -> Vec<Id> {
    match SelectorList::parse(selector) {
        Ok(list) => page.query_selector_all(&list),
        Err(e) => {
            log::error!(target: "picker.overlay", "bad selector {selector:?}: {e}");
            Vec::new()
        }
    }
}

/// `(root, toggle, dropdown, list)` of an overlay node, if it is complete.
fn parts_of<P: HostPage + ?Sized>(page: &P, root: Id) -> Option<(Id, Id, Id, Id)> {
    let inside = |sel: &str| query(page, sel).into_iter().find(|id| page.contains(root, *id));
    Some((
        root,
        inside(TOGGLE_SELECTOR)?,
        inside(DROPDOWN_SELECTOR)?,
        inside(LIST_SELECTOR)?,
    ))
}
