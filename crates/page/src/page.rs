use crate::clipboard::{Clipboard, ClipboardError, ClipboardPolicy};
use crate::events::{DispatchOutcome, DispatchedEvent, SyntheticEvent};
use crate::form_controls::{
    ElementKind, element_kind, input_id, prune_detached_controls, seed_input_state_from_dom,
};
use crate::host::HostPage;
use core_types::{Point, Viewport};
use css::{
    ComputedStyle, SelectorList, attach_styles, build_style_map, parse_declarations,
    parse_stylesheet, query_selector_all,
};
use html::dom_utils::{ancestor_path, attr, collect_style_texts, collect_text};
use html::{Document, Id, MutationRecord, Node};
use input_core::InputValueStore;
use layout::{LayoutBox, Rectangle, layout_positioned};
use std::collections::{HashMap, HashSet};

/// In-memory host page: DOM, styles, layout, text-control values, focus,
/// clipboard and an event log.
///
/// Methods outside [`HostPage`] simulate what the host site itself does
/// (navigate, re-render, scroll, resize) and let callers inspect what the
/// picker did.
#[derive(Debug)]
pub struct Page {
    origin: String,
    document: Document,
    viewport: Viewport,
    scroll: (f32, f32),
    values: InputValueStore,
    clipboard: Clipboard,
    paste_handlers: HashSet<Id>,
    focused: Option<Id>,
    /// Element whose whole content is selected, if any.
    selection: Option<Id>,
    events: Vec<DispatchedEvent>,
    mutations: Vec<MutationRecord>,
    styles: HashMap<Id, ComputedStyle>,
    boxes: HashMap<Id, LayoutBox>,
}

impl Page {
    pub fn new(origin_host: &str, root: Node) -> Self {
        let mut page = Self {
            origin: origin_host.to_string(),
            document: Document::new(root),
            viewport: Viewport::default(),
            scroll: (0.0, 0.0),
            values: InputValueStore::new(),
            clipboard: Clipboard::new(ClipboardPolicy::Granted),
            paste_handlers: HashSet::new(),
            focused: None,
            selection: None,
            events: Vec::new(),
            mutations: Vec::new(),
            styles: HashMap::new(),
            boxes: HashMap::new(),
        };
        page.relayout();
        page
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_clipboard(mut self, policy: ClipboardPolicy) -> Self {
        self.clipboard.set_policy(policy);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn set_clipboard_policy(&mut self, policy: ClipboardPolicy) {
        self.clipboard.set_policy(policy);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Host-side navigation to another origin without a reload.
    pub fn set_origin(&mut self, origin_host: &str) {
        self.origin = origin_host.to_string();
    }

    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.scroll = (x, y);
    }

    /// First element matching `selector`. Panics on an invalid selector; meant
    /// for fixtures and drivers, not for the picker.
    pub fn find(&self, selector: &str) -> Option<Id> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(e) => panic!("invalid selector {selector:?}: {e}"),
        };
        query_selector_all(self.document.root(), &list).into_iter().next()
    }

    /// Number of text controls whose values the page is tracking.
    pub fn tracked_controls(&self) -> usize {
        self.values.len()
    }

    /// Register a host editor paste listener on `id` that consumes synthetic
    /// pastes and inserts their text itself (ProseMirror, Quill).
    pub fn install_paste_handler(&mut self, id: Id) {
        self.paste_handlers.insert(id);
    }

    /// Host-side DOM change: append a subtree.
    pub fn append(&mut self, parent: Id, node: Node) -> Option<Id> {
        let id = self.document.append_child(parent, node);
        self.after_mutation();
        id
    }

    /// Host-side DOM change: detach a subtree.
    pub fn detach(&mut self, id: Id) -> Option<Node> {
        let node = self.document.remove(id);
        if node.is_some() {
            if self.focused.is_some_and(|f| !self.document.contains(f)) {
                self.focused = None;
            }
            self.after_mutation();
        }
        node
    }

    /// Host-side DOM change: swap a container's children (client-side routing).
    pub fn replace_children(&mut self, parent: Id, nodes: Vec<Node>) -> Vec<Id> {
        let ids = self.document.replace_children(parent, nodes);
        self.after_mutation();
        ids
    }

    /// Host-side attribute change (restyling, toggling classes).
    pub fn set_host_attribute(&mut self, id: Id, name: &str, value: &str) -> bool {
        let ok = self.document.set_attribute(id, name, Some(value.to_string()));
        self.after_mutation();
        ok
    }

    /// Drain mutation records, the way a `MutationObserver` callback receives them.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    pub fn events_for(&self, target: Id, name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.target == target && e.event.name() == name)
            .count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn after_mutation(&mut self) {
        self.mutations.extend(self.document.take_records());
        self.relayout();
    }

    fn relayout(&mut self) {
        let mut css_text = String::new();
        collect_style_texts(self.document.root(), &mut css_text);
        let sheet = parse_stylesheet(&css_text);
        attach_styles(self.document.root_mut_untracked(), &sheet);
        self.styles = build_style_map(self.document.root());
        self.boxes = layout_positioned(self.document.root(), &self.styles);
        seed_input_state_from_dom(&mut self.values, self.document.root());
        prune_detached_controls(&mut self.values, self.document.root());
        log::trace!(
            target: "page.layout",
            "relayout: {} styled, {} boxes",
            self.styles.len(),
            self.boxes.len()
        );
    }

    fn to_viewport(&self, b: &LayoutBox) -> Rectangle {
        if b.fixed {
            b.rect
        } else {
            b.rect.translate(-self.scroll.0, -self.scroll.1)
        }
    }
}

impl HostPage for Page {
    fn origin_host(&self) -> &str {
        &self.origin
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query_selector_all(&self, selectors: &SelectorList) -> Vec<Id> {
        query_selector_all(self.document.root(), selectors)
    }

    fn is_connected(&self, id: Id) -> bool {
        self.document.contains(id)
    }

    fn bounding_rect(&self, id: Id) -> Option<Rectangle> {
        let b = self.boxes.get(&id)?;
        if !self.document.contains(id) {
            return None;
        }
        Some(self.to_viewport(b))
    }

    fn computed_style(&self, id: Id) -> Option<ComputedStyle> {
        self.styles.get(&id).copied()
    }

    fn attribute(&self, id: Id, name: &str) -> Option<String> {
        self.document
            .get(id)
            .and_then(|n| attr(n, name))
            .map(str::to_string)
    }

    fn element_kind(&self, id: Id) -> ElementKind {
        self.document
            .get(id)
            .map_or(ElementKind::Other, element_kind)
    }

    fn contains(&self, ancestor: Id, descendant: Id) -> bool {
        ancestor_path(self.document.root(), descendant).contains(&ancestor)
    }

    fn hit_test(&self, point: Point) -> Option<Id> {
        layout::hit_test(
            self.document.root(),
            &self.boxes,
            |b| self.to_viewport(b),
            point,
        )
    }

    fn value(&self, id: Id) -> Option<String> {
        if !self.element_kind(id).is_native() {
            return None;
        }
        self.values.get(input_id(id)).map(str::to_string)
    }

    fn text_content(&self, id: Id) -> Option<String> {
        let node = self.document.get(id)?;
        let mut out = String::new();
        collect_text(node.children(), &mut out);
        Some(out)
    }

    fn focused(&self) -> Option<Id> {
        self.focused
    }

    fn set_value(&mut self, id: Id, value: &str) -> bool {
        if !self.element_kind(id).is_native() {
            return false;
        }
        self.values.set(input_id(id), value);
        true
    }

    fn set_text_content(&mut self, id: Id, text: &str) -> bool {
        let ok = self.document.set_text_content(id, text);
        if ok {
            if self.selection == Some(id) {
                self.selection = None;
            }
            self.after_mutation();
        }
        ok
    }

    fn focus(&mut self, id: Id) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        if self.focused != Some(id) {
            self.selection = None;
        }
        self.focused = Some(id);
        true
    }

    fn select_contents(&mut self, id: Id) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.selection = Some(id);
        true
    }

    fn dispatch(&mut self, target: Id, event: SyntheticEvent) -> DispatchOutcome {
        let outcome = if !self.document.contains(target) {
            DispatchOutcome::Detached
        } else {
            match &event {
                SyntheticEvent::Paste { text } if self.paste_handlers.contains(&target) => {
                    // The host editor replaces a full selection, otherwise inserts at
                    // its caret, which sits at the end.
                    let mut content = if self.selection.take() == Some(target) {
                        String::new()
                    } else {
                        self.text_content(target).unwrap_or_default()
                    };
                    content.push_str(text);
                    self.document.set_text_content(target, &content);
                    self.after_mutation();
                    DispatchOutcome::Handled
                }
                _ => DispatchOutcome::Delivered,
            }
        };
        log::trace!(target: "page.events", "{} on {target:?}: {outcome:?}", event.name());
        self.events.push(DispatchedEvent {
            target,
            event,
            outcome,
        });
        outcome
    }

    fn clipboard_write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.write_text(text)
    }

    fn append_to_body(&mut self, node: Node) -> Option<Id> {
        let body = self.document.body_id()?;
        self.append(body, node)
    }

    fn remove(&mut self, id: Id) -> bool {
        self.detach(id).is_some()
    }

    fn set_attribute(&mut self, id: Id, name: &str, value: &str) -> bool {
        self.set_host_attribute(id, name, value)
    }

    fn set_style(&mut self, id: Id, property: &str, value: &str) -> bool {
        let Some(node) = self.document.get(id) else {
            return false;
        };
        let property = property.to_ascii_lowercase();
        let mut decls = parse_declarations(attr(node, "style").unwrap_or(""));
        if let Some(d) = decls.iter_mut().find(|d| d.name == property) {
            if d.value == value {
                return true;
            }
            d.value = value.to_string();
        } else {
            decls.push(css::Declaration {
                name: property,
                value: value.to_string(),
            });
        }
        let serialized = decls
            .iter()
            .map(|d| format!("{}: {}", d.name, d.value))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_host_attribute(id, "style", &serialized)
    }
}
