use html::dom_utils::{attr, collect_text, has_attr, subtree_ids};
use html::traverse::for_each_element;
use html::Node;
use input_core::{InputId, InputValueStore, LineMode};
use std::collections::HashSet;

/// What kind of editable target an element is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// `<input>` of a text-like type.
    TextInput,
    TextArea,
    /// Rich-text host: `contenteditable` element.
    ContentEditable,
    Other,
}

impl ElementKind {
    pub fn is_native(self) -> bool {
        matches!(self, ElementKind::TextInput | ElementKind::TextArea)
    }

    pub fn is_editable(self) -> bool {
        self != ElementKind::Other
    }
}

pub fn element_kind(node: &Node) -> ElementKind {
    let Node::Element { name, .. } = node else {
        return ElementKind::Other;
    };

    // Disabled / read-only controls can't take a template.
    if has_attr(node, "disabled") || has_attr(node, "readonly") {
        return ElementKind::Other;
    }

    if name.eq_ignore_ascii_case("textarea") {
        return ElementKind::TextArea;
    }

    if name.eq_ignore_ascii_case("input") {
        let ty = attr(node, "type").map(str::trim).filter(|s| !s.is_empty());
        return match ty {
            None => ElementKind::TextInput, // missing type defaults to text
            Some(t)
                if ["text", "search", "email", "url", "tel"]
                    .iter()
                    .any(|k| t.eq_ignore_ascii_case(k)) =>
            {
                ElementKind::TextInput
            }
            _ => ElementKind::Other,
        };
    }

    match attr(node, "contenteditable").map(str::trim) {
        Some(v)
            if v.is_empty()
                || v.eq_ignore_ascii_case("true")
                || v.eq_ignore_ascii_case("plaintext-only") =>
        {
            ElementKind::ContentEditable
        }
        _ => ElementKind::Other,
    }
}

pub fn input_id(id: html::Id) -> InputId {
    InputId::from(id.0)
}

/// Seed the value store from the DOM: `value` attributes for inputs, text
/// children for textareas. Existing entries are kept.
pub fn seed_input_state_from_dom(store: &mut InputValueStore, dom: &Node) {
    for_each_element(dom, |node, _| match element_kind(node) {
        ElementKind::TextInput => {
            let initial = attr(node, "value").unwrap_or("");
            store.ensure_initial(input_id(node.id()), initial, LineMode::SingleLine);
        }
        ElementKind::TextArea => {
            let mut initial = String::new();
            collect_text(node.children(), &mut initial);
            // HTML textarea parsing: a leading newline is dropped.
            let initial = initial.strip_prefix('\n').unwrap_or(&initial);
            store.ensure_initial(input_id(node.id()), initial, LineMode::MultiLine);
        }
        _ => {}
    });
}

/// Drop stored values of controls no longer in `dom`. Node ids are never
/// reused, so a detached control cannot come back under the same id.
pub fn prune_detached_controls(store: &mut InputValueStore, dom: &Node) {
    let mut ids = Vec::new();
    subtree_ids(dom, &mut ids);
    let connected: HashSet<InputId> = ids.into_iter().map(input_id).collect();
    store.retain(|id| connected.contains(&id));
}
