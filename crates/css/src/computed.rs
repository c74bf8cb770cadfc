use crate::values::{
    Display, Length, Overflow, Position, Visibility, parse_display, parse_length, parse_opacity,
    parse_overflow, parse_position, parse_visibility,
};
use html::{Id, Node};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Not inherited. Per-element default when unspecified.
    pub display: Display,

    /// Inherited. Initial: visible.
    pub visibility: Visibility,

    /// Not inherited, but see `effective_opacity`.
    pub opacity: f32,

    /// Product of this element's and every ancestor's opacity.
    pub effective_opacity: f32,

    /// `false` when this element or any ancestor is `display: none`.
    pub rendered: bool,

    pub position: Position,
    pub left: Option<Length>,
    pub top: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,

    /// Not inherited. Initial: visible.
    pub overflow: Overflow,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            display: Display::Block,
            visibility: Visibility::Visible,
            opacity: 1.0,
            effective_opacity: 1.0,
            rendered: true,
            position: Position::Static,
            left: None,
            top: None,
            width: None,
            height: None,
            overflow: Overflow::Visible,
        }
    }

    /// Painted and not see-through: what `getComputedStyle`-based visibility
    /// checks look at.
    pub fn is_shown(&self) -> bool {
        self.rendered
            && self.visibility == Visibility::Visible
            && self.effective_opacity > 0.0
    }
}

/// Compute the final, inherited style for an element, given:
/// - its specified declarations (Node.style)
/// - an optional parent computed style.
pub fn compute_style(
    specified: &[(String, String)],
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    // 1. Start from initial values
    let mut result = ComputedStyle::initial();

    // 2. Apply inheritance (per property)
    if let Some(p) = parent {
        result.visibility = p.visibility;
    }

    // 3. Apply specified declarations (override inherited/initial)
    for (name, value) in specified {
        match name.as_str() {
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
            }
            "visibility" => {
                if let Some(v) = parse_visibility(value) {
                    result.visibility = v;
                }
            }
            "opacity" => {
                if let Some(o) = parse_opacity(value) {
                    result.opacity = o;
                }
            }
            "position" => {
                if let Some(p) = parse_position(value) {
                    result.position = p;
                }
            }
            "overflow" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow = o;
                }
            }
            "left" => result.left = parse_length(value),
            "top" => result.top = parse_length(value),
            "width" => result.width = parse_length(value).filter(|l| l.px() >= 0.0),
            "height" => result.height = parse_length(value).filter(|l| l.px() >= 0.0),
            _ => {
                // unknown declarations are ignored, as browsers do
            }
        }
    }

    // 4. Derived values
    let parent_rendered = parent.is_none_or(|p| p.rendered);
    let parent_opacity = parent.map_or(1.0, |p| p.effective_opacity);
    result.rendered = parent_rendered && result.display != Display::None;
    result.effective_opacity = parent_opacity * result.opacity;

    result
}

fn default_display_for(tag: &str) -> Display {
    // Roughly follows HTML default display types.
    if tag.eq_ignore_ascii_case("span")
        || tag.eq_ignore_ascii_case("a")
        || tag.eq_ignore_ascii_case("em")
        || tag.eq_ignore_ascii_case("strong")
        || tag.eq_ignore_ascii_case("b")
        || tag.eq_ignore_ascii_case("i")
        || tag.eq_ignore_ascii_case("code")
        || tag.eq_ignore_ascii_case("img")
    {
        return Display::Inline;
    }
    if tag.eq_ignore_ascii_case("input")
        || tag.eq_ignore_ascii_case("textarea")
        || tag.eq_ignore_ascii_case("button")
    {
        return Display::InlineBlock;
    }
    if tag.eq_ignore_ascii_case("li") {
        return Display::ListItem;
    }
    if html::dom_utils::is_non_rendering_element_name(tag) {
        return Display::None;
    }
    Display::Block
}

/// Computed style of every element in the tree, keyed by node id.
pub fn build_style_map(root: &Node) -> HashMap<Id, ComputedStyle> {
    fn walk(node: &Node, parent: Option<&ComputedStyle>, out: &mut HashMap<Id, ComputedStyle>) {
        match node {
            Node::Element {
                id,
                name,
                style,
                children,
                ..
            } => {
                let has_display_decl = style
                    .iter()
                    .any(|(prop, _)| prop.eq_ignore_ascii_case("display"));
                let mut computed = compute_style(style, parent);
                if !has_display_decl {
                    computed.display = default_display_for(name);
                    let parent_rendered = parent.is_none_or(|p| p.rendered);
                    computed.rendered = parent_rendered && computed.display != Display::None;
                }
                out.insert(*id, computed);
                for c in children {
                    walk(c, Some(&computed), out);
                }
            }
            Node::Document { children, .. } => {
                for c in children {
                    walk(c, parent, out);
                }
            }
            _ => {}
        }
    }
    let mut out = HashMap::new();
    walk(root, None, &mut out);
    out
}
