/// CSS Length value, currently only supports `px`,
/// but keep this extensible for `em`, `%`, etc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    pub fn px(self) -> f32 {
        let Length::Px(v) = self;
        v
    }
}

/// CSS `display` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    Flex,
    Grid,
    ListItem,
    None,
}

/// CSS `visibility` value. Inherited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
}

/// CSS `position` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

/// CSS `overflow` value. Anything but `visible` clips descendants to the
/// element's box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl Overflow {
    pub fn clips(self) -> bool {
        self != Overflow::Visible
    }
}

/// Parse `<number>px` (or a bare `0`). Negative values are allowed; callers
/// that need non-negative lengths check themselves.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();
    if v == "0" {
        return Some(Length::Px(0.0));
    }
    let num = v.strip_suffix("px")?.trim().parse::<f32>().ok()?;
    num.is_finite().then_some(Length::Px(num))
}

pub fn parse_display(value: &str) -> Option<Display> {
    let v = value.trim().to_ascii_lowercase();

    match v.as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "flex" | "inline-flex" => Some(Display::Flex),
        "grid" | "inline-grid" => Some(Display::Grid),
        "list-item" => Some(Display::ListItem),
        "none" => Some(Display::None),
        _ => None, // unknown / unsupported → ignored
    }
}

pub fn parse_visibility(value: &str) -> Option<Visibility> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Some(Visibility::Visible),
        "hidden" => Some(Visibility::Hidden),
        "collapse" => Some(Visibility::Collapse),
        _ => None,
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        "fixed" => Some(Position::Fixed),
        "sticky" => Some(Position::Sticky),
        _ => None,
    }
}

/// Only the single-keyword form; `overflow: hidden auto` is ignored.
pub fn parse_overflow(value: &str) -> Option<Overflow> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Some(Overflow::Visible),
        "hidden" => Some(Overflow::Hidden),
        "clip" => Some(Overflow::Clip),
        "scroll" => Some(Overflow::Scroll),
        "auto" => Some(Overflow::Auto),
        _ => None,
    }
}

/// `opacity` accepts a number or a percentage and is clamped to `0..=1`.
pub fn parse_opacity(value: &str) -> Option<f32> {
    let v = value.trim();
    let n = if let Some(pct) = v.strip_suffix('%') {
        pct.trim().parse::<f32>().ok()? / 100.0
    } else {
        v.parse::<f32>().ok()?
    };
    n.is_finite().then(|| n.clamp(0.0, 1.0))
}
