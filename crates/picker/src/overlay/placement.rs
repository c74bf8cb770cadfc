//! Where the toggle and dropdown go for a given anchor rectangle.

use crate::config::OverlayConfig;
use core_types::{Point, Viewport};
use layout::Rectangle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropDirection {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Top-left of the toggle, viewport coordinates.
    pub toggle: Point,
    pub direction: DropDirection,
    /// Dropdown box, viewport coordinates.
    pub dropdown: Rectangle,
    /// `true` when no trustworthy anchor was available.
    pub fallback: bool,
}

/// Place the toggle inside the anchor's top-right corner, clamped into the
/// viewport with `margin`; without an anchor, use the fixed fallback spot
/// near the bottom-right corner.
///
/// The dropdown opens downward unless less than `dropdown_min_space` is free
/// below the toggle and more is free above.
pub fn place(
    anchor: Option<&Rectangle>,
    viewport: Viewport,
    cfg: &OverlayConfig,
    content_height: f32,
) -> Placement {
    let size = cfg.toggle_size;
    let (raw, fallback) = match anchor {
        Some(r) => (Point::new(r.right() - size - cfg.margin, r.y + cfg.margin), false),
        None => (
            Point::new(
                viewport.width - cfg.fallback_x - size,
                viewport.height - cfg.fallback_y - size,
            ),
            true,
        ),
    };
    let toggle = Point::new(
        clamp(raw.x, cfg.margin, viewport.width - size - cfg.margin),
        clamp(raw.y, cfg.margin, viewport.height - size - cfg.margin),
    );

    let space_above = toggle.y;
    let space_below = viewport.height - (toggle.y + size);
    let direction = if space_below < cfg.dropdown_min_space && space_above > space_below {
        DropDirection::Up
    } else {
        DropDirection::Down
    };

    let available = match direction {
        DropDirection::Down => space_below,
        DropDirection::Up => space_above,
    } - cfg.gap
        - cfg.margin;
    let height = content_height.min(cfg.dropdown_max_height).min(available).max(0.0);
    let width = cfg.dropdown_width;
    // Right-aligned with the toggle, then kept on screen.
    let x = clamp(
        toggle.x + size - width,
        cfg.margin,
        viewport.width - width - cfg.margin,
    );
    let y = match direction {
        DropDirection::Down => toggle.y + size + cfg.gap,
        DropDirection::Up => toggle.y - cfg.gap - height,
    };

    Placement {
        toggle,
        direction,
        dropdown: Rectangle::new(x, y, width, height),
        fallback,
    }
}

/// Like `f32::clamp`, but a too-small viewport pins to `lo` instead of panicking.
fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}
