//! Visibility/Geometry Validator.
//!
//! Layout can be transiently inconsistent (elements mid-transition, pages
//! mid-reflow), so nothing positions the overlay against a rectangle that has
//! not passed [`check_rect`].

use crate::config::ViabilityConfig;
use crate::error::GeometryError;
use core_types::Viewport;
use html::Id;
use layout::Rectangle;
use page::HostPage;

/// Rendered with a non-zero size at a non-negative position, and not hidden
/// by `display`, `visibility` or `opacity`.
pub fn is_visible<P: HostPage + ?Sized>(page: &P, id: Id) -> bool {
    let Some(rect) = page.bounding_rect(id) else {
        return false;
    };
    if !rect.is_finite() || rect.width <= 0.0 || rect.height <= 0.0 {
        return false;
    }
    if rect.x < 0.0 || rect.y < 0.0 {
        return false;
    }
    page.computed_style(id).is_some_and(|s| s.is_shown())
}

/// [`is_visible`], large enough to be a chat composer, and close enough to
/// the middle of the viewport.
pub fn is_viable<P: HostPage + ?Sized>(page: &P, id: Id, cfg: &ViabilityConfig) -> bool {
    if !is_visible(page, id) {
        return false;
    }
    let Some(rect) = page.bounding_rect(id) else {
        return false;
    };
    rect_is_viable(&rect, page.viewport(), cfg)
}

/// Size and position part of [`is_viable`].
pub fn rect_is_viable(rect: &Rectangle, viewport: Viewport, cfg: &ViabilityConfig) -> bool {
    if rect.width < cfg.min_width || rect.height < cfg.min_height {
        return false;
    }
    if viewport.is_degenerate() || rect.x >= viewport.width || rect.y >= viewport.height {
        return false;
    }
    let center = rect.center();
    let mid = viewport.center();
    (center.x - mid.x).abs() <= cfg.max_center_offset * viewport.width
        && (center.y - mid.y).abs() <= cfg.max_center_offset * viewport.height
}

/// Sanity check a rectangle before the overlay is placed against it.
pub fn check_rect(rect: &Rectangle, viewport: Viewport) -> Result<(), GeometryError> {
    if !rect.is_finite() {
        return Err(GeometryError::NonFinite);
    }
    if rect.x < 0.0 || rect.y < 0.0 {
        return Err(GeometryError::Negative);
    }
    if viewport.is_degenerate() || rect.x > viewport.width || rect.y > viewport.height {
        return Err(GeometryError::OutOfViewport);
    }
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(GeometryError::Degenerate);
    }
    Ok(())
}

pub fn rect_valid(rect: &Rectangle, viewport: Viewport) -> bool {
    check_rect(rect, viewport).is_ok()
}
