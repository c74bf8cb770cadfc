//! Positioned-box layout.
//!
//! Host pages are modelled as absolutely positioned boxes: every rendered
//! element is placed at its computed `left`/`top` relative to its parent's box
//! and sized by its computed `width`/`height` (zero when unspecified). This is
//! all the geometry the picker needs: element rectangles as the page reports
//! them, not text flow.
//!
//! Boxes with a clipping `overflow` cut hit-testing of their descendants to
//! their own rectangle; reported rectangles stay unclipped.

use core_types::Point;
use css::{ComputedStyle, Position};
use html::{Id, Node};
use std::collections::HashMap;

mod hit_test;

pub use hit_test::hit_test;

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlap of two rectangles; zero-sized when they are disjoint.
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rectangle::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBox {
    /// Document coordinates, or viewport coordinates when `fixed`.
    pub rect: Rectangle,
    /// `position: fixed` on this element or an ancestor: unaffected by scrolling.
    pub fixed: bool,
    /// Area descendants of a clipping ancestor may be hit in, in the same
    /// space as `rect`. `None` when no ancestor clips.
    pub clip: Option<Rectangle>,
}

/// Lay out every rendered element. Elements that are `display: none` (or
/// inside one) get no box.
pub fn layout_positioned(root: &Node, styles: &HashMap<Id, ComputedStyle>) -> HashMap<Id, LayoutBox> {
    fn walk(
        node: &Node,
        origin: (f32, f32),
        fixed: bool,
        clip: Option<Rectangle>,
        styles: &HashMap<Id, ComputedStyle>,
        out: &mut HashMap<Id, LayoutBox>,
    ) {
        let Node::Element { id, children, .. } = node else {
            for c in node.children() {
                walk(c, origin, fixed, clip, styles, out);
            }
            return;
        };
        let Some(style) = styles.get(id) else {
            return;
        };
        if !style.rendered {
            return;
        }

        let is_fixed = style.position == Position::Fixed;
        // Fixed boxes are positioned against the viewport, not the parent.
        let (base_x, base_y) = if is_fixed { (0.0, 0.0) } else { origin };
        let rect = Rectangle::new(
            base_x + style.left.map_or(0.0, |l| l.px()),
            base_y + style.top.map_or(0.0, |l| l.px()),
            style.width.map_or(0.0, |l| l.px()),
            style.height.map_or(0.0, |l| l.px()),
        );
        // Fixed boxes escape ancestor clipping along with ancestor scrolling.
        let clip = if is_fixed { None } else { clip };
        let fixed = fixed || is_fixed;
        out.insert(*id, LayoutBox { rect, fixed, clip });

        let child_clip = if style.overflow.clips() {
            Some(clip.map_or(rect, |c| c.intersect(&rect)))
        } else {
            clip
        };
        for c in children {
            walk(c, (rect.x, rect.y), fixed, child_clip, styles, out);
        }
    }

    let mut out = HashMap::new();
    walk(root, (0.0, 0.0), false, None, styles, &mut out);
    out
}

#[cfg(test)]
mod tests;
