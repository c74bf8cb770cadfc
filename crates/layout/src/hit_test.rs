use crate::{LayoutBox, Rectangle};
use core_types::Point;
use html::{Id, Node};
use std::collections::HashMap;

/// Topmost element under `point` (viewport coordinates), given each box's
/// viewport rectangle. Later siblings and descendants paint on top. Parts of
/// a box outside its clip are not hit.
pub fn hit_test(
    root: &Node,
    boxes: &HashMap<Id, LayoutBox>,
    to_viewport: impl Fn(&LayoutBox) -> Rectangle,
    point: Point,
) -> Option<Id> {
    fn walk(
        node: &Node,
        boxes: &HashMap<Id, LayoutBox>,
        to_viewport: &dyn Fn(&LayoutBox) -> Rectangle,
        point: Point,
    ) -> Option<Id> {
        // children in reverse order = later painted on top
        for c in node.children().iter().rev() {
            if let Some(hit) = walk(c, boxes, to_viewport, point) {
                return Some(hit);
            }
        }
        let b = boxes.get(&node.id())?;
        let r = to_viewport(b);
        let clipped_out = b
            .clip
            .is_some_and(|c| !to_viewport(&LayoutBox { rect: c, ..*b }).contains(point));
        (r.width > 0.0 && r.height > 0.0 && r.contains(point) && !clipped_out).then(|| node.id())
    }
    walk(root, boxes, &to_viewport, point)
}
