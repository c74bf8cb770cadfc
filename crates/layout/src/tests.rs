use super::*;
use css::build_style_map;
use html::build::{doc, elem};
use html::{Document, dom_utils::attr};

fn laid_out(root: Node) -> (Node, HashMap<Id, LayoutBox>) {
    let d = Document::new(root);
    let mut root = d.root().clone();
    css::attach_styles(&mut root, &css::Stylesheet::default());
    let styles = build_style_map(&root);
    let boxes = layout_positioned(&root, &styles);
    (root, boxes)
}

fn id_of(root: &Node, key: &str) -> Id {
    let mut found = None;
    html::traverse::for_each_element(root, |n, _| {
        if attr(n, "data-k") == Some(key) {
            found = Some(n.id());
        }
    });
    found.expect("element")
}

#[test]
fn boxes_are_offset_from_parent() {
    let (root, boxes) = laid_out(doc(vec![elem(
        "body",
        &[],
        vec![elem(
            "main",
            &[("style", "left: 100px; top: 50px; width: 800px; height: 600px")],
            vec![elem(
                "textarea",
                &[("data-k", "ta"), ("style", "left: 10px; top: 500px; width: 700px; height: 60px")],
                vec![],
            )],
        )],
    )]));
    let ta = boxes[&id_of(&root, "ta")];
    assert_eq!(ta.rect, Rectangle::new(110.0, 550.0, 700.0, 60.0));
    assert!(!ta.fixed);
}

#[test]
fn fixed_boxes_ignore_parent_origin() {
    let (root, boxes) = laid_out(doc(vec![elem(
        "body",
        &[("style", "left: 300px; top: 300px")],
        vec![elem(
            "div",
            &[("data-k", "f"), ("style", "position: fixed; left: 5px; top: 6px; width: 10px; height: 10px")],
            vec![elem("span", &[("data-k", "inner"), ("style", "left: 1px; top: 1px")], vec![])],
        )],
    )]));
    let f = boxes[&id_of(&root, "f")];
    assert_eq!(f.rect, Rectangle::new(5.0, 6.0, 10.0, 10.0));
    assert!(f.fixed);
    assert!(boxes[&id_of(&root, "inner")].fixed);
}

#[test]
fn display_none_subtrees_have_no_box() {
    let (root, boxes) = laid_out(doc(vec![elem(
        "body",
        &[],
        vec![elem(
            "div",
            &[("style", "display: none; width: 10px; height: 10px")],
            vec![elem("textarea", &[("data-k", "gone")], vec![])],
        )],
    )]));
    assert!(!boxes.contains_key(&id_of(&root, "gone")));
}

#[test]
fn hit_test_prefers_topmost() {
    let (root, boxes) = laid_out(doc(vec![elem(
        "body",
        &[("style", "width: 1000px; height: 1000px")],
        vec![
            elem("div", &[("data-k", "under"), ("style", "width: 100px; height: 100px")], vec![]),
            elem("div", &[("data-k", "over"), ("style", "left: 50px; width: 100px; height: 100px")], vec![]),
        ],
    )]));
    let hit = |x, y| hit_test(&root, &boxes, |b| b.rect, Point::new(x, y));
    assert_eq!(hit(75.0, 50.0), Some(id_of(&root, "over")));
    assert_eq!(hit(10.0, 50.0), Some(id_of(&root, "under")));
    assert_eq!(hit(500.0, 500.0), Some(root.children()[0].id()));
    assert_eq!(hit(5000.0, 5.0), None);
}

#[test]
fn overflow_clips_hit_testing_of_descendants() {
    let (root, boxes) = laid_out(doc(vec![elem(
        "body",
        &[("style", "width: 1000px; height: 1000px")],
        vec![
            elem("div", &[("data-k", "below"), ("style", "top: 300px; width: 100px; height: 50px")], vec![]),
            elem(
                "div",
                &[("data-k", "box"), ("style", "top: 100px; width: 100px; height: 100px; overflow: auto")],
                vec![elem(
                    "div",
                    &[("data-k", "long"), ("style", "top: -20px; width: 100px; height: 400px")],
                    vec![],
                )],
            ),
        ],
    )]));
    let hit = |x, y| hit_test(&root, &boxes, |b| b.rect, Point::new(x, y));
    assert_eq!(hit(50.0, 150.0), Some(id_of(&root, "long")));
    // the overflowing part sits over "below" but is clipped away
    assert_eq!(hit(50.0, 320.0), Some(id_of(&root, "below")));
    assert_eq!(hit(50.0, 90.0), Some(root.children()[0].id()));

    let long = boxes[&id_of(&root, "long")];
    assert_eq!(long.rect, Rectangle::new(0.0, 80.0, 100.0, 400.0));
    assert_eq!(long.clip, Some(Rectangle::new(0.0, 100.0, 100.0, 100.0)));
    assert_eq!(boxes[&id_of(&root, "box")].clip, None);
}

#[test]
fn rectangle_helpers() {
    let r = Rectangle::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center(), Point::new(25.0, 40.0));
    assert_eq!(r.area(), 1200.0);
    assert!(r.contains(Point::new(10.0, 60.0)));
    assert!(!Rectangle::new(f32::NAN, 0.0, 1.0, 1.0).is_finite());
    assert_eq!(
        r.intersect(&Rectangle::new(20.0, 0.0, 100.0, 30.0)),
        Rectangle::new(20.0, 20.0, 20.0, 10.0)
    );
    assert_eq!(r.intersect(&Rectangle::new(100.0, 100.0, 5.0, 5.0)).area(), 0.0);
}
