use super::*;
use html::build::{doc, elem, text};
use html::dom_utils::attr;
use html::{Document, Id, Node};

fn ids_with_attr(root: &Node, ids: &[Id], key: &str) -> Vec<String> {
    ids.iter()
        .filter_map(|id| html::dom_utils::find_node_by_id(root, *id))
        .filter_map(|n| attr(n, key).map(str::to_string))
        .collect()
}

fn chat_page() -> Document {
    Document::new(doc(vec![elem(
        "html",
        &[],
        vec![elem(
            "body",
            &[],
            vec![
                elem(
                    "form",
                    &[("data-k", "form")],
                    vec![
                        elem("div", &[("class", "ProseMirror editor"), ("contenteditable", "true"), ("data-k", "pm")], vec![]),
                        elem("textarea", &[("placeholder", "Ask anything"), ("data-k", "ta")], vec![]),
                    ],
                ),
                elem(
                    "rich-textarea",
                    &[("data-k", "rt")],
                    vec![elem(
                        "div",
                        &[("class", "ql-editor"), ("contenteditable", "true"), ("aria-label", "Enter a PROMPT here"), ("data-k", "ql")],
                        vec![],
                    )],
                ),
                elem("input", &[("type", "search"), ("id", "search"), ("data-k", "search")], vec![]),
            ],
        )],
    )]))
}

fn select(d: &Document, selector: &str) -> Vec<String> {
    let list = SelectorList::parse(selector).expect("valid selector");
    let ids = query_selector_all(d.root(), &list);
    ids_with_attr(d.root(), &ids, "data-k")
}

#[test]
fn parses_compound_and_combinators() {
    let list = parse_selector_list("form > div.a.b[contenteditable=\"true\"] span, #x").expect("parse");
    assert_eq!(list.selectors.len(), 2);
    let first = &list.selectors[0];
    assert_eq!(first.compounds.len(), 3);
    assert_eq!(
        first.combinators,
        vec![selector::Combinator::Child, selector::Combinator::Descendant]
    );
    assert_eq!(first.compounds[1].classes, vec!["a", "b"]);
    assert_eq!(first.specificity(), Specificity(0, 3, 3));
    assert_eq!(list.selectors[1].specificity(), Specificity(1, 0, 0));
}

#[test]
fn rejects_malformed_selectors() {
    for bad in ["", "   ", "div >", "[a", "[a=\"x]", "a,,b", ".", "#", "div ~ p", "[=x]"] {
        assert!(parse_selector_list(bad).is_err(), "{bad:?} should fail");
    }
}

#[test]
fn type_id_class_and_attribute_matching() {
    let d = chat_page();
    assert_eq!(select(&d, "textarea"), vec!["ta"]);
    assert_eq!(select(&d, "#search"), vec!["search"]);
    assert_eq!(select(&d, ".ProseMirror"), vec!["pm"]);
    assert_eq!(select(&d, "[contenteditable=\"true\"]"), vec!["pm", "ql"]);
    assert_eq!(select(&d, "textarea[placeholder]"), vec!["ta"]);
    assert_eq!(select(&d, "input[type='text']"), Vec::<String>::new());
}

#[test]
fn attribute_operators() {
    let d = chat_page();
    assert_eq!(select(&d, "[class~=editor]"), vec!["pm"]);
    assert_eq!(select(&d, "[placeholder^=Ask]"), vec!["ta"]);
    assert_eq!(select(&d, "[placeholder$=thing]"), vec!["ta"]);
    assert_eq!(select(&d, "[aria-label*=\"prompt\"]"), Vec::<String>::new());
    assert_eq!(select(&d, "[aria-label*=\"prompt\" i]"), vec!["ql"]);
    assert_eq!(select(&d, "[placeholder^=\"\"]"), Vec::<String>::new());
}

#[test]
fn descendant_and_child_combinators() {
    let d = chat_page();
    assert_eq!(select(&d, "form textarea"), vec!["ta"]);
    assert_eq!(select(&d, "body > form > textarea"), vec!["ta"]);
    assert_eq!(select(&d, "body > textarea"), Vec::<String>::new());
    assert_eq!(select(&d, "html rich-textarea .ql-editor"), vec!["ql"]);
    assert_eq!(select(&d, "form .ql-editor"), Vec::<String>::new());
}

#[test]
fn selector_lists_keep_document_order_without_duplicates() {
    let d = chat_page();
    assert_eq!(
        select(&d, "textarea, [contenteditable=\"true\"], .ProseMirror"),
        vec!["pm", "ta", "ql"]
    );
}

#[test]
fn cascade_prefers_inline_then_specificity_then_order() {
    let mut root = doc(vec![elem(
        "body",
        &[],
        vec![
            elem("style", &[], vec![text(
                "div { width: 10px; } .wide { width: 500px; } div { height: 40px; } #hidden { display: none }",
            )]),
            elem("div", &[("class", "wide"), ("data-k", "a")], vec![]),
            elem("div", &[("class", "wide"), ("style", "width: 20px"), ("data-k", "b")], vec![]),
            elem("div", &[("id", "hidden")], vec![elem("span", &[("data-k", "c")], vec![])]),
        ],
    )]);
    let mut css_text = String::new();
    html::dom_utils::collect_style_texts(&root, &mut css_text);
    let sheet = parse_stylesheet(&css_text);
    assert_eq!(sheet.rules.len(), 4);

    let d = Document::new(root.clone());
    root = d.root().clone();
    attach_styles(&mut root, &sheet);
    let styles = build_style_map(&root);

    let by_key = |k: &str| {
        let list = SelectorList::parse(&format!("[data-k={k}]")).expect("selector");
        let id = query_selector(&root, &list).expect("node");
        styles[&id]
    };
    assert_eq!(by_key("a").width, Some(Length::Px(500.0)));
    assert_eq!(by_key("a").height, Some(Length::Px(40.0)));
    assert_eq!(by_key("b").width, Some(Length::Px(20.0)));
    assert!(!by_key("c").rendered);
    assert!(!by_key("c").is_shown());
    assert!(by_key("a").is_shown());
}

#[test]
fn visibility_inherits_and_opacity_multiplies() {
    let parent = compute_style(
        &[("visibility".into(), "hidden".into()), ("opacity".into(), "50%".into())],
        None,
    );
    let child = compute_style(&[("opacity".into(), "0.5".into())], Some(&parent));
    assert_eq!(child.visibility, Visibility::Hidden);
    assert!((child.effective_opacity - 0.25).abs() < f32::EPSILON);

    let revealed = compute_style(&[("visibility".into(), "visible".into())], Some(&parent));
    assert!(revealed.is_shown());

    let transparent = compute_style(&[("opacity".into(), "0".into())], None);
    assert!(!transparent.is_shown());
}

#[test]
fn lengths_accept_zero_and_negative_offsets() {
    let s = compute_style(
        &[
            ("left".into(), "-40px".into()),
            ("top".into(), "0".into()),
            ("width".into(), "-5px".into()),
            ("position".into(), "fixed".into()),
        ],
        None,
    );
    assert_eq!(s.left, Some(Length::Px(-40.0)));
    assert_eq!(s.top, Some(Length::Px(0.0)));
    assert_eq!(s.width, None);
    assert_eq!(s.position, Position::Fixed);
}

#[test]
fn overflow_is_not_inherited() {
    let parent = compute_style(&[("overflow".into(), "Auto".into())], None);
    assert_eq!(parent.overflow, Overflow::Auto);
    assert!(parent.overflow.clips());
    let child = compute_style(&[], Some(&parent));
    assert_eq!(child.overflow, Overflow::Visible);
    let two_values = compute_style(&[("overflow".into(), "hidden auto".into())], None);
    assert!(!two_values.overflow.clips());
}

#[test]
fn substring_search_ignores_ascii_case() {
    assert!(contains_ignore_ascii_case("Enter a PROMPT here", b"prompt"));
    assert!(!contains_ignore_ascii_case("Enter a message", b"prompt"));
    assert!(contains_ignore_ascii_case("x", b""));
}
