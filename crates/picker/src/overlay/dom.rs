//! Overlay subtree construction.
//!
//! ```text
//! div[data-promptdock-helper=root]          position: fixed
//!   button[data-promptdock-helper=toggle]
//!   div[data-promptdock-helper=dropdown]    overflow: auto
//!     div[data-promptdock-helper=list]      top: -scroll offset
//!       section[data-category=c]
//!         div[data-promptdock-helper=label]
//!         div[data-subcategory=c/s]
//!           div[data-promptdock-helper=label]
//!           button[data-prompt=c/s/p]
//! ```
//!
//! Rows are stacked with explicit offsets, each relative to its parent box.
//! The list is as tall as its content; the dropdown clips it.

use crate::catalog::PromptCatalog;
use crate::config::OverlayConfig;
use html::Node;
use html::build::{elem, text};

/// Marker attribute on every structural overlay node.
pub const HELPER_ATTR: &str = "data-promptdock-helper";
pub const ROOT_SELECTOR: &str = r#"[data-promptdock-helper="root"]"#;
pub const TOGGLE_SELECTOR: &str = r#"[data-promptdock-helper="toggle"]"#;
pub const DROPDOWN_SELECTOR: &str = r#"[data-promptdock-helper="dropdown"]"#;
pub const LIST_SELECTOR: &str = r#"[data-promptdock-helper="list"]"#;
pub const PROMPT_ATTR: &str = "data-prompt";

pub fn px(v: f32) -> String {
    format!("{v}px")
}

fn row_style(top_rows: usize, rows: usize, cfg: &OverlayConfig) -> String {
    format!(
        "left: 0px; top: {}; width: {}; height: {}",
        px(top_rows as f32 * cfg.row_height),
        px(cfg.dropdown_width),
        px(rows as f32 * cfg.row_height)
    )
}

fn label(name: &str, top_rows: usize, cfg: &OverlayConfig) -> Node {
    elem(
        "div",
        &[(HELPER_ATTR, "label"), ("style", &row_style(top_rows, 1, cfg))],
        vec![text(name)],
    )
}

/// Number of dropdown rows: one label per category and subcategory plus one
/// per prompt.
pub fn row_count(catalog: &PromptCatalog) -> usize {
    catalog
        .categories
        .iter()
        .map(|c| 1 + c.subcategories.iter().map(|s| 1 + s.prompts.len()).sum::<usize>())
        .sum()
}

pub fn content_height(catalog: &PromptCatalog, cfg: &OverlayConfig) -> f32 {
    row_count(catalog) as f32 * cfg.row_height
}

/// Build the overlay, hidden, with the dropdown closed.
pub fn build_overlay(catalog: &PromptCatalog, cfg: &OverlayConfig) -> Node {
    let mut sections = Vec::with_capacity(catalog.categories.len());
    let mut section_top = 0;
    for (ci, cat) in catalog.categories.iter().enumerate() {
        let mut children = vec![label(&cat.name, 0, cfg)];
        let mut sub_top = 1;
        for (si, sub) in cat.subcategories.iter().enumerate() {
            let mut rows = vec![label(&sub.name, 0, cfg)];
            for (pi, prompt) in sub.prompts.iter().enumerate() {
                let key = format!("{ci}/{si}/{pi}");
                rows.push(elem(
                    "button",
                    &[
                        (PROMPT_ATTR, &key),
                        ("title", &prompt.title),
                        ("style", &row_style(1 + pi, 1, cfg)),
                    ],
                    vec![text(&prompt.title)],
                ));
            }
            let sub_rows = 1 + sub.prompts.len();
            children.push(elem(
                "div",
                &[
                    ("data-subcategory", &format!("{ci}/{si}")),
                    ("style", &row_style(sub_top, sub_rows, cfg)),
                ],
                rows,
            ));
            sub_top += sub_rows;
        }
        sections.push(elem(
            "section",
            &[
                ("data-category", &ci.to_string()),
                ("style", &row_style(section_top, sub_top, cfg)),
            ],
            children,
        ));
        section_top += sub_top;
    }

    let size = px(cfg.toggle_size);
    elem(
        "div",
        &[
            (HELPER_ATTR, "root"),
            (
                "style",
                &format!(
                    "position: fixed; display: none; left: 0px; top: 0px; width: {size}; height: {size}"
                ),
            ),
        ],
        vec![
            elem(
                "button",
                &[
                    (HELPER_ATTR, "toggle"),
                    ("aria-label", "Prompt templates"),
                    (
                        "style",
                        &format!("left: 0px; top: 0px; width: {size}; height: {size}"),
                    ),
                ],
                vec![text("✎")],
            ),
            elem(
                "div",
                &[
                    (HELPER_ATTR, "dropdown"),
                    (
                        "style",
                        &format!(
                            "display: none; overflow: auto; left: 0px; top: 0px; width: {}; height: 0px",
                            px(cfg.dropdown_width)
                        ),
                    ),
                ],
                vec![elem(
                    "div",
                    &[
                        (HELPER_ATTR, "list"),
                        ("style", &row_style(0, row_count(catalog), cfg)),
                    ],
                    sections,
                )],
            ),
        ],
    )
}
