#![allow(dead_code)]

use core_types::Viewport;
use html::build::{doc, elem, text};
use html::{Id, Node};
use page::{HostPage, Page};
use picker::overlay::ROOT_SELECTOR;
use picker::{PickerConfig, PromptCatalog, Runtime};

pub fn rect_style(x: f32, y: f32, w: f32, h: f32) -> String {
    format!("left: {x}px; top: {y}px; width: {w}px; height: {h}px")
}

/// Element with an absolutely positioned box plus `extra` inline declarations.
pub fn boxed(name: &str, attrs: &[(&str, &str)], rect: (f32, f32, f32, f32), extra: &str) -> Node {
    let style = format!("{}; {extra}", rect_style(rect.0, rect.1, rect.2, rect.3));
    let mut all: Vec<(&str, &str)> = attrs.to_vec();
    all.push(("style", &style));
    elem(name, &all, vec![])
}

pub fn boxed_with_text(
    name: &str,
    attrs: &[(&str, &str)],
    rect: (f32, f32, f32, f32),
    content: &str,
) -> Node {
    let style = rect_style(rect.0, rect.1, rect.2, rect.3);
    let mut all: Vec<(&str, &str)> = attrs.to_vec();
    all.push(("style", &style));
    elem(name, &all, vec![text(content)])
}

/// `<html><body>children</body></html>`, body sized to the viewport.
pub fn page_with(host: &str, viewport: Viewport, children: Vec<Node>) -> Page {
    let body_style = rect_style(0.0, 0.0, viewport.width, viewport.height);
    let root = doc(vec![elem(
        "html",
        &[],
        vec![elem("body", &[("style", &body_style)], children)],
    )]);
    Page::new(host, root).with_viewport(viewport)
}

/// A composer-sized rectangle near the bottom middle of `vp`.
pub fn composer_rect(vp: Viewport) -> (f32, f32, f32, f32) {
    let w = (vp.width * 0.5).max(220.0);
    let h = 60.0;
    (vp.width / 2.0 - w / 2.0, vp.height * 0.75 - h / 2.0, w, h)
}

pub fn body(page: &Page) -> Id {
    page.document().body_id().expect("body")
}

pub fn overlay_roots(page: &Page) -> Vec<Id> {
    let list = css::SelectorList::parse(ROOT_SELECTOR).expect("selector");
    page.query_selector_all(&list)
}

pub fn is_shown(page: &Page, id: Id) -> bool {
    page.computed_style(id).is_some_and(|s| s.is_shown())
}

/// Config with no startup delay and the default tick interval.
pub fn immediate_config() -> PickerConfig {
    let mut cfg = PickerConfig::default();
    cfg.timing.startup_delay_ms = Some(0);
    cfg
}

pub fn start(page: Page) -> Runtime<Page> {
    Runtime::new(page, immediate_config(), PromptCatalog::builtin(), 0)
}

/// Feed the page's pending mutation records to the runtime.
pub fn flush_mutations(rt: &mut Runtime<Page>, now: u64) {
    let records = rt.page_mut().take_mutations();
    rt.on_mutations(&records, now);
}
