mod support;

use core_types::{Point, Viewport};
use html::build::elem;
use layout::Rectangle;
use page::{HostPage, Page};
use picker::locator::{Candidate, Tier};
use picker::overlay::{PROMPT_ATTR, build_overlay};
use picker::{
    ClickAction, EntryRef, OverlayController, OverlayState, PassReason, PickerConfig,
    PromptCatalog, Runtime, SelectError, Transition,
};
use support::{
    body, boxed, flush_mutations, immediate_config, is_shown, overlay_roots, page_with, start,
};

const VP: Viewport = Viewport::new(1920.0, 1080.0);
const COMPOSER: (f32, f32, f32, f32) = (480.0, 780.0, 960.0, 60.0);

fn chatgpt_page() -> Page {
    page_with(
        "chatgpt.com",
        VP,
        vec![boxed("textarea", &[("id", "prompt-textarea"), ("placeholder", "Ask anything")], COMPOSER, "")],
    )
}

fn attached() -> Runtime<Page> {
    let mut rt = start(chatgpt_page());
    let report = rt.on_time(0).expect("startup pass");
    assert_eq!(report.reason, PassReason::Startup);
    assert_eq!(report.transition, Transition::Attached);
    rt
}

fn center(r: Rectangle) -> Point {
    r.center()
}

#[test]
fn unknown_site_never_creates_an_overlay_or_touches_the_dom() {
    let page = page_with(
        "example.com",
        VP,
        vec![boxed("textarea", &[("id", "prompt-textarea")], COMPOSER, "")],
    );
    let mut rt = Runtime::new(page, PickerConfig::default(), PromptCatalog::builtin(), 0);
    assert!(rt.is_dormant());

    let b = body(rt.page());
    rt.page_mut().append(b, elem("p", &[], vec![]));
    let host_records = rt.page_mut().take_mutations();
    assert_eq!(host_records.len(), 1);

    for now in (0..=10_000).step_by(100) {
        assert_eq!(rt.on_time(now), None);
        assert_eq!(rt.on_scroll(now), None);
        assert_eq!(rt.on_resize(now), None);
        assert_eq!(rt.on_mutations(&host_records, now), None);
    }
    let composer = rt.page().find("#prompt-textarea").expect("composer");
    let rect = rt.page().bounding_rect(composer).expect("rect");
    assert_eq!(rt.on_click(center(rect)), ClickAction::Outside);
    assert_eq!(rt.select(EntryRef::new(0, 0, 0)), Err(SelectError::Dormant));

    assert_eq!(rt.state(), OverlayState::Absent);
    assert!(overlay_roots(rt.page()).is_empty());
    assert!(rt.page_mut().take_mutations().is_empty());
    assert!(rt.page().events().is_empty());
    assert_eq!(rt.page().value(composer).as_deref(), Some(""));
    assert_eq!(rt.scheduler().passes_run(), 0);
}

#[test]
fn startup_pass_waits_for_the_site_init_delay() {
    let mut rt = Runtime::new(chatgpt_page(), PickerConfig::default(), PromptCatalog::builtin(), 0);
    assert!(!rt.is_dormant());
    assert_eq!(rt.on_time(500), None);

    let b = body(rt.page());
    rt.page_mut().append(b, elem("p", &[], vec![]));
    flush_mutations(&mut rt, 600);
    assert_eq!(rt.on_time(999), None);
    assert_eq!(rt.state(), OverlayState::Absent);

    let report = rt.on_time(1000).expect("startup");
    // The held mutation request merged into the startup pass.
    assert_eq!(report.reason, PassReason::Startup);
    assert_eq!(report.transition, Transition::Attached);
    assert_eq!(rt.scheduler().passes_run(), 1);
}

#[test]
fn attaches_one_visible_overlay_anchored_to_the_composer() {
    let rt = attached();
    assert_eq!(rt.state(), OverlayState::AttachedVisible);
    let roots = overlay_roots(rt.page());
    assert_eq!(roots.len(), 1);
    assert!(is_shown(rt.page(), roots[0]));
    // Toggle inside the composer's top-right corner.
    assert_eq!(
        rt.page().bounding_rect(roots[0]),
        Some(Rectangle::new(1440.0 - 32.0 - 8.0, 788.0, 32.0, 32.0))
    );
    let target = rt.overlay().target().expect("target");
    assert_eq!(Some(target.id), rt.page().find("#prompt-textarea"));
    assert_eq!(target.selector, "#prompt-textarea");
}

#[test]
fn removed_target_hides_the_overlay_within_one_tick() {
    let mut rt = attached();
    let root = overlay_roots(rt.page())[0];
    let target = rt.page().find("#prompt-textarea").expect("target");
    rt.page_mut().detach(target);

    // No mutation delivery at all: the timer alone must notice.
    assert_eq!(rt.on_time(499), None);
    let report = rt.on_time(500).expect("tick");
    assert_eq!(report.reason, PassReason::Tick);
    assert_eq!(report.transition, Transition::Hidden);
    assert_eq!(rt.state(), OverlayState::AttachedHidden);
    // Hidden, not removed.
    assert_eq!(overlay_roots(rt.page()), vec![root]);
    assert!(!is_shown(rt.page(), root));
}

#[test]
fn removal_reported_by_the_watcher_hides_immediately() {
    let mut rt = attached();
    let target = rt.page().find("#prompt-textarea").expect("target");
    rt.page_mut().detach(target);
    let records = rt.page_mut().take_mutations();
    let report = rt.on_mutations(&records, 10).expect("mutation pass");
    assert_eq!(report.reason, PassReason::Mutation);
    assert_eq!(report.transition, Transition::Hidden);
}

#[test]
fn reappearing_target_shows_the_same_overlay_at_the_new_spot() {
    let mut rt = attached();
    let root = overlay_roots(rt.page())[0];
    let old = rt.page().find("#prompt-textarea").expect("target");
    rt.page_mut().detach(old);
    assert_eq!(rt.on_time(500).map(|r| r.transition), Some(Transition::Hidden));

    let b = body(rt.page());
    let fresh = rt
        .page_mut()
        .append(b, boxed("textarea", &[("id", "prompt-textarea")], (300.0, 700.0, 800.0, 80.0), ""))
        .expect("appended");
    let report = rt.on_time(1000).expect("tick");
    assert_eq!(report.transition, Transition::Shown);
    assert_eq!(rt.state(), OverlayState::AttachedVisible);
    assert_eq!(overlay_roots(rt.page()), vec![root]);
    assert!(is_shown(rt.page(), root));
    assert_eq!(rt.overlay().target().map(|t| t.id), Some(fresh));
    assert_eq!(
        rt.page().bounding_rect(root),
        Some(Rectangle::new(1100.0 - 40.0, 708.0, 32.0, 32.0))
    );
}

#[test]
fn watcher_reattaches_when_the_composer_is_mounted_later() {
    // Page loads before the app renders its composer.
    let page = page_with("chatgpt.com", VP, vec![elem("main", &[], vec![])]);
    let mut rt = start(page);
    let report = rt.on_time(0).expect("startup");
    assert_eq!(report.transition, Transition::Unchanged);
    assert_eq!(rt.state(), OverlayState::Absent);

    let main = rt.page().find("main").expect("main");
    rt.page_mut()
        .append(main, boxed("textarea", &[("id", "prompt-textarea")], COMPOSER, ""));
    let records = rt.page_mut().take_mutations();
    let report = rt.on_mutations(&records, 50).expect("mutation pass");
    assert_eq!(report.transition, Transition::Attached);
    assert_eq!(overlay_roots(rt.page()).len(), 1);
}

#[test]
fn overlay_mutations_do_not_trigger_passes() {
    let mut rt = attached();
    let records = rt.page_mut().take_mutations();
    assert!(!records.is_empty(), "attaching writes to the DOM");
    assert_eq!(rt.on_mutations(&records, 10), None);
    assert_eq!(rt.scheduler().passes_run(), 1);
    assert_eq!(rt.watcher().batches_seen(), 1);
}

#[test]
fn host_wiping_the_body_gets_exactly_one_new_overlay() {
    let mut rt = attached();
    let old_root = overlay_roots(rt.page())[0];
    let b = body(rt.page());
    rt.page_mut().replace_children(
        b,
        vec![boxed("textarea", &[("id", "prompt-textarea")], COMPOSER, "")],
    );
    let records = rt.page_mut().take_mutations();
    let report = rt.on_mutations(&records, 20).expect("pass");
    assert_eq!(report.transition, Transition::Reattached);
    let roots = overlay_roots(rt.page());
    assert_eq!(roots.len(), 1);
    assert_ne!(roots[0], old_root);
    assert!(is_shown(rt.page(), roots[0]));

    // Steady state afterwards.
    assert_eq!(rt.on_time(500).map(|r| r.transition), Some(Transition::Unchanged));
    assert_eq!(overlay_roots(rt.page()).len(), 1);
}

#[test]
fn existing_overlay_is_adopted_and_strays_removed() {
    let catalog = PromptCatalog::builtin();
    let cfg = PickerConfig::default();
    let page = page_with(
        "chatgpt.com",
        VP,
        vec![
            boxed("textarea", &[("id", "prompt-textarea")], COMPOSER, ""),
            build_overlay(&catalog, &cfg.overlay),
            build_overlay(&catalog, &cfg.overlay),
        ],
    );
    let before = overlay_roots(&page);
    assert_eq!(before.len(), 2);

    let mut rt = start(page);
    rt.on_time(0).expect("startup");
    assert_eq!(overlay_roots(rt.page()), vec![before[0]]);
    assert_eq!(rt.overlay().overlay_id(), Some(before[0]));
    assert!(is_shown(rt.page(), before[0]));
}

#[test]
fn toggle_select_and_outside_clicks() {
    let mut rt = attached();
    let root = overlay_roots(rt.page())[0];
    let toggle_at = center(rt.page().bounding_rect(root).expect("root rect"));

    assert_eq!(rt.on_click(toggle_at), ClickAction::Toggle);
    assert!(rt.overlay().is_open());
    assert_eq!(rt.on_click(toggle_at), ClickAction::Toggle);
    assert!(!rt.overlay().is_open());

    // Outside click closes an open dropdown.
    rt.on_click(toggle_at);
    assert_eq!(rt.on_click(Point::new(5.0, 5.0)), ClickAction::Outside);
    assert!(!rt.overlay().is_open());

    // Labels are inside but inert.
    rt.on_click(toggle_at);
    let label = rt.page().find(r#"[data-promptdock-helper="label"]"#).expect("label");
    let label_at = center(rt.page().bounding_rect(label).expect("label rect"));
    assert_eq!(rt.on_click(label_at), ClickAction::Inside);
    assert!(rt.overlay().is_open());

    let entry = EntryRef::new(0, 0, 1);
    let item = rt
        .page()
        .find(&format!(r#"[{PROMPT_ATTR}="{entry}"]"#))
        .expect("item");
    let item_at = center(rt.page().bounding_rect(item).expect("item rect"));
    assert_eq!(rt.on_click(item_at), ClickAction::Select(entry));
    assert!(!rt.overlay().is_open());

    let composer = rt.page().find("#prompt-textarea").expect("composer");
    let expected = PromptCatalog::builtin().entry(entry).expect("entry").text.clone();
    assert_eq!(rt.page().value(composer), Some(expected));
    assert_eq!(rt.page().focused(), Some(composer));
    assert_eq!(rt.page().events_for(composer, "input"), 1);
}

/// One category, one subcategory, `n` prompts titled `t0..`.
fn bulk_catalog(n: usize) -> PromptCatalog {
    let prompts: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"title": "t{i}", "text": "text {i}"}}"#))
        .collect();
    let json = format!(
        r#"{{"categories": [{{"name": "Bulk", "subcategories": [{{"name": "All", "prompts": [{}]}}]}}]}}"#,
        prompts.join(",")
    );
    PromptCatalog::from_json_str(&json).expect("catalog")
}

#[test]
fn oversized_catalog_rows_stay_inside_the_dropdown_box() {
    let catalog = bulk_catalog(40);
    let cfg = immediate_config();
    assert!(picker::overlay::content_height(&catalog, &cfg.overlay) > cfg.overlay.dropdown_max_height);
    let mut rt = Runtime::new(chatgpt_page(), cfg, catalog, 0);
    rt.on_time(0).expect("startup pass");
    let composer = rt.page().find("#prompt-textarea").expect("composer");
    let root = overlay_roots(rt.page())[0];
    let toggle_at = center(rt.page().bounding_rect(root).expect("root rect"));

    // Opens upward over the composer; the rows past the capped height run
    // down over the toggle but must not swallow its clicks.
    assert_eq!(rt.on_click(toggle_at), ClickAction::Toggle);
    assert!(rt.overlay().is_open());
    assert_eq!(rt.on_click(toggle_at), ClickAction::Toggle);
    assert!(!rt.overlay().is_open());
    assert_eq!(rt.page().value(composer), Some(String::new()));
    assert_eq!(rt.page().events_for(composer, "input"), 0);

    rt.on_click(toggle_at);
    let att = rt.overlay().attachment().expect("attached").clone();
    let dropdown = rt.page().bounding_rect(att.dropdown).expect("dropdown rect");
    assert_eq!(dropdown.height, 480.0);
    let last = EntryRef::new(0, 0, 39);
    let last_item = rt
        .page()
        .find(&format!(r#"[{PROMPT_ATTR}="{last}"]"#))
        .expect("last item");
    let hidden_at = center(rt.page().bounding_rect(last_item).expect("item rect"));
    assert!(!dropdown.contains(hidden_at));
    assert_eq!(rt.on_click(hidden_at), ClickAction::Outside);
    assert!(!rt.overlay().is_open());

    // Wheel over the closed dropdown does nothing; over the open one it
    // scrolls the last row into the box.
    assert!(!rt.on_wheel(dropdown.center(), 10_000.0));
    rt.on_click(toggle_at);
    assert!(rt.on_wheel(dropdown.center(), 10_000.0));
    assert!(!rt.on_wheel(dropdown.center(), 10.0));
    let scrolled = rt.overlay().attachment().expect("attached").dropdown_scroll;
    assert_eq!(scrolled, 42.0 * 28.0 - 480.0);
    let last_at = center(rt.page().bounding_rect(last_item).expect("item rect"));
    assert!(dropdown.contains(last_at));
    assert_eq!(rt.on_click(last_at), ClickAction::Select(last));
    assert!(!rt.overlay().is_open());
    assert_eq!(rt.page().value(composer), Some("text 39".to_string()));
}

#[test]
fn select_without_a_target_is_reported_and_closes() {
    let mut rt = attached();
    rt.on_click(center(rt.page().bounding_rect(overlay_roots(rt.page())[0]).expect("rect")));
    assert!(rt.overlay().is_open());
    let target = rt.page().find("#prompt-textarea").expect("target");
    rt.page_mut().detach(target);
    let err = rt.select(EntryRef::new(0, 0, 0)).unwrap_err();
    assert!(matches!(err, SelectError::Locate(_)));
    assert!(!rt.overlay().is_open());
    assert_eq!(
        rt.select(EntryRef::new(9, 9, 9)),
        Err(SelectError::UnknownEntry(EntryRef::new(9, 9, 9)))
    );
}

#[test]
fn scrolling_moves_the_overlay_with_the_composer() {
    let mut rt = attached();
    let root = overlay_roots(rt.page())[0];
    rt.page_mut().scroll_to(0.0, 100.0);
    let report = rt.on_scroll(40).expect("scroll pass");
    assert_eq!(report.reason, PassReason::Scroll);
    assert_eq!(report.transition, Transition::Repositioned);
    assert_eq!(rt.page().bounding_rect(root).map(|r| r.y), Some(688.0));

    // Nothing moved: no rewrite.
    rt.page_mut().take_mutations();
    assert_eq!(rt.on_scroll(50).map(|r| r.transition), Some(Transition::Unchanged));
    assert!(rt.page_mut().take_mutations().is_empty());
}

#[test]
fn composer_outside_a_shrunken_viewport_uses_the_fallback_position() {
    let mut rt = attached();
    let root = overlay_roots(rt.page())[0];
    rt.page_mut().set_viewport(Viewport::new(1280.0, 720.0));
    let report = rt.on_resize(60).expect("resize pass");
    // Only the generic tier still sees the composer, and its rectangle starts
    // below the viewport.
    let candidate = report.candidate.expect("candidate");
    assert_eq!(candidate.tier, Tier::Generic);
    assert_eq!(report.transition, Transition::Repositioned);
    let placement = rt.overlay().attachment().and_then(|a| a.placement).expect("placement");
    assert!(placement.fallback);
    assert_eq!(
        rt.page().bounding_rect(root),
        Some(Rectangle::new(1280.0 - 20.0 - 32.0, 720.0 - 20.0 - 32.0, 32.0, 32.0))
    );
}

#[test]
fn navigating_to_an_unknown_origin_tears_down() {
    let mut rt = attached();
    rt.page_mut().set_origin("example.com");
    let report = rt.on_time(500).expect("tick");
    assert_eq!(report.transition, Transition::Unchanged);
    assert_eq!(rt.state(), OverlayState::Absent);
    assert!(overlay_roots(rt.page()).is_empty());
    assert!(rt.is_dormant());
    assert_eq!(rt.on_time(1000), None);
}

#[test]
fn catalog_refresh_rebuilds_the_dropdown_in_place() {
    let mut rt = attached();
    rt.on_click(center(rt.page().bounding_rect(overlay_roots(rt.page())[0]).expect("rect")));
    let catalog = PromptCatalog::from_json_str(
        r#"[{ "name": "Ops", "subcategories": [{ "name": "Incidents", "prompts": [{ "title": "Postmortem", "text": "Draft a postmortem for:" }] }] }]"#,
    )
    .expect("catalog");
    rt.set_catalog(catalog);

    let roots = overlay_roots(rt.page());
    assert_eq!(roots.len(), 1);
    assert!(is_shown(rt.page(), roots[0]));
    assert!(rt.overlay().is_open());
    let item = rt.page().find(r#"[data-prompt="0/0/0"]"#).expect("item");
    assert_eq!(rt.page().attribute(item, "title").as_deref(), Some("Postmortem"));
    assert_eq!(rt.page().find(r#"[data-prompt="0/0/1"]"#), None);
}

#[test]
fn reset_returns_to_absent_and_the_next_pass_reattaches() {
    let mut rt = attached();
    rt.reset();
    assert_eq!(rt.state(), OverlayState::Absent);
    assert!(overlay_roots(rt.page()).is_empty());
    assert_eq!(rt.on_time(500).map(|r| r.transition), Some(Transition::Attached));
    assert_eq!(overlay_roots(rt.page()).len(), 1);
}

#[test]
fn non_finite_anchor_falls_back_instead_of_failing() {
    let mut page = chatgpt_page();
    let target = page.find("#prompt-textarea").expect("target");
    let mut overlay = OverlayController::new(PickerConfig::default().overlay, PromptCatalog::builtin());
    let candidate = Candidate {
        id: target,
        rect: Rectangle::new(f32::NAN, 780.0, 960.0, 60.0),
        score: 0.0,
        selector: "#prompt-textarea".into(),
        tier: Tier::SiteSpecific,
    };
    assert_eq!(overlay.apply_pass(&mut page, Some(&candidate)), Transition::Attached);
    let placement = overlay.attachment().and_then(|a| a.placement).expect("placement");
    assert!(placement.fallback);
    let root = overlay.overlay_id().expect("root");
    let rect = page.bounding_rect(root).expect("rect");
    assert!(rect.is_finite());
    assert_eq!(rect.x, 1920.0 - 20.0 - 32.0);
}
