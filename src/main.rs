//! Headless driver: loads config and catalog, builds a host page for an
//! origin, and runs one scripted picker session against it while logging
//! every transition.
//!
//! ```text
//! promptdock [--host chatgpt.com] [--config picker.toml] [--catalog prompts.json]
//!            [--prompt 0/0/0] [--viewport 1920x1080]
//! ```
//!
//! Argument errors exit with clap's usage status (2).

mod demo;

use clap::Parser;
use core_types::{Millis, Point, Viewport};
use html::dom_utils::outline_from_dom;
use page::{HostPage, Page};
use picker::{EntryRef, JsonFileSource, PickerConfig, PromptCatalog, Runtime, load_or_default};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// `WIDTHxHEIGHT` in CSS px.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ViewportArg(Viewport);

impl FromStr for ViewportArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse::<f32>().ok()?, h.parse::<f32>().ok()?)))
            .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
        let viewport = Viewport::new(w, h);
        if viewport.is_degenerate() {
            return Err(format!("viewport {s:?} has no area"));
        }
        Ok(ViewportArg(viewport))
    }
}

fn parse_entry(s: &str) -> Result<EntryRef, String> {
    s.parse().map_err(|()| format!("expected c/s/p, got {s:?}"))
}

#[derive(Parser, Debug)]
#[command(
    name = "promptdock",
    version,
    about = "Run one scripted prompt-picker session against a simulated chat page"
)]
struct Args {
    /// Origin host of the simulated page
    #[arg(long, default_value = "chatgpt.com")]
    host: String,
    /// Picker configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Prompt catalog (JSON); the builtin catalog when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Catalog entry to insert, as category/subcategory/prompt
    #[arg(long, default_value = "0/0/0", value_parser = parse_entry)]
    prompt: EntryRef,
    #[arg(long, default_value = "1920x1080")]
    viewport: ViewportArg,
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,picker=debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a tracing subscriber is already installed");
        return;
    }
    // The libraries log through the `log` facade.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("log bridge unavailable: {e}");
    }
}

fn load_catalog(path: Option<&PathBuf>) -> PromptCatalog {
    match path {
        Some(path) => load_or_default(&JsonFileSource::new(path)),
        None => PromptCatalog::builtin(),
    }
}

fn log_outline(page: &Page) {
    for line in outline_from_dom(page.document().root(), 60) {
        tracing::debug!(target: "promptdock", "{line}");
    }
}

fn advance(rt: &mut Runtime<Page>, from: Millis, to: Millis, step: Millis) {
    let mut now = from;
    while now <= to {
        if let Some(report) = rt.on_time(now) {
            tracing::info!(
                target: "promptdock",
                "t={now}ms {:?} pass: {:?} ({})",
                report.reason,
                report.transition,
                report
                    .candidate
                    .as_ref()
                    .map_or("no target".to_string(), |c| format!("{:?} via {:?}", c.id, c.selector))
            );
        }
        now += step;
    }
}

fn deliver_mutations(rt: &mut Runtime<Page>, now: Millis) {
    let records = rt.page_mut().take_mutations();
    if let Some(report) = rt.on_mutations(&records, now) {
        tracing::info!(target: "promptdock", "t={now}ms mutation pass: {:?}", report.transition);
    }
}

fn click_toggle(rt: &mut Runtime<Page>) -> bool {
    let Some(toggle) = rt.overlay().attachment().map(|a| a.toggle) else {
        return false;
    };
    let Some(rect) = rt.page().bounding_rect(toggle) else {
        return false;
    };
    let action = rt.on_click(rect.center());
    tracing::info!(target: "promptdock", "clicked toggle: {action:?}, open = {}", rt.overlay().is_open());
    true
}

fn target_content(rt: &Runtime<Page>) -> Option<String> {
    let id = rt.overlay().target()?.id;
    let page = rt.page();
    page.value(id).or_else(|| page.text_content(id))
}

fn run(args: Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => PickerConfig::from_path(path).map_err(|e| e.to_string())?,
        None => PickerConfig::default(),
    };
    let catalog = load_catalog(args.catalog.as_ref());
    let page = demo::page_for(&args.host, args.viewport.0);
    let mut rt = Runtime::new(page, config, catalog, 0);

    if rt.is_dormant() {
        advance(&mut rt, 0, 3000, 250);
        tracing::info!(target: "promptdock", "{} is not supported; nothing was injected", args.host);
        log_outline(rt.page());
        return Ok(());
    }

    advance(&mut rt, 0, 2000, 250);
    if !click_toggle(&mut rt) {
        return Err("overlay never attached".to_string());
    }

    // Pick a template by clicking its dropdown item, like a user would.
    let item = rt
        .page()
        .find(&format!(r#"[data-prompt="{}"]"#, args.prompt))
        .ok_or_else(|| format!("catalog has no prompt {}", args.prompt))?;
    let at = rt
        .page()
        .bounding_rect(item)
        .map_or(Point::new(0.0, 0.0), |r| r.center());
    let action = rt.on_click(at);
    tracing::info!(target: "promptdock", "clicked prompt {}: {action:?}", args.prompt);
    tracing::info!(target: "promptdock", "composer now holds {:?}", target_content(&rt).unwrap_or_default());

    // Client-side navigation: the app re-renders its composer.
    let slot = rt.page().find("#composer-slot");
    if let Some(slot) = slot {
        let (fresh, handles_paste) = demo::composer(rt.site());
        rt.page_mut().replace_children(slot, vec![fresh]);
        if handles_paste {
            demo::wire_editor(rt.page_mut());
        }
        deliver_mutations(&mut rt, 2100);
    }
    advance(&mut rt, 2250, 3000, 250);

    rt.page_mut().scroll_to(0.0, 40.0);
    if let Some(report) = rt.on_scroll(3100) {
        tracing::info!(target: "promptdock", "scroll pass: {:?}", report.transition);
    }
    tracing::info!(
        target: "promptdock",
        "final state {:?}, {} passes, {} mutation batches",
        rt.state(),
        rt.scheduler().passes_run(),
        rt.watcher().batches_seen()
    );
    log_outline(rt.page());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "promptdock", "{e}");
            ExitCode::FAILURE
        }
    }
}
