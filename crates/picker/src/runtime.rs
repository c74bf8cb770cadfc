//! Ties the components together for one page load.
//!
//! The host's event loop is represented by the `on_*` entry points: the
//! embedder forwards timer, mutation, scroll, resize and click events, and
//! each entry point runs at most one coalesced detection pass.

use crate::catalog::{EntryRef, PromptCatalog};
use crate::config::PickerConfig;
use crate::error::{LocateError, SelectError};
use crate::insertion::{InsertOutcome, insert};
use crate::locator::{Candidate, locate};
use crate::overlay::{ClickAction, OverlayController, OverlayState, Transition};
use crate::scheduler::{PassReason, RedetectScheduler};
use crate::site::{SiteId, detect_site, profile_for};
use crate::watcher::ChangeWatcher;
use core_types::{Millis, Point};
use html::MutationRecord;
use page::HostPage;

/// Outcome of one detection pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PassReport {
    pub reason: PassReason,
    pub candidate: Option<Candidate>,
    pub transition: Transition,
}

#[derive(Debug)]
pub struct Runtime<P: HostPage> {
    page: P,
    config: PickerConfig,
    site: Option<SiteId>,
    scheduler: RedetectScheduler,
    watcher: ChangeWatcher,
    overlay: OverlayController,
}

impl<P: HostPage> Runtime<P> {
    /// Classify the page and arm the startup pass. On an unknown site the
    /// runtime is dormant: it never schedules a pass or touches the DOM.
    pub fn new(page: P, config: PickerConfig, catalog: PromptCatalog, load_time: Millis) -> Self {
        let site = detect_site(page.origin_host());
        let mut scheduler = RedetectScheduler::new(config.timing.tick_interval_ms);
        match site {
            Some(site) => {
                let delay = config
                    .timing
                    .startup_delay_ms
                    .unwrap_or(profile_for(site).init_delay_ms);
                scheduler.start(load_time, delay);
                log::info!(
                    target: "picker.site",
                    "{} is {site}; first detection at {}ms",
                    page.origin_host(),
                    load_time.saturating_add(delay)
                );
            }
            None => {
                log::info!(target: "picker.site", "{} is not a known site; staying dormant", page.origin_host());
            }
        }
        let overlay = OverlayController::new(config.overlay.clone(), catalog);
        Self {
            page,
            config,
            site,
            scheduler,
            watcher: ChangeWatcher::new(),
            overlay,
        }
    }

    pub fn is_dormant(&self) -> bool {
        self.site.is_none()
    }

    pub fn site(&self) -> Option<SiteId> {
        self.site
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// The host page, for host-side changes (navigation, re-renders).
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn scheduler(&self) -> &RedetectScheduler {
        &self.scheduler
    }

    pub fn watcher(&self) -> &ChangeWatcher {
        &self.watcher
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Timer callback.
    pub fn on_time(&mut self, now: Millis) -> Option<PassReport> {
        if self.is_dormant() {
            return None;
        }
        self.scheduler.advance(now);
        self.pump(now)
    }

    /// Mutation observer callback.
    pub fn on_mutations(&mut self, records: &[MutationRecord], now: Millis) -> Option<PassReport> {
        if self.is_dormant() || records.is_empty() {
            return None;
        }
        let verdict = self.watcher.observe(
            &self.page,
            records,
            self.overlay.overlay_id(),
            self.overlay.target().map(|t| t.id),
        );
        if verdict.is_relevant()
            && (self.overlay.state() != OverlayState::AttachedVisible || verdict.target_lost)
        {
            self.scheduler.request(PassReason::Mutation);
        }
        self.pump(now)
    }

    pub fn on_scroll(&mut self, now: Millis) -> Option<PassReport> {
        self.request_and_pump(PassReason::Scroll, now)
    }

    pub fn on_resize(&mut self, now: Millis) -> Option<PassReport> {
        self.request_and_pump(PassReason::Resize, now)
    }

    fn request_and_pump(&mut self, reason: PassReason, now: Millis) -> Option<PassReport> {
        if self.is_dormant() {
            return None;
        }
        self.scheduler.request(reason);
        self.pump(now)
    }

    /// Pointer click at `point` (viewport coordinates).
    pub fn on_click(&mut self, point: Point) -> ClickAction {
        if self.is_dormant() {
            return ClickAction::Outside;
        }
        let hit = self.page.hit_test(point);
        let action = self.overlay.classify_click(&self.page, hit);
        match action {
            ClickAction::Toggle => {
                self.overlay.toggle(&mut self.page);
            }
            ClickAction::Select(entry) => {
                // Failures are logged by select; the user can pick again.
                let _ = self.select(entry);
            }
            ClickAction::Outside if self.overlay.is_open() => {
                self.overlay.close(&mut self.page);
            }
            ClickAction::Outside | ClickAction::Inside => {}
        }
        action
    }

    /// Wheel scroll at `point`. Scrolls the dropdown's rows when the pointer
    /// is over the open dropdown; returns whether it scrolled.
    pub fn on_wheel(&mut self, point: Point, delta_y: f32) -> bool {
        if self.is_dormant() {
            return false;
        }
        let hit = self.page.hit_test(point);
        self.overlay.is_over_dropdown(&self.page, hit)
            && self.overlay.scroll_dropdown(&mut self.page, delta_y)
    }

    /// Insert the catalog entry into a freshly located target and close the
    /// dropdown.
    pub fn select(&mut self, entry: EntryRef) -> Result<InsertOutcome, SelectError> {
        let Some(site) = self.site else {
            return Err(SelectError::Dormant);
        };
        let result = self.insert_entry(site, entry);
        self.overlay.close(&mut self.page);
        match &result {
            Ok(outcome) => {
                log::info!(target: "picker.insert", "inserted {entry} via {outcome:?}");
            }
            Err(e) => {
                log::warn!(target: "picker.insert", "selection {entry} abandoned: {e}");
            }
        }
        result
    }

    fn insert_entry(&mut self, site: SiteId, entry: EntryRef) -> Result<InsertOutcome, SelectError> {
        let text = self
            .overlay
            .catalog()
            .entry(entry)
            .ok_or(SelectError::UnknownEntry(entry))?
            .text
            .clone();
        let profile = profile_for(site);
        // Re-locate right before writing; the last pass's target may be gone.
        let target = locate(
            &self.page,
            Some(profile),
            &self.config,
            self.overlay.overlay_id(),
        )
        .ok_or(LocateError::NotFound { site })?;
        Ok(insert(
            &mut self.page,
            target.id,
            &text,
            profile.insertion,
            &self.config.insertion,
        )?)
    }

    /// Replace the catalog shown in the dropdown.
    pub fn set_catalog(&mut self, catalog: PromptCatalog) {
        if self.is_dormant() {
            return;
        }
        self.overlay.set_catalog(&mut self.page, catalog);
    }

    /// Remove the overlay. The next successful pass attaches a new one.
    pub fn reset(&mut self) {
        self.overlay.reset(&mut self.page);
    }

    /// Run the pending pass, if any is due.
    pub fn pump(&mut self, now: Millis) -> Option<PassReport> {
        if self.is_dormant() {
            return None;
        }
        let reason = self.scheduler.take(now)?;
        Some(self.run_pass(reason))
    }

    fn run_pass(&mut self, reason: PassReason) -> PassReport {
        let site = detect_site(self.page.origin_host());
        if site != self.site {
            log::info!(target: "picker.site", "site changed from {:?} to {site:?}", self.site);
            if site.is_none() {
                self.overlay.reset(&mut self.page);
            }
            self.site = site;
        }
        let Some(site) = site else {
            return PassReport {
                reason,
                candidate: None,
                transition: Transition::Unchanged,
            };
        };

        let candidate = locate(
            &self.page,
            Some(profile_for(site)),
            &self.config,
            self.overlay.overlay_id(),
        );
        if candidate.is_none() {
            log::trace!(target: "picker.locate", "{reason:?} pass: {}", LocateError::NotFound { site });
        }
        let transition = self.overlay.apply_pass(&mut self.page, candidate.as_ref());
        PassReport {
            reason,
            candidate,
            transition,
        }
    }
}
