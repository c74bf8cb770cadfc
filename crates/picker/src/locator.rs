//! Target Locator: find the one editable element a template should go into.
//!
//! Two tiers. A known site's profile selectors are evaluated first; every
//! match is checked for viability and scored, and the best score wins with
//! ties going to the earlier encounter (selector order, then document
//! order). If nothing site-specific is viable, the generic selectors are
//! tried in order and the first visible editable element wins unscored.

use crate::config::{PickerConfig, ScoringConfig};
use crate::geometry::{is_viable, is_visible};
use crate::site::{SiteProfile, generic_selectors};
use core_types::Viewport;
use html::Id;
use layout::Rectangle;
use page::{ElementKind, HostPage};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    SiteSpecific,
    Generic,
}

/// One detection pass's winner. Never persisted: the next pass supersedes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub id: Id,
    pub rect: Rectangle,
    pub score: f32,
    /// Source text of the selector that matched.
    pub selector: String,
    pub tier: Tier,
}

/// Attribute hints that an element is the page's prompt box.
const PLACEHOLDER_ATTRS: &[&str] = &["placeholder", "aria-placeholder", "data-placeholder"];
const TEST_ID_ATTRS: &[&str] = &["data-testid", "data-test-id", "data-qa"];

/// Run one detection pass. `exclude` is a subtree never considered (the
/// overlay itself).
pub fn locate<P: HostPage + ?Sized>(
    page: &P,
    profile: Option<&SiteProfile>,
    config: &PickerConfig,
    exclude: Option<Id>,
) -> Option<Candidate> {
    let excluded = |id: Id| exclude.is_some_and(|root| page.contains(root, id));

    if let Some(profile) = profile {
        let scored = scored_candidates(page, profile, config, &excluded);
        log::trace!(
            target: "picker.locate",
            "{}: {} viable site-specific candidates",
            profile.id,
            scored.len()
        );
        if let Some(best) = best_of(scored) {
            return Some(best);
        }
    }

    let fallback = generic_fallback(page, &excluded);
    if let Some(c) = &fallback {
        log::debug!(
            target: "picker.locate",
            "falling back to generic selector {:?} -> {:?}",
            c.selector,
            c.id
        );
    }
    fallback
}

/// Every viable site-specific candidate with its score, in encounter order.
pub fn scored_candidates<P: HostPage + ?Sized>(
    page: &P,
    profile: &SiteProfile,
    config: &PickerConfig,
    excluded: &dyn Fn(Id) -> bool,
) -> Vec<Candidate> {
    let viewport = page.viewport();
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for selector in &profile.selectors {
        for id in page.query_selector_all(selector) {
            if !seen.insert(id) || excluded(id) {
                continue;
            }
            if !is_viable(page, id, &config.viability) {
                continue;
            }
            let Some(rect) = page.bounding_rect(id) else {
                continue;
            };
            let score = score(page, id, &rect, viewport, &config.scoring);
            out.push(Candidate {
                id,
                rect,
                score,
                selector: selector.as_str().to_string(),
                tier: Tier::SiteSpecific,
            });
        }
    }
    out
}

/// Highest score; on ties the earliest candidate is kept.
pub fn best_of(candidates: Vec<Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for c in candidates {
        match &best {
            Some(b) if c.score <= b.score => {}
            _ => best = Some(c),
        }
    }
    best
}

/// Desirability of a viable element. Only the relative order matters.
pub fn score<P: HostPage + ?Sized>(
    page: &P,
    id: Id,
    rect: &Rectangle,
    viewport: Viewport,
    cfg: &ScoringConfig,
) -> f32 {
    let mut score = cfg.baseline + geometric_score(rect, viewport, cfg);

    if PLACEHOLDER_ATTRS
        .iter()
        .any(|a| page.attribute(id, a).is_some_and(|v| !v.trim().is_empty()))
    {
        score += cfg.placeholder_bonus;
    }
    if TEST_ID_ATTRS.iter().any(|a| page.attribute(id, a).is_some()) {
        score += cfg.test_id_bonus;
    }
    if page.element_kind(id) == ElementKind::ContentEditable {
        score += cfg.contenteditable_bonus;
    }
    score
}

/// Area, centrality and lower-viewport parts of [`score`].
pub fn geometric_score(rect: &Rectangle, viewport: Viewport, cfg: &ScoringConfig) -> f32 {
    let mut score = 0.0;

    let area = rect.area();
    if area >= cfg.area_min && area <= cfg.area_max {
        score += cfg.area_bonus;
    }

    let center = rect.center();
    let mid = viewport.center();
    let dx = (center.x - mid.x) / mid.x.max(1.0);
    let dy = (center.y - mid.y) / mid.y.max(1.0);
    // 0 at the center, 1 at a corner.
    let distance = ((dx * dx + dy * dy) / 2.0).sqrt().min(1.0);
    score += cfg.centrality_bonus * (1.0 - distance);

    if center.y > viewport.height * cfg.lower_fraction {
        score += cfg.lower_half_bonus;
    }
    score
}

fn generic_fallback<P: HostPage + ?Sized>(
    page: &P,
    excluded: &dyn Fn(Id) -> bool,
) -> Option<Candidate> {
    for selector in generic_selectors() {
        for id in page.query_selector_all(selector) {
            if excluded(id) || !page.element_kind(id).is_editable() || !is_visible(page, id) {
                continue;
            }
            let rect = page.bounding_rect(id)?;
            return Some(Candidate {
                id,
                rect,
                score: 0.0,
                selector: selector.as_str().to_string(),
                tier: Tier::Generic,
            });
        }
    }
    None
}
