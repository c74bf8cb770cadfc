//! Prompt-template picker core.
//!
//! Finds the prompt box on a known AI chat site, keeps a floating template
//! picker anchored to it while the host page re-renders, and writes the
//! chosen template into it in a way the host's editor state observes.
//!
//! All page access goes through [`page::HostPage`]; [`Runtime`] drives one
//! page load from the host's timer, mutation, scroll, resize and click
//! events.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod insertion;
pub mod locator;
pub mod overlay;
pub mod runtime;
pub mod scheduler;
pub mod site;
pub mod watcher;

pub use catalog::{
    CatalogSource, EntryRef, JsonFileSource, PromptCatalog, StaticSource, load_or_default,
};
pub use config::{InsertionMode, PickerConfig};
pub use error::{CatalogError, ConfigError, GeometryError, InsertError, LocateError, SelectError};
pub use geometry::{check_rect, is_viable, is_visible, rect_valid};
pub use insertion::{InsertOutcome, insert};
pub use locator::{Candidate, Tier, locate};
pub use overlay::{ClickAction, OverlayController, OverlayState, Transition};
pub use runtime::{PassReport, Runtime};
pub use scheduler::{PassReason, RedetectScheduler};
pub use site::{InsertionKind, SiteId, SiteProfile, detect_site, profile_for};
pub use watcher::{ChangeWatcher, WatchVerdict};
