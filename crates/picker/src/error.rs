//! Error taxonomy. Every one of these is non-fatal: callers log and degrade.

use crate::catalog::EntryRef;
use crate::site::SiteId;
use page::ClipboardError;
use std::fmt;
use std::path::PathBuf;

/// No viable target on this pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocateError {
    NotFound { site: SiteId },
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::NotFound { site } => write!(f, "no viable input target on {site}"),
        }
    }
}

impl std::error::Error for LocateError {}

/// A rectangle the overlay must not be placed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryError {
    NonFinite,
    Negative,
    OutOfViewport,
    Degenerate,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NonFinite => write!(f, "rectangle has a non-finite component"),
            GeometryError::Negative => write!(f, "rectangle starts at a negative offset"),
            GeometryError::OutOfViewport => write!(f, "rectangle starts outside the viewport"),
            GeometryError::Degenerate => write!(f, "rectangle has no area"),
        }
    }
}

impl std::error::Error for GeometryError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertError {
    /// The target left the document between locate and insert.
    Stale,
    Clipboard(ClipboardError),
    /// The paste was delivered but no host editor consumed it.
    PasteRejected,
    NotEditable,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Stale => write!(f, "target is no longer in the document"),
            InsertError::Clipboard(e) => write!(f, "clipboard write failed: {e}"),
            InsertError::PasteRejected => write!(f, "synthetic paste was not consumed"),
            InsertError::NotEditable => write!(f, "target is not an editable element"),
        }
    }
}

impl std::error::Error for InsertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InsertError::Clipboard(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClipboardError> for InsertError {
    fn from(e: ClipboardError) -> Self {
        InsertError::Clipboard(e)
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Malformed(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog read failed: {e}"),
            CatalogError::Parse(e) => write!(f, "catalog is not valid JSON: {e}"),
            CatalogError::Malformed(why) => write!(f, "malformed catalog: {why}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Parse(e) => Some(e),
            CatalogError::Malformed(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

/// Why a prompt selection did not reach the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectError {
    Dormant,
    UnknownEntry(EntryRef),
    Locate(LocateError),
    Insert(InsertError),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::Dormant => write!(f, "picker is not active on this site"),
            SelectError::UnknownEntry(e) => write!(f, "no catalog entry {e}"),
            SelectError::Locate(e) => e.fmt(f),
            SelectError::Insert(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectError::Locate(e) => Some(e),
            SelectError::Insert(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LocateError> for SelectError {
    fn from(e: LocateError) -> Self {
        SelectError::Locate(e)
    }
}

impl From<InsertError> for SelectError {
    fn from(e: InsertError) -> Self {
        SelectError::Insert(e)
    }
}
