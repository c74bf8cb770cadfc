//! Insertion Strategy: write a template into the located target so that the
//! host page's own state sees it.

use crate::config::{InsertionConfig, InsertionMode};
use crate::error::InsertError;
use crate::site::InsertionKind;
use html::Id;
use page::{DispatchOutcome, ElementKind, HostPage, SyntheticEvent};

/// Which path delivered the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Native control: value set, `input` dispatched.
    Value,
    /// Rich editor consumed a synthetic paste.
    Pasted,
    /// Rich editor: text content set, `input` dispatched.
    DirectText,
    /// The paste path failed first; the direct path delivered.
    DirectTextAfterPasteFailure,
}

/// Combine existing content with the template according to `mode`.
pub fn compose(existing: &str, text: &str, cfg: &InsertionConfig) -> String {
    match cfg.mode {
        InsertionMode::Replace => text.to_string(),
        InsertionMode::Append if existing.trim().is_empty() => text.to_string(),
        InsertionMode::Append => format!("{existing}{}{text}", cfg.separator),
    }
}

/// Insert `text` into `target`. The caller re-locates right before calling;
/// a target that has gone stale since is reported, not written.
pub fn insert<P: HostPage + ?Sized>(
    page: &mut P,
    target: Id,
    text: &str,
    kind: InsertionKind,
    cfg: &InsertionConfig,
) -> Result<InsertOutcome, InsertError> {
    if !page.is_connected(target) {
        return Err(InsertError::Stale);
    }
    let element = page.element_kind(target);
    let outcome = match element {
        ElementKind::TextInput | ElementKind::TextArea => insert_value(page, target, text, cfg)?,
        ElementKind::ContentEditable => match kind {
            InsertionKind::Direct => insert_text_content(page, target, text, cfg)?,
            InsertionKind::ClipboardPaste => match paste(page, target, text, cfg) {
                Ok(()) => InsertOutcome::Pasted,
                Err(InsertError::Stale) => return Err(InsertError::Stale),
                Err(e) => {
                    log::debug!(target: "picker.insert", "paste into {target:?} failed ({e}); writing directly");
                    insert_text_content(page, target, text, cfg)?;
                    InsertOutcome::DirectTextAfterPasteFailure
                }
            },
        },
        ElementKind::Other => return Err(InsertError::NotEditable),
    };
    log::debug!(
        target: "picker.insert",
        "inserted {} chars into {target:?} ({element:?}) via {outcome:?}",
        text.chars().count()
    );
    Ok(outcome)
}

fn insert_value<P: HostPage + ?Sized>(
    page: &mut P,
    target: Id,
    text: &str,
    cfg: &InsertionConfig,
) -> Result<InsertOutcome, InsertError> {
    let existing = page.value(target).unwrap_or_default();
    let value = compose(&existing, text, cfg);
    if !page.set_value(target, &value) {
        return Err(InsertError::Stale);
    }
    notify_input(page, target)?;
    page.focus(target);
    Ok(InsertOutcome::Value)
}

fn insert_text_content<P: HostPage + ?Sized>(
    page: &mut P,
    target: Id,
    text: &str,
    cfg: &InsertionConfig,
) -> Result<InsertOutcome, InsertError> {
    let existing = page.text_content(target).unwrap_or_default();
    let content = compose(&existing, text, cfg);
    if !page.set_text_content(target, &content) {
        return Err(InsertError::Stale);
    }
    notify_input(page, target)?;
    page.focus(target);
    Ok(InsertOutcome::DirectText)
}

/// Clipboard write, then a synthetic paste the host editor handles itself.
fn paste<P: HostPage + ?Sized>(
    page: &mut P,
    target: Id,
    text: &str,
    cfg: &InsertionConfig,
) -> Result<(), InsertError> {
    page.clipboard_write(text)?;
    page.focus(target);
    let existing = page.text_content(target).unwrap_or_default();
    let payload = if cfg.mode == InsertionMode::Replace || existing.trim().is_empty() {
        page.select_contents(target);
        text.to_string()
    } else {
        // The editor inserts at its caret, so only the tail is pasted.
        format!("{}{text}", cfg.separator)
    };
    match page.dispatch(target, SyntheticEvent::Paste { text: payload }) {
        DispatchOutcome::Handled => Ok(()),
        DispatchOutcome::Delivered => Err(InsertError::PasteRejected),
        DispatchOutcome::Detached => Err(InsertError::Stale),
    }
}

fn notify_input<P: HostPage + ?Sized>(page: &mut P, target: Id) -> Result<(), InsertError> {
    match page.dispatch(target, SyntheticEvent::Input) {
        DispatchOutcome::Detached => Err(InsertError::Stale),
        DispatchOutcome::Delivered | DispatchOutcome::Handled => Ok(()),
    }
}
