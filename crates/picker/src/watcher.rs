//! Change Watcher: decides whether a batch of DOM mutations warrants a
//! re-detection pass.

use html::{Id, MutationKind, MutationRecord};
use page::HostPage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchVerdict {
    /// Records not caused by the overlay itself.
    pub relevant: usize,
    pub ignored: usize,
    /// The current target left the document in this batch.
    pub target_lost: bool,
}

impl WatchVerdict {
    pub fn is_relevant(&self) -> bool {
        self.relevant > 0
    }
}

#[derive(Debug, Default)]
pub struct ChangeWatcher {
    batches: u64,
}

impl ChangeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches_seen(&self) -> u64 {
        self.batches
    }

    /// Classify `records`. Changes inside the overlay subtree, and the
    /// insertion or removal of the overlay node itself, are ignored.
    pub fn observe<P: HostPage + ?Sized>(
        &mut self,
        page: &P,
        records: &[MutationRecord],
        overlay: Option<Id>,
        target: Option<Id>,
    ) -> WatchVerdict {
        self.batches += 1;
        let mut verdict = WatchVerdict::default();
        for record in records {
            if is_own(page, record, overlay) {
                verdict.ignored += 1;
            } else {
                verdict.relevant += 1;
            }
        }
        verdict.target_lost = target.is_some_and(|t| !page.is_connected(t));
        log::trace!(
            target: "picker.watch",
            "batch {}: {} relevant, {} ignored, target lost: {}",
            self.batches,
            verdict.relevant,
            verdict.ignored,
            verdict.target_lost
        );
        verdict
    }
}

fn is_own<P: HostPage + ?Sized>(page: &P, record: &MutationRecord, overlay: Option<Id>) -> bool {
    let Some(overlay) = overlay else {
        return false;
    };
    if record.target == overlay || page.contains(overlay, record.target) {
        return true;
    }
    match &record.kind {
        MutationKind::ChildList { added, removed } => {
            !(added.is_empty() && removed.is_empty())
                && added.iter().chain(removed).all(|id| *id == overlay)
        }
        _ => false,
    }
}
