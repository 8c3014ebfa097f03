//! The process-wide display slot for the single mounted popup.

use crate::dom::Document;

/// Owner of the one-visible-popup invariant: at most one popup element is
/// mounted in the document at a time, and acquiring the slot evicts the
/// previous occupant before the new one is inserted.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    mounted: Option<u64>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently mounted popup element, if any.
    pub fn mounted(&self) -> Option<u64> {
        self.mounted
    }

    /// Mount `tip_id` as the displayed popup, evicting any previous one.
    pub fn acquire(&mut self, document: &mut Document, tip_id: u64) {
        if let Some(previous) = self.mounted {
            if previous != tip_id {
                document.unmount(previous);
                tracing::debug!(evicted = previous, "display slot evicted previous popup");
            }
        }
        self.mounted = Some(tip_id);
        document.mount_first(tip_id);
    }

    /// Unmount `tip_id` and free the slot if it is the occupant.
    pub fn release(&mut self, document: &mut Document, tip_id: u64) {
        if self.mounted == Some(tip_id) {
            self.mounted = None;
        }
        document.unmount(tip_id);
    }
}
