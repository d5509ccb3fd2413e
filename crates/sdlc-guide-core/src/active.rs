use crate::types::NavTarget;

/// Sole owner of the currently highlighted sidebar target.
///
/// Every activation path (click, card, scroll detection, initial load) goes
/// through [`ActiveStageStore::set`], so at most one target is ever active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveStageStore {
    current: Option<NavTarget>,
}

impl ActiveStageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<NavTarget> {
        self.current
    }

    /// Replace the active target. Returns true if it changed.
    pub fn set(&mut self, target: NavTarget) -> bool {
        let changed = self.current != Some(target);
        self.current = Some(target);
        changed
    }
}
