// src/engine/gate.rs

/// Reentrancy guard around result write-backs.
///
/// Applying a calculation result mutates fields that are normally trigger
/// fields; while the gate is engaged the trigger evaluation no-ops, which is
/// what breaks the edit -> calculate -> apply -> calculate loop. The gate is
/// engaged for the whole apply critical section (the engine holds its state
/// lock throughout), so no edit ordering can observe it half-released.
#[derive(Debug, Default)]
pub(crate) struct SuppressionGate {
    engaged: bool,
}

impl SuppressionGate {
    pub(crate) fn is_suppressed(&self) -> bool {
        self.engaged
    }

    pub(crate) fn engage(&mut self) {
        debug_assert!(!self.engaged, "suppression gate engaged twice");
        self.engaged = true;
    }

    pub(crate) fn release(&mut self) {
        self.engaged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engage_release_cycle() {
        let mut gate = SuppressionGate::default();
        assert!(!gate.is_suppressed());
        gate.engage();
        assert!(gate.is_suppressed());
        gate.release();
        assert!(!gate.is_suppressed());
    }
}
