/// One-shot trigger state for a visibility-gated section.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Pending,
    Triggered,
}

/// Two-state machine with a single idempotent transition.
///
/// `fire` returns `true` only on the transition that actually moved the
/// gate from `Pending` to `Triggered`; every later call is a no-op.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct VisibilityGate {
    state: GateState,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_triggered(&self) -> bool {
        self.state == GateState::Triggered
    }

    pub fn fire(&mut self) -> bool {
        match self.state {
            GateState::Pending => {
                self.state = GateState::Triggered;
                true
            }
            GateState::Triggered => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GateState, VisibilityGate};

    #[test]
    fn fires_exactly_once() {
        let mut gate = VisibilityGate::new();
        assert_eq!(gate.state(), GateState::Pending);
        assert!(gate.fire());
        assert!(gate.is_triggered());
        assert!(!gate.fire());
        assert!(!gate.fire());
        assert_eq!(gate.state(), GateState::Triggered);
    }
}
