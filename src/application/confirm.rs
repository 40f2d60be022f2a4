//! Two-state gate guarding destructive actions behind explicit confirmation.

/// `Idle -> Armed(id) -> Idle`. Confirming or cancelling while idle is a
/// no-op; the gate never panics on out-of-order input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationGate {
    armed: Option<String>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate for one item. Re-arming replaces the previous target.
    pub fn arm(&mut self, id: impl Into<String>) {
        self.armed = Some(id.into());
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Disarm and hand back the armed id, if any.
    pub fn take_armed(&mut self) -> Option<String> {
        self.armed.take()
    }

    pub fn armed(&self) -> Option<&str> {
        self.armed.as_deref()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_and_takes() {
        let mut gate = ConfirmationGate::new();
        gate.arm("c2");
        assert_eq!(gate.armed(), Some("c2"));
        assert_eq!(gate.take_armed().as_deref(), Some("c2"));
        assert!(!gate.is_armed());
    }

    #[test]
    fn cancel_discards_target() {
        let mut gate = ConfirmationGate::new();
        gate.arm("c2");
        gate.cancel();
        assert_eq!(gate.take_armed(), None);
    }

    #[test]
    fn idle_take_is_noop() {
        let mut gate = ConfirmationGate::new();
        assert_eq!(gate.take_armed(), None);
        gate.cancel();
        assert_eq!(gate.take_armed(), None);
    }

    #[test]
    fn rearming_replaces_target() {
        let mut gate = ConfirmationGate::new();
        gate.arm("c1");
        gate.arm("c2");
        assert_eq!(gate.take_armed().as_deref(), Some("c2"));
    }
}
