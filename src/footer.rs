//! Footer credit timing.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterPhase {
    Pending,
    Visible,
    Dismissed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FooterSchedule {
    pub delay_ms: u32,
    pub visible_ms: u32,
}

impl FooterSchedule {
    /// Phase at `elapsed_ms` after mount. Once dismissed it never comes back.
    pub fn phase_at(&self, elapsed_ms: f64) -> FooterPhase {
        let shown_at = f64::from(self.delay_ms);
        let hidden_at = shown_at + f64::from(self.visible_ms);
        if elapsed_ms < shown_at {
            FooterPhase::Pending
        } else if elapsed_ms < hidden_at {
            FooterPhase::Visible
        } else {
            FooterPhase::Dismissed
        }
    }

    /// Delays, relative to mount, at which the phase changes.
    pub fn transitions(&self) -> [(u32, FooterPhase); 2] {
        [
            (self.delay_ms, FooterPhase::Visible),
            (self.delay_ms.saturating_add(self.visible_ms), FooterPhase::Dismissed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE: FooterSchedule = FooterSchedule { delay_ms: 1500, visible_ms: 3000 };

    #[test]
    fn test_phases_over_time() {
        assert_eq!(SCHEDULE.phase_at(0.0), FooterPhase::Pending);
        assert_eq!(SCHEDULE.phase_at(1499.9), FooterPhase::Pending);
        assert_eq!(SCHEDULE.phase_at(1500.0), FooterPhase::Visible);
        assert_eq!(SCHEDULE.phase_at(4499.0), FooterPhase::Visible);
        assert_eq!(SCHEDULE.phase_at(4500.0), FooterPhase::Dismissed);
        assert_eq!(SCHEDULE.phase_at(1.0e9), FooterPhase::Dismissed);
    }

    #[test]
    fn test_transitions_agree_with_phases() {
        for (at, phase) in SCHEDULE.transitions() {
            assert_eq!(SCHEDULE.phase_at(f64::from(at)), phase);
        }
        assert_eq!(SCHEDULE.transitions()[1].0, 4500);
    }
}
