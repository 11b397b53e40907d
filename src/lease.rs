//! Leases for self-rescheduling callbacks.
//!
//! A frame loop holds a [`Lease`] and only draws and reschedules while the
//! lease is live. Issuing a new lease, or revoking, kills every earlier one,
//! so at most one loop per [`Leases`] can keep running.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct Leases {
    current: Rc<Cell<u64>>,
}

#[derive(Clone, Debug)]
pub struct Lease {
    current: Rc<Cell<u64>>,
    id: u64,
}

impl Leases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new lease, revoking all previous ones.
    pub fn issue(&self) -> Lease {
        let id = self.current.get() + 1;
        self.current.set(id);
        Lease {
            current: Rc::clone(&self.current),
            id,
        }
    }

    /// Revoke every outstanding lease.
    pub fn revoke(&self) {
        self.current.set(self.current.get() + 1);
    }
}

impl Lease {
    pub fn is_live(&self) -> bool {
        self.current.get() == self.id
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lease_supersedes_old() {
        let leases = Leases::new();
        let first = leases.issue();
        assert!(first.is_live());
        let second = leases.issue();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn test_revoke_kills_everything() {
        let leases = Leases::new();
        let lease = leases.issue();
        leases.revoke();
        assert!(!lease.is_live());
    }

    #[test]
    fn test_exactly_one_live_after_many_restarts() {
        let leases = Leases::new();
        let issued: Vec<Lease> = (0..10).map(|_| leases.issue()).collect();
        let live: Vec<u64> = issued.iter().filter(|l| l.is_live()).map(Lease::id).collect();
        assert_eq!(live, vec![issued[9].id()]);
    }
}
