//! Lookup of callers with elevated scan privileges.

use std::collections;

/// Read-only set of administrator caller ids, fixed at start-up.
pub trait AdminRoster: Send + Sync {
    /// Whether `caller_id` may scan records owned by anyone.
    fn is_admin(&self, caller_id: &str) -> bool;
}

impl AdminRoster for collections::HashSet<String> {
    fn is_admin(&self, caller_id: &str) -> bool {
        self.contains(caller_id)
    }
}
