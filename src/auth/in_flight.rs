use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Tracks which (browser, action) pairs have a backend call outstanding so
/// a double submit is refused instead of sent twice.
#[derive(Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<(String, &'static str)>>>,
}

/// Releases its slot when dropped.
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<(String, &'static str)>>>,
    key: (String, &'static str),
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `action` for `browser`; `None` if it is already running.
    pub fn try_begin(&self, browser: &str, action: &'static str) -> Option<InFlightGuard> {
        let key = (browser.to_string(), action);
        let mut set = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard { active: Arc::clone(&self.active), key })
    }

    pub fn is_active(&self, browser: &str, action: &'static str) -> bool {
        let set = self.active.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(&(browser.to_string(), action))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.active.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_refused_until_release() {
        let registry = InFlight::new();
        let first = registry.try_begin("b1", "faculties.delete");
        assert!(first.is_some());
        assert!(registry.try_begin("b1", "faculties.delete").is_none());
        assert!(registry.try_begin("b2", "faculties.delete").is_some());
        assert!(registry.try_begin("b1", "faculties.update").is_some());
        drop(first);
        assert!(!registry.is_active("b1", "faculties.delete"));
        assert!(registry.try_begin("b1", "faculties.delete").is_some());
    }
}
