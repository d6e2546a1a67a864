// ── Loading gates ──
//
// One flag per workflow. A workflow runs only while it holds the guard;
// dropping the guard clears the flag on every exit path, error or not.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::CoreError;

/// In-flight flag for one workflow.
#[derive(Debug)]
pub struct LoadingGate {
    name: &'static str,
    busy: AtomicBool,
}

impl LoadingGate {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            busy: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the workflow is currently running.
    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the gate, or fail with [`CoreError::Busy`] if already held.
    pub fn enter(&self) -> Result<LoadingGuard<'_>, CoreError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| LoadingGuard { gate: self })
            .map_err(|_| CoreError::Busy {
                workflow: self.name,
            })
    }
}

/// Holds a [`LoadingGate`] until dropped.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    gate: &'a LoadingGate,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
