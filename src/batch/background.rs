//! Batch systems without directives.

use super::BatchSystem;

/// Runs the job as a detached background process on the job host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Background;

impl BatchSystem for Background {
    fn name(&self) -> &'static str {
        "background"
    }
}

/// Submits the job through the `at` queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct At;

impl BatchSystem for At {
    fn name(&self) -> &'static str {
        "at"
    }
}
