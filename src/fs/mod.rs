//! Filesystem utilities.
//!
//! Job scripts are written atomically so a submitted job never sees a
//! partially written file.

pub mod atomic;

pub use atomic::{atomic_write, commit, discard, temp_path_for, write_temp};
