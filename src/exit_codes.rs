//! Exit code constants for the jobscript CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable description or site config)
//! - 2: Invalid input (bad executable, bad parameter template)
//! - 3: I/O failure writing the job script
//! - 4: Generated script failed the syntax check

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or unparseable input files.
pub const USER_ERROR: i32 = 1;

/// The description or host configuration cannot produce a valid script.
pub const INVALID_INPUT: i32 = 2;

/// The job script could not be persisted.
pub const IO_FAILURE: i32 = 3;

/// `bash -n` rejected the generated script.
pub const SYNTAX_FAILURE: i32 = 4;
