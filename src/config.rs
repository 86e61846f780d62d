//! Writer configuration.
//!
//! Values that used to be process-wide flags (debug mode, engine version) are
//! carried explicitly in [`WriterConfig`] and handed to the writer.

/// Engine name; the executable must be called this on every job host.
pub const DEFAULT_EXECUTABLE_NAME: &str = "cylc";

/// Settings for one [`JobScriptWriter`](crate::script::JobScriptWriter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Export `CYLC_DEBUG=true` into every job.
    pub debug: bool,

    /// Engine version exported as `CYLC_VERSION`.
    pub version: String,

    /// File name the resolved engine executable must have.
    pub executable_name: String,

    /// Run `bash -n` on the script before moving it into place.
    pub check_syntax: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            debug: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
            executable_name: DEFAULT_EXECUTABLE_NAME.to_string(),
            check_syntax: false,
        }
    }
}

impl WriterConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_check_syntax(mut self, check_syntax: bool) -> Self {
        self.check_syntax = check_syntax;
        self
    }
}
