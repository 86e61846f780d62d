//! Lifecycle script hooks.
//!
//! A task may supply up to seven shell fragments that run at fixed points of
//! the job: init, env, err, pre, main, post and exit. Each present hook becomes
//! its own shell function in the job script.

use serde::{Deserialize, Serialize};

/// Identifies one of the seven lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptHook {
    Init,
    Env,
    Err,
    Pre,
    Main,
    Post,
    Exit,
}

impl ScriptHook {
    /// All hooks in emission order.
    pub const ALL: [ScriptHook; 7] = [
        ScriptHook::Init,
        ScriptHook::Env,
        ScriptHook::Err,
        ScriptHook::Pre,
        ScriptHook::Main,
        ScriptHook::Post,
        ScriptHook::Exit,
    ];

    /// Identifier prefix: `init-`, `env-`, ..., empty for the main script.
    pub fn prefix(self) -> &'static str {
        match self {
            ScriptHook::Init => "init-",
            ScriptHook::Env => "env-",
            ScriptHook::Err => "err-",
            ScriptHook::Pre => "pre-",
            ScriptHook::Main => "",
            ScriptHook::Post => "post-",
            ScriptHook::Exit => "exit-",
        }
    }

    /// Shell function name, e.g. `cylc__job__inst__pre_script`.
    pub fn function_name(self) -> String {
        format!("cylc__job__inst__{}script", self.prefix().replace('-', "_"))
    }

    /// Identifying comment label, e.g. `PRE-SCRIPT`.
    pub fn label(self) -> String {
        format!("{}SCRIPT", self.prefix().to_uppercase())
    }
}

impl std::fmt::Display for ScriptHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}script", self.prefix())
    }
}

/// The seven optional hook bodies of a task job.
///
/// Field names follow the description file keys (`init-script`, ...,
/// `script`, ..., `exit-script`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleHooks {
    #[serde(rename = "init-script", default, skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,

    #[serde(rename = "env-script", default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    #[serde(rename = "err-script", default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,

    #[serde(rename = "pre-script", default, skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,

    #[serde(rename = "script", default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    #[serde(rename = "post-script", default, skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,

    #[serde(rename = "exit-script", default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<String>,
}

impl LifecycleHooks {
    /// Raw body of a hook, if set.
    pub fn get(&self, hook: ScriptHook) -> Option<&str> {
        let body = match hook {
            ScriptHook::Init => &self.init,
            ScriptHook::Env => &self.env,
            ScriptHook::Err => &self.err,
            ScriptHook::Pre => &self.pre,
            ScriptHook::Main => &self.main,
            ScriptHook::Post => &self.post,
            ScriptHook::Exit => &self.exit,
        };
        body.as_deref()
    }

    /// Set a hook body.
    pub fn set(&mut self, hook: ScriptHook, body: impl Into<String>) {
        let slot = match hook {
            ScriptHook::Init => &mut self.init,
            ScriptHook::Env => &mut self.env,
            ScriptHook::Err => &mut self.err,
            ScriptHook::Pre => &mut self.pre,
            ScriptHook::Main => &mut self.main,
            ScriptHook::Post => &mut self.post,
            ScriptHook::Exit => &mut self.exit,
        };
        *slot = Some(body.into());
    }

    /// Hooks that carry at least one command, in emission order.
    pub fn present(&self) -> impl Iterator<Item = (ScriptHook, &str)> {
        ScriptHook::ALL.into_iter().filter_map(|hook| {
            self.get(hook)
                .filter(|body| has_commands(body))
                .map(|body| (hook, body))
        })
    }
}

/// True if the body has a line that is neither blank nor a `#` comment.
///
/// bash rejects a function whose body is only comments.
pub fn has_commands(body: &str) -> bool {
    body.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}
