//! Shell-safe quoting of environment variable values.
//!
//! Values are wrapped in double quotes so embedded spaces survive word
//! splitting, while a leading `~` or `~user` is left outside the quotes so the
//! shell still performs tilde expansion. Double quotes keep `$VAR` references
//! live, which task authors rely on.

use regex::Regex;
use std::sync::LazyLock;

/// `~` or `~user` followed by `/`, then anything (including newlines).
static TILDE_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(~[^/\s]*/)(.*)$").expect("Invalid tilde path regex"));

/// A bare `~` or `~user` token.
static TILDE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~[^\s]*$").expect("Invalid tilde token regex"));

/// Quote a value for use on the right-hand side of a shell assignment.
///
/// Rules, first match wins:
///
/// 1. `~user/rest` or `~/rest`: the prefix up to and including the first `/`
///    stays bare, `rest` is double-quoted (an empty `rest` gives `""`).
/// 2. `~` or `~user` with no `/`: returned unchanged.
/// 3. Anything else is double-quoted whole.
///
/// The user token may not contain whitespace: `~a b` is quoted whole, since
/// leaving it bare would split the assignment into an assignment plus a
/// command.
///
/// # Examples
///
/// ```
/// use jobscript::quote::quote_value;
///
/// assert_eq!(quote_value("~/bar bar"), "~/\"bar bar\"");
/// assert_eq!(quote_value("~quack"), "~quack");
/// assert_eq!(quote_value("test"), "\"test\"");
/// ```
pub fn quote_value(value: &str) -> String {
    if let Some(caps) = TILDE_PATH_REGEX.captures(value) {
        return format!("{}\"{}\"", &caps[1], &caps[2]);
    }
    if TILDE_TOKEN_REGEX.is_match(value) {
        return value.to_string();
    }
    format!("\"{}\"", value)
}
