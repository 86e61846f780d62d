//! Parameter template rendering.
//!
//! Parameterised tasks carry environment templates such as
//! `obs_%(obs)s_%(i)03d` that are expanded against the task's parameter
//! values before being exported into the job.
//!
//! # Syntax
//!
//! - `%(name)s` - Substitutes parameter `name` as text
//! - `%(name)d` - Substitutes parameter `name` as an integer
//! - `%(name)05d`, `%(name)-8s` - Optional `0`/`-` flag and width, at most
//!   [`MAX_WIDTH`]
//! - `%%` - Renders as literal `%`
//!
//! Undefined parameters are an error rather than an empty substitution.

use indexmap::IndexMap;
use std::fmt;

/// Widest field a conversion may request.
pub const MAX_WIDTH: usize = 4096;

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A parameter was referenced but not provided.
    UndefinedVariable {
        /// The name of the undefined parameter.
        name: String,
        /// The position of the `%` that starts the reference.
        position: usize,
    },
    /// A `%(` was found without a matching `)`.
    UnmatchedParen {
        /// The position of the `%`.
        position: usize,
    },
    /// An empty parameter name was found (e.g., `%()s`).
    EmptyVariableName {
        /// The position of the `%`.
        position: usize,
    },
    /// The conversion after `%` or `%(name)` is missing or unsupported.
    BadConversion {
        /// The position of the `%`.
        position: usize,
    },
    /// A `d` conversion was applied to a non-integer value.
    NotAnInteger {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(
                    f,
                    "undefined parameter '{}' at position {} in template",
                    name, position
                )
            }
            TemplateError::UnmatchedParen { position } => {
                write!(f, "unmatched '%(' at position {} in template", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(
                    f,
                    "empty parameter name '%()' at position {} in template",
                    position
                )
            }
            TemplateError::BadConversion { position } => {
                write!(f, "bad conversion at position {} in template", position)
            }
            TemplateError::NotAnInteger { name, value } => {
                write!(f, "parameter '{}' is not an integer: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render a parameter template.
///
/// # Arguments
///
/// * `template` - The template string containing `%(name)s` placeholders
/// * `params` - Parameter names and their values
///
/// # Returns
///
/// * `Ok(String)` - The rendered string
/// * `Err(TemplateError)` - If a parameter is undefined or syntax is invalid
pub fn render_template(
    template: &str,
    params: &IndexMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '%' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some((_, '%')) => result.push('%'),
            Some((_, '(')) => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, ')')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(TemplateError::UnmatchedParen { position: pos }),
                    }
                }
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }

                let mut flag = None;
                if let Some(&(_, c)) = chars.peek()
                    && (c == '0' || c == '-')
                {
                    flag = Some(c);
                    chars.next();
                }
                let mut width = 0usize;
                while let Some(&(_, c)) = chars.peek() {
                    let Some(digit) = c.to_digit(10) else { break };
                    width = width
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(digit as usize))
                        .filter(|&w| w <= MAX_WIDTH)
                        .ok_or(TemplateError::BadConversion { position: pos })?;
                    chars.next();
                }

                let value = params
                    .get(&name)
                    .ok_or_else(|| TemplateError::UndefinedVariable {
                        name: name.clone(),
                        position: pos,
                    })?;

                match chars.next() {
                    Some((_, 's')) => result.push_str(&pad(value, width, flag)),
                    Some((_, 'd')) => {
                        let number: i64 =
                            value
                                .trim()
                                .parse()
                                .map_err(|_| TemplateError::NotAnInteger {
                                    name: name.clone(),
                                    value: value.clone(),
                                })?;
                        let text = if flag == Some('0') {
                            format!("{:0width$}", number, width = width)
                        } else {
                            pad(&number.to_string(), width, flag)
                        };
                        result.push_str(&text);
                    }
                    _ => return Err(TemplateError::BadConversion { position: pos }),
                }
            }
            _ => return Err(TemplateError::BadConversion { position: pos }),
        }
    }

    Ok(result)
}

fn pad(text: &str, width: usize, flag: Option<char>) -> String {
    if flag == Some('-') {
        format!("{:<width$}", text, width = width)
    } else {
        format!("{:>width$}", text, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_string_substitution() {
        let p = params(&[("obs", "sonde"), ("run", "a")]);
        let result = render_template("obs_%(obs)s_%(run)s", &p).unwrap();
        assert_eq!(result, "obs_sonde_a");
    }

    #[test]
    fn test_zero_padded_integer() {
        let p = params(&[("i", "7")]);
        assert_eq!(render_template("member%(i)03d", &p).unwrap(), "member007");
        assert_eq!(render_template("%(i)d", &p).unwrap(), "7");
    }

    #[test]
    fn test_width_and_alignment() {
        let p = params(&[("x", "ab")]);
        assert_eq!(render_template("[%(x)4s]", &p).unwrap(), "[  ab]");
        assert_eq!(render_template("[%(x)-4s]", &p).unwrap(), "[ab  ]");
    }

    #[test]
    fn test_literal_percent() {
        let p = params(&[("i", "1")]);
        assert_eq!(render_template("100%% of %(i)s", &p).unwrap(), "100% of 1");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(
            render_template("plain text", &IndexMap::new()).unwrap(),
            "plain text"
        );
    }

    #[test]
    fn test_undefined_variable_error() {
        let err = render_template("a%(nope)s", &IndexMap::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UndefinedVariable {
                name: "nope".to_string(),
                position: 1
            }
        );
    }

    #[test]
    fn test_unmatched_paren_error() {
        let err = render_template("%(open", &IndexMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::UnmatchedParen { position: 0 });
    }

    #[test]
    fn test_empty_name_error() {
        let err = render_template("x%()s", &IndexMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::EmptyVariableName { position: 1 });
    }

    #[test]
    fn test_bad_conversion_errors() {
        let p = params(&[("i", "1")]);
        assert_eq!(
            render_template("%(i)x", &p).unwrap_err(),
            TemplateError::BadConversion { position: 0 }
        );
        assert_eq!(
            render_template("50% off", &p).unwrap_err(),
            TemplateError::BadConversion { position: 2 }
        );
        assert_eq!(
            render_template("%(i)", &p).unwrap_err(),
            TemplateError::BadConversion { position: 0 }
        );
    }

    #[test]
    fn test_oversized_width_is_bad_conversion() {
        let p = params(&[("i", "1")]);
        assert_eq!(
            render_template("x%(i)99999999999999999999999s", &p).unwrap_err(),
            TemplateError::BadConversion { position: 1 }
        );
        assert_eq!(
            render_template("%(i)4097d", &p).unwrap_err(),
            TemplateError::BadConversion { position: 0 }
        );

        let widest = render_template("%(i)4096s", &p).unwrap();
        assert_eq!(widest.len(), MAX_WIDTH);
        assert!(widest.ends_with(" 1"));
    }

    #[test]
    fn test_integer_conversion_of_text_fails() {
        let p = params(&[("obs", "sonde")]);
        let err = render_template("%(obs)02d", &p).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'obs' is not an integer: 'sonde'"
        );
    }
}
