//! SQL function registry.
//!
//! Framework-level function names (`current_date`, `hour`, `concat`, ...)
//! are resolved through the dialect's registry and rendered into the
//! database's own spelling.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DialectError, Result};
use crate::types::SqlType;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?(\d+)").expect("placeholder pattern is valid"));

/// How a registered function is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlFunction {
    /// `name(arg1, arg2, ...)`.
    Standard {
        /// Database function name.
        name: String,
    },
    /// A function taking no arguments, optionally written without parentheses.
    NoArgs {
        /// Database function name.
        name: String,
        /// Whether `()` follows the name.
        parentheses: bool,
    },
    /// A template in which `?1`, `?2`, ... are replaced by the arguments.
    Template {
        /// The template text.
        template: String,
    },
    /// `begin arg1 separator arg2 ... end`.
    VarArgs {
        /// Text before the first argument.
        begin: String,
        /// Text between arguments.
        separator: String,
        /// Text after the last argument.
        end: String,
    },
}

impl SqlFunction {
    /// Creates a standard function.
    #[must_use]
    pub fn standard(name: impl Into<String>) -> Self {
        Self::Standard { name: name.into() }
    }

    /// Creates a no-argument function rendered with parentheses.
    #[must_use]
    pub fn no_args(name: impl Into<String>) -> Self {
        Self::NoArgs {
            name: name.into(),
            parentheses: true,
        }
    }

    /// Creates a no-argument function rendered without parentheses.
    #[must_use]
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::NoArgs {
            name: name.into(),
            parentheses: false,
        }
    }

    /// Creates a template function.
    #[must_use]
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
        }
    }

    /// Creates a variable-argument function.
    #[must_use]
    pub fn var_args(
        begin: impl Into<String>,
        separator: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self::VarArgs {
            begin: begin.into(),
            separator: separator.into(),
            end: end.into(),
        }
    }

    /// Renders the function with already-rendered argument expressions.
    ///
    /// `called_as` is only used in error messages.
    pub fn render(&self, called_as: &str, args: &[String]) -> Result<String> {
        match self {
            Self::Standard { name } => Ok(format!("{name}({})", args.join(", "))),
            Self::NoArgs { name, parentheses } => {
                if !args.is_empty() {
                    return Err(DialectError::FunctionArity {
                        name: called_as.to_string(),
                        expected: 0,
                        actual: args.len(),
                    });
                }
                if *parentheses {
                    Ok(format!("{name}()"))
                } else {
                    Ok(name.clone())
                }
            }
            Self::Template { template } => render_template(called_as, template, args),
            Self::VarArgs {
                begin,
                separator,
                end,
            } => Ok(format!("{begin}{}{end}", args.join(separator))),
        }
    }
}

fn render_template(called_as: &str, template: &str, args: &[String]) -> Result<String> {
    let expected = PLACEHOLDER
        .captures_iter(template)
        .filter_map(|c| c[1].parse::<usize>().ok())
        .max()
        .unwrap_or(0);
    if expected > args.len() {
        return Err(DialectError::FunctionArity {
            name: called_as.to_string(),
            expected,
            actual: args.len(),
        });
    }
    let rendered = PLACEHOLDER.replace_all(template, |caps: &regex::Captures<'_>| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| args.get(i))
            .cloned()
            .unwrap_or_default()
    });
    Ok(rendered.into_owned())
}

/// A function registration: how to render it and what it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Rendering strategy.
    pub function: SqlFunction,
    /// Return type, when fixed.
    pub return_type: Option<SqlType>,
}

/// Case-insensitive registry of framework function names.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Registration>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, replacing any earlier registration of the name.
    pub fn register(
        &mut self,
        name: &str,
        function: SqlFunction,
        return_type: Option<SqlType>,
    ) {
        self.functions.insert(
            name.to_ascii_lowercase(),
            Registration {
                function,
                return_type,
            },
        );
    }

    /// Looks up a registration.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.functions.get(&name.to_ascii_lowercase())
    }

    /// Returns true when the name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the registered return type of a function.
    #[must_use]
    pub fn return_type(&self, name: &str) -> Option<SqlType> {
        self.get(name).and_then(|r| r.return_type)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Renders a call to a registered function.
    pub fn render(&self, name: &str, args: &[String]) -> Result<String> {
        let registration = self
            .get(name)
            .ok_or_else(|| DialectError::UnknownFunction(name.to_string()))?;
        registration.function.render(name, args)
    }
}
