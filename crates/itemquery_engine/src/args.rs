//! Query argument tokenizing.
//!
//! Arguments are split on single spaces with empty tokens dropped, so
//! `"a  b"` yields two tokens. A token starting with `@` is a flag; flags
//! must follow every positional argument.

use itemquery_foundation::{Error, Result};

/// Splits a raw argument string into tokens.
///
/// Splitting is on the space character only; tabs and other whitespace
/// stay inside tokens.
#[must_use]
pub fn split_args(raw: &str) -> Vec<&str> {
    raw.split(' ').filter(|token| !token.is_empty()).collect()
}

/// Returns true if a token is a flag.
#[must_use]
pub fn is_flag(token: &str) -> bool {
    token.starts_with('@')
}

/// Parsed query arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryArgs<'a> {
    positional: Vec<&'a str>,
    flags: Vec<&'a str>,
}

impl<'a> QueryArgs<'a> {
    /// Parses arguments, accepting up to `max_positional` positional
    /// arguments followed by any of `known_flags`.
    ///
    /// Flags are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an argument error if a positional argument follows a flag,
    /// if there are too many positional arguments, or if a flag is unknown.
    pub fn parse(raw: &'a str, max_positional: usize, known_flags: &[&str]) -> Result<Self> {
        let mut args = Self::default();

        for token in split_args(raw) {
            if is_flag(token) {
                if !known_flags.iter().any(|f| f.eq_ignore_ascii_case(token)) {
                    return Err(Error::unknown_flag(token));
                }
                args.flags.push(token);
                continue;
            }

            if !args.flags.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "argument '{token}' can't appear after a flag"
                )));
            }
            if args.positional.len() == max_positional {
                return Err(Error::invalid_argument(format!(
                    "expected at most {max_positional} argument(s), found '{token}'"
                )));
            }
            args.positional.push(token);
        }

        Ok(args)
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Returns true if there are no positional arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Returns a positional argument.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&'a str> {
        self.positional.get(index).copied()
    }

    /// Returns a positional argument, or an error naming it if missing.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the argument is absent.
    pub fn required(&self, index: usize, name: &str) -> Result<&'a str> {
        self.positional(index)
            .ok_or_else(|| Error::invalid_argument(format!("missing required argument <{name}>")))
    }

    /// Parses an optional integer argument.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the argument is not an integer.
    pub fn int_or(&self, index: usize, name: &str, default: i32) -> Result<i32> {
        match self.positional(index) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| {
                Error::invalid_argument(format!("can't parse <{name}> value '{raw}' as an integer"))
            }),
        }
    }

    /// Returns true if the flag was given.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }
}
