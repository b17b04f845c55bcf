//! Parameterised header values.
//!
//! Headers such as `Content-Type: text/html; charset=utf8` carry a base token
//! followed by `;` separated `name=value` parameters. [`HeaderParam`] splits
//! such a value into its base and its parameters.
//!
//! Every piece is trimmed of whitespace, NUL, vertical tab and both quote
//! characters. A segment without `=` is a base candidate and the last one
//! seen wins; a repeated parameter name keeps the last value.

use indexmap::IndexMap;

const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B', '\'', '"'];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderParam {
    base: String,
    params: IndexMap<String, String>,
}

impl HeaderParam {
    pub fn parse(header: &str) -> Self {
        let mut parsed = Self::default();

        for part in header.split(';') {
            match part.split_once('=') {
                Some((name, value)) => {
                    parsed
                        .params
                        .insert(trim(name).to_string(), trim(value).to_string());
                }
                None => parsed.base = trim(part).to_string(),
            }
        }

        parsed
    }

    /// Unparameterised leading token, empty if the header had none.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Parameter value, empty if the parameter is absent.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn trim(s: &str) -> &str {
    s.trim_matches(TRIM_CHARS)
}
