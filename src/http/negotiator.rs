//! Content negotiation against a server's supported values.
//!
//! Works for any Accept-style header: media types, languages, charsets or
//! encodings. Parsing never fails; malformed segments simply contribute a
//! token at the default weight of `1.0`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Ordered mapping of token to weight (q-value).
pub type AcceptMap = IndexMap<String, f64>;

static Q_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*q\s*=\s*([0-9.]+)\s*$").expect("q-value regex is valid")
});

const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Negotiator {
    // Weights are carried but not used for ranking.
    supported: AcceptMap,
    result: AcceptMap,
}

impl Negotiator {
    /// Creates a negotiator; the first supported token is the fallback.
    pub fn new(supported: AcceptMap) -> Self {
        Self {
            supported,
            result: AcceptMap::new(),
        }
    }

    /// Supported tokens, each at weight `1.0`.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            tokens
                .into_iter()
                .map(|t| (t.into(), DEFAULT_WEIGHT))
                .collect(),
        )
    }

    pub fn supported(&self) -> &AcceptMap {
        &self.supported
    }

    /// Parses `accept` and negotiates against it.
    pub fn negotiate(&mut self, accept: &str) -> Option<&str> {
        let parsed = Self::parse_raw_accept(accept);
        self.negotiate_array(&parsed)
    }

    /// Picks the supported token with the highest client weight.
    ///
    /// Weight `0` means rejected and is never picked, neither is a NaN or
    /// infinite weight. Equal weights keep the
    /// client's order. When nothing matches, the first supported token is
    /// returned and the last result is left empty. `None` only when the
    /// supported list itself is empty.
    pub fn negotiate_array(&mut self, accept: &AcceptMap) -> Option<&str> {
        let mut ranked: Vec<(&String, f64)> = accept
            .iter()
            .filter(|(_, q)| q.is_finite() && **q != 0.0)
            .map(|(token, q)| (token, *q))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        self.result = ranked
            .into_iter()
            .filter(|(token, _)| self.supported.contains_key(token.as_str()))
            .map(|(token, q)| (token.clone(), q))
            .collect();

        match self.result.first() {
            Some((token, q)) => {
                debug!(%token, q, "negotiated");
                Some(token.as_str())
            }
            None => {
                let fallback = self.supported.keys().next().map(String::as_str);
                debug!(?fallback, "no acceptable value, using default");
                fallback
            }
        }
    }

    /// Accepted supported tokens from the last negotiation, best first.
    pub fn last_result(&self) -> &AcceptMap {
        &self.result
    }

    /// Splits a raw Accept header into tokens and weights.
    ///
    /// The last well-formed `q=` parameter of a segment sets its weight.
    /// A token seen twice keeps its first position and its last weight.
    pub fn parse_raw_accept(accept: &str) -> AcceptMap {
        let mut parsed = AcceptMap::new();

        for segment in accept.split(',') {
            let mut parts = segment.split(';');
            let name = parts.next().unwrap_or("").trim();

            let mut q = DEFAULT_WEIGHT;
            for param in parts {
                if let Some(caps) = Q_VALUE.captures(param) {
                    q = leading_float(&caps[1]);
                }
            }

            parsed.insert(name.to_string(), q);
        }

        parsed
    }

    /// Collapses `en-US` style tokens to their primary tag, keeping the
    /// highest weight seen for each.
    pub fn merge_region(values: &AcceptMap) -> AcceptMap {
        let mut merged = AcceptMap::new();

        for (token, q) in values {
            let lang = match token.find('-') {
                Some(pos) if pos > 0 => &token[..pos],
                _ => token.as_str(),
            };

            match merged.get_mut(lang) {
                Some(existing) if *existing < *q => *existing = *q,
                Some(_) => {}
                None => {
                    merged.insert(lang.to_string(), *q);
                }
            }
        }

        merged
    }
}

// Reads "0.9.1" as 0.9 and "." as 0.
fn leading_float(digits: &str) -> f64 {
    let end = digits
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse().unwrap_or(0.0)
}
