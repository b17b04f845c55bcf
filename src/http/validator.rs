use regex::Regex;

use crate::error::HttpioResult;
use crate::http::value::Value;

/// Built-in sanitizing transforms.
///
/// A sanitizer never rejects a value: scalars are rendered to their string
/// form and transformed, anything else passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    UnsafeRaw,
    StripTags,
    SpecialChars,
    NumberInt,
    NumberFloat,
    Email,
    Url,
}

impl Sanitizer {
    pub fn apply(self, value: &Value) -> Value {
        match value.scalar_string() {
            Some(raw) => Value::Str(self.sanitize(&raw)),
            None => value.clone(),
        }
    }

    pub fn sanitize(self, raw: &str) -> String {
        match self {
            Sanitizer::UnsafeRaw => raw.to_string(),
            Sanitizer::StripTags => strip_tags(raw),
            Sanitizer::SpecialChars => encode_special_chars(raw),
            Sanitizer::NumberInt => keep(raw, |c| c.is_ascii_digit() || c == '+' || c == '-'),
            Sanitizer::NumberFloat => keep(raw, |c| {
                c.is_ascii_digit() || c == '+' || c == '-' || c == '.'
            }),
            Sanitizer::Email => keep(raw, |c| {
                c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(c)
            }),
            Sanitizer::Url => keep(raw, |c| {
                c.is_ascii_alphanumeric() || "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=".contains(c)
            }),
        }
    }
}

fn keep(raw: &str, allowed: impl Fn(char) -> bool) -> String {
    raw.chars().filter(|&c| allowed(c)).collect()
}

// Drops `<...>` runs, an unterminated `<` swallows the rest of the input.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match (in_tag, c) {
            (false, '<') => in_tag = true,
            (true, '>') => in_tag = false,
            (true, _) => {}
            (false, '\'') => out.push_str("&#39;"),
            (false, '"') => out.push_str("&#34;"),
            (false, c) => out.push(c),
        }
    }
    out
}

fn encode_special_chars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\'' | '"' | '<' | '>' | '&') || (c as u32) < 32 {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Filter handed to [`Laundromat::get`](crate::http::store::Laundromat::get).
pub enum Filter {
    /// Value is accepted unchanged when the predicate holds.
    Predicate(Box<dyn Fn(&Value) -> bool>),
    /// Value is transformed and always accepted.
    Sanitizer(Sanitizer),
    /// Scalar value is accepted unchanged when its string form matches.
    Pattern(Regex),
}

impl Filter {
    pub fn predicate(f: impl Fn(&Value) -> bool + 'static) -> Self {
        Filter::Predicate(Box::new(f))
    }

    pub fn pattern(re: &str) -> HttpioResult<Self> {
        Ok(Filter::Pattern(Regex::new(re)?))
    }

    /// Returns the accepted (possibly transformed) value, `None` when rejected.
    pub fn apply(&self, value: &Value) -> Option<Value> {
        match self {
            Filter::Predicate(f) => f(value).then(|| value.clone()),
            Filter::Sanitizer(s) => Some(s.apply(value)),
            Filter::Pattern(re) => {
                let raw = value.scalar_string()?;
                re.is_match(&raw).then(|| value.clone())
            }
        }
    }
}

impl From<Sanitizer> for Filter {
    fn from(s: Sanitizer) -> Self {
        Filter::Sanitizer(s)
    }
}

impl From<Regex> for Filter {
    fn from(re: Regex) -> Self {
        Filter::Pattern(re)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
            Filter::Sanitizer(s) => write!(f, "Sanitizer({s:?})"),
            Filter::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
        }
    }
}

fn all_chars(value: &Value, class: impl Fn(char) -> bool) -> bool {
    match value.as_str() {
        Some(s) => !s.is_empty() && s.chars().all(class),
        None => false,
    }
}

/// Non-empty string of ASCII letters.
pub fn is_alpha(value: &Value) -> bool {
    all_chars(value, |c| c.is_ascii_alphabetic())
}

/// Non-empty string of ASCII letters and digits.
pub fn is_alnum(value: &Value) -> bool {
    all_chars(value, |c| c.is_ascii_alphanumeric())
}

/// Non-empty string of ASCII digits.
pub fn is_digit(value: &Value) -> bool {
    all_chars(value, |c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_removes_markup_and_encodes_quotes() {
        let v = Sanitizer::StripTags.apply(&Value::from("<b>it's \"x\"</b>"));
        assert_eq!(v, Value::from("it&#39;s &#34;x&#34;"));

        let v = Sanitizer::StripTags.apply(&Value::from("abc<script"));
        assert_eq!(v, Value::from("abc"));
    }

    #[test]
    fn special_chars_are_encoded() {
        let v = Sanitizer::SpecialChars.apply(&Value::from("a<b>&\n"));
        assert_eq!(v, Value::from("a&#60;b&#62;&#38;&#10;"));
    }

    #[test]
    fn number_sanitizers() {
        assert_eq!(
            Sanitizer::NumberInt.apply(&Value::from("-12.5abc")),
            Value::from("-125")
        );
        assert_eq!(
            Sanitizer::NumberFloat.apply(&Value::from("-12.5abc")),
            Value::from("-12.5")
        );
        assert_eq!(Sanitizer::NumberInt.apply(&Value::from(42)), Value::from("42"));
    }

    #[test]
    fn email_and_url_sanitizers() {
        assert_eq!(
            Sanitizer::Email.apply(&Value::from("jo hn(at)@ex ample.com")),
            Value::from("johnat@example.com")
        );
        assert_eq!(
            Sanitizer::Url.apply(&Value::from("http://a b.se/?q=1")),
            Value::from("http://ab.se/?q=1")
        );
    }

    #[test]
    fn sanitizers_pass_non_scalars_through() {
        let list = Value::List(vec![Value::from("<b>")]);
        assert_eq!(Sanitizer::StripTags.apply(&list), list);
        assert_eq!(Sanitizer::UnsafeRaw.apply(&Value::Null), Value::Null);
    }

    #[test]
    fn pattern_rejects_non_scalars() {
        let filter = Filter::pattern(".*").unwrap();
        assert_eq!(filter.apply(&Value::List(vec![])), None);
        assert_eq!(filter.apply(&Value::from("x")), Some(Value::from("x")));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(Filter::pattern("(").is_err());
    }

    #[test]
    fn ctype_predicates() {
        assert!(is_alpha(&Value::from("bar")));
        assert!(!is_alpha(&Value::from("bar1")));
        assert!(!is_alpha(&Value::from("")));
        assert!(is_alnum(&Value::from("abc123")));
        assert!(!is_alnum(&Value::from(123)));
        assert!(is_digit(&Value::from("0042")));
    }
}
