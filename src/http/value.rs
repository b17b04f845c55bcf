//! Raw, untyped request input.
//!
//! A request-binding layer decodes query strings, headers, cookies and bodies
//! into [`Value`]s before handing them to a [`Laundromat`](crate::http::store::Laundromat).
//! Nothing in here is validated; that is the job of the store and its filters.

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Strings, numbers and booleans.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
        )
    }

    /// String form of a scalar, `None` for null and compound values.
    ///
    /// `true` renders as `"1"` and `false` as the empty string.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Value::Bool(true) => Some("1".to_string()),
            Value::Bool(false) => Some(String::new()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Str(s) => Some(s.clone()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_strings() {
        assert_eq!(Value::from(true).scalar_string().as_deref(), Some("1"));
        assert_eq!(Value::from(false).scalar_string().as_deref(), Some(""));
        assert_eq!(Value::from(123).scalar_string().as_deref(), Some("123"));
        assert_eq!(Value::from("abc").scalar_string().as_deref(), Some("abc"));
        assert_eq!(Value::Null.scalar_string(), None);
        assert_eq!(Value::List(vec![]).scalar_string(), None);
    }

    #[test]
    fn compound_values_are_not_scalar() {
        assert!(!Value::List(vec![Value::from(1)]).is_scalar());
        assert!(!Value::Map(IndexMap::new()).is_scalar());
        assert!(!Value::Null.is_scalar());
        assert!(Value::from(1.5).is_scalar());
    }
}
