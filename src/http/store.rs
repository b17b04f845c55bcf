//! Case-insensitive store for untrusted request data.
//!
//! Keys are ASCII lower-cased on the way in, so keys that differ only in
//! ASCII case are the same key and a later one overwrites an earlier one.
//! Non-ASCII characters are compared as-is. A key holding [`Value::Null`]
//! counts as unset. Values can only be read back through a [`Filter`]; there
//! is no unfiltered getter.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{HttpioError, HttpioResult};
use crate::http::validator::Filter;
use crate::http::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Laundromat {
    data: IndexMap<String, Value>,
}

impl Laundromat {
    pub fn new<K, I>(data: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut store = IndexMap::new();
        for (key, value) in data {
            store.insert(key.as_ref().to_ascii_lowercase(), value);
        }
        Self { data: store }
    }

    pub fn is(&self, key: &str) -> bool {
        self.lookup(&key.to_ascii_lowercase()).is_some()
    }

    pub fn has(&self, key: &str) -> bool {
        self.is(key)
    }

    pub fn remove(&mut self, key: &str) {
        self.data.shift_remove(&key.to_ascii_lowercase());
    }

    /// Reads `key` through `filter`.
    ///
    /// Fails with [`HttpioError::DataNotSet`] when the key is absent and with
    /// [`HttpioError::DataNotValid`] when the filter rejects the value.
    pub fn get(&self, key: &str, filter: &Filter) -> HttpioResult<Value> {
        let key = key.to_ascii_lowercase();

        let Some(value) = self.lookup(&key) else {
            trace!(%key, "request data missing");
            return Err(HttpioError::DataNotSet { key });
        };

        match filter.apply(value) {
            Some(accepted) => Ok(accepted),
            None => {
                trace!(%key, ?filter, "request data rejected by filter");
                Err(HttpioError::DataNotValid { key })
            }
        }
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !matches!(v, Value::Null))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lower-cased keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}
