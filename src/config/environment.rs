//! # Raw Environment
//!
//! Read-only key/value lookup the resolver reads variables from.
//!
//! The process environment is the production source. `MapEnvironment` holds an
//! in-memory snapshot so the resolver can run without touching `std::env`.

use std::collections::HashMap;

/// Read-only view over environment variables
///
/// Implementations must never mutate the underlying source.
pub trait RawEnvironment {
    /// Look up a variable by its exact, case-sensitive name
    fn lookup(&self, name: &str) -> Option<String>;

    /// Look up a variable, treating an empty value the same as an unset one
    fn non_empty(&self, name: &str) -> Option<String> {
        self.lookup(name).filter(|value| !value.is_empty())
    }
}

/// Environment backed by the current process (`std::env`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl RawEnvironment for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        // Non-UTF-8 values are treated as unset
        std::env::var(name).ok()
    }
}

/// In-memory environment snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl RawEnvironment for MapEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<E: RawEnvironment + ?Sized> RawEnvironment for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}
