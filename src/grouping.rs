//! Group selectors: which group(s) an event belongs to.
//!
//! A [`GroupSelector`] is fixed when a [`WindowedCollection`](crate::WindowedCollection)
//! is built and resolves every ingested event to one or more group labels:
//!
//! - [`GroupSelector::Field`]: the stringified value of one field.
//! - [`GroupSelector::Fields`]: the values of several fields, encoded as a JSON
//!   array of strings so no field content can be mistaken for a separator.
//! - [`GroupSelector::Function`]: any pure function of the event. Returning
//!   several labels places the event in several groups at once.
//!
//! Missing fields resolve to [`NO_GROUP`] unless strict mode is requested, in
//! which case they fail with [`Error::MissingField`].

use crate::error::{Error, Result};
use crate::event::Event;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Label used when no grouping applies, or a lenient selector finds no value.
pub const NO_GROUP: &str = "";

/// A user-supplied grouping function.
pub type GroupFn = Arc<dyn Fn(&Event) -> Vec<String> + Send + Sync>;

#[derive(Clone)]
pub enum GroupSelector {
    Field(String),
    Fields(Vec<String>),
    Function(GroupFn),
}

impl GroupSelector {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(names.into_iter().map(Into::into).collect())
    }

    /// Group by an arbitrary function returning one or more labels.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Event) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Resolve the labels of `event`. The result is never empty and holds no
    /// duplicates.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] when `strict` is set and a selected
    /// field is absent.
    pub fn labels(&self, event: &Event, strict: bool) -> Result<Vec<String>> {
        match self {
            Self::Field(name) => Ok(vec![field_label(event, name, strict)?]),
            Self::Fields(names) => {
                let parts = names
                    .iter()
                    .map(|name| field_label(event, name, strict))
                    .collect::<Result<Vec<_>>>()?;
                // A JSON array of strings escapes quotes and commas in values.
                let joined = serde_json::to_string(&parts)
                    .map_err(|e| Error::config(format!("cannot encode group label: {e}")))?;
                Ok(vec![joined])
            }
            Self::Function(f) => {
                let mut labels: Vec<String> = Vec::new();
                for label in f(event) {
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
                if labels.is_empty() {
                    labels.push(NO_GROUP.to_string());
                }
                Ok(labels)
            }
        }
    }
}

fn field_label(event: &Event, name: &str, strict: bool) -> Result<String> {
    match event.get(name) {
        Some(value) => Ok(stringify(value)),
        None if strict => Err(Error::MissingField {
            field: name.to_string(),
        }),
        None => Ok(NO_GROUP.to_string()),
    }
}

/// Strings label as their contents; everything else as its JSON text.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Debug for GroupSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Fields(names) => f.debug_tuple("Fields").field(names).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for GroupSelector {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl From<String> for GroupSelector {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

impl From<Vec<String>> for GroupSelector {
    fn from(names: Vec<String>) -> Self {
        Self::Fields(names)
    }
}

impl From<Vec<&str>> for GroupSelector {
    fn from(names: Vec<&str>) -> Self {
        Self::fields(names)
    }
}
