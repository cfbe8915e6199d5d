//! The field-access seam between the engine and caller data.
//!
//! The engine treats records as opaque. All it ever asks of a record is
//! "what is stored under this exact key?", via the [`Record`] trait.
//! Convention handling (snake_case vs camelCase) lives in
//! [`resolve`](crate::resolve), on top of this trait.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

/// Trait for types that can be filtered.
///
/// Implementations return the value stored under `key` verbatim, or `None`
/// when the key is absent. A present key holding JSON `null` must return
/// `Some(&Value::Null)`: only absence counts as a miss.
///
/// JSON-shaped maps implement this out of the box. Typed records can
/// implement it by hand:
///
/// ```
/// use fleetops_filter::Record;
/// use serde_json::Value;
///
/// struct Vehicle {
///     plate: Value,
///     status: Value,
/// }
///
/// impl Record for Vehicle {
///     fn field(&self, key: &str) -> Option<&Value> {
///         match key {
///             "plate" => Some(&self.plate),
///             "status" => Some(&self.status),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value stored under exactly `key`, if present.
    fn field(&self, key: &str) -> Option<&Value>;
}

impl Record for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Only JSON objects have fields; every other JSON value has none.
impl Record for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, Value, S> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<&Value> {
        (**self).field(key)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, key: &str) -> Option<&Value> {
        (**self).field(key)
    }
}

/// Views a JSON value as a record collection.
///
/// Arrays yield their elements. Anything else (`null`, objects, scalars)
/// yields an empty collection rather than an error, so a response body that
/// has not arrived yet simply filters to nothing.
pub fn collection_of(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}
