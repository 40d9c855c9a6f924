//! Coffee - the single resource type served by this crate.
//!
//! A `Coffee` carries its own `version`, which is the optimistic concurrency
//! token handed to clients as an `ETag` and expected back in `If-Match`.
//!
//! ## Example
//!
//! ```ignore
//! use coffee_service::{Coffee, CoffeeInput};
//!
//! let input: CoffeeInput = serde_json::from_str(r#"{"name": "Flat White", "version": 9}"#)?;
//! assert_eq!(input.name, "Flat White"); // `version` is not client-settable
//! ```

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a coffee. Never reused after deletion.
pub type CoffeeId = u64;

/// Path under which a single coffee is addressed.
pub const RESOURCE_PATH: &str = "/coffee";

/// A stored coffee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: CoffeeId,
    pub name: String,
    pub version: u64,
}

impl Coffee {
    /// `Location` of this record, e.g. `/coffee/7`.
    pub fn location(&self) -> String {
        location_of(self.id)
    }

    /// Entity tag for this record's version, e.g. `"3"` (quotes included).
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.version)
    }

    /// Copy of this record renamed and advanced by exactly one version.
    ///
    /// None once the version counter is exhausted; it never wraps.
    pub fn renamed(&self, name: impl Into<String>) -> Option<Self> {
        Some(Coffee {
            id: self.id,
            name: name.into(),
            version: self.version.checked_add(1)?,
        })
    }
}

/// `Location` path for a coffee id.
pub fn location_of(id: CoffeeId) -> String {
    format!("{}/{}", RESOURCE_PATH, id)
}

/// Client payload for create and update.
///
/// `name` is the only client-settable field. Any `id` or `version` present in
/// the request body is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeInput {
    pub name: String,
}

impl CoffeeInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
