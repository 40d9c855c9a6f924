//! Store - persistence collaborator for coffee records.
//!
//! The store is a dumb CRUD layer with one exception: `update` is a
//! conditional write. Implementations must check the stored version against
//! `expected_version` and write the new record as one atomic step, so that two
//! writers holding the same version can never both succeed.
//!
//! ## Example
//!
//! ```ignore
//! use coffee_service::{CoffeeStore, InMemoryCoffeeStore};
//!
//! let store = InMemoryCoffeeStore::new();
//! let created = store.insert("Espresso")?;
//! assert_eq!(created.version, 1);
//!
//! let next = created.renamed("Doppio").unwrap();
//! let renamed = store.update(&next, created.version)?;
//! assert_eq!(renamed.version, 2);
//! ```

mod in_memory;

use std::fmt;

use crate::coffee::{Coffee, CoffeeId};

/// Abstract storage for coffee records.
pub trait CoffeeStore: Send + Sync {
    /// Get a coffee by id. Returns None if not found.
    fn find_by_id(&self, id: CoffeeId) -> Result<Option<Coffee>, StoreError>;

    /// All stored coffees. Ordering is implementation-defined.
    fn find_all(&self) -> Result<Vec<Coffee>, StoreError>;

    /// Coffees whose name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> Result<Vec<Coffee>, StoreError>;

    /// Insert a new coffee. The store assigns a fresh id and sets version 1.
    fn insert(&self, name: &str) -> Result<Coffee, StoreError>;

    /// Overwrite an existing coffee as-is, no version check.
    fn save(&self, coffee: &Coffee) -> Result<Coffee, StoreError>;

    /// Overwrite an existing coffee only if its stored version still equals
    /// `expected_version`. Check and write happen atomically.
    fn update(&self, coffee: &Coffee, expected_version: u64) -> Result<Coffee, StoreError>;

    /// Delete a coffee by id. Returns true if it existed.
    fn delete_by_id(&self, id: CoffeeId) -> Result<bool, StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency conflict on a conditional write.
    ConcurrencyConflict {
        id: CoffeeId,
        expected: u64,
        actual: u64,
    },
    /// Record not found.
    NotFound { id: CoffeeId },
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConcurrencyConflict {
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on coffee {} (expected version {}, actual {})",
                id, expected, actual
            ),
            StoreError::NotFound { id } => write!(f, "coffee not found: {}", id),
            StoreError::Storage(msg) => write!(f, "coffee storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub use in_memory::InMemoryCoffeeStore;
