//! Service - the optimistic concurrency protocol for coffees.
//!
//! `CoffeeService<S>` sits between a transport and a `CoffeeStore`. It decides
//! not-found, version conflicts and version advance; the transport only maps
//! the outcome onto status codes and headers.
//!
//! ## Update protocol
//!
//! 1. Look up the coffee. Missing → `ServiceError::NotFound` (the `If-Match`
//!    value is never consulted).
//! 2. Compare `If-Match` with the stored version, exact equality. Mismatch →
//!    `ServiceError::Conflict`, nothing is written.
//! 3. Write the renamed record at `version + 1` through the store's
//!    conditional `update`. A writer that slipped in between steps 1 and 3 is
//!    reported by the store and also surfaces as `ServiceError::Conflict`.
//!
//! ## Example
//!
//! ```ignore
//! use coffee_service::{CoffeeInput, CoffeeService, InMemoryCoffeeStore};
//!
//! let service = CoffeeService::new(InMemoryCoffeeStore::new());
//! let created = service.create(&CoffeeInput::new("Cortado"))?;
//! let updated = service.update(created.id, &CoffeeInput::new("Gibraltar"), 1)?;
//! assert_eq!(updated.version, 2);
//! ```

mod error;

use tracing::{debug, error, info, warn};

use crate::coffee::{Coffee, CoffeeId, CoffeeInput};
use crate::store::{CoffeeStore, StoreError};

pub use error::ServiceError;

/// Coffee CRUD with version-checked updates over any `CoffeeStore`.
pub struct CoffeeService<S> {
    store: S,
}

impl<S: CoffeeStore> CoffeeService<S> {
    /// Create a new service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a coffee by id.
    pub fn get(&self, id: CoffeeId) -> Result<Coffee, ServiceError> {
        debug!(id, "get coffee");
        self.store
            .find_by_id(id)
            .map_err(|e| self.store_fault("get", e))?
            .ok_or(ServiceError::NotFound(id))
    }

    /// All coffees, or only those named `name` when given.
    pub fn list(&self, name: Option<&str>) -> Result<Vec<Coffee>, ServiceError> {
        debug!(?name, "list coffees");
        let result = match name {
            Some(name) => self.store.find_by_name(name),
            None => self.store.find_all(),
        };
        result.map_err(|e| self.store_fault("list", e))
    }

    /// Create a coffee. The store assigns the id; version always starts at 1.
    pub fn create(&self, input: &CoffeeInput) -> Result<Coffee, ServiceError> {
        let coffee = self
            .store
            .insert(&input.name)
            .map_err(|e| self.store_fault("create", e))?;
        info!(id = coffee.id, version = coffee.version, "coffee created");
        Ok(coffee)
    }

    /// Rename a coffee if `if_match` equals its current version.
    ///
    /// `if_match` is the client's value as sent. Negative values never equal
    /// a stored version and always conflict.
    pub fn update(
        &self,
        id: CoffeeId,
        input: &CoffeeInput,
        if_match: i64,
    ) -> Result<Coffee, ServiceError> {
        let current = self.get(id)?;

        let expected = match u64::try_from(if_match) {
            Ok(version) if version == current.version => version,
            _ => {
                warn!(
                    id,
                    expected = if_match,
                    actual = current.version,
                    "update rejected: version conflict"
                );
                return Err(ServiceError::Conflict {
                    id,
                    expected: if_match,
                    actual: current.version,
                });
            }
        };

        let next = current.renamed(input.name.as_str()).ok_or_else(|| {
            let err = ServiceError::Store(StoreError::Storage(format!(
                "version counter exhausted for coffee {}",
                id
            )));
            error!(id, error = %err, "update failed");
            err
        })?;

        let updated = self.store.update(&next, expected).map_err(|e| {
            let err = ServiceError::from(e);
            if let ServiceError::Store(_) = err {
                error!(id, error = %err, "update failed");
            } else {
                warn!(id, error = %err, "update lost race to concurrent writer");
            }
            err
        })?;

        info!(id, version = updated.version, "coffee updated");
        Ok(updated)
    }

    /// Delete a coffee. No version check.
    pub fn delete(&self, id: CoffeeId) -> Result<(), ServiceError> {
        if !self
            .store
            .delete_by_id(id)
            .map_err(|e| self.store_fault("delete", e))?
        {
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "coffee deleted");
        Ok(())
    }

    fn store_fault(&self, operation: &'static str, err: StoreError) -> ServiceError {
        error!(operation, error = %err, "store failure");
        ServiceError::from(err)
    }
}
