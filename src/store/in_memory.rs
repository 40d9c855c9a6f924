//! InMemoryCoffeeStore - BTreeMap-backed coffee store for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{CoffeeStore, StoreError};
use crate::coffee::{Coffee, CoffeeId};

struct Storage {
    records: BTreeMap<CoffeeId, Coffee>,
    /// Next id to hand out. Only ever grows, so deleted ids are never reused.
    next_id: CoffeeId,
}

/// In-memory coffee store.
///
/// All writes, including the conditional `update`, run under one write lock,
/// which makes the version check and the write a single atomic step.
/// `find_all` returns records in ascending id order. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryCoffeeStore {
    storage: Arc<RwLock<Storage>>,
}

impl Default for InMemoryCoffeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCoffeeStore {
    /// Create a new empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Storage {
                records: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }
}

impl CoffeeStore for InMemoryCoffeeStore {
    fn find_by_id(&self, id: CoffeeId) -> Result<Option<Coffee>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Coffee>, StoreError> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Vec<Coffee>, StoreError> {
        Ok(self
            .read()?
            .records
            .values()
            .filter(|coffee| coffee.name == name)
            .cloned()
            .collect())
    }

    fn insert(&self, name: &str) -> Result<Coffee, StoreError> {
        let mut storage = self.write()?;

        let id = storage.next_id;
        storage.next_id += 1;

        let coffee = Coffee {
            id,
            name: name.to_string(),
            version: 1,
        };
        storage.records.insert(id, coffee.clone());

        Ok(coffee)
    }

    fn save(&self, coffee: &Coffee) -> Result<Coffee, StoreError> {
        let mut storage = self.write()?;

        match storage.records.get_mut(&coffee.id) {
            Some(stored) => {
                *stored = coffee.clone();
                Ok(coffee.clone())
            }
            None => Err(StoreError::NotFound { id: coffee.id }),
        }
    }

    fn update(&self, coffee: &Coffee, expected_version: u64) -> Result<Coffee, StoreError> {
        let mut storage = self.write()?;

        let stored = storage
            .records
            .get_mut(&coffee.id)
            .ok_or(StoreError::NotFound { id: coffee.id })?;

        if stored.version != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                id: coffee.id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        *stored = coffee.clone();
        Ok(coffee.clone())
    }

    fn delete_by_id(&self, id: CoffeeId) -> Result<bool, StoreError> {
        Ok(self.write()?.records.remove(&id).is_some())
    }
}
