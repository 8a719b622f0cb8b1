//! Repository interface and the in-memory implementation
//!
//! Records are keyed by numeric id. The in-memory store hands out ids from an
//! auto-incrementing counter, the same way a database sequence would.

use crate::error::{Result, SchedulingError};
use crate::types::{Court, MatchResult, Player};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A record with a numeric identity
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name used in error messages
    const KIND: &'static str;

    fn id(&self) -> u32;

    fn set_id(&mut self, id: u32);
}

impl Entity for Player {
    const KIND: &'static str = "player";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Entity for Court {
    const KIND: &'static str = "court";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

impl Entity for MatchResult {
    const KIND: &'static str = "match result";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Trait for record storage operations
pub trait Repository<T: Entity>: Send + Sync {
    /// All records, ordered by id
    fn list(&self) -> Result<Vec<T>>;

    /// Get a single record
    fn get(&self, id: u32) -> Result<Option<T>>;

    /// Store a new record; the repository assigns its id
    fn create(&self, item: T) -> Result<T>;

    /// Replace an existing record, keeping its id
    fn update(&self, item: T) -> Result<T>;

    /// Remove a record, returning whether it existed
    fn delete(&self, id: u32) -> Result<bool>;
}

/// In-memory repository implementation
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    items: RwLock<BTreeMap<u32, T>>,
    next_id: AtomicU32,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository; ids start at 1
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            next_id: AtomicU32::new(1),
        }
    }

    /// Create a repository seeded with existing records, keeping their ids
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let items: BTreeMap<u32, T> = items.into_iter().map(|item| (item.id(), item)).collect();
        let next_id = items.keys().next_back().map_or(1, |max| max + 1);

        Self {
            items: RwLock::new(items),
            next_id: AtomicU32::new(next_id),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<u32, T>>> {
        self.items.read().map_err(|_| {
            SchedulingError::Storage {
                message: format!("Failed to acquire {} read lock", T::KIND),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<u32, T>>> {
        self.items.write().map_err(|_| {
            SchedulingError::Storage {
                message: format!("Failed to acquire {} write lock", T::KIND),
            }
            .into()
        })
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn get(&self, id: u32) -> Result<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn create(&self, mut item: T) -> Result<T> {
        let mut items = self.write()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        item.set_id(id);
        items.insert(id, item.clone());
        Ok(item)
    }

    fn update(&self, item: T) -> Result<T> {
        let mut items = self.write()?;
        match items.get_mut(&item.id()) {
            Some(existing) => {
                *existing = item.clone();
                Ok(item)
            }
            None => Err(SchedulingError::NotFound {
                entity: T::KIND,
                id: item.id(),
            }
            .into()),
        }
    }

    fn delete(&self, id: u32) -> Result<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }
}
