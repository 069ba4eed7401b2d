//! Repository Module
//!
//! Load / index / mutate / persist for one entity kind.
//!
//! ## Responsibilities
//! - Load the whole table and index it by primary key
//! - Apply add / update / delete to the indexed set
//! - Rewrite the whole table after every mutation
//! - Reload from the table so the index reflects what is on disk
//!
//! Entities are validated before anything is written, so a mutation never
//! leaves a row behind that the loader would reject.
//!
//! The table is the source of truth. In-memory state is never trusted
//! across a mutation: every mutating call ends with a full reload, even
//! when persisting failed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::entity::Entity;
use crate::error::Result;
use crate::store::{Record, TableStore};
use crate::GradeError;

/// Indexed collection of one entity kind backed by a table
///
/// ## Ordering
/// Records keep load order. `add` on an existing key replaces it in place;
/// `add` on a new key and `update` both place the record last.
///
/// ## Cost
/// Each mutation rewrites and rereads the whole table, so N sequential
/// inserts cost O(N²) I/O.
pub struct Repository<T: Entity> {
    /// Backing table
    store: TableStore,

    /// Records in table order
    records: Vec<T>,

    /// Primary key → position in `records`
    positions: HashMap<String, usize>,
}

impl<T: Entity> Repository<T> {
    /// Open the repository over the table at `path` and load it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut repo = Self {
            store: TableStore::new(path),
            records: Vec::new(),
            positions: HashMap::new(),
        };
        repo.reload()?;
        Ok(repo)
    }

    /// Read and rebuild every entity from the table
    ///
    /// Does not touch the in-memory index.
    pub fn load_all(&self) -> Result<Vec<T>> {
        self.store
            .load()?
            .iter()
            .map(T::from_record)
            .collect()
    }

    /// Replace the in-memory index with the current table contents
    pub fn reload(&mut self) -> Result<()> {
        let loaded = self.load_all()?;
        self.records.clear();
        self.positions.clear();

        // Duplicate keys in the file: later row wins, first position kept
        for entity in loaded {
            let existing = self.positions.get(entity.key()).copied();
            match existing {
                Some(pos) => self.records[pos] = entity,
                None => {
                    self.positions
                        .insert(entity.key().to_string(), self.records.len());
                    self.records.push(entity);
                }
            }
        }

        debug!(
            kind = T::KIND,
            path = %self.store.path().display(),
            count = self.records.len(),
            "repository reloaded"
        );
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get an entity by key
    pub fn get(&self, key: &str) -> Result<&T> {
        self.find(key)
            .ok_or_else(|| GradeError::not_found(T::KIND, key))
    }

    /// Get an entity by key, if present
    pub fn find(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Key → entity view of the current index
    pub fn index(&self) -> HashMap<&str, &T> {
        self.records.iter().map(|e| (e.key(), e)).collect()
    }

    /// Entities whose stored fields contain `needle`, in table order
    ///
    /// Case-sensitive, unanchored substring match.
    pub fn search(&self, needle: &str) -> Vec<&T> {
        self.records.iter().filter(|e| e.matches(needle)).collect()
    }

    /// Entities in table order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|e| e.key())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the backing table path
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert or overwrite an entity, then persist every record and reload
    pub fn add(&mut self, entity: T) -> Result<()> {
        Self::check(&entity)?;
        let key = entity.key().to_string();
        let mut next = self.records.clone();

        match self.positions.get(&key) {
            Some(&pos) => next[pos] = entity,
            None => next.push(entity),
        }

        self.commit(next)?;
        info!(kind = T::KIND, key = %key, "record added");
        Ok(())
    }

    /// Replace an existing entity (moving it last), persist and reload
    pub fn update(&mut self, entity: T) -> Result<()> {
        Self::check(&entity)?;
        let key = entity.key().to_string();
        if !self.contains(&key) {
            return Err(GradeError::not_found(T::KIND, key));
        }

        let mut next: Vec<T> = self
            .records
            .iter()
            .filter(|e| e.key() != key)
            .cloned()
            .collect();
        next.push(entity);

        self.commit(next)?;
        info!(kind = T::KIND, key = %key, "record updated");
        Ok(())
    }

    /// Remove an entity by key, persist and reload; returns the removed entity
    pub fn delete(&mut self, key: &str) -> Result<T> {
        let removed = self.get(key)?.clone();

        let next: Vec<T> = self
            .records
            .iter()
            .filter(|e| e.key() != key)
            .cloned()
            .collect();

        self.commit(next)?;
        info!(kind = T::KIND, key = %key, "record deleted");
        Ok(removed)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Validate an entity about to be written; the table is not touched
    fn check(entity: &T) -> Result<()> {
        entity.validate().map_err(|e| {
            warn!(kind = T::KIND, key = %entity.key(), error = %e, "record rejected");
            e
        })
    }

    /// Persist `next` as the whole table, then reload regardless of outcome
    fn commit(&mut self, next: Vec<T>) -> Result<()> {
        let persisted = self.persist(&next);
        let reloaded = self.reload();

        persisted?;
        reloaded
    }

    /// Write the full record set; an empty set leaves a header-only table
    fn persist(&self, entities: &[T]) -> Result<()> {
        if entities.is_empty() {
            return self.store.truncate(T::FIELDS);
        }

        let records: Vec<Record> = entities.iter().map(T::to_record).collect();
        self.store.save(&records)
    }
}
