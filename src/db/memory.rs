// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory record store.
//!
//! One arena per record kind, keyed by record id, plus an owner index
//! (`user_id` → ids) so listing a user's records never scans other users.
//! Records point at their owner only through the `user_id` field.

use crate::db::OwnedRecord;
use crate::models::{Activity, Goal, Nutrition, Sleep, Water};
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

/// Arena for one record kind.
pub struct Table<R> {
    records: DashMap<Uuid, R>,
    by_owner: DashMap<String, BTreeSet<Uuid>>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            by_owner: DashMap::new(),
        }
    }
}

impl<R: OwnedRecord> Table<R> {
    fn list(&self, user_id: &str) -> Vec<R> {
        let ids: Vec<Uuid> = self
            .by_owner
            .get(user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();

        ids.into_iter()
            .filter_map(|id| self.get(user_id, id))
            .collect()
    }

    fn get(&self, user_id: &str, id: Uuid) -> Option<R> {
        self.records
            .get(&id)
            .filter(|record| record.user_id() == user_id)
            .map(|record| record.value().clone())
    }

    fn insert(&self, record: R) {
        let id = record.id();
        let owner = record.user_id().to_string();
        self.records.insert(id, record);
        self.by_owner.entry(owner).or_default().insert(id);
    }

    fn update(&self, user_id: &str, record: R) -> bool {
        if record.user_id() != user_id {
            return false;
        }
        match self.records.get_mut(&record.id()) {
            Some(mut existing) if existing.user_id() == user_id => {
                *existing = record;
                true
            }
            _ => false,
        }
    }

    fn remove(&self, user_id: &str, id: Uuid) -> bool {
        let removed = self
            .records
            .remove_if(&id, |_, record| record.user_id() == user_id)
            .is_some();

        if removed {
            if let Some(mut ids) = self.by_owner.get_mut(user_id) {
                ids.remove(&id);
            }
            self.by_owner.remove_if(user_id, |_, ids| ids.is_empty());
        }
        removed
    }

    fn owner_of(&self, id: Uuid) -> Option<String> {
        self.records
            .get(&id)
            .map(|record| record.user_id().to_string())
    }
}

/// Selects the arena holding a record kind.
pub trait Tabled: Sized {
    fn table(db: &MemoryDb) -> &Table<Self>;
}

#[derive(Default)]
struct Tables {
    activities: Table<Activity>,
    nutrition: Table<Nutrition>,
    goals: Table<Goal>,
    sleep: Table<Sleep>,
    water: Table<Water>,
}

/// In-memory database. Cloning shares the same storage.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list<R: OwnedRecord>(&self, user_id: &str) -> Vec<R> {
        R::table(self).list(user_id)
    }

    pub fn get<R: OwnedRecord>(&self, user_id: &str, id: Uuid) -> Option<R> {
        R::table(self).get(user_id, id)
    }

    pub fn insert<R: OwnedRecord>(&self, record: R) {
        R::table(self).insert(record)
    }

    pub fn update<R: OwnedRecord>(&self, user_id: &str, record: R) -> bool {
        R::table(self).update(user_id, record)
    }

    pub fn remove<R: OwnedRecord>(&self, user_id: &str, id: Uuid) -> bool {
        R::table(self).remove(user_id, id)
    }

    /// Owner of a record, looked up by id alone.
    pub fn owner_of<R: OwnedRecord>(&self, id: Uuid) -> Option<String> {
        R::table(self).owner_of(id)
    }
}

impl Tabled for Activity {
    fn table(db: &MemoryDb) -> &Table<Self> {
        &db.tables.activities
    }
}

impl Tabled for Nutrition {
    fn table(db: &MemoryDb) -> &Table<Self> {
        &db.tables.nutrition
    }
}

impl Tabled for Goal {
    fn table(db: &MemoryDb) -> &Table<Self> {
        &db.tables.goals
    }
}

impl Tabled for Sleep {
    fn table(db: &MemoryDb) -> &Table<Self> {
        &db.tables.sleep
    }
}

impl Tabled for Water {
    fn table(db: &MemoryDb) -> &Table<Self> {
        &db.tables.water
    }
}
