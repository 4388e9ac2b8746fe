// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Every operation is scoped to an owner: a record whose `user_id` differs
//! from the caller's is reported as absent and is never modified.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
    pub const NUTRITION: &str = "nutrition";
    pub const GOALS: &str = "goals";
    pub const SLEEP: &str = "sleep";
    pub const WATER: &str = "water";
}

/// A record owned by exactly one user.
pub trait OwnedRecord:
    Serialize + DeserializeOwned + Clone + Send + Sync + memory::Tabled + 'static
{
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;

    /// Owner identity (foreign key to the user).
    fn user_id(&self) -> &str;
}

/// Record store used by the API.
#[derive(Clone)]
pub enum Database {
    Memory(MemoryDb),
    Firestore(FirestoreDb),
}

impl Database {
    /// Open the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory record store");
                Ok(Database::Memory(MemoryDb::new()))
            }
            StorageBackend::Firestore => Ok(Database::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
        }
    }

    /// All records of kind `R` owned by `user_id`.
    pub async fn list<R: OwnedRecord>(&self, user_id: &str) -> Result<Vec<R>, AppError> {
        match self {
            Database::Memory(db) => Ok(db.list(user_id)),
            Database::Firestore(db) => db.list(user_id).await,
        }
    }

    /// One record, if it exists and belongs to `user_id`.
    pub async fn get<R: OwnedRecord>(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<R>, AppError> {
        match self {
            Database::Memory(db) => Ok(db.get(user_id, id)),
            Database::Firestore(db) => db.get(user_id, id).await,
        }
    }

    /// Store a new record.
    pub async fn create<R: OwnedRecord>(&self, record: &R) -> Result<(), AppError> {
        match self {
            Database::Memory(db) => {
                db.insert(record.clone());
                Ok(())
            }
            Database::Firestore(db) => db.create(record).await,
        }
    }

    /// Replace a record owned by `user_id`.
    ///
    /// Returns `false` (nothing written) when the record does not exist,
    /// belongs to someone else, or would change owner.
    pub async fn update<R: OwnedRecord>(
        &self,
        user_id: &str,
        record: &R,
    ) -> Result<bool, AppError> {
        match self {
            Database::Memory(db) => Ok(db.update(user_id, record.clone())),
            Database::Firestore(db) => db.update(user_id, record).await,
        }
    }

    /// Delete a record owned by `user_id`. Returns `false` if nothing was deleted.
    pub async fn delete<R: OwnedRecord>(&self, user_id: &str, id: Uuid) -> Result<bool, AppError> {
        match self {
            Database::Memory(db) => Ok(db.remove::<R>(user_id, id)),
            Database::Firestore(db) => db.delete::<R>(user_id, id).await,
        }
    }
}
