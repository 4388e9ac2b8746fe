// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed, owner-scoped operations.
//!
//! Each record kind lives in its own collection, with the record id as the
//! document id and the owner in a `user_id` field.

use crate::db::OwnedRecord;
use crate::error::AppError;
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;
use uuid::Uuid;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── Owner-scoped Record Operations ──────────────────────────

    /// Get all records in `R`'s collection owned by `user_id`.
    pub async fn list<R: OwnedRecord>(&self, user_id: &str) -> Result<Vec<R>, AppError> {
        let owner = user_id.to_string();
        self.client
            .fluent()
            .select()
            .from(R::COLLECTION)
            .filter(move |q| q.field("user_id").eq(owner.clone()))
            .obj::<R>()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a record by id, hiding records that belong to another user.
    pub async fn get<R: OwnedRecord>(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<R>, AppError> {
        let record: Option<R> = self
            .client
            .fluent()
            .select()
            .by_id_in(R::COLLECTION)
            .obj()
            .one(&id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(record.filter(|r| r.user_id() == user_id))
    }

    /// Store a new record.
    pub async fn create<R: OwnedRecord>(&self, record: &R) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(R::COLLECTION)
            .document_id(record.id().to_string())
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace a record owned by `user_id`. Returns `false` if not owned.
    ///
    /// The write only applies to an existing document, so a record deleted
    /// after the ownership check is not recreated.
    pub async fn update<R: OwnedRecord>(
        &self,
        user_id: &str,
        record: &R,
    ) -> Result<bool, AppError> {
        if record.user_id() != user_id {
            return Ok(false);
        }
        if self.get::<R>(user_id, record.id()).await?.is_none() {
            return Ok(false);
        }

        let result: Result<(), FirestoreError> = self
            .client
            .fluent()
            .update()
            .in_col(R::COLLECTION)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(record.id().to_string())
            .object(record)
            .execute()
            .await;

        match result {
            Ok(()) => Ok(true),
            Err(FirestoreError::DataNotFoundError(_)) => {
                tracing::debug!(
                    collection = R::COLLECTION,
                    id = %record.id(),
                    "Record deleted before update"
                );
                Ok(false)
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Delete a record owned by `user_id`. Returns `false` if not owned.
    pub async fn delete<R: OwnedRecord>(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<bool, AppError> {
        if self.get::<R>(user_id, id).await?.is_none() {
            return Ok(false);
        }

        self.client
            .fluent()
            .delete()
            .from(R::COLLECTION)
            .document_id(id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(collection = R::COLLECTION, %id, "Deleted record");
        Ok(true)
    }
}
