//! Score persistence.
//!
//! `ScoreStore` is the seam handlers depend on. Production uses MongoDB; the
//! in-memory store backs local runs and tests.

use crate::models::{NewScore, ScoreRecord};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc, options::FindOptions, Client as MongoClient, Collection, Database,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Collection holding score documents.
pub const SCORES_COLLECTION: &str = "puntajes";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Score validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Score store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Validates, assigns id and timestamp, and persists the score.
    async fn insert(&self, new_score: NewScore) -> Result<ScoreRecord, StoreError>;

    /// Every stored score, highest first.
    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct MongoScoreStore {
    client: MongoClient,
    db: Database,
}

impl MongoScoreStore {
    /// Builds the client from a connection string. The driver connects
    /// lazily, so an unreachable server surfaces on first use.
    pub async fn connect(uri: &str, default_database: &str) -> Result<Self, StoreError> {
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            StoreError::Database(e)
        })?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(default_database));
        tracing::info!(database = %db.name(), "MongoDB client initialized");
        Ok(Self { client, db })
    }

    pub fn scores(&self) -> Collection<ScoreRecord> {
        self.db.collection(SCORES_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ScoreStore for MongoScoreStore {
    async fn insert(&self, new_score: NewScore) -> Result<ScoreRecord, StoreError> {
        let record = ScoreRecord::create(new_score)?;

        self.scores().insert_one(&record, None).await.map_err(|e| {
            tracing::error!("Failed to insert score: {}", e);
            StoreError::Database(e)
        })?;

        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "puntaje": -1 }).build();

        let cursor = self.scores().find(None, options).await.map_err(|e| {
            tracing::error!("Failed to query scores: {}", e);
            StoreError::Database(e)
        })?;

        let records: Vec<ScoreRecord> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect scores: {}", e);
            StoreError::Database(e)
        })?;

        Ok(records)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::Database(e)
            })?;
        Ok(())
    }
}

/// Process-local store. Ties keep insertion order.
#[derive(Clone, Default)]
pub struct InMemoryScoreStore {
    records: Arc<RwLock<Vec<ScoreRecord>>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn insert(&self, new_score: NewScore) -> Result<ScoreRecord, StoreError> {
        let record = ScoreRecord::create(new_score)?;
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(records)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Stand-in used when no database client could be created at startup.
/// The server keeps running and each store call fails.
#[derive(Clone)]
pub struct UnavailableScoreStore {
    reason: String,
}

impl UnavailableScoreStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ScoreStore for UnavailableScoreStore {
    async fn insert(&self, _new_score: NewScore) -> Result<ScoreRecord, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn list_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}
