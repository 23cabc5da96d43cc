use async_trait::async_trait;
use mongodb::bson::Document;
use crate::utils::errors::BootstrapError;
use crate::model::credential::{AppUser, Credentials};
use crate::model::replica_set::{ReplicaSetConfig, ReplicaSetStatus};

///
/// The handful of administrative operations the bootstrap tasks need from a database server.
///
/// Implemented over the MongoDB driver for real deployments and by an in-memory server in tests.
///
#[async_trait]
pub trait DatabaseServer: Send + Sync {
    ///
    /// Cheapest possible round-trip - used to poll for readiness.
    ///
    async fn ping(&self) -> Result<(), BootstrapError>;

    ///
    /// Insert a single document. A duplicate _id is reported as ErrorCode::DuplicateKey.
    ///
    async fn insert_one(&self, db: &str, collection: &str, document: Document) -> Result<(), BootstrapError>;

    ///
    /// The current replica set status, or None if the server says it's not yet initialised.
    ///
    /// Any other failure (replication not enabled, auth, network) is an error.
    ///
    async fn replica_set_status(&self) -> Result<Option<ReplicaSetStatus>, BootstrapError>;

    async fn initiate_replica_set(&self, config: &ReplicaSetConfig) -> Result<(), BootstrapError>;

    ///
    /// Authenticate against the admin database - subsequent operations run as this user.
    ///
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), BootstrapError>;

    async fn list_database_names(&self) -> Result<Vec<String>, BootstrapError>;

    async fn create_user(&self, db: &str, user: &AppUser) -> Result<(), BootstrapError>;
}
