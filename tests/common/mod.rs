#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use mongodb::bson::Document;
use mongo_bootstrap::db::server::DatabaseServer;
use mongo_bootstrap::utils::config::Configuration;
use mongo_bootstrap::utils::context::BootstrapContext;
use mongo_bootstrap::utils::errors::{BootstrapError, ErrorCode};
use mongo_bootstrap::model::credential::{AppUser, Credentials};
use mongo_bootstrap::model::replica_set::{MemberStatus, ReplicaSetConfig, ReplicaSetStatus, PRIMARY};

///
/// A context whose configuration keeps the tests quick - cheap hashing and short polling.
///
pub fn test_context() -> BootstrapContext {
    let mut config = Configuration::from_env().expect("The test configuration is not correct");
    config.bcrypt_cost = 4;
    config.admin_password_hash = None;
    config.root_credentials = None;
    config.ready_interval_ms = 1;
    config.ready_attempts = 5;
    config.ready_timeout_ms = 2000;
    config.primary_interval_ms = 1;
    config.primary_attempts = 5;
    config.primary_timeout_ms = 2000;
    config.replica_set_name = "rs0".to_string();
    config.replica_members = "mongodb-primary:27017=2,mongodb-secondary1:27017=1,mongodb-secondary2:27017=1".to_string();
    config.app_db = "rocketchat".to_string();
    config.app_username = "rocketchat".to_string();
    config.root_username = "root".to_string();
    config.root_password = "rocketchat123".to_string();
    config.users_db = "rocketchat".to_string();
    config.users_collection = "users".to_string();
    config.admin_id = "admin.rocketchat".to_string();
    config.admin_username = "admin".to_string();
    config.admin_email = "admin@rocketchat.local".to_string();
    config.admin_password = "Admin123!".to_string();
    BootstrapContext::new(config)
}

///
/// Apply any test specific tweaks to the default test configuration.
///
pub fn test_context_with(tweak: impl FnOnce(&mut Configuration)) -> BootstrapContext {
    let mut config = test_context().config().clone();
    tweak(&mut config);
    BootstrapContext::new(config)
}

#[derive(Clone, Debug, Default)]
pub struct MockState {
    pub documents: Vec<(String, String, Document)>,   // db, collection, document.
    pub replica_set: Option<ReplicaSetConfig>,
    pub initiate_calls: usize,
    pub status_calls: usize,
    pub status_error: Option<BootstrapError>,         // Returned by every status call when set.
    pub polls_until_primary: usize,                   // Status calls after initiate before a primary is elected.
    pub ping_failures: usize,                         // Transient ping failures before the server answers.
    pub ping_calls: usize,
    pub authenticated_as: Option<String>,
    pub valid_root: Option<Credentials>,
    pub databases: Vec<String>,
    pub created_users: Vec<(String, AppUser)>,
    pub calls: Vec<&'static str>,                     // The order operations were invoked in.
}

///
/// An in-memory stand-in for a MongoDB server.
///
#[derive(Default)]
pub struct MockServer {
    pub state: Mutex<MockState>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: MockState) -> Self {
        MockServer { state: Mutex::new(state) }
    }

    pub fn state(&self) -> MockState {
        self.state.lock().clone()
    }

    pub fn documents_in(&self, db: &str, collection: &str) -> Vec<Document> {
        self.state.lock().documents
            .iter()
            .filter(|(d, c, _)| d == db && c == collection)
            .map(|(_, _, doc)| doc.clone())
            .collect()
    }
}

#[async_trait]
impl DatabaseServer for MockServer {
    async fn ping(&self) -> Result<(), BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("ping");
        state.ping_calls += 1;

        match state.ping_failures {
            0 => Ok(()),
            _ => {
                state.ping_failures -= 1;
                Err(ErrorCode::ServerUnavailable.with_msg("connection refused"))
            },
        }
    }

    async fn insert_one(&self, db: &str, collection: &str, document: Document) -> Result<(), BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("insert_one");

        let id = document.get("_id").cloned();
        let duplicate = state.documents
            .iter()
            .any(|(d, c, existing)| d == db && c == collection && existing.get("_id").cloned() == id);

        if duplicate {
            return Err(ErrorCode::DuplicateKey.with_msg("E11000 duplicate key error"))
        }

        if !state.databases.iter().any(|name| name == db) {
            state.databases.push(db.to_string());
        }

        state.documents.push((db.to_string(), collection.to_string(), document));
        Ok(())
    }

    async fn replica_set_status(&self) -> Result<Option<ReplicaSetStatus>, BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("replica_set_status");
        state.status_calls += 1;

        if let Some(err) = &state.status_error {
            return Err(err.clone())
        }

        let elected = match state.polls_until_primary {
            0 => true,
            _ if state.replica_set.is_none() => false,
            _ => {
                state.polls_until_primary -= 1;
                false
            },
        };

        Ok(state.replica_set.as_ref().map(|config| ReplicaSetStatus {
            set: config.name.clone(),
            members: config.members
                .iter()
                .enumerate()
                .map(|(idx, member)| MemberStatus {
                    name: member.host.clone(),
                    state_str: match (idx, elected) {
                        (0, true) => PRIMARY.to_string(),
                        _ => "SECONDARY".to_string(),
                    },
                })
                .collect(),
        }))
    }

    async fn initiate_replica_set(&self, config: &ReplicaSetConfig) -> Result<(), BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("initiate_replica_set");
        state.initiate_calls += 1;

        if state.replica_set.is_some() {
            return Err(ErrorCode::MongoDBError.with_msg("already initialized"))
        }

        state.replica_set = Some(config.clone());
        Ok(())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<(), BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("authenticate");

        if matches!(&state.valid_root, Some(valid) if valid != credentials) {
            return Err(ErrorCode::AuthenticationFailed.with_msg("Authentication failed"))
        }

        state.authenticated_as = Some(credentials.username.clone());
        Ok(())
    }

    async fn list_database_names(&self) -> Result<Vec<String>, BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("list_database_names");
        Ok(state.databases.clone())
    }

    async fn create_user(&self, db: &str, user: &AppUser) -> Result<(), BootstrapError> {
        let mut state = self.state.lock();
        state.calls.push("create_user");

        if state.authenticated_as.is_none() {
            return Err(ErrorCode::MongoDBError.with_msg("command createUser requires authentication"))
        }

        state.created_users.push((db.to_string(), user.clone()));
        Ok(())
    }
}
