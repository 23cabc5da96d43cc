use tracing::info;
use std::time::Duration;
use serde::Serialize;
use parking_lot::RwLock;
use async_trait::async_trait;
use crate::db::prelude::*;
use crate::db::server::DatabaseServer;
use crate::utils::config::Configuration;
use crate::utils::errors::{BootstrapError, ErrorCode};
use crate::model::credential::{AppUser, Credentials};
use crate::model::replica_set::{ReplicaSetConfig, ReplicaSetStatus};
use mongodb::{Client, bson::{self, Bson, Document, doc}, options::{ClientOptions, Credential}};

///
/// A MongoDB server reached through the driver.
///
/// The client is swapped for an authenticated one when authenticate is called.
///
pub struct MongoServer {
    options: ClientOptions,
    client: RwLock<Client>,
}

impl MongoServer {
    ///
    /// Build a client for the configured node. The driver connects lazily so nothing is sent until
    /// the first operation - the caller is expected to poll ping for readiness.
    ///
    pub async fn connect(app_name: &str, config: &Configuration) -> Result<MongoServer, BootstrapError> {
        // Parse the uri now.
        let mut client_options = ClientOptions::parse(&config.mongo_uri).await?;

        client_options.app_name = Some(app_name.to_string());
        client_options.server_selection_timeout = Some(Duration::from_millis(config.server_selection_timeout_ms));

        // An uninitialised replica set member can't be discovered as part of a set.
        if config.direct_connection {
            client_options.direct_connection = Some(true);
        }

        // Get a handle to the deployment.
        let client = Client::with_options(client_options.clone())?;

        Ok(MongoServer { options: client_options, client: RwLock::new(client) })
    }

    fn client(&self) -> Client {
        self.client.read().clone()
    }
}

#[async_trait]
impl DatabaseServer for MongoServer {
    async fn ping(&self) -> Result<(), BootstrapError> {
        ping(&self.client()).await
    }

    async fn insert_one(&self, db: &str, collection: &str, document: Document) -> Result<(), BootstrapError> {
        self.client()
            .database(db)
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await?;
        Ok(())
    }

    async fn replica_set_status(&self) -> Result<Option<ReplicaSetStatus>, BootstrapError> {
        let result = self.client()
            .database(ADMIN_DB)
            .run_command(doc! { REPL_SET_GET_STATUS: 1 }, None)
            .await;

        match result {
            Ok(status) => Ok(Some(bson::from_document(status)?)),
            Err(err) => match BootstrapError::from(err) {
                err if err.error_code() == ErrorCode::ReplicaSetNotInitialized => Ok(None),
                err => Err(err),
            },
        }
    }

    async fn initiate_replica_set(&self, config: &ReplicaSetConfig) -> Result<(), BootstrapError> {
        self.client()
            .database(ADMIN_DB)
            .run_command(doc! { REPL_SET_INITIATE: config.to_doc()? }, None)
            .await?;
        Ok(())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<(), BootstrapError> {
        let mut credential = Credential::default();
        credential.username = Some(credentials.username.clone());
        credential.password = Some(credentials.password.clone());
        credential.source = Some(ADMIN_DB.to_string());

        let mut options = self.options.clone();
        options.credential = Some(credential);

        // The handshake authenticates, so a ping proves the credentials.
        let client = Client::with_options(options)?;
        ping(&client).await?;

        info!("Authenticated as {}", credentials.username);
        *self.client.write() = client;
        Ok(())
    }

    async fn list_database_names(&self) -> Result<Vec<String>, BootstrapError> {
        Ok(self.client().list_database_names(None, None).await?)
    }

    async fn create_user(&self, db: &str, user: &AppUser) -> Result<(), BootstrapError> {
        let roles = user.roles
            .iter()
            .map(|role| role.to_doc().map(Bson::Document))
            .collect::<Result<Vec<Bson>, BootstrapError>>()?;

        let command = doc! {
            CREATE_USER: user.credentials.username.as_str(),
            "pwd": user.credentials.password.as_str(),
            "roles": roles,
        };

        self.client().database(db).run_command(command, None).await?;
        Ok(())
    }
}

async fn ping(client: &Client) -> Result<(), BootstrapError> {
    client.database(ADMIN_DB).run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}

pub trait Persistable<T: Serialize> {
    ///
    /// Convert into a MongoDB BSON document.
    ///
    fn to_doc(&self) -> Result<Document, BootstrapError>;
}

impl<T: Serialize> Persistable<T> for T {
    fn to_doc(&self) -> Result<Document, BootstrapError> {
        match bson::to_bson(self)? {
            Bson::Document(doc) => Ok(doc),
            _ => Err(ErrorCode::InvalidBSON.with_msg("Result is not a Document")),
        }
    }
}
