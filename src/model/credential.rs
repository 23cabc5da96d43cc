use std::fs;
use tracing::debug;
use serde::{Deserialize, Serialize};
use crate::utils::config::Configuration;
use crate::utils::errors::{BootstrapError, ErrorCode};

pub const LOCAL_DB: &str = "local";

///
/// A username and password pair.
///
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("password", &"********").finish()
    }
}

impl Credentials {
    ///
    /// The root account - from the secrets file if one is configured, otherwise the configured pair.
    ///
    pub fn root(config: &Configuration) -> Result<Credentials, BootstrapError> {
        match &config.root_credentials {
            Some(filename) => {
                debug!("Loading root credentials from secrets file {}", filename);

                let credentials = fs::read_to_string(filename)
                    .map_err(|err| ErrorCode::UnableToReadCredentials
                        .with_msg(&format!("Unable to read credentials from {}: {}", filename, err)))?;

                let mut lines = credentials.lines().map(str::trim);
                match (lines.next(), lines.next()) {
                    (Some(username), Some(password)) if !username.is_empty() => Ok(Credentials {
                        username: username.to_string(),
                        password: password.to_string(),
                    }),
                    _ => Err(ErrorCode::UnableToReadCredentials
                        .with_msg(&format!("{} must hold a username and a password on separate lines", filename))),
                }
            },
            None => Ok(Credentials {
                username: config.root_username.clone(),
                password: config.root_password.clone(),
            }),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Role {
    pub role: String,
    pub db: String,
}

impl Role {
    pub fn new(role: &str, db: &str) -> Self {
        Role { role: role.to_string(), db: db.to_string() }
    }
}

///
/// The account the chat application connects with.
///
#[derive(Clone, Debug, PartialEq)]
pub struct AppUser {
    pub credentials: Credentials,
    pub roles: Vec<Role>,
}

impl AppUser {
    ///
    /// Read-write on the application database and read on the oplog database.
    ///
    pub fn from_config(config: &Configuration) -> Self {
        AppUser {
            credentials: Credentials {
                username: config.app_username.clone(),
                password: config.app_password.clone(),
            },
            roles: vec!(
                Role::new("readWrite", &config.app_db),
                Role::new("read", LOCAL_DB),
            ),
        }
    }
}
