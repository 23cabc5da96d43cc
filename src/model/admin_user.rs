use sha2::{Digest, Sha256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::config::Configuration;
use crate::utils::errors::{BootstrapError, ErrorCode};

pub const ADMIN_ROLE: &str = "admin";

///
/// The administrator account as the chat application persists it in its users collection.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: bson::DateTime,
    pub services: Services,
    pub username: String,
    pub emails: Vec<Email>,
    #[serde(rename = "type")]
    pub user_type: String,
    pub status: String,
    pub active: bool,
    pub roles: Vec<String>,
    pub name: String,
    pub require_password_change: bool,
    #[serde(rename = "_updatedAt")]
    pub updated_at: bson::DateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Services {
    pub password: PasswordService,
    pub email: EmailService,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PasswordService {
    pub bcrypt: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailService {
    pub verification_tokens: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Email {
    pub address: String,
    pub verified: bool,
}

impl AdminUser {
    pub fn new(config: &Configuration, bcrypt: String, now: DateTime<Utc>) -> Self {
        let now = bson::DateTime::from_chrono(now);

        AdminUser {
            id: config.admin_id.clone(),
            created_at: now,
            services: Services {
                password: PasswordService { bcrypt },
                email: EmailService::default(),
            },
            username: config.admin_username.clone(),
            emails: vec!(Email { address: config.admin_email.clone(), verified: true }),
            user_type: "user".to_string(),
            status: "offline".to_string(),
            active: true,
            roles: vec!(ADMIN_ROLE.to_string()),
            name: config.admin_name.clone(),
            require_password_change: false,
            updated_at: now,
        }
    }
}

///
/// Produce the bcrypt hash to store for the administrator.
///
/// A configured, pre-computed hash wins. Otherwise the plain-text password is hashed the way the
/// chat application does - bcrypt over the hex SHA-256 digest of the password. Hashing is CPU bound
/// so it's done on the blocking pool.
///
pub async fn password_hash(config: &Configuration) -> Result<String, BootstrapError> {
    if let Some(hash) = &config.admin_password_hash {
        return match hash.starts_with("$2") {
            true  => Ok(hash.clone()),
            false => Err(ErrorCode::InvalidPasswordHash.with_msg("admin_password_hash is not a bcrypt hash")),
        }
    }

    let password = config.admin_password.clone();
    let cost = config.bcrypt_cost;

    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

pub fn hash_password(plain_text_password: &str, cost: u32) -> Result<String, BootstrapError> {
    let hashed = bcrypt::hash_with_result(digest(plain_text_password), cost)?;
    Ok(hashed.format_for_version(bcrypt::Version::TwoB))
}

pub fn verify_password(plain_text_password: &str, hash: &str) -> Result<bool, BootstrapError> {
    Ok(bcrypt::verify(digest(plain_text_password), hash)?)
}

fn digest(plain_text_password: &str) -> String {
    hex::encode(Sha256::digest(plain_text_password.as_bytes()))
}
