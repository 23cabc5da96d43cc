use std::fmt;
use bcrypt::BcryptError;
use mongodb::bson;
use tokio::task::JoinError;
use config::ConfigError;
use bson::document::ValueAccessError;
use mongodb::error::{ErrorKind, WriteFailure};
use crate::db::prelude::{DUPLICATE_KEY, NOT_YET_INITIALIZED};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorCode {
    InvalidConfig                   = 0100,
    InvalidTask                     = 0101,
    InvalidReplicaMember            = 0102,
    RuntimeError                    = 0400,
    HashThreadingIssue              = 0401,
    UnableToReadCredentials         = 0500,
    MongoDBError                    = 0503,
    InvalidBSON                     = 0504,
    InvalidJSON                     = 0505,
    BSONFieldNotFound               = 0507,
    HashingError                    = 0509,
    InvalidPasswordHash             = 0510,
    ServerUnavailable               = 0600,
    ReplicaSetNotReady              = 0601,
    ReadinessTimeout                = 0602,
    ServerNotReady                  = 0603,
    AuthenticationFailed            = 0604,
    ReplicaSetNotInitialized        = 0605,
    DuplicateKey                    = 0700,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> BootstrapError {
        BootstrapError::new(*self, message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BootstrapError {
    error_code: ErrorCode,
    message: String,
}

impl BootstrapError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        BootstrapError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    ///
    /// Indicates the server may simply not be reachable yet - these are worth retrying while waiting
    /// for the server to come up, everything else should be surfaced straight away.
    ///
    pub fn is_transient(&self) -> bool {
        matches!(self.error_code, ErrorCode::ServerUnavailable | ErrorCode::ReplicaSetNotReady)
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code as u32, self.message)
    }
}

impl std::error::Error for BootstrapError {}

impl From<ConfigError> for BootstrapError {
    fn from(error: ConfigError) -> Self {
        ErrorCode::InvalidConfig.with_msg(&format!("The configuration is not correct: {}", error))
    }
}

impl From<serde_json::Error> for BootstrapError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidJSON.with_msg(&format!("Unable to convert to json: {}", error))
    }
}

impl From<mongodb::error::Error> for BootstrapError {
    fn from(error: mongodb::error::Error) -> Self {
        let code = match &*error.kind {
            ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY => ErrorCode::DuplicateKey,
            ErrorKind::Command(ce) if ce.code == NOT_YET_INITIALIZED => ErrorCode::ReplicaSetNotInitialized,
            ErrorKind::ServerSelection { .. }      |
            ErrorKind::Io(_)                       |
            ErrorKind::ConnectionPoolCleared { .. } => ErrorCode::ServerUnavailable,
            ErrorKind::Authentication { .. }       => ErrorCode::AuthenticationFailed,
            _ => ErrorCode::MongoDBError,
        };

        code.with_msg(&format!("MongoDB error: {}", error))
    }
}

impl From<ValueAccessError> for BootstrapError {
    fn from(error: ValueAccessError) -> Self {
        ErrorCode::BSONFieldNotFound.with_msg(&format!("Unable to read BSON: {}", error))
    }
}

impl From<bson::ser::Error> for BootstrapError {
    fn from(error: bson::ser::Error) -> Self {
        ErrorCode::InvalidBSON.with_msg(&format!("Unable to serialise BSON: {}", error))
    }
}

impl From<bson::de::Error> for BootstrapError {
    fn from(error: bson::de::Error) -> Self {
        ErrorCode::InvalidBSON.with_msg(&format!("Unable to deserialise BSON: {}", error))
    }
}

impl From<JoinError> for BootstrapError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

impl From<BcryptError> for BootstrapError {
    fn from(error: BcryptError) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to hash password: {}", error))
    }
}
