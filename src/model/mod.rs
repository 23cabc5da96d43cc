pub mod admin_user;
pub mod credential;
pub mod replica_set;
