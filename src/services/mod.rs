mod init_replica_set;
mod seed_admin;

use std::str::FromStr;
use derive_more::Display;
use crate::utils::errors::{BootstrapError, ErrorCode};

pub use init_replica_set::{init_replica_set, InitReport};
pub use seed_admin::{seed_admin, SeedOutcome, SeedReport};

///
/// The bootstrap work to carry out in this run.
///
#[derive(Clone, Copy, Debug, Display, PartialEq)]
pub enum Task {
    #[display(fmt = "seed-admin")]
    SeedAdmin,
    #[display(fmt = "init-replica-set")]
    InitReplicaSet,
    #[display(fmt = "all")]
    All,
}

impl Task {
    pub fn seeds_admin(&self) -> bool {
        matches!(self, Task::SeedAdmin | Task::All)
    }

    pub fn inits_replica_set(&self) -> bool {
        matches!(self, Task::InitReplicaSet | Task::All)
    }
}

impl FromStr for Task {
    type Err = BootstrapError;

    fn from_str(input: &str) -> Result<Task, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "seed-admin"       => Ok(Task::SeedAdmin),
            "init-replica-set" => Ok(Task::InitReplicaSet),
            "all"              => Ok(Task::All),
            unknown => Err(ErrorCode::InvalidTask
                .with_msg(&format!("Unknown task '{}', expected seed-admin, init-replica-set or all", unknown))),
        }
    }
}
