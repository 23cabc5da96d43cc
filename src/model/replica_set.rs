use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{BootstrapError, ErrorCode};

pub const PRIMARY: &str = "PRIMARY";
pub const MAX_PRIORITY: f64 = 1000.0;

///
/// The document handed to replSetInitiate.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ReplicaSetConfig {
    #[serde(rename = "_id")]
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: i32,
    pub host: String,
    pub priority: f64,
}

impl ReplicaSetConfig {
    ///
    /// Build the topology from a member list such as 'mongodb-primary:27017=2,mongodb-secondary1:27017'.
    ///
    /// Member ids follow list order and a member without a priority gets a priority of 1.
    ///
    pub fn parse(name: &str, members: &str) -> Result<Self, BootstrapError> {
        let members = members
            .split(',')
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .enumerate()
            .map(|(idx, member)| Member::parse(idx as i32, member))
            .collect::<Result<Vec<Member>, BootstrapError>>()?;

        if members.is_empty() {
            return Err(ErrorCode::InvalidReplicaMember.with_msg("A replica set needs at least one member"))
        }

        for (idx, member) in members.iter().enumerate() {
            if members[..idx].iter().any(|other| other.host.eq_ignore_ascii_case(&member.host)) {
                return Err(ErrorCode::InvalidReplicaMember.with_msg(&format!("Replica member {} is listed more than once", member.host)))
            }
        }

        Ok(ReplicaSetConfig { name: name.to_string(), members })
    }
}

impl Member {
    fn parse(id: i32, member: &str) -> Result<Self, BootstrapError> {
        let (host, priority) = match member.rsplit_once('=') {
            Some((host, priority)) => (host.trim(), f64::from_str(priority.trim())
                .map_err(|_| ErrorCode::InvalidReplicaMember.with_msg(&format!("Invalid priority in replica member '{}'", member)))?),
            None => (member, 1.0),
        };

        if host.is_empty() {
            return Err(ErrorCode::InvalidReplicaMember.with_msg(&format!("Replica member '{}' has no host", member)))
        }

        if !priority.is_finite() {
            return Err(ErrorCode::InvalidReplicaMember.with_msg(&format!("Replica member '{}' needs a finite priority", member)))
        }

        if priority < 0.0 {
            return Err(ErrorCode::InvalidReplicaMember.with_msg(&format!("Replica member '{}' has a negative priority", member)))
        }

        if priority > MAX_PRIORITY {
            return Err(ErrorCode::InvalidReplicaMember.with_msg(&format!("Replica member '{}' has a priority above {}", member, MAX_PRIORITY)))
        }

        Ok(Member { id, host: host.to_string(), priority })
    }
}

///
/// The parts of replSetGetStatus we care about.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ReplicaSetStatus {
    pub set: String,
    #[serde(default)]
    pub members: Vec<MemberStatus>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatus {
    pub name: String,
    pub state_str: String,
}

impl ReplicaSetStatus {
    pub fn primary(&self) -> Option<&MemberStatus> {
        self.members.iter().find(|member| member.state_str == PRIMARY)
    }
}
