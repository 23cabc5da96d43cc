use tracing::{debug, info, instrument, warn};
use crate::db::server::DatabaseServer;
use crate::utils::readiness::wait_for;
use crate::utils::context::BootstrapContext;
use crate::utils::errors::{BootstrapError, ErrorCode};
use crate::model::credential::{AppUser, Credentials};
use crate::model::replica_set::{ReplicaSetConfig, ReplicaSetStatus};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InitReport {
    pub initiated: bool,
    pub user_created: bool,
}

///
/// Bring a fresh node up as the first member of the replica set and provision the application user.
///
/// Each step checks the server's state first, so re-running against an initialised deployment only
/// authenticates and lists databases.
///
#[instrument(skip(ctx, server))]
pub async fn init_replica_set(ctx: &BootstrapContext, server: &dyn DatabaseServer) -> Result<InitReport, BootstrapError> {
    let config = ctx.config();
    let mut report = InitReport::default();

    // Validate the topology before touching the server.
    let topology = ReplicaSetConfig::parse(&config.replica_set_name, &config.replica_members)?;
    let root = Credentials::root(config)?;

    info!("Starting replica set initialisation...");

    wait_for("MongoDB", &config.readiness(), || server.ping()).await?;

    match server.replica_set_status().await? {
        Some(status) => {
            if status.set != topology.name {
                warn!("Replica set {} is already initialised but {} was configured", status.set, topology.name);
            }
            info!("Replica set {} already initialised with {} members", status.set, status.members.len());
        },
        None => {
            info!("Initialising replica set {} with members {:?}", topology.name,
                topology.members.iter().map(|m| m.host.as_str()).collect::<Vec<_>>());

            server.initiate_replica_set(&topology).await?;
            report.initiated = true;

            let primary = wait_for("a replica set primary", &config.stabilisation(), || async move {
                match server.replica_set_status().await? {
                    Some(status) => elected_primary(&status),
                    None => Err(ErrorCode::ReplicaSetNotReady.with_msg("The replica set is not initialised yet")),
                }
            }).await?;

            info!("Replica set initialised successfully, {} is primary", primary);
        },
    }

    server.authenticate(&root).await?;

    let databases = server.list_database_names().await?;
    match databases.iter().any(|name| name == &config.app_db) {
        true => debug!("Database {} already exists, skipping user creation", config.app_db),
        false => {
            let user = AppUser::from_config(config);
            server.create_user(&config.app_db, &user).await?;
            report.user_created = true;
            info!("Database {} and user {} created", config.app_db, user.credentials.username);
        },
    }

    info!("MongoDB initialisation complete");
    Ok(report)
}

fn elected_primary(status: &ReplicaSetStatus) -> Result<String, BootstrapError> {
    match status.primary() {
        Some(member) => Ok(member.name.clone()),
        None => Err(ErrorCode::ReplicaSetNotReady.with_msg(&format!("Replica set {} has no primary yet", status.set))),
    }
}
