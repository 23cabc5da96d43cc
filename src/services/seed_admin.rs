use std::fmt;
use ansi_term::Colour::{Green, Yellow};
use tracing::{info, instrument, warn};
use crate::db::mongo::Persistable;
use crate::db::server::DatabaseServer;
use crate::model::admin_user::{self, AdminUser};
use crate::utils::context::BootstrapContext;
use crate::utils::errors::{BootstrapError, ErrorCode};

#[derive(Clone, Debug, PartialEq)]
pub enum SeedOutcome {
    Created,
    AlreadyExists,
}

///
/// What the operator is told once the admin seeder has run.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SeedReport {
    pub outcome: SeedOutcome,
    pub username: String,
    pub password: Option<String>, // Only known when we hashed it ourselves.
}

///
/// Insert the administrator into the chat application's users collection.
///
/// An administrator with the same _id already being there is not an error - the seed has simply
/// been run before and the existing account is left untouched.
///
#[instrument(skip(ctx, server))]
pub async fn seed_admin(ctx: &BootstrapContext, server: &dyn DatabaseServer) -> Result<SeedReport, BootstrapError> {
    let config = ctx.config();
    info!("Seeding admin user {} into {}.{}", config.admin_username, config.users_db, config.users_collection);

    let bcrypt = admin_user::password_hash(config).await?;
    let admin = AdminUser::new(config, bcrypt, ctx.now());

    let outcome = match server.insert_one(&config.users_db, &config.users_collection, admin.to_doc()?).await {
        Ok(()) => SeedOutcome::Created,
        Err(err) if err.error_code() == ErrorCode::DuplicateKey => {
            warn!("Admin user {} already exists, leaving it as it is", config.admin_id);
            SeedOutcome::AlreadyExists
        },
        Err(err) => return Err(err),
    };

    Ok(SeedReport {
        outcome,
        username: config.admin_username.clone(),
        password: match config.admin_password_hash {
            Some(_) => None,
            None => Some(config.admin_password.clone()),
        },
    })
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SeedOutcome::AlreadyExists => {
                return writeln!(f, "Admin user {} already exists - nothing to do", self.username)
            },
            SeedOutcome::Created => writeln!(f, "{}", Green.paint("Admin user created!"))?,
        }

        writeln!(f, "Username: {}", self.username)?;
        match &self.password {
            Some(password) => writeln!(f, "Password: {}", password)?,
            None => writeln!(f, "Password: (pre-hashed, as configured)")?,
        }
        writeln!(f, "{}", Yellow.paint("Please change the password after first login!"))
    }
}
