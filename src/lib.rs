pub mod db;
pub mod model;
pub mod services;
pub mod utils;

use dotenv::dotenv;
use std::str::FromStr;
use services::Task;
use db::mongo::MongoServer;
use db::server::DatabaseServer;
use utils::errors::BootstrapError;
use utils::context::BootstrapContext;
use utils::config::{Configuration, self};
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

const APP_NAME: &str = "MongoBootstrap";

///
/// Entry point to run the bootstrap.
///
pub async fn lib_main() -> Result<(), BootstrapError> {

    // Load any local dev settings as environment variables from a .env file.
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    config::default_env("RUST_LOG", "INFO");

    init_tracing();

    // Load the bootstrap configuration into struct.
    let config = Configuration::from_env()?;
    let task = Task::from_str(&config.task)?;

    tracing::info!("{}\n{}", BANNER, config.fmt_console()?);

    let server = MongoServer::connect(APP_NAME, &config).await?;
    let ctx = BootstrapContext::new(config);

    run(task, &ctx, &server).await
}

///
/// Run the requested task(s) against the server. The replica set goes first so an 'all' run seeds
/// the admin through the authenticated connection.
///
pub async fn run(task: Task, ctx: &BootstrapContext, server: &dyn DatabaseServer) -> Result<(), BootstrapError> {
    tracing::info!("Running task {}", task);

    if task.inits_replica_set() {
        let report = services::init_replica_set(ctx, server).await?;
        tracing::debug!("Replica set report {:?}", report);
    }

    if task.seeds_admin() {
        let report = services::seed_admin(ctx, server).await?;
        println!("{}", report);
    }

    Ok(())
}

fn init_tracing() {
    if let Err(err) = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
        .try_init() {
            tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
    }
}

const BANNER: &str = r#"
   __  ___                        ___            __      __
  /  |/  /__  ___  ___ ____      / _ )___  ___  / /____ / /________ ____
 / /|_/ / _ \/ _ \/ _ `/ _ \    / _  / _ \/ _ \/ __(_-</ __/ __/ _ `/ _ \
/_/  /_/\___/_//_/\_, /\___/   /____/\___/\___/\__/___/\__/_/  \_,_/ .__/
                 /___/                                            /_/
"#;
