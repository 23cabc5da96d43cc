use mongo_bootstrap::utils::errors::{BootstrapError, ErrorCode};

fn main() -> Result<(), BootstrapError> {
    tokio::runtime::Builder::new_multi_thread()
        // Cap the number of blocking threads - the only blocking work is hashing the admin password.
        .max_blocking_threads(num_cpus::get())
        .enable_all()
        .build()
        .map_err(|e| ErrorCode::RuntimeError.with_msg(&format!("Unable to start the runtime: {}", e)))?
        .block_on(async {
            mongo_bootstrap::lib_main().await
        })
}
