use parking_lot::RwLock;
use chrono::{DateTime, Utc};
use crate::utils::{config::Configuration, time_provider::TimeProvider};

///
/// The context is handed to each bootstrap task and gives them access to the config and clock.
///
pub struct BootstrapContext {
    config: Configuration,
    time_provider: RwLock<TimeProvider>,
}

impl BootstrapContext {
    pub fn new(config: Configuration) -> Self {
        BootstrapContext {
            config,
            time_provider: RwLock::new(TimeProvider::default()),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}
