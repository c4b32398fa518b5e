use herald_core::config::ConfigSource;

/// # Summary
/// `ConfigSource` backed by the `config` crate's environment source.
///
/// # Invariants
/// - The environment source lower-cases keys, so lookups are lower-cased too.
pub struct EnvSource {
    inner: config::Config,
}

impl EnvSource {
    /// # Summary
    /// Snapshots the process environment.
    ///
    /// # Logic
    /// 1. Loads `.env` from the working directory if present.
    /// 2. Builds a `config::Config` from the resulting environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        let inner = config::Config::builder().add_source(env).build()?;
        Ok(Self { inner })
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get_string(&key.to_lowercase()).ok()
    }
}
