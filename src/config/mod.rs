// Adding the wrap_err method to errors:
use eyre::WrapErr;
use color_eyre::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub db_path: String,
  pub bind_address: String,
  pub db_pool_size: u32,
  // Seconds to wait for a free connection at startup and
  // when no request deadline applies:
  pub db_connection_timeout: u64,
  // Seconds every store call gets when invoked from the
  // HTTP layer. 0 means no deadline.
  pub request_timeout: u64,
  // Front-end origin allowed to call the API from a browser.
  // Same-origin only when absent.
  pub allowed_origin: Option<String>
}

impl Config {

  pub fn from_env() -> Result<Config> {
    // RUST_LOG is already set in main.rs if it
    // was absent. Keys are lowercase versions of
    // the environment variables.
    config::Config::builder()
      .set_default("bind_address", "127.0.0.1:8080")?
      .set_default("db_pool_size", 8)?
      .set_default("db_connection_timeout", 5)?
      .set_default("request_timeout", 10)?
      .add_source(config::Environment::default().try_parsing(true))
      .build()?
      .try_deserialize()
      .wrap_err("Loading configuration from env")
  }

  pub fn connection_timeout(&self) -> Duration {
    Duration::from_secs(self.db_connection_timeout)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout)
  }

}
