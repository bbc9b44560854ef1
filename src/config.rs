//! Startup Configuration
//!
//! Read once from the process environment in `main` and handed to the
//! components that need it; nothing reads ambient globals after startup.

use anyhow::{Context, Result};
use std::env;

pub struct Config {
    /// Secret used to authenticate flash messages across redirects.
    pub secret_key: String,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Listen address, defaults to 0.0.0.0:8080.
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let secret_key = env::var("SECRET_KEY").context("SECRET_KEY must be set")?;
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            secret_key,
            database_url,
            bind_addr,
        })
    }
}
