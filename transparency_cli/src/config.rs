//! Runtime configuration read from the environment.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use transparency_lib::FixtureStore;

pub const DEFAULT_PORT: u16 = 8080;

pub fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u16>().ok())
        .unwrap_or(default)
}

/// The explicit bind address, or all interfaces on `$PORT` (default 8080).
pub fn resolve_bind(explicit: Option<SocketAddr>) -> SocketAddr {
    explicit.unwrap_or_else(|| {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, env_u16("PORT", DEFAULT_PORT)))
    })
}

/// Loads fixtures from `data_dir` when given, otherwise the embedded set.
pub fn load_store(data_dir: Option<&Path>) -> Result<Arc<FixtureStore>> {
    match data_dir {
        Some(dir) => {
            let store = FixtureStore::load(dir)
                .with_context(|| format!("loading fixtures from {}", dir.display()))?;
            Ok(Arc::new(store))
        }
        None => FixtureStore::shared_embedded().context("loading embedded fixtures"),
    }
}
