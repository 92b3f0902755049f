use std::net::SocketAddr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Buffered notifications per subscriber before slow readers start
    /// dropping frames.
    pub events_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_string("TIENDA_BIND_ADDR", "127.0.0.1:8080")
            .parse::<SocketAddr>()
            .context("TIENDA_BIND_ADDR must be a valid host:port")?;

        let events_capacity = env_string("TIENDA_EVENTS_CAPACITY", "256")
            .parse::<usize>()
            .context("TIENDA_EVENTS_CAPACITY must be a positive integer")?;

        Ok(Self {
            bind_addr,
            events_capacity,
        })
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
