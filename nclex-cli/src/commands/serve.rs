//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use nclex_server::db::DbConfig;
use nclex_server::http::ServerConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "NCLEX_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Allowed CORS origin (repeatable, replaces the local dev defaults)
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origin: Vec<String>,
}

impl ServeArgs {
    fn server_config(self) -> ServerConfig {
        let mut config = ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            ..ServerConfig::default()
        };
        if !self.cors_origin.is_empty() {
            config.cors_origins = self.cors_origin;
        }
        config
    }
}

/// Run the HTTP server until ctrl-c
pub async fn run_serve(db: &DbConfig, args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!("Starting nclex server on {}", config.bind_addr);

    nclex_server::serve(db, config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cors_origin: Vec<String>) -> ServeArgs {
        ServeArgs {
            bind: "127.0.0.1:8123".parse().unwrap(),
            cors_permissive: false,
            cors_origin,
        }
    }

    #[test]
    fn keeps_default_origins_when_none_given() {
        let config = args(vec![]).server_config();
        assert_eq!(config.bind_addr.port(), 8123);
        assert_eq!(config.cors_origins, ServerConfig::default().cors_origins);
    }

    #[test]
    fn explicit_origins_replace_defaults() {
        let config = args(vec!["https://reviews.example".into()]).server_config();
        assert_eq!(config.cors_origins, vec!["https://reviews.example".to_string()]);
    }
}
