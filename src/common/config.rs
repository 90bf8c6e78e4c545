// src/common/config.rs
//! Server configuration loaded from the environment (after `.env`)

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub log_bodies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            log_bodies: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // PORT - listening port
        if let Ok(port) = env::var("PORT") {
            if let Ok(val) = port.parse::<u16>() {
                config.port = val;
            }
        }

        // CORS_ORIGINS - comma-separated list of allowed origins
        if let Ok(origins) = env::var("CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins);
        }

        // LOG_BODIES - set to "true" to log request/response bodies at debug level
        if let Ok(enabled) = env::var("LOG_BODIES") {
            config.log_bodies = enabled.to_lowercase() == "true";
        }

        config
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// CLI argument parsing for body logging
pub fn parse_log_bodies_args() -> Option<bool> {
    parse_log_bodies_flag(env::args())
}

fn parse_log_bodies_flag<I: IntoIterator<Item = String>>(args: I) -> Option<bool> {
    for arg in args {
        match arg.as_str() {
            "--log-bodies" => return Some(true),
            "--no-log-bodies" => return Some(false),
            _ => {}
        }
    }

    None
}

/// Override body logging from CLI args
pub fn apply_cli_override(mut config: ServerConfig) -> ServerConfig {
    if let Some(log_bodies) = parse_log_bodies_args() {
        println!("🔧 CLI override: LOG_BODIES = {}", log_bodies);
        config.log_bodies = log_bodies;
    }

    config
}
