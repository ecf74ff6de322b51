//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::net::protocol::CharacterClass;

/// Which side of the connection this peer takes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Bind and wait for the other peer
    Host,
    /// Connect to a hosting peer
    Join,
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "host" => Ok(Role::Host),
            "join" => Ok(Role::Join),
            _ => Err(ConfigError::InvalidRole),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Host or join side
    pub role: Role,
    /// Binding address when hosting
    pub listen_addr: SocketAddr,
    /// Peer address when joining
    pub peer_addr: SocketAddr,
    /// Selected character for the local player
    pub character: CharacterClass,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let role: Role = env::var("ROLE")
            .map_err(|_| ConfigError::Missing("ROLE"))?
            .parse()?;

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddress)?;

        let peer_addr = env::var("PEER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddress)?;

        let character = env::var("CHARACTER")
            .map_err(|_| ConfigError::Missing("CHARACTER"))?
            .parse()
            .map_err(|_| ConfigError::UnknownCharacter)?;

        Ok(Self {
            role,
            listen_addr,
            peer_addr,
            character,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid address format")]
    InvalidAddress,

    #[error("ROLE must be 'host' or 'join'")]
    InvalidRole,

    #[error("CHARACTER is not a roster name")]
    UnknownCharacter,
}
