//! Configuration management.
//!
//! A single [`Config`] is built once at startup, from environment
//! variables (optionally loaded from a `.env` file), and handed to the
//! constructors that need it. Handlers never read the environment.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure.
///
/// Both binaries load the whole structure and use the sections they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Tool server transport configuration.
    pub transport: TransportConfig,

    /// Item store connection settings.
    pub database: DatabaseConfig,

    /// Front-door (agent) configuration.
    pub agent: AgentConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Which item store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Postgres,
    Memory,
}

/// Item store connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub host: String,
    pub port: u16,
    /// Database name.
    pub name: String,
    pub user: String,
    pub password: String,
    /// Create the `items` table at startup if missing.
    pub init_schema: bool,
    /// Upper bound on opening one connection.
    pub connect_timeout_secs: u64,
}

/// Custom Debug implementation to redact the password from logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("init_schema", &self.init_schema)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Front-door configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Host address to bind to.
    pub host: String,

    /// Port number to listen on.
    pub port: u16,

    /// Base URL of the tool server's REST boundary (including its path prefix).
    pub tool_server_url: String,

    /// Timeout applied to every call to the tool server.
    pub upstream_timeout_secs: u64,

    /// Enable CORS for browser clients.
    pub enable_cors: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Postgres,
            host: "db".to_string(),
            port: 5432,
            name: "mydatabase".to_string(),
            user: "myuser".to_string(),
            password: "mypassword".to_string(),
            init_schema: false,
            connect_timeout_secs: 5,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            tool_server_url: "http://mcp:7000/mcp/v1".to_string(),
            upstream_timeout_secs: 10,
            enable_cors: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "items-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            database: DatabaseConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

fn env_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value != "false" && value != "0"
}

impl DatabaseConfig {
    /// Load database settings from `POSTGRES_*` and `MCP_DATABASE_*` variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        match std::env::var("MCP_DATABASE_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" => config.backend = DatabaseBackend::Memory,
            "" | "postgres" => {}
            other => warn!("Unknown MCP_DATABASE_BACKEND '{}', using postgres", other),
        }

        if let Ok(host) = std::env::var("POSTGRES_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("POSTGRES_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }
        if let Ok(name) = std::env::var("POSTGRES_DB") {
            config.name = name;
        }
        if let Ok(user) = std::env::var("POSTGRES_USER") {
            config.user = user;
        }
        if let Ok(password) = std::env::var("POSTGRES_PASSWORD") {
            config.password = password;
        } else if config.backend == DatabaseBackend::Postgres {
            warn!("POSTGRES_PASSWORD not set - using the default development password");
        }
        if let Ok(init) = std::env::var("MCP_DATABASE_INIT_SCHEMA") {
            config.init_schema = env_flag(&init);
        }
        if let Some(secs) = std::env::var("POSTGRES_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.connect_timeout_secs = secs;
        }

        config
    }
}

impl AgentConfig {
    /// Load front-door settings from `AGENT_*` and `MCP_SERVER_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("AGENT_HTTP_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("AGENT_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }
        if let Ok(url) = std::env::var("MCP_SERVER_URL") {
            config.tool_server_url = url;
        }
        if let Some(secs) = std::env::var("AGENT_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.upstream_timeout_secs = secs;
        }
        if let Ok(cors) = std::env::var("AGENT_HTTP_CORS") {
            config.enable_cors = env_flag(&cors);
        }

        info!("Tool server URL: {}", config.tool_server_url);
        config
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.database = DatabaseConfig::from_env();
        config.agent = AgentConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_database_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DATABASE_BACKEND", "memory");
            std::env::set_var("POSTGRES_HOST", "localhost");
            std::env::set_var("POSTGRES_PORT", "6543");
            std::env::set_var("MCP_DATABASE_INIT_SCHEMA", "true");
            std::env::set_var("POSTGRES_CONNECT_TIMEOUT_SECS", "2");
        }
        let config = DatabaseConfig::from_env();
        assert_eq!(config.backend, DatabaseBackend::Memory);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6543);
        assert!(config.init_schema);
        assert_eq!(config.connect_timeout_secs, 2);
        unsafe {
            std::env::remove_var("POSTGRES_CONNECT_TIMEOUT_SECS");
            std::env::remove_var("MCP_DATABASE_BACKEND");
            std::env::remove_var("POSTGRES_HOST");
            std::env::remove_var("POSTGRES_PORT");
            std::env::remove_var("MCP_DATABASE_INIT_SCHEMA");
        }
    }

    #[test]
    fn test_database_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("POSTGRES_DB");
            std::env::remove_var("MCP_DATABASE_BACKEND");
        }
        let config = DatabaseConfig::from_env();
        assert_eq!(config.backend, DatabaseBackend::Postgres);
        assert_eq!(config.name, "mydatabase");
    }

    #[test]
    fn test_agent_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_URL", "http://localhost:7000/mcp/v1");
            std::env::set_var("AGENT_UPSTREAM_TIMEOUT_SECS", "3");
            std::env::set_var("AGENT_HTTP_CORS", "0");
        }
        let config = AgentConfig::from_env();
        assert_eq!(config.tool_server_url, "http://localhost:7000/mcp/v1");
        assert_eq!(config.upstream_timeout_secs, 3);
        assert!(!config.enable_cors);
        unsafe {
            std::env::remove_var("MCP_SERVER_URL");
            std::env::remove_var("AGENT_UPSTREAM_TIMEOUT_SECS");
            std::env::remove_var("AGENT_HTTP_CORS");
        }
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let config = DatabaseConfig {
            password: "super_secret_password".to_string(),
            ..DatabaseConfig::default()
        };
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_password"));
    }
}
