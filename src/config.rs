use crate::error::{PostboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for, walking upward from the working directory.
pub const CONFIG_FILE_NAME: &str = "postboard.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostboardConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default, skip_serializing_if = "SeedSettings::is_empty")]
    pub seed: SeedSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL. Without one the in-memory store is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Apply pending migrations when the store is opened.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            run_migrations: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Request header carrying the authenticated user id, set by the
    /// session layer in front of this service.
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
}

fn default_identity_header() -> String {
    "x-user-id".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            identity_header: default_identity_header(),
        }
    }
}

/// Data loaded into the in-memory store when it is opened. Ignored when a
/// database is configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedSettings {
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

impl SeedSettings {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub first_name: String,
    pub last_name: String,
}

/// Parses `"First Last"`; everything after the first space is the last name.
impl FromStr for SeedUser {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().split_once(' ') {
            Some((first, last)) if !last.trim().is_empty() => Ok(Self {
                first_name: first.to_string(),
                last_name: last.trim().to_string(),
            }),
            _ => Err(format!("expected \"FIRST LAST\", got '{}'", s)),
        }
    }
}

impl PostboardConfig {
    /// Loads the nearest `postboard.toml` above `start_path`, falling back to
    /// defaults when none exists.
    pub fn load(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PostboardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: PostboardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PostboardError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PostboardConfig::default();
        assert_eq!(config.server.address(), "127.0.0.1:4000");
        assert!(config.database.url.is_none());
        assert_eq!(config.auth.identity_header, "x-user-id");
    }

    #[test]
    fn test_seed_users_from_file() {
        let config: PostboardConfig = toml::from_str(
            r#"
            [[seed.users]]
            first_name = "Ada"
            last_name = "Lovelace"

            [[seed.users]]
            first_name = "Grace"
            last_name = "Hopper"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed.users.len(), 2);
        assert_eq!(config.seed.users[1].first_name, "Grace");
    }

    #[test]
    fn test_parse_seed_user() {
        let user: SeedUser = "Ada Lovelace".parse().unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");

        let user: SeedUser = "Ada King Lovelace".parse().unwrap();
        assert_eq!(user.last_name, "King Lovelace");

        assert!("Ada".parse::<SeedUser>().is_err());
        assert!("Ada ".parse::<SeedUser>().is_err());
    }

    #[test]
    fn test_default_config_omits_seed_table() {
        let content = toml::to_string_pretty(&PostboardConfig::default()).unwrap();
        assert!(!content.contains("seed"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PostboardConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/postboard"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/postboard")
        );
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_load_searches_upward() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = PostboardConfig::default();
        config.auth.identity_header = "x-session-user".to_string();
        config.save(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let loaded = PostboardConfig::load(&nested).unwrap();
        assert_eq!(loaded.auth.identity_header, "x-session-user");
    }

    #[test]
    fn test_load_without_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        // Only meaningful if no postboard.toml sits above the temp dir.
        if PostboardConfig::find_config_file(temp_dir.path()).is_none() {
            let config = PostboardConfig::load(temp_dir.path()).unwrap();
            assert_eq!(config.server.port, 4000);
        }
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        assert!(PostboardConfig::load_from(&path).is_err());
    }
}
