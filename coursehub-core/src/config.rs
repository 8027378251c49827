//! Runtime configuration
//!
//! Settings come from an optional TOML file (named by `COURSEHUB_CONFIG`)
//! and are then overridden by environment variables.

use crate::error::{CourseHubError, Result};
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable naming the TOML configuration file
pub const CONFIG_ENV: &str = "COURSEHUB_CONFIG";

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// One user entry of the `[[users]]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    /// Login email
    pub email: String,
    /// User id
    pub id: String,
    /// Display name
    pub username: String,
    /// Initial role
    pub role: Role,
}

/// Server and storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseHubConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Catalog file, relative paths resolve against the working directory
    pub courses_file: PathBuf,
    /// Start with an empty catalog when the file is absent
    pub create_if_missing: bool,
    /// Replaces the built-in accounts when non-empty
    pub users: Vec<UserSeed>,
}

impl Default for CourseHubConfig {
    fn default() -> Self {
        CourseHubConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            courses_file: PathBuf::from("courses.json"),
            create_if_missing: false,
            users: Vec::new(),
        }
    }
}

impl CourseHubConfig {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CourseHubConfig = toml::from_str(contents)
            .map_err(|e| CourseHubError::Config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CourseHubError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Apply `PORT`, `HOST`, `COURSES_FILE` and `CREATE_IF_MISSING`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| CourseHubError::Config(format!("invalid PORT: {}", port)))?;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(file) = lookup("COURSES_FILE") {
            self.courses_file = PathBuf::from(file);
        }
        if let Some(flag) = lookup("CREATE_IF_MISSING") {
            self.create_if_missing = flag.trim().parse().map_err(|_| {
                CourseHubError::Config(format!("invalid CREATE_IF_MISSING: {}", flag))
            })?;
        }
        Ok(())
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject duplicate user emails or ids
    pub fn validate(&self) -> Result<()> {
        let mut emails = HashSet::new();
        let mut ids = HashSet::new();
        for user in &self.users {
            if !emails.insert(user.email.as_str()) {
                return Err(CourseHubError::Config(format!(
                    "duplicate user email: {}",
                    user.email
                )));
            }
            if !ids.insert(user.id.as_str()) {
                return Err(CourseHubError::Config(format!(
                    "duplicate user id: {}",
                    user.id
                )));
            }
        }
        Ok(())
    }
}
