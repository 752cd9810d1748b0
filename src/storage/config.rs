use chrono::format::{Item, StrftimeItems};
use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::{DedupKey, Grouping};
use crate::dashboard::{DashboardProfile, Role};
use crate::sync::studio_api::DEFAULT_BASE_URL;

pub const APP_DIR: &str = "studio-deadlines";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub role: Role,
    /// Overrides the role's own grouping when set. `"default"` or a
    /// missing key keeps the role's grouping.
    #[serde(
        default,
        deserialize_with = "grouping_or_role_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub grouping: Option<Grouping>,
    #[serde(default)]
    pub dedup_key: DedupKey,
}

fn grouping_or_role_default<'de, D>(deserializer: D) -> Result<Option<Grouping>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("default") => Ok(None),
        Some(value) => {
            let value: StrDeserializer<'_, D::Error> = value.into_deserializer();
            Grouping::deserialize(value).map(Some)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub date_format: String,
}

impl UiConfig {
    /// The configured format, or the default when it has unknown specifiers.
    pub fn checked_date_format(&self) -> &str {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            tracing::warn!("Invalid date_format {:?}, using default", self.date_format);
            DEFAULT_DATE_FORMAT
        } else {
            &self.date_format
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn profile(&self, role_override: Option<Role>) -> DashboardProfile {
        let role = role_override.unwrap_or(self.dashboard.role);
        let profile = DashboardProfile::for_role(role).with_dedup(self.dashboard.dedup_key);

        match self.dashboard.grouping {
            Some(grouping) => profile.with_grouping(grouping),
            None => profile,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                session_file: Self::config_dir().join("session.json"),
            },
            dashboard: DashboardConfig {
                role: Role::Photographer,
                grouping: None,
                dedup_key: DedupKey::SourceId,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                date_format: DEFAULT_DATE_FORMAT.to_string(),
            },
        }
    }
}
