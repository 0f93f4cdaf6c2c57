//! User configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::get_app_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_profile")]
    pub default_profile: String,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub reminders: RemindersConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: default_profile(),
            theme: ThemeConfig::default(),
            ai: AiConfig::default(),
            reminders: RemindersConfig::default(),
            calendar: CalendarConfig::default(),
            tasks: TasksConfig::default(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
        }
    }
}

fn default_theme_name() -> String {
    "light".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Overrides the generateContent URL; `{model}` is substituted.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Takes precedence over the environment variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent".to_string()
}

fn default_timeout() -> u64 {
    90
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: u32,

    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_minutes: default_lead_minutes(),
            check_interval_secs: default_check_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_lead_minutes() -> u32 {
    10
}

fn default_check_interval() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_first_hour")]
    pub first_hour: u32,

    #[serde(default = "default_last_hour")]
    pub last_hour: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_hour: default_first_hour(),
            last_hour: default_last_hour(),
        }
    }
}

impl CalendarConfig {
    /// Visible hours, inclusive. A reversed or out-of-range config falls
    /// back to the defaults.
    pub fn hours(&self) -> Vec<u32> {
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return (default_first_hour()..=default_last_hour()).collect();
        }
        (self.first_hour..=self.last_hour).collect()
    }
}

fn default_first_hour() -> u32 {
    8
}

fn default_last_hour() -> u32 {
    18
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Save tasks to `tasks.json` instead of keeping them in memory only.
    #[serde(default)]
    pub persist: bool,

    #[serde(default = "default_true")]
    pub seed_placeholders: bool,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            persist: false,
            seed_placeholders: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(load_config()?.unwrap_or_default())
    }
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(Some(config))
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_deserialize_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.default_profile, "default");
        assert_eq!(config.theme.name, "light");
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert!(config.reminders.enabled);
        assert_eq!(config.reminders.lead_minutes, 10);
        assert_eq!(config.reminders.check_interval_secs, 60);
        assert!(!config.tasks.persist);
        assert!(config.tasks.seed_placeholders);
    }

    #[test]
    fn test_config_nested_sections() {
        let toml = r#"
            default_profile = "uni"

            [theme]
            name = "dark"

            [ai]
            model = "gemini-2.0-pro"
            api_key = "k"

            [reminders]
            enabled = false
            lead_minutes = 5

            [calendar]
            first_hour = 7
            last_hour = 20

            [tasks]
            persist = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_profile, "uni");
        assert_eq!(config.theme.name, "dark");
        assert_eq!(config.ai.model, "gemini-2.0-pro");
        assert_eq!(config.ai.api_key.as_deref(), Some("k"));
        assert!(config.ai.endpoint.contains("{model}"));
        assert!(!config.reminders.enabled);
        assert_eq!(config.reminders.lead_minutes, 5);
        assert_eq!(config.reminders.check_interval_secs, 60);
        assert_eq!(config.calendar.hours().first(), Some(&7));
        assert_eq!(config.calendar.hours().last(), Some(&20));
        assert!(config.tasks.persist);
    }

    #[test]
    fn test_calendar_hours_default_range() {
        let hours = CalendarConfig::default().hours();
        assert_eq!(hours.len(), 11);
        assert_eq!(hours[0], 8);
        assert_eq!(hours[10], 18);
    }

    #[test]
    fn test_calendar_hours_reversed_falls_back() {
        let cal = CalendarConfig {
            first_hour: 19,
            last_hour: 9,
        };
        assert_eq!(cal.hours(), CalendarConfig::default().hours());
    }

    #[test]
    fn test_api_key_not_serialized_when_absent() {
        let serialized = toml::to_string(&Config::default()).unwrap();
        assert!(!serialized.contains("api_key"));
    }

    #[test]
    #[serial]
    fn test_save_and_load_config() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("HOME", temp.path());
        std::env::set_var("XDG_CONFIG_HOME", temp.path().join(".config"));

        assert!(load_config().unwrap().is_none());

        let mut config = Config::default();
        config.theme.name = "dark".to_string();
        config.reminders.lead_minutes = 15;
        save_config(&config).unwrap();

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.theme.name, "dark");
        assert_eq!(loaded.reminders.lead_minutes, 15);
    }
}
