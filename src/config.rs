use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_contact::ContactOptions;
use folio_navigation::NavigationOptions;
use serde::Deserialize;
use std::{env, time::Duration};

use crate::AppOptions;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub contact: ContactSettings,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationSettings {
    /// Width in px from which the mobile menu is forced closed
    #[serde(default = "default_desktop_breakpoint")]
    pub desktop_breakpoint: f64,
    #[serde(default = "default_highlight_offset")]
    pub highlight_offset: f64,
    #[serde(default = "default_scroll_throttle_ms")]
    pub scroll_throttle_ms: u64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            desktop_breakpoint: default_desktop_breakpoint(),
            highlight_offset: default_highlight_offset(),
            scroll_throttle_ms: default_scroll_throttle_ms(),
        }
    }
}

fn default_desktop_breakpoint() -> f64 {
    768.0
}

fn default_highlight_offset() -> f64 {
    100.0
}

fn default_scroll_throttle_ms() -> u64 {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactSettings {
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            message_timeout_ms: default_message_timeout_ms(),
            locale: default_locale(),
        }
    }
}

fn default_message_timeout_ms() -> u64 {
    3000
}

fn default_locale() -> String {
    "zh-CN".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOLIO__CONTACT__LOCALE, etc.)
    /// 2. Config file given by path or CONFIG_PATH
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("navigation.desktop_breakpoint", default_desktop_breakpoint())?
            .set_default("navigation.highlight_offset", default_highlight_offset())?
            .set_default("navigation.scroll_throttle_ms", default_scroll_throttle_ms())?
            .set_default("contact.message_timeout_ms", default_message_timeout_ms())?
            .set_default("contact.locale", default_locale())?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.navigation.scroll_throttle_ms == 0 {
            return Err("Navigation scroll_throttle_ms must be greater than 0".to_string());
        }
        if self.navigation.desktop_breakpoint <= 0.0 {
            return Err("Navigation desktop_breakpoint must be greater than 0".to_string());
        }
        if self.contact.message_timeout_ms == 0 {
            return Err("Contact message_timeout_ms must be greater than 0".to_string());
        }
        if !folio_contact::available_locales().contains(&self.contact.locale.as_str()) {
            return Err(format!("Unknown contact locale: {}", self.contact.locale));
        }
        Ok(())
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            navigation: NavigationOptions {
                desktop_breakpoint: self.navigation.desktop_breakpoint,
                highlight_offset: self.navigation.highlight_offset,
                scroll_wait: Duration::from_millis(self.navigation.scroll_throttle_ms),
            },
            contact: ContactOptions {
                message_timeout: Duration::from_millis(self.contact.message_timeout_ms),
                locale: self.contact.locale.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_app_defaults() {
        let settings = Settings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.app_options(), AppOptions::default());
    }

    #[test]
    fn test_validation_zero_throttle() {
        let mut settings = Settings::default();
        settings.navigation.scroll_throttle_ms = 0;

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut settings = Settings::default();
        settings.contact.message_timeout_ms = 0;

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_locale() {
        let mut settings = Settings::default();
        settings.contact.locale = "xx".to_string();

        assert!(settings.validate().is_err());

        settings.contact.locale = "en".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let dir = temp_dir::TempDir::new()?;
        let path = dir.child("folio.toml");
        std::fs::write(
            &path,
            "[navigation]\ndesktop_breakpoint = 1024\n\n[contact]\nlocale = \"en\"\n",
        )?;

        let settings = Settings::load(Some(path.to_string_lossy().into_owned()))?;

        assert_eq!(settings.navigation.desktop_breakpoint, 1024.0);
        assert_eq!(settings.navigation.scroll_throttle_ms, 100);
        assert_eq!(settings.contact.locale, "en");
        assert_eq!(settings.contact.message_timeout_ms, 3000);
        assert_eq!(settings.observability.log_level, "info");

        Ok(())
    }
}
