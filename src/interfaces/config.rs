use std::collections::HashMap;

use serde::Deserialize;

use crate::application::usecases::replace_with_settings_window::LOCAL_FILE_PERMISSION_URL;
use crate::domain::WindowDescriptor;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Page the settings window opens; defaults to the extension's site settings.
    pub settings_url: Option<String>,
    #[serde(default)]
    pub storage: StorageCfg,
    #[serde(default)]
    pub feature_flags: FeatureFlagsCfg,
    #[serde(default)]
    pub http: HttpCfg,
    /// FTE window to seed into storage at startup, standing in for the popup
    /// that normally records itself.
    pub fte_window: Option<WindowDescriptor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageCfg {
    /// SQLite url; in-memory storage when absent.
    pub database_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeatureFlagsCfg {
    pub endpoint: Option<String>,
    /// feature name -> JSON payload, consulted before the endpoint
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct HttpCfg {
    #[serde(default = "default_bind")]
    pub bind: String,
    pub api_token: Option<String>,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            api_token: None,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

impl Config {
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let raw = expand_env(raw);
        let cfg: Config = serde_yaml::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn settings_url(&self) -> &str {
        set(&self.settings_url).unwrap_or(LOCAL_FILE_PERMISSION_URL)
    }

    pub fn database_url(&self) -> Option<&str> {
        set(&self.storage.database_url)
    }

    pub fn feature_flag_endpoint(&self) -> Option<&str> {
        set(&self.feature_flags.endpoint)
    }

    pub fn api_token(&self) -> Option<&str> {
        set(&self.http.api_token)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(w) = &self.fte_window {
            if w.width == 0 || w.height == 0 {
                anyhow::bail!("fte_window must have a non-zero width and height");
            }
        }
        for (feature, payload) in &self.feature_flags.overrides {
            if feature.trim().is_empty() {
                anyhow::bail!("feature_flags.overrides has an empty feature name");
            }
            if payload.trim().is_empty() {
                anyhow::bail!("feature_flags.overrides.{feature} is empty");
            }
        }
        Ok(())
    }
}

/// very small ${VAR} expansion to keep config simple
fn expand_env(s: &str) -> String {
    let mut out = s.to_string();
    for (k, v) in std::env::vars() {
        out = out.replace(&format!("${{{}}}", k), &v);
    }
    out
}

// Empty strings and references to unset variables count as not configured.
fn set(v: &Option<String>) -> Option<&str> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with("${"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = Config::from_yaml_str("{}").unwrap();
        assert_eq!(cfg.settings_url(), LOCAL_FILE_PERMISSION_URL);
        assert_eq!(cfg.http.bind, "127.0.0.1:8787");
        assert!(cfg.database_url().is_none());
        assert!(cfg.fte_window.is_none());
    }

    #[test]
    fn full_config_parses() {
        let raw = r#"
settings_url: "https://example.com/settings"
storage:
  database_url: "sqlite:./prompt.db"
feature_flags:
  endpoint: "https://flags.example.com/features"
  overrides:
    dc-cv-local-file-permission-prompt: '{"settingsCoolDown": 3}'
http:
  bind: "0.0.0.0:9000"
fte_window: { id: 7, height: 600, width: 800, left: 10, top: 10 }
"#;
        let cfg = Config::from_yaml_str(raw).unwrap();
        assert_eq!(cfg.settings_url(), "https://example.com/settings");
        assert_eq!(cfg.database_url(), Some("sqlite:./prompt.db"));
        assert_eq!(
            cfg.feature_flag_endpoint(),
            Some("https://flags.example.com/features")
        );
        assert_eq!(cfg.feature_flags.overrides.len(), 1);
        assert_eq!(cfg.fte_window.as_ref().map(|w| w.id), Some(7));
    }

    #[test]
    fn unset_variables_are_not_configured() {
        let raw = "http:\n  api_token: \"${LOCAL_FILE_PROMPT_SURELY_UNSET_TOKEN}\"\n";
        let cfg = Config::from_yaml_str(raw).unwrap();
        assert!(cfg.api_token().is_none());
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let raw = "fte_window: { id: 1, height: 0, width: 800, left: 0, top: 0 }\n";
        assert!(Config::from_yaml_str(raw).is_err());
    }
}
