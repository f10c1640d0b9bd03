//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use modtool_domain::MatchRules;
use serde::{Deserialize, Serialize};

/// Raw display configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDisplayConfig {
    /// Console theme name ("default" or "plain")
    pub theme: String,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileDisplayConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            color: true,
        }
    }
}

/// Raw forum access configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileForumConfig {
    /// Posts requested per page fetch
    pub page_size: u32,
    /// User agent sent with page requests
    pub user_agent: String,
}

impl Default for FileForumConfig {
    fn default() -> Self {
        Self {
            page_size: 200,
            user_agent: "mafia-modtool/0.1 (vote counter)".to_string(),
        }
    }
}

/// Raw per-game defaults from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Moderator username; inferred from the vote count post when unset
    pub mod_name: Option<String>,
    /// Default deadline shown in rendered counts
    pub deadline: Option<String>,
}

/// Complete file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub display: FileDisplayConfig,
    pub forum: FileForumConfig,
    /// Scoring and threshold knobs (domain [`MatchRules`])
    pub rules: MatchRules,
    pub game: FileGameConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.display.theme, "default");
        assert!(config.display.color);
        assert_eq!(config.forum.page_size, 200);
        assert_eq!(config.rules.score_cutoff, 60.0);
        assert_eq!(config.game.mod_name, None);
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let config: FileConfig = toml_partial(
            r#"
            [rules]
            score_cutoff = 75.0
            "#,
        );
        assert_eq!(config.rules.score_cutoff, 75.0);
        assert_eq!(config.rules.ambiguity_margin, 5.0);
        assert_eq!(config.forum.page_size, 200);
    }

    fn toml_partial(raw: &str) -> FileConfig {
        use figment::providers::{Format, Toml};
        figment::Figment::new()
            .merge(figment::providers::Serialized::defaults(
                FileConfig::default(),
            ))
            .merge(Toml::string(raw))
            .extract()
            .unwrap()
    }
}
