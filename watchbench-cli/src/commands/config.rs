//! `watchbench config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use watchbench_core::config::WatchbenchConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Attempts to load and validate the configuration file, reporting any
/// errors through the writer. Returns `CliError::Config` when the
/// configuration is invalid so the process exits non-zero.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let result = WatchbenchConfig::load(config_path).await;

    let report = match result {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Loads and displays the effective configuration (file + env overrides
/// + defaults). The auth token is redacted before rendering.
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let mut config = WatchbenchConfig::load(config_path).await?;
    redact_auth_token(&mut config);

    let source = config_path.display().to_string();
    let report = if let Some(section_name) = section {
        let config_toml = match section_name.as_str() {
            "general" => serialize_section(&config.general),
            "service" => serialize_section(&config.service),
            "audit" => serialize_section(&config.audit),
            "runner" => serialize_section(&config.runner),
            "context" => serialize_section(&config.context),
            _ => {
                return Err(CliError::Command(format!(
                    "unknown section: {} (expected: general, service, audit, runner, context)",
                    section_name
                )));
            }
        };
        ConfigReport {
            source,
            section: Some(section_name),
            config_toml,
        }
    } else {
        ConfigReport {
            source,
            section: None,
            config_toml: serialize_section(&config),
        }
    };

    writer.render(&report)?;
    Ok(())
}

fn serialize_section<T: Serialize>(section: &T) -> String {
    toml::to_string_pretty(section).unwrap_or_else(|e| format!("(serialization error: {})", e))
}

/// Replace a non-empty auth token with a placeholder.
fn redact_auth_token(config: &mut WatchbenchConfig) {
    if !config.service.auth_token.is_empty() {
        config.service.auth_token = "***REDACTED***".to_owned();
    }
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only
/// used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration (with redacted token)
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_report_render_text_full_config() {
        let report = ConfigReport {
            source: "watchbench.toml".to_owned(),
            section: None,
            config_toml: "[general]\nlog_level = \"info\"".to_owned(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Configuration"));
        assert!(output.contains("watchbench.toml"));
        assert!(output.contains("log_level"));
    }

    #[test]
    fn test_config_report_render_text_specific_section() {
        let report = ConfigReport {
            source: "/etc/watchbench.toml".to_owned(),
            section: Some("service".to_owned()),
            config_toml: "endpoint = \"http://watcher:9322\"".to_owned(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("[service]"));
        assert!(output.contains("endpoint"));
    }

    #[test]
    fn test_config_report_json_skips_toml_body() {
        let report = ConfigReport {
            source: "watchbench.toml".to_owned(),
            section: Some("audit".to_owned()),
            config_toml: "poll_interval_secs = 2".to_owned(),
        };

        let json = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(json["source"], "watchbench.toml");
        assert_eq!(json["section"], "audit");
        assert!(json.get("config_toml").is_none());
    }

    #[test]
    fn test_validation_report_valid() {
        let report = ConfigValidationReport {
            source: "watchbench.toml".to_owned(),
            valid: true,
            errors: Vec::new(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("VALID"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_validation_report_invalid_lists_errors() {
        let report = ConfigValidationReport {
            source: "bad.toml".to_owned(),
            valid: false,
            errors: vec!["failed to parse config".to_owned()],
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("INVALID"));
        assert!(output.contains("failed to parse config"));
    }

    #[test]
    fn test_redact_auth_token() {
        let mut config = WatchbenchConfig::default();
        config.service.auth_token = "gAAAAABh-secret".to_owned();
        redact_auth_token(&mut config);
        assert_eq!(config.service.auth_token, "***REDACTED***");

        let mut empty = WatchbenchConfig::default();
        redact_auth_token(&mut empty);
        assert!(empty.service.auth_token.is_empty());
    }
}
