//! Configuration handling for the site

use crate::contact::{EmailApiSettings, EmailApiTransport, SimulatedTransport, SubmissionTransport};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PHONE: &str = "+47 900 00 000";
pub const DEFAULT_START_PAGE: &str = "/index.html";
pub const DEFAULT_EMAIL_BASE_URL: &str = "http://localhost:3000";
pub const EMAIL_API_PATH: &str = "/api/send-email";

const ENV_TRANSPORT: &str = "TAK_SITE_TRANSPORT";
const ENV_EMAIL_ENDPOINT: &str = "TAK_SITE_EMAIL_ENDPOINT";
const ENV_EMAIL_API_KEY: &str = "TAK_SITE_EMAIL_API_KEY";

/// How contact submissions are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    /// Wait, log the payload and report success
    #[default]
    Simulated,
    /// POST to the transactional email endpoint
    EmailApi,
}

impl TransportKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simulated" => Some(Self::Simulated),
            "email-api" | "email" => Some(Self::EmailApi),
            _ => None,
        }
    }
}

/// User configuration for the site
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    /// Submission transport
    pub transport: Option<TransportKind>,
    /// Base URL the email API path is joined to
    pub email_base_url: Option<String>,
    /// Full endpoint URL; wins over `email_base_url`
    pub email_endpoint: Option<String>,
    /// Bearer key for the email API
    pub email_api_key: Option<String>,
    pub email_from: Option<String>,
    pub email_to: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Delay of the simulated transport in milliseconds
    pub simulated_delay_ms: Option<u64>,
    /// Phone number shown on the page
    pub phone: Option<String>,
    /// Page opened at startup
    pub start_page: Option<String>,
    /// Seconds the success message stays visible
    pub success_hide_secs: Option<u64>,
    /// Record phone clicks to the analytics log
    pub analytics: Option<bool>,
}

impl SiteConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("no", "danivanov-tak", "tak-site")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("tak-site.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                // First run: leave an editable file behind
                let config = Self::default();
                if let Err(e) = config.save_to(&path) {
                    tracing::warn!("Could not write default config to {}: {}", path.display(), e);
                }
                config
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from `path`, or defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `TAK_SITE_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_TRANSPORT) {
            match TransportKind::parse(&value) {
                Some(kind) => self.transport = Some(kind),
                None => tracing::warn!("Ignoring unknown {}={}", ENV_TRANSPORT, value),
            }
        }
        if let Some(value) = lookup(ENV_EMAIL_ENDPOINT).filter(|v| !v.is_empty()) {
            self.email_endpoint = Some(value);
        }
        if let Some(value) = lookup(ENV_EMAIL_API_KEY).filter(|v| !v.is_empty()) {
            self.email_api_key = Some(value);
        }
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.unwrap_or_default()
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(DEFAULT_PHONE)
    }

    pub fn start_page(&self) -> &str {
        self.start_page.as_deref().unwrap_or(DEFAULT_START_PAGE)
    }

    pub fn analytics_enabled(&self) -> bool {
        self.analytics.unwrap_or(true)
    }

    pub fn success_hide_after(&self) -> Duration {
        self.success_hide_secs
            .map(Duration::from_secs)
            .unwrap_or(crate::contact::SUCCESS_HIDE_AFTER)
    }

    /// Endpoint for the email API transport
    pub fn email_endpoint(&self) -> String {
        if let Some(endpoint) = &self.email_endpoint {
            return endpoint.clone();
        }
        let base = self
            .email_base_url
            .as_deref()
            .unwrap_or(DEFAULT_EMAIL_BASE_URL);
        format!("{}{}", base.trim_end_matches('/'), EMAIL_API_PATH)
    }

    pub fn email_settings(&self) -> EmailApiSettings {
        let mut settings = EmailApiSettings::new(&self.email_endpoint());
        settings.api_key = self.email_api_key.clone();
        if let Some(from) = &self.email_from {
            settings.from = from.clone();
        }
        if let Some(to) = &self.email_to {
            settings.to = to.clone();
        }
        if let Some(secs) = self.request_timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        settings
    }

    /// Build the configured submission transport
    pub fn build_transport(&self) -> Result<Arc<dyn SubmissionTransport>> {
        match self.transport_kind() {
            TransportKind::Simulated => {
                let transport = match self.simulated_delay_ms {
                    Some(ms) => SimulatedTransport::new(Duration::from_millis(ms)),
                    None => SimulatedTransport::default(),
                };
                Ok(Arc::new(transport))
            }
            TransportKind::EmailApi => {
                let transport = EmailApiTransport::new(self.email_settings())
                    .context("Failed to set up the email API transport")?;
                tracing::info!("Using email API at {}", transport.endpoint());
                Ok(Arc::new(transport))
            }
        }
    }
}
