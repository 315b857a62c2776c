//! render-doc configuration.
//!
//! Layered with the `config` crate, later sources winning:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. `titiktemu.toml` in the working directory, or the `--config` file
//! 3. `TITIKTEMU__*` environment variables, `__` between levels,
//!    e.g. `TITIKTEMU__SETTINGS__BRAND_NAME`
//!
//! The site base URL follows the storefront's deployment variables instead:
//! `SITE_URL`, then `NEXT_PUBLIC_SITE_URL`, then `VERCEL_URL`, then localhost.

use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use titiktemu_docs::DocumentSettings;

use crate::error::AppResult;

pub const DEFAULT_CONFIG_NAME: &str = "titiktemu";
pub const ENV_PREFIX: &str = "TITIKTEMU";
pub const LOCAL_SITE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Printed wording, currency and time zone.
    pub settings: DocumentSettings,

    /// PNG brand mark. A missing file falls back to initials.
    pub logo_path: PathBuf,

    /// Overrides the deployment variables when set.
    pub site_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            settings: DocumentSettings::default(),
            logo_path: PathBuf::from("public/logo.png"),
            site_url: None,
        }
    }
}

impl AppConfig {
    /// Loads the layered configuration.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let file = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Base URL printed into QR codes.
    pub fn base_url(&self) -> String {
        self.base_url_from(|key| env::var(key).ok())
    }

    fn base_url_from(&self, var: impl Fn(&str) -> Option<String>) -> String {
        let site_url = self
            .site_url
            .clone()
            .or_else(|| SITE_URL_VARS.iter().find_map(|key| var(key).filter(|v| !v.trim().is_empty())));
        resolve_site_url(site_url.as_deref(), var("VERCEL_URL").as_deref())
    }
}

/// Checked in order; the storefront itself reads `NEXT_PUBLIC_SITE_URL`.
pub const SITE_URL_VARS: [&str; 2] = ["SITE_URL", "NEXT_PUBLIC_SITE_URL"];

/// `site_url`, else `https://<vercel_url>`, else localhost. Blank values
/// count as unset.
pub fn resolve_site_url(site_url: Option<&str>, vercel_url: Option<&str>) -> String {
    if let Some(url) = present(site_url) {
        return url.trim_end_matches('/').to_string();
    }
    if let Some(host) = present(vercel_url) {
        return format!("https://{}", host.trim_end_matches('/'));
    }
    LOCAL_SITE_URL.to_string()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
