//! Configuration sources for the browser script.

use anyhow::{Context, Result};
use turbo_interactions::{ConfigError, StorefrontConfig};

/// Defaults compiled into the module.
pub const EMBEDDED_CONFIG: &str = include_str!("../storefront.toml");

/// Id of the optional `<script type="application/json">` holding page
/// overrides.
pub const PAGE_CONFIG_ID: &str = "storefront-config";

/// Build the effective configuration.
///
/// A broken embedded file is a build defect and fails. A broken page
/// override is returned alongside the embedded config so the caller can
/// log it once a logger exists.
pub fn resolve_config(
    page_overrides: Option<&str>,
) -> Result<(StorefrontConfig, Option<ConfigError>)> {
    let base = StorefrontConfig::from_toml(EMBEDDED_CONFIG)
        .context("embedded storefront.toml is invalid")?;

    let Some(overrides) = page_overrides.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok((base, None));
    };

    match base.with_json_overrides(overrides) {
        Ok(config) => Ok((config, None)),
        Err(e) => Ok((base, Some(e))),
    }
}
