use super::{AncaConfig, RefreshMode};
use anyhow::{anyhow, Result};

/// Apply `ANCA_*` overrides on top of file/default settings.
///
/// `lookup` returns the value of an environment variable, if set.
pub(crate) fn apply_overrides<F>(config: &mut AncaConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(addr) = lookup("ANCA_BIND_ADDR") {
        config.api.bind_addr = addr;
    }
    if let Some(mode) = lookup("ANCA_REFRESH_MODE") {
        config.refresh.mode = mode
            .parse::<RefreshMode>()
            .map_err(|e| anyhow!("ANCA_REFRESH_MODE: {}", e))?;
    }
    if let Some(token) = lookup("ANCA_CONTROL_TOKEN") {
        config.api.control_token = if token.is_empty() { None } else { Some(token) };
    }
    Ok(())
}
