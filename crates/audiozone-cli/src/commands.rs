//! Command handlers.
//!
//! Every handler returns the text to print so that it can be tested
//! without capturing stdout.

use crate::args::Command;
use anyhow::{Context, Result, anyhow};
use audiozone_backend::{AnyBackend, SetOutcome};
use audiozone_bridge::{
    AccessoryDescription, AudioZonePlatform, PlatformConfig, Registration, ZoneAccessory,
    register,
};
use audiozone_core::ZoneId;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Run one command against the platform configured in `config_path`.
///
/// Only `plugins` runs without a configuration.
pub async fn execute(config_path: Option<&Path>, command: Command) -> Result<String> {
    if let Command::Plugins = command {
        return plugins();
    }

    let config_path = config_path.context("--config is required for this command")?;
    let config = PlatformConfig::from_path(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    debug!(path = %config_path.display(), zones = config.lights.len(), "Configuration loaded");

    let platform = AudioZonePlatform::new(config, Arc::new(AnyBackend::default()));
    let accessories = platform.accessories()?;

    let output = match command {
        Command::List => list(&accessories)?,
        Command::Get { zone, capability } => {
            let accessory = find(&accessories, &zone)?;
            let value = accessory.read(&capability).await?;
            serde_json::to_string(&value)?
        }
        Command::Set {
            zone,
            capability,
            value,
        } => {
            let accessory = find(&accessories, &zone)?;
            let value = parse_value(&value)?;
            let outcome = accessory.write(&capability, &value).await?;
            render_outcome(&outcome)?
        }
        Command::Plugins => plugins()?,
    };

    platform.shutdown();
    Ok(output)
}

fn plugins() -> Result<String> {
    let mut registrations: Vec<Registration> = Vec::new();
    register(&mut registrations);

    let lines = registrations
        .iter()
        .map(|registration| match registration {
            Registration::Accessory { plugin, name } => format!("accessory {plugin} {name}"),
            Registration::Platform { plugin, name } => format!("platform {plugin} {name}"),
        })
        .collect::<Vec<_>>();

    Ok(lines.join("\n"))
}

fn list(accessories: &[ZoneAccessory]) -> Result<String> {
    let descriptions = accessories
        .iter()
        .map(ZoneAccessory::describe)
        .collect::<Vec<AccessoryDescription>>();
    Ok(serde_json::to_string_pretty(&descriptions)?)
}

fn find<'a>(accessories: &'a [ZoneAccessory], zone: &str) -> Result<&'a ZoneAccessory> {
    let id = ZoneId::new(zone)?;
    accessories
        .iter()
        .find(|accessory| accessory.handle().id() == &id)
        .ok_or_else(|| anyhow!("no zone with id {id:?} is configured"))
}

/// Parse a command-line value as JSON, so `true`, `0` and `75` keep their
/// types.
fn parse_value(raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).with_context(|| format!("{raw:?} is not a JSON value"))
}

fn render_outcome(outcome: &SetOutcome) -> Result<String> {
    let rendered = match outcome {
        SetOutcome::Applied(ack) => json!({
            "outcome": "applied",
            "zone": ack.zone_id,
            "capability": ack.kind,
            "value": ack.value,
            "acknowledged_at": ack.acknowledged_at,
        }),
        SetOutcome::Suppressed => json!({ "outcome": "suppressed" }),
    };
    Ok(serde_json::to_string(&rendered)?)
}
