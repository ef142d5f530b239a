//! Mapping configuration model
//!
//! The mapping configuration is externally supplied (file loading belongs to
//! the excluded configuration layer), deserialized once per session, and
//! treated as immutable from then on. Both encoders consume it read-only, so
//! a single `Arc<MappingConfiguration>` can safely be shared across threads.
//!
//! The configuration document uses camelCase keys; every section is optional
//! and defaults to empty, matching the way real mapping files grow over
//! time. The legacy `positions`/`rotationalAxes` sections are only consulted
//! when the modern `axes` section is empty (deprecated compatibility path);
//! the precedence is resolved once at load time by [`MappingConfiguration::resolve_axes`]
//! rather than on every encode call.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MapperResult;
use crate::protocol::RegisterAddress;

/// Symbolic key for the motion command register
pub const KEY_G_COMMAND: &str = "GCommand";
/// Symbolic key for the machine-function command register
pub const KEY_M_COMMAND: &str = "MCommand";
/// Symbolic key for the feed-rate register
pub const KEY_FEED_RATE: &str = "FeedRate";
/// Symbolic key for the spindle-speed register
pub const KEY_SPINDLE_SPEED: &str = "SpindleSpeed";
/// Symbolic key for the tool-number register
pub const KEY_TOOL_NUMBER: &str = "ToolNumber";
/// Name of the digital output driven by M3/M4 spindle direction commands
pub const SPINDLE_DIRECTION_OUTPUT: &str = "SpindleDirection";

fn default_scale() -> f64 {
    1.0
}

/// Axis motion class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisKind {
    /// Linear axis (mm)
    #[default]
    Linear,
    /// Rotational axis (degrees)
    Rotational,
    /// Machine-specific axis
    Custom,
}

/// Register configuration for one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisConfig {
    /// Destination holding-register address
    pub address: RegisterAddress,
    /// Engineering-unit to register-unit multiplier
    #[serde(default = "default_scale")]
    pub scale_factor: f64,
    /// Linear / rotational / custom
    pub kind: AxisKind,
    /// Engineering unit of the axis position (e.g. `"mm"`)
    pub unit: String,
    /// Human-readable description
    pub description: String,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            address: 0,
            scale_factor: 1.0,
            kind: AxisKind::Linear,
            unit: String::new(),
            description: String::new(),
        }
    }
}

impl AxisConfig {
    /// Create an axis configuration with the given address and scale
    pub fn new(address: RegisterAddress, scale_factor: f64) -> Self {
        Self {
            address,
            scale_factor,
            ..Default::default()
        }
    }
}

/// Register configuration for a command or named parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterConfig {
    /// Destination holding-register address
    pub address: RegisterAddress,
    /// Multiplier applied before writing (normally 1 for command codes)
    #[serde(default = "default_scale")]
    pub scale_factor: f64,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            address: 0,
            scale_factor: 1.0,
        }
    }
}

impl RegisterConfig {
    /// Create a register configuration
    pub fn new(address: RegisterAddress, scale_factor: f64) -> Self {
        Self { address, scale_factor }
    }
}

/// Configuration for one digital (coil) output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitalOutputConfig {
    /// Destination coil address
    pub address: RegisterAddress,
    /// Machine-function code that drives this output (e.g. 8 for flood coolant)
    pub trigger_code: u16,
    /// Coil value written when the trigger code fires
    pub trigger_value: bool,
    /// Human-readable description
    pub description: String,
}

impl DigitalOutputConfig {
    /// Create a digital output configuration
    pub fn new(address: RegisterAddress, trigger_code: u16, trigger_value: bool) -> Self {
        Self {
            address,
            trigger_code,
            trigger_value,
            description: String::new(),
        }
    }
}

/// One named validation range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRule {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Clamp negative values straight to zero before the min check
    pub clamp_negative_to_zero: bool,
}

impl Default for ValidationRule {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 65535.0,
            clamp_negative_to_zero: false,
        }
    }
}

impl ValidationRule {
    /// Create a rule with the given bounds
    pub fn new(min: f64, max: f64, clamp_negative_to_zero: bool) -> Self {
        Self {
            min,
            max,
            clamp_negative_to_zero,
        }
    }
}

/// The four named validation ranges used by the instruction encoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// Axis position range
    pub position: ValidationRule,
    /// Feed rate range (`F`)
    pub feed_rate: ValidationRule,
    /// Spindle speed range (`S`)
    pub spindle_speed: ValidationRule,
    /// Tool number range (boolean check, never clamped)
    pub tool_number: ValidationRule,
}

impl Default for ValidationRules {
    /// Typical machine envelope; real deployments override these from the
    /// mapping configuration file.
    fn default() -> Self {
        Self {
            position: ValidationRule::new(0.0, 10_000.0, true),
            feed_rate: ValidationRule::new(1.0, 20_000.0, false),
            spindle_speed: ValidationRule::new(0.0, 24_000.0, true),
            tool_number: ValidationRule::new(1.0, 99.0, false),
        }
    }
}

/// One axis after legacy-precedence resolution
///
/// Produced once at configuration load by [`MappingConfiguration::resolve_axes`];
/// the instruction encoder iterates this table instead of re-checking the
/// deprecated maps on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAxis {
    /// Single-letter axis identifier
    pub letter: char,
    /// Destination holding-register address
    pub address: RegisterAddress,
    /// Engineering-unit to register-unit multiplier
    pub scale_factor: f64,
    /// Linear / rotational / custom
    pub kind: AxisKind,
}

/// Immutable mapping configuration consumed by both encoders
///
/// Loaded once per session by the external configuration provider; the
/// engine never reloads or mutates it. Address collisions between entries
/// are a configuration-authoring responsibility and are not validated here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingConfiguration {
    /// Modern axis table, keyed by single-character axis id
    pub axes: BTreeMap<String, AxisConfig>,
    /// Command registers, keyed by `"GCommand"` / `"MCommand"`
    pub commands: BTreeMap<String, RegisterConfig>,
    /// Named parameter registers, keyed by `"FeedRate"` / `"SpindleSpeed"` /
    /// `"ToolNumber"`
    pub parameters: BTreeMap<String, RegisterConfig>,
    /// Digital (coil) outputs keyed by name
    pub digital_outputs: BTreeMap<String, DigitalOutputConfig>,
    /// Free-form extra registers for site-specific extensions
    pub custom_registers: BTreeMap<String, RegisterConfig>,
    /// Reserved for roll-former operation overrides; deserialized for
    /// forward compatibility, not consumed by the encoder logic
    pub lsf_operations: BTreeMap<String, RegisterConfig>,
    /// The four named validation ranges
    pub validation_rules: ValidationRules,
    /// Deprecated linear-axis map, consulted only when `axes` is empty
    pub positions: BTreeMap<String, AxisConfig>,
    /// Deprecated rotational-axis map, consulted only when `axes` is empty
    pub rotational_axes: BTreeMap<String, AxisConfig>,
}

impl MappingConfiguration {
    /// Parse a configuration from its JSON document form
    ///
    /// File access belongs to the external configuration provider; this
    /// helper only covers the deserialization step so callers and tests can
    /// share it.
    pub fn from_json(json: &str) -> MapperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a command register by symbolic key
    pub fn command(&self, key: &str) -> Option<&RegisterConfig> {
        self.commands.get(key)
    }

    /// Look up a named parameter register by symbolic key
    pub fn parameter(&self, key: &str) -> Option<&RegisterConfig> {
        self.parameters.get(key)
    }

    /// Resolve the axis table once, applying legacy precedence
    ///
    /// The modern `axes` map wins whenever it has entries. Only when it is
    /// empty are the deprecated `positions` (linear) and `rotationalAxes`
    /// (rotational) maps normalized instead; the two paths never run
    /// simultaneously. Axis ids that are not exactly one character are
    /// skipped with a warning, never an error.
    pub fn resolve_axes(&self) -> Vec<ResolvedAxis> {
        if !self.axes.is_empty() {
            return Self::normalize(self.axes.iter().map(|(id, cfg)| (id, cfg, cfg.kind)));
        }

        let legacy = self
            .positions
            .iter()
            .map(|(id, cfg)| (id, cfg, AxisKind::Linear))
            .chain(
                self.rotational_axes
                    .iter()
                    .map(|(id, cfg)| (id, cfg, AxisKind::Rotational)),
            );
        Self::normalize(legacy)
    }

    fn normalize<'a>(
        entries: impl Iterator<Item = (&'a String, &'a AxisConfig, AxisKind)>,
    ) -> Vec<ResolvedAxis> {
        let mut resolved = Vec::new();
        for (id, cfg, kind) in entries {
            let mut chars = id.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => resolved.push(ResolvedAxis {
                    letter,
                    address: cfg.address,
                    scale_factor: cfg.scale_factor,
                    kind,
                }),
                _ => {
                    warn!("skipping axis id {:?}: must be exactly one character", id);
                }
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(address: u16, scale: f64) -> AxisConfig {
        AxisConfig::new(address, scale)
    }

    #[test]
    fn test_modern_axes_win_over_legacy() {
        let mut config = MappingConfiguration::default();
        config.axes.insert("X".into(), axis(100, 1000.0));
        config.positions.insert("Y".into(), axis(50, 1.0));

        let resolved = config.resolve_axes();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].letter, 'X');
        assert_eq!(resolved[0].address, 100);
    }

    #[test]
    fn test_legacy_fallback_when_axes_empty() {
        let mut config = MappingConfiguration::default();
        config.positions.insert("X".into(), axis(10, 100.0));
        config.rotational_axes.insert("A".into(), axis(20, 10.0));

        let resolved = config.resolve_axes();
        assert_eq!(resolved.len(), 2);
        // positions first, then rotational axes
        assert_eq!(resolved[0].letter, 'X');
        assert_eq!(resolved[0].kind, AxisKind::Linear);
        assert_eq!(resolved[1].letter, 'A');
        assert_eq!(resolved[1].kind, AxisKind::Rotational);
    }

    #[test]
    fn test_invalid_axis_ids_skipped() {
        let mut config = MappingConfiguration::default();
        config.axes.insert("XY".into(), axis(10, 1.0));
        config.axes.insert("".into(), axis(11, 1.0));
        config.axes.insert("Z".into(), axis(12, 1.0));

        let resolved = config.resolve_axes();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].letter, 'Z');
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"{
            "axes": {
                "X": { "address": 100, "scaleFactor": 1000.0, "unit": "mm" }
            },
            "commands": {
                "GCommand": { "address": 1 }
            },
            "digitalOutputs": {
                "CoolantFlood": { "address": 300, "triggerCode": 8, "triggerValue": true }
            },
            "validationRules": {
                "feedRate": { "min": 1.0, "max": 5000.0 }
            }
        }"#;
        let config = MappingConfiguration::from_json(json).unwrap();
        assert_eq!(config.axes["X"].scale_factor, 1000.0);
        assert_eq!(config.axes["X"].unit, "mm");
        // omitted scaleFactor defaults to 1
        assert_eq!(config.command(KEY_G_COMMAND).unwrap().scale_factor, 1.0);
        assert_eq!(config.digital_outputs["CoolantFlood"].trigger_code, 8);
        assert!(config.digital_outputs["CoolantFlood"].trigger_value);
        assert_eq!(config.validation_rules.feed_rate.max, 5000.0);
        // untouched sections keep their defaults
        assert_eq!(config.validation_rules.tool_number.max, 99.0);
        assert!(config.lsf_operations.is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(MappingConfiguration::from_json("{ nope").is_err());
    }
}
