//! Instruction encoder
//!
//! Translates one parsed machine instruction into an ordered list of
//! register writes, governed by the mapping configuration:
//!
//! 1. the command code itself (`G_Command` / `M_Command` / `Tool_Number`)
//! 2. axis positions for every configured axis letter present
//! 3. the named parameters `F` (feed rate) and `S` (spindle speed)
//! 4. digital outputs for machine-function codes, including the
//!    cross-output rules (M9 drops flood and mist coolant, M5 drops the
//!    spindle enable, M3/M4 set the spindle direction)
//!
//! The result is sorted by address ascending with a stable sort, so entries
//! at the same address keep their emission order. Encoding is a pure
//! function of (instruction, configuration): no state accumulates between
//! calls, and the encoder can be shared freely across threads.

use log::{debug, warn};
use std::sync::Arc;

use crate::config::{
    MappingConfiguration, ResolvedAxis, KEY_FEED_RATE, KEY_G_COMMAND, KEY_M_COMMAND,
    KEY_SPINDLE_SPEED, KEY_TOOL_NUMBER, SPINDLE_DIRECTION_OUTPUT,
};
use crate::protocol::{CommandCategory, Instruction, RegisterMapping};
use crate::scaling::{is_valid_tool_number, scale_and_clamp, validate_and_clamp};

/// One hard-coded cross-output rule: seeing `on_code` turns off every
/// digital output configured with `turns_off_code` as its trigger.
struct CrossOutputRule {
    on_code: u16,
    turns_off_code: u16,
}

/// M9 cancels flood (M8) and mist (M7) coolant; M5 cancels the spindle
/// enable (M3). Evaluated independently of direct trigger matches, so a
/// single code may fire several rules at once.
const CROSS_OUTPUT_RULES: &[CrossOutputRule] = &[
    CrossOutputRule { on_code: 9, turns_off_code: 8 },
    CrossOutputRule { on_code: 9, turns_off_code: 7 },
    CrossOutputRule { on_code: 5, turns_off_code: 3 },
];

/// Machine-function codes that set the spindle direction output
const SPINDLE_CW_CODE: u16 = 3;
const SPINDLE_CCW_CODE: u16 = 4;

/// Encoder turning instructions into register writes
///
/// Holds a shared reference to the immutable mapping configuration and the
/// axis table resolved once at construction (legacy `positions` /
/// `rotationalAxes` precedence is decided here, not per call).
#[derive(Debug, Clone)]
pub struct InstructionEncoder {
    config: Arc<MappingConfiguration>,
    axes: Vec<ResolvedAxis>,
}

impl InstructionEncoder {
    /// Create an encoder over a shared configuration
    pub fn new(config: Arc<MappingConfiguration>) -> Self {
        let axes = config.resolve_axes();
        Self { config, axes }
    }

    /// The resolved axis table this encoder maps against
    pub fn axes(&self) -> &[ResolvedAxis] {
        &self.axes
    }

    /// Encode one instruction into register writes, sorted by address
    ///
    /// Never fails: out-of-range values are clamped (logged), missing
    /// configuration keys omit their mapping (logged), and an out-of-range
    /// tool number drops the tool mapping entirely. The returned list may
    /// be empty.
    pub fn encode(&self, instruction: &Instruction) -> Vec<RegisterMapping> {
        let mut mappings = Vec::new();

        self.encode_command(instruction, &mut mappings);
        self.encode_axes(instruction, &mut mappings);
        self.encode_named_parameters(instruction, &mut mappings);
        if instruction.category == CommandCategory::Machine {
            self.encode_digital_outputs(instruction, &mut mappings);
        }

        mappings.sort_by_key(|m| m.address);
        debug!("encoded {} as {} register writes", instruction, mappings.len());
        mappings
    }

    fn encode_command(&self, instruction: &Instruction, out: &mut Vec<RegisterMapping>) {
        // A bare command word with no numeric code maps to nothing.
        let Some(code) = instruction.code else {
            return;
        };

        match instruction.category {
            CommandCategory::Motion => {
                self.encode_command_register(KEY_G_COMMAND, "G_Command", code, out);
            }
            CommandCategory::Machine => {
                self.encode_command_register(KEY_M_COMMAND, "M_Command", code, out);
            }
            CommandCategory::Tool => {
                let rule = &self.config.validation_rules.tool_number;
                if !is_valid_tool_number(code as f64, rule) {
                    warn!(
                        "tool number {} outside range [{}, {}], skipping tool mapping",
                        code, rule.min, rule.max
                    );
                    return;
                }
                match self.config.parameter(KEY_TOOL_NUMBER) {
                    Some(cfg) => out.push(RegisterMapping::holding(
                        cfg.address,
                        scale_and_clamp(code as f64, cfg.scale_factor),
                        "Tool_Number",
                        cfg.scale_factor,
                        code as f64,
                    )),
                    None => warn!("no {} register configured, skipping", KEY_TOOL_NUMBER),
                }
            }
        }
    }

    fn encode_command_register(
        &self,
        key: &str,
        name: &str,
        code: u16,
        out: &mut Vec<RegisterMapping>,
    ) {
        match self.config.command(key) {
            Some(cfg) => out.push(RegisterMapping::holding(
                cfg.address,
                scale_and_clamp(code as f64, cfg.scale_factor),
                name,
                cfg.scale_factor,
                code as f64,
            )),
            None => warn!("no {} register configured, skipping", key),
        }
    }

    fn encode_axes(&self, instruction: &Instruction, out: &mut Vec<RegisterMapping>) {
        let rule = &self.config.validation_rules.position;
        for axis in &self.axes {
            let Some(&value) = instruction.parameters.get(&axis.letter) else {
                continue;
            };
            let clamped = validate_and_clamp(value, rule);
            out.push(RegisterMapping::holding(
                axis.address,
                scale_and_clamp(clamped, axis.scale_factor),
                format!("{}_Position", axis.letter),
                axis.scale_factor,
                value,
            ));
        }
    }

    fn encode_named_parameters(&self, instruction: &Instruction, out: &mut Vec<RegisterMapping>) {
        let rules = &self.config.validation_rules;
        if let Some(&feed) = instruction.parameters.get(&'F') {
            self.encode_named_parameter(KEY_FEED_RATE, "Feed_Rate", feed, &rules.feed_rate, out);
        }
        if let Some(&speed) = instruction.parameters.get(&'S') {
            self.encode_named_parameter(
                KEY_SPINDLE_SPEED,
                "Spindle_Speed",
                speed,
                &rules.spindle_speed,
                out,
            );
        }
    }

    fn encode_named_parameter(
        &self,
        key: &str,
        name: &str,
        value: f64,
        rule: &crate::config::ValidationRule,
        out: &mut Vec<RegisterMapping>,
    ) {
        let Some(cfg) = self.config.parameter(key) else {
            warn!("no {} register configured, skipping", key);
            return;
        };
        let clamped = validate_and_clamp(value, rule);
        out.push(RegisterMapping::holding(
            cfg.address,
            scale_and_clamp(clamped, cfg.scale_factor),
            name,
            cfg.scale_factor,
            value,
        ));
    }

    fn encode_digital_outputs(&self, instruction: &Instruction, out: &mut Vec<RegisterMapping>) {
        let Some(code) = instruction.code else {
            return;
        };

        // Direct trigger matches.
        for (name, output) in &self.config.digital_outputs {
            if output.trigger_code == code {
                out.push(RegisterMapping::coil(
                    output.address,
                    output.trigger_value,
                    format!("Digital_{}", name),
                ));
            }
        }

        // Cross-output rules; these fire independently of direct matches.
        for rule in CROSS_OUTPUT_RULES {
            if rule.on_code != code {
                continue;
            }
            for (name, output) in &self.config.digital_outputs {
                if output.trigger_code == rule.turns_off_code {
                    out.push(RegisterMapping::coil(
                        output.address,
                        false,
                        format!("Digital_{}", name),
                    ));
                }
            }
        }

        // M3/M4 drive the spindle direction output when one is configured.
        if code == SPINDLE_CW_CODE || code == SPINDLE_CCW_CODE {
            if let Some(output) = self.config.digital_outputs.get(SPINDLE_DIRECTION_OUTPUT) {
                out.push(RegisterMapping::coil(
                    output.address,
                    code == SPINDLE_CW_CODE,
                    format!("Digital_{}", SPINDLE_DIRECTION_OUTPUT),
                ));
            }
        }
    }
}
