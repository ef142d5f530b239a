//! # Rollform Modbus - CNC Instruction to Register Mapping Engine
//!
//! **Version:** 0.2.0
//! **License:** MIT
//!
//! A deterministic mapping engine that bridges machine-instruction streams
//! (CNC G-code words and roll-former component descriptors) to industrial
//! field-bus register writes, governed by a declarative, hot-swappable
//! mapping configuration.
//!
//! ## Features
//!
//! - **🔧 Declarative Mapping**: Axis, command, parameter, and digital
//!   output registers are configuration data, not code
//! - **📏 Scaling & Clamping**: Every value conversion routes through one
//!   total scale-and-clamp chokepoint; nothing ever wraps
//! - **🛡️ Advisory Diagnostics**: Out-of-range values clamp and log, they
//!   never fail an encode call
//! - **🔀 Deterministic Ordering**: Output is stably sorted by register
//!   address for reproducible write sequences
//! - **🏭 Roll-Former Blocks**: Component/frameset encoding against the
//!   fixed trigger-gated register block layout
//! - **🧵 Thread Safe**: Pure synchronous encoding over a shared immutable
//!   configuration
//!
//! ## Quick Start
//!
//! ### Encoding an instruction
//!
//! ```rust
//! use rollform_modbus::{
//!     AxisConfig, CommandCategory, Instruction, InstructionEncoder,
//!     MappingConfiguration, RegisterConfig,
//! };
//! use std::sync::Arc;
//!
//! let mut config = MappingConfiguration::default();
//! config.axes.insert("X".into(), AxisConfig::new(100, 1000.0));
//! config.commands.insert("GCommand".into(), RegisterConfig::new(1, 1.0));
//!
//! let encoder = InstructionEncoder::new(Arc::new(config));
//! let instruction = Instruction::new(CommandCategory::Motion, Some(1))
//!     .with_parameter('X', 42.0);
//!
//! for mapping in encoder.encode(&instruction) {
//!     println!("{}", mapping);
//! }
//! ```
//!
//! ### Encoding a component
//!
//! ```rust
//! use rollform_modbus::{map_component, LabelOrientation, LsfComponent, LsfOperation, OperationKind};
//!
//! let component = LsfComponent {
//!     id: "H1".into(),
//!     label_orientation: LabelOrientation::Normal,
//!     quantity: 2,
//!     length_mm: 600.0,
//!     operations: vec![LsfOperation::new(OperationKind::Swage, 19.5)],
//! };
//!
//! let mappings = map_component(&component).expect("structurally valid component");
//! assert!(mappings.windows(2).all(|w| w[0].address <= w[1].address));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────────┐
//! │ Instruction      │   │ Component/Frameset   │
//! │ source (parser)  │   │ source               │
//! └────────┬─────────┘   └──────────┬───────────┘
//!          │                        │
//! ┌────────▼─────────┐   ┌──────────▼───────────┐
//! │ InstructionEncoder│  │ map_component /      │
//! │ (config-driven)  │   │ map_frameset (fixed) │
//! └────────┬─────────┘   └──────────┬───────────┘
//!          │     Vec<RegisterMapping>│
//!          └────────────┬───────────┘
//!                       │
//!            ┌──────────▼───────────┐
//!            │ Field-bus writer     │
//!            │ (external, excluded) │
//!            └──────────────────────┘
//! ```
//!
//! The engine performs no I/O, keeps no state between calls, and never
//! retries; transport concerns belong to the consuming field-bus writer.

/// Error types and result alias for the mapping engine
pub mod error;

/// Core data types: register mappings, instructions, LSF descriptors
pub mod protocol;

/// Immutable mapping configuration and axis-table resolution
pub mod config;

/// Scaling, clamping, and range-validation primitives
pub mod scaling;

/// Instruction encoder (G/M/T words to register writes)
pub mod instruction;

/// Component and frameset encoder (fixed register block)
pub mod frameset;

// Re-export main types for convenience
pub use config::{
    AxisConfig, AxisKind, DigitalOutputConfig, MappingConfiguration, RegisterConfig, ResolvedAxis,
    ValidationRule, ValidationRules,
};
pub use error::{MapperError, MapperResult};
pub use frameset::{map_component, map_frameset};
pub use instruction::InstructionEncoder;
pub use protocol::{
    CommandCategory, Instruction, LabelOrientation, LsfComponent, LsfFrameset, LsfOperation,
    OperationKind, RegisterAddress, RegisterKind, RegisterMapping, RegisterValue,
};
pub use scaling::{is_valid_tool_number, scale_and_clamp, validate_and_clamp, REGISTER_MAX};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn info() -> String {
    format!("Rollform Modbus v{} - CNC instruction to register mapping engine", VERSION)
}
