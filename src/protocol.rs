/// Core data types for the register mapping engine
///
/// This module contains the wire-facing data structures shared by the
/// instruction and component encoders: the register write descriptor
/// produced by every encode call, the parsed machine instruction, and the
/// light-steel-framing (LSF) component/frameset descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Register address type (0-65535)
pub type RegisterAddress = u16;

/// Register value type (16-bit register value)
pub type RegisterValue = u16;

/// Destination register class for a single write
///
/// Numeric values go to holding registers; digital triggers go to coils.
/// The field-bus writer routes each mapping to the matching write function
/// code based on this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterKind {
    /// 16-bit read/write register (written with function 0x06/0x10)
    HoldingRegister,
    /// Single-bit boolean output (written with function 0x05/0x0F)
    Coil,
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterKind::HoldingRegister => write!(f, "holding register"),
            RegisterKind::Coil => write!(f, "coil"),
        }
    }
}

/// One register write produced by an encoder
///
/// A `RegisterMapping` is created fresh per encode call, never mutated after
/// creation, and handed to the field-bus writer which performs one write per
/// mapping in list order. `scale_factor` and `original_value` are preserved
/// untransformed for traceability even when the wire value was clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterMapping {
    /// Destination register address
    pub address: RegisterAddress,
    /// Value to write, already scaled and clamped into [0, 65535]
    pub value: RegisterValue,
    /// Symbolic name of the mapped quantity (e.g. `"X_Position"`)
    pub parameter_name: String,
    /// Scale factor that was applied to `original_value`
    pub scale_factor: f64,
    /// Engineering-unit value before scaling and clamping
    pub original_value: f64,
    /// Whether this write targets a holding register or a coil
    pub register_kind: RegisterKind,
}

impl RegisterMapping {
    /// Create a holding-register mapping
    pub fn holding<S: Into<String>>(
        address: RegisterAddress,
        value: RegisterValue,
        parameter_name: S,
        scale_factor: f64,
        original_value: f64,
    ) -> Self {
        Self {
            address,
            value,
            parameter_name: parameter_name.into(),
            scale_factor,
            original_value,
            register_kind: RegisterKind::HoldingRegister,
        }
    }

    /// Create a coil mapping (digital output trigger)
    ///
    /// Coil writes carry no engineering scaling; the scale factor is 1 and
    /// the original value records the boolean as 0.0/1.0.
    pub fn coil<S: Into<String>>(address: RegisterAddress, on: bool, parameter_name: S) -> Self {
        let value = if on { 1 } else { 0 };
        Self {
            address,
            value,
            parameter_name: parameter_name.into(),
            scale_factor: 1.0,
            original_value: value as f64,
            register_kind: RegisterKind::Coil,
        }
    }
}

impl fmt::Display for RegisterMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} = {} ({}, raw {} x{})",
            self.parameter_name,
            self.address,
            self.value,
            self.register_kind,
            self.original_value,
            self.scale_factor
        )
    }
}

/// Machine-instruction category
///
/// The external contract is a single command letter; internal logic
/// branches on this enum instead of raw characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandCategory {
    /// Motion command (`G`)
    Motion,
    /// Machine function (`M`) - coolant, spindle, program control
    Machine,
    /// Tool selection (`T`)
    Tool,
}

impl CommandCategory {
    /// Convert from a command letter to a category
    ///
    /// Accepts upper- or lowercase `G`/`M`/`T`; any other letter is not a
    /// recognized category.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'G' => Some(CommandCategory::Motion),
            'M' => Some(CommandCategory::Machine),
            'T' => Some(CommandCategory::Tool),
            _ => None,
        }
    }

    /// The canonical command letter for this category
    pub fn letter(self) -> char {
        match self {
            CommandCategory::Motion => 'G',
            CommandCategory::Machine => 'M',
            CommandCategory::Tool => 'T',
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One parsed machine instruction
///
/// The instruction source (parser) is responsible for lexical validation
/// and for resolving duplicate parameter letters last-write-wins; the
/// encoder trusts this structure as-is. Parameters are keyed by single
/// ASCII letters (`X`, `Y`, `Z`, `F`, `S`, ...) mapped to decimal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Command category (motion / machine function / tool select)
    pub category: CommandCategory,
    /// Numeric command code (the `01` in `G01`), absent for bare words
    pub code: Option<u16>,
    /// Parameter letters with decimal values
    pub parameters: BTreeMap<char, f64>,
}

impl Instruction {
    /// Create an instruction with no parameters
    pub fn new(category: CommandCategory, code: Option<u16>) -> Self {
        Self {
            category,
            code,
            parameters: BTreeMap::new(),
        }
    }

    /// Add or replace a parameter (builder style)
    pub fn with_parameter(mut self, letter: char, value: f64) -> Self {
        self.parameters.insert(letter, value);
        self
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}{:02}", self.category, code)?,
            None => write!(f, "{}", self.category)?,
        }
        for (letter, value) in &self.parameters {
            write!(f, " {}{}", letter, value)?;
        }
        Ok(())
    }
}

/// Label orientation of a steel component on the forming line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelOrientation {
    /// Label printed in line direction (wire value 0)
    #[default]
    Normal,
    /// Label printed inverted (wire value 1)
    Inverted,
}

impl LabelOrientation {
    /// Wire value written to the orientation register
    pub fn code(self) -> u16 {
        match self {
            LabelOrientation::Normal => 0,
            LabelOrientation::Inverted => 1,
        }
    }
}

/// Forming operation kind performed on a steel component
///
/// The numeric codes are part of the wire contract with the roll former and
/// must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Unrecognized operation (wire value 0)
    Unknown,
    /// Swage (wire value 1)
    Swage,
    /// Lip cut (wire value 2)
    LipCut,
    /// Notch (wire value 3)
    Notch,
    /// Dimple (wire value 4)
    Dimple,
    /// End truss (wire value 5)
    EndTruss,
}

impl OperationKind {
    /// Wire value written to the operation-type register
    pub fn code(self) -> u16 {
        match self {
            OperationKind::Unknown => 0,
            OperationKind::Swage => 1,
            OperationKind::LipCut => 2,
            OperationKind::Notch => 3,
            OperationKind::Dimple => 4,
            OperationKind::EndTruss => 5,
        }
    }

    /// Convert from a wire value to an operation kind
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => OperationKind::Swage,
            2 => OperationKind::LipCut,
            3 => OperationKind::Notch,
            4 => OperationKind::Dimple,
            5 => OperationKind::EndTruss,
            _ => OperationKind::Unknown,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Unknown => "Unknown",
            OperationKind::Swage => "Swage",
            OperationKind::LipCut => "LipCut",
            OperationKind::Notch => "Notch",
            OperationKind::Dimple => "Dimple",
            OperationKind::EndTruss => "EndTruss",
        };
        write!(f, "{}", name)
    }
}

/// One forming operation at a linear position along a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LsfOperation {
    /// Operation kind (swage, lip cut, ...)
    pub kind: OperationKind,
    /// Position along the component, in millimetres
    pub position_mm: f64,
}

impl LsfOperation {
    /// Create an operation
    pub fn new(kind: OperationKind, position_mm: f64) -> Self {
        Self { kind, position_mm }
    }
}

/// One light-steel-framing component
///
/// Operations are kept in insertion order; the encoder allocates register
/// slots by this order and never re-sorts the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LsfComponent {
    /// Component identifier (e.g. `"H1"`); the first character's code is
    /// written to the component-id register
    pub id: String,
    /// Label orientation on the line
    pub label_orientation: LabelOrientation,
    /// Number of copies to produce
    pub quantity: u16,
    /// Component length in millimetres
    pub length_mm: f64,
    /// Ordered forming operations
    pub operations: Vec<LsfOperation>,
}

/// A named collection of steel components forming one frameset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LsfFrameset {
    /// Production unit
    pub unit: String,
    /// Steel profile code
    pub profile: String,
    /// Human-readable profile description
    pub profile_description: String,
    /// Numeric frameset identifier written to the header register
    pub frameset_id: u16,
    /// Frameset name
    pub frameset_name: String,
    /// Site location
    pub location: String,
    /// Components in production order
    pub components: Vec<LsfComponent>,
}
