//! Component and frameset encoder
//!
//! Translates light-steel-framing component descriptors into register
//! writes against a fixed address block. Unlike the instruction encoder,
//! addresses here are part of the wire contract with the roll former and do
//! not come from the mapping configuration.
//!
//! Every component reuses the same metadata block (200-204, trigger 209,
//! operations from 210). A multi-component frameset therefore produces
//! mappings that collide on address by design: the field-bus writer streams
//! each component's block in list order, gated by the trigger register,
//! instead of expecting a static per-component memory layout. Do not
//! auto-offset these addresses.

use log::{debug, warn};

use crate::error::{MapperError, MapperResult};
use crate::protocol::{LsfComponent, LsfFrameset, RegisterMapping};
use crate::scaling::scale_and_clamp;

/// Frameset identifier header register
pub const FRAMESET_ID_ADDRESS: u16 = 100;
/// Component count header register
pub const COMPONENT_COUNT_ADDRESS: u16 = 101;
/// Component id register (first character code of the component id)
pub const COMPONENT_ID_ADDRESS: u16 = 200;
/// Component length register (millimetres scaled to micrometres)
pub const COMPONENT_LENGTH_ADDRESS: u16 = 201;
/// Component quantity register
pub const COMPONENT_QUANTITY_ADDRESS: u16 = 202;
/// Label orientation register (0 = normal, 1 = inverted)
pub const COMPONENT_ORIENTATION_ADDRESS: u16 = 203;
/// Operation count register
pub const OPERATION_COUNT_ADDRESS: u16 = 204;
/// Component-ready trigger register
pub const COMPONENT_TRIGGER_ADDRESS: u16 = 209;
/// First operation register; each operation takes two registers
pub const OPERATION_BASE_ADDRESS: u16 = 210;
/// Registers per operation (type code + position)
pub const REGISTERS_PER_OPERATION: u16 = 2;

/// Millimetres to micrometres, the unit the roll former expects
pub const LENGTH_SCALE: f64 = 1000.0;

/// Encode one component into its fixed register block
///
/// Emits the five metadata mappings followed by two mappings per operation
/// (type code, then position), all scaled and clamped, sorted by address
/// ascending. Fails fast on a structurally invalid component (empty id);
/// everything else is clamped and logged.
pub fn map_component(component: &LsfComponent) -> MapperResult<Vec<RegisterMapping>> {
    let id_char = component
        .id
        .chars()
        .next()
        .ok_or_else(|| MapperError::invalid_input("component id is empty"))?;

    let mut mappings = vec![
        RegisterMapping::holding(
            COMPONENT_ID_ADDRESS,
            scale_and_clamp(id_char as u32 as f64, 1.0),
            format!("{}_ComponentId", component.id),
            1.0,
            id_char as u32 as f64,
        ),
        RegisterMapping::holding(
            COMPONENT_LENGTH_ADDRESS,
            scale_and_clamp(component.length_mm, LENGTH_SCALE),
            format!("{}_Length", component.id),
            LENGTH_SCALE,
            component.length_mm,
        ),
        RegisterMapping::holding(
            COMPONENT_QUANTITY_ADDRESS,
            component.quantity,
            format!("{}_Quantity", component.id),
            1.0,
            component.quantity as f64,
        ),
        RegisterMapping::holding(
            COMPONENT_ORIENTATION_ADDRESS,
            component.label_orientation.code(),
            format!("{}_Orientation", component.id),
            1.0,
            component.label_orientation.code() as f64,
        ),
        RegisterMapping::holding(
            OPERATION_COUNT_ADDRESS,
            scale_and_clamp(component.operations.len() as f64, 1.0),
            format!("{}_OperationCount", component.id),
            1.0,
            component.operations.len() as f64,
        ),
    ];

    for (index, operation) in component.operations.iter().enumerate() {
        // Slot addresses are allocated by insertion order, two registers
        // per operation.
        let offset = index as u32 * REGISTERS_PER_OPERATION as u32;
        let type_address = OPERATION_BASE_ADDRESS as u32 + offset;
        if type_address + 1 > u16::MAX as u32 {
            warn!(
                "operation slot {} of component {} exceeds the register space, dropping remainder",
                index, component.id
            );
            break;
        }

        mappings.push(RegisterMapping::holding(
            type_address as u16,
            operation.kind.code(),
            format!("{}_Op{}_Type", component.id, index),
            1.0,
            operation.kind.code() as f64,
        ));
        mappings.push(RegisterMapping::holding(
            type_address as u16 + 1,
            scale_and_clamp(operation.position_mm, LENGTH_SCALE),
            format!("{}_Op{}_Pos", component.id, index),
            LENGTH_SCALE,
            operation.position_mm,
        ));
    }

    mappings.sort_by_key(|m| m.address);
    Ok(mappings)
}

/// Encode a whole frameset into register writes
///
/// Emits the two header mappings (`FramesetId`, `ComponentCount`), then for
/// each component in frameset order its full register block followed by one
/// `"<id>_Trigger"` mapping (value 1) at the trigger address. The combined
/// list is sorted by address ascending; same-address entries keep their
/// emission order, which is what sequences the per-component block writes.
pub fn map_frameset(frameset: &LsfFrameset) -> MapperResult<Vec<RegisterMapping>> {
    let mut mappings = vec![
        RegisterMapping::holding(
            FRAMESET_ID_ADDRESS,
            frameset.frameset_id,
            "FramesetId",
            1.0,
            frameset.frameset_id as f64,
        ),
        RegisterMapping::holding(
            COMPONENT_COUNT_ADDRESS,
            scale_and_clamp(frameset.components.len() as f64, 1.0),
            "ComponentCount",
            1.0,
            frameset.components.len() as f64,
        ),
    ];

    for component in &frameset.components {
        mappings.extend(map_component(component)?);
        mappings.push(RegisterMapping::holding(
            COMPONENT_TRIGGER_ADDRESS,
            1,
            format!("{}_Trigger", component.id),
            1.0,
            1.0,
        ));
    }

    mappings.sort_by_key(|m| m.address);
    debug!(
        "encoded frameset {} ({} components) as {} register writes",
        frameset.frameset_id,
        frameset.components.len(),
        mappings.len()
    );
    Ok(mappings)
}
