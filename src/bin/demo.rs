/// Rollform Modbus Demo
///
/// This program demonstrates basic usage of the rollform_modbus mapping
/// engine: loading a JSON mapping configuration, encoding a few machine
/// instructions, and encoding a small frameset.

use std::sync::Arc;

use rollform_modbus::{
    map_frameset, CommandCategory, Instruction, InstructionEncoder, LabelOrientation,
    LsfComponent, LsfFrameset, LsfOperation, MappingConfiguration, OperationKind, RegisterMapping,
};

const DEMO_CONFIG: &str = r#"{
    "axes": {
        "X": { "address": 100, "scaleFactor": 1000.0, "unit": "mm", "description": "Cross slide" },
        "Y": { "address": 101, "scaleFactor": 1000.0, "unit": "mm", "description": "Saddle" },
        "Z": { "address": 102, "scaleFactor": 1000.0, "unit": "mm", "description": "Quill" }
    },
    "commands": {
        "GCommand": { "address": 1 },
        "MCommand": { "address": 2 }
    },
    "parameters": {
        "FeedRate": { "address": 110, "scaleFactor": 10.0 },
        "SpindleSpeed": { "address": 111 },
        "ToolNumber": { "address": 112 }
    },
    "digitalOutputs": {
        "CoolantFlood": { "address": 300, "triggerCode": 8, "triggerValue": true, "description": "Flood coolant pump" },
        "CoolantMist": { "address": 301, "triggerCode": 7, "triggerValue": true, "description": "Mist coolant valve" },
        "SpindleEnable": { "address": 310, "triggerCode": 3, "triggerValue": true, "description": "Spindle contactor" },
        "SpindleDirection": { "address": 311, "triggerCode": 0, "triggerValue": false, "description": "CW/CCW relay" }
    },
    "validationRules": {
        "position": { "min": 0.0, "max": 3000.0, "clampNegativeToZero": true },
        "feedRate": { "min": 1.0, "max": 5000.0 },
        "spindleSpeed": { "min": 0.0, "max": 24000.0, "clampNegativeToZero": true },
        "toolNumber": { "min": 1.0, "max": 24.0 }
    }
}"#;

fn print_mappings(title: &str, mappings: &[RegisterMapping]) {
    println!("\n📋 {}", title);
    for mapping in mappings {
        println!("  {}", mapping);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("🏭 Rollform Modbus Demo");
    println!("=======================");
    println!("{}", rollform_modbus::info());

    let config = Arc::new(MappingConfiguration::from_json(DEMO_CONFIG)?);
    let encoder = InstructionEncoder::new(config);
    println!("Resolved {} axes from configuration", encoder.axes().len());

    // A rapid move with feed rate.
    let g01 = Instruction::new(CommandCategory::Motion, Some(1))
        .with_parameter('X', 100.5)
        .with_parameter('Y', 200.25)
        .with_parameter('Z', 50.0)
        .with_parameter('F', 1500.0);
    print_mappings(&format!("{}", g01), &encoder.encode(&g01));

    // Spindle on clockwise at 1200 rpm, then coolant on and off again.
    let m3 = Instruction::new(CommandCategory::Machine, Some(3)).with_parameter('S', 1200.0);
    print_mappings(&format!("{}", m3), &encoder.encode(&m3));

    let m8 = Instruction::new(CommandCategory::Machine, Some(8));
    print_mappings(&format!("{}", m8), &encoder.encode(&m8));

    let m9 = Instruction::new(CommandCategory::Machine, Some(9));
    print_mappings(&format!("{}", m9), &encoder.encode(&m9));

    // A small frameset with two components.
    let frameset = LsfFrameset {
        unit: "U12".into(),
        profile: "C89".into(),
        profile_description: "89mm C-section".into(),
        frameset_id: 42,
        frameset_name: "Garage wall A".into(),
        location: "North elevation".into(),
        components: vec![
            LsfComponent {
                id: "H1".into(),
                label_orientation: LabelOrientation::Normal,
                quantity: 2,
                length_mm: 600.0,
                operations: vec![
                    LsfOperation::new(OperationKind::Swage, 19.5),
                    LsfOperation::new(OperationKind::LipCut, 300.0),
                ],
            },
            LsfComponent {
                id: "S1".into(),
                label_orientation: LabelOrientation::Inverted,
                quantity: 1,
                length_mm: 450.0,
                operations: vec![LsfOperation::new(OperationKind::EndTruss, 0.0)],
            },
        ],
    };
    print_mappings(
        &format!("Frameset {} ({})", frameset.frameset_id, frameset.frameset_name),
        &map_frameset(&frameset)?,
    );

    println!("\n✅ Demo complete");
    Ok(())
}
