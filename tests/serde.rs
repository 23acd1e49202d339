#![cfg(feature = "serde")]
//! Catalog dumps for external tooling.

use liftir::arch::REG_SP;
use liftir::{Catalog, Opcode};
use serde_json::json;

#[test]
fn descriptor_serializes_normalized_fields() {
    let value = serde_json::to_value(Opcode::Ldd.desc()).expect("serialize ldd");
    assert_eq!(value["name"], "ldd");
    assert_eq!(value["operands"], json!(["write", "read_reg", "read_imm"]));
    assert_eq!(value["size_operand"], 0);
    assert_eq!(value["memory"], json!({ "operand": 1, "write": false }));
    assert_eq!(value["operator"], serde_json::Value::Null);
}

#[test]
fn branch_targets_serialize_as_index_lists() {
    let value = serde_json::to_value(Opcode::Js.desc()).expect("serialize js");
    assert_eq!(value["virtual_targets"], json!([0, 1]));
    assert_eq!(value["native_targets"], json!([]));
}

#[test]
fn whole_catalog_dumps_in_order() {
    let entries = serde_json::to_value(Catalog::standard().entries()).expect("serialize catalog");
    let names: Vec<&str> = entries
        .as_array()
        .expect("array of descriptors")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert_eq!(names.len(), Opcode::ALL.len());
    assert_eq!(names.first(), Some(&"mov"));
    assert_eq!(names.last(), Some(&"vpinwm"));
}

#[test]
fn registers_serialize_with_identity_fields() {
    let value = serde_json::to_value(REG_SP).expect("serialize sp");
    assert_eq!(value["local_id"], 0);
    assert_eq!(value["bit_count"], 64);
    assert_eq!(value["bit_offset"], 0);
}
