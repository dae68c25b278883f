//! Serde round-trip tests for the public plain-data types.

#![cfg(feature = "serde")]

use ppc_emit::{BranchClass, Cond, Cr, EmitError, Emitter, Fpr, Gpr, GrowMode, Sr, Vr};

/// Helper: serialize to JSON, deserialize back, assert equality.
fn round_trip<T>(val: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + core::fmt::Debug,
{
    let json = serde_json::to_string(val).expect("serialize");
    let back: T = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(val, &back, "round-trip mismatch for JSON: {json}");
}

#[test]
fn serde_registers() {
    for r in [Gpr::R0, Gpr::SP, Gpr::R13, Gpr::R31] {
        round_trip(&r);
    }
    for f in [Fpr::F0, Fpr::FPARAM1, Fpr::F31] {
        round_trip(&f);
    }
    round_trip(&Cr::Cr6);
    round_trip(&Vr::V31);
    round_trip(&Sr::Sr15);
}

#[test]
fn serde_cond() {
    for c in [
        Cond::Lt,
        Cond::Gt,
        Cond::Eq,
        Cond::So,
        Cond::Ge,
        Cond::Le,
        Cond::Ne,
        Cond::Ns,
    ] {
        round_trip(&c);
    }
}

#[test]
fn serde_branch_class() {
    round_trip(&BranchClass::Cond14);
    round_trip(&BranchClass::Uncond24);
}

#[test]
fn serde_grow_mode() {
    round_trip(&GrowMode::FixedSize);
    round_trip(&GrowMode::AutoGrow);
}

#[test]
fn serde_label() {
    let mut asm = Emitter::new(16).unwrap();
    let label = asm.beq().unwrap();
    round_trip(&label);
}

#[test]
fn serde_errors() {
    round_trip(&EmitError::MisalignedCapacity { size: 0x41 });
    round_trip(&EmitError::CapacityExceeded {
        needed: 12,
        reserved: 8,
    });
    round_trip(&EmitError::BranchOutOfRange {
        class: BranchClass::Cond14,
        displacement: 0x8000,
        target: 0x8000,
        max: 0x7FFF,
    });
    round_trip(&EmitError::PatchOutOfBounds { address: 0x1000 });
}
