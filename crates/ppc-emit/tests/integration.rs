//! End-to-end scenarios: whole code sequences emitted, resolved, and
//! checked against literal expected machine words.

use ppc_emit::{Cr, EmitError, Emitter, Fpr, Gpr, GrowMode};

/// Decode the emitted stream back into big-endian words.
fn words(asm: &Emitter<'_>) -> Vec<u32> {
    asm.bytes()
        .chunks(4)
        .map(|c| u32::from_be_bytes(c.try_into().unwrap()))
        .collect()
}

#[test]
fn forward_branch_scenario() {
    // {bne L; filler; L:} — the first word's displacement field, added to
    // the first word's address, must reach the instruction after the
    // filler.
    let mut asm = Emitter::new(64).unwrap();
    let l = asm.bne().unwrap();
    asm.nop().unwrap();
    asm.set_label(l).unwrap();
    asm.li(Gpr::R3, 0).unwrap();

    let code = words(&asm);
    assert_eq!(code[0], 0x4082_0008);

    // Recompute the target from the encoded field.
    let disp = (code[0] & 0xFFFC) as i64;
    assert_eq!(disp, 8);
    assert_eq!(code[1], 0x6000_0000);
    assert_eq!(code[2], 0x3860_0000);
}

#[test]
fn if_else_shape() {
    // if (r3 == 0) { r4 = 1 } else { r4 = 2 }
    let mut asm = Emitter::new(64).unwrap();
    asm.cmpi(Cr::Cr0, Gpr::R3, 0).unwrap();
    let else_ = asm.bne().unwrap();
    asm.li(Gpr::R4, 1).unwrap();
    let end = asm.b().unwrap();
    asm.set_label(else_).unwrap();
    asm.li(Gpr::R4, 2).unwrap();
    asm.set_label(end).unwrap();
    asm.blr().unwrap();

    assert_eq!(
        words(&asm),
        vec![
            0x2C03_0000, // cmpwi r3, 0
            0x4082_000C, // bne +12
            0x3880_0001, // li r4, 1
            0x4800_0008, // b +8
            0x3880_0002, // li r4, 2
            0x4E80_0020, // blr
        ]
    );
}

#[test]
fn leaf_function_with_loop() {
    // Sum r4 words starting at r5 into r3, then return.
    let mut asm = Emitter::new(256).unwrap();
    asm.li(Gpr::R3, 0).unwrap();
    asm.addi(Gpr::R5, Gpr::R5, -4).unwrap();
    asm.counted_loop(Gpr::R4, 4, |asm| {
        asm.lwzu(Gpr::R6, Gpr::R5, 4)?;
        asm.add(Gpr::R3, Gpr::R3, Gpr::R6, false)
    })
    .unwrap();
    asm.blr().unwrap();

    assert_eq!(
        words(&asm),
        vec![
            0x3860_0000, // li r3, 0
            0x38A5_FFFC, // addi r5, r5, -4
            0x3880_0004, // li r4, 4
            0x84C5_0004, // lwzu r6, 4(r5)
            0x7C63_3214, // add r3, r3, r6
            0x3484_FFFF, // addic. r4, r4, -1
            0x4082_FFF4, // bne -12
            0x4E80_0020, // blr
        ]
    );
}

#[test]
fn code_and_data_interleave() {
    let mut asm = Emitter::new(64).unwrap();
    asm.blr().unwrap();
    asm.ds("ok").unwrap();
    asm.align(4).unwrap();
    asm.dw(0xDEAD_BEEF).unwrap();

    assert_eq!(
        asm.bytes(),
        [
            0x4E, 0x80, 0x00, 0x20, // blr
            b'o', b'k', 0x00, // "ok\0"
            0x00, // alignment pad
            0xDE, 0xAD, 0xBE, 0xEF,
        ]
    );
}

#[test]
fn origin_affects_branch_math() {
    let mut asm = Emitter::new(64).unwrap();
    asm.set_origin(0x0180_0000);
    let l = asm.b().unwrap();
    asm.nop().unwrap();
    asm.set_label(l).unwrap();
    // Displacement is still 8 — relative encodings don't see the origin.
    assert_eq!(words(&asm)[0], 0x4800_0008);
}

#[test]
fn growth_preserves_long_streams() {
    // Write a pseudo-random byte stream across several growth boundaries
    // and read it back unchanged.
    let mut asm = Emitter::auto_grow(64).unwrap();
    asm.set_growth_increment(64).unwrap();
    assert_eq!(asm.mode(), GrowMode::AutoGrow);

    let mut state = 0x1234_5678u32;
    let mut expected = Vec::new();
    for _ in 0..1000 {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let byte = (state >> 24) as u8;
        expected.push(byte);
        asm.db(byte).unwrap();
    }
    assert_eq!(asm.size(), 1000);
    assert_eq!(asm.bytes(), expected.as_slice());
}

#[test]
fn fixed_buffer_reports_overflow_with_sizes() {
    let mut asm = Emitter::new(8).unwrap();
    asm.nop().unwrap();
    asm.nop().unwrap();
    let err = asm.nop().unwrap_err();
    assert_eq!(
        err,
        EmitError::CapacityExceeded {
            needed: 12,
            reserved: 8
        }
    );
}

#[test]
fn caller_supplied_storage_roundtrip() {
    let mut backing = [0u8; 16];
    {
        let mut asm = Emitter::with_storage(&mut backing).unwrap();
        asm.li(Gpr::R3, 7).unwrap();
        asm.blr().unwrap();
        assert_eq!(asm.size(), 8);
    }
    assert_eq!(
        &backing[..8],
        [0x38, 0x60, 0x00, 0x07, 0x4E, 0x80, 0x00, 0x20]
    );
}

#[test]
fn paired_single_kernel() {
    // A small dot-product step in paired singles.
    let mut asm = Emitter::new(64).unwrap();
    asm.ps_mul(Fpr::F4, Fpr::F1, Fpr::F2, false).unwrap();
    asm.ps_sum0(Fpr::F3, Fpr::F4, Fpr::F3, Fpr::F4, false).unwrap();
    asm.blr().unwrap();

    let code = words(&asm);
    assert_eq!(code[0], 0x1081_00B2);
    assert_eq!(code[1], 0x1064_20D4);
    assert_eq!(code[2], 0x4E80_0020);
}

#[test]
fn determinism_across_emitters() {
    let build = || {
        let mut asm = Emitter::new(256).unwrap();
        asm.liw(Gpr::R3, 0xCAFE_BABE).unwrap();
        asm.counted_loop(Gpr::R4, 3, |asm| asm.add(Gpr::R3, Gpr::R3, Gpr::R3, false))
            .unwrap();
        asm.blr().unwrap();
        asm.into_bytes()
    };
    assert_eq!(build(), build());
}

#[cfg(feature = "std")]
#[test]
fn dump_writes_bytes_verbatim() {
    let mut asm = Emitter::new(16).unwrap();
    asm.li(Gpr::R3, 1).unwrap();
    asm.blr().unwrap();

    let path = std::env::temp_dir().join("ppc_emit_dump_test.bin");
    asm.dump(&path).unwrap();
    let read_back = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(read_back, asm.bytes());
}
