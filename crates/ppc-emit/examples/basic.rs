//! Basic emission example — builds a small PPC32 function and prints it.
//!
//! Run with: `cargo run --example basic`

use ppc_emit::{Cr, Emitter, Gpr};

fn main() {
    println!("=== ppc_emit basic example ===\n");

    // --- A leaf function: r3 = sum of r4 words at r5 ---
    println!("1. Counted loop (sum r4 words starting at r5):");
    let mut asm = Emitter::new(256).unwrap();
    asm.li(Gpr::R3, 0).unwrap();
    asm.addi(Gpr::R5, Gpr::R5, -4).unwrap();
    asm.counted_loop(Gpr::R4, 8, |asm| {
        asm.lwzu(Gpr::R6, Gpr::R5, 4)?;
        asm.add(Gpr::R3, Gpr::R3, Gpr::R6, false)
    })
    .unwrap();
    asm.blr().unwrap();
    print_words(&asm);

    // --- Forward branches ---
    println!("\n2. Forward branch (if r3 == 0 then r4 = 1 else r4 = 2):");
    let mut asm = Emitter::new(64).unwrap();
    asm.cmpi(Cr::Cr0, Gpr::R3, 0).unwrap();
    let else_ = asm.bne().unwrap();
    asm.li(Gpr::R4, 1).unwrap();
    let end = asm.b().unwrap();
    asm.set_label(else_).unwrap();
    asm.li(Gpr::R4, 2).unwrap();
    asm.set_label(end).unwrap();
    asm.blr().unwrap();
    print_words(&asm);

    // --- Composite immediate loads ---
    println!("\n3. Shortest-form 32-bit immediate loads:");
    let mut asm = Emitter::new(64).unwrap();
    asm.liw(Gpr::R3, 42).unwrap(); // one li
    asm.liw(Gpr::R4, 0x0001_0000).unwrap(); // one lis
    asm.liw(Gpr::R5, 0xDEAD_BEEF).unwrap(); // lis + ori
    print_words(&asm);

    // --- Data directives ---
    println!("\n4. Interleaved data:");
    let mut asm = Emitter::new(64).unwrap();
    asm.blr().unwrap();
    asm.ds("Hello, ppc_emit!").unwrap();
    asm.align(4).unwrap();
    asm.dw(0xDEAD_BEEF).unwrap();
    print_hex(asm.bytes());

    println!("\n=== Done! ===");
}

fn print_words(asm: &Emitter<'_>) {
    for (i, chunk) in asm.bytes().chunks(4).enumerate() {
        let word = u32::from_be_bytes(chunk.try_into().unwrap());
        println!("   {:08X}: {:08X}", asm.origin() as usize + i * 4, word);
    }
}

fn print_hex(bytes: &[u8]) {
    for (i, b) in bytes.iter().enumerate() {
        if i % 16 == 0 {
            if i > 0 {
                println!();
            }
            print!("   ");
        }
        print!("{:02X} ", b);
    }
    println!();
}
