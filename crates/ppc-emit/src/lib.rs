//! # ppc-emit — Pure Rust PowerPC Machine-Code Emitter
//!
//! `ppc-emit` is a pure Rust, zero-C-dependency runtime emitter for 32-bit
//! PowerPC machine code, including the IBM Gekko/Broadway paired-single
//! SIMD extension found in the GameCube and Wii CPUs.  Code is built
//! programmatically, one instruction per method call, into an in-memory
//! buffer suitable for JIT execution or binary dumping.
//!
//! ## Quick Start
//!
//! ```rust
//! use ppc_emit::{Emitter, Gpr};
//!
//! // r3 = r3 * 2 + 1, then return
//! let mut asm = Emitter::new(64)?;
//! asm.slwi(Gpr::R3, Gpr::R3, 1, false)?;
//! asm.addi(Gpr::R3, Gpr::R3, 1)?;
//! asm.blr()?;
//! let code = asm.into_bytes();
//! # Ok::<(), ppc_emit::EmitError>(())
//! ```
//!
//! ## Features
//!
//! - **Pure Rust** — no C/C++ FFI, no LLVM, no system assembler at runtime.
//! - **Forward labels** — branch emitters return a [`Label`] resolved later
//!   with [`Emitter::set_label`]; relative encodings are preferred, with an
//!   absolute fallback for targets the displacement field cannot reach.
//! - **Fixed or auto-growing buffers** — including caller-supplied storage.
//! - **Directives** — alignment, raw data, compile-time-unrolled `repeat`,
//!   and a counted-loop helper.
//! - **`no_std` + `alloc`** — embeddable in loaders, kernels, homebrew.
//!
//! ## Error policy
//!
//! Every fallible operation returns `Result<_, EmitError>` and nothing is
//! silently truncated: a branch that cannot be encoded is an error, never a
//! wrong displacement.  After an `Err` the buffer past the last fully
//! committed instruction must be considered garbage — there is no repair
//! path, by design.  Multi-instruction composites (e.g. [`Emitter::liw`],
//! [`Emitter::counted_loop`]) may have committed a prefix when they fail.
//!
//! ## Addresses and growth
//!
//! All label and branch arithmetic happens in a virtual address space
//! starting at the buffer's [origin](Emitter::set_origin) (default 0), so
//! labels stay valid when an auto-growing buffer reallocates.  Raw views
//! obtained from [`Emitter::bytes`] do *not* survive growth — re-borrow
//! after emitting.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// A machine-code emitter is wall-to-wall deliberate narrowing casts
// (i16→u16 immediates, i64→u32 displacement fields) and dense hex literals
// (0x7C000214, 0x3FFFFFC).  The lints below are expected and acceptable in
// this context.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::similar_names,
    clippy::many_single_char_names,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]

extern crate alloc;

/// Branch emission, labels, and displacement patching.
pub mod branch;
/// The growable word buffer and primitive writer.
pub mod buffer;
/// Alignment, data, repeat, and loop directives.
pub mod directive;
/// The emitter and the integer/system opcode catalog.
pub mod emitter;
/// Error types carrying the diagnostics of failed emission.
pub mod error;
/// Scalar floating-point opcode catalog.
pub mod fpu;
/// Gekko/Broadway paired-single SIMD and the AltiVec subset.
pub mod ps;
/// Register files and condition codes.
pub mod reg;

// Re-exports
pub use branch::{BranchClass, Label};
pub use buffer::{CodeBuffer, GrowMode, DEFAULT_GROWTH_INCREMENT};
pub use emitter::Emitter;
pub use error::EmitError;
pub use reg::{Cond, Cr, Fpr, Gpr, Sr, Vr};
