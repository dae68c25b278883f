//! Scalar floating-point catalog.
//!
//! Double-precision compute lives in primary opcode 63 (`0xFC00_0000`), the
//! single-precision forms in opcode 59 (`0xEC00_0000`).  The fused
//! multiply-add family uses the A-form layout with the *multiplier* in the
//! `frc` slot at bit 6 — the operand order of the methods matches the
//! mnemonic semantics (`dest = src1 * src2 ± src3`), not the field order.
//! The `rc` bit on FPU instructions records into `cr1`.

use crate::emitter::{a_form, x_form, Emitter};
use crate::error::EmitError;
use crate::reg::{Fpr, Gpr};

impl<'a> Emitter<'a> {
    /// Load floating-point single.
    pub fn lfs(&mut self, dest: Fpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(0xC000_0000 | (dest.num() << 21) | (base.num() << 16) | u32::from(offset as u16))
    }

    /// Load floating-point double.
    pub fn lfd(&mut self, dest: Fpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(0xC800_0000 | (dest.num() << 21) | (base.num() << 16) | u32::from(offset as u16))
    }

    /// Store floating-point single.
    pub fn stfs(&mut self, src: Fpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(0xD000_0000 | (src.num() << 21) | (base.num() << 16) | u32::from(offset as u16))
    }

    /// Store floating-point double.
    pub fn stfd(&mut self, src: Fpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(0xD800_0000 | (src.num() << 21) | (base.num() << 16) | u32::from(offset as u16))
    }

    /// Floating move register.
    pub fn fmr(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0xFC00_0090, dest.num(), 0, src.num(), rc))
    }

    /// Floating absolute value.
    pub fn fabs(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0xFC00_0210, dest.num(), 0, src.num(), rc))
    }

    /// Floating negate.
    pub fn fneg(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0xFC00_0050, dest.num(), 0, src.num(), rc))
    }

    /// Floating negative absolute value.
    pub fn fnabs(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0xFC00_0110, dest.num(), 0, src.num(), rc))
    }

    /// Floating add (double).
    pub fn fadd(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xFC00_002A, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Floating add single.
    pub fn fadds(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xEC00_002A, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Floating subtract (double).
    pub fn fsub(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xFC00_0028, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Floating subtract single.
    pub fn fsubs(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xEC00_0028, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Floating multiply (double) — the multiplier sits in the `frc` slot.
    pub fn fmul(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xFC00_0032, dest.num(), src1.num(), 0, src2.num(), rc))
    }

    /// Floating multiply single.
    pub fn fmuls(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xEC00_0032, dest.num(), src1.num(), 0, src2.num(), rc))
    }

    /// Floating divide (double).
    pub fn fdiv(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xFC00_0024, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Floating divide single.
    pub fn fdivs(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xEC00_0024, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Floating multiply-add (double): `dest = src1 * src2 + src3`.
    pub fn fmadd(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xFC00_003A,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating multiply-add single.
    pub fn fmadds(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xEC00_003A,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating multiply-subtract (double): `dest = src1 * src2 − src3`.
    pub fn fmsub(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xFC00_0038,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating multiply-subtract single.
    pub fn fmsubs(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xEC00_0038,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating negative multiply-add (double): `dest = −(src1 * src2 + src3)`.
    pub fn fnmadd(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xFC00_003E,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating negative multiply-add single.
    pub fn fnmadds(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xEC00_003E,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating negative multiply-subtract (double): `dest = −(src1 * src2 − src3)`.
    pub fn fnmsub(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xFC00_003C,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating negative multiply-subtract single.
    pub fn fnmsubs(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xEC00_003C,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Floating reciprocal estimate single.
    pub fn fres(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xEC00_0030, dest.num(), 0, src.num(), 0, rc))
    }

    /// Floating round to single.
    pub fn frsp(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0xFC00_0018, dest.num(), 0, src.num(), rc))
    }

    /// Floating reciprocal square root estimate.
    pub fn frsqrte(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0xFC00_0034, dest.num(), 0, src.num(), 0, rc))
    }

    /// Floating select: `dest = if src1 >= 0 { src2 } else { src3 }`.
    pub fn fsel(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0xFC00_002E,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }
}
