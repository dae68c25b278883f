//! Gekko/Broadway paired-single SIMD and the AltiVec subset.
//!
//! The paired-single unit (IBM's GameCube/Wii vendor extension) reuses the
//! floating-point register file, treating each register as two packed
//! singles.  All of these live in primary opcode 4; the fused forms share
//! the scalar FPU's A-form quirk of putting the multiplier in the `frc`
//! slot.

use crate::emitter::{a_form, x_form, Emitter};
use crate::error::EmitError;
use crate::reg::{Cr, Fpr, Vr};

impl<'a> Emitter<'a> {
    /// Paired single absolute value.
    pub fn ps_abs(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_0210, dest.num(), 0, src.num(), rc))
    }

    /// Paired single add.
    pub fn ps_add(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_002A, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Paired single compare ordered high.
    pub fn ps_cmpo0(&mut self, dest: Cr, src1: Fpr, src2: Fpr) -> Result<(), EmitError> {
        self.word(0x1000_0040 | (dest.num() << 23) | (src1.num() << 16) | (src2.num() << 11))
    }

    /// Paired single compare ordered low.
    pub fn ps_cmpo1(&mut self, dest: Cr, src1: Fpr, src2: Fpr) -> Result<(), EmitError> {
        self.word(0x1000_00C0 | (dest.num() << 23) | (src1.num() << 16) | (src2.num() << 11))
    }

    /// Paired single compare unordered high.
    pub fn ps_cmpu0(&mut self, dest: Cr, src1: Fpr, src2: Fpr) -> Result<(), EmitError> {
        self.word(0x1000_0000 | (dest.num() << 23) | (src1.num() << 16) | (src2.num() << 11))
    }

    /// Paired single compare unordered low.
    pub fn ps_cmpu1(&mut self, dest: Cr, src1: Fpr, src2: Fpr) -> Result<(), EmitError> {
        self.word(0x1000_0080 | (dest.num() << 23) | (src1.num() << 16) | (src2.num() << 11))
    }

    /// Paired single divide.
    pub fn ps_div(&mut self, dest: Fpr, dividend: Fpr, divisor: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_0024,
            dest.num(),
            dividend.num(),
            divisor.num(),
            0,
            rc,
        ))
    }

    /// Paired single multiply-add: `dest = src1 * src2 + src3`.
    pub fn ps_madd(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_003A,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single multiply-add scalar high.
    pub fn ps_madds0(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_001C,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single multiply-add scalar low.
    pub fn ps_madds1(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_001E,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single merge high (`dest = {src1[0], src2[0]}`).
    pub fn ps_merge00(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_0420, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Paired single merge direct (`dest = {src1[0], src2[1]}`).
    pub fn ps_merge01(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_0460, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Paired single merge swapped (`dest = {src1[1], src2[0]}`).
    pub fn ps_merge10(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_04A0, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Paired single merge low (`dest = {src1[1], src2[1]}`).
    pub fn ps_merge11(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_04E0, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Paired single move register.
    pub fn ps_mr(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_0090, dest.num(), 0, src.num(), rc))
    }

    /// Paired single multiply-subtract: `dest = src1 * src2 − src3`.
    pub fn ps_msub(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_0038,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single multiply.
    pub fn ps_mul(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_0032, dest.num(), src1.num(), 0, src2.num(), rc))
    }

    /// Paired single multiply scalar high.
    pub fn ps_muls0(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_0018, dest.num(), src1.num(), 0, src2.num(), rc))
    }

    /// Paired single multiply scalar low.
    pub fn ps_muls1(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_001A, dest.num(), src1.num(), 0, src2.num(), rc))
    }

    /// Paired single negative absolute value.
    pub fn ps_nabs(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_0110, dest.num(), 0, src.num(), rc))
    }

    /// Paired single negate.
    pub fn ps_neg(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x1000_0050, dest.num(), 0, src.num(), rc))
    }

    /// Paired single negative multiply-add.
    pub fn ps_nmadd(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_003E,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single negative multiply-subtract.
    pub fn ps_nmsub(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_003C,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single reciprocal estimate.
    pub fn ps_res(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_0030, dest.num(), 0, src.num(), 0, rc))
    }

    /// Paired single reciprocal square root estimate.
    pub fn ps_rsqrte(&mut self, dest: Fpr, src: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_0034, dest.num(), 0, src.num(), 0, rc))
    }

    /// Paired single select.
    pub fn ps_sel(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_002E,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single subtract.
    pub fn ps_sub(&mut self, dest: Fpr, src1: Fpr, src2: Fpr, rc: bool) -> Result<(), EmitError> {
        self.word(a_form(0x1000_0028, dest.num(), src1.num(), src2.num(), 0, rc))
    }

    /// Paired single vector sum high.
    pub fn ps_sum0(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_0014,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    /// Paired single vector sum low.
    pub fn ps_sum1(
        &mut self,
        dest: Fpr,
        src1: Fpr,
        src2: Fpr,
        src3: Fpr,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(a_form(
            0x1000_0016,
            dest.num(),
            src1.num(),
            src3.num(),
            src2.num(),
            rc,
        ))
    }

    // ── AltiVec ─────────────────────────────────────────────────────────

    /// Data stream stop.
    pub fn dss(&mut self, stream: u8) -> Result<(), EmitError> {
        self.word(0x7C00_066C | (u32::from(stream) << 21))
    }

    /// Data stream stop all.
    pub fn dssall(&mut self) -> Result<(), EmitError> {
        self.word(0x7E00_066C)
    }

    /// Vector add floating-point.
    pub fn vaddfp(&mut self, dest: Vr, src1: Vr, src2: Vr) -> Result<(), EmitError> {
        self.word(0x1000_000A | (dest.num() << 21) | (src1.num() << 16) | (src2.num() << 11))
    }

    /// Vector subtract floating-point.
    pub fn vsubfp(&mut self, dest: Vr, src1: Vr, src2: Vr) -> Result<(), EmitError> {
        self.word(0x1000_004A | (dest.num() << 21) | (src1.num() << 16) | (src2.num() << 11))
    }
}
