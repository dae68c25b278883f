//! Branch emission, labels, and displacement patching.
//!
//! A branch whose target is not yet known is emitted with a zeroed
//! displacement field, and the emitter hands back a [`Label`] recording the
//! instruction's address and its branch class.  Resolving the label
//! ([`Emitter::set_label`]) rewrites only the displacement/absolute-bit
//! sub-field of the already-written word; opcode, condition bits, and the
//! link bit survive untouched.
//!
//! Resolution prefers the **relative** encoding — it is position-independent
//! and survives relocating the whole buffer.  If the displacement does not
//! fit the field but the absolute target address does, the absolute form is
//! used as a correctness fallback; callers generating position-independent
//! code should treat that fallback firing as a red flag.  If neither fits,
//! the architecture cannot express the jump and resolution fails.
//!
//! A label can be resolved at most once: [`Emitter::set_label`] consumes it.

use crate::emitter::Emitter;
use crate::error::EmitError;
use crate::reg::Cond;

/// Maximum relative displacement of a 14-bit conditional branch, in bytes.
pub const REL14_MAX: i64 = 0x7FFF;
/// Minimum relative displacement of a 14-bit conditional branch, in bytes.
pub const REL14_MIN: i64 = -0x8000;
/// Maximum absolute target of a 14-bit conditional branch (as a signed
/// 32-bit address).  Numerically equal to [`REL14_MAX`], but deliberately a
/// separate constant: the relative test bounds a displacement, this bounds
/// an address, and the two must not drift together silently if the field
/// layout ever changes.
pub const ABS14_MAX: i64 = 0x7FFF;
/// Minimum absolute target of a 14-bit conditional branch.
pub const ABS14_MIN: i64 = -0x8000;

/// Maximum relative displacement of a 24-bit unconditional branch, in bytes.
pub const REL24_MAX: i64 = 0x1FF_FFFF;
/// Minimum relative displacement of a 24-bit unconditional branch, in bytes.
pub const REL24_MIN: i64 = -0x200_0000;
/// Maximum absolute target of a 24-bit unconditional branch.  Separate from
/// [`REL24_MAX`] for the same reason as [`ABS14_MAX`].
pub const ABS24_MAX: i64 = 0x1FF_FFFF;
/// Minimum absolute target of a 24-bit unconditional branch.
pub const ABS24_MIN: i64 = -0x200_0000;

/// The target-field family of a branch instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchClass {
    /// Conditional branch with a 14-bit word-displacement field (±2¹⁵
    /// bytes).
    Cond14,
    /// Unconditional branch with a 24-bit word-displacement field (±2²⁵
    /// bytes).
    Uncond24,
}

impl core::fmt::Display for BranchClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BranchClass::Cond14 => write!(f, "14-bit conditional"),
            BranchClass::Uncond24 => write!(f, "24-bit unconditional"),
        }
    }
}

/// An unresolved branch: the address of one emitted branch instruction and
/// the class that decides how its target field is patched.
///
/// A label does not borrow the buffer; it only names an instruction slot by
/// its virtual address.  It is consumed by [`Emitter::set_label`] /
/// [`Emitter::set_label_to`], so a branch cannot be re-patched.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "an unresolved branch encodes a zero displacement; close it with set_label"]
pub struct Label {
    address: u32,
    class: BranchClass,
}

impl Label {
    pub(crate) fn new(address: u32, class: BranchClass) -> Self {
        Self { address, class }
    }

    /// The virtual address of the branch instruction this label patches.
    #[must_use]
    pub fn address(&self) -> u32 {
        self.address
    }

    /// The branch class deciding the field layout of the patch.
    #[must_use]
    pub fn class(&self) -> BranchClass {
        self.class
    }
}

impl<'a> Emitter<'a> {
    // ── Register-indirect branches (no target field to patch) ───────────

    /// Branch to link register.
    pub fn blr(&mut self) -> Result<(), EmitError> {
        self.word(0x4E80_0020)
    }

    /// Branch to count register.
    pub fn bctr(&mut self) -> Result<(), EmitError> {
        self.word(0x4E80_0420)
    }

    /// Branch to count register and link.
    pub fn bctrl(&mut self) -> Result<(), EmitError> {
        self.word(0x4E80_0421)
    }

    // ── Label-producing branches ────────────────────────────────────────

    /// Capture the cursor, emit `word`, and hand back the label.
    fn emit_branch(&mut self, word: u32, class: BranchClass) -> Result<Label, EmitError> {
        let address = self.cursor();
        self.word(word)?;
        Ok(Label::new(address, class))
    }

    /// Unconditional branch to a label.
    pub fn b(&mut self) -> Result<Label, EmitError> {
        self.emit_branch(0x4800_0000, BranchClass::Uncond24)
    }

    /// Unconditional branch-and-link to a label.
    pub fn bl(&mut self) -> Result<Label, EmitError> {
        self.emit_branch(0x4800_0001, BranchClass::Uncond24)
    }

    /// Conditional branch on `cond` in `cr0`, optionally linking.
    ///
    /// All the named conditional emitters (`beq`, `bne`, …) funnel through
    /// here.
    pub fn bc(&mut self, cond: Cond, link: bool) -> Result<Label, EmitError> {
        let word = 0x4080_0000
            | (u32::from(cond.tests_set_bit()) << 24)
            | (cond.bit() << 16)
            | u32::from(link);
        self.emit_branch(word, BranchClass::Cond14)
    }

    /// Branch if equal.
    pub fn beq(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Eq, false)
    }

    /// Branch if not equal.
    pub fn bne(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Ne, false)
    }

    /// Branch if less than.
    pub fn blt(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Lt, false)
    }

    /// Branch if greater than or equal.
    pub fn bge(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Ge, false)
    }

    /// Branch if less than or equal.
    pub fn ble(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Le, false)
    }

    /// Branch if greater than.
    pub fn bgt(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Gt, false)
    }

    /// Branch if summary overflow.
    pub fn bso(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::So, false)
    }

    /// Branch if not summary overflow.
    pub fn bns(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Ns, false)
    }

    /// Branch if equal and link.
    pub fn beql(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Eq, true)
    }

    /// Branch if not equal and link.
    pub fn bnel(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Ne, true)
    }

    /// Branch if less than and link.
    pub fn bltl(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Lt, true)
    }

    /// Branch if greater than or equal and link.
    pub fn bgel(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Ge, true)
    }

    /// Branch if less than or equal and link.
    pub fn blel(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Le, true)
    }

    /// Branch if greater than and link.
    pub fn bgtl(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Gt, true)
    }

    /// Branch if summary overflow and link.
    pub fn bsol(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::So, true)
    }

    /// Branch if not summary overflow and link.
    pub fn bnsl(&mut self) -> Result<Label, EmitError> {
        self.bc(Cond::Ns, true)
    }

    // ── Direct-address branches ─────────────────────────────────────────

    /// Unconditional branch to a target known at emission time.
    pub fn b_to(&mut self, target: u32) -> Result<(), EmitError> {
        self.branch24_to(target, false)
    }

    /// Unconditional branch-and-link to a target known at emission time.
    pub fn bl_to(&mut self, target: u32) -> Result<(), EmitError> {
        self.branch24_to(target, true)
    }

    /// The immediate counterpart of resolving an `Uncond24` label: the same
    /// relative-first/absolute-fallback tiering, applied at emission time.
    fn branch24_to(&mut self, target: u32, link: bool) -> Result<(), EmitError> {
        if target % 4 != 0 {
            return Err(EmitError::UnalignedBranchTarget { target });
        }
        let cia = self.cursor();
        let disp = i64::from(target) - i64::from(cia);
        let target_signed = i64::from(target as i32);

        if (REL24_MIN..=REL24_MAX).contains(&disp) {
            self.word(0x4800_0000 | (disp as u32 & 0x3FF_FFFC) | u32::from(link))
        } else if (ABS24_MIN..=ABS24_MAX).contains(&target_signed) {
            self.word(0x4800_0000 | (target & 0x3FF_FFFC) | 2 | u32::from(link))
        } else {
            Err(EmitError::BranchOutOfRange {
                class: BranchClass::Uncond24,
                displacement: disp,
                target,
                max: REL24_MAX,
            })
        }
    }

    // ── Label resolution ────────────────────────────────────────────────

    /// Resolve `label` to the current cursor — the way forward branches are
    /// closed.
    pub fn set_label(&mut self, label: Label) -> Result<(), EmitError> {
        let here = self.cursor();
        self.set_label_to(label, here)
    }

    /// Resolve `label` to an explicit target address.
    ///
    /// # Errors
    ///
    /// [`EmitError::UnalignedBranchDisplacement`] if the displacement is not
    /// a multiple of 4; [`EmitError::BranchOutOfRange`] if neither the
    /// relative nor the absolute encoding can express the jump;
    /// [`EmitError::PatchOutOfBounds`] if the label does not point into the
    /// emitted code.
    pub fn set_label_to(&mut self, label: Label, target: u32) -> Result<(), EmitError> {
        let disp = i64::from(target) - i64::from(label.address());
        if disp % 4 != 0 {
            return Err(EmitError::UnalignedBranchDisplacement { displacement: disp });
        }
        let target_signed = i64::from(target as i32);

        match label.class() {
            BranchClass::Cond14 => {
                if (REL14_MIN..=REL14_MAX).contains(&disp) {
                    self.buffer_mut()
                        .patch_word32(label.address(), |w| (w & !0xFFFE) | (disp as u32 & 0xFFFC))
                } else if (ABS14_MIN..=ABS14_MAX).contains(&target_signed) {
                    self.buffer_mut()
                        .patch_word32(label.address(), |w| (w & !0xFFFE) | (target & 0xFFFC) | 2)
                } else {
                    Err(EmitError::BranchOutOfRange {
                        class: BranchClass::Cond14,
                        displacement: disp,
                        target,
                        max: REL14_MAX,
                    })
                }
            }
            BranchClass::Uncond24 => {
                if (REL24_MIN..=REL24_MAX).contains(&disp) {
                    self.buffer_mut().patch_word32(label.address(), |w| {
                        (w & !0x3FF_FFFE) | (disp as u32 & 0x3FF_FFFC)
                    })
                } else if (ABS24_MIN..=ABS24_MAX).contains(&target_signed) {
                    self.buffer_mut().patch_word32(label.address(), |w| {
                        (w & !0x3FF_FFFE) | (target & 0x3FF_FFFC) | 2
                    })
                } else {
                    Err(EmitError::BranchOutOfRange {
                        class: BranchClass::Uncond24,
                        displacement: disp,
                        target,
                        max: REL24_MAX,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_at(asm: &Emitter<'_>, index: usize) -> u32 {
        let off = index * 4;
        let bytes: [u8; 4] = asm.bytes()[off..off + 4].try_into().unwrap();
        u32::from_be_bytes(bytes)
    }

    #[test]
    fn register_indirect_branches() {
        let mut asm = Emitter::new(16).unwrap();
        asm.blr().unwrap();
        asm.bctr().unwrap();
        asm.bctrl().unwrap();
        assert_eq!(word_at(&asm, 0), 0x4E80_0020);
        assert_eq!(word_at(&asm, 1), 0x4E80_0420);
        assert_eq!(word_at(&asm, 2), 0x4E80_0421);
    }

    #[test]
    fn conditional_placeholders() {
        let mut asm = Emitter::new(64).unwrap();
        let labels = [
            asm.beq().unwrap(),
            asm.bne().unwrap(),
            asm.blt().unwrap(),
            asm.bge().unwrap(),
        ];
        assert_eq!(word_at(&asm, 0), 0x4182_0000);
        assert_eq!(word_at(&asm, 1), 0x4082_0000);
        assert_eq!(word_at(&asm, 2), 0x4180_0000);
        assert_eq!(word_at(&asm, 3), 0x4080_0000);
        for (i, label) in labels.into_iter().enumerate() {
            assert_eq!(label.address(), (i * 4) as u32);
            assert_eq!(label.class(), BranchClass::Cond14);
        }
    }

    #[test]
    fn link_bit_on_conditionals() {
        let mut asm = Emitter::new(16).unwrap();
        let _ = asm.beql().unwrap();
        let _ = asm.bnel().unwrap();
        assert_eq!(word_at(&asm, 0), 0x4182_0001);
        assert_eq!(word_at(&asm, 1), 0x4082_0001);
    }

    #[test]
    fn forward_conditional_resolves_relative() {
        let mut asm = Emitter::new(32).unwrap();
        let skip = asm.bne().unwrap();
        asm.nop().unwrap();
        asm.set_label(skip).unwrap();
        // Displacement from the branch to here is 8 bytes.
        assert_eq!(word_at(&asm, 0), 0x4082_0008);
    }

    #[test]
    fn forward_unconditional_resolves_relative() {
        let mut asm = Emitter::new(32).unwrap();
        let end = asm.b().unwrap();
        asm.nop().unwrap();
        asm.nop().unwrap();
        asm.set_label(end).unwrap();
        assert_eq!(word_at(&asm, 0), 0x4800_000C);
    }

    #[test]
    fn backward_branch_encodes_negative_displacement() {
        let mut asm = Emitter::new(32).unwrap();
        let top = asm.cursor();
        asm.nop().unwrap();
        asm.nop().unwrap();
        let back = asm.b().unwrap();
        asm.set_label_to(back, top).unwrap();
        assert_eq!(word_at(&asm, 2), 0x4BFF_FFF8); // b -8
    }

    #[test]
    fn patch_preserves_opcode_condition_and_link_bits() {
        let mut asm = Emitter::new(32).unwrap();
        let call = asm.bnel().unwrap();
        asm.nop().unwrap();
        asm.set_label(call).unwrap();
        // LK bit and condition field intact, displacement filled in.
        assert_eq!(word_at(&asm, 0), 0x4082_0009);
    }

    #[test]
    fn cond14_relative_boundary() {
        // Largest word-aligned displacement inside the signed 16-bit range.
        let mut asm = Emitter::auto_grow(0x9000).unwrap();
        let l = asm.bne().unwrap();
        asm.set_label_to(l, 0x7FFC).unwrap();
        assert_eq!(word_at(&asm, 0), 0x4082_7FFC);
    }

    #[test]
    fn cond14_just_past_relative_range_is_fatal_when_absolute_misses() {
        // disp = 0x8000 no longer fits the relative field, and the target
        // address itself is outside the absolute range too.
        let mut asm = Emitter::new(16).unwrap();
        let l = asm.bne().unwrap();
        let err = asm.set_label_to(l, 0x8000).unwrap_err();
        assert_eq!(
            err,
            EmitError::BranchOutOfRange {
                class: BranchClass::Cond14,
                displacement: 0x8000,
                target: 0x8000,
                max: REL14_MAX,
            }
        );
    }

    #[test]
    fn cond14_absolute_fallback_for_high_memory_target() {
        // A target in the top 32 KiB of the address space is negative as a
        // signed 32-bit value, so the absolute form can still encode it
        // even though the displacement overflows the relative field.
        let mut asm = Emitter::new(16).unwrap();
        asm.set_origin(0xFFFF_0000);
        let l = asm.bne().unwrap();
        asm.set_label_to(l, 0xFFFF_8000).unwrap();
        // Absolute bit set, low bits of the target in the field.
        assert_eq!(word_at(&asm, 0), 0x4082_8002);
    }

    #[test]
    fn uncond24_absolute_fallback_for_low_target() {
        let mut asm = Emitter::new(16).unwrap();
        asm.set_origin(0xFE00_0000);
        let l = asm.b().unwrap();
        asm.set_label_to(l, 0x0100_0000).unwrap();
        assert_eq!(word_at(&asm, 0), 0x4900_0002);
    }

    #[test]
    fn uncond24_out_of_range_is_fatal() {
        let mut asm = Emitter::new(16).unwrap();
        asm.set_origin(0x8000_0000);
        let l = asm.b().unwrap();
        let err = asm.set_label_to(l, 0x0400_0000).unwrap_err();
        assert!(matches!(
            err,
            EmitError::BranchOutOfRange {
                class: BranchClass::Uncond24,
                ..
            }
        ));
    }

    #[test]
    fn unaligned_displacement_is_rejected() {
        let mut asm = Emitter::new(16).unwrap();
        let l = asm.bne().unwrap();
        assert_eq!(
            asm.set_label_to(l, 0x0000_0006).unwrap_err(),
            EmitError::UnalignedBranchDisplacement { displacement: 6 }
        );
    }

    #[test]
    fn direct_branch_relative() {
        let mut asm = Emitter::new(16).unwrap();
        asm.b_to(0x100).unwrap();
        asm.bl_to(0x100).unwrap();
        assert_eq!(word_at(&asm, 0), 0x4800_0100);
        assert_eq!(word_at(&asm, 1), 0x4800_00FD); // disp 0xFC, LK set
    }

    #[test]
    fn direct_branch_backward() {
        let mut asm = Emitter::new(16).unwrap();
        asm.nop().unwrap();
        asm.nop().unwrap();
        asm.b_to(0).unwrap();
        assert_eq!(word_at(&asm, 2), 0x4BFF_FFF8);
    }

    #[test]
    fn direct_branch_rejects_unaligned_target() {
        let mut asm = Emitter::new(16).unwrap();
        assert_eq!(
            asm.b_to(0x102).unwrap_err(),
            EmitError::UnalignedBranchTarget { target: 0x102 }
        );
    }

    #[test]
    fn direct_branch_absolute_fallback() {
        let mut asm = Emitter::new(16).unwrap();
        asm.set_origin(0xFE00_0000);
        asm.b_to(0x0004_0000).unwrap();
        assert_eq!(word_at(&asm, 0), 0x4804_0002);
    }

    #[test]
    fn direct_branch_out_of_range() {
        let mut asm = Emitter::new(16).unwrap();
        asm.set_origin(0x8000_0000);
        let err = asm.b_to(0x0400_0000).unwrap_err();
        assert!(matches!(
            err,
            EmitError::BranchOutOfRange {
                class: BranchClass::Uncond24,
                ..
            }
        ));
    }

    #[test]
    fn stale_label_is_caught_by_bounds_check() {
        let mut asm = Emitter::new(32).unwrap();
        let l = asm.b().unwrap();
        // Rebasing the buffer after capturing a label leaves the label in
        // the old address space; the patch must fail, not corrupt memory.
        asm.set_origin(0x100);
        let err = asm.set_label(l).unwrap_err();
        assert!(matches!(err, EmitError::PatchOutOfBounds { .. }));
    }

    #[test]
    fn labels_survive_buffer_growth() {
        let mut asm = Emitter::auto_grow(8).unwrap();
        asm.set_growth_increment(8).unwrap();
        let skip = asm.bne().unwrap();
        for _ in 0..6 {
            asm.nop().unwrap();
        }
        asm.set_label(skip).unwrap();
        assert_eq!(word_at(&asm, 0), 0x4082_001C);
    }
}
