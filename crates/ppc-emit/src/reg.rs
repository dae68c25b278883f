//! Register files and condition codes of the 32-bit PowerPC target.
//!
//! These are pure data: each enum maps one-to-one onto the 5-bit (4-bit for
//! segment registers, 3-bit for condition fields) register numbers used in
//! instruction encodings.  The EABI aliases (`SP`, `TOC`, `PARAM1`…) are
//! associated constants so call sites can say what they mean.

use core::fmt;

/// General-purpose registers `r0`–`r31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Gpr {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    /// Reserved by the ABI — not restored across system calls.
    R13,
    R14,
    R15,
    R16,
    R17,
    R18,
    R19,
    R20,
    R21,
    R22,
    R23,
    R24,
    R25,
    R26,
    R27,
    R28,
    R29,
    R30,
    R31,
}

impl Gpr {
    /// `r0` — reads as zero in address computations.
    pub const ZERO: Gpr = Gpr::R0;
    /// `r1` — stack pointer.
    pub const SP: Gpr = Gpr::R1;
    /// `r2` — table-of-contents register.
    pub const TOC: Gpr = Gpr::R2;
    /// `r3` — first integer parameter and return value.
    pub const PARAM1: Gpr = Gpr::R3;
    /// `r4` — second integer parameter.
    pub const PARAM2: Gpr = Gpr::R4;
    /// `r5` — third integer parameter.
    pub const PARAM3: Gpr = Gpr::R5;
    /// `r6` — fourth integer parameter.
    pub const PARAM4: Gpr = Gpr::R6;
    /// `r7` — fifth integer parameter.
    pub const PARAM5: Gpr = Gpr::R7;
    /// `r8` — sixth integer parameter.
    pub const PARAM6: Gpr = Gpr::R8;
    /// `r9` — seventh integer parameter.
    pub const PARAM7: Gpr = Gpr::R9;
    /// `r10` — eighth integer parameter.
    pub const PARAM8: Gpr = Gpr::R10;
    /// `r11` — environment pointer / calls via pointer.
    pub const EP: Gpr = Gpr::R11;

    /// The 5-bit register number.
    #[must_use]
    pub fn num(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.num())
    }
}

/// Floating-point registers `f0`–`f31`.
///
/// On Gekko/Broadway each of these doubles as a paired-single register; the
/// paired-single instructions take the same operand type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Fpr {
    F0,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    F25,
    F26,
    F27,
    F28,
    F29,
    F30,
    F31,
}

impl Fpr {
    /// `f1` — first floating-point parameter and scalar return value.
    pub const FPARAM1: Fpr = Fpr::F1;
    /// `f2` — second floating-point parameter.
    pub const FPARAM2: Fpr = Fpr::F2;
    /// `f3` — third floating-point parameter.
    pub const FPARAM3: Fpr = Fpr::F3;
    /// `f4` — fourth floating-point parameter.
    pub const FPARAM4: Fpr = Fpr::F4;
    /// `f5` — fifth floating-point parameter.
    pub const FPARAM5: Fpr = Fpr::F5;
    /// `f6` — sixth floating-point parameter.
    pub const FPARAM6: Fpr = Fpr::F6;
    /// `f7` — seventh floating-point parameter.
    pub const FPARAM7: Fpr = Fpr::F7;
    /// `f8` — eighth floating-point parameter.
    pub const FPARAM8: Fpr = Fpr::F8;

    /// The 5-bit register number.
    #[must_use]
    pub fn num(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Fpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.num())
    }
}

/// Condition register fields `cr0`–`cr7`.
///
/// `cr0` is implicitly targeted by the record (`Rc`) forms of integer
/// instructions, `cr1` by the record forms of FPU instructions; `cr6` is
/// used by some AltiVec compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Cr {
    Cr0,
    Cr1,
    Cr2,
    Cr3,
    Cr4,
    Cr5,
    Cr6,
    Cr7,
}

impl Cr {
    /// The 3-bit field number.
    #[must_use]
    pub fn num(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Cr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cr{}", self.num())
    }
}

/// AltiVec vector registers `v0`–`v31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Vr {
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    V10,
    V11,
    V12,
    V13,
    V14,
    V15,
    V16,
    V17,
    V18,
    V19,
    V20,
    V21,
    V22,
    V23,
    V24,
    V25,
    V26,
    V27,
    V28,
    V29,
    V30,
    V31,
}

impl Vr {
    /// The 5-bit register number.
    #[must_use]
    pub fn num(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Vr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.num())
    }
}

/// Segment registers `sr0`–`sr15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Sr {
    Sr0,
    Sr1,
    Sr2,
    Sr3,
    Sr4,
    Sr5,
    Sr6,
    Sr7,
    Sr8,
    Sr9,
    Sr10,
    Sr11,
    Sr12,
    Sr13,
    Sr14,
    Sr15,
}

impl Sr {
    /// The 4-bit register number.
    #[must_use]
    pub fn num(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Sr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sr{}", self.num())
    }
}

/// Branch conditions on a condition-register field.
///
/// The encoding exploits the CR bit layout: conditions 0–3 (`Lt`, `Gt`,
/// `Eq`, `So`) branch when the corresponding bit is set, conditions 4–7
/// (`Ge`, `Le`, `Ne`, `Ns`) branch when the same bit (`cond & 3`) is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Cond {
    /// Less than.
    Lt = 0,
    /// Greater than.
    Gt,
    /// Equal.
    Eq,
    /// Summary overflow set.
    So,
    /// Greater than or equal.
    Ge,
    /// Less than or equal.
    Le,
    /// Not equal.
    Ne,
    /// Summary overflow clear.
    Ns,
}

impl Cond {
    /// Whether the tested CR bit must be set (true) or clear (false).
    #[must_use]
    pub fn tests_set_bit(self) -> bool {
        (self as u32) <= 3
    }

    /// The CR bit index within the field (0 = LT, 1 = GT, 2 = EQ, 3 = SO).
    #[must_use]
    pub fn bit(self) -> u32 {
        (self as u32) & 3
    }
}
