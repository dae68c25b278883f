//! Error types carrying the diagnostics of failed emission.
//!
//! Every fallible operation in this crate returns [`EmitError`].  The errors
//! fall into two groups: configuration errors (bad buffer/growth/alignment
//! values, detected at the call that introduces them) and encoding-range
//! errors (a branch the architecture cannot express, or a write the buffer
//! cannot hold).  None of them are recoverable in the sense of "retry the
//! same call": once an operation returns `Err`, the buffer contents past the
//! last fully committed instruction must not be treated as usable.

#[allow(unused_imports)]
use alloc::format;
use core::fmt;

use crate::branch::BranchClass;

/// Emission error with the violating numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmitError {
    /// Buffer capacity is not a multiple of the 4-byte word size.
    MisalignedCapacity {
        /// The offending capacity in bytes.
        size: usize,
    },

    /// Growth increment is zero or not a multiple of the word size.
    MisalignedGrowthIncrement {
        /// The offending increment in bytes.
        size: usize,
    },

    /// Alignment directive called with a boundary of zero.
    InvalidAlignment {
        /// The offending boundary in bytes.
        boundary: usize,
    },

    /// A write did not fit the reserved capacity and the buffer cannot grow
    /// (fixed-size mode, or caller-supplied storage).
    CapacityExceeded {
        /// Bytes the buffer would need to hold after the write.
        needed: usize,
        /// Bytes actually reserved.
        reserved: usize,
    },

    /// A direct branch targets an address that is not word-aligned.
    UnalignedBranchTarget {
        /// The offending target address.
        target: u32,
    },

    /// A label resolution produced a displacement that is not a multiple of
    /// the word size.
    UnalignedBranchDisplacement {
        /// The offending displacement in bytes.
        displacement: i64,
    },

    /// Neither the relative displacement nor the absolute target fits the
    /// branch's target field — the architecture cannot express the jump.
    BranchOutOfRange {
        /// The branch-class whose field width was exceeded.
        class: BranchClass,
        /// Displacement from the branch instruction to the target, in bytes.
        displacement: i64,
        /// The absolute target address.
        target: u32,
        /// Maximum representable magnitude for this class, in bytes.
        max: i64,
    },

    /// A patch address falls outside the emitted code — typically a stale
    /// label whose origin no longer matches the buffer.
    PatchOutOfBounds {
        /// The offending instruction address.
        address: u32,
    },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::MisalignedCapacity { size } => {
                write!(
                    f,
                    "buffer capacity {:#X} is not a multiple of the 4-byte word size",
                    size
                )
            }
            EmitError::MisalignedGrowthIncrement { size } => {
                write!(
                    f,
                    "growth increment {:#X} is zero or not a multiple of the 4-byte word size",
                    size
                )
            }
            EmitError::InvalidAlignment { boundary } => {
                write!(f, "cannot align to a {} byte boundary", boundary)
            }
            EmitError::CapacityExceeded { needed, reserved } => {
                write!(
                    f,
                    "code buffer exhausted: write needs {:#X} bytes but {:#X} are reserved",
                    needed, reserved
                )
            }
            EmitError::UnalignedBranchTarget { target } => {
                write!(f, "branch target {:#010X} is not word-aligned", target)
            }
            EmitError::UnalignedBranchDisplacement { displacement } => {
                write!(
                    f,
                    "branch displacement {:#X} bytes is not word-aligned",
                    displacement
                )
            }
            EmitError::BranchOutOfRange {
                class,
                displacement,
                target,
                max,
            } => {
                write!(
                    f,
                    "{} branch cannot reach {:#010X}: displacement {:#X} bytes exceeds ±{:#X}",
                    class, target, displacement, max
                )
            }
            EmitError::PatchOutOfBounds { address } => {
                write!(
                    f,
                    "patch address {:#010X} is outside the emitted code (stale label?)",
                    address
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exceeded_display() {
        let err = EmitError::CapacityExceeded {
            needed: 0x44,
            reserved: 0x40,
        };
        assert_eq!(
            format!("{}", err),
            "code buffer exhausted: write needs 0x44 bytes but 0x40 are reserved"
        );
    }

    #[test]
    fn misaligned_capacity_display() {
        let err = EmitError::MisalignedCapacity { size: 0x41 };
        assert_eq!(
            format!("{}", err),
            "buffer capacity 0x41 is not a multiple of the 4-byte word size"
        );
    }

    #[test]
    fn branch_out_of_range_display() {
        let err = EmitError::BranchOutOfRange {
            class: BranchClass::Cond14,
            displacement: 0x8000,
            target: 0x0010_8000,
            max: 0x7FFF,
        };
        assert_eq!(
            format!("{}", err),
            "14-bit conditional branch cannot reach 0x00108000: displacement 0x8000 bytes exceeds ±0x7FFF"
        );
    }

    #[test]
    fn invalid_alignment_display() {
        let err = EmitError::InvalidAlignment { boundary: 0 };
        assert_eq!(format!("{}", err), "cannot align to a 0 byte boundary");
    }

    #[test]
    fn patch_out_of_bounds_display() {
        let err = EmitError::PatchOutOfBounds { address: 0xDEAD_BEEC };
        assert_eq!(
            format!("{}", err),
            "patch address 0xDEADBEEC is outside the emitted code (stale label?)"
        );
    }
}
