//! The instruction emitter and the integer/system opcode catalog.
//!
//! Every instruction is produced the same way: OR a fixed base pattern with
//! the operand fields shifted to their documented bit positions, then write
//! the resulting 32-bit word through the buffer.  The form helpers below
//! capture the field layouts shared across the catalog:
//!
//! ```text
//! D-form:  [opcode(6) | rt(5) | ra(5) |        imm(16)         ]
//! X-form:  [opcode(6) |  a(5) |  b(5) |  c(5) |  xo(10)  | Rc ]
//! A-form:  [opcode(6) | frt(5)| fra(5)| frb(5)| frc(5)| xo | Rc]
//! M-form:  [opcode(6) | rs(5) | ra(5) | sh(5) | mb(5)| me(5)| Rc]
//! ```
//!
//! Instructions with a record (`Rc`) bit take it as a trailing `bool`;
//! setting it makes the operation also update `cr0` (`cr1` for FPU forms).
//! Signed 16-bit immediates are packed as their two's-complement bit
//! pattern — no range check beyond what the parameter type enforces.

use alloc::vec::Vec;

use crate::buffer::{CodeBuffer, GrowMode};
use crate::error::EmitError;
use crate::reg::{Cr, Gpr, Sr};

// ── Form helpers ────────────────────────────────────────────────────────

/// Pack a D-form word: `base | rt<<21 | ra<<16 | imm`.
#[inline]
pub(crate) fn d_form(base: u32, rt: u32, ra: u32, imm: u16) -> u32 {
    base | (rt << 21) | (ra << 16) | u32::from(imm)
}

/// Pack an X/XO-form word: `base | a<<21 | b<<16 | c<<11 | Rc`.
#[inline]
pub(crate) fn x_form(base: u32, a: u32, b: u32, c: u32, rc: bool) -> u32 {
    base | (a << 21) | (b << 16) | (c << 11) | u32::from(rc)
}

/// Pack an A-form word: `base | frt<<21 | fra<<16 | frb<<11 | frc<<6 | Rc`.
#[inline]
pub(crate) fn a_form(base: u32, frt: u32, fra: u32, frb: u32, frc: u32, rc: bool) -> u32 {
    base | (frt << 21) | (fra << 16) | (frb << 11) | (frc << 6) | u32::from(rc)
}

/// Pack an M-form word: `base | rs<<21 | ra<<16 | sh<<11 | mb<<6 | me<<1 | Rc`.
#[inline]
pub(crate) fn m_form(base: u32, rs: u32, ra: u32, sh: u32, mb: u32, me: u32, rc: bool) -> u32 {
    base | (rs << 21) | (ra << 16) | ((sh & 31) << 11) | (mb << 6) | (me << 1) | u32::from(rc)
}

// ── Emitter ─────────────────────────────────────────────────────────────

/// Machine-code emitter for 32-bit PowerPC, including the Gekko/Broadway
/// paired-single extension.
///
/// An `Emitter` owns a [`CodeBuffer`] and exposes one method per operation.
/// Branch-emitting methods return a [`Label`](crate::Label) that is later
/// resolved with [`set_label`](Emitter::set_label); everything else appends
/// exactly the words it documents.
///
/// # Examples
///
/// ```
/// use ppc_emit::{Emitter, Gpr};
///
/// let mut asm = Emitter::new(64)?;
/// asm.li(Gpr::R3, 42)?;
/// asm.blr()?;
/// assert_eq!(asm.bytes(), [0x38, 0x60, 0x00, 0x2A, 0x4E, 0x80, 0x00, 0x20]);
/// # Ok::<(), ppc_emit::EmitError>(())
/// ```
#[derive(Debug)]
pub struct Emitter<'a> {
    buf: CodeBuffer<'a>,
}

impl Emitter<'static> {
    /// Create an emitter over a fixed-size owned buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// [`EmitError::MisalignedCapacity`] if `capacity` is not word-aligned.
    pub fn new(capacity: usize) -> Result<Self, EmitError> {
        Ok(Self {
            buf: CodeBuffer::new(capacity)?,
        })
    }

    /// Create an emitter over an auto-growing buffer seeded with `capacity`
    /// bytes.
    ///
    /// # Errors
    ///
    /// [`EmitError::MisalignedCapacity`] if `capacity` is not word-aligned.
    pub fn auto_grow(capacity: usize) -> Result<Self, EmitError> {
        Ok(Self {
            buf: CodeBuffer::auto_grow(capacity)?,
        })
    }
}

impl<'a> Emitter<'a> {
    /// Create an emitter writing into caller-supplied storage.  The storage
    /// is never freed or grown by the emitter.
    ///
    /// # Errors
    ///
    /// [`EmitError::MisalignedCapacity`] if the slice length is not
    /// word-aligned.
    pub fn with_storage(storage: &'a mut [u8]) -> Result<Self, EmitError> {
        Ok(Self {
            buf: CodeBuffer::with_storage(storage)?,
        })
    }

    /// Wrap an already-configured buffer.
    #[must_use]
    pub fn from_buffer(buf: CodeBuffer<'a>) -> Self {
        Self { buf }
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &CodeBuffer<'a> {
        &self.buf
    }

    /// The underlying buffer, mutably — for primitive writes the catalog
    /// does not cover.
    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut CodeBuffer<'a> {
        &mut self.buf
    }

    /// Consume the emitter and return its buffer.
    #[must_use]
    pub fn into_buffer(self) -> CodeBuffer<'a> {
        self.buf
    }

    /// Bytes emitted so far.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.size()
    }

    /// Whether nothing has been emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Virtual address of the next instruction to be emitted.
    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.buf.cursor()
    }

    /// Virtual address of the first emitted byte.
    #[must_use]
    pub fn origin(&self) -> u32 {
        self.buf.origin()
    }

    /// Set the virtual address of the first emitted byte.
    pub fn set_origin(&mut self, origin: u32) {
        self.buf.set_origin(origin);
    }

    /// Set the auto-grow increment of the underlying buffer.
    ///
    /// # Errors
    ///
    /// [`EmitError::MisalignedGrowthIncrement`] if `increment` is zero or
    /// not word-aligned.
    pub fn set_growth_increment(&mut self, increment: usize) -> Result<(), EmitError> {
        self.buf.set_growth_increment(increment)
    }

    /// The overflow policy of the underlying buffer.
    #[must_use]
    pub fn mode(&self) -> GrowMode {
        self.buf.mode()
    }

    /// The emitted bytes, base to cursor.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.buf.bytes()
    }

    /// Consume the emitter and return the emitted bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }

    /// Write the emitted bytes verbatim to `path`.
    ///
    /// # Errors
    ///
    /// Any I/O error from creating or writing the file.
    #[cfg(feature = "std")]
    pub fn dump<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        self.buf.dump(path)
    }

    /// Append one instruction word.
    #[inline]
    pub(crate) fn word(&mut self, word: u32) -> Result<(), EmitError> {
        self.buf.write32(word)
    }

    // ── Fixed words and moves ───────────────────────────────────────────

    /// All-zero word — an illegal instruction, useful as a debugging trap.
    pub fn ud(&mut self) -> Result<(), EmitError> {
        self.word(0)
    }

    /// No operation (`ori r0, r0, 0`).
    pub fn nop(&mut self) -> Result<(), EmitError> {
        self.ori(Gpr::R0, Gpr::R0, 0)
    }

    /// Move register (`or rd, rs, rs`).
    pub fn mr(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.or(dest, src, src, rc)
    }

    // ── Integer arithmetic ──────────────────────────────────────────────

    /// Add immediate.
    pub fn addi(&mut self, dest: Gpr, src: Gpr, imm: i16) -> Result<(), EmitError> {
        self.word(d_form(0x3800_0000, dest.num(), src.num(), imm as u16))
    }

    /// Add immediate shifted.
    pub fn addis(&mut self, dest: Gpr, src: Gpr, imm: i16) -> Result<(), EmitError> {
        self.word(d_form(0x3C00_0000, dest.num(), src.num(), imm as u16))
    }

    /// Add immediate carrying; with `rc` this is `addic.`, the only
    /// immediate add that updates `cr0`.
    pub fn addic(&mut self, dest: Gpr, src: Gpr, imm: i16, rc: bool) -> Result<(), EmitError> {
        let base = if rc { 0x3400_0000 } else { 0x3000_0000 };
        self.word(d_form(base, dest.num(), src.num(), imm as u16))
    }

    /// Add.
    pub fn add(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0214, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Add with overflow enable.
    pub fn addo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0614, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Add carrying.
    pub fn addc(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0014, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Add carrying with overflow enable.
    pub fn addco(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0414, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Add extended (with carry in).
    pub fn adde(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0114, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Add extended with overflow enable.
    pub fn addeo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0514, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Add to zero extended.
    pub fn addze(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0194, dest.num(), src.num(), 0, rc))
    }

    /// Add to zero extended with overflow enable.
    pub fn addzeo(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0594, dest.num(), src.num(), 0, rc))
    }

    /// Add to minus one extended.
    pub fn addme(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_01D4, dest.num(), src.num(), 0, rc))
    }

    /// Add to minus one extended with overflow enable.
    pub fn addmeo(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_05D4, dest.num(), src.num(), 0, rc))
    }

    /// Subtract from: `dest = src2 − src1`.
    pub fn subf(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0050, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Subtract with conventional operand order: `dest = src1 − src2`.
    pub fn sub(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.subf(dest, src2, src1, rc)
    }

    /// Subtract from with overflow enable.
    pub fn subfo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0450, dest.num(), src1.num(), src2.num(), rc))
    }

    /// `subfo` with conventional operand order.
    pub fn subo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.subfo(dest, src2, src1, rc)
    }

    /// Subtract from carrying.
    pub fn subfc(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0010, dest.num(), src1.num(), src2.num(), rc))
    }

    /// `subfc` with conventional operand order.
    pub fn subc(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.subfc(dest, src2, src1, rc)
    }

    /// Subtract from carrying with overflow enable.
    pub fn subfco(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0410, dest.num(), src1.num(), src2.num(), rc))
    }

    /// `subfco` with conventional operand order.
    pub fn subco(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.subfco(dest, src2, src1, rc)
    }

    /// Subtract from extended.
    pub fn subfe(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0110, dest.num(), src1.num(), src2.num(), rc))
    }

    /// `subfe` with conventional operand order.
    pub fn sube(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.subfe(dest, src2, src1, rc)
    }

    /// Subtract from extended with overflow enable.
    pub fn subfeo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0510, dest.num(), src1.num(), src2.num(), rc))
    }

    /// `subfeo` with conventional operand order.
    pub fn subeo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.subfeo(dest, src2, src1, rc)
    }

    /// Subtract from immediate carrying.
    pub fn subfic(&mut self, dest: Gpr, src: Gpr, imm: i16) -> Result<(), EmitError> {
        self.word(d_form(0x2000_0000, dest.num(), src.num(), imm as u16))
    }

    /// Subtract from minus one extended.
    pub fn subfme(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_01D0, dest.num(), src.num(), 0, rc))
    }

    /// Subtract from minus one extended with overflow enable.
    pub fn subfmeo(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_05D0, dest.num(), src.num(), 0, rc))
    }

    /// Subtract from zero extended.
    pub fn subfze(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0190, dest.num(), src.num(), 0, rc))
    }

    /// Subtract from zero extended with overflow enable.
    pub fn subfzeo(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0590, dest.num(), src.num(), 0, rc))
    }

    /// Negate.
    pub fn neg(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_00D0, dest.num(), src.num(), 0, rc))
    }

    /// Negate with overflow enable.
    pub fn nego(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_04D0, dest.num(), src.num(), 0, rc))
    }

    /// Multiply low immediate.
    pub fn mulli(&mut self, dest: Gpr, src: Gpr, imm: i16) -> Result<(), EmitError> {
        self.word(d_form(0x1C00_0000, dest.num(), src.num(), imm as u16))
    }

    /// Multiply low word.
    pub fn mullw(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_01D6, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Multiply low word with overflow enable.
    pub fn mullwo(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_05D6, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Multiply high word (signed).
    pub fn mulhw(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0096, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Multiply high word (unsigned).
    pub fn mulhwu(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0016, dest.num(), src1.num(), src2.num(), rc))
    }

    /// Divide word (signed).
    pub fn divw(&mut self, dest: Gpr, dividend: Gpr, divisor: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_03D6, dest.num(), dividend.num(), divisor.num(), rc))
    }

    /// Divide word (signed) with overflow enable.
    pub fn divwo(&mut self, dest: Gpr, dividend: Gpr, divisor: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_07D6, dest.num(), dividend.num(), divisor.num(), rc))
    }

    /// Divide word (unsigned).
    pub fn divwu(&mut self, dest: Gpr, dividend: Gpr, divisor: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0396, dest.num(), dividend.num(), divisor.num(), rc))
    }

    /// Divide word (unsigned) with overflow enable.
    pub fn divwuo(&mut self, dest: Gpr, dividend: Gpr, divisor: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0796, dest.num(), dividend.num(), divisor.num(), rc))
    }

    // ── Compares ────────────────────────────────────────────────────────

    /// Compare immediate (signed).
    pub fn cmpi(&mut self, dest: Cr, src: Gpr, imm: i16) -> Result<(), EmitError> {
        self.word(0x2C00_0000 | (dest.num() << 23) | (src.num() << 16) | u32::from(imm as u16))
    }

    /// Compare logical immediate (unsigned).
    pub fn cmpli(&mut self, dest: Cr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(0x2800_0000 | (dest.num() << 23) | (src.num() << 16) | u32::from(imm))
    }

    /// Compare (signed).
    pub fn cmp(&mut self, dest: Cr, src1: Gpr, src2: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0000 | (dest.num() << 23) | (src1.num() << 16) | (src2.num() << 11))
    }

    /// Compare logical (unsigned).
    pub fn cmpl(&mut self, dest: Cr, src1: Gpr, src2: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0040 | (dest.num() << 23) | (src1.num() << 16) | (src2.num() << 11))
    }

    // ── Logical ─────────────────────────────────────────────────────────

    /// AND.
    pub fn and(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0038, src1.num(), dest.num(), src2.num(), rc))
    }

    /// AND with complement.
    pub fn andc(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0078, src1.num(), dest.num(), src2.num(), rc))
    }

    /// NAND.
    pub fn nand(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_03B8, src1.num(), dest.num(), src2.num(), rc))
    }

    /// AND immediate — always updates `cr0` (there is no non-record form).
    pub fn andi(&mut self, dest: Gpr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(d_form(0x7000_0000, src.num(), dest.num(), imm))
    }

    /// AND immediate shifted — always updates `cr0`.
    pub fn andis(&mut self, dest: Gpr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(d_form(0x7400_0000, src.num(), dest.num(), imm))
    }

    /// OR.
    pub fn or(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0378, src1.num(), dest.num(), src2.num(), rc))
    }

    /// OR with complement.
    pub fn orc(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0338, src1.num(), dest.num(), src2.num(), rc))
    }

    /// NOR.
    pub fn nor(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_00F8, src1.num(), dest.num(), src2.num(), rc))
    }

    /// OR immediate.
    pub fn ori(&mut self, dest: Gpr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(d_form(0x6000_0000, src.num(), dest.num(), imm))
    }

    /// OR immediate shifted.
    pub fn oris(&mut self, dest: Gpr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(d_form(0x6400_0000, src.num(), dest.num(), imm))
    }

    /// XOR.
    pub fn xor(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0278, src1.num(), dest.num(), src2.num(), rc))
    }

    /// XOR immediate.
    pub fn xori(&mut self, dest: Gpr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(d_form(0x6800_0000, src.num(), dest.num(), imm))
    }

    /// XOR immediate shifted.
    pub fn xoris(&mut self, dest: Gpr, src: Gpr, imm: u16) -> Result<(), EmitError> {
        self.word(d_form(0x6C00_0000, src.num(), dest.num(), imm))
    }

    /// Equivalent (XNOR).
    pub fn eqv(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0238, src1.num(), dest.num(), src2.num(), rc))
    }

    // ── Shifts and rotates ──────────────────────────────────────────────

    /// Shift left word.
    pub fn slw(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0030, src1.num(), dest.num(), src2.num(), rc))
    }

    /// Shift right word.
    pub fn srw(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0430, src1.num(), dest.num(), src2.num(), rc))
    }

    /// Shift right algebraic word.
    pub fn sraw(&mut self, dest: Gpr, src1: Gpr, src2: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0630, src1.num(), dest.num(), src2.num(), rc))
    }

    /// Shift right algebraic word immediate.
    pub fn srawi(&mut self, dest: Gpr, src: Gpr, amount: u8, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0670, src.num(), dest.num(), u32::from(amount), rc))
    }

    /// Rotate left word immediate then AND with mask.
    ///
    /// The workhorse behind the `slwi`/`srwi`/`clrlwi`/… alias family: the
    /// source is rotated left by `shift`, then masked to bits `mb..=me`
    /// (big-endian bit numbering).
    pub fn rlwinm(
        &mut self,
        dest: Gpr,
        src: Gpr,
        shift: u8,
        mb: u8,
        me: u8,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(m_form(
            0x5400_0000,
            src.num(),
            dest.num(),
            u32::from(shift),
            u32::from(mb),
            u32::from(me),
            rc,
        ))
    }

    /// Rotate left word then AND with mask (register rotate amount).
    pub fn rlwnm(
        &mut self,
        dest: Gpr,
        src: Gpr,
        amount: Gpr,
        mb: u8,
        me: u8,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(m_form(
            0x5C00_0000,
            src.num(),
            dest.num(),
            amount.num(),
            u32::from(mb),
            u32::from(me),
            rc,
        ))
    }

    /// Rotate left word immediate then mask insert.
    pub fn rlwimi(
        &mut self,
        dest: Gpr,
        src: Gpr,
        shift: u8,
        mb: u8,
        me: u8,
        rc: bool,
    ) -> Result<(), EmitError> {
        self.word(m_form(
            0x5000_0000,
            src.num(),
            dest.num(),
            u32::from(shift),
            u32::from(mb),
            u32::from(me),
            rc,
        ))
    }

    /// Shift left word immediate (`rlwinm dest, src, n, 0, 31−n`).
    pub fn slwi(&mut self, dest: Gpr, src: Gpr, shift: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, shift, 0, 31 - shift, rc)
    }

    /// Shift right word immediate (`rlwinm dest, src, 32−n, n, 31`).
    pub fn srwi(&mut self, dest: Gpr, src: Gpr, shift: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, 32 - shift, shift, 31, rc)
    }

    /// Clear left `len` bits.
    pub fn clrlwi(&mut self, dest: Gpr, src: Gpr, len: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, 0, len, 31, rc)
    }

    /// Clear right `len` bits.
    pub fn clrrwi(&mut self, dest: Gpr, src: Gpr, len: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, 0, 0, 31 - len, rc)
    }

    /// Rotate left word immediate.
    pub fn rotlwi(&mut self, dest: Gpr, src: Gpr, amount: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, amount, 0, 31, rc)
    }

    /// Rotate right word immediate.
    pub fn rotrwi(&mut self, dest: Gpr, src: Gpr, amount: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, 32 - amount, 0, 31, rc)
    }

    /// Extract `n` bits starting at bit `b` and left-justify.
    pub fn extlwi(&mut self, dest: Gpr, src: Gpr, n: u8, b: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, b, 0, n - 1, rc)
    }

    /// Extract `n` bits starting at bit `b` and right-justify.
    pub fn extrwi(&mut self, dest: Gpr, src: Gpr, n: u8, b: u8, rc: bool) -> Result<(), EmitError> {
        self.rlwinm(dest, src, b + n, 32 - n, 31, rc)
    }

    /// Count leading zeros word.
    pub fn cntlzw(&mut self, dest: Gpr, src: Gpr, rc: bool) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0034, src.num(), dest.num(), 0, rc))
    }

    // ── Loads and stores ────────────────────────────────────────────────

    /// Store byte.
    pub fn stb(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x9800_0000, src.num(), base.num(), offset as u16))
    }

    /// Store byte indexed.
    pub fn stbx(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_01AE, src.num(), index.num(), base.num(), false))
    }

    /// Store byte with update (writeback).
    pub fn stbu(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x9C00_0000, src.num(), base.num(), offset as u16))
    }

    /// Store byte with update indexed.
    pub fn stbux(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_01EE, src.num(), index.num(), base.num(), false))
    }

    /// Store halfword.
    pub fn sth(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xB000_0000, src.num(), base.num(), offset as u16))
    }

    /// Store halfword indexed.
    pub fn sthx(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_032E, src.num(), index.num(), base.num(), false))
    }

    /// Store halfword with update (writeback).
    pub fn sthu(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xB400_0000, src.num(), base.num(), offset as u16))
    }

    /// Store halfword with update indexed.
    pub fn sthux(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_036E, src.num(), index.num(), base.num(), false))
    }

    /// Store halfword byte-reverse indexed.
    pub fn sthbrx(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_072C, src.num(), index.num(), base.num(), false))
    }

    /// Store word.
    pub fn stw(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x9000_0000, src.num(), base.num(), offset as u16))
    }

    /// Store word indexed.
    pub fn stwx(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_012E, src.num(), index.num(), base.num(), false))
    }

    /// Store word with update (writeback).
    pub fn stwu(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x9400_0000, src.num(), base.num(), offset as u16))
    }

    /// Store word with update indexed.
    pub fn stwux(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_016E, src.num(), index.num(), base.num(), false))
    }

    /// Store word byte-reverse indexed.
    pub fn stwbrx(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_052C, src.num(), index.num(), base.num(), false))
    }

    /// Store word conditional indexed (always records to `cr0`).
    pub fn stwcx(&mut self, src: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_012D, src.num(), index.num(), base.num(), false))
    }

    /// Load byte and zero.
    pub fn lbz(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x8800_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load byte and zero indexed.
    pub fn lbzx(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_00AE, dest.num(), index.num(), base.num(), false))
    }

    /// Load byte and zero with update (writeback).
    pub fn lbzu(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x8C00_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load byte and zero with update indexed.
    pub fn lbzux(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_00EE, dest.num(), index.num(), base.num(), false))
    }

    /// Load halfword and zero.
    pub fn lhz(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xA000_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load halfword and zero indexed.
    pub fn lhzx(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_022E, dest.num(), index.num(), base.num(), false))
    }

    /// Load halfword and zero with update (writeback).
    pub fn lhzu(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xA400_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load halfword and zero with update indexed.
    pub fn lhzux(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_026E, dest.num(), index.num(), base.num(), false))
    }

    /// Load halfword algebraic (sign-extending).
    pub fn lha(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xA800_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load halfword algebraic with update (writeback).
    pub fn lhau(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xAC00_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load halfword algebraic indexed.
    pub fn lhax(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_02AE, dest.num(), index.num(), base.num(), false))
    }

    /// Load halfword algebraic with update indexed.
    pub fn lhaux(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_02EE, dest.num(), index.num(), base.num(), false))
    }

    /// Load halfword byte-reverse indexed.
    pub fn lhbrx(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_062C, dest.num(), index.num(), base.num(), false))
    }

    /// Load word and zero.
    pub fn lwz(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x8000_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load word and zero indexed.
    pub fn lwzx(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_002E, dest.num(), index.num(), base.num(), false))
    }

    /// Load word and zero with update (writeback).
    pub fn lwzu(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0x8400_0000, dest.num(), base.num(), offset as u16))
    }

    /// Load word and zero with update indexed.
    pub fn lwzux(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_006E, dest.num(), index.num(), base.num(), false))
    }

    /// Load word and reserve indexed.
    pub fn lwarx(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_0028, dest.num(), index.num(), base.num(), false))
    }

    /// Load word byte-reverse indexed.
    pub fn lwbrx(&mut self, dest: Gpr, index: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_042C, dest.num(), index.num(), base.num(), false))
    }

    /// Load multiple words into `dest..r31`.
    pub fn lmw(&mut self, dest: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xB800_0000, dest.num(), base.num(), offset as u16))
    }

    /// Store multiple words from `src..r31`.
    pub fn stmw(&mut self, src: Gpr, base: Gpr, offset: i16) -> Result<(), EmitError> {
        self.word(d_form(0xBC00_0000, src.num(), base.num(), offset as u16))
    }

    // ── Condition-register bit logic ────────────────────────────────────

    /// Condition register AND.
    pub fn crand(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0202,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register AND with complement.
    pub fn crandc(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0102,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register equivalent (XNOR).
    pub fn creqv(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0242,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register NAND.
    pub fn crnand(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_01C2,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register NOR.
    pub fn crnor(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0042,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register OR.
    pub fn cror(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0382,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register OR with complement.
    pub fn crorc(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0342,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    /// Condition register XOR.
    pub fn crxor(&mut self, dest_bit: u8, src1_bit: u8, src2_bit: u8) -> Result<(), EmitError> {
        self.word(x_form(
            0x4C00_0182,
            u32::from(dest_bit),
            u32::from(src1_bit),
            u32::from(src2_bit),
            false,
        ))
    }

    // ── Special-purpose register plumbing ───────────────────────────────

    /// Move to condition register fields under `mask`.
    pub fn mtcrf(&mut self, mask: u8, src: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0120 | (src.num() << 21) | (u32::from(mask) << 12))
    }

    /// Move to condition register (all fields).
    pub fn mtcr(&mut self, src: Gpr) -> Result<(), EmitError> {
        self.mtcrf(0xFF, src)
    }

    /// Move from condition register.
    pub fn mfcr(&mut self, dest: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0026 | (dest.num() << 21))
    }

    /// Move to segment register.
    pub fn mtsr(&mut self, dest: Sr, src: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_01A4 | (src.num() << 21) | (dest.num() << 16))
    }

    /// Move from segment register.
    pub fn mfsr(&mut self, dest: Gpr, src: Sr) -> Result<(), EmitError> {
        self.word(0x7C00_04A6 | (dest.num() << 21) | (src.num() << 16))
    }

    /// Move to segment register indirect.
    pub fn mtsrin(&mut self, src: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_01E4 | (src.num() << 21) | (base.num() << 11))
    }

    /// Move from segment register indirect.
    pub fn mfsrin(&mut self, dest: Gpr, base: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0526 | (dest.num() << 21) | (base.num() << 11))
    }

    /// Move from machine state register.
    pub fn mfmsr(&mut self, dest: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_00A6 | (dest.num() << 21))
    }

    /// Move to machine state register.
    pub fn mtmsr(&mut self, src: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0124 | (src.num() << 21))
    }

    /// Move to count register.
    pub fn mtctr(&mut self, src: Gpr) -> Result<(), EmitError> {
        self.word(0x7C09_03A6 | (src.num() << 21))
    }

    /// Move from count register.
    pub fn mfctr(&mut self, dest: Gpr) -> Result<(), EmitError> {
        self.word(0x7C09_02A6 | (dest.num() << 21))
    }

    /// Move from link register.
    pub fn mflr(&mut self, dest: Gpr) -> Result<(), EmitError> {
        self.word(0x7C08_02A6 | (dest.num() << 21))
    }

    /// Move to link register.
    pub fn mtlr(&mut self, src: Gpr) -> Result<(), EmitError> {
        self.word(0x7C08_03A6 | (src.num() << 21))
    }

    // ── Cache, TLB, and synchronization ─────────────────────────────────

    /// Instruction cache block invalidate.
    pub fn icbi(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_07AC, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block flush.
    pub fn dcbf(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_00AC, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block invalidate.
    pub fn dcbi(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_03AC, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block store.
    pub fn dcbst(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_006C, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block touch.
    pub fn dcbt(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_022C, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block touch for store.
    pub fn dcbtst(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_01EC, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block clear to zero.
    pub fn dcbz(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x7C00_07EC, 0, ra.num(), rb.num(), false))
    }

    /// Data cache block clear to zero, locked cache (Gekko/Broadway).
    pub fn dcbz_l(&mut self, ra: Gpr, rb: Gpr) -> Result<(), EmitError> {
        self.word(x_form(0x1000_07EC, 0, ra.num(), rb.num(), false))
    }

    /// TLB invalidate entry.
    pub fn tlbie(&mut self, base: Gpr) -> Result<(), EmitError> {
        self.word(0x7C00_0264 | (base.num() << 11))
    }

    /// TLB synchronize.
    pub fn tlbsync(&mut self) -> Result<(), EmitError> {
        self.word(0x7C00_046C)
    }

    /// Enforce in-order execution of I/O.
    pub fn eieio(&mut self) -> Result<(), EmitError> {
        self.word(0x7C00_06AC)
    }

    /// Instruction synchronize.
    pub fn isync(&mut self) -> Result<(), EmitError> {
        self.word(0x4C00_012C)
    }

    /// Synchronize.
    pub fn sync(&mut self) -> Result<(), EmitError> {
        self.word(0x7C00_04AC)
    }

    /// Return from interrupt.
    pub fn rfi(&mut self) -> Result<(), EmitError> {
        self.word(0x4C00_0064)
    }

    /// System call.
    pub fn sc(&mut self) -> Result<(), EmitError> {
        self.word(0x4400_0002)
    }

    // ── Composite loads ─────────────────────────────────────────────────

    /// Load signed 16-bit immediate (`addi dest, r0, imm`).
    pub fn li(&mut self, dest: Gpr, imm: i16) -> Result<(), EmitError> {
        self.addi(dest, Gpr::R0, imm)
    }

    /// Load shifted immediate into the upper halfword (`addis dest, r0, imm`).
    pub fn lis(&mut self, dest: Gpr, imm: u16) -> Result<(), EmitError> {
        self.addis(dest, Gpr::R0, imm as i16)
    }

    /// Load unsigned 16-bit immediate: one `li` when the value fits the
    /// positive signed range, else `li 0` + `ori`.
    pub fn liu(&mut self, dest: Gpr, imm: u16) -> Result<(), EmitError> {
        if imm < 0x8000 {
            self.li(dest, imm as i16)
        } else {
            self.li(dest, 0)?;
            self.ori(dest, dest, imm)
        }
    }

    /// Load a full 32-bit immediate using the shortest correct sequence.
    ///
    /// Three cases, in order: a single `li` when the value sign-extends
    /// from 16 bits (covers small negatives whose top halfword is all
    /// ones); a single `lis` when the low halfword is zero; otherwise
    /// `lis` + `ori`.  Skipping the `ori` in the last case would leave the
    /// low halfword zeroed, so the case split is load-bearing.
    pub fn liw(&mut self, dest: Gpr, imm: u32) -> Result<(), EmitError> {
        if imm <= 0x7FFF || imm >= 0xFFFF_8000 {
            self.li(dest, imm as i16)
        } else if imm & 0xFFFF == 0 {
            self.lis(dest, (imm >> 16) as u16)
        } else {
            self.lis(dest, (imm >> 16) as u16)?;
            self.ori(dest, dest, imm as u16)
        }
    }

    /// Set `dest` to 1 if `src` is zero, else 0.
    ///
    /// `cntlzw` yields 32 exactly when the source is zero, so bit 5 of the
    /// count is the answer; shift it down to the LSB.
    pub fn setz(&mut self, dest: Gpr, src: Gpr) -> Result<(), EmitError> {
        self.cntlzw(dest, src, false)?;
        self.srwi(dest, dest, 5, false)
    }
}
