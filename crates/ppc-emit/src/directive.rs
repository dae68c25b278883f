//! Buffer-relative directives: alignment padding, raw data emission,
//! compile-time-unrolled repetition, and the counted runtime loop.
//!
//! Data directives write verbatim in target byte order and imply no
//! alignment; interleaving them with instructions can leave the cursor
//! unaligned until an explicit [`align`](Emitter::align).

use crate::emitter::Emitter;
use crate::error::EmitError;
use crate::reg::Gpr;

impl<'a> Emitter<'a> {
    // ── Alignment ───────────────────────────────────────────────────────

    /// Pad with zero bytes until the cursor is a multiple of `boundary`.
    ///
    /// A boundary of 1 is a no-op, and an already-aligned cursor emits
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`EmitError::InvalidAlignment`] for a boundary of 0.
    pub fn align(&mut self, boundary: usize) -> Result<(), EmitError> {
        if boundary == 1 {
            return Ok(());
        }
        if boundary == 0 {
            return Err(EmitError::InvalidAlignment { boundary });
        }
        let remainder = self.cursor() as usize % boundary;
        if remainder != 0 {
            for _ in 0..boundary - remainder {
                self.buffer_mut().write8(0)?;
            }
        }
        Ok(())
    }

    // ── Raw data ────────────────────────────────────────────────────────

    /// Data byte.
    pub fn db(&mut self, value: u8) -> Result<(), EmitError> {
        self.buffer_mut().write8(value)
    }

    /// Data halfword.
    pub fn dh(&mut self, value: u16) -> Result<(), EmitError> {
        self.buffer_mut().write16(value)
    }

    /// Data word.
    pub fn dw(&mut self, value: u32) -> Result<(), EmitError> {
        self.buffer_mut().write32(value)
    }

    /// Data doubleword.
    pub fn dd(&mut self, value: u64) -> Result<(), EmitError> {
        self.buffer_mut().write64(value)
    }

    /// Data single-precision float.
    pub fn df32(&mut self, value: f32) -> Result<(), EmitError> {
        self.buffer_mut().write_f32(value)
    }

    /// Data double-precision float.
    pub fn df64(&mut self, value: f64) -> Result<(), EmitError> {
        self.buffer_mut().write_f64(value)
    }

    /// Data byte array.
    pub fn db_all(&mut self, values: &[u8]) -> Result<(), EmitError> {
        self.buffer_mut().write_bytes(values)
    }

    /// Data halfword array.
    pub fn dh_all(&mut self, values: &[u16]) -> Result<(), EmitError> {
        for &value in values {
            self.dh(value)?;
        }
        Ok(())
    }

    /// Data word array.
    pub fn dw_all(&mut self, values: &[u32]) -> Result<(), EmitError> {
        for &value in values {
            self.dw(value)?;
        }
        Ok(())
    }

    /// Data doubleword array.
    pub fn dd_all(&mut self, values: &[u64]) -> Result<(), EmitError> {
        for &value in values {
            self.dd(value)?;
        }
        Ok(())
    }

    /// Data float array.
    pub fn df32_all(&mut self, values: &[f32]) -> Result<(), EmitError> {
        for &value in values {
            self.df32(value)?;
        }
        Ok(())
    }

    /// Data double array.
    pub fn df64_all(&mut self, values: &[f64]) -> Result<(), EmitError> {
        for &value in values {
            self.df64(value)?;
        }
        Ok(())
    }

    /// Data string: the bytes of `text` followed by a terminating NUL.
    pub fn ds(&mut self, text: &str) -> Result<(), EmitError> {
        self.buffer_mut().write_bytes(text.as_bytes())?;
        self.buffer_mut().write8(0)
    }

    // ── Repetition ──────────────────────────────────────────────────────

    /// Invoke `f` exactly `N` times with indices `0..N`, concatenating
    /// whatever each invocation emits.
    ///
    /// This is unrolling at code-generation time, not a runtime loop: the
    /// output contains `N` copies of the body with no branch overhead, and
    /// each invocation sees its index so it can pick different immediates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ppc_emit::{Emitter, Gpr};
    ///
    /// let mut asm = Emitter::new(64)?;
    /// asm.repeat::<4, _>(|asm, i| asm.li(Gpr::R3, i as i16))?;
    /// assert_eq!(asm.size(), 16);
    /// # Ok::<(), ppc_emit::EmitError>(())
    /// ```
    pub fn repeat<const N: usize, F>(&mut self, mut f: F) -> Result<(), EmitError>
    where
        F: FnMut(&mut Self, usize) -> Result<(), EmitError>,
    {
        for i in 0..N {
            f(self, i)?;
        }
        Ok(())
    }

    // ── Counted runtime loop ────────────────────────────────────────────

    /// Emit a loop running `body` `iterations` times, counting down in
    /// `counter`.  Emits nothing at all when `iterations` is 0.
    ///
    /// Layout: constant-load of the count, the body once, a decrement, and
    /// a branch back to the loop top.  The decrement must be the
    /// flag-setting `addic.` — plain `addi` leaves `cr0` untouched and the
    /// closing `bne` would test stale flags, looping forever or not at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use ppc_emit::{Emitter, Gpr};
    ///
    /// let mut asm = Emitter::new(64)?;
    /// asm.counted_loop(Gpr::R4, 8, |asm| {
    ///     asm.lwzu(Gpr::R5, Gpr::R6, 4)?;
    ///     asm.add(Gpr::R3, Gpr::R3, Gpr::R5, false)
    /// })?;
    /// # Ok::<(), ppc_emit::EmitError>(())
    /// ```
    pub fn counted_loop<F>(
        &mut self,
        counter: Gpr,
        iterations: u32,
        body: F,
    ) -> Result<(), EmitError>
    where
        F: FnOnce(&mut Self) -> Result<(), EmitError>,
    {
        if iterations == 0 {
            return Ok(());
        }

        self.liw(counter, iterations)?;
        let top = self.cursor();
        body(self)?;
        self.addic(counter, counter, -1, true)?;
        let back = self.bne()?;
        self.set_label_to(back, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn word_at(asm: &Emitter<'_>, index: usize) -> u32 {
        let off = index * 4;
        let bytes: [u8; 4] = asm.bytes()[off..off + 4].try_into().unwrap();
        u32::from_be_bytes(bytes)
    }

    #[test]
    fn align_pads_to_boundary() {
        let mut asm = Emitter::new(16).unwrap();
        asm.db(0xAA).unwrap();
        asm.align(4).unwrap();
        assert_eq!(asm.bytes(), [0xAA, 0, 0, 0]);
    }

    #[test]
    fn align_is_idempotent() {
        let mut asm = Emitter::new(16).unwrap();
        asm.dw(1).unwrap();
        asm.align(4).unwrap();
        asm.align(4).unwrap();
        assert_eq!(asm.size(), 4);
    }

    #[test]
    fn align_to_one_is_a_no_op() {
        let mut asm = Emitter::new(16).unwrap();
        asm.db(1).unwrap();
        asm.align(1).unwrap();
        assert_eq!(asm.size(), 1);
    }

    #[test]
    fn align_zero_is_an_error() {
        let mut asm = Emitter::new(16).unwrap();
        assert_eq!(
            asm.align(0).unwrap_err(),
            EmitError::InvalidAlignment { boundary: 0 }
        );
    }

    #[test]
    fn align_uses_virtual_addresses() {
        // Alignment is relative to the cursor address, not the buffer
        // offset.
        let mut asm = Emitter::new(32).unwrap();
        asm.set_origin(0x1002);
        asm.align(4).unwrap();
        assert_eq!(asm.size(), 2);
    }

    #[test]
    fn data_directives_write_verbatim() {
        let mut asm = Emitter::new(32).unwrap();
        asm.db(0x01).unwrap();
        asm.dh(0x2345).unwrap();
        asm.dw(0x6789_ABCD).unwrap();
        asm.df32(1.0).unwrap();
        assert_eq!(
            asm.bytes(),
            [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0x3F, 0x80, 0x00, 0x00]
        );
    }

    #[test]
    fn data_arrays() {
        let mut asm = Emitter::new(32).unwrap();
        asm.dh_all(&[0x1122, 0x3344]).unwrap();
        asm.dw_all(&[0x5566_7788]).unwrap();
        assert_eq!(asm.bytes(), [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
    }

    #[test]
    fn string_directive_appends_nul() {
        let mut asm = Emitter::new(16).unwrap();
        asm.ds("Hi").unwrap();
        assert_eq!(asm.bytes(), [b'H', b'i', 0]);
    }

    #[test]
    fn repeat_unrolls_in_index_order() {
        let mut asm = Emitter::new(64).unwrap();
        let mut seen = Vec::new();
        asm.repeat::<4, _>(|asm, i| {
            seen.push(i);
            asm.li(Gpr::R3, i as i16)
        })
        .unwrap();
        assert_eq!(seen, &[0, 1, 2, 3]);
        assert_eq!(asm.size(), 16);
        for i in 0..4 {
            assert_eq!(word_at(&asm, i), 0x3860_0000 | i as u32);
        }
    }

    #[test]
    fn repeat_zero_emits_nothing() {
        let mut asm = Emitter::new(16).unwrap();
        asm.repeat::<0, _>(|asm, _| asm.nop()).unwrap();
        assert!(asm.is_empty());
    }

    #[test]
    fn repeat_matches_standalone_concatenation() {
        let mut unrolled = Emitter::new(64).unwrap();
        unrolled
            .repeat::<3, _>(|asm, i| asm.addi(Gpr::R3, Gpr::R3, i as i16))
            .unwrap();

        let mut manual = Emitter::new(64).unwrap();
        manual.addi(Gpr::R3, Gpr::R3, 0).unwrap();
        manual.addi(Gpr::R3, Gpr::R3, 1).unwrap();
        manual.addi(Gpr::R3, Gpr::R3, 2).unwrap();

        assert_eq!(unrolled.bytes(), manual.bytes());
    }

    #[test]
    fn counted_loop_with_zero_iterations_emits_nothing() {
        let mut asm = Emitter::new(64).unwrap();
        asm.counted_loop(Gpr::R4, 0, |asm| asm.nop()).unwrap();
        assert!(asm.is_empty());
    }

    #[test]
    fn counted_loop_layout() {
        let mut asm = Emitter::new(64).unwrap();
        asm.counted_loop(Gpr::R4, 2, |asm| asm.nop()).unwrap();
        // constant-load + body + flag-setting decrement + back-branch
        assert_eq!(asm.size(), 16);
        assert_eq!(word_at(&asm, 0), 0x3880_0002); // li r4, 2
        assert_eq!(word_at(&asm, 1), 0x6000_0000); // nop
        assert_eq!(word_at(&asm, 2), 0x3484_FFFF); // addic. r4, r4, -1
        assert_eq!(word_at(&asm, 3), 0x4082_FFF8); // bne loop-top (-8)
    }

    #[test]
    fn counted_loop_branches_to_after_constant_load() {
        // With a 32-bit count the constant-load is two instructions; the
        // back-branch must still land right after it.
        let mut asm = Emitter::new(64).unwrap();
        asm.counted_loop(Gpr::R4, 0x0001_0001, |asm| asm.nop()).unwrap();
        assert_eq!(asm.size(), 20);
        assert_eq!(word_at(&asm, 0), 0x3C80_0001); // lis r4, 1
        assert_eq!(word_at(&asm, 1), 0x6084_0001); // ori r4, r4, 1
        assert_eq!(word_at(&asm, 4), 0x4082_FFF8); // bne -8 → the nop
    }
}
