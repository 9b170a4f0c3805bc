//! Register file touched by the FPU.
//!
//! - D0-D7, A0-A7, PC: the integer side, owned by the host core and
//!   mirrored here so EA calculation can read and update it
//! - FP0-FP7: floating-point data registers (IEEE double storage)
//! - FPCR: control register (rounding/exception enables, stored only)
//! - FPSR: status register; bits 24-27 are the FPCC condition codes
//! - FPIAR: instruction address register (stored only)

use std::fmt;

/// Integer registers visible to FPU effective-address calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Data registers D0-D7.
    pub d: [u32; 8],
    /// Address registers A0-A7 (A7 is whichever stack pointer is active).
    pub a: [u32; 8],
    /// Program counter. Points at the next instruction-stream word.
    pub pc: u32,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create a zeroed register set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            d: [0; 8],
            a: [0; 8],
            pc: 0,
        }
    }

    /// Write the low byte of Dn, preserving bits 8-31.
    pub fn set_d_byte(&mut self, n: usize, value: u8) {
        self.d[n] = (self.d[n] & 0xFFFF_FF00) | u32::from(value);
    }

    /// Write the low word of Dn, preserving bits 16-31.
    pub fn set_d_word(&mut self, n: usize, value: u16) {
        self.d[n] = (self.d[n] & 0xFFFF_0000) | u32::from(value);
    }
}

/// One 64-bit floating-point register.
///
/// The register is a single bit container. [`to_f64`](Self::to_f64) and
/// [`bits`](Self::bits) are two views of the same storage, so the numeric
/// value and the raw IEEE pattern can never disagree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FpReg(u64);

impl FpReg {
    /// Positive zero.
    pub const ZERO: Self = Self(0);

    /// Build a register from a raw IEEE-754 double pattern.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw IEEE-754 double pattern.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Build a register from a double.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self(value.to_bits())
    }

    /// Numeric view.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for FpReg {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<FpReg> for f64 {
    fn from(reg: FpReg) -> Self {
        reg.to_f64()
    }
}

impl fmt::Debug for FpReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FpReg({} / ${:016X})", self.to_f64(), self.0)
    }
}

/// FPU programmer-visible registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FpuRegisters {
    /// Floating-point data registers FP0-FP7.
    pub fp: [FpReg; 8],
    /// Floating-point control register.
    pub fpcr: u32,
    /// Floating-point status register.
    pub fpsr: u32,
    /// Floating-point instruction address register.
    pub fpiar: u32,
}

impl FpuRegisters {
    /// Create a cleared FPU register file.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fp: [FpReg::ZERO; 8],
            fpcr: 0,
            fpsr: 0,
            fpiar: 0,
        }
    }
}
