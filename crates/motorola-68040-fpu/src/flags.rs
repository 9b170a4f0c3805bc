//! FPSR condition codes and FBcc predicates.
//!
//! The FPCC byte lives in bits 24-27 of the FPSR:
//! - NAN (bit 24): Not-a-number
//! - I (bit 25): Infinity
//! - Z (bit 26): Zero
//! - N (bit 27): Negative
//!
//! Codes are derived from the raw IEEE-754 bit pattern, never from float
//! comparisons, so -0.0, infinities and NaN payloads classify exactly the
//! way the hardware does.

use crate::registers::FpReg;

/// Not-a-number condition code.
pub const NAN: u32 = 0x0100_0000;
/// Infinity condition code.
pub const I: u32 = 0x0200_0000;
/// Zero condition code.
pub const Z: u32 = 0x0400_0000;
/// Negative condition code.
pub const N: u32 = 0x0800_0000;

/// All four FPCC bits.
pub const FPCC_MASK: u32 = N | Z | I | NAN;

const SIGN: u64 = 0x8000_0000_0000_0000;
const MAGNITUDE: u64 = 0x7FFF_FFFF_FFFF_FFFF;
const EXPONENT: u64 = 0x7FF0_0000_0000_0000;
const MANTISSA: u64 = 0x000F_FFFF_FFFF_FFFF;
const INFINITY: u64 = 0x7FF0_0000_0000_0000;

/// FPSR condition code helpers.
pub struct Fpcc;

impl Fpcc {
    /// Recompute N/Z/I/NAN from `value`, leaving every other FPSR bit alone.
    #[must_use]
    pub fn derive(fpsr: u32, value: FpReg) -> u32 {
        let bits = value.bits();
        let mut result = fpsr & !FPCC_MASK;
        if bits & SIGN != 0 {
            result |= N;
        }
        if bits & MAGNITUDE == 0 {
            result |= Z;
        }
        if bits & MAGNITUDE == INFINITY {
            result |= I;
        }
        if bits & EXPONENT == EXPONENT && bits & MANTISSA != 0 {
            result |= NAN;
        }
        result
    }

    /// Negative bit of `fpsr`.
    #[must_use]
    pub const fn n(fpsr: u32) -> bool {
        fpsr & N != 0
    }

    /// Zero bit of `fpsr`.
    #[must_use]
    pub const fn z(fpsr: u32) -> bool {
        fpsr & Z != 0
    }

    /// Infinity bit of `fpsr`.
    #[must_use]
    pub const fn i(fpsr: u32) -> bool {
        fpsr & I != 0
    }

    /// Not-a-number bit of `fpsr`.
    #[must_use]
    pub const fn nan(fpsr: u32) -> bool {
        fpsr & NAN != 0
    }
}

/// FBcc condition predicates implemented by the unit.
///
/// The remaining codes of the 6-bit field (the ordered/unordered and
/// signalling variants) are not modelled and fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpCondition {
    /// F: never.
    False,
    /// EQ: Z.
    Equal,
    /// NE: !Z.
    NotEqual,
    /// T: always.
    True,
    /// OGT/GT: !(NAN | Z | N).
    GreaterThan,
    /// OGE/GE: Z | !(NAN | N).
    GreaterOrEqual,
    /// OLT/LT: N & !(NAN | Z).
    LessThan,
    /// OLE/LE: Z | (N & !NAN).
    LessOrEqual,
    /// UGT/NLE: NAN | !(N | Z).
    NotLessOrEqual,
    /// UGE/NLT: NAN | Z | !N.
    NotLess,
    /// ULT/NGE: NAN | (N & !Z).
    NotGreaterOrEqual,
    /// ULE/NGT: NAN | Z | N.
    NotGreaterThan,
}

impl FpCondition {
    /// Every predicate the unit understands, in encoding order.
    pub const ALL: [Self; 12] = [
        Self::False,
        Self::Equal,
        Self::NotEqual,
        Self::True,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::LessThan,
        Self::LessOrEqual,
        Self::NotLessOrEqual,
        Self::NotLess,
        Self::NotGreaterOrEqual,
        Self::NotGreaterThan,
    ];

    /// Decode the 6-bit condition field of an FBcc opcode.
    #[must_use]
    pub const fn decode(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::False),
            0x01 => Some(Self::Equal),
            0x0E => Some(Self::NotEqual),
            0x0F => Some(Self::True),
            0x12 => Some(Self::GreaterThan),
            0x13 => Some(Self::GreaterOrEqual),
            0x14 => Some(Self::LessThan),
            0x15 => Some(Self::LessOrEqual),
            0x1A => Some(Self::NotLessOrEqual),
            0x1B => Some(Self::NotLess),
            0x1C => Some(Self::NotGreaterOrEqual),
            0x1D => Some(Self::NotGreaterThan),
            _ => None,
        }
    }

    /// The 6-bit encoding of this predicate.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::False => 0x00,
            Self::Equal => 0x01,
            Self::NotEqual => 0x0E,
            Self::True => 0x0F,
            Self::GreaterThan => 0x12,
            Self::GreaterOrEqual => 0x13,
            Self::LessThan => 0x14,
            Self::LessOrEqual => 0x15,
            Self::NotLessOrEqual => 0x1A,
            Self::NotLess => 0x1B,
            Self::NotGreaterOrEqual => 0x1C,
            Self::NotGreaterThan => 0x1D,
        }
    }

    /// Evaluate the predicate against the FPCC bits of `fpsr`.
    #[must_use]
    pub const fn evaluate(self, fpsr: u32) -> bool {
        let n = Fpcc::n(fpsr);
        let z = Fpcc::z(fpsr);
        let nan = Fpcc::nan(fpsr);
        match self {
            Self::False => false,
            Self::Equal => z,
            Self::NotEqual => !z,
            Self::True => true,
            Self::GreaterThan => !(nan || z || n),
            Self::GreaterOrEqual => z || !(nan || n),
            Self::LessThan => n && !(nan || z),
            Self::LessOrEqual => z || (n && !nan),
            Self::NotLessOrEqual => nan || !(n || z),
            Self::NotLess => nan || z || !n,
            Self::NotGreaterOrEqual => nan || (n && !z),
            Self::NotGreaterThan => nan || z || n,
        }
    }
}
