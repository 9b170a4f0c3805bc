//! External operand formats for memory-sourced FPU operands.

use std::fmt;

use crate::addressing::Size;

/// The 3-bit source/destination format field of an FPU extension word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandFormat {
    /// L: 32-bit two's complement integer.
    Long,
    /// S: IEEE single-precision real.
    Single,
    /// X: 96-bit extended-precision real.
    Extended,
    /// P: packed decimal real (static k-factor when storing).
    Packed,
    /// W: 16-bit two's complement integer.
    Word,
    /// D: IEEE double-precision real.
    Double,
    /// B: 8-bit two's complement integer.
    Byte,
    /// P{Dn}: packed decimal real with dynamic k-factor (stores only).
    PackedDynamic,
}

impl OperandFormat {
    /// Decode a 3-bit format field.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Long,
            1 => Self::Single,
            2 => Self::Extended,
            3 => Self::Packed,
            4 => Self::Word,
            5 => Self::Double,
            6 => Self::Byte,
            _ => Self::PackedDynamic,
        }
    }

    /// The implemented conversion for this format, if there is one.
    #[must_use]
    pub const fn data_format(self) -> Option<DataFormat> {
        match self {
            Self::Long => Some(DataFormat::Long),
            Self::Single => Some(DataFormat::Single),
            Self::Word => Some(DataFormat::Word),
            Self::Double => Some(DataFormat::Double),
            Self::Byte => Some(DataFormat::Byte),
            Self::Extended | Self::Packed | Self::PackedDynamic => None,
        }
    }
}

impl fmt::Display for OperandFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Long => "long-word integer",
            Self::Single => "single-precision real",
            Self::Extended => "extended-precision real",
            Self::Packed => "packed-decimal real",
            Self::Word => "word integer",
            Self::Double => "double-precision real",
            Self::Byte => "byte integer",
            Self::PackedDynamic => "packed-decimal real (dynamic k-factor)",
        };
        f.write_str(name)
    }
}

/// A memory operand format the unit converts to and from a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Long,
    Single,
    Word,
    Double,
    Byte,
}

impl DataFormat {
    /// Access size used to move the operand.
    #[must_use]
    pub const fn size(self) -> Size {
        match self {
            Self::Long | Self::Single => Size::Long,
            Self::Word => Size::Word,
            Self::Double => Size::Double,
            Self::Byte => Size::Byte,
        }
    }

    /// Convert a raw operand (right-aligned in a u64) to a double.
    #[must_use]
    pub fn load(self, raw: u64) -> f64 {
        match self {
            Self::Long => f64::from(raw as u32 as i32),
            Self::Single => f64::from(f32::from_bits(raw as u32)),
            Self::Word => f64::from(raw as u16 as i16),
            Self::Double => f64::from_bits(raw),
            Self::Byte => f64::from(raw as u8 as i8),
        }
    }

    /// Convert a double to the raw operand, right-aligned in a u64.
    ///
    /// Integer conversions truncate toward zero and saturate; NaN becomes 0.
    /// Bytes go through a 16-bit conversion first and keep the low 8 bits.
    #[must_use]
    pub fn store(self, value: f64) -> u64 {
        match self {
            Self::Long => u64::from(value as i32 as u32),
            Self::Single => u64::from((value as f32).to_bits()),
            Self::Word => u64::from(value as i16 as u16),
            Self::Double => value.to_bits(),
            Self::Byte => u64::from(value as i16 as u8),
        }
    }
}
