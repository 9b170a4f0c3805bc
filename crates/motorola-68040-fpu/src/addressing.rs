//! Addressing modes, operand sizes, and which combinations the FPU accepts.
//!
//! The 6-bit EA field of an FPU opcode decodes into an [`AddrMode`]. Not
//! every mode is usable at every operand size: the legal set differs per
//! size and per direction (read vs write), and anything outside it is
//! rejected before the access starts.

use std::fmt;

/// Addressing mode decoded from an EA field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// Data register direct: Dn
    DataReg(u8),
    /// Address register direct: An
    AddrReg(u8),
    /// Address register indirect: (An)
    AddrInd(u8),
    /// Address register indirect with postincrement: (An)+
    AddrIndPostInc(u8),
    /// Address register indirect with predecrement: -(An)
    AddrIndPreDec(u8),
    /// Address register indirect with displacement: d16(An)
    AddrIndDisp(u8),
    /// Address register indirect with index: (d8,An,Xn) or full format
    AddrIndIndex(u8),
    /// Absolute short: (xxx).W
    AbsShort,
    /// Absolute long: (xxx).L
    AbsLong,
    /// Program counter with displacement: d16(PC)
    PcDisp,
    /// Program counter with index: (d8,PC,Xn)
    PcIndex,
    /// Immediate: #<data>
    Immediate,
}

impl AddrMode {
    /// Decode addressing mode from mode/register fields.
    #[must_use]
    pub fn decode(mode: u8, reg: u8) -> Option<Self> {
        let reg = reg & 0x07;
        match mode & 0x07 {
            0 => Some(Self::DataReg(reg)),
            1 => Some(Self::AddrReg(reg)),
            2 => Some(Self::AddrInd(reg)),
            3 => Some(Self::AddrIndPostInc(reg)),
            4 => Some(Self::AddrIndPreDec(reg)),
            5 => Some(Self::AddrIndDisp(reg)),
            6 => Some(Self::AddrIndIndex(reg)),
            _ => match reg {
                0 => Some(Self::AbsShort),
                1 => Some(Self::AbsLong),
                2 => Some(Self::PcDisp),
                3 => Some(Self::PcIndex),
                4 => Some(Self::Immediate),
                _ => None,
            },
        }
    }

    /// Decode the low 6 bits of an opcode.
    #[must_use]
    pub fn from_ea(ea: u8) -> Option<Self> {
        Self::decode(ea >> 3, ea)
    }

    /// Whether the FPU can access an operand of `size` through this mode.
    #[must_use]
    pub fn is_legal(self, size: Size, access: Access) -> bool {
        use Access::{Read, Write};
        use Size::{Byte, Double, Extended, Long, Word};

        match (self, access) {
            (Self::DataReg(_), _) => matches!(size, Byte | Word | Long),
            (Self::AddrReg(_), Read) => false,
            (Self::AddrReg(_), Write) => size == Long,
            (Self::AddrInd(_) | Self::AddrIndDisp(_), _) => {
                matches!(size, Byte | Word | Long | Double)
            }
            (Self::AddrIndPostInc(_), Read) => matches!(size, Long | Double | Extended),
            (Self::AddrIndPostInc(_), Write) => matches!(size, Byte | Word | Long),
            (Self::AddrIndPreDec(_), Read) => false,
            (Self::AddrIndPreDec(_), Write) => {
                matches!(size, Byte | Word | Long | Double | Extended)
            }
            (Self::AddrIndIndex(_) | Self::AbsLong, _) => matches!(size, Byte | Word | Long),
            (Self::AbsShort, Read) => matches!(size, Byte | Word | Long),
            (Self::AbsShort, Write) => false,
            (Self::PcDisp, Read) => matches!(size, Long | Double),
            (Self::PcDisp, Write) => matches!(size, Byte | Word | Long),
            (Self::PcIndex, _) => false,
            (Self::Immediate, Read) => matches!(size, Byte | Word | Long | Double),
            (Self::Immediate, Write) => false,
        }
    }
}

/// Operand size of an FPU access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Byte,
    Word,
    Long,
    /// 64-bit operand (double-precision real).
    Double,
    /// 96-bit extended-precision image, moved as a truncated double.
    Extended,
}

impl Size {
    /// Number of bytes the operand occupies in memory.
    #[must_use]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Long => 4,
            Self::Double => 8,
            Self::Extended => 12,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Byte => "byte",
            Self::Word => "word",
            Self::Long => "long",
            Self::Double => "double",
            Self::Extended => "extended",
        };
        f.write_str(name)
    }
}

/// Direction of an operand access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Access, AddrMode, Size};

    #[test]
    fn mode_seven_reserved_registers_do_not_decode() {
        assert_eq!(AddrMode::decode(7, 4), Some(AddrMode::Immediate));
        assert_eq!(AddrMode::decode(7, 5), None);
        assert_eq!(AddrMode::decode(7, 6), None);
        assert_eq!(AddrMode::decode(7, 7), None);
    }

    #[test]
    fn from_ea_splits_mode_and_register() {
        assert_eq!(AddrMode::from_ea(0b100_011), Some(AddrMode::AddrIndPreDec(3)));
        assert_eq!(AddrMode::from_ea(0b111_001), Some(AddrMode::AbsLong));
    }

    #[test]
    fn address_register_is_write_only_long() {
        let an = AddrMode::AddrReg(0);
        assert!(!an.is_legal(Size::Byte, Access::Read));
        assert!(!an.is_legal(Size::Long, Access::Read));
        assert!(an.is_legal(Size::Long, Access::Write));
        assert!(!an.is_legal(Size::Word, Access::Write));
    }

    #[test]
    fn extended_only_through_stack_modes() {
        for mode in [
            AddrMode::AddrInd(0),
            AddrMode::AddrIndDisp(0),
            AddrMode::AbsLong,
            AddrMode::Immediate,
        ] {
            assert!(!mode.is_legal(Size::Extended, Access::Read));
            assert!(!mode.is_legal(Size::Extended, Access::Write));
        }
        assert!(AddrMode::AddrIndPostInc(2).is_legal(Size::Extended, Access::Read));
        assert!(!AddrMode::AddrIndPostInc(2).is_legal(Size::Extended, Access::Write));
        assert!(AddrMode::AddrIndPreDec(2).is_legal(Size::Extended, Access::Write));
        assert!(!AddrMode::AddrIndPreDec(2).is_legal(Size::Extended, Access::Read));
    }

    #[test]
    fn read_only_and_write_only_modes() {
        assert!(AddrMode::Immediate.is_legal(Size::Double, Access::Read));
        assert!(!AddrMode::Immediate.is_legal(Size::Long, Access::Write));
        assert!(AddrMode::AbsShort.is_legal(Size::Word, Access::Read));
        assert!(!AddrMode::AbsShort.is_legal(Size::Word, Access::Write));
        assert!(!AddrMode::PcDisp.is_legal(Size::Byte, Access::Read));
        assert!(AddrMode::PcDisp.is_legal(Size::Byte, Access::Write));
    }

    #[test]
    fn data_register_has_no_double_form() {
        assert!(!AddrMode::DataReg(1).is_legal(Size::Double, Access::Read));
        assert!(!AddrMode::DataReg(1).is_legal(Size::Double, Access::Write));
    }
}
