//! Extension-word decoding for the general FPU instruction group.
//!
//! Opcodes of the form `1111 001 000 <ea>` carry a second instruction word
//! whose top three bits select the instruction class. The whole word is
//! decoded up front into an [`FpuOp`], so an unimplemented opmode or
//! format is rejected before any operand is fetched.

use std::fmt;

use crate::addressing::Access;
use crate::error::FpuError;
use crate::format::{DataFormat, OperandFormat};
use crate::timing::CycleCosts;

/// A decoded FPU extension word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpuOp {
    /// Arithmetic with a floating register destination.
    General {
        source: Source,
        dst: usize,
        opmode: Opmode,
    },
    /// FMOVE FPn,<ea>
    MoveToMemory { src: usize, format: DataFormat },
    /// FMOVE to or from a control register. `Write` stores the register.
    MoveControl { access: Access, reg: ControlReg },
    /// FMOVEM. `Write` stores registers through -(An), `Read` loads through (An)+.
    Movem { access: Access, list: u8 },
}

/// Source operand of a general FPU instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Another floating register.
    Register(usize),
    /// A memory, data register or immediate operand in the given format.
    Memory(DataFormat),
}

impl FpuOp {
    /// Decode an extension word. `pc` is the instruction address used in errors.
    pub fn decode(ext: u16, pc: u32) -> Result<Self, FpuError> {
        let subop = (ext >> 13) as u8;
        match subop {
            0 | 2 => Self::decode_general(ext, pc),
            3 => {
                let format = OperandFormat::from_bits((ext >> 10) as u8);
                let format = format.data_format().ok_or(FpuError::UnimplementedFormat {
                    format,
                    access: Access::Write,
                    pc,
                })?;
                Ok(Self::MoveToMemory {
                    src: usize::from((ext >> 7) & 0x07),
                    format,
                })
            }
            4 | 5 => {
                let access = direction(ext);
                let selector = ((ext >> 10) & 0x07) as u8;
                let reg = ControlReg::decode(selector).ok_or(FpuError::UnknownControlRegister {
                    reg: selector,
                    access,
                    pc,
                })?;
                Ok(Self::MoveControl { access, reg })
            }
            6 | 7 => {
                let access = direction(ext);
                let mode = ((ext >> 11) & 0x03) as u8;
                let supported = match access {
                    Access::Write => mode == 0,
                    Access::Read => mode == 2,
                };
                if !supported {
                    return Err(FpuError::UnimplementedMovemMode { mode, access, pc });
                }
                Ok(Self::Movem {
                    access,
                    list: ext as u8,
                })
            }
            _ => Err(FpuError::UnimplementedSubop { subop, pc }),
        }
    }

    fn decode_general(ext: u16, pc: u32) -> Result<Self, FpuError> {
        let rm = ext & 0x4000 != 0;
        let src = ((ext >> 10) & 0x07) as u8;
        let dst = usize::from((ext >> 7) & 0x07);
        let opmode = (ext & 0x7F) as u8;

        let source = if rm {
            let format = OperandFormat::from_bits(src);
            if format == OperandFormat::PackedDynamic {
                return Err(FpuError::UnimplementedSourceSpecifier { specifier: src, pc });
            }
            let format = format.data_format().ok_or(FpuError::UnimplementedFormat {
                format,
                access: Access::Read,
                pc,
            })?;
            Source::Memory(format)
        } else {
            Source::Register(usize::from(src))
        };

        let opmode = Opmode::decode(opmode).ok_or(FpuError::UnimplementedOpmode { opmode, pc })?;
        Ok(Self::General {
            source,
            dst,
            opmode,
        })
    }
}

impl fmt::Display for FpuOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::General {
                source: Source::Register(src),
                dst,
                opmode,
            } => write!(f, "{}.X FP{src},FP{dst}", opmode.mnemonic()),
            Self::General {
                source: Source::Memory(format),
                dst,
                opmode,
            } => write!(f, "{}.{} <ea>,FP{dst}", opmode.mnemonic(), suffix(format)),
            Self::MoveToMemory { src, format } => {
                write!(f, "FMOVE.{} FP{src},<ea>", suffix(format))
            }
            Self::MoveControl {
                access: Access::Write,
                reg,
            } => write!(f, "FMOVE.L {},<ea>", reg.name()),
            Self::MoveControl {
                access: Access::Read,
                reg,
            } => write!(f, "FMOVE.L <ea>,{}", reg.name()),
            Self::Movem {
                access: Access::Write,
                list,
            } => write!(f, "FMOVEM.X #{list:02X},-(An)"),
            Self::Movem {
                access: Access::Read,
                list,
            } => write!(f, "FMOVEM.X (An)+,#{list:02X}"),
        }
    }
}

const fn suffix(format: DataFormat) -> char {
    match format {
        DataFormat::Long => 'L',
        DataFormat::Single => 'S',
        DataFormat::Word => 'W',
        DataFormat::Double => 'D',
        DataFormat::Byte => 'B',
    }
}

/// Bit 13 set means register to memory.
fn direction(ext: u16) -> Access {
    if ext & 0x2000 != 0 {
        Access::Write
    } else {
        Access::Read
    }
}

/// Arithmetic operation selected by the 7-bit opmode field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opmode {
    Move,
    Sqrt,
    Abs,
    Neg,
    Div,
    Add,
    Mul,
    Sub,
    Cmp,
    Tst,
}

impl Opmode {
    #[must_use]
    pub const fn decode(opmode: u8) -> Option<Self> {
        match opmode {
            0x00 => Some(Self::Move),
            0x04 => Some(Self::Sqrt),
            0x18 => Some(Self::Abs),
            0x1A => Some(Self::Neg),
            0x20 => Some(Self::Div),
            0x22 => Some(Self::Add),
            0x23 => Some(Self::Mul),
            0x28 => Some(Self::Sub),
            0x38 => Some(Self::Cmp),
            0x3A => Some(Self::Tst),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Move => "FMOVE",
            Self::Sqrt => "FSQRT",
            Self::Abs => "FABS",
            Self::Neg => "FNEG",
            Self::Div => "FDIV",
            Self::Add => "FADD",
            Self::Mul => "FMUL",
            Self::Sub => "FSUB",
            Self::Cmp => "FCMP",
            Self::Tst => "FTST",
        }
    }

    /// Cycles charged for this operation.
    #[must_use]
    pub const fn cycles(self, costs: &CycleCosts) -> u32 {
        match self {
            Self::Move => costs.fmove,
            Self::Sqrt => costs.fsqrt,
            Self::Abs => costs.fabs,
            Self::Neg => costs.fneg,
            Self::Div => costs.fdiv,
            Self::Add => costs.fadd,
            Self::Mul => costs.fmul,
            Self::Sub => costs.fsub,
            Self::Cmp => costs.fcmp,
            Self::Tst => costs.ftst,
        }
    }
}

/// FPU control register selected by a single bit of the selector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlReg {
    Fpiar,
    Fpsr,
    Fpcr,
}

impl ControlReg {
    #[must_use]
    pub const fn decode(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(Self::Fpiar),
            2 => Some(Self::Fpsr),
            4 => Some(Self::Fpcr),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fpiar => "FPIAR",
            Self::Fpsr => "FPSR",
            Self::Fpcr => "FPCR",
        }
    }
}
