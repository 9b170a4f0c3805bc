//! Errors returned for FPU encodings the unit cannot execute.
//!
//! None of these are recoverable inside the unit: each one means the guest
//! hit an invalid operand combination or an instruction this core does not
//! implement. The host decides whether to halt or raise an F-line trap.
//! Every variant carries the address of the faulting instruction.

use thiserror::Error;

use crate::addressing::{Access, Size};
use crate::format::OperandFormat;

/// Broad category of an [`FpuError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Mode/register/size combination the hardware does not allow.
    IllegalAddressing,
    /// Operand format known to exist but not implemented (extended, packed).
    UnimplementedFormat,
    /// Opcode, sub-opcode, opmode or transfer mode not implemented.
    UnimplementedOpcode,
    /// Control register selector outside FPIAR/FPSR/FPCR.
    UnknownControlRegister,
    /// FBcc predicate outside the implemented set.
    UnhandledCondition,
}

/// FPU decode/execute failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FpuError {
    #[error("illegal {size} {access} through mode {mode}, reg {reg} at {pc:08X}")]
    IllegalAddressing {
        mode: u8,
        reg: u8,
        size: Size,
        access: Access,
        pc: u32,
    },

    #[error("{format} {access} unimplemented at {pc:08X}")]
    UnimplementedFormat {
        format: OperandFormat,
        access: Access,
        pc: u32,
    },

    #[error("unimplemented source specifier {specifier} at {pc:08X}")]
    UnimplementedSourceSpecifier { specifier: u8, pc: u32 },

    #[error("unimplemented opmode {opmode:02X} at {pc:08X}")]
    UnimplementedOpmode { opmode: u8, pc: u32 },

    #[error("unimplemented subop {subop} at {pc:08X}")]
    UnimplementedSubop { subop: u8, pc: u32 },

    #[error("unimplemented main op {op} at {pc:08X}")]
    UnimplementedMainOp { op: u8, pc: u32 },

    #[error("unimplemented save/restore op {op} at {pc:08X}")]
    UnimplementedSaveRestoreOp { op: u8, pc: u32 },

    #[error("FMOVEM {access} mode {mode} unimplemented at {pc:08X}")]
    UnimplementedMovemMode { mode: u8, access: Access, pc: u32 },

    #[error("unknown control register {reg}, {access} at {pc:08X}")]
    UnknownControlRegister { reg: u8, access: Access, pc: u32 },

    #[error("unhandled condition {condition:02X} at {pc:08X}")]
    UnhandledCondition { condition: u8, pc: u32 },
}

impl FpuError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalAddressing { .. } => ErrorKind::IllegalAddressing,
            Self::UnimplementedFormat { .. } => ErrorKind::UnimplementedFormat,
            Self::UnimplementedSourceSpecifier { .. }
            | Self::UnimplementedOpmode { .. }
            | Self::UnimplementedSubop { .. }
            | Self::UnimplementedMainOp { .. }
            | Self::UnimplementedSaveRestoreOp { .. }
            | Self::UnimplementedMovemMode { .. } => ErrorKind::UnimplementedOpcode,
            Self::UnknownControlRegister { .. } => ErrorKind::UnknownControlRegister,
            Self::UnhandledCondition { .. } => ErrorKind::UnhandledCondition,
        }
    }

    /// Address of the instruction that failed.
    #[must_use]
    pub const fn pc(&self) -> u32 {
        match *self {
            Self::IllegalAddressing { pc, .. }
            | Self::UnimplementedFormat { pc, .. }
            | Self::UnimplementedSourceSpecifier { pc, .. }
            | Self::UnimplementedOpmode { pc, .. }
            | Self::UnimplementedSubop { pc, .. }
            | Self::UnimplementedMainOp { pc, .. }
            | Self::UnimplementedSaveRestoreOp { pc, .. }
            | Self::UnimplementedMovemMode { pc, .. }
            | Self::UnknownControlRegister { pc, .. }
            | Self::UnhandledCondition { pc, .. } => pc,
        }
    }
}
