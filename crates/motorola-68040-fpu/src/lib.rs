//! Motorola 68040 floating-point instruction unit.
//!
//! This crate executes the FPU subset of the 68040 instruction set on top of
//! a host-supplied CPU state and memory bus: general arithmetic (FMOVE,
//! FSQRT, FABS, FNEG, FDIV, FADD, FMUL, FSUB, FCMP, FTST), FMOVE to memory,
//! control register moves, FMOVEM, FBcc and the FSAVE/FRESTORE stubs.
//!
//! The host's opcode table calls [`Cpu68040::fpu_op0`] for `$F2xx` opcodes
//! and [`Cpu68040::fpu_op1`] for `$F3xx` opcodes. Both return an
//! [`FpuError`] instead of executing anything for encodings the unit does
//! not implement; the host decides whether that becomes an F-line trap or
//! a hard stop.
//!
//! # Precision
//!
//! FP registers hold IEEE-754 doubles. The 96-bit extended format is only
//! moved as a truncated image (the first 64 bits carry the double pattern),
//! and packed decimal is not supported at all.
//!
//! # Usage
//!
//! ```
//! use motorola_68040_fpu::{Cpu68040, SimpleBus};
//!
//! let mut cpu = Cpu68040::new();
//! let mut bus = SimpleBus::new();
//!
//! // FADD.X FP1,FP0
//! bus.load_words(0x1000, &[0xF200, 0x0422]);
//! cpu.regs.pc = 0x1000;
//! cpu.fpu.fp[0] = 2.0.into();
//! cpu.fpu.fp[1] = 3.0.into();
//!
//! cpu.fetch_opcode(&mut bus);
//! cpu.fpu_op0(&mut bus).unwrap();
//! assert_eq!(cpu.fpu.fp[0].to_f64(), 5.0);
//! ```

pub mod addressing;
mod arith;
mod branches;
pub mod bus;
mod control;
pub mod cpu;
pub mod decode;
mod ea;
pub mod error;
mod execute;
pub mod flags;
pub mod format;
mod movem;
pub mod observable;
pub mod registers;
pub mod timing;

pub use addressing::{Access, AddrMode, Size};
pub use bus::{FpuBus, SimpleBus};
pub use cpu::Cpu68040;
pub use decode::{ControlReg, FpuOp, Opmode, Source};
pub use error::{ErrorKind, FpuError};
pub use flags::{FPCC_MASK, FpCondition, Fpcc, I, N, NAN, Z};
pub use format::{DataFormat, OperandFormat};
pub use observable::{Observable, Value};
pub use registers::{FpReg, FpuRegisters, Registers};
pub use timing::CycleCosts;
