//! Entry points for the two FPU opcode groups.
//!
//! The host calls these after fetching the opcode into IR, with PC just
//! past it (see [`Cpu68040::setup`] and [`Cpu68040::fetch_opcode`]).

use log::{debug, trace};

use crate::addressing::Size;
use crate::bus::FpuBus;
use crate::cpu::Cpu68040;
use crate::decode::FpuOp;
use crate::error::FpuError;

impl Cpu68040 {
    /// Execute a general FPU instruction (`$F200`-`$F2FF`).
    pub fn fpu_op0<B: FpuBus>(&mut self, bus: &mut B) -> Result<(), FpuError> {
        let result = match (self.ir >> 6) & 0x03 {
            0 => {
                let ext = self.fetch_imm_16(bus);
                FpuOp::decode(ext, self.instr_start_pc).and_then(|op| {
                    trace!("{:08X}: {:04X} {ext:04X} {op}", self.instr_start_pc, self.ir);
                    self.execute_op(bus, op)
                })
            }
            2 => self.exec_fbcc16(bus),
            3 => self.exec_fbcc32(bus),
            op => Err(FpuError::UnimplementedMainOp {
                op: op as u8,
                pc: self.instr_start_pc,
            }),
        };
        if let Err(err) = &result {
            debug!("rejected {:04X}: {err}", self.ir);
        }
        result
    }

    /// Execute FSAVE or FRESTORE (`$F300`-`$F3FF`).
    ///
    /// FSAVE writes a null state frame (a zero long); FRESTORE reads a long
    /// and discards it. No internal state is saved or restored.
    pub fn fpu_op1<B: FpuBus>(&mut self, bus: &mut B) -> Result<(), FpuError> {
        let ea = self.ea_field();
        let result = match (self.ir >> 6) & 0x03 {
            0 => {
                debug!("FSAVE at {:08X} writes a null frame", self.instr_start_pc);
                self.write_ea(bus, ea, Size::Long, 0)
            }
            1 => {
                debug!("FRESTORE at {:08X} discards its frame", self.instr_start_pc);
                self.read_ea(bus, ea, Size::Long).map(|_| ())
            }
            op => Err(FpuError::UnimplementedSaveRestoreOp {
                op: op as u8,
                pc: self.instr_start_pc,
            }),
        };
        if let Err(err) = &result {
            debug!("rejected {:04X}: {err}", self.ir);
        }
        result
    }

    fn execute_op<B: FpuBus>(&mut self, bus: &mut B, op: FpuOp) -> Result<(), FpuError> {
        match op {
            FpuOp::General {
                source,
                dst,
                opmode,
            } => self.exec_fpgen(bus, source, dst, opmode),
            FpuOp::MoveToMemory { src, format } => self.exec_fmove_to_memory(bus, src, format),
            FpuOp::MoveControl { access, reg } => self.exec_fmove_control(bus, access, reg),
            FpuOp::Movem { access, list } => self.exec_fmovem(bus, access, list),
        }
    }
}
