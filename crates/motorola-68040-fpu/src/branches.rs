//! FBcc: branch on FPU condition.
//!
//! The predicate is the low six bits of the opcode. The displacement
//! follows as a word or a long and is relative to the displacement itself,
//! so after fetching it the jump is `disp - 2` or `disp - 4` from PC.

use log::trace;

use crate::bus::FpuBus;
use crate::cpu::Cpu68040;
use crate::error::FpuError;
use crate::flags::FpCondition;

impl Cpu68040 {
    pub(crate) fn exec_fbcc16<B: FpuBus>(&mut self, bus: &mut B) -> Result<(), FpuError> {
        let condition = self.fp_condition()?;
        let disp = i32::from(self.fetch_imm_16(bus) as i16);
        self.fbcc(bus, condition, disp - 2);
        Ok(())
    }

    pub(crate) fn exec_fbcc32<B: FpuBus>(&mut self, bus: &mut B) -> Result<(), FpuError> {
        let condition = self.fp_condition()?;
        let disp = self.fetch_imm_32(bus) as i32;
        self.fbcc(bus, condition, disp.wrapping_sub(4));
        Ok(())
    }

    fn fp_condition(&self) -> Result<FpCondition, FpuError> {
        let code = self.ea_field();
        FpCondition::decode(code).ok_or(FpuError::UnhandledCondition {
            condition: code,
            pc: self.instr_start_pc,
        })
    }

    fn fbcc<B: FpuBus>(&mut self, bus: &mut B, condition: FpCondition, offset: i32) {
        if condition.evaluate(self.fpu.fpsr) {
            bus.auto_disable_trace();
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset);
            trace!("FB{condition:?} taken to {:08X}", self.regs.pc);
        }
        self.use_cycles(self.costs().fbcc);
    }
}
