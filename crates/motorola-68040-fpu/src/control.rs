//! FMOVE FPn,<ea> and FMOVE to/from FPCR, FPSR and FPIAR.

use crate::addressing::{Access, Size};
use crate::bus::FpuBus;
use crate::cpu::Cpu68040;
use crate::decode::ControlReg;
use crate::error::FpuError;
use crate::format::DataFormat;

impl Cpu68040 {
    /// Convert FPn to `format` and store it. Condition codes are unchanged.
    pub(crate) fn exec_fmove_to_memory<B: FpuBus>(
        &mut self,
        bus: &mut B,
        src: usize,
        format: DataFormat,
    ) -> Result<(), FpuError> {
        let raw = format.store(self.fpu.fp[src].to_f64());
        self.write_ea(bus, self.ea_field(), format.size(), raw)?;
        self.use_cycles(self.costs().fmove_to_memory);
        Ok(())
    }

    pub(crate) fn exec_fmove_control<B: FpuBus>(
        &mut self,
        bus: &mut B,
        access: Access,
        reg: ControlReg,
    ) -> Result<(), FpuError> {
        let ea = self.ea_field();
        match access {
            Access::Write => {
                let value = self.control_reg(reg);
                self.write_ea(bus, ea, Size::Long, u64::from(value))?;
            }
            Access::Read => {
                let value = self.read_ea(bus, ea, Size::Long)? as u32;
                *self.control_reg_mut(reg) = value;
            }
        }
        self.use_cycles(self.costs().fmove_control);
        Ok(())
    }

    const fn control_reg(&self, reg: ControlReg) -> u32 {
        match reg {
            ControlReg::Fpiar => self.fpu.fpiar,
            ControlReg::Fpsr => self.fpu.fpsr,
            ControlReg::Fpcr => self.fpu.fpcr,
        }
    }

    fn control_reg_mut(&mut self, reg: ControlReg) -> &mut u32 {
        match reg {
            ControlReg::Fpiar => &mut self.fpu.fpiar,
            ControlReg::Fpsr => &mut self.fpu.fpsr,
            ControlReg::Fpcr => &mut self.fpu.fpcr,
        }
    }
}
