//! FMOVEM with a static register list.
//!
//! Stores walk FP0..FP7 through -(An); loads walk the mask bits the same
//! way but fill FP7..FP0 through (An)+. Each register moves as a 12-byte
//! extended image.

use log::trace;

use crate::addressing::Access;
use crate::bus::FpuBus;
use crate::cpu::Cpu68040;
use crate::error::FpuError;

impl Cpu68040 {
    pub(crate) fn exec_fmovem<B: FpuBus>(
        &mut self,
        bus: &mut B,
        access: Access,
        list: u8,
    ) -> Result<(), FpuError> {
        let ea = self.ea_field();
        for i in (0..8).filter(|i| list & (1 << i) != 0) {
            match access {
                Access::Write => {
                    let value = self.fpu.fp[i];
                    self.write_ea_fpe(bus, ea, value)?;
                }
                Access::Read => {
                    self.fpu.fp[7 - i] = self.read_ea_fpe(bus, ea)?;
                }
            }
            self.use_cycles(self.costs().fmovem_per_register);
        }
        trace!("FMOVEM {access} list {list:08b}");
        Ok(())
    }
}
