//! Processor state the FPU executes against.
//!
//! `Cpu68040` bundles everything one FPU instruction reads or writes: the
//! integer registers used for EA calculation, the FPU register file, the
//! opcode being executed and the cycle accumulator. The host owns it and
//! passes it (with a bus) into each entry point; there is no global state,
//! so independent CPUs can run side by side.
//!
//! Instruction-stream words are read through the bus at PC. When an entry
//! point is called, PC points just past the opcode word.

use crate::bus::FpuBus;
use crate::registers::{FpuRegisters, Registers};
use crate::timing::CycleCosts;

/// FPU-side view of a 68040.
#[derive(Debug, Clone)]
pub struct Cpu68040 {
    /// Integer registers (D0-D7, A0-A7, PC).
    pub regs: Registers,
    /// FPU registers (FP0-FP7, FPCR, FPSR, FPIAR).
    pub fpu: FpuRegisters,
    /// Opcode of the instruction being executed.
    pub ir: u16,
    /// Address of the opcode word of the instruction being executed.
    pub instr_start_pc: u32,

    total_cycles: u64,
    costs: CycleCosts,
}

impl Cpu68040 {
    /// Create a CPU with cleared registers and 68040 timings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_costs(CycleCosts::M68040)
    }

    /// Create a CPU with cleared registers and a custom cost table.
    #[must_use]
    pub fn with_costs(costs: CycleCosts) -> Self {
        Self {
            regs: Registers::new(),
            fpu: FpuRegisters::new(),
            ir: 0,
            instr_start_pc: 0,
            total_cycles: 0,
            costs,
        }
    }

    /// Total cycles charged by FPU instructions so far.
    #[must_use]
    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Cost table in use.
    #[must_use]
    pub const fn costs(&self) -> &CycleCosts {
        &self.costs
    }

    /// Load an opcode the host has already fetched.
    ///
    /// PC must point just past the opcode word.
    pub fn setup(&mut self, opcode: u16) {
        self.ir = opcode;
        self.instr_start_pc = self.regs.pc.wrapping_sub(2);
    }

    /// Fetch the opcode at PC into IR and advance PC past it.
    pub fn fetch_opcode<B: FpuBus>(&mut self, bus: &mut B) {
        self.instr_start_pc = self.regs.pc;
        self.ir = self.fetch_imm_16(bus);
    }

    /// Read the next instruction-stream word and advance PC.
    pub(crate) fn fetch_imm_16<B: FpuBus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read_word(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        value
    }

    /// Read the next instruction-stream long and advance PC.
    pub(crate) fn fetch_imm_32<B: FpuBus>(&mut self, bus: &mut B) -> u32 {
        let value = bus.read_long(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(4);
        value
    }

    /// EA field of the current opcode.
    pub(crate) const fn ea_field(&self) -> u8 {
        (self.ir & 0x3F) as u8
    }

    pub(crate) fn use_cycles(&mut self, cycles: u32) {
        self.total_cycles += u64::from(cycles);
    }
}

impl Default for Cpu68040 {
    fn default() -> Self {
        Self::new()
    }
}
