//! Cycle costs charged by FPU instructions.
//!
//! Costs are flat per instruction; operand fetch and EA calculation are not
//! charged separately. FMOVEM is charged per transferred register.

/// Per-instruction cycle costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleCosts {
    pub fmove: u32,
    pub fsqrt: u32,
    pub fabs: u32,
    pub fneg: u32,
    pub fdiv: u32,
    pub fadd: u32,
    pub fmul: u32,
    pub fsub: u32,
    pub fcmp: u32,
    pub ftst: u32,
    /// FMOVE FPn,<ea>
    pub fmove_to_memory: u32,
    /// FMOVE to or from FPCR/FPSR/FPIAR.
    pub fmove_control: u32,
    /// FMOVEM, per register in the list.
    pub fmovem_per_register: u32,
    /// FBcc, taken or not.
    pub fbcc: u32,
}

impl CycleCosts {
    /// MC68040 timings.
    pub const M68040: Self = Self {
        fmove: 4,
        fsqrt: 109,
        fabs: 3,
        fneg: 3,
        fdiv: 43,
        fadd: 9,
        fmul: 11,
        fsub: 9,
        fcmp: 7,
        ftst: 7,
        fmove_to_memory: 12,
        fmove_control: 10,
        fmovem_per_register: 2,
        fbcc: 7,
    };
}

impl Default for CycleCosts {
    fn default() -> Self {
        Self::M68040
    }
}
