//! Read-only inspection of FPU state by path.
//!
//! Debuggers and test harnesses query registers by name instead of
//! reaching into the structs. Queries never affect execution state.

use std::fmt;

use crate::cpu::Cpu68040;
use crate::flags::Fpcc;

/// A dynamically-typed value for state queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Numeric view of a floating register.
    F64(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v:#06X}"),
            Value::U32(v) => write!(f, "{v:#010X}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v:e}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

/// A component whose state can be inspected.
pub trait Observable {
    /// Query a property by dotted path, or `None` if the path is unknown.
    fn query(&self, path: &str) -> Option<Value>;

    /// All paths `query` answers.
    fn query_paths(&self) -> &'static [&'static str];
}

const FPU_QUERY_PATHS: &[&str] = &[
    "fp0", "fp1", "fp2", "fp3", "fp4", "fp5", "fp6", "fp7",
    "fp0.bits", "fp1.bits", "fp2.bits", "fp3.bits",
    "fp4.bits", "fp5.bits", "fp6.bits", "fp7.bits",
    "fpcr", "fpsr", "fpiar",
    "fpcc.n", "fpcc.z", "fpcc.i", "fpcc.nan",
    "pc", "opcode", "cycles",
];

impl Observable for Cpu68040 {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("fp") {
            let (index, bits) = match rest.strip_suffix(".bits") {
                Some(index) => (index, true),
                None => (rest, false),
            };
            if let Some(reg) = fp_index(index).map(|i| self.fpu.fp[i]) {
                return Some(if bits {
                    reg.bits().into()
                } else {
                    reg.to_f64().into()
                });
            }
        }

        let fpsr = self.fpu.fpsr;
        match path {
            "fpcr" => Some(self.fpu.fpcr.into()),
            "fpsr" => Some(fpsr.into()),
            "fpiar" => Some(self.fpu.fpiar.into()),
            "fpcc.n" => Some(Fpcc::n(fpsr).into()),
            "fpcc.z" => Some(Fpcc::z(fpsr).into()),
            "fpcc.i" => Some(Fpcc::i(fpsr).into()),
            "fpcc.nan" => Some(Fpcc::nan(fpsr).into()),
            "pc" => Some(self.regs.pc.into()),
            "opcode" => Some(Value::U16(self.ir)),
            "cycles" => Some(self.total_cycles().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        FPU_QUERY_PATHS
    }
}

fn fp_index(s: &str) -> Option<usize> {
    match s.as_bytes() {
        [d @ b'0'..=b'7'] => Some(usize::from(d - b'0')),
        _ => None,
    }
}
