//! General FPU arithmetic: FMOVE, FSQRT, FABS, FNEG, FDIV, FADD, FMUL,
//! FSUB, FCMP and FTST into a floating register.

use crate::bus::FpuBus;
use crate::cpu::Cpu68040;
use crate::decode::{Opmode, Source};
use crate::error::FpuError;
use crate::flags::Fpcc;
use crate::registers::FpReg;

impl Cpu68040 {
    pub(crate) fn exec_fpgen<B: FpuBus>(
        &mut self,
        bus: &mut B,
        source: Source,
        dst: usize,
        opmode: Opmode,
    ) -> Result<(), FpuError> {
        let source = match source {
            Source::Register(r) => self.fpu.fp[r].to_f64(),
            Source::Memory(format) => {
                let raw = self.read_ea(bus, self.ea_field(), format.size())?;
                format.load(raw)
            }
        };
        let dest = self.fpu.fp[dst].to_f64();

        match opmode {
            Opmode::Move => self.fpu.fp[dst] = source.into(),
            Opmode::Sqrt => self.set_fp_with_flags(dst, source.sqrt()),
            Opmode::Abs => self.set_fp_with_flags(dst, source.abs()),
            Opmode::Neg => self.set_fp_with_flags(dst, -source),
            // FDIV leaves the condition codes alone.
            Opmode::Div => self.fpu.fp[dst] = (dest / source).into(),
            Opmode::Add => self.set_fp_with_flags(dst, dest + source),
            Opmode::Mul => self.set_fp_with_flags(dst, dest * source),
            Opmode::Sub => self.set_fp_with_flags(dst, dest - source),
            Opmode::Cmp => self.set_condition_codes(FpReg::from_f64(dest - source)),
            Opmode::Tst => self.set_condition_codes(FpReg::from_f64(source)),
        }

        self.use_cycles(opmode.cycles(self.costs()));
        Ok(())
    }

    fn set_fp_with_flags(&mut self, dst: usize, value: f64) {
        let value = FpReg::from_f64(value);
        self.fpu.fp[dst] = value;
        self.set_condition_codes(value);
    }

    /// Update FPSR's condition byte from a value's bit pattern.
    pub(crate) fn set_condition_codes(&mut self, value: FpReg) {
        self.fpu.fpsr = Fpcc::derive(self.fpu.fpsr, value);
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::SimpleBus;
    use crate::cpu::Cpu68040;
    use crate::decode::{Opmode, Source};
    use crate::flags::{FPCC_MASK, I, N, NAN, Z};
    use crate::format::DataFormat;

    fn run(cpu: &mut Cpu68040, source: Source, dst: usize, opmode: Opmode) {
        let mut bus = SimpleBus::new();
        cpu.exec_fpgen(&mut bus, source, dst, opmode).unwrap();
    }

    #[test]
    fn add_sets_no_flags_for_positive_result() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[0] = 2.0.into();
        cpu.fpu.fp[1] = 3.0.into();
        cpu.fpu.fpsr = Z | N;

        run(&mut cpu, Source::Register(1), 0, Opmode::Add);
        assert_eq!(cpu.fpu.fp[0].to_f64(), 5.0);
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, 0);
        assert_eq!(cpu.total_cycles(), 9);
    }

    #[test]
    fn compare_leaves_destination() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[2] = 1.0.into();
        cpu.fpu.fp[3] = 1.0.into();

        run(&mut cpu, Source::Register(3), 2, Opmode::Cmp);
        assert_eq!(cpu.fpu.fp[2].to_f64(), 1.0);
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, Z);
        assert_eq!(cpu.total_cycles(), 7);
    }

    #[test]
    fn compare_less_than_sets_negative() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[0] = 1.0.into();
        cpu.fpu.fp[1] = 4.0.into();

        run(&mut cpu, Source::Register(1), 0, Opmode::Cmp);
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, N);
    }

    #[test]
    fn divide_does_not_touch_condition_codes() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[0] = 1.0.into();
        cpu.fpu.fp[1] = 0.0.into();
        cpu.fpu.fpsr = NAN;

        run(&mut cpu, Source::Register(1), 0, Opmode::Div);
        assert_eq!(cpu.fpu.fp[0].to_f64(), f64::INFINITY);
        // An infinite quotient would set I if flags were derived.
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, NAN);
        assert_eq!(cpu.total_cycles(), 43);
    }

    #[test]
    fn move_does_not_touch_condition_codes() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[4] = (-0.0).into();
        cpu.fpu.fpsr = I;

        run(&mut cpu, Source::Register(4), 5, Opmode::Move);
        assert_eq!(cpu.fpu.fp[5].bits(), (-0.0f64).to_bits());
        assert_eq!(cpu.fpu.fpsr, I);
        assert_eq!(cpu.total_cycles(), 4);
    }

    #[test]
    fn unary_operations_flag_their_result() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[0] = (-9.0).into();

        run(&mut cpu, Source::Register(0), 1, Opmode::Abs);
        assert_eq!(cpu.fpu.fp[1].to_f64(), 9.0);
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, 0);

        run(&mut cpu, Source::Register(1), 2, Opmode::Sqrt);
        assert_eq!(cpu.fpu.fp[2].to_f64(), 3.0);

        run(&mut cpu, Source::Register(2), 3, Opmode::Neg);
        assert_eq!(cpu.fpu.fp[3].to_f64(), -3.0);
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, N);

        run(&mut cpu, Source::Register(0), 4, Opmode::Sqrt);
        assert!(cpu.fpu.fp[4].to_f64().is_nan());
        assert_ne!(cpu.fpu.fpsr & NAN, 0);
        assert_eq!(cpu.total_cycles(), 3 + 109 + 3 + 109);
    }

    #[test]
    fn test_flags_source_only() {
        let mut cpu = Cpu68040::new();
        cpu.fpu.fp[6] = 8.0.into();
        cpu.fpu.fp[7] = f64::NEG_INFINITY.into();

        run(&mut cpu, Source::Register(7), 6, Opmode::Tst);
        assert_eq!(cpu.fpu.fp[6].to_f64(), 8.0);
        assert_eq!(cpu.fpu.fpsr & FPCC_MASK, N | I);
    }

    #[test]
    fn memory_source_converts_integer_formats() {
        let mut cpu = Cpu68040::new();
        let mut bus = SimpleBus::new();
        cpu.ir = 0xF200; // EA = D0
        cpu.regs.d[0] = 0xFFFF_FF80;
        cpu.fpu.fp[0] = 100.0.into();

        cpu.exec_fpgen(&mut bus, Source::Memory(DataFormat::Byte), 0, Opmode::Sub)
            .unwrap();
        assert_eq!(cpu.fpu.fp[0].to_f64(), 228.0);

        cpu.exec_fpgen(&mut bus, Source::Memory(DataFormat::Word), 0, Opmode::Mul)
            .unwrap();
        assert_eq!(cpu.fpu.fp[0].to_f64(), 228.0 * -128.0);
    }

    #[test]
    fn rejected_source_leaves_registers_and_cycles() {
        let mut cpu = Cpu68040::new();
        let mut bus = SimpleBus::new();
        cpu.ir = 0xF208; // EA = A0, never readable
        cpu.fpu.fp[0] = 1.0.into();

        let err = cpu
            .exec_fpgen(&mut bus, Source::Memory(DataFormat::Long), 0, Opmode::Add)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::IllegalAddressing);
        assert_eq!(cpu.fpu.fp[0].to_f64(), 1.0);
        assert_eq!(cpu.total_cycles(), 0);
    }
}
