//! Effective address resolution for FPU operands.
//!
//! Every FPU instruction goes through the same two steps: check that the
//! (mode, size, direction) triple is legal, then compute where the operand
//! lives. The check runs first, so a rejected access has not consumed any
//! extension words or stepped any address register. Extension words come
//! from the instruction stream at PC.

use log::debug;

use crate::addressing::{Access, AddrMode, Size};
use crate::bus::FpuBus;
use crate::cpu::Cpu68040;
use crate::error::FpuError;
use crate::registers::FpReg;

/// Where a resolved operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    DataReg(usize),
    AddrReg(usize),
    Memory(u32),
    /// Operand follows in the instruction stream.
    Immediate,
}

impl Cpu68040 {
    /// Read an operand through the EA field `ea`, right-aligned in a u64.
    ///
    /// Doubles come back as their raw 64-bit pattern. Byte and word
    /// operands are zero-extended; sign handling is up to the caller.
    pub fn read_ea<B: FpuBus>(
        &mut self,
        bus: &mut B,
        ea: u8,
        size: Size,
    ) -> Result<u64, FpuError> {
        let loc = self.resolve_ea(bus, ea, size, Access::Read)?;
        Ok(self.read_location(bus, loc, size))
    }

    /// Write the low `size` bytes of `value` through the EA field `ea`.
    pub fn write_ea<B: FpuBus>(
        &mut self,
        bus: &mut B,
        ea: u8,
        size: Size,
        value: u64,
    ) -> Result<(), FpuError> {
        let loc = self.resolve_ea(bus, ea, size, Access::Write)?;
        self.write_location(bus, loc, size, value);
        Ok(())
    }

    /// Read a 96-bit extended image and map it onto a register.
    ///
    /// Only the first two longs are used, taken as a double pattern. The
    /// real extended encoding is not reconstructed.
    pub fn read_ea_fpe<B: FpuBus>(&mut self, bus: &mut B, ea: u8) -> Result<FpReg, FpuError> {
        let loc = self.resolve_ea(bus, ea, Size::Extended, Access::Read)?;
        debug!("extended read at {loc:?} truncated to double");
        Ok(FpReg::from_bits(self.read_location(bus, loc, Size::Extended)))
    }

    /// Write a register as a 96-bit extended image (double pattern, then a zero long).
    pub fn write_ea_fpe<B: FpuBus>(
        &mut self,
        bus: &mut B,
        ea: u8,
        value: FpReg,
    ) -> Result<(), FpuError> {
        let loc = self.resolve_ea(bus, ea, Size::Extended, Access::Write)?;
        debug!("extended write at {loc:?} stored as double");
        self.write_location(bus, loc, Size::Extended, value.bits());
        Ok(())
    }

    fn resolve_ea<B: FpuBus>(
        &mut self,
        bus: &mut B,
        ea: u8,
        size: Size,
        access: Access,
    ) -> Result<Location, FpuError> {
        let Some(mode) = AddrMode::from_ea(ea).filter(|m| m.is_legal(size, access)) else {
            return Err(self.illegal_ea(ea, size, access));
        };

        let loc = match mode {
            AddrMode::DataReg(r) => Location::DataReg(r as usize),
            AddrMode::AddrReg(r) => Location::AddrReg(r as usize),
            AddrMode::AddrInd(r) => Location::Memory(self.regs.a[r as usize]),
            AddrMode::AddrIndPostInc(r) => {
                let addr = self.regs.a[r as usize];
                self.regs.a[r as usize] = addr.wrapping_add(size.bytes());
                Location::Memory(addr)
            }
            AddrMode::AddrIndPreDec(r) => {
                let addr = self.regs.a[r as usize].wrapping_sub(size.bytes());
                self.regs.a[r as usize] = addr;
                Location::Memory(addr)
            }
            AddrMode::AddrIndDisp(r) => {
                let base = self.regs.a[r as usize];
                let disp = self.fetch_imm_16(bus) as i16;
                Location::Memory(base.wrapping_add_signed(i32::from(disp)))
            }
            AddrMode::AddrIndIndex(r) => {
                let base = self.regs.a[r as usize];
                Location::Memory(self.index_ea(bus, base))
            }
            AddrMode::AbsShort => Location::Memory(self.fetch_imm_16(bus) as i16 as i32 as u32),
            AddrMode::AbsLong => Location::Memory(self.fetch_imm_32(bus)),
            AddrMode::PcDisp => {
                // Base is the address of the displacement word.
                let base = self.regs.pc;
                let disp = self.fetch_imm_16(bus) as i16;
                Location::Memory(base.wrapping_add_signed(i32::from(disp)))
            }
            AddrMode::PcIndex => {
                let base = self.regs.pc;
                Location::Memory(self.index_ea(bus, base))
            }
            AddrMode::Immediate => Location::Immediate,
        };
        Ok(loc)
    }

    /// Indexed EA from the brief or full extension word at PC.
    fn index_ea<B: FpuBus>(&mut self, bus: &mut B, base: u32) -> u32 {
        let ext = self.fetch_imm_16(bus);

        if ext & 0x0100 == 0 {
            // Brief format: d8(base, Xn.size*scale)
            let disp = i32::from(ext as u8 as i8);
            return base
                .wrapping_add(self.index_value(ext))
                .wrapping_add_signed(disp);
        }

        let base = if ext & 0x0080 != 0 { 0 } else { base };
        let xn = if ext & 0x0040 != 0 {
            0
        } else {
            self.index_value(ext)
        };
        let bd = match (ext >> 4) & 0x03 {
            2 => self.fetch_imm_16(bus) as i16 as i32 as u32,
            3 => self.fetch_imm_32(bus),
            _ => 0,
        };

        let iis = ext & 0x07;
        if iis == 0 {
            return base.wrapping_add(bd).wrapping_add(xn);
        }

        let od = match iis & 0x03 {
            2 => self.fetch_imm_16(bus) as i16 as i32 as u32,
            3 => self.fetch_imm_32(bus),
            _ => 0,
        };

        if iis & 0x04 != 0 {
            // Post-indexed
            bus.read_long(base.wrapping_add(bd))
                .wrapping_add(xn)
                .wrapping_add(od)
        } else {
            // Pre-indexed
            bus.read_long(base.wrapping_add(bd).wrapping_add(xn))
                .wrapping_add(od)
        }
    }

    /// Scaled index register value from an index extension word.
    fn index_value(&self, ext: u16) -> u32 {
        let reg = ((ext >> 12) & 0x07) as usize;
        let raw = if ext & 0x8000 != 0 {
            self.regs.a[reg]
        } else {
            self.regs.d[reg]
        };
        let xn = if ext & 0x0800 != 0 {
            raw
        } else {
            raw as u16 as i16 as i32 as u32
        };
        xn << ((ext >> 9) & 0x03)
    }

    fn read_location<B: FpuBus>(&mut self, bus: &mut B, loc: Location, size: Size) -> u64 {
        match loc {
            Location::DataReg(r) => {
                let d = self.regs.d[r];
                match size {
                    Size::Byte => u64::from(d & 0xFF),
                    Size::Word => u64::from(d & 0xFFFF),
                    _ => u64::from(d),
                }
            }
            Location::AddrReg(r) => u64::from(self.regs.a[r]),
            Location::Memory(addr) => match size {
                Size::Byte => u64::from(bus.read_byte(addr)),
                Size::Word => u64::from(bus.read_word(addr)),
                Size::Long => u64::from(bus.read_long(addr)),
                // The extended stub reads the double pattern and skips the last long.
                Size::Double | Size::Extended => {
                    let hi = bus.read_long(addr);
                    let lo = bus.read_long(addr.wrapping_add(4));
                    (u64::from(hi) << 32) | u64::from(lo)
                }
            },
            Location::Immediate => match size {
                Size::Byte => u64::from(self.fetch_imm_16(bus) & 0xFF),
                Size::Word => u64::from(self.fetch_imm_16(bus)),
                Size::Long => u64::from(self.fetch_imm_32(bus)),
                Size::Double | Size::Extended => {
                    let hi = self.fetch_imm_32(bus);
                    let lo = self.fetch_imm_32(bus);
                    (u64::from(hi) << 32) | u64::from(lo)
                }
            },
        }
    }

    fn write_location<B: FpuBus>(&mut self, bus: &mut B, loc: Location, size: Size, value: u64) {
        match loc {
            Location::DataReg(r) => match size {
                Size::Byte => self.regs.set_d_byte(r, value as u8),
                Size::Word => self.regs.set_d_word(r, value as u16),
                _ => self.regs.d[r] = value as u32,
            },
            Location::AddrReg(r) => self.regs.a[r] = value as u32,
            Location::Memory(addr) => match size {
                Size::Byte => bus.write_byte(addr, value as u8),
                Size::Word => bus.write_word(addr, value as u16),
                Size::Long => bus.write_long(addr, value as u32),
                Size::Double => {
                    bus.write_long(addr, (value >> 32) as u32);
                    bus.write_long(addr.wrapping_add(4), value as u32);
                }
                Size::Extended => {
                    bus.write_long(addr, (value >> 32) as u32);
                    bus.write_long(addr.wrapping_add(4), value as u32);
                    bus.write_long(addr.wrapping_add(8), 0);
                }
            },
            Location::Immediate => unreachable!("immediate operands are never writable"),
        }
    }

    fn illegal_ea(&self, ea: u8, size: Size, access: Access) -> FpuError {
        let err = FpuError::IllegalAddressing {
            mode: (ea >> 3) & 0x07,
            reg: ea & 0x07,
            size,
            access,
            pc: self.instr_start_pc,
        };
        debug!("{err}");
        err
    }
}

#[cfg(test)]
mod tests {
    use crate::addressing::Size;
    use crate::bus::SimpleBus;
    use crate::cpu::Cpu68040;
    use crate::error::ErrorKind;
    use crate::registers::FpReg;

    fn cpu_at(pc: u32) -> Cpu68040 {
        let mut cpu = Cpu68040::new();
        cpu.regs.pc = pc;
        cpu.instr_start_pc = pc.wrapping_sub(4);
        cpu
    }

    #[test]
    fn data_register_byte_write_keeps_upper_bits() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.d[3] = 0x1234_5678;

        cpu.write_ea(&mut bus, 0o03, Size::Byte, 0xAB).unwrap();
        assert_eq!(cpu.regs.d[3], 0x1234_56AB);
        cpu.write_ea(&mut bus, 0o03, Size::Word, 0xBEEF).unwrap();
        assert_eq!(cpu.regs.d[3], 0x1234_BEEF);
        assert_eq!(cpu.read_ea(&mut bus, 0o03, Size::Byte).unwrap(), 0xEF);
    }

    #[test]
    fn address_register_read_is_rejected_without_side_effects() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.a[1] = 0x2000;

        let err = cpu.read_ea(&mut bus, 0o11, Size::Byte).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalAddressing);
        assert_eq!(err.pc(), 0x0FFC);
        assert_eq!(cpu.regs.pc, 0x1000);
        assert_eq!(cpu.regs.a[1], 0x2000);
    }

    #[test]
    fn rejected_predecrement_does_not_step_register() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.a[2] = 0x3000;

        assert!(cpu.read_ea(&mut bus, 0o42, Size::Long).is_err());
        assert_eq!(cpu.regs.a[2], 0x3000);
    }

    #[test]
    fn postincrement_double_steps_by_eight() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        bus.load(0x4000, &[0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
        cpu.regs.a[0] = 0x4000;

        let raw = cpu.read_ea(&mut bus, 0o30, Size::Double).unwrap();
        assert_eq!(f64::from_bits(raw), 1.0);
        assert_eq!(cpu.regs.a[0], 0x4008);
    }

    #[test]
    fn stack_pointer_byte_steps_by_one() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.a[7] = 0x5000;

        cpu.write_ea(&mut bus, 0o47, Size::Byte, 0x42).unwrap();
        assert_eq!(cpu.regs.a[7], 0x4FFF);
        assert_eq!(bus.peek(0x4FFF), 0x42);
    }

    #[test]
    fn address_register_long_write_sets_register() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.a[3] = 0x2000;
        bus.load_words(0x2000, &[0x1111, 0x2222]);

        cpu.write_ea(&mut bus, 0o13, Size::Long, 0xDEAD_BEEF).unwrap();
        assert_eq!(cpu.regs.a[3], 0xDEAD_BEEF);
        assert_eq!(bus.peek_long(0x2000), 0x1111_2222);
        assert_eq!(cpu.regs.pc, 0x1000);
    }

    #[test]
    fn postincrement_word_write_steps_by_two() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.a[2] = 0x3000;

        cpu.write_ea(&mut bus, 0o32, Size::Word, 0xBEEF).unwrap();
        assert_eq!(cpu.regs.a[2], 0x3002);
        assert_eq!(bus.peek_long(0x3000) >> 16, 0xBEEF);
    }

    #[test]
    fn displacement_is_signed() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        bus.load_words(0x1000, &[0xFFFC]);
        cpu.regs.a[4] = 0x6004;

        cpu.write_ea(&mut bus, 0o54, Size::Long, 0xCAFE_BABE).unwrap();
        assert_eq!(bus.peek_long(0x6000), 0xCAFE_BABE);
        assert_eq!(cpu.regs.pc, 0x1002);
    }

    #[test]
    fn absolute_short_sign_extends() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        bus.load_words(0x1000, &[0x8000]);
        // 0xFFFF8000 wraps to 0xFF8000 on a 24-bit bus.
        bus.load_words(0xFF_8000, &[0x1234]);

        assert_eq!(cpu.read_ea(&mut bus, 0o70, Size::Word).unwrap(), 0x1234);
    }

    #[test]
    fn pc_displacement_is_relative_to_extension_word() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        bus.load_words(0x1000, &[0x0010]);
        bus.load_words(0x1010, &[0xDEAD, 0xBEEF]);

        assert_eq!(cpu.read_ea(&mut bus, 0o72, Size::Long).unwrap(), 0xDEAD_BEEF);
        assert_eq!(cpu.regs.pc, 0x1002);
    }

    #[test]
    fn pc_displacement_write_targets_extension_word_plus_disp() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        bus.load_words(0x1000, &[0x0010]);

        cpu.write_ea(&mut bus, 0o72, Size::Word, 0xABCD).unwrap();
        assert_eq!(bus.peek_long(0x1010) >> 16, 0xABCD);
        assert_eq!(cpu.regs.pc, 0x1002);

        cpu.regs.pc = 0x1000;
        cpu.write_ea(&mut bus, 0o72, Size::Byte, 0x5A).unwrap();
        assert_eq!(bus.peek(0x1010), 0x5A);
        assert_eq!(bus.peek(0x1011), 0xCD);
        assert_eq!(cpu.regs.pc, 0x1002);
    }

    #[test]
    fn byte_immediate_uses_low_byte_of_a_word() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        bus.load_words(0x1000, &[0x00FE, 0x4000, 0x0000, 0x0000, 0x0000]);

        assert_eq!(cpu.read_ea(&mut bus, 0o74, Size::Byte).unwrap(), 0xFE);
        assert_eq!(cpu.regs.pc, 0x1002);
        let raw = cpu.read_ea(&mut bus, 0o74, Size::Double).unwrap();
        assert_eq!(f64::from_bits(raw), 2.0);
        assert_eq!(cpu.regs.pc, 0x100A);
    }

    #[test]
    fn brief_index_scales_and_sign_extends() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        // D2.W*4, d8 = -2
        bus.load_words(0x1000, &[0x2400 | 0x00FE]);
        cpu.regs.a[1] = 0x8000;
        cpu.regs.d[2] = 0xFFFF_0010;

        cpu.write_ea(&mut bus, 0o61, Size::Word, 0x5555).unwrap();
        assert_eq!(bus.peek_long(0x803E) >> 16, 0x5555);
    }

    #[test]
    fn full_index_memory_indirect_post_indexed() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        // Full format, A3.L index, bd word, post-indexed with word od.
        let ext = 0xB800 | 0x0100 | 0x0020 | 0x0006;
        bus.load_words(0x1000, &[ext, 0x0010, 0x0004]);
        cpu.regs.a[0] = 0x2000;
        cpu.regs.a[3] = 0x100;
        bus.load_words(0x2010, &[0x0000, 0x3000]);

        cpu.write_ea(&mut bus, 0o60, Size::Long, 0x0102_0304).unwrap();
        assert_eq!(bus.peek_long(0x3104), 0x0102_0304);
        assert_eq!(cpu.regs.pc, 0x1006);
    }

    #[test]
    fn full_index_with_base_suppressed() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        // Base and index suppressed, long bd, no memory indirection.
        bus.load_words(0x1000, &[0x01F0, 0x0000, 0x7000]);
        cpu.regs.a[5] = 0xFFFF;

        cpu.write_ea(&mut bus, 0o65, Size::Byte, 0x99).unwrap();
        assert_eq!(bus.peek(0x7000), 0x99);
    }

    #[test]
    fn extended_image_round_trips_through_the_stack() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        cpu.regs.a[6] = 0x9000;

        cpu.write_ea_fpe(&mut bus, 0o46, FpReg::from_f64(-0.5)).unwrap();
        assert_eq!(cpu.regs.a[6], 0x9000 - 12);
        assert_eq!(bus.peek_long(0x9000 - 4), 0);

        let value = cpu.read_ea_fpe(&mut bus, 0o36).unwrap();
        assert_eq!(value.to_f64(), -0.5);
        assert_eq!(cpu.regs.a[6], 0x9000);
    }

    #[test]
    fn pc_index_is_never_legal() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        assert!(cpu.read_ea(&mut bus, 0o73, Size::Long).is_err());
        assert!(cpu.write_ea(&mut bus, 0o73, Size::Long, 0).is_err());
        assert_eq!(cpu.regs.pc, 0x1000);
    }

    #[test]
    fn reserved_mode_seven_registers_are_rejected() {
        let mut cpu = cpu_at(0x1000);
        let mut bus = SimpleBus::new();
        for ea in [0o75, 0o76, 0o77] {
            assert!(cpu.read_ea(&mut bus, ea, Size::Long).is_err());
        }
    }
}
