//! Host memory interface for the FPU.
//!
//! The FPU never owns memory. Every operand access goes through [`FpuBus`],
//! which the host implements on top of its own address decoding. Accesses
//! are big-endian and 32-bit addressed; 64-bit and extended operands are
//! built from consecutive long accesses by the effective-address resolver.

/// Memory and trace-control services the FPU consumes from the host.
pub trait FpuBus {
    /// Read a byte.
    fn read_byte(&mut self, addr: u32) -> u8;

    /// Read a big-endian word.
    fn read_word(&mut self, addr: u32) -> u16;

    /// Read a big-endian long word.
    fn read_long(&mut self, addr: u32) -> u32;

    /// Write a byte.
    fn write_byte(&mut self, addr: u32, value: u8);

    /// Write a big-endian word.
    fn write_word(&mut self, addr: u32, value: u16);

    /// Write a big-endian long word.
    fn write_long(&mut self, addr: u32, value: u32);

    /// Called before a taken FBcc jumps, so the host can cancel a pending
    /// "trace on change of flow" for this step.
    fn auto_disable_trace(&mut self) {}
}

/// Flat RAM bus covering a 24-bit address space.
///
/// Addresses wrap at 16 MB. Used by tests and by hosts that only need
/// plain memory behind the FPU.
#[derive(Debug, Clone)]
pub struct SimpleBus {
    data: Vec<u8>,
    /// Number of times the trace auto-disable hook has fired.
    pub trace_disables: u32,
}

const ADDRESS_MASK: u32 = 0x00FF_FFFF;

impl SimpleBus {
    /// Create a zero-filled 16 MB bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: vec![0; ADDRESS_MASK as usize + 1],
            trace_disables: 0,
        }
    }

    /// Read a byte without any side effects.
    #[must_use]
    pub fn peek(&self, addr: u32) -> u8 {
        self.data[(addr & ADDRESS_MASK) as usize]
    }

    /// Write a byte without any side effects.
    pub fn poke(&mut self, addr: u32, value: u8) {
        self.data[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Copy bytes into memory starting at `addr`.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            self.poke(addr.wrapping_add(i as u32), b);
        }
    }

    /// Copy big-endian words into memory starting at `addr`.
    pub fn load_words(&mut self, addr: u32, words: &[u16]) {
        for (i, &w) in words.iter().enumerate() {
            let base = addr.wrapping_add(i as u32 * 2);
            self.poke(base, (w >> 8) as u8);
            self.poke(base.wrapping_add(1), w as u8);
        }
    }

    /// Read a big-endian long without any side effects.
    #[must_use]
    pub fn peek_long(&self, addr: u32) -> u32 {
        (0..4).fold(0, |acc, i| {
            (acc << 8) | u32::from(self.peek(addr.wrapping_add(i)))
        })
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl FpuBus for SimpleBus {
    fn read_byte(&mut self, addr: u32) -> u8 {
        self.peek(addr)
    }

    fn read_word(&mut self, addr: u32) -> u16 {
        u16::from(self.peek(addr)) << 8 | u16::from(self.peek(addr.wrapping_add(1)))
    }

    fn read_long(&mut self, addr: u32) -> u32 {
        self.peek_long(addr)
    }

    fn write_byte(&mut self, addr: u32, value: u8) {
        self.poke(addr, value);
    }

    fn write_word(&mut self, addr: u32, value: u16) {
        self.poke(addr, (value >> 8) as u8);
        self.poke(addr.wrapping_add(1), value as u8);
    }

    fn write_long(&mut self, addr: u32, value: u32) {
        self.write_word(addr, (value >> 16) as u16);
        self.write_word(addr.wrapping_add(2), value as u16);
    }

    fn auto_disable_trace(&mut self) {
        self.trace_disables += 1;
    }
}
