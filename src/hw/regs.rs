// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 8-bit peripheral register access.
//!
//! - [`Register`] names one register of a peripheral (offset + reset value).
//! - [`RegisterAccess`] is what drivers are written against.
//! - [`Mmio`] talks to real memory-mapped hardware through volatile cells.
//! - [`RegisterFile`] is an in-memory register model for host tests and bench runs.

use core::marker::PhantomData;

use vcell::VolatileCell;

/// Largest register offset (exclusive) a [`RegisterFile`] can hold.
pub const MAX_REGISTERS: usize = 8;

/// One 8-bit register of a peripheral.
pub trait Register: Copy + 'static {
    /// Every register of the peripheral, in offset order.
    const ALL: &'static [Self];

    /// Byte offset from the peripheral base address.
    fn offset(self) -> usize;

    /// Value after power-on reset.
    fn reset_value(self) -> u8;
}

/// Read/write access to a peripheral's register block.
pub trait RegisterAccess {
    type Reg: Register;

    fn read(&self, reg: Self::Reg) -> u8;

    fn write(&mut self, reg: Self::Reg, value: u8);

    /// Read-modify-write.
    #[inline]
    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Self::Reg, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    #[inline]
    fn set_bits(&mut self, reg: Self::Reg, mask: u8) {
        self.modify(reg, |v| v | mask);
    }

    #[inline]
    fn clear_bits(&mut self, reg: Self::Reg, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }

    /// Replace the bits selected by `mask` with `value`.
    #[inline]
    fn write_field(&mut self, reg: Self::Reg, mask: u8, value: u8) {
        self.modify(reg, |v| (v & !mask) | (value & mask));
    }

    #[inline]
    fn is_set(&self, reg: Self::Reg, mask: u8) -> bool {
        (self.read(reg) & mask) != 0
    }
}

impl<T: RegisterAccess> RegisterAccess for &mut T {
    type Reg = T::Reg;

    #[inline]
    fn read(&self, reg: Self::Reg) -> u8 {
        (**self).read(reg)
    }

    #[inline]
    fn write(&mut self, reg: Self::Reg, value: u8) {
        (**self).write(reg, value)
    }
}

/// Memory-mapped register block at a fixed base address.
pub struct Mmio<R> {
    base: usize,
    _reg: PhantomData<R>,
}

impl<R: Register> Mmio<R> {
    /// Bind to the register block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a peripheral whose layout matches `R`, and the caller must
    /// not create a second handle to the same peripheral.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base,
            _reg: PhantomData,
        }
    }

    #[inline]
    fn cell(&self, reg: R) -> &VolatileCell<u8> {
        // VolatileCell<u8> is repr(transparent) over u8
        unsafe { &*((self.base + reg.offset()) as *const VolatileCell<u8>) }
    }
}

impl<R: Register> RegisterAccess for Mmio<R> {
    type Reg = R;

    #[inline]
    fn read(&self, reg: R) -> u8 {
        self.cell(reg).get()
    }

    #[inline]
    fn write(&mut self, reg: R, value: u8) {
        self.cell(reg).set(value)
    }
}

/// In-memory register model.
///
/// Starts at reset values and counts writes, so callers can check that an operation left the
/// hardware untouched.
#[derive(Clone, Debug)]
pub struct RegisterFile<R> {
    values: [u8; MAX_REGISTERS],
    writes: usize,
    _reg: PhantomData<R>,
}

impl<R: Register> RegisterFile<R> {
    /// Create a register file holding the power-on reset values.
    pub fn new() -> Self {
        let mut values = [0u8; MAX_REGISTERS];
        for &reg in R::ALL {
            values[reg.offset()] = reg.reset_value();
        }

        Self {
            values,
            writes: 0,
            _reg: PhantomData,
        }
    }

    /// Overwrite a register without counting it as a write (e.g. to simulate a hardware flag).
    pub fn preset(&mut self, reg: R, value: u8) {
        self.values[reg.offset()] = value;
    }

    /// Number of writes since creation or the last [`reset_write_count`](Self::reset_write_count).
    #[inline]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    #[inline]
    pub fn reset_write_count(&mut self) {
        self.writes = 0;
    }
}

impl<R: Register> Default for RegisterFile<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Register> RegisterAccess for RegisterFile<R> {
    type Reg = R;

    #[inline]
    fn read(&self, reg: R) -> u8 {
        self.values[reg.offset()]
    }

    #[inline]
    fn write(&mut self, reg: R, value: u8) {
        self.values[reg.offset()] = value;
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug)]
    enum TestReg {
        Ctrl,
        Data,
    }

    impl Register for TestReg {
        const ALL: &'static [Self] = &[TestReg::Ctrl, TestReg::Data];

        fn offset(self) -> usize {
            self as usize
        }

        fn reset_value(self) -> u8 {
            match self {
                TestReg::Ctrl => 0x00,
                TestReg::Data => 0x3F,
            }
        }
    }

    fn reset_table<R: Register>() -> &'static [R] {
        R::ALL
    }

    #[test]
    fn register_table_outlives_the_register_file() {
        let table = reset_table::<TestReg>();
        drop(RegisterFile::<TestReg>::new());
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].reset_value(), 0x3F);
    }

    #[test]
    fn register_file_starts_at_reset_values() {
        let regs = RegisterFile::<TestReg>::new();
        assert_eq!(regs.read(TestReg::Ctrl), 0x00);
        assert_eq!(regs.read(TestReg::Data), 0x3F);
        assert_eq!(regs.write_count(), 0);
    }

    #[test]
    fn modify_helpers_touch_only_masked_bits() {
        let mut regs = RegisterFile::<TestReg>::new();

        regs.set_bits(TestReg::Ctrl, 0b1001_0000);
        assert_eq!(regs.read(TestReg::Ctrl), 0b1001_0000);

        regs.clear_bits(TestReg::Ctrl, 0b1000_0000);
        assert_eq!(regs.read(TestReg::Ctrl), 0b0001_0000);

        regs.write_field(TestReg::Data, 0x0F, 0xA5);
        assert_eq!(regs.read(TestReg::Data), 0x35);

        assert!(regs.is_set(TestReg::Ctrl, 0b0001_0000));
        assert!(!regs.is_set(TestReg::Ctrl, 0b0000_0001));
        assert_eq!(regs.write_count(), 3);
    }

    #[test]
    fn preset_is_not_counted() {
        let mut regs = RegisterFile::<TestReg>::new();
        regs.preset(TestReg::Ctrl, 0x20);
        assert_eq!(regs.read(TestReg::Ctrl), 0x20);
        assert_eq!(regs.write_count(), 0);
    }

    fn poke<A: RegisterAccess<Reg = TestReg>>(mut access: A) {
        access.write(TestReg::Data, 0x11);
    }

    #[test]
    fn mutable_reference_forwards_access() {
        let mut regs = RegisterFile::<TestReg>::new();
        poke(&mut regs);
        assert_eq!(regs.read(TestReg::Data), 0x11);
        assert_eq!(regs.write_count(), 1);
    }

    #[test]
    fn mmio_reads_and_writes_backing_memory() {
        let mut backing = [0u8; 2];
        let mut mmio = unsafe { Mmio::<TestReg>::new(backing.as_mut_ptr() as usize) };

        mmio.write(TestReg::Data, 0x42);
        mmio.set_bits(TestReg::Ctrl, 0x01);
        assert_eq!(mmio.read(TestReg::Data), 0x42);
        assert_eq!(mmio.read(TestReg::Ctrl), 0x01);

        drop(mmio);
        assert_eq!(backing, [0x01, 0x42]);
    }
}
