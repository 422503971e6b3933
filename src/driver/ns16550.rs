use core::fmt;

use spin::Mutex;
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

use super::{mmio::Mmio, DeviceDriver};
use crate::{config::UART_BASE, print};

register_bitfields! {
    u8,

    FCR [
        TxReset 2,
        RxReset 1,
        FifoEnable 0,
    ],

    LCR [
        DivisorLatch OFFSET(7) NUMBITS(1) [],
        WordLength OFFSET(0) NUMBITS(2) [
            Bits5 = 0b00,
            Bits8 = 0b11,
        ],
    ],

    LSR [
        TransmitterEmpty 6,
        HoldingEmpty 5,
        DataReady 0,
    ],
}

register_structs! {
    #[allow(non_snake_case)]
    RegisterBlock {
        (0x00 => RBR_THR: ReadWrite<u8>),
        (0x01 => IER: ReadWrite<u8>),
        (0x02 => FCR: WriteOnly<u8, FCR::Register>),
        (0x03 => LCR: ReadWrite<u8, LCR::Register>),
        (0x04 => MCR: ReadWrite<u8>),
        (0x05 => LSR: ReadOnly<u8, LSR::Register>),
        (0x06 => @END),
    }
}

type Registers = Mmio<RegisterBlock>;

struct Ns16550Inner {
    registers: Registers,
}

impl Ns16550Inner {
    const fn new(base: usize) -> Self {
        Self {
            registers: unsafe { Registers::new(base) },
        }
    }

    // Baud rate is left as the firmware programmed it.
    fn init(&mut self) {
        self.registers.IER.set(0);
        self.registers
            .LCR
            .write(LCR::DivisorLatch::CLEAR + LCR::WordLength::Bits8);
        self.registers
            .FCR
            .write(FCR::FifoEnable::SET + FCR::RxReset::SET + FCR::TxReset::SET);
    }

    fn putc(&mut self, c: u8) {
        while !self.registers.LSR.is_set(LSR::HoldingEmpty) {
            core::hint::spin_loop();
        }
        self.registers.RBR_THR.set(c);
    }
}

impl fmt::Write for Ns16550Inner {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            if c == b'\n' {
                self.putc(b'\r');
            }
            self.putc(c);
        }
        Ok(())
    }
}

pub struct Ns16550 {
    inner: Mutex<Ns16550Inner>,
}

impl Ns16550 {
    const fn new(base: usize) -> Self {
        Self {
            inner: Mutex::new(Ns16550Inner::new(base)),
        }
    }
}

impl print::Write for Ns16550 {
    fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result {
        fmt::Write::write_fmt(&mut *self.inner.lock(), args)
    }
}

impl DeviceDriver for Ns16550 {
    fn init(&self) {
        self.inner.lock().init();
    }
}

pub static UART: Ns16550 = Ns16550::new(UART_BASE);
