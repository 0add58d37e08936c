//! Universal Asynchronous Receiver-Transmitter (UART).
//!
//! Implements a behavioral 16550-compatible UART for co-simulation. The
//! model keeps two bounded FIFOs and a byte-wide register file; reads at
//! offset 0 dequeue the receive FIFO, writes at offset 0 forward one
//! character to the host sink with an immediate flush. Interrupt generation,
//! divisor latching, and modem-control side effects are not modeled: IIR
//! reads as a constant "no interrupt pending" and the transmitter always
//! reports ready.

use std::io::{self, Write};
use std::sync::Mutex;

use tracing::{debug, trace};

use crate::common::constants::{
    IER_OFFSET, IIR_FCR_OFFSET, IIR_NO_INTERRUPT, LCR_OFFSET, LSR_FIFO_EMPTY, LSR_OFFSET,
    LSR_RX_READY, LSR_TX_READY, MCR_OFFSET, MSR_OFFSET, OPEN_BUS_VALUE, RBR_THR_OFFSET,
    RX_EMPTY_SENTINEL, SCR_OFFSET, TX_EMPTY_SENTINEL, UART_MMIO_SIZE,
};
use crate::common::fifo::Fifo;
use crate::config::UartConfig;
use crate::sim::clock::{Clock, WallClock};
use crate::soc::traits::Device;

/// Behavioral 16550 UART device.
///
/// Each instance owns its FIFOs, register cells, and collaborators
/// exclusively; multiple UARTs are supported by constructing multiple values.
/// The collaborator handles sit behind `Mutex` only to satisfy the `Sync`
/// bound of [`Device`]; the intended call discipline is single-threaded
/// cooperative, serialized by the enclosing harness's step function.
pub struct Uart {
    /// Base physical address of the device.
    base_addr: u64,
    /// Receive FIFO; filled by the producer side, drained by offset-0 reads.
    rx_fifo: Fifo,
    /// Transmit FIFO; mirrors egressed bytes for introspection only.
    tx_fifo: Fifo,
    /// Interrupt Enable Register.
    ier: u8,
    /// Interrupt Identification Register; constant "no interrupt pending".
    iir: u8,
    /// FIFO Control Register (write-side alias of offset 2; no further effect).
    fcr: u8,
    /// Line Control Register.
    lcr: u8,
    /// Modem Control Register.
    mcr: u8,
    /// Modem Status Register (read-only, stays zero).
    msr: u8,
    /// Scratch Register.
    scr: u8,
    /// Seed bytes retained so `reset` can re-inject them.
    seed: Vec<u8>,
    /// Minimum gap between heartbeat lines in milliseconds.
    heartbeat_interval_ms: u32,
    /// Uptime at which the last heartbeat line was emitted.
    last_heartbeat: u32,
    /// Monotonic time source consulted by the heartbeat.
    clock: Mutex<Box<dyn Clock + Send>>,
    /// Host sink receiving egressed characters; flushed after every byte.
    chr_sink: Mutex<Box<dyn Write + Send>>,
    /// Line-oriented sink for heartbeat diagnostics; never flushed here.
    diag_sink: Mutex<Box<dyn Write + Send>>,
}

impl Uart {
    /// Creates a UART with the default collaborators: a wall clock,
    /// character egress to stdout (or stderr per the config), and
    /// diagnostics to stderr.
    ///
    /// Construction performs the full init sequence: FIFOs and registers are
    /// reset and the configured seed script is pushed into the RX FIFO.
    pub fn new(config: &UartConfig) -> Self {
        let chr_sink: Box<dyn Write + Send> = if config.to_stderr {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        Self::with_io(
            config,
            Box::new(WallClock::new()),
            chr_sink,
            Box::new(io::stderr()),
        )
    }

    /// Creates a UART with caller-supplied collaborators.
    ///
    /// Harnesses use this to substitute a deterministic clock and capturing
    /// sinks for the wall clock and host streams.
    pub fn with_io(
        config: &UartConfig,
        clock: Box<dyn Clock + Send>,
        chr_sink: Box<dyn Write + Send>,
        diag_sink: Box<dyn Write + Send>,
    ) -> Self {
        let mut uart = Self {
            base_addr: config.base_addr,
            rx_fifo: Fifo::new(),
            tx_fifo: Fifo::new(),
            ier: 0,
            iir: IIR_NO_INTERRUPT,
            fcr: 0,
            lcr: 0,
            mcr: 0,
            msr: 0,
            scr: 0,
            seed: config.seed.bytes().to_vec(),
            heartbeat_interval_ms: config.heartbeat_interval_ms,
            last_heartbeat: 0,
            clock: Mutex::new(clock),
            chr_sink: Mutex::new(chr_sink),
            diag_sink: Mutex::new(diag_sink),
        };
        uart.seed_rx();
        debug!(base_addr = uart.base_addr, "UART initialized");
        uart
    }

    /// Reads the register at `offset`.
    ///
    /// Offset 0 dequeues the RX FIFO (sentinel `0xFF` when empty); offset 5
    /// synthesizes LSR. Offsets outside `[0, 7]` read as `0xFF`; this
    /// tolerates bus decoding slop from the hardware side.
    pub fn read_reg(&mut self, offset: u8) -> u8 {
        match offset {
            RBR_THR_OFFSET => self.rx_fifo.pop().unwrap_or(RX_EMPTY_SENTINEL),
            IER_OFFSET => self.ier,
            IIR_FCR_OFFSET => self.iir,
            LCR_OFFSET => self.lcr,
            MCR_OFFSET => self.mcr,
            LSR_OFFSET => self.lsr(),
            MSR_OFFSET => self.msr,
            SCR_OFFSET => self.scr,
            _ => OPEN_BUS_VALUE,
        }
    }

    /// Writes `data` to the register at `offset`.
    ///
    /// Offset 0 egresses one character. LSR and MSR are read-only; writes to
    /// them, like writes outside `[0, 7]`, are silently discarded.
    pub fn write_reg(&mut self, offset: u8, data: u8) {
        match offset {
            RBR_THR_OFFSET => self.putc(data),
            IER_OFFSET => self.ier = data,
            IIR_FCR_OFFSET => self.fcr = data,
            LCR_OFFSET => self.lcr = data,
            MCR_OFFSET => self.mcr = data,
            // LSR and MSR are read-only
            LSR_OFFSET | MSR_OFFSET => {}
            SCR_OFFSET => self.scr = data,
            _ => {}
        }
    }

    /// Synthesizes the Line Status Register from FIFO occupancy.
    ///
    /// The transmit-side bits are always asserted: the host sink is treated
    /// as infinitely fast, so a character written to THR is considered sent
    /// immediately. Receive-ready is the only dynamic contribution.
    fn lsr(&self) -> u8 {
        let mut lsr = LSR_TX_READY | LSR_FIFO_EMPTY;
        if !self.rx_fifo.is_empty() {
            lsr |= LSR_RX_READY;
        }
        lsr
    }

    /// Emits one character: mirrors it into the TX FIFO and writes it to the
    /// host sink with an immediate flush.
    ///
    /// The TX FIFO exists for introspection and never gates egress; from the
    /// bus's point of view it drains instantaneously.
    pub fn putc(&mut self, byte: u8) {
        if !self.tx_fifo.push(byte) {
            trace!(byte, "TX FIFO full; byte visible only in the egress stream");
        }
        if let Ok(mut sink) = self.chr_sink.lock() {
            let _ = sink.write_all(&[byte]);
            let _ = sink.flush();
        }
    }

    /// Returns the next queued RX byte, or the sentinel `0xFF` when empty.
    ///
    /// Also runs the heartbeat check; see [`Uart::try_getc`].
    pub fn getc(&mut self) -> u8 {
        self.try_getc().unwrap_or(RX_EMPTY_SENTINEL)
    }

    /// Returns the next queued RX byte, or `None` when empty.
    ///
    /// On each invocation the clock is consulted; if more than the configured
    /// interval has elapsed since the last diagnostic, one line of the form
    /// `uart16550: now = <seconds>s` is written to the diagnostic sink. The
    /// heartbeat is a liveness marker for operators watching long
    /// simulations and carries no functional meaning.
    pub fn try_getc(&mut self) -> Option<u8> {
        self.heartbeat();
        self.rx_fifo.pop()
    }

    /// Enqueues one byte on the producer side of the RX FIFO.
    ///
    /// Returns `false` when the FIFO was full and the byte was dropped.
    /// Drops are silent through every bus-visible surface.
    pub fn push_rx(&mut self, byte: u8) -> bool {
        let accepted = self.rx_fifo.push(byte);
        if !accepted {
            trace!(byte, "RX FIFO full; byte dropped");
        }
        accepted
    }

    /// Current (rx, tx) FIFO occupancies. No mutation; safe to call between
    /// bus operations.
    pub fn fifo_status(&self) -> (usize, usize) {
        (self.rx_fifo.len(), self.tx_fifo.len())
    }

    /// Debug-drains one byte from the TX FIFO, sentinel `0x00` when empty.
    pub fn tx_pop(&mut self) -> u8 {
        self.tx_fifo.pop().unwrap_or(TX_EMPTY_SENTINEL)
    }

    /// Re-runs the full init sequence on this instance: FIFOs cleared,
    /// registers reset (IIR back to "no interrupt pending"), seed script
    /// re-injected. The heartbeat timestamp is left alone.
    pub fn reset(&mut self) {
        self.rx_fifo.clear();
        self.tx_fifo.clear();
        self.ier = 0;
        self.iir = IIR_NO_INTERRUPT;
        self.fcr = 0;
        self.lcr = 0;
        self.mcr = 0;
        self.msr = 0;
        self.scr = 0;
        self.seed_rx();
        debug!("UART reset");
    }

    /// Tears down the FIFOs: both backing arrays are zeroed and the indices
    /// reset. Register cells are not touched; they are reset by the next
    /// [`Uart::reset`]. Idempotent.
    pub fn finish(&mut self) {
        self.rx_fifo.clear();
        self.tx_fifo.clear();
        debug!("UART FIFOs drained");
    }

    /// Pushes the configured seed script into the RX FIFO, truncating
    /// silently at capacity.
    fn seed_rx(&mut self) {
        let mut accepted = 0usize;
        for &byte in &self.seed {
            if self.rx_fifo.push(byte) {
                accepted += 1;
            }
        }
        if accepted < self.seed.len() {
            debug!(
                script_len = self.seed.len(),
                accepted, "seed script truncated at RX FIFO capacity"
            );
        }
    }

    /// Consults the clock and emits the periodic diagnostic line when due.
    fn heartbeat(&mut self) {
        let now = match self.clock.lock() {
            Ok(mut clock) => clock.uptime_ms(),
            Err(_) => return,
        };
        if now.wrapping_sub(self.last_heartbeat) > self.heartbeat_interval_ms {
            if let Ok(mut sink) = self.diag_sink.lock() {
                let _ = writeln!(sink, "uart16550: now = {}s", now / 1000);
            }
            self.last_heartbeat = now;
        }
    }
}

impl Device for Uart {
    /// Returns the device name.
    fn name(&self) -> &str {
        "UART0"
    }

    /// Returns the address range (Base, Size).
    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, UART_MMIO_SIZE)
    }

    /// Reads a byte from the register file.
    fn read_u8(&mut self, offset: u64) -> u8 {
        self.read_reg(u8::try_from(offset).unwrap_or(u8::MAX))
    }

    /// Reads a half-word (delegates to `read_u8`).
    fn read_u16(&mut self, offset: u64) -> u16 {
        u16::from(self.read_u8(offset))
    }
    /// Reads a word (delegates to `read_u8`).
    fn read_u32(&mut self, offset: u64) -> u32 {
        u32::from(self.read_u8(offset))
    }
    /// Reads a double-word (delegates to `read_u8`).
    fn read_u64(&mut self, offset: u64) -> u64 {
        u64::from(self.read_u8(offset))
    }

    /// Writes a byte to the register file.
    fn write_u8(&mut self, offset: u64, val: u8) {
        if let Ok(reg) = u8::try_from(offset) {
            self.write_reg(reg, val);
        }
    }

    /// Writes a half-word (delegates to `write_u8`).
    fn write_u16(&mut self, offset: u64, val: u16) {
        self.write_u8(offset, val as u8);
    }
    /// Writes a word (delegates to `write_u8`).
    fn write_u32(&mut self, offset: u64, val: u32) {
        self.write_u8(offset, val as u8);
    }
    /// Writes a double-word (delegates to `write_u8`).
    fn write_u64(&mut self, offset: u64, val: u64) {
        self.write_u8(offset, val as u8);
    }

    /// Returns a mutable reference to the UART if this device is one.
    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        Some(self)
    }
}
