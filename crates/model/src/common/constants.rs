//! 16550 UART constants.
//!
//! This module defines the register map and status-bit constants of the
//! modeled part. It includes:
//! 1. **Register offsets:** The eight byte-wide registers at offsets 0-7.
//! 2. **Status bits:** LSR and IIR bit positions reported by the model.
//! 3. **FIFO sizing:** Backing-array depth shared by the RX and TX queues.
//! 4. **Sentinels:** In-band values returned for reads that have no data.

/// Receiver Buffer Register (read) / Transmitter Holding Register (write).
pub const RBR_THR_OFFSET: u8 = 0x00;

/// Interrupt Enable Register.
pub const IER_OFFSET: u8 = 0x01;

/// Interrupt Identification Register (read) / FIFO Control Register (write).
pub const IIR_FCR_OFFSET: u8 = 0x02;

/// Line Control Register.
pub const LCR_OFFSET: u8 = 0x03;

/// Modem Control Register.
pub const MCR_OFFSET: u8 = 0x04;

/// Line Status Register.
pub const LSR_OFFSET: u8 = 0x05;

/// Modem Status Register.
pub const MSR_OFFSET: u8 = 0x06;

/// Scratch Register.
pub const SCR_OFFSET: u8 = 0x07;

/// Line Status Register: receiver has data.
pub const LSR_RX_READY: u8 = 0x01;

/// Line Status Register: Transmitter Holding Register empty.
pub const LSR_TX_READY: u8 = 0x20;

/// Line Status Register: transmitter and FIFO both empty.
pub const LSR_FIFO_EMPTY: u8 = 0x40;

/// Interrupt Identification Register: no interrupt pending (bit 0 set).
pub const IIR_NO_INTERRUPT: u8 = 0x01;

/// Backing-array depth of each FIFO (16 bytes, like the hardware part).
///
/// One slot is reserved so `head == tail` unambiguously means empty; usable
/// capacity is `FIFO_DEPTH - 1`.
pub const FIFO_DEPTH: usize = 16;

/// Value returned when the RX FIFO is read while empty.
pub const RX_EMPTY_SENTINEL: u8 = 0xFF;

/// Value returned when the TX FIFO is drained (debug path) while empty.
pub const TX_EMPTY_SENTINEL: u8 = 0x00;

/// Value returned for reads of undecoded register offsets or unclaimed bus
/// addresses, matching an open bus with pulled-up data lines.
pub const OPEN_BUS_VALUE: u8 = 0xFF;

/// Size in bytes of the MMIO window claimed by the UART on the bus.
pub const UART_MMIO_SIZE: u64 = 0x100;
