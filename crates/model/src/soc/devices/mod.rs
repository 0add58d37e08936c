//! Memory-mapped I/O devices.
//!
//! This module contains the device models that can be attached to the bus.
//! The only device implemented here is the 16550-compatible UART; the trait
//! seam admits further devices without touching the interconnect.

/// UART 16550-compatible serial port.
pub mod uart;

pub use uart::Uart;

pub use crate::soc::traits::Device;
