//! System-on-chip integration.
//!
//! This module organizes the pieces that attach the UART model to an
//! enclosing simulated system: the MMIO device trait, the device
//! implementation itself, and the bus that routes physical addresses.

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use interconnect::Bus;
