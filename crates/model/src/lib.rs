//! Behavioral 16550 UART model for co-simulation.
//!
//! This crate implements a register-accurate model of a 16550-compatible UART
//! intended to sit next to a hardware design-under-test or an instruction-set
//! simulator. It provides:
//! 1. **Register file:** Eight byte-wide registers (RBR/THR, IER, IIR/FCR, LCR,
//!    MCR, LSR, MSR, SCR) with 16550 read/write semantics.
//! 2. **FIFOs:** Bounded receive and transmit queues with silent drop-on-full,
//!    mirroring a hardware receive FIFO that overflows without back-pressure.
//! 3. **Egress:** Transmitted characters are forwarded to a host sink and
//!    flushed immediately so simulated software sees prompt console feedback.
//! 4. **SoC plumbing:** A `Device` MMIO trait and a small bus interconnect for
//!    attaching the model to an enclosing simulation harness.
//! 5. **Configuration:** JSON-deserializable config with seed-script selection
//!    for injecting scripted console input at boot.

/// Common types and constants (register offsets, status bits, FIFO).
pub mod common;
/// Model configuration (defaults, seed scripts, JSON ingestion).
pub mod config;
/// Simulation collaborators (monotonic time source).
pub mod sim;
/// System-on-chip integration (device trait, UART device, bus).
pub mod soc;

/// Model configuration; use `UartConfig::default()` or deserialize from JSON.
pub use crate::config::UartConfig;
/// Boot-time console input script selection.
pub use crate::config::SeedScript;
/// The UART device; construct with [`Uart::new`] or [`Uart::with_io`].
pub use crate::soc::devices::Uart;
/// System bus routing physical addresses to attached devices.
pub use crate::soc::interconnect::Bus;
