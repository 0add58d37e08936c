//! Common types and constants.
//!
//! This module collects the pieces shared across the model: the 16550
//! register map and status-bit constants, and the bounded byte FIFO used for
//! both the receive and transmit queues.

/// 16550 register offsets, status bits, sentinels, and sizing constants.
pub mod constants;

/// Bounded single-producer/single-consumer byte FIFO.
pub mod fifo;

pub use fifo::Fifo;
