//! FIFO unit tests.
//!
//! Exercises the bounded ring buffer directly: capacity, drop-on-full,
//! ordering, and the occupancy invariant under arbitrary operation mixes.

use proptest::collection::vec;
use proptest::prelude::*;
use uartsim_core::common::Fifo;

#[test]
fn new_fifo_is_empty() {
    let fifo = Fifo::new();
    assert!(fifo.is_empty());
    assert_eq!(fifo.len(), 0);
}

#[test]
fn capacity_is_one_less_than_depth() {
    assert_eq!(Fifo::capacity(), 15);
}

#[test]
fn push_pop_single_byte() {
    let mut fifo = Fifo::new();
    assert!(fifo.push(0x42));
    assert_eq!(fifo.len(), 1);
    assert_eq!(fifo.pop(), Some(0x42));
    assert!(fifo.is_empty());
}

#[test]
fn pop_empty_returns_none() {
    let mut fifo = Fifo::new();
    assert_eq!(fifo.pop(), None);
    // Popping empty must not disturb state
    assert!(fifo.push(1));
    assert_eq!(fifo.pop(), Some(1));
}

#[test]
fn fills_to_capacity_then_drops() {
    let mut fifo = Fifo::new();
    for i in 0..15 {
        assert!(fifo.push(i), "byte {i} should be accepted");
    }
    assert_eq!(fifo.len(), 15);
    // 16th byte is dropped
    assert!(!fifo.push(15));
    assert_eq!(fifo.len(), 15);
}

#[test]
fn drop_on_full_does_not_displace_queued_bytes() {
    let mut fifo = Fifo::new();
    for i in 0..15 {
        let _ = fifo.push(i);
    }
    let _ = fifo.push(0xEE);
    let _ = fifo.push(0xEF);
    for i in 0..15 {
        assert_eq!(fifo.pop(), Some(i));
    }
    assert_eq!(fifo.pop(), None);
}

#[test]
fn wraps_around_the_backing_array() {
    let mut fifo = Fifo::new();
    // Advance the indices past the end of the array several times over
    for round in 0u16..100 {
        let byte = (round & 0xFF) as u8;
        assert!(fifo.push(byte));
        assert_eq!(fifo.pop(), Some(byte));
    }
    assert!(fifo.is_empty());
}

#[test]
fn clear_empties_and_allows_reuse() {
    let mut fifo = Fifo::new();
    for i in 0..10 {
        let _ = fifo.push(i);
    }
    fifo.clear();
    assert!(fifo.is_empty());
    assert_eq!(fifo.len(), 0);
    assert!(fifo.push(0xAA));
    assert_eq!(fifo.pop(), Some(0xAA));
}

proptest! {
    /// Occupancy stays in `[0, capacity]` under any push/pop interleaving.
    #[test]
    fn occupancy_stays_bounded(ops in vec(any::<Option<u8>>(), 0..200)) {
        let mut fifo = Fifo::new();
        for op in ops {
            match op {
                Some(byte) => {
                    let _ = fifo.push(byte);
                }
                None => {
                    let _ = fifo.pop();
                }
            }
            prop_assert!(fifo.len() <= Fifo::capacity());
        }
    }

    /// With no interleaved reads, pops return exactly the accepted prefix of
    /// the pushed bytes, in push order.
    #[test]
    fn preserves_push_order(bytes in vec(any::<u8>(), 0..64)) {
        let mut fifo = Fifo::new();
        let mut accepted = Vec::new();
        for &byte in &bytes {
            if fifo.push(byte) {
                accepted.push(byte);
            }
        }
        prop_assert_eq!(accepted.len(), bytes.len().min(Fifo::capacity()));

        let mut popped = Vec::new();
        while let Some(byte) = fifo.pop() {
            popped.push(byte);
        }
        prop_assert_eq!(popped, accepted);
    }
}
