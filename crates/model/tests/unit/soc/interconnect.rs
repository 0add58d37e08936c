//! Bus interconnect tests.
//!
//! Routing of physical addresses to the UART window, the open-bus policy for
//! unclaimed addresses, and harness-side downcasting.

use uartsim_core::soc::devices::Uart;
use uartsim_core::soc::interconnect::Bus;
use uartsim_core::{SeedScript, UartConfig};

const UART_BASE: u64 = 0x1000_0000;

fn bus_with_uart() -> Bus {
    let config = UartConfig {
        seed: SeedScript::Disabled,
        to_stderr: true,
        ..UartConfig::default()
    };
    let mut bus = Bus::new();
    bus.add_device(Box::new(Uart::new(&config)));
    bus
}

#[test]
fn routes_reads_into_the_uart_window() {
    let mut bus = bus_with_uart();
    assert_eq!(bus.read_u8(UART_BASE + 5), 0x60);
    assert_eq!(bus.read_u8(UART_BASE + 2), 0x01);
}

#[test]
fn routes_writes_into_the_uart_window() {
    let mut bus = bus_with_uart();
    bus.write_u8(UART_BASE + 7, 0xC3);
    assert_eq!(bus.read_u8(UART_BASE + 7), 0xC3);
}

#[test]
fn unclaimed_reads_are_open_bus() {
    let mut bus = bus_with_uart();
    assert_eq!(bus.read_u8(0x2000_0000), 0xFF);
    assert_eq!(bus.read_u16(0x2000_0000), 0x00FF);
    assert_eq!(bus.read_u32(0x2000_0000), 0x0000_00FF);
    assert_eq!(bus.read_u64(0x2000_0000), 0xFF);
}

#[test]
fn unclaimed_writes_are_dropped() {
    let mut bus = bus_with_uart();
    bus.write_u8(0x2000_0000, 0x55);
    bus.write_u64(0x3000_0000, 0x55);
    // The UART is untouched
    assert_eq!(bus.read_u8(UART_BASE + 5), 0x60);
}

#[test]
fn address_validity_tracks_device_windows() {
    let bus = bus_with_uart();
    assert!(bus.is_valid_address(UART_BASE));
    assert!(bus.is_valid_address(UART_BASE + 0xFF));
    assert!(!bus.is_valid_address(UART_BASE + 0x100));
    assert!(!bus.is_valid_address(0));
}

#[test]
fn uart_downcast_reaches_model_operations() {
    let mut bus = bus_with_uart();
    let uart = bus.find_uart().unwrap();
    assert!(uart.push_rx(b'Z'));
    assert_eq!(bus.read_u8(UART_BASE + 5), 0x61);
    assert_eq!(bus.read_u8(UART_BASE), b'Z');
}

#[test]
fn wide_accesses_route_like_bytes() {
    let mut bus = bus_with_uart();
    bus.write_u32(UART_BASE + 7, 0x1122_3344);
    assert_eq!(bus.read_u32(UART_BASE + 7), 0x44);
}

#[test]
fn empty_bus_is_fully_open() {
    let mut bus = Bus::new();
    assert_eq!(bus.read_u8(0), 0xFF);
    assert!(!bus.is_valid_address(0));
}
