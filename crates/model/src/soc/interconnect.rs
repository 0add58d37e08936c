//! System interconnect (bus) for MMIO access.
//!
//! This module implements the bus that routes physical address accesses to
//! devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted
//!    for lookup.
//! 2. **Access routing:** Read/write by physical address with a last-device
//!    hint for repeated accesses to the same window.
//! 3. **Open-bus policy:** Reads of unclaimed addresses return `0xFF` on
//!    every lane, matching the undecoded-offset behavior of the devices
//!    themselves; writes are dropped.

use crate::common::constants::OPEN_BUS_VALUE;
use crate::soc::devices::Uart;
use crate::soc::traits::Device;

/// System bus connecting the CPU side and devices; routes accesses by
/// physical address.
pub struct Bus {
    /// Registered MMIO devices (boxed for dynamic dispatch).
    devices: Vec<Box<dyn Device + Send + Sync>>,
    last_device_idx: usize,
}

impl Bus {
    /// Creates an empty bus; add devices with [`Bus::add_device`].
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
        }
    }

    /// Registers a device on the bus; devices are sorted by base address for
    /// lookup.
    pub fn add_device(&mut self, dev: Box<dyn Device + Send + Sync>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Returns whether the given physical address is claimed by any device.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        self.devices.iter().any(|dev| {
            let (start, size) = dev.address_range();
            paddr >= start && paddr < start + size
        })
    }

    /// Returns the first registered UART, if any, for harness-side access to
    /// model-specific operations.
    pub fn find_uart(&mut self) -> Option<&mut Uart> {
        for dev in &mut self.devices {
            if let Some(uart) = dev.as_uart_mut() {
                return Some(uart);
            }
        }
        None
    }

    fn find_device(&mut self, paddr: u64) -> Option<(&mut Box<dyn Device + Send + Sync>, u64)> {
        if self.last_device_idx < self.devices.len() {
            let (start, size) = self.devices[self.last_device_idx].address_range();
            if paddr >= start && paddr < start + size {
                return Some((&mut self.devices[self.last_device_idx], paddr - start));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            let (start, size) = dev.address_range();
            if paddr >= start && paddr < start + size {
                self.last_device_idx = i;
                return Some((dev, paddr - start));
            }
        }
        None
    }

    /// Reads one byte at the given physical address; `0xFF` if unclaimed.
    pub fn read_u8(&mut self, paddr: u64) -> u8 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u8(offset)
        } else {
            OPEN_BUS_VALUE
        }
    }
    /// Reads two bytes (little-endian) at the given physical address;
    /// `0xFF` if unclaimed.
    pub fn read_u16(&mut self, paddr: u64) -> u16 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u16(offset)
        } else {
            u16::from(OPEN_BUS_VALUE)
        }
    }
    /// Reads four bytes (little-endian) at the given physical address;
    /// `0xFF` if unclaimed.
    pub fn read_u32(&mut self, paddr: u64) -> u32 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u32(offset)
        } else {
            u32::from(OPEN_BUS_VALUE)
        }
    }
    /// Reads eight bytes (little-endian) at the given physical address;
    /// `0xFF` if unclaimed.
    pub fn read_u64(&mut self, paddr: u64) -> u64 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u64(offset)
        } else {
            u64::from(OPEN_BUS_VALUE)
        }
    }
    /// Writes one byte at the given physical address; no-op if unclaimed.
    pub fn write_u8(&mut self, paddr: u64, val: u8) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u8(offset, val);
        }
    }
    /// Writes two bytes (little-endian) at the given physical address;
    /// no-op if unclaimed.
    pub fn write_u16(&mut self, paddr: u64, val: u16) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u16(offset, val);
        }
    }
    /// Writes four bytes (little-endian) at the given physical address;
    /// no-op if unclaimed.
    pub fn write_u32(&mut self, paddr: u64, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u32(offset, val);
        }
    }
    /// Writes eight bytes (little-endian) at the given physical address;
    /// no-op if unclaimed.
    pub fn write_u64(&mut self, paddr: u64, val: u64) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u64(offset, val);
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
