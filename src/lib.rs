//! AM2320 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the AM2320 I2C temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - CRC-16/MODBUS validation of every reply
//! - Temperature and humidity channels exposing unified sensor events and descriptors
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! Failed reads are reported in-band: [`Am2320::read_temperature`] and
//! [`Am2320::read_humidity`] return `NaN`, [`Am2320::read_register16`] returns
//! [`SENTINEL`]. [`Am2320::try_read_register16`] reports the cause as an [`Error`].
//!
//! # Example
//!
//! ```ignore
//! let mut am2320 = Am2320::new(i2c, delay, || millis(), 1, 2);
//!
//! let celsius = am2320.read_temperature();
//! if !celsius.is_nan() {
//!     // ...
//! }
//!
//! let event = am2320.humidity().event();
//! ```
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`I2c`] for bus access
//! - [`DelayNs`] for the wake-up and command delays
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs rejected replies
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod am2320;
pub mod channel;
pub mod crc;
pub mod error;
pub mod sensor;

pub use am2320::{ADDRESS, Am2320, REG_HUM_H, REG_TEMP_H, SENTINEL};
pub use channel::{Humidity, Temperature};
pub use crc::crc16;
pub use error::Error;
pub use sensor::{Clock, SensorDescriptor, SensorEvent, SensorType, SensorValue, UnifiedSensor};
