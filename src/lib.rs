#![no_std]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Blocking**: Built on the `embedded-hal` 1.0 I2C and delay traits
//! - **Type-safe**: Ranges and configuration registers are enums and structs
//! - **Explicit errors**: Bus failures and bad arguments are distinct [`Error`] variants
//! - **Range-aware**: Readings are scaled for the full-scale range the device is configured for
//!
//! ## Module Organization
//!
//! - [`accel`]: Accelerometer configuration and data reading
//! - [`gyro`]: Gyroscope configuration and data reading
//! - [`selftest`]: Built-in self-test and factory trim comparison
//!
//! Register access ([`Mpu6050::read_register`], [`Mpu6050::write_register`])
//! is public for anything the typed API does not cover.

use embedded_hal::{delay::DelayNs, i2c::*};

pub mod accel;
mod defs;
pub mod gyro;
pub(crate) mod rw;
pub mod selftest;
mod types;

pub use defs::{Reg, ADDR_I2C, MPU6050_WHO_AM_I};
use defs::*;
pub use types::*;

use accel::AccelRange;
use gyro::GyroRange;

/// Driver error type.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I2C communication error
  I2c(E),
  /// `WHO_AM_I` mismatch (expected 0x68)
  InvalidChipId(u8),
  /// Argument outside its valid range; nothing was written
  InvalidArgument,
}

/// MPU-6050 device driver instance.
///
/// Owns the I2C bus and delay provider. The only state kept on the host side
/// is the full-scale range of each sensor, which follows every config
/// register byte written or read through the driver and selects the
/// conversion divisor.
///
/// # Examples
///
/// ```no_run
/// # fn example<E: core::fmt::Debug>(i2c: impl embedded_hal::i2c::I2c<Error = E>, delay: impl embedded_hal::delay::DelayNs) -> Result<(), mpu6050::Error<E>> {
/// use mpu6050::Mpu6050;
///
/// let mut imu = Mpu6050::new(i2c, delay);
/// imu.initialize()?;
/// imu.check_id()?;
/// let g = imu.read_accel_z()?;
/// # let _ = g;
/// # Ok(())
/// # }
/// ```
pub struct Mpu6050<I, D: DelayNs> {
  i2c: I,
  delay: D,
  accel_range: AccelRange,
  gyro_range: GyroRange,
}

impl<I, D> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress>,
  D: DelayNs,
{
  /// Create a new driver instance.
  ///
  /// No bus traffic happens here. Ranges are assumed to be the power-on
  /// defaults (±2g, ±250°/s) until [`Mpu6050::initialize`] reads the device's
  /// actual configuration.
  pub fn new(i2c: I, delay: D) -> Self {
    Self { i2c, delay, accel_range: AccelRange::G2, gyro_range: GyroRange::DPS250 }
  }

  /// Consume the driver and return the bus and delay.
  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }
}

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Wake the device.
  ///
  /// Writes zero to `PWR_MGMT_1`, which clears sleep mode and selects the
  /// internal oscillator as clock source, then picks up whatever ranges the
  /// device is already configured for.
  pub fn initialize(&mut self) -> Result<(), Error<E>> {
    self.write_register(Reg::PwrMgmt1, PWR_MGMT_1_WAKE)?;
    self.sync_ranges()?;

    #[cfg(feature = "defmt")]
    defmt::debug!("mpu6050 awake");

    Ok(())
  }

  /// Read the `WHO_AM_I` register without validating it.
  pub fn who_am_i(&mut self) -> Result<u8, Error<E>> {
    self.read_register(Reg::WhoAmI)
  }

  /// Read `WHO_AM_I` and fail with [`Error::InvalidChipId`] unless it is `0x68`.
  pub fn check_id(&mut self) -> Result<(), Error<E>> {
    let id = self.who_am_i()?;
    if id != MPU6050_WHO_AM_I {
      #[cfg(feature = "defmt")]
      defmt::warn!("unexpected WHO_AM_I {=u8:#x}", id);
      return Err(Error::InvalidChipId(id));
    }
    Ok(())
  }

  /// Read the raw temperature sample.
  pub fn read_temperature_raw(&mut self) -> Result<i16, Error<E>> {
    self.read_i16(Reg::TempOutH, Reg::TempOutL)
  }

  /// Read the die temperature in °C.
  pub fn read_temperature(&mut self) -> Result<f32, Error<E>> {
    let raw = self.read_temperature_raw()?;
    Ok(temp_raw_to_celsius(raw))
  }
}

/// Temperature conversion from the register map: `raw / 340 + 36.53`.
pub fn temp_raw_to_celsius(raw: i16) -> f32 {
  f32::from(raw) / TEMP_LSB_PER_DEG_C + TEMP_OFFSET_DEG_C
}
