//! Gyroscope configuration and data reading.
//!
//! # Examples
//!
//! ```no_run
//! # fn example(mut imu: mpu6050::Mpu6050<impl embedded_hal::i2c::I2c, impl embedded_hal::delay::DelayNs>) {
//! use mpu6050::gyro::{GyroConfig, GyroRange};
//!
//! imu.set_gyro_conf(GyroConfig { range: GyroRange::DPS500, ..Default::default() }).unwrap();
//!
//! // Angular rate in degrees per second
//! let gyro = imu.read_gyro().unwrap();
//! let _ = (gyro.x, gyro.y, gyro.z);
//! # }
//! ```

use embedded_hal::{delay::DelayNs, i2c::*};
use micromath::vector::Vector3d;

use super::{defs::*, Axis, Error, Mpu6050};

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Read the raw `GYRO_CONFIG` byte.
  pub fn read_gyro_config(&mut self) -> Result<u8, Error<E>> {
    self.read_register(Reg::GyroConfig)
  }

  /// Write `GYRO_CONFIG` from per-axis self-test flags and a range code.
  ///
  /// `range_code` selects ±250, ±500, ±1000 or ±2000 °/s (`0..=3`). Any other
  /// value is rejected with [`Error::InvalidArgument`] and nothing is written.
  pub fn write_gyro_config(&mut self, st_x: bool, st_y: bool, st_z: bool, range_code: u8) -> Result<(), Error<E>> {
    let range = GyroRange::try_from(range_code).map_err(|_| {
      #[cfg(feature = "defmt")]
      defmt::debug!("rejected gyro range code {=u8}", range_code);
      Error::InvalidArgument
    })?;

    self.set_gyro_conf(GyroConfig { self_test_x: st_x, self_test_y: st_y, self_test_z: st_z, range })
  }

  /// Read the current gyroscope configuration.
  pub fn get_gyro_conf(&mut self) -> Result<GyroConfig, Error<E>> {
    self.read(Reg::GyroConfig)
  }

  /// Set the gyroscope configuration.
  ///
  /// Subsequent readings are scaled for `cfg.range` once the write succeeds.
  pub fn set_gyro_conf(&mut self, cfg: GyroConfig) -> Result<(), Error<E>> {
    self.write(Reg::GyroConfig, cfg)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("gyro config written: {}", cfg);

    Ok(())
  }

  /// Full-scale range last seen in `GYRO_CONFIG`; used to scale readings.
  pub fn gyro_range(&self) -> GyroRange {
    self.gyro_range
  }

  /// Read one raw gyroscope axis (16-bit signed integer).
  pub fn read_gyro_raw(&mut self, axis: Axis) -> Result<i16, Error<E>> {
    let (high, low) = axis.gyro_regs();
    self.read_i16(high, low)
  }

  /// Read one gyroscope axis in degrees per second (°/s).
  pub fn read_gyro_axis(&mut self, axis: Axis) -> Result<f32, Error<E>> {
    let raw = self.read_gyro_raw(axis)?;
    Ok(self.gyro_range.to_dps(raw))
  }

  pub fn read_gyro_x(&mut self) -> Result<f32, Error<E>> {
    self.read_gyro_axis(Axis::X)
  }

  pub fn read_gyro_y(&mut self) -> Result<f32, Error<E>> {
    self.read_gyro_axis(Axis::Y)
  }

  pub fn read_gyro_z(&mut self) -> Result<f32, Error<E>> {
    self.read_gyro_axis(Axis::Z)
  }

  /// Read all three gyroscope axes in °/s.
  pub fn read_gyro(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(Vector3d { x: self.read_gyro_x()?, y: self.read_gyro_y()?, z: self.read_gyro_z()? })
  }
}

/// `GYRO_CONFIG` register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroConfig {
  /// Full-scale measurement range (±250°/s to ±2000°/s), bits 4..3.
  pub range: GyroRange,
  /// Z-axis self-test enable (`ZG_ST`, bit 5).
  pub self_test_z: bool,
  /// Y-axis self-test enable (`YG_ST`, bit 6).
  pub self_test_y: bool,
  /// X-axis self-test enable (`XG_ST`, bit 7).
  pub self_test_x: bool,
}

impl From<GyroConfig> for u8 {
  fn from(cfg: GyroConfig) -> Self {
    self_test_bits(cfg.self_test_x, cfg.self_test_y, cfg.self_test_z) | cfg.range.as_register()
  }
}

impl From<u8> for GyroConfig {
  fn from(b: u8) -> Self {
    GyroConfig {
      range: GyroRange::from_register(b),
      self_test_z: b & ST_Z != 0,
      self_test_y: b & ST_Y != 0,
      self_test_x: b & ST_X != 0,
    }
  }
}

impl Default for GyroConfig {
  fn default() -> Self {
    GyroConfig { range: GyroRange::DPS250, self_test_z: false, self_test_y: false, self_test_x: false }
  }
}

/// Gyroscope measurement ranges (`FS_SEL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
  /// ±250 degrees per second
  #[default]
  DPS250 = 0,
  /// ±500 degrees per second
  DPS500 = 1,
  /// ±1000 degrees per second
  DPS1000 = 2,
  /// ±2000 degrees per second
  DPS2000 = 3,
}

impl GyroRange {
  pub fn dps(&self) -> f32 {
    match self {
      GyroRange::DPS250 => 250.0,
      GyroRange::DPS500 => 500.0,
      GyroRange::DPS1000 => 1000.0,
      GyroRange::DPS2000 => 2000.0,
    }
  }

  /// Sensitivity in LSB per °/s, as listed in the datasheet.
  pub fn lsb_per_dps(&self) -> f32 {
    match self {
      GyroRange::DPS250 => 131.0,
      GyroRange::DPS500 => 65.5,
      GyroRange::DPS1000 => 32.8,
      GyroRange::DPS2000 => 16.4,
    }
  }

  pub fn as_register(&self) -> u8 {
    (*self as u8) << RANGE_SHIFT
  }

  /// Range held in bits 4..3 of a `GYRO_CONFIG` byte.
  pub fn from_register(value: u8) -> Self {
    match (value >> RANGE_SHIFT) & RANGE_MASK {
      0 => GyroRange::DPS250,
      1 => GyroRange::DPS500,
      2 => GyroRange::DPS1000,
      _ => GyroRange::DPS2000,
    }
  }

  /// Convert a raw sample to °/s.
  pub fn to_dps(&self, raw: i16) -> f32 {
    f32::from(raw) / self.lsb_per_dps()
  }
}

impl From<GyroRange> for u8 {
  fn from(value: GyroRange) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for GyroRange {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(GyroRange::DPS250),
      1 => Ok(GyroRange::DPS500),
      2 => Ok(GyroRange::DPS1000),
      3 => Ok(GyroRange::DPS2000),
      _ => Err(()),
    }
  }
}
