//! Accelerometer configuration and data reading.
//!
//! # Examples
//!
//! ```no_run
//! # fn example(mut imu: mpu6050::Mpu6050<impl embedded_hal::i2c::I2c, impl embedded_hal::delay::DelayNs>) {
//! use mpu6050::accel::{AccelConfig, AccelRange};
//!
//! // ±4g, self-test off
//! imu.set_accel_conf(AccelConfig { range: AccelRange::G4, ..Default::default() }).unwrap();
//!
//! // Read acceleration in g units, scaled for the range written above
//! let accel = imu.read_accel().unwrap();
//! let _ = (accel.x, accel.y, accel.z);
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
  /// Read the raw `ACCEL_CONFIG` byte (self-test flags and range bits packed together).
  pub fn read_accel_config(&mut self) -> Result<u8, Error<E>> {
    self.read_register(Reg::AccelConfig)
  }

  /// Write `ACCEL_CONFIG` from per-axis self-test flags and a range code.
  ///
  /// `range_code` selects ±2g, ±4g, ±8g or ±16g (`0..=3`). Any other value is
  /// rejected with [`Error::InvalidArgument`] before anything reaches the bus.
  pub fn write_accel_config(&mut self, st_x: bool, st_y: bool, st_z: bool, range_code: u8) -> Result<(), Error<E>> {
    let range = AccelRange::try_from(range_code).map_err(|_| {
      #[cfg(feature = "defmt")]
      defmt::debug!("rejected accel range code {=u8}", range_code);
      Error::InvalidArgument
    })?;

    self.set_accel_conf(AccelConfig { self_test_x: st_x, self_test_y: st_y, self_test_z: st_z, range })
  }

  /// Read and decode `ACCEL_CONFIG`.
  pub fn get_accel_conf(&mut self) -> Result<AccelConfig, Error<E>> {
    self.read(Reg::AccelConfig)
  }

  /// Write `ACCEL_CONFIG`.
  ///
  /// On success the driver switches its conversion divisor to `cfg.range`.
  pub fn set_accel_conf(&mut self, cfg: AccelConfig) -> Result<(), Error<E>> {
    self.write(Reg::AccelConfig, cfg)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("accel config written: {}", cfg);

    Ok(())
  }

  /// Full-scale range last seen in `ACCEL_CONFIG`; used to scale readings.
  pub fn accel_range(&self) -> AccelRange {
    self.accel_range
  }

  /// Read one raw accelerometer axis (high byte, then low byte).
  pub fn read_accel_raw(&mut self, axis: Axis) -> Result<i16, Error<E>> {
    let (high, low) = axis.accel_regs();
    self.read_i16(high, low)
  }

  /// Read one accelerometer axis in g.
  pub fn read_accel_axis(&mut self, axis: Axis) -> Result<f32, Error<E>> {
    let raw = self.read_accel_raw(axis)?;
    Ok(self.accel_range.to_g(raw))
  }

  pub fn read_accel_x(&mut self) -> Result<f32, Error<E>> {
    self.read_accel_axis(Axis::X)
  }

  pub fn read_accel_y(&mut self) -> Result<f32, Error<E>> {
    self.read_accel_axis(Axis::Y)
  }

  pub fn read_accel_z(&mut self) -> Result<f32, Error<E>> {
    self.read_accel_axis(Axis::Z)
  }

  /// Read all three accelerometer axes in g.
  ///
  /// Axes are read one after another, so the sample is not guaranteed to be
  /// coherent across axes.
  pub fn read_accel(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    Ok(Vector3d { x: self.read_accel_x()?, y: self.read_accel_y()?, z: self.read_accel_z()? })
  }
}

/// `ACCEL_CONFIG` register.
///
/// Bits 2..0 are unused by this driver and always written as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
  /// Full-scale measurement range (±2g, ±4g, ±8g, or ±16g), bits 4..3.
  pub range: AccelRange,
  /// Z-axis self-test enable (`ZA_ST`, bit 5).
  pub self_test_z: bool,
  /// Y-axis self-test enable (`YA_ST`, bit 6).
  pub self_test_y: bool,
  /// X-axis self-test enable (`XA_ST`, bit 7).
  pub self_test_x: bool,
}

impl From<AccelConfig> for u8 {
  fn from(cfg: AccelConfig) -> Self {
    self_test_bits(cfg.self_test_x, cfg.self_test_y, cfg.self_test_z) | cfg.range.as_register()
  }
}

impl From<u8> for AccelConfig {
  fn from(b: u8) -> Self {
    AccelConfig {
      range: AccelRange::from_register(b),
      self_test_z: b & ST_Z != 0,
      self_test_y: b & ST_Y != 0,
      self_test_x: b & ST_X != 0,
    }
  }
}

impl Default for AccelConfig {
  fn default() -> Self {
    AccelConfig { range: AccelRange::G2, self_test_z: false, self_test_y: false, self_test_x: false }
  }
}

/// Accelerometer full-scale range (`AFS_SEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
  /// ±2g range
  #[default]
  G2 = 0x00,
  /// ±4g range
  G4 = 0x01,
  /// ±8g range
  G8 = 0x02,
  /// ±16g range
  G16 = 0x03,
}

impl AccelRange {
  /// Sensitivity in LSB per g.
  pub fn lsb_per_g(self) -> f32 {
    match self {
      AccelRange::G2 => 16384.,
      AccelRange::G4 => 8192.,
      AccelRange::G8 => 4096.,
      AccelRange::G16 => 2048.,
    }
  }

  /// Range bits as they sit in `ACCEL_CONFIG`.
  pub fn as_register(self) -> u8 {
    (self as u8) << RANGE_SHIFT
  }

  /// Range encoded in an `ACCEL_CONFIG` byte; other bits are ignored.
  pub fn from_register(value: u8) -> Self {
    match (value >> RANGE_SHIFT) & RANGE_MASK {
      0x00 => AccelRange::G2,
      0x01 => AccelRange::G4,
      0x02 => AccelRange::G8,
      _ => AccelRange::G16,
    }
  }

  /// Convert a raw sample to g.
  pub fn to_g(self, raw: i16) -> f32 {
    f32::from(raw) / self.lsb_per_g()
  }
}

impl From<AccelRange> for u8 {
  fn from(value: AccelRange) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for AccelRange {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x00 => Ok(AccelRange::G2),
      0x01 => Ok(AccelRange::G4),
      0x02 => Ok(AccelRange::G8),
      0x03 => Ok(AccelRange::G16),
      _ => Err(()),
    }
  }
}
