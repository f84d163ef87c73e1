//! Built-in self-test.
//!
//! The sequence enables the internal stimulus on every axis, waits for it to
//! settle, captures the self-test response codes and then turns the stimulus
//! off again. Each code is compared against the factory trim derived from it
//! and reported as a percentage.
//!
//! ```no_run
//! # fn example(mut imu: mpu6050::Mpu6050<impl embedded_hal::i2c::I2c, impl embedded_hal::delay::DelayNs>) {
//! use mpu6050::selftest::Deviation;
//!
//! let report = imu.run_self_test().unwrap();
//! for d in report.accel_deviation.iter().chain(report.gyro_deviation.iter()) {
//!   match d {
//!     Deviation::Percent(p) => { let _ = p; }
//!     Deviation::NoStimulus => { /* axis did not respond */ }
//!   }
//! }
//! # }
//! ```
//!
//! If a bus transaction fails part-way through, the error is returned as-is
//! and the device keeps whatever configuration was last written. Call
//! [`Mpu6050::write_accel_config`] and [`Mpu6050::write_gyro_config`] with the
//! self-test flags cleared to recover.

use embedded_hal::{delay::DelayNs, i2c::*};

use crate::{accel::AccelRange, defs::*, gyro::GyroRange, Axis, Error, Mpu6050};

const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Run the self-test sequence and compare the response against factory trim.
  ///
  /// Leaves both sensors at their default ranges (±2g, ±250°/s) with self-test disabled.
  pub fn run_self_test(&mut self) -> Result<SelfTestReport, Error<E>> {
    #[cfg(feature = "defmt")]
    defmt::debug!("self-test: arming");

    self.write_accel_config(true, true, true, AccelRange::G8.into())?;
    self.write_gyro_config(true, true, true, GyroRange::DPS250.into())?;

    self.delay.delay_ms(SELF_TEST_SETTLE_MS);

    let response = self.read_self_test_response()?;

    #[cfg(feature = "defmt")]
    defmt::debug!("self-test: captured {}", response);

    self.write_accel_config(false, false, false, AccelRange::G2.into())?;
    self.write_gyro_config(false, false, false, GyroRange::DPS250.into())?;

    let report = SelfTestReport::from_response(response);

    #[cfg(feature = "defmt")]
    defmt::debug!("self-test: {}", report);

    Ok(report)
  }

  /// Read the four self-test registers and extract the six response codes.
  ///
  /// The codes are only meaningful while the self-test flags are set.
  pub fn read_self_test_response(&mut self) -> Result<SelfTestResponse, Error<E>> {
    let a = self.read_register(Reg::SelfTestA)?;

    let mut accel = [0u8; 3];
    let mut gyro = [0u8; 3];
    for (i, axis) in AXES.into_iter().enumerate() {
      let reg = self.read_register(axis.self_test_reg())?;
      let (start, end) = axis.self_test_a_bits();
      accel[i] = (bit_slice(reg, 5, 7) << 2) | bit_slice(a, start, end);
      gyro[i] = bit_slice(reg, 0, 4);
    }

    Ok(SelfTestResponse { accel, gyro })
  }
}

/// Extract bits `start..=end` of `byte`, shifted down to bit 0.
///
/// ```
/// assert_eq!(mpu6050::selftest::bit_slice(0b1011_0100, 4, 7), 0b1011);
/// ```
///
/// # Panics
///
/// Panics unless `start <= end` and `end < 8`.
pub const fn bit_slice(byte: u8, start: u8, end: u8) -> u8 {
  assert!(start <= end && end < 8, "bit range out of bounds");
  let width = end - start + 1;
  let mask = ((1u16 << width) - 1) as u8;
  (byte >> start) & mask
}

/// Factory trim for an accelerometer self-test code.
///
/// Zero for code 0, where the device reports no trim.
pub fn accel_factory_trim(code: u8) -> f64 {
  if code == 0 {
    return 0.0;
  }
  4096.0 * 0.34 * libm::pow(0.92 / 0.34, f64::from(code - 1) / 30.0)
}

/// Factory trim for a gyroscope self-test code.
pub fn gyro_factory_trim(code: u8) -> f64 {
  if code == 0 {
    return 0.0;
  }
  25.0 * 131.0 * libm::pow(1.046, f64::from(code - 1))
}

/// Deviation of `code` from `trim`, expressed so that 100 means "equal to trim".
pub fn trim_deviation(code: u8, trim: f64) -> Deviation {
  if trim == 0.0 {
    return Deviation::NoStimulus;
  }
  Deviation::Percent(100.0 + 100.0 * (f64::from(code) - trim) / trim)
}

/// Self-test response codes, ordered X, Y, Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestResponse {
  /// 5-bit accelerometer codes (`XA_TEST`, `YA_TEST`, `ZA_TEST`).
  pub accel: [u8; 3],
  /// 5-bit gyroscope codes (`XG_TEST`, `YG_TEST`, `ZG_TEST`).
  pub gyro: [u8; 3],
}

/// Per-axis comparison of a response code against its factory trim.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deviation {
  /// Response as a percentage of factory trim.
  Percent(f64),
  /// Response code was zero, so there is no trim to compare against.
  NoStimulus,
}

impl Deviation {
  pub fn percent(self) -> Option<f64> {
    match self {
      Deviation::Percent(p) => Some(p),
      Deviation::NoStimulus => None,
    }
  }
}

/// Outcome of [`Mpu6050::run_self_test`]. Arrays are ordered X, Y, Z.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestReport {
  /// Codes captured while the stimulus was on.
  pub response: SelfTestResponse,
  /// Accelerometer factory trims; 0.0 where the code was zero.
  pub accel_trim: [f64; 3],
  /// Gyroscope factory trims; 0.0 where the code was zero.
  pub gyro_trim: [f64; 3],
  /// Accelerometer response relative to trim.
  pub accel_deviation: [Deviation; 3],
  /// Gyroscope response relative to trim.
  pub gyro_deviation: [Deviation; 3],
}

impl SelfTestReport {
  /// Derive trims and deviations from captured codes.
  pub fn from_response(response: SelfTestResponse) -> Self {
    let accel_trim = response.accel.map(accel_factory_trim);
    let gyro_trim = response.gyro.map(gyro_factory_trim);

    let accel_deviation = core::array::from_fn(|i| trim_deviation(response.accel[i], accel_trim[i]));
    let gyro_deviation = core::array::from_fn(|i| trim_deviation(response.gyro[i], gyro_trim[i]));

    SelfTestReport { response, accel_trim, gyro_trim, accel_deviation, gyro_deviation }
  }

  /// True when at least one axis returned a zero code.
  pub fn has_missing_stimulus(&self) -> bool {
    self.accel_deviation.iter().chain(self.gyro_deviation.iter()).any(|d| *d == Deviation::NoStimulus)
  }
}
