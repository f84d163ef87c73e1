use embedded_hal::{delay::DelayNs, i2c::*};

use crate::{accel::AccelRange, defs::*, gyro::GyroRange, Error, Mpu6050};

impl<I, D, E> Mpu6050<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Read a single register.
  ///
  /// The register address is written without a stop condition and the byte
  /// is read back after a repeated start, so the bus stays held between the
  /// two halves of the transaction. Reading `ACCEL_CONFIG` or `GYRO_CONFIG`
  /// also refreshes the range used to scale readings.
  pub fn read_register(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let mut b = [0u8; 1];
    self.i2c.write_read(ADDR_I2C, &[reg.into()], &mut b).map_err(Error::I2c)?;
    self.track_range(reg, b[0]);
    Ok(b[0])
  }

  /// Write a single register as one `[address, value]` transaction ending in a stop.
  ///
  /// Writes to `ACCEL_CONFIG` or `GYRO_CONFIG` also update the range used to
  /// scale readings, once the device has accepted them.
  pub fn write_register(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(ADDR_I2C, &[reg.into(), value]).map_err(Error::I2c)?;
    self.track_range(reg, value);
    Ok(())
  }

  /// Read both config registers and scale readings by the ranges found there.
  pub fn sync_ranges(&mut self) -> Result<(), Error<E>> {
    self.read_register(Reg::AccelConfig)?;
    self.read_register(Reg::GyroConfig)?;

    #[cfg(feature = "defmt")]
    defmt::debug!("ranges: {} {}", self.accel_range, self.gyro_range);

    Ok(())
  }

  fn track_range(&mut self, reg: Reg, value: u8) {
    match reg {
      Reg::AccelConfig => self.accel_range = AccelRange::from_register(value),
      Reg::GyroConfig => self.gyro_range = GyroRange::from_register(value),
      _ => {}
    }
  }

  pub(crate) fn read<T: From<u8>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    self.read_register(reg).map(T::from)
  }

  pub(crate) fn write<T: Into<u8>>(&mut self, reg: Reg, v: T) -> Result<(), Error<E>> {
    self.write_register(reg, v.into())
  }

  /// Read a big-endian signed sample as two dependent single-byte reads, high byte first.
  pub(crate) fn read_i16(&mut self, high: Reg, low: Reg) -> Result<i16, Error<E>> {
    let h = self.read_register(high)?;
    let l = self.read_register(low)?;
    Ok(combine_i16(h, l))
  }
}

/// Combine a high/low byte pair into a two's-complement sample.
#[inline]
pub(crate) const fn combine_i16(high: u8, low: u8) -> i16 {
  i16::from_be_bytes([high, low])
}
