/// MPU-6050 register addresses.
///
/// Sensor outputs are big-endian pairs: the high byte lives at the lower
/// address and the low byte at the next one.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
  SelfTestX = 0x0D,
  SelfTestY = 0x0E,
  SelfTestZ = 0x0F,
  SelfTestA = 0x10,
  GyroConfig = 0x1B,
  AccelConfig = 0x1C,
  AccelXoutH = 0x3B,
  AccelXoutL = 0x3C,
  AccelYoutH = 0x3D,
  AccelYoutL = 0x3E,
  AccelZoutH = 0x3F,
  AccelZoutL = 0x40,
  TempOutH = 0x41,
  TempOutL = 0x42,
  GyroXoutH = 0x43,
  GyroXoutL = 0x44,
  GyroYoutH = 0x45,
  GyroYoutL = 0x46,
  GyroZoutH = 0x47,
  GyroZoutL = 0x48,
  PwrMgmt1 = 0x6B,
  WhoAmI = 0x75,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// Fixed 7-bit I2C address (AD0 tied low).
pub const ADDR_I2C: u8 = 0x68;

/// Value of `WHO_AM_I` on a genuine MPU-6050.
pub const MPU6050_WHO_AM_I: u8 = 0x68;

// ACCEL_CONFIG / GYRO_CONFIG layout
pub(crate) const ST_X: u8 = 1 << 7;
pub(crate) const ST_Y: u8 = 1 << 6;
pub(crate) const ST_Z: u8 = 1 << 5;
pub(crate) const RANGE_SHIFT: u8 = 3;
pub(crate) const RANGE_MASK: u8 = 0b11;

/// Self-test flag bits of a config register.
pub(crate) fn self_test_bits(x: bool, y: bool, z: bool) -> u8 {
  let mut b = 0;
  if x {
    b |= ST_X;
  }
  if y {
    b |= ST_Y;
  }
  if z {
    b |= ST_Z;
  }
  b
}

/// Time the self-test stimulus needs to settle before the response registers are valid.
pub(crate) const SELF_TEST_SETTLE_MS: u32 = 250;

/// `PWR_MGMT_1` value that clears sleep and selects the internal oscillator.
pub(crate) const PWR_MGMT_1_WAKE: u8 = 0x00;

pub(crate) const TEMP_LSB_PER_DEG_C: f32 = 340.0;
pub(crate) const TEMP_OFFSET_DEG_C: f32 = 36.53;
