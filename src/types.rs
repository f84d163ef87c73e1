use crate::defs::Reg;

/// Sensor axis selector for per-axis reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
  X,
  Y,
  Z,
}

impl Axis {
  pub(crate) fn accel_regs(self) -> (Reg, Reg) {
    match self {
      Axis::X => (Reg::AccelXoutH, Reg::AccelXoutL),
      Axis::Y => (Reg::AccelYoutH, Reg::AccelYoutL),
      Axis::Z => (Reg::AccelZoutH, Reg::AccelZoutL),
    }
  }

  pub(crate) fn gyro_regs(self) -> (Reg, Reg) {
    match self {
      Axis::X => (Reg::GyroXoutH, Reg::GyroXoutL),
      Axis::Y => (Reg::GyroYoutH, Reg::GyroYoutL),
      Axis::Z => (Reg::GyroZoutH, Reg::GyroZoutL),
    }
  }

  pub(crate) fn self_test_reg(self) -> Reg {
    match self {
      Axis::X => Reg::SelfTestX,
      Axis::Y => Reg::SelfTestY,
      Axis::Z => Reg::SelfTestZ,
    }
  }

  /// Bit range `(start, end)` holding this axis' accel self-test LSBs in `SELF_TEST_A`.
  pub(crate) fn self_test_a_bits(self) -> (u8, u8) {
    match self {
      Axis::X => (4, 5),
      Axis::Y => (2, 3),
      Axis::Z => (0, 1),
    }
  }
}
