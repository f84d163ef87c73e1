//! End-to-end use of the driver against the simulated device

use crate::common::create_mock_driver;
use mpu6050::selftest::Deviation;

#[test]
fn bring_up_self_test_then_measure() {
  let (mut driver, bus, delay) = create_mock_driver();
  bus.set_self_test_registers(0b0100_0110, 0b0100_0111, 0b0100_1000, 0b0001_0101);
  bus.set_accel_data(0, 0, 16384);
  bus.set_gyro_data(13, -13, 0);
  bus.set_temperature_data(-1700);

  driver.initialize().unwrap();
  driver.check_id().unwrap();

  let report = driver.run_self_test().unwrap();
  assert_eq!(report.response.accel, [0b01001, 0b01001, 0b01001]);
  assert_eq!(report.response.gyro, [6, 7, 8]);
  assert!(report.accel_deviation.iter().all(|d| matches!(d, Deviation::Percent(_))));
  assert!(!report.has_missing_stimulus());

  // Back in normal operation at default ranges
  assert_eq!(driver.read_accel_config().unwrap(), 0x00);
  assert_eq!(driver.read_gyro_config().unwrap(), 0x00);

  let a = driver.read_accel().unwrap();
  assert_eq!((a.x, a.y, a.z), (0.0, 0.0, 1.0));

  let g = driver.read_gyro().unwrap();
  assert!((g.x - 13.0 / 131.0).abs() < 1e-6);
  assert!((g.y + 13.0 / 131.0).abs() < 1e-6);

  let t = driver.read_temperature().unwrap();
  assert!((t - 31.53).abs() < 1e-4);

  assert_eq!(delay.ms_calls(), vec![250]);
}

#[test]
fn independent_instances_do_not_share_state() {
  let (mut first, first_bus, _) = create_mock_driver();
  let (mut second, second_bus, _) = create_mock_driver();
  first_bus.set_accel_data(8192, 0, 0);
  second_bus.set_accel_data(8192, 0, 0);

  first.write_accel_config(false, false, false, 1).unwrap();

  assert_eq!(first.read_accel_x().unwrap(), 1.0);
  assert_eq!(second.read_accel_x().unwrap(), 0.5);
  assert_eq!(second_bus.register(0x1C), 0x00);
}
