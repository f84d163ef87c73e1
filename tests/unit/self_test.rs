//! Self-test sequencing and factory trim comparison

use crate::common::{create_mock_driver, RegisterOp};
use mpu6050::accel::AccelRange;
use mpu6050::gyro::GyroRange;
use mpu6050::selftest::{accel_factory_trim, gyro_factory_trim, Deviation, SelfTestResponse};

// XA_TEST hi = 0b101, XG_TEST = 0b01010
const ST_X: u8 = 0b1010_1010;
// YA_TEST hi = 0b011, YG_TEST = 0b00001
const ST_Y: u8 = 0b0110_0001;
const ST_Z: u8 = 0x00;
// XA lo = 0b10, YA lo = 0b01, ZA lo = 0b00
const ST_A: u8 = 0b0010_0100;

fn close(a: f64, b: f64) -> bool {
  (a - b).abs() < 1e-9 * b.abs().max(1.0)
}

#[test]
fn sequence_arms_settles_captures_and_disarms() {
  let (mut driver, bus, delay) = create_mock_driver();
  bus.set_self_test_registers(ST_X, ST_Y, ST_Z, ST_A);

  driver.run_self_test().unwrap();

  assert_eq!(
    bus.register_ops(),
    vec![
      // arm: all flags, ±8g / ±250°/s
      RegisterOp::Write { address: 0x1C, value: 0xF0 },
      RegisterOp::Write { address: 0x1B, value: 0xE0 },
      // capture
      RegisterOp::Read { address: 0x10, value: ST_A },
      RegisterOp::Read { address: 0x0D, value: ST_X },
      RegisterOp::Read { address: 0x0E, value: ST_Y },
      RegisterOp::Read { address: 0x0F, value: ST_Z },
      // disarm
      RegisterOp::Write { address: 0x1C, value: 0x00 },
      RegisterOp::Write { address: 0x1B, value: 0x00 },
    ]
  );
  assert_eq!(delay.ms_calls(), vec![250]);
}

#[test]
fn response_codes_are_extracted_per_axis() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.set_self_test_registers(ST_X, ST_Y, ST_Z, ST_A);

  let report = driver.run_self_test().unwrap();

  assert_eq!(report.response, SelfTestResponse { accel: [22, 13, 0], gyro: [10, 1, 0] });
}

#[test]
fn deviations_follow_trim_formula() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.set_self_test_registers(ST_X, ST_Y, ST_Z, ST_A);

  let report = driver.run_self_test().unwrap();

  let xa_trim = accel_factory_trim(22);
  assert!(close(report.accel_trim[0], xa_trim));
  let Deviation::Percent(xa) = report.accel_deviation[0] else { panic!("x accel has a stimulus") };
  assert!(close(xa, 100.0 + 100.0 * (22.0 - xa_trim) / xa_trim));

  assert!(close(report.gyro_trim[1], 3275.0));
  let Some(yg) = report.gyro_deviation[1].percent() else { panic!("y gyro has a stimulus") };
  assert!(close(yg, 100.0 / 3275.0));

  assert!(close(gyro_factory_trim(10), report.gyro_trim[0]));
}

#[test]
fn zero_codes_report_no_stimulus() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.set_self_test_registers(ST_X, ST_Y, ST_Z, ST_A);

  let report = driver.run_self_test().unwrap();

  assert_eq!(report.accel_deviation[2], Deviation::NoStimulus);
  assert_eq!(report.gyro_deviation[2], Deviation::NoStimulus);
  assert_eq!(report.accel_trim[2], 0.0);
  assert!(report.has_missing_stimulus());
  for d in report.accel_deviation.iter().chain(report.gyro_deviation.iter()) {
    if let Deviation::Percent(p) = d {
      assert!(p.is_finite());
    }
  }
}

#[test]
fn all_zero_registers_still_disarm_once() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.set_self_test_registers(0, 0, 0, 0);

  let report = driver.run_self_test().unwrap();

  assert_eq!(report.accel_deviation, [Deviation::NoStimulus; 3]);
  assert_eq!(report.gyro_deviation, [Deviation::NoStimulus; 3]);
  assert_eq!(bus.writes_to(0x1C), vec![0xF0, 0x00]);
  assert_eq!(bus.writes_to(0x1B), vec![0xE0, 0x00]);
}

#[test]
fn saturated_registers_still_disarm_once() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.set_self_test_registers(0xFF, 0xFF, 0xFF, 0xFF);

  let report = driver.run_self_test().unwrap();

  assert_eq!(report.response, SelfTestResponse { accel: [31; 3], gyro: [31; 3] });
  assert_eq!(bus.writes_to(0x1C), vec![0xF0, 0x00]);
  assert_eq!(bus.writes_to(0x1B), vec![0xE0, 0x00]);
  assert!(!report.has_missing_stimulus());
}

#[test]
fn ranges_are_defaults_after_self_test() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.set_self_test_registers(ST_X, ST_Y, ST_Z, ST_A);
  driver.write_accel_config(false, false, false, 3).unwrap();
  driver.write_gyro_config(false, false, false, 2).unwrap();

  driver.run_self_test().unwrap();

  assert_eq!(driver.accel_range(), AccelRange::G2);
  assert_eq!(driver.gyro_range(), GyroRange::DPS250);
}

#[test]
fn capture_failure_aborts_without_disarm() {
  let (mut driver, bus, delay) = create_mock_driver();
  bus.set_self_test_registers(ST_X, ST_Y, ST_Z, ST_A);

  // arm (2 writes) and SELF_TEST_A succeed, SELF_TEST_X fails
  bus.fail_after(3);
  assert!(driver.run_self_test().is_err());

  assert_eq!(bus.write_count(), 2);
  assert_eq!(bus.register(0x1C), 0xF0);
  assert_eq!(bus.register(0x1B), 0xE0);
  assert_eq!(delay.ms_calls(), vec![250]);
  // Driver tracks what actually reached the device
  assert_eq!(driver.accel_range(), AccelRange::G8);
}

#[test]
fn arm_failure_skips_settle() {
  let (mut driver, bus, delay) = create_mock_driver();

  bus.fail_next_write();
  assert!(driver.run_self_test().is_err());

  assert!(delay.ms_calls().is_empty());
  assert!(bus.register_ops().is_empty());
}

#[test]
fn manual_disarm_after_failure() {
  let (mut driver, bus, _) = create_mock_driver();
  bus.fail_after(3);
  assert!(driver.run_self_test().is_err());

  bus.fail_after(usize::MAX);
  driver.write_accel_config(false, false, false, 0).unwrap();
  driver.write_gyro_config(false, false, false, 0).unwrap();
  assert_eq!(bus.register(0x1C), 0x00);
  assert_eq!(bus.register(0x1B), 0x00);
}
