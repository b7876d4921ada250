//! Motion samples shared by both controllers.
//!
//! A [`MotionSample`] is a plain value decoupled from any driver: linear
//! acceleration in m/s² and angular rate in rad/s, both in the sensor's
//! body frame.

#[cfg(feature = "embedded")]
pub mod mpu6050;

/// MPU-6050 accelerometer sensitivity at ±8 g (LSB per g).
pub const ACCEL_LSB_PER_G: f32 = 4096.0;

/// MPU-6050 gyroscope sensitivity at ±500 °/s (LSB per °/s).
pub const GYRO_LSB_PER_DPS: f32 = 65.5;

/// Standard gravity (m/s²).
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Three-axis reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One tick's worth of motion input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    /// Linear acceleration (m/s²).
    pub accel: Vector3,
    /// Angular rate (rad/s).
    pub gyro: Vector3,
}

impl MotionSample {
    pub const fn new(accel: Vector3, gyro: Vector3) -> Self {
        Self { accel, gyro }
    }

    /// Convert raw register counts `[ax, ay, az, gx, gy, gz]` read at
    /// ±8 g / ±500 °/s into SI units.
    pub fn from_raw(raw: [i16; 6]) -> Self {
        let accel = |v: i16| v as f32 / ACCEL_LSB_PER_G * STANDARD_GRAVITY;
        let gyro = |v: i16| v as f32 / GYRO_LSB_PER_DPS * (core::f32::consts::PI / 180.0);
        Self {
            accel: Vector3::new(accel(raw[0]), accel(raw[1]), accel(raw[2])),
            gyro: Vector3::new(gyro(raw[3]), gyro(raw[4]), gyro(raw[5])),
        }
    }
}

/// Map one axis reading onto a step: `+1` above `threshold`, `-1` below
/// `-threshold`, `0` inside the dead zone. NaN falls in the dead zone.
pub fn axis_step(value: f32, threshold: f32) -> i8 {
    if value > threshold {
        1
    } else if value < -threshold {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        let d = a - b;
        d < 1e-3 && d > -1e-3
    }

    #[test]
    fn raw_one_g_on_z() {
        let s = MotionSample::from_raw([0, 0, 4096, 0, 0, 0]);
        assert!(close(s.accel.z, STANDARD_GRAVITY));
        assert_eq!(s.accel.x, 0.0);
        assert_eq!(s.gyro, Vector3::ZERO);
    }

    #[test]
    fn raw_negative_accel() {
        let s = MotionSample::from_raw([-2048, 0, 0, 0, 0, 0]);
        assert!(close(s.accel.x, -STANDARD_GRAVITY / 2.0));
    }

    #[test]
    fn raw_gyro_to_radians() {
        // 65.5 LSB = 1 °/s; 180 °/s = π rad/s.
        let s = MotionSample::from_raw([0, 0, 0, 0, 11_790, 0]);
        assert!(close(s.gyro.y, core::f32::consts::PI));
    }

    #[test]
    fn axis_step_dead_zone() {
        assert_eq!(axis_step(0.0, 3.5), 0);
        assert_eq!(axis_step(3.5, 3.5), 0);
        assert_eq!(axis_step(-3.5, 3.5), 0);
        assert_eq!(axis_step(3.6, 3.5), 1);
        assert_eq!(axis_step(-5.0, 3.5), -1);
    }

    #[test]
    fn axis_step_nan_is_noop() {
        assert_eq!(axis_step(f32::NAN, 3.5), 0);
    }
}
