//! MPU-6050 accelerometer / gyroscope over async I²C.
//!
//! Configured once at startup for ±8 g, ±500 °/s and the 5 Hz digital
//! low-pass filter; never reconfigured at runtime. The driver does not own
//! the bus, the caller passes it in so the display can share it.

use defmt::{info, warn};
use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::I2c;

use super::MotionSample;
use crate::error::Error;

/// MPU-6050 registers
#[allow(dead_code)]
mod reg {
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Expected WHO_AM_I value.
const DEVICE_ID: u8 = 0x68;

/// PWR_MGMT_1: wake up, clock from the X gyro PLL.
const CLOCK_PLL_XGYRO: u8 = 0x01;

/// GYRO_CONFIG FS_SEL = 1 → ±500 °/s.
const GYRO_RANGE_500: u8 = 0x08;

/// ACCEL_CONFIG AFS_SEL = 2 → ±8 g.
const ACCEL_RANGE_8G: u8 = 0x10;

/// CONFIG DLPF_CFG = 6 → 5 Hz bandwidth.
const DLPF_5HZ: u8 = 0x06;

pub struct Mpu6050 {
    address: u8,
}

impl Mpu6050 {
    pub const fn new(address: u8) -> Self {
        Self { address }
    }

    /// Check identity, wake the chip and set ranges and filter.
    pub async fn init<I: I2c>(&self, i2c: &mut I) -> Result<(), Error> {
        let mut id = [0u8; 1];
        i2c.write_read(self.address, &[reg::WHO_AM_I], &mut id)
            .await
            .map_err(|e| {
                warn!("MPU-6050: WHO_AM_I read failed ({})", defmt::Debug2Format(&e.kind()));
                Error::SensorInit
            })?;

        // Identity lives in bits 1..6.
        if id[0] & 0x7E != DEVICE_ID {
            warn!("MPU-6050: unexpected WHO_AM_I {=u8:#x}", id[0]);
            return Err(Error::SensorInit);
        }

        for (register, value) in [
            (reg::PWR_MGMT_1, CLOCK_PLL_XGYRO),
            (reg::ACCEL_CONFIG, ACCEL_RANGE_8G),
            (reg::GYRO_CONFIG, GYRO_RANGE_500),
            (reg::CONFIG, DLPF_5HZ),
        ] {
            i2c.write(self.address, &[register, value])
                .await
                .map_err(|_| Error::SensorInit)?;
        }

        info!("MPU-6050 ready (±8 g, ±500 °/s, 5 Hz DLPF)");
        Ok(())
    }

    /// Burst-read accel, temperature and gyro in one transaction.
    pub async fn read<I: I2c>(&self, i2c: &mut I) -> Result<MotionSample, I::Error> {
        let mut buf = [0u8; 14];
        i2c.write_read(self.address, &[reg::ACCEL_XOUT_H], &mut buf)
            .await?;

        let word = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        // Bytes 6..8 are the die temperature, not needed here.
        Ok(MotionSample::from_raw([
            word(0),
            word(2),
            word(4),
            word(8),
            word(10),
            word(12),
        ]))
    }
}
