//! tiltkey firmware entry point.
//!
//! Brings up the shared I²C bus, the OLED and the IMU, joins WiFi, then runs
//! the fixed-rate control loop. Display or IMU failure halts the device;
//! a failed network join only disables submitting.

#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use esp_backtrace as _;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use static_cell::StaticCell;

use tiltkey::config::{I2C_FREQUENCY_KHZ, LOOP_TICK_MS, MPU6050_ADDR, SH1106_ADDR};
use tiltkey::diag::DefmtLog;
use tiltkey::net::https::{Buffers, ClientState, GeminiClient};
use tiltkey::sensor::mpu6050::Mpu6050;
use tiltkey::ui::buttons::Buttons;
use tiltkey::ui::display::{OledRenderer, Sh1106};
use tiltkey::ui::{view, Renderer};
use tiltkey::{net, Diagnostic, DiagnosticSink, MotionSample, Session, TickInput, Tuning};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

/// Park the device after a fatal init error.
async fn halt() -> ! {
    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("tiltkey starting");
    let mut diag = DefmtLog;

    // ── Shared I²C bus ──────────────────────────────────────────────
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ));
    let mut i2c = match I2c::new(peripherals.I2C0, i2c_config) {
        Ok(i2c) => i2c
            .with_sda(peripherals.GPIO21)
            .with_scl(peripherals.GPIO22)
            .into_async(),
        Err(e) => {
            error!("I2C config rejected: {:?}", e);
            diag.record(Diagnostic::DisplayInit);
            halt().await
        }
    };

    // ── Display + IMU ───────────────────────────────────────────────
    static PANEL: StaticCell<Sh1106> = StaticCell::new();
    let panel = PANEL.init(Sh1106::new(SH1106_ADDR));
    if let Err(e) = panel.init(&mut i2c).await {
        diag.record(e.into());
        halt().await;
    }

    let imu = Mpu6050::new(MPU6050_ADDR);
    if let Err(e) = imu.init(&mut i2c).await {
        diag.record(e.into());
        let mut screen = OledRenderer::new(panel, &mut i2c);
        view::draw_status(&mut screen, &["MPU6050 failed"]);
        let _ = screen.present().await;
        halt().await;
    }

    let buttons = Buttons::new(peripherals.GPIO23, peripherals.GPIO12);

    // ── WiFi ────────────────────────────────────────────────────────
    let mut rng = Rng::new();
    let seed = (u64::from(rng.random()) << 32) | u64::from(rng.random());

    {
        let mut screen = OledRenderer::new(panel, &mut i2c);
        view::draw_status(&mut screen, &["Joining WiFi"]);
        let _ = screen.present().await;
    }

    static RADIO: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    static CLIENT_STATE: StaticCell<ClientState> = StaticCell::new();
    static BUFFERS: StaticCell<Buffers> = StaticCell::new();

    let mut fetcher = None;
    let mut ip: heapless::String<24> = heapless::String::new();

    match esp_radio::init() {
        Ok(radio) => {
            let radio = RADIO.init(radio);
            match esp_radio::wifi::new(radio, peripherals.WIFI, Default::default()) {
                Ok((controller, interfaces)) => {
                    let (stack, runner) = net::stack(interfaces.sta, seed);
                    spawner.must_spawn(net::connection_task(controller));
                    spawner.must_spawn(net::net_task(runner));

                    match net::join(stack).await {
                        Ok(address) => {
                            let _ = write!(ip, "{}", address);
                        }
                        Err(e) => diag.record(e.into()),
                    }

                    fetcher = Some(GeminiClient::new(
                        stack,
                        CLIENT_STATE.init(ClientState::new()),
                        BUFFERS.init(Buffers::new()),
                        rng,
                        net::API_KEY,
                    ));
                }
                Err(e) => {
                    error!("WiFi: driver init failed: {:?}", e);
                    diag.record(Diagnostic::WifiJoin);
                }
            }
        }
        Err(e) => {
            error!("Radio init failed: {:?}", e);
            diag.record(Diagnostic::WifiJoin);
        }
    }

    {
        let mut screen = OledRenderer::new(panel, &mut i2c);
        if ip.is_empty() {
            view::draw_status(&mut screen, &["WiFi failed"]);
        } else {
            view::draw_status(&mut screen, &["WiFi connected", ip.as_str()]);
        }
        let _ = screen.present().await;
        Timer::after(Duration::from_secs(1)).await;
    }

    // ── Control loop ────────────────────────────────────────────────
    let mut session = Session::new(Tuning::default());
    session
        .start(&mut OledRenderer::new(panel, &mut i2c), &mut diag)
        .await;

    loop {
        let sample = match imu.read(&mut i2c).await {
            Ok(sample) => sample,
            Err(_) => {
                diag.record(Diagnostic::SensorRead);
                MotionSample::default()
            }
        };

        let input = TickInput {
            sample,
            buttons: buttons.levels(),
            now_ms: Instant::now().as_millis(),
        };

        let mut screen = OledRenderer::new(panel, &mut i2c);
        session.tick(input, &mut screen, &mut fetcher, &mut diag).await;

        Timer::after(Duration::from_millis(LOOP_TICK_MS)).await;
    }
}
