//! WiFi station + IP stack.
//!
//! The radio joins a fixed network (credentials baked in at build time) and
//! `embassy-net` runs DHCP on top of it. Two background tasks keep the link
//! up: [`connection_task`] rejoins after a drop, [`net_task`] drives the
//! stack.

pub mod https;

use defmt::{info, warn};
use embassy_net::{Config, Ipv4Address, Runner, Stack, StackResources};
use embassy_time::{with_timeout, Duration, Timer};
use esp_radio::wifi::{
    ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent, WifiStaState,
};
use static_cell::StaticCell;

use crate::config::WIFI_JOIN_TIMEOUT_MS;
use crate::error::Error;

const WIFI_SSID: &str = env!("TILTKEY_WIFI_SSID");
const WIFI_PASSWORD: &str = env!("TILTKEY_WIFI_PASSWORD");
pub const API_KEY: &str = env!("TILTKEY_API_KEY");

/// DHCP + DNS + one TCP socket for the HTTPS client.
const SOCKETS: usize = 3;

/// Back-off between join attempts.
const RECONNECT_DELAY_MS: u64 = 5000;

/// Build the stack on top of the station interface.
pub fn stack(
    device: WifiDevice<'static>,
    seed: u64,
) -> (Stack<'static>, Runner<'static, WifiDevice<'static>>) {
    static RESOURCES: StaticCell<StackResources<SOCKETS>> = StaticCell::new();
    embassy_net::new(
        device,
        Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    )
}

/// Keep the station associated. Never returns.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: joining");
    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("WiFi: link lost");
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_password(WIFI_PASSWORD.into()),
            );
            if let Err(e) = controller.set_config(&config) {
                warn!("WiFi: config rejected ({:?})", e);
                Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                warn!("WiFi: start failed ({:?})", e);
                Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
                continue;
            }
        }

        match controller.connect_async().await {
            Ok(()) => info!("WiFi: associated"),
            Err(e) => {
                warn!("WiFi: connect failed ({:?})", e);
                Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
            }
        }
    }
}

#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

/// Wait for link and a DHCP lease, bounded by [`WIFI_JOIN_TIMEOUT_MS`].
pub async fn join(stack: Stack<'static>) -> Result<Ipv4Address, Error> {
    let lease = async {
        stack.wait_config_up().await;
        loop {
            if let Some(config) = stack.config_v4() {
                return config.address.address();
            }
            Timer::after(Duration::from_millis(100)).await;
        }
    };

    match with_timeout(Duration::from_millis(WIFI_JOIN_TIMEOUT_MS), lease).await {
        Ok(address) => {
            info!("WiFi: got address {}", address);
            Ok(address)
        }
        Err(_) => Err(Error::WifiJoin),
    }
}
