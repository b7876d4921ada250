//! HTTPS transport for the Gemini codec.
//!
//! One TLS connection per request, no retries. The server certificate is
//! not checked: there is no CA store on the device.

use alloc::string::String;

use defmt::{info, warn};
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_net::Stack;
use esp_hal::rng::Rng;
use reqwless::client::{HttpClient, TlsConfig, TlsVerify};
use reqwless::headers::ContentType;
use reqwless::request::{Method, RequestBuilder};

use crate::config::{HTTP_RX_BUFFER, TLS_RX_BUFFER, TLS_TX_BUFFER};
use crate::error::FetchError;
use crate::fetch::{gemini, Fetcher};

/// Socket buffers for the single concurrent connection.
pub type ClientState = TcpClientState<1, 4096, 4096>;

/// Buffers the client borrows for its whole life.
pub struct Buffers {
    tls_rx: [u8; TLS_RX_BUFFER],
    tls_tx: [u8; TLS_TX_BUFFER],
    http_rx: [u8; HTTP_RX_BUFFER],
}

impl Buffers {
    pub const fn new() -> Self {
        Self {
            tls_rx: [0; TLS_RX_BUFFER],
            tls_tx: [0; TLS_TX_BUFFER],
            http_rx: [0; HTTP_RX_BUFFER],
        }
    }
}

pub struct GeminiClient<'a> {
    stack: Stack<'a>,
    state: &'a ClientState,
    buffers: &'a mut Buffers,
    rng: Rng,
    url: String,
}

impl<'a> GeminiClient<'a> {
    pub fn new(
        stack: Stack<'a>,
        state: &'a ClientState,
        buffers: &'a mut Buffers,
        rng: Rng,
        api_key: &str,
    ) -> Self {
        Self {
            stack,
            state,
            buffers,
            rng,
            url: gemini::endpoint_url(api_key),
        }
    }

    fn seed(&mut self) -> u64 {
        (u64::from(self.rng.random()) << 32) | u64::from(self.rng.random())
    }
}

impl Fetcher for GeminiClient<'_> {
    async fn fetch(&mut self, prompt: &str, max_output_tokens: u16) -> Result<String, FetchError> {
        let body = gemini::request_body(prompt, max_output_tokens)?;
        let seed = self.seed();

        let tcp = TcpClient::new(self.stack, self.state);
        let dns = DnsSocket::new(self.stack);
        let Buffers {
            tls_rx,
            tls_tx,
            http_rx,
        } = &mut *self.buffers;
        let tls = TlsConfig::new(seed, tls_rx, tls_tx, TlsVerify::None);
        let mut client = HttpClient::new_with_tls(&tcp, &dns, tls);

        let mut request = client
            .request(Method::POST, &self.url)
            .await
            .map_err(|e| {
                warn!("HTTPS: connect failed ({:?})", e);
                FetchError::Transport
            })?
            .content_type(ContentType::ApplicationJson)
            .body(body.as_slice());

        let response = request.send(http_rx).await.map_err(|e| {
            warn!("HTTPS: request failed ({:?})", e);
            FetchError::Transport
        })?;

        let status = response.status.0;
        info!("HTTPS: status {=u16}", status);
        gemini::check_status(status)?;

        let bytes = response.body().read_to_end().await.map_err(|e| {
            warn!("HTTPS: body read failed ({:?})", e);
            FetchError::Transport
        })?;

        let text = gemini::parse_response(bytes)?;
        info!("Response: {=str}", text.as_str());
        Ok(text)
    }
}
