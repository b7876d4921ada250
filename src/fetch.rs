//! Remote text generation.
//!
//! [`Fetcher`] is the blocking boundary of the control loop: the session
//! awaits it inline, so no input is sampled and nothing is redrawn until it
//! returns. The [`gemini`] codec builds the request and pulls the text out
//! of the reply; the transport lives in `net::https` on target.

use alloc::string::String;

use crate::error::FetchError;

/// Sends a prompt, returns the generated text.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&mut self, prompt: &str, max_output_tokens: u16) -> Result<String, FetchError>;
}

/// No transport (radio never came up): every submit fails as a transport
/// error and the session keeps the input.
impl<F: Fetcher> Fetcher for Option<F> {
    async fn fetch(&mut self, prompt: &str, max_output_tokens: u16) -> Result<String, FetchError> {
        match self {
            Some(inner) => inner.fetch(prompt, max_output_tokens).await,
            None => Err(FetchError::Transport),
        }
    }
}

/// Gemini `generateContent` wire format.
pub mod gemini {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use serde::{Deserialize, Serialize};

    use crate::config::GEMINI_ENDPOINT;
    use crate::error::FetchError;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct GenerateContentRequest<'a> {
        contents: [RequestContent<'a>; 1],
        generation_config: GenerationConfig,
    }

    #[derive(Serialize)]
    struct RequestContent<'a> {
        parts: [RequestPart<'a>; 1],
    }

    #[derive(Serialize)]
    struct RequestPart<'a> {
        text: &'a str,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct GenerationConfig {
        max_output_tokens: u16,
    }

    #[derive(Deserialize)]
    struct GenerateContentResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<Content>,
    }

    #[derive(Deserialize)]
    struct Content {
        #[serde(default)]
        parts: Vec<Part>,
    }

    #[derive(Deserialize)]
    struct Part {
        text: Option<String>,
    }

    /// Full request URL with the API key in the query string.
    pub fn endpoint_url(api_key: &str) -> String {
        format!("{}?key={}", GEMINI_ENDPOINT, api_key)
    }

    /// JSON request body for one prompt.
    pub fn request_body(prompt: &str, max_output_tokens: u16) -> Result<Vec<u8>, FetchError> {
        let request = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        };
        serde_json::to_vec(&request).map_err(|_| FetchError::Encode)
    }

    /// Only HTTP 200 carries a usable body.
    pub fn check_status(status: u16) -> Result<(), FetchError> {
        match status {
            200 => Ok(()),
            other => Err(FetchError::Status(other)),
        }
    }

    /// Extract `candidates[0].content.parts[0].text`.
    pub fn parse_response(body: &[u8]) -> Result<String, FetchError> {
        let response: GenerateContentResponse =
            serde_json::from_slice(body).map_err(|_| FetchError::MalformedJson)?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(FetchError::MissingText)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn url_carries_key() {
            let url = endpoint_url("abc123");
            assert!(url.starts_with("https://generativelanguage.googleapis.com/"));
            assert!(url.ends_with(":generateContent?key=abc123"));
        }

        #[test]
        fn body_layout() {
            let body = request_body("HI", 120).unwrap();
            assert_eq!(
                core::str::from_utf8(&body).unwrap(),
                r#"{"contents":[{"parts":[{"text":"HI"}]}],"generationConfig":{"maxOutputTokens":120}}"#
            );
        }

        #[test]
        fn body_escapes_prompt() {
            let body = request_body("SAY \"HI\"", 8).unwrap();
            let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value["contents"][0]["parts"][0]["text"], "SAY \"HI\"");
        }

        #[test]
        fn only_200_is_ok() {
            assert_eq!(check_status(200), Ok(()));
            assert_eq!(check_status(404), Err(FetchError::Status(404)));
            assert_eq!(check_status(500), Err(FetchError::Status(500)));
        }

        #[test]
        fn parses_first_text_part() {
            let body = br#"{
                "candidates": [
                    {"content": {"parts": [{"text": "HELLO\nWORLD"}, {"text": "ignored"}], "role": "model"},
                     "finishReason": "STOP"}
                ],
                "usageMetadata": {"totalTokenCount": 12}
            }"#;
            assert_eq!(parse_response(body).unwrap(), "HELLO\nWORLD");
        }

        #[test]
        fn missing_path_is_missing_text() {
            assert_eq!(parse_response(b"{}"), Err(FetchError::MissingText));
            assert_eq!(
                parse_response(br#"{"candidates":[]}"#),
                Err(FetchError::MissingText)
            );
            assert_eq!(
                parse_response(br#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
                Err(FetchError::MissingText)
            );
            assert_eq!(
                parse_response(br#"{"candidates":[{"content":{"parts":[{}]}}]}"#),
                Err(FetchError::MissingText)
            );
        }

        #[test]
        fn invalid_json_is_malformed() {
            assert_eq!(parse_response(b"<html>"), Err(FetchError::MalformedJson));
            assert_eq!(parse_response(b""), Err(FetchError::MalformedJson));
            assert_eq!(parse_response(b"[1,2]"), Err(FetchError::MalformedJson));
        }
    }
}
