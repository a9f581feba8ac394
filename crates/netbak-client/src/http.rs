//! reqwest-backed command channel

use netbak_core::prelude::*;
use netbak_core::{DeviceId, DeviceRecord};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::channel::CommandChannel;
use crate::protocol::{CliRequest, CliResponse, CommandOutcome, ErrorBody};

/// Backend API root used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Command channel over the console's REST API.
///
/// No request timeout is set: a command that never answers keeps the session
/// in `Executing` until the user cancels it locally.
#[derive(Debug, Clone)]
pub struct HttpCommandChannel {
    client: Client,
    base_url: Url,
}

impl HttpCommandChannel {
    /// Create a channel rooted at `base_url` (e.g. `http://host:8000/api`).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("netbak-term/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(client, base_url)
    }

    /// Create a channel with a caller-supplied client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|_| Error::invalid_url(base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::invalid_url(base_url.as_str()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/devices/{id}` plus any extra path segments
    fn device_url(&self, device_id: DeviceId, extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        let id = device_id.to_string();
        url.path_segments_mut()
            .map_err(|_| Error::invalid_url(self.base_url.as_str()))?
            .pop_if_empty()
            .push("devices")
            .push(&id)
            .extend(extra);
        Ok(url)
    }
}

/// Map a transport-level reqwest failure
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_connect() {
        Error::http(format!("cannot reach backend: {err}"))
    } else if err.is_decode() {
        Error::backend(format!("malformed response: {err}"))
    } else {
        Error::http(err.to_string())
    }
}

/// Turn a non-2xx response into an error, using the body's detail if present
async fn status_error(response: Response) -> Error {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.describe());
    match detail {
        Some(detail) => Error::backend(format!("HTTP {}: {}", status.as_u16(), detail)),
        None => Error::backend(format!("HTTP {}", status.as_u16())),
    }
}

impl CommandChannel for HttpCommandChannel {
    async fn fetch_device(&self, device_id: DeviceId) -> Result<DeviceRecord> {
        let url = self.device_url(device_id, &[])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::device_not_found(device_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        response.json().await.map_err(transport_error)
    }

    async fn execute(&self, device_id: DeviceId, command: &str) -> Result<CommandOutcome> {
        let url = self.device_url(device_id, &["cli"])?;
        debug!("POST {} command={:?}", url, command);

        let response = self
            .client
            .post(url)
            .json(&CliRequest { command })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            warn!("Command {:?} failed: {}", command, err);
            return Err(err);
        }

        let body: CliResponse = response.json().await.map_err(transport_error)?;
        trace!("Command {:?} response success={}", command, body.success);
        Ok(body.into())
    }

    async fn close_session(&self, device_id: DeviceId) -> Result<()> {
        let url = self.device_url(device_id, &["cli"])?;
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}
