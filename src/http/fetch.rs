//! Single resource retrieval.

use crate::error::{Error, Result};
use crate::http::charset::decode_text;
use crate::http::{create_http_client, HttpClientConfig};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{header::CONTENT_TYPE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use tracing::debug;

/// A retrieved resource.
#[derive(Debug, Clone)]
pub struct Resource {
    /// URL that was requested.
    pub url: Url,
    /// Status code of the response.
    pub status: StatusCode,
    /// `Content-Type` header, if the server sent a readable one.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Bytes,
}

impl Resource {
    /// Body decoded with the charset of the response, see [`decode_text`].
    pub fn text(&self) -> String {
        decode_text(&self.body, self.content_type.as_deref())
    }
}

/// Issues GET requests and classifies their failures.
///
/// Every call is a single attempt unless the underlying client carries a
/// retry middleware.
#[derive(Clone)]
pub struct Fetcher {
    client: ClientWithMiddleware,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Wraps an existing client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Builds the client from `config`.
    pub fn from_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(create_http_client(config)?))
    }

    /// Fetches `url`.
    pub async fn fetch(&self, url: &Url) -> Result<Resource> {
        self.fetch_with_progress(url, &ProgressBar::hidden()).await
    }

    /// Fetches `url`, advancing `pb` by the number of body bytes received.
    ///
    /// Fails with [`Error::Http`] on a 4xx/5xx status and with
    /// [`Error::Network`] when the request or the body transfer fails.
    pub async fn fetch_with_progress(&self, url: &Url, pb: &ProgressBar) -> Result<Resource> {
        debug!("Fetching {}", url);
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Network {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Http {
                url: url.clone(),
                status,
            });
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        if let Some(len) = res.content_length() {
            pb.set_length(len);
        }

        // Collect the body chunk by chunk.
        let mut body = BytesMut::new();
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk = item.map_err(|e| Error::Network {
                url: url.clone(),
                source: e.into(),
            })?;
            pb.inc(chunk.len() as u64);
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(Resource {
            url: url.clone(),
            status,
            content_type,
            body: body.freeze(),
        })
    }
}
