use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const TRACE_LOG_MAX_BYTES: usize = 1024;
const TRACE_TRUNCATE_SUFFIX: &str = "... (truncated)";

/// The `{ success, data | error }` wrapper around every response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Envelope {
    /// The payload of a successful envelope, or the service error it carries.
    #[allow(clippy::result_large_err)]
    pub fn into_result(self) -> Result<Value> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Service(self.error.unwrap_or_default()))
        }
    }
}

/// An adapter for the CallWhiz REST API.
///
/// Owns the HTTP session. Once [`RestAdapter::close`] has been called every
/// request fails with [`Error::Closed`] without touching the network.
#[derive(Clone, Debug)]
pub struct RestAdapter {
    client: Option<Client>,
    base_url: Url,
}

impl RestAdapter {
    /// Open a session for the given configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    #[allow(clippy::result_large_err)]
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.resolved_base_url()?;
        let (name, value) = config.version.credential_header(&config.api_key)?;

        let mut headers = HeaderMap::new();
        headers.insert(name, value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()?;

        Ok(Self {
            client: Some(client),
            base_url,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    /// Release the HTTP session. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            tracing::info!("CallWhiz session closed");
        }
    }

    /// Resolve `segments` under the base address, percent-encoding each one.
    #[allow(clippy::result_large_err)]
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// Issue a request and return the raw `data` payload of the envelope.
    ///
    /// # Errors
    /// Returns a status-specific error for 401/404/429, [`Error::Api`] for any
    /// other non-success status, [`Error::Service`] when the envelope reports
    /// failure, and [`Error::Http`] when the request cannot be sent at all.
    pub async fn request<Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let client = self.client.as_ref().ok_or(Error::Closed)?;
        let url = self.url(segments)?;
        tracing::debug!("{method} {}", url.path());

        let mut req = client.request(method, url);
        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body) = body {
            let json = serde_json::to_string(body)?;
            tracing::trace!("Sending body: {}", safe_truncate(&json, TRACE_LOG_MAX_BYTES));
            req = req.body(json);
        }

        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;
        tracing::trace!("Received body: {}", safe_truncate(&text, TRACE_LOG_MAX_BYTES));

        if !status.is_success() {
            tracing::debug!("Request failed with status {status}");
            return Err(Error::from_status(status, text));
        }

        let envelope: Envelope = serde_json::from_str(&text)?;
        envelope.into_result()
    }

    /// Issue a request and decode the envelope payload into `T`.
    ///
    /// # Errors
    /// Same as [`RestAdapter::request`], plus [`Error::Serialization`] if the
    /// payload does not match `T`.
    pub async fn request_json<T, Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let data = self.request(method, segments, query, body).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// # Errors
    /// See [`RestAdapter::request_json`].
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.request_json::<T, (), ()>(Method::GET, segments, None, None).await
    }

    /// # Errors
    /// See [`RestAdapter::request_json`].
    pub async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request_json::<T, Q, ()>(Method::GET, segments, Some(query), None).await
    }

    /// # Errors
    /// See [`RestAdapter::request_json`].
    pub async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json::<T, (), B>(Method::POST, segments, None, Some(body)).await
    }

    /// # Errors
    /// See [`RestAdapter::request_json`].
    pub async fn put<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json::<T, (), B>(Method::PUT, segments, None, Some(body)).await
    }

    /// Delete a resource. The payload is ignored; failures are raised, never `false`.
    ///
    /// # Errors
    /// See [`RestAdapter::request`].
    pub async fn delete(&self, segments: &[&str]) -> Result<bool> {
        self.request::<(), ()>(Method::DELETE, segments, None, None).await?;
        Ok(true)
    }
}

fn safe_truncate(s: &str, max_bytes: usize) -> std::borrow::Cow<'_, str> {
    if s.len() <= max_bytes {
        return std::borrow::Cow::Borrowed(s);
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    std::borrow::Cow::Owned(format!(
        "{} {} {} bytes",
        &s[..end],
        TRACE_TRUNCATE_SUFFIX,
        s.len() - end
    ))
}
