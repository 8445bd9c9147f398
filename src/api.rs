use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::models::{Guest, NewParty, Party, Rsvp};

/// Data service client errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Response parsing error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Every payload from the data service is wrapped in a `data` envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Operations against the party data service.
///
/// The HTTP client implements this; controller tests drive the same seam
/// with an in-memory mock.
#[async_trait]
pub trait PartyService: Send + Sync {
    /// Fetch the full party collection.
    async fn list_parties(&self) -> ApiResult<Vec<Party>>;

    /// Fetch a single party by id.
    async fn get_party(&self, id: i64) -> ApiResult<Party>;

    /// Fetch guests and RSVPs with both requests in flight concurrently.
    /// Either failure fails the whole operation; no partial result.
    async fn list_guests_and_rsvps(&self) -> ApiResult<(Vec<Guest>, Vec<Rsvp>)>;

    /// Create a party. Non-2xx is a failure.
    async fn create_party(&self, party: &NewParty) -> ApiResult<Party>;

    /// Delete a party by id. Non-2xx is a failure.
    async fn delete_party(&self, id: i64) -> ApiResult<()>;
}

/// HTTP client for the party data service
///
/// The service exposes `{base}/{cohort}/events`, `/guests` and `/rsvps`,
/// all wrapped in `{ "data": ... }` envelopes.
pub struct PartyApiClient {
    client: Client,
    events_url: Url,
    guests_url: Url,
    rsvps_url: Url,
}

impl PartyApiClient {
    /// Create a new client for the given service base URL and cohort
    pub fn new(base_url: &str, cohort: &str, timeout_secs: u64) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        let base = Url::parse(&format!("{}/{}/", base_url.trim_end_matches('/'), cohort))?;

        Ok(Self {
            client,
            events_url: base.join("events")?,
            guests_url: base.join("guests")?,
            rsvps_url: base.join("rsvps")?,
        })
    }

    fn event_url(&self, id: i64) -> ApiResult<Url> {
        Ok(Url::parse(&format!("{}/{}", self.events_url, id))?)
    }

    /// Send a request and fail on non-2xx responses
    async fn send(&self, method: Method, url: Url, body: Option<&NewParty>) -> ApiResult<Response> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status { status, message });
        }

        Ok(response)
    }

    /// Read a response body and unwrap the `data` envelope
    async fn read_envelope<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let text = response.text().await?;
        let envelope: Envelope<T> =
            serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.send(Method::GET, url, None).await?;
        self.read_envelope(response).await
    }
}

#[async_trait]
impl PartyService for PartyApiClient {
    async fn list_parties(&self) -> ApiResult<Vec<Party>> {
        self.get_json(self.events_url.clone()).await
    }

    async fn get_party(&self, id: i64) -> ApiResult<Party> {
        self.get_json(self.event_url(id)?).await
    }

    async fn list_guests_and_rsvps(&self) -> ApiResult<(Vec<Guest>, Vec<Rsvp>)> {
        // Both requests go out before either is awaited
        let (guests, rsvps) = tokio::try_join!(
            self.get_json::<Vec<Guest>>(self.guests_url.clone()),
            self.get_json::<Vec<Rsvp>>(self.rsvps_url.clone()),
        )?;
        Ok((guests, rsvps))
    }

    async fn create_party(&self, party: &NewParty) -> ApiResult<Party> {
        let response = self
            .send(Method::POST, self.events_url.clone(), Some(party))
            .await?;
        self.read_envelope(response).await
    }

    async fn delete_party(&self, id: i64) -> ApiResult<()> {
        self.send(Method::DELETE, self.event_url(id)?, None).await?;
        Ok(())
    }
}
