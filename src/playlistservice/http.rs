use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::from_str;
use tracing::debug;

use crate::{
    config::serviceconfig::ServiceConfig,
    playlistservice::{
        error::{ErrorBody, ServiceError},
        types::{ImportResponse, ImportedPlaylist, PlaylistID, PlaylistSummary},
        PlaylistService,
    },
    session::AuthToken,
};

/// [`PlaylistService`] backed by the HTTP import API.
pub struct HttpPlaylistService {
    client: Client,
    base: Url,
    slug: String,
}

impl HttpPlaylistService {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let base = Url::parse(&config.api_url)
            .map_err(|_| ServiceError::InvalidURL(config.api_url.clone()))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::InvalidURL(config.api_url.clone()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base,
            slug: config.service_slug.clone(),
        })
    }

    fn endpoint(&self, extra: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["playlist", self.slug.as_str(), "import"]);
            if let Some(e) = extra {
                segments.push(e);
            }
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &AuthToken,
    ) -> Result<T, ServiceError> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", token.as_str()))
            .send()
            .await?;
        let body = Self::check_status(res).await?;
        Ok(from_str::<T>(&body)?)
    }

    async fn check_status(res: Response) -> Result<String, ServiceError> {
        let status = res.status();
        let body = res.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        match from_str::<ErrorBody>(&body).ok().and_then(ErrorBody::into_message) {
            Some(message) => {
                debug!("{status}: {message}");
                Err(ServiceError::Server(message))
            }
            None => Err(ServiceError::Status(status)),
        }
    }
}

impl PlaylistService for HttpPlaylistService {
    async fn list_playlists(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<PlaylistSummary>, ServiceError> {
        let playlists: Option<Vec<PlaylistSummary>> = self.get(self.endpoint(None), token).await?;
        Ok(playlists.unwrap_or_default())
    }

    async fn import_playlist(
        &self,
        token: &AuthToken,
        id: &PlaylistID,
    ) -> Result<ImportedPlaylist, ServiceError> {
        let res: ImportResponse = self.get(self.endpoint(Some(id.as_str())), token).await?;
        Ok(res.into())
    }
}
