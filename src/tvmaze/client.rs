/// TVMaze API client.
use super::normalize::{normalize_episode, normalize_show};
use super::transport::{ReqwestTransport, Transport};
use super::types::{RawEpisode, RawSearchResult};
use super::{EpisodeRecord, ShowRecord, TvMazeError};
use crate::config::ClientConfig;
use serde::de::DeserializeOwned;

/// Client for the TVMaze search and episode endpoints.
///
/// Responses are decoded and normalized before they are returned, so callers
/// only ever see [`ShowRecord`] and [`EpisodeRecord`] values. The order of
/// the API response is preserved.
pub struct TvMazeClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    default_image: String,
}

impl TvMazeClient<ReqwestTransport> {
    /// Creates a client talking HTTP through `reqwest`.
    pub fn new(config: &ClientConfig) -> Result<Self, TvMazeError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?, config))
    }
}

impl<T> TvMazeClient<T>
where
    T: Transport,
{
    /// Creates a client using the given transport.
    pub fn with_transport(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: config.api_base().to_string(),
            default_image: config.default_image_url.clone(),
        }
    }

    /// Searches shows matching `term`.
    ///
    /// The term is percent-encoded into the query string.
    pub fn search_shows(&self, term: &str) -> Result<Vec<ShowRecord>, TvMazeError> {
        let url = self.search_url(term);
        let raw: Vec<RawSearchResult> = self.fetch_json(&url)?;

        let shows: Vec<ShowRecord> = raw
            .into_iter()
            .map(|entry| normalize_show(entry, &self.default_image))
            .collect();

        log::debug!("Search for '{}' returned {} show(s)", term, shows.len());
        Ok(shows)
    }

    /// Lists all episodes of the show with the given id.
    pub fn list_episodes(&self, show_id: u64) -> Result<Vec<EpisodeRecord>, TvMazeError> {
        let url = self.episodes_url(show_id);
        let raw: Vec<RawEpisode> = self.fetch_json(&url)?;

        let episodes: Vec<EpisodeRecord> = raw.into_iter().map(normalize_episode).collect();

        log::debug!("Show {} has {} episode(s)", show_id, episodes.len());
        Ok(episodes)
    }

    /// Gives access to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn search_url(&self, term: &str) -> String {
        format!(
            "{}/search/shows/?q={}",
            self.base_url,
            urlencoding::encode(term)
        )
    }

    fn episodes_url(&self, show_id: u64) -> String {
        format!("{}/shows/{}/episodes", self.base_url, show_id)
    }

    fn fetch_json<R>(&self, url: &str) -> Result<R, TvMazeError>
    where
        R: DeserializeOwned,
    {
        log::debug!("GET {}", url);
        let body = self.transport.get(url)?;

        serde_json::from_str(&body).map_err(|e| TvMazeError::MalformedResponse(e.to_string()))
    }
}
