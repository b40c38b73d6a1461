/// Client, record types and normalization for the TVMaze API.
///
/// This module provides the stable record shapes handed to renderers, the
/// transport seam used to issue HTTP requests, and the client tying both
/// together.
mod client;
mod normalize;
pub(crate) mod transport;
mod types;

pub use client::TvMazeClient;
pub use normalize::{NO_SUMMARY_PLACEHOLDER, normalize_episode, normalize_show};
pub use transport::{ReqwestTransport, Transport};
pub use types::{RawEpisode, RawImage, RawSearchResult, RawShow};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the TVMaze API.
#[derive(Debug, Error)]
pub enum TvMazeError {
    /// The request could not be sent or the response could not be read
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The API answered with a non-success status code
    #[error("HTTP {status} {reason} for {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    /// The response body did not have the expected JSON shape
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

/// A show as handed to the render boundary.
///
/// `summary` is never empty and `image` is always a URL; see
/// [`normalize_show`] for the defaulting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowRecord {
    /// TVMaze show id
    pub id: u64,
    /// The show title
    pub name: String,
    /// Summary prose, may contain inline HTML from the API
    pub summary: String,
    /// Artwork URL
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// TVMaze episode id
    pub id: u64,
    /// The episode title
    pub name: String,
    /// Season number
    pub season: u32,
    /// Episode number within the season
    pub number: u32,
}
