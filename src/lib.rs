//! tv_lookup - Search TV shows and list their episodes
//!
//! This library queries the TVMaze API, normalizes the partially-absent
//! payloads into stable records and publishes them to a rendering
//! collaborator, making sure that only the most recent user action ever
//! reaches the screen.

mod config;
mod sequencing;
mod tvmaze;

// Re-export error types
pub use config::ConfigError;
pub use tvmaze::TvMazeError;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_IMAGE_URL, DEFAULT_TIMEOUT_SECS};
pub use sequencing::{RequestSequencer, Ticket};
pub use tvmaze::{
    EpisodeRecord, NO_SUMMARY_PLACEHOLDER, RawEpisode, RawImage, RawSearchResult, RawShow,
    ReqwestTransport, ShowRecord, Transport, TvMazeClient, normalize_episode, normalize_show,
};

use thiserror::Error;

/// Event delivered to the render boundary
///
/// The library makes no assumption about how these are displayed. Every
/// published search starts with [`BrowserEvent::EpisodesHidden`] followed
/// by exactly one of `ShowsFound`, `NoShowsFound` or `RequestFailed`.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    /// A search request has been issued
    SearchStarted { term: String },

    /// The episode area should be cleared
    EpisodesHidden,

    /// Shows matching the search, in API relevance order
    ShowsFound { shows: Vec<ShowRecord> },

    /// The search matched nothing
    NoShowsFound { term: String },

    /// An episode request has been issued
    EpisodesRequested { show_id: u64 },

    /// Episodes of a show, in API order
    EpisodesFound {
        show_id: u64,
        episodes: Vec<EpisodeRecord>,
    },

    /// The show has no episodes
    NoEpisodesFound { show_id: u64 },

    /// The latest request failed; previous results are no longer valid
    RequestFailed { message: String },
}

/// Result of a browser action
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The result was published to the render boundary
    Published(T),
    /// A newer action was issued before this one completed; nothing was published
    Stale,
}

/// Top-level error type for tv_lookup operations
#[derive(Debug, Error)]
pub enum TvLookupError {
    /// Error while loading the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while talking to the TVMaze API
    #[error("TVMaze error: {0}")]
    TvMaze(#[from] TvMazeError),
}

/// Searches shows and lists episodes with last-submitted-wins semantics
///
/// All methods take `&self`, so one browser can be shared between threads.
/// Starting a search also invalidates any pending episode request, since the
/// episode area is hidden by every published search.
pub struct ShowBrowser<T = ReqwestTransport> {
    client: TvMazeClient<T>,
    searches: RequestSequencer,
    episodes: RequestSequencer,
}

impl ShowBrowser<ReqwestTransport> {
    /// Creates a browser talking to the API described by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self, TvLookupError> {
        config.validate()?;
        Ok(Self::new(TvMazeClient::new(config)?))
    }
}

impl<T> ShowBrowser<T>
where
    T: Transport,
{
    pub fn new(client: TvMazeClient<T>) -> Self {
        Self {
            client,
            searches: RequestSequencer::new(),
            episodes: RequestSequencer::new(),
        }
    }

    /// The underlying API client
    pub fn client(&self) -> &TvMazeClient<T> {
        &self.client
    }

    /// Searches shows for `term` and publishes the result
    ///
    /// # Returns
    ///
    /// `Outcome::Published` with the shows when this search is still the
    /// latest one, `Outcome::Stale` when a newer search superseded it.
    ///
    /// # Errors
    ///
    /// Returns the request error after publishing it as
    /// [`BrowserEvent::RequestFailed`]. Errors of stale searches are
    /// swallowed.
    ///
    /// `render` may start another search or episode request. That request is
    /// published right away and the remaining events of this search are
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tv_lookup::{BrowserEvent, ClientConfig, ShowBrowser};
    ///
    /// let browser = ShowBrowser::from_config(&ClientConfig::default()).unwrap();
    /// browser
    ///     .search_and_display("the office", |event| {
    ///         if let BrowserEvent::ShowsFound { shows } = event {
    ///             for show in shows {
    ///                 println!("{} ({})", show.name, show.id);
    ///             }
    ///         }
    ///     })
    ///     .unwrap();
    /// ```
    pub fn search_and_display<F>(
        &self,
        term: &str,
        mut render: F,
    ) -> Result<Outcome<Vec<ShowRecord>>, TvMazeError>
    where
        F: FnMut(BrowserEvent),
    {
        let ticket = self.searches.issue();
        // Pending episode lists belong to the previous result set
        self.episodes.issue();

        render(BrowserEvent::SearchStarted {
            term: term.to_string(),
        });

        let result = self.client.search_shows(term);

        let published = self.searches.publish_if_current(ticket, || {
            let outcome = match &result {
                Ok(shows) if shows.is_empty() => BrowserEvent::NoShowsFound {
                    term: term.to_string(),
                },
                Ok(shows) => BrowserEvent::ShowsFound {
                    shows: shows.clone(),
                },
                Err(e) => {
                    log::warn!("Search for '{}' failed: {}", term, e);
                    BrowserEvent::RequestFailed {
                        message: e.to_string(),
                    }
                }
            };

            // The renderer may start a newer search from its callback
            for event in [BrowserEvent::EpisodesHidden, outcome] {
                if !self.searches.is_current(ticket) {
                    break;
                }
                render(event);
            }
        });

        match published {
            Some(()) => result.map(Outcome::Published),
            None => Ok(Outcome::Stale),
        }
    }

    /// Fetches the episodes of `show_id` and publishes them
    ///
    /// Follows the same publishing and error rules as
    /// [`ShowBrowser::search_and_display`].
    pub fn show_episodes<F>(
        &self,
        show_id: u64,
        mut render: F,
    ) -> Result<Outcome<Vec<EpisodeRecord>>, TvMazeError>
    where
        F: FnMut(BrowserEvent),
    {
        let ticket = self.episodes.issue();

        render(BrowserEvent::EpisodesRequested { show_id });

        let result = self.client.list_episodes(show_id);

        let published = self.episodes.publish_if_current(ticket, || match &result {
            Ok(episodes) if episodes.is_empty() => {
                render(BrowserEvent::NoEpisodesFound { show_id })
            }
            Ok(episodes) => render(BrowserEvent::EpisodesFound {
                show_id,
                episodes: episodes.clone(),
            }),
            Err(e) => {
                log::warn!("Listing episodes of show {} failed: {}", show_id, e);
                render(BrowserEvent::RequestFailed {
                    message: e.to_string(),
                });
            }
        });

        match published {
            Some(()) => result.map(Outcome::Published),
            None => Ok(Outcome::Stale),
        }
    }
}
