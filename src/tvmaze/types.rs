/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Only the fields that end up in a record are declared; everything else in
/// the payload is ignored.
use serde::Deserialize;

/// One entry of the `/search/shows` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearchResult {
    /// The matched show
    pub show: RawShow,
}

/// A show object as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawShow {
    /// TVMaze show id
    pub id: u64,
    /// The name of the TV show
    pub name: String,
    /// Summary in HTML format (may be null or missing)
    #[serde(default)]
    pub summary: Option<String>,
    /// Artwork variants (null for shows without artwork)
    #[serde(default)]
    pub image: Option<RawImage>,
}

/// Artwork URLs of a show; only the full resolution variant is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub original: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    /// TVMaze episode id
    pub id: u64,
    /// Episode title
    pub name: String,
    /// Season number
    pub season: u32,
    /// Episode number within the season
    pub number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_ignores_unknown_fields() {
        let json = r#"{
            "score": 0.91,
            "show": {
                "id": 975,
                "url": "https://www.tvmaze.com/shows/975/batman",
                "name": "Batman",
                "language": "English",
                "summary": "<p>Wealthy gentleman Bruce Wayne</p>",
                "image": {
                    "medium": "https://static.tvmaze.com/m.jpg",
                    "original": "https://static.tvmaze.com/o.jpg"
                }
            }
        }"#;

        let raw: RawSearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(raw.show.id, 975);
        assert_eq!(raw.show.name, "Batman");
        let image = raw.show.image.unwrap();
        assert_eq!(image.original.as_deref(), Some("https://static.tvmaze.com/o.jpg"));
    }

    #[test]
    fn test_show_optional_fields_may_be_missing() {
        let raw: RawShow = serde_json::from_str(r#"{"id": 1, "name": "Batman"}"#).unwrap();
        assert!(raw.summary.is_none());
        assert!(raw.image.is_none());
    }

    #[test]
    fn test_episode_requires_number() {
        let result: Result<RawEpisode, _> =
            serde_json::from_str(r#"{"id": 100, "name": "Special", "season": 1, "number": null}"#);
        assert!(result.is_err());
    }
}
