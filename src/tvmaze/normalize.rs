//! Conversion of raw API payloads into the stable record shapes.

use super::types::{RawEpisode, RawSearchResult};
use super::{EpisodeRecord, ShowRecord};

/// Summary used when the API provides none.
pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary available";

/// Converts a search result entry into a [`ShowRecord`].
///
/// A null or missing `image` yields `default_image`. Otherwise the
/// `original` variant is used, or `default_image` when that variant is
/// missing or empty.
///
/// A null, missing or empty `summary` yields [`NO_SUMMARY_PLACEHOLDER`]; any
/// other summary is passed through untouched, markup included.
pub fn normalize_show(raw: RawSearchResult, default_image: &str) -> ShowRecord {
    let show = raw.show;

    let image = show
        .image
        .and_then(|image| non_empty(image.original))
        .unwrap_or_else(|| default_image.to_string());

    let summary =
        non_empty(show.summary).unwrap_or_else(|| NO_SUMMARY_PLACEHOLDER.to_string());

    ShowRecord {
        id: show.id,
        name: show.name,
        summary,
        image,
    }
}

/// Converts a raw episode into an [`EpisodeRecord`].
pub fn normalize_episode(raw: RawEpisode) -> EpisodeRecord {
    EpisodeRecord {
        id: raw.id,
        name: raw.name,
        season: raw.season,
        number: raw.number,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tvmaze::types::{RawImage, RawShow};

    const DEFAULT_IMAGE: &str = "https://example.com/default.png";

    fn search_result(summary: Option<&str>, image: Option<RawImage>) -> RawSearchResult {
        RawSearchResult {
            show: RawShow {
                id: 1,
                name: "Batman".to_string(),
                summary: summary.map(str::to_string),
                image,
            },
        }
    }

    fn image(original: Option<&str>) -> RawImage {
        RawImage {
            original: original.map(str::to_string),
        }
    }

    #[test]
    fn test_null_image_uses_default() {
        let show = normalize_show(search_result(Some("x"), None), DEFAULT_IMAGE);
        assert_eq!(show.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_original_image_is_selected() {
        let raw = search_result(Some("x"), Some(image(Some("https://o.jpg"))));
        assert_eq!(normalize_show(raw, DEFAULT_IMAGE).image, "https://o.jpg");
    }

    #[test]
    fn test_missing_original_uses_default() {
        let raw = search_result(Some("x"), Some(image(None)));
        assert_eq!(normalize_show(raw, DEFAULT_IMAGE).image, DEFAULT_IMAGE);

        let raw = search_result(Some("x"), Some(image(Some(""))));
        assert_eq!(normalize_show(raw, DEFAULT_IMAGE).image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_medium_image_is_ignored() {
        let raw: RawSearchResult = serde_json::from_str(
            r#"{"show": {"id": 1, "name": "X", "summary": "s",
                "image": {"medium": "https://m.jpg", "original": null}}}"#,
        )
        .unwrap();
        assert_eq!(normalize_show(raw, DEFAULT_IMAGE).image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_missing_summary_uses_placeholder() {
        for summary in [None, Some("")] {
            let show = normalize_show(search_result(summary, None), DEFAULT_IMAGE);
            assert_eq!(show.summary, NO_SUMMARY_PLACEHOLDER);
        }
    }

    #[test]
    fn test_summary_passes_through_unmodified() {
        for summary in ["<p>A <b>dark</b> knight.</p>", " ", "plain"] {
            let show = normalize_show(search_result(Some(summary), None), DEFAULT_IMAGE);
            assert_eq!(show.summary, summary);
        }
    }

    #[test]
    fn test_batman_scenario() {
        let raw: Vec<RawSearchResult> = serde_json::from_str(
            r#"[{"show": {"id": 1, "name": "Batman", "summary": null, "image": null}}]"#,
        )
        .unwrap();

        let shows: Vec<ShowRecord> = raw
            .into_iter()
            .map(|r| normalize_show(r, DEFAULT_IMAGE))
            .collect();

        assert_eq!(
            shows,
            vec![ShowRecord {
                id: 1,
                name: "Batman".to_string(),
                summary: NO_SUMMARY_PLACEHOLDER.to_string(),
                image: DEFAULT_IMAGE.to_string(),
            }]
        );
    }

    #[test]
    fn test_episode_is_identity_mapping() {
        let episode = normalize_episode(RawEpisode {
            id: 100,
            name: "Pilot".to_string(),
            season: 1,
            number: 1,
        });

        assert_eq!(
            episode,
            EpisodeRecord {
                id: 100,
                name: "Pilot".to_string(),
                season: 1,
                number: 1,
            }
        );
    }
}
