// src/formatting/embed.rs
//! Embed URL normalization.
//!
//! Share links from video and map services do not load inside a frame. The
//! functions here rewrite the ones we recognize into their embeddable form
//! and hand every other URL back unchanged.

use crate::constants::{EMBED_ASPECT_RATIO_PERCENT, MAP_DEFAULT_ZOOM};
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref MAP_AT_COORDINATES: Regex =
        Regex::new(r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)(?:,(\d+(?:\.\d+)?)z)?")
            .expect("map coordinate regex is valid");
    static ref COORDINATE_PAIR: Regex =
        Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$")
            .expect("coordinate pair regex is valid");
}

/// Normalizes any embeddable URL: maps first, then video hosts.
pub fn normalize_embed_url(raw: &str) -> String {
    normalize_map_url(raw)
        .or_else(|| normalize_video_url(raw))
        .unwrap_or_else(|| raw.to_string())
}

/// Rewrites YouTube and Vimeo watch links to their player URLs.
pub fn normalize_video_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    match host {
        "youtube.com" => {
            let id = if url.path() == "/watch" {
                url.query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())
            } else {
                let mut segments = url.path_segments()?;
                match segments.next() {
                    Some("shorts") | Some("live") | Some("embed") => {
                        segments.next().map(str::to_string)
                    }
                    _ => None,
                }
            }?;
            youtube_embed(&id)
        }
        "youtu.be" => {
            let id = url.path_segments()?.next()?.to_string();
            youtube_embed(&id)
        }
        "vimeo.com" => {
            let id = url.path_segments()?.find(|s| s.chars().all(|c| c.is_ascii_digit()))?;
            (!id.is_empty()).then(|| format!("https://player.vimeo.com/video/{}", id))
        }
        _ => None,
    }
}

fn youtube_embed(id: &str) -> Option<String> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| format!("https://www.youtube.com/embed/{}", id))
}

/// Rewrites a map-service link carrying a coordinate pair into an embed URL.
///
/// Recognizes `@lat,lng[,zoomz]` path segments and `q=lat,lng` queries.
/// Returns `None` when the URL is not a map link or carries no coordinates.
pub fn normalize_map_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    let is_maps = (host.contains("google.") && url.path().starts_with("/maps"))
        || host.starts_with("maps.google.");
    if !is_maps {
        return None;
    }
    if url.query_pairs().any(|(k, v)| k == "output" && v == "embed") {
        return Some(raw.to_string());
    }

    if let Some(caps) = MAP_AT_COORDINATES.captures(url.path()) {
        let zoom = caps
            .get(3)
            .and_then(|z| z.as_str().split('.').next())
            .and_then(|z| z.parse::<u8>().ok())
            .unwrap_or(MAP_DEFAULT_ZOOM);
        return Some(map_embed(&caps[1], &caps[2], zoom));
    }

    let query = url
        .query_pairs()
        .find(|(k, _)| k == "q" || k == "ll")
        .map(|(_, v)| v.into_owned())?;
    let caps = COORDINATE_PAIR.captures(&query)?;
    let zoom = url
        .query_pairs()
        .find(|(k, _)| k == "z")
        .and_then(|(_, v)| v.parse::<u8>().ok())
        .unwrap_or(MAP_DEFAULT_ZOOM);
    Some(map_embed(&caps[1], &caps[2], zoom))
}

fn map_embed(lat: &str, lng: &str, zoom: u8) -> String {
    format!(
        "https://maps.google.com/maps?q={},{}&z={}&output=embed",
        lat, lng, zoom
    )
}

/// Fixed 16:9 frame around an embeddable URL.
pub fn embed_frame(src: &str) -> String {
    format!(
        "<div style=\"position:relative;padding-bottom:{};height:0;overflow:hidden;\">\
<iframe src=\"{}\" style=\"position:absolute;top:0;left:0;width:100%;height:100%;border:0;\" allowfullscreen></iframe>\
</div>",
        EMBED_ASPECT_RATIO_PERCENT,
        src.replace('"', "&quot;")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_variants() {
        let expected = Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string());
        assert_eq!(
            normalize_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"),
            expected
        );
        assert_eq!(normalize_video_url("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(
            normalize_video_url("https://youtube.com/shorts/dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(normalize_video_url("https://example.com/watch?v=x"), None);
    }

    #[test]
    fn test_vimeo() {
        assert_eq!(
            normalize_video_url("https://vimeo.com/76979871").as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
    }

    #[test]
    fn test_map_with_at_coordinates_and_zoom() {
        assert_eq!(
            normalize_map_url("https://www.google.com/maps/place/Somewhere/@40.7128,-74.006,12z/data=x")
                .as_deref(),
            Some("https://maps.google.com/maps?q=40.7128,-74.006&z=12&output=embed")
        );
    }

    #[test]
    fn test_map_with_query_pair_defaults_zoom() {
        assert_eq!(
            normalize_map_url("https://maps.google.com/?q=51.5,-0.12").as_deref(),
            Some("https://maps.google.com/maps?q=51.5,-0.12&z=15&output=embed")
        );
    }

    #[test]
    fn test_map_without_coordinates_falls_back() {
        let raw = "https://www.google.com/maps/place/Eiffel+Tower";
        assert_eq!(normalize_map_url(raw), None);
        assert_eq!(normalize_embed_url(raw), raw);
        assert_eq!(normalize_embed_url("not a url"), "not a url");
    }

    #[test]
    fn test_frame_has_fixed_ratio() {
        let frame = embed_frame("https://x.test/a");
        assert!(frame.contains("padding-bottom:56.25%"));
        assert!(frame.contains("<iframe src=\"https://x.test/a\""));
    }
}
