//! Recognising YouTube and Vimeo links for video cards.
//!
//! Matches the URL shapes each platform hands out; nothing is fetched.

use serde::Serialize;
use url::Url;

const YOUTUBE_ID_LEN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
    Unknown,
}

/// What a link card needs to render an embedded player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub platform: VideoPlatform,
    pub id: Option<String>,
    pub embed_url: Option<String>,
    /// Only YouTube exposes a thumbnail without an API call.
    pub thumbnail_url: Option<String>,
    pub is_valid: bool,
}

impl VideoInfo {
    fn youtube(id: &str) -> Self {
        Self {
            platform: VideoPlatform::Youtube,
            id: Some(id.to_string()),
            embed_url: Some(format!("https://www.youtube.com/embed/{id}")),
            thumbnail_url: Some(format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")),
            is_valid: true,
        }
    }

    fn vimeo(id: &str) -> Self {
        Self {
            platform: VideoPlatform::Vimeo,
            id: Some(id.to_string()),
            embed_url: Some(format!("https://player.vimeo.com/video/{id}")),
            thumbnail_url: None,
            is_valid: true,
        }
    }

    fn unknown() -> Self {
        Self {
            platform: VideoPlatform::Unknown,
            id: None,
            embed_url: None,
            thumbnail_url: None,
            is_valid: false,
        }
    }
}

/// Classify a pasted link.
///
/// The scheme is optional and surrounding whitespace is ignored. Anything
/// that is not a recognisable YouTube or Vimeo video comes back as
/// `VideoPlatform::Unknown` with `is_valid == false`.
pub fn parse_video_url(url: &str) -> VideoInfo {
    let Some(url) = parse_link(url.trim()) else {
        return VideoInfo::unknown();
    };
    let Some(host) = url.host_str().map(normalise_host) else {
        return VideoInfo::unknown();
    };

    if let Some(id) = youtube_id(&url, host) {
        return VideoInfo::youtube(&id);
    }
    if let Some(id) = vimeo_id(&url, host) {
        return VideoInfo::vimeo(id);
    }
    VideoInfo::unknown()
}

/// Parse a link as typed by a user, assuming `https` when no scheme is given.
fn parse_link(link: &str) -> Option<Url> {
    let url = if has_scheme(link) {
        Url::parse(link)
    } else {
        let link = link.strip_prefix("//").unwrap_or(link);
        Url::parse(&format!("https://{link}"))
    }
    .ok()?;

    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// True when the link starts with `<scheme>://`. A `://` later in the
/// string (say, inside a query value) does not count.
fn has_scheme(link: &str) -> bool {
    link.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
    })
}

fn normalise_host(host: &str) -> &str {
    ["www.", "m.", "music."]
        .into_iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(host)
}

fn segments(url: &Url) -> impl Iterator<Item = &str> {
    url.path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
}

fn youtube_id(url: &Url, host: &str) -> Option<String> {
    let mut path = segments(url);

    let candidate = match host {
        "youtu.be" => path.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => match path.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            "embed" | "v" | "e" | "shorts" | "live" => path.next().map(str::to_string),
            _ => None,
        },
        _ => None,
    }?;

    is_youtube_id(&candidate).then_some(candidate)
}

fn is_youtube_id(id: &str) -> bool {
    id.len() == YOUTUBE_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn vimeo_id<'a>(url: &'a Url, host: &str) -> Option<&'a str> {
    let is_numeric = |s: &&str| s.bytes().all(|b| b.is_ascii_digit());

    match host {
        "vimeo.com" => segments(url).filter(is_numeric).last(),
        "player.vimeo.com" => {
            let mut path = segments(url);
            match (path.next(), path.next()) {
                (Some("video"), Some(id)) if is_numeric(&id) => Some(id),
                _ => None,
            }
        }
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every well-formed id survives the short-link round trip.
        #[test]
        fn prop_short_link_id(id in "[A-Za-z0-9_-]{11}") {
            let info = parse_video_url(&format!("https://youtu.be/{}", id));
            prop_assert_eq!(info.platform, VideoPlatform::Youtube);
            prop_assert_eq!(info.id.as_deref(), Some(id.as_str()));
            prop_assert!(info.embed_url.unwrap().ends_with(&id));
        }

        /// Property: is_valid is exactly "platform is known".
        #[test]
        fn prop_validity_matches_platform(url in ".{0,60}") {
            let info = parse_video_url(&url);
            prop_assert_eq!(info.is_valid, info.platform != VideoPlatform::Unknown);
            prop_assert_eq!(info.is_valid, info.embed_url.is_some());
        }
    }
}
