//! Video identifiers and embed URLs for the supported YouTube URL shapes

use url::Url;
use url::form_urlencoded::Serializer;

pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Extract the video id from `watch?v=`, `youtu.be/`, `/shorts/` or `/embed/` URLs
pub fn youtube_id(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let id = if host.contains("youtu.be") {
        url.path_segments()?.next().map(str::to_string)
    } else if host.contains("youtube.com") {
        url.query_pairs()
            .find(|(k, v)| k == "v" && !v.is_empty())
            .map(|(_, v)| v.into_owned())
            .or_else(|| segment_after(&url, "shorts"))
            .or_else(|| segment_after(&url, "embed"))
    } else {
        None
    };
    id.filter(|s| !s.is_empty())
}

fn segment_after(url: &Url, marker: &str) -> Option<String> {
    url.path_segments()?
        .skip_while(|s| *s != marker)
        .nth(1)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmbedOptions {
    pub autoplay: bool,
    pub mute: bool,
    /// Enable the iframe JS API (needed to send play commands)
    pub js_api: bool,
}

impl EmbedOptions {
    /// Random-pick player: starts as soon as it loads
    pub fn autoplay() -> Self {
        Self {
            autoplay: true,
            ..Self::default()
        }
    }

    /// Song player frames, driven through the JS API
    pub fn scripted(mute: bool) -> Self {
        Self {
            autoplay: false,
            mute,
            js_api: true,
        }
    }
}

pub fn embed_url(id: &str, options: &EmbedOptions) -> String {
    if id.is_empty() {
        return String::new();
    }
    let mut query = Serializer::new(String::new());
    if options.autoplay {
        query.append_pair("autoplay", "1");
    }
    if options.js_api {
        query.append_pair("enablejsapi", "1");
        query.append_pair("playsinline", "1");
    }
    query.append_pair("rel", "0");
    if options.js_api {
        query.append_pair("modestbranding", "1");
    }
    if options.mute {
        query.append_pair("mute", "1");
    }
    format!("{}{}?{}", EMBED_BASE, id, query.finish())
}

/// Embed URL straight from a watch/share URL; `""` when no id can be found
pub fn embed_for(url: &str, options: &EmbedOptions) -> String {
    youtube_id(url)
        .map(|id| embed_url(&id, options))
        .unwrap_or_default()
}
