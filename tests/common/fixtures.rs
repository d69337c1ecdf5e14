//! Test fixtures
//!
//! Upstream payloads in the shapes the extraction API returns, and settings
//! pointing at a local mock server.

#![allow(dead_code)]

use instagrab::core::config::RelayKind;
use instagrab::Settings;
use serde_json::{json, Value};

pub const POST_URL: &str = "https://www.instagram.com/p/ABC123/";
pub const REEL_URL: &str = "https://instagram.com/reel/XYZ/";

pub fn image_payload(url: &str) -> Value {
    json!({ "type": "image", "url": url })
}

pub fn video_payload(url: &str, audio_url: Option<&str>) -> Value {
    match audio_url {
        Some(audio) => json!({ "type": "video", "url": url, "audio_url": audio }),
        None => json!({ "type": "video", "url": url }),
    }
}

/// Carousel of `n` items alternating image, video (videos carry audio).
pub fn carousel_payload(n: usize) -> Value {
    let media: Vec<Value> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                json!({ "type": "image", "url": format!("https://cdn.example/{}.jpg", i) })
            } else {
                json!({
                    "type": "video",
                    "url": format!("https://cdn.example/{}.mp4", i),
                    "audio_url": format!("https://cdn.example/{}.m4a", i)
                })
            }
        })
        .collect();
    json!({ "type": "carousel", "media": media })
}

/// Settings sending requests to `server_uri` with the given relay kind.
///
/// The endpoint is `<server_uri>/igdl`; relays live at `<server_uri>/get`
/// (allorigins) and `<server_uri>/proxy?url=` (prefix).
pub fn settings_for(server_uri: &str, kind: RelayKind) -> Settings {
    let mut settings = Settings::default();
    settings.upstream.endpoint = format!("{}/igdl", server_uri);
    settings.relay.kind = kind;
    settings.relay.base = match kind {
        RelayKind::AllOrigins => format!("{}/get", server_uri),
        RelayKind::Prefix => format!("{}/proxy?url=", server_uri),
        RelayKind::Direct => String::new(),
    };
    settings
}
