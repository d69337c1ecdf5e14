//! Media description returned by the extraction API.
//!
//! The upstream JSON is untrusted; it is decoded into [`MediaResult`] at the
//! boundary so nothing downstream ever sees a half-formed payload.

use crate::download::error::{FetchError, Malformed};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaResult {
    Image {
        url: String,
    },
    Video {
        url: String,
        #[serde(default)]
        audio_url: Option<String>,
    },
    Carousel {
        #[serde(alias = "items")]
        media: Vec<MediaItem>,
    },
}

/// A single carousel entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Image {
        url: String,
    },
    Video {
        url: String,
        #[serde(default)]
        audio_url: Option<String>,
    },
}

impl MediaResult {
    /// Decode an upstream payload.
    ///
    /// Fails with [`FetchError::MalformedResponse`] when the payload has no
    /// downloadable content at all, when `type` is missing or unknown, or when
    /// the fields required by the declared type are absent or empty.
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        let object = value
            .as_object()
            .ok_or_else(|| FetchError::invalid("response is not a JSON object"))?;

        let has_url = object.get("url").is_some_and(|v| !v.is_null());
        let has_media = ["media", "items"]
            .iter()
            .any(|key| object.get(*key).is_some_and(|v| !v.is_null()));
        if !has_url && !has_media {
            return Err(FetchError::MalformedResponse(Malformed::MissingContent));
        }

        let media: MediaResult = serde_json::from_value(value).map_err(|e| FetchError::invalid(e.to_string()))?;
        media.normalized()
    }

    /// Number of preview nodes this result renders into.
    pub fn len(&self) -> usize {
        match self {
            MediaResult::Image { .. } | MediaResult::Video { .. } => 1,
            MediaResult::Carousel { media } => media.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects empty URLs, drops empty audio URLs.
    fn normalized(self) -> Result<Self, FetchError> {
        match self {
            MediaResult::Image { url } => Ok(MediaResult::Image { url: require_url(url)? }),
            MediaResult::Video { url, audio_url } => Ok(MediaResult::Video {
                url: require_url(url)?,
                audio_url: non_empty(audio_url),
            }),
            MediaResult::Carousel { media } => {
                if media.is_empty() {
                    return Err(FetchError::MalformedResponse(Malformed::MissingContent));
                }
                let media = media
                    .into_iter()
                    .map(|item| match item {
                        MediaItem::Image { url } => Ok(MediaItem::Image { url: require_url(url)? }),
                        MediaItem::Video { url, audio_url } => Ok(MediaItem::Video {
                            url: require_url(url)?,
                            audio_url: non_empty(audio_url),
                        }),
                    })
                    .collect::<Result<Vec<_>, FetchError>>()?;
                Ok(MediaResult::Carousel { media })
            }
        }
    }
}

fn require_url(url: String) -> Result<String, FetchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(FetchError::invalid("empty media url"));
    }
    Ok(trimmed.to_string())
}

fn non_empty(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_image() {
        let media = MediaResult::from_value(json!({
            "type": "image",
            "url": "https://cdn.example/a.jpg",
            "caption": "ignored"
        }))
        .unwrap();
        assert_eq!(
            media,
            MediaResult::Image {
                url: "https://cdn.example/a.jpg".into()
            }
        );
    }

    #[test]
    fn test_decode_video_with_and_without_audio() {
        let media = MediaResult::from_value(json!({
            "type": "video",
            "url": "https://cdn.example/v.mp4",
            "audio_url": "https://cdn.example/v.m4a"
        }))
        .unwrap();
        assert_eq!(
            media,
            MediaResult::Video {
                url: "https://cdn.example/v.mp4".into(),
                audio_url: Some("https://cdn.example/v.m4a".into()),
            }
        );

        let media = MediaResult::from_value(json!({
            "type": "video",
            "url": "https://cdn.example/v.mp4",
            "audio_url": ""
        }))
        .unwrap();
        assert_eq!(
            media,
            MediaResult::Video {
                url: "https://cdn.example/v.mp4".into(),
                audio_url: None,
            }
        );
    }

    #[test]
    fn test_decode_carousel_media_and_items_alias() {
        let expected = MediaResult::Carousel {
            media: vec![
                MediaItem::Image {
                    url: "https://cdn.example/1.jpg".into(),
                },
                MediaItem::Video {
                    url: "https://cdn.example/2.mp4".into(),
                    audio_url: None,
                },
            ],
        };

        let from_media = MediaResult::from_value(json!({
            "type": "carousel",
            "media": [
                {"type": "image", "url": "https://cdn.example/1.jpg"},
                {"type": "video", "url": "https://cdn.example/2.mp4"}
            ]
        }))
        .unwrap();
        assert_eq!(from_media, expected);

        let from_items = MediaResult::from_value(json!({
            "type": "carousel",
            "items": [
                {"type": "image", "url": "https://cdn.example/1.jpg"},
                {"type": "video", "url": "https://cdn.example/2.mp4", "audio_url": null}
            ]
        }))
        .unwrap();
        assert_eq!(from_items, expected);
        assert_eq!(from_items.len(), 2);
    }

    #[test]
    fn test_missing_url_and_media_is_missing_content() {
        let err = MediaResult::from_value(json!({"type": "image"})).unwrap_err();
        assert_eq!(err, FetchError::MalformedResponse(Malformed::MissingContent));

        let err = MediaResult::from_value(json!({"status": "ok", "url": null})).unwrap_err();
        assert_eq!(err, FetchError::MalformedResponse(Malformed::MissingContent));
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let err = MediaResult::from_value(json!({"type": "gallery", "url": "https://x/y"})).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(Malformed::Invalid(_))));
    }

    #[test]
    fn test_missing_type_is_invalid() {
        let err = MediaResult::from_value(json!({"url": "https://x/y"})).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(Malformed::Invalid(_))));
    }

    #[test]
    fn test_declared_type_without_its_fields_is_invalid() {
        // carousel declared, only a top-level url supplied
        let err = MediaResult::from_value(json!({"type": "carousel", "url": "https://x/y"})).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(Malformed::Invalid(_))));

        // image declared, only media supplied
        let err = MediaResult::from_value(json!({"type": "image", "media": []})).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(Malformed::Invalid(_))));
    }

    #[test]
    fn test_empty_carousel_is_missing_content() {
        let err = MediaResult::from_value(json!({"type": "carousel", "media": []})).unwrap_err();
        assert_eq!(err, FetchError::MalformedResponse(Malformed::MissingContent));
    }

    #[test]
    fn test_carousel_item_with_unknown_type_is_invalid() {
        let err = MediaResult::from_value(json!({
            "type": "carousel",
            "media": [{"type": "audio", "url": "https://x/y"}]
        }))
        .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(Malformed::Invalid(_))));
    }

    #[test]
    fn test_empty_url_is_invalid() {
        let err = MediaResult::from_value(json!({"type": "image", "url": "  "})).unwrap_err();
        assert_eq!(err, FetchError::invalid("empty media url"));
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = MediaResult::from_value(json!(["https://x/y"])).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(Malformed::Invalid(_))));
    }
}
