//! Render tree for the session state.
//!
//! Rendering is a pure function of the state: the preview and options
//! regions are rebuilt from scratch for every result and never patched.

use crate::download::media::{MediaItem, MediaResult};
use crate::session::SessionState;
use serde::Serialize;
use std::fmt;

/// MIME type advertised on video previews.
pub const VIDEO_MIME: &str = "video/mp4";

/// A node in the preview region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum PreviewNode {
    Image {
        src: String,
        alt: String,
    },
    Video {
        src: String,
        mime: &'static str,
        muted: bool,
        controls: bool,
        autoplay: bool,
    },
}

impl PreviewNode {
    fn image(src: &str, alt: String) -> Self {
        PreviewNode::Image {
            src: src.to_string(),
            alt,
        }
    }

    /// Muted, inline controls, no autoplay.
    fn video(src: &str) -> Self {
        PreviewNode::Video {
            src: src.to_string(),
            mime: VIDEO_MIME,
            muted: true,
            controls: true,
            autoplay: false,
        }
    }
}

/// What a download option points at; selects the icon and file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OptionKind {
    Image,
    Video,
    Audio,
}

impl OptionKind {
    pub fn icon(self) -> &'static str {
        match self {
            OptionKind::Image => "fas fa-image",
            OptionKind::Video => "fas fa-video",
            OptionKind::Audio => "fas fa-music",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OptionKind::Image => "jpg",
            OptionKind::Video => "mp4",
            OptionKind::Audio => "m4a",
        }
    }
}

/// A download link in the options region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOption {
    pub id: String,
    pub label: String,
    pub href: String,
    pub kind: OptionKind,
}

impl DownloadOption {
    fn new(href: &str, label: impl Into<String>, kind: OptionKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            href: href.to_string(),
            kind,
        }
    }
}

/// Contents of the results region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Results {
    pub preview: Vec<PreviewNode>,
    pub options: Vec<DownloadOption>,
}

/// Build the preview and options regions for one media result.
pub fn results(media: &MediaResult) -> Results {
    let mut preview = Vec::with_capacity(media.len());
    let mut options = Vec::new();

    match media {
        MediaResult::Image { url } => {
            preview.push(PreviewNode::image(url, "Instagram Image".to_string()));
            options.push(DownloadOption::new(url, "HD Image", OptionKind::Image, "highest-quality"));
        }
        MediaResult::Video { url, audio_url } => {
            preview.push(PreviewNode::video(url));
            options.push(DownloadOption::new(url, "HD Video", OptionKind::Video, "highest-quality"));
            if let Some(audio) = audio_url {
                options.push(DownloadOption::new(audio, "Audio Only", OptionKind::Audio, "audio-track"));
            }
        }
        MediaResult::Carousel { media } => {
            for (index, item) in media.iter().enumerate() {
                let n = index + 1;
                match item {
                    MediaItem::Image { url } => {
                        preview.push(PreviewNode::image(url, format!("Instagram Image {}", n)));
                        options.push(DownloadOption::new(
                            url,
                            format!("Image {}", n),
                            OptionKind::Image,
                            format!("image-{}", index),
                        ));
                    }
                    MediaItem::Video { url, audio_url } => {
                        preview.push(PreviewNode::video(url));
                        options.push(DownloadOption::new(
                            url,
                            format!("Video {}", n),
                            OptionKind::Video,
                            format!("video-{}", index),
                        ));
                        if let Some(audio) = audio_url {
                            options.push(DownloadOption::new(
                                audio,
                                format!("Audio {}", n),
                                OptionKind::Audio,
                                format!("audio-{}", index),
                            ));
                        }
                    }
                }
            }
        }
    }

    Results { preview, options }
}

/// Everything visible on screen for one state. Exactly one region is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Idle,
    Loading { url: String },
    Results(Results),
    Error { category: &'static str, message: String },
}

/// Pure mapping from session state to what is displayed.
pub fn view(state: &SessionState) -> View {
    match state {
        SessionState::Idle => View::Idle,
        SessionState::Loading { url } => View::Loading { url: url.to_string() },
        SessionState::Results(results) => View::Results(results.clone()),
        SessionState::Error { category, message } => View::Error {
            category: *category,
            message: message.clone(),
        },
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Idle => write!(f, "Paste an Instagram post, reel or story URL"),
            View::Loading { url } => write!(f, "Fetching media for {} ...", url),
            View::Results(results) => {
                writeln!(f, "Preview:")?;
                for node in &results.preview {
                    match node {
                        PreviewNode::Image { src, alt } => writeln!(f, "  [image] {}  {}", alt, src)?,
                        PreviewNode::Video { src, mime, .. } => writeln!(f, "  [video] {} (muted)  {}", mime, src)?,
                    }
                }
                write!(f, "Downloads:")?;
                for option in &results.options {
                    write!(f, "\n  [{}] {}  {}", option.kind, option.label, option.href)?;
                }
                Ok(())
            }
            View::Error { message, .. } => write!(f, "Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(url: &str) -> MediaItem {
        MediaItem::Image { url: url.into() }
    }

    fn video(url: &str, audio: Option<&str>) -> MediaItem {
        MediaItem::Video {
            url: url.into(),
            audio_url: audio.map(String::from),
        }
    }

    #[test]
    fn test_image_renders_one_node_one_option() {
        let r = results(&MediaResult::Image {
            url: "https://cdn/a.jpg".into(),
        });
        assert_eq!(
            r.preview,
            vec![PreviewNode::Image {
                src: "https://cdn/a.jpg".into(),
                alt: "Instagram Image".into()
            }]
        );
        assert_eq!(
            r.options,
            vec![DownloadOption {
                id: "highest-quality".into(),
                label: "HD Image".into(),
                href: "https://cdn/a.jpg".into(),
                kind: OptionKind::Image,
            }]
        );
    }

    #[test]
    fn test_video_with_audio_renders_two_options() {
        let r = results(&MediaResult::Video {
            url: "https://cdn/v.mp4".into(),
            audio_url: Some("https://cdn/v.m4a".into()),
        });
        assert_eq!(r.preview.len(), 1);
        assert!(matches!(
            r.preview[0],
            PreviewNode::Video {
                muted: true,
                controls: true,
                autoplay: false,
                ..
            }
        ));
        let labels: Vec<_> = r.options.iter().map(|o| (o.label.as_str(), o.kind)).collect();
        assert_eq!(labels, vec![("HD Video", OptionKind::Video), ("Audio Only", OptionKind::Audio)]);
        assert_eq!(r.options[1].id, "audio-track");
    }

    #[test]
    fn test_video_without_audio_renders_one_option() {
        let r = results(&MediaResult::Video {
            url: "https://cdn/v.mp4".into(),
            audio_url: None,
        });
        assert_eq!(r.options.len(), 1);
    }

    #[test]
    fn test_carousel_preserves_order() {
        let r = results(&MediaResult::Carousel {
            media: vec![
                image("https://cdn/1.jpg"),
                video("https://cdn/2.mp4", Some("https://cdn/2.m4a")),
                image("https://cdn/3.jpg"),
            ],
        });
        assert_eq!(r.preview.len(), 3);
        let ids: Vec<_> = r.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["image-0", "video-1", "audio-1", "image-2"]);
        let labels: Vec<_> = r.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Image 1", "Video 2", "Audio 2", "Image 3"]);
        assert_eq!(
            r.preview[2],
            PreviewNode::Image {
                src: "https://cdn/3.jpg".into(),
                alt: "Instagram Image 3".into()
            }
        );
    }

    #[test]
    fn test_option_kind_icon_and_extension() {
        assert_eq!(OptionKind::Image.icon(), "fas fa-image");
        assert_eq!(OptionKind::Audio.icon(), "fas fa-music");
        assert_eq!(OptionKind::Video.extension(), "mp4");
        assert_eq!(OptionKind::Audio.to_string(), "audio");
    }

    #[test]
    fn test_view_is_exclusive_per_state() {
        assert_eq!(view(&SessionState::Idle), View::Idle);

        let error = SessionState::Error {
            category: "network",
            message: "offline".into(),
        };
        assert_eq!(
            view(&error),
            View::Error {
                category: "network",
                message: "offline".into()
            }
        );
    }

    #[test]
    fn test_view_serializes_with_state_tag() {
        let r = results(&MediaResult::Image {
            url: "https://cdn/a.jpg".into(),
        });
        let value = serde_json::to_value(View::Results(r)).unwrap();
        assert_eq!(value["state"], "results");
        assert_eq!(value["preview"][0]["node"], "image");
        assert_eq!(value["options"][0]["kind"], "image");
    }

    #[test]
    fn test_view_display() {
        let r = results(&MediaResult::Video {
            url: "https://cdn/v.mp4".into(),
            audio_url: Some("https://cdn/v.m4a".into()),
        });
        let text = View::Results(r).to_string();
        assert_eq!(
            text,
            "Preview:\n  [video] video/mp4 (muted)  https://cdn/v.mp4\nDownloads:\n  [video] HD Video  https://cdn/v.mp4\n  [audio] Audio Only  https://cdn/v.m4a"
        );
    }
}
