//! Client-side classification of files by MIME type.

use serde::{Deserialize, Serialize};

/// Icon family of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Word,
    Excel,
    Presentation,
    Text,
    Other,
}

impl FileKind {
    /// Classify a MIME type. Spreadsheet and slide checks run before the
    /// word-processing check because every OOXML type contains `officedocument`.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let Some(mime) = mime.map(str::to_ascii_lowercase) else {
            return Self::Other;
        };
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime.starts_with("audio/") {
            Self::Audio
        } else if mime.contains("pdf") {
            Self::Pdf
        } else if mime.contains("excel") || mime.contains("spreadsheet") {
            Self::Excel
        } else if mime.contains("presentation") || mime.contains("powerpoint") {
            Self::Presentation
        } else if mime.contains("word") || mime.contains("document") {
            Self::Word
        } else if mime.starts_with("text/") {
            Self::Text
        } else {
            Self::Other
        }
    }

    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Excel => "excel",
            Self::Presentation => "slides",
            Self::Text => "text",
            Self::Other => "file",
        }
    }
}

/// In-place preview supported for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewKind {
    Image,
    Video,
    Pdf,
    Text,
}

/// MIME types rendered as inline images.
pub const PREVIEW_IMAGES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
/// MIME types rendered by an inline video player.
pub const PREVIEW_VIDEOS: &[&str] = &["video/mp4", "video/webm"];
/// MIME types rendered by a document viewer.
pub const PREVIEW_DOCUMENTS: &[&str] = &["application/pdf"];
/// MIME types rendered as plain text.
pub const PREVIEW_TEXT: &[&str] = &["text/plain", "text/markdown"];

impl PreviewKind {
    /// Exact-match lookup; anything else must be downloaded.
    pub fn from_mime(mime: Option<&str>) -> Option<Self> {
        let mime = mime?;
        if PREVIEW_IMAGES.contains(&mime) {
            Some(Self::Image)
        } else if PREVIEW_VIDEOS.contains(&mime) {
            Some(Self::Video)
        } else if PREVIEW_DOCUMENTS.contains(&mime) {
            Some(Self::Pdf)
        } else if PREVIEW_TEXT.contains(&mime) {
            Some(Self::Text)
        } else {
            None
        }
    }
}
