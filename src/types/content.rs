//! Content items - the presentable units of a question

use serde::{Deserialize, Serialize};

/// Kind of media a content item carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Audio,
    Video,
    Html,
}

/// Where a content item is presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentPlacement {
    /// Main game screen
    Screen,
    /// Background channel (audio)
    Background,
    /// Showman replic line
    Replic,
}

/// One unit of presentable content within a ShowContent step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    /// Media kind of this item
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Item payload: text body or a media reference
    pub value: String,
    /// Presentation target
    pub placement: ContentPlacement,
    /// Marks this item as a natural pause boundary within a content batch
    pub wait_for_finish: bool,
}

impl ContentItem {
    /// Screen-placed text item that pauses after display
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Text,
            value: value.into(),
            placement: ContentPlacement::Screen,
            wait_for_finish: true,
        }
    }

    pub fn with_placement(mut self, placement: ContentPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_wait_for_finish(mut self, wait_for_finish: bool) -> Self {
        self.wait_for_finish = wait_for_finish;
        self
    }

    pub fn is_text(&self) -> bool {
        self.content_type == ContentType::Text
    }
}
