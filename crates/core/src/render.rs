use std::sync::LazyLock;

use regex::Regex;

use crate::types::VideoAnalysis;

pub const NO_TIMESTAMPS: &str = "No timestamps available";

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    Summary,
    Timestamps,
}

impl CopyKind {
    pub fn label(self) -> &'static str {
        match self {
            CopyKind::Summary => "📋 Copy Summary",
            CopyKind::Timestamps => "📋 Copy Timestamps",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampBlock {
    Entries(Vec<String>),
    Placeholder,
}

/// Text of every results-region node, ready to be put on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAnalysis {
    pub title: String,
    pub duration_line: String,
    pub views_line: String,
    pub channel_line: String,
    pub summary: String,
    /// `None` hides the whole key-points section.
    pub key_points: Option<Vec<String>>,
    pub timestamps: TimestampBlock,
}

pub fn render(data: &VideoAnalysis) -> RenderedAnalysis {
    let key_points = (!data.key_points.is_empty()).then(|| data.key_points.clone());
    let timestamps = if data.timestamps.is_empty() {
        TimestampBlock::Placeholder
    } else {
        TimestampBlock::Entries(data.timestamps.clone())
    };

    RenderedAnalysis {
        title: data.title.clone(),
        duration_line: format!("📅 Duration: {}", data.duration),
        views_line: format!("👁️ {} views", data.views),
        channel_line: format!("📺 {}", data.channel),
        summary: data.summary.clone(),
        key_points,
        timestamps,
    }
}

impl RenderedAnalysis {
    /// The timestamps area as displayed, one entry per line.
    pub fn timestamps_text(&self) -> String {
        match &self.timestamps {
            TimestampBlock::Entries(entries) => entries.join("\n"),
            TimestampBlock::Placeholder => NO_TIMESTAMPS.to_string(),
        }
    }

    /// Text the copy buttons put on the clipboard.
    pub fn copy_text(&self, kind: CopyKind) -> String {
        match kind {
            CopyKind::Summary => self.summary.clone(),
            CopyKind::Timestamps => collapse_blank_lines(&self.timestamps_text()),
        }
    }
}

fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").into_owned()
}
