// src/services/youtube.rs
//! YouTube URL helpers for lesson videos
//!
//! Lessons reference their video by any URL shape YouTube hands out; the
//! player and thumbnails need the bare 11-character video id.

use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("video id pattern compiles")
});

/// Extracts the video id from watch, embed, `/v/`, and `youtu.be` URLs.
pub fn youtube_video_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    VIDEO_ID
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/mqdefault.jpg", video_id)
}

/// Lesson durations are stored in minutes; render "1h 15m" / "45m".
pub fn format_duration(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}
