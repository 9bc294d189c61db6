//! Core value types shared by every crate: time, resolution, and timecode text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Frame rate used when rendering or reading timecode text.
pub const TIMECODE_FPS: f64 = 30.0;

/// Time position or span in seconds (f64 precision).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeCode(pub f64);

impl TimeCode {
    pub const ZERO: Self = Self(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }

    /// Clamp into `[min, max]`.
    pub fn clamp(self, min: f64, max: f64) -> Self {
        Self(self.0.max(min).min(max))
    }

    /// Parse timecode text (`H:MM:SS:FF`, `M:SS:FF` or `SS:FF`).
    pub fn parse(text: &str) -> Self {
        Self(parse_timecode(text))
    }
}

impl Add for TimeCode {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeCode {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timecode(self.0))
    }
}

/// Format seconds as `M:SS:FF`, or `H:MM:SS:FF` once the hour mark is reached.
///
/// Frames are counted at [`TIMECODE_FPS`]. Negative and non-finite input
/// formats as zero.
pub fn format_timecode(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let frames = ((seconds % 1.0) * TIMECODE_FPS).floor() as u64;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}:{frames:02}")
    } else {
        format!("{minutes}:{secs:02}:{frames:02}")
    }
}

/// Parse colon-separated timecode text back into seconds.
///
/// Four parts read as `H:M:S:F`, three as `M:S:F`, two as `S:F`. Anything
/// else, including a non-numeric part, yields `0.0`.
pub fn parse_timecode(text: &str) -> f64 {
    let parts: Option<Vec<f64>> = text
        .split(':')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect();
    let Some(parts) = parts else {
        return 0.0;
    };

    match parts.as_slice() {
        [h, m, s, f] => h * 3600.0 + m * 60.0 + s + f / TIMECODE_FPS,
        [m, s, f] => m * 60.0 + s + f / TIMECODE_FPS,
        [s, f] => s + f / TIMECODE_FPS,
        _ => 0.0,
    }
}

/// Output resolution handed to the playback collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const HD: Self = Self {
        width: 1920,
        height: 1080,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::HD
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_under_an_hour() {
        assert_eq!(format_timecode(0.0), "0:00:00");
        assert_eq!(format_timecode(65.5), "1:05:15");
        assert_eq!(format_timecode(9.0), "0:09:00");
    }

    #[test]
    fn format_with_hours() {
        assert_eq!(format_timecode(3661.5), "1:01:01:15");
    }

    #[test]
    fn format_negative_and_nan_as_zero() {
        assert_eq!(format_timecode(-4.0), "0:00:00");
        assert_eq!(format_timecode(f64::NAN), "0:00:00");
    }

    #[test]
    fn parse_all_shapes() {
        assert!((parse_timecode("1:01:01:15") - 3661.5).abs() < 1e-9);
        assert!((parse_timecode("1:05:15") - 65.5).abs() < 1e-9);
        assert!((parse_timecode("4:15") - 4.5).abs() < 1e-9);
    }

    #[test]
    fn parse_malformed_is_zero() {
        assert_eq!(parse_timecode(""), 0.0);
        assert_eq!(parse_timecode("12"), 0.0);
        assert_eq!(parse_timecode("a:b:c"), 0.0);
        assert_eq!(parse_timecode("1:2:3:4:5"), 0.0);
    }

    #[test]
    fn format_then_parse_keeps_whole_frames() {
        let secs = 125.5;
        let back = parse_timecode(&format_timecode(secs));
        assert!((back - secs).abs() < 1e-9);
    }

    #[test]
    fn timecode_display_and_clamp() {
        assert_eq!(TimeCode::from_secs(65.5).to_string(), "1:05:15");
        assert_eq!(TimeCode::from_secs(-3.0).clamp(0.0, 10.0), TimeCode::ZERO);
        assert_eq!(TimeCode::from_secs(12.0).clamp(0.0, 10.0).as_secs(), 10.0);
    }

    #[test]
    fn resolution_display() {
        assert_eq!(Resolution::HD.to_string(), "1920x1080");
        assert!((Resolution::new(1920, 1080).aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    }
}
