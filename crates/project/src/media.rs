//! Media-duration resolution.
//!
//! Probing is an external concern; this module only defines the seam and the
//! fallback policy. A failed or nonsensical probe never reaches the caller as
//! an error: it is logged and replaced by `MediaConfig::fallback_duration`.

use std::collections::HashMap;

use studio_common::MediaConfig;
use thiserror::Error;
use tracing::{debug, warn};

/// Name given to URL-loaded clips whose URL has no usable file segment.
pub const URL_CLIP_FALLBACK_NAME: &str = "Video from URL";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("media at {url} could not be loaded: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("media at {url} reported an invalid duration: {duration}")]
    InvalidDuration { url: String, duration: f64 },
}

/// Looks up the playable duration of a media URL, in seconds.
pub trait MediaProbe {
    fn probe_duration(&self, url: &str) -> Result<f64, MediaError>;
}

/// In-memory probe over a fixed table of known durations.
#[derive(Clone, Debug, Default)]
pub struct KnownDurations {
    durations: HashMap<String, f64>,
}

impl KnownDurations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, duration: f64) -> Self {
        self.insert(url, duration);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, duration: f64) {
        self.durations.insert(url.into(), duration);
    }
}

impl MediaProbe for KnownDurations {
    fn probe_duration(&self, url: &str) -> Result<f64, MediaError> {
        self.durations
            .get(url)
            .copied()
            .ok_or_else(|| MediaError::Unreachable {
                url: url.to_string(),
                reason: "unknown url".into(),
            })
    }
}

/// Probe `url`, falling back to the configured default on any failure.
///
/// Zero, negative and non-finite durations count as failures.
pub fn resolve_duration<P: MediaProbe + ?Sized>(probe: &P, url: &str, config: &MediaConfig) -> f64 {
    let probed = probe.probe_duration(url).and_then(|duration| {
        if duration.is_finite() && duration > 0.0 {
            Ok(duration)
        } else {
            Err(MediaError::InvalidDuration {
                url: url.to_string(),
                duration,
            })
        }
    });

    match probed {
        Ok(duration) => {
            debug!(url, duration, "Resolved media duration");
            duration
        }
        Err(e) => {
            warn!(
                url,
                error = %e,
                fallback = config.fallback_duration,
                "Media duration unavailable, using fallback"
            );
            config.fallback_duration
        }
    }
}

/// Clip name for a URL: its last path segment without query string.
pub fn clip_name_from_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or_default();
    let name = last.split('?').next().unwrap_or_default();
    if name.is_empty() {
        URL_CLIP_FALLBACK_NAME.to_string()
    } else {
        name.to_string()
    }
}
