//! Recorded landmark streams, one JSON object per line:
//!
//! ```text
//! {"t_ms":0,"hand":{"handedness":"right","landmarks":[{"x":0.5,"y":0.8,"z":0.0}, ...]}}
//! {"t_ms":33,"hand":null}
//! ```

use std::{
    fs,
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{HandObservation, Handedness, Landmark};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedHand {
    #[serde(default)]
    pub handedness: Handedness,
    pub landmarks: Vec<Landmark>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Milliseconds since the start of the recording.
    pub t_ms: u64,
    #[serde(default)]
    pub hand: Option<RecordedHand>,
}

impl RecordedFrame {
    pub fn timestamp(&self, base: Instant) -> Instant {
        base + Duration::from_millis(self.t_ms)
    }

    pub fn observation(&self, base: Instant) -> Option<HandObservation> {
        self.hand.as_ref().map(|hand| {
            HandObservation::new(hand.landmarks.clone(), hand.handedness, self.timestamp(base))
        })
    }
}

pub fn load_recording(path: &Path) -> Result<Vec<RecordedFrame>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read recording {}", path.display()))?;
    let frames =
        parse_recording(&text).with_context(|| format!("invalid recording {}", path.display()))?;
    log::info!("loaded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

pub fn parse_recording(text: &str) -> Result<Vec<RecordedFrame>> {
    let mut frames = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame: RecordedFrame = serde_json::from_str(line)
            .with_context(|| format!("line {}: malformed frame", idx + 1))?;
        if let Some(previous) = frames.last().map(|f: &RecordedFrame| f.t_ms) {
            if frame.t_ms < previous {
                log::warn!(
                    "line {}: timestamp {}ms goes backwards (previous {previous}ms)",
                    idx + 1,
                    frame.t_ms
                );
            }
        }
        frames.push(frame);
    }
    Ok(frames)
}
