#![allow(dead_code)]

use std::{io::Write, path::Path};

use gesture_media_control::{
    Handedness, Landmark,
    recording::{RecordedFrame, RecordedHand},
};
use tempfile::NamedTempFile;

/// Finger knuckles (index to pinky) in palm units: wrist at the origin, middle
/// knuckle one unit above it, y growing downward.
const KNUCKLES: [(f64, f64); 4] = [(-0.35, -0.95), (0.0, -1.0), (0.3, -0.95), (0.55, -0.85)];

const THUMB_CMC: (f64, f64) = (-0.3, -0.25);

#[derive(Clone, Copy, Debug)]
pub enum Hand {
    OpenPalm,
    ThumbsUp,
    Fist,
}

impl Hand {
    fn fingers_extended(self) -> bool {
        matches!(self, Hand::OpenPalm)
    }

    /// Thumb MCP, IP and tip.
    fn thumb(self) -> [(f64, f64); 3] {
        match self {
            Hand::OpenPalm => [(-0.55, -0.45), (-0.75, -0.65), (-0.9, -0.85)],
            Hand::ThumbsUp => [(-0.5, -0.55), (-0.55, -0.95), (-0.55, -1.35)],
            Hand::Fist => [(-0.5, -0.55), (-0.3, -0.6), (0.05, -0.55)],
        }
    }
}

/// A straight finger along the wrist to knuckle direction: one palm length
/// past the knuckle when extended, curled back into the palm otherwise.
fn finger(knuckle: (f64, f64), extended: bool) -> [(f64, f64); 4] {
    let len = knuckle.0.hypot(knuckle.1);
    let dir = (knuckle.0 / len, knuckle.1 / len);
    let reach = if extended { 1.0 } else { -0.2 };
    [0.0, 1.0, 2.0, 3.0].map(|k| {
        let t = reach * k / 3.0;
        (knuckle.0 + dir.0 * t, knuckle.1 + dir.1 * t)
    })
}

pub fn landmarks(hand: Hand, wrist: (f64, f64), scale: f64) -> Vec<Landmark> {
    let mut points = vec![(0.0, 0.0), THUMB_CMC];
    points.extend(hand.thumb());
    for knuckle in KNUCKLES {
        points.extend(finger(knuckle, hand.fingers_extended()));
    }
    points
        .into_iter()
        .map(|(x, y)| Landmark::flat(wrist.0 + x * scale, wrist.1 + y * scale))
        .collect()
}

pub fn frame(hand: Option<Hand>, x: f64, t_ms: u64) -> RecordedFrame {
    RecordedFrame {
        t_ms,
        hand: hand.map(|hand| RecordedHand {
            handedness: Handedness::Right,
            landmarks: landmarks(hand, (x, 0.8), 0.1),
        }),
    }
}

pub fn write_recording(frames: &[RecordedFrame]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for frame in frames {
        writeln!(file, "{}", serde_json::to_string(frame).unwrap()).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn write_config(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, json).unwrap();
    path
}
