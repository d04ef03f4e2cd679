use std::{fmt, time::Instant};

use serde::{Deserialize, Serialize};

pub const NUM_LANDMARKS: usize = 21;

/// MediaPipe hand landmark indices.
pub mod joint {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_TIP: usize = 20;

    /// Thumb first, pinky last.
    pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
    pub const PALM: [usize; 5] = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn flat(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
            Handedness::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug)]
pub struct HandObservation {
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
    pub timestamp: Instant,
}

impl HandObservation {
    pub fn new(landmarks: Vec<Landmark>, handedness: Handedness, timestamp: Instant) -> Self {
        Self {
            landmarks,
            handedness,
            timestamp,
        }
    }

    /// Exactly 21 landmarks, all coordinates finite.
    pub fn is_usable(&self) -> bool {
        self.landmarks.len() == NUM_LANDMARKS && self.landmarks.iter().all(Landmark::is_finite)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FingerState {
    Extended,
    HalfBent,
    Folded,
}

impl FingerState {
    pub fn label(&self) -> &'static str {
        match self {
            FingerState::Extended => "extended",
            FingerState::HalfBent => "half-bent",
            FingerState::Folded => "folded",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    #[default]
    None,
    ThumbsUp,
    ThumbsDown,
    SwipeLeft,
    SwipeRight,
    OpenPalm,
    Pinch,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 7] = [
        GestureLabel::None,
        GestureLabel::ThumbsUp,
        GestureLabel::ThumbsDown,
        GestureLabel::SwipeLeft,
        GestureLabel::SwipeRight,
        GestureLabel::OpenPalm,
        GestureLabel::Pinch,
    ];

    pub fn is_none(&self) -> bool {
        matches!(self, GestureLabel::None)
    }

    pub fn is_swipe(&self) -> bool {
        matches!(self, GestureLabel::SwipeLeft | GestureLabel::SwipeRight)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::None => "none",
            GestureLabel::ThumbsUp => "thumbs_up",
            GestureLabel::ThumbsDown => "thumbs_down",
            GestureLabel::SwipeLeft => "swipe_left",
            GestureLabel::SwipeRight => "swipe_right",
            GestureLabel::OpenPalm => "open_palm",
            GestureLabel::Pinch => "pinch",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GestureLabel::None => "No gesture",
            GestureLabel::ThumbsUp => "Thumbs up",
            GestureLabel::ThumbsDown => "Thumbs down",
            GestureLabel::SwipeLeft => "Swipe left",
            GestureLabel::SwipeRight => "Swipe right",
            GestureLabel::OpenPalm => "Open palm",
            GestureLabel::Pinch => "Pinch",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GestureLabel::None => "⋯ ",
            GestureLabel::ThumbsUp => "👍 ",
            GestureLabel::ThumbsDown => "👎 ",
            GestureLabel::SwipeLeft => "👈 ",
            GestureLabel::SwipeRight => "👉 ",
            GestureLabel::OpenPalm => "🖐 ",
            GestureLabel::Pinch => "🤏 ",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureEvent {
    pub label: GestureLabel,
    pub confirmed_at: Instant,
}

impl GestureEvent {
    pub fn display_text(&self) -> String {
        format!("{}{}", self.label.emoji(), self.label.display_name())
    }
}
