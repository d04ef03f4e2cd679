//! Synthetic hands for tests. Coordinates are in palm sizes relative to the
//! wrist, image convention (y grows downward).

use std::time::Instant;

use crate::types::{HandObservation, Handedness, Landmark};

#[derive(Clone, Copy, Debug)]
pub(crate) enum Pose {
    OpenPalm,
    ThumbsUp,
    ThumbsDown,
    /// Thumb out to the side of a fist.
    ThumbSideways,
    Fist,
    /// Open hand with thumb and index tips touching.
    PinchOpen,
    /// Fist with the thumb raised onto the curled index tip; the thumbs-up
    /// heuristic fires as well.
    PinchFist,
}

const OPEN_PALM: [(f64, f64); 21] = [
    (0.0, 0.0),
    (-0.3, -0.25),
    (-0.55, -0.45),
    (-0.75, -0.65),
    (-0.9, -0.85),
    (-0.35, -0.95),
    (-0.42, -1.35),
    (-0.47, -1.6),
    (-0.52, -1.85),
    (0.0, -1.0),
    (0.0, -1.45),
    (0.0, -1.72),
    (0.0, -2.0),
    (0.3, -0.95),
    (0.38, -1.38),
    (0.43, -1.62),
    (0.48, -1.85),
    (0.55, -0.85),
    (0.68, -1.2),
    (0.76, -1.4),
    (0.84, -1.6),
];

const THUMBS_UP: [(f64, f64); 21] = [
    (0.0, 0.0),
    (-0.3, -0.25),
    (-0.5, -0.55),
    (-0.55, -0.95),
    (-0.55, -1.35),
    (-0.35, -0.95),
    (-0.38, -1.25),
    (-0.3, -1.05),
    (-0.25, -0.8),
    (0.0, -1.0),
    (0.0, -1.3),
    (0.05, -1.1),
    (0.05, -0.85),
    (0.3, -0.95),
    (0.32, -1.25),
    (0.3, -1.05),
    (0.28, -0.82),
    (0.55, -0.85),
    (0.58, -1.1),
    (0.52, -0.95),
    (0.45, -0.8),
];

fn relative(pose: Pose) -> [(f64, f64); 21] {
    match pose {
        Pose::OpenPalm => OPEN_PALM,
        Pose::ThumbsUp => THUMBS_UP,
        Pose::ThumbsDown => THUMBS_UP.map(|(x, y)| (x, -y)),
        Pose::ThumbSideways => {
            let mut points = THUMBS_UP;
            points[3] = (-0.9, -0.45);
            points[4] = (-1.3, -0.3);
            points
        }
        Pose::Fist => {
            let mut points = THUMBS_UP;
            points[3] = (-0.3, -0.6);
            points[4] = (0.05, -0.55);
            points
        }
        Pose::PinchOpen => {
            let mut points = OPEN_PALM;
            points[3] = (-0.6, -1.3);
            points[4] = (-0.5, -1.8);
            points
        }
        Pose::PinchFist => {
            let mut points = THUMBS_UP;
            points[3] = (-0.45, -0.8);
            points[4] = (-0.3, -0.9);
            points[8] = (-0.28, -0.88);
            points
        }
    }
}

pub(crate) fn landmarks(pose: Pose, wrist: (f64, f64), scale: f64) -> Vec<Landmark> {
    relative(pose)
        .iter()
        .map(|&(x, y)| Landmark::flat(wrist.0 + x * scale, wrist.1 + y * scale))
        .collect()
}

pub(crate) fn observation(
    pose: Pose,
    wrist: (f64, f64),
    scale: f64,
    timestamp: Instant,
) -> HandObservation {
    HandObservation::new(landmarks(pose, wrist, scale), Handedness::Right, timestamp)
}
