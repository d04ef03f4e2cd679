use crate::{
    config::GestureConfig,
    geometry::{Vector, angle, centroid, distance, normalized_vector},
    types::{FingerState, GestureLabel, HandObservation, Landmark, NUM_LANDMARKS, joint},
};

const MIN_PALM_SIZE: f64 = 1e-6;

/// Scale and anchor of one hand, shared by pose classification and motion
/// tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandMetrics {
    /// Centroid of the wrist and the four finger knuckles.
    pub palm_center: Landmark,
    /// Wrist to middle-finger knuckle distance.
    pub palm_size: f64,
}

impl HandMetrics {
    pub fn measure(landmarks: &[Landmark]) -> Option<Self> {
        if landmarks.len() != NUM_LANDMARKS || !landmarks.iter().all(Landmark::is_finite) {
            return None;
        }

        let palm_size = distance(landmarks[joint::WRIST], landmarks[joint::MIDDLE_MCP]);
        if palm_size < MIN_PALM_SIZE {
            return None;
        }

        let palm: Vec<Landmark> = joint::PALM.iter().map(|&idx| landmarks[idx]).collect();
        let palm_center = centroid(&palm)?;

        Some(Self {
            palm_center,
            palm_size,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbDirection {
    Up,
    Down,
}

/// Which pose heuristics fired for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoseSignals {
    pub pinch: bool,
    pub thumb: Option<ThumbDirection>,
    pub open_palm: bool,
}

impl PoseSignals {
    /// Pinch > thumbs up/down > open palm > none.
    pub fn resolve(self) -> GestureLabel {
        match self {
            PoseSignals { pinch: true, .. } => GestureLabel::Pinch,
            PoseSignals {
                thumb: Some(ThumbDirection::Up),
                ..
            } => GestureLabel::ThumbsUp,
            PoseSignals {
                thumb: Some(ThumbDirection::Down),
                ..
            } => GestureLabel::ThumbsDown,
            PoseSignals {
                open_palm: true, ..
            } => GestureLabel::OpenPalm,
            _ => GestureLabel::None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PoseReading {
    pub metrics: HandMetrics,
    /// Thumb first, pinky last.
    pub finger_states: [FingerState; 5],
    pub signals: PoseSignals,
    pub label: GestureLabel,
}

pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn classify(&self, observation: &HandObservation) -> GestureLabel {
        if !observation.is_usable() {
            return GestureLabel::None;
        }
        self.analyze(&observation.landmarks)
            .map(|reading| reading.label)
            .unwrap_or_default()
    }

    pub fn analyze(&self, landmarks: &[Landmark]) -> Option<PoseReading> {
        let metrics = HandMetrics::measure(landmarks)?;
        Some(self.read(landmarks, metrics))
    }

    /// `landmarks` must already have passed [`HandMetrics::measure`].
    pub(crate) fn read(&self, landmarks: &[Landmark], metrics: HandMetrics) -> PoseReading {
        let finger_states = joint::FINGERTIPS.map(|tip| {
            let reach = distance(landmarks[tip], metrics.palm_center) / metrics.palm_size;
            self.finger_state(reach)
        });

        let signals = PoseSignals {
            pinch: self.is_pinch(landmarks, &metrics),
            thumb: self.thumb_direction(landmarks, &metrics, &finger_states),
            open_palm: self.is_open_palm(landmarks, &metrics, &finger_states),
        };

        PoseReading {
            metrics,
            finger_states,
            signals,
            label: signals.resolve(),
        }
    }

    fn finger_state(&self, reach: f64) -> FingerState {
        if reach < self.config.curl_threshold {
            FingerState::Folded
        } else if reach > self.config.extend_threshold {
            FingerState::Extended
        } else {
            FingerState::HalfBent
        }
    }

    fn is_pinch(&self, landmarks: &[Landmark], metrics: &HandMetrics) -> bool {
        let gap = distance(landmarks[joint::THUMB_TIP], landmarks[joint::INDEX_TIP]);
        gap / metrics.palm_size < self.config.pinch_threshold
    }

    fn thumb_direction(
        &self,
        landmarks: &[Landmark],
        metrics: &HandMetrics,
        finger_states: &[FingerState; 5],
    ) -> Option<ThumbDirection> {
        if !finger_states[1..]
            .iter()
            .all(|state| *state == FingerState::Folded)
        {
            return None;
        }

        let wrist = landmarks[joint::WRIST];
        let mcp = landmarks[joint::THUMB_MCP];
        let tip = landmarks[joint::THUMB_TIP];

        // Reach measured along the metacarpal so a thumb tucked across the
        // fist does not count as extended.
        let axis = normalized_vector(landmarks[joint::THUMB_CMC], mcp);
        if axis.is_zero() {
            return None;
        }
        let reach = Vector::between(wrist, tip).dot(axis) / metrics.palm_size;
        if reach <= self.config.thumb_extend_threshold {
            return None;
        }

        // Image y grows downward.
        let vertical = (wrist.y - tip.y) / metrics.palm_size;
        let (direction, reference) = if vertical > self.config.thumb_vertical_threshold {
            (ThumbDirection::Up, Landmark::new(mcp.x, mcp.y - 1.0, mcp.z))
        } else if vertical < -self.config.thumb_vertical_threshold {
            (ThumbDirection::Down, Landmark::new(mcp.x, mcp.y + 1.0, mcp.z))
        } else {
            return None;
        };

        let tilt = angle(tip, mcp, reference);
        (tilt <= self.config.rotation_angle_threshold).then_some(direction)
    }

    fn is_open_palm(
        &self,
        landmarks: &[Landmark],
        metrics: &HandMetrics,
        finger_states: &[FingerState; 5],
    ) -> bool {
        if !finger_states
            .iter()
            .all(|state| *state == FingerState::Extended)
        {
            return false;
        }

        joint::FINGERTIPS.windows(2).all(|pair| {
            let spread = angle(landmarks[pair[0]], metrics.palm_center, landmarks[pair[1]]);
            spread >= self.config.palm_spread_angle
        })
    }
}
