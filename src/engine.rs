use std::time::Instant;

use crate::{
    classifier::{GestureClassifier, HandMetrics},
    config::GestureConfig,
    motion::MotionTracker,
    stabilizer::{StabilizerPhase, TemporalStabilizer},
    types::{GestureEvent, GestureLabel, HandObservation, Handedness},
};

/// A swipe overrides whatever pose the hand holds while moving.
pub fn merge_labels(pose: GestureLabel, motion: GestureLabel) -> GestureLabel {
    if motion.is_swipe() { motion } else { pose }
}

/// Turns per-frame hand observations into confirmed gesture events.
///
/// Owns every piece of mutable state (motion history, confirmation runs,
/// cooldown timers), so independent engines never interfere. Calls must be
/// made in frame order from a single driver.
pub struct GestureEngine {
    classifier: GestureClassifier,
    motion: MotionTracker,
    stabilizer: TemporalStabilizer,
    tracked_hand: Option<Handedness>,
}

impl GestureEngine {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(config),
            motion: MotionTracker::new(config),
            stabilizer: TemporalStabilizer::new(config),
            tracked_hand: None,
        }
    }

    /// Uses the observation's timestamp, or the monotonic clock when no hand
    /// was seen this frame.
    pub fn process_frame(&mut self, observation: Option<HandObservation>) -> Option<GestureEvent> {
        let now = observation
            .as_ref()
            .map_or_else(Instant::now, |obs| obs.timestamp);
        self.process_frame_at(observation.as_ref(), now)
    }

    /// Like [`process_frame`](Self::process_frame) with an explicit frame
    /// time, which takes precedence over the observation's own timestamp.
    pub fn process_frame_at(
        &mut self,
        observation: Option<&HandObservation>,
        now: Instant,
    ) -> Option<GestureEvent> {
        let label = match observation {
            Some(observation) => self.raw_label(observation, now),
            None => {
                self.lose_hand();
                GestureLabel::None
            }
        };

        let event = self.stabilizer.feed(label, now);
        if let Some(event) = &event {
            log::info!("gesture confirmed: {}", event.display_text());
        }
        event
    }

    pub fn phase(&self, now: Instant) -> StabilizerPhase {
        self.stabilizer.phase(now)
    }

    pub fn reset(&mut self) {
        self.motion.reset();
        self.stabilizer.reset();
        self.tracked_hand = None;
    }

    fn raw_label(&mut self, observation: &HandObservation, now: Instant) -> GestureLabel {
        let Some(metrics) = HandMetrics::measure(&observation.landmarks) else {
            log::trace!(
                "ignoring unusable hand observation ({} landmarks)",
                observation.landmarks.len()
            );
            self.lose_hand();
            return GestureLabel::None;
        };

        if self
            .tracked_hand
            .is_some_and(|hand| hand != observation.handedness)
        {
            log::debug!(
                "tracked hand switched to {}, dropping motion history",
                observation.handedness.label()
            );
            self.motion.reset();
        }
        self.tracked_hand = Some(observation.handedness);

        let reading = self.classifier.read(&observation.landmarks, metrics);
        let motion = self
            .motion
            .update(metrics.palm_center, metrics.palm_size, now);
        let merged = merge_labels(reading.label, motion);

        log::trace!(
            "pose {} motion {} -> {merged} (fingers {:?})",
            reading.label,
            motion,
            reading.finger_states.map(|s| s.label())
        );

        merged
    }

    fn lose_hand(&mut self) {
        if self.tracked_hand.take().is_some() {
            log::debug!("hand lost");
        }
        self.motion.reset();
    }
}
