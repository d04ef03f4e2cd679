use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use crate::{
    config::GestureConfig,
    types::{GestureLabel, Landmark},
};

const MIN_SWIPE_SAMPLES: usize = 2;
const MIN_SCALE: f64 = 1e-6;

#[derive(Clone, Copy, Debug)]
pub struct MotionSample {
    pub centroid: Landmark,
    /// Hand size at the time of the sample; displacement is measured in
    /// multiples of it.
    pub scale: f64,
    pub timestamp: Instant,
}

/// A detected swipe kept alive while the hand keeps moving the same way, so
/// that it can be confirmed over several frames.
#[derive(Clone, Copy, Debug)]
struct SwipeLatch {
    label: GestureLabel,
    remaining: u32,
    last: MotionSample,
}

/// Rolling centroid history of the tracked hand.
pub struct MotionTracker {
    history: VecDeque<MotionSample>,
    capacity: usize,
    window: Duration,
    threshold: f64,
    /// Extra frames a detected swipe is reported for.
    hold_frames: u32,
    latch: Option<SwipeLatch>,
}

impl MotionTracker {
    pub fn new(config: &GestureConfig) -> Self {
        let capacity = config.swipe_history_len.max(MIN_SWIPE_SAMPLES);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            window: config.swipe_window(),
            threshold: config.swipe_norm_threshold,
            hold_frames: config.confirm_frames_swipe.saturating_sub(1),
            latch: None,
        }
    }

    pub fn update(&mut self, centroid: Landmark, scale: f64, now: Instant) -> GestureLabel {
        let sample = MotionSample {
            centroid,
            scale,
            timestamp: now,
        };
        self.history.push_back(sample);

        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
        while let Some(front) = self.history.front() {
            if now.saturating_duration_since(front.timestamp) > self.window {
                self.history.pop_front();
            } else {
                break;
            }
        }

        if let Some(label) = self.continue_latch(sample) {
            return label;
        }

        if self.history.len() < MIN_SWIPE_SAMPLES {
            return GestureLabel::None;
        }

        let (Some(oldest), Some(newest)) = (self.history.front(), self.history.back()) else {
            return GestureLabel::None;
        };
        let mean_scale =
            self.history.iter().map(|s| s.scale).sum::<f64>() / self.history.len() as f64;
        if !mean_scale.is_finite() || mean_scale < MIN_SCALE {
            return GestureLabel::None;
        }

        let displacement = (newest.centroid.x - oldest.centroid.x) / mean_scale;
        let label = if displacement > self.threshold {
            GestureLabel::SwipeRight
        } else if displacement < -self.threshold {
            GestureLabel::SwipeLeft
        } else {
            return GestureLabel::None;
        };

        log::debug!(
            "{label} over {} samples ({displacement:.2} hand sizes in {:?})",
            self.history.len(),
            newest.timestamp.saturating_duration_since(oldest.timestamp)
        );

        // The same motion must not trigger again once the latch runs out.
        self.history.clear();
        self.latch = (self.hold_frames > 0).then_some(SwipeLatch {
            label,
            remaining: self.hold_frames,
            last: sample,
        });
        label
    }

    /// Repeats the latched swipe while the hand keeps moving in its direction
    /// within the window.
    fn continue_latch(&mut self, sample: MotionSample) -> Option<GestureLabel> {
        let mut latch = self.latch.take()?;
        if sample.timestamp.saturating_duration_since(latch.last.timestamp) > self.window {
            return None;
        }

        let step = sample.centroid.x - latch.last.centroid.x;
        let holds = match latch.label {
            GestureLabel::SwipeRight => step > 0.0,
            GestureLabel::SwipeLeft => step < 0.0,
            _ => false,
        };
        if !holds {
            log::trace!("{} latch dropped after a {step:.3} step", latch.label);
            return None;
        }

        latch.remaining -= 1;
        latch.last = sample;
        if latch.remaining > 0 {
            self.latch = Some(latch);
        }
        Some(latch.label)
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.latch = None;
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
