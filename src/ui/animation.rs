//! Chart transitions.
//!
//! Two independent animators drive the chart:
//!
//! * [`BarTween`] eases each bar's length from whatever is currently on
//!   screen to its new target whenever the data changes.
//! * [`SlideTransition`] shifts the whole chart sideways on a year change and
//!   lets it decay back into place — purely cosmetic.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Ease-out cubic: fast start, gentle landing.
fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ───────────────────────────────────────── bar tween ─────────

#[derive(Debug, Clone, Copy)]
struct Track {
    from: f64,
    to: f64,
    started: Instant,
}

impl Track {
    fn value_at(&self, now: Instant, duration: Duration) -> f64 {
        if duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f64() / duration.as_secs_f64();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    fn is_settled(&self, now: Instant, duration: Duration) -> bool {
        self.from == self.to || now.saturating_duration_since(self.started) >= duration
    }
}

/// Per-bar length animator keyed by country name.
#[derive(Debug, Clone)]
pub struct BarTween {
    duration: Duration,
    tracks: HashMap<String, Track>,
}

impl BarTween {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tracks: HashMap::new(),
        }
    }

    /// Point every bar at a new target length.  Each bar starts from the
    /// length currently displayed (0 for bars entering the view), so a
    /// retarget mid-flight continues smoothly instead of jumping.  Bars not
    /// in `targets` are dropped.
    pub fn retarget<I, K>(&mut self, targets: I, now: Instant)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut next = HashMap::new();
        for (key, to) in targets {
            let key = key.into();
            let from = self.value(&key, now);
            next.insert(key, Track { from, to, started: now });
        }
        self.tracks = next;
    }

    /// Length to draw for `key` at `now`.
    pub fn value(&self, key: &str, now: Instant) -> f64 {
        self.tracks
            .get(key)
            .map_or(0.0, |track| track.value_at(now, self.duration))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tracks
            .values()
            .any(|track| !track.is_settled(now, self.duration))
    }
}

// ───────────────────────────────────────── slide ─────────────

/// Direction the chart content travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// Moving to a later year: new content enters from the right.
    Left,
    /// Moving to an earlier year: new content enters from the left.
    Right,
}

impl SlideDirection {
    pub fn between(from: i32, to: i32) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Self::Left),
            std::cmp::Ordering::Less => Some(Self::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Column-offset slide with exponential ease-out.
///
/// Starting a slide injects a horizontal displacement; each tick it decays
/// toward zero so the chart glides into place with visible deceleration.
#[derive(Debug, Clone)]
pub struct SlideTransition {
    /// Current column displacement.  Positive = content shifted right of
    /// its resting place (it will travel left); negative = shifted left.
    offset: f64,
    /// Damping: `offset *= (1 - speed)` each tick.
    speed: f64,
}

impl SlideTransition {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Begin a slide spanning `distance` columns.  Replaces any slide still
    /// in flight.
    pub fn start(&mut self, direction: SlideDirection, distance: u16) {
        let distance = f64::from(distance);
        self.offset = match direction {
            SlideDirection::Left => distance,
            SlideDirection::Right => -distance,
        };
    }

    /// Decay the offset toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.offset *= 1.0 - self.speed;
        if self.offset.abs() < 0.5 {
            self.offset = 0.0;
        }
    }

    /// Current displacement in whole columns.
    pub fn column_offset(&self) -> i32 {
        self.offset.round() as i32
    }

    pub fn is_animating(&self) -> bool {
        self.offset != 0.0
    }
}
