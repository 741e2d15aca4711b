//! Touch gesture recognition.
//!
//! A touch is reduced to its start and end points. [`TouchTracker`] turns the
//! pair into a [`Gesture`], and a gesture expands into a [`GesturePlan`]: the
//! actions to dispatch, each with the delay after which to dispatch it. Long
//! swipes become several single-cell steps spaced `step_ms` apart so the piece
//! visibly slides instead of jumping.

use arrayvec::ArrayVec;

use crate::types::{GameAction, BOARD_HEIGHT};

/// Upper bound on steps a single swipe can expand to.
pub const MAX_GESTURE_STEPS: usize = BOARD_HEIGHT as usize;

/// Thresholds for classifying touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Travel (in touch units, usually px) that corresponds to one board cell.
    pub cell_px: f32,
    /// Delay between the steps of a decomposed swipe.
    pub step_ms: u64,
    /// Touches that move less than this in both axes count as taps.
    pub tap_max_px: f32,
    /// Downward swipes at least this fast (shorter) are hard-drop flicks.
    pub flick_max_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            cell_px: 32.0,
            step_ms: 30,
            tap_max_px: 10.0,
            flick_max_ms: 200,
        }
    }
}

/// A recognized touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short touch without travel.
    Tap,
    /// Quick downward flick.
    Flick,
    /// Upward swipe.
    SwipeUp,
    /// Horizontal swipe; negative is left. Never zero.
    Horizontal { cells: i32 },
    /// Slow downward swipe.
    SoftSwipe { cells: u32 },
}

/// Classify a finished touch from its travel and duration.
pub fn classify(dx: f32, dy: f32, duration_ms: u64, config: &GestureConfig) -> Gesture {
    if dx.abs() < config.tap_max_px && dy.abs() < config.tap_max_px {
        return Gesture::Tap;
    }

    if dx.abs() >= dy.abs() {
        let cells = cells_travelled(dx.abs(), config.cell_px) as i32;
        return Gesture::Horizontal {
            cells: if dx < 0.0 { -cells } else { cells },
        };
    }

    if dy < 0.0 {
        Gesture::SwipeUp
    } else if duration_ms <= config.flick_max_ms {
        Gesture::Flick
    } else {
        Gesture::SoftSwipe {
            cells: cells_travelled(dy, config.cell_px),
        }
    }
}

/// Whole cells covered by `distance`; any non-tap swipe moves at least one.
fn cells_travelled(distance: f32, cell_px: f32) -> u32 {
    let cell_px = if cell_px > 0.0 { cell_px } else { 1.0 };
    let cells = (distance / cell_px).floor() as u32;
    cells.clamp(1, MAX_GESTURE_STEPS as u32)
}

/// One action of a plan, dispatched `delay_ms` after the gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    pub action: GameAction,
    pub delay_ms: u64,
}

/// Ordered actions a gesture expands to, with non-decreasing delays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GesturePlan {
    steps: ArrayVec<ScheduledAction, MAX_GESTURE_STEPS>,
}

impl GesturePlan {
    /// `count` copies of `action`; the first is immediate.
    fn repeat(action: GameAction, count: usize, step_ms: u64) -> Self {
        let steps = (0..count.min(MAX_GESTURE_STEPS))
            .map(|i| ScheduledAction {
                action,
                delay_ms: i as u64 * step_ms,
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[ScheduledAction] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl IntoIterator for GesturePlan {
    type Item = ScheduledAction;
    type IntoIter = arrayvec::IntoIter<ScheduledAction, MAX_GESTURE_STEPS>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl Gesture {
    /// Expand into game actions spaced `step_ms` apart.
    pub fn plan(self, step_ms: u64) -> GesturePlan {
        match self {
            Gesture::Tap => GesturePlan::repeat(GameAction::Rotate, 1, step_ms),
            Gesture::Flick => GesturePlan::repeat(GameAction::HardDrop, 1, step_ms),
            Gesture::SwipeUp => GesturePlan::repeat(GameAction::Hold, 1, step_ms),
            Gesture::Horizontal { cells } => {
                let action = if cells < 0 {
                    GameAction::MoveLeft
                } else {
                    GameAction::MoveRight
                };
                GesturePlan::repeat(action, cells.unsigned_abs() as usize, step_ms)
            }
            Gesture::SoftSwipe { cells } => {
                GesturePlan::repeat(GameAction::SoftDrop, cells as usize, step_ms)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchPoint {
    x: f32,
    y: f32,
    at_ms: u64,
}

/// Tracks one touch from start to end.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    start: Option<TouchPoint>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch start. A second start replaces the first.
    pub fn begin(&mut self, x: f32, y: f32, at_ms: u64) {
        self.start = Some(TouchPoint { x, y, at_ms });
    }

    /// Finish the touch and classify it. Returns `None` without a matching start.
    pub fn end(&mut self, x: f32, y: f32, at_ms: u64, config: &GestureConfig) -> Option<Gesture> {
        let start = self.start.take()?;
        let duration = at_ms.saturating_sub(start.at_ms);
        Some(classify(x - start.x, y - start.y, duration, config))
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}
