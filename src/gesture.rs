use crate::decision::{decide, Decision, SwipeConfig};

/// Travel below which a drag shows no directional feedback.
pub const DEAD_ZONE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    Idle,
    /// Pointer down, card follows the pointer.
    Dragging,
    /// Released past the threshold, card is flying off screen.
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// What a release turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Past the threshold, the caller should animate the card out and call
    /// [`SwipeTracker::finish_commit`] when the animation ends.
    Commit(Decision),
    /// Short of the threshold, the caller should animate the card back and
    /// call [`SwipeTracker::settle`] when the animation ends.
    SpringBack,
    /// The release did not belong to the tracked drag.
    Ignored,
}

/// State machine for one card's swipe gesture.
///
/// Tracks a single pointer from press to release, classifies the release
/// through [`decide`], and holds the committed decision until the exit
/// animation hands it over exactly once via [`SwipeTracker::finish_commit`].
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    phase: DragPhase,
    pointer_id: Option<i32>,
    origin: Point,
    offset: Point,
    direction: Option<SwipeDirection>,
    pending: Option<Decision>,
    config: SwipeConfig,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            pointer_id: None,
            origin: Point::zero(),
            offset: Point::zero(),
            direction: None,
            pending: None,
            config: SwipeConfig::default(),
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        self.direction
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Begins tracking a pointer. Returns `false` while another pointer is
    /// already dragging. Starting over a pending commit abandons it, so a
    /// stale exit timer firing later finds nothing to deliver.
    pub fn start(&mut self, pointer_id: i32, at: Point) -> bool {
        if self.phase == DragPhase::Dragging {
            return false;
        }
        self.phase = DragPhase::Dragging;
        self.pointer_id = Some(pointer_id);
        self.origin = at;
        self.offset = Point::zero();
        self.direction = None;
        self.pending = None;
        true
    }

    /// Moves the tracked pointer. Returns whether anything changed, so the
    /// caller can skip re-rendering for hover moves and foreign pointers.
    pub fn update(&mut self, pointer_id: i32, at: Point) -> bool {
        if self.phase != DragPhase::Dragging || self.pointer_id != Some(pointer_id) {
            return false;
        }
        self.offset = Point::new(at.x - self.origin.x, at.y - self.origin.y);
        self.direction = classify_direction(self.offset);
        true
    }

    /// Ends the drag and classifies the final offset. On a spring-back the
    /// offset is kept until [`SwipeTracker::settle`] runs, so the return
    /// animation starts from where the pointer let go.
    pub fn release(&mut self, pointer_id: i32) -> ReleaseAction {
        if self.phase != DragPhase::Dragging || self.pointer_id != Some(pointer_id) {
            return ReleaseAction::Ignored;
        }
        self.pointer_id = None;
        self.direction = None;
        match decide(self.offset.x, self.offset.y, &self.config) {
            Some(decision) => {
                self.phase = DragPhase::Committing;
                self.pending = Some(decision);
                ReleaseAction::Commit(decision)
            }
            None => {
                self.phase = DragPhase::Idle;
                ReleaseAction::SpringBack
            }
        }
    }

    /// Abandons the drag without a decision, for `pointercancel`. Returns
    /// whether a drag was actually abandoned.
    pub fn cancel(&mut self, pointer_id: i32) -> bool {
        if self.phase != DragPhase::Dragging || self.pointer_id != Some(pointer_id) {
            return false;
        }
        self.phase = DragPhase::Idle;
        self.pointer_id = None;
        self.direction = None;
        true
    }

    /// Points the exit animation at its off-screen target.
    pub fn begin_exit(&mut self, target: Point) {
        if self.phase == DragPhase::Committing {
            self.offset = target;
        }
    }

    /// Takes the pending decision when the exit animation ends. Yields
    /// `Some` at most once per commit; a stale timer firing after a new
    /// drag started gets `None`.
    pub fn finish_commit(&mut self) -> Option<Decision> {
        if self.phase != DragPhase::Committing {
            return None;
        }
        self.phase = DragPhase::Idle;
        self.offset = Point::zero();
        self.direction = None;
        self.pending.take()
    }

    /// Zeroes the offset after a spring-back animation. Does nothing while
    /// a newer drag or commit owns the offset.
    pub fn settle(&mut self) {
        if self.phase == DragPhase::Idle {
            self.offset = Point::zero();
        }
    }

    /// Card tilt in degrees, proportional to horizontal travel.
    pub fn rotation_deg(&self) -> f64 {
        self.offset.x * 0.08
    }

    /// Drop shadow strength, capped so long drags stay readable.
    pub fn shadow_intensity(&self) -> f64 {
        (self.offset.x.abs() / 100.0).min(0.4)
    }

    pub fn like_opacity(&self) -> f64 {
        indicator_opacity(self.offset.x)
    }

    pub fn pass_opacity(&self) -> f64 {
        indicator_opacity(-self.offset.x)
    }

    pub fn cart_opacity(&self) -> f64 {
        indicator_opacity(-self.offset.y)
    }
}

/// Dominant axis of the offset, or `None` inside the dead zone. Vertical
/// wins exact ties.
fn classify_direction(offset: Point) -> Option<SwipeDirection> {
    let abs_x = offset.x.abs();
    let abs_y = offset.y.abs();
    if abs_x.max(abs_y) <= DEAD_ZONE {
        return None;
    }
    let direction = if abs_x > abs_y {
        if offset.x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if offset.y > 0.0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    };
    Some(direction)
}

/// Badge opacity ramp: invisible for the first 50px of travel, then linear
/// up to full strength at 200px.
fn indicator_opacity(travel: f64) -> f64 {
    if travel > 50.0 {
        ((travel - 50.0) / 150.0).min(1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTER: i32 = 1;

    fn dragged_to(x: f64, y: f64) -> SwipeTracker {
        let mut tracker = SwipeTracker::new();
        tracker.start(POINTER, Point::new(0.0, 0.0));
        tracker.update(POINTER, Point::new(x, y));
        tracker
    }

    #[test]
    fn starting_begins_a_drag_with_zero_offset() {
        let mut tracker = SwipeTracker::new();
        assert!(tracker.start(POINTER, Point::new(40.0, 60.0)));
        assert_eq!(tracker.phase(), DragPhase::Dragging);
        assert_eq!(tracker.offset(), Point::zero());
        assert_eq!(tracker.direction(), None);
    }

    #[test]
    fn offset_is_relative_to_the_origin() {
        let mut tracker = SwipeTracker::new();
        tracker.start(POINTER, Point::new(100.0, 200.0));
        tracker.update(POINTER, Point::new(130.0, 190.0));
        assert_eq!(tracker.offset(), Point::new(30.0, -10.0));
    }

    #[test]
    fn a_second_pointer_cannot_steal_the_drag() {
        let mut tracker = dragged_to(30.0, 0.0);
        assert!(!tracker.start(2, Point::new(0.0, 0.0)));
        assert!(!tracker.update(2, Point::new(500.0, 0.0)));
        assert_eq!(tracker.offset(), Point::new(30.0, 0.0));
        assert_eq!(tracker.release(2), ReleaseAction::Ignored);
        assert!(tracker.is_dragging());
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut tracker = SwipeTracker::new();
        assert!(!tracker.update(POINTER, Point::new(300.0, 0.0)));
        assert_eq!(tracker.offset(), Point::zero());
        assert_eq!(tracker.release(POINTER), ReleaseAction::Ignored);
    }

    #[test]
    fn direction_is_hidden_inside_the_dead_zone() {
        let tracker = dragged_to(20.0, 0.0);
        assert_eq!(tracker.direction(), None);

        let tracker = dragged_to(0.0, -20.0);
        assert_eq!(tracker.direction(), None);
    }

    #[test]
    fn direction_follows_the_dominant_axis() {
        assert_eq!(dragged_to(21.0, 0.0).direction(), Some(SwipeDirection::Right));
        assert_eq!(dragged_to(-21.0, 0.0).direction(), Some(SwipeDirection::Left));
        assert_eq!(dragged_to(0.0, -21.0).direction(), Some(SwipeDirection::Up));
        assert_eq!(dragged_to(0.0, 21.0).direction(), Some(SwipeDirection::Down));
        assert_eq!(dragged_to(80.0, -30.0).direction(), Some(SwipeDirection::Right));
    }

    #[test]
    fn vertical_wins_exact_diagonal_ties() {
        assert_eq!(dragged_to(30.0, 30.0).direction(), Some(SwipeDirection::Down));
        assert_eq!(dragged_to(30.0, -30.0).direction(), Some(SwipeDirection::Up));
    }

    #[test]
    fn direction_resets_when_the_drag_returns_to_the_dead_zone() {
        let mut tracker = dragged_to(80.0, 0.0);
        assert_eq!(tracker.direction(), Some(SwipeDirection::Right));
        tracker.update(POINTER, Point::new(5.0, 0.0));
        assert_eq!(tracker.direction(), None);
    }

    #[test]
    fn short_release_springs_back_and_keeps_the_offset() {
        let mut tracker = dragged_to(60.0, 0.0);
        assert_eq!(tracker.release(POINTER), ReleaseAction::SpringBack);
        assert_eq!(tracker.phase(), DragPhase::Idle);
        assert_eq!(tracker.offset(), Point::new(60.0, 0.0));

        tracker.settle();
        assert_eq!(tracker.offset(), Point::zero());
    }

    #[test]
    fn long_release_commits_the_decision() {
        let mut tracker = dragged_to(180.0, 0.0);
        assert_eq!(tracker.release(POINTER), ReleaseAction::Commit(Decision::Like));
        assert_eq!(tracker.phase(), DragPhase::Committing);
    }

    #[test]
    fn finish_commit_yields_the_decision_exactly_once() {
        let mut tracker = dragged_to(-200.0, 0.0);
        tracker.release(POINTER);
        tracker.begin_exit(Point::new(-900.0, 0.0));
        assert_eq!(tracker.offset(), Point::new(-900.0, 0.0));

        assert_eq!(tracker.finish_commit(), Some(Decision::Pass));
        assert_eq!(tracker.phase(), DragPhase::Idle);
        assert_eq!(tracker.offset(), Point::zero());
        assert_eq!(tracker.finish_commit(), None);
    }

    #[test]
    fn restarting_abandons_a_pending_commit() {
        let mut tracker = dragged_to(0.0, -250.0);
        tracker.release(POINTER);
        assert_eq!(tracker.phase(), DragPhase::Committing);

        assert!(tracker.start(POINTER, Point::new(10.0, 10.0)));
        assert_eq!(tracker.finish_commit(), None);
        assert!(tracker.is_dragging());
    }

    #[test]
    fn settle_never_clobbers_an_active_drag_or_commit() {
        let mut tracker = dragged_to(90.0, 0.0);
        tracker.settle();
        assert_eq!(tracker.offset(), Point::new(90.0, 0.0));

        tracker.update(POINTER, Point::new(200.0, 0.0));
        tracker.release(POINTER);
        tracker.begin_exit(Point::new(900.0, 0.0));
        tracker.settle();
        assert_eq!(tracker.offset(), Point::new(900.0, 0.0));
    }

    #[test]
    fn cancel_abandons_the_drag_without_a_decision() {
        let mut tracker = dragged_to(300.0, 0.0);
        assert!(tracker.cancel(POINTER));
        assert_eq!(tracker.phase(), DragPhase::Idle);
        assert_eq!(tracker.finish_commit(), None);

        tracker.settle();
        assert_eq!(tracker.offset(), Point::zero());
        assert!(!tracker.cancel(POINTER));
    }

    #[test]
    fn begin_exit_only_applies_while_committing() {
        let mut tracker = dragged_to(40.0, 0.0);
        tracker.begin_exit(Point::new(900.0, 0.0));
        assert_eq!(tracker.offset(), Point::new(40.0, 0.0));
    }

    #[test]
    fn rotation_tracks_horizontal_travel() {
        let tracker = dragged_to(100.0, 0.0);
        assert!((tracker.rotation_deg() - 8.0).abs() < 1e-9);

        let tracker = dragged_to(-50.0, 0.0);
        assert!((tracker.rotation_deg() + 4.0).abs() < 1e-9);
    }

    #[test]
    fn shadow_intensity_is_capped() {
        let tracker = dragged_to(30.0, 0.0);
        assert!((tracker.shadow_intensity() - 0.3).abs() < 1e-9);
        let tracker = dragged_to(-500.0, 0.0);
        assert!((tracker.shadow_intensity() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn badge_opacities_ramp_after_fifty_pixels() {
        let tracker = dragged_to(50.0, 0.0);
        assert_eq!(tracker.like_opacity(), 0.0);

        let tracker = dragged_to(125.0, 0.0);
        assert!((tracker.like_opacity() - 0.5).abs() < 1e-9);
        assert_eq!(tracker.pass_opacity(), 0.0);

        let tracker = dragged_to(500.0, 0.0);
        assert!((tracker.like_opacity() - 1.0).abs() < 1e-9);

        let tracker = dragged_to(-200.0, 0.0);
        assert!((tracker.pass_opacity() - 1.0).abs() < 1e-9);
        assert_eq!(tracker.like_opacity(), 0.0);

        let tracker = dragged_to(0.0, -125.0);
        assert!((tracker.cart_opacity() - 0.5).abs() < 1e-9);

        let tracker = dragged_to(0.0, 125.0);
        assert_eq!(tracker.cart_opacity(), 0.0);
    }
}
