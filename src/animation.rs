//! Animation playback over a frame sequence.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::{Durations, Error, Frame, FrameBackend, FrameId, Grid, Result, Timeline};

/// Playback status of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// `update` advances the timer
    #[default]
    Playing,
    /// `update` does nothing
    Paused,
}

type LoopCallback = Rc<dyn Fn(i64)>;

/// A frame sequence driven forward in time.
///
/// The animation does not own its frames; it holds [`FrameId`]s into a
/// [`Grid`] and needs that grid to draw. The caller feeds elapsed time to
/// [`update`](Animation::update) once per host tick.
///
/// A [`FrameId`] does not record which grid produced it. Always draw with the
/// grid the frames were taken from; another grid resolves the same ids to
/// its own frames, or fails with [`Error::PositionOutOfRange`].
///
/// ## Example
///
/// ```rust
/// use sprite_anim::render::CommandBackend;
/// use sprite_anim::{axes, Animation, Grid, GridLayout, Status};
///
/// let mut grid = Grid::new(CommandBackend, GridLayout::new(32, 32, 384, 256)).unwrap();
/// let frames = grid.get_frames(&axes!["1-3", 1, 2, 1]).unwrap();
/// let mut walk = Animation::new(frames, 0.25).unwrap();
/// assert_eq!(walk.total_duration(), 1.0);
///
/// walk.update(0.6);
/// assert_eq!(walk.position(), 1);
///
/// walk.pause();
/// walk.update(10.0);
/// assert_eq!(walk.position(), 1);
/// assert_eq!(walk.status(), Status::Paused);
/// ```
pub struct Animation {
    frames: Rc<[FrameId]>,
    timeline: Rc<Timeline>,
    on_loop: LoopCallback,
    timer: f64,
    position: usize,
    status: Status,
    flipped_h: bool,
    flipped_v: bool,
}

impl Animation {
    /// Create an animation playing from the first frame.
    ///
    /// Fails if `durations` does not cover every frame exactly once, or if
    /// the sequence is empty or its total duration is zero.
    pub fn new(frames: impl Into<Rc<[FrameId]>>, durations: impl Into<Durations>) -> Result<Self> {
        let frames = frames.into();
        let timeline = Timeline::build(durations.into().normalize(frames.len())?);

        let total = timeline.total_duration();
        if frames.is_empty() || total <= 0.0 {
            return Err(Error::EmptyCycle {
                frames: frames.len(),
                total,
            });
        }
        debug!("animation of {} frame(s), cycle {total}", frames.len());

        Ok(Self {
            frames,
            timeline: Rc::new(timeline),
            on_loop: Rc::new(|_: i64| {}),
            timer: 0.0,
            position: 0,
            status: Status::Playing,
            flipped_h: false,
            flipped_v: false,
        })
    }

    /// Set the callback run when playback wraps around.
    ///
    /// It receives the number of whole cycles completed by a single
    /// [`update`](Animation::update).
    pub fn with_on_loop(mut self, on_loop: impl Fn(i64) + 'static) -> Self {
        self.on_loop = Rc::new(on_loop);
        self
    }

    /// Advance playback by `dt` time units.
    ///
    /// Does nothing while paused. A negative `dt` rewinds; wrapping backwards
    /// past the start reports a negative loop count. A `dt` that is not
    /// finite, or too large to count in cycles, is ignored with a warning.
    pub fn update(&mut self, dt: f64) {
        if self.status != Status::Playing {
            return;
        }

        let total = self.timeline.total_duration();
        let timer = self.timer + dt;
        let loops = (timer / total).floor();
        if !loops.is_finite() {
            warn!("ignoring animation update by {dt}");
            return;
        }

        self.timer = timer;
        if loops != 0.0 {
            self.timer -= total * loops;
            trace!("animation looped {loops} time(s)");
            (self.on_loop)(loops as i64);
        }

        self.position = self.timeline.seek(self.timer);
    }

    /// Draw the current frame through the grid's backend.
    pub fn draw<B: FrameBackend>(
        &self,
        grid: &Grid<B>,
        canvas: &mut B::Canvas,
        image: &B::Image,
        x: f64,
        y: f64,
    ) -> Result<()> {
        grid.draw_frame(self.get_frame_info(), canvas, image, x, y)
    }

    /// Handle of the currently active frame.
    #[inline]
    pub fn get_frame_info(&self) -> FrameId {
        self.frames[self.position]
    }

    /// The currently active frame, resolved through `grid`.
    pub fn current_frame<'g, B: FrameBackend>(&self, grid: &'g Grid<B>) -> Option<&'g Frame<B::Handle>> {
        grid.frame(self.get_frame_info())
    }

    /// Jump to a frame.
    ///
    /// The timer is placed on the frame's end boundary, not its start.
    pub fn goto_frame(&mut self, position: usize) -> Result<()> {
        let end = self
            .timeline
            .intervals()
            .get(position)
            .copied()
            .ok_or(Error::PositionOutOfRange {
                position,
                len: self.frames.len(),
            })?;
        self.position = position;
        self.timer = end;
        Ok(())
    }

    /// Stop updating.
    pub fn pause(&mut self) {
        self.status = Status::Paused;
    }

    /// Continue updating.
    pub fn resume(&mut self) {
        self.status = Status::Playing;
    }

    /// Move to the last frame and pause.
    pub fn pause_at_end(&mut self) {
        self.position = self.frames.len() - 1;
        self.timer = self.timeline.total_duration();
        self.pause();
    }

    /// Move to the first frame and pause.
    pub fn pause_at_start(&mut self) {
        self.position = 0;
        self.timer = 0.0;
        self.pause();
    }

    /// Toggle the horizontal flip flag.
    ///
    /// The flag is only stored; backends decide whether to honor it.
    pub fn flip_h(&mut self) -> &mut Self {
        self.flipped_h = !self.flipped_h;
        self
    }

    /// Toggle the vertical flip flag.
    pub fn flip_v(&mut self) -> &mut Self {
        self.flipped_v = !self.flipped_v;
        self
    }

    /// Time elapsed within the current cycle.
    #[inline]
    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Index of the current frame within the sequence.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current playback status.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Check if the animation is currently playing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// Number of frames in the sequence.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The frame sequence.
    #[inline]
    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    /// Timing of the sequence.
    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Length of one full cycle.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    /// Whether the horizontal flip flag is set.
    #[inline]
    pub fn flipped_h(&self) -> bool {
        self.flipped_h
    }

    /// Whether the vertical flip flag is set.
    #[inline]
    pub fn flipped_v(&self) -> bool {
        self.flipped_v
    }
}

/// Cloning shares the frames, timing and loop callback but starts playback
/// over: the clone is playing from the first frame. Flip flags are copied.
impl Clone for Animation {
    fn clone(&self) -> Self {
        Self {
            frames: Rc::clone(&self.frames),
            timeline: Rc::clone(&self.timeline),
            on_loop: Rc::clone(&self.on_loop),
            timer: 0.0,
            position: 0,
            status: Status::Playing,
            flipped_h: self.flipped_h,
            flipped_v: self.flipped_v,
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("frames", &self.frames)
            .field("timer", &self.timer)
            .field("position", &self.position)
            .field("status", &self.status)
            .field("flipped_h", &self.flipped_h)
            .field("flipped_v", &self.flipped_v)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandBackend, DrawList};
    use crate::{axes, GridLayout, KeyedDurations};
    use std::cell::RefCell;

    fn frames(count: usize) -> Vec<FrameId> {
        (0..count).map(FrameId).collect()
    }

    #[test]
    fn test_initial_state() {
        let anim = Animation::new(frames(3), 0.1).unwrap();
        assert_eq!(anim.status(), Status::Playing);
        assert!(anim.is_playing());
        assert_eq!(anim.position(), 0);
        assert_eq!(anim.timer(), 0.0);
        assert_eq!(anim.frame_count(), 3);
        assert!(!anim.flipped_h() && !anim.flipped_v());
    }

    #[test]
    fn test_seek_behavior_end_to_end() {
        // Boundaries are [0.1, 0.2, 0.3]
        let mut anim = Animation::new(frames(3), [0.1, 0.1, 0.1]).unwrap();
        anim.update(0.25);
        assert_eq!(anim.position(), 1);

        // Within the first frame the last index is reported
        let mut anim = Animation::new(frames(3), [0.1, 0.1, 0.1]).unwrap();
        anim.update(0.05);
        assert_eq!(anim.position(), 2);

        let mut anim = Animation::new(frames(3), [0.1, 0.1, 0.1]).unwrap();
        anim.update(0.15);
        assert_eq!(anim.position(), 0);
    }

    #[test]
    fn test_loop_wraps_timer_and_reports_count() {
        let loops = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&loops);
        let mut anim = Animation::new(frames(3), [0.25, 0.25, 0.5])
            .unwrap()
            .with_on_loop(move |n| seen.borrow_mut().push(n));

        anim.update(0.75);
        assert!(loops.borrow().is_empty());
        assert_eq!(anim.position(), 1);

        anim.update(2.0); // timer 2.75
        assert_eq!(*loops.borrow(), vec![2]);
        assert_eq!(anim.timer(), 0.75);
        assert_eq!(anim.position(), 1);

        anim.update(0.25); // exactly one cycle
        assert_eq!(*loops.borrow(), vec![2, 1]);
        assert_eq!(anim.timer(), 0.0);
        assert_eq!(anim.position(), 2);
    }

    #[test]
    fn test_negative_dt_rewinds() {
        let loops = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&loops);
        let mut anim = Animation::new(frames(2), 0.5)
            .unwrap()
            .with_on_loop(move |n| seen.borrow_mut().push(n));

        anim.update(-0.25);
        assert_eq!(*loops.borrow(), vec![-1]);
        assert_eq!(anim.timer(), 0.75);
        assert_eq!(anim.position(), 0);
    }

    #[test_log::test]
    fn test_non_finite_dt_is_ignored() {
        let loops = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&loops);
        let mut anim = Animation::new(frames(3), 0.25)
            .unwrap()
            .with_on_loop(move |n| seen.borrow_mut().push(n));
        anim.update(0.375);
        assert_eq!(anim.position(), 0);

        for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            anim.update(dt);
            assert_eq!(anim.timer(), 0.375);
            assert_eq!(anim.position(), 0);
        }
        assert!(loops.borrow().is_empty());

        // Playback carries on normally afterwards
        anim.update(0.25);
        assert_eq!(anim.timer(), 0.625);
        assert_eq!(anim.position(), 1);

        // Finite, but too many cycles to count
        let mut tiny = Animation::new(frames(1), 1e-300).unwrap();
        tiny.update(1e300);
        assert_eq!(tiny.timer(), 0.0);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut anim = Animation::new(frames(4), 0.25).unwrap();
        anim.update(0.6);
        let (timer, position) = (anim.timer(), anim.position());

        anim.pause();
        for _ in 0..10 {
            anim.update(0.1);
        }
        assert_eq!(anim.timer(), timer);
        assert_eq!(anim.position(), position);

        anim.resume();
        anim.update(0.2);
        assert!(anim.timer() > timer);
    }

    #[test]
    fn test_pause_at_end_and_start() {
        let mut anim = Animation::new(frames(5), 0.5).unwrap();
        anim.pause_at_end();
        assert_eq!(anim.status(), Status::Paused);
        assert_eq!(anim.position(), 4);
        assert_eq!(anim.timer(), 2.5);
        assert_eq!(anim.get_frame_info(), FrameId(4));

        anim.pause_at_start();
        assert_eq!(anim.status(), Status::Paused);
        assert_eq!(anim.position(), 0);
        assert_eq!(anim.timer(), 0.0);
    }

    #[test]
    fn test_goto_frame_uses_end_boundary() {
        let mut anim = Animation::new(frames(3), [0.25, 0.5, 0.25]).unwrap();
        anim.goto_frame(1).unwrap();
        assert_eq!(anim.position(), 1);
        assert_eq!(anim.timer(), 0.75);

        anim.goto_frame(2).unwrap();
        assert_eq!(anim.timer(), 1.0);
        // Sitting on the cycle end wraps on the next update
        anim.update(0.0);
        assert_eq!(anim.timer(), 0.0);
        assert_eq!(anim.position(), 2);

        let result = anim.goto_frame(3);
        assert_eq!(result, Err(Error::PositionOutOfRange { position: 3, len: 3 }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Position 3 out of range (length is 3)"
        );
        assert_eq!(anim.position(), 2);
    }

    #[test]
    fn test_flip_chaining() {
        let mut anim = Animation::new(frames(1), 1.0).unwrap();
        anim.flip_h().flip_v().flip_v();
        assert!(anim.flipped_h());
        assert!(!anim.flipped_v());
    }

    #[test]
    fn test_clone_resets_cursor() {
        let count = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&count);
        let mut anim = Animation::new(frames(3), 0.5)
            .unwrap()
            .with_on_loop(move |n| *seen.borrow_mut() += n);
        anim.update(1.0);
        anim.flip_h();
        anim.pause();

        let mut copy = anim.clone();
        assert_eq!(copy.position(), 0);
        assert_eq!(copy.timer(), 0.0);
        assert_eq!(copy.status(), Status::Playing);
        assert!(copy.flipped_h());
        assert!(Rc::ptr_eq(&anim.frames, &copy.frames));
        assert!(Rc::ptr_eq(&anim.timeline, &copy.timeline));

        copy.update(3.0);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_empty_cycle_rejected() {
        let result = Animation::new(frames(0), 0.1);
        assert!(matches!(result, Err(Error::EmptyCycle { frames: 0, .. })));

        let result = Animation::new(frames(2), 0.0);
        assert!(matches!(result, Err(Error::EmptyCycle { frames: 2, .. })));
    }

    #[test]
    fn test_duration_errors_propagate() {
        let result = Animation::new(frames(3), vec![0.1, 0.1]);
        assert!(matches!(result, Err(Error::DurationCoverageMismatch { expected: 3, covered: 2, .. })));
    }

    #[test_log::test]
    fn test_draw_current_frame() {
        let layout = GridLayout::new(32, 98, 1024, 768).with_origin(366, 102).with_border(1);
        let mut grid = Grid::new(CommandBackend, layout).unwrap();
        let ids = grid.get_frames(&axes!["7-1", 1, "2-7", 1]).unwrap();
        let durations = KeyedDurations::new()
            .with(1, 1.0)
            .with("2-7", 0.125)
            .with(8, 1.0)
            .with("9-13", 0.125);
        let mut submarine = Animation::new(ids, durations).unwrap();
        assert_eq!(submarine.total_duration(), 3.375);

        let mut list = DrawList::new();
        submarine.update(1.1);
        submarine.draw(&grid, &mut list, "1945", 600.0, 100.0).unwrap();
        assert_eq!(submarine.position(), 0);
        assert_eq!(list.commands[0].source, (366 + 6 * 32 + 7, 103, 32, 98));
        assert_eq!(list.commands[0].dest_x, 600.0);

        submarine.goto_frame(6).unwrap();
        let frame = submarine.current_frame(&grid).unwrap();
        assert_eq!(frame.x(), 367);
    }
}
