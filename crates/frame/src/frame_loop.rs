use crate::clock::Clock;
use crate::limiter::FrameLimiter;
use freelook_camera::Camera;
use freelook_common::Config;
use freelook_input::{CameraCommand, Input, Key};
use freelook_render::{Display, Mesh, RenderTransform};
use std::time::Duration;

/// Timing carried between iterations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLoopState {
    /// Last clock reading in whole milliseconds; `None` before the first frame.
    last_frame_time: Option<u64>,
}

impl FrameLoopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame_time(&self) -> Option<u64> {
        self.last_frame_time
    }

    /// Record a clock reading and return the milliseconds since the previous
    /// one. The first reading yields 0.
    pub fn advance(&mut self, now: Duration) -> u64 {
        let now_ms = now.as_millis() as u64;
        let delta = self
            .last_frame_time
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_frame_time = Some(now_ms);
        delta
    }
}

/// What one iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// 1-based index of the iteration.
    pub frame: u64,
    pub delta_ms: u64,
    pub command: CameraCommand,
    /// Time spent in the end-of-frame throttle.
    pub slept: Duration,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The display reported a close request.
    CloseRequested,
    /// The exit key was held at the last poll.
    ExitKey,
    /// `run_for` reached its frame count.
    FrameBudget,
}

/// Drives the per-frame cadence for one camera over a static scene.
///
/// Owns the camera and its collaborators; nothing else touches them while the
/// loop runs.
pub struct FrameLoop<'a, D, I, C> {
    config: &'a Config,
    camera: Camera,
    scene: Mesh,
    display: D,
    input: I,
    clock: C,
    state: FrameLoopState,
    limiter: FrameLimiter,
    frames: u64,
}

impl<'a, D, I, C> FrameLoop<'a, D, I, C>
where
    D: Display,
    I: Input,
    C: Clock,
{
    pub fn new(
        config: &'a Config,
        camera: Camera,
        scene: Mesh,
        display: D,
        input: I,
        clock: C,
    ) -> Self {
        let mut limiter = FrameLimiter::new(config.target_fps);
        limiter.reset(clock.now());
        Self {
            config,
            camera,
            scene,
            display,
            input,
            clock,
            state: FrameLoopState::new(),
            limiter,
            frames: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> FrameLoopState {
        self.state
    }

    /// Iterations completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the camera and collaborators.
    pub fn into_parts(self) -> (Camera, D, I, C) {
        (self.camera, self.display, self.input, self.clock)
    }

    /// Termination check performed at the top of each iteration.
    pub fn exit_requested(&self) -> Option<ExitReason> {
        if self.display.is_close_requested() {
            Some(ExitReason::CloseRequested)
        } else if self.input.is_key_down(Key::Exit) {
            Some(ExitReason::ExitKey)
        } else {
            None
        }
    }

    /// Run one iteration: clock, input, camera, submit, present, throttle.
    pub fn step(&mut self) -> FrameStats {
        let frame = self.frames + 1;
        let _span = tracing::debug_span!("frame", frame).entered();

        let delta_ms = self.state.advance(self.clock.now());

        self.input.poll();
        let command = CameraCommand::from_input(&self.input, delta_ms, self.config);
        command.apply(&mut self.camera);

        let transform = RenderTransform {
            view: self.camera.current_view_transform(),
            projection: self.camera.projection(),
        };
        self.display.submit(&transform, &self.scene);
        self.display.present();

        let slept = self.limiter.wait(&self.clock);
        self.frames = frame;

        tracing::trace!(
            delta_ms,
            position = ?self.camera.position(),
            rotation = ?self.camera.rotation(),
            ?slept,
            "frame complete"
        );

        FrameStats {
            frame,
            delta_ms,
            command,
            slept,
        }
    }

    /// Loop until the display closes or the exit key is pressed.
    pub fn run(&mut self) -> ExitReason {
        self.run_inner(None)
    }

    /// Like [`run`](Self::run), but stop after at most `max_frames` iterations.
    pub fn run_for(&mut self, max_frames: u64) -> ExitReason {
        self.run_inner(Some(max_frames))
    }

    fn run_inner(&mut self, max_frames: Option<u64>) -> ExitReason {
        self.input.set_cursor_grabbed(true);
        self.limiter.reset(self.clock.now());
        tracing::info!(
            target_fps = self.limiter.target_fps(),
            "frame loop started"
        );

        let start = self.frames;
        let reason = loop {
            if let Some(reason) = self.exit_requested() {
                break reason;
            }
            if max_frames.is_some_and(|max| self.frames - start >= max) {
                break ExitReason::FrameBudget;
            }
            self.step();
        };

        self.input.set_cursor_grabbed(false);
        self.display.destroy();
        tracing::info!(?reason, frames = self.frames, "frame loop finished");
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use freelook_input::{InputFrame, ScriptedInput};
    use freelook_render::HeadlessDisplay;
    use glam::Vec3;

    fn config() -> Config {
        Config {
            target_fps: 100,
            move_speed: 0.01,
            mouse_sensitivity: 0.5,
            ..Config::default()
        }
    }

    fn make_loop(
        config: &Config,
        display: HeadlessDisplay,
        frames: Vec<InputFrame>,
    ) -> FrameLoop<'_, HeadlessDisplay, ScriptedInput, ManualClock> {
        let camera = Camera::from_config(config).unwrap();
        FrameLoop::new(
            config,
            camera,
            Mesh::cube(1.0),
            display,
            ScriptedInput::new(frames),
            ManualClock::new(),
        )
    }

    #[test]
    fn state_first_delta_is_zero() {
        let mut state = FrameLoopState::new();
        assert_eq!(state.advance(Duration::from_millis(500)), 0);
        assert_eq!(state.advance(Duration::from_millis(516)), 16);
        assert_eq!(state.last_frame_time(), Some(516));
    }

    #[test]
    fn state_uses_whole_milliseconds() {
        let mut state = FrameLoopState::new();
        state.advance(Duration::from_micros(16_900));
        // 33.4ms - 16.9ms reads as 33 - 16
        assert_eq!(state.advance(Duration::from_micros(33_400)), 17);
    }

    #[test]
    fn step_is_throttled_to_target_rate() {
        let config = config();
        let mut fl = make_loop(&config, HeadlessDisplay::new(), vec![]);

        let first = fl.step();
        assert_eq!(first.frame, 1);
        assert_eq!(first.delta_ms, 0);
        assert_eq!(first.slept, Duration::from_millis(10));

        let second = fl.step();
        assert_eq!(second.delta_ms, 10);
        assert_eq!(fl.clock().now(), Duration::from_millis(20));
    }

    #[test]
    fn movement_scales_with_delta() {
        let config = config();
        let forward = InputFrame::new().with_key(Key::Forward);
        let mut fl = make_loop(
            &config,
            HeadlessDisplay::new(),
            vec![forward.clone(), forward],
        );
        let start = fl.camera().position();

        fl.step();
        assert_eq!(fl.camera().position(), start, "first frame has zero delta");

        fl.step();
        let moved = fl.camera().position() - start;
        assert!(moved.x.abs() < 1e-5);
        assert!((moved.z - 0.1).abs() < 1e-5);
    }

    #[test]
    fn opposite_keys_produce_no_motion() {
        let config = config();
        let both = InputFrame::new()
            .with_key(Key::Left)
            .with_key(Key::Right)
            .with_key(Key::Forward)
            .with_key(Key::Back);
        let mut fl = make_loop(&config, HeadlessDisplay::new(), vec![both.clone(), both]);
        let start = fl.camera().position();
        fl.step();
        fl.step();
        assert_eq!(fl.camera().position(), start);
    }

    #[test]
    fn mouse_drives_pitch_and_yaw_only() {
        let config = config();
        let mut fl = make_loop(
            &config,
            HeadlessDisplay::new(),
            vec![InputFrame::new().with_mouse(10.0, 4.0)],
        );
        fl.step();
        assert_eq!(fl.camera().rotation(), Vec3::new(-2.0, 5.0, 0.0));
    }

    #[test]
    fn submits_camera_transform_each_frame() {
        let config = config();
        let mut fl = make_loop(&config, HeadlessDisplay::new(), vec![]);
        fl.step();
        fl.step();

        let display = fl.display();
        assert_eq!(display.submitted().len(), 2);
        assert_eq!(display.presents(), 2);
        let last = display.last_submitted().unwrap();
        assert_eq!(last.view, fl.camera().current_view_transform());
        assert_eq!(last.projection, fl.camera().projection());
    }

    #[test]
    fn run_stops_on_close_request() {
        let config = config();
        let mut fl = make_loop(&config, HeadlessDisplay::close_after(3), vec![]);
        assert_eq!(fl.run(), ExitReason::CloseRequested);
        assert_eq!(fl.frames(), 3);
        assert!(fl.display().is_destroyed());
        assert!(!fl.input().cursor_grabbed());
    }

    #[test]
    fn exit_key_is_checked_at_loop_top() {
        let config = config();
        let mut fl = make_loop(
            &config,
            HeadlessDisplay::new(),
            vec![
                InputFrame::new(),
                InputFrame::new().with_key(Key::Exit).with_key(Key::Forward),
            ],
        );
        assert_eq!(fl.run(), ExitReason::ExitKey);
        // the frame that saw the exit key still completes
        assert_eq!(fl.frames(), 2);
        assert_eq!(fl.display().presents(), 2);
    }

    #[test]
    fn closed_before_start_runs_no_frames() {
        let config = config();
        let mut fl = make_loop(&config, HeadlessDisplay::close_after(0), vec![]);
        assert_eq!(fl.run(), ExitReason::CloseRequested);
        assert_eq!(fl.frames(), 0);
        assert!(fl.display().submitted().is_empty());
    }

    #[test]
    fn run_for_honours_frame_budget() {
        let config = config();
        let mut fl = make_loop(&config, HeadlessDisplay::new(), vec![]);
        assert_eq!(fl.run_for(5), ExitReason::FrameBudget);
        assert_eq!(fl.frames(), 5);
        assert_eq!(fl.input().polls(), 5);
    }

    #[test]
    fn yaw_then_forward_scenario() {
        // 10° of yaw from 20px of mouse, then one 100ms step forward of 1 unit
        let config = Config {
            target_fps: 10,
            move_speed: 0.01,
            mouse_sensitivity: 0.5,
            ..Config::default()
        };
        let mut fl = make_loop(
            &config,
            HeadlessDisplay::new(),
            vec![
                InputFrame::new().with_mouse(20.0, 0.0),
                InputFrame::new().with_key(Key::Forward),
            ],
        );
        fl.step();
        fl.step();

        let angle = 100.0_f32.to_radians();
        let p = fl.camera().position();
        assert!((p.x - angle.cos()).abs() < 1e-5);
        assert_eq!(p.y, 0.0);
        assert!((p.z - (-10.0 + angle.sin())).abs() < 1e-5);
    }

    #[test]
    fn into_parts_returns_collaborators() {
        let config = config();
        let mut fl = make_loop(&config, HeadlessDisplay::new(), vec![]);
        fl.step();
        let (camera, display, input, clock) = fl.into_parts();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(display.presents(), 1);
        assert_eq!(input.polls(), 1);
        assert_eq!(clock.now(), Duration::from_millis(10));
    }
}
