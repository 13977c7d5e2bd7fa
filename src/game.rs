//! Phase state machine
//!
//! `Game` owns the current run, the session scoreboard, the RNG and the single
//! outstanding frame request. Inputs arrive as two intents (`start`, `flap`)
//! and are applied immediately; frames arrive through `on_frame`.
//!
//! ```text
//! Idle --start/flap--> Playing --collision--> Over --start/flap--> Playing
//!                       |   ^
//!                       +---+ tick / flap
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::schedule::{FrameHandle, FrameScheduler, ManualScheduler};
use crate::scoreboard::Scoreboard;
use crate::sim::{Avatar, GamePhase, ObstacleField, Run, autopilot, physics, tick};

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub avatar: &'a Avatar,
    pub obstacles: &'a ObstacleField,
    pub config: &'a GameConfig,
}

/// Output side of the game: drawing, score labels and overlays
pub trait GameView {
    /// Draw the current state; called once per tick
    fn render(&mut self, frame: &Frame<'_>);

    /// Current score or best score changed (also sent on every reset)
    fn score_changed(&mut self, score: u32, best: u32);

    /// The phase changed; `score` is the run's score at the transition
    fn phase_changed(&mut self, phase: GamePhase, score: u32);
}

/// Headless view that discards everything
impl GameView for () {
    fn render(&mut self, _frame: &Frame<'_>) {}
    fn score_changed(&mut self, _score: u32, _best: u32) {}
    fn phase_changed(&mut self, _phase: GamePhase, _score: u32) {}
}

pub struct Game<S: FrameScheduler, V: GameView> {
    config: GameConfig,
    phase: GamePhase,
    run: Run,
    scoreboard: Scoreboard,
    rng: Pcg32,
    scheduler: S,
    view: V,
    /// The one frame request allowed to be outstanding
    pending: Option<FrameHandle>,
    /// Demo mode: flap decisions made by the autopilot
    autopilot: bool,
}

impl<S: FrameScheduler, V: GameView> Game<S, V> {
    /// Build an idle game and draw its initial state.
    ///
    /// `config` is expected to have passed `GameConfig::validate`.
    pub fn new(config: GameConfig, seed: u64, scheduler: S, view: V) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid game config");

        let mut game = Self {
            run: Run::new(&config),
            config,
            phase: GamePhase::Idle,
            scoreboard: Scoreboard::new(),
            rng: Pcg32::seed_from_u64(seed),
            scheduler,
            view,
            pending: None,
            autopilot: false,
        };
        game.view.score_changed(0, 0);
        game.render();
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn best_score(&self) -> u32 {
        self.scoreboard.best()
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether a next-frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", if enabled { "on" } else { "off" });
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            phase: self.phase,
            avatar: &self.run.avatar,
            obstacles: &self.run.obstacles,
            config: &self.config,
        }
    }

    /// Start intent: begins a run from `Idle` or `Over`; ignored while playing
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Idle | GamePhase::Over => self.begin_run(),
            GamePhase::Playing => log::debug!("Start ignored: run already in progress"),
        }
    }

    /// Flap intent: jumps while playing, otherwise acts as a start
    pub fn flap(&mut self) {
        match self.phase {
            GamePhase::Playing => physics::flap(&mut self.run.avatar, self.config.flap_impulse),
            GamePhase::Idle | GamePhase::Over => self.begin_run(),
        }
    }

    /// Frame driver callback: consumes the outstanding request and ticks once.
    ///
    /// Callbacks with no outstanding request, or outside `Playing`, are stale
    /// and do nothing.
    pub fn on_frame(&mut self) {
        if self.pending.take().is_none() || self.phase != GamePhase::Playing {
            log::debug!("Stale frame ignored in {:?}", self.phase);
            return;
        }

        if self.autopilot && autopilot::wants_flap(&self.run, &self.config) {
            physics::flap(&mut self.run.avatar, self.config.flap_impulse);
        }

        self.advance();
        self.schedule_next();
    }

    /// Request the next frame. No-op unless playing, and never more than one
    /// request at a time.
    pub fn schedule_next(&mut self) {
        if self.phase != GamePhase::Playing || self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Could not schedule next frame; run paused at tick {}", self.run.ticks);
        }
    }

    /// Withdraw the outstanding frame request, if any
    pub fn cancel_scheduled(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn begin_run(&mut self) {
        self.cancel_scheduled();

        self.run = Run::new(&self.config);
        self.phase = GamePhase::Playing;
        log::info!("Run started (best {})", self.scoreboard.best());

        self.view.score_changed(0, self.scoreboard.best());
        self.view.phase_changed(GamePhase::Playing, 0);

        // First tick runs right away, then the driver takes over
        self.advance();
        self.schedule_next();
    }

    /// One simulation tick, render, then the collision verdict
    fn advance(&mut self) {
        let outcome = tick(&mut self.run, &self.config, &mut self.rng);
        if outcome.cleared > 0 {
            self.view.score_changed(self.run.score, self.scoreboard.best());
        }

        self.render();

        if outcome.collided {
            self.end_run();
        }
    }

    fn end_run(&mut self) {
        self.phase = GamePhase::Over;
        self.cancel_scheduled();

        let score = self.run.score;
        if self.scoreboard.finish_run(score) {
            log::info!("New best score: {}", score);
        }
        log::info!(
            "Run over: score {} (best {}) after {} ticks",
            score,
            self.scoreboard.best(),
            self.run.ticks
        );

        self.view.score_changed(score, self.scoreboard.best());
        self.view.phase_changed(GamePhase::Over, score);
    }

    fn render(&mut self) {
        let frame = Frame {
            phase: self.phase,
            avatar: &self.run.avatar,
            obstacles: &self.run.obstacles,
            config: &self.config,
        };
        self.view.render(&frame);
    }
}

impl<V: GameView> Game<ManualScheduler, V> {
    /// Deliver up to `max_frames` queued frames. Returns how many were delivered.
    pub fn pump(&mut self, max_frames: u64) -> u64 {
        let mut delivered = 0;
        while delivered < max_frames {
            if self.scheduler.fire().is_none() {
                break;
            }
            self.on_frame();
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
impl<S: FrameScheduler, V: GameView> Game<S, V> {
    fn run_mut(&mut self) -> &mut Run {
        &mut self.run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[derive(Default)]
    struct RecordingView {
        renders: u32,
        scores: Vec<(u32, u32)>,
        phases: Vec<(GamePhase, u32)>,
    }

    impl GameView for RecordingView {
        fn render(&mut self, _frame: &Frame<'_>) {
            self.renders += 1;
        }

        fn score_changed(&mut self, score: u32, best: u32) {
            self.scores.push((score, best));
        }

        fn phase_changed(&mut self, phase: GamePhase, score: u32) {
            self.phases.push((phase, score));
        }
    }

    fn new_game() -> Game<ManualScheduler, RecordingView> {
        Game::new(
            GameConfig::default(),
            12345,
            ManualScheduler::new(),
            RecordingView::default(),
        )
    }

    /// Put an obstacle right behind the avatar so the next tick clears it
    fn queue_clear(game: &mut Game<ManualScheduler, RecordingView>) {
        let gap_y = game.run().avatar.pos.y;
        game.run_mut().obstacles.push(Obstacle::new(37.0, gap_y));
    }

    #[test]
    fn test_starts_idle_and_drawn() {
        let game = new_game();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.view().renders, 1);
        assert_eq!(game.view().scores, vec![(0, 0)]);
        assert!(!game.is_scheduled());
        assert_eq!(game.scheduler().pending(), 0);
    }

    #[test]
    fn test_idle_frames_are_ignored() {
        let mut game = new_game();
        game.on_frame();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.run().ticks, 0);
    }

    #[test]
    fn test_flap_from_idle_starts_run() {
        let mut game = new_game();
        game.flap();
        assert_eq!(game.phase(), GamePhase::Playing);
        // First tick runs immediately, next one is scheduled
        assert_eq!(game.run().ticks, 1);
        assert!(game.is_scheduled());
        assert_eq!(game.scheduler().pending(), 1);
        assert_eq!(game.view().phases, vec![(GamePhase::Playing, 0)]);
    }

    #[test]
    fn test_flap_while_playing_sets_impulse() {
        let mut game = new_game();
        game.start();
        game.pump(5);
        let ticks = game.run().ticks;

        game.flap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.run().ticks, ticks);
        assert_eq!(game.run().avatar.velocity, game.config().flap_impulse);
        // Still exactly one frame outstanding
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let mut game = new_game();
        game.start();
        game.pump(10);
        game.start();
        assert_eq!(game.run().ticks, 11);
        assert_eq!(game.view().phases.len(), 1);
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn test_free_fall_ends_run() {
        let mut game = new_game();
        game.start();
        let delivered = game.pump(1000);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.run().ticks, 30);
        assert_eq!(delivered, 29);
        assert!(!game.is_scheduled());
        assert_eq!(game.scheduler().pending(), 0);
        assert_eq!(game.view().phases.last(), Some(&(GamePhase::Over, 0)));
        // One render for the idle screen plus one per tick
        assert_eq!(game.view().renders, 31);
    }

    #[test]
    fn test_stale_frame_after_over_is_ignored() {
        let mut game = new_game();
        game.start();
        game.pump(1000);
        let renders = game.view().renders;
        game.on_frame();
        game.on_frame();
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.run().ticks, 30);
        assert_eq!(game.view().renders, renders);
    }

    #[test]
    fn test_unrequested_frame_is_ignored() {
        let mut game = new_game();
        game.start();
        // One legitimate frame, then a duplicate with nothing outstanding
        game.scheduler_mut().fire();
        game.on_frame();
        game.cancel_scheduled();
        game.on_frame();
        assert_eq!(game.run().ticks, 2);
    }

    #[test]
    fn test_cancel_withdraws_request() {
        let mut game = new_game();
        game.start();
        assert!(game.is_scheduled());
        game.cancel_scheduled();
        assert!(!game.is_scheduled());
        assert_eq!(game.scheduler().pending(), 0);
        assert_eq!(game.scheduler().cancelled().len(), 1);
        assert_eq!(game.pump(10), 0);
    }

    #[test]
    fn test_schedule_next_is_idempotent() {
        let mut game = new_game();
        game.start();
        game.schedule_next();
        game.schedule_next();
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn test_clearing_obstacle_scores_and_notifies() {
        let mut game = new_game();
        game.start();
        queue_clear(&mut game);
        game.pump(1);
        assert_eq!(game.score(), 1);
        assert!(game.view().scores.contains(&(1, 0)));
    }

    #[test]
    fn test_best_score_is_max_across_runs() {
        let mut game = new_game();

        game.start();
        queue_clear(&mut game);
        game.pump(1);
        queue_clear(&mut game);
        game.pump(1000);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.score(), 2);
        assert_eq!(game.best_score(), 2);

        // A worse run leaves the best alone
        game.flap();
        assert_eq!(game.score(), 0);
        game.pump(1000);
        assert_eq!(game.phase(), GamePhase::Over);
        assert_eq!(game.best_score(), 2);
        assert_eq!(game.view().scores.last(), Some(&(0, 2)));
        assert_eq!(game.scoreboard().runs_finished(), 2);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut game = new_game();
        game.start();
        // Fly long enough to spawn obstacles and build up the spacing counter
        for _ in 0..90 {
            if game.run().avatar.velocity >= 0.0 && game.run().avatar.pos.y > 230.0 {
                game.flap();
            }
            game.pump(1);
        }
        assert!(!game.run().obstacles.is_empty());
        game.run_mut().avatar.pos.y = 500.0;
        game.pump(1);
        assert_eq!(game.phase(), GamePhase::Over);

        game.start();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.run().ticks, 1);
        assert!(game.run().obstacles.is_empty());
        // Counter restarted from zero and has seen exactly one tick
        assert_eq!(
            game.run().obstacles.distance_since_spawn(),
            game.config().obstacle_speed
        );
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn test_autopilot_outlasts_free_fall() {
        let mut game = Game::new(GameConfig::default(), 7, ManualScheduler::new(), ());
        game.set_autopilot(true);
        game.start();
        game.pump(140);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.run().ticks, 141);
    }

    #[test]
    fn test_score_counts_every_crossed_obstacle() {
        let mut game = Game::new(GameConfig::default(), 42, ManualScheduler::new(), ());
        game.set_autopilot(true);
        game.start();

        // A spawn tick resets the counter without accumulating
        let mut spawned = 0u32;
        for _ in 0..5000 {
            if game.pump(1) == 0 {
                break;
            }
            if game.run().obstacles.distance_since_spawn() == 0.0 {
                spawned += 1;
            }
        }

        // Recycled obstacles were all behind the avatar, so only live ones can be uncrossed
        let uncrossed = game.run().obstacles.iter().filter(|o| !o.passed).count() as u32;
        assert!(game.score() > 0);
        assert_eq!(game.score(), spawned - uncrossed);
    }
}
