//! Simulation core: state machine, physics, obstacle stream and collision.
//!
//! `Game` is a self-contained session advanced by [`Game::update`] once per
//! fixed timestep. Rendering, audio and storage live outside; the update
//! reports what happened through [`GameEvent`]s and randomness is injected so
//! runs can be reproduced in tests.

use rand::Rng;

use crate::config::{
    self, BIRD_H, BIRD_SPAWN_Y, BIRD_W, BIRD_X, CEILING_Y, Difficulty, FLAP_IMPULSE, GAP_MIN_TOP,
    GAP_BOTTOM_MARGIN, GRAVITY, GROUND_Y, MAX_FALL_SPEED, MENU_BOB_AMPLITUDE, MENU_BOB_FREQ,
    PIPE_DESPAWN_X, PIPE_SPAWN_X, PIPE_W, ROTATION_MAX, ROTATION_MIN, WORLD_H,
};

/// The single authoritative game mode; every subsystem branches on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Menu,
    Playing,
    Paused,
    Crashed,
}

/// Something a tick did that the outside world may want to react to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Scored,
    Crashed,
}

/// What a flap input actually did, so the caller can trigger sound or
/// leaderboard entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlapOutcome {
    /// Menu -> Playing; a fresh run began.
    Started,
    /// Impulse applied mid-run.
    Flapped,
    /// Paused -> Playing.
    Resumed,
    /// Crashed -> Menu after landing; carries the finished run's score.
    ReturnedToMenu { score: u32 },
    Ignored,
}

/// Axis-aligned box in world units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn overlaps(&self, o: &Rect) -> bool {
        !(self.x + self.w < o.x || self.x > o.x + o.w || self.y + self.h < o.y || self.y > o.y + o.h)
    }
}

/// The moving body. Horizontal position and size are fixed by config.
#[derive(Clone, Copy, Debug)]
pub struct Bird {
    pub y: f64,
    pub vy: f64,
    /// Degrees, for the renderer's tilt only.
    pub rotation: f64,
}

impl Bird {
    fn new() -> Self {
        Bird {
            y: BIRD_SPAWN_Y,
            vy: 0.0,
            rotation: 0.0,
        }
    }

    pub fn aabb(&self) -> Rect {
        Rect {
            x: BIRD_X,
            y: self.y,
            w: BIRD_W,
            h: BIRD_H,
        }
    }
}

/// A paired top/bottom obstacle with a vertical gap between the segments.
/// `top + gap + bottom == WORLD_H` always holds.
#[derive(Clone, Copy, Debug)]
pub struct Pipe {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub scored: bool,
}

impl Pipe {
    pub fn spawn<R: Rng>(rng: &mut R, gap: f64) -> Self {
        let top = rng.gen_range(GAP_MIN_TOP..WORLD_H - gap - GAP_BOTTOM_MARGIN);
        Pipe {
            x: PIPE_SPAWN_X,
            top,
            bottom: WORLD_H - top - gap,
            scored: false,
        }
    }

    pub fn top_rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: 0.0,
            w: PIPE_W,
            h: self.top,
        }
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: WORLD_H - self.bottom,
            w: PIPE_W,
            h: self.bottom,
        }
    }
}

/// In-progress leaderboard name entry, shown on the menu after a qualifying
/// run.
#[derive(Clone, Debug)]
pub struct NameEntry {
    pub score: u32,
    pub buf: String,
}

impl NameEntry {
    pub fn push(&mut self, c: char) {
        if self.buf.len() < config::NAME_MAX && (c.is_ascii_graphic() || c == ' ') {
            self.buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buf.pop();
    }
}

/// One game session: all mutable state behind the per-tick update.
pub struct Game {
    pub mode: Mode,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub best: u32,
    pub difficulty: Difficulty,
    pub frame: u64,
    /// Horizontal scroll accumulator for the ground and parallax layers.
    pub ground_x: f64,
    /// Whether the crashed bird has come to rest on the ground.
    pub landed: bool,
    name_entry: Option<NameEntry>,
}

impl Game {
    pub fn new(best: u32) -> Self {
        Game {
            mode: Mode::Menu,
            bird: Bird::new(),
            pipes: Vec::new(),
            score: 0,
            best,
            difficulty: Difficulty::default(),
            frame: 0,
            ground_x: 0.0,
            landed: false,
            name_entry: None,
        }
    }

    /// Flap input: starts, flaps, resumes or returns to the menu depending on
    /// mode. These are the only transitions a flap may cause.
    pub fn flap(&mut self) -> FlapOutcome {
        match self.mode {
            Mode::Menu => {
                if self.name_entry.is_some() {
                    return FlapOutcome::Ignored;
                }
                self.start_run();
                FlapOutcome::Started
            }
            Mode::Playing => {
                self.bird.vy = FLAP_IMPULSE;
                FlapOutcome::Flapped
            }
            Mode::Paused => {
                self.mode = Mode::Playing;
                FlapOutcome::Resumed
            }
            Mode::Crashed => {
                if self.landed {
                    let score = self.score;
                    self.mode = Mode::Menu;
                    self.bird = Bird::new();
                    FlapOutcome::ReturnedToMenu { score }
                } else {
                    FlapOutcome::Ignored
                }
            }
        }
    }

    /// Pause toggle; only flips Playing <-> Paused.
    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            Mode::Playing => Mode::Paused,
            Mode::Paused => Mode::Playing,
            other => other,
        };
    }

    /// Difficulty is menu-only so a run's parameters never change mid-flight.
    pub fn select_difficulty(&mut self, d: Difficulty) {
        if self.mode == Mode::Menu {
            self.difficulty = d;
        }
    }

    pub fn name_entry(&self) -> Option<&NameEntry> {
        self.name_entry.as_ref()
    }

    pub fn begin_name_entry(&mut self, score: u32) {
        self.name_entry = Some(NameEntry {
            score,
            buf: String::new(),
        });
    }

    pub fn name_push(&mut self, c: char) {
        if let Some(entry) = self.name_entry.as_mut() {
            entry.push(c);
        }
    }

    pub fn name_backspace(&mut self) {
        if let Some(entry) = self.name_entry.as_mut() {
            entry.backspace();
        }
    }

    /// Finish name entry, yielding `(name, score)` for the leaderboard.
    pub fn submit_name(&mut self) -> Option<(String, u32)> {
        self.name_entry.take().map(|e| (e.buf, e.score))
    }

    pub fn cancel_name_entry(&mut self) {
        self.name_entry = None;
    }

    fn start_run(&mut self) {
        self.mode = Mode::Playing;
        self.bird = Bird::new();
        self.pipes.clear();
        self.score = 0;
        self.frame = 0;
        self.landed = false;
    }

    /// Advance one fixed timestep. Physics, the obstacle stream and collision
    /// run only in Playing; Menu bobs the bird, Crashed drops it to the
    /// ground, Paused freezes everything.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.mode {
            Mode::Paused => return events,
            Mode::Menu => {
                self.frame += 1;
                let phase = self.frame as f64 * MENU_BOB_FREQ;
                self.bird.y = BIRD_SPAWN_Y + phase.sin() * MENU_BOB_AMPLITUDE;
                self.bird.rotation = phase.sin() * 6.0;
                self.ground_x += 0.5;
            }
            Mode::Playing => {
                self.frame += 1;
                self.playing_tick(rng, &mut events);
            }
            Mode::Crashed => {
                self.frame += 1;
                self.crashed_tick();
            }
        }
        events
    }

    fn playing_tick<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        let speed = self.difficulty.speed();
        let gap = self.difficulty.gap();

        self.bird.vy = (self.bird.vy + GRAVITY).min(MAX_FALL_SPEED);
        self.bird.y += self.bird.vy;
        self.bird.rotation = (self.bird.vy * 3.0 + 5.0).clamp(ROTATION_MIN, ROTATION_MAX);
        self.ground_x += speed;

        if self.frame % self.difficulty.spawn_interval() == 0 {
            self.pipes.push(Pipe::spawn(rng, gap));
        }

        let lead_edge = BIRD_X;
        for pipe in &mut self.pipes {
            pipe.x -= speed;
            if !pipe.scored && pipe.x + PIPE_W < lead_edge {
                pipe.scored = true;
                self.score += 1;
                events.push(GameEvent::Scored);
            }
        }
        self.pipes.retain(|p| p.x + PIPE_W > PIPE_DESPAWN_X);

        let body = self.bird.aabb();
        let pipe_hit = self
            .pipes
            .iter()
            .any(|p| body.overlaps(&p.top_rect()) || body.overlaps(&p.bottom_rect()));
        let ground_hit = self.bird.y + BIRD_H >= GROUND_Y;

        if ground_hit {
            self.bird.y = GROUND_Y - BIRD_H;
        }
        if pipe_hit || ground_hit {
            self.crash();
            events.push(GameEvent::Crashed);
            return;
        }

        // Only the ground and pipes are terminal; the ceiling just stops you.
        if self.bird.y < CEILING_Y {
            self.bird.y = CEILING_Y;
            self.bird.vy = 0.0;
        }
    }

    fn crashed_tick(&mut self) {
        if self.bird.y + BIRD_H >= GROUND_Y {
            self.bird.y = GROUND_Y - BIRD_H;
            self.landed = true;
            return;
        }
        self.bird.vy = (self.bird.vy + GRAVITY).min(MAX_FALL_SPEED);
        self.bird.y += self.bird.vy;
        self.bird.rotation = (self.bird.rotation + 6.0).min(ROTATION_MAX);
    }

    fn crash(&mut self) {
        self.mode = Mode::Crashed;
        self.landed = false;
        if self.score > self.best {
            self.best = self.score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn playing_game() -> Game {
        let mut game = Game::new(0);
        game.flap();
        game
    }

    #[test]
    fn flap_starts_run_from_menu() {
        let mut game = Game::new(0);
        assert_eq!(game.mode, Mode::Menu);
        assert_eq!(game.flap(), FlapOutcome::Started);
        assert_eq!(game.mode, Mode::Playing);
        assert_eq!(game.score, 0);
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn flap_applies_upward_impulse() {
        let mut game = playing_game();
        game.flap();
        assert!(game.bird.vy < 0.0);
    }

    #[test]
    fn gravity_pulls_bird_down() {
        let mut game = playing_game();
        let y0 = game.bird.y;
        game.update(&mut thread_rng());
        assert!(game.bird.y > y0);
    }

    #[test]
    fn fall_speed_is_clamped() {
        let mut game = playing_game();
        game.bird.vy = 100.0;
        game.bird.y = 100.0;
        game.update(&mut thread_rng());
        assert!(game.bird.vy <= MAX_FALL_SPEED);
    }

    #[test]
    fn ceiling_clamps_without_crashing() {
        let mut game = playing_game();
        game.bird.y = CEILING_Y - 5.0;
        game.bird.vy = -9.0;
        game.update(&mut thread_rng());
        assert_eq!(game.mode, Mode::Playing);
        assert!(game.bird.y >= CEILING_Y);
        assert_eq!(game.bird.vy, 0.0);
    }

    #[test]
    fn ground_contact_crashes_and_clamps() {
        let mut game = playing_game();
        game.bird.y = GROUND_Y - BIRD_H - 1.0;
        game.bird.vy = MAX_FALL_SPEED;
        let events = game.update(&mut thread_rng());
        assert_eq!(game.mode, Mode::Crashed);
        assert!(events.contains(&GameEvent::Crashed));
        assert_eq!(game.bird.y, GROUND_Y - BIRD_H);
    }

    #[test]
    fn pipe_overlap_crashes() {
        let mut game = playing_game();
        game.pipes.push(Pipe {
            x: BIRD_X,
            top: 400.0,
            bottom: WORLD_H - 400.0 - 160.0,
            scored: false,
        });
        // Bird well inside the top segment.
        game.bird.y = 100.0;
        game.bird.vy = 0.0;
        let events = game.update(&mut thread_rng());
        assert_eq!(game.mode, Mode::Crashed);
        assert!(events.contains(&GameEvent::Crashed));
    }

    #[test]
    fn bird_in_gap_survives() {
        let mut game = playing_game();
        game.pipes.push(Pipe {
            x: BIRD_X,
            top: 200.0,
            bottom: WORLD_H - 200.0 - 160.0,
            scored: false,
        });
        game.bird.y = 250.0;
        game.bird.vy = 0.0;
        game.update(&mut thread_rng());
        assert_eq!(game.mode, Mode::Playing);
    }

    #[test]
    fn score_fires_once_per_pipe() {
        let mut game = playing_game();
        // Trailing edge one step short of the bird's leading edge.
        game.pipes.push(Pipe {
            x: BIRD_X - PIPE_W - 1.0,
            top: 60.0,
            bottom: WORLD_H - 60.0 - 190.0,
            scored: false,
        });
        game.bird.y = 150.0;
        let mut scores = 0;
        for _ in 0..10 {
            game.bird.y = 150.0; // keep it clear of the gap edges
            game.bird.vy = 0.0;
            let events = game.update(&mut thread_rng());
            scores += events.iter().filter(|e| **e == GameEvent::Scored).count();
        }
        assert_eq!(scores, 1);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn spawned_pipes_partition_world_height() {
        let mut rng = thread_rng();
        for d in Difficulty::ALL {
            for _ in 0..100 {
                let pipe = Pipe::spawn(&mut rng, d.gap());
                assert!(pipe.top > 0.0);
                assert!(pipe.bottom > 0.0);
                assert!((pipe.top + d.gap() + pipe.bottom - WORLD_H).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn pause_freezes_everything() {
        let mut game = playing_game();
        game.update(&mut thread_rng());
        game.toggle_pause();
        assert_eq!(game.mode, Mode::Paused);
        let snapshot = (game.bird.y, game.frame, game.score, game.pipes.len());
        for _ in 0..30 {
            assert!(game.update(&mut thread_rng()).is_empty());
        }
        assert_eq!(
            snapshot,
            (game.bird.y, game.frame, game.score, game.pipes.len())
        );
        game.toggle_pause();
        assert_eq!(game.mode, Mode::Playing);
    }

    #[test]
    fn pause_toggle_ignored_outside_play() {
        let mut game = Game::new(0);
        game.toggle_pause();
        assert_eq!(game.mode, Mode::Menu);
    }

    #[test]
    fn crashed_bird_falls_then_returns_to_menu() {
        let mut game = playing_game();
        game.bird.y = 100.0;
        game.pipes.push(Pipe {
            x: BIRD_X,
            top: 400.0,
            bottom: WORLD_H - 400.0 - 160.0,
            scored: false,
        });
        game.update(&mut thread_rng());
        assert_eq!(game.mode, Mode::Crashed);

        // Mid-air: flap is ignored until it lands.
        assert_eq!(game.flap(), FlapOutcome::Ignored);
        for _ in 0..200 {
            game.update(&mut thread_rng());
        }
        assert!(game.landed);
        assert_eq!(game.flap(), FlapOutcome::ReturnedToMenu { score: 0 });
        assert_eq!(game.mode, Mode::Menu);
    }

    #[test]
    fn best_updates_on_crash() {
        let mut game = playing_game();
        game.score = 7;
        game.best = 3;
        game.bird.y = GROUND_Y;
        game.update(&mut thread_rng());
        assert_eq!(game.best, 7);
    }

    #[test]
    fn difficulty_locked_outside_menu() {
        let mut game = Game::new(0);
        game.select_difficulty(Difficulty::Hard);
        assert_eq!(game.difficulty, Difficulty::Hard);
        game.flap();
        game.select_difficulty(Difficulty::Easy);
        assert_eq!(game.difficulty, Difficulty::Hard);
    }

    #[test]
    fn name_entry_caps_length_and_blocks_start() {
        let mut game = Game::new(0);
        game.begin_name_entry(12);
        for c in "ABCDEFGHIJKLMNOP".chars() {
            game.name_push(c);
        }
        assert_eq!(game.name_entry().unwrap().buf.len(), config::NAME_MAX);
        assert_eq!(game.flap(), FlapOutcome::Ignored);
        let (name, score) = game.submit_name().unwrap();
        assert_eq!(name, "ABCDEFGHIJKL");
        assert_eq!(score, 12);
        assert!(game.name_entry().is_none());
    }

    #[test]
    fn menu_bird_bobs_idle() {
        let mut game = Game::new(0);
        let mut ys = Vec::new();
        for _ in 0..60 {
            game.update(&mut thread_rng());
            ys.push(game.bird.y);
        }
        assert!(ys.iter().any(|y| *y > BIRD_SPAWN_Y));
        assert!(ys.iter().any(|y| *y < BIRD_SPAWN_Y));
        assert_eq!(game.mode, Mode::Menu);
    }
}
