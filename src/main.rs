use std::io::{self, stdout};
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, terminal,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use floppy_tui::audio::AudioEngine;
use floppy_tui::config::{Difficulty, FRAME_MS};
use floppy_tui::game::{FlapOutcome, Game, GameEvent, Mode};
use floppy_tui::leaderboard::{ScoreBoard, ScoreStore};
use floppy_tui::pixel::PixelBuf;
use floppy_tui::render;

fn main() -> io::Result<()> {
    let store = ScoreStore::open()?;
    let mut board = store.load();
    let mut game = Game::new(board.best);
    let mut audio = AudioEngine::new();
    let mut rng = StdRng::from_entropy();

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);

    let frame_dur = Duration::from_millis(FRAME_MS);

    loop {
        let frame_start = Instant::now();

        // Drain all pending input before the tick.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if game.name_entry().is_some() {
                        handle_name_key(key.code, &mut game, &mut board, &store);
                    } else {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                cleanup(&mut out)?;
                                return Ok(());
                            }
                            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                                handle_flap(&mut game, &board, &audio);
                            }
                            KeyCode::Char('p') => game.toggle_pause(),
                            KeyCode::Char('1') => game.select_difficulty(Difficulty::Easy),
                            KeyCode::Char('2') => game.select_difficulty(Difficulty::Normal),
                            KeyCode::Char('3') => game.select_difficulty(Difficulty::Hard),
                            KeyCode::Char('m') => audio.toggle_mute(),
                            KeyCode::Char('+') | KeyCode::Char('=') => audio.volume_up(),
                            KeyCode::Char('-') => audio.volume_down(),
                            _ => {}
                        }
                    }
                }
                Event::Resize(c, r) => {
                    buf.resize(c as usize, r as usize * 2);
                }
                _ => {}
            }
        }

        for ev in game.update(&mut rng) {
            match ev {
                GameEvent::Scored => audio.play_score(),
                GameEvent::Crashed => {
                    audio.play_crash();
                    if board.record_best(game.score) {
                        let _ = store.save(&board);
                    }
                }
            }
        }

        audio.set_music_active(game.mode == Mode::Playing);
        audio.tick();

        render::draw_frame(&game, &board, audio.is_muted(), audio.volume(), &mut buf);
        buf.present(&mut out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn handle_flap(game: &mut Game, board: &ScoreBoard, audio: &AudioEngine) {
    match game.flap() {
        FlapOutcome::Flapped => audio.play_flap(),
        FlapOutcome::ReturnedToMenu { score } => {
            if board.qualifies(score) {
                game.begin_name_entry(score);
            }
        }
        FlapOutcome::Started | FlapOutcome::Resumed | FlapOutcome::Ignored => {}
    }
}

fn handle_name_key(code: KeyCode, game: &mut Game, board: &mut ScoreBoard, store: &ScoreStore) {
    match code {
        KeyCode::Enter => {
            if let Some((name, score)) = game.submit_name() {
                board.insert(&name, score, Utc::now());
                let _ = store.save(board);
            }
        }
        KeyCode::Esc => game.cancel_name_entry(),
        KeyCode::Backspace => game.name_backspace(),
        KeyCode::Char(c) => game.name_push(c),
        _ => {}
    }
}
