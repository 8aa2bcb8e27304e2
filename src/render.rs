//! Frame painting: world-space scene scaled onto the pixel buffer, plus the
//! HUD and the menu / paused / game-over overlays.

use crate::config::{BIRD_H, BIRD_W, BIRD_X, GROUND_Y, PIPE_W, WORLD_H, WORLD_W};
use crate::font;
use crate::game::{Game, Mode};
use crate::leaderboard::ScoreBoard;
use crate::pixel::{PixelBuf, Rgb};

// ── Palette ─────────────────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const CLOUD: Rgb = Rgb(244, 250, 252);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);
const GAME_OVER_RED: Rgb = Rgb(255, 107, 107);
const PANEL_LIGHT: Rgb = Rgb(220, 195, 120);

// ── World-to-pixel mapping ──────────────────────────────────────────────────

/// The simulation runs in fixed 480x700 world units; the view maps them onto
/// whatever the buffer currently is, so terminal resizes never touch physics.
struct View {
    sx: f64,
    sy: f64,
    pw: i32,
    ph: i32,
}

impl View {
    fn new(buf: &PixelBuf) -> Self {
        View {
            sx: buf.width() as f64 / WORLD_W,
            sy: buf.height() as f64 / WORLD_H,
            pw: buf.width() as i32,
            ph: buf.height() as i32,
        }
    }

    fn x(&self, wx: f64) -> i32 {
        (wx * self.sx).round() as i32
    }

    fn y(&self, wy: f64) -> i32 {
        (wy * self.sy).round() as i32
    }
}

/// Paint one complete frame of the current game state.
pub fn draw_frame(game: &Game, board: &ScoreBoard, muted: bool, volume: f32, buf: &mut PixelBuf) {
    let view = View::new(buf);

    draw_sky(buf, &view);
    draw_clouds(buf, &view, game.frame);
    draw_hills(buf, &view, game.ground_x);
    draw_pipes(buf, &view, game);
    draw_ground(buf, &view, game.ground_x);
    draw_bird(buf, &view, game);

    font::draw_number(buf, view.pw / 2, 4, game.score, WHITE);
    if muted {
        font::draw_text(buf, view.pw - font::text_width("MUTED", 1) - 2, 2, "MUTED", SHADOW, 1);
    }

    match game.mode {
        Mode::Menu => draw_menu(game, board, volume, buf, &view),
        Mode::Paused => draw_paused(buf, &view),
        Mode::Crashed if game.landed => draw_game_over(game, buf, &view),
        _ => {}
    }
}

// ── Scenery ─────────────────────────────────────────────────────────────────

fn draw_sky(buf: &mut PixelBuf, view: &View) {
    let gy = view.y(GROUND_Y).max(1);
    for y in 0..gy {
        let t = (y * 256 / gy) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in 0..view.pw {
            buf.set(x, y, c);
        }
    }
}

fn draw_clouds(buf: &mut PixelBuf, view: &View, frame: u64) {
    for i in 0..4i32 {
        let wx = (frame as f64 * 0.3 + i as f64 * 220.0) % (WORLD_W + 200.0) - 100.0 - i as f64 * 60.0;
        let wy = 90.0 + (i % 2) as f64 * 18.0;
        let cx = view.x(wx);
        let cy = view.y(wy);
        fill_blob(buf, cx, cy, view.x(46.0).max(3), view.y(22.0).max(1), CLOUD);
        fill_blob(buf, cx + view.x(30.0), cy - 1, view.x(36.0).max(2), view.y(18.0).max(1), CLOUD);
        fill_blob(buf, cx - view.x(30.0), cy - 1, view.x(36.0).max(2), view.y(18.0).max(1), CLOUD);
    }
}

/// Filled ellipse with radii `rx`/`ry`.
fn fill_blob(buf: &mut PixelBuf, cx: i32, cy: i32, rx: i32, ry: i32, c: Rgb) {
    for dy in -ry..=ry {
        for dx in -rx..=rx {
            let fx = dx as f64 / rx.max(1) as f64;
            let fy = dy as f64 / ry.max(1) as f64;
            if fx * fx + fy * fy <= 1.0 {
                buf.set(cx + dx, cy + dy, c);
            }
        }
    }
}

fn draw_hills(buf: &mut PixelBuf, view: &View, ground_x: f64) {
    let base = view.y(GROUND_Y);
    for x in 0..view.pw {
        let wx = x as f64 / view.sx;
        let far = (wx + ground_x * 1.2) * 0.008;
        let h = far.sin() * 42.0 + (far * 1.7).sin() * 21.0;
        let top = base - view.y(h.max(0.0) + 28.0);
        for y in top..base {
            buf.set(x, y, HILL_FAR);
        }
    }
    for x in 0..view.pw {
        let wx = x as f64 / view.sx;
        let near = (wx + ground_x * 2.4) * 0.012;
        let h = near.sin() * 28.0 + (near * 2.3).sin() * 14.0;
        let top = base - view.y(h.max(0.0) + 14.0);
        for y in top..base {
            buf.set(x, y, HILL_NEAR);
        }
    }
}

fn draw_pipes(buf: &mut PixelBuf, view: &View, game: &Game) {
    let cap_h = view.y(18.0).max(2);
    let cap_extra = view.x(6.0).max(1);
    let ground = view.y(GROUND_Y);

    for pipe in &game.pipes {
        let px = view.x(pipe.x);
        let pw = (view.x(pipe.x + PIPE_W) - px).max(2);
        let gap_top = view.y(pipe.top);
        let gap_bot = view.y(WORLD_H - pipe.bottom);

        // Bodies.
        for x in 0..pw {
            let c = pipe_shade(x, pw);
            for y in 0..(gap_top - cap_h) {
                buf.set(px + x, y, c);
            }
            for y in (gap_bot + cap_h)..ground {
                buf.set(px + x, y, c);
            }
        }
        // Caps stick out a little on both sides, with darkened lips.
        for x in -cap_extra..(pw + cap_extra) {
            let c = pipe_shade(x + cap_extra, pw + cap_extra * 2);
            for y in (gap_top - cap_h)..gap_top {
                buf.set(px + x, y, c);
            }
            for y in gap_bot..(gap_bot + cap_h) {
                buf.set(px + x, y, c);
            }
            buf.set(px + x, gap_top - cap_h, CAP_DARK);
            buf.set(px + x, gap_top - 1, CAP_DARK);
            buf.set(px + x, gap_bot, CAP_DARK);
            buf.set(px + x, gap_bot + cap_h - 1, CAP_DARK);
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn draw_ground(buf: &mut PixelBuf, view: &View, ground_x: f64) {
    let gy = view.y(GROUND_Y);
    let scroll = (ground_x * view.sx) as i32;
    for x in 0..view.pw {
        let alt = (x + scroll) / 3 % 2 == 0;
        buf.set(x, gy, if alt { GRASS } else { GRASS_LIGHT });
        buf.set(x, gy + 1, GRASS);
    }
    for y in (gy + 2)..view.ph {
        for x in 0..view.pw {
            let stripe = ((x + scroll * 4 / 5) + (y - gy) * 2).rem_euclid(12) < 6;
            buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
}

// ── Bird ────────────────────────────────────────────────────────────────────

fn draw_bird(buf: &mut PixelBuf, view: &View, game: &Game) {
    let cx = view.x(BIRD_X + BIRD_W / 2.0);
    let cy = view.y(game.bird.y + BIRD_H / 2.0);
    let hw = view.x(BIRD_W / 2.0).max(2);
    let hh = view.y(BIRD_H / 2.0).max(1);

    // The rotation angle only tilts the sprite a few pixels.
    let tilt = (game.bird.rotation / 30.0).round().clamp(-1.0, 3.0) as i32;

    // Body and top highlight.
    buf.fill_rect(cx - hw, cy - hh, hw * 2 + 1, hh * 2, BIRD_Y);
    buf.fill_rect(cx - hw + 1, cy - hh, hw * 2 - 2, 1, BIRD_HI);

    // Wing on an eight-frame flap cycle.
    let wing_y = if game.frame % 8 < 4 { -1 } else { 1 };
    buf.fill_rect(cx - hw + 1, cy + wing_y + tilt.min(1), hw.max(2) - 1, hh.max(1), BIRD_WING);

    // Eye.
    let ex = cx + hw - 2;
    let ey = cy - hh;
    buf.fill_rect(ex, ey, 2, 2, BIRD_EYE);
    buf.set(ex + 1, ey + 1, BIRD_PUPIL);

    // Two-tone beak, following the tilt.
    let by = cy - 1 + tilt;
    buf.fill_rect(cx + hw, by, 3, 1, BIRD_BEAK_HI);
    buf.fill_rect(cx + hw, by + 1, 3, 1, BIRD_BEAK);

    // Tail.
    buf.fill_rect(cx - hw - 2, cy - 1 + tilt, 2, 2, BIRD_WING);
}

// ── Overlays ────────────────────────────────────────────────────────────────

fn draw_menu(game: &Game, board: &ScoreBoard, volume: f32, buf: &mut PixelBuf, view: &View) {
    let cx = view.pw / 2;
    let title_scale = if view.pw >= 160 { 3 } else { 2 };
    let mut y = view.ph / 8;

    font::draw_text_centered(buf, cx, y, "FLOPPY", BIRD_Y, title_scale);
    y += font::GLYPH_H * title_scale + 4;
    font::draw_text_centered(buf, cx, y, "SPACE TO FLAP", WHITE, 1);
    y += font::GLYPH_H + 3;
    font::draw_text_centered(buf, cx, y, game.difficulty.name(), WHITE, 1);
    y += font::GLYPH_H + 2;
    font::draw_text_centered(buf, cx, y, "1-3 DIFFICULTY", SHADOW, 1);
    y += font::GLYPH_H + 3;

    let best = format!("BEST {}", game.best);
    font::draw_text_centered(buf, cx, y, &best, BIRD_HI, 1);
    y += font::GLYPH_H + 4;

    // Top runs, when there is room above the ground.
    let line_h = font::GLYPH_H + 2;
    let board_rows = board.top(5).len() as i32;
    if board_rows > 0 && y + (board_rows + 1) * line_h < view.y(GROUND_Y) - 2 {
        font::draw_text_centered(buf, cx, y, "TOP SCORES", WHITE, 1);
        y += line_h;
        for entry in board.top(5) {
            let line = format!("{} {}", entry.name, entry.score);
            font::draw_text_centered(buf, cx, y, &line, PANEL_LIGHT, 1);
            y += line_h;
        }
    }

    let vol = format!("VOL {:02}  M MUTE  P PAUSE  Q QUIT", (volume * 100.0).round() as u32);
    font::draw_text_centered(buf, cx, view.ph - font::GLYPH_H - 2, &vol, SHADOW, 1);

    if game.name_entry().is_some() {
        draw_name_prompt(game, buf, view);
    }
}

fn draw_name_prompt(game: &Game, buf: &mut PixelBuf, view: &View) {
    let Some(entry) = game.name_entry() else {
        return;
    };
    let cx = view.pw / 2;
    let cy = view.ph / 2;
    let panel_w = (font::text_width("ENTER SAVE - ESC SKIP", 1) + 12).max(view.pw / 2);
    let panel_h = 6 * (font::GLYPH_H + 2) + 4;
    draw_panel(buf, cx, cy, panel_w, panel_h);

    let mut y = cy - panel_h / 2 + 3;
    font::draw_text_centered(buf, cx, y, "NEW HIGH SCORE", BIRD_BEAK, 1);
    y += font::GLYPH_H + 2;
    font::draw_number(buf, cx, y, entry.score, WHITE);
    y += font::GLYPH_H + 4;
    font::draw_text_centered(buf, cx, y, "YOUR NAME", SHADOW, 1);
    y += font::GLYPH_H + 2;
    let typed = format!("{}_", entry.buf);
    font::draw_text_centered(buf, cx, y, &typed, WHITE, 1);
    y += font::GLYPH_H + 4;
    font::draw_text_centered(buf, cx, y, "ENTER SAVE - ESC SKIP", SHADOW, 1);
}

fn draw_paused(buf: &mut PixelBuf, view: &View) {
    buf.dim_all();
    let cx = view.pw / 2;
    let cy = view.ph / 2;
    font::draw_text_centered(buf, cx, cy - font::GLYPH_H * 2, "PAUSED", WHITE, 2);
    font::draw_text_centered(buf, cx, cy + font::GLYPH_H, "P TO RESUME", PANEL_LIGHT, 1);
}

fn draw_game_over(game: &Game, buf: &mut PixelBuf, view: &View) {
    buf.dim_all();
    let cx = view.pw / 2;
    let cy = view.ph / 2;
    let panel_w = (font::text_width("SPACE FOR MENU", 1) + 12).max(view.pw / 3);
    let panel_h = 5 * (font::GLYPH_H + 2) + 6;
    draw_panel(buf, cx, cy, panel_w, panel_h);

    let mut y = cy - panel_h / 2 + 3;
    font::draw_text_centered(buf, cx, y, "GAME OVER", GAME_OVER_RED, 1);
    y += font::GLYPH_H + 3;
    font::draw_number(buf, cx, y, game.score, WHITE);
    y += font::GLYPH_H + 2;
    let best = format!("BEST {}", game.best);
    font::draw_text_centered(buf, cx, y, &best, BIRD_Y, 1);
    y += font::GLYPH_H + 4;
    font::draw_text_centered(buf, cx, y, "SPACE FOR MENU", SHADOW, 1);
}

/// Bordered wooden panel shared by the overlays.
fn draw_panel(buf: &mut PixelBuf, cx: i32, cy: i32, w: i32, h: i32) {
    let px = cx - w / 2;
    let py = cy - h / 2;
    buf.fill_rect(px - 1, py - 1, w + 2, h + 2, SHADOW);
    buf.fill_rect(px, py, w, h, DIRT);
    buf.fill_rect(px + 1, py + 1, w - 2, h - 2, PANEL_LIGHT);
}
