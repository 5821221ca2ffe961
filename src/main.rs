//! Playable demo.
//!
//! ```bash
//! cargo run --release -- --map e1m1
//! cargo run --release -- --map path/to/level.txt --config settings.json
//! ```
//!
//! WASD / arrows move, mouse or ←/→ turn, Shift runs, Ctrl or left click
//! fires, Tab toggles the top-down view, Enter restarts after the round.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use clap::Parser;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use raycast_rs::{
    engine::{DepthBuffer, Screen, build_frame},
    renderer::{DrawCall, RendererExt, Software},
    settings::Settings,
    sim::{Enemy, Frame, InputCmd, Outcome, Position, TicRunner},
    world::{Camera, Cell, Level, TextureBank, maps},
};

#[derive(Parser, Debug)]
#[command(about = "Grid ray-casting shooter")]
struct Args {
    /// Built-in map name or path to a text map.
    #[arg(short, long, default_value = "e1m1")]
    map: String,

    /// JSON settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// RNG seed for enemy accuracy rolls.
    #[arg(long)]
    seed: Option<u64>,

    /// Start in the top-down debug view.
    #[arg(long)]
    top_down: bool,
}

fn load_level(map: &str) -> anyhow::Result<Level> {
    if let Some(parsed) = maps::by_name(map) {
        return Ok(parsed?);
    }
    let level = Level::from_file(map).with_context(|| format!("loading map `{map}`"))?;
    Ok(level)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ─────────── parse CLI ────────────
    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(w) = args.width {
        settings.width = w;
    }
    if let Some(h) = args.height {
        settings.height = h;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings.validate()?;

    // ─────────── load map ───────
    let level = load_level(&args.map)?;
    if level.grid.width() < 3 || level.grid.height() < 3 {
        bail!("map `{}` is too small", level.name);
    }
    log::info!(
        "map `{}` {}×{}, {} rays",
        level.name,
        level.grid.width(),
        level.grid.height(),
        settings.rays()
    );

    let (w, h) = (settings.width, settings.height);
    let screen = Screen::new(w, h);
    let bank = TextureBank::builtin();
    let mut sim = TicRunner::new(&level, &settings);
    let mut renderer = Software::default();
    let mut top_down = args.top_down;

    let mut win = Window::new("raycast_rs", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut frame: Option<Frame> = None;
    let mut mouse_x: Option<f32> = None;
    let mut reported: Option<Outcome> = None;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- build one InputCmd per frame --------------------- */
        let mut cmd = InputCmd::default();
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            cmd.forward += 1.0;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            cmd.forward -= 1.0;
        }
        if win.is_key_down(Key::A) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::D) {
            cmd.strafe += 1.0;
        }
        if win.is_key_down(Key::Left) {
            cmd.turn -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.turn += 1.0;
        }
        if let Some((mx, _)) = win.get_mouse_pos(MouseMode::Pass) {
            if let Some(prev) = mouse_x {
                cmd.look = (mx - prev) * settings.mouse_sensitivity;
            }
            mouse_x = Some(mx);
        }
        cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
        cmd.fire = win.is_key_down(Key::LeftCtrl)
            || win.is_key_down(Key::RightCtrl)
            || win.get_mouse_down(MouseButton::Left);

        if win.is_key_pressed(Key::Tab, KeyRepeat::No) {
            top_down = !top_down;
        }

        /* --------------- simulate ----------------------------------------- */
        match sim.outcome() {
            None => {
                if let Some(f) = sim.pump(&level, &cmd)? {
                    frame = Some(f);
                }
            }
            Some(outcome) => {
                if reported != Some(outcome) {
                    log::info!("{outcome:?} after {} tics, Enter restarts", sim.tic_count());
                    win.set_title(&format!("raycast_rs: {outcome:?} (Enter restarts)"));
                    reported = Some(outcome);
                }
                if win.is_key_pressed(Key::Enter, KeyRepeat::No) {
                    sim = TicRunner::new(&level, &settings);
                    win.set_title("raycast_rs");
                    reported = None;
                    frame = None;
                }
            }
        }
        let Some(f) = &frame else {
            win.update();
            continue;
        };

        /* --------------- draw --------------------------------------------- */
        let mut shown = Ok(());
        if top_down {
            let buf = draw_top_down(&level, &sim, &f.camera, &f.depth, w, h);
            shown = win.update_with_buffer(&buf, w, h);
        } else {
            let calls: Vec<DrawCall> = build_frame(
                &f.camera,
                &screen,
                &f.depth,
                &sim.sprites(),
                Some(sim.weapon().sprite()),
                settings.palette(),
                &bank,
            );
            renderer.draw_frame(w, h, &calls, &bank, |fb, w, h| {
                shown = win.update_with_buffer(fb, w, h);
            });
        }
        shown?;

        acc_time += t0.elapsed();
        acc_frames += 1;
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::debug!(
                "avg frame: {:.2} ms ({:.1} FPS), health {}, enemies {}",
                avg_ms,
                1000.0 / avg_ms,
                sim.player().health,
                sim.enemies_alive()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/*───────────────────────────────────────────────────────────────────────*/
/*                           Top-down debug view                         */
/*───────────────────────────────────────────────────────────────────────*/

fn draw_top_down(
    level: &Level,
    sim: &TicRunner,
    cam: &Camera,
    depth: &DepthBuffer,
    w: usize,
    h: usize,
) -> Vec<u32> {
    let grid = &level.grid;
    let scale = (w / grid.width()).min(h / grid.height()).max(1) as f32;
    let to_screen = |x: f32, y: f32| ((x * scale) as i32, (y * scale) as i32);

    let mut buf = vec![0xFF_101010u32; w * h];

    // ─────────── walls ────────────
    for (c, _) in grid.cells().filter(|&(c, _)| grid.blocked(c)) {
        let (x0, y0) = to_screen(c.x as f32, c.y as f32);
        let s = scale as i32;
        fill_rect(&mut buf, w, h, x0, y0, s - 1, s - 1, 0xFF_606060);
    }

    // ─────────── rays ────────────
    let (px, py) = to_screen(cam.pos.x, cam.pos.y);
    for (col, hit) in depth.iter().enumerate() {
        let angle = depth.angle(col);
        let euclid = match hit {
            Some(r) => r.perp_distance / (angle - cam.yaw).cos(),
            None => depth.max_depth(),
        };
        let end = cam.pos + glam::Vec2::from_angle(angle) * euclid;
        let (ex, ey) = to_screen(end.x, end.y);
        draw_line(&mut buf, w, h, px, py, ex, ey, 0xFF_C8B040);
    }

    // ─────────── enemies & their paths ────────────
    for (_, (pos, enemy)) in sim.world().query::<(&Position, &Enemy)>().iter() {
        let (ex, ey) = to_screen(pos.0.x, pos.0.y);
        let colour = if enemy.alive() { 0xFF_E03030 } else { 0xFF_602020 };
        fill_rect(&mut buf, w, h, ex - 3, ey - 3, 6, 6, colour);

        let mut prev = (ex, ey);
        for c in &enemy.path {
            let p = Cell::center(*c);
            let next = to_screen(p.x, p.y);
            draw_line(&mut buf, w, h, prev.0, prev.1, next.0, next.1, 0xFF_30A0E0);
            prev = next;
        }
    }

    fill_rect(&mut buf, w, h, px - 3, py - 3, 6, 6, 0xFF_30E030);
    buf
}

#[allow(clippy::too_many_arguments)]
fn fill_rect(buf: &mut [u32], w: usize, h: usize, x: i32, y: i32, rw: i32, rh: i32, colour: u32) {
    for yy in y.max(0)..(y + rh).min(h as i32) {
        for xx in x.max(0)..(x + rw).min(w as i32) {
            buf[yy as usize * w + xx as usize] = colour;
        }
    }
}

/// Integer Bresenham line‑drawing algorithm.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
