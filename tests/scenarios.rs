use glam::Vec2;
use std::f32::consts::FRAC_PI_3;

use raycast_rs::{
    engine::{MAX_DEPTH, Palette, Screen, Side, build_frame, cast, find_path},
    renderer::{DrawCall, RendererExt, Software},
    settings::Settings,
    sim::{InputCmd, Outcome, TicRunner},
    world::{Camera, Cell, Grid, GridError, Level, TextureBank, maps},
};

fn small_settings() -> Settings {
    Settings {
        width: 96,
        height: 64,
        ..Settings::default()
    }
}

#[test]
fn five_by_five_room_path_and_centre_ray() {
    let grid = Grid::from_blocked(&[
        [true, true, true, true, true],
        [true, false, false, false, true],
        [true, false, false, false, true],
        [true, false, false, false, true],
        [true, true, true, true, true],
    ])
    .unwrap();

    let path = find_path(&grid, Cell::new(1, 1), Cell::new(3, 3), |_| false).unwrap();
    assert_eq!(path.len(), 4);
    assert_eq!(*path.last().unwrap(), Cell::new(3, 3));

    let cam = Camera::new(Vec2::new(2.5, 2.5), 0.0, FRAC_PI_3);
    let depth = cast(&cam, &grid, 101, MAX_DEPTH).unwrap();
    let centre = depth[50].unwrap();
    assert_eq!(centre.perp_distance, 4.0 - 2.5);
    assert_eq!(centre.side, Side::Vertical);
}

#[test]
fn corridor_shootout_ends_in_victory() {
    let level = Level::parse("corridor", "11111111\n1P....s1\n11111111\n").unwrap();
    let mut sim = TicRunner::new(&level, &small_settings());
    let fire = InputCmd {
        fire: true,
        ..Default::default()
    };

    let mut tics = 0;
    while sim.outcome().is_none() && tics < 600 {
        let frame = sim.tick(&level, &fire).unwrap();
        assert_eq!(frame.depth.len(), small_settings().rays());
        tics += 1;
    }
    assert_eq!(sim.outcome(), Some(Outcome::Victory));
    assert_eq!(sim.enemies_alive(), 0);
    // two shots with one reload in between
    assert!(tics > 24 && tics < 60, "took {tics} tics");
    assert!(sim.player().health > 0);
}

#[test]
fn idle_player_is_eventually_defeated_deterministically() {
    let level = Level::parse("pit", "111111\n1P...1\n1....1\n1...y1\n111111\n").unwrap();
    let run = || {
        let mut sim = TicRunner::new(&level, &small_settings());
        let idle = InputCmd::default();
        let mut tics = 0u32;
        while sim.outcome().is_none() && tics < 20_000 {
            sim.tick(&level, &idle).unwrap();
            tics += 1;
        }
        (sim.outcome(), tics)
    };
    let (outcome, tics) = run();
    assert_eq!(outcome, Some(Outcome::Defeat));
    assert_eq!(run(), (outcome, tics));
}

#[test]
fn builtin_map_renders_a_full_frame() {
    let level = maps::by_name("e1m1").unwrap().unwrap();
    let settings = small_settings();
    let mut sim = TicRunner::new(&level, &settings);
    let frame = sim.tick(&level, &InputCmd::default()).unwrap();

    let screen = Screen::new(settings.width, settings.height);
    let bank = TextureBank::builtin();
    let calls = build_frame(
        &frame.camera,
        &screen,
        &frame.depth,
        &sim.sprites(),
        Some(sim.weapon().sprite()),
        Palette::default(),
        &bank,
    );
    assert!(matches!(calls.first(), Some(DrawCall::Background { .. })));
    assert!(matches!(calls.last(), Some(DrawCall::Overlay(_))));

    let mut pixels = 0;
    Software::default().draw_frame(settings.width, settings.height, &calls, &bank, |fb, w, h| {
        assert_eq!(fb.len(), w * h);
        pixels = fb.len();
    });
    assert_eq!(pixels, 96 * 64);
}

#[test]
fn malformed_maps_are_reported() {
    assert_eq!(
        Level::parse("ragged", "1111\n1P1\n1111").unwrap_err(),
        GridError::Ragged {
            row: 1,
            expected: 4,
            found: 3
        }
    );
    let grid = Grid::bordered(4, 4, 1);
    let cam = Camera::new(Vec2::new(9.0, 1.5), 0.0, FRAC_PI_3);
    assert!(matches!(
        cast(&cam, &grid, 4, MAX_DEPTH),
        Err(GridError::OutOfBounds { .. })
    ));
}
