mod common;

use common::{playing_game, quiet_config, seeded_rng};
use junk_food_attack::collaborators::{LoginForm, MenuScreen, Renderer};
use junk_food_attack::display::{TerminalRenderer, Viewport};
use junk_food_attack::entities::GameStatus;

fn render(renderer: TerminalRenderer<Vec<u8>>) -> String {
    String::from_utf8(renderer.into_inner()).unwrap()
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn viewport_maps_corners_inside_border() {
    let vp = Viewport::new(82, 24);
    assert_eq!(vp.cell(0.0, 0.0, 750.0, 750.0), Some((1, 2)));
    assert_eq!(vp.cell(749.0, 749.0, 750.0, 750.0), Some((80, 21)));
}

#[test]
fn viewport_skips_positions_off_the_playfield() {
    let vp = Viewport::new(82, 24);
    assert_eq!(vp.cell(10.0, -1.0, 750.0, 750.0), None);
    assert_eq!(vp.cell(750.0, 10.0, 750.0, 750.0), None);
}

#[test]
fn viewport_has_a_minimum_size() {
    assert_eq!(Viewport::new(0, 0), Viewport::new(10, 8));
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn playing_frame_shows_hud() {
    let game = playing_game(quiet_config());
    let mut r = TerminalRenderer::new(Vec::new(), 82, 24);
    r.draw(&game.snapshot()).unwrap();
    let out = render(r);
    assert!(out.contains("Lives: 5"));
    assert!(out.contains("Score: 0"));
    assert!(out.contains("Level: 1"));
    assert!(!out.contains("You Lost!!"));
}

#[test]
fn lost_frame_shows_overlay() {
    let mut game = playing_game(quiet_config());
    game.state_mut().run.lives = 1;
    game.state_mut().run.score = 7;
    game.state_mut().enemies[0].y = 751.0;
    game.tick(&mut seeded_rng());
    assert_eq!(game.status(), GameStatus::Lost);

    let mut r = TerminalRenderer::new(Vec::new(), 82, 24);
    r.draw(&game.snapshot()).unwrap();
    let out = render(r);
    assert!(out.contains("You Lost!!"));
    assert!(out.contains("Final Score: 7"));
    assert!(out.contains("Menu in 5s"));
}

#[test]
fn menu_shows_login_form_when_logged_out() {
    let form = LoginForm {
        error: Some("Login error: incorrect username or password".to_string()),
        ..LoginForm::default()
    };
    let mut r = TerminalRenderer::new(Vec::new(), 82, 24);
    r.draw_menu(&MenuScreen {
        user: None,
        high_score: 0,
        login: &form,
    })
    .unwrap();
    let out = render(r);
    assert!(out.contains("User:"));
    assert!(out.contains("Pass:"));
    assert!(out.contains("Login error"));
    assert!(!out.contains("Hello"));
}

#[test]
fn menu_greets_logged_in_user() {
    let form = LoginForm::default();
    let mut r = TerminalRenderer::new(Vec::new(), 82, 24);
    r.draw_menu(&MenuScreen {
        user: Some("ana"),
        high_score: 12,
        login: &form,
    })
    .unwrap();
    let out = render(r);
    assert!(out.contains("Hello, ana!"));
    assert!(out.contains("Highest: 12"));
    assert!(!out.contains("User:"));
}
