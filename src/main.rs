use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use junk_food_attack::collaborators::{
    dispatch_events, submit_login, FileScoreStore, HighScoreKeeper, LocalIdentityProvider,
    LoginForm, MenuScreen, Renderer, Session,
};
use junk_food_attack::display::TerminalRenderer;
use junk_food_attack::entities::GameStatus;
use junk_food_attack::input::Intent;
use junk_food_attack::{Game, GameConfig, GameEvent};

/// Terminal frontend for Junk Food Attack.
#[derive(Parser, Debug)]
#[command(name = "junk_food_attack", version, about)]
struct Args {
    /// JSON file overriding the default game tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy placement and fire rolls.
    #[arg(long)]
    seed: Option<u64>,
    /// Where the high score is kept.
    #[arg(long)]
    score_file: Option<PathBuf>,
    /// Ticks per second. Defaults to the config's tick rate.
    #[arg(long)]
    fps: Option<u32>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// many frames. Covers terminals that never report key releases: OS key
/// repeat refreshes the entry well before it expires.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

fn held_intent(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Intent {
    Intent {
        left: is_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
        right: is_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
        up: is_held(key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
        down: is_held(key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
        fire: is_held(key_frame, &[KeyCode::Char(' ')], frame),
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Esc || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

struct Frontend<W: Write> {
    renderer: TerminalRenderer<W>,
    identity: LocalIdentityProvider,
    login: LoginForm,
    session: Option<Session>,
    keeper: HighScoreKeeper<FileScoreStore>,
}

impl<W: Write> Frontend<W> {
    fn draw_menu(&mut self) -> std::io::Result<()> {
        let screen = MenuScreen {
            user: self.session.as_ref().map(|s| s.username.as_str()),
            high_score: self.keeper.best(),
            login: &self.login,
        };
        self.renderer.draw_menu(&screen)
    }

    /// Block on key events until the player starts a run or quits.
    fn menu(&mut self, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
        if self.session.is_none() && self.login.selected.is_none() {
            self.login.cycle_field();
        }
        self.draw_menu()?;

        while let Ok(ev) = rx.recv() {
            match ev {
                Event::Resize(cols, rows) => self.renderer.resize(cols, rows),
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => {
                    if is_quit(code, modifiers) {
                        return Ok(MenuResult::Quit);
                    }
                    match (code, self.session.is_some()) {
                        (KeyCode::Enter, true) => return Ok(MenuResult::Start),
                        (KeyCode::Enter, false) => {
                            self.session = submit_login(&mut self.identity, &mut self.login);
                            if let Some(session) = &self.session {
                                log::info!("Logged in as {}", session.username);
                            }
                        }
                        (KeyCode::Tab, false) => self.login.cycle_field(),
                        (KeyCode::Backspace, false) => self.login.backspace(),
                        (KeyCode::Char(c), false) => self.login.type_char(c),
                        _ => continue,
                    }
                }
                _ => continue,
            }
            self.draw_menu()?;
        }
        Ok(MenuResult::Quit)
    }

    // ── Game loop ─────────────────────────────────────────────────────────────

    /// Run until the game returns to the menu. Returns `true` to quit.
    ///
    /// One clock drives everything: each frame drains pending key events,
    /// resolves the held keys into an intent, ticks once and draws once.
    fn play(
        &mut self,
        game: &mut Game,
        rng: &mut StdRng,
        rx: &mpsc::Receiver<Event>,
        frame_time: Duration,
    ) -> std::io::Result<bool> {
        let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
        let mut frame: u64 = 0;

        loop {
            let frame_start = Instant::now();
            frame += 1;

            while let Ok(ev) = rx.try_recv() {
                match ev {
                    Event::Resize(cols, rows) => self.renderer.resize(cols, rows),
                    Event::Key(KeyEvent {
                        code,
                        kind,
                        modifiers,
                        ..
                    }) => match kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if is_quit(code, modifiers) {
                                return Ok(true);
                            }
                            key_frame.insert(code, frame);
                        }
                        KeyEventKind::Release => {
                            key_frame.remove(&code);
                        }
                    },
                    _ => {}
                }
            }

            game.set_input(held_intent(&key_frame, frame));
            let events = game.tick(rng);
            dispatch_events(&events, &mut self.keeper);

            if events.contains(&GameEvent::ReturnedToMenu) || game.status() == GameStatus::Menu {
                return Ok(false);
            }
            self.renderer.draw(&game.snapshot())?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let fps = args.fps.unwrap_or(config.tick_rate).max(1);
    let frame_time = Duration::from_secs_f64(1.0 / fps as f64);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let store = FileScoreStore::new(args.score_file.unwrap_or_else(FileScoreStore::default_path));
    let keeper = HighScoreKeeper::new(store);
    let mut game = Game::new(config, keeper.best())?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the kitty protocol
    // fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let (cols, rows) = terminal::size()?;
    let mut frontend = Frontend {
        renderer: TerminalRenderer::new(out, cols, rows),
        identity: LocalIdentityProvider::new(),
        login: LoginForm::default(),
        session: None,
        keeper,
    };
    let result = run(&mut frontend, &mut game, &mut rng, &rx, frame_time);

    let out = frontend.renderer.writer();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}

fn run<W: Write>(
    frontend: &mut Frontend<W>,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<()> {
    loop {
        match frontend.menu(rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                game.set_known_high_score(frontend.keeper.best());
                if let Err(err) = game.start_run(frontend.session.is_some(), rng) {
                    log::warn!("Run not started: {err}");
                    continue;
                }
                if frontend.play(game, rng, rx, frame_time)? {
                    break;
                }
            }
        }
    }
    Ok(())
}
