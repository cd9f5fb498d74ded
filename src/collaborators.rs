/// Seams to everything outside the simulation: drawing, login and the
/// persisted high score.
///
/// The game loop never calls these directly. Frontends read a `Snapshot` for
/// the renderer and forward `GameEvent`s to a `ScoreNotifier` with
/// `dispatch_events`. Notification failures are logged and dropped so a slow
/// or broken store can never stall a tick.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compute::{GameEvent, Snapshot};
use crate::error::{AuthError, StoreError};

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Draws game frames and the menu.
pub trait Renderer {
    type Error;

    /// Draw one Playing or Lost frame.
    fn draw(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Self::Error>;

    /// Draw the menu, including the login form while logged out.
    fn draw_menu(&mut self, menu: &MenuScreen<'_>) -> Result<(), Self::Error>;
}

/// Everything the menu shows.
#[derive(Clone, Copy, Debug)]
pub struct MenuScreen<'a> {
    /// Logged-in user, if any.
    pub user: Option<&'a str>,
    pub high_score: u32,
    pub login: &'a LoginForm,
}

// ── Login form ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

/// Text entry state of the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub selected: Option<Field>,
    /// Last login failure, shown under the form.
    pub error: Option<String>,
}

impl LoginForm {
    pub fn select(&mut self, field: Option<Field>) {
        self.selected = field;
    }

    /// Tab between the two fields. Selects the username when nothing is.
    pub fn cycle_field(&mut self) {
        self.selected = Some(match self.selected {
            Some(Field::Username) => Field::Password,
            Some(Field::Password) | None => Field::Username,
        });
    }

    pub fn type_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(text) = self.selected_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.selected_text() {
            text.pop();
        }
    }

    fn selected_text(&mut self) -> Option<&mut String> {
        match self.selected? {
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
        }
    }

    /// Password rendered as asterisks.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

// ── Identity ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

pub trait IdentityProvider {
    fn log_in(&mut self, username: &str, password: &str) -> Result<Session, AuthError>;
    fn sign_up(&mut self, username: &str, password: &str) -> Result<(), AuthError>;
}

/// Log in; if the user does not exist yet, sign them up and log in.
pub fn login_or_sign_up(
    provider: &mut impl IdentityProvider,
    username: &str,
    password: &str,
) -> Result<Session, AuthError> {
    match provider.log_in(username, password) {
        Ok(session) => Ok(session),
        Err(AuthError::UserNotFound(_)) => {
            log::info!("Unknown user {username}, signing up");
            provider.sign_up(username, password)?;
            provider.log_in(username, password)
        }
        Err(err) => Err(err),
    }
}

/// Drive the login form through `login_or_sign_up`, leaving the failure
/// message on the form.
pub fn submit_login(
    provider: &mut impl IdentityProvider,
    form: &mut LoginForm,
) -> Option<Session> {
    match login_or_sign_up(provider, &form.username, &form.password) {
        Ok(session) => {
            form.error = None;
            form.password.clear();
            Some(session)
        }
        Err(err) => {
            log::info!("Login failed: {err}");
            form.error = Some(format!("Login error: {err}"));
            None
        }
    }
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Process-local account table. Credentials are kept in memory only.
#[derive(Debug, Default)]
pub struct LocalIdentityProvider {
    users: HashMap<String, String>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn log_in(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        match self.users.get(username) {
            None => Err(AuthError::UserNotFound(username.to_string())),
            Some(stored) if stored == password => Ok(Session {
                username: username.to_string(),
            }),
            Some(_) => Err(AuthError::WrongPassword),
        }
    }

    fn sign_up(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(AuthError::InvalidUsername);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.users.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }
        self.users
            .insert(username.to_string(), password.to_string());
        Ok(())
    }
}

// ── Score store ───────────────────────────────────────────────────────────────

/// Persisted best score.
pub trait ScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// JSON file holding a single high score. A missing file reads as 0.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.junk_food_attack_score.json`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".junk_food_attack_score.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str::<ScoreFile>(&text)?.high_score),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string(&ScoreFile { high_score: score })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store. Records every save; can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    pub best: u32,
    pub saves: Vec<u32>,
    pub fail: bool,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "store unavailable",
            )));
        }
        self.best = score;
        self.saves.push(score);
        Ok(())
    }
}

// ── Score notifications ───────────────────────────────────────────────────────

/// Receives score notifications from the game. Implementations must not fail
/// or block the caller.
pub trait ScoreNotifier {
    fn on_score_increased(&mut self, score: u32);
    fn on_run_lost(&mut self, final_score: u32);
}

/// Forward score-related events to `notifier`.
pub fn dispatch_events(events: &[GameEvent], notifier: &mut impl ScoreNotifier) {
    for event in events {
        match *event {
            GameEvent::ScoreIncreased { score } => notifier.on_score_increased(score),
            GameEvent::RunLost { final_score, .. } => notifier.on_run_lost(final_score),
            _ => {}
        }
    }
}

/// Writes a new best score to its store whenever one is reported.
///
/// If the stored record cannot be read the keeper goes read-only for the
/// session: the unreadable record is never overwritten.
#[derive(Debug)]
pub struct HighScoreKeeper<S: ScoreStore> {
    store: S,
    best: u32,
    read_only: bool,
}

impl<S: ScoreStore> HighScoreKeeper<S> {
    /// Read the current best from `store`. An unreadable store starts the
    /// keeper at 0 with saving disabled.
    pub fn new(store: S) -> Self {
        match store.load() {
            Ok(best) => Self {
                store,
                best,
                read_only: false,
            },
            Err(err) => {
                log::warn!("Could not read high score, not saving this session: {err}");
                Self {
                    store,
                    best: 0,
                    read_only: true,
                }
            }
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the stored record could not be read and saves are skipped.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn record(&mut self, score: u32) {
        if score <= self.best {
            return;
        }
        self.best = score;
        if self.read_only {
            return;
        }
        if let Err(err) = self.store.save(score) {
            log::warn!("Could not persist high score {score}: {err}");
        }
    }
}

impl<S: ScoreStore> ScoreNotifier for HighScoreKeeper<S> {
    fn on_score_increased(&mut self, score: u32) {
        self.record(score);
    }

    fn on_run_lost(&mut self, final_score: u32) {
        self.record(final_score);
    }
}
