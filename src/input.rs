/// Input controller.
///
/// Frontends push key events whenever they arrive. The queue is folded into a
/// single `Intent` at the start of each game tick, so every tick sees one
/// consistent set of held keys no matter how input and frames interleave.

use std::collections::VecDeque;

use crate::entities::{Player, SHIP_SIZE};
use crate::projectiles::{player_fire, tick_cooldown};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Press(Action),
    Release(Action),
}

/// Which controls are held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl Intent {
    fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Up => self.up = held,
            Action::Down => self.down = held,
            Action::Fire => self.fire = held,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(action) => self.set(action, true),
            InputEvent::Release(action) => self.set(action, false),
        }
    }
}

#[derive(Debug, Default)]
pub struct InputController {
    intent: Intent,
    pending: VecDeque<InputEvent>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next tick.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Replace the held set outright. Events still queued apply on top of it.
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Fold queued events into the held set and return it for this tick.
    pub fn sample(&mut self) -> Intent {
        while let Some(event) = self.pending.pop_front() {
            self.intent.apply(event);
        }
        self.intent
    }

    /// Release everything and drop queued events.
    pub fn clear(&mut self) {
        self.intent = Intent::default();
        self.pending.clear();
    }
}

/// Apply one tick of intent to the player: move along each held axis
/// (clamped to the playfield), fire if asked, then count the cooldown down.
/// Returns true when a laser was fired.
pub fn apply_intent(
    player: &mut Player,
    intent: Intent,
    width: f32,
    height: f32,
    cooldown: u32,
) -> bool {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if intent.left {
        dx -= player.speed;
    }
    if intent.right {
        dx += player.speed;
    }
    if intent.up {
        dy -= player.speed;
    }
    if intent.down {
        dy += player.speed;
    }
    player.x = (player.x + dx).clamp(0.0, width - SHIP_SIZE);
    player.y = (player.y + dy).clamp(0.0, height - SHIP_SIZE);

    let fired = intent.fire && player_fire(player, cooldown);
    tick_cooldown(&mut player.cooldown);
    fired
}
