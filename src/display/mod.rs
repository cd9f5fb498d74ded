/// Terminal rendering. All terminal I/O lives here.
///
/// The simulation runs in world units (750x750 by default). `Viewport` maps
/// that playfield onto whatever terminal grid is available; the renderer
/// only translates a snapshot into terminal commands and never touches
/// game state.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::collaborators::{Field, MenuScreen, Renderer};
use crate::compute::Snapshot;
use crate::entities::{
    Enemy, GameStatus, Player, Projectile, ProjectileKind, Side, Sprite, MAX_HEALTH, SHIP_SIZE,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Red;
const C_HIGH: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_HEALTH: Color = Color::Green;
const C_HEALTH_LOST: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Player => C_PLAYER,
        Sprite::Burger => Color::Red,
        Sprite::Fries => Color::Green,
        Sprite::Soda => Color::Blue,
    }
}

fn sprite_glyphs(sprite: Sprite) -> (&'static str, &'static str) {
    match sprite {
        Sprite::Player => (" ▲ ", "/|\\"),
        Sprite::Burger => ("(≡)", "\\_/"),
        Sprite::Fries => ("|||", "[_]"),
        Sprite::Soda => ("[u]", "|_|"),
    }
}

fn laser_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Yellow => Color::Yellow,
        ProjectileKind::Red => Color::Red,
        ProjectileKind::Green => Color::Green,
        ProjectileKind::Blue => Color::Blue,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal layout: HUD on row 0, border on row 1 and row `rows - 2`,
/// controls hint on the last row, play area in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(10),
            rows: rows.max(8),
        }
    }

    fn inner_cols(&self) -> u16 {
        self.cols - 2
    }

    fn inner_rows(&self) -> u16 {
        self.rows - 4
    }

    /// Map a world position to a cell inside the border, or `None` when the
    /// position lies outside the playfield.
    pub fn cell(&self, x: f32, y: f32, width: f32, height: f32) -> Option<(u16, u16)> {
        if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
            return None;
        }
        let col = (x / width * self.inner_cols() as f32) as u16;
        let row = (y / height * self.inner_rows() as f32) as u16;
        Some((
            1 + col.min(self.inner_cols() - 1),
            2 + row.min(self.inner_rows() - 1),
        ))
    }

    fn centre_col(&self, text: &str) -> u16 {
        (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            viewport: Viewport::new(cols, rows),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(cols, rows);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = std::io::Error;

    fn draw(&mut self, snap: &Snapshot<'_>) -> std::io::Result<()> {
        let vp = self.viewport;
        let out = &mut self.out;
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        draw_border(out, vp)?;
        draw_hud(out, vp, snap)?;

        for enemy in snap.enemies {
            draw_enemy(out, vp, snap, enemy)?;
        }
        for laser in snap.projectiles() {
            draw_laser(out, vp, snap, laser)?;
        }
        draw_player(out, vp, snap, snap.player)?;
        draw_controls_hint(out, vp)?;

        if snap.status == GameStatus::Lost {
            draw_lost(out, vp, snap.score, snap.menu_in)?;
        }
        self.finish()
    }

    fn draw_menu(&mut self, menu: &MenuScreen<'_>) -> std::io::Result<()> {
        let vp = self.viewport;
        let out = &mut self.out;
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        let cy = vp.rows / 2;
        let title = "★  JUNK FOOD ATTACK!  ★";
        out.queue(cursor::MoveTo(vp.centre_col(title), cy.saturating_sub(7)))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(title))?;

        match menu.user {
            Some(user) => {
                let hello = format!("Hello, {user}!");
                let high = format!("Highest: {}", menu.high_score);
                out.queue(cursor::MoveTo(vp.centre_col(&hello), cy.saturating_sub(4)))?;
                out.queue(style::SetForegroundColor(Color::Yellow))?;
                out.queue(Print(&hello))?;
                out.queue(cursor::MoveTo(vp.centre_col(&high), cy.saturating_sub(3)))?;
                out.queue(Print(&high))?;
            }
            None => draw_login_form(out, vp, menu)?,
        }

        let start = if menu.user.is_some() {
            "[ ENTER : START ]"
        } else {
            "[ log in to start ]"
        };
        out.queue(cursor::MoveTo(vp.centre_col(start), cy + 3))?;
        out.queue(style::SetForegroundColor(if menu.user.is_some() {
            Color::Green
        } else {
            C_HINT
        }))?;
        out.queue(Print(start))?;

        let hint = "TAB : Switch field   ENTER : Login / Start   ESC : Quit";
        out.queue(cursor::MoveTo(vp.centre_col(hint), cy + 5))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;

        self.finish()
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: Viewport, snap: &Snapshot<'_>) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Lives: {}", snap.lives)))?;

    let score = format!("Score: {}", snap.score);
    let high = format!("  Highest: {}", snap.high_score);
    let centre = vp.centre_col(&format!("{score}{high}"));
    out.queue(cursor::MoveTo(centre, 0))?;
    out.queue(Print(&score))?;
    out.queue(style::SetForegroundColor(C_HIGH))?;
    out.queue(Print(&high))?;

    let level = format!("Level: {}", snap.level);
    let lx = vp.cols.saturating_sub(level.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&level))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(
    out: &mut W,
    vp: Viewport,
    snap: &Snapshot<'_>,
    x: f32,
    y: f32,
    sprite: Sprite,
) -> std::io::Result<Option<(u16, u16)>> {
    // Anchor on the sprite centre so partially visible ships still show.
    let Some((col, row)) = vp.cell(
        x + SHIP_SIZE / 2.0,
        (y + SHIP_SIZE / 2.0).max(0.0),
        snap.width,
        snap.height,
    ) else {
        return Ok(None);
    };
    let (top, bottom) = sprite_glyphs(sprite);
    let lx = col.saturating_sub(1).clamp(1, vp.cols.saturating_sub(4));

    out.queue(style::SetForegroundColor(sprite_color(sprite)))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(top))?;
    if row + 1 < vp.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print(bottom))?;
    }
    Ok(Some((lx, row)))
}

fn draw_enemy<W: Write>(
    out: &mut W,
    vp: Viewport,
    snap: &Snapshot<'_>,
    enemy: &Enemy,
) -> std::io::Result<()> {
    draw_ship(out, vp, snap, enemy.x, enemy.y, enemy.kind.sprite())?;
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    vp: Viewport,
    snap: &Snapshot<'_>,
    player: &Player,
) -> std::io::Result<()> {
    let Some((lx, row)) = draw_ship(out, vp, snap, player.x, player.y, Sprite::Player)? else {
        return Ok(());
    };

    // Health bar under the ship; health may be negative, the bar is not.
    let bar_row = row + 2;
    if bar_row >= vp.rows.saturating_sub(2) {
        return Ok(());
    }
    let filled = (player.health.clamp(0, MAX_HEALTH) * 3 / MAX_HEALTH) as usize;
    out.queue(cursor::MoveTo(lx, bar_row))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print("▬".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_HEALTH_LOST))?;
    out.queue(Print("▬".repeat(3 - filled)))?;
    Ok(())
}

fn draw_laser<W: Write>(
    out: &mut W,
    vp: Viewport,
    snap: &Snapshot<'_>,
    laser: &Projectile,
) -> std::io::Result<()> {
    let (w, _) = laser.kind.size();
    let Some((col, row)) = vp.cell(laser.x + w / 2.0, laser.y, snap.width, snap.height) else {
        return Ok(());
    };
    let glyph = match laser.side {
        Side::Player => "║",
        Side::Enemy(_) => "↓",
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(laser_color(laser.kind)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / W A S D : Move   SPACE : Shoot   ESC : Quit"))?;
    Ok(())
}

// ── Lost overlay ──────────────────────────────────────────────────────────────

fn draw_lost<W: Write>(
    out: &mut W,
    vp: Viewport,
    score: u32,
    menu_in: u32,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {score}");
    let countdown = format!("Menu in {menu_in}s");
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    You Lost!!    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        (&countdown, C_HINT),
    ];

    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(vp.centre_col(msg), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

// ── Login form ────────────────────────────────────────────────────────────────

fn draw_login_form<W: Write>(
    out: &mut W,
    vp: Viewport,
    menu: &MenuScreen<'_>,
) -> std::io::Result<()> {
    let form = menu.login;
    let cy = vp.rows / 2;
    let left = (vp.cols / 2).saturating_sub(16);
    let password = form.masked_password();

    let fields = [
        (Field::Username, "User:", form.username.as_str(), cy.saturating_sub(3)),
        (Field::Password, "Pass:", password.as_str(), cy.saturating_sub(1)),
    ];
    for (field, label, value, row) in fields {
        let selected = form.selected == Some(field);
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(label))?;
        out.queue(style::SetForegroundColor(if selected {
            Color::Yellow
        } else {
            Color::Grey
        }))?;
        out.queue(Print(format!(" [{value:<24}]")))?;
    }

    if let Some(err) = &form.error {
        out.queue(cursor::MoveTo(vp.centre_col(err), cy + 1))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(err))?;
    }
    Ok(())
}
