/// Laser lifecycle: firing, advancing, expiring and resolving hits.
///
/// Player lasers travel up and destroy the first enemy they overlap. Enemy
/// lasers travel down and damage the player. Each ship owns its lasers, so a
/// destroyed enemy takes its in-flight lasers with it.

use crate::collision::overlaps;
use crate::entities::{Enemy, Player, Projectile, ProjectileKind, Side, SHIP_SIZE};

/// Count a nonzero cooldown down by one tick.
#[inline]
pub fn tick_cooldown(cooldown: &mut u32) {
    *cooldown = cooldown.saturating_sub(1);
}

/// Fire from the player's position if its cooldown has run out.
pub fn player_fire(player: &mut Player, cooldown: u32) -> bool {
    if player.cooldown != 0 {
        return false;
    }
    player.lasers.push(Projectile {
        x: player.x,
        y: player.y,
        side: Side::Player,
        kind: ProjectileKind::Yellow,
    });
    player.cooldown = cooldown;
    true
}

/// An enemy may fire only while some part of it is inside the playfield.
pub fn enemy_on_screen(enemy: &Enemy, height: f32) -> bool {
    enemy.y + SHIP_SIZE > 0.0 && enemy.y < height
}

/// Fire from an enemy, offset 20 units left of its x.
pub fn enemy_fire(enemy: &mut Enemy, height: f32, cooldown: u32) -> bool {
    if enemy.cooldown != 0 || !enemy_on_screen(enemy, height) {
        return false;
    }
    enemy.lasers.push(Projectile {
        x: enemy.x - 20.0,
        y: enemy.y,
        side: Side::Enemy(enemy.id),
        kind: enemy.kind.laser(),
    });
    enemy.cooldown = cooldown;
    true
}

/// Move the player's lasers up by `speed`, expire the ones above
/// `-margin`, and destroy the first enemy each remaining laser overlaps.
///
/// Destroyed enemies are marked during the pass and swept afterwards, so a
/// single enemy is never credited twice. Returns the number of kills.
pub fn advance_player_lasers(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    speed: f32,
    margin: f32,
) -> u32 {
    let mut dead = vec![false; enemies.len()];
    let mut kills = 0;

    player.lasers.retain_mut(|laser| {
        laser.y -= speed;
        if laser.y < -margin {
            return false;
        }
        let rect = laser.rect();
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(i, e)| !dead[*i] && overlaps(&rect, &e.rect()))
            .map(|(i, _)| i);
        match hit {
            Some(i) => {
                dead[i] = true;
                kills += 1;
                false
            }
            None => true,
        }
    });

    if kills > 0 {
        let mut flags = dead.into_iter();
        enemies.retain(|_| !flags.next().unwrap_or(false));
    }
    kills
}

/// Move every enemy laser down by `speed`, expire the ones below
/// `height + margin`, and apply `damage` to the player per hit.
/// Returns the number of hits.
pub fn advance_enemy_lasers(
    enemies: &mut [Enemy],
    player: &mut Player,
    speed: f32,
    height: f32,
    margin: f32,
    damage: i32,
) -> u32 {
    let mut hits = 0;
    let target = player.rect();

    for enemy in enemies.iter_mut() {
        enemy.lasers.retain_mut(|laser| {
            laser.y += speed;
            if laser.y > height + margin {
                return false;
            }
            if overlaps(&laser.rect(), &target) {
                hits += 1;
                return false;
            }
            true
        });
    }

    player.health -= damage * hits as i32;
    hits
}
