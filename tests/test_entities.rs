use junk_food_attack::collision::Rect;
use junk_food_attack::entities::*;

#[test]
fn enemy_kinds_map_to_sprite_and_laser() {
    assert_eq!(EnemyKind::Burger.sprite(), Sprite::Burger);
    assert_eq!(EnemyKind::Burger.laser(), ProjectileKind::Red);
    assert_eq!(EnemyKind::Fries.sprite(), Sprite::Fries);
    assert_eq!(EnemyKind::Fries.laser(), ProjectileKind::Green);
    assert_eq!(EnemyKind::Soda.sprite(), Sprite::Soda);
    assert_eq!(EnemyKind::Soda.laser(), ProjectileKind::Blue);
}

#[test]
fn player_spawns_near_bottom() {
    let p = Player::spawn(750.0, 750.0, 5.0);
    assert_eq!((p.x, p.y), (300.0, 630.0));
    assert_eq!(p.health, MAX_HEALTH);
    assert_eq!(p.cooldown, 0);
    assert!(p.lasers.is_empty());
}

#[test]
fn player_spawn_fits_small_playfield() {
    let p = Player::spawn(60.0, 60.0, 5.0);
    assert!(p.x >= 0.0 && p.x <= 60.0 - SHIP_SIZE);
    assert!(p.y >= 0.0 && p.y <= 60.0 - SHIP_SIZE);
}

#[test]
fn ship_rects_are_50_square() {
    let e = Enemy::new(3, 10.0, -20.0, EnemyKind::Soda);
    assert_eq!(e.rect(), Rect::new(10.0, -20.0, 50.0, 50.0));
    let p = Player::spawn(750.0, 750.0, 5.0);
    assert_eq!(p.rect(), Rect::new(300.0, 630.0, 50.0, 50.0));
}

#[test]
fn projectile_rect_uses_kind_size() {
    let laser = Projectile {
        x: 1.0,
        y: 2.0,
        side: Side::Enemy(4),
        kind: ProjectileKind::Green,
    };
    let (w, h) = ProjectileKind::Green.size();
    assert_eq!(laser.rect(), Rect::new(1.0, 2.0, w, h));
}

#[test]
fn run_state_starts_clean() {
    let run = RunState::new(5, 5, 1.0);
    assert_eq!(run.level, 0);
    assert_eq!(run.wave_length, 5);
    assert_eq!(run.lives, 5);
    assert_eq!(run.score, 0);
    assert_eq!(run.freeze, 0);
}

#[test]
fn enemy_clone_is_independent() {
    let original = Enemy::new(1, 5.0, 5.0, EnemyKind::Burger);
    let mut cloned = original.clone();
    cloned.y = 99.0;
    cloned.lasers.push(Projectile {
        x: 0.0,
        y: 0.0,
        side: Side::Enemy(1),
        kind: ProjectileKind::Red,
    });
    assert_eq!(original.y, 5.0);
    assert!(original.lasers.is_empty());
}
