use junk_food_attack::compute::player_in_bounds;
use junk_food_attack::entities::GameStatus;
use junk_food_attack::input::Intent;
use junk_food_attack::{Game, GameConfig};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn intent_from(bits: u8) -> Intent {
    Intent {
        left: bits & 1 != 0,
        right: bits & 2 != 0,
        up: bits & 4 != 0,
        down: bits & 8 != 0,
        fire: bits & 16 != 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Random play never breaks the run invariants.
    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        inputs in prop::collection::vec(0u8..32, 1..400),
        fire_chance in 0.0f64..0.2,
    ) {
        let config = GameConfig {
            enemy_fire_chance: fire_chance,
            enemy_speed: 4.0,
            ..GameConfig::default()
        };
        let lives = config.initial_lives;
        let mut game = Game::new(config, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        game.start_run(true, &mut rng).unwrap();

        let mut last_score = 0;
        for bits in inputs {
            if game.status() != GameStatus::Playing {
                break;
            }
            game.set_input(intent_from(bits));
            game.tick(&mut rng);

            let s = game.state();
            prop_assert!(s.run.score >= last_score);
            last_score = s.run.score;
            prop_assert!(s.run.lives <= lives);
            prop_assert!(player_in_bounds(s));
            prop_assert!(s.high_score >= s.run.score);
            if s.status == GameStatus::Lost {
                prop_assert!(s.run.lives == 0 || s.player.health <= 0);
            } else {
                prop_assert!(s.run.lives > 0 && s.player.health > 0);
                prop_assert!(!s.enemies.is_empty());
            }
        }
    }
}
