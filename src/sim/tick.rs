//! Fixed timestep simulation tick
//!
//! One call runs the whole per-frame update in order: timer, player move,
//! trail/fill, enemy step, collision, sparks, coverage and stage check.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::find_collision;
use super::player::TrailStep;
use super::state::{GameEvent, Session, SessionPhase};
use crate::consts::SIM_DT;

/// Directional keys held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl TickInput {
    /// Per-axis direction; opposing keys cancel out
    pub fn direction(&self) -> Vec2 {
        fn axis(negative: bool, positive: bool) -> f32 {
            (positive as i8 - negative as i8) as f32
        }
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the session by one fixed timestep.
///
/// Does nothing unless the session is [`SessionPhase::Running`].
pub fn tick<R: Rng>(session: &mut Session<R>, input: &TickInput) {
    if session.phase != SessionPhase::Running {
        return;
    }
    session.time_ticks += 1;
    let bounds = session.config.bounds();

    // Timer
    if session.stage.advance_timer(SIM_DT) {
        session.events.push(GameEvent::TimerExpired {
            stage: session.stage.index,
        });
        log::info!(
            "Stage {} timer expired, stage can no longer be cleared",
            session.stage.index + 1
        );
    }

    // Player movement and trail
    let stage = &mut session.stage;
    stage.player.advance(input.direction(), bounds);
    match stage.player.update_safety(&stage.mask) {
        TrailStep::Left => {
            log::debug!("Trail started at {:?}", stage.player.pos);
        }
        TrailStep::Returned(trail) => {
            let cells = stage.mask.reveal_polygon(&trail);
            log::debug!("Trail of {} points closed, {} cells claimed", trail.len(), cells);
            if cells > 0 {
                session.events.push(GameEvent::AreaClaimed {
                    cells,
                    coverage: stage.mask.coverage_percent(),
                });
            }
        }
        TrailStep::StillSafe | TrailStep::Extended => {}
    }

    // Enemies
    for enemy in &mut stage.enemies {
        enemy.step(&stage.mask, &session.config.enemy, bounds, &mut session.rng);
    }

    // Collisions
    if let Some(hit) = find_collision(&session.stage.player, &session.stage.enemies) {
        session.lose_life(hit);
        if session.phase == SessionPhase::GameOver {
            return;
        }
    }

    // Sparks
    if !session.stage.player.safe {
        session.sparks.emit(session.stage.player.pos);
    }
    session.sparks.update();

    // Coverage and stage check
    session.coverage = session.stage.coverage_percent();
    if !session.stage.timer_expired && session.coverage >= session.config.win_coverage_percent {
        let stage = session.stage.index;
        if session.config.has_next_stage(stage) {
            session.phase = SessionPhase::StageClearPrompt;
            session.events.push(GameEvent::StageClearPrompt { stage });
            log::info!(
                "Stage {} cleared at {:.1}%, awaiting decision",
                stage + 1,
                session.coverage
            );
        } else {
            session.phase = SessionPhase::AllStagesCleared;
            session.events.push(GameEvent::AllStagesCleared);
            log::info!("All {} stages cleared", session.config.stage_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::collision::CollisionKind;
    use crate::sim::enemy::Enemy;
    use crate::sim::state::Backdrop;

    const RIGHT: TickInput = TickInput {
        left: false,
        right: true,
        up: false,
        down: false,
    };
    const LEFT: TickInput = TickInput {
        left: true,
        right: false,
        up: false,
        down: false,
    };
    const UP: TickInput = TickInput {
        left: false,
        right: false,
        up: true,
        down: false,
    };
    const DOWN: TickInput = TickInput {
        left: false,
        right: false,
        up: false,
        down: true,
    };
    const IDLE: TickInput = TickInput {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// 200x200 surface, 40x40 safe zone, one small parked enemy far from the action
    fn quiet_session(seed: u64) -> Session {
        let mut config = GameConfig {
            width: 200,
            height: 200,
            safe_zone_width: 40,
            safe_zone_height: 40,
            ..Default::default()
        };
        config.enemy.count = 1;
        config.enemy.radius = 5.0;
        config.enemy.pause_chance = 0.0;

        let mut session = Session::new(config, seed).unwrap();
        session.stage.enemies = vec![Enemy::new(0, Vec2::new(20.0, 180.0), Vec2::ZERO, 5.0)];
        session
    }

    fn run(session: &mut Session, input: TickInput, ticks: usize) {
        for _ in 0..ticks {
            tick(session, &input);
        }
    }

    fn whole_surface(session: &Session) -> [Vec2; 4] {
        let b = session.config().bounds();
        [Vec2::ZERO, Vec2::new(b.x, 0.0), b, Vec2::new(0.0, b.y)]
    }

    #[test]
    fn test_direction_cancels_opposing_keys() {
        let all = TickInput {
            left: true,
            right: true,
            up: true,
            down: false,
        };
        assert_eq!(all.direction(), Vec2::new(0.0, -1.0));
        assert_eq!(IDLE.direction(), Vec2::ZERO);
        assert_eq!(DOWN.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_loop_claims_enclosed_area() {
        let mut session = quiet_session(1);
        let before = session.coverage;

        // Out of the zone to the right: x = 121 on the 7th tick
        run(&mut session, RIGHT, 7);
        assert!(!session.stage.player.safe);
        assert_eq!(session.stage.player.trail.len(), 1);

        // Walk a rectangle and come back in from below
        run(&mut session, RIGHT, 10);
        run(&mut session, DOWN, 10);
        run(&mut session, LEFT, 17);
        run(&mut session, UP, 3);
        assert!(!session.stage.player.safe);
        let trail_len = session.stage.player.trail.len();
        assert_eq!(trail_len, 41);

        run(&mut session, UP, 1);
        assert!(session.stage.player.safe);
        assert!(session.stage.player.trail.is_empty());

        let claims: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::AreaClaimed { cells, .. } => Some(cells),
                _ => None,
            })
            .collect();
        assert_eq!(claims.len(), 1, "exactly one fill per excursion");

        // Loop spans x 100..151, y 100..130; the zone already held x < 120, y < 120
        let expected = 31 * 20 + 51 * 10;
        assert!((claims[0] as i64 - expected).abs() <= 30, "claimed {}", claims[0]);

        let gained = session.coverage - before;
        let expected_gain = expected as f32 / 40_000.0 * 100.0;
        assert!((gained - expected_gain).abs() < 0.1, "gained {gained}%");

        let mask = &session.stage.mask;
        assert!(mask.is_revealed(Vec2::new(140.0, 115.0)));
        assert!(mask.is_revealed(Vec2::new(110.0, 125.0)));
        assert!(!mask.is_revealed(Vec2::new(160.0, 115.0)));
        assert!(!mask.is_revealed(Vec2::new(140.0, 140.0)));
    }

    #[test]
    fn test_coverage_monotonic_over_play() {
        let mut session = quiet_session(4);
        let pattern = [(RIGHT, 25), (DOWN, 20), (LEFT, 40), (UP, 30), (RIGHT, 10), (UP, 25), (LEFT, 30), (DOWN, 20)];
        let mut last = session.coverage;
        for _ in 0..3 {
            for &(input, ticks) in &pattern {
                for _ in 0..ticks {
                    tick(&mut session, &input);
                    assert!(session.coverage >= last);
                    last = session.coverage;
                }
            }
        }
    }

    #[test]
    fn test_one_life_per_tick_on_contact() {
        let mut session = quiet_session(2);
        for expected_lives in [2u8, 1] {
            // Park the player unsafe, trail and all, right on top of the enemy
            let player = &mut session.stage.player;
            player.pos = Vec2::new(30.0, 30.0);
            player.safe = false;
            player.trail = (0..10).map(|i| Vec2::new(26.0 + i as f32, 30.0)).collect();
            session.stage.enemies[0].pos = Vec2::new(30.0, 30.0);

            tick(&mut session, &IDLE);
            assert_eq!(session.lives, expected_lives);
            assert!(session.stage.player.safe);
            assert_eq!(session.stage.player.pos, session.stage.spawn);

            let hits: Vec<_> = session
                .drain_events()
                .into_iter()
                .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
                .collect();
            assert_eq!(hits.len(), 1);
            assert!(matches!(
                hits[0],
                GameEvent::LifeLost { cause: CollisionKind::Player, .. }
            ));

            // Respawned safe: the same enemy cannot hit again next tick
            tick(&mut session, &IDLE);
            assert_eq!(session.lives, expected_lives);
        }
    }

    #[test]
    fn test_trail_contact_costs_a_life() {
        let mut session = quiet_session(3);
        let player = &mut session.stage.player;
        player.pos = Vec2::new(170.0, 30.0);
        player.safe = false;
        player.trail = vec![Vec2::new(20.0, 178.0), Vec2::new(170.0, 30.0)];

        tick(&mut session, &IDLE);
        assert_eq!(session.lives, 2);
        assert!(session.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::LifeLost { cause: CollisionKind::Trail { index: 0 }, .. }
        )));
    }

    #[test]
    fn test_claimed_ground_at_far_wall_stays_safe() {
        let mut session = quiet_session(8);
        let claimed = [
            Vec2::new(90.0, 60.0),
            Vec2::new(200.0, 60.0),
            Vec2::new(200.0, 140.0),
            Vec2::new(90.0, 140.0),
        ];
        session.stage.mask.reveal_polygon(&claimed);
        session.drain_events();

        for _ in 0..40 {
            tick(&mut session, &RIGHT);
            assert!(session.stage.player.safe);
        }
        assert_eq!(session.stage.player.pos, Vec2::new(200.0, 100.0));
        assert!(session.stage.player.trail.is_empty());
        assert_eq!(session.lives, 3);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut session = quiet_session(5);
        session.lives = 1;
        let player = &mut session.stage.player;
        player.pos = Vec2::new(20.0, 180.0);
        player.safe = false;
        player.trail = vec![Vec2::new(20.0, 180.0)];

        tick(&mut session, &IDLE);
        assert_eq!(session.lives, 0);
        assert_eq!(session.phase, SessionPhase::GameOver);

        // Halted: no more ticks are counted
        let ticks = session.time_ticks;
        let timer = session.stage.timer;
        run(&mut session, RIGHT, 10);
        assert_eq!(session.time_ticks, ticks);
        assert_eq!(session.stage.timer, timer);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_coverage_target_prompts_for_next_stage() {
        let mut session = quiet_session(6);
        let surface = whole_surface(&session);
        session.stage.mask.reveal_polygon(&surface);

        tick(&mut session, &IDLE);
        assert_eq!(session.phase, SessionPhase::StageClearPrompt);
        assert!(session
            .drain_events()
            .contains(&GameEvent::StageClearPrompt { stage: 0 }));

        // Ticking is suspended until the decision arrives
        let ticks = session.time_ticks;
        tick(&mut session, &IDLE);
        assert_eq!(session.time_ticks, ticks);

        session.resolve_stage_prompt(true).unwrap();
        assert_eq!(session.stage.index, 1);
        assert!(session.coverage < 50.0);
        tick(&mut session, &IDLE);
        assert_eq!(session.phase, SessionPhase::Running);
    }

    #[test]
    fn test_last_stage_clear_completes_session() {
        let mut session = quiet_session(7);
        session.config.stage_count = 1;
        let surface = whole_surface(&session);
        session.stage.mask.reveal_polygon(&surface);

        tick(&mut session, &IDLE);
        assert_eq!(session.phase, SessionPhase::AllStagesCleared);
        assert!(session.phase.awaiting_restart());
        assert!(session.drain_events().contains(&GameEvent::AllStagesCleared));
    }

    #[test]
    fn test_expiry_disables_stage_clear() {
        let mut session = quiet_session(8);
        session.stage.timer = SIM_DT / 2.0;

        tick(&mut session, &IDLE);
        assert!(session.stage.timer_expired);
        assert_eq!(session.stage.timer, 0.0);
        assert_eq!(session.stage.backdrop, Backdrop::Failure);
        assert!(session
            .drain_events()
            .contains(&GameEvent::TimerExpired { stage: 0 }));

        // Even a fully revealed surface no longer clears the stage
        let surface = whole_surface(&session);
        session.stage.mask.reveal_polygon(&surface);
        run(&mut session, IDLE, 30);
        assert!((session.coverage - 100.0).abs() < 1e-3);
        assert_eq!(session.phase, SessionPhase::Running);
        assert_eq!(session.stage.timer, 0.0);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_sparks_follow_unsafe_player() {
        let mut session = quiet_session(10);
        run(&mut session, RIGHT, 6);
        assert!(session.sparks.sparks().is_empty());
        run(&mut session, RIGHT, 5);
        assert!(!session.sparks.sparks().is_empty());
        assert!(session.sparks.sparks().len() <= session.config().max_sparks);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = Session::new(GameConfig::default(), 99_999).unwrap();
        let mut b = Session::new(GameConfig::default(), 99_999).unwrap();
        let inputs = [RIGHT, RIGHT, DOWN, IDLE, LEFT, UP];

        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.stage.player.pos, b.stage.player.pos);
        for (ea, eb) in a.stage.enemies.iter().zip(&b.stage.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.mode, eb.mode);
        }
    }
}
