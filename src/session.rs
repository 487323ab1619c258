//! Game loop policy
//!
//! A session owns the arena and decides when the game is over: an enemy
//! reaching the turret loses immediately, and once more than `SHOT_LIMIT`
//! shots were fired the score decides between win and loss. Termination is
//! a state the caller reads; nothing here exits the process.

use serde::{Deserialize, Serialize};

use crate::audio::CueSink;
use crate::consts::{SHOT_LIMIT, WIN_SCORE};
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::sim::{self, Arena, Direction, GameEvent, Snapshot};

/// Why a session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// An enemy touched the turret
    TurretStruck,
    /// Shots ran out below the winning score
    ScoreTooLow,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Won,
    Lost(LossReason),
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Win/lose verdict once the shot budget is exceeded, `None` while shots remain
pub fn shot_verdict(shots_fired: u32, score: u32) -> Option<GamePhase> {
    if shots_fired <= SHOT_LIMIT {
        return None;
    }
    Some(if score >= WIN_SCORE {
        GamePhase::Won
    } else {
        GamePhase::Lost(LossReason::ScoreTooLow)
    })
}

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Returned from every [`Session::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub score: u32,
    pub phase: GamePhase,
}

/// One game from start to win or loss
pub struct Session {
    arena: Arena,
    phase: GamePhase,
    sink: Box<dyn CueSink>,
}

impl Session {
    pub fn new(
        settings: &Settings,
        seed: u64,
        sink: Box<dyn CueSink>,
    ) -> Result<Self, ConfigError> {
        let arena = Arena::new(settings, seed)?;
        log::info!(
            "Session started (seed {}, arena {}x{})",
            seed,
            arena.width,
            arena.height
        );
        let mut session = Self {
            arena,
            phase: GamePhase::Playing,
            sink,
        };
        session.forward_events();
        Ok(session)
    }

    /// Set or clear a held direction
    pub fn set_turret_direction(&mut self, direction: Direction, active: bool) {
        self.arena.turret.set_direction(direction, active);
    }

    /// Fire a projectile. Returns its id, or `None` once the session is over.
    pub fn fire(&mut self) -> Option<u32> {
        if self.phase.is_over() {
            log::debug!("Ignoring fire after game over");
            return None;
        }
        let id = self.arena.fire();
        log::debug!("Shot {} fired (projectile {})", self.arena.shots_fired, id);
        self.forward_events();
        Some(id)
    }

    /// Apply a full set of intents: held directions plus an optional shot
    pub fn apply_input(&mut self, input: &TickInput) {
        self.set_turret_direction(Direction::Left, input.move_left);
        self.set_turret_direction(Direction::Right, input.move_right);
        if input.fire {
            self.fire();
        }
    }

    /// Advance one tick and evaluate termination
    pub fn tick(&mut self) -> TickSummary {
        if self.phase.is_over() {
            return self.summary();
        }

        let report = sim::tick(&mut self.arena);
        self.forward_events();

        if report.collisions.turret_struck {
            self.phase = GamePhase::Lost(LossReason::TurretStruck);
        } else if let Some(verdict) = shot_verdict(self.arena.shots_fired, self.arena.score) {
            self.phase = verdict;
        }

        if self.phase.is_over() {
            log::info!(
                "Game over after {} ticks: {:?} with score {}",
                report.tick,
                self.phase,
                self.arena.score
            );
        }
        self.summary()
    }

    fn summary(&self) -> TickSummary {
        TickSummary {
            score: self.arena.score,
            phase: self.phase,
        }
    }

    /// Route queued arena events: cues to the sink, the rest to the log
    fn forward_events(&mut self) {
        for event in self.arena.drain_events() {
            match event {
                GameEvent::Cue(cue) => self.sink.play(cue),
                GameEvent::EnemySpawned { id, kind } => {
                    log::debug!("Spawned {:?} enemy {}", kind, id)
                }
                GameEvent::EnemyDefeated { id } => log::debug!("Enemy {} defeated", id),
                other => log::trace!("{:?}", other),
            }
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.arena.score
    }

    pub fn shots_fired(&self) -> u32 {
        self.arena.shots_fired
    }

    /// Read-only view of the arena
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Render snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        self.arena.snapshot()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("score", &self.arena.score)
            .field("shots_fired", &self.arena.shots_fired)
            .field("tick", &self.arena.time_ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::audio::NullSink;
    use crate::sim::{Enemy, EnemyKind, Rgb};

    #[test]
    fn test_verdict_thresholds() {
        assert_eq!(shot_verdict(10, 5000), None);
        assert_eq!(
            shot_verdict(11, 799),
            Some(GamePhase::Lost(LossReason::ScoreTooLow))
        );
        assert_eq!(shot_verdict(11, 800), Some(GamePhase::Won));
    }

    #[test]
    fn test_apply_input_sets_directions_and_fires() {
        let mut session = Session::new(&Settings::default(), 1, Box::new(NullSink)).expect("valid");
        session.apply_input(&TickInput {
            move_left: true,
            move_right: false,
            fire: true,
        });
        assert!(session.arena().turret.is_moving(Direction::Left));
        assert!(!session.arena().turret.is_moving(Direction::Right));
        assert_eq!(session.shots_fired(), 1);

        session.apply_input(&TickInput::default());
        assert!(!session.arena().turret.is_moving(Direction::Left));
        assert_eq!(session.shots_fired(), 1);
    }

    #[test]
    fn test_enemy_on_gun_loses_and_freezes_session() {
        let mut session = Session::new(&Settings::default(), 6, Box::new(NullSink)).expect("valid");
        session.arena.enemies.clear();
        let id = session.arena.next_entity_id();
        session.arena.enemies.push(Enemy::new(
            id,
            EnemyKind::Big,
            IVec2::new(320, 380),
            Rgb::default(),
        ));

        let summary = session.tick();
        assert_eq!(summary.phase, GamePhase::Lost(LossReason::TurretStruck));
        let tick = session.arena().time_ticks;

        assert_eq!(session.tick(), summary);
        assert_eq!(session.fire(), None);
        assert_eq!(session.shots_fired(), 0);
        assert_eq!(session.arena().time_ticks, tick);
        assert!(session.arena().projectiles.is_empty());
    }

    #[test]
    fn test_enemy_beside_gun_keeps_playing() {
        let mut session = Session::new(&Settings::default(), 6, Box::new(NullSink)).expect("valid");
        session.arena.enemies.clear();
        session.arena.spawn_countdown = 10_000;
        let id = session.arena.next_entity_id();
        let mut enemy = Enemy::new(id, EnemyKind::Big, IVec2::new(260, 440), Rgb::default());
        enemy.speed = 0.0;
        session.arena.enemies.push(enemy);

        assert_eq!(session.tick().phase, GamePhase::Playing);
        assert!(session.arena().enemy(id).is_some());
    }

    #[test]
    fn test_phase_is_over() {
        assert!(!GamePhase::Playing.is_over());
        assert!(GamePhase::Won.is_over());
        assert!(GamePhase::Lost(LossReason::TurretStruck).is_over());
    }
}
