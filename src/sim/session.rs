//! Session driver
//!
//! Owns the controllers and the single bullet list and runs them in a fixed
//! order once per animation frame: player, swarm, then the invasion check.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::player::PlayerController;
use super::state::{Bullet, Enemy, GamePhase, Player};
use super::swarm::Swarm;
use super::tick::{InputSnapshot, Simulatable, TickContext};
use crate::error::Result;
use crate::renderer::{DrawList, RenderSink};
use crate::settings::Settings;

/// One game from first wave to game over (and any restarts)
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    player: PlayerController,
    swarm: Swarm,
    /// Shared between the controllers, lent to each in turn
    bullets: Vec<Bullet>,
    rng: Pcg32,
    phase: GamePhase,
    /// Ticks simulated since the last (re)start
    ticks: u64,
}

impl Session {
    /// Validate the settings and spawn the first wave at clock time `now`
    pub fn new(settings: Settings, seed: u64, now: f64) -> Result<Self> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let player = PlayerController::new(&settings);
        let swarm = Swarm::new(&settings, now, &mut rng);
        log::info!(
            "Session started (seed {}, {} enemies per wave)",
            seed,
            settings.formation.count()
        );

        Ok(Self {
            settings,
            player,
            swarm,
            bullets: Vec::new(),
            rng,
            phase: GamePhase::Playing,
            ticks: 0,
        })
    }

    /// Advance one frame. Returns `true` when the game is over, either
    /// because this tick ended it or because it already had; a finished
    /// session ignores further ticks until [`Session::restart`].
    pub fn tick(&mut self, input: &mut InputSnapshot, now: f64) -> bool {
        if self.phase == GamePhase::GameOver {
            return true;
        }

        let mut ctx = TickContext {
            now,
            input,
            bullets: &mut self.bullets,
            rng: &mut self.rng,
        };
        self.player.advance(&mut ctx);
        self.swarm.advance(&mut ctx);
        self.ticks += 1;

        if self.invaded() {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: wave {}, score {} after {} ticks",
                self.swarm.wave() + 1,
                self.swarm.score(),
                self.ticks
            );
            return true;
        }
        false
    }

    /// Back to the starting state, ready to tick again
    pub fn restart(&mut self, now: f64) {
        self.bullets.clear();
        self.player.reset(now, &mut self.rng);
        self.swarm.reset(now, &mut self.rng);
        self.phase = GamePhase::Playing;
        self.ticks = 0;
        log::info!("Session restarted");
    }

    /// Any enemy's bottom edge below the player's top edge. Only the
    /// vertical extent matters; horizontal position is ignored.
    fn invaded(&self) -> bool {
        let line = self.player.player().body.top();
        self.swarm.lowest_edge().is_some_and(|bottom| bottom > line)
    }

    /// Describe the frame: player, enemies, then bullets
    pub fn render(&self, sink: &mut dyn RenderSink) {
        self.player.render(sink);
        self.swarm.render(sink);
        for bullet in &self.bullets {
            sink.bullet(&bullet.body);
        }
    }

    /// Convenience wrapper around [`Session::render`]
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::new();
        self.render(&mut list);
        list
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.swarm.score()
    }

    /// 1-based wave number for display
    pub fn wave(&self) -> u32 {
        self.swarm.wave() + 1
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn player(&self) -> &Player {
        self.player.player()
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.swarm.enemies()
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use crate::sim::Formation;

    fn session() -> Session {
        Session::new(Settings::default(), 12345, 0.0).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let mut settings = Settings::default();
        settings.enemy.step_down = 0.0;
        assert!(matches!(
            Session::new(settings, 1, 0.0),
            Err(ConfigError::NonPositive { field: "enemy.step_down", .. })
        ));
    }

    #[test]
    fn test_new_rejects_formation_wider_than_playfield() {
        let mut settings = Settings::default();
        settings.formation = Formation::grid(1, 14);
        settings.layout.reference_cols = 14;
        assert!(matches!(
            Session::new(settings, 1, 0.0),
            Err(ConfigError::FormationOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_first_wave_sweeps_before_dropping() {
        let mut s = session();
        let mut input = InputSnapshot::default();
        let start_y = s.enemies()[0].body.pos.y;
        for t in 0..10 {
            assert!(!s.tick(&mut input, t as f64 * 16.0));
        }
        assert_eq!(s.enemies()[0].body.pos.y, start_y);
        assert_eq!(s.swarm().direction(), 1.0);
    }

    #[test]
    fn test_tick_runs_player_then_swarm() {
        let mut s = session();
        let mut input = InputSnapshot {
            right: true,
            fire: true,
            ..Default::default()
        };
        let start_x = s.player().body.pos.x;
        let first_enemy = s.enemies()[0].body.pos;

        assert!(!s.tick(&mut input, 16.0));
        assert!(!input.fire);
        assert_eq!(s.player().body.pos.x, start_x + s.settings().player.speed);
        assert_eq!(s.bullets().len(), 1);
        assert_eq!(
            s.enemies()[0].body.pos.x,
            first_enemy.x + s.settings().enemy.initial_speed
        );
        assert_eq!(s.ticks(), 1);
    }

    #[test]
    fn test_invasion_ends_game_and_freezes() {
        let mut s = session();
        let line = s.player().body.top();
        // Push an enemy so its bottom edge sits one pixel past the player's top
        let size = s.settings().enemy.size;
        s.swarm.enemies_mut()[0].body.pos.y = line - size + 1.0;

        let mut input = InputSnapshot::default();
        assert!(s.tick(&mut input, 0.0));
        assert!(s.is_game_over());

        // Frozen: nothing moves any more
        let frozen = s.enemies()[0].body.pos;
        input.right = true;
        assert!(s.tick(&mut input, 100.0));
        assert_eq!(s.enemies()[0].body.pos, frozen);
        assert_eq!(s.ticks(), 1);
    }

    #[test]
    fn test_touching_player_row_is_not_invasion() {
        let mut s = session();
        let line = s.player().body.top();
        let size = s.settings().enemy.size;
        for enemy in s.swarm.enemies_mut() {
            enemy.body.pos.y = 0.0;
        }
        s.swarm.enemies_mut()[0].body.pos.y = line - size;
        let mut input = InputSnapshot::default();
        assert!(!s.tick(&mut input, 0.0));
    }

    #[test]
    fn test_invasion_ignores_horizontal_position() {
        let mut s = session();
        let line = s.player().body.top();
        // Far left of the player, still below the line
        s.swarm.enemies_mut()[0].body.pos = glam::Vec2::new(0.0, line);
        let mut input = InputSnapshot::default();
        assert!(s.tick(&mut input, 0.0));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session();
        let mut input = InputSnapshot {
            left: true,
            ..Default::default()
        };
        for t in 0..30 {
            input.fire = true;
            s.tick(&mut input, t as f64 * 16.0);
        }
        s.swarm.enemies_mut()[0].body.pos.y = 10_000.0;
        assert!(s.tick(&mut input, 1000.0));

        s.restart(2000.0);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.player().body.pos, s.settings().player_start());
        assert!(s.bullets().is_empty());
        assert_eq!(s.score(), 0);
        assert_eq!(s.wave(), 1);
        assert_eq!(s.swarm().speed(), s.settings().enemy.initial_speed);
        assert_eq!(s.enemies().len(), s.settings().formation.count());
        assert_eq!(s.ticks(), 0);

        input = InputSnapshot::default();
        assert!(!s.tick(&mut input, 2016.0));
    }

    #[test]
    fn test_shooting_down_a_wave() {
        // One enemy directly above the player; fire until the wave turns over
        let mut settings = Settings::default();
        settings.formation = Formation::grid(1, 1);
        settings.layout.reference_cols = 1;
        settings.layout.reference_rows = 1;
        settings.layout.offset_x = settings.player_start().x;
        settings.enemy.initial_speed = 0.1;
        let mut s = Session::new(settings, 7, 0.0).unwrap();

        let mut input = InputSnapshot::default();
        let mut now = 0.0;
        while s.wave() == 1 && now < 10_000.0 {
            input.fire = true;
            assert!(!s.tick(&mut input, now));
            now += 16.0;
        }
        assert_eq!(s.wave(), 2);
        assert_eq!(s.score(), s.settings().enemy.score_per_hit);
        assert!(s.bullets().is_empty());
        assert!(s.swarm().speed() > s.settings().enemy.initial_speed);
    }

    #[test]
    fn test_no_bullet_scores_twice() {
        let mut settings = Settings::default();
        settings.formation = Formation::grid(2, 10);
        let mut s = Session::new(settings, 99, 0.0).unwrap();
        let mut input = InputSnapshot::default();

        let mut fired = 0u64;
        let mut now = 0.0;
        for t in 0..600 {
            input.fire = t % 3 == 0;
            input.left = (t / 120) % 2 == 0;
            input.right = !input.left;
            if input.fire {
                fired += 1;
            }
            if s.tick(&mut input, now) {
                break;
            }
            now += 16.0;
        }
        let per_hit = s.settings().enemy.score_per_hit;
        assert_eq!(s.score() % per_hit, 0);
        assert!(s.score() / per_hit <= fired);
    }

    #[test]
    fn test_draw_list_covers_everything() {
        let mut s = session();
        let mut input = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        s.tick(&mut input, 0.0);
        let list = s.draw_list();
        assert_eq!(list.player.map(|p| p.body), Some(s.player().body));
        assert_eq!(list.enemies.len(), s.enemies().len());
        assert_eq!(list.bullets.len(), 1);
    }

    #[test]
    fn test_draw_list_reused_across_frames() {
        let mut s = session();
        let mut list = DrawList::new();
        let mut input = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        s.tick(&mut input, 0.0);
        s.render(&mut list);
        assert_eq!(list.bullets.len(), 1);

        input.fire = true;
        s.tick(&mut input, 16.0);
        list.clear();
        s.render(&mut list);
        assert_eq!(list, s.draw_list());
        assert_eq!(list.bullets.len(), 2);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = session();
        let mut b = session();
        let mut input_a = InputSnapshot::default();
        let mut input_b = InputSnapshot::default();
        for t in 0..200 {
            input_a.fire = t % 5 == 0;
            input_b.fire = t % 5 == 0;
            a.tick(&mut input_a, t as f64 * 16.0);
            b.tick(&mut input_b, t as f64 * 16.0);
        }
        assert_eq!(a.enemies(), b.enemies());
        assert_eq!(a.score(), b.score());
    }
}
