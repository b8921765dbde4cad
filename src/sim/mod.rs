//! Simulation module
//!
//! All gameplay logic lives here. Ticks are synchronous and single-threaded:
//! - The host reads its clock once per frame and passes it in
//! - Randomness is cosmetic and comes from a seeded RNG
//! - No rendering or platform dependencies

pub mod collision;
pub mod formation;
pub mod player;
pub mod session;
pub mod state;
pub mod swarm;
pub mod tick;

pub use collision::Entity;
pub use formation::Formation;
pub use player::PlayerController;
pub use session::Session;
pub use state::{Bullet, Enemy, EnemyState, GamePhase, Player};
pub use swarm::Swarm;
pub use tick::{InputSnapshot, Simulatable, TickContext};
