//! Per-tick plumbing shared by the controllers
//!
//! One tick runs synchronously to completion: the session builds a
//! [`TickContext`] that lends the input snapshot and the single bullet list to
//! each controller in turn, so there is never more than one writer.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Bullet;
use crate::renderer::RenderSink;

/// Host-maintained key state, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire requested since the player controller last consumed it
    pub fire: bool,
}

/// Everything a controller may read or mutate during one tick
pub struct TickContext<'a> {
    /// Monotonic clock reading (ms), taken once for the whole tick
    pub now: f64,
    pub input: &'a mut InputSnapshot,
    /// The one canonical bullet list; the player appends, the swarm consumes
    pub bullets: &'a mut Vec<Bullet>,
    /// Cosmetic randomness (spawn rows, idle frame offsets)
    pub rng: &'a mut Pcg32,
}

/// Capability the session drives each controller through
pub trait Simulatable {
    /// Advance one tick
    fn advance(&mut self, ctx: &mut TickContext<'_>);

    /// Describe the current pose to a drawing surface
    fn render(&self, sink: &mut dyn RenderSink);

    /// Return to construction-time state
    fn reset(&mut self, now: f64, rng: &mut Pcg32);
}
