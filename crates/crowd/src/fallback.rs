//! Canned lines for when generation is unavailable.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::VirtualAgent;
use crate::classifier::Classification;
use crate::phrases::{FALLBACK_ACKNOWLEDGMENTS, FALLBACK_GREETINGS};
use crate::registry::AgentRegistry;

/// Pick a uniformly random line from a non-empty pool.
pub(crate) fn pick_line(pool: &'static [&'static str], rng: &mut impl Rng) -> &'static str {
    pool.choose(rng).copied().unwrap_or(pool[0])
}

/// Pick a canned line suited to the triggering message.
///
/// Greetings get a greeting back; everything else, including "no message
/// at all", gets a generic acknowledgment.
pub fn fallback_line(classification: Option<&Classification>, rng: &mut impl Rng) -> &'static str {
    let pool = match classification {
        Some(c) if c.is_greeting => FALLBACK_GREETINGS,
        _ => FALLBACK_ACKNOWLEDGMENTS,
    };
    pick_line(pool, rng)
}

/// A canned line paired with a uniformly random agent.
///
/// Never fails: pools are constant and the registry is never empty.
pub fn fallback_reply<'a>(
    registry: &'a AgentRegistry,
    classification: Option<&Classification>,
    rng: &mut impl Rng,
) -> (&'a VirtualAgent, &'static str) {
    let agents = registry.agents();
    let agent = &agents[rng.gen_range(0..agents.len())];
    (agent, fallback_line(classification, rng))
}
