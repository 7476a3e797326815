//! Which virtual players answer a message.

use rand::Rng;

use crate::agent::VirtualAgent;
use crate::classifier::Classification;

/// Weight boost applied to every agent for high-priority messages.
const HIGH_PRIORITY_BOOST: f64 = 1.3;

/// Choose up to `target_count` distinct agents, most responsive first.
///
/// Each candidate in the top `target_count` joins with probability equal to
/// its own responsiveness, except that the first candidate is always taken
/// when nobody has been picked yet. High-priority messages always get at
/// least one responder. The result can be shorter than `target_count`.
pub fn select_agents<'a>(
    classification: &Classification,
    target_count: usize,
    agents: &'a [VirtualAgent],
    rng: &mut impl Rng,
) -> Vec<&'a VirtualAgent> {
    if target_count == 0 || agents.is_empty() {
        return Vec::new();
    }

    let boost = if classification.is_high() {
        HIGH_PRIORITY_BOOST
    } else {
        1.0
    };

    // sort_by is stable: equal weights keep registry order.
    let mut ranked: Vec<&VirtualAgent> = agents.iter().collect();
    ranked.sort_by(|a, b| {
        (coin_weight(b.responsiveness) * boost).total_cmp(&(coin_weight(a.responsiveness) * boost))
    });

    let mut selected: Vec<&VirtualAgent> = Vec::with_capacity(target_count);
    for agent in ranked.iter().copied().take(target_count) {
        let joins = rng.gen_bool(coin_weight(agent.responsiveness));
        if joins || selected.is_empty() {
            selected.push(agent);
        }
    }

    if selected.is_empty() && classification.is_high() {
        selected.push(ranked[0]);
    }

    selected
}

/// Responsiveness as a valid probability; non-finite values never join.
fn coin_weight(responsiveness: f64) -> f64 {
    if responsiveness.is_finite() {
        responsiveness.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::registry::AgentRegistry;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn agent(id: &str, responsiveness: f64) -> VirtualAgent {
        VirtualAgent::new(id, id, "*", "persona", &[], responsiveness)
    }

    fn ids(selected: &[&VirtualAgent]) -> Vec<String> {
        selected.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_zero_target_selects_nobody() {
        let registry = AgentRegistry::builtin();
        let c = classify("Bonjour !");
        let selected = select_agents(&c, 0, registry.agents(), &mut StepRng::new(0, 0));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_empty_roster_selects_nobody() {
        let c = classify("Bonjour !");
        assert!(select_agents(&c, 2, &[], &mut StepRng::new(0, 0)).is_empty());
    }

    #[test]
    fn test_most_responsive_first() {
        let agents = vec![agent("low", 0.2), agent("high", 0.9), agent("mid", 0.5)];
        let c = classify("Bonjour !");
        let selected = select_agents(&c, 2, &agents, &mut StepRng::new(0, 0));
        assert_eq!(ids(&selected), vec!["high", "mid"]);
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let agents = vec![agent("a", 0.5), agent("b", 0.5), agent("c", 0.5)];
        let c = classify("ok");
        let selected = select_agents(&c, 2, &agents, &mut StepRng::new(0, 0));
        assert_eq!(ids(&selected), vec!["a", "b"]);
    }

    #[test]
    fn test_first_candidate_always_taken() {
        // Every coin flip fails, but the first candidate still joins.
        let agents = vec![agent("a", 0.1), agent("b", 0.1)];
        let c = classify("j'aime bien");
        let selected = select_agents(&c, 2, &agents, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(ids(&selected), vec!["a"]);
    }

    #[test]
    fn test_zero_responsiveness_high_priority_still_answered() {
        let agents = vec![agent("a", 0.0), agent("b", 0.0)];
        let c = classify("quelqu'un ?");
        let selected = select_agents(&c, 1, &agents, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_never_duplicates_or_exceeds_target() {
        let registry = AgentRegistry::builtin();
        let mut rng = StdRng::seed_from_u64(3);
        for text in ["Salut !", "comment ça va ?", "j'adore", "ok"] {
            let c = classify(text);
            for target in 0..=3 {
                for _ in 0..100 {
                    let selected = select_agents(&c, target, registry.agents(), &mut rng);
                    let unique: HashSet<_> = selected.iter().map(|a| &a.id).collect();
                    assert_eq!(unique.len(), selected.len());
                    assert!(selected.len() <= target);
                    assert!(selected.len() <= registry.len());
                    if c.is_high() && target > 0 {
                        assert!(!selected.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_second_candidate_uses_raw_responsiveness() {
        // High priority boosts ranking only; the coin stays at 0.5.
        let agents = vec![agent("a", 0.9), agent("b", 0.5)];
        let c = classify("Bonjour, quelqu'un ?");
        assert!(c.is_high());

        let mut rng = StdRng::seed_from_u64(5);
        let joined = (0..4000)
            .filter(|_| select_agents(&c, 2, &agents, &mut rng).len() == 2)
            .count();
        assert!((1800..2200).contains(&joined), "b joined {} / 4000", joined);
    }

    #[test]
    fn test_non_finite_responsiveness_never_panics() {
        let agents = vec![agent("a", 0.8), agent("nan", f64::NAN), agent("inf", f64::INFINITY)];
        let c = classify("Bonjour !");
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            let selected = select_agents(&c, 3, &agents, &mut rng);
            assert!(!selected.is_empty());
        }
        assert_eq!(coin_weight(f64::NAN), 0.0);
        assert_eq!(coin_weight(f64::NEG_INFINITY), 0.0);
        assert_eq!(coin_weight(1.7), 1.0);
    }

    #[test]
    fn test_target_larger_than_roster() {
        let agents = vec![agent("a", 1.0), agent("b", 1.0)];
        let c = classify("Bonjour");
        let selected = select_agents(&c, 5, &agents, &mut StepRng::new(0, 0));
        assert_eq!(selected.len(), 2);
    }
}
