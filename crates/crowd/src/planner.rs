//! How many virtual players should answer a message.

use rand::Rng;

use crate::classifier::{Classification, Priority};

/// Most agents that ever answer the same line, to keep the room readable.
pub const MAX_RESPONDERS: usize = 2;

/// Decide how many agents should respond.
///
/// Tiers are checked top-down and the first match wins. The result is
/// 0, 1 or 2, and never more than `available` agents.
pub fn plan_response_count(
    classification: &Classification,
    available: usize,
    rng: &mut impl Rng,
) -> usize {
    let (p_more, more, less) = if classification.is_greeting {
        (0.8, 2, 1)
    } else if classification.is_question {
        (0.7, 2, 1)
    } else {
        match classification.priority {
            Priority::High => (0.6, 2, 1),
            Priority::Medium => (0.4, 1, 0),
            Priority::Low => (0.3, 1, 0),
        }
    };

    let count = if rng.gen_bool(p_more) { more } else { less };
    count.min(MAX_RESPONDERS).min(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn heads() -> StepRng {
        StepRng::new(0, 0)
    }

    fn tails() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_greeting_tiers() {
        let c = classify("Bonjour !");
        assert_eq!(plan_response_count(&c, 5, &mut heads()), 2);
        assert_eq!(plan_response_count(&c, 5, &mut tails()), 1);
    }

    #[test]
    fn test_question_tiers() {
        let c = classify("Quelqu'un a un avis ?");
        assert_eq!(plan_response_count(&c, 5, &mut heads()), 2);
        assert_eq!(plan_response_count(&c, 5, &mut tails()), 1);
    }

    #[test]
    fn test_help_uses_high_tier() {
        let c = classify("j'ai besoin d'aide");
        assert!(!c.is_question);
        assert_eq!(plan_response_count(&c, 5, &mut heads()), 2);
        assert_eq!(plan_response_count(&c, 5, &mut tails()), 1);
    }

    #[test]
    fn test_medium_and_low_can_be_ignored() {
        let medium = classify("j'adore ce morceau");
        let low = classify("ok");
        assert_eq!(plan_response_count(&medium, 5, &mut heads()), 1);
        assert_eq!(plan_response_count(&medium, 5, &mut tails()), 0);
        assert_eq!(plan_response_count(&low, 5, &mut heads()), 1);
        assert_eq!(plan_response_count(&low, 5, &mut tails()), 0);
    }

    #[test]
    fn test_clamped_to_available_agents() {
        let c = classify("Bonjour !");
        assert_eq!(plan_response_count(&c, 1, &mut heads()), 1);
        assert_eq!(plan_response_count(&c, 0, &mut heads()), 0);
    }

    #[test]
    fn test_always_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for text in ["Salut", "pourquoi ?", "aide", "j'aime ça", "ok", "lol"] {
            let c = classify(text);
            for _ in 0..200 {
                let count = plan_response_count(&c, 5, &mut rng);
                assert!(count <= MAX_RESPONDERS);
                if c.is_high() {
                    assert!(count >= 1);
                }
            }
        }
    }

    fn count_planned(text: &str, wanted: usize, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        let c = classify(text);
        (0..2000)
            .filter(|_| plan_response_count(&c, 5, &mut rng) == wanted)
            .count()
    }

    #[test]
    fn test_tier_frequencies() {
        // Two replies: greeting 0.8, question 0.7, other high priority 0.6.
        let greeting = count_planned("Bonjour !", 2, 1);
        assert!((1500..1700).contains(&greeting), "greeting {}", greeting);

        let question = count_planned("Quelqu'un a un avis ?", 2, 2);
        assert!((1300..1500).contains(&question), "question {}", question);

        let help = count_planned("j'ai besoin d'aide", 2, 3);
        assert!((1100..1300).contains(&help), "help {}", help);

        // One reply: sharing 0.4.
        let sharing = count_planned("j'adore ce morceau", 1, 4);
        assert!((700..900).contains(&sharing), "sharing {}", sharing);
    }

    #[test]
    fn test_low_priority_mostly_silent() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = classify("ok");
        let answered = (0..1000)
            .filter(|_| plan_response_count(&c, 5, &mut rng) > 0)
            .count();
        assert!((200..400).contains(&answered), "answered {}", answered);
    }
}
