//! Static phrase pools.
//!
//! Every pool is non-empty; callers pick from them with
//! `SliceRandom::choose` and fall back to the first entry.

/// Openers that set the tone when answering a greeting.
pub const GREETING_OPENERS: &[&str] = &[
    "Salut !",
    "Coucou !",
    "Hey, bienvenue !",
    "Bonjour bonjour !",
    "Ah, salut toi !",
];

/// Openers for every other kind of reply.
pub const RESPONSE_OPENERS: &[&str] = &[
    "Ah, bonne question !",
    "Perso,",
    "Alors,",
    "Intéressant,",
    "Ha, carrément,",
    "Hmm,",
];

/// Lines an agent can use to start a conversation unprompted.
pub const CONVERSATION_STARTERS: &[&str] = &[
    "Quelqu'un a fait un truc sympa ce week-end ?",
    "Vous jouez à quoi en ce moment ?",
    "Je viens de découvrir un super podcast, ça intéresse quelqu'un ?",
    "C'est calme ici aujourd'hui, vous êtes tous en pause café ?",
    "Petit sondage : plutôt thé ou café ?",
    "Quelqu'un a une recommandation de livre ou de série ?",
];

/// Canned replies to a greeting when generation is down.
pub const FALLBACK_GREETINGS: &[&str] = &[
    "Salut ! Content de te voir par ici 👋",
    "Coucou, bienvenue !",
    "Hello ! Installe-toi, on discutait tranquillement.",
];

/// Canned acknowledgments for anything else.
pub const FALLBACK_ACKNOWLEDGMENTS: &[&str] = &[
    "Ah oui, je vois ce que tu veux dire !",
    "Intéressant, dis-nous-en plus ?",
    "Carrément 😄",
    "Hmm, bonne remarque.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_non_empty() {
        for pool in [
            GREETING_OPENERS,
            RESPONSE_OPENERS,
            CONVERSATION_STARTERS,
            FALLBACK_GREETINGS,
            FALLBACK_ACKNOWLEDGMENTS,
        ] {
            assert!(!pool.is_empty());
            assert!(pool.iter().all(|line| !line.trim().is_empty()));
        }
    }
}
