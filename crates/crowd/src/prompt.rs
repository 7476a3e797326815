//! Persona-conditioned generation requests.

use brain_core::{ChatTurn, GenerationRequest};

use crate::agent::VirtualAgent;
use crate::classifier::Classification;
use crate::config::OrchestratorConfig;

const STYLE_RULES: &str = "Tu participes à un salon de discussion en ligne avec d'autres joueurs. \
Réponds en une ou deux phrases courtes, sur un ton naturel de chat. \
Ne te présente pas comme une IA, ne signe pas ton message et n'utilise pas de guillemets.";

fn system_prompt(agent: &VirtualAgent) -> String {
    let mut prompt = agent.persona.trim().to_string();
    if !agent.interests.is_empty() {
        prompt.push_str(&format!(
            "\n\nTes centres d'intérêt : {}.",
            agent.interests.join(", ")
        ));
    }
    prompt.push_str("\n\n");
    prompt.push_str(STYLE_RULES);
    prompt
}

fn intent_hint(classification: &Classification) -> &'static str {
    if classification.is_greeting {
        "Il dit bonjour : accueille-le."
    } else if classification.is_help_request {
        "Il demande de l'aide : propose quelque chose de concret."
    } else if classification.is_question {
        "Il pose une question : donne ton avis."
    } else if classification.is_sharing {
        "Il partage quelque chose : réagis avec intérêt."
    } else {
        "Réagis brièvement, sans forcément relancer."
    }
}

/// Request for an agent's reply to a chat line.
pub fn response_request(
    agent: &VirtualAgent,
    message_text: &str,
    context: Vec<ChatTurn>,
    opener: &str,
    classification: &Classification,
    config: &OrchestratorConfig,
) -> GenerationRequest {
    let prompt = format!(
        "Un joueur vient d'écrire : \"{}\"\n{}\nCommence ta réponse par « {} » puis continue avec ta personnalité.",
        message_text,
        intent_hint(classification),
        opener
    );

    GenerationRequest::new(&agent.id, system_prompt(agent), prompt)
        .with_context(context)
        .with_max_tokens(config.response_max_tokens)
        .with_temperature(config.response_temperature)
}

/// Request for an unprompted line seeded by a conversation starter.
pub fn spontaneous_request(
    agent: &VirtualAgent,
    starter: &str,
    config: &OrchestratorConfig,
) -> GenerationRequest {
    let prompt = format!(
        "Personne n'a parlé depuis un moment. Lance la conversation en t'inspirant de : \"{}\"\n\
         Reformule avec tes propres mots, si possible en lien avec un de tes centres d'intérêt.",
        starter
    );

    GenerationRequest::new(&agent.id, system_prompt(agent), prompt)
        .with_max_tokens(config.spontaneous_max_tokens)
        .with_temperature(config.response_temperature)
}
