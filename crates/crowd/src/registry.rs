//! The read-only catalog of virtual agents.

use std::collections::HashSet;
use std::path::Path;

use brain_core::hash_prompt;
use tracing::info;

use crate::agent::{AgentProfile, VirtualAgent};
use crate::error::OrchestratorError;

/// Immutable roster of virtual agents, loaded once at startup.
///
/// Invariants: at least one agent, unique ids, responsiveness in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<VirtualAgent>,
}

impl AgentRegistry {
    /// Build a registry, validating every agent.
    pub fn new(agents: Vec<VirtualAgent>) -> Result<Self, OrchestratorError> {
        if agents.is_empty() {
            return Err(OrchestratorError::InvalidRegistry(
                "roster has no agents".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for agent in &agents {
            validate_agent(agent)?;
            if !seen.insert(agent.id.as_str()) {
                return Err(OrchestratorError::InvalidRegistry(format!(
                    "duplicate agent id '{}'",
                    agent.id
                )));
            }
        }

        let fingerprint = hash_prompt(
            &agents
                .iter()
                .map(|a| a.persona.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        );
        info!(
            "Agent registry loaded: {} agents (personas {})",
            agents.len(),
            &fingerprint[..12]
        );

        Ok(Self { agents })
    }

    /// The built-in five-agent roster.
    pub fn builtin() -> Self {
        Self {
            agents: builtin_agents(),
        }
    }

    /// Parse a JSON array of agents.
    pub fn from_json_str(json: &str) -> Result<Self, OrchestratorError> {
        let agents: Vec<VirtualAgent> = serde_json::from_str(json)?;
        Self::new(agents)
    }

    /// Load a JSON array of agents from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OrchestratorError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| OrchestratorError::RegistryIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// All agents, in registry order.
    pub fn agents(&self) -> &[VirtualAgent] {
        &self.agents
    }

    /// Look up an agent by id.
    pub fn get(&self, id: &str) -> Option<&VirtualAgent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Never true for a validated registry.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Public view of every agent.
    pub fn profiles(&self) -> Vec<AgentProfile> {
        self.agents.iter().map(VirtualAgent::profile).collect()
    }
}

fn validate_agent(agent: &VirtualAgent) -> Result<(), OrchestratorError> {
    let invalid = |reason: &str| -> Result<(), OrchestratorError> {
        Err(OrchestratorError::InvalidRegistry(format!(
            "agent '{}': {}",
            agent.id, reason
        )))
    };

    if agent.id.trim().is_empty() {
        return invalid("empty id");
    }
    if agent.display_name.trim().is_empty() {
        return invalid("empty display name");
    }
    if agent.persona.trim().is_empty() {
        return invalid("empty persona");
    }
    if !agent.responsiveness.is_finite() || !(0.0..=1.0).contains(&agent.responsiveness) {
        return invalid("responsiveness must be within [0, 1]");
    }
    Ok(())
}

fn builtin_agents() -> Vec<VirtualAgent> {
    vec![
        VirtualAgent::new(
            "lea",
            "Léa",
            "🎲",
            "Tu es Léa, 27 ans, graphiste et fan de jeux de société. Chaleureuse et \
             enthousiaste, tu tutoies tout le monde, tu accueilles les nouveaux venus \
             et tu relances souvent la conversation avec une question.",
            &["jeux de société", "illustration", "cuisine"],
            0.8,
        ),
        VirtualAgent::new(
            "max",
            "Max",
            "🎮",
            "Tu es Max, 22 ans, étudiant en informatique et joueur passionné. Tu as \
             un humour pince-sans-rire, tu écris vite, sans majuscules, et tu aimes \
             donner des astuces techniques.",
            &["jeux vidéo", "speedrun", "technologie"],
            0.7,
        ),
        VirtualAgent::new(
            "karim",
            "Karim",
            "⚽",
            "Tu es Karim, 31 ans, coach sportif. Blagueur et bienveillant, tu \
             encourages les autres et tu ramènes tout au foot ou à la musique.",
            &["football", "musique", "voyages"],
            0.6,
        ),
        VirtualAgent::new(
            "sofia",
            "Sofia",
            "📚",
            "Tu es Sofia, 35 ans, bibliothécaire. Posée et curieuse, tu choisis tes \
             mots, tu cites parfois un livre et tu n'interviens que quand tu as \
             quelque chose à apporter.",
            &["littérature", "philosophie", "thé"],
            0.5,
        ),
        VirtualAgent::new(
            "nina",
            "Nina",
            "🌱",
            "Tu es Nina, 29 ans, paysagiste. Discrète mais serviable, tu donnes des \
             conseils concrets et tu parles volontiers de nature et de randonnée.",
            &["jardinage", "écologie", "randonnée"],
            0.4,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str, responsiveness: f64) -> VirtualAgent {
        VirtualAgent::new(id, id.to_uppercase(), "*", "persona", &[], responsiveness)
    }

    #[test]
    fn test_builtin_roster_is_valid() {
        let builtin = AgentRegistry::builtin();
        let validated = AgentRegistry::new(builtin.agents().to_vec()).unwrap();

        assert_eq!(validated.len(), 5);
        assert!(!validated.is_empty());
        assert_eq!(validated.get("lea").unwrap().display_name, "Léa");
        assert!(validated.get("nobody").is_none());
    }

    #[test]
    fn test_rejects_empty_roster() {
        let err = AgentRegistry::new(Vec::new()).unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidRegistry(_)));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = AgentRegistry::new(vec![agent("a", 0.5), agent("a", 0.2)]).unwrap_err();
        assert!(err.to_string().contains("duplicate agent id 'a'"));
    }

    #[test]
    fn test_rejects_out_of_range_responsiveness() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let err = AgentRegistry::new(vec![agent("a", bad)]).unwrap_err();
            assert!(err.to_string().contains("responsiveness"));
        }
    }

    #[test]
    fn test_rejects_blank_persona() {
        let mut blank = agent("a", 0.5);
        blank.persona = "   ".to_string();
        assert!(AgentRegistry::new(vec![blank]).is_err());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": "zoe", "display_name": "Zoé", "avatar": "🎨", "persona": "Tu es Zoé.",
             "interests": ["peinture"], "responsiveness": 0.9},
            {"id": "tom", "display_name": "Tom", "avatar": "🎸", "persona": "Tu es Tom.",
             "responsiveness": 0.3}
        ]"#;

        let registry = AgentRegistry::from_json_str(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.agents()[0].interests, vec!["peinture".to_string()]);
    }

    #[test]
    fn test_from_json_str_malformed() {
        let err = AgentRegistry::from_json_str("[{").unwrap_err();
        assert!(matches!(err, OrchestratorError::RegistryParse(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = AgentRegistry::from_json_file("/nonexistent/agents.json").unwrap_err();
        assert!(matches!(err, OrchestratorError::RegistryIo { .. }));
    }

    #[test]
    fn test_profiles_follow_registry_order() {
        let ids: Vec<String> = AgentRegistry::builtin()
            .profiles()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["lea", "max", "karim", "sofia", "nina"]);
    }
}
