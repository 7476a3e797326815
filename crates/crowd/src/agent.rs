//! Virtual agent types.

use serde::{Deserialize, Serialize};

/// A simulated chat participant with a fixed persona.
///
/// Agents are loaded once into an [`AgentRegistry`](crate::AgentRegistry)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualAgent {
    /// Unique key.
    pub id: String,
    /// Name shown next to the agent's lines.
    pub display_name: String,
    /// Short glyph shown as the agent's avatar.
    pub avatar: String,
    /// Voice, tone and behaviour, used verbatim in generation requests.
    pub persona: String,
    /// Topic keywords, most important first.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Baseline eagerness to reply, in `[0, 1]`.
    pub responsiveness: f64,
}

impl VirtualAgent {
    /// Create an agent.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        avatar: impl Into<String>,
        persona: impl Into<String>,
        interests: &[&str],
        responsiveness: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar: avatar.into(),
            persona: persona.into(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            responsiveness,
        }
    }

    /// The public view of this agent.
    pub fn profile(&self) -> AgentProfile {
        AgentProfile {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
            interests: self.interests.clone(),
            online: true,
        }
    }
}

/// What the outside world may know about an agent.
///
/// Responsiveness and persona stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: String,
    pub display_name: String,
    pub avatar: String,
    pub interests: Vec<String>,
    pub online: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_hides_responsiveness() {
        let agent = VirtualAgent::new("lea", "Léa", "🎲", "Tu es Léa.", &["jeux"], 0.8);
        let json = serde_json::to_value(agent.profile()).unwrap();

        assert_eq!(json["id"], "lea");
        assert_eq!(json["online"], true);
        assert!(json.get("responsiveness").is_none());
        assert!(json.get("persona").is_none());
    }

    #[test]
    fn test_agent_deserializes_without_interests() {
        let json = r#"{"id":"x","display_name":"X","avatar":"*","persona":"p","responsiveness":0.5}"#;
        let agent: VirtualAgent = serde_json::from_str(json).unwrap();
        assert!(agent.interests.is_empty());
    }
}
