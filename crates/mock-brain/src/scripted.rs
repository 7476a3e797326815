//! Scripted brain implementation - per-agent canned behaviour.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use brain_core::{async_trait, Brain, BrainError, GenerationRequest};
use tokio::time::sleep;

/// A brain whose answer depends on which agent the request is for.
///
/// Each agent can get a fixed reply, a forced failure, or an artificial
/// latency. Every request is recorded so tests can inspect what the
/// orchestrator actually sent.
#[derive(Debug)]
pub struct ScriptedBrain {
    default_reply: String,
    replies: HashMap<String, String>,
    failing: HashSet<String>,
    latencies: HashMap<String, Duration>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl Default for ScriptedBrain {
    fn default() -> Self {
        Self::new("ok")
    }
}

impl ScriptedBrain {
    /// Create a brain that answers every agent with `default_reply`.
    pub fn new(default_reply: impl Into<String>) -> Self {
        Self {
            default_reply: default_reply.into(),
            replies: HashMap::new(),
            failing: HashSet::new(),
            latencies: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer requests for `agent_id` with `text`.
    pub fn reply(mut self, agent_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.replies.insert(agent_id.into(), text.into());
        self
    }

    /// Fail every request for `agent_id`.
    pub fn fail_for(mut self, agent_id: impl Into<String>) -> Self {
        self.failing.insert(agent_id.into());
        self
    }

    /// Sleep before answering requests for `agent_id`.
    pub fn latency_for(mut self, agent_id: impl Into<String>, latency: Duration) -> Self {
        self.latencies.insert(agent_id.into(), latency);
        self
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError> {
        let agent_id = request.agent_id.clone();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        if let Some(latency) = self.latencies.get(&agent_id) {
            sleep(*latency).await;
        }

        if self.failing.contains(&agent_id) {
            return Err(BrainError::ProcessingFailed(format!(
                "scripted failure for {}",
                agent_id
            )));
        }

        Ok(self
            .replies
            .get(&agent_id)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone()))
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
