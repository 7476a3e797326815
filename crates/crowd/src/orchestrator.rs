//! Main orchestrator that turns a chat line into staggered agent replies.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use brain_core::{Brain, BrainError, GenerationRequest};
use futures::stream::{FuturesOrdered, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::agent::{AgentProfile, VirtualAgent};
use crate::classifier::classify;
use crate::config::OrchestratorConfig;
use crate::error::OrchestratorError;
use crate::fallback::{fallback_reply, pick_line};
use crate::message::{
    GeneratedResponse, IncomingMessage, ResponseBatch, ResponseKind, SpontaneousKind,
    SpontaneousMessage,
};
use crate::phrases::{CONVERSATION_STARTERS, GREETING_OPENERS, RESPONSE_OPENERS};
use crate::planner::plan_response_count;
use crate::prompt::{response_request, spontaneous_request};
use crate::registry::AgentRegistry;
use crate::selector::select_agents;
use crate::sink::ResponseSink;

type SharedRng = Mutex<Box<dyn RngCore + Send>>;

/// Coordinates the virtual players.
///
/// The orchestrator:
/// - Classifies each incoming line and plans how many agents answer
/// - Picks who answers, weighted by responsiveness
/// - Generates every reply concurrently, each bounded by a timeout
/// - Emits replies in selection order, spaced by a random gap
/// - Substitutes a canned line when every generation failed
/// - Produces unprompted lines on demand or on a timer
pub struct Orchestrator<S: ResponseSink> {
    registry: AgentRegistry,
    brain: Arc<dyn Brain>,
    sink: S,
    config: OrchestratorConfig,
    /// Only locked in synchronous sections, never across an await.
    rng: SharedRng,
}

/// One selected agent with everything drawn for it up front.
struct PlannedReply<'a> {
    agent: &'a VirtualAgent,
    request: GenerationRequest,
}

impl<S: ResponseSink> Orchestrator<S> {
    /// Create an orchestrator seeded from OS entropy.
    pub fn new(
        registry: AgentRegistry,
        brain: Arc<dyn Brain>,
        sink: S,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            registry,
            brain,
            sink,
            config,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
        }
    }

    /// Create an orchestrator from configuration.
    ///
    /// Loads the roster from `config.agents_file` when set, otherwise uses
    /// the built-in agents.
    pub fn from_config(
        brain: Arc<dyn Brain>,
        sink: S,
        config: OrchestratorConfig,
    ) -> Result<Self, OrchestratorError> {
        config.validate()?;

        let registry = match &config.agents_file {
            Some(path) => AgentRegistry::from_json_file(path)?,
            None => AgentRegistry::builtin(),
        };

        info!(
            "Orchestrator ready: {} agents, brain {}",
            registry.len(),
            brain.name()
        );

        Ok(Self::new(registry, brain, sink, config))
    }

    /// Replace the random source, e.g. with a seeded generator in tests.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    /// The agent roster.
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// The sink replies are delivered to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Public view of every agent, without tuning parameters.
    pub fn roster(&self) -> Vec<AgentProfile> {
        self.registry.profiles()
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RngCore + Send>> {
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Process an incoming chat line end-to-end.
    ///
    /// This method:
    /// 1. Classifies the text and plans a number of replies
    /// 2. Selects agents and draws openers and gaps
    /// 3. Starts every generation call at once
    /// 4. Emits successful replies in selection order, each at least one
    ///    gap after the previous one, pushing each to the sink
    /// 5. Falls back to a canned line if every call failed
    ///
    /// Only an empty message is an error.
    pub async fn respond(
        &self,
        message: IncomingMessage,
    ) -> Result<ResponseBatch, OrchestratorError> {
        let text = message.text.trim();
        if text.is_empty() {
            return Err(OrchestratorError::EmptyMessage);
        }

        let classification = classify(text);
        let context = message.recent_context(self.config.context_turns);

        let (planned, gaps) = {
            let mut rng = self.rng();
            let target = plan_response_count(&classification, self.registry.len(), &mut *rng);
            let selected = select_agents(&classification, target, self.registry.agents(), &mut *rng);

            let openers = if classification.is_greeting {
                GREETING_OPENERS
            } else {
                RESPONSE_OPENERS
            };

            let planned: Vec<PlannedReply<'_>> = selected
                .into_iter()
                .map(|agent| {
                    let opener = pick_line(openers, &mut *rng);
                    PlannedReply {
                        agent,
                        request: response_request(
                            agent,
                            text,
                            context.clone(),
                            opener,
                            &classification,
                            &self.config,
                        ),
                    }
                })
                .collect();

            let gaps: Vec<Duration> = (1..planned.len())
                .map(|_| self.draw_gap(&mut *rng))
                .collect();

            (planned, gaps)
        };

        info!(
            "Message classified as {:?}: {} agent(s) selected",
            classification.priority,
            planned.len()
        );

        if planned.is_empty() {
            return Ok(ResponseBatch::new(Vec::new(), classification));
        }

        let selected_count = planned.len();
        let mut pending: FuturesOrdered<_> = planned
            .into_iter()
            .map(|reply| async move {
                let result = self.generate(reply.request).await;
                (reply.agent, result)
            })
            .collect();

        let mut responses = Vec::with_capacity(selected_count);
        let mut gaps = gaps.into_iter();
        let mut last_emit: Option<Instant> = None;

        while let Some((agent, result)) = pending.next().await {
            let reply = match result {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("Generation failed for {}: {}", agent.id, e);
                    continue;
                }
            };

            if let Some(last) = last_emit {
                let gap = gaps.next().unwrap_or(self.config.stagger_min);
                sleep_until(last + gap).await;
            }

            let response = GeneratedResponse::new(agent, reply, text, ResponseKind::Response);
            self.deliver(&response).await;
            last_emit = Some(Instant::now());
            responses.push(response);
        }

        if responses.is_empty() {
            warn!(
                "All {} generation call(s) failed, using fallback line",
                selected_count
            );
            let response = {
                let mut rng = self.rng();
                let (agent, line) = fallback_reply(&self.registry, Some(&classification), &mut *rng);
                GeneratedResponse::new(agent, line, text, ResponseKind::Fallback)
            };
            self.deliver(&response).await;
            responses.push(response);
        }

        debug!("Batch complete: {} response(s)", responses.len());
        Ok(ResponseBatch::new(responses, classification))
    }

    /// Produce one unprompted line from a random agent.
    ///
    /// Never fails: if generation fails the conversation starter itself is
    /// returned with kind `Fallback`.
    pub async fn spontaneous(&self) -> SpontaneousMessage {
        let (agent, starter) = {
            let mut rng = self.rng();
            let agents = self.registry.agents();
            let agent = &agents[rng.gen_range(0..agents.len())];
            (agent, pick_line(CONVERSATION_STARTERS, &mut *rng))
        };

        let request = spontaneous_request(agent, starter, &self.config);
        match self.generate(request).await {
            Ok(text) => SpontaneousMessage::new(agent, text, SpontaneousKind::Spontaneous),
            Err(e) => {
                warn!("Spontaneous generation failed for {}: {}", agent.id, e);
                SpontaneousMessage::new(agent, starter, SpontaneousKind::Fallback)
            }
        }
    }

    /// Emit a spontaneous line to the sink every `period`, forever.
    ///
    /// The first line comes one full period after the call.
    pub async fn run_spontaneous(self: Arc<Self>, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        info!(period = ?period, "Starting spontaneous loop");

        loop {
            ticker.tick().await;

            let message = self.spontaneous().await;
            if let Err(e) = self.sink.deliver_spontaneous(&message).await {
                warn!("Failed to deliver spontaneous line: {}", e);
            }
        }
    }

    /// One bounded generation call; empty text counts as a failure.
    async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError> {
        let agent_id = request.agent_id.clone();
        let started = Instant::now();

        let text = tokio::time::timeout(self.config.generation_timeout, self.brain.generate(request))
            .await
            .map_err(|_| BrainError::Timeout)??;

        debug!(
            "Generated for {} in {:?} ({} chars)",
            agent_id,
            started.elapsed(),
            text.len()
        );

        let text = text.trim();
        if text.is_empty() {
            return Err(BrainError::ProcessingFailed("empty completion".to_string()));
        }
        Ok(text.to_string())
    }

    fn draw_gap(&self, rng: &mut impl Rng) -> Duration {
        let min = self.config.stagger_min;
        let max = self.config.stagger_max;
        if max <= min {
            return min;
        }
        let ms = rng.gen_range(min.as_millis() as u64..=max.as_millis() as u64);
        Duration::from_millis(ms)
    }

    async fn deliver(&self, response: &GeneratedResponse) {
        if let Err(e) = self.sink.deliver_response(response).await {
            warn!("Failed to deliver response from {}: {}", response.agent_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NoOpSink;
    use mock_brain::{EchoBrain, FailingBrain};
    use rand::rngs::mock::StepRng;

    fn orchestrator(brain: Arc<dyn Brain>) -> Orchestrator<NoOpSink> {
        let config = OrchestratorConfig::builder()
            .stagger(Duration::ZERO, Duration::ZERO)
            .build();
        Orchestrator::new(AgentRegistry::builtin(), brain, NoOpSink, config)
            .with_rng(StdRng::seed_from_u64(3))
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let orchestrator = orchestrator(Arc::new(EchoBrain::new()));
        let err = orchestrator
            .respond(IncomingMessage::new("   \n"))
            .await
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::EmptyMessage));
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_completion() {
        let orchestrator = orchestrator(Arc::new(EchoBrain::new()));
        let result = orchestrator
            .generate(GenerationRequest::new("lea", "s", "   "))
            .await;
        assert!(matches!(result, Err(BrainError::ProcessingFailed(_))));
    }

    #[tokio::test]
    async fn test_spontaneous_falls_back_to_starter() {
        let orchestrator = orchestrator(Arc::new(FailingBrain::new()));
        let message = orchestrator.spontaneous().await;

        assert_eq!(message.kind, SpontaneousKind::Fallback);
        assert!(CONVERSATION_STARTERS.contains(&message.text.as_str()));
        assert!(orchestrator.registry().get(&message.agent_id).is_some());
    }

    #[test]
    fn test_draw_gap_stays_in_range() {
        let config = OrchestratorConfig::builder()
            .stagger(Duration::from_millis(500), Duration::from_millis(1500))
            .build();
        let orchestrator = Orchestrator::new(
            AgentRegistry::builtin(),
            Arc::new(EchoBrain::new()),
            NoOpSink,
            config,
        );

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let gap = orchestrator.draw_gap(&mut rng);
            assert!(gap >= Duration::from_millis(500) && gap <= Duration::from_millis(1500));
        }

        // Low end of the range with an all-zero source
        assert_eq!(
            orchestrator.draw_gap(&mut StepRng::new(0, 0)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_roster_matches_registry() {
        let orchestrator = orchestrator(Arc::new(EchoBrain::new()));
        let roster = orchestrator.roster();
        assert_eq!(roster.len(), 5);
        assert!(roster.iter().all(|p| p.online));
    }
}
