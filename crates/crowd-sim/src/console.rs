//! Console sink that prints lines and records them as shared context.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brain_core::ChatTurn;
use crowd::{GeneratedResponse, OrchestratorError, ResponseKind, ResponseSink, SpontaneousMessage};

/// Most turns kept in the room transcript.
const TRANSCRIPT_LIMIT: usize = 50;

/// Room transcript shared between the input loop and the sink.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Arc<Mutex<VecDeque<ChatTurn>>>,
}

impl Transcript {
    pub fn push(&self, turn: ChatTurn) {
        let mut turns = self.turns.lock().unwrap_or_else(|e| e.into_inner());
        turns.push_back(turn);
        while turns.len() > TRANSCRIPT_LIMIT {
            turns.pop_front();
        }
    }

    /// Every recorded turn, oldest first.
    pub fn snapshot(&self) -> Vec<ChatTurn> {
        self.turns
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

/// Prints every delivered line to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    transcript: Transcript,
}

impl ConsoleSink {
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript }
    }
}

#[async_trait]
impl ResponseSink for ConsoleSink {
    async fn deliver_response(&self, response: &GeneratedResponse) -> Result<(), OrchestratorError> {
        let marker = match response.kind {
            ResponseKind::Response => "",
            ResponseKind::Fallback => " (hors ligne)",
        };
        println!(
            "{} {}{}: {}",
            response.avatar, response.display_name, marker, response.text
        );
        self.transcript.push(response.as_turn());
        Ok(())
    }

    async fn deliver_spontaneous(
        &self,
        message: &SpontaneousMessage,
    ) -> Result<(), OrchestratorError> {
        println!("{} {} ~ {}", message.avatar, message.display_name, message.text);
        self.transcript.push(message.as_turn());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_is_bounded() {
        let transcript = Transcript::default();
        for i in 0..(TRANSCRIPT_LIMIT + 5) {
            transcript.push(ChatTurn::new("Alice", i.to_string()));
        }

        let turns = transcript.snapshot();
        assert_eq!(turns.len(), TRANSCRIPT_LIMIT);
        assert_eq!(turns[0].text, "5");
    }
}
