//! Delivery of generated lines to whatever displays them.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::OrchestratorError;
use crate::message::{GeneratedResponse, SpontaneousMessage};

/// Receives lines as soon as they are ready.
///
/// Abstracted to support different transports (a web socket, a console,
/// tests). Replies to one message arrive one at a time, in batch order,
/// already spaced by the stagger gap.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    /// Deliver one reply to an incoming message.
    async fn deliver_response(&self, response: &GeneratedResponse) -> Result<(), OrchestratorError>;

    /// Deliver one unprompted line.
    async fn deliver_spontaneous(
        &self,
        message: &SpontaneousMessage,
    ) -> Result<(), OrchestratorError>;
}

/// A sink that discards everything. Callers read the returned batch instead.
#[derive(Debug, Clone, Default)]
pub struct NoOpSink;

#[async_trait]
impl ResponseSink for NoOpSink {
    async fn deliver_response(&self, _response: &GeneratedResponse) -> Result<(), OrchestratorError> {
        Ok(())
    }

    async fn deliver_spontaneous(
        &self,
        _message: &SpontaneousMessage,
    ) -> Result<(), OrchestratorError> {
        Ok(())
    }
}

/// A sink for debugging that logs every line.
#[derive(Debug, Clone, Default)]
pub struct LoggingSink;

#[async_trait]
impl ResponseSink for LoggingSink {
    async fn deliver_response(&self, response: &GeneratedResponse) -> Result<(), OrchestratorError> {
        tracing::info!(
            "[{:?}] {} {}: {}",
            response.kind,
            response.avatar,
            response.display_name,
            response.text
        );
        Ok(())
    }

    async fn deliver_spontaneous(
        &self,
        message: &SpontaneousMessage,
    ) -> Result<(), OrchestratorError> {
        tracing::info!(
            "[{:?}] {} {}: {}",
            message.kind,
            message.avatar,
            message.display_name,
            message.text
        );
        Ok(())
    }
}

/// A line pushed through a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    Response(GeneratedResponse),
    Spontaneous(SpontaneousMessage),
}

/// A sink that forwards lines into a tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Outgoing>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Outgoing>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }

    async fn push(&self, item: Outgoing) -> Result<(), OrchestratorError> {
        self.tx
            .send(item)
            .await
            .map_err(|_| OrchestratorError::DeliveryFailed("receiver dropped".to_string()))
    }
}

#[async_trait]
impl ResponseSink for ChannelSink {
    async fn deliver_response(&self, response: &GeneratedResponse) -> Result<(), OrchestratorError> {
        self.push(Outgoing::Response(response.clone())).await
    }

    async fn deliver_spontaneous(
        &self,
        message: &SpontaneousMessage,
    ) -> Result<(), OrchestratorError> {
        self.push(Outgoing::Spontaneous(message.clone())).await
    }
}

#[async_trait]
impl<T: ResponseSink + ?Sized> ResponseSink for std::sync::Arc<T> {
    async fn deliver_response(&self, response: &GeneratedResponse) -> Result<(), OrchestratorError> {
        (**self).deliver_response(response).await
    }

    async fn deliver_spontaneous(
        &self,
        message: &SpontaneousMessage,
    ) -> Result<(), OrchestratorError> {
        (**self).deliver_spontaneous(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::VirtualAgent;
    use crate::message::{ResponseKind, SpontaneousKind};

    fn agent() -> VirtualAgent {
        VirtualAgent::new("max", "Max", "🎮", "Tu es Max.", &["jeux vidéo"], 0.7)
    }

    #[tokio::test]
    async fn test_noop_sink() {
        let sink = NoOpSink;
        let response = GeneratedResponse::new(&agent(), "yo", "salut", ResponseKind::Response);

        // Should not error
        sink.deliver_response(&response).await.unwrap();
        sink.deliver_spontaneous(&SpontaneousMessage::new(&agent(), "yo", SpontaneousKind::Spontaneous))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_logging_sink() {
        let sink = LoggingSink;
        let response = GeneratedResponse::new(&agent(), "yo", "salut", ResponseKind::Fallback);
        sink.deliver_response(&response).await.unwrap();
    }

    #[tokio::test]
    async fn test_channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::new(4);
        let first = GeneratedResponse::new(&agent(), "un", "salut", ResponseKind::Response);
        let second = SpontaneousMessage::new(&agent(), "deux", SpontaneousKind::Spontaneous);

        sink.deliver_response(&first).await.unwrap();
        sink.deliver_spontaneous(&second).await.unwrap();

        assert_eq!(rx.recv().await, Some(Outgoing::Response(first)));
        assert_eq!(rx.recv().await, Some(Outgoing::Spontaneous(second)));
    }

    #[tokio::test]
    async fn test_channel_sink_reports_closed_receiver() {
        let (sink, rx) = ChannelSink::new(1);
        drop(rx);

        let response = GeneratedResponse::new(&agent(), "yo", "salut", ResponseKind::Response);
        let err = sink.deliver_response(&response).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::DeliveryFailed(_)));
    }
}
