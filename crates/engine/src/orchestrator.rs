//! Online/offline decision logic and the request queue.
//!
//! Per request: the online path runs only when the reachability probe passes
//! and a client is configured; any online failure falls back to the offline
//! simplifier with no retry, so worst-case latency is one round-trip plus the
//! probe timeout. Requests queue behind a single worker task and complete in
//! submission order.

use crate::detect::detect_with_confidence;
use crate::offline::OfflineSimplifier;
use crate::rules::RuleSet;
use crate::session::Session;
use providers::OnlineSimplify;
use services::network::Reachability;
use shared::settings::AppSettings;
use shared::types::{SimplificationResult, SimplifyMode, Utterance};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected at the boundary; the only error a caller ever sees.
    #[error("empty input")]
    EmptyInput,
    /// The worker task is gone (application shutting down).
    #[error("engine closed")]
    EngineClosed,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub probe_timeout: Duration,
    /// When false, never attempt the online path.
    pub auto_switch: bool,
}

impl EngineConfig {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            probe_timeout: Duration::from_millis(settings.probe_timeout_ms),
            auto_switch: settings.auto_switch_mode,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(3),
            auto_switch: true,
        }
    }
}

pub struct Orchestrator {
    offline: OfflineSimplifier,
    online: Option<Box<dyn OnlineSimplify>>,
    probe: Box<dyn Reachability>,
    config: EngineConfig,
    session: Session,
}

impl Orchestrator {
    pub fn new(
        online: Option<Box<dyn OnlineSimplify>>,
        probe: Box<dyn Reachability>,
        config: EngineConfig,
    ) -> Self {
        let rules = Arc::new(RuleSet::builtin());
        Self {
            offline: OfflineSimplifier::new(rules),
            online,
            probe,
            config,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle one request end to end. Every online failure is absorbed into a
    /// successful offline result; `mode` records the path that actually ran.
    pub async fn handle(&mut self, text: &str) -> Result<SimplificationResult, SubmitError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let (language, confidence) = detect_with_confidence(trimmed);
        tracing::info!(
            "detected {} (confidence {:.2})",
            language.as_str(),
            confidence
        );
        let utterance = Utterance::new(trimmed, language);

        let mut skip_reason: Option<String> = None;
        if !self.config.auto_switch {
            skip_reason = Some("online disabled".to_string());
        } else if self.online.is_none() {
            skip_reason = Some("no_key".to_string());
        }

        if skip_reason.is_none() {
            if !self.probe.is_online(self.config.probe_timeout).await {
                tracing::info!("network unreachable, using offline path");
                skip_reason = Some("network_unreachable".to_string());
            } else if let Some(online) = &self.online {
                // At most one online attempt, then straight to offline.
                match online.simplify(trimmed, language).await {
                    Ok(output) => {
                        let result = SimplificationResult {
                            utterance,
                            output,
                            mode: SimplifyMode::Online,
                            success: true,
                            error_reason: None,
                        };
                        self.session.push(result.clone());
                        return Ok(result);
                    }
                    Err(e) => {
                        tracing::warn!("online path failed ({}), falling back", e);
                        skip_reason = Some(e.kind().to_string());
                    }
                }
            }
        }

        let output = self.offline.simplify(trimmed, language);
        let result = SimplificationResult {
            utterance,
            output,
            mode: SimplifyMode::Offline,
            success: true,
            error_reason: skip_reason,
        };
        self.session.push(result.clone());
        Ok(result)
    }
}

enum Command {
    Simplify {
        text: String,
        reply: oneshot::Sender<Result<SimplificationResult, SubmitError>>,
    },
    History {
        reply: oneshot::Sender<Vec<SimplificationResult>>,
    },
    Reset,
}

/// Cloneable handle to the worker task. `submit` is synchronous from the
/// caller's point of view; under the hood the request queues behind any
/// outstanding ones and completes in submission order.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl EngineHandle {
    pub fn spawn(mut orchestrator: Orchestrator) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
        tokio::spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    Command::Simplify { text, reply } => {
                        let result = orchestrator.handle(&text).await;
                        let _ = reply.send(result);
                    }
                    Command::History { reply } => {
                        let _ = reply.send(orchestrator.session().entries().to_vec());
                    }
                    Command::Reset => {
                        orchestrator.session.clear();
                        tracing::info!("session cleared");
                    }
                }
            }
        });
        Self { tx }
    }

    pub async fn submit(&self, text: &str) -> Result<SimplificationResult, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Simplify {
                text: text.to_string(),
                reply: reply_tx,
            })
            .map_err(|_| SubmitError::EngineClosed)?;
        reply_rx.await.map_err(|_| SubmitError::EngineClosed)?
    }

    pub async fn history(&self) -> Result<Vec<SimplificationResult>, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::History { reply: reply_tx })
            .map_err(|_| SubmitError::EngineClosed)?;
        reply_rx.await.map_err(|_| SubmitError::EngineClosed)
    }

    pub fn reset(&self) -> Result<(), SubmitError> {
        self.tx
            .send(Command::Reset)
            .map_err(|_| SubmitError::EngineClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::error::ApiError;
    use shared::types::Language;

    struct StubProbe(bool);

    #[async_trait]
    impl Reachability for StubProbe {
        async fn is_online(&self, _budget: Duration) -> bool {
            self.0
        }
    }

    enum StubOnline {
        Succeed(&'static str),
        FailRateLimited,
        FailNetwork,
        Panic,
    }

    #[async_trait]
    impl OnlineSimplify for StubOnline {
        async fn simplify(&self, _text: &str, _language: Language) -> Result<String, ApiError> {
            match self {
                StubOnline::Succeed(out) => Ok(out.to_string()),
                StubOnline::FailRateLimited => Err(ApiError::RateLimited),
                StubOnline::FailNetwork => Err(ApiError::Network("connection refused".into())),
                StubOnline::Panic => panic!("online path must not run"),
            }
        }
    }

    fn orchestrator(
        online: Option<StubOnline>,
        reachable: bool,
        auto_switch: bool,
    ) -> Orchestrator {
        Orchestrator::new(
            online.map(|o| Box::new(o) as Box<dyn OnlineSimplify>),
            Box::new(StubProbe(reachable)),
            EngineConfig {
                probe_timeout: Duration::from_millis(10),
                auto_switch,
            },
        )
    }

    #[tokio::test]
    async fn test_online_success_records_online_mode() {
        let mut orch = orchestrator(Some(StubOnline::Succeed("Aasaan jumla")), true, true);
        let result = orch.handle("Main kal zaroor aaunga").await.unwrap();
        assert_eq!(result.mode, SimplifyMode::Online);
        assert_eq!(result.output, "Aasaan jumla");
        assert!(result.success);
        assert!(result.error_reason.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_never_calls_online() {
        let mut orch = orchestrator(Some(StubOnline::Panic), false, true);
        let result = orch.handle("Main kal zaroor aaunga").await.unwrap();
        assert_eq!(result.mode, SimplifyMode::Offline);
        assert!(result.success);
        assert_eq!(result.error_reason.as_deref(), Some("network_unreachable"));
    }

    #[tokio::test]
    async fn test_api_error_falls_back_to_successful_offline() {
        for stub in [StubOnline::FailRateLimited, StubOnline::FailNetwork] {
            let mut orch = orchestrator(Some(stub), true, true);
            let result = orch
                .handle("Main kal definitely zaroor aapke ghar aaunga")
                .await
                .unwrap();
            assert_eq!(result.mode, SimplifyMode::Offline);
            assert!(result.success, "fallback must still succeed");
            assert_eq!(result.output, "Main kal zaroor aapke ghar aaunga");
        }
    }

    #[tokio::test]
    async fn test_no_client_means_offline() {
        let mut orch = orchestrator(None, true, true);
        let result = orch.handle("Yeh kaam difficult hai").await.unwrap();
        assert_eq!(result.mode, SimplifyMode::Offline);
        assert_eq!(result.error_reason.as_deref(), Some("no_key"));
    }

    #[tokio::test]
    async fn test_auto_switch_off_forces_offline() {
        let mut orch = orchestrator(Some(StubOnline::Panic), true, false);
        let result = orch.handle("Yeh kaam difficult hai").await.unwrap();
        assert_eq!(result.mode, SimplifyMode::Offline);
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_dispatch() {
        let mut orch = orchestrator(Some(StubOnline::Panic), true, true);
        assert!(matches!(
            orch.handle("").await,
            Err(SubmitError::EmptyInput)
        ));
        assert!(matches!(
            orch.handle("   \n").await,
            Err(SubmitError::EmptyInput)
        ));
        assert!(orch.session().is_empty());
    }

    #[tokio::test]
    async fn test_nonempty_input_never_produces_empty_output() {
        let mut orch = orchestrator(None, false, true);
        let result = orch.handle("x").await.unwrap();
        assert!(!result.output.is_empty());
    }

    #[tokio::test]
    async fn test_session_appends_per_request() {
        let mut orch = orchestrator(None, false, true);
        orch.handle("pehla jumla hai").await.unwrap();
        orch.handle("doosra jumla hai").await.unwrap();
        assert_eq!(orch.session().len(), 2);
    }

    #[tokio::test]
    async fn test_handle_processes_in_submission_order() {
        let orch = orchestrator(None, false, true);
        let handle = EngineHandle::spawn(orch);

        let first = handle.submit("pehla jumla hai");
        let second = handle.submit("doosra jumla hai");
        let (r1, r2) = tokio::join!(first, second);
        assert_eq!(r1.unwrap().utterance.text, "pehla jumla hai");
        assert_eq!(r2.unwrap().utterance.text, "doosra jumla hai");

        let history = handle.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].utterance.text, "pehla jumla hai");

        handle.reset().unwrap();
        // Reset is queued behind the submits; a later history read sees it.
        let history = handle.history().await.unwrap();
        assert!(history.is_empty());
    }
}
