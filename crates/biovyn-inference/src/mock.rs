//! Scripted mock providers for deterministic chain testing.
//!
//! Unlike probabilistic failure injection, each mock carries exactly one
//! scripted outcome (succeed, fail, or hang), so tests can assert the exact
//! attempt order the chain made via a shared [`CallLog`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use biovyn_core::{DiagramPayload, FallbackProvider, Payload, ProviderError, ProviderResult};

/// Shared record of provider ids in invocation order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: &str) {
        self.0.lock().unwrap().push(id.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Stub payload for providers constructed without an explicit script.
pub trait StubPayload {
    fn stub() -> Self;
}

impl StubPayload for String {
    fn stub() -> Self {
        "scripted response".to_string()
    }
}

impl StubPayload for DiagramPayload {
    fn stub() -> Self {
        DiagramPayload::Url("stub://diagram".to_string())
    }
}

/// Shared record of the exact request strings a provider received.
#[derive(Clone, Default)]
pub struct PromptLog(Arc<Mutex<Vec<String>>>);

impl PromptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, prompt: &str) {
        self.0.lock().unwrap().push(prompt.to_string());
    }

    pub fn prompts(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

enum Script<P> {
    Succeed(P),
    Fail(ProviderError),
    Hang(Duration),
}

/// A provider whose single outcome is scripted at construction.
pub struct ScriptedProvider<P> {
    id: &'static str,
    log: CallLog,
    prompts: Option<PromptLog>,
    script: Script<P>,
}

pub type ScriptedTextProvider = ScriptedProvider<String>;
pub type ScriptedDiagramProvider = ScriptedProvider<DiagramPayload>;

impl<P: StubPayload> ScriptedProvider<P> {
    /// A provider that succeeds with a stub payload.
    pub fn new(id: &'static str, log: CallLog) -> Self {
        Self {
            id,
            log,
            prompts: None,
            script: Script::Succeed(P::stub()),
        }
    }
}

impl<P> ScriptedProvider<P> {
    /// Script a success with the given payload.
    pub fn ok(mut self, payload: impl Into<P>) -> Self {
        self.script = Script::Succeed(payload.into());
        self
    }

    /// Script a failure.
    pub fn err(mut self, error: ProviderError) -> Self {
        self.script = Script::Fail(error);
        self
    }

    /// Script a hang longer than any sane chain timeout.
    pub fn hang(mut self, duration: Duration) -> Self {
        self.script = Script::Hang(duration);
        self
    }

    /// Also record every request string this provider receives.
    pub fn record_prompts(mut self, prompts: PromptLog) -> Self {
        self.prompts = Some(prompts);
        self
    }
}

fn copy_error(error: &ProviderError) -> ProviderError {
    match error {
        ProviderError::Timeout(d) => ProviderError::Timeout(*d),
        ProviderError::Unreachable(m) => ProviderError::Unreachable(m.clone()),
        ProviderError::BadResponse(m) => ProviderError::BadResponse(m.clone()),
        ProviderError::Unauthorized(m) => ProviderError::Unauthorized(m.clone()),
        ProviderError::NotFound(m) => ProviderError::NotFound(m.clone()),
        ProviderError::EmptyResult(m) => ProviderError::EmptyResult(m.clone()),
    }
}

#[async_trait]
impl<P> FallbackProvider for ScriptedProvider<P>
where
    P: Payload + Clone + Send + Sync + 'static,
{
    type Output = P;

    fn id(&self) -> &'static str {
        self.id
    }

    async fn invoke(&self, request: &str) -> ProviderResult<P> {
        self.log.record(self.id);
        if let Some(prompts) = &self.prompts {
            prompts.record(request);
        }
        match &self.script {
            Script::Succeed(payload) => Ok(payload.clone()),
            Script::Fail(error) => Err(copy_error(error)),
            Script::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Err(ProviderError::Unreachable("hung provider woke up".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_success_and_log() {
        let log = CallLog::new();
        let provider = ScriptedTextProvider::new("stub", log.clone()).ok("hello");

        assert_eq!(provider.invoke("q").await.unwrap(), "hello");
        assert_eq!(log.calls(), vec!["stub"]);
    }

    #[tokio::test]
    async fn test_scripted_failure_repeats() {
        let log = CallLog::new();
        let provider = ScriptedTextProvider::new("down", log.clone())
            .err(ProviderError::Unreachable("refused".to_string()));

        assert!(provider.invoke("q").await.is_err());
        assert!(provider.invoke("q").await.is_err());
        assert_eq!(log.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_default_stub_payloads_are_usable() {
        let text = ScriptedTextProvider::new("t", CallLog::new());
        assert!(text.invoke("q").await.unwrap().is_usable());

        let diagram = ScriptedDiagramProvider::new("d", CallLog::new());
        assert!(diagram.invoke("q").await.unwrap().is_usable());
    }
}
