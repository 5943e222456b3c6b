//! Mock tool handlers with predictable responses and call tracking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use voxa_core::{HandlerError, ToolHandler, ToolResult, TurnId};

/// What a mock does when invoked.
#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(ToolResult),
    Fail(HandlerError),
    /// Never settles within any reasonable deadline; for timeout tests.
    Hang,
}

/// A tool handler that returns scripted results and records every call.
///
/// Clones share their call tracking, so keep a clone outside the registry to
/// inspect what the dispatcher did:
///
/// ```rust
/// use voxa_testing::MockHandler;
/// use voxa_core::ToolResult;
///
/// let mock = MockHandler::new().with_result(ToolResult::success("done"));
/// let handle = mock.clone();
/// // ... register `mock`, dispatch, then:
/// assert_eq!(handle.call_count(), 0);
/// ```
#[derive(Clone)]
pub struct MockHandler {
    responses: HashMap<String, MockBehavior>,
    default_behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    call_history: Arc<Mutex<Vec<Value>>>,
}

impl Default for MockHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHandler {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_behavior: MockBehavior::Respond(ToolResult::success("mock response")),
            call_count: Arc::new(Mutex::new(0)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the default result for any unmatched arguments.
    pub fn with_result(mut self, result: ToolResult) -> Self {
        self.default_behavior = MockBehavior::Respond(result);
        self
    }

    /// Script a result for one specific set of arguments.
    pub fn with_response(mut self, args: Value, result: ToolResult) -> Self {
        self.responses
            .insert(args.to_string(), MockBehavior::Respond(result));
        self
    }

    /// Fail every unmatched call with the given handler error.
    pub fn with_failure(mut self, error: HandlerError) -> Self {
        self.default_behavior = MockBehavior::Fail(error);
        self
    }

    /// Never settle; for exercising the dispatcher's deadline.
    pub fn with_hang(mut self) -> Self {
        self.default_behavior = MockBehavior::Hang;
        self
    }

    /// How many times this mock has been invoked.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The arguments of every invocation, in order.
    pub fn call_history(&self) -> Vec<Value> {
        self.call_history.lock().unwrap().clone()
    }

    /// Whether the mock was ever invoked with these exact arguments.
    pub fn was_called_with(&self, args: &Value) -> bool {
        self.call_history.lock().unwrap().contains(args)
    }

    /// Reset call tracking.
    pub fn reset(&self) {
        *self.call_count.lock().unwrap() = 0;
        self.call_history.lock().unwrap().clear();
    }
}

#[async_trait]
impl ToolHandler for MockHandler {
    async fn invoke(&self, args: Value, _turn: TurnId) -> Result<ToolResult, HandlerError> {
        *self.call_count.lock().unwrap() += 1;
        self.call_history.lock().unwrap().push(args.clone());

        let behavior = self
            .responses
            .get(&args.to_string())
            .unwrap_or(&self.default_behavior);
        match behavior {
            MockBehavior::Respond(result) => Ok(result.clone()),
            MockBehavior::Fail(error) => Err(error.clone()),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ToolResult::success("never"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_response_wins_over_default() {
        let mock = MockHandler::new()
            .with_result(ToolResult::success("default"))
            .with_response(
                serde_json::json!({ "address": "0xabc" }),
                ToolResult::success("scripted"),
            );

        let scripted = mock
            .invoke(serde_json::json!({ "address": "0xabc" }), TurnId::random())
            .await
            .unwrap();
        assert_eq!(scripted.response(), "scripted");

        let default = mock
            .invoke(serde_json::json!({ "address": "0xother" }), TurnId::random())
            .await
            .unwrap();
        assert_eq!(default.response(), "default");
    }

    #[tokio::test]
    async fn tracking_is_shared_across_clones() {
        let mock = MockHandler::new();
        let handle = mock.clone();

        mock.invoke(serde_json::json!({ "n": 1 }), TurnId::random())
            .await
            .unwrap();

        assert_eq!(handle.call_count(), 1);
        assert!(handle.was_called_with(&serde_json::json!({ "n": 1 })));

        handle.reset();
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn failure_mode_returns_the_error() {
        let mock = MockHandler::new().with_failure(HandlerError::Network("down".into()));
        let err = mock
            .invoke(serde_json::json!({}), TurnId::random())
            .await
            .unwrap_err();
        assert_eq!(err, HandlerError::Network("down".into()));
    }
}
