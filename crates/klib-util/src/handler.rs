// SPDX-License-Identifier: MIT OR Apache-2.0

//! String processing capabilities: validation, transformation and the like.

use std::fmt;

use klib_error::{ErrorChain, forward_error};
use tracing::debug;

/// Processes a string, e.g. validating or transforming it.
pub trait StringHandler {
    /// Handle `input`, returning the processed string.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorChain`] describing why the input was rejected.
    fn handle(&self, input: &str) -> Result<String, ErrorChain>;
}

impl<F> StringHandler for F
where
    F: Fn(&str) -> Result<String, ErrorChain>,
{
    fn handle(&self, input: &str) -> Result<String, ErrorChain> {
        self(input)
    }
}

/// Runs handlers in order, feeding each one the previous output.
///
/// Each stage is registered under a forward id. A failing stage stops the
/// pipeline and its chain is forwarded with that id.
#[derive(Default)]
pub struct HandlerPipeline {
    stages: Vec<(String, Box<dyn StringHandler + Send + Sync>)>,
}

impl HandlerPipeline {
    /// Create an empty pipeline. An empty pipeline returns its input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    #[must_use]
    pub fn stage(
        mut self,
        id: impl Into<String>,
        handler: impl StringHandler + Send + Sync + 'static,
    ) -> Self {
        self.stages.push((id.into(), Box::new(handler)));
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for HandlerPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.stages.iter().map(|(id, _)| id.as_str()).collect();
        f.debug_struct("HandlerPipeline").field("stages", &ids).finish()
    }
}

impl StringHandler for HandlerPipeline {
    fn handle(&self, input: &str) -> Result<String, ErrorChain> {
        let mut current = input.to_string();
        for (id, handler) in &self.stages {
            current = handler.handle(&current).map_err(|chain| {
                debug!(target: "klib.util", stage = %id, "string handler failed");
                forward_error(id, chain)
            })?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klib_error::{Error, ErrorCode};
    use klib_error::testing::assert_chain_ids;
    use std::sync::Mutex;

    /// Test double that records its inputs and replays canned outputs.
    struct RecordingHandler {
        calls: Mutex<Vec<String>>,
        reply: Result<String, ErrorChain>,
    }

    impl RecordingHandler {
        fn returning(reply: Result<String, ErrorChain>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    impl StringHandler for RecordingHandler {
        fn handle(&self, input: &str) -> Result<String, ErrorChain> {
            self.calls.lock().unwrap().push(input.to_string());
            self.reply.clone()
        }
    }

    fn non_empty(input: &str) -> Result<String, ErrorChain> {
        if input.is_empty() {
            Err(Error::new()
                .with_id("non-empty")
                .with_code(ErrorCode::MissingValue)
                .into())
        } else {
            Ok(input.to_string())
        }
    }

    #[test]
    fn closures_are_handlers() {
        let upper = |s: &str| -> Result<String, ErrorChain> { Ok(s.to_uppercase()) };
        assert_eq!(upper.handle("abc").unwrap(), "ABC");
    }

    #[test]
    fn recording_handler_sees_input() {
        let handler = RecordingHandler::returning(Ok("out".into()));
        assert_eq!(handler.handle("in").unwrap(), "out");
        assert_eq!(*handler.calls.lock().unwrap(), ["in"]);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = HandlerPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.handle("same").unwrap(), "same");
    }

    #[test]
    fn stages_run_in_order() {
        let pipeline = HandlerPipeline::new()
            .stage("trim", |s: &str| -> Result<String, ErrorChain> { Ok(s.trim().to_string()) })
            .stage("non-empty", non_empty)
            .stage("upper", |s: &str| -> Result<String, ErrorChain> { Ok(s.to_uppercase()) });
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.handle("  hi  ").unwrap(), "HI");
    }

    #[test]
    fn failing_stage_is_forwarded_with_stage_id() {
        let pipeline = HandlerPipeline::new()
            .stage("trim-stage", |s: &str| -> Result<String, ErrorChain> { Ok(s.trim().to_string()) })
            .stage("validate-stage", non_empty);
        let chain = pipeline.handle("   ").unwrap_err();
        assert_chain_ids(&chain, &["non-empty", "validate-stage"]);
        assert!(chain.first().unwrap().has_code(ErrorCode::MissingValue));
        assert!(chain.last().unwrap().has_code(ErrorCode::ForwardedError));
    }

    #[test]
    fn later_stages_do_not_run_after_failure() {
        let pipeline = HandlerPipeline::new()
            .stage("fail", |_: &str| -> Result<String, ErrorChain> {
                Err(Error::new().with_id("boom").into())
            })
            .stage("never", |_: &str| -> Result<String, ErrorChain> {
                panic!("stage after a failure must not run")
            });
        assert!(pipeline.handle("x").is_err());
    }

    #[test]
    fn debug_lists_stage_ids() {
        let pipeline = HandlerPipeline::new().stage("only", non_empty);
        assert_eq!(format!("{pipeline:?}"), r#"HandlerPipeline { stages: ["only"] }"#);
    }
}
