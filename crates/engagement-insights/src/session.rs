use std::time::Instant;
use tracing::{info, info_span, Span};

/// Execution context scoped to one task invocation.
///
/// Owns the task's resolved options (input, output, threshold), its tracing
/// span and start instant. Created before the survey is loaded and consumed by
/// [`TaskSession::finish`] once results are written. Pipeline stages run
/// through [`TaskSession::in_scope`], which hands them the options and tags
/// every log event with the task name.
#[derive(Debug)]
pub struct TaskSession<O> {
    options: O,
    span: Span,
    started: Instant,
}

impl<O> TaskSession<O> {
    pub fn start(name: &'static str, options: O) -> Self {
        let span = info_span!("task", task = name);
        span.in_scope(|| info!("task started"));

        Self {
            options,
            span,
            started: Instant::now(),
        }
    }

    pub fn options(&self) -> &O {
        &self.options
    }

    pub fn in_scope<T>(&self, f: impl FnOnce(&O) -> T) -> T {
        self.span.in_scope(|| f(&self.options))
    }

    pub fn finish(self) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.span.in_scope(|| info!(elapsed_ms, "task finished"));
    }
}
