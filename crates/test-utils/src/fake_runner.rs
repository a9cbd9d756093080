use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use baxoo::errors::Result;
use baxoo::exec::{CommandOutcome, CommandRunner, CommandSpec};

/// Shared record of the commands a [`FakeRunner`] was asked to run.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<CommandSpec>>>);

impl CallLog {
    pub fn specs(&self) -> Vec<CommandSpec> {
        self.0.lock().unwrap().clone()
    }

    /// Command lines only, in invocation order.
    pub fn commands(&self) -> Vec<String> {
        self.specs().into_iter().map(|s| s.command).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any recorded command line starts with `prefix`.
    pub fn any_starts_with(&self, prefix: &str) -> bool {
        self.specs().iter().any(|s| s.command.starts_with(prefix))
    }

    fn push(&self, spec: CommandSpec) -> usize {
        let mut guard = self.0.lock().unwrap();
        guard.push(spec);
        guard.len() - 1
    }
}

type Matcher = Box<dyn Fn(usize, &CommandSpec) -> bool + Send>;

struct FailureRule {
    matches: Matcher,
    outcome: CommandOutcome,
}

/// A fake runner that:
/// - records every command it is asked to run
/// - reports success unless a failure rule matches
/// - optionally runs a side effect when a `git clone` succeeds, so tests can
///   populate a `MockFileSystem` the way a real clone would.
pub struct FakeRunner {
    log: CallLog,
    failures: Vec<FailureRule>,
    on_clone: Option<Box<dyn Fn() + Send>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            failures: Vec::new(),
            on_clone: None,
        }
    }

    /// Handle to the call log; stays valid after the runner is moved.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Fail the `n`-th invocation (0-based) with the given outcome.
    pub fn fail_call(self, n: usize, outcome: CommandOutcome) -> Self {
        self.fail_when(move |index, _| index == n, outcome)
    }

    /// Fail invocations whose command line starts with `prefix` and that run
    /// in `cwd`.
    pub fn fail_command_in(
        self,
        prefix: &str,
        cwd: impl Into<PathBuf>,
        outcome: CommandOutcome,
    ) -> Self {
        let prefix = prefix.to_string();
        let cwd = cwd.into();
        self.fail_when(
            move |_, spec| spec.command.starts_with(&prefix) && spec.cwd == cwd,
            outcome,
        )
    }

    pub fn fail_when(
        mut self,
        matches: impl Fn(usize, &CommandSpec) -> bool + Send + 'static,
        outcome: CommandOutcome,
    ) -> Self {
        self.failures.push(FailureRule {
            matches: Box::new(matches),
            outcome,
        });
        self
    }

    pub fn on_clone(mut self, effect: impl Fn() + Send + 'static) -> Self {
        self.on_clone = Some(Box::new(effect));
        self
    }

    fn outcome_for(&self, index: usize, spec: &CommandSpec) -> CommandOutcome {
        self.failures
            .iter()
            .find(|rule| (rule.matches)(index, spec))
            .map(|rule| rule.outcome.clone())
            .unwrap_or_else(CommandOutcome::success)
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FakeRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeRunner")
            .field("log", &self.log)
            .field("failures", &self.failures.len())
            .finish()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome>> + Send + 'a>> {
        let index = self.log.push(spec.clone());
        let outcome = self.outcome_for(index, spec);

        if outcome.success && spec.command.starts_with("git clone") {
            if let Some(effect) = &self.on_clone {
                effect();
            }
        }

        Box::pin(async move { Ok(outcome) })
    }
}
