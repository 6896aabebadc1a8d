//! Runs the before, body and after sequence for one test invocation.

use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
};

use crate::{ContextDeclaration, ContextRegistry, Error, FaultPolicy, RuleOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    After,
}

impl fmt::Display for Phase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "before",
            Self::After => "after",
        })
    }
}

/// The value a test body hands back to the executor.
///
/// A faulted outcome stays the primary failure when teardown also faults.
pub trait Outcome {
    fn is_fault(&self) -> bool;
}

impl Outcome for () {
    fn is_fault(&self) -> bool {
        false
    }
}

impl<T, E> Outcome for Result<T, E> {
    fn is_fault(&self) -> bool {
        self.is_err()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContextExecutor {
    options: RuleOptions,
}

impl ContextExecutor {
    pub fn new(options: RuleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Wrap `body` with the actions of every declared context.
    ///
    /// A before-phase fault is returned immediately: the body and the
    /// after-phase are skipped. Once the body has started, the after-phase
    /// always runs. When both the body and the after-phase fault, the body's
    /// outcome (or panic) wins and the teardown fault is reported as
    /// suppressed.
    pub fn execute<T, R, F>(
        &self,
        registry: &ContextRegistry<T>,
        instance: &mut T,
        declaration: &ContextDeclaration,
        body: F,
    ) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
        R: Outcome,
    {
        let span = tracing::debug_span!("contexts", names = ?declaration.names());
        let _guard = span.enter();

        self.run_phase(Phase::Before, registry, instance, declaration)?;

        tracing::trace!("running test body");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *instance)));

        let teardown = self.run_phase(Phase::After, registry, instance, declaration);

        match (outcome, teardown) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(value), Err(err)) if value.is_fault() => {
                suppressed(err);
                Ok(value)
            },
            (Ok(_), Err(err)) => Err(err),
            (Err(payload), teardown) => {
                if let Err(err) = teardown {
                    suppressed(err);
                }
                panic::resume_unwind(payload)
            },
        }
    }

    fn run_phase<T>(
        &self,
        phase: Phase,
        registry: &ContextRegistry<T>,
        instance: &mut T,
        declaration: &ContextDeclaration,
    ) -> crate::Result<()> {
        let mut first = None;

        for context in declaration {
            let actions = match phase {
                Phase::Before => registry.before(context.as_str()),
                Phase::After => registry.after(context.as_str()),
            };

            if actions.is_empty() {
                tracing::debug!(%phase, %context, "no actions registered");
                continue;
            }

            for action in actions {
                tracing::trace!(%phase, %context, action = action.name(), "invoking");

                let Err(source) = action.invoke(instance) else {
                    continue;
                };

                let err = Error::Action {
                    phase,
                    context: context.clone(),
                    action: action.name().to_string(),
                    source,
                };

                match self.options.fault_policy {
                    FaultPolicy::Abort => {
                        tracing::error!(error = %err, "aborting {phase} phase");
                        return Err(err);
                    },
                    FaultPolicy::ContinueRemaining if first.is_none() => {
                        tracing::error!(error = %err, "continuing {phase} phase");
                        first = Some(err);
                    },
                    FaultPolicy::ContinueRemaining => suppressed(err),
                }
            }
        }

        first.map_or(Ok(()), Err)
    }
}

fn suppressed(err: Error) {
    tracing::warn!(error = %err, "suppressed context fault");
    eprintln!("suppressed: {:?}", miette::Report::new(err));
}
