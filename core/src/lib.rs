#![allow(clippy::result_large_err)]

pub mod action;
pub mod declare;
pub mod executor;
pub mod name;
pub mod options;
pub mod registry;
pub mod rule;

pub use action::{Action, ActionFault, ActionResult, BoxError, IntoActionResult};
pub use declare::{ContextDeclaration, ContextMeta};
pub use executor::{ContextExecutor, Outcome, Phase};
pub use miette;
pub use name::ContextName;
pub use options::{FaultPolicy, RuleOptions};
pub use registry::{ContextMethod, ContextRegistry, ContextSource, RegistryBuilder};
pub use rule::ContextRule;

#[derive(thiserror::Error, miette::Diagnostic, Debug)]
pub enum Error {
    #[error("{phase} action `{action}` of context \"{context}\" faulted")]
    #[diagnostic(
        code(test_context::action_fault),
        help("the action is registered under this context name; fix the action or drop the name from the test")
    )]
    Action {
        phase: Phase,
        context: ContextName,
        action: String,
        #[source]
        source: ActionFault,
    },
}

impl Error {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Action { phase, .. } => *phase,
        }
    }

    pub fn context(&self) -> &ContextName {
        match self {
            Self::Action { context, .. } => context,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            Self::Action { action, .. } => action,
        }
    }

    /// The fault raised by the action itself.
    pub fn fault(&self) -> &ActionFault {
        match self {
            Self::Action { source, .. } => source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
