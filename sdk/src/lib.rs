//! Named setup and teardown contexts for tests.
//!
//! A fixture type declares its contexts once:
//!
//! ```ignore
//! use test_context::{contexts, context_test};
//!
//! #[derive(Default)]
//! struct Pair {
//!     a: Option<u8>,
//! }
//!
//! #[contexts]
//! impl Pair {
//!     #[before_context("a is not null")]
//!     fn set_a(&mut self) {
//!         self.a = Some(1);
//!     }
//! }
//!
//! #[context_test(when = "a is not null")]
//! fn sees_a(pair: &mut Pair) {
//!     assert!(pair.a.is_some());
//! }
//! ```

pub use test_context_core::{
    Action, ActionFault, ActionResult, BoxError, ContextDeclaration, ContextExecutor, ContextMeta,
    ContextMethod, ContextName, ContextRegistry, ContextRule, ContextSource, Error, FaultPolicy,
    IntoActionResult, Outcome, Phase, RegistryBuilder, Result, RuleOptions, miette,
};

pub use test_context_derives::{after_context, before_context, context_test, contexts};
