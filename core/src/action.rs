//! Setup and teardown actions bound to a fixture type.

use std::{
    any::Any,
    borrow::Cow,
    fmt,
    panic::{self, AssertUnwindSafe},
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type ActionResult = Result<(), ActionFault>;

/// A fault raised while invoking a single action.
#[derive(Debug, thiserror::Error)]
pub enum ActionFault {
    #[error("action returned an error")]
    Failed(#[source] BoxError),

    #[error("action panicked: {0}")]
    Panicked(String),
}

/// Conversion of an action's return value into an [`ActionResult`].
///
/// Context methods may return `()` or any `Result<(), E>` whose error boxes
/// into [`BoxError`].
pub trait IntoActionResult {
    fn into_action_result(self) -> ActionResult;
}

impl IntoActionResult for () {
    fn into_action_result(self) -> ActionResult {
        Ok(())
    }
}

impl<E: Into<BoxError>> IntoActionResult for Result<(), E> {
    fn into_action_result(self) -> ActionResult {
        self.map_err(|err| ActionFault::Failed(err.into()))
    }
}

type Invoke<T> = Box<dyn Fn(&mut T) -> ActionResult>;

/// A named zero-argument procedure run against a fixture instance.
pub struct Action<T> {
    name: Cow<'static, str>,
    invoke: Invoke<T>,
}

impl<T: 'static> Action<T> {
    pub fn new<F, R>(
        name: impl Into<Cow<'static, str>>,
        action: F,
    ) -> Self
    where
        F: Fn(&mut T) -> R + 'static,
        R: IntoActionResult,
    {
        Self {
            name: name.into(),
            invoke: Box::new(move |instance: &mut T| action(instance).into_action_result()),
        }
    }

    /// Wrap a function that already reports an [`ActionResult`].
    pub fn from_fn(
        name: impl Into<Cow<'static, str>>,
        invoke: fn(&mut T) -> ActionResult,
    ) -> Self {
        Self {
            name: name.into(),
            invoke: Box::new(invoke),
        }
    }
}

impl<T> Action<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the action. Panics are caught and reported as [`ActionFault::Panicked`].
    pub fn invoke(
        &self,
        instance: &mut T,
    ) -> ActionResult {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.invoke)(instance))) {
            Ok(result) => result,
            Err(payload) => Err(ActionFault::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
