//! Index of before and after actions by context name.
//!
//! A registry is built once per fixture type and is read-only afterwards.
//! Fixtures either describe their context methods through [`ContextSource`]
//! (usually generated by `#[contexts]`), or register closures explicitly
//! with [`ContextRegistry::builder`].

use std::{
    borrow::Cow,
    collections::{BTreeSet, HashMap},
};

use crate::{Action, ActionResult, ContextName, IntoActionResult};

/// One method of a fixture type along with its context declarations.
pub struct ContextMethod<T> {
    pub name: &'static str,
    pub before: Option<&'static str>,
    pub after: Option<&'static str>,
    pub invoke: fn(&mut T) -> ActionResult,
}

/// Enumerates the context methods declared on a fixture type, in declaration order.
pub trait ContextSource: Sized {
    fn context_methods() -> Vec<ContextMethod<Self>>;
}

type Buckets<T> = HashMap<ContextName, Vec<Action<T>>>;

pub struct ContextRegistry<T> {
    before: Buckets<T>,
    after: Buckets<T>,
}

impl<T> Default for ContextRegistry<T> {
    fn default() -> Self {
        Self {
            before: HashMap::new(),
            after: HashMap::new(),
        }
    }
}

impl<T: ContextSource + 'static> ContextRegistry<T> {
    pub fn scan() -> Self {
        let registry = T::context_methods()
            .into_iter()
            .fold(Self::builder(), RegistryBuilder::method)
            .build();

        tracing::debug!(
            fixture = std::any::type_name::<T>(),
            actions = registry.len(),
            "indexed context methods"
        );

        registry
    }
}

impl<T> ContextRegistry<T> {
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder {
            registry: Self::default(),
        }
    }

    /// Before-actions registered under `name`, in registration order.
    pub fn before(
        &self,
        name: &str,
    ) -> &[Action<T>] {
        lookup(&self.before, name)
    }

    /// After-actions registered under `name`, in registration order.
    pub fn after(
        &self,
        name: &str,
    ) -> &[Action<T>] {
        lookup(&self.after, name)
    }

    /// Every name with at least one registered action.
    pub fn names(&self) -> BTreeSet<&ContextName> {
        self.before.keys().chain(self.after.keys()).collect()
    }

    /// Total number of registered actions across both phases.
    pub fn len(&self) -> usize {
        self.before
            .values()
            .chain(self.after.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lookup<'a, T>(
    buckets: &'a Buckets<T>,
    name: &str,
) -> &'a [Action<T>] {
    buckets.get(name).map(Vec::as_slice).unwrap_or_default()
}

pub struct RegistryBuilder<T> {
    registry: ContextRegistry<T>,
}

impl<T: 'static> RegistryBuilder<T> {
    pub fn before<F, R>(
        mut self,
        context: impl Into<ContextName>,
        name: impl Into<Cow<'static, str>>,
        action: F,
    ) -> Self
    where
        F: Fn(&mut T) -> R + 'static,
        R: IntoActionResult,
    {
        push(&mut self.registry.before, context.into(), Action::new(name, action));
        self
    }

    pub fn after<F, R>(
        mut self,
        context: impl Into<ContextName>,
        name: impl Into<Cow<'static, str>>,
        action: F,
    ) -> Self
    where
        F: Fn(&mut T) -> R + 'static,
        R: IntoActionResult,
    {
        push(&mut self.registry.after, context.into(), Action::new(name, action));
        self
    }

    /// Register a method under each of its declarations. The before and
    /// after declarations are independent of each other.
    pub fn method(
        mut self,
        method: ContextMethod<T>,
    ) -> Self {
        let ContextMethod {
            name,
            before,
            after,
            invoke,
        } = method;

        if let Some(context) = before {
            push(&mut self.registry.before, context.into(), Action::from_fn(name, invoke));
        }
        if let Some(context) = after {
            push(&mut self.registry.after, context.into(), Action::from_fn(name, invoke));
        }
        self
    }

    pub fn build(self) -> ContextRegistry<T> {
        self.registry
    }
}

fn push<T>(
    buckets: &mut Buckets<T>,
    context: ContextName,
    action: Action<T>,
) {
    tracing::trace!(context = %context, action = action.name(), "registering action");
    buckets.entry(context).or_default().push(action);
}
