use crate::{
    ContextDeclaration, ContextExecutor, ContextMeta, ContextRegistry, ContextSource, Outcome,
    RuleOptions,
};

/// A fixture's context registry bound to an executor.
///
/// Built once per fixture type and reused for every test that runs against
/// an instance of that type.
pub struct ContextRule<T> {
    registry: ContextRegistry<T>,
    executor: ContextExecutor,
}

impl<T: ContextSource + 'static> ContextRule<T> {
    pub fn new() -> Self {
        Self::from_registry(ContextRegistry::scan())
    }

    /// Same as [`ContextRule::new`], inferring the fixture type from an instance.
    pub fn for_instance(_instance: &T) -> Self {
        Self::new()
    }
}

impl<T: ContextSource + 'static> Default for ContextRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ContextRule<T> {
    pub fn from_registry(registry: ContextRegistry<T>) -> Self {
        Self {
            registry,
            executor: ContextExecutor::default(),
        }
    }

    pub fn with_options(
        mut self,
        options: RuleOptions,
    ) -> Self {
        self.executor = ContextExecutor::new(options);
        self
    }

    pub fn registry(&self) -> &ContextRegistry<T> {
        &self.registry
    }

    pub fn options(&self) -> &RuleOptions {
        self.executor.options()
    }

    /// Resolve `meta` and run `body` wrapped in the matching actions.
    pub fn evaluate<R, F>(
        &self,
        instance: &mut T,
        meta: Option<&ContextMeta>,
        body: F,
    ) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
        R: Outcome,
    {
        let declaration = ContextDeclaration::resolve(meta);
        self.run(instance, &declaration, body)
    }

    /// Run `body` wrapped in the actions of an already resolved declaration.
    pub fn run<R, F>(
        &self,
        instance: &mut T,
        declaration: &ContextDeclaration,
        body: F,
    ) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
        R: Outcome,
    {
        self.executor
            .execute(&self.registry, instance, declaration, body)
    }

    /// Produce the wrapped test body without running it.
    pub fn apply<R, F>(
        &self,
        meta: Option<ContextMeta>,
        body: F,
    ) -> impl FnOnce(&mut T) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
        R: Outcome,
    {
        move |instance| self.evaluate(instance, meta.as_ref(), body)
    }
}
