use crate::ContextName;

/// Context metadata attached to a single test.
///
/// `when_each_of` takes precedence over `when` whenever it is non-empty.
/// `when` defaults to the empty string, which is looked up literally.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct ContextMeta {
    #[builder(default, into)]
    pub when: String,
    #[builder(default)]
    pub when_each_of: Vec<String>,
}

impl ContextMeta {
    pub fn when(name: impl Into<String>) -> Self {
        Self {
            when: name.into(),
            when_each_of: vec![],
        }
    }

    pub fn each_of<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            when: String::new(),
            when_each_of: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// The ordered context names that apply to one test invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextDeclaration {
    names: Vec<ContextName>,
}

impl ContextDeclaration {
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve a test's metadata into the names to honor, in order.
    pub fn resolve(meta: Option<&ContextMeta>) -> Self {
        let Some(meta) = meta else {
            return Self::none();
        };

        if !meta.when_each_of.is_empty() {
            return meta.when_each_of.iter().collect();
        }

        std::iter::once(&meta.when).collect()
    }

    pub fn names(&self) -> &[ContextName] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<N: Into<ContextName>> FromIterator<N> for ContextDeclaration {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ContextDeclaration {
    type Item = &'a ContextName;
    type IntoIter = std::slice::Iter<'a, ContextName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
