use std::{borrow::Borrow, fmt, sync::Arc};

/// Key under which before and after actions are grouped.
///
/// Names compare by exact string match. The empty string is accepted and is
/// looked up literally like any other name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextName(Arc<str>);

impl ContextName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContextName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContextName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContextName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for ContextName {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

impl PartialEq<str> for ContextName {
    fn eq(
        &self,
        other: &str,
    ) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ContextName {
    fn eq(
        &self,
        other: &&str,
    ) -> bool {
        &*self.0 == *other
    }
}

#[cfg(test)]
mod test {
    use super::ContextName;
    use std::collections::HashMap;

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ContextName::from("a is not null"), 1);

        assert_eq!(map.get("a is not null"), Some(&1));
        assert_eq!(map.get("a is not null "), None);
        assert_eq!(map.get("A is not null"), None);
    }

    #[test]
    fn empty_is_a_name() {
        let name = ContextName::from("");
        assert_eq!(name, "");
        assert_eq!(name.to_string(), "");
    }
}
