//! Stable person identifier.
//!
//! Person ids are opaque strings — callers load graphs keyed by whatever
//! id scheme their persistence layer uses. `PersonId` wraps a
//! reference-counted string so cloning an id (which happens constantly
//! while walking relations) is cheap.

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(Rc<str>);

impl PersonId {
    pub fn new(id: impl Into<Rc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_and_display() {
        let a = PersonId::from("p1");
        let b = PersonId::from("p1".to_string());
        assert_eq!(a, b);
        assert_eq!(format!("{a}"), "p1");
    }

    #[test]
    fn test_cheap_clone_shares_storage() {
        let a = PersonId::from("p1");
        let b = a.clone();
        assert_eq!(a.as_str(), b.as_str());
    }
}
