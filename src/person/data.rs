//! Free-form attribute values and `__ref__` relation-scoped attribute keys.

use super::PersonId;

/// A scalar attribute value. `data` maps free-form keys to one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Build the mangled key for a relation-scoped attribute: a field that
/// describes a pair of people (e.g. a marriage date), stored under both
/// persons' `data` and mirrored on update/delete.
///
/// `<field>__ref__<other-id>`
pub fn ref_attr_key(field: &str, other: &PersonId) -> String {
    format!("{field}__ref__{other}")
}

/// Parse a `data` key, returning `(field, other_id)` if it matches the
/// `__ref__` pattern.
pub fn split_ref_attr_key(key: &str) -> Option<(&str, PersonId)> {
    let (field, rest) = key.split_once("__ref__")?;
    if field.is_empty() || rest.is_empty() {
        return None;
    }
    Some((field, PersonId::from(rest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_attr_key_roundtrip() {
        let other = PersonId::from("p2");
        let key = ref_attr_key("marriage_date", &other);
        assert_eq!(key, "marriage_date__ref__p2");

        let (field, id) = split_ref_attr_key(&key).unwrap();
        assert_eq!(field, "marriage_date");
        assert_eq!(id, other);
    }

    #[test]
    fn test_split_rejects_non_ref_keys() {
        assert!(split_ref_attr_key("gender").is_none());
        assert!(split_ref_attr_key("first_name").is_none());
    }

    #[test]
    fn test_split_rejects_malformed_ref_keys() {
        assert!(split_ref_attr_key("__ref__p2").is_none());
        assert!(split_ref_attr_key("field__ref__").is_none());
    }
}
