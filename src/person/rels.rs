//! Relation slots, relation kinds, and in-flight "new relative" state.

use super::PersonId;

/// The gender reserved attribute. `Unset` means the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    M,
    F,
    Unset,
}

impl Gender {
    /// The opposite gender, or `Unset` if unset (used when materializing a
    /// synthetic spouse — an unset parent can't be opposed).
    pub fn opposite(self) -> Gender {
        match self {
            Gender::M => Gender::F,
            Gender::F => Gender::M,
            Gender::Unset => Gender::Unset,
        }
    }
}

/// The four relation slots of a person (§3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rels {
    pub father: Option<PersonId>,
    pub mother: Option<PersonId>,
    pub spouses: Vec<PersonId>,
    pub children: Vec<PersonId>,
}

impl Rels {
    /// The parent slot (father or mother) holding `id`, if any.
    pub fn parent_slot_of(&self, id: &PersonId) -> Option<ParentSlot> {
        if self.father.as_ref() == Some(id) {
            Some(ParentSlot::Father)
        } else if self.mother.as_ref() == Some(id) {
            Some(ParentSlot::Mother)
        } else {
            None
        }
    }

    pub fn has_spouse(&self, id: &PersonId) -> bool {
        self.spouses.iter().any(|s| s == id)
    }

    pub fn has_child(&self, id: &PersonId) -> bool {
        self.children.iter().any(|c| c == id)
    }

    /// Iterate every id referenced by any slot.
    pub fn all_ids(&self) -> impl Iterator<Item = &PersonId> {
        self.father
            .iter()
            .chain(self.mother.iter())
            .chain(self.spouses.iter())
            .chain(self.children.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentSlot {
    Father,
    Mother,
}

impl ParentSlot {
    pub fn required_gender(self) -> Gender {
        match self {
            ParentSlot::Father => Gender::M,
            ParentSlot::Mother => Gender::F,
        }
    }
}

/// The kind of relative being added/linked (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelType {
    Father,
    Mother,
    Son,
    Daughter,
    Spouse,
}

impl RelType {
    /// Gender implied by this relation type (§4.6 "gender is derived").
    pub fn implied_gender(self) -> Gender {
        match self {
            RelType::Father => Gender::M,
            RelType::Mother => Gender::F,
            RelType::Son => Gender::M,
            RelType::Daughter => Gender::F,
            // "spouse-of-M ⇒ F; else M" is resolved by the caller, who
            // knows the target's gender; see `edit::create`.
            RelType::Spouse => Gender::Unset,
        }
    }

    pub fn is_parent(self) -> bool {
        matches!(self, RelType::Father | RelType::Mother)
    }

    pub fn is_child(self) -> bool {
        matches!(self, RelType::Son | RelType::Daughter)
    }
}

/// In-flight data about a relation currently being created (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct NewRelData {
    pub rel_type: RelType,
    /// For a child being added: the id of the other parent, or the
    /// sentinel `"_new"` meaning "create a to_add partner".
    pub other_parent_id: Option<PersonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_slot_of() {
        let mut rels = Rels::default();
        let father = PersonId::from("f");
        rels.father = Some(father.clone());
        assert_eq!(rels.parent_slot_of(&father), Some(ParentSlot::Father));
        assert_eq!(rels.parent_slot_of(&PersonId::from("x")), None);
    }

    #[test]
    fn test_required_gender() {
        assert_eq!(ParentSlot::Father.required_gender(), Gender::M);
        assert_eq!(ParentSlot::Mother.required_gender(), Gender::F);
    }

    #[test]
    fn test_rel_type_implied_gender() {
        assert_eq!(RelType::Son.implied_gender(), Gender::M);
        assert_eq!(RelType::Daughter.implied_gender(), Gender::F);
        assert_eq!(RelType::Mother.implied_gender(), Gender::F);
    }
}
