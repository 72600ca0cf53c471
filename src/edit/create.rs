//! Person creation (§4.6 "Create new person", "Create new person with
//! gender from relation").

use crate::graph::PersonGraph;
use crate::person::{Gender, Person, PersonId, RelType};

/// Allocate a fresh, collision-free id and insert an empty person.
pub fn new_person(graph: &mut PersonGraph) -> PersonId {
    let id = fresh_id();
    graph.insert(Person::new(id.clone()));
    id
}

/// Like [`new_person`], but with gender set immediately — used once the
/// caller has derived it via [`derive_gender`].
pub fn new_person_with_gender(graph: &mut PersonGraph, gender: Gender) -> PersonId {
    let id = new_person(graph);
    graph.get_mut(&id).unwrap().set_gender(gender);
    id
}

/// Gender implied by the relation being created: `daughter`/`mother`/
/// `spouse`-of-a-male-target imply female; every other combination
/// defaults to male (§4.6, literal text).
pub fn derive_gender(rel_type: RelType, target_gender: Gender) -> Gender {
    match rel_type {
        RelType::Daughter | RelType::Mother => Gender::F,
        RelType::Spouse if target_gender == Gender::M => Gender::F,
        _ => Gender::M,
    }
}

fn fresh_id() -> PersonId {
    PersonId::from(uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_is_empty_and_unique() {
        let mut g = PersonGraph::new();
        let a = new_person(&mut g);
        let b = new_person(&mut g);
        assert_ne!(a, b);
        assert_eq!(g.get(&a).unwrap().gender(), Gender::Unset);
    }

    #[test]
    fn test_derive_gender_daughter_and_mother_are_female() {
        assert_eq!(derive_gender(RelType::Daughter, Gender::Unset), Gender::F);
        assert_eq!(derive_gender(RelType::Mother, Gender::Unset), Gender::F);
    }

    #[test]
    fn test_derive_gender_spouse_of_male_is_female() {
        assert_eq!(derive_gender(RelType::Spouse, Gender::M), Gender::F);
    }

    #[test]
    fn test_derive_gender_defaults_to_male() {
        assert_eq!(derive_gender(RelType::Son, Gender::Unset), Gender::M);
        assert_eq!(derive_gender(RelType::Father, Gender::Unset), Gender::M);
        assert_eq!(derive_gender(RelType::Spouse, Gender::F), Gender::M);
        assert_eq!(derive_gender(RelType::Spouse, Gender::Unset), Gender::M);
    }
}
