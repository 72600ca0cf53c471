//! Error kinds (§7).
//!
//! Only invariant violations and unresolved references are represented as
//! `Err` — the other two kinds in §7 (empty graph, focus missing after
//! edit) are *recovered* states, not failures, and never surface as an
//! error: see `store::ReactiveStore`.

use crate::person::PersonId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("id {0} does not resolve to a person in the graph")]
    ReferenceNotFound(PersonId),

    #[error("person {0} is already a spouse of {1}")]
    AlreadySpouses(PersonId, PersonId),

    #[error("{0} has a real child and cannot change gender")]
    GenderLocked(PersonId),

    #[error("{who} cannot be their own ancestor via {via}")]
    SelfAncestry { who: PersonId, via: PersonId },

    #[error("parent slot requires gender {required:?}, but {who} has {actual:?}")]
    GenderMismatch {
        who: PersonId,
        required: crate::person::Gender,
        actual: crate::person::Gender,
    },
}
