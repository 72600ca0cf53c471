//! Edit Operations (§4.6): pure mutations on the Person Graph, each one
//! maintaining the §3 invariants. None perform I/O themselves —
//! persistence is an external collaborator (§1, §6).

pub mod candidates;
pub mod create;
pub mod delete;
pub mod ref_attrs;
pub mod relative;
pub mod toggle;

pub use candidates::link_candidates;
pub use create::{derive_gender, new_person, new_person_with_gender};
pub use delete::delete_person;
pub use ref_attrs::{apply_ref_mirrors, strip_ref_mirrors};
pub use relative::{add_new_relative, link_existing_relative, move_to_added, OtherParent};
pub use toggle::{hide_ancestors, hide_child, show_ancestors, show_child};
