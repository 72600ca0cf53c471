//! The person data model: identity, attributes, and relations.
//!
//! A [`Person`] is the node type of the Person Graph (see `crate::graph`).
//! This module only defines the shape of a person and the small pieces of
//! logic (gender derivation, `__ref__` key parsing) that operate purely on
//! one record at a time — graph-wide invariants live in `crate::graph`.

mod data;
mod id;
mod rels;

pub use data::{ref_attr_key, split_ref_attr_key, Scalar};
pub use id::PersonId;
pub use rels::{Gender, NewRelData, ParentSlot, RelType, Rels};

use std::collections::HashMap;

/// A person record: identity, free-form attributes, and relations.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub data: HashMap<String, Scalar>,
    pub rels: Rels,
    /// Relations temporarily detached by a hide-branch toggle, restored
    /// verbatim by the matching show-branch toggle.
    pub hidden_rels: Option<Rels>,
    /// Synthetic empty-spouse placeholder inserted by the Synthetic
    /// Augmentor (or by Add Relative when no other parent is supplied).
    pub to_add: bool,
    /// Downgraded to a blank card because removing her would disconnect
    /// relatives; keeps only `gender`.
    pub unknown: bool,
    /// In-flight data about a relation currently being created.
    pub new_rel_data: Option<NewRelData>,
}

impl Person {
    /// A brand new, otherwise-empty person.
    pub fn new(id: PersonId) -> Self {
        Self {
            id,
            data: HashMap::new(),
            rels: Rels::default(),
            hidden_rels: None,
            to_add: false,
            unknown: false,
            new_rel_data: None,
        }
    }

    /// A synthetic placeholder spouse: an id, `to_add = true`, a gender,
    /// and no other attributes.
    pub fn new_to_add(id: PersonId, gender: Gender) -> Self {
        let mut p = Self::new(id);
        p.to_add = true;
        p.set_gender(gender);
        p
    }

    pub fn gender(&self) -> Gender {
        match self.data.get("gender") {
            Some(Scalar::Text(s)) if s == "M" => Gender::M,
            Some(Scalar::Text(s)) if s == "F" => Gender::F,
            _ => Gender::Unset,
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        match gender {
            Gender::Unset => {
                self.data.remove("gender");
            }
            Gender::M => {
                self.data.insert("gender".into(), Scalar::Text("M".into()));
            }
            Gender::F => {
                self.data.insert("gender".into(), Scalar::Text("F".into()));
            }
        }
    }

    /// True if this person has at least one child that is not a synthetic
    /// placeholder promotion artifact — used to lock gender (§3 invariants).
    pub fn has_real_children(&self) -> bool {
        !self.rels.children.is_empty()
    }

    /// Strip everything but `gender`, for demotion to `unknown` on delete.
    pub fn demote_to_unknown(&mut self) {
        let gender = self.gender();
        self.data.clear();
        self.set_gender(gender);
        self.unknown = true;
        self.to_add = false;
        self.new_rel_data = None;
    }
}
