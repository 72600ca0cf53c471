//! Wire shapes for the `wasm-bindgen` boundary (§10.2): plain,
//! `serde`-derived DTOs that `serde-wasm-bindgen` converts to/from
//! `JsValue`, plus the conversions to/from the internal domain types.
//!
//! Kept separate from `person`/`layout` so those modules stay free of
//! wire-format concerns — `new_rel_data`/`hidden_rels` (in-flight UI
//! state) deliberately have no DTO counterpart, since a JS caller drives
//! them through explicit method calls rather than raw data exchange.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::PersonGraph;
use crate::layout::{Layout, LayoutNode};
use crate::person::{Person, PersonId, Rels, Scalar};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarDto {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&Scalar> for ScalarDto {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::Text(s) => ScalarDto::Text(s.clone()),
            Scalar::Number(n) => ScalarDto::Number(*n),
            Scalar::Bool(b) => ScalarDto::Bool(*b),
        }
    }
}

impl From<ScalarDto> for Scalar {
    fn from(s: ScalarDto) -> Self {
        match s {
            ScalarDto::Text(s) => Scalar::Text(s),
            ScalarDto::Number(n) => Scalar::Number(n),
            ScalarDto::Bool(b) => Scalar::Bool(b),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelsDto {
    #[serde(default)]
    pub father: Option<String>,
    #[serde(default)]
    pub mother: Option<String>,
    #[serde(default)]
    pub spouses: Vec<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

impl From<&Rels> for RelsDto {
    fn from(r: &Rels) -> Self {
        Self {
            father: r.father.as_ref().map(PersonId::to_string),
            mother: r.mother.as_ref().map(PersonId::to_string),
            spouses: r.spouses.iter().map(PersonId::to_string).collect(),
            children: r.children.iter().map(PersonId::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDto {
    pub id: String,
    #[serde(default)]
    pub data: HashMap<String, ScalarDto>,
    #[serde(default)]
    pub rels: RelsDto,
    #[serde(default)]
    pub to_add: bool,
    #[serde(default)]
    pub unknown: bool,
}

/// Project a domain [`Person`] into its wire shape.
pub fn person_to_dto(person: &Person) -> PersonDto {
    PersonDto {
        id: person.id.to_string(),
        data: person.data.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
        rels: (&person.rels).into(),
        to_add: person.to_add,
        unknown: person.unknown,
    }
}

/// Materialize a [`Person`] from its wire shape, wiring `rels` in as the
/// graph is built (reciprocity and gender are not re-checked here — that
/// is `PersonGraph::set_parent`/`link_spouses`'s job, run by
/// [`dtos_to_graph`] after every person exists).
fn dto_to_person(dto: &PersonDto) -> Person {
    let mut person = Person::new(PersonId::from(dto.id.clone()));
    person.data = dto.data.iter().map(|(k, v)| (k.clone(), v.clone().into())).collect();
    person.to_add = dto.to_add;
    person.unknown = dto.unknown;
    person
}

/// Build a full [`PersonGraph`] from wire DTOs: insert every person first
/// (so forward references resolve), then wire relations through the
/// reciprocity-preserving primitives.
pub fn dtos_to_graph(dtos: Vec<PersonDto>) -> PersonGraph {
    let mut graph = PersonGraph::new();
    for dto in &dtos {
        graph.insert(dto_to_person(dto));
    }
    for dto in &dtos {
        let id = PersonId::from(dto.id.clone());
        if let Some(father) = &dto.rels.father {
            let _ = graph.set_parent(&id, crate::person::ParentSlot::Father, Some(PersonId::from(father.clone())));
        }
        if let Some(mother) = &dto.rels.mother {
            let _ = graph.set_parent(&id, crate::person::ParentSlot::Mother, Some(PersonId::from(mother.clone())));
        }
        for spouse in &dto.rels.spouses {
            let spouse_id = PersonId::from(spouse.clone());
            if graph.contains(&spouse_id) && !graph.get(&id).map(|p| p.rels.has_spouse(&spouse_id)).unwrap_or(true) {
                let _ = graph.link_spouses(&id, &spouse_id);
            }
        }
    }
    graph.ensure_nonempty();
    graph
}

/// Project the whole graph out to its wire shape (§4.6 "persistence is an
/// external collaborator" — this is what that collaborator reads).
pub fn graph_to_dtos(graph: &PersonGraph) -> Vec<PersonDto> {
    graph.iter().map(|(_, person)| person_to_dto(person)).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutNodeDto {
    pub tid: String,
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    pub depth: i32,
    pub is_ancestry: bool,
    pub sibling: bool,
    pub added: bool,
    pub spouse_of: Option<String>,
    pub sx: f32,
    pub sy: f32,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub spouses: Vec<String>,
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub to_ancestry: Vec<String>,
    pub from_spouse: Option<String>,
    pub psx: f32,
    pub psy: f32,
    pub all_rels_displayed: bool,
    pub is_private: bool,
    pub duplicate: Option<u32>,
    pub toggle: Option<i64>,
    pub toggle_id: Option<String>,
}

impl From<&LayoutNode> for LayoutNodeDto {
    fn from(n: &LayoutNode) -> Self {
        Self {
            tid: n.tid.clone(),
            id: n.id.to_string(),
            x: n.x,
            y: n.y,
            prev_x: n.prev_x,
            prev_y: n.prev_y,
            depth: n.depth,
            is_ancestry: n.is_ancestry,
            sibling: n.sibling,
            added: n.added,
            spouse_of: n.spouse_of.clone(),
            sx: n.sx,
            sy: n.sy,
            parents: n.parents.clone(),
            children: n.children.clone(),
            spouses: n.spouses.clone(),
            from: n.from.clone(),
            to: n.to.clone(),
            to_ancestry: n.to_ancestry.clone(),
            from_spouse: n.from_spouse.clone(),
            psx: n.psx,
            psy: n.psy,
            all_rels_displayed: n.all_rels_displayed,
            is_private: n.is_private,
            duplicate: n.duplicate,
            toggle: n.toggle,
            toggle_id: n.toggle_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutDto {
    pub nodes: Vec<LayoutNodeDto>,
    pub width: f32,
    pub height: f32,
    pub x_off: f32,
    pub y_off: f32,
    pub main_id: String,
    pub is_horizontal: bool,
}

pub fn layout_to_dto(layout: &Layout) -> LayoutDto {
    LayoutDto {
        nodes: layout.nodes.iter().map(LayoutNodeDto::from).collect(),
        width: layout.dim.width,
        height: layout.dim.height,
        x_off: layout.dim.x_off,
        y_off: layout.dim.y_off,
        main_id: layout.main_id.to_string(),
        is_horizontal: layout.is_horizontal,
    }
}
