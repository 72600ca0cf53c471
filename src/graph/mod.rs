//! Person Graph: the authoritative collection of persons and their
//! relations (§3), the Synthetic Augmentor (§4.1), and the connectivity
//! queries Edit Operations need (§4.6).
//!
//! Topology lives in a `petgraph::StableGraph` keyed by a stable id,
//! alongside a side table mapping ids to `NodeIndex`. The node payload
//! *is* the full person record (`persons: HashMap<PersonId, Person>`) —
//! there is no separate SoA buffer, since relation data (not position data)
//! is what every consumer of this graph needs.

mod augment;
mod connectivity;
mod person_graph;

pub use augment::augment;
pub use connectivity::{
    ancestors_of, connected_to_first_person, descendants_of, is_ancestor,
    reachable_excluding, reachable_from, relatives_connected_without_person,
};
pub use person_graph::{PersonGraph, RelEdge};
