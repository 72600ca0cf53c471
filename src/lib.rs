//! Family Tree - WASM Module
//!
//! This module provides the Person Graph, Synthetic Augmentor, Layout
//! Engine, Reactive Store, and Edit Operations for an interactive
//! family-tree layout. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `person`: the person data model (identity, attributes, relations)
//! - `graph`: the Person Graph, Synthetic Augmentor, and connectivity queries
//! - `layout`: the Layout Engine (tidy tree, duplicate resolution, privacy)
//! - `edit`: pure graph-mutating edit operations
//! - `store`: the Reactive Store tying graph + layout + subscribers together
//! - `interop`: `serde`/`wasm-bindgen` wire shapes for the JS boundary

use wasm_bindgen::prelude::*;

pub mod edit;
pub mod error;
pub mod graph;
mod interop;
pub mod layout;
pub mod person;
pub mod store;

use error::GraphError;
use interop::{graph_to_dtos, layout_to_dto, person_to_dto, PersonDto};
use layout::LayoutConfig;
use person::{Gender, PersonId, RelType};
use store::{ReactiveStore, UpdateProps};

/// Initialize the WASM module: panic messages route to `console.error`,
/// and `log::*` calls route to the browser console at `Warn` and above.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Warn);
}

fn parse_rel_type(s: &str) -> Result<RelType, JsValue> {
    match s {
        "father" => Ok(RelType::Father),
        "mother" => Ok(RelType::Mother),
        "son" => Ok(RelType::Son),
        "daughter" => Ok(RelType::Daughter),
        "spouse" => Ok(RelType::Spouse),
        other => Err(JsValue::from_str(&format!("unknown relation type: {other}"))),
    }
}

fn graph_error_to_js(err: GraphError) -> JsValue {
    log::error!("{err}");
    JsValue::from_str(&err.to_string())
}

/// The JS-facing entry point: owns a [`ReactiveStore`] and exposes the
/// Edit Operations as fallible methods over it, recomputing the layout
/// after every mutation.
#[wasm_bindgen]
pub struct FamilyTreeWasm {
    store: ReactiveStore,
}

#[wasm_bindgen]
impl FamilyTreeWasm {
    /// Build a store from a JSON array of person records (see
    /// `interop::PersonDto`), focused on `main_id` if given, else the
    /// first person encountered.
    #[wasm_bindgen(constructor)]
    pub fn new(data: JsValue, main_id: Option<String>) -> Result<FamilyTreeWasm, JsValue> {
        let dtos: Vec<PersonDto> = serde_wasm_bindgen::from_value(data)?;
        let graph = interop::dtos_to_graph(dtos);
        let store = ReactiveStore::new(graph, main_id.map(PersonId::from), LayoutConfig::default());
        Ok(Self { store })
    }

    /// Replace the backing data wholesale (§4.5 "Update data").
    #[wasm_bindgen(js_name = updateData)]
    pub fn update_data(&mut self, data: JsValue, main_id: Option<String>) -> Result<(), JsValue> {
        let dtos: Vec<PersonDto> = serde_wasm_bindgen::from_value(data)?;
        let graph = interop::dtos_to_graph(dtos);
        self.store.update_data(UpdateProps { graph, main_id: main_id.map(PersonId::from) });
        Ok(())
    }

    /// Re-focus the tree on a different person (§4.5 "Update main id").
    #[wasm_bindgen(js_name = updateMainId)]
    pub fn update_main_id(&mut self, id: String) {
        self.store.update_main_id(PersonId::from(id));
    }

    #[wasm_bindgen(js_name = getMainId)]
    pub fn get_main_id(&self) -> String {
        self.store.get_tree().main_id.to_string()
    }

    /// Raw person record by id, or `null` if absent.
    #[wasm_bindgen(js_name = getDatum)]
    pub fn get_datum(&self, id: String) -> JsValue {
        match self.store.get_datum(&PersonId::from(id)) {
            Some(person) => serde_wasm_bindgen::to_value(&person_to_dto(person)).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Positioned layout-node by `tid`, or `null` if not currently laid out.
    #[wasm_bindgen(js_name = getTreeDatum)]
    pub fn get_tree_datum(&self, tid: String) -> JsValue {
        match self.store.get_tree_datum(&tid) {
            Some(node) => serde_wasm_bindgen::to_value(&interop::LayoutNodeDto::from(node)).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = getMainDatum)]
    pub fn get_main_datum(&self) -> JsValue {
        match self.store.get_main_datum() {
            Some(person) => serde_wasm_bindgen::to_value(&person_to_dto(person)).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = getTreeMainDatum)]
    pub fn get_tree_main_datum(&self) -> JsValue {
        match self.store.get_tree_main_datum() {
            Some(node) => serde_wasm_bindgen::to_value(&interop::LayoutNodeDto::from(node)).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// The full backing data set, as a JSON array of person records.
    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Result<JsValue, JsValue> {
        let dtos = graph_to_dtos(self.store.get_data());
        serde_wasm_bindgen::to_value(&dtos).map_err(Into::into)
    }

    /// The currently computed layout.
    #[wasm_bindgen(js_name = getTree)]
    pub fn get_tree(&self) -> Result<JsValue, JsValue> {
        let dto = layout_to_dto(self.store.get_tree());
        serde_wasm_bindgen::to_value(&dto).map_err(Into::into)
    }

    /// Candidate existing people offered by a "link existing relative"
    /// selector (§4.6 "Get link candidates").
    #[wasm_bindgen(js_name = linkCandidates)]
    pub fn link_candidates(&self, target: String, rel_type: String, subject: Option<String>) -> Result<Vec<String>, JsValue> {
        let rel_type = parse_rel_type(&rel_type)?;
        let target = PersonId::from(target);
        let subject = subject.map(PersonId::from);
        let candidates = edit::link_candidates(self.store.get_data(), &target, rel_type, subject.as_ref());
        Ok(candidates.into_iter().map(|id| id.to_string()).collect())
    }

    /// Create a blank person and return her id, without linking her to
    /// anyone (§4.6 "Create new person").
    #[wasm_bindgen(js_name = newPerson)]
    pub fn new_person(&mut self) -> String {
        let mut new_id: Option<PersonId> = None;
        self.store.mutate(|graph| {
            new_id = Some(edit::new_person(graph));
        });
        new_id.expect("mutate always runs its closure").to_string()
    }

    /// Add a brand-new person as `rel_type` of `target`. When adding a
    /// child, `other_parent` is either an existing person's id or the
    /// sentinel `"_new"` to materialize a placeholder co-parent; omit it
    /// to leave the other slot empty.
    #[wasm_bindgen(js_name = addNewRelative)]
    pub fn add_new_relative(&mut self, target: String, rel_type: String, other_parent: Option<String>) -> Result<String, JsValue> {
        let target = PersonId::from(target);
        let rel_type = parse_rel_type(&rel_type)?;
        let target_gender = self.store.get_datum(&target).map(|p| p.gender()).unwrap_or(Gender::Unset);
        let gender = edit::derive_gender(rel_type, target_gender);

        let mut result: Result<PersonId, GraphError> = Err(GraphError::ReferenceNotFound(target.clone()));
        self.store.mutate(|graph| {
            let new_id = edit::new_person_with_gender(graph, gender);
            let other = other_parent.as_deref().map(|s| {
                if s == "_new" {
                    edit::OtherParent::New
                } else {
                    edit::OtherParent::Existing(PersonId::from(s))
                }
            });
            result = edit::add_new_relative(graph, &target, rel_type, &new_id, other).map(|_| new_id);
        });
        result.map(|id| id.to_string()).map_err(graph_error_to_js)
    }

    /// Wire an already-present person onto `target` as `rel_type` (§4.6
    /// "Link existing relative").
    #[wasm_bindgen(js_name = linkExistingRelative)]
    pub fn link_existing_relative(&mut self, target: String, rel_type: String, existing: String) -> Result<(), JsValue> {
        let target = PersonId::from(target);
        let rel_type = parse_rel_type(&rel_type)?;
        let existing = PersonId::from(existing);
        let mut result = Ok(());
        self.store.mutate(|graph| {
            result = edit::link_existing_relative(graph, &target, rel_type, &existing);
        });
        result.map_err(graph_error_to_js)
    }

    /// Clear the `to_add` flag once real data has been saved for a
    /// synthetic placeholder (§4.6 "Move to-add to added").
    #[wasm_bindgen(js_name = moveToAdded)]
    pub fn move_to_added(&mut self, id: String) {
        let id = PersonId::from(id);
        self.store.mutate(|graph| edit::move_to_added(graph, &id));
    }

    /// Remove a person, refusing if doing so would disconnect a relative
    /// from the rest of the tree (§4.6 "Delete person").
    #[wasm_bindgen(js_name = deletePerson)]
    pub fn delete_person(&mut self, id: String) -> Result<(), JsValue> {
        let id = PersonId::from(id);
        let mut result = Ok(());
        self.store.mutate(|graph| {
            result = edit::delete_person(graph, &id);
        });
        result.map_err(graph_error_to_js)
    }

    #[wasm_bindgen(js_name = hideAncestors)]
    pub fn hide_ancestors(&mut self, id: String) {
        let id = PersonId::from(id);
        self.store.mutate(|graph| edit::hide_ancestors(graph, &id));
    }

    #[wasm_bindgen(js_name = showAncestors)]
    pub fn show_ancestors(&mut self, id: String) {
        let id = PersonId::from(id);
        self.store.mutate(|graph| edit::show_ancestors(graph, &id));
    }

    #[wasm_bindgen(js_name = hideChild)]
    pub fn hide_child(&mut self, parent: String, child: String) {
        let parent = PersonId::from(parent);
        let child = PersonId::from(child);
        self.store.mutate(|graph| edit::hide_child(graph, &parent, &child));
    }

    #[wasm_bindgen(js_name = showChild)]
    pub fn show_child(&mut self, parent: String, child: String) {
        let parent = PersonId::from(parent);
        let child = PersonId::from(child);
        self.store.mutate(|graph| edit::show_child(graph, &parent, &child));
    }

    /// Mirror every `__ref__` attribute `id` carries onto the people it
    /// references (§4.6, §9 "`__ref__` mirroring").
    #[wasm_bindgen(js_name = applyRefMirrors)]
    pub fn apply_ref_mirrors(&mut self, id: String) {
        let id = PersonId::from(id);
        self.store.mutate(|graph| edit::apply_ref_mirrors(graph, &id));
    }
}

// `FamilyTreeWasm` is thin `wasm-bindgen` glue over `store`/`edit`/`graph`,
// which carry the real test coverage (§10.4) — exercising it here would
// need the `wasm-bindgen-test` harness under a wasm32 target rather than
// plain `cargo test`.
