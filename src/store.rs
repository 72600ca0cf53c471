//! Reactive Store (§4.5): owns the Person Graph and the most recently
//! computed layout, recomputes the layout when either the data or the
//! focus changes, and notifies subscribers.
//!
//! The single owner of mutable state behind a small, notification-driving
//! API — a layout cache sitting in front of the graph it was computed
//! from, recomputed whenever that graph or the focus changes.

use std::rc::Rc;

use crate::graph::PersonGraph;
use crate::layout::{self, Layout, LayoutConfig};
use crate::person::PersonId;

/// A store subscriber: called with no arguments whenever data, focus, or
/// the computed layout changes (§4.5 "Subscriber notification").
pub type Subscriber = Rc<dyn Fn()>;

/// Bundle passed to [`ReactiveStore::update_data`]: the new graph plus
/// the focus to carry forward, mirroring the props a tree component
/// would receive on re-render.
#[derive(Clone)]
pub struct UpdateProps {
    pub graph: PersonGraph,
    pub main_id: Option<PersonId>,
}

/// Owns the authoritative [`PersonGraph`] and the layout computed from it.
/// Every mutation goes through `update_data`/`update_main_id`, so
/// `get_tree`/`get_tree_datum` always reflect a layout consistent with the
/// graph they were computed from.
pub struct ReactiveStore {
    graph: PersonGraph,
    main_id: Option<PersonId>,
    config: LayoutConfig,
    layout: Layout,
    /// Bounded, deduplicated focus history — most recent last. Consecutive
    /// duplicates are dropped so repeatedly re-focusing the same person
    /// doesn't grow the history.
    history: Vec<PersonId>,
    history_limit: usize,
    subscribers: Vec<Subscriber>,
    /// Monotonically increasing recency clock fed to duplicate-branch
    /// resolution (§4.3) as `now`, bumped once per layout recomputation —
    /// the real clock `on_toggle_one_close_others` needs to break ties by
    /// "most recently opened" instead of letting every member tie.
    toggle_clock: i64,
}

impl ReactiveStore {
    pub fn new(graph: PersonGraph, main_id: Option<PersonId>, config: LayoutConfig) -> Self {
        let toggle_clock = 1;
        let layout = layout::compute_layout(graph.clone(), main_id.as_ref(), &config, toggle_clock);
        let mut history = Vec::new();
        history.push(layout.main_id.clone());
        Self {
            graph,
            main_id,
            config,
            layout,
            history,
            history_limit: 10,
            subscribers: Vec::new(),
            toggle_clock,
        }
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber();
        }
    }

    /// Replace the backing graph, keeping `main_id` unless the caller
    /// supplies a new one, then recompute the layout.
    pub fn update_data(&mut self, props: UpdateProps) {
        self.graph = props.graph;
        if props.main_id.is_some() {
            self.main_id = props.main_id;
        }
        self.update_tree();
        self.notify();
    }

    /// Re-focus without replacing the graph. If `id` no longer resolves to
    /// a person (deleted since it was focused), the focus falls back to
    /// the most recent still-available id in history, then to the first
    /// person in the graph (§4.5 "focus recovery", §7).
    pub fn update_main_id(&mut self, id: PersonId) {
        let resolved = if self.graph.contains(&id) {
            id
        } else {
            self.get_last_available_main_datum()
        };
        self.main_id = Some(resolved.clone());
        self.history.retain(|h| h != &resolved);
        self.history.push(resolved);
        if self.history.len() > self.history_limit {
            let overflow = self.history.len() - self.history_limit;
            self.history.drain(0..overflow);
        }
        self.update_tree();
        self.notify();
    }

    /// Mutate the graph in place via `f`, then recompute the layout. The
    /// common path for edit operations, which take `&mut PersonGraph`.
    pub fn mutate(&mut self, f: impl FnOnce(&mut PersonGraph)) {
        f(&mut self.graph);
        self.update_tree();
        self.notify();
    }

    /// The newest focus id, walking backward through history, that still
    /// resolves to a person in the current graph — falling back to the
    /// first person in the graph if history is entirely stale.
    pub fn get_last_available_main_datum(&self) -> PersonId {
        self.history
            .iter()
            .rev()
            .find(|id| self.graph.contains(id))
            .cloned()
            .or_else(|| self.graph.first_person().cloned())
            .expect("graph is never empty once a store has been constructed")
    }

    fn update_tree(&mut self) {
        let focus = self.main_id.clone().filter(|id| self.graph.contains(id));
        let focus = focus.or_else(|| Some(self.get_last_available_main_datum()));
        let prev = self.layout.clone();
        self.toggle_clock += 1;
        let mut next = layout::compute_layout(self.graph.clone(), focus.as_ref(), &self.config, self.toggle_clock);
        layout::apply_enter_exit(&prev, &mut next);
        self.main_id = Some(next.main_id.clone());
        self.layout = next;
    }

    pub fn get_datum(&self, id: &PersonId) -> Option<&crate::person::Person> {
        self.graph.get(id)
    }

    pub fn get_tree_datum(&self, tid: &str) -> Option<&crate::layout::LayoutNode> {
        self.layout.nodes.iter().find(|n| n.tid == tid)
    }

    pub fn get_main_datum(&self) -> Option<&crate::person::Person> {
        self.graph.get(&self.layout.main_id)
    }

    pub fn get_tree_main_datum(&self) -> Option<&crate::layout::LayoutNode> {
        self.get_tree_datum(self.layout.main_id.as_str())
    }

    pub fn get_data(&self) -> &PersonGraph {
        &self.graph
    }

    pub fn get_tree(&self) -> &Layout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{Gender, ParentSlot, Person};

    fn two_person_graph() -> PersonGraph {
        let mut g = PersonGraph::new();
        g.insert(Person::new(PersonId::from("a")));
        g.insert(Person::new(PersonId::from("b")));
        g.get_mut(&PersonId::from("a")).unwrap().set_gender(Gender::M);
        g.set_parent(&PersonId::from("b"), ParentSlot::Father, Some(PersonId::from("a"))).unwrap();
        g
    }

    #[test]
    fn test_new_store_computes_layout_for_focus() {
        let store = ReactiveStore::new(two_person_graph(), Some(PersonId::from("b")), LayoutConfig::default());
        assert_eq!(store.get_tree().main_id, PersonId::from("b"));
    }

    #[test]
    fn test_update_main_id_recomputes_layout() {
        let mut store = ReactiveStore::new(two_person_graph(), Some(PersonId::from("b")), LayoutConfig::default());
        store.update_main_id(PersonId::from("a"));
        assert_eq!(store.get_tree().main_id, PersonId::from("a"));
    }

    #[test]
    fn test_focus_recovers_when_person_removed() {
        let mut store = ReactiveStore::new(two_person_graph(), Some(PersonId::from("b")), LayoutConfig::default());
        store.mutate(|g| {
            g.unlink_parent(&PersonId::from("b"), ParentSlot::Father);
            g.remove(&PersonId::from("b"));
        });
        assert!(store.get_main_datum().is_some());
    }

    #[test]
    fn test_subscriber_notified_on_mutation() {
        let mut store = ReactiveStore::new(two_person_graph(), Some(PersonId::from("a")), LayoutConfig::default());
        let calls = Rc::new(std::cell::Cell::new(0));
        let calls_clone = calls.clone();
        store.subscribe(Rc::new(move || calls_clone.set(calls_clone.get() + 1)));
        store.update_main_id(PersonId::from("b"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_history_deduplicates_consecutive_focus() {
        let mut store = ReactiveStore::new(two_person_graph(), Some(PersonId::from("a")), LayoutConfig::default());
        store.update_main_id(PersonId::from("a"));
        store.update_main_id(PersonId::from("a"));
        assert_eq!(store.history.len(), 1);
    }
}
