//! Layout Engine configuration (§4.2).

use crate::person::{Person, PersonId};

/// User-supplied comparator over a person's relatives — spec calls these
/// `sortChildrenFunction`/`sortSpousesFunction`.
pub type SortFn = std::rc::Rc<dyn Fn(&Person, &Person) -> std::cmp::Ordering>;

/// Invoked once per built hierarchy before layout runs.
pub type TreeHierarchyHook = std::rc::Rc<dyn Fn(&mut Vec<PersonId>)>;

/// `private_cards_config.condition` (§4.4).
pub type PrivacyPredicate = std::rc::Rc<dyn Fn(&Person) -> bool>;

#[derive(Clone)]
pub struct LayoutConfig {
    pub node_separation: f32,
    pub level_separation: f32,
    pub single_parent_empty_card: bool,
    pub is_horizontal: bool,
    pub one_level_rels: bool,
    pub ancestry_depth: Option<u32>,
    pub progeny_depth: Option<u32>,
    pub show_siblings_of_main: bool,
    pub sort_children: Option<SortFn>,
    pub sort_spouses: Option<SortFn>,
    pub modify_tree_hierarchy: Option<TreeHierarchyHook>,
    pub private_cards_condition: Option<PrivacyPredicate>,
    pub duplicate_branch_toggle: bool,
    pub on_toggle_one_close_others: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_separation: 250.0,
            level_separation: 150.0,
            single_parent_empty_card: true,
            is_horizontal: false,
            one_level_rels: false,
            ancestry_depth: None,
            progeny_depth: None,
            show_siblings_of_main: false,
            sort_children: None,
            sort_spouses: None,
            modify_tree_hierarchy: None,
            private_cards_condition: None,
            duplicate_branch_toggle: false,
            on_toggle_one_close_others: false,
        }
    }
}

impl std::fmt::Debug for LayoutConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutConfig")
            .field("node_separation", &self.node_separation)
            .field("level_separation", &self.level_separation)
            .field("single_parent_empty_card", &self.single_parent_empty_card)
            .field("is_horizontal", &self.is_horizontal)
            .field("one_level_rels", &self.one_level_rels)
            .field("ancestry_depth", &self.ancestry_depth)
            .field("progeny_depth", &self.progeny_depth)
            .field("show_siblings_of_main", &self.show_siblings_of_main)
            .field("duplicate_branch_toggle", &self.duplicate_branch_toggle)
            .field("on_toggle_one_close_others", &self.on_toggle_one_close_others)
            .finish()
    }
}
