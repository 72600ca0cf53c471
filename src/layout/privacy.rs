//! Privacy marking (§4.4): a person is private if she, or any ancestor
//! reached via parents/spouses, recursively satisfies the user predicate.

use std::collections::HashMap;

use crate::graph::PersonGraph;
use crate::person::PersonId;

use super::config::PrivacyPredicate;

/// Compute `is_private` for every person reachable from `roots` by
/// walking parents and spouses. Synthetic (`to_add`) persons are excluded
/// from the predicate itself but still inherit privacy from a private
/// relative.
pub fn compute_privacy(
    graph: &PersonGraph,
    roots: &[PersonId],
    predicate: &PrivacyPredicate,
) -> HashMap<PersonId, bool> {
    let mut memo: HashMap<PersonId, bool> = HashMap::new();
    let mut in_progress: std::collections::HashSet<PersonId> = std::collections::HashSet::new();

    for root in roots {
        resolve(graph, root, predicate, &mut memo, &mut in_progress);
    }
    memo
}

fn resolve(
    graph: &PersonGraph,
    id: &PersonId,
    predicate: &PrivacyPredicate,
    memo: &mut HashMap<PersonId, bool>,
    in_progress: &mut std::collections::HashSet<PersonId>,
) -> bool {
    if let Some(&cached) = memo.get(id) {
        return cached;
    }
    if !in_progress.insert(id.clone()) {
        // Cycle guard: a person already being resolved contributes `false`
        // rather than recursing forever.
        return false;
    }

    let Some(person) = graph.get(id) else {
        in_progress.remove(id);
        return false;
    };

    let mut is_private = !person.to_add && predicate(person);

    if !is_private {
        for parent in person.rels.father.iter().chain(person.rels.mother.iter()) {
            if resolve(graph, parent, predicate, memo, in_progress) {
                is_private = true;
                break;
            }
        }
    }
    if !is_private {
        for spouse in &person.rels.spouses {
            if resolve(graph, spouse, predicate, memo, in_progress) {
                is_private = true;
                break;
            }
        }
    }

    in_progress.remove(id);
    memo.insert(id.clone(), is_private);
    is_private
}
