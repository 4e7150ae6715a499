use async_graphql::Name;
use async_graphql::parser::types::{Selection, SelectionSet};
use std::collections::HashSet;

use super::{Fragments, is_introspection};

// Fragments are flattened: spreads and inline fragments do not add a level.
pub fn measure(selection_set: &SelectionSet, fragments: &Fragments) -> usize {
    let mut path = HashSet::new();
    depth_of(selection_set, 0, fragments, &mut path)
}

fn depth_of<'a>(
    selection_set: &'a SelectionSet,
    parent_depth: usize,
    fragments: &'a Fragments,
    path: &mut HashSet<&'a Name>,
) -> usize {
    let mut deepest = parent_depth;
    for item in &selection_set.items {
        let depth = match &item.node {
            Selection::Field(field) => {
                if is_introspection(&field.node) {
                    continue;
                }
                depth_of(
                    &field.node.selection_set.node,
                    parent_depth + 1,
                    fragments,
                    path,
                )
            }
            Selection::InlineFragment(inline) => {
                let selection_set = &inline.node.selection_set.node;
                depth_of(selection_set, parent_depth, fragments, path)
            }
            Selection::FragmentSpread(spread) => {
                let name = &spread.node.fragment_name.node;
                let Some(fragment) = fragments.get(name) else {
                    continue;
                };
                if !path.insert(name) {
                    continue;
                }
                let selection_set = &fragment.node.selection_set.node;
                let depth = depth_of(selection_set, parent_depth, fragments, path);
                path.remove(name);
                depth
            }
        };
        deepest = deepest.max(depth);
    }
    deepest
}
