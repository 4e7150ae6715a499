use async_graphql::Name;
use async_graphql::parser::types::{Selection, SelectionSet};
use std::collections::HashSet;

use super::{Fragments, is_introspection};

pub const SCALAR_COST: f64 = 1.0;
pub const OBJECT_COST: f64 = 2.0;
pub const DEPTH_COST_FACTOR: f64 = 1.5;

// The operation itself is costed like an object field.
pub fn measure(selection_set: &SelectionSet, fragments: &Fragments) -> f64 {
    let mut path = HashSet::new();
    object_cost(selection_set, fragments, &mut path)
}

fn object_cost<'a>(
    selection_set: &'a SelectionSet,
    fragments: &'a Fragments,
    path: &mut HashSet<&'a Name>,
) -> f64 {
    let children: f64 = selection_set
        .items
        .iter()
        .map(|item| selection_cost(&item.node, fragments, path))
        .sum();
    OBJECT_COST + DEPTH_COST_FACTOR * children
}

fn selection_cost<'a>(
    selection: &'a Selection,
    fragments: &'a Fragments,
    path: &mut HashSet<&'a Name>,
) -> f64 {
    match selection {
        Selection::Field(field) if is_introspection(&field.node) => 0.0,
        Selection::Field(field) if field.node.selection_set.node.items.is_empty() => SCALAR_COST,
        Selection::Field(field) => object_cost(&field.node.selection_set.node, fragments, path),
        Selection::InlineFragment(inline) => {
            object_cost(&inline.node.selection_set.node, fragments, path)
        }
        Selection::FragmentSpread(spread) => {
            let name = &spread.node.fragment_name.node;
            match fragments.get(name) {
                Some(fragment) if path.insert(name) => {
                    let cost = object_cost(&fragment.node.selection_set.node, fragments, path);
                    path.remove(name);
                    SCALAR_COST + DEPTH_COST_FACTOR * cost
                }
                _ => SCALAR_COST,
            }
        }
    }
}
