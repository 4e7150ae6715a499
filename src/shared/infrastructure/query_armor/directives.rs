use async_graphql::Name;
use async_graphql::parser::types::{OperationDefinition, Selection, SelectionSet};
use std::collections::HashSet;

use super::Fragments;

pub fn measure(operation: &OperationDefinition, fragments: &Fragments) -> usize {
    let mut path = HashSet::new();
    operation.directives.len() + directives_in(&operation.selection_set.node, fragments, &mut path)
}

fn directives_in<'a>(
    selection_set: &'a SelectionSet,
    fragments: &'a Fragments,
    path: &mut HashSet<&'a Name>,
) -> usize {
    let mut total = 0;
    for item in &selection_set.items {
        total += match &item.node {
            Selection::Field(field) => {
                field.node.directives.len()
                    + directives_in(&field.node.selection_set.node, fragments, path)
            }
            Selection::InlineFragment(inline) => {
                inline.node.directives.len()
                    + directives_in(&inline.node.selection_set.node, fragments, path)
            }
            Selection::FragmentSpread(spread) => {
                let name = &spread.node.fragment_name.node;
                let reached = match fragments.get(name) {
                    Some(fragment) if path.insert(name) => {
                        let count = fragment.node.directives.len()
                            + directives_in(&fragment.node.selection_set.node, fragments, path);
                        path.remove(name);
                        count
                    }
                    _ => 0,
                };
                spread.node.directives.len() + reached
            }
        };
    }
    total
}
