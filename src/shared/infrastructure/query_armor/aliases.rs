use async_graphql::Name;
use async_graphql::parser::types::{Selection, SelectionSet};
use std::collections::HashSet;

use super::Fragments;

pub fn measure(selection_set: &SelectionSet, fragments: &Fragments) -> usize {
    let mut path = HashSet::new();
    aliases_in(selection_set, fragments, &mut path)
}

fn aliases_in<'a>(
    selection_set: &'a SelectionSet,
    fragments: &'a Fragments,
    path: &mut HashSet<&'a Name>,
) -> usize {
    let mut total = 0;
    for item in &selection_set.items {
        total += match &item.node {
            Selection::Field(field) => {
                usize::from(field.node.alias.is_some())
                    + aliases_in(&field.node.selection_set.node, fragments, path)
            }
            Selection::InlineFragment(inline) => {
                aliases_in(&inline.node.selection_set.node, fragments, path)
            }
            Selection::FragmentSpread(spread) => {
                let name = &spread.node.fragment_name.node;
                match fragments.get(name) {
                    Some(fragment) if path.insert(name) => {
                        let count = aliases_in(&fragment.node.selection_set.node, fragments, path);
                        path.remove(name);
                        count
                    }
                    _ => 0,
                }
            }
        };
    }
    total
}
