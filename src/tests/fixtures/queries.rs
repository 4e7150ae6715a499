// GraphQL documents shaped to sit exactly on, or just past, a query armor limit.

/// `{ a { a { ... a } } }` with `depth` nested fields.
pub fn nested_query(depth: usize) -> String {
    let mut selection = "a".to_string();
    for _ in 1..depth {
        selection = format!("a {{ {selection} }}");
    }
    format!("{{ {selection} }}")
}

/// `count` aliased copies of the greeting field.
pub fn aliased_query(count: usize) -> String {
    let fields: Vec<String> = (0..count).map(|i| format!("g{i}: greeting")).collect();
    format!("{{ {} }}", fields.join(" "))
}

/// One field carrying `count` directives.
pub fn directive_query(count: usize) -> String {
    let directives: Vec<&str> = (0..count)
        .map(|i| {
            if i % 2 == 0 {
                "@include(if: true)"
            } else {
                "@skip(if: false)"
            }
        })
        .collect();
    format!("{{ greeting {} }}", directives.join(" "))
}

/// `count` unaliased greeting fields, `count + 2` tokens in total.
pub fn repeated_field_query(count: usize) -> String {
    format!("{{ {} }}", vec!["greeting"; count].join(" "))
}

/// A chain `depth` fields deep whose innermost object selects `leaves` scalars.
pub fn deep_wide_query(depth: usize, leaves: usize) -> String {
    let mut selection = vec!["b"; leaves].join(" ");
    for _ in 1..depth {
        selection = format!("a {{ {selection} }}");
    }
    format!("{{ {selection} }}")
}

#[cfg(test)]
mod query_fixtures_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn nested_query_builds_the_requested_depth() {
        assert_eq!(nested_query(1), "{ a }");
        assert_eq!(nested_query(3), "{ a { a { a } } }");
    }

    #[rstest]
    fn deep_wide_query_puts_the_leaves_at_the_bottom() {
        assert_eq!(deep_wide_query(2, 3), "{ a { b b b } }");
    }
}
