// Query armor: structural limits checked before a GraphQL operation executes.
//
// Purpose
// - Refuse oversized or expensive documents before the schema validates or resolves them.
//
// Responsibilities
// - Count lexical tokens on the raw text, then parse and walk every operation for
//   depth, aliases, directives and cost.
// - Report the first guard that trips. Each guard only looks at its own count and limit.
// - Log accept/reject verdicts when diagnostics are on.
//
// Boundaries
// - Syntax errors are not rejections. The schema reports them on execution.

pub mod aliases;
pub mod cost;
pub mod depth;
pub mod directives;
pub mod tokens;

use async_graphql::parser::parse_query;
use async_graphql::parser::types::{Field, FragmentDefinition};
use async_graphql::{Name, Positioned, ServerError};
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

pub type Fragments = HashMap<Name, Positioned<FragmentDefinition>>;

pub(crate) fn is_introspection(field: &Field) -> bool {
    field.name.node.as_str() == "__schema"
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmorLimits {
    pub max_depth: usize,
    pub max_aliases: usize,
    pub max_directives: usize,
    pub max_tokens: usize,
    pub max_cost: f64,
}

impl Default for ArmorLimits {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_aliases: 5,
            max_directives: 5,
            max_tokens: 250,
            max_cost: 1000.0,
        }
    }
}

/// Measurements of an accepted document. Document-level values are the maximum over its operations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmorReport {
    pub tokens: usize,
    pub depth: usize,
    pub aliases: usize,
    pub directives: usize,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArmorRejection {
    #[error("Query depth limit of {limit} exceeded, found {found}.")]
    Depth { limit: usize, found: usize },

    #[error("Aliases limit of {limit} exceeded, found {found}.")]
    Aliases { limit: usize, found: usize },

    #[error("Directives limit of {limit} exceeded, found {found}.")]
    Directives { limit: usize, found: usize },

    #[error("Token limit of {limit} exceeded, found {found}.")]
    Tokens { limit: usize, found: usize },

    #[error("Query Cost limit of {limit} exceeded, found {found}.")]
    Cost { limit: f64, found: f64 },
}

impl ArmorRejection {
    pub fn guard(&self) -> &'static str {
        match self {
            ArmorRejection::Depth { .. } => "max_depth",
            ArmorRejection::Aliases { .. } => "max_aliases",
            ArmorRejection::Directives { .. } => "max_directives",
            ArmorRejection::Tokens { .. } => "max_tokens",
            ArmorRejection::Cost { .. } => "cost_limit",
        }
    }
}

impl From<ArmorRejection> for ServerError {
    fn from(rejection: ArmorRejection) -> Self {
        ServerError::new(rejection.to_string(), None)
    }
}

#[derive(Debug, Clone)]
pub struct QueryArmor {
    limits: ArmorLimits,
    diagnostics: bool,
}

impl QueryArmor {
    pub fn new(limits: ArmorLimits, diagnostics: bool) -> Self {
        Self {
            limits,
            diagnostics,
        }
    }

    pub fn inspect(&self, query: &str) -> Result<ArmorReport, ArmorRejection> {
        let limits = self.limits;
        let mut report = ArmorReport {
            tokens: tokens::count(query),
            ..ArmorReport::default()
        };
        if !self.verdict("max_tokens", report.tokens, limits.max_tokens) {
            return Err(ArmorRejection::Tokens {
                limit: limits.max_tokens,
                found: report.tokens,
            });
        }

        let Ok(document) = parse_query(query) else {
            return Ok(report);
        };

        for (_, operation) in document.operations.iter() {
            let operation = &operation.node;
            let selection_set = &operation.selection_set.node;
            report.depth = report
                .depth
                .max(depth::measure(selection_set, &document.fragments));
            report.aliases = report
                .aliases
                .max(aliases::measure(selection_set, &document.fragments));
            report.directives = report
                .directives
                .max(directives::measure(operation, &document.fragments));
            report.cost = report
                .cost
                .max(cost::measure(selection_set, &document.fragments));
        }

        if !self.verdict("max_depth", report.depth, limits.max_depth) {
            return Err(ArmorRejection::Depth {
                limit: limits.max_depth,
                found: report.depth,
            });
        }
        if !self.verdict("max_aliases", report.aliases, limits.max_aliases) {
            return Err(ArmorRejection::Aliases {
                limit: limits.max_aliases,
                found: report.aliases,
            });
        }
        if !self.verdict("max_directives", report.directives, limits.max_directives) {
            return Err(ArmorRejection::Directives {
                limit: limits.max_directives,
                found: report.directives,
            });
        }
        if !self.verdict("cost_limit", report.cost, limits.max_cost) {
            return Err(ArmorRejection::Cost {
                limit: limits.max_cost,
                found: report.cost,
            });
        }
        Ok(report)
    }

    // true when the count is within its limit
    fn verdict<T>(&self, guard: &'static str, found: T, limit: T) -> bool
    where
        T: PartialOrd + Display,
    {
        let accepted = found <= limit;
        if self.diagnostics {
            if accepted {
                tracing::info!(guard, %found, %limit, "graphql guard accepted");
            } else {
                tracing::warn!(guard, %found, %limit, "graphql guard rejected");
            }
        }
        accepted
    }
}

impl Default for QueryArmor {
    fn default() -> Self {
        Self::new(ArmorLimits::default(), false)
    }
}

#[cfg(test)]
pub(crate) fn first_operation(
    query: &str,
) -> (async_graphql::parser::types::OperationDefinition, Fragments) {
    let document = parse_query(query).expect("test query should parse");
    let operation = document
        .operations
        .iter()
        .next()
        .map(|(_, operation)| operation.node.clone())
        .expect("test query should declare an operation");
    (operation, document.fragments)
}
