// Composition root.
//
// Responsibilities
// - Read config from environment.
// - Pick the concrete media store and ledger implementations.
// - Wire them into the use case handlers, the GraphQL schema and the router.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
