//! Integration tests: snapshot loading over HTTP and disk, and end-to-end queries.

mod fixture;
mod loader_tests;
mod query_tests;
