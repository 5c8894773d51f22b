//! Property-based tests for normalization and querying.

mod normalize_props;
mod query_props;
