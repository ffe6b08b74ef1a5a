//! Shared API Gateway proxy contracts for local handler invocation.
//!
//! This crate owns the request/response shapes and the fixed health-check
//! fixture. It intentionally excludes Lambda runtime and I/O concerns, which
//! live in `proxy_invoke_lambda`.

pub mod contract;
pub mod fixture;
