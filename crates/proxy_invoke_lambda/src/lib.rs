//! Local invocation harness and Lambda wiring for API Gateway proxy handlers.
//!
//! This crate owns runtime integration details (the stream handler and
//! execution context seams, the proxy handler, the Lambda entry point) and
//! the `invoker` module that drives a single local invocation.

pub mod adapters;
pub mod error;
pub mod handlers;
pub mod invoker;
