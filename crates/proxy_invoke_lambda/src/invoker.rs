//! Drives a single local invocation of a [`StreamHandler`] and reports it on
//! a console.
//!
//! The request is echoed before the handler runs. The response section is
//! written only after the handler returns, so a failed run never shows a
//! partial or fabricated response.

use std::io::{Cursor, Write};

use proxy_invoke_core::contract::ProxyRequest;
use proxy_invoke_core::fixture::{health_check_request, request_payload};

use crate::adapters::context::InvocationContext;
use crate::adapters::stream_handler::StreamHandler;
use crate::error::InvocationError;

pub const REQUEST_HEADING: &str = "Request:";
pub const RESPONSE_HEADING: &str = "Response from Lambda handler:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    pub request: String,
    pub response: String,
}

/// Runs the fixed `GET /health` event through `handler` with no host
/// context.
pub fn invoke_health_check(
    handler: &dyn StreamHandler,
    console: &mut dyn Write,
) -> Result<InvocationReport, InvocationError> {
    invoke(handler, &health_check_request(), None, console)
}

pub fn invoke(
    handler: &dyn StreamHandler,
    request: &ProxyRequest,
    context: Option<&dyn InvocationContext>,
    console: &mut dyn Write,
) -> Result<InvocationReport, InvocationError> {
    let payload = request_payload(request)?;

    writeln!(
        console,
        "Invoking Lambda handler with {} {} request...",
        request.http_method,
        request.effective_path()
    )?;
    writeln!(console, "{REQUEST_HEADING}")?;
    writeln!(console, "{payload}")?;

    let mut input = Cursor::new(payload.as_bytes());
    let mut output = Vec::new();
    handler.handle_request(&mut input, &mut output, context)?;

    // Invalid UTF-8 is replaced with U+FFFD rather than failing the run.
    let response = String::from_utf8_lossy(&output).into_owned();
    writeln!(console, "\n{RESPONSE_HEADING}")?;
    writeln!(console, "{response}")?;
    console.flush()?;

    Ok(InvocationReport {
        request: payload,
        response,
    })
}
