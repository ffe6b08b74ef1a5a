use std::io::{Read, Write};

use crate::adapters::context::InvocationContext;
use crate::error::InvocationError;

/// A handler driven through raw byte streams, the way a Lambda host hands a
/// function its event and collects its response.
///
/// `context` is `None` when no host is present (local runs); implementations
/// must not require it.
pub trait StreamHandler {
    fn handle_request(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        context: Option<&dyn InvocationContext>,
    ) -> Result<(), InvocationError>;
}
