//! Runs the proxy handler once against the fixed `GET /health` event and
//! prints the request and response.

use proxy_invoke_lambda::error::InvocationError;
use proxy_invoke_lambda::handlers::api_proxy::ApiProxyHandler;
use proxy_invoke_lambda::invoker::invoke_health_check;

fn main() -> Result<(), InvocationError> {
    let handler = ApiProxyHandler::default();
    let stdout = std::io::stdout();
    let mut console = stdout.lock();

    invoke_health_check(&handler, &mut console)?;
    Ok(())
}
