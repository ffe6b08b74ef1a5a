use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use proxy_invoke_lambda::adapters::context::LambdaContextAdapter;
use proxy_invoke_lambda::adapters::stream_handler::StreamHandler;
use proxy_invoke_lambda::handlers::api_proxy::{ApiHandlerConfig, ApiProxyHandler};
use serde_json::Value;

async fn handle_request(
    handler: &ApiProxyHandler,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();
    let input = serde_json::to_vec(&payload)
        .map_err(|error| Error::from(format!("failed to re-encode event: {error}")))?;

    let mut output = Vec::new();
    let adapter = LambdaContextAdapter::new(&context);
    handler.handle_request(&mut input.as_slice(), &mut output, Some(&adapter))?;

    serde_json::from_slice(&output)
        .map_err(|error| Error::from(format!("handler wrote a non-JSON response: {error}")))
}

fn config_from_env() -> ApiHandlerConfig {
    std::env::var("API_BASE_PATH")
        .map(|value| ApiHandlerConfig::with_base_path(&value))
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = config_from_env();
    tracing::info!(base_path = ?config.base_path, "starting api proxy handler");

    let handler = ApiProxyHandler::new(config);
    let handler = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(handler, event).await
    }))
    .await
}
