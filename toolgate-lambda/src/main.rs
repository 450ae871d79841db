use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use toolgate_lambda::{HandlerResponse, dispatch, init_tracing};
use tracing::debug;

async fn handle(event: LambdaEvent<Value>) -> Result<HandlerResponse, Error> {
    let (payload, context) = event.into_parts();
    debug!(request_id = %context.request_id, "invocation");
    let custom = context.client_context.as_ref().map(|client| &client.custom);
    Ok(dispatch(&payload, custom))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    lambda_runtime::run(service_fn(handle)).await
}
