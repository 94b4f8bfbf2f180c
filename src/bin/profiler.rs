//! Profiler Lambda
//!
//! Invoked with `{ "guid": ..., "jobTemplate": ... }` once the source has been inspected.
//! Chooses the encoding profile and returns the updated workflow record.
//!
//! Environment Variables: see `WorkflowConfig`; `DYNAMODB_TABLE` is required.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use vodflow::adapters::aws::dynamodb::DynamoAdapter;
use vodflow::application::{ProfilerRequest, ProfilerService};
use vodflow::{telemetry, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = WorkflowConfig::from_env()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let repo = DynamoAdapter::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        config.dynamodb_table.clone(),
    );

    let service = ProfilerService::new(repo, config);
    let service = &service;
    run(service_fn(
        move |event: LambdaEvent<ProfilerRequest>| async move {
            Ok::<_, Error>(service.handle(&event.payload).await?)
        },
    ))
    .await
}
