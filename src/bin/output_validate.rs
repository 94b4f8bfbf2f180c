//! Output Validate Lambda
//!
//! Triggered by the MediaConvert job state change event for a completed job. Resolves
//! playlists, file outputs and the latest thumbnail, and records them on the workflow.
//!
//! Environment Variables: see `WorkflowConfig`; `DYNAMODB_TABLE` is required.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use vodflow::adapters::aws::{dynamodb::DynamoAdapter, s3::S3Adapter};
use vodflow::application::OutputValidateService;
use vodflow::{telemetry, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = WorkflowConfig::from_env()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let storage = S3Adapter::new(aws_sdk_s3::Client::new(&sdk_config));
    let repo = DynamoAdapter::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        config.dynamodb_table.clone(),
    );

    let service = OutputValidateService::new(storage, repo, config);
    let service = &service;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(service.handle_event(event.payload).await?)
    }))
    .await
}
