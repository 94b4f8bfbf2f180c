//! Encode Lambda
//!
//! Invoked with the profiled workflow record. Fetches the chosen job template, builds the
//! job and submits it to MediaConvert.
//!
//! Environment Variables: see `WorkflowConfig`; `DYNAMODB_TABLE` and `MEDIACONVERT_ROLE`
//! are required, `MEDIACONVERT_ENDPOINT` is optional.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use vodflow::adapters::aws::mediaconvert::MediaConvertAdapter;
use vodflow::application::EncodeService;
use vodflow::domain::workflow::WorkflowState;
use vodflow::{telemetry, WorkflowConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = WorkflowConfig::from_env()?;
    config.mediaconvert_role()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let transcoder =
        MediaConvertAdapter::from_sdk_config(&sdk_config, config.mediaconvert_endpoint.as_deref());

    let service = EncodeService::new(transcoder, config);
    let service = &service;
    run(service_fn(
        move |event: LambdaEvent<WorkflowState>| async move {
            Ok::<_, Error>(service.handle(event.payload).await?)
        },
    ))
    .await
}
