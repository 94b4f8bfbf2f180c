use crate::domain::job::{JobSpecification, JobTemplate, OutputGroupSpec};
use crate::ports::transcoder::TranscodingService;
use async_trait::async_trait;
use aws_sdk_mediaconvert::types as mc;
use aws_sdk_mediaconvert::Client;
use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::AfterDeserializationInterceptorContextRef;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::orchestrator::HttpRequest;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::body::SdkBody;
use aws_smithy_types::config_bag::ConfigBag;
use serde::Deserialize;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// MediaConvertAdapter implements TranscodingService for AWS Elemental MediaConvert.
///
/// Templates and jobs cross this adapter as the service's JSON documents. The template
/// is read from the raw GetJobTemplate response and the job is written as the CreateJob
/// request body, so codec, audio, caption and group settings pass through untouched.
#[derive(Clone)]
pub struct MediaConvertAdapter {
    client: Client,
}

impl MediaConvertAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client, optionally pinned to an account-specific endpoint.
    pub fn from_sdk_config(config: &aws_config::SdkConfig, endpoint: Option<&str>) -> Self {
        let mut builder = aws_sdk_mediaconvert::config::Builder::from(config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl TranscodingService for MediaConvertAdapter {
    async fn get_job_template(
        &self,
        name: &str,
    ) -> Result<JobTemplate, Box<dyn Error + Send + Sync>> {
        let capture = CaptureBody::default();
        self.client
            .get_job_template()
            .name(name)
            .customize()
            .interceptor(capture.clone())
            .send()
            .await?;

        let body = capture
            .take()
            .ok_or_else(|| format!("job template {} returned no body", name))?;
        template_from_response(&body)
    }

    async fn create_job(
        &self,
        job: &JobSpecification,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let body = job_request_body(job)?;

        // The typed input only satisfies the operation; the signed body is the job document.
        let resp = self
            .client
            .create_job()
            .job_template(&job.job_template)
            .role(&job.role)
            .settings(mc::JobSettings::builder().build())
            .customize()
            .mutate_request(move |request| replace_body(request, &body))
            .send()
            .await?;

        let id = resp
            .job()
            .and_then(|job| job.id())
            .ok_or("CreateJob returned no job id")?;
        Ok(id.to_string())
    }
}

/// Keeps a copy of the response body once the SDK has buffered it.
#[derive(Debug, Clone, Default)]
struct CaptureBody(Arc<Mutex<Option<Vec<u8>>>>);

impl CaptureBody {
    fn take(&self) -> Option<Vec<u8>> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Intercept for CaptureBody {
    fn name(&self) -> &'static str {
        "CaptureBody"
    }

    fn read_after_deserialization(
        &self,
        context: &AfterDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        if let Some(bytes) = context.response().body().bytes() {
            let mut slot = self
                .0
                .lock()
                .map_err(|_| "response capture lock poisoned")?;
            *slot = Some(bytes.to_vec());
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateResponse {
    job_template: TemplateDocument,
}

#[derive(Deserialize)]
struct TemplateDocument {
    name: String,
    #[serde(default)]
    settings: TemplateSettings,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSettings {
    #[serde(default)]
    output_groups: Vec<OutputGroupSpec>,
}

fn template_from_response(body: &[u8]) -> Result<JobTemplate, Box<dyn Error + Send + Sync>> {
    let response: TemplateResponse = serde_json::from_slice(body)?;
    Ok(JobTemplate {
        name: response.job_template.name,
        output_groups: response.job_template.settings.output_groups,
    })
}

fn job_request_body(job: &JobSpecification) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    Ok(serde_json::to_vec(job)?)
}

fn replace_body(request: &mut HttpRequest, body: &[u8]) {
    request
        .headers_mut()
        .insert("content-length", body.len().to_string());
    *request.body_mut() = SdkBody::from(body.to_vec());
}
