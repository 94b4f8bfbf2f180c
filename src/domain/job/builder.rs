use super::catalogue::{default_group, frame_capture_group};
use super::merge::merge_group;
use super::spec::{
    AccelerationSettings, InputSpec, JobContext, JobSettings, JobSpecification, JobTemplate,
    TimecodeConfig, TimecodeSource, UserMetadata,
};
use crate::error::Result;
use std::collections::HashSet;
use tracing::{info, warn};

/// Assemble the job to submit from a fetched template.
///
/// Recognised template groups are overlaid onto their catalogue defaults in template
/// order; unrecognised ones are skipped. The frame capture group, when requested, is
/// always last.
pub fn build_job_specification(
    template: &JobTemplate,
    context: &JobContext,
) -> Result<JobSpecification> {
    let destination_root = context.destination_root();
    let mut merged_kinds = HashSet::new();
    let mut output_groups = Vec::with_capacity(template.output_groups.len() + 1);

    for group in &template.output_groups {
        let group_type = &group.output_group_settings.group_type;
        let Some(kind) = group.kind() else {
            warn!("skipping unsupported {} in job template", group_type);
            continue;
        };
        if !merged_kinds.insert(kind) {
            warn!("skipping duplicate {} in job template", group_type);
            continue;
        }
        info!("{} found in job template", kind.default_name());
        let default = default_group(kind, &destination_root);
        output_groups.push(merge_group(&default, group, kind)?);
    }

    if let Some(geometry) = context.frame_capture {
        output_groups.push(frame_capture_group(geometry, &destination_root));
    }

    let timecode_source = if context.acceleration.is_active() {
        TimecodeSource::Zerobased
    } else {
        TimecodeSource::Embedded
    };

    let mut input = InputSpec::new(context.input_path(), context.input_rotate.clone());
    input.timecode_source = timecode_source;

    Ok(JobSpecification {
        job_template: context.template_name.clone(),
        role: context.role.clone(),
        user_metadata: UserMetadata {
            guid: context.guid.clone(),
            workflow: context.workflow_name.clone(),
        },
        settings: JobSettings {
            inputs: vec![input],
            output_groups,
            timecode_config: TimecodeConfig {
                source: timecode_source,
            },
        },
        acceleration_settings: context
            .acceleration
            .is_active()
            .then_some(AccelerationSettings {
                mode: context.acceleration,
            }),
    })
}
