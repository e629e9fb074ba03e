//! The two probe operations: build, execute, report, render.

use anyhow::Result;
use gemini_core::{Credential, GeminiClient, Report};
use tracing::{info, warn};

use crate::transport::Transport;

/// What a probe run produced: the report and the text to print for it.
#[derive(Debug)]
pub struct ProbeOutput {
    pub report: Report,
    pub rendered: String,
}

/// How a list-models report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListStyle {
    /// The decoded JSON, as-is.
    #[default]
    Json,
    /// Numbered listing of model names and capabilities.
    Summary,
}

/// How a generate-content report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerateStyle {
    #[default]
    Json,
    /// Only the first candidate's text.
    Text,
}

pub fn list_models(
    client: &GeminiClient,
    transport: &dyn Transport,
    credential: &Credential,
    style: ListStyle,
) -> Result<ProbeOutput> {
    info!("fetching available models");
    let report = client.report(transport.execute(client.build_list_models(credential))?);

    let rendered = match style {
        ListStyle::Summary if report.is_success() => match client.parse_model_list(&report) {
            Ok(list) => list.summary(),
            Err(e) => {
                warn!(error = %e, "cannot summarize model list, printing raw report");
                report.to_string()
            }
        },
        _ => report.to_string(),
    };

    Ok(ProbeOutput { report, rendered })
}

pub fn generate_content(
    client: &GeminiClient,
    transport: &dyn Transport,
    credential: &Credential,
    model: &str,
    prompt: &str,
    style: GenerateStyle,
) -> Result<ProbeOutput> {
    info!(model, "requesting completion");
    let req = client.build_generate_content(model, credential, prompt)?;
    let report = client.report(transport.execute(req)?);

    let text = match style {
        GenerateStyle::Text if report.is_success() => client
            .parse_generate_content(&report)
            .map_err(|e| warn!(error = %e, "unexpected completion shape"))
            .ok()
            .and_then(|resp| resp.text()),
        _ => None,
    };
    let rendered = text.unwrap_or_else(|| report.to_string());

    Ok(ProbeOutput { report, rendered })
}

/// The stderr line for a non-2xx report; `None` when the call succeeded.
pub fn failure_line(report: &Report) -> Option<String> {
    if report.is_success() {
        return None;
    }
    let reason = report
        .api_error_message()
        .unwrap_or_else(|| "request failed".to_string());
    Some(format!("Error: HTTP {}: {reason}", report.status))
}
