pub mod chat;
pub mod form;
pub mod json;
pub mod listing;
pub mod md;

use crate::error::AgileOpsError;
use crate::types::report::SprintReportData;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Chat,
    Form,
}

/// Where rendered links point to.
#[derive(Debug, Clone)]
pub struct RenderTargets<'a> {
    pub jira_base_url: &'a str,
    pub form_url: &'a str,
}

pub fn render(
    report: &SprintReportData,
    format: OutputFormat,
    targets: &RenderTargets<'_>,
) -> Result<String, AgileOpsError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(AgileOpsError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, targets.jira_base_url)),
        OutputFormat::Chat => {
            chat::to_sorted_pretty_json(report).map(|text| format!("```{text}```"))
        }
        OutputFormat::Form => form::to_form_url(report, targets.form_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::json::tests::sample_report;

    const TARGETS: RenderTargets<'static> = RenderTargets {
        jira_base_url: "https://jira.test",
        form_url: "https://forms.test/?",
    };

    #[test]
    fn chat_format_wraps_sorted_json_in_code_block() {
        let rendered = render(&sample_report(), OutputFormat::Chat, &TARGETS).unwrap();
        assert!(rendered.starts_with("```{\n    \"average_velocity\": 17,"));
        assert!(rendered.ends_with("}```"));
    }

    #[test]
    fn form_format_uses_configured_form_url() {
        let rendered = render(&sample_report(), OutputFormat::Form, &TARGETS).unwrap();
        assert!(rendered.starts_with("https://forms.test/?entry."));
    }
}
