//! Message templates keyed by template id

use std::collections::HashMap;

use crate::InfrastructureError;

/// Configured message bodies; `{0}`, `{1}` ... are positional parameters
#[derive(Debug, Clone, Default)]
pub struct SmsTemplates {
    templates: HashMap<String, String>,
}

impl SmsTemplates {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// Render `template_id` with `params`
    pub fn render(&self, template_id: &str, params: &[String]) -> Result<String, InfrastructureError> {
        let body = self.templates.get(template_id).ok_or_else(|| {
            InfrastructureError::Sms(format!("Unknown SMS template: {}", template_id))
        })?;

        let rendered = params
            .iter()
            .enumerate()
            .fold(body.clone(), |acc, (i, value)| acc.replace(&format!("{{{}}}", i), value));

        Ok(rendered)
    }
}
