use std::collections::HashMap;

use regex::Regex;

use crate::PromptError;

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Replaces `{{ name }}` placeholders; unknown names render empty.
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String, PromptError> {
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|e| PromptError::InvalidTemplate(e.to_string()))?;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            let key = &caps[1];
            vars.get(key).cloned().unwrap_or_default()
        });
        Ok(rendered.to_string())
    }
}
