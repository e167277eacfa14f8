use tracing::info;
use validator::Validate;

use crate::domain::error::Result;
use crate::domain::template::MessageTemplate;

/// Templates keyed by name, kept in first-save order.
#[derive(Debug, Default, Clone)]
pub struct TemplateStore {
    templates: Vec<MessageTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn list(&self) -> &[MessageTemplate] {
        &self.templates
    }

    /// Replaces the template with the same name in place, else appends.
    pub fn upsert(&mut self, template: MessageTemplate) -> Result<MessageTemplate> {
        let template = template.normalized();
        template.validate()?;

        match self.templates.iter().position(|t| t.name == template.name) {
            Some(position) => {
                self.templates[position] = template.clone();
                info!(template = %template.name, "Template replaced");
            }
            None => {
                self.templates.push(template.clone());
                info!(template = %template.name, "Template added");
            }
        }
        Ok(template)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.name != name);
        let removed = self.templates.len() != before;
        if removed {
            info!(template = %name, "Template deleted");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&MessageTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }
}
