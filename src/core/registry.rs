use std::collections::HashMap;

use log::debug;

use crate::core::template::Template;
use crate::error::ExportError;

/// Registry of templates keyed by record type name.
///
/// Built once at process startup and passed by reference to the export
/// surface. Registration problems are fatal configuration errors; lookups
/// after startup never fail, they just return `None` for unknown types.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registers a template under its type name.
    ///
    /// Registering the same type name twice is an
    /// [`ExportError::Template`]: templates are immutable for the life of
    /// the process and silent replacement would change column order under
    /// a running exporter.
    pub fn register(&mut self, template: Template) -> Result<(), ExportError> {
        let type_name = template.type_name().to_string();
        if self.templates.contains_key(&type_name) {
            return Err(ExportError::Template(format!(
                "Template '{}' is already registered",
                type_name
            )));
        }
        debug!("Registered template: {}", type_name);
        self.templates.insert(type_name, template);
        Ok(())
    }

    /// Looks up the template for a record type.
    pub fn get(&self, type_name: &str) -> Option<&Template> {
        self.templates.get(type_name)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when no template has been registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
