use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExportError;

/// Field name that triggers the fixed author-history columns.
pub const AUTHORS_FIELD: &str = "authors";

/// Sub-field order used for `authors` columns, regardless of what the
/// template declares for that field. Guarantees a uniform schema across
/// heterogeneous records of the same type, including records whose author
/// list is empty or absent.
pub const AUTHOR_FIELDS: [&str; 3] = ["user_id", "timestamp", "name"];

/// The declared kind of a single template field.
///
/// Templates target records that nest at most one level deep: an `Object`
/// holds scalar sub-fields, an `ObjectList` holds flat objects sharing the
/// same sub-fields. The serde form is tagged by `kind`, so templates can be
/// declared in JSON configuration and an unrecognized kind is rejected at
/// parse time (see [`Template::from_json`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A single scalar value: string, number, boolean or null.
    Scalar,
    /// A nested object with a fixed, ordered set of scalar sub-fields.
    Object { fields: Vec<String> },
    /// A list of scalar values.
    ScalarList,
    /// A list of objects sharing a fixed, ordered set of scalar sub-fields.
    ObjectList { fields: Vec<String> },
}

/// One named field of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Field name as it appears in records of this type.
    pub name: String,
    /// Declared kind, flattened next to the name in the JSON form.
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// The declared shape of one record type.
///
/// Field order is fixed at construction and is the single source of truth
/// for column order: the header deriver and the row assembler both walk the
/// fields in declaration order, so header width and cell count always
/// agree, whatever an individual record looks like. Templates are validated
/// once, at startup, and are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    type_name: String,
    fields: Vec<TemplateField>,
}

impl Template {
    /// Parses a template from its declarative JSON form.
    ///
    /// The expected shape is:
    ///
    /// ```json
    /// {
    ///   "type_name": "case",
    ///   "fields": [
    ///     { "name": "id", "kind": "scalar" },
    ///     { "name": "tags", "kind": "scalar_list" },
    ///     { "name": "location", "kind": "object", "fields": ["label", "country"] }
    ///   ]
    /// }
    /// ```
    ///
    /// An unrecognized `kind` is a fatal configuration error, surfaced as
    /// [`ExportError::Template`].
    pub fn from_json(value: &Value) -> Result<Template, ExportError> {
        #[derive(Deserialize)]
        struct RawTemplate {
            type_name: String,
            fields: Vec<TemplateField>,
        }

        let raw: RawTemplate = serde_json::from_value(value.clone())
            .map_err(|e| ExportError::Template(format!("Invalid template description: {}", e)))?;
        Template::validate(raw.type_name, raw.fields)
    }

    /// Record type name this template describes.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared fields, in column order.
    pub fn fields(&self) -> &[TemplateField] {
        &self.fields
    }

    fn validate(type_name: String, fields: Vec<TemplateField>) -> Result<Template, ExportError> {
        if type_name.is_empty() {
            return Err(ExportError::Template(
                "Template type name must not be empty".to_string(),
            ));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
        for field in &fields {
            if field.name.is_empty() {
                return Err(ExportError::Template(format!(
                    "Template '{}' declares a field with an empty name",
                    type_name
                )));
            }
            if seen.contains(&field.name.as_str()) {
                return Err(ExportError::Template(format!(
                    "Template '{}' declares field '{}' more than once",
                    type_name, field.name
                )));
            }
            seen.push(&field.name);

            if let FieldKind::Object { fields: subs } | FieldKind::ObjectList { fields: subs } =
                &field.kind
            {
                Self::validate_sub_fields(&type_name, &field.name, subs)?;
            }
        }

        Ok(Template { type_name, fields })
    }

    fn validate_sub_fields(
        type_name: &str,
        field_name: &str,
        subs: &[String],
    ) -> Result<(), ExportError> {
        if subs.is_empty() {
            return Err(ExportError::Template(format!(
                "Template '{}' field '{}' declares no sub-fields",
                type_name, field_name
            )));
        }
        let mut seen: Vec<&str> = Vec::with_capacity(subs.len());
        for sub in subs {
            if sub.is_empty() {
                return Err(ExportError::Template(format!(
                    "Template '{}' field '{}' declares a sub-field with an empty name",
                    type_name, field_name
                )));
            }
            if seen.contains(&sub.as_str()) {
                return Err(ExportError::Template(format!(
                    "Template '{}' field '{}' declares sub-field '{}' more than once",
                    type_name, field_name, sub
                )));
            }
            seen.push(sub);
        }
        Ok(())
    }
}

/// Builder for declaring templates in code.
///
/// Fields are recorded in call order, which becomes the column order for
/// every export of this record type.
///
/// # Examples
///
/// ```
/// use record_export_rs::core::template::TemplateBuilder;
///
/// let template = TemplateBuilder::new("case")
///     .scalar("id")
///     .scalar("title")
///     .scalar_list("tags")
///     .object("location", &["label", "country"])
///     .object_list("links", &["url", "caption"])
///     .build()
///     .unwrap();
///
/// assert_eq!(template.type_name(), "case");
/// assert_eq!(template.fields().len(), 5);
/// ```
#[derive(Default)]
pub struct TemplateBuilder {
    type_name: String,
    fields: Vec<TemplateField>,
}

impl TemplateBuilder {
    /// Creates a builder for the given record type name.
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Declares a scalar field.
    pub fn scalar(mut self, name: &str) -> Self {
        self.fields.push(TemplateField {
            name: name.to_string(),
            kind: FieldKind::Scalar,
        });
        self
    }

    /// Declares a list-of-scalars field.
    pub fn scalar_list(mut self, name: &str) -> Self {
        self.fields.push(TemplateField {
            name: name.to_string(),
            kind: FieldKind::ScalarList,
        });
        self
    }

    /// Declares a one-level nested object field with the given sub-fields.
    pub fn object(mut self, name: &str, fields: &[&str]) -> Self {
        self.fields.push(TemplateField {
            name: name.to_string(),
            kind: FieldKind::Object {
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
        });
        self
    }

    /// Declares a list-of-objects field with the given sub-fields.
    pub fn object_list(mut self, name: &str, fields: &[&str]) -> Self {
        self.fields.push(TemplateField {
            name: name.to_string(),
            kind: FieldKind::ObjectList {
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
        });
        self
    }

    /// Validates the declared fields and returns the immutable template.
    pub fn build(self) -> Result<Template, ExportError> {
        Template::validate(self.type_name, self.fields)
    }
}
