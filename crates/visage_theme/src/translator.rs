//! Customization translation
//!
//! Walks a [`ConfigurationDocument`] against a [`CustomizationSchema`] and
//! writes every coercible value into a [`NativeTheme`]. Translation is total:
//! unknown groups and fields, uncoercible values and unsupported types are
//! logged and skipped, leaving the prior value in place.

use crate::coerce::{apply, coerce};
use crate::document::{json_kind, ConfigurationDocument};
use crate::error::CoercionError;
use crate::schema::{CustomizationSchema, FieldSpec};
use crate::theme::NativeTheme;
use serde_json::Value;
use tracing::{debug, trace};

/// Counts of what happened to each document entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslationReport {
    /// Values written into the theme
    pub applied: usize,
    /// Values rejected by coercion, and groups that were not objects
    pub skipped: usize,
    /// Values of a type with no native counterpart
    pub unsupported: usize,
    /// Groups or fields the schema does not declare
    pub unknown: usize,
}

/// Translator bound to one schema
#[derive(Clone, Copy, Debug)]
pub struct Translator<'s> {
    schema: &'s CustomizationSchema,
}

impl Translator<'static> {
    /// Translator over the process-wide schema
    pub fn standard() -> Self {
        Self::new(CustomizationSchema::standard())
    }
}

impl<'s> Translator<'s> {
    pub fn new(schema: &'s CustomizationSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s CustomizationSchema {
        self.schema
    }

    /// Translate onto the all-defaults theme
    pub fn translate(&self, doc: &ConfigurationDocument) -> NativeTheme {
        self.translate_onto(NativeTheme::default(), doc)
    }

    /// Apply a document over an existing theme
    pub fn translate_onto(&self, base: NativeTheme, doc: &ConfigurationDocument) -> NativeTheme {
        self.translate_with_report(base, doc).0
    }

    /// Apply a document and report what was applied, skipped or ignored
    pub fn translate_with_report(
        &self,
        mut theme: NativeTheme,
        doc: &ConfigurationDocument,
    ) -> (NativeTheme, TranslationReport) {
        let mut report = TranslationReport::default();

        for (group, properties) in doc.groups() {
            if !self.schema.has_group(group) {
                trace!(group, "ignoring unknown customization group");
                report.unknown += 1;
                continue;
            }

            let Value::Object(fields) = properties else {
                debug!(group, found = json_kind(properties), "customization group is not an object");
                report.skipped += 1;
                continue;
            };

            for (field, raw) in fields {
                let Some(spec) = self.schema.lookup(group, field) else {
                    trace!(group, field = field.as_str(), "ignoring unknown customization field");
                    report.unknown += 1;
                    continue;
                };

                match write_field(&mut theme, spec, raw) {
                    Ok(()) => report.applied += 1,
                    Err(CoercionError::Unsupported(kind)) => {
                        debug!(group, field = spec.field, ?kind, "customization type not supported");
                        report.unsupported += 1;
                    }
                    Err(err) => {
                        debug!(group, field = spec.field, error = %err, "skipping customization field");
                        report.skipped += 1;
                    }
                }
            }
        }

        debug!(?report, "customization translated");
        (theme, report)
    }
}

fn write_field(theme: &mut NativeTheme, spec: &FieldSpec, raw: &Value) -> Result<(), CoercionError> {
    let value = coerce(spec.kind, raw)?;
    match spec.write {
        Some(write) => apply(write(theme), value),
        None => Err(CoercionError::Unsupported(spec.kind)),
    }
}

/// Translate a document onto the all-defaults theme
pub fn translate(doc: &ConfigurationDocument, schema: &CustomizationSchema) -> NativeTheme {
    Translator::new(schema).translate(doc)
}

/// Translate a document onto `base`
pub fn translate_onto(
    base: NativeTheme,
    doc: &ConfigurationDocument,
    schema: &CustomizationSchema,
) -> NativeTheme {
    Translator::new(schema).translate_onto(base, doc)
}
