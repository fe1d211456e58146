//! Per-structure tag compliance.
//!
//! Every exported field must declare, under each configured tag key, the
//! name derived from its identifier by the naming convention. Nested and
//! embedded structures are leaves here; they are checked through their own
//! registry entries.

use wiretag_core::config::WiretagConfig;
use wiretag_core::naming::NamingRules;
use wiretag_core::policy::ExceptionPolicy;
use wiretag_core::tag;
use wiretag_core::types::{Describe, FieldDescriptor, TypeDescriptor, TypeShape};

use crate::error::EnforceError;
use crate::types::{ComplianceReport, Violation, ViolationClass, CODE_MISMATCH, CODE_MISSING};

/// Check one value with the default tag key (`json`) and naming rules.
/// `None` is the fully strict policy.
pub fn check<T: Describe + ?Sized>(
    value: &T,
    policy: Option<&ExceptionPolicy>,
) -> Result<ComplianceReport, EnforceError> {
    ComplianceChecker::default().check(value, policy)
}

#[derive(Debug, Clone)]
pub struct ComplianceChecker {
    tag_keys: Vec<String>,
    rules: NamingRules,
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new(vec!["json".to_string()], NamingRules::default())
    }
}

impl ComplianceChecker {
    pub fn new(tag_keys: Vec<String>, rules: NamingRules) -> Self {
        Self { tag_keys, rules }
    }

    pub fn from_config(config: &WiretagConfig) -> Self {
        Self::new(config.tag_keys.clone(), config.naming_rules())
    }

    pub fn tag_keys(&self) -> &[String] {
        &self.tag_keys
    }

    pub fn rules(&self) -> &NamingRules {
        &self.rules
    }

    pub fn check<T: Describe + ?Sized>(
        &self,
        value: &T,
        policy: Option<&ExceptionPolicy>,
    ) -> Result<ComplianceReport, EnforceError> {
        self.check_descriptor(&value.describe(), policy)
    }

    pub fn check_descriptor(
        &self,
        descriptor: &TypeDescriptor,
        policy: Option<&ExceptionPolicy>,
    ) -> Result<ComplianceReport, EnforceError> {
        let strict = ExceptionPolicy::strict();
        let policy = policy.unwrap_or(&strict);
        if policy.disabled {
            tracing::debug!("{}: checking disabled by policy", descriptor.name);
            return Ok(ComplianceReport::disabled(&descriptor.name, descriptor.location.clone()));
        }
        let mut report = ComplianceReport::empty(&descriptor.name, descriptor.location.clone());

        let structure = match &descriptor.shape {
            TypeShape::Struct(s) => s,
            TypeShape::Other { kind } => {
                return Err(EnforceError::NotAStruct {
                    type_name: descriptor.name.clone(),
                    kind: kind.clone(),
                })
            }
        };

        let file = descriptor
            .location
            .as_ref()
            .map(|l| l.file.to_string_lossy().into_owned());

        for field in structure.exported_fields() {
            let expected = self.rules.expected_tag(&field.identifier);
            let mut missing = false;

            for key in &self.tag_keys {
                let declared = field.declared_tag(key);
                let violation = match declared {
                    Some(value) if value.is_excluded() => continue,
                    Some(value) if !value.name.is_empty() => {
                        if value.name == expected {
                            continue;
                        }
                        if policy.disable_mismatch || policy.permits_mismatch(&field.identifier, &value.name) {
                            tracing::debug!(
                                "{}: mismatch on {} allowed by policy",
                                descriptor.name,
                                field.identifier
                            );
                            continue;
                        }
                        self.mismatch(&descriptor.name, field, key, value.name, &expected)
                    }
                    _ => {
                        if policy.disable_missing_on_empty {
                            continue;
                        }
                        missing = true;
                        self.missing(&descriptor.name, field, key, &expected)
                    }
                };
                report.violations.push(Violation {
                    file: file.clone(),
                    line: field.line,
                    ..violation
                });
            }

            if missing {
                report.suggestions.push(self.suggestion(field, &expected));
            }
        }

        tracing::debug!(
            "{}: {} violation(s)",
            descriptor.name,
            report.violations.len()
        );
        Ok(report)
    }

    /// `tag` for a single configured key, `yaml tag` once several are.
    fn label(&self, key: &str) -> String {
        if self.tag_keys.len() > 1 {
            format!("{key} tag")
        } else {
            "tag".to_string()
        }
    }

    fn missing(&self, type_name: &str, field: &FieldDescriptor, key: &str, expected: &str) -> Violation {
        Violation {
            code: CODE_MISSING.to_string(),
            class: ViolationClass::Missing,
            type_name: type_name.to_string(),
            field: field.identifier.clone(),
            tag_key: key.to_string(),
            declared: None,
            expected: expected.to_string(),
            message: format!(
                "missing {} for field `{}`, expected `{}`",
                self.label(key),
                field.identifier,
                expected
            ),
            file: None,
            line: None,
        }
    }

    fn mismatch(
        &self,
        type_name: &str,
        field: &FieldDescriptor,
        key: &str,
        declared: String,
        expected: &str,
    ) -> Violation {
        Violation {
            code: CODE_MISMATCH.to_string(),
            class: ViolationClass::Mismatch,
            type_name: type_name.to_string(),
            field: field.identifier.clone(),
            tag_key: key.to_string(),
            message: format!(
                "{} mismatch for field `{}`: declared `{}`, expected `{}`",
                self.label(key),
                field.identifier,
                declared,
                expected
            ),
            declared: Some(declared),
            expected: expected.to_string(),
            file: None,
            line: None,
        }
    }

    fn suggestion(&self, field: &FieldDescriptor, expected: &str) -> String {
        let tag = tag::render(&self.tag_keys, expected);
        if field.embedded {
            format!("{} {}", field.type_text, tag)
        } else {
            format!("{} {} {}", field.identifier, field.type_text, tag)
        }
    }
}

#[cfg(test)]
#[path = "compliance_tests.rs"]
mod tests;
