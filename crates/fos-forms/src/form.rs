//! Form Validator
//!
//! Whole-form validation on submit. Every check runs, so the user sees
//! all problems at once.

use crate::field::{self, ERROR_CLASS, ERROR_MESSAGE_CLASS, FieldKind, ValidationMessage};
use crate::rules;
use fos_dom::{Document, DomResult, ElementMatcher, NodeId, Selector, SelectorList};

/// Controls that get live blur/input handlers
pub const LIVE_FIELD_SELECTORS: &str =
    r#"input[required], input[type="email"], input[name="telefone"], input[name="cpf"], input[name="cep"]"#;

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: NodeId,
    pub message: ValidationMessage,
}

/// Outcome of validating a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    violations: Vec<Violation>,
}

impl FormReport {
    /// True when no check failed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Failed checks in evaluation order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Fields that failed, without repeats
    pub fn invalid_fields(&self) -> Vec<NodeId> {
        let mut fields: Vec<NodeId> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field) {
                fields.push(v.field);
            }
        }
        fields
    }
}

/// Validate every required control plus the first field of each shaped
/// kind, annotating each failure. Earlier annotations in the form are
/// cleared first.
pub fn validate_form(doc: &mut Document, form: NodeId) -> DomResult<FormReport> {
    clear_form_errors(doc, form)?;
    let mut report = FormReport::default();

    let required = doc.query_selector_all(form, &Selector::any().with_attr("required"));
    for field in required {
        let state = field::field_state(&doc.tree, field);
        if !rules::validate_required(Some(&state)) {
            report.violations.push(Violation { field, message: ValidationMessage::Required });
        }
    }

    for kind in [FieldKind::Email, FieldKind::Phone, FieldKind::PostalCode, FieldKind::TaxId] {
        let Some(field) = kind.form_selector().and_then(|selector| doc.query_selector(form, &selector)) else {
            continue;
        };
        let value = doc.tree.control_value(field);
        let value = value.trim();
        if value.is_empty() || kind.accepts(value) {
            continue;
        }
        if let Some(message) = kind.message() {
            report.violations.push(Violation { field, message });
        }
    }

    for violation in &report.violations {
        field::show_field_error(doc, violation.field, violation.message.text())?;
    }
    tracing::debug!("Form {} validated: {} violation(s)", form, report.violations.len());
    Ok(report)
}

/// Remove every annotation inside the form
pub fn clear_form_errors(doc: &mut Document, form: NodeId) -> DomResult<()> {
    for flagged in doc.query_selector_all(form, &Selector::class(ERROR_CLASS)) {
        doc.tree.expect_element_mut(flagged)?.remove_class(&[ERROR_CLASS]);
    }
    for message in doc.query_selector_all(form, &Selector::class(ERROR_MESSAGE_CLASS)) {
        doc.tree.detach(message)?;
    }
    Ok(())
}

/// Controls in the form that get live handlers, in document order
pub fn live_fields(doc: &Document, form: NodeId) -> DomResult<Vec<NodeId>> {
    let selectors = SelectorList::parse(LIVE_FIELD_SELECTORS)?;
    Ok(doc
        .tree
        .descendants(form)
        .filter(|&d| doc.tree.element(d).is_some_and(|e| selectors.matches(e)))
        .collect())
}
