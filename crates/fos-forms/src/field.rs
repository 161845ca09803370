//! Field Validator
//!
//! Validates one control and keeps its inline error annotation in sync:
//! the `input-error` class on the control plus a
//! `<small class="field-error-message">` right after it.

use crate::rules::{self, FieldState};
use fos_dom::{Document, DomResult, DomTree, NodeId, Selector};
use std::fmt;

/// Class added to a control that failed validation
pub const ERROR_CLASS: &str = "input-error";
/// Class of the message element inserted after a failing control
pub const ERROR_MESSAGE_CLASS: &str = "field-error-message";

/// Which shape rule applies to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Email,
    Phone,
    PostalCode,
    TaxId,
    Plain,
}

impl FieldKind {
    /// Resolve the kind of a control. `type="email"` wins; otherwise the
    /// `name` attribute (falling back to `id`) selects the rule.
    pub fn resolve(tree: &DomTree, field: NodeId) -> Self {
        if tree.control_type(field) == "email" {
            return Self::Email;
        }
        let Some(elem) = tree.element(field) else {
            return Self::Plain;
        };
        let name = elem.get_attr("name").filter(|n| !n.is_empty()).or_else(|| elem.id());
        match name {
            Some("telefone") => Self::Phone,
            Some("cep") => Self::PostalCode,
            Some("cpf") => Self::TaxId,
            _ => Self::Plain,
        }
    }

    /// Selector for the input a form submission checks for this kind.
    /// Matches on `type` or `name` only, like the live-field selectors.
    pub fn form_selector(self) -> Option<Selector> {
        let input = Selector::tag("input");
        match self {
            Self::Email => Some(input.with_attr_eq("type", "email")),
            Self::Phone => Some(input.with_attr_eq("name", "telefone")),
            Self::PostalCode => Some(input.with_attr_eq("name", "cep")),
            Self::TaxId => Some(input.with_attr_eq("name", "cpf")),
            Self::Plain => None,
        }
    }

    /// Shape check for a non-empty trimmed value
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Email => rules::validate_email(value),
            Self::Phone => rules::validate_phone(value),
            Self::PostalCode => rules::validate_postal_code(value),
            Self::TaxId => rules::validate_tax_id(value),
            Self::Plain => true,
        }
    }

    /// Message shown when the shape check fails
    pub fn message(self) -> Option<ValidationMessage> {
        match self {
            Self::Email => Some(ValidationMessage::InvalidEmail),
            Self::Phone => Some(ValidationMessage::InvalidPhone),
            Self::PostalCode => Some(ValidationMessage::InvalidPostalCode),
            Self::TaxId => Some(ValidationMessage::InvalidTaxId),
            Self::Plain => None,
        }
    }
}

/// Fixed, rule-specific error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMessage {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidPostalCode,
    InvalidTaxId,
}

impl ValidationMessage {
    pub fn text(self) -> &'static str {
        match self {
            Self::Required => "Campo obrigatório",
            Self::InvalidEmail => "Email inválido",
            Self::InvalidPhone => "Telefone no formato (00) 00000-0000",
            Self::InvalidPostalCode => "CEP no formato 00000-000",
            Self::InvalidTaxId => "CPF inválido",
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Snapshot of a control for the required rule
pub(crate) fn field_state(tree: &DomTree, field: NodeId) -> FieldState {
    if tree.is_checkable(field) {
        FieldState::checkable(tree.is_checked(field))
    } else {
        FieldState::value(tree.control_value(field))
    }
}

/// First failing rule for a control, if any
pub(crate) fn first_violation(tree: &DomTree, field: NodeId) -> Option<ValidationMessage> {
    let required = tree.element(field).is_some_and(|e| e.has_attr("required"));
    if required && !rules::validate_required(Some(&field_state(tree, field))) {
        return Some(ValidationMessage::Required);
    }

    let value = tree.control_value(field);
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let kind = FieldKind::resolve(tree, field);
    if kind.accepts(value) { None } else { kind.message() }
}

/// Validate one field and update its annotation. `None` is a no-op success.
pub fn validate_field(doc: &mut Document, field: Option<NodeId>) -> bool {
    let Some(field) = field else {
        return true;
    };
    if let Err(e) = clear_field_error(doc, field) {
        tracing::warn!("Cannot validate {}: {}", field, e);
        return true;
    }

    match first_violation(&doc.tree, field) {
        None => true,
        Some(message) => {
            tracing::debug!("Field {} invalid: {}", field, message);
            if let Err(e) = show_field_error(doc, field, message.text()) {
                tracing::warn!("Cannot annotate {}: {}", field, e);
            }
            false
        }
    }
}

/// Annotate a field, replacing any previous annotation. A detached field
/// only gets the error class.
pub fn show_field_error(doc: &mut Document, field: NodeId, message: &str) -> DomResult<()> {
    clear_field_error(doc, field)?;
    doc.tree.expect_element_mut(field)?.add_class(&[ERROR_CLASS]);

    if doc.tree.parent(field).is_none() {
        return Ok(());
    }
    let small = doc.tree.create_element_with_attrs("small", &[("class", ERROR_MESSAGE_CLASS)]);
    doc.tree.set_text_content(small, message)?;
    doc.tree.insert_after(field, small)?;
    Ok(())
}

/// Remove a field's annotation: the error class, and the message element
/// if it is the next element sibling
pub fn clear_field_error(doc: &mut Document, field: NodeId) -> DomResult<()> {
    doc.tree.expect_element_mut(field)?.remove_class(&[ERROR_CLASS]);

    let next = doc.tree.next_element_sibling(field);
    if let Some(next) = next.filter(|&n| doc.tree.element(n).is_some_and(|e| e.has_class(ERROR_MESSAGE_CLASS))) {
        doc.tree.detach(next)?;
    }
    Ok(())
}
