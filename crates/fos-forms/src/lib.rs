//! fOS Forms
//!
//! Field validation for Brazilian contact forms: required fields, e-mail,
//! phone (`(00) 00000-0000`), CEP (`00000-000`) and the CPF checksum.
//!
//! Validators never keep references to fields; every call re-reads the
//! document, so they keep working after the page content is swapped.

pub mod rules;
mod field;
mod form;

pub use field::{
    clear_field_error, show_field_error, validate_field, FieldKind, ValidationMessage,
    ERROR_CLASS, ERROR_MESSAGE_CLASS,
};
pub use form::{clear_form_errors, live_fields, validate_form, FormReport, Violation, LIVE_FIELD_SELECTORS};
pub use rules::FieldState;
