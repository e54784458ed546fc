//! In-memory product form: fields, rules and state.

pub mod field;
pub mod input;
pub mod state;
pub mod validation;

pub use field::{Field, FieldControl, FieldKind, FieldValue};
pub use input::{apply_field_inputs, read_field_inputs, FieldInputs};
pub use state::FormState;
pub use validation::{validate_field, FieldError, Rule, ValidationErrors};
