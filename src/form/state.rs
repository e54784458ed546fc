use std::collections::BTreeMap;

use crate::dtos::ProductPayload;
use crate::error::{AppError, AppResult};
use crate::models::ProductRecord;

use super::field::{Field, FieldControl, FieldValue};
use super::validation::{validate_field, FieldError, ValidationErrors};

/// Values and interaction flags of every product field.
///
/// The control map is filled for every [`Field`] on construction and entries
/// are never removed, so lookups by field always succeed.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    controls: BTreeMap<Field, FieldControl>,
    submitted: bool,
}

impl FormState {
    pub fn new() -> Self {
        let controls = Field::ALL
            .into_iter()
            .map(|field| (field, FieldControl::new(field.default_value())))
            .collect();
        Self { controls, submitted: false }
    }

    /// Puts every control back to its default value and clears all flags.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn control(&self, field: Field) -> &FieldControl {
        &self.controls[&field]
    }

    pub fn value(&self, field: Field) -> &FieldValue {
        &self.control(field).value
    }

    /// Stores user input for a field and marks it dirty.
    pub fn set(&mut self, field: Field, value: FieldValue) -> AppResult<()> {
        if value.kind() != field.kind() {
            return Err(AppError::FieldType { field, expected: field.kind() });
        }
        if let Some(control) = self.controls.get_mut(&field) {
            control.value = value;
            control.dirty = true;
        }
        Ok(())
    }

    /// Parses raw text input for a field, then stores it like [`FormState::set`].
    pub fn set_input(&mut self, field: Field, raw: &str) -> AppResult<()> {
        let value = FieldValue::parse(field.kind(), raw)?;
        self.set(field, value)
    }

    /// Marks a field as visited (blurred).
    pub fn touch(&mut self, field: Field) {
        if let Some(control) = self.controls.get_mut(&field) {
            control.touched = true;
        }
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.control(field).touched
    }

    pub fn is_dirty(&self, field: Field) -> bool {
        self.control(field).dirty
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn validate(&self, field: Field) -> Result<(), FieldError> {
        validate_field(field, self.value(field))
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for (field, control) in &self.controls {
            if let Err(error) = validate_field(*field, &control.value) {
                errors.insert(*field, error);
            }
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.validate(field).is_ok())
    }

    /// Error to display for a field: shown once the field has been touched or
    /// a submit has been attempted.
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        if !(self.submitted || self.is_touched(field)) {
            return None;
        }
        self.validate(field).err()
    }

    /// Copies the editable fields of a stored product into the form. Like a
    /// programmatic patch, this leaves touched and dirty flags alone.
    pub fn patch_from_record(&mut self, record: &ProductRecord) {
        let patch = [
            (Field::Name, FieldValue::Text(record.name.clone())),
            (Field::Description, FieldValue::Text(record.description.clone())),
            (Field::Price, FieldValue::Number(Some(record.price))),
            (Field::IsActive, FieldValue::Bool(record.is_active)),
            (Field::ImageUrl, FieldValue::Text(record.image_url.clone())),
            (Field::Quantity, FieldValue::Integer(Some(record.quantity))),
            (Field::CategoryId, FieldValue::Integer(Some(record.category_id))),
        ];
        for (field, value) in patch {
            if let Some(control) = self.controls.get_mut(&field) {
                control.value = value;
            }
        }
    }

    /// Builds the create/update body from the current values, or returns every
    /// failing field.
    pub fn to_payload(&self) -> Result<ProductPayload, ValidationErrors> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProductPayload {
            name: self.text(Field::Name).to_string(),
            description: self.text(Field::Description).to_string(),
            price: self.number(Field::Price).unwrap_or_default(),
            image_url: self.text(Field::ImageUrl).to_string(),
            quantity: self.integer(Field::Quantity).unwrap_or_default(),
            category_id: self.integer(Field::CategoryId).unwrap_or_default(),
            is_active: self.flag(Field::IsActive),
        })
    }

    pub fn text(&self, field: Field) -> &str {
        match self.value(field) {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        match self.value(field) {
            FieldValue::Number(n) => *n,
            _ => None,
        }
    }

    pub fn integer(&self, field: Field) -> Option<i64> {
        match self.value(field) {
            FieldValue::Integer(i) => *i,
            _ => None,
        }
    }

    pub fn flag(&self, field: Field) -> bool {
        matches!(self.value(field), FieldValue::Bool(true))
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
