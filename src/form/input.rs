//! Field inputs supplied as a JSON object keyed by form field name.

use std::collections::BTreeMap;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{AppError, AppResult};

use super::field::{Field, FieldValue};
use super::state::FormState;

pub type FieldInputs = BTreeMap<Field, Value>;

/// Reads a JSON object of field inputs. Empty input means no changes.
pub async fn read_field_inputs<R>(mut reader: R) -> AppResult<FieldInputs>
where
    R: AsyncRead + Unpin,
{
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .await
        .map_err(|e| AppError::invalid_input(format!("failed to read field inputs: {e}")))?;
    if raw.trim().is_empty() {
        return Ok(FieldInputs::new());
    }
    serde_json::from_str(&raw).map_err(|e| AppError::invalid_input(e.to_string()))
}

/// Stores each input in the form and marks the field touched.
pub fn apply_field_inputs(form: &mut FormState, inputs: FieldInputs) -> AppResult<()> {
    for (field, raw) in inputs {
        let value = FieldValue::from_json(field.kind(), &raw)?;
        form.set(field, value)?;
        form.touch(field);
    }
    Ok(())
}
