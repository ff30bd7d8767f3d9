//! HTTP handlers, grouped by resource.

pub mod catalog;
pub mod health;
pub mod stock;
pub mod transfer;

use validator::Validate;

use super::types::ApiError;

/// Run `validator` bounds on a request body, flattening failures into one
/// 400 message.
pub(crate) fn check<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errs| {
        let mut reasons: Vec<String> = errs
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let detail = errors
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{field}: {detail}")
            })
            .collect();
        reasons.sort();
        ApiError::bad_request(format!("Validation failed: {}", reasons.join("; ")))
    })
}
