//! Validated JSON extraction for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Malformed JSON and failed validation are both reported as 400 with a
/// single `{"error": "..."}` message.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        value
            .validate()
            .map_err(|errors| ApiError::bad_request(first_message(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Pick one message out of a set of field errors.
///
/// Fields are visited in name order so the result is stable.
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(name, _)| name.to_string());

    fields
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
        .map(|(field, e)| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field))
        })
        .next()
        .unwrap_or_else(|| "Validation failed".to_string())
}
