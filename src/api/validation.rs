//! Schema validation at the request boundary.
//!
//! `ValidatedJson<T>` deserializes the body and runs the `validator`
//! constraints before the handler sees it, so every structurally invalid
//! request produces the same unified outcome: a 400 carrying the ordered
//! list of field violations.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::Error;

pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::validation("body", rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
