use crate::types::variable::Variable;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PetError {
    #[error(
        "The {model} PET model is missing required variable '{missing}'. \
         Required variables: {required}"
    )]
    MissingVariable {
        model: &'static str,
        missing: Variable,
        required: String,
    },

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),
}

impl PetError {
    pub(crate) fn missing(
        model: &'static str,
        missing: Variable,
        required: &[Variable],
    ) -> Self {
        PetError::MissingVariable {
            model,
            missing,
            required: required
                .iter()
                .map(|v| v.code())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
