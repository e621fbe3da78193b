use crate::pet::error::PetError;
use crate::request::error::RequestError;
use crate::retrieval::error::RetrievalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaymetError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Pet(#[from] PetError),

    #[error(
        "Gridded retrieval needs a NetCDF decoder; configure one with \
         Daymet::new().with_grid_decoder(...)"
    )]
    GridDecoderMissing,
}
