//! The binary array-dataset decoding collaborator.

use crate::grid::dataset::GridSlab;

/// Decodes one raw NetCDF payload into a [`GridSlab`].
///
/// NetCDF decoding is not part of this crate; gridded queries require the
/// caller to inject an implementation via
/// [`Daymet::with_grid_decoder`](crate::Daymet::with_grid_decoder). The
/// decoder receives exactly
/// the bytes the archive returned for one (variable, window) request and
/// must produce the variable's values together with the y/x axes and the
/// derived lat/lon coordinate arrays the request asked for.
pub trait GridDecoder: Send + Sync {
    /// Decodes a single payload.
    fn decode(
        &self,
        payload: &[u8],
    ) -> Result<GridSlab, Box<dyn std::error::Error + Send + Sync>>;
}
