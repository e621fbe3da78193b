//! Async client for the ORNL Daymet archive: daily, monthly, and annual
//! gridded North American climate data at 1 km resolution.
//!
//! Single-pixel queries ([`Daymet::get_bycoords`]) come back as a Polars
//! `DataFrame`; gridded queries ([`Daymet::get_bygeom`]) come back as a
//! [`GridDataset`] clipped to the query geometry. Both can derive FAO-56
//! potential evapotranspiration on the fly via [`PetModel`].

mod daymet;
mod error;
mod grid;
mod pet;
mod request;
mod retrieval;
mod types;

pub use daymet::{Daymet, LonLat};
pub use error::DaymetError;

pub use types::pet_model::{PenmanMonteithParams, PetModel, PriestleyTaylorParams};
pub use types::region::Region;
pub use types::time_scale::TimeScale;
pub use types::variable::Variable;

pub use request::dates::{Dates, DateWindow, COVERAGE_START_YEAR};
pub use request::error::RequestError;
pub use request::plan::{RequestDescriptor, SERVICE_ROOT};

pub use retrieval::decoder::GridDecoder;
pub use retrieval::error::RetrievalError;
pub use retrieval::transport::{HttpTransport, Transport};

pub use grid::dataset::{GridDataset, GridSlab, GridVariable, DAYMET_CRS, NODATA};

pub use pet::error::PetError;
