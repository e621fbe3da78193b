//! The main entry point for querying the Daymet archive: single-pixel
//! time series via [`Daymet::get_bycoords`] and gridded subsets via
//! [`Daymet::get_bygeom`].

use crate::error::DaymetError;
use crate::grid::dataset::GridDataset;
use crate::grid::{mask, merge};
use crate::pet;
use crate::request::dates::{DateWindow, Dates};
use crate::request::error::RequestError;
use crate::request::plan::{grid_plan, point_plan};
use crate::retrieval::decoder::GridDecoder;
use crate::retrieval::error::RetrievalError;
use crate::retrieval::transport::{HttpTransport, Transport};
use crate::retrieval::{fetch_all, point};
use crate::types::pet_model::PetModel;
use crate::types::region::Region;
use crate::types::time_scale::TimeScale;
use crate::types::variable::Variable;
use bon::bon;
use geo::{BoundingRect, Geometry, Rect};
use log::info;
use polars::prelude::DataFrame;
use std::sync::Arc;

/// A geographical coordinate as (longitude, latitude), the order the
/// archive expects.
///
/// # Examples
///
/// ```
/// use daymet::LonLat;
///
/// let bangor_maine = LonLat(-68.77, 44.80);
/// assert_eq!(bangor_maine.0, -68.77); // Longitude
/// assert_eq!(bangor_maine.1, 44.80); // Latitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat(pub f64, pub f64);

/// Client for the Daymet archive.
///
/// The client is stateless between calls: every query independently
/// resolves its region, decomposes its date span, fans requests out through
/// a bounded worker pool, and assembles one coherent dataset. Nothing is
/// cached or shared across calls.
///
/// [`Daymet::new`] gives the default configuration (HTTP transport, eight
/// concurrent fetches). Gridded queries additionally need a NetCDF decoder,
/// injected with [`Daymet::with_grid_decoder`].
///
/// # Examples
///
/// ```no_run
/// use daymet::{Daymet, LonLat, PetModel};
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), daymet::DaymetError> {
/// let client = Daymet::new();
/// let clm = client
///     .get_bycoords()
///     .coords(LonLat(-69.77, 45.07))
///     .dates((
///         NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
///     ))
///     .pet(PetModel::HargreavesSamani)
///     .call()
///     .await?;
/// println!("{clm}");
/// # Ok(())
/// # }
/// ```
pub struct Daymet {
    transport: Arc<dyn Transport>,
    grid_decoder: Option<Arc<dyn GridDecoder>>,
    max_workers: usize,
    coord_epsilon: f64,
}

impl Default for Daymet {
    fn default() -> Self {
        Self::new()
    }
}

impl Daymet {
    /// Creates a client with the default [`HttpTransport`] and a worker
    /// pool of eight concurrent fetches.
    pub fn new() -> Self {
        Self {
            transport: Arc::new(HttpTransport::new()),
            grid_decoder: None,
            max_workers: 8,
            coord_epsilon: 1e-6,
        }
    }

    /// Replaces the transport collaborator, e.g. for custom retry or TLS
    /// behavior, or a recorded transport in tests.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Injects the NetCDF decoding collaborator required by
    /// [`Daymet::get_bygeom`].
    pub fn with_grid_decoder(mut self, decoder: Arc<dyn GridDecoder>) -> Self {
        self.grid_decoder = Some(decoder);
        self
    }

    /// Caps the number of concurrent fetches (default 8).
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Sets the tolerance used when comparing coordinate axes of
    /// independently generated yearly files during the grid merge
    /// (default 1e-6).
    pub fn with_coord_epsilon(mut self, epsilon: f64) -> Self {
        self.coord_epsilon = epsilon;
        self
    }
}

#[bon]
impl Daymet {
    /// Fetches a single-pixel climate time series at 1 km resolution.
    ///
    /// # Arguments
    ///
    /// * `.coords(LonLat)`: **Required.** Query location in EPSG:4326.
    /// * `.dates(impl Into<Dates>)`: **Required.** An inclusive
    ///   `(NaiveDate, NaiveDate)` range or a `Vec<i32>` of years.
    /// * `.variables(Vec<Variable>)`: Optional. Defaults to every variable
    ///   the archive serves. When a PET model is selected its required
    ///   variables are added automatically.
    /// * `.region(Region)`: Optional. Defaults to resolving the coordinates
    ///   against the region boxes in `na`, `hi`, `pr` order.
    /// * `.time_scale(TimeScale)`: Optional. Defaults to
    ///   [`TimeScale::Daily`].
    /// * `.pet(PetModel)`: Optional. Defaults to [`PetModel::None`].
    ///
    /// # Returns
    ///
    /// A `DataFrame` with a `date` column and one `name (unit)` column per
    /// variable, plus `pet (mm/day)` when a PET model is selected.
    ///
    /// # Errors
    ///
    /// [`RequestError`] variants for out-of-domain coordinates or invalid
    /// date spans, [`RetrievalError`] variants when any fetch or the
    /// re-assembly fails (the whole batch is abandoned; no partial frame is
    /// returned), and [`PetError`](crate::PetError) when the assembled
    /// frame lacks a PET input.
    #[builder]
    pub async fn get_bycoords(
        &self,
        coords: LonLat,
        #[builder(into)] dates: Dates,
        variables: Option<Vec<Variable>>,
        region: Option<Region>,
        time_scale: Option<TimeScale>,
        pet: Option<PetModel>,
    ) -> Result<DataFrame, DaymetError> {
        let time_scale = time_scale.unwrap_or_default();
        let pet = pet.unwrap_or_default();
        let variables = resolve_variables(variables, &pet)?;
        let LonLat(lon, lat) = coords;

        let region = match region {
            Some(region) => {
                region.check_point(lon, lat)?;
                region
            }
            None => Region::for_point(lon, lat)?,
        };
        let windows = plan_windows(&dates)?;

        let plan = point_plan(time_scale, region, &variables, &windows, lon, lat);
        info!(
            "Dispatching {} point requests ({} variables x {} windows) for region {}",
            plan.len(),
            variables.len(),
            windows.len(),
            region
        );
        let payloads = fetch_all(self.transport.as_ref(), &plan, self.max_workers).await?;
        let clm = point::assemble_point(&variables, windows.len(), payloads)?;
        let clm = pet::point::potential_et(clm, lat, &pet)?;
        Ok(clm)
    }

    /// Fetches gridded climate data at 1 km resolution for a geometry.
    ///
    /// The merged dataset is clipped to the exact input geometry: cells
    /// inside its bounding box but outside the geometry itself are set to
    /// the nodata sentinel.
    ///
    /// # Arguments
    ///
    /// * `.geometry(Geometry<f64>)`: **Required.** A `Polygon`,
    ///   `MultiPolygon`, or `Rect` in EPSG:4326.
    /// * `.dates(impl Into<Dates>)`: **Required.** As for
    ///   [`Daymet::get_bycoords`].
    /// * `.variables` / `.region` / `.time_scale` / `.pet`: Optional, as
    ///   for [`Daymet::get_bycoords`].
    ///
    /// # Returns
    ///
    /// A [`GridDataset`] with one variable per request in plan order, a
    /// continuous time axis, and canonical projection/transform/nodata
    /// metadata attached at dataset level and on every variable.
    ///
    /// # Errors
    ///
    /// [`DaymetError::GridDecoderMissing`] when no decoder was injected;
    /// otherwise as for [`Daymet::get_bycoords`], with merge failures
    /// surfacing as [`RetrievalError::GridMerge`].
    #[builder]
    pub async fn get_bygeom(
        &self,
        geometry: Geometry<f64>,
        #[builder(into)] dates: Dates,
        variables: Option<Vec<Variable>>,
        region: Option<Region>,
        time_scale: Option<TimeScale>,
        pet: Option<PetModel>,
    ) -> Result<GridDataset, DaymetError> {
        let decoder = self
            .grid_decoder
            .clone()
            .ok_or(DaymetError::GridDecoderMissing)?;
        let time_scale = time_scale.unwrap_or_default();
        let pet = pet.unwrap_or_default();
        let variables = resolve_variables(variables, &pet)?;

        let bounds = geometry_bounds(&geometry)?;
        let region = match region {
            Some(region) => {
                region.check_geometry(&geometry)?;
                region
            }
            None => Region::for_geometry(&geometry)?,
        };
        let windows = plan_windows(&dates)?;

        let plan = grid_plan(time_scale, region, &variables, &windows, bounds);
        info!(
            "Dispatching {} gridded requests ({} variables x {} windows) for region {}",
            plan.len(),
            variables.len(),
            windows.len(),
            region
        );
        let payloads = fetch_all(self.transport.as_ref(), &plan, self.max_workers).await?;

        let mut slabs = Vec::with_capacity(plan.len());
        for (descriptor, payload) in plan.iter().zip(&payloads) {
            let slab =
                decoder
                    .decode(payload)
                    .map_err(|source| RetrievalError::GridDecode {
                        variable: descriptor.variable,
                        source,
                    })?;
            slabs.push(slab);
        }

        let mut dataset =
            merge::merge_slabs(&variables, windows.len(), slabs, self.coord_epsilon)?;
        pet::grid::potential_et(&mut dataset, &pet)?;
        mask::mask_dataset(&mut dataset, &geometry);
        Ok(dataset)
    }
}

/// Applies the defaults and the PET supplement to the requested variable
/// set, keeping first-occurrence order. An explicitly empty selection with
/// no PET model to supplement it is rejected.
fn resolve_variables(
    requested: Option<Vec<Variable>>,
    pet: &PetModel,
) -> Result<Vec<Variable>, RequestError> {
    let mut variables: Vec<Variable> = Vec::new();
    for variable in requested.unwrap_or_else(|| Variable::ALL.to_vec()) {
        if !variables.contains(&variable) {
            variables.push(variable);
        }
    }
    for &variable in pet.required_variables() {
        if !variables.contains(&variable) {
            variables.push(variable);
        }
    }
    if variables.is_empty() {
        return Err(RequestError::EmptyVariables);
    }
    Ok(variables)
}

/// Decomposes the span and drops repeated windows, so a year listed twice
/// is fetched once. Decomposition yields windows in ascending order, so
/// repeats are adjacent.
fn plan_windows(dates: &Dates) -> Result<Vec<DateWindow>, RequestError> {
    let mut windows = dates.windows()?;
    windows.dedup();
    Ok(windows)
}

/// Validates the geometry kind and extracts its bounding box.
fn geometry_bounds(geometry: &Geometry<f64>) -> Result<Rect<f64>, RequestError> {
    match geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) => geometry
            .bounding_rect()
            .ok_or(RequestError::UnsupportedGeometry { found: "empty" }),
        other => Err(RequestError::UnsupportedGeometry {
            found: geometry_kind(other),
        }),
    }
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
