//! The three spatial regions served by the Daymet archive and the logic for
//! classifying a query geometry into one of them.

use crate::request::error::RequestError;
use geo::{coord, Contains, Geometry, Intersects, Point, Rect};
use std::fmt;

/// A Daymet service region.
///
/// Every query is served from exactly one region; the three regions have
/// fixed geographic bounding boxes. When no region is supplied by the caller
/// it is resolved by testing the boxes in the fixed order `na`, `hi`, `pr`
/// and taking the first match.
///
/// # Examples
///
/// ```
/// use daymet::Region;
///
/// // Bangor, Maine falls in the continental North America box.
/// assert_eq!(Region::for_point(-68.77, 44.8).unwrap(), Region::Na);
/// // Honolulu is covered by the Hawaii box only.
/// assert_eq!(Region::for_point(-157.85, 21.3).unwrap(), Region::Hi);
/// // The middle of the Pacific is outside every region.
/// assert!(Region::for_point(-170.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Continental North America.
    Na,
    /// Hawaii.
    Hi,
    /// Puerto Rico.
    Pr,
}

impl Region {
    /// The fixed priority order used when resolving a geometry to a region.
    pub const RESOLUTION_ORDER: [Region; 3] = [Region::Na, Region::Hi, Region::Pr];

    /// The region code used in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Hi => "hi",
            Region::Pr => "pr",
        }
    }

    /// The fixed geographic bounding box of this region (lon/lat, EPSG:4326).
    pub fn bbox(self) -> Rect<f64> {
        match self {
            Region::Na => Rect::new(
                coord! { x: -136.8989, y: 6.0761 },
                coord! { x: -6.1376, y: 69.077 },
            ),
            Region::Hi => Rect::new(
                coord! { x: -160.3055, y: 17.9539 },
                coord! { x: -154.7715, y: 23.5186 },
            ),
            Region::Pr => Rect::new(
                coord! { x: -67.9927, y: 16.8443 },
                coord! { x: -64.1195, y: 19.9381 },
            ),
        }
    }

    /// Resolves the region containing a point, in `na`, `hi`, `pr` order.
    pub fn for_point(lon: f64, lat: f64) -> Result<Region, RequestError> {
        Region::RESOLUTION_ORDER
            .into_iter()
            .find(|r| r.bbox().contains(&Point::new(lon, lat)))
            .ok_or(RequestError::PointOutOfDomain { lon, lat })
    }

    /// Resolves the region for a polygon or bounding-box geometry.
    ///
    /// Polygons must be contained in the region box; a bounding box only has
    /// to intersect it. Regions are tested in `na`, `hi`, `pr` order.
    pub fn for_geometry(geometry: &Geometry<f64>) -> Result<Region, RequestError> {
        Region::RESOLUTION_ORDER
            .into_iter()
            .find(|r| r.admits(geometry))
            .ok_or(RequestError::GeometryOutOfDomain)
    }

    /// Checks that a point falls inside this specific region.
    pub(crate) fn check_point(self, lon: f64, lat: f64) -> Result<(), RequestError> {
        if self.bbox().contains(&Point::new(lon, lat)) {
            Ok(())
        } else {
            Err(RequestError::PointOutsideRegion {
                region: self,
                lon,
                lat,
            })
        }
    }

    /// Checks that a geometry overlaps this specific region.
    pub(crate) fn check_geometry(self, geometry: &Geometry<f64>) -> Result<(), RequestError> {
        if self.admits(geometry) {
            Ok(())
        } else {
            Err(RequestError::GeometryOutsideRegion { region: self })
        }
    }

    fn admits(self, geometry: &Geometry<f64>) -> bool {
        let bounds = self.bbox().to_polygon();
        match geometry {
            Geometry::Rect(rect) => bounds.intersects(rect),
            Geometry::Polygon(poly) => bounds.contains(poly),
            Geometry::MultiPolygon(mp) => bounds.contains(mp),
            other => bounds.intersects(other),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn points_resolve_to_their_region() {
        assert_eq!(Region::for_point(-100.0, 45.0).unwrap(), Region::Na);
        assert_eq!(Region::for_point(-157.85, 21.3).unwrap(), Region::Hi);
        // The pr box lies inside the na box, so the fixed order assigns
        // Puerto Rico points to na when the region is auto-resolved.
        assert_eq!(Region::for_point(-66.5, 18.2).unwrap(), Region::Na);
    }

    #[test]
    fn out_of_domain_point_fails() {
        let err = Region::for_point(-170.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("-170"));
    }

    #[test]
    fn explicit_region_is_validated() {
        assert!(Region::Pr.check_point(-66.5, 18.2).is_ok());
        assert!(Region::Hi.check_point(-66.5, 18.2).is_err());
    }

    #[test]
    fn polygon_resolution_uses_containment() {
        let maine = polygon![
            (x: -69.77, y: 45.07),
            (x: -69.31, y: 45.07),
            (x: -69.31, y: 45.45),
            (x: -69.77, y: 45.45),
            (x: -69.77, y: 45.07),
        ];
        let region = Region::for_geometry(&Geometry::Polygon(maine)).unwrap();
        assert_eq!(region, Region::Na);
    }

    #[test]
    fn bbox_resolution_uses_intersection() {
        // Straddles the western edge of the na box; intersection is enough.
        let rect = Rect::new(coord! { x: -140.0, y: 40.0 }, coord! { x: -130.0, y: 45.0 });
        let region = Region::for_geometry(&Geometry::Rect(rect)).unwrap();
        assert_eq!(region, Region::Na);
    }

    #[test]
    fn geometry_outside_every_region_fails() {
        let rect = Rect::new(coord! { x: 10.0, y: 40.0 }, coord! { x: 20.0, y: 50.0 });
        assert!(Region::for_geometry(&Geometry::Rect(rect)).is_err());
    }
}
