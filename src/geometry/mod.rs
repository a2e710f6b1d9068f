mod error;
pub mod frame;
pub mod geodetic;
pub mod intersect;
pub mod pointing;
pub mod wgs84;

pub use error::{GeometryError, NoIntersection};
pub use frame::{gmst_deg, rotate_to_earth_fixed};
pub use geodetic::{from_geodetic, to_geodetic, GeodeticPoint};
pub use intersect::{intersect, intersect_with};
pub use pointing::{boresight_direction, OrbitalFrame};
