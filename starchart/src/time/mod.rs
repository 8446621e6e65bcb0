//! Time handling: local wall-clock parsing, astronomical time scales and
//! sidereal time.

pub mod normalize;
pub mod scales;
pub mod sidereal;

pub use normalize::{ObservationTime, DATE_TIME_FORMAT};
pub use scales::{tai_minus_utc, tdb_minus_tt, AstroTime, TT_MINUS_TAI};
pub use sidereal::{earth_rotation_angle, greenwich_mean_sidereal_time};
