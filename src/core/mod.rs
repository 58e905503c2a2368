pub mod calculator;
pub mod cost_model;
pub mod directory;
pub mod geo;
pub mod resolver;

pub use crate::domain::model::{CalculationResult, GeoPoint, Institute, NearestInstituteResult, StaffingProfile};
pub use crate::domain::ports::{AddressResolver, LeadSink};
pub use crate::utils::error::Result;
