pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::CalculatorConfig;
pub use crate::core::calculator::{calculate, SavingsCalculator};
pub use domain::model::{
    AddressComponents, CalculationResult, Contact, GeoPoint, Institute, LeadReport, NearestInstituteResult,
    ResolvedAddress, StaffingProfile,
};
pub use utils::error::{CalcError, Result};
