use crate::core::cost_model::CostModel;
use crate::core::directory::InstituteDirectory;
use crate::core::resolver::{NearestInstituteResolver, TravelPolicy};
use crate::domain::model::{CalculationResult, GeoPoint, StaffingProfile};
use crate::utils::error::{CalcError, Result};

/// Entry point of the engine. Holds the catalog and pricing, both read-only,
/// so one instance can serve concurrent requests behind a plain reference.
#[derive(Debug, Clone)]
pub struct SavingsCalculator {
    directory: InstituteDirectory,
    travel: TravelPolicy,
    cost_model: CostModel,
}

impl SavingsCalculator {
    pub fn new(directory: InstituteDirectory, travel: TravelPolicy, cost_model: CostModel) -> Self {
        Self {
            directory,
            travel,
            cost_model,
        }
    }

    pub fn directory(&self) -> &InstituteDirectory {
        &self.directory
    }

    pub fn travel_policy(&self) -> &TravelPolicy {
        &self.travel
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Calculates savings for one practice. A missing `origin` means the
    /// address is not resolved yet and the result carries no travel figures.
    pub fn calculate(&self, profile: &StaffingProfile, origin: Option<&GeoPoint>) -> Result<CalculationResult> {
        calculate(profile, origin, &self.directory, &self.travel, &self.cost_model)
    }
}

pub fn calculate(
    profile: &StaffingProfile,
    origin: Option<&GeoPoint>,
    directory: &InstituteDirectory,
    travel: &TravelPolicy,
    cost_model: &CostModel,
) -> Result<CalculationResult> {
    debug_assert!(profile.dentists() <= profile.team_size());

    let nearest = match origin {
        None => {
            tracing::debug!("No practice location yet, calculating without travel costs");
            None
        }
        Some(origin) => match NearestInstituteResolver::new(directory, travel).resolve(origin, profile) {
            Ok(nearest) => {
                tracing::debug!(
                    "Nearest institute: {} ({:.1} km one way, {:.0} min)",
                    nearest.institute.name,
                    nearest.one_way_distance_km,
                    nearest.one_way_travel_time_min
                );
                Some(nearest)
            }
            Err(CalcError::NoInstituteAvailable) => {
                tracing::warn!("Institute catalog is empty, calculating without travel costs");
                None
            }
            Err(e) => return Err(e),
        },
    };

    let result = cost_model.compute_costs(profile, nearest);
    tracing::info!(
        team_size = profile.team_size(),
        dentists = profile.dentists(),
        total_traditional_costs = result.total_traditional_costs,
        crocodile_costs = result.crocodile_costs,
        savings = result.savings,
        "Calculation finished"
    );

    Ok(result)
}
