use crate::domain::model::{CalculationResult, NearestInstituteResult, StaffingProfile};
use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COST_PER_DENTIST: f64 = 1200.0;
pub const DEFAULT_COST_PER_ASSISTANT: f64 = 280.0;

/// Course fees per person and training cycle for in-person training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffRates {
    pub cost_per_dentist: f64,
    pub cost_per_assistant: f64,
}

impl Default for StaffRates {
    fn default() -> Self {
        Self {
            cost_per_dentist: DEFAULT_COST_PER_DENTIST,
            cost_per_assistant: DEFAULT_COST_PER_ASSISTANT,
        }
    }
}

/// Per-seat online price for teams of `min_team_size..=max_team_size`.
/// A missing `max_team_size` leaves the band open upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min_team_size: u32,
    pub max_team_size: Option<u32>,
    pub price_per_seat: f64,
}

impl PriceBand {
    pub fn contains(&self, team_size: u32) -> bool {
        team_size >= self.min_team_size && self.max_team_size.map_or(true, |max| team_size <= max)
    }
}

/// Online pricing table. Bands are checked on construction to cover
/// every team size from 1 upwards without gaps or overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct OnlinePricing {
    bands: Vec<PriceBand>,
}

impl OnlinePricing {
    pub fn new(bands: Vec<PriceBand>) -> Result<Self> {
        let field = "online_pricing.bands";
        let invalid = |index: usize, reason: String| CalcError::ConfigValidationError {
            field: format!("{}[{}]", field, index),
            message: reason,
        };

        let Some(first) = bands.first() else {
            return Err(CalcError::MissingConfigError {
                field: field.to_string(),
            });
        };
        if first.min_team_size > 1 {
            return Err(invalid(0, "the first band must start at team size 1".to_string()));
        }

        for (index, band) in bands.iter().enumerate() {
            if !band.price_per_seat.is_finite() || band.price_per_seat < 0.0 {
                return Err(invalid(index, format!("invalid price per seat {}", band.price_per_seat)));
            }
            if let Some(max) = band.max_team_size {
                if max < band.min_team_size {
                    return Err(invalid(
                        index,
                        format!("max_team_size {} is below min_team_size {}", max, band.min_team_size),
                    ));
                }
            }

            match (band.max_team_size, bands.get(index + 1)) {
                (None, Some(_)) => {
                    return Err(invalid(index, "only the last band may be open-ended".to_string()));
                }
                (Some(max), Some(next)) if next.min_team_size != max.saturating_add(1) => {
                    return Err(invalid(
                        index + 1,
                        format!("band must start at {} to follow the previous band", max.saturating_add(1)),
                    ));
                }
                (Some(_), None) => {
                    return Err(invalid(index, "the last band must leave max_team_size unset".to_string()));
                }
                _ => {}
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[PriceBand] {
        &self.bands
    }

    pub fn band_for(&self, team_size: u32) -> Option<&PriceBand> {
        self.bands.iter().find(|band| band.contains(team_size))
    }

    /// Online cost of training the whole team. An empty team costs nothing.
    pub fn online_cost(&self, profile: &StaffingProfile) -> f64 {
        let team_size = profile.team_size();
        self.band_for(team_size)
            .map_or(0.0, |band| f64::from(team_size) * band.price_per_seat)
    }
}

/// Turns a staffing profile into traditional and online cost figures.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    rates: StaffRates,
    online: OnlinePricing,
}

impl CostModel {
    pub fn new(rates: StaffRates, online: OnlinePricing) -> Self {
        Self { rates, online }
    }

    pub fn rates(&self) -> &StaffRates {
        &self.rates
    }

    pub fn online_pricing(&self) -> &OnlinePricing {
        &self.online
    }

    pub fn online_cost(&self, profile: &StaffingProfile) -> f64 {
        self.online.online_cost(profile)
    }

    pub fn compute_costs(
        &self,
        profile: &StaffingProfile,
        nearest_institute: Option<NearestInstituteResult>,
    ) -> CalculationResult {
        let traditional_costs_dentists = f64::from(profile.dentists()) * self.rates.cost_per_dentist;
        let traditional_costs_assistants = f64::from(profile.assistants()) * self.rates.cost_per_assistant;
        let travel_costs = nearest_institute.as_ref().map_or(0.0, |n| n.travel_costs);

        let total_traditional_costs = traditional_costs_dentists + traditional_costs_assistants + travel_costs;
        let crocodile_costs = self.online_cost(profile);
        let savings = total_traditional_costs - crocodile_costs;
        let savings_percentage = if total_traditional_costs > 0.0 {
            savings / total_traditional_costs * 100.0
        } else {
            0.0
        };

        CalculationResult {
            traditional_costs_dentists,
            traditional_costs_assistants,
            total_traditional_costs,
            crocodile_costs,
            savings,
            savings_percentage,
            nearest_institute,
        }
    }
}
