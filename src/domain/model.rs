use crate::utils::error::{CalcError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staffing of a dental practice. `dentists <= team_size` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingProfile {
    team_size: u32,
    dentists: u32,
}

impl StaffingProfile {
    pub fn new(team_size: u32, dentists: u32) -> Result<Self> {
        if dentists > team_size {
            return Err(CalcError::invalid_profile(
                i64::from(team_size),
                i64::from(dentists),
                "number of dentists exceeds team size",
            ));
        }
        Ok(Self { team_size, dentists })
    }

    /// Builds a profile from raw form input, which may carry negative counts.
    pub fn from_counts(team_size: i64, dentists: i64) -> Result<Self> {
        if team_size < 0 || dentists < 0 {
            return Err(CalcError::invalid_profile(
                team_size,
                dentists,
                "counts must not be negative",
            ));
        }
        let to_u32 = |v: i64| {
            u32::try_from(v)
                .map_err(|_| CalcError::invalid_profile(team_size, dentists, "count is too large"))
        };
        Self::new(to_u32(team_size)?, to_u32(dentists)?)
    }

    pub fn team_size(&self) -> u32 {
        self.team_size
    }

    pub fn dentists(&self) -> u32 {
        self.dentists
    }

    pub fn assistants(&self) -> u32 {
        self.team_size - self.dentists
    }
}

/// Coordinates in degrees, always within [-90, 90] x [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = CalcError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);
        if !(lat_ok && lon_ok) {
            return Err(CalcError::InvalidCoordinates { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Free-form address parts. Carried through to reports, never used in math.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponents {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub location: GeoPoint,
    pub components: AddressComponents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institute {
    pub name: String,
    pub location: GeoPoint,
}

impl Institute {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestInstituteResult {
    pub institute: Institute,
    pub one_way_distance_km: f64,
    pub round_trip_distance_km: f64,
    pub one_way_travel_time_min: f64,
    pub round_trip_travel_time_min: f64,
    pub travel_costs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub traditional_costs_dentists: f64,
    pub traditional_costs_assistants: f64,
    pub total_traditional_costs: f64,
    pub crocodile_costs: f64,
    pub savings: f64,
    pub savings_percentage: f64,
    pub nearest_institute: Option<NearestInstituteResult>,
}

impl CalculationResult {
    pub fn travel_costs(&self) -> f64 {
        self.nearest_institute
            .as_ref()
            .map_or(0.0, |nearest| nearest.travel_costs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    pub email: String,
}

/// Payload handed to the lead-capture layer after a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReport {
    pub calculated_at: DateTime<Utc>,
    pub profile: StaffingProfile,
    pub address: Option<AddressComponents>,
    pub contact: Option<Contact>,
    pub result: CalculationResult,
}

impl LeadReport {
    pub fn new(
        profile: StaffingProfile,
        address: Option<AddressComponents>,
        contact: Option<Contact>,
        result: CalculationResult,
    ) -> Self {
        Self {
            calculated_at: Utc::now(),
            profile,
            address,
            contact,
            result,
        }
    }
}
