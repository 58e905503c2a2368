use crate::core::directory::InstituteDirectory;
use crate::core::geo::{self, DEFAULT_AVERAGE_SPEED_KMH};
use crate::domain::model::{GeoPoint, Institute, NearestInstituteResult, StaffingProfile};
use crate::utils::error::{CalcError, Result};

pub const DEFAULT_TRAVEL_RATE_PER_KM: f64 = 0.30;
pub const DEFAULT_CARPOOL_SIZE: u32 = 5;

/// How travel to an in-person course is priced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelPolicy {
    pub rate_per_km: f64,
    /// Assistants share cars of this many seats.
    pub carpool_size: u32,
    pub average_speed_kmh: f64,
}

impl Default for TravelPolicy {
    fn default() -> Self {
        Self {
            rate_per_km: DEFAULT_TRAVEL_RATE_PER_KM,
            carpool_size: DEFAULT_CARPOOL_SIZE,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

impl TravelPolicy {
    /// Cars needed for the assistants, rounded up.
    pub fn assistant_carpools(&self, assistants: u32) -> u32 {
        assistants.div_ceil(self.carpool_size.max(1))
    }

    /// One round trip per dentist plus one per assistant carpool.
    pub fn travel_costs(&self, round_trip_distance_km: f64, profile: &StaffingProfile) -> f64 {
        let trips = f64::from(profile.dentists()) + f64::from(self.assistant_carpools(profile.assistants()));
        round_trip_distance_km * self.rate_per_km * trips
    }
}

/// Linear scan for the closest institute. The first one reaching the minimum wins.
pub fn find_nearest<'a>(origin: &GeoPoint, catalog: &'a [Institute]) -> Result<(&'a Institute, f64)> {
    let mut best: Option<(&Institute, f64)> = None;

    for institute in catalog {
        let distance = geo::distance_km(origin, &institute.location);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((institute, distance)),
        }
    }

    best.ok_or(CalcError::NoInstituteAvailable)
}

pub struct NearestInstituteResolver<'a> {
    directory: &'a InstituteDirectory,
    policy: &'a TravelPolicy,
}

impl<'a> NearestInstituteResolver<'a> {
    pub fn new(directory: &'a InstituteDirectory, policy: &'a TravelPolicy) -> Self {
        Self { directory, policy }
    }

    pub fn resolve(&self, origin: &GeoPoint, profile: &StaffingProfile) -> Result<NearestInstituteResult> {
        let (institute, one_way_distance_km) = find_nearest(origin, self.directory.institutes())?;

        let round_trip_distance_km = 2.0 * one_way_distance_km;
        let one_way_travel_time_min =
            geo::travel_time_minutes(one_way_distance_km, self.policy.average_speed_kmh);

        Ok(NearestInstituteResult {
            institute: institute.clone(),
            one_way_distance_km,
            round_trip_distance_km,
            one_way_travel_time_min,
            round_trip_travel_time_min: 2.0 * one_way_travel_time_min,
            travel_costs: self.policy.travel_costs(round_trip_distance_km, profile),
        })
    }
}
