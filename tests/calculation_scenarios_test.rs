use approx::assert_relative_eq;
use crocodile_savings::core::cost_model::{CostModel, OnlinePricing, PriceBand, StaffRates};
use crocodile_savings::core::directory::InstituteDirectory;
use crocodile_savings::core::geo;
use crocodile_savings::core::resolver::{find_nearest, TravelPolicy};
use crocodile_savings::{calculate, CalcError, GeoPoint, Institute, SavingsCalculator, StaffingProfile};

/// Offset in degrees of latitude that puts a point `km` north of another.
fn km_north(origin: &GeoPoint, km: f64) -> GeoPoint {
    let degrees = (km / geo::EARTH_RADIUS_KM).to_degrees();
    GeoPoint::new(origin.latitude() + degrees, origin.longitude()).unwrap()
}

fn flat_pricing(price_per_seat: f64) -> OnlinePricing {
    OnlinePricing::new(vec![PriceBand {
        min_team_size: 1,
        max_team_size: None,
        price_per_seat,
    }])
    .unwrap()
}

fn calculator_with(institutes: Vec<Institute>) -> SavingsCalculator {
    SavingsCalculator::new(
        InstituteDirectory::new(institutes),
        TravelPolicy::default(),
        CostModel::new(StaffRates::default(), flat_pricing(100.0)),
    )
}

#[test]
fn test_reference_scenario_with_travel() {
    let practice = GeoPoint::new(50.9375, 6.9603).unwrap();
    let institute = Institute::new("Akademie", km_north(&practice, 20.0));
    let calculator = calculator_with(vec![institute]);
    let profile = StaffingProfile::new(5, 2).unwrap();

    let result = calculator.calculate(&profile, Some(&practice)).unwrap();
    let nearest = result.nearest_institute.as_ref().unwrap();

    assert_eq!(profile.assistants(), 3);
    assert_relative_eq!(result.traditional_costs_dentists, 2400.0);
    assert_relative_eq!(result.traditional_costs_assistants, 840.0);
    assert_relative_eq!(nearest.one_way_distance_km, 20.0, epsilon = 1e-6);
    assert_relative_eq!(nearest.round_trip_distance_km, 40.0, epsilon = 1e-6);
    assert_relative_eq!(nearest.travel_costs, 36.0, epsilon = 1e-6);
    assert_relative_eq!(result.total_traditional_costs, 3276.0, epsilon = 1e-6);
    assert_relative_eq!(nearest.one_way_travel_time_min, 15.0, epsilon = 1e-6);
    assert_relative_eq!(nearest.round_trip_travel_time_min, 30.0, epsilon = 1e-6);

    assert_relative_eq!(result.crocodile_costs, 500.0);
    assert_relative_eq!(result.savings, 2776.0, epsilon = 1e-6);
    assert_relative_eq!(result.savings_percentage, 2776.0 / 3276.0 * 100.0, epsilon = 1e-6);
}

#[test]
fn test_nearest_of_two_institutes() {
    let a = GeoPoint::new(48.0, 11.0).unwrap();
    let b = km_north(&a, 50.0);
    let catalog = vec![Institute::new("A", a), Institute::new("B", b)];

    let (nearest, distance) = find_nearest(&a, &catalog).unwrap();
    assert_eq!(nearest.name, "A");
    assert_eq!(distance, 0.0);

    let (nearest, _) = find_nearest(&km_north(&a, 45.0), &catalog).unwrap();
    assert_eq!(nearest.name, "B");
}

#[test]
fn test_empty_catalog_still_calculates() {
    let calculator = calculator_with(vec![]);
    let profile = StaffingProfile::new(5, 2).unwrap();
    let practice = GeoPoint::new(50.0, 8.0).unwrap();

    let result = calculator.calculate(&profile, Some(&practice)).unwrap();

    assert!(result.nearest_institute.is_none());
    assert_relative_eq!(result.total_traditional_costs, 3240.0);
    assert_eq!(result.travel_costs(), 0.0);
}

#[test]
fn test_unresolved_address_still_calculates() {
    let practice = GeoPoint::new(50.0, 8.0).unwrap();
    let calculator = calculator_with(vec![Institute::new("Near", practice)]);
    let profile = StaffingProfile::new(8, 3).unwrap();

    let result = calculator.calculate(&profile, None).unwrap();

    assert!(result.nearest_institute.is_none());
    assert_relative_eq!(result.total_traditional_costs, 3.0 * 1200.0 + 5.0 * 280.0);
}

#[test]
fn test_too_many_dentists_produces_no_result() {
    let err = StaffingProfile::new(5, 6).unwrap_err();
    assert!(matches!(err, CalcError::InvalidProfile { .. }));

    let err = StaffingProfile::from_counts(5, -1).unwrap_err();
    assert!(matches!(err, CalcError::InvalidProfile { .. }));
}

#[test]
fn test_zero_traditional_costs_means_zero_percentage() {
    let calculator = SavingsCalculator::new(
        InstituteDirectory::default(),
        TravelPolicy::default(),
        CostModel::new(
            StaffRates {
                cost_per_dentist: 0.0,
                cost_per_assistant: 0.0,
            },
            flat_pricing(250.0),
        ),
    );

    for (team_size, dentists) in [(0, 0), (1, 1), (4, 1), (30, 10)] {
        let profile = StaffingProfile::new(team_size, dentists).unwrap();
        let result = calculator.calculate(&profile, None).unwrap();
        assert_eq!(result.total_traditional_costs, 0.0);
        assert_eq!(result.savings_percentage, 0.0);
    }
}

#[test]
fn test_traditional_costs_are_monotonic() {
    let practice = GeoPoint::new(52.0, 13.0).unwrap();
    let institute = Institute::new("Akademie", km_north(&practice, 30.0));
    let calculator = calculator_with(vec![institute.clone()]);

    let total = |team_size: u32, dentists: u32| {
        let profile = StaffingProfile::new(team_size, dentists).unwrap();
        calculator
            .calculate(&profile, Some(&practice))
            .unwrap()
            .total_traditional_costs
    };

    for team_size in 0..25 {
        for dentists in 0..=team_size {
            let base = total(team_size, dentists);
            assert!(total(team_size + 1, dentists) >= base);
            if dentists < team_size {
                assert!(total(team_size, dentists + 1) >= base);
            }
        }
    }

    // further away never gets cheaper
    let profile = StaffingProfile::new(7, 2).unwrap();
    let mut previous = 0.0;
    for km in [0.0, 5.0, 25.0, 100.0, 400.0] {
        let far = calculator_with(vec![Institute::new("Far", km_north(&practice, km))]);
        let cost = far.calculate(&profile, Some(&practice)).unwrap().total_traditional_costs;
        assert!(cost >= previous);
        previous = cost;
    }
}

#[test]
fn test_free_function_matches_calculator() {
    let practice = GeoPoint::new(49.0, 8.4).unwrap();
    let directory = InstituteDirectory::new(vec![Institute::new("K", km_north(&practice, 12.0))]);
    let travel = TravelPolicy::default();
    let model = CostModel::new(StaffRates::default(), flat_pricing(120.0));
    let profile = StaffingProfile::new(12, 4).unwrap();

    let direct = calculate(&profile, Some(&practice), &directory, &travel, &model).unwrap();
    let calculator = SavingsCalculator::new(directory, travel, model);
    let via_calculator = calculator.calculate(&profile, Some(&practice)).unwrap();

    assert_eq!(direct, via_calculator);
}

#[test]
fn test_concurrent_requests_share_one_calculator() {
    let practice = GeoPoint::new(50.9375, 6.9603).unwrap();
    let calculator = calculator_with(vec![
        Institute::new("Near", km_north(&practice, 20.0)),
        Institute::new("Far", km_north(&practice, 200.0)),
    ]);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8u32)
            .map(|team_size| {
                let calculator = &calculator;
                scope.spawn(move || {
                    let profile = StaffingProfile::new(team_size, 1).unwrap();
                    (team_size, calculator.calculate(&profile, Some(&practice)).unwrap())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (team_size, result) in results {
        let profile = StaffingProfile::new(team_size, 1).unwrap();
        let expected = calculator.calculate(&profile, Some(&practice)).unwrap();
        assert_eq!(result, expected);
        assert_eq!(result.nearest_institute.unwrap().institute.name, "Near");
    }
}
