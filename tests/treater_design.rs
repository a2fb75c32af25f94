//! End-to-end treater design flow: thermal worksheet, catalog-backed sizing,
//! and evaluation scoring of the resulting design.

use treater_core::{
    calculate_evaluation_result, calculate_thermal_results, calculate_treatment_parameters,
    compliance_margin, is_criteria_approved, CalculationCriteria, ComparisonMode, InMemoryCatalog,
    SizingInput, SizingMethod, ThermalInput,
};

fn design_basis() -> SizingInput {
    SizingInput {
        total_flow_bpd: 500.0,
        water_fraction_pct: 20.0,
        api_gravity: 18.0,
        inlet_temperature_f: 75.0,
        target_temperature_f: 140.0,
        ambient_temperature_f: 30.0,
        oil_retention_time_min: 60.0,
        water_retention_time_min: 30.0,
        wind_speed_mph: 15.0,
    }
}

#[test]
fn sizing_then_thermal_worksheet_on_selected_vessel() {
    let sizing = calculate_treatment_parameters(
        &design_basis(),
        SizingMethod::Simplified,
        InMemoryCatalog::standard(),
    )
    .unwrap();

    let selection = sizing.recommendation.expect("standard catalog covers this duty");
    assert!(selection.option.min_heat_capacity_btu_hr >= sizing.required_heat_capacity_btu_hr);
    assert!(selection.option.internal_volume_bbl() >= sizing.required_retention_volume_bbl);

    // Run the full worksheet on the recommended vessel geometry
    let thermal = calculate_thermal_results(&ThermalInput {
        diameter_ft: selection.option.diameter_ft,
        length_ft: selection.option.length_ft,
        total_flow_bpd: 500.0,
        water_fraction_pct: 20.0,
        api_gravity: 18.0,
        inlet_temperature_f: 75.0,
        ambient_temperature_f: 30.0,
        operating_pressure_psig: selection.option.design_pressure_psig,
        ..Default::default()
    })
    .unwrap();

    assert!(thermal.total_heat_required_btu_hr > 0.0);
    assert!(thermal.oil_retention_volume_ft3 > 0.0);
    assert!(thermal.estimated_retention_time_min > 0.0);
}

#[test]
fn evaluate_design_against_technical_criteria() {
    let sizing = calculate_treatment_parameters(
        &design_basis(),
        SizingMethod::Simplified,
        InMemoryCatalog::standard(),
    )
    .unwrap();
    let selection = sizing.recommendation.unwrap();

    // Heat capacity must meet the requirement (critical), residence time is
    // scored but not critical
    let heat_margin = compliance_margin(
        selection.option.min_heat_capacity_btu_hr,
        sizing.required_heat_capacity_btu_hr,
    );
    let heat_ok = is_criteria_approved(
        selection.option.min_heat_capacity_btu_hr,
        sizing.required_heat_capacity_btu_hr,
        ComparisonMode::Min,
        None,
    )
    .unwrap();

    let residence_margin = compliance_margin(sizing.estimated_residence_time_min, 60.0);
    let residence_ok = is_criteria_approved(
        sizing.estimated_residence_time_min,
        60.0,
        ComparisonMode::Min,
        None,
    )
    .unwrap();

    let result = calculate_evaluation_result(&[
        CalculationCriteria {
            approved: heat_ok,
            compliance_margin_pct: heat_margin,
            is_critical: Some(true),
            weight: Some(60.0),
        },
        CalculationCriteria {
            approved: residence_ok,
            compliance_margin_pct: residence_margin,
            is_critical: Some(false),
            weight: Some(40.0),
        },
    ])
    .unwrap();

    // The catalog vessel exceeds the heat duty, so no critical failure even
    // though the 48-minute residence time misses the 60-minute target
    assert!(heat_ok);
    assert!(!residence_ok);
    assert!(result.approved);
    assert_eq!(result.critical_failures, 0);
    assert!(result.score.is_some());
}
