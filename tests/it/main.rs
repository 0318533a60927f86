use std::error::Error;

use footprint::collect::{EfficiencyUnit, PartialInput};
use footprint::{Calculator, EmissionFactors, Field, UsageInput};

fn scenario() -> UsageInput {
    UsageInput {
        electricity_kwh: 100.0,
        gas_units: 0.0,
        fuel_liters: 0.0,
        monthly_waste_kg: 20.0,
        recycling_percentage: 50.0,
        travel_km: 1000.0,
        vehicle_fuel_efficiency: 10.0,
    }
}

/// Verifies that the scenario below yields the subtotals computed by hand from
/// the default factors: 100 kWh * 0.0005, 20 kg * 12 * 0.57 * 50%, 1000 km / 10 km/L * 2.31
#[test]
fn acceptance_scenario() -> Result<(), Box<dyn Error>> {
    let result = Calculator::default().calculate(&scenario())?;

    let energy = 100.0 * 0.0005 + 0.0 * 0.0053 + 0.0 * 2.32;
    let waste = 20.0 * 12.0 * 0.57 * (1.0 - 50.0 / 100.0);
    let travel = 1000.0 / 10.0 * 2.31;

    assert_eq!(result.energy_emissions(), energy);
    assert_eq!(result.waste_emissions(), waste);
    assert_eq!(result.travel_emissions(), travel);
    assert_eq!(result.total_emissions(), energy + waste + travel);

    assert!((result.energy_emissions() - 0.05).abs() < 1e-12);
    assert!((result.waste_emissions() - 68.4).abs() < 1e-9);
    assert!((result.travel_emissions() - 231.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn deterministic() -> Result<(), Box<dyn Error>> {
    let calculator = Calculator::default();
    let a = calculator.calculate(&scenario())?;
    let b = calculator.calculate(&scenario())?;
    assert_eq!(
        a.total_emissions().to_bits(),
        b.total_emissions().to_bits()
    );
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn total_is_exact_sum() {
    let calculator = Calculator::default();
    let values = [0.0, 0.1, 1.0, 3.7, 1234.5678, 1e9];
    for &x in &values {
        for &y in &values {
            let input = UsageInput {
                electricity_kwh: x,
                gas_units: y,
                fuel_liters: x,
                monthly_waste_kg: y,
                recycling_percentage: 33.3,
                travel_km: x,
                vehicle_fuel_efficiency: y + 0.5,
            };
            let r = calculator.calculate(&input).unwrap();
            assert_eq!(
                r.total_emissions(),
                r.energy_emissions() + r.waste_emissions() + r.travel_emissions()
            );
        }
    }
}

/// Factors that are powers of two keep the products exact
#[test]
fn energy_is_linear_in_each_input() {
    let calculator = Calculator::new(EmissionFactors::new(0.5, 0.25, 2.0, 1.0, 1.0));
    let (e, g, f) = (10.0, 20.0, 30.0);
    let base = calculator.compute_energy_emissions(e, g, f).unwrap();

    for k in [0.0, 2.0, 4.0, 8.0] {
        let scaled = calculator.compute_energy_emissions(e * k, g, f).unwrap();
        assert_eq!(scaled - base, (k - 1.0) * e * 0.5);
        let scaled = calculator.compute_energy_emissions(e, g * k, f).unwrap();
        assert_eq!(scaled - base, (k - 1.0) * g * 0.25);
        let scaled = calculator.compute_energy_emissions(e, g, f * k).unwrap();
        assert_eq!(scaled - base, (k - 1.0) * f * 2.0);
    }
}

#[test]
fn waste_non_increasing_with_recycling() {
    let calculator = Calculator::default();
    let mut previous = f64::INFINITY;
    for percentage in 0..=100 {
        let emissions = calculator
            .compute_waste_emissions(20.0, percentage as f64)
            .unwrap();
        assert!(emissions <= previous);
        previous = emissions;
    }
    assert_eq!(calculator.compute_waste_emissions(20.0, 100.0).unwrap(), 0.0);
}

#[test]
fn recycling_boundaries() {
    let calculator = Calculator::default();
    for percentage in [0.0, 100.0] {
        let mut input = scenario();
        input.recycling_percentage = percentage;
        assert!(calculator.calculate(&input).is_ok());
    }
    for percentage in [101.0, -1.0] {
        let mut input = scenario();
        input.recycling_percentage = percentage;
        let errors = calculator.calculate(&input).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::RecyclingPercentage]
        );
    }
}

#[test]
fn efficiency_boundaries() {
    let calculator = Calculator::default();
    for efficiency in [0.0, -0.0, -1.0, -1e9] {
        let mut input = scenario();
        input.vehicle_fuel_efficiency = efficiency;
        let errors = calculator.calculate(&input).unwrap_err();
        assert_eq!(errors.errors()[0].field, Field::VehicleFuelEfficiency);
        assert!(errors.errors()[0].to_string().ends_with("must be > 0"));
    }
}

#[test]
fn negative_electricity_is_rejected() {
    let mut input = scenario();
    input.electricity_kwh = -1.0;
    let errors = Calculator::default().calculate(&input).unwrap_err();
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(errors.errors()[0].field, Field::ElectricityKwh);
    assert_eq!(errors.errors()[0].value, -1.0);
    assert_eq!(
        errors.to_string(),
        "electricity_kwh = -1: must be non-negative"
    );
}

#[test]
fn large_values_are_accepted() {
    let mut input = scenario();
    input.electricity_kwh = 1e15;
    let result = Calculator::default().calculate(&input).unwrap();
    assert!(result.energy_emissions() > 1e11);
}

#[test]
fn collected_liters_per_100km() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("footprint_it_usage.json");
    std::fs::write(
        &path,
        r#"{
            "electricity_kwh": 100,
            "gas_units": 0,
            "fuel_liters": 0,
            "monthly_waste_kg": 20,
            "recycling_percentage": 50,
            "travel_km": 1000,
            "vehicle_fuel_efficiency": 10
        }"#,
    )?;
    let file = PartialInput::from_path(&path)?;
    std::fs::remove_file(&path)?;

    // 10 L/100km is 10 km/L
    let input = file.complete(EfficiencyUnit::LitersPer100Km)?;
    assert_eq!(input, scenario());

    let mut flags = PartialInput::default();
    flags.vehicle_fuel_efficiency = Some(5.0);
    let input = file.merge(flags).complete(EfficiencyUnit::LitersPer100Km)?;
    assert_eq!(input.vehicle_fuel_efficiency, 20.0);
    Ok(())
}

#[test]
fn collected_csv() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("footprint_it_usage.csv");
    std::fs::write(
        &path,
        "electricity_kwh,gas_units,fuel_liters,monthly_waste_kg,recycling_percentage,travel_km,vehicle_fuel_efficiency\n100,0,0,20,50,1000,10\n",
    )?;
    let file = PartialInput::from_path(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(file.complete(EfficiencyUnit::KmPerLiter)?, scenario());
    Ok(())
}

#[cfg(feature = "report")]
#[test]
fn rendered_report() -> Result<(), Box<dyn Error>> {
    use footprint::report::{self, Format, Metadata};

    let calculator = Calculator::default();
    let result = calculator.calculate(&scenario())?;
    let metadata = Metadata {
        organization: "Acme".to_string(),
        date: time::macros::date!(2024 - 01 - 31),
        factors: *calculator.factors(),
    };

    let rendered = report::render(&result, &metadata, Format::Markdown)?;
    assert!(rendered.contains("| Energy Usage | 0.05 |"));
    assert!(rendered.contains("| Waste Production | 68.40 |"));
    assert!(rendered.contains("| Business Travel | 231.00 |"));
    assert!(rendered.contains("| **Total** | **299.45** |"));
    assert!(rendered.contains("3. Invest in fuel-efficient or electric vehicles"));

    let path = std::env::temp_dir()
        .join("footprint_it_reports")
        .join("acme.md");
    report::write(&path, &rendered)?;
    assert_eq!(std::fs::read_to_string(&path)?, rendered);
    std::fs::remove_file(&path)?;

    let rendered = report::render(&result, &metadata, Format::Json)?;
    let value: serde_json::Value = serde_json::from_str(&rendered)?;
    let travel = value["travel_emissions"].as_f64().unwrap();
    assert!((travel - result.travel_emissions()).abs() < 1e-9);
    Ok(())
}
