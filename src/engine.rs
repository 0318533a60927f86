use crate::{EmissionFactors, EmissionResult, Field, InvalidInput, InvalidInputs, UsageInput};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Computes emissions of a [`UsageInput`] from a fixed set of [`EmissionFactors`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calculator {
    factors: EmissionFactors,
}

impl Calculator {
    pub fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// Returns the emissions in kg CO2e of electricity, gas and fuel usage.
    /// # Error
    /// Errors if any of the inputs is negative
    pub fn compute_energy_emissions(
        &self,
        electricity_kwh: f64,
        gas_units: f64,
        fuel_liters: f64,
    ) -> Result<f64, InvalidInput> {
        let electricity_kwh = Field::ElectricityKwh.check(electricity_kwh)?;
        let gas_units = Field::GasUnits.check(gas_units)?;
        let fuel_liters = Field::FuelLiters.check(fuel_liters)?;

        let f = &self.factors;
        let emissions = electricity_kwh * f.electricity + gas_units * f.gas + fuel_liters * f.fuel;
        log::debug!("energy: {emissions} kg CO2e");
        Ok(emissions)
    }

    /// Returns the yearly emissions in kg CO2e of `monthly_waste_kg` of waste
    /// of which `recycling_percentage` is recycled.
    /// # Error
    /// Errors if the waste is negative or the percentage is outside `[0, 100]`
    pub fn compute_waste_emissions(
        &self,
        monthly_waste_kg: f64,
        recycling_percentage: f64,
    ) -> Result<f64, InvalidInput> {
        let monthly_waste_kg = Field::MonthlyWasteKg.check(monthly_waste_kg)?;
        let recycling_percentage = Field::RecyclingPercentage.check(recycling_percentage)?;

        let emissions = monthly_waste_kg
            * MONTHS_PER_YEAR
            * self.factors.waste
            * (1.0 - recycling_percentage / 100.0);
        log::debug!("waste: {emissions} kg CO2e");
        Ok(emissions)
    }

    /// Returns the emissions in kg CO2e of travelling `travel_km` with vehicles
    /// whose efficiency is `vehicle_fuel_efficiency` km/L.
    /// # Error
    /// Errors if the distance is negative or the efficiency is not strictly positive
    pub fn compute_travel_emissions(
        &self,
        travel_km: f64,
        vehicle_fuel_efficiency: f64,
    ) -> Result<f64, InvalidInput> {
        let travel_km = Field::TravelKm.check(travel_km)?;
        let vehicle_fuel_efficiency = Field::VehicleFuelEfficiency.check(vehicle_fuel_efficiency)?;

        let liters = travel_km / vehicle_fuel_efficiency;
        let emissions = liters * self.factors.travel;
        log::debug!("travel: {liters} L of fuel, {emissions} kg CO2e");
        Ok(emissions)
    }

    /// Returns the [`EmissionResult`] of `input`.
    /// # Error
    /// Errors with every field of `input` outside its domain
    pub fn calculate(&self, input: &UsageInput) -> Result<EmissionResult, InvalidInputs> {
        input.validate()?;

        let energy = self.compute_energy_emissions(
            input.electricity_kwh,
            input.gas_units,
            input.fuel_liters,
        )?;
        let waste =
            self.compute_waste_emissions(input.monthly_waste_kg, input.recycling_percentage)?;
        let travel =
            self.compute_travel_emissions(input.travel_km, input.vehicle_fuel_efficiency)?;

        let result = EmissionResult::new(energy, waste, travel);
        log::debug!("total: {} kg CO2e", result.total_emissions());
        Ok(result)
    }
}
