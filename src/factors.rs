use serde::{Deserialize, Serialize};

const ELECTRICITY_KG_PER_KWH: f64 = 0.0005;
const GAS_KG_PER_UNIT: f64 = 0.0053;
const FUEL_KG_PER_LITER: f64 = 2.32;
const WASTE_KG_PER_KG: f64 = 0.57;
const TRAVEL_KG_PER_LITER: f64 = 2.31;

/// The emission factors used by a [`crate::Calculator`], each in kg of CO2e per unit of input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    /// kg CO2e per kWh of electricity
    pub electricity: f64,
    /// kg CO2e per unit of natural gas
    pub gas: f64,
    /// kg CO2e per liter of fuel burned on site
    pub fuel: f64,
    /// kg CO2e per kg of (non-recycled) waste
    pub waste: f64,
    /// kg CO2e per liter of fuel burned by business travel
    pub travel: f64,
}

impl EmissionFactors {
    pub fn new(electricity: f64, gas: f64, fuel: f64, waste: f64, travel: f64) -> Self {
        Self {
            electricity,
            gas,
            fuel,
            waste,
            travel,
        }
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self::new(
            ELECTRICITY_KG_PER_KWH,
            GAS_KG_PER_UNIT,
            FUEL_KG_PER_LITER,
            WASTE_KG_PER_KG,
            TRAVEL_KG_PER_LITER,
        )
    }
}
