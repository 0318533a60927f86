use serde::Serialize;

/// A category of emissions
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Energy,
    Waste,
    Travel,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Energy => "Energy Usage",
            Category::Waste => "Waste Production",
            Category::Travel => "Business Travel",
        }
    }
}

/// The emissions of an organization, in kg of CO2e, as computed by [`crate::Calculator::calculate`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct EmissionResult {
    energy_emissions: f64,
    waste_emissions: f64,
    travel_emissions: f64,
    total_emissions: f64,
}

impl EmissionResult {
    pub(crate) fn new(energy_emissions: f64, waste_emissions: f64, travel_emissions: f64) -> Self {
        Self {
            energy_emissions,
            waste_emissions,
            travel_emissions,
            total_emissions: energy_emissions + waste_emissions + travel_emissions,
        }
    }

    /// Emissions of electricity, gas and fuel
    pub fn energy_emissions(&self) -> f64 {
        self.energy_emissions
    }

    /// Emissions of waste, net of recycling
    pub fn waste_emissions(&self) -> f64 {
        self.waste_emissions
    }

    pub fn travel_emissions(&self) -> f64 {
        self.travel_emissions
    }

    pub fn total_emissions(&self) -> f64 {
        self.total_emissions
    }

    pub fn emissions(&self, category: Category) -> f64 {
        match category {
            Category::Energy => self.energy_emissions,
            Category::Waste => self.waste_emissions,
            Category::Travel => self.travel_emissions,
        }
    }

    /// Returns the category whose emissions are strictly larger than the emissions
    /// of every other category, if any.
    pub fn dominant(&self) -> Option<Category> {
        let (energy, waste, travel) = (
            self.energy_emissions,
            self.waste_emissions,
            self.travel_emissions,
        );
        if energy > waste && energy > travel {
            Some(Category::Energy)
        } else if waste > energy && waste > travel {
            Some(Category::Waste)
        } else if travel > energy && travel > waste {
            Some(Category::Travel)
        } else {
            None
        }
    }
}
