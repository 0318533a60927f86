use serde::{Deserialize, Serialize};

/// The measurements of an organization used to compute its carbon footprint.
///
/// `vehicle_fuel_efficiency` is expressed in **kilometers per liter** (km/L): the
/// distance travelled per liter of fuel. Use [`liters_per_100km_to_km_per_liter`] to
/// convert from the "liters per 100 km" convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UsageInput {
    /// electricity usage in kWh
    pub electricity_kwh: f64,
    /// natural gas usage in units of gas
    pub gas_units: f64,
    /// fuel burned on site in liters
    pub fuel_liters: f64,
    /// waste produced per month in kg
    pub monthly_waste_kg: f64,
    /// share of the waste that is recycled or composted, in `[0, 100]`
    pub recycling_percentage: f64,
    /// distance travelled for business in km
    pub travel_km: f64,
    /// fuel efficiency of the vehicles used for business travel, in km/L
    pub vehicle_fuel_efficiency: f64,
}

/// Converts a fuel consumption in liters per 100 km into an efficiency in km per liter.
/// Non-positive and non-finite consumptions are returned unchanged, so that validation reports them.
pub fn liters_per_100km_to_km_per_liter(liters_per_100km: f64) -> f64 {
    if liters_per_100km > 0.0 && liters_per_100km.is_finite() {
        100.0 / liters_per_100km
    } else {
        liters_per_100km
    }
}

/// A field of [`UsageInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ElectricityKwh,
    GasUnits,
    FuelLiters,
    MonthlyWasteKg,
    RecyclingPercentage,
    TravelKm,
    VehicleFuelEfficiency,
}

impl Field {
    /// All fields, in declaration order
    pub const ALL: [Field; 7] = [
        Field::ElectricityKwh,
        Field::GasUnits,
        Field::FuelLiters,
        Field::MonthlyWasteKg,
        Field::RecyclingPercentage,
        Field::TravelKm,
        Field::VehicleFuelEfficiency,
    ];

    /// The name of the field, as used in input files
    pub fn name(&self) -> &'static str {
        match self {
            Field::ElectricityKwh => "electricity_kwh",
            Field::GasUnits => "gas_units",
            Field::FuelLiters => "fuel_liters",
            Field::MonthlyWasteKg => "monthly_waste_kg",
            Field::RecyclingPercentage => "recycling_percentage",
            Field::TravelKm => "travel_km",
            Field::VehicleFuelEfficiency => "vehicle_fuel_efficiency",
        }
    }

    /// The question asked when collecting this field interactively
    pub fn question(&self) -> &'static str {
        match self {
            Field::ElectricityKwh => "Enter your average electricity usage in kWh",
            Field::GasUnits => "Enter your average natural gas usage in units",
            Field::FuelLiters => "Enter your average fuel usage in liters",
            Field::MonthlyWasteKg => "Enter how much waste you generate per month in kilograms",
            Field::RecyclingPercentage => {
                "Enter how much of that waste is recycled or composted (in percentage)"
            }
            Field::TravelKm => "Enter how many kilometers your employees travel for business purposes",
            Field::VehicleFuelEfficiency => {
                "Enter the average fuel efficiency of the vehicles used for business travel"
            }
        }
    }

    /// The domain values of this field must be in
    pub fn constraint(&self) -> Constraint {
        match self {
            Field::RecyclingPercentage => Constraint::Percentage,
            Field::VehicleFuelEfficiency => Constraint::Positive,
            _ => Constraint::NonNegative,
        }
    }

    /// Returns `value` if it is in the domain of this field.
    /// # Error
    /// Errors with [`InvalidInput`] when `value` is not finite or violates [`Field::constraint`]
    pub fn check(self, value: f64) -> Result<f64, InvalidInput> {
        let constraint = if !value.is_finite() {
            Constraint::Finite
        } else {
            self.constraint()
        };
        if constraint.holds(value) {
            Ok(value)
        } else {
            Err(InvalidInput {
                field: self,
                value,
                constraint,
            })
        }
    }

    pub fn get(&self, input: &UsageInput) -> f64 {
        match self {
            Field::ElectricityKwh => input.electricity_kwh,
            Field::GasUnits => input.gas_units,
            Field::FuelLiters => input.fuel_liters,
            Field::MonthlyWasteKg => input.monthly_waste_kg,
            Field::RecyclingPercentage => input.recycling_percentage,
            Field::TravelKm => input.travel_km,
            Field::VehicleFuelEfficiency => input.vehicle_fuel_efficiency,
        }
    }

    pub fn set(&self, input: &mut UsageInput, value: f64) {
        let slot = match self {
            Field::ElectricityKwh => &mut input.electricity_kwh,
            Field::GasUnits => &mut input.gas_units,
            Field::FuelLiters => &mut input.fuel_liters,
            Field::MonthlyWasteKg => &mut input.monthly_waste_kg,
            Field::RecyclingPercentage => &mut input.recycling_percentage,
            Field::TravelKm => &mut input.travel_km,
            Field::VehicleFuelEfficiency => &mut input.vehicle_fuel_efficiency,
        };
        *slot = value;
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A constraint violated by an [`InvalidInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// `>= 0`
    NonNegative,
    /// in `[0, 100]`
    Percentage,
    /// `> 0`
    Positive,
    /// neither NaN nor infinite
    Finite,
}

impl Constraint {
    fn holds(&self, value: f64) -> bool {
        match self {
            Constraint::NonNegative => value >= 0.0,
            Constraint::Percentage => (0.0..=100.0).contains(&value),
            Constraint::Positive => value > 0.0,
            Constraint::Finite => value.is_finite(),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Constraint::NonNegative => "must be non-negative",
            Constraint::Percentage => "must be in [0,100]",
            Constraint::Positive => "must be > 0",
            Constraint::Finite => "must be a finite number",
        })
    }
}

/// A value outside of the domain of its field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidInput {
    pub field: Field,
    pub value: f64,
    pub constraint: Constraint,
}

impl std::error::Error for InvalidInput {}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}: {}", self.field, self.value, self.constraint)
    }
}

/// All [`InvalidInput`]s of a [`UsageInput`], in field order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidInputs(Vec<InvalidInput>);

impl InvalidInputs {
    pub fn errors(&self) -> &[InvalidInput] {
        &self.0
    }

    /// The fields with an invalid value
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

impl From<InvalidInput> for InvalidInputs {
    fn from(error: InvalidInput) -> Self {
        Self(vec![error])
    }
}

impl std::error::Error for InvalidInputs {}

impl std::fmt::Display for InvalidInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            std::fmt::Display::fmt(error, f)?;
        }
        Ok(())
    }
}

impl UsageInput {
    /// Validates every field of the input.
    /// # Error
    /// Errors with every field whose value is outside its domain
    pub fn validate(&self) -> Result<(), InvalidInputs> {
        let errors = Field::ALL
            .iter()
            .filter_map(|field| field.check(field.get(self)).err())
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(InvalidInputs(errors))
        }
    }
}
