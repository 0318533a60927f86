use std::io::{BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{liters_per_100km_to_km_per_liter, Calculator, EmissionResult, Field, UsageInput};

/// How the user expresses `vehicle_fuel_efficiency`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EfficiencyUnit {
    /// kilometers per liter, as used by [`UsageInput`]
    #[default]
    KmPerLiter,
    /// liters per 100 kilometers
    LitersPer100Km,
}

impl EfficiencyUnit {
    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyUnit::KmPerLiter => "kilometers per liter",
            EfficiencyUnit::LitersPer100Km => "liters per 100 kilometers",
        }
    }

    /// Converts a value of `field` given by the user into the unit of [`UsageInput`].
    pub fn normalize(&self, field: Field, value: f64) -> f64 {
        match (self, field) {
            (EfficiencyUnit::LitersPer100Km, Field::VehicleFuelEfficiency) => {
                liters_per_100km_to_km_per_liter(value)
            }
            _ => value,
        }
    }
}

#[derive(Debug)]
pub enum CollectError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    /// A CSV input must contain exactly one record
    RecordCount(usize),
    UnsupportedFormat(String),
    /// A value given for a field is not a number
    Parse { field: Field, value: String },
    Missing(Vec<Field>),
    /// The input ended while asking for a field
    EndOfInput(Field),
    /// No organization name was given
    NoOrganization,
}

impl std::error::Error for CollectError {}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => std::fmt::Display::fmt(&e, f),
            Self::Json(e) => std::fmt::Display::fmt(&e, f),
            Self::Csv(e) => std::fmt::Display::fmt(&e, f),
            Self::RecordCount(count) => {
                write!(f, "expected exactly one record in the CSV input, found {count}")
            }
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported input file \"{path}\" (expected .json or .csv)")
            }
            Self::Parse { field, value } => write!(f, "{field}: \"{value}\" is not a number"),
            Self::Missing(fields) => {
                f.write_str("missing values for ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    std::fmt::Display::fmt(field, f)?;
                }
                Ok(())
            }
            Self::EndOfInput(field) => write!(f, "input ended before a value for {field} was given"),
            Self::NoOrganization => f.write_str("no organization name was given"),
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CollectError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<csv::Error> for CollectError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

/// A [`UsageInput`] whose values may not all be known yet, in the units given by the user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PartialInput {
    pub electricity_kwh: Option<f64>,
    pub gas_units: Option<f64>,
    pub fuel_liters: Option<f64>,
    pub monthly_waste_kg: Option<f64>,
    pub recycling_percentage: Option<f64>,
    pub travel_km: Option<f64>,
    pub vehicle_fuel_efficiency: Option<f64>,
}

impl PartialInput {
    /// Parses a JSON object with the fields of [`UsageInput`]
    pub fn from_json(data: &[u8]) -> Result<Self, CollectError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Parses a headered CSV with the fields of [`UsageInput`] as columns and a single record
    pub fn from_csv(data: &[u8]) -> Result<Self, CollectError> {
        let mut records = super::csv::deserialize::<Self>(data).collect::<Result<Vec<_>, _>>()?;
        if records.len() != 1 {
            return Err(CollectError::RecordCount(records.len()));
        }
        Ok(records.remove(0))
    }

    /// Reads a `.json` or `.csv` file
    pub fn from_path(path: &Path) -> Result<Self, CollectError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let read: fn(&[u8]) -> Result<Self, CollectError> = match extension.as_deref() {
            Some("json") => Self::from_json,
            Some("csv") => Self::from_csv,
            _ => return Err(CollectError::UnsupportedFormat(path.display().to_string())),
        };
        let data = std::fs::read(path)?;
        let input = read(&data)?;
        log::info!("Read {} values from {}", input.known().count(), path.display());
        Ok(input)
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::ElectricityKwh => self.electricity_kwh,
            Field::GasUnits => self.gas_units,
            Field::FuelLiters => self.fuel_liters,
            Field::MonthlyWasteKg => self.monthly_waste_kg,
            Field::RecyclingPercentage => self.recycling_percentage,
            Field::TravelKm => self.travel_km,
            Field::VehicleFuelEfficiency => self.vehicle_fuel_efficiency,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::ElectricityKwh => &mut self.electricity_kwh,
            Field::GasUnits => &mut self.gas_units,
            Field::FuelLiters => &mut self.fuel_liters,
            Field::MonthlyWasteKg => &mut self.monthly_waste_kg,
            Field::RecyclingPercentage => &mut self.recycling_percentage,
            Field::TravelKm => &mut self.travel_km,
            Field::VehicleFuelEfficiency => &mut self.vehicle_fuel_efficiency,
        };
        *slot = Some(value);
    }

    /// Returns `self` with every value known by `other` replaced by it
    pub fn merge(mut self, other: PartialInput) -> Self {
        for field in Field::ALL {
            if let Some(value) = other.get(field) {
                self.set(field, value);
            }
        }
        self
    }

    fn known(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.get(*f).is_some())
    }

    /// Fields without a value
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Returns the [`UsageInput`] of this input, with values converted from `unit`.
    /// # Error
    /// Errors if any value is missing
    pub fn complete(&self, unit: EfficiencyUnit) -> Result<UsageInput, CollectError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CollectError::Missing(missing));
        }
        let mut input = UsageInput {
            electricity_kwh: 0.0,
            gas_units: 0.0,
            fuel_liters: 0.0,
            monthly_waste_kg: 0.0,
            recycling_percentage: 0.0,
            travel_km: 0.0,
            vehicle_fuel_efficiency: 0.0,
        };
        for field in Field::ALL {
            if let Some(value) = self.get(field) {
                field.set(&mut input, unit.normalize(field, value));
            }
        }
        Ok(input)
    }
}

/// Parses a value given for `field`
pub fn parse(field: Field, value: &str) -> Result<f64, CollectError> {
    value.trim().parse::<f64>().map_err(|_| CollectError::Parse {
        field,
        value: value.trim().to_string(),
    })
}

/// Asks for `field` on `writer` until `reader` returns a number.
/// The value is returned in the unit given by the user.
/// # Error
/// Errors if `reader` ends or cannot be read
pub fn prompt<R: BufRead, W: Write>(
    field: Field,
    unit: EfficiencyUnit,
    reader: &mut R,
    writer: &mut W,
) -> Result<f64, CollectError> {
    loop {
        match field {
            Field::VehicleFuelEfficiency => {
                write!(writer, "{} in {}: ", field.question(), unit.label())?
            }
            _ => write!(writer, "{}: ", field.question())?,
        }
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(CollectError::EndOfInput(field));
        }
        match parse(field, &line) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(writer, "Invalid input. {e}. Please enter a valid number.")?,
        }
    }
}

/// Prompts for every field missing from `input`
pub fn fill_missing<R: BufRead, W: Write>(
    mut input: PartialInput,
    unit: EfficiencyUnit,
    reader: &mut R,
    writer: &mut W,
) -> Result<PartialInput, CollectError> {
    for field in input.missing() {
        let value = prompt(field, unit, reader, writer)?;
        input.set(field, value);
    }
    Ok(input)
}

/// Asks for the name of the organization until a non-empty one is given.
/// # Error
/// Errors if `reader` ends or cannot be read
pub fn prompt_organization<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<String, CollectError> {
    loop {
        write!(writer, "Enter the name of your organization: ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(CollectError::NoOrganization);
        }
        let name = line.trim();
        if !name.is_empty() {
            return Ok(name.to_string());
        }
    }
}

/// Computes the emissions of `input`, asking again for every field `calculator` rejects
/// until all of them are valid. Corrected values are given in `unit`.
/// # Error
/// Errors if `reader` ends or cannot be read
pub fn correct<R: BufRead, W: Write>(
    calculator: &Calculator,
    mut input: UsageInput,
    unit: EfficiencyUnit,
    reader: &mut R,
    writer: &mut W,
) -> Result<EmissionResult, CollectError> {
    loop {
        let errors = match calculator.calculate(&input) {
            Ok(result) => return Ok(result),
            Err(errors) => errors,
        };
        for error in errors.errors() {
            log::warn!("Invalid input. {error}");
            writeln!(writer, "Invalid input. {error}.")?;
            let value = prompt(error.field, unit, reader, writer)?;
            error.field.set(&mut input, unit.normalize(error.field, value));
        }
    }
}
