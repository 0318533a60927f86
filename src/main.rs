use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use simple_logger::SimpleLogger;

use footprint::collect::{self, CollectError, EfficiencyUnit, PartialInput};
use footprint::report::{self, Format, Metadata};
use footprint::Calculator;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum Unit {
    /// Kilometers travelled per liter of fuel
    KmPerLiter,
    /// Liters of fuel per 100 kilometers travelled
    #[value(name = "liters-per-100km")]
    LitersPer100Km,
}

impl From<Unit> for EfficiencyUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::KmPerLiter => EfficiencyUnit::KmPerLiter,
            Unit::LitersPer100Km => EfficiencyUnit::LitersPer100Km,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum ReportFormat {
    Markdown,
    Json,
    Csv,
}

impl From<ReportFormat> for Format {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Markdown => Format::Markdown,
            ReportFormat::Json => Format::Json,
            ReportFormat::Csv => Format::Csv,
        }
    }
}

const ABOUT: &'static str = r#"Computes the carbon footprint of an organization and writes a report
(by default `reports/{organization}_carbon_footprint_report.md`) with:
* a problem statement
* the CO2e emitted by energy usage, waste production and business travel
* advice to reduce emissions, targeting the largest of the three

Values can be read from a `.json` or `.csv` file (`--input`), given as arguments,
or typed in when asked. Arguments take precedence over the file.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT, allow_negative_numbers = true)]
struct Cli {
    /// The name of the organization (asked for when not given)
    #[arg(short = 'n', long)]
    organization: Option<String>,
    /// A `.json` or `.csv` file with the usage of the organization
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Electricity usage in kWh
    #[arg(long)]
    electricity_kwh: Option<f64>,
    /// Natural gas usage in units
    #[arg(long)]
    gas_units: Option<f64>,
    /// Fuel usage in liters
    #[arg(long)]
    fuel_liters: Option<f64>,
    /// Waste produced per month in kg
    #[arg(long)]
    monthly_waste_kg: Option<f64>,
    /// Share of the waste that is recycled or composted, in percentage
    #[arg(long)]
    recycling_percentage: Option<f64>,
    /// Distance travelled for business in km
    #[arg(long)]
    travel_km: Option<f64>,
    /// Fuel efficiency of the vehicles used for business travel, see `--efficiency-unit`
    #[arg(long)]
    vehicle_fuel_efficiency: Option<f64>,
    /// The unit of `--vehicle-fuel-efficiency`
    #[arg(long, value_enum, default_value_t = Unit::KmPerLiter)]
    efficiency_unit: Unit,
    /// The format of the report
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Markdown)]
    format: ReportFormat,
    /// Where to write the report
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Ask for missing or invalid values even when stdin is not a terminal
    #[arg(long)]
    interactive: bool,
    /// Log every computation step
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn values(&self) -> PartialInput {
        PartialInput {
            electricity_kwh: self.electricity_kwh,
            gas_units: self.gas_units,
            fuel_liters: self.fuel_liters,
            monthly_waste_kg: self.monthly_waste_kg,
            recycling_percentage: self.recycling_percentage,
            travel_km: self.travel_km,
            vehicle_fuel_efficiency: self.vehicle_fuel_efficiency,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()?;

    let unit = EfficiencyUnit::from(cli.efficiency_unit);
    let format = Format::from(cli.format);

    let stdin = std::io::stdin();
    let interactive = cli.interactive || stdin.is_terminal();
    let mut reader = stdin.lock();
    let mut writer = std::io::stdout();

    let organization = match (cli.organization.clone(), interactive) {
        (Some(organization), _) => organization,
        (None, true) => collect::prompt_organization(&mut reader, &mut writer)?,
        (None, false) => return Err(CollectError::NoOrganization.into()),
    };

    let file = cli
        .input
        .as_deref()
        .map(PartialInput::from_path)
        .transpose()?
        .unwrap_or_default();
    let mut values = file.merge(cli.values());
    if interactive {
        values = collect::fill_missing(values, unit, &mut reader, &mut writer)?;
    }
    let input = values.complete(unit)?;

    let calculator = Calculator::default();
    let result = if interactive {
        collect::correct(&calculator, input, unit, &mut reader, &mut writer)?
    } else {
        calculator.calculate(&input)?
    };
    log::info!(
        "Emissions: {:.2} kg CO2e (energy {:.2}, waste {:.2}, travel {:.2})",
        result.total_emissions(),
        result.energy_emissions(),
        result.waste_emissions(),
        result.travel_emissions()
    );

    let path = cli
        .output
        .unwrap_or_else(|| report::default_path(&organization, format));
    let metadata = Metadata {
        organization,
        date: time::OffsetDateTime::now_utc().date(),
        factors: *calculator.factors(),
    };

    let rendered = report::render(&result, &metadata, format)?;
    report::write(&path, &rendered)?;

    Ok(())
}
