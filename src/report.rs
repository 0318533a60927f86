use std::error::Error;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::{advice, Category, EmissionFactors, EmissionResult, Fact};

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/report_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

/// The format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
    Json,
    Csv,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Markdown => "md",
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

/// What a report is about, other than the emissions themselves
#[derive(Debug, Clone)]
pub struct Metadata {
    pub organization: String,
    pub date: time::Date,
    /// the factors the emissions were computed with
    pub factors: EmissionFactors,
}

#[derive(Serialize)]
struct Row {
    label: &'static str,
    emissions_kg: Fact<String>,
}

#[derive(Serialize)]
struct Context<'a> {
    organization: &'a str,
    date: String,
    rows: Vec<Row>,
    total_kg: String,
    advice: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    organization: &'a str,
    date: String,
    #[serde(flatten)]
    emissions: &'a EmissionResult,
    dominant: Option<Category>,
    advice: &'static [&'static str],
}

#[derive(Serialize)]
struct CsvRow<'a> {
    organization: &'a str,
    date: String,
    energy_emissions: f64,
    waste_emissions: f64,
    travel_emissions: f64,
    total_emissions: f64,
}

/// Formats kg with two decimals and thousands separators, e.g. `1,234.57`
pub fn format_kg(value: f64) -> String {
    let rounded = format!("{value:.2}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };
    match digits
        .split_once('.')
        .and_then(|(integer, decimals)| Some((integer.parse::<u64>().ok()?, decimals)))
    {
        Some((integer, decimals)) => format!(
            "{sign}{}.{decimals}",
            integer.to_formatted_string(&Locale::en)
        ),
        None => rounded,
    }
}

fn source(category: Category, f: &EmissionFactors) -> String {
    match category {
        Category::Energy => format!(
            "electricity at {} kg CO2e/kWh, natural gas at {} kg CO2e/unit and fuel at {} kg CO2e/L",
            f.electricity, f.gas, f.fuel
        ),
        Category::Waste => format!(
            "12 months of waste at {} kg CO2e/kg, excluding the share that is recycled or composted",
            f.waste
        ),
        Category::Travel => format!(
            "fuel burned over the distance travelled given the vehicles' efficiency, at {} kg CO2e/L",
            f.travel
        ),
    }
}

fn numbered(lines: &[&str]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {line}", i + 1))
        .join("\n")
}

/// Renders `result` as a markdown document
pub fn markdown(result: &EmissionResult, metadata: &Metadata) -> Result<String, Box<dyn Error>> {
    let rows = [Category::Energy, Category::Waste, Category::Travel]
        .into_iter()
        .map(|category| Row {
            label: category.label(),
            emissions_kg: Fact::new(
                format_kg(result.emissions(category)),
                source(category, &metadata.factors),
            ),
        })
        .collect();

    let context = Context {
        organization: &metadata.organization,
        date: metadata.date.to_string(),
        rows,
        total_kg: format_kg(result.total_emissions()),
        advice: numbered(advice::advice(result)),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    Ok(tt.render(TEMPLATE_NAME, &context)?)
}

/// Renders `result` as a JSON document
pub fn json(result: &EmissionResult, metadata: &Metadata) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        organization: &metadata.organization,
        date: metadata.date.to_string(),
        emissions: result,
        dominant: result.dominant(),
        advice: advice::advice(result),
    })
}

/// Renders `result` as a single-record CSV
pub fn csv(result: &EmissionResult, metadata: &Metadata) -> Result<String, Box<dyn Error>> {
    let row = CsvRow {
        organization: &metadata.organization,
        date: metadata.date.to_string(),
        energy_emissions: result.energy_emissions(),
        waste_emissions: result.waste_emissions(),
        travel_emissions: result.travel_emissions(),
        total_emissions: result.total_emissions(),
    };
    let data = super::csv::serialize(std::iter::once(row))?;
    Ok(String::from_utf8(data)?)
}

pub fn render(
    result: &EmissionResult,
    metadata: &Metadata,
    format: Format,
) -> Result<String, Box<dyn Error>> {
    match format {
        Format::Markdown => markdown(result, metadata),
        Format::Json => Ok(json(result, metadata)?),
        Format::Csv => csv(result, metadata),
    }
}

/// The path a report of `organization` is written to when none is given,
/// `reports/{organization}_carbon_footprint_report.{extension}`
pub fn default_path(organization: &str, format: Format) -> PathBuf {
    let name = organization
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();
    PathBuf::from("reports").join(format!(
        "{name}_carbon_footprint_report.{}",
        format.extension()
    ))
}

/// Writes `contents` to `path`, creating its directory if needed
pub fn write(path: &Path, contents: &str) -> Result<(), std::io::Error> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, contents)?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::date;

    fn metadata() -> Metadata {
        Metadata {
            organization: "Acme".to_string(),
            date: date!(2024 - 03 - 01),
            factors: EmissionFactors::default(),
        }
    }

    #[test]
    fn format_kg_works() {
        assert_eq!(format_kg(0.0), "0.00");
        assert_eq!(format_kg(0.05), "0.05");
        assert_eq!(format_kg(68.4), "68.40");
        assert_eq!(format_kg(1234567.891), "1,234,567.89");
        assert_eq!(format_kg(-0.5), "-0.50");
        assert_eq!(format_kg(-0.001), "-0.00");
        assert_eq!(format_kg(-1234.5), "-1,234.50");
    }

    #[test]
    fn default_path_works() {
        assert_eq!(
            default_path("Acme Inc/EU", Format::Markdown),
            PathBuf::from("reports/Acme_Inc_EU_carbon_footprint_report.md")
        );
        assert_eq!(
            default_path("acme", Format::Json),
            PathBuf::from("reports/acme_carbon_footprint_report.json")
        );
    }

    #[test]
    fn markdown_works() {
        let result = EmissionResult::new(0.05, 68.4, 231.0);
        let rendered = markdown(&result, &metadata()).unwrap();

        assert!(rendered.starts_with("# Acme Carbon Footprint Report\n"));
        assert!(rendered.contains("Report date: 2024-03-01"));
        assert!(rendered.contains("The carbon footprint of Acme directly impacts"));
        assert!(rendered.contains("| Energy Usage | 0.05 |\n"));
        assert!(rendered.contains("| Waste Production | 68.40 |\n"));
        assert!(rendered.contains("| Business Travel | 231.00 |\n"));
        assert!(rendered.contains("| **Total** | **299.45** |"));
        assert!(rendered.contains("at 2.31 kg CO2e/L"));
        assert!(rendered.contains(
            "1. Promote remote work and virtual meetings to reduce business travel.\n2. "
        ));
    }

    #[test]
    fn markdown_general_advice() {
        let result = EmissionResult::new(0.0, 0.0, 0.0);
        let rendered = markdown(&result, &metadata()).unwrap();
        assert!(rendered.contains("1. Continue to monitor"));
        assert!(rendered.contains("2. Engage employees"));
        assert!(!rendered.contains("3. "));
    }

    #[test]
    fn json_works() {
        let result = EmissionResult::new(1.0, 2.0, 3.0);
        let rendered = json(&result, &metadata()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["organization"], "Acme");
        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["total_emissions"], 6.0);
        assert_eq!(value["dominant"], "travel");
        assert_eq!(value["advice"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn csv_works() {
        let result = EmissionResult::new(1.0, 2.0, 3.5);
        let rendered = csv(&result, &metadata()).unwrap();
        assert_eq!(
            rendered,
            "organization,date,energy_emissions,waste_emissions,travel_emissions,total_emissions\nAcme,2024-03-01,1.0,2.0,3.5,6.5\n"
        );
    }
}
