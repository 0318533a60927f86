use crate::{Category, EmissionResult};

static ENERGY: [&str; 3] = [
    "Reduce energy consumption by implementing energy-efficient practices and using renewable energy sources.",
    "Encourage the use of energy-saving devices and appliances.",
    "Conduct energy audits to identify areas for improvement.",
];

static WASTE: [&str; 3] = [
    "Implement a comprehensive recycling program to reduce waste production.",
    "Educate employees about waste reduction and proper recycling techniques.",
    "Explore opportunities to compost organic waste.",
];

static TRAVEL: [&str; 3] = [
    "Promote remote work and virtual meetings to reduce business travel.",
    "Encourage the use of public transportation, carpooling, and biking.",
    "Invest in fuel-efficient or electric vehicles for business travel.",
];

static GENERAL: [&str; 2] = [
    "Continue to monitor and optimize energy usage, waste production, and business travel.",
    "Engage employees in sustainability initiatives and create a culture of environmental responsibility.",
];

/// Returns advice to reduce emissions, targeting the [`EmissionResult::dominant`] category
/// or general advice when no category dominates.
pub fn advice(result: &EmissionResult) -> &'static [&'static str] {
    match result.dominant() {
        Some(Category::Energy) => &ENERGY,
        Some(Category::Waste) => &WASTE,
        Some(Category::Travel) => &TRAVEL,
        None => &GENERAL,
    }
}
