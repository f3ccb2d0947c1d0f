use clap::ValueEnum;
use serde::Serialize;

/// Houseplants with air-quality notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plant {
    /// Snake plant
    Snake,
    /// Areca palm
    Areca,
    /// Spider plant
    Spider,
    /// Peace lily
    Peace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlantStats {
    pub co2_absorption: &'static str,
    pub oxygen_output: &'static str,
    pub best_room: &'static str,
}

impl Plant {
    pub const ALL: [Plant; 4] = [Plant::Snake, Plant::Areca, Plant::Spider, Plant::Peace];

    pub fn name(&self) -> &'static str {
        match self {
            Plant::Snake => "Snake Plant",
            Plant::Areca => "Areca Palm",
            Plant::Spider => "Spider Plant",
            Plant::Peace => "Peace Lily",
        }
    }

    pub fn stats(&self) -> PlantStats {
        match self {
            Plant::Snake => PlantStats {
                co2_absorption: "0.02 g/hr (Night)",
                oxygen_output: "High (Night)",
                best_room: "Bedrooms",
            },
            Plant::Areca => PlantStats {
                co2_absorption: "0.05 g/hr (Day)",
                oxygen_output: "Very High",
                best_room: "Living Room",
            },
            Plant::Spider => PlantStats {
                co2_absorption: "0.01 g/hr",
                oxygen_output: "Moderate",
                best_room: "Workspace",
            },
            Plant::Peace => PlantStats {
                co2_absorption: "0.03 g/hr",
                oxygen_output: "Moderate",
                best_room: "Bathrooms",
            },
        }
    }

    /// Next plant in [`Plant::ALL`], wrapping around
    pub fn next(&self) -> Plant {
        let i = Plant::ALL.iter().position(|p| p == self).unwrap_or(0);
        Plant::ALL[(i + 1) % Plant::ALL.len()]
    }

    pub fn previous(&self) -> Plant {
        let i = Plant::ALL.iter().position(|p| p == self).unwrap_or(0);
        Plant::ALL[(i + Plant::ALL.len() - 1) % Plant::ALL.len()]
    }
}
