/// Tonnes of CO2 absorbed per tree per year
pub const TREE_TONNES_PER_YEAR: f64 = 0.022;

/// Tonnes of CO2 absorbed per square metre of healthy soil per year
pub const SOIL_TONNES_PER_M2_YEAR: f64 = 0.0004;

/// Largest values the dashboard sliders go up to
pub const MAX_TREES: u32 = 1000;
pub const MAX_SOIL_M2: u32 = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarbonInputs {
    pub trees: u32,
    pub soil_m2: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonEstimate {
    pub tonnes_per_year: f64,
}

impl CarbonInputs {
    pub fn estimate(&self) -> CarbonEstimate {
        CarbonEstimate {
            tonnes_per_year: self.trees as f64 * TREE_TONNES_PER_YEAR
                + self.soil_m2 as f64 * SOIL_TONNES_PER_M2_YEAR,
        }
    }

    /// Adjust the tree count by `delta`, clamped to `0..=MAX_TREES`
    pub fn step_trees(&mut self, delta: i64) {
        self.trees = step(self.trees, delta, MAX_TREES);
    }

    /// Adjust the soil area by `delta`, clamped to `0..=MAX_SOIL_M2`
    pub fn step_soil(&mut self, delta: i64) {
        self.soil_m2 = step(self.soil_m2, delta, MAX_SOIL_M2);
    }
}

fn step(value: u32, delta: i64, max: u32) -> u32 {
    (value as i64 + delta).clamp(0, max as i64) as u32
}

impl std::fmt::Display for CarbonEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.tonnes_per_year)
    }
}
