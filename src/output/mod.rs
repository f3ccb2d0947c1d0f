pub mod formatter;

pub use formatter::{
    format_carbon, format_contributions, format_footprint, format_footprint_json, format_measure,
    format_plant, format_score, format_weather, percent_bar, should_use_colors,
};
