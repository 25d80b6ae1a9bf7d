//! Pollutant-to-AQI conversion.
//!
//! [`breakpoints`] holds the EPA band tables, [`convert`] interpolates a
//! concentration within them and reduces a reading's six sub-indices to one
//! overall AQI, and [`category`] names the health band an AQI falls in.

pub mod breakpoints;
pub mod category;
pub mod convert;

pub use category::AqiCategory;
pub use convert::{
    AqiBreakdown, SubIndex, overall_aqi, pollutant_to_sub_index, reading_aqi, usable_aqi,
};
