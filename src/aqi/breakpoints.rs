//! EPA concentration-to-index breakpoints.
//!
//! Gas concentrations arrive in µg/m³ and are converted to the volumetric unit
//! the EPA publishes their bands in (ppb, or ppm for CO) before lookup. Values
//! above the last band clamp to the pollutant's ceiling.

use crate::reading::Pollutant;

/// One linear segment mapping a concentration range onto an index range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub conc_low: f64,
    pub conc_high: f64,
    pub index_low: u16,
    pub index_high: u16,
}

const fn band(conc_low: f64, conc_high: f64, index_low: u16, index_high: u16) -> Band {
    Band {
        conc_low,
        conc_high,
        index_low,
        index_high,
    }
}

/// Breakpoints for a single pollutant.
#[derive(Debug)]
pub struct BreakpointTable {
    pub pollutant: Pollutant,
    /// Multiplier from µg/m³ to the unit the bands are expressed in.
    pub unit_factor: f64,
    /// Contiguous bands in ascending order.
    pub bands: &'static [Band],
    /// Index returned for concentrations above the last band.
    pub ceiling: u16,
}

impl BreakpointTable {
    /// Converts a µg/m³ concentration into this table's unit.
    pub fn to_table_units(&self, concentration: f64) -> f64 {
        concentration * self.unit_factor
    }
}

// PM2.5, 24-hour average, µg/m³
const PM25_BANDS: [Band; 7] = [
    band(0.0, 12.0, 0, 50),
    band(12.1, 35.4, 51, 100),
    band(35.5, 55.4, 101, 150),
    band(55.5, 150.4, 151, 200),
    band(150.5, 250.4, 201, 300),
    band(250.5, 350.4, 301, 400),
    band(350.5, 500.4, 401, 500),
];

// PM10, 24-hour average, µg/m³
const PM10_BANDS: [Band; 7] = [
    band(0.0, 54.0, 0, 50),
    band(55.0, 154.0, 51, 100),
    band(155.0, 254.0, 101, 150),
    band(255.0, 354.0, 151, 200),
    band(355.0, 424.0, 201, 300),
    band(425.0, 504.0, 301, 400),
    band(505.0, 604.0, 401, 500),
];

// NO2, 1-hour average, ppb
const NO2_BANDS: [Band; 7] = [
    band(0.0, 53.0, 0, 50),
    band(54.0, 100.0, 51, 100),
    band(101.0, 360.0, 101, 150),
    band(361.0, 649.0, 151, 200),
    band(650.0, 1249.0, 201, 300),
    band(1250.0, 1649.0, 301, 400),
    band(1650.0, 2049.0, 401, 500),
];

// O3, 8-hour average, ppb. No 8-hour band exists above 300.
const O3_BANDS: [Band; 5] = [
    band(0.0, 54.0, 0, 50),
    band(55.0, 70.0, 51, 100),
    band(71.0, 85.0, 101, 150),
    band(86.0, 105.0, 151, 200),
    band(106.0, 200.0, 201, 300),
];

// SO2, 1-hour average, ppb
const SO2_BANDS: [Band; 7] = [
    band(0.0, 35.0, 0, 50),
    band(36.0, 75.0, 51, 100),
    band(76.0, 185.0, 101, 150),
    band(186.0, 304.0, 151, 200),
    band(305.0, 604.0, 201, 300),
    band(605.0, 804.0, 301, 400),
    band(805.0, 1004.0, 401, 500),
];

// CO, 8-hour average, ppm
const CO_BANDS: [Band; 7] = [
    band(0.0, 4.4, 0, 50),
    band(4.5, 9.4, 51, 100),
    band(9.5, 12.4, 101, 150),
    band(12.5, 15.4, 151, 200),
    band(15.5, 30.4, 201, 300),
    band(30.5, 40.4, 301, 400),
    band(40.5, 50.4, 401, 500),
];

static PM25: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Pm25,
    unit_factor: 1.0,
    bands: &PM25_BANDS,
    ceiling: 500,
};

static PM10: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Pm10,
    unit_factor: 1.0,
    bands: &PM10_BANDS,
    ceiling: 500,
};

static NO2: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::No2,
    unit_factor: 0.5319,
    bands: &NO2_BANDS,
    ceiling: 500,
};

static O3: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::O3,
    unit_factor: 0.5087,
    bands: &O3_BANDS,
    ceiling: 300,
};

static SO2: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::So2,
    unit_factor: 0.3817,
    bands: &SO2_BANDS,
    ceiling: 500,
};

static CO: BreakpointTable = BreakpointTable {
    pollutant: Pollutant::Co,
    unit_factor: 0.000873,
    bands: &CO_BANDS,
    ceiling: 500,
};

/// Returns the breakpoint table for `pollutant`.
pub fn table_for(pollutant: Pollutant) -> &'static BreakpointTable {
    match pollutant {
        Pollutant::Pm25 => &PM25,
        Pollutant::Pm10 => &PM10,
        Pollutant::No2 => &NO2,
        Pollutant::O3 => &O3,
        Pollutant::So2 => &SO2,
        Pollutant::Co => &CO,
    }
}
