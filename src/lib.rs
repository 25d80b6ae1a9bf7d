pub mod analyzers;
pub mod aqi;
pub mod config;
pub mod output;
pub mod parser;
pub mod reading;
