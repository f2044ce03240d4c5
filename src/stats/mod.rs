//! Stats module - summary arithmetic over the sample

mod calculator;

pub use calculator::{
    Bin, HealthBand, SummaryCalculator, SummaryError, Totals, BYTES_PER_KB,
};
