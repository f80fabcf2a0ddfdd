//! Configuration validation.
//!
//! Validates all chart config fields before any data is loaded.

use crate::domain::error::ChartsmithError;
use crate::domain::selection::overlay_indicator;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_chart_config(config: &dyn ConfigPort) -> Result<(), ChartsmithError> {
    validate_csv_dir(config)?;
    validate_symbol(config)?;
    validate_dates(config)?;
    validate_selections(config)?;
    validate_volatility(config)?;
    Ok(())
}

fn validate_csv_dir(config: &dyn ConfigPort) -> Result<(), ChartsmithError> {
    match config.get_string("data", "csv_dir") {
        Some(dir) if !dir.trim().is_empty() => Ok(()),
        _ => Err(ChartsmithError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        }),
    }
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), ChartsmithError> {
    match config.get_string("data", "symbol") {
        Some(symbol) if !symbol.trim().is_empty() => Ok(()),
        _ => Err(ChartsmithError::ConfigMissing {
            section: "data".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), ChartsmithError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;

    if start >= end {
        return Err(ChartsmithError::ConfigInvalid {
            section: "data".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, ChartsmithError> {
    let value = config
        .get_string("data", key)
        .ok_or_else(|| ChartsmithError::ConfigMissing {
            section: "data".to_string(),
            key: key.to_string(),
        })?;

    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| ChartsmithError::ConfigInvalid {
        section: "data".to_string(),
        key: key.to_string(),
        reason: format!("expected YYYY-MM-DD, got '{}': {}", value, e),
    })
}

fn validate_selections(config: &dyn ConfigPort) -> Result<(), ChartsmithError> {
    for name in config.get_list("chart", "indicators") {
        if overlay_indicator(&name).is_none() {
            return Err(ChartsmithError::ConfigInvalid {
                section: "chart".to_string(),
                key: "indicators".to_string(),
                reason: format!("unrecognized indicator name '{}'", name),
            });
        }
    }
    Ok(())
}

fn validate_volatility(config: &dyn ConfigPort) -> Result<(), ChartsmithError> {
    if config.get_string("chart", "implied_volatility").is_none() {
        return Ok(());
    }
    let value = config.get_double("chart", "implied_volatility", -1.0);
    if value < 0.0 {
        return Err(ChartsmithError::ConfigInvalid {
            section: "chart".to_string(),
            key: "implied_volatility".to_string(),
            reason: "implied_volatility must be a non-negative number".to_string(),
        });
    }
    Ok(())
}
