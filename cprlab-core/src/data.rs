//! Candle file loading for the CLI harness and fixtures.
//!
//! Supported formats, chosen by extension:
//! - `.json`: array of `{"open", "high", "low", "close"}` objects
//! - `.csv`: header row `open,high,low,close`

use std::path::Path;
use thiserror::Error;

use crate::domain::Candle;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid candle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid candle CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported candle file extension: {0:?}")]
    UnsupportedFormat(String),

    #[error("candle {index} is not a valid OHLC candle: {candle:?}")]
    InsaneCandle { index: usize, candle: Candle },

    #[error("no candles in {0}")]
    Empty(String),
}

pub fn parse_json_candles(json: &str) -> Result<Vec<Candle>, DataError> {
    let candles: Vec<Candle> = serde_json::from_str(json)?;
    validate(&candles)?;
    Ok(candles)
}

pub fn parse_csv_candles<R: std::io::Read>(reader: R) -> Result<Vec<Candle>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let candles = rdr
        .deserialize::<Candle>()
        .collect::<Result<Vec<_>, _>>()?;
    validate(&candles)?;
    Ok(candles)
}

/// Load a non-empty candle series from a `.json` or `.csv` file.
pub fn load_candles(path: &Path) -> Result<Vec<Candle>, DataError> {
    let io_err = |source| DataError::Io {
        path: path.display().to_string(),
        source,
    };
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let candles = match extension.as_str() {
        "json" => parse_json_candles(&std::fs::read_to_string(path).map_err(io_err)?)?,
        "csv" => parse_csv_candles(std::fs::File::open(path).map_err(io_err)?)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    if candles.is_empty() {
        return Err(DataError::Empty(path.display().to_string()));
    }
    log::debug!("loaded {} candles from {}", candles.len(), path.display());
    Ok(candles)
}

fn validate(candles: &[Candle]) -> Result<(), DataError> {
    match candles.iter().position(|c| !c.is_sane()) {
        Some(index) => Err(DataError::InsaneCandle {
            index,
            candle: candles[index],
        }),
        None => Ok(()),
    }
}
