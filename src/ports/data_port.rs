//! Market data access port trait.
//!
//! The inbound collaborator contract: implementations return bars sorted by
//! date; the core validates the series invariants before computing on them.

use crate::domain::error::ChartsmithError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ChartsmithError>;

    fn list_symbols(&self) -> Result<Vec<String>, ChartsmithError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ChartsmithError>;
}
