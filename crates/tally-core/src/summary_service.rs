//! Dashboard flow: fetch one month of expenses and aggregate them.

use tally_domain::{MonthlySummary, YearMonth};
use tracing::{debug, warn};

use crate::{aggregate, CoreResult, FinanceApi};

pub struct SummaryService;

impl SummaryService {
    /// Fetches the expenses of `period` and summarises them.
    ///
    /// The month endpoint owns the scoping; every expense it returns counts.
    pub async fn for_month(api: &dyn FinanceApi, period: YearMonth) -> CoreResult<MonthlySummary> {
        let expenses = api.list_expenses_for_month(period).await.map_err(|err| {
            warn!(%period, error = %err, "monthly summary fetch failed");
            err
        })?;
        debug!(%period, count = expenses.len(), "aggregating monthly expenses");
        Ok(aggregate(&expenses))
    }
}
