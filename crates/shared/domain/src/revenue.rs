//! Monthly revenue from new members, bucketed by join month.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::{REVENUE_WINDOW_LONG_MONTHS, REVENUE_WINDOW_SHORT_MONTHS};
use crate::error::DomainError;
use crate::member::MemberProfile;
use crate::plan::PlanCatalog;

/// Chart window ending at the current month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevenueWindow {
    #[default]
    SixMonths,
    TwelveMonths,
}

impl RevenueWindow {
    pub fn months(&self) -> u32 {
        match self {
            RevenueWindow::SixMonths => REVENUE_WINDOW_SHORT_MONTHS,
            RevenueWindow::TwelveMonths => REVENUE_WINDOW_LONG_MONTHS,
        }
    }

    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            REVENUE_WINDOW_SHORT_MONTHS => Some(RevenueWindow::SixMonths),
            REVENUE_WINDOW_LONG_MONTHS => Some(RevenueWindow::TwelveMonths),
            _ => None,
        }
    }
}

impl std::str::FromStr for RevenueWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6M" | "6m" | "6" => Ok(RevenueWindow::SixMonths),
            "1Y" | "1y" | "12" => Ok(RevenueWindow::TwelveMonths),
            other => Err(DomainError::validation(format!(
                "Unknown revenue window '{}' (expected 6M or 1Y)",
                other
            ))),
        }
    }
}

/// Revenue of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// Short month name, e.g. "Mar"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub revenue: Decimal,
}

/// Sum of plan prices for members who joined in `year`/`month`.
///
/// Members on an unknown plan contribute zero.
pub fn revenue_for_month(members: &[MemberProfile], plans: &PlanCatalog<'_>, year: i32, month: u32) -> Decimal {
    members
        .iter()
        .filter(|m| {
            let joined = m.join_day();
            joined.year() == year && joined.month() == month
        })
        .map(|m| plans.price_or_zero(&m.plan))
        .sum()
}

/// Revenue of the month containing `today`.
pub fn current_month_revenue(members: &[MemberProfile], plans: &PlanCatalog<'_>, today: NaiveDate) -> Decimal {
    revenue_for_month(members, plans, today.year(), today.month())
}

/// One entry per month of `window`, oldest first, ending with the month of `today`.
pub fn aggregate_revenue(
    members: &[MemberProfile],
    plans: &PlanCatalog<'_>,
    window: RevenueWindow,
    today: NaiveDate,
) -> Vec<MonthlyRevenue> {
    let Some(this_month) = today.with_day(1) else {
        return Vec::new();
    };

    (0..window.months())
        .rev()
        .filter_map(|back| this_month.checked_sub_months(Months::new(back)))
        .map(|first| MonthlyRevenue {
            label: first.format("%b").to_string(),
            year: first.year(),
            month: first.month(),
            revenue: revenue_for_month(members, plans, first.year(), first.month()),
        })
        .collect()
}
