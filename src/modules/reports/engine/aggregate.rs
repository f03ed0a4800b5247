// Aggregate primitives shared by every report
//
// Pure functions over already-fetched records. Empty inputs aggregate to zero.

use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::ReportClock;
use crate::modules::payments::models::Payment;

/// Number of records satisfying `predicate`
pub fn count_where<'a, T: 'a>(
    records: impl IntoIterator<Item = &'a T>,
    predicate: impl Fn(&T) -> bool,
) -> i64 {
    records.into_iter().filter(|r| predicate(*r)).count() as i64
}

/// Sum of `value` over all records
pub fn sum_by<'a, T: 'a>(
    records: impl IntoIterator<Item = &'a T>,
    value: impl Fn(&T) -> Decimal,
) -> Decimal {
    records.into_iter().map(value).sum()
}

/// Sum of `value` over records satisfying `predicate`
pub fn sum_where<'a, T: 'a>(
    records: impl IntoIterator<Item = &'a T>,
    predicate: impl Fn(&T) -> bool,
    value: impl Fn(&T) -> Decimal,
) -> Decimal {
    records
        .into_iter()
        .filter(|r| predicate(*r))
        .map(value)
        .sum()
}

/// Balance summed only where it is positive
pub fn positive_balance<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Decimal {
    sum_where(payments, |p| p.balance > Decimal::ZERO, |p| p.balance)
}

/// Count and money sums over a set of payments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentTotals {
    pub count: i64,
    pub total: Decimal,
    pub paid: Decimal,
    pub balance: Decimal,
    /// `balance` summed only where `balance > 0`
    pub outstanding: Decimal,
}

impl PaymentTotals {
    pub fn of<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Self {
        let payments: Vec<&Payment> = payments.into_iter().collect();
        let rows = || payments.iter().copied();
        PaymentTotals {
            count: payments.len() as i64,
            total: sum_by(rows(), |p| p.total),
            paid: sum_by(rows(), |p| p.paid),
            balance: sum_by(rows(), |p| p.balance),
            outstanding: positive_balance(rows()),
        }
    }
}

/// Bucket `value` into the twelve local-time months of `year`.
///
/// Index 0 is January. Records dated outside `year` are ignored and months
/// without records stay at zero.
pub fn group_by_month<'a, T: 'a, N>(
    records: impl IntoIterator<Item = &'a T>,
    date: impl Fn(&T) -> DateTime<Utc>,
    value: impl Fn(&T) -> N,
    year: i32,
    clock: &ReportClock,
) -> [N; 12]
where
    N: Copy + Default + AddAssign,
{
    let mut buckets = [N::default(); 12];
    for record in records {
        let instant = date(record);
        if clock.year_of(instant) != year {
            continue;
        }
        let month = clock.month_of(instant) as usize;
        buckets[month - 1] += value(record);
    }
    buckets
}
