// ReportService
// Report Builder: dashboard KPIs, balance-due, sales and trend charts. Each
// public entry point captures one clock and every relative-date comparison in
// that report uses it.

use chrono::{Duration, FixedOffset};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::{ReportClock, Result};
use crate::modules::enquiries::models::LeadType;
use crate::modules::enquiries::repositories::EnquiryQuery;
use crate::modules::follow_ups::repositories::FollowUpQuery;
use crate::modules::members::models::MemberStatus;
use crate::modules::members::repositories::MemberQuery;
use crate::modules::payments::repositories::PaymentQuery;
use crate::modules::reports::engine::{
    count_where, group_by_month, join_follow_ups, join_payments, sum_where, FollowUpWithMember,
    PaymentTotals,
};
use crate::modules::reports::filters::{
    BalanceDueParams, DateRange, RecentFollowUpParams, SalesParams, RECENT_FOLLOW_UP_CAP,
};
use crate::modules::reports::models::{
    AmountCount, BalanceDueReport, BalanceDueRow, BalanceDueSummary, BalanceStats, ChartData,
    DashboardStats, DueStatus, LeadTypeBreakdown, MemberSeries, MemberStats, ModeBreakdown,
    RevenueSeries, SalesReport, SalesStats, SalesSummary, MONTH_LABELS, UPCOMING_DAYS,
};
use crate::store::EntityStore;

/// Days covered by the dashboard's "fresh sales" figure
const FRESH_SALES_DAYS: i64 = 30;

/// Service for read-only reports over the entity store
pub struct ReportService {
    store: EntityStore,
    offset: FixedOffset,
}

impl ReportService {
    /// Create a report service for a gym in the given UTC offset
    pub fn new(store: EntityStore, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    /// Fresh clock in the gym's offset
    pub fn clock(&self) -> ReportClock {
        ReportClock::capture(self.offset)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        self.dashboard_at(&self.clock()).await
    }

    /// Dashboard KPIs as of `clock`.
    ///
    /// Sales figures use invoice `total`; the balance figures sum `paid` and
    /// `balance` over every invoice.
    pub async fn dashboard_at(&self, clock: &ReportClock) -> Result<DashboardStats> {
        let now = clock.now();
        let renewal_window = DateRange::new(now, clock.days_ahead(UPCOMING_DAYS))?;
        let fresh_window = DateRange::new(clock.days_ago(FRESH_SALES_DAYS), now)?;

        let members = &self.store.members;
        let payments = &self.store.payments;

        let all_members = MemberQuery::default();
        let active_members = MemberQuery::with_status(MemberStatus::Active);
        let renewing = MemberQuery {
            expiry: Some(renewal_window),
            ..Default::default()
        };
        let all_payments = PaymentQuery::default();
        let fresh_payments = PaymentQuery {
            created: Some(fresh_window),
            ..Default::default()
        };
        let pending = FollowUpQuery::pending();

        let (total, active, upcoming_renewals, all_sales, fresh_sales, pending_follow_ups) = tokio::try_join!(
            members.count(&all_members),
            members.count(&active_members),
            members.count(&renewing),
            payments.totals(&all_payments),
            payments.totals(&fresh_payments),
            self.store.follow_ups.count(&pending),
        )?;

        let stats = DashboardStats {
            generated_at: now,
            members: MemberStats {
                total,
                active,
                upcoming_renewals,
            },
            sales: SalesStats {
                total: AmountCount {
                    amount: all_sales.total,
                    count: all_sales.count,
                },
                fresh: AmountCount {
                    amount: fresh_sales.total,
                    count: fresh_sales.count,
                },
            },
            balance: BalanceStats {
                paid: all_sales.paid,
                due: all_sales.balance,
            },
            pending_follow_ups,
        };

        debug!(
            members = total,
            invoices = all_sales.count,
            pending_follow_ups,
            "Dashboard computed"
        );
        Ok(stats)
    }

    /// Dashboard widget: the five pending follow-ups due soonest
    pub async fn recent_follow_ups(
        &self,
        params: &RecentFollowUpParams,
    ) -> Result<Vec<FollowUpWithMember>> {
        let resolved = params.resolve()?;
        let follow_ups = self.store.follow_ups.list(&resolved.query).await?;
        let mut joined = join_follow_ups(&self.store, follow_ups).await?;

        if let Some(term) = &resolved.search {
            joined.retain(|f| term.matches_follow_up(f));
        }
        joined.truncate(RECENT_FOLLOW_UP_CAP);
        Ok(joined)
    }

    pub async fn balance_due(&self, params: &BalanceDueParams) -> Result<BalanceDueReport> {
        self.balance_due_at(params, &self.clock()).await
    }

    /// Outstanding payments, earliest due first.
    ///
    /// Overdue and upcoming figures cover every row matching the search; the
    /// listed figures cover only the rows left after the `due` window.
    ///
    /// # Errors
    /// `Validation` for an unknown `due` value or over-long search, before
    /// the store is read.
    pub async fn balance_due_at(
        &self,
        params: &BalanceDueParams,
        clock: &ReportClock,
    ) -> Result<BalanceDueReport> {
        let filter = params.resolve()?;

        let payments = self.store.payments.list(&filter.query).await?;
        let mut joined = join_payments(&self.store, payments).await?;
        if let Some(term) = &filter.search {
            joined.retain(|p| term.matches_payment_member(p));
        }

        let classified: Vec<BalanceDueRow> = joined
            .into_iter()
            .map(|record| BalanceDueRow {
                due_status: DueStatus::classify(record.payment.due_date, clock),
                record,
            })
            .collect();

        let is = |status: DueStatus| move |row: &BalanceDueRow| row.due_status == status;
        let balance = |row: &BalanceDueRow| row.record.payment.balance;

        let overdue_count = count_where(&classified, is(DueStatus::Overdue));
        let overdue_amount = sum_where(&classified, is(DueStatus::Overdue), balance);
        let upcoming_count = count_where(&classified, is(DueStatus::Upcoming));
        let upcoming_amount = sum_where(&classified, is(DueStatus::Upcoming), balance);

        let listed: Vec<BalanceDueRow> = classified
            .into_iter()
            .filter(|row| filter.window.admits(row.due_status))
            .collect();

        let summary = BalanceDueSummary {
            listed_count: listed.len() as i64,
            listed_amount: listed.iter().map(balance).sum(),
            overdue_count,
            overdue_amount,
            upcoming_count,
            upcoming_amount,
        };

        info!(
            listed = summary.listed_count,
            amount = %summary.listed_amount,
            overdue = overdue_count,
            upcoming = upcoming_count,
            "Balance-due report generated"
        );

        Ok(BalanceDueReport {
            generated_at: clock.now(),
            payments: listed,
            summary,
        })
    }

    pub async fn sales(&self, params: &SalesParams) -> Result<SalesReport> {
        self.sales_at(params, &self.clock()).await
    }

    /// Invoices in the window, newest first.
    ///
    /// The per-mode breakdown is taken before the mode filter so every card
    /// stays populated; the summary covers only the listed rows.
    pub async fn sales_at(&self, params: &SalesParams, clock: &ReportClock) -> Result<SalesReport> {
        let filter = params.resolve(clock)?;

        let payments = self.store.payments.list(&filter.query).await?;
        let mut joined = join_payments(&self.store, payments).await?;
        if let Some(term) = &filter.search {
            joined.retain(|p| term.matches_payment_member(p));
        }

        let by_mode = joined.iter().fold(ModeBreakdown::default(), |mut acc, p| {
            acc.add(p.payment.payment_mode, p.payment.paid);
            acc
        });

        if let Some(mode) = filter.payment_mode {
            joined.retain(|p| p.payment.payment_mode == mode);
        }

        let totals = PaymentTotals::of(joined.iter().map(|p| &p.payment));
        let summary = SalesSummary {
            invoice_count: totals.count,
            total: totals.total,
            paid: totals.paid,
            balance: totals.balance,
        };

        info!(
            invoices = summary.invoice_count,
            total = %summary.total,
            mode = ?filter.payment_mode,
            window_paid = %by_mode.total(),
            "Sales report generated"
        );

        Ok(SalesReport {
            generated_at: clock.now(),
            period: filter.period,
            payment_mode: filter.payment_mode,
            payments: joined,
            summary,
            by_mode,
        })
    }

    pub async fn charts(&self) -> Result<ChartData> {
        self.charts_at(&self.clock()).await
    }

    /// Twelve-month series for the clock's local year plus the lead-type split
    pub async fn charts_at(&self, clock: &ReportClock) -> Result<ChartData> {
        let year = clock.year();
        let (start, end) = (clock.start_of_year(), year_end(clock));
        let this_year = DateRange::new(start, end)?;

        let joined = MemberQuery {
            created: Some(this_year),
            ..Default::default()
        };
        let invoiced = PaymentQuery {
            invoice_date: Some(this_year),
            ..Default::default()
        };
        let all_enquiries = EnquiryQuery::default();

        let (members, payments, enquiries) = tokio::try_join!(
            self.store.members.list(&joined),
            self.store.payments.list(&invoiced),
            self.store.enquiries.list(&all_enquiries),
        )?;

        let members_with = |status: MemberStatus| {
            group_by_month(
                &members,
                |m| m.created_at,
                |m| i64::from(m.status == status),
                year,
                clock,
            )
        };

        let revenue = RevenueSeries {
            paid: group_by_month(&payments, |p| p.invoice_date, |p| p.paid, year, clock),
            balance: group_by_month(&payments, |p| p.invoice_date, |p| p.balance, year, clock),
            pending: group_by_month(
                &payments,
                |p| p.invoice_date,
                |p| p.balance.max(Decimal::ZERO),
                year,
                clock,
            ),
        };

        let lead = |lead_type: Option<LeadType>| count_where(&enquiries, |e| e.lead_type == lead_type);

        Ok(ChartData {
            year,
            months: MONTH_LABELS,
            members: MemberSeries {
                active: members_with(MemberStatus::Active),
                inactive: members_with(MemberStatus::Inactive),
                past: members_with(MemberStatus::Past),
            },
            revenue,
            lead_types: LeadTypeBreakdown {
                hot: lead(Some(LeadType::Hot)),
                warm: lead(Some(LeadType::Warm)),
                cold: lead(Some(LeadType::Cold)),
                unassigned: lead(None),
            },
        })
    }
}

/// Last instant of the clock's local year
fn year_end(clock: &ReportClock) -> chrono::DateTime<chrono::Utc> {
    let next_year = chrono::NaiveDate::from_ymd_opt(clock.year() + 1, 1, 1);
    match next_year {
        Some(date) => clock.day_bounds(date).0 - Duration::milliseconds(1),
        None => clock.now(),
    }
}
