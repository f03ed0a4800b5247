// CSV rendering of list pages and reports
//
// Headers are fixed per export. Dates are local `dd/mm/yyyy`; a reference
// that did not resolve renders as `-`.

use chrono::{DateTime, Utc};
use csv::Writer;

use crate::core::{AppError, ReportClock, Result};
use crate::modules::members::models::Member;
use crate::modules::reports::engine::PaymentWithRefs;
use crate::modules::reports::models::{BalanceDueReport, SalesReport};

const MISSING: &str = "-";

const MEMBER_HEADERS: [&str; 9] = [
    "Client ID",
    "Name",
    "Phone",
    "Email",
    "Gender",
    "Status",
    "Joining Date",
    "Expiry Date",
    "Address",
];

const PAYMENT_HEADERS: [&str; 12] = [
    "Invoice No",
    "Invoice Date",
    "Client ID",
    "Member",
    "Phone",
    "Package",
    "Total",
    "Discount",
    "Paid",
    "Balance",
    "Mode",
    "Status",
];

const BALANCE_DUE_HEADERS: [&str; 8] = [
    "Invoice No",
    "Client ID",
    "Member",
    "Phone",
    "Package",
    "Balance",
    "Due Date",
    "Due Status",
];

pub fn members_csv(members: &[Member], clock: &ReportClock) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(MEMBER_HEADERS)?;

    for member in members {
        let joined = clock.format_date(member.joining_date);
        let expiry = date_or_missing(member.expiry_date, clock);
        writer.write_record([
            member.client_id.as_str(),
            member.name.as_str(),
            member.phone.as_str(),
            member.email.as_deref().unwrap_or(MISSING),
            member.gender.as_str(),
            member.status.as_str(),
            joined.as_str(),
            expiry.as_str(),
            member.address.as_deref().unwrap_or(MISSING),
        ])?;
    }

    finish(writer)
}

pub fn payments_csv(payments: &[PaymentWithRefs], clock: &ReportClock) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(PAYMENT_HEADERS)?;

    for record in payments {
        write_payment(&mut writer, record, clock)?;
    }

    finish(writer)
}

/// Listed rows only; the summary stays in the JSON report
pub fn balance_due_csv(report: &BalanceDueReport, clock: &ReportClock) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(BALANCE_DUE_HEADERS)?;

    for row in &report.payments {
        let payment = &row.record.payment;
        let member = row.record.member.as_ref();
        let balance = payment.balance.to_string();
        let due = date_or_missing(payment.due_date, clock);
        writer.write_record([
            payment.invoice_number.as_str(),
            member.map_or(MISSING, |m| m.client_id.as_str()),
            member.map_or(MISSING, |m| m.name.as_str()),
            member.map_or(MISSING, |m| m.phone.as_str()),
            package_name(&row.record),
            balance.as_str(),
            due.as_str(),
            row.due_status.as_str(),
        ])?;
    }

    finish(writer)
}

/// Sales rows followed by a totals line
pub fn sales_csv(report: &SalesReport, clock: &ReportClock) -> Result<String> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(PAYMENT_HEADERS)?;

    for record in &report.payments {
        write_payment(&mut writer, record, clock)?;
    }

    let summary = &report.summary;
    writer.write_record([
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("{} invoices", summary.invoice_count),
        summary.total.to_string(),
        String::new(),
        summary.paid.to_string(),
        summary.balance.to_string(),
        String::new(),
        String::new(),
    ])?;

    finish(writer)
}

fn write_payment(
    writer: &mut Writer<Vec<u8>>,
    record: &PaymentWithRefs,
    clock: &ReportClock,
) -> Result<()> {
    let payment = &record.payment;
    let member = record.member.as_ref();
    let invoice_date = clock.format_date(payment.invoice_date);
    let amounts = [payment.total, payment.discount, payment.paid, payment.balance]
        .map(|amount| amount.to_string());
    writer.write_record([
        payment.invoice_number.as_str(),
        invoice_date.as_str(),
        member.map_or(MISSING, |m| m.client_id.as_str()),
        member.map_or(MISSING, |m| m.name.as_str()),
        member.map_or(MISSING, |m| m.phone.as_str()),
        package_name(record),
        amounts[0].as_str(),
        amounts[1].as_str(),
        amounts[2].as_str(),
        amounts[3].as_str(),
        payment.payment_mode.as_str(),
        payment.status.as_str(),
    ])?;
    Ok(())
}

fn package_name(record: &PaymentWithRefs) -> &str {
    record
        .membership
        .as_ref()
        .map_or(MISSING, |m| m.package_name.as_str())
}

fn date_or_missing(instant: Option<DateTime<Utc>>, clock: &ReportClock) -> String {
    instant.map_or_else(|| MISSING.to_string(), |d| clock.format_date(d))
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV is not UTF-8: {}", e)))
}
