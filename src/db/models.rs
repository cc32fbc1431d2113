// Data models
use serde::{Deserialize, Serialize};

/// Account row looked up by the authentication layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Precomputed monthly revenue, read verbatim for the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: i64,
}

/// Dashboard "latest invoices" entry; amount is already currency-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
}

/// Invoice joined with customer identity for the invoices table.
/// Amount stays in integer cents so the view can format it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTableRow {
    pub id: String,
    pub amount: i64,
    pub date: String,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Single invoice as loaded into the edit form; amount converted from
/// cents to decimal units, not formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: String,
}

/// (id, name) pair for customer selection inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// Customer row with per-customer invoice aggregates; the pending and
/// paid totals are currency-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSummaryRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

/// Aggregates for the dashboard summary cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}
