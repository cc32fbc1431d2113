use rusqlite::{params, OptionalExtension};

use crate::db::connection::Database;
use crate::db::models::{
    CardSummary, CustomerField, CustomerSummaryRow, InvoiceForm, InvoiceTableRow, LatestInvoice,
    Revenue, User,
};
use crate::error::DataFetchError;
use crate::format::format_currency;

/// Number of rows per page in the invoices table view.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Runs one blocking piece of database work off the async runtime and maps
/// any failure to the operation's `DataFetchError`. The underlying cause is
/// logged here and goes no further.
async fn run_query<T, F>(context: &'static str, work: F) -> Result<T, DataFetchError>
where
    F: FnOnce() -> Result<T, anyhow::Error> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            log::error!("database error while fetching {}: {:?}", context, err);
            Err(DataFetchError(context))
        }
        Err(err) => {
            log::error!("query task for {} did not complete: {}", context, err);
            Err(DataFetchError(context))
        }
    }
}

/// Read operations backing the dashboard pages.
///
/// Every operation is independent: it takes the injected [`Database`]
/// handle, runs one parameterized statement (the card summary runs three
/// concurrently), reshapes the rows, and returns. Nothing here writes.
pub struct Queries;

impl Queries {
    /// Get the monthly revenue series for the chart, in store order
    pub async fn get_revenue_series(db: &Database) -> Result<Vec<Revenue>, DataFetchError> {
        let db = db.clone();
        run_query("revenue", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let mut stmt = conn.prepare("SELECT month, revenue FROM revenue")?;

            let revenue = stmt
                .query_map([], |row| {
                    Ok(Revenue {
                        month: row.get(0)?,
                        revenue: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(revenue)
        })
        .await
    }

    /// Get the 5 most recent invoices with their customer identity
    pub async fn get_latest_invoices(db: &Database) -> Result<Vec<LatestInvoice>, DataFetchError> {
        let db = db.clone();
        run_query("latest invoices", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let mut stmt = conn.prepare(
                "SELECT invoices.amount, customers.name, customers.image_url, customers.email, invoices.id
                 FROM invoices
                 JOIN customers ON invoices.customer_id = customers.id
                 ORDER BY invoices.date DESC
                 LIMIT 5",
            )?;

            let invoices = stmt
                .query_map([], |row| {
                    Ok(LatestInvoice {
                        amount: format_currency(row.get(0)?),
                        name: row.get(1)?,
                        image_url: row.get(2)?,
                        email: row.get(3)?,
                        id: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(invoices)
        })
        .await
    }

    /// Get the aggregates for the dashboard summary cards.
    ///
    /// The three reads are independent and issued concurrently; the first
    /// failure aborts the whole summary.
    pub async fn get_dashboard_card_summary(db: &Database) -> Result<CardSummary, DataFetchError> {
        let invoice_count = run_query("card data", {
            let db = db.clone();
            move || {
                let conn = db.connection();
                let conn = conn.lock().unwrap();
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) AS count FROM invoices", [], |row| {
                        row.get(0)
                    })?;
                Ok(count)
            }
        });

        let customer_count = run_query("card data", {
            let db = db.clone();
            move || {
                let conn = db.connection();
                let conn = conn.lock().unwrap();
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) AS count FROM customers", [], |row| {
                        row.get(0)
                    })?;
                Ok(count)
            }
        });

        let status_totals = run_query("card data", {
            let db = db.clone();
            move || {
                let conn = db.connection();
                let conn = conn.lock().unwrap();
                // SUM over zero rows is NULL; default to 0 before formatting
                let totals: (Option<i64>, Option<i64>) = conn.query_row(
                    "SELECT
                        SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END) AS paid,
                        SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END) AS pending
                     FROM invoices",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;
                Ok(totals)
            }
        });

        let (number_of_invoices, number_of_customers, (paid, pending)) =
            tokio::try_join!(invoice_count, customer_count, status_totals)?;

        Ok(CardSummary {
            number_of_customers,
            number_of_invoices,
            total_paid_invoices: format_currency(paid.unwrap_or(0)),
            total_pending_invoices: format_currency(pending.unwrap_or(0)),
        })
    }

    /// Get one page of the invoices table, filtered by a case-insensitive
    /// substring match across customer name/email and invoice
    /// amount/date/status. Pages are 1-based.
    pub async fn search_invoices(
        db: &Database,
        query: &str,
        page: u32,
    ) -> Result<Vec<InvoiceTableRow>, DataFetchError> {
        let db = db.clone();
        let query = query.to_owned();
        let offset = (page as i64 - 1) * ITEMS_PER_PAGE;

        run_query("invoices", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let mut stmt = conn.prepare(
                "SELECT
                    invoices.id,
                    invoices.amount,
                    invoices.date,
                    invoices.status,
                    customers.name,
                    customers.email,
                    customers.image_url
                 FROM invoices
                 JOIN customers ON invoices.customer_id = customers.id
                 WHERE
                    customers.name LIKE '%' || ?1 || '%' OR
                    customers.email LIKE '%' || ?2 || '%' OR
                    invoices.amount LIKE '%' || ?3 || '%' OR
                    invoices.date LIKE '%' || ?4 || '%' OR
                    invoices.status LIKE '%' || ?5 || '%'
                 ORDER BY invoices.date DESC
                 LIMIT ?6 OFFSET ?7",
            )?;

            let invoices = stmt
                .query_map(
                    params![query, query, query, query, query, ITEMS_PER_PAGE, offset],
                    |row| {
                        Ok(InvoiceTableRow {
                            id: row.get(0)?,
                            amount: row.get(1)?,
                            date: row.get(2)?,
                            status: row.get(3)?,
                            name: row.get(4)?,
                            email: row.get(5)?,
                            image_url: row.get(6)?,
                        })
                    },
                )?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(invoices)
        })
        .await
    }

    /// Count how many pages the invoices table has for a given filter,
    /// without fetching rows. Zero matches means zero pages.
    pub async fn count_invoice_pages(db: &Database, query: &str) -> Result<i64, DataFetchError> {
        let db = db.clone();
        let query = query.to_owned();

        run_query("total number of invoices", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let count: i64 = conn.query_row(
                "SELECT COUNT(*)
                 FROM invoices
                 JOIN customers ON invoices.customer_id = customers.id
                 WHERE
                    customers.name LIKE '%' || ?1 || '%' OR
                    customers.email LIKE '%' || ?2 || '%' OR
                    invoices.amount LIKE '%' || ?3 || '%' OR
                    invoices.date LIKE '%' || ?4 || '%' OR
                    invoices.status LIKE '%' || ?5 || '%'",
                params![query, query, query, query, query],
                |row| row.get(0),
            )?;

            Ok((count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE)
        })
        .await
    }

    /// Get a single invoice for the edit form, with the amount converted
    /// from integer cents to decimal units
    pub async fn get_invoice_by_id(
        db: &Database,
        id: &str,
    ) -> Result<Option<InvoiceForm>, DataFetchError> {
        let db = db.clone();
        let id = id.to_owned();

        run_query("invoice", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let invoice = conn
                .query_row(
                    "SELECT
                        invoices.id,
                        invoices.customer_id,
                        invoices.amount,
                        invoices.status
                     FROM invoices
                     WHERE invoices.id = ?1",
                    params![id],
                    |row| {
                        Ok(InvoiceForm {
                            id: row.get(0)?,
                            customer_id: row.get(1)?,
                            amount: row.get::<_, i64>(2)? as f64 / 100.0,
                            status: row.get(3)?,
                        })
                    },
                )
                .optional()?;

            Ok(invoice)
        })
        .await
    }

    /// Get all customers as (id, name) pairs for selection inputs
    pub async fn list_customers(db: &Database) -> Result<Vec<CustomerField>, DataFetchError> {
        let db = db.clone();
        run_query("customers", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let mut stmt = conn.prepare(
                "SELECT
                    id,
                    name
                 FROM customers
                 ORDER BY name ASC",
            )?;

            let customers = stmt
                .query_map([], |row| {
                    Ok(CustomerField {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(customers)
        })
        .await
    }

    /// Get the customers table, filtered on name/email, with per-customer
    /// invoice aggregates. Customers with no invoices are included with
    /// zero totals.
    pub async fn search_customers(
        db: &Database,
        query: &str,
    ) -> Result<Vec<CustomerSummaryRow>, DataFetchError> {
        let db = db.clone();
        let query = query.to_owned();

        run_query("customer table", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let mut stmt = conn.prepare(
                "SELECT
                    customers.id,
                    customers.name,
                    customers.email,
                    customers.image_url,
                    COUNT(invoices.id) AS total_invoices,
                    SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END) AS total_pending,
                    SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END) AS total_paid
                 FROM customers
                 LEFT JOIN invoices ON customers.id = invoices.customer_id
                 WHERE
                    customers.name LIKE '%' || ?1 || '%' OR
                    customers.email LIKE '%' || ?2 || '%'
                 GROUP BY customers.id, customers.name, customers.email, customers.image_url
                 ORDER BY customers.name ASC",
            )?;

            let customers = stmt
                .query_map(params![query, query], |row| {
                    Ok(CustomerSummaryRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        image_url: row.get(3)?,
                        total_invoices: row.get(4)?,
                        total_pending: format_currency(
                            row.get::<_, Option<i64>>(5)?.unwrap_or(0),
                        ),
                        total_paid: format_currency(row.get::<_, Option<i64>>(6)?.unwrap_or(0)),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(customers)
        })
        .await
    }

    /// Look up a user by exact email, for the authentication layer
    pub async fn get_user_by_email(
        db: &Database,
        email: &str,
    ) -> Result<Option<User>, DataFetchError> {
        let db = db.clone();
        let email = email.to_owned();

        run_query("user", move || {
            let conn = db.connection();
            let conn = conn.lock().unwrap();

            let user = conn
                .query_row(
                    "SELECT id, name, email, password FROM users WHERE email = ?1",
                    params![email],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                            password: row.get(3)?,
                        })
                    },
                )
                .optional()?;

            Ok(user)
        })
        .await
    }
}
