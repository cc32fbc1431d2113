// Finboard - dashboard data-access layer
// Module declarations
pub mod db;
pub mod error;
pub mod format;

pub use db::connection::Database;
pub use db::models::{
    CardSummary, CustomerField, CustomerSummaryRow, InvoiceForm, InvoiceTableRow, LatestInvoice,
    Revenue, User,
};
pub use db::queries::{Queries, ITEMS_PER_PAGE};
pub use error::DataFetchError;
pub use format::format_currency;
