pub mod budgets;
pub mod categories;
pub mod convert;
pub mod dashboard;
pub mod setup;
pub mod transactions;
pub mod ui;
