#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod expense_list_presenter;
pub mod format;
pub mod settlement_presenter;
pub mod text_table;

pub use error_presenter::format_settlement_error;
pub use expense_list_presenter::{ExpenseListPresenter, ExpenseListView, ExpenseRow};
pub use settlement_presenter::{
    BalanceRow, RowAction, SettlementPresenter, SettlementScreen, SettlementView, TransferRow,
};
