#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod feed;
pub mod model;
pub mod ports;
pub mod settlement_processor;

pub use error::{FailureKind, SettlementError, StoreError};
pub use feed::{LatestSettlement, SettlementFeed, SettlementUpdate};
pub use model::{
    Category, ExpenseQuery, ExpenseRecord, MemberBalance, NewExpense, PairId, PairSnapshot,
    StatusFilter, YearMonth, YearMonthParseError,
};
pub use ports::{ExpenseStore, MemberDirectory};
pub use settlement_processor::{SettlementProcessor, SettlementResult};
