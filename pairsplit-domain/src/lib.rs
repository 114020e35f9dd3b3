#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Expense, ExpenseId, Member, MemberBalances, MemberId, Money, Roster, RosterError, Transfer,
};
pub use services::{
    Aggregation, AggregationError, AggregationOptions, ExpenseAggregator, OrphanPolicy,
    RoundingMode, SettlementPlanner,
};
