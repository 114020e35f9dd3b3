pub mod expense_aggregator;
pub mod rounding;
pub mod settlement_planner;

pub use expense_aggregator::{
    Aggregation, AggregationError, AggregationOptions, ExpenseAggregator, OrphanPolicy,
};
pub use rounding::RoundingMode;
pub use settlement_planner::SettlementPlanner;
