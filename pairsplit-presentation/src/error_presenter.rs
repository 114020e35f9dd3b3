use pairsplit_application::{SettlementError, StoreError};
use pairsplit_domain::AggregationError;
use pairsplit_i18n as i18n;

pub fn format_settlement_error(error: &SettlementError) -> String {
    let detail = match error {
        SettlementError::Aggregation(AggregationError::OrphanedPayer { payer, .. }) => {
            i18n::orphaned_payer(payer)
        }
        SettlementError::Aggregation(AggregationError::NegativeAmount { expense, .. }) => {
            i18n::negative_amount(expense)
        }
        SettlementError::Aggregation(AggregationError::AmountOverflow) => {
            i18n::AMOUNT_OVERFLOW.to_string()
        }
        SettlementError::Store(StoreError::UnknownPair(pair_id)) => i18n::unknown_pair(pair_id),
        SettlementError::Store(_) => i18n::STORE_UNAVAILABLE.to_string(),
    };
    format!("{}: {detail}", i18n::SETTLEMENT_CALCULATION_FAILED)
}
