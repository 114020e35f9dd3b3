#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const CATEGORY: &str = "カテゴリ";
    pub const DATE: &str = "日付";
    pub const PAYER: &str = "支払者";
    pub const STATUS: &str = "状態";
    pub const NOTE: &str = "メモ";
    pub const ACTION: &str = "操作";
    pub const LOADING: &str = "読み込み中...";
    pub const NO_SETTLEMENT_NEEDED: &str = "精算が必要な費用はありません";
    pub const NO_EXPENSES: &str = "該当する費用はありません";
    pub const PAY: &str = "支払う";
    pub const REQUEST_PAYMENT: &str = "送金を依頼する";
    pub const SETTLED: &str = "精算済み";
    pub const UNSETTLED: &str = "未精算";
    pub const UNKNOWN_MEMBER: &str = "不明";
    pub const FOOD: &str = "食費";
    pub const RENT: &str = "家賃";
    pub const UTILITIES: &str = "光熱費";
    pub const OTHER: &str = "その他";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "精算の計算に失敗しました";
    pub const AMOUNT_OVERFLOW: &str = "金額の合計が大きすぎます";
    pub const STORE_UNAVAILABLE: &str = "データを読み込めませんでした";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const CATEGORY: &str = "Category";
    pub const DATE: &str = "Date";
    pub const PAYER: &str = "Paid by";
    pub const STATUS: &str = "Status";
    pub const NOTE: &str = "Note";
    pub const ACTION: &str = "Action";
    pub const LOADING: &str = "Loading...";
    pub const NO_SETTLEMENT_NEEDED: &str = "No expenses need settling";
    pub const NO_EXPENSES: &str = "No matching expenses";
    pub const PAY: &str = "Pay";
    pub const REQUEST_PAYMENT: &str = "Request payment";
    pub const SETTLED: &str = "Settled";
    pub const UNSETTLED: &str = "Unsettled";
    pub const UNKNOWN_MEMBER: &str = "Unknown";
    pub const FOOD: &str = "Food";
    pub const RENT: &str = "Rent";
    pub const UTILITIES: &str = "Utilities";
    pub const OTHER: &str = "Other";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "Settlement calculation failed";
    pub const AMOUNT_OVERFLOW: &str = "Expense totals are too large";
    pub const STORE_UNAVAILABLE: &str = "Could not load the expense data";
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const CATEGORY: &str = "Category";
    pub const DATE: &str = "Date";
    pub const PAYER: &str = "Paid by";
    pub const STATUS: &str = "Status";
    pub const NOTE: &str = "Note";
    pub const ACTION: &str = "Action";
    pub const LOADING: &str = "Loading...";
    pub const NO_SETTLEMENT_NEEDED: &str = "No expenses need settling";
    pub const NO_EXPENSES: &str = "No matching expenses";
    pub const PAY: &str = "Pay";
    pub const REQUEST_PAYMENT: &str = "Request payment";
    pub const SETTLED: &str = "Settled";
    pub const UNSETTLED: &str = "Unsettled";
    pub const UNKNOWN_MEMBER: &str = "Unknown";
    pub const FOOD: &str = "Food";
    pub const RENT: &str = "Rent";
    pub const UTILITIES: &str = "Utilities";
    pub const OTHER: &str = "Other";
    pub const SETTLEMENT_CALCULATION_FAILED: &str = "Settlement calculation failed";
    pub const AMOUNT_OVERFLOW: &str = "Expense totals are too large";
    pub const STORE_UNAVAILABLE: &str = "Could not load the expense data";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn orphaned_payer(payer: impl std::fmt::Display) -> String {
    format!("ペアに登録されていないメンバー '{payer}' の支払いがあります")
}

#[cfg(feature = "ja")]
pub fn negative_amount(expense: impl std::fmt::Display) -> String {
    format!("費用 '{expense}' の金額が負の値です")
}

#[cfg(feature = "ja")]
pub fn unknown_pair(pair: impl std::fmt::Display) -> String {
    format!("ペア '{pair}' にメンバーがいません")
}

#[cfg(feature = "ja")]
pub fn skipped_expenses(count: usize) -> String {
    format!("{count} 件の費用を計算から除外しました")
}

#[cfg(feature = "en")]
pub fn orphaned_payer(payer: impl std::fmt::Display) -> String {
    format!("An expense was paid by '{payer}', who is not in this pair")
}

#[cfg(feature = "en")]
pub fn negative_amount(expense: impl std::fmt::Display) -> String {
    format!("Expense '{expense}' has a negative amount")
}

#[cfg(feature = "en")]
pub fn unknown_pair(pair: impl std::fmt::Display) -> String {
    format!("Pair '{pair}' has no members")
}

#[cfg(feature = "en")]
pub fn skipped_expenses(count: usize) -> String {
    format!("{count} expense(s) were left out of the calculation")
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub fn orphaned_payer(payer: impl std::fmt::Display) -> String {
    format!("An expense was paid by '{payer}', who is not in this pair")
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub fn negative_amount(expense: impl std::fmt::Display) -> String {
    format!("Expense '{expense}' has a negative amount")
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub fn unknown_pair(pair: impl std::fmt::Display) -> String {
    format!("Pair '{pair}' has no members")
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub fn skipped_expenses(count: usize) -> String {
    format!("{count} expense(s) were left out of the calculation")
}
