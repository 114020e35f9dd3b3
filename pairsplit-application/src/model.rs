use chrono::{Datelike, NaiveDate};
use pairsplit_domain::{Expense, ExpenseId, MemberId, Money, Roster};
use smol_str::SmolStr;
use std::{fmt, str::FromStr};

/// Pair code shared by the members of one household.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairId(SmolStr);

impl PairId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PairId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Rent,
    Utilities,
    #[default]
    Other,
}

/// An expense as the document store keeps it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub pair_id: PairId,
    pub payer: MemberId,
    pub amount: Money,
    pub category: Category,
    pub note: Option<String>,
    pub date: NaiveDate,
    pub settled: bool,
}

impl ExpenseRecord {
    pub fn to_expense(&self) -> Expense {
        Expense {
            id: self.id.clone(),
            payer: self.payer.clone(),
            amount: self.amount,
            settled: self.settled,
        }
    }
}

/// Input of the "new expense" form. New expenses always start unsettled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub payer: MemberId,
    pub amount: Money,
    pub category: Category,
    pub note: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YearMonthParseError {
    #[error("expected YYYY-MM, got {0:?}")]
    Format(String),
    #[error("month must be between 1 and 12, got {0}")]
    Month(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn try_new(year: i32, month: u32) -> Result<Self, YearMonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(YearMonthParseError::Month(month));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || YearMonthParseError::Format(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(format_error)?;
        let year = year.parse().map_err(|_| format_error())?;
        let month = month.parse().map_err(|_| format_error())?;
        Self::try_new(year, month)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Settled,
    Unsettled,
}

/// Filter for the expense list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub status: StatusFilter,
    pub month: Option<YearMonth>,
}

impl ExpenseQuery {
    pub fn unsettled() -> Self {
        Self {
            status: StatusFilter::Unsettled,
            month: None,
        }
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Settled => record.settled,
            StatusFilter::Unsettled => !record.settled,
        };
        status_ok && self.month.is_none_or(|month| month.contains(record.date))
    }

    /// Matching records, newest date first.
    pub fn apply<'a, I>(&self, records: I) -> Vec<ExpenseRecord>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut matched: Vec<ExpenseRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        matched.sort_by(|lhs, rhs| rhs.date.cmp(&lhs.date));
        matched
    }
}

/// Roster plus unsettled expenses of one pair at one revision.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairSnapshot {
    pub pair_id: PairId,
    pub revision: u64,
    pub roster: Roster,
    pub expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBalance {
    pub id: MemberId,
    pub balance: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: &str, date: (i32, u32, u32), settled: bool) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(id),
            pair_id: PairId::new("pair"),
            payer: MemberId::new("a"),
            amount: Money::from_i64(100),
            category: Category::Food,
            note: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
            settled,
        }
    }

    #[rstest]
    #[case::plain("2025-05", Ok((2025, 5)))]
    #[case::padded_whitespace(" 2024-12 ", Ok((2024, 12)))]
    #[case::month_out_of_range("2025-13", Err(YearMonthParseError::Month(13)))]
    #[case::missing_dash("202505", Err(YearMonthParseError::Format("202505".to_string())))]
    fn year_month_parses(
        #[case] input: &str,
        #[case] expected: Result<(i32, u32), YearMonthParseError>,
    ) {
        let parsed = input.parse::<YearMonth>().map(|ym| (ym.year(), ym.month()));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn year_month_display_is_zero_padded() {
        let ym = YearMonth::try_new(2025, 3).expect("valid month");
        assert_eq!(ym.to_string(), "2025-03");
    }

    #[rstest]
    #[case::all(StatusFilter::All, None, vec!["e3", "e2", "e1"])]
    #[case::unsettled(StatusFilter::Unsettled, None, vec!["e3", "e1"])]
    #[case::settled(StatusFilter::Settled, None, vec!["e2"])]
    #[case::month(StatusFilter::All, Some("2025-05"), vec!["e2", "e1"])]
    #[case::month_and_status(StatusFilter::Unsettled, Some("2025-05"), vec!["e1"])]
    fn query_filters_and_orders_newest_first(
        #[case] status: StatusFilter,
        #[case] month: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let records = [
            record("e1", (2025, 5, 1), false),
            record("e2", (2025, 5, 20), true),
            record("e3", (2025, 6, 2), false),
        ];
        let query = ExpenseQuery {
            status,
            month: month.map(|m| m.parse().expect("valid month")),
        };

        let ids: Vec<String> = query
            .apply(&records)
            .into_iter()
            .map(|record| record.id.to_string())
            .collect();
        assert_eq!(ids, expected);
    }
}
