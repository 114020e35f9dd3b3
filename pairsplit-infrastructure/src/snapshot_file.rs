//! JSON export of one pair: its members and every expense, settled or not.

use chrono::NaiveDate;
use pairsplit_application::{Category, ExpenseRecord, PairId, PairSnapshot};
use pairsplit_domain::{ExpenseId, Member, MemberId, Money, Roster, RosterError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Roster(#[from] RosterError),
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    pair_id: String,
    #[serde(default)]
    members: Vec<MemberEntry>,
    #[serde(default)]
    expenses: Vec<ExpenseEntry>,
}

#[derive(Debug, Deserialize)]
struct MemberEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ExpenseEntry {
    id: String,
    amount: i64,
    paid_by: String,
    #[serde(default)]
    settled: bool,
    #[serde(default)]
    category: CategoryEntry,
    date: NaiveDate,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CategoryEntry {
    Food,
    Rent,
    Utilities,
    #[default]
    Other,
}

impl From<CategoryEntry> for Category {
    fn from(value: CategoryEntry) -> Self {
        match value {
            CategoryEntry::Food => Category::Food,
            CategoryEntry::Rent => Category::Rent,
            CategoryEntry::Utilities => Category::Utilities,
            CategoryEntry::Other => Category::Other,
        }
    }
}

/// Parses a snapshot export. Revision starts at zero; amounts are not validated here.
pub fn parse_snapshot(json: &str) -> Result<PairSnapshot, SnapshotLoadError> {
    let file: SnapshotFile = serde_json::from_str(json)?;
    let pair_id = PairId::new(&file.pair_id);

    let roster = Roster::try_new(
        file.members
            .into_iter()
            .map(|member| Member::new(MemberId::new(&member.id), &member.name)),
    )?;

    let expenses = file
        .expenses
        .into_iter()
        .map(|entry| ExpenseRecord {
            id: ExpenseId::new(&entry.id),
            pair_id: pair_id.clone(),
            payer: MemberId::new(&entry.paid_by),
            amount: Money::from_i64(entry.amount),
            category: entry.category.into(),
            note: entry.note.filter(|note| !note.trim().is_empty()),
            date: entry.date,
            settled: entry.settled,
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        pair_id = %pair_id,
        member_count = roster.len(),
        expense_count = expenses.len(),
        "Snapshot parsed"
    );

    Ok(PairSnapshot {
        pair_id,
        revision: 0,
        roster,
        expenses,
    })
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<PairSnapshot, SnapshotLoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SnapshotLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_snapshot(&json)
}
