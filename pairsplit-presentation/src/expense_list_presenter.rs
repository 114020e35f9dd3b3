use crate::{
    format::format_yen,
    text_table::{Alignment, TextTableBuilder},
};
use pairsplit_application::{Category, ExpenseRecord, MemberDirectory};
use pairsplit_domain::ExpenseId;
use pairsplit_i18n as i18n;
use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub date_label: String,
    pub category_label: &'static str,
    pub amount_label: String,
    pub payer_label: String,
    pub note: String,
    pub settled: bool,
}

impl ExpenseRow {
    pub fn status_label(&self) -> &'static str {
        if self.settled {
            i18n::SETTLED
        } else {
            i18n::UNSETTLED
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseListView {
    pub rows: Vec<ExpenseRow>,
}

impl ExpenseListView {
    pub fn render_text(&self) -> String {
        if self.rows.is_empty() {
            return format!("{}\n", i18n::NO_EXPENSES);
        }

        let headers = [
            Cow::Borrowed(i18n::DATE),
            Cow::Borrowed(i18n::CATEGORY),
            Cow::Borrowed(i18n::AMOUNT),
            Cow::Borrowed(i18n::PAYER),
            Cow::Borrowed(i18n::STATUS),
            Cow::Borrowed(i18n::NOTE),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
            ])
            .headers(&headers)
            .rows(self.rows.iter().map(|row| {
                [
                    Cow::Borrowed(row.date_label.as_str()),
                    Cow::Borrowed(row.category_label),
                    Cow::Borrowed(row.amount_label.as_str()),
                    Cow::Borrowed(row.payer_label.as_str()),
                    Cow::Borrowed(row.status_label()),
                    Cow::Borrowed(row.note.as_str()),
                ]
            }))
            .build()
    }
}

pub struct ExpenseListPresenter;

impl ExpenseListPresenter {
    /// Rows keep the order of `records`; filtering and sorting happen in the query.
    pub fn render(
        records: &[ExpenseRecord],
        member_directory: &dyn MemberDirectory,
    ) -> ExpenseListView {
        let rows = records
            .iter()
            .map(|record| ExpenseRow {
                id: record.id.clone(),
                date_label: record.date.to_string(),
                category_label: category_label(record.category),
                amount_label: format_yen(record.amount),
                payer_label: member_directory
                    .display_name(&record.payer)
                    .unwrap_or(i18n::UNKNOWN_MEMBER)
                    .to_string(),
                note: record.note.clone().unwrap_or_default(),
                settled: record.settled,
            })
            .collect();
        ExpenseListView { rows }
    }
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Food => i18n::FOOD,
        Category::Rent => i18n::RENT,
        Category::Utilities => i18n::UTILITIES,
        Category::Other => i18n::OTHER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pairsplit_application::PairId;
    use pairsplit_domain::{MemberId, Money};
    use std::collections::HashMap;

    fn record(id: &str, payer: &str, settled: bool, note: Option<&str>) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(id),
            pair_id: PairId::new("home"),
            payer: MemberId::new(payer),
            amount: Money::from_i64(12000),
            category: Category::Utilities,
            note: note.map(str::to_string),
            date: NaiveDate::from_ymd_opt(2025, 4, 30).expect("valid date"),
            settled,
        }
    }

    #[test]
    fn rows_carry_labels_and_unknown_payer_fallback() {
        let directory = HashMap::from([(MemberId::new("u1"), "Aki".to_string())]);
        let records = [
            record("e1", "u1", false, Some("electricity")),
            record("e2", "gone", true, None),
        ];

        let view = ExpenseListPresenter::render(&records, &directory);

        let first = &view.rows[0];
        assert_eq!(first.date_label, "2025-04-30");
        assert_eq!(first.category_label, i18n::UTILITIES);
        assert_eq!(first.amount_label, "¥12,000");
        assert_eq!(first.payer_label, "Aki");
        assert_eq!(first.status_label(), i18n::UNSETTLED);
        assert_eq!(first.note, "electricity");

        let second = &view.rows[1];
        assert_eq!(second.payer_label, i18n::UNKNOWN_MEMBER);
        assert_eq!(second.status_label(), i18n::SETTLED);
        assert!(second.note.is_empty());
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let directory: HashMap<MemberId, String> = HashMap::new();
        let view = ExpenseListPresenter::render(&[], &directory);
        assert_eq!(view.render_text(), format!("{}\n", i18n::NO_EXPENSES));
    }

    #[test]
    fn table_lists_every_row() {
        let directory: HashMap<MemberId, String> = HashMap::new();
        let records = [record("e1", "u1", false, None), record("e2", "u1", true, None)];

        let text = ExpenseListPresenter::render(&records, &directory).render_text();

        assert_eq!(text.lines().count(), 4);
        assert!(text.contains(i18n::DATE));
    }
}
