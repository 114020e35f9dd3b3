use crate::{
    error_presenter::format_settlement_error,
    format::{format_signed, format_yen},
    text_table::{Alignment, TextTableBuilder},
};
use pairsplit_application::{MemberDirectory, SettlementResult, SettlementUpdate};
use pairsplit_domain::MemberId;
use pairsplit_i18n as i18n;
use std::borrow::Cow;

/// What the viewer can do about a transfer row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    /// The viewer is the one who pays.
    Pay,
    RequestPayment,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Pay => i18n::PAY,
            RowAction::RequestPayment => i18n::REQUEST_PAYMENT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceRow {
    pub member: MemberId,
    pub member_label: String,
    pub balance_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRow {
    pub from: MemberId,
    pub to: MemberId,
    pub from_label: String,
    pub to_label: String,
    pub amount_label: String,
    pub action: RowAction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementView {
    pub balances: Vec<BalanceRow>,
    pub transfers: Vec<TransferRow>,
    pub notices: Vec<String>,
}

impl SettlementView {
    pub fn balance_table(&self) -> String {
        let headers = [Cow::Borrowed(i18n::MEMBER), Cow::Borrowed(i18n::BALANCE)];
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&headers)
            .rows(self.balances.iter().map(|row| {
                [
                    Cow::Borrowed(row.member_label.as_str()),
                    Cow::Borrowed(row.balance_label.as_str()),
                ]
            }))
            .build()
    }

    pub fn transfer_table(&self) -> String {
        let headers = [
            Cow::Borrowed(i18n::FROM),
            Cow::Borrowed(i18n::TO),
            Cow::Borrowed(i18n::AMOUNT),
            Cow::Borrowed(i18n::ACTION),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&headers)
            .rows(self.transfers.iter().map(|row| {
                [
                    Cow::Borrowed(row.from_label.as_str()),
                    Cow::Borrowed(row.to_label.as_str()),
                    Cow::Borrowed(row.amount_label.as_str()),
                    Cow::Borrowed(row.action.label()),
                ]
            }))
            .build()
    }
}

/// UI state of the settlement screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettlementScreen {
    Loading,
    /// Nothing to settle. Notices still surface skipped expenses.
    Empty { notices: Vec<String> },
    Failed(String),
    Ready(SettlementView),
}

impl SettlementScreen {
    pub fn render_text(&self) -> String {
        match self {
            SettlementScreen::Loading => format!("{}\n", i18n::LOADING),
            SettlementScreen::Empty { notices } => {
                let mut out = format!("{}\n", i18n::NO_SETTLEMENT_NEEDED);
                push_notices(&mut out, notices);
                out
            }
            SettlementScreen::Failed(message) => format!("{message}\n"),
            SettlementScreen::Ready(view) => {
                let mut out = view.transfer_table();
                out.push('\n');
                out.push_str(&view.balance_table());
                push_notices(&mut out, &view.notices);
                out
            }
        }
    }
}

pub struct SettlementPresenter;

impl SettlementPresenter {
    /// Row actions are decided from `viewer`: the payer of a transfer gets
    /// [`RowAction::Pay`], everyone else [`RowAction::RequestPayment`].
    pub fn render(
        result: &SettlementResult,
        member_directory: &dyn MemberDirectory,
        viewer: Option<&MemberId>,
    ) -> SettlementView {
        let balances = result
            .balances
            .iter()
            .map(|entry| BalanceRow {
                member: entry.id.clone(),
                member_label: format_member_label(&entry.id, member_directory),
                balance_label: format_signed(entry.balance),
            })
            .collect();

        let transfers = result
            .transfers
            .iter()
            .map(|transfer| TransferRow {
                from: transfer.from.clone(),
                to: transfer.to.clone(),
                from_label: format_member_label(&transfer.from, member_directory),
                to_label: format_member_label(&transfer.to, member_directory),
                amount_label: format_yen(transfer.amount),
                action: if viewer == Some(&transfer.from) {
                    RowAction::Pay
                } else {
                    RowAction::RequestPayment
                },
            })
            .collect();

        SettlementView {
            balances,
            transfers,
            notices: notices(result),
        }
    }

    /// Maps the latest feed update to a screen state. `None` means no result yet.
    pub fn screen(
        update: Option<&SettlementUpdate>,
        member_directory: &dyn MemberDirectory,
        viewer: Option<&MemberId>,
    ) -> SettlementScreen {
        match update.map(|update| &update.outcome) {
            None => SettlementScreen::Loading,
            Some(Err(err)) => SettlementScreen::Failed(format_settlement_error(err)),
            Some(Ok(result)) if result.is_settled_up() => SettlementScreen::Empty {
                notices: notices(result),
            },
            Some(Ok(result)) => {
                SettlementScreen::Ready(Self::render(result, member_directory, viewer))
            }
        }
    }
}

fn notices(result: &SettlementResult) -> Vec<String> {
    if result.skipped_expenses.is_empty() {
        Vec::new()
    } else {
        vec![i18n::skipped_expenses(result.skipped_expenses.len())]
    }
}

fn push_notices(out: &mut String, notices: &[String]) {
    for notice in notices {
        out.push('\n');
        out.push_str(notice);
        out.push('\n');
    }
}

fn format_member_label(member_id: &MemberId, member_directory: &dyn MemberDirectory) -> String {
    match member_directory.display_name(member_id) {
        Some(name) => name.to_string(),
        None => member_id.to_string(),
    }
}
