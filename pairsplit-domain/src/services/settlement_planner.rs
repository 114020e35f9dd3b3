use crate::model::{MemberBalances, MemberId, Money, Transfer};

/// Settlement planning service
///
/// Greedy two-pointer matching between members who owe money (negative
/// balance) and members who are owed money (positive balance).
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Produce the transfers that zero out the given balances.
    ///
    /// Payers and receivers keep the iteration order of `balances`, so the
    /// output is deterministic for a given roster order. Members at zero take
    /// no part. Whatever is left once either side runs out (rounding drift) is
    /// dropped rather than passed on to a third member.
    ///
    /// # Returns
    /// At most `payers + receivers - 1` transfers, each with a positive amount
    /// and distinct endpoints.
    pub fn plan(&self, balances: &MemberBalances) -> Vec<Transfer> {
        // Remaining magnitudes: what each payer still owes, what each receiver is still due.
        let mut payers: Vec<(&MemberId, i64)> = balances
            .iter()
            .filter(|(_, balance)| balance.is_negative())
            .map(|(id, balance)| (id, -balance.amount()))
            .collect();
        let mut receivers: Vec<(&MemberId, i64)> = balances
            .iter()
            .filter(|(_, balance)| balance.is_positive())
            .map(|(id, balance)| (id, balance.amount()))
            .collect();

        let mut transfers =
            Vec::with_capacity((payers.len() + receivers.len()).saturating_sub(1));
        let mut i = 0;
        let mut j = 0;

        while i < payers.len() && j < receivers.len() {
            let (payer, owed) = &mut payers[i];
            let (receiver, due) = &mut receivers[j];
            let amount = (*owed).min(*due);

            if amount <= 0 {
                tracing::warn!(
                    payer = %payer,
                    receiver = %receiver,
                    owed = *owed,
                    due = *due,
                    "Settlement planning made no progress; stopping"
                );
                break;
            }

            transfers.push(Transfer {
                from: (*payer).clone(),
                to: (*receiver).clone(),
                amount: Money::from_i64(amount),
            });
            *owed -= amount;
            *due -= amount;

            if *owed == 0 {
                i += 1;
            }
            if *due == 0 {
                j += 1;
            }
        }

        let unresolved: i64 = payers[i..]
            .iter()
            .chain(&receivers[j..])
            .map(|(_, remaining)| *remaining)
            .sum();
        if unresolved != 0 {
            tracing::debug!(
                unresolved,
                transfer_count = transfers.len(),
                "Rounding residue left unresolved"
            );
        }

        transfers
    }
}
