use crate::{
    error::StoreError,
    model::{ExpenseQuery, ExpenseRecord, PairId, PairSnapshot},
};
use pairsplit_domain::{MemberId, Roster};
use std::collections::HashMap;
use tokio::sync::watch;

/// Hosted document store holding member profiles and expenses, scoped by pair.
pub trait ExpenseStore: Send + Sync {
    /// Members whose profile carries the pair code
    fn roster(
        &self,
        pair_id: &PairId,
    ) -> impl Future<Output = Result<Roster, StoreError>> + Send;

    /// Expenses of the pair matching `query`, newest first
    fn expenses(
        &self,
        pair_id: &PairId,
        query: &ExpenseQuery,
    ) -> impl Future<Output = Result<Vec<ExpenseRecord>, StoreError>> + Send;

    /// Roster and unsettled expenses read at one revision
    fn snapshot(
        &self,
        pair_id: &PairId,
    ) -> impl Future<Output = Result<PairSnapshot, StoreError>> + Send;

    /// Live query: yields a fresh snapshot every time the pair's data changes
    fn subscribe(&self, pair_id: &PairId) -> Result<watch::Receiver<PairSnapshot>, StoreError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: &MemberId) -> Option<&str>;
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.get(member_id).map(String::as_str)
    }
}

impl MemberDirectory for Roster {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.get(member_id).map(|member| member.name.as_str())
    }
}
