use dashmap::{DashMap, mapref::entry::Entry};
use indexmap::IndexMap;
use pairsplit_application::{
    ExpenseQuery, ExpenseRecord, ExpenseStore, NewExpense, PairId, PairSnapshot, StoreError,
};
use pairsplit_domain::{ExpenseId, Member, MemberId, Roster};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::watch;

struct PairState {
    members: IndexMap<MemberId, Member>,
    expenses: IndexMap<ExpenseId, ExpenseRecord>,
    revision: u64,
    tx: watch::Sender<PairSnapshot>,
}

impl PairState {
    fn new(pair_id: &PairId) -> Self {
        let (tx, _rx) = watch::channel(PairSnapshot {
            pair_id: pair_id.clone(),
            ..PairSnapshot::default()
        });
        Self {
            members: IndexMap::new(),
            expenses: IndexMap::new(),
            revision: 0,
            tx,
        }
    }

    fn roster(&self) -> Result<Roster, StoreError> {
        Ok(Roster::try_new(self.members.values().cloned())?)
    }

    fn snapshot(&self, pair_id: &PairId) -> Result<PairSnapshot, StoreError> {
        Ok(PairSnapshot {
            pair_id: pair_id.clone(),
            revision: self.revision,
            roster: self.roster()?,
            expenses: self
                .expenses
                .values()
                .filter(|record| !record.settled)
                .cloned()
                .collect(),
        })
    }

    /// Bumps the revision and pushes the new snapshot to subscribers.
    fn publish(&mut self, pair_id: &PairId) -> Result<u64, StoreError> {
        self.revision += 1;
        let snapshot = self.snapshot(pair_id)?;
        self.tx.send_replace(snapshot);
        tracing::debug!(
            pair_id = %pair_id,
            revision = self.revision,
            subscribers = self.tx.receiver_count(),
            "Pair snapshot published"
        );
        Ok(self.revision)
    }
}

/// Document store kept in memory. Members and expenses are grouped by pair code,
/// and every mutation notifies the pair's subscribers.
///
/// A member belongs to at most one pair.
#[derive(Clone, Default)]
pub struct InMemoryPairStore {
    pairs: Arc<DashMap<PairId, PairState>>,
    member_pairs: Arc<DashMap<MemberId, PairId>>,
    expense_pairs: Arc<DashMap<ExpenseId, PairId>>,
    next_expense_id: Arc<AtomicU64>,
}

impl InMemoryPairStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins `member` to the pair identified by `pair_id`.
    pub fn register_member(&self, pair_id: &PairId, member: Member) -> Result<u64, StoreError> {
        match self.member_pairs.entry(member.id.clone()) {
            Entry::Occupied(_) => return Err(StoreError::MemberAlreadyRegistered(member.id)),
            Entry::Vacant(slot) => {
                slot.insert(pair_id.clone());
            }
        }

        let mut state = self
            .pairs
            .entry(pair_id.clone())
            .or_insert_with(|| PairState::new(pair_id));
        tracing::info!(pair_id = %pair_id, member = %member.id, "Member joined pair");
        state.members.insert(member.id.clone(), member);
        state.publish(pair_id)
    }

    /// Records a new unsettled expense and returns its id.
    pub fn add_expense(
        &self,
        pair_id: &PairId,
        expense: NewExpense,
    ) -> Result<ExpenseId, StoreError> {
        if expense.amount.is_negative() {
            return Err(StoreError::InvalidAmount(expense.amount));
        }

        let mut state = self
            .pairs
            .get_mut(pair_id)
            .ok_or_else(|| StoreError::UnknownPair(pair_id.clone()))?;
        if !state.members.contains_key(&expense.payer) {
            return Err(StoreError::UnknownMember {
                pair_id: pair_id.clone(),
                member: expense.payer,
            });
        }

        let id = self.allocate_expense_id();
        self.expense_pairs.insert(id.clone(), pair_id.clone());
        state.expenses.insert(
            id.clone(),
            ExpenseRecord {
                id: id.clone(),
                pair_id: pair_id.clone(),
                payer: expense.payer,
                amount: expense.amount,
                category: expense.category,
                note: expense.note,
                date: expense.date,
                settled: false,
            },
        );
        state.publish(pair_id)?;
        Ok(id)
    }

    /// Flips the settled flag of an expense; a no-op write does not bump the revision.
    pub fn set_settled(&self, expense_id: &ExpenseId, settled: bool) -> Result<(), StoreError> {
        let pair_id = self
            .expense_pairs
            .get(expense_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::UnknownExpense(expense_id.clone()))?;

        let mut state = self
            .pairs
            .get_mut(&pair_id)
            .ok_or_else(|| StoreError::UnknownPair(pair_id.clone()))?;
        let record = state
            .expenses
            .get_mut(expense_id)
            .ok_or_else(|| StoreError::UnknownExpense(expense_id.clone()))?;
        if record.settled == settled {
            return Ok(());
        }
        record.settled = settled;
        state.publish(&pair_id)?;
        Ok(())
    }

    /// Loads a full snapshot (settled expenses included) as one revision.
    ///
    /// Nothing is written when a member already belongs to a pair or an
    /// expense id is taken by another pair.
    pub fn import(&self, snapshot: PairSnapshot) -> Result<u64, StoreError> {
        let pair_id = snapshot.pair_id.clone();
        if let Some(record) = snapshot.expenses.iter().find(|r| r.amount.is_negative()) {
            return Err(StoreError::InvalidAmount(record.amount));
        }
        self.claim_ids(&snapshot)?;

        let mut state = self
            .pairs
            .entry(pair_id.clone())
            .or_insert_with(|| PairState::new(&pair_id));
        for member in snapshot.roster.iter() {
            state.members.insert(member.id.clone(), member.clone());
        }
        for record in snapshot.expenses {
            state.expenses.insert(
                record.id.clone(),
                ExpenseRecord {
                    pair_id: pair_id.clone(),
                    ..record
                },
            );
        }
        tracing::info!(
            pair_id = %pair_id,
            member_count = state.members.len(),
            expense_count = state.expenses.len(),
            "Pair snapshot imported"
        );
        state.publish(&pair_id)
    }

    /// Maps every member and expense of `snapshot` to its pair, or none of them.
    fn claim_ids(&self, snapshot: &PairSnapshot) -> Result<(), StoreError> {
        let pair_id = &snapshot.pair_id;
        let mut members = Vec::new();
        let mut expenses = Vec::new();

        let result = 'claim: {
            for member in snapshot.roster.iter() {
                match self.member_pairs.entry(member.id.clone()) {
                    Entry::Occupied(_) => {
                        break 'claim Err(StoreError::MemberAlreadyRegistered(member.id.clone()));
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(pair_id.clone());
                        members.push(member.id.clone());
                    }
                }
            }
            for record in &snapshot.expenses {
                match self.expense_pairs.entry(record.id.clone()) {
                    Entry::Occupied(owner) if owner.get() != pair_id => {
                        break 'claim Err(StoreError::DuplicateExpense(record.id.clone()));
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(slot) => {
                        slot.insert(pair_id.clone());
                        expenses.push(record.id.clone());
                    }
                }
            }
            Ok(())
        };

        if result.is_err() {
            for id in &members {
                self.member_pairs.remove(id);
            }
            for id in &expenses {
                self.expense_pairs.remove(id);
            }
        }
        result
    }

    fn allocate_expense_id(&self) -> ExpenseId {
        loop {
            let next = self.next_expense_id.fetch_add(1, Ordering::Relaxed) + 1;
            let id = ExpenseId::new(format!("exp-{next}"));
            if !self.expense_pairs.contains_key(&id) {
                return id;
            }
        }
    }
}

impl ExpenseStore for InMemoryPairStore {
    async fn roster(&self, pair_id: &PairId) -> Result<Roster, StoreError> {
        let state = self
            .pairs
            .get(pair_id)
            .ok_or_else(|| StoreError::UnknownPair(pair_id.clone()))?;
        state.roster()
    }

    async fn expenses(
        &self,
        pair_id: &PairId,
        query: &ExpenseQuery,
    ) -> Result<Vec<ExpenseRecord>, StoreError> {
        let state = self
            .pairs
            .get(pair_id)
            .ok_or_else(|| StoreError::UnknownPair(pair_id.clone()))?;
        Ok(query.apply(state.expenses.values()))
    }

    async fn snapshot(&self, pair_id: &PairId) -> Result<PairSnapshot, StoreError> {
        let state = self
            .pairs
            .get(pair_id)
            .ok_or_else(|| StoreError::UnknownPair(pair_id.clone()))?;
        state.snapshot(pair_id)
    }

    /// Subscribing to a pair nobody joined yet is allowed; the first snapshot
    /// arrives with the first member.
    fn subscribe(&self, pair_id: &PairId) -> Result<watch::Receiver<PairSnapshot>, StoreError> {
        let state = self
            .pairs
            .entry(pair_id.clone())
            .or_insert_with(|| PairState::new(pair_id));
        Ok(state.tx.subscribe())
    }
}
