use chrono::NaiveDate;
use pairsplit_application::{
    Category, ExpenseQuery, ExpenseRecord, ExpenseStore, MemberDirectory, PairId, PairSnapshot,
    SettlementError, SettlementProcessor, StoreError,
};
use pairsplit_domain::{
    AggregationOptions, ExpenseId, Member, MemberId, Money, OrphanPolicy, Roster,
};
use rstest::{fixture, rstest};
use std::collections::HashMap;
use tokio::sync::watch;

struct StaticStore {
    pairs: HashMap<PairId, PairSnapshot>,
}

impl StaticStore {
    fn find(&self, pair_id: &PairId) -> Result<&PairSnapshot, StoreError> {
        self.pairs
            .get(pair_id)
            .ok_or_else(|| StoreError::UnknownPair(pair_id.clone()))
    }
}

impl ExpenseStore for StaticStore {
    async fn roster(&self, pair_id: &PairId) -> Result<Roster, StoreError> {
        self.find(pair_id).map(|snapshot| snapshot.roster.clone())
    }

    async fn expenses(
        &self,
        pair_id: &PairId,
        query: &ExpenseQuery,
    ) -> Result<Vec<ExpenseRecord>, StoreError> {
        self.find(pair_id)
            .map(|snapshot| query.apply(&snapshot.expenses))
    }

    async fn snapshot(&self, pair_id: &PairId) -> Result<PairSnapshot, StoreError> {
        let snapshot = self.find(pair_id)?;
        Ok(PairSnapshot {
            expenses: ExpenseQuery::unsettled().apply(&snapshot.expenses),
            ..snapshot.clone()
        })
    }

    fn subscribe(&self, pair_id: &PairId) -> Result<watch::Receiver<PairSnapshot>, StoreError> {
        let (_tx, rx) = watch::channel(self.find(pair_id)?.clone());
        Ok(rx)
    }
}

fn expense(id: &str, payer: &str, amount: i64, day: u32, settled: bool) -> ExpenseRecord {
    ExpenseRecord {
        id: ExpenseId::new(id),
        pair_id: PairId::new("home"),
        payer: MemberId::new(payer),
        amount: Money::from_i64(amount),
        category: Category::Food,
        note: None,
        date: NaiveDate::from_ymd_opt(2025, 5, day).expect("valid date"),
        settled,
    }
}

#[fixture]
fn store() -> StaticStore {
    let roster = Roster::try_new([Member::new("u1", "Aki"), Member::new("u2", "Ben")])
        .expect("roster build failed");
    let snapshot = PairSnapshot {
        pair_id: PairId::new("home"),
        revision: 3,
        roster,
        expenses: vec![
            expense("e1", "u1", 3000, 1, false),
            expense("e2", "u2", 1000, 2, false),
            expense("e3", "u2", 9000, 3, true),
        ],
    };
    StaticStore {
        pairs: HashMap::from([(PairId::new("home"), snapshot)]),
    }
}

fn transfer_triples(transfers: &[pairsplit_domain::Transfer]) -> Vec<(String, String, i64)> {
    transfers
        .iter()
        .map(|t| (t.from.to_string(), t.to.to_string(), t.amount.amount()))
        .collect()
}

#[rstest]
#[tokio::test]
async fn settles_only_unsettled_expenses(store: StaticStore) {
    let result = SettlementProcessor::default()
        .settle_pair(&store, &PairId::new("home"))
        .await
        .expect("settlement should succeed");

    assert_eq!(result.revision, 3);
    assert_eq!(
        transfer_triples(&result.transfers),
        vec![("u2".to_string(), "u1".to_string(), 1000)]
    );
}

#[rstest]
#[tokio::test]
async fn unknown_pair_is_a_store_error(store: StaticStore) {
    let err = SettlementProcessor::default()
        .settle_pair(&store, &PairId::new("nowhere"))
        .await
        .expect_err("unknown pair should fail");

    assert_eq!(
        err,
        SettlementError::Store(StoreError::UnknownPair(PairId::new("nowhere")))
    );
}

#[rstest]
#[tokio::test]
async fn guest_payer_is_settled_with_roster(mut store: StaticStore) {
    let pair_id = PairId::new("home");
    if let Some(snapshot) = store.pairs.get_mut(&pair_id) {
        snapshot.expenses.push(expense("e4", "guest", 3000, 4, false));
    }
    let processor = SettlementProcessor::new(AggregationOptions {
        orphan_policy: OrphanPolicy::IncludeAsGuest,
        ..AggregationOptions::default()
    });

    let result = processor
        .settle_pair(&store, &pair_id)
        .await
        .expect("settlement should succeed");

    let balances: Vec<(String, i64)> = result
        .balances
        .iter()
        .map(|b| (b.id.to_string(), b.balance.amount()))
        .collect();
    assert_eq!(
        balances,
        vec![
            ("u1".to_string(), 667),
            ("u2".to_string(), -1333),
            ("guest".to_string(), 667),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn expense_list_is_newest_first(store: StaticStore) {
    let records = store
        .expenses(&PairId::new("home"), &ExpenseQuery::default())
        .await
        .expect("listing should succeed");

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["e3", "e2", "e1"]);
}

#[rstest]
#[tokio::test]
async fn roster_resolves_display_names(store: StaticStore) {
    let roster = store
        .roster(&PairId::new("home"))
        .await
        .expect("roster should load");

    assert_eq!(roster.display_name(&MemberId::new("u2")), Some("Ben"));
    assert_eq!(roster.display_name(&MemberId::new("u9")), None);
}
