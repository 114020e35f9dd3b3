use indexmap::IndexMap;
use smol_str::SmolStr;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Stable identifier handed out by the auth provider.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(SmolStr);

impl MemberId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(SmolStr);

impl ExpenseId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: SmolStr,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            name: SmolStr::new(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("member {0} appears more than once in the roster")]
    DuplicateMember(MemberId),
}

/// Members of one pair, in the order they were supplied.
///
/// The order is the iteration order every balance map and transfer list
/// derived from this roster follows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    members: IndexMap<MemberId, Member>,
}

impl Roster {
    pub fn try_new(members: impl IntoIterator<Item = Member>) -> Result<Self, RosterError> {
        let mut map = IndexMap::new();
        for member in members {
            if map.contains_key(&member.id) {
                return Err(RosterError::DuplicateMember(member.id));
            }
            map.insert(member.id.clone(), member);
        }
        Ok(Self { members: map })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.members.contains_key(id)
    }

    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &MemberId> + '_ {
        self.members.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.values()
    }
}

/// Amount in the smallest currency unit (yen).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// The part of a recorded outlay the settlement engine looks at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub payer: MemberId,
    pub amount: Money,
    pub settled: bool,
}

impl Expense {
    pub fn unsettled(id: impl Into<ExpenseId>, payer: impl Into<MemberId>, amount: i64) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            amount: Money::from_i64(amount),
            settled: false,
        }
    }
}

/// Signed balance per member: positive is owed money, negative owes money.
pub type MemberBalances = IndexMap<MemberId, Money>;

/// `from` owes `to` the given amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn roster_keeps_insertion_order() {
        let roster = Roster::try_new([
            Member::new("b", "Ren"),
            Member::new("a", "Aki"),
            Member::new("c", "Sora"),
        ])
        .expect("roster");

        let ids: Vec<&str> = roster.ids().map(MemberId::as_str).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(roster.get(&MemberId::new("a")).map(|m| m.name.as_str()), Some("Aki"));
    }

    #[test]
    fn roster_rejects_duplicate_ids() {
        let err = Roster::try_new([Member::new("a", "Aki"), Member::new("a", "Aki again")])
            .expect_err("duplicate should be rejected");
        assert_eq!(err, RosterError::DuplicateMember(MemberId::new("a")));
    }

    #[rstest]
    #[case::positive(100, false, true)]
    #[case::negative(-100, true, false)]
    #[case::zero(0, false, false)]
    fn money_sign_predicates(
        #[case] value: i64,
        #[case] negative: bool,
        #[case] positive: bool,
    ) {
        let money = Money::from_i64(value);
        assert_eq!(money.is_negative(), negative);
        assert_eq!(money.is_positive(), positive);
        assert_eq!(money.is_zero(), !negative && !positive);
    }

    #[test]
    fn money_sum_and_overflow() {
        let total: Money = [Money::from_i64(10), Money::from_i64(-3)].iter().sum();
        assert_eq!(total, Money::from_i64(7));
        assert_eq!(Money::from_i64(i64::MAX).checked_add(Money::from_i64(1)), None);
    }
}
