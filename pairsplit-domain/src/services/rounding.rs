use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Tie-breaking rule used when a balance lands exactly on `.5`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.5 -> 1, -0.5 -> -1).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Rounds to a whole currency unit. `None` when the result does not fit in `i64`.
    pub fn round_to_unit(self, value: Decimal) -> Option<i64> {
        value.round_dp_with_strategy(0, self.strategy()).to_i64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::half_up_positive(RoundingMode::HalfUp, Decimal::new(25, 1), 3)]
    #[case::half_up_negative(RoundingMode::HalfUp, Decimal::new(-25, 1), -3)]
    #[case::half_even_down(RoundingMode::HalfEven, Decimal::new(25, 1), 2)]
    #[case::half_even_up(RoundingMode::HalfEven, Decimal::new(35, 1), 4)]
    #[case::below_half(RoundingMode::HalfUp, Decimal::new(-3333, 2), -33)]
    #[case::above_half(RoundingMode::HalfEven, Decimal::new(6667, 2), 67)]
    fn round_to_unit_cases(
        #[case] mode: RoundingMode,
        #[case] value: Decimal,
        #[case] expected: i64,
    ) {
        assert_eq!(mode.round_to_unit(value), Some(expected));
    }
}
