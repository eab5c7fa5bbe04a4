//! Status modifiers and their stacking rules.

use std::fmt;
use std::str::FromStr;

/// A single modification to a stat.
///
/// - **Flat**: absolute delta (`5`, `-3`)
/// - **Relative**: relative delta (`+=5`, `-=3`)
/// - **Percent**: percentage of the equipment-adjusted value (`10%`, `-25%`)
///
/// Flat and relative deltas both add; they are kept apart so content keeps the
/// notation it was authored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    Flat(i32),
    Relative(i32),
    Percent(i32),
}

impl Modifier {
    /// The signed magnitude, regardless of notation.
    pub const fn amount(&self) -> i32 {
        match self {
            Modifier::Flat(v) | Modifier::Relative(v) | Modifier::Percent(v) => *v,
        }
    }

    pub const fn is_percent(&self) -> bool {
        matches!(self, Modifier::Percent(_))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Flat(v) => write!(f, "{v:+}"),
            Modifier::Relative(v) if *v < 0 => write!(f, "-={}", v.unsigned_abs()),
            Modifier::Relative(v) => write!(f, "+={v}"),
            Modifier::Percent(v) => write!(f, "{v:+}%"),
        }
    }
}

/// Error returned when a modifier string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid stat modifier '{input}'")]
pub struct ParseModifierError {
    pub input: String,
}

impl FromStr for Modifier {
    type Err = ParseModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseModifierError {
            input: s.to_string(),
        };
        let number = |text: &str| text.trim().parse::<i32>().map_err(|_| err());

        if let Some(rest) = trimmed.strip_suffix('%') {
            return number(rest).map(Modifier::Percent);
        }
        if let Some(rest) = trimmed.strip_prefix("+=") {
            return number(rest).map(Modifier::Relative);
        }
        if let Some(rest) = trimmed.strip_prefix("-=") {
            return number(rest).map(|v| Modifier::Relative(-v));
        }
        number(trimmed).map(Modifier::Flat)
    }
}

/// Modifiers gathered for one stat, applied in a fixed order.
///
/// ```text
/// result = adjusted + Σ flat/relative + adjusted × Σ percent / 100
/// ```
///
/// Percentages are summed before they are applied, and the percentage
/// contribution truncates toward zero.
///
/// # Example
/// ```
/// # use combat_core::stats::{Modifier, ModifierStack};
/// let stack: ModifierStack = [Modifier::Flat(5), Modifier::Percent(20), Modifier::Percent(10)]
///     .into_iter()
///     .collect();
/// // 50 + 5 + 50 × 30 / 100
/// assert_eq!(stack.apply(50), 70);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModifierStack {
    modifiers: Vec<Modifier>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Apply every modifier to an equipment-adjusted value.
    pub fn apply(&self, adjusted: i32) -> i32 {
        adjusted.saturating_add(self.contribution(adjusted))
    }

    /// The status layer alone: what the stack adds on top of `adjusted`.
    pub fn contribution(&self, adjusted: i32) -> i32 {
        let additive: i64 = self
            .modifiers
            .iter()
            .filter(|m| !m.is_percent())
            .map(|m| m.amount() as i64)
            .sum();

        let percent: i64 = self
            .modifiers
            .iter()
            .filter(|m| m.is_percent())
            .map(|m| m.amount() as i64)
            .sum();

        let scaled = adjusted as i64 * percent / 100;
        (additive + scaled).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl FromIterator<Modifier> for ModifierStack {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self {
            modifiers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_notation() {
        assert_eq!("5".parse::<Modifier>().unwrap(), Modifier::Flat(5));
        assert_eq!("-3".parse::<Modifier>().unwrap(), Modifier::Flat(-3));
        assert_eq!("+4".parse::<Modifier>().unwrap(), Modifier::Flat(4));
        assert_eq!("+=7".parse::<Modifier>().unwrap(), Modifier::Relative(7));
        assert_eq!("-=2".parse::<Modifier>().unwrap(), Modifier::Relative(-2));
        assert_eq!("10%".parse::<Modifier>().unwrap(), Modifier::Percent(10));
        assert_eq!(" -25% ".parse::<Modifier>().unwrap(), Modifier::Percent(-25));
        assert!("ten".parse::<Modifier>().is_err());
        assert!("%".parse::<Modifier>().is_err());
    }

    #[test]
    fn display_round_trips_notation() {
        assert_eq!(Modifier::Flat(5).to_string(), "+5");
        assert_eq!(Modifier::Relative(-2).to_string(), "-=2");
        assert_eq!(Modifier::Percent(-10).to_string(), "-10%");
    }

    #[test]
    fn percent_applies_against_adjusted_value() {
        let stack: ModifierStack = [Modifier::Percent(50), Modifier::Flat(10)]
            .into_iter()
            .collect();
        // 40 + 10 + 20, not (40 + 10) × 1.5
        assert_eq!(stack.apply(40), 70);
        assert_eq!(stack.contribution(40), 30);
    }

    #[test]
    fn negative_percent_truncates_toward_zero() {
        let stack: ModifierStack = [Modifier::Percent(-15)].into_iter().collect();
        // 11 × -15 / 100 = -1.65 → -1
        assert_eq!(stack.contribution(11), -1);
    }

    #[test]
    fn empty_stack_is_identity() {
        let stack = ModifierStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.apply(17), 17);
    }
}
