//! Healing.

/// Healing produced by a skill: `floor(healing_amount + attack * multiplier)`.
///
/// Not capped here; the cap is applied against the target's max HP.
pub fn skill_healing(healing_amount: u32, attack: i32, healing_multiplier: f64) -> u32 {
    let raw = healing_amount as f64 + attack as f64 * healing_multiplier;
    raw.max(0.0).floor() as u32
}

/// Restore a resource, capped at its maximum.
pub fn apply_healing(current: u32, amount: u32, max: u32) -> u32 {
    current.saturating_add(amount).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healing_scales_and_floors() {
        assert_eq!(skill_healing(20, 15, 0.5), 27);
        assert_eq!(skill_healing(0, 9, 0.25), 2);
    }

    #[test]
    fn healing_caps_at_max() {
        assert_eq!(apply_healing(80, 50, 100), 100);
        assert_eq!(apply_healing(10, 5, 100), 15);
        assert_eq!(apply_healing(u32::MAX - 1, 10, u32::MAX), u32::MAX);
    }
}
