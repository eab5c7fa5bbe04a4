//! Conversion of free-text effect descriptors.
//!
//! Older content described consumables in prose ("Restore 50 HP",
//! "Hồi phục 50 sinh lực", "+5 attack for 3 turns"). The engine only
//! understands structured [`ItemEffect`]s, so descriptors are converted once
//! when content is loaded and never interpreted afterwards.
//!
//! A descriptor is split into clauses on `,`, `;`, `and` and `và`. Each clause
//! is either a resource restore (a number plus an HP or MP word) or a stat
//! grant (a stat name plus a modifier, with optional duration and chance).

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use combat_core::{EffectGrant, ItemEffect, Modifier, StatKey};

/// Duration given to grants that do not name one.
pub const DEFAULT_DURATION: i32 = 3;

const HP_WORDS: &[&str] = &["hp", "health", "máu", "sinh lực", "sinhluc"];
const MP_WORDS: &[&str] = &["mp", "mana", "linh lực", "linhluc"];
const TURN_WORDS: &[&str] = &["turn", "turns", "round", "rounds", "lượt"];
const CHANCE_WORDS: &[&str] = &["chance", "cơ"];
const DECREASE_WORDS: &[&str] = &["decrease", "reduce", "lower", "weaken", "giảm"];

const STAT_PHRASES: &[(&str, StatKey)] = &[
    ("tấn công", StatKey::Attack),
    ("phòng thủ", StatKey::Defense),
    ("tốc độ", StatKey::Speed),
    ("chính xác", StatKey::Accuracy),
    ("né tránh", StatKey::Evasion),
    ("chí mạng", StatKey::CritChance),
    ("crit chance", StatKey::CritChance),
];

/// Convert a free-text descriptor into structured effects.
///
/// # Errors
///
/// Fails when the descriptor is empty or any clause names neither a resource
/// nor a stat.
pub fn parse_effect_text(text: &str) -> anyhow::Result<Vec<ItemEffect>> {
    let clauses = split_clauses(text);
    if clauses.is_empty() {
        bail!("empty effect descriptor");
    }
    clauses
        .iter()
        .map(|clause| {
            parse_clause(clause).with_context(|| format!("unrecognised effect clause '{clause}'"))
        })
        .collect()
}

fn split_clauses(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(" and ", ";")
        .replace(" và ", ";")
        .replace(',', ";")
        .split(';')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(String::from)
        .collect()
}

fn parse_clause(clause: &str) -> anyhow::Result<ItemEffect> {
    let cleaned: String = clause
        .chars()
        .map(|c| if "()[]:.!".contains(c) { ' ' } else { c })
        .collect();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let padded = format!(" {} ", tokens.join(" "));
    let mentions = |words: &[&str]| words.iter().any(|w| padded.contains(&format!(" {w} ")));

    let stat = find_stat(&tokens, &padded);
    if stat.is_none() {
        let amount = tokens
            .iter()
            .find_map(|t| t.parse::<u32>().ok())
            .ok_or_else(|| anyhow!("no amount"))?;
        if mentions(HP_WORDS) {
            return Ok(ItemEffect::RestoreHp(amount));
        }
        if mentions(MP_WORDS) {
            return Ok(ItemEffect::RestoreMp(amount));
        }
        bail!("no stat or resource named");
    }
    let stat = stat.ok_or_else(|| anyhow!("no stat named"))?;

    let mut consumed = vec![false; tokens.len()];
    let mut duration = None;
    let mut chance = None;
    for (i, window) in tokens.windows(2).enumerate() {
        let (value, next) = (window[0], window[1]);
        if duration.is_none() && TURN_WORDS.contains(&next) {
            if let Ok(turns) = value.parse::<i32>() {
                duration = Some(turns);
                consumed[i] = true;
            }
        }
        if chance.is_none() && CHANCE_WORDS.contains(&next) {
            if let Some(percent) = value.strip_suffix('%').and_then(|p| p.parse::<u32>().ok()) {
                chance = Some(percent);
                consumed[i] = true;
            }
        }
    }

    let mut amount = tokens
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .find_map(|(token, _)| Modifier::from_str(token).ok())
        .ok_or_else(|| anyhow!("no modifier amount"))?;
    if mentions(DECREASE_WORDS) && amount.amount() > 0 {
        amount = negate(amount);
    }

    let mut grant = EffectGrant::new(stat, amount, duration.unwrap_or(DEFAULT_DURATION));
    grant.chance_percent = chance;
    Ok(ItemEffect::Grant(grant))
}

fn find_stat(tokens: &[&str], padded: &str) -> Option<StatKey> {
    STAT_PHRASES
        .iter()
        .find(|(phrase, _)| padded.contains(&format!(" {phrase} ")))
        .map(|(_, key)| *key)
        .or_else(|| tokens.iter().find_map(|t| StatKey::from_str(t).ok()))
}

fn negate(modifier: Modifier) -> Modifier {
    match modifier {
        Modifier::Flat(v) => Modifier::Flat(-v),
        Modifier::Relative(v) => Modifier::Relative(-v),
        Modifier::Percent(v) => Modifier::Percent(-v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(stat: StatKey, amount: Modifier, turns: i32) -> ItemEffect {
        ItemEffect::Grant(EffectGrant::new(stat, amount, turns))
    }

    #[test]
    fn restores_in_english_and_vietnamese() {
        assert_eq!(
            parse_effect_text("Restore 50 HP").unwrap(),
            vec![ItemEffect::RestoreHp(50)]
        );
        assert_eq!(
            parse_effect_text("Hồi phục 50 sinh lực").unwrap(),
            vec![ItemEffect::RestoreHp(50)]
        );
        assert_eq!(
            parse_effect_text("Hồi phục 20 linh lực").unwrap(),
            vec![ItemEffect::RestoreMp(20)]
        );
    }

    #[test]
    fn splits_compound_descriptors() {
        assert_eq!(
            parse_effect_text("Restore 30 HP and 15 MP").unwrap(),
            vec![ItemEffect::RestoreHp(30), ItemEffect::RestoreMp(15)]
        );
    }

    #[test]
    fn stat_grants_pick_up_duration_and_sign() {
        assert_eq!(
            parse_effect_text("+5 attack for 3 turns").unwrap(),
            vec![grant(StatKey::Attack, Modifier::Flat(5), 3)]
        );
        assert_eq!(
            parse_effect_text("Giảm 10% phòng thủ trong 2 lượt").unwrap(),
            vec![grant(StatKey::Defense, Modifier::Percent(-10), 2)]
        );
        assert_eq!(
            parse_effect_text("Increase speed by 4").unwrap(),
            vec![grant(StatKey::Speed, Modifier::Flat(4), DEFAULT_DURATION)]
        );
    }

    #[test]
    fn chance_is_not_mistaken_for_the_amount() {
        let effects = parse_effect_text("Boost atk +=2 (30% chance) for 1 turn").unwrap();
        let ItemEffect::Grant(grant) = effects[0] else {
            panic!("expected a grant, got {effects:?}");
        };
        assert_eq!(grant.stat, StatKey::Attack);
        assert_eq!(grant.amount, Modifier::Relative(2));
        assert_eq!(grant.duration_turns, 1);
        assert_eq!(grant.chance_percent, Some(30));
    }

    #[test]
    fn prose_without_effects_is_rejected() {
        assert!(parse_effect_text("Tastes like strawberries").is_err());
        assert!(parse_effect_text("   ").is_err());
    }
}
