//! Board scoring.

use crate::cards::UnitCard;

/// Score an attack from `attacker` into `target`. Higher is better.
///
/// `attack - target.health`, plus 5 if the attack kills, 3 if the target
/// has taunt, 2 if the target hits for 4 or more.
#[must_use]
pub fn evaluate_target(attacker: &UnitCard, target: &UnitCard) -> i32 {
    let mut score = attacker.attack - target.health;
    if attacker.attack >= target.health {
        score += 5;
    }
    if target.has_taunt {
        score += 3;
    }
    if target.attack >= 4 {
        score += 2;
    }
    score
}

/// Strength of one unit: `(attack + health)`, x1.5 with taunt, x2 with
/// divine shield.
#[must_use]
pub fn unit_strength(unit: &UnitCard) -> f64 {
    let mut strength = f64::from(unit.attack + unit.health);
    if unit.has_taunt {
        strength *= 1.5;
    }
    if unit.has_divine_shield {
        strength *= 2.0;
    }
    strength
}

/// Sum of unit strengths on a field.
#[must_use]
pub fn field_strength<'a>(units: impl IntoIterator<Item = &'a UnitCard>) -> f64 {
    units.into_iter().map(unit_strength).sum()
}

/// Index and score of the best target among `candidates`. Ties go to the
/// lowest index.
#[must_use]
pub fn best_target<'a>(
    attacker: &UnitCard,
    candidates: impl IntoIterator<Item = (usize, &'a UnitCard)>,
) -> Option<(usize, i32)> {
    candidates
        .into_iter()
        .map(|(index, target)| (index, evaluate_target(attacker, target)))
        .fold(None, |best, (index, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((index, score)),
        })
}
