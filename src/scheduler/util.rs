use crate::model::{PersonId, PersonStats};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Index de la fenêtre de 7 jours contenant `date`, relatif au début.
pub(super) fn week_index(start: NaiveDate, date: NaiveDate) -> i64 {
    (date - start).num_days() / 7
}

/// Adjacence : la personne est affectée la veille ou le lendemain dans le
/// planning courant. Le résultat évolue au fil du remplissage.
pub(super) fn is_consecutive(
    stats: &BTreeMap<PersonId, PersonStats>,
    person: &PersonId,
    date: NaiveDate,
) -> bool {
    let Some(s) = stats.get(person) else {
        return false;
    };
    let before = date.pred_opt().is_some_and(|d| s.dates.contains(&d));
    let after = date.succ_opt().is_some_and(|d| s.dates.contains(&d));
    before || after
}

/// Disponibilité : compteur de la semaine sous le plafond. Toujours vraie
/// quand le plafond est désactivé.
pub(super) fn is_available(
    stats: &BTreeMap<PersonId, PersonStats>,
    person: &PersonId,
    week: i64,
    cap: Option<u32>,
) -> bool {
    match cap {
        None => true,
        Some(cap) => stats.get(person).map_or(true, |s| s.week_count(week) < cap),
    }
}

/// Charge courante, clé de départage ascendante (total, jours spéciaux).
pub(super) fn load_key(stats: &BTreeMap<PersonId, PersonStats>, person: &PersonId) -> (u32, u32) {
    stats
        .get(person)
        .map(|s| (s.total, s.special_days))
        .unwrap_or((0, 0))
}
