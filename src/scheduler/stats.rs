use super::util;
use crate::model::{is_special, DayPair, PersonId, PersonStats, Roster};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Reconstruit toutes les statistiques en un seul balayage du planning.
/// Ancre de cohérence après toute mutation en masse ; idempotent.
pub(super) fn recompute(
    roster: &Roster,
    start: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
    schedule: &BTreeMap<NaiveDate, DayPair>,
) -> BTreeMap<PersonId, PersonStats> {
    let mut stats: BTreeMap<PersonId, PersonStats> = roster
        .iter()
        .cloned()
        .map(|p| (p, PersonStats::default()))
        .collect();
    for (date, pair) in schedule {
        for person in pair {
            credit(&mut stats, person, *date, start, holidays);
        }
    }
    stats
}

/// Crédite une affectation : total, jours spéciaux, dates, dernier jour
/// et compteur hebdomadaire, mis à jour d'un bloc.
pub(super) fn credit(
    stats: &mut BTreeMap<PersonId, PersonStats>,
    person: &PersonId,
    date: NaiveDate,
    start: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
) {
    let s = stats.entry(person.clone()).or_default();
    s.total += 1;
    if is_special(date, holidays) {
        s.special_days += 1;
    }
    s.dates.insert(date);
    s.last_assigned = s.dates.iter().next_back().copied();
    *s.weekly.entry(util::week_index(start, date)).or_insert(0) += 1;
}

/// Débite l'affectation retirée par un échange (miroir exact de `credit`,
/// les compteurs hebdomadaires à zéro sont purgés pour rester comparables
/// au résultat d'un `recompute`).
pub(super) fn debit(
    stats: &mut BTreeMap<PersonId, PersonStats>,
    person: &PersonId,
    date: NaiveDate,
    start: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
) {
    let s = stats.entry(person.clone()).or_default();
    s.total = s.total.saturating_sub(1);
    if is_special(date, holidays) {
        s.special_days = s.special_days.saturating_sub(1);
    }
    s.dates.remove(&date);
    s.last_assigned = s.dates.iter().next_back().copied();
    let week = util::week_index(start, date);
    if let Some(count) = s.weekly.get_mut(&week) {
        *count = count.saturating_sub(1);
        if *count == 0 {
            s.weekly.remove(&week);
        }
    }
}
