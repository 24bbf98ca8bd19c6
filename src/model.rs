use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifiant fort pour Person (le nom unique du roster fait foi).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roster ordonné : l'ordre sert de base déterministe aux départages
/// et à la distribution du reste des cibles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub people: Vec<PersonId>,
}

impl Roster {
    pub fn new(people: Vec<PersonId>) -> Self {
        Self { people }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            people: names.into_iter().map(PersonId::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
    pub fn contains(&self, id: &PersonId) -> bool {
        self.people.iter().any(|p| p == id)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, PersonId> {
        self.people.iter()
    }
}

/// Paire de personnes affectées à un jour (exactement 2, distinctes).
pub type DayPair = [PersonId; 2];

/// Statistiques par personne : cache dérivé, toujours reconstructible
/// depuis le planning (le planning est la source de vérité).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStats {
    pub total: u32,
    pub special_days: u32,
    pub dates: BTreeSet<NaiveDate>,
    pub last_assigned: Option<NaiveDate>,
    /// Compteur par index de semaine (fenêtres de 7 jours depuis le début).
    pub weekly: BTreeMap<i64, u32>,
}

impl PersonStats {
    pub fn week_count(&self, week: i64) -> u32 {
        self.weekly.get(&week).copied().unwrap_or(0)
    }
}

/// Jour spécial : week-end ou jour férié configuré.
pub fn is_special(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || holidays.contains(&date)
}

/// Planning terminé, remis en lecture seule aux collaborateurs de rendu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub holidays: BTreeSet<NaiveDate>,
    pub roster: Roster,
    pub days: BTreeMap<NaiveDate, DayPair>,
    pub stats: BTreeMap<PersonId, PersonStats>,
}

impl Plan {
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Nombre total de créneaux d'astreinte (2 par jour).
    pub fn total_shifts(&self) -> i64 {
        self.num_days() * 2
    }

    pub fn is_special(&self, date: NaiveDate) -> bool {
        is_special(date, &self.holidays)
    }

    pub fn special_day_count(&self) -> i64 {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .filter(|d| self.is_special(*d))
            .count() as i64
    }
}
