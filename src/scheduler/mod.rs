mod assignment;
mod audit;
mod rebalance;
mod stats;
mod types;
mod util;

pub use audit::{audit_plan, Violation, ViolationKind};
pub use types::{Outcome, SchedError, ScheduleOptions};

use crate::model::{is_special, DayPair, PersonId, PersonStats, Plan, Roster};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Scheduler : encapsule un planning en cours de construction.
/// Le planning est la source de vérité ; les statistiques sont un cache
/// dérivé, tenu en phase pendant les mutations puis reconstruit en garde-fou.
#[derive(Debug)]
pub struct Scheduler {
    start: NaiveDate,
    end: NaiveDate,
    holidays: BTreeSet<NaiveDate>,
    roster: Roster,
    opts: ScheduleOptions,
    schedule: BTreeMap<NaiveDate, DayPair>,
    stats: BTreeMap<PersonId, PersonStats>,
}

impl Scheduler {
    /// Valide les entrées : plage inclusive, roster d'au moins 2 noms
    /// uniques et non vides. Les fériés hors plage sont ignorés.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        roster: Roster,
        holidays: BTreeSet<NaiveDate>,
        opts: ScheduleOptions,
    ) -> Result<Self, SchedError> {
        if end < start {
            return Err(SchedError::InvalidRange);
        }
        if roster.len() < 2 {
            return Err(SchedError::InsufficientRoster(roster.len()));
        }
        let mut seen = BTreeSet::new();
        for person in roster.iter() {
            if person.is_empty() {
                return Err(SchedError::InvalidPerson("empty name".to_string()));
            }
            if !seen.insert(person.clone()) {
                return Err(SchedError::InvalidPerson(format!(
                    "duplicate name: {person}"
                )));
            }
        }
        let holidays = holidays
            .into_iter()
            .filter(|d| *d >= start && *d <= end)
            .collect();
        let stats = roster
            .iter()
            .cloned()
            .map(|p| (p, PersonStats::default()))
            .collect();
        Ok(Self {
            start,
            end,
            holidays,
            roster,
            opts,
            schedule: BTreeMap::new(),
            stats,
        })
    }

    /// Affectation initiale, recalcul des statistiques, puis rééquilibrage.
    pub fn generate(&mut self) -> Outcome {
        assignment::assign_initial(self);
        self.recompute_stats();
        rebalance::rebalance(self)
    }

    /// Reconstruit toutes les statistiques depuis le planning (idempotent).
    pub fn recompute_stats(&mut self) {
        self.stats = stats::recompute(&self.roster, self.start, &self.holidays, &self.schedule);
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
    pub fn end(&self) -> NaiveDate {
        self.end
    }
    pub fn schedule(&self) -> &BTreeMap<NaiveDate, DayPair> {
        &self.schedule
    }
    pub fn stats(&self) -> &BTreeMap<PersonId, PersonStats> {
        &self.stats
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn special_day_count(&self) -> i64 {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .filter(|d| is_special(*d, &self.holidays))
            .count() as i64
    }

    /// Remet le planning terminé (lecture seule pour les rendus).
    pub fn into_plan(self) -> Plan {
        Plan {
            start: self.start,
            end: self.end,
            holidays: self.holidays,
            roster: self.roster,
            days: self.schedule,
            stats: self.stats,
        }
    }

    /// Raccourci : construit, génère et remet plan + bilan de convergence.
    pub fn run(
        start: NaiveDate,
        end: NaiveDate,
        roster: Roster,
        holidays: BTreeSet<NaiveDate>,
        opts: ScheduleOptions,
    ) -> Result<(Plan, Outcome), SchedError> {
        let mut scheduler = Self::new(start, end, roster, holidays, opts)?;
        let outcome = scheduler.generate();
        Ok((scheduler.into_plan(), outcome))
    }
}
