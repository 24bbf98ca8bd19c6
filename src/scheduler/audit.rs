use super::stats;
use crate::model::Plan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingDay,
    ExtraDay,
    DuplicatePerson,
    UnknownPerson,
    StatsMismatch,
    MassMismatch,
    WeeklyCapExceeded,
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub detail: String,
}

/// Contrôle les invariants d'un plan terminé : couverture complète, paires
/// distinctes de membres du roster, statistiques cohérentes avec le
/// planning, conservation de la masse et plafond hebdomadaire (si fourni).
pub fn audit_plan(plan: &Plan, weekly_cap: Option<u32>) -> Vec<Violation> {
    let mut out = Vec::new();

    for date in plan.start.iter_days().take_while(|d| *d <= plan.end) {
        if !plan.days.contains_key(&date) {
            out.push(Violation {
                kind: ViolationKind::MissingDay,
                detail: format!("no assignment for {date}"),
            });
        }
    }

    for (date, pair) in &plan.days {
        if *date < plan.start || *date > plan.end {
            out.push(Violation {
                kind: ViolationKind::ExtraDay,
                detail: format!("assignment outside range: {date}"),
            });
        }
        if pair[0] == pair[1] {
            out.push(Violation {
                kind: ViolationKind::DuplicatePerson,
                detail: format!("{} appears twice on {date}", pair[0]),
            });
        }
        for person in pair {
            if !plan.roster.contains(person) {
                out.push(Violation {
                    kind: ViolationKind::UnknownPerson,
                    detail: format!("{person} on {date} is not in the roster"),
                });
            }
        }
    }

    // Les statistiques embarquées doivent être exactement reconstructibles
    // depuis le planning.
    let rebuilt = stats::recompute(&plan.roster, plan.start, &plan.holidays, &plan.days);
    for person in plan.roster.iter() {
        if plan.stats.get(person) != rebuilt.get(person) {
            out.push(Violation {
                kind: ViolationKind::StatsMismatch,
                detail: format!("stats for {person} diverge from the schedule"),
            });
        }
    }
    for person in plan.stats.keys() {
        if !plan.roster.contains(person) {
            out.push(Violation {
                kind: ViolationKind::StatsMismatch,
                detail: format!("stats entry for {person} outside the roster"),
            });
        }
    }

    let mass: i64 = rebuilt.values().map(|s| i64::from(s.total)).sum();
    if mass != plan.total_shifts() {
        out.push(Violation {
            kind: ViolationKind::MassMismatch,
            detail: format!("{mass} assigned slots, expected {}", plan.total_shifts()),
        });
    }

    if let Some(cap) = weekly_cap {
        for (person, s) in &rebuilt {
            for (week, count) in &s.weekly {
                if *count > cap {
                    out.push(Violation {
                        kind: ViolationKind::WeeklyCapExceeded,
                        detail: format!("{person} has {count} shifts in week {week} (cap {cap})"),
                    });
                }
            }
        }
    }

    out
}
