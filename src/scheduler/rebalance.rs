use super::{stats, util, Outcome, Scheduler};
use crate::model::{is_special, PersonId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Cibles par personne : base = quotient, le reste va aux premiers
/// membres du roster dans l'ordre.
struct Target {
    total: u32,
    special: u32,
}

/// Rééquilibrage par recherche locale : tant que l'écart max − min des
/// totaux ou des jours spéciaux dépasse 1, balaye les jours en ordre
/// chronologique et remplace les personnes au-dessus de leur cible par le
/// candidat éligible le moins chargé. Budget de passes borné ; l'épuiser
/// n'est pas une erreur, le bilan rapporte l'écart atteint.
pub(super) fn rebalance(scheduler: &mut Scheduler) -> Outcome {
    let targets = build_targets(scheduler);
    let mut passes = 0u32;
    let mut swaps = 0u32;

    loop {
        let (total_spread, special_spread) = spreads(scheduler);
        if total_spread <= 1 && special_spread <= 1 {
            break;
        }
        if passes >= scheduler.opts.max_passes {
            break;
        }

        let done = run_pass(scheduler, &targets);
        passes += 1;
        swaps += done;

        #[cfg(feature = "logging")]
        tracing::debug!(
            pass = passes,
            swaps = done,
            total_spread,
            special_spread,
            "rebalance pass"
        );

        // Point fixe : une passe sans échange resterait identique.
        if done == 0 {
            break;
        }
    }

    // Garde-fou contre toute dérive des mises à jour incrémentales.
    scheduler.recompute_stats();
    let (total_spread, special_spread) = spreads(scheduler);
    let converged = total_spread <= 1 && special_spread <= 1;

    #[cfg(feature = "logging")]
    tracing::info!(
        converged,
        passes,
        swaps,
        total_spread,
        special_spread,
        "rebalance done"
    );

    Outcome {
        converged,
        passes,
        swaps,
        total_spread,
        special_spread,
    }
}

fn run_pass(scheduler: &mut Scheduler, targets: &BTreeMap<PersonId, Target>) -> u32 {
    let mut swapped = 0u32;
    let dates: Vec<NaiveDate> = scheduler.schedule.keys().copied().collect();

    for date in dates {
        let special = is_special(date, &scheduler.holidays);
        for slot in 0..2 {
            let Some(pair) = scheduler.schedule.get(&date) else {
                continue;
            };
            let outgoing = pair[slot].clone();
            let partner = pair[1 - slot].clone();
            let Some(target) = targets.get(&outgoing) else {
                continue;
            };

            let (total, special_days) = util::load_key(&scheduler.stats, &outgoing);
            let over = total > target.total || (special && special_days > target.special);
            if !over {
                continue;
            }

            let week = util::week_index(scheduler.start, date);
            let incoming = scheduler
                .roster
                .iter()
                .filter(|p| **p != outgoing && **p != partner)
                .filter(|p| {
                    !scheduler.opts.avoid_consecutive
                        || !util::is_consecutive(&scheduler.stats, p, date)
                })
                .filter(|p| {
                    util::is_available(&scheduler.stats, p, week, scheduler.opts.weekly_cap)
                })
                .filter(|p| under_target(scheduler, targets, p, special))
                .min_by_key(|p| util::load_key(&scheduler.stats, p))
                .cloned();
            let Some(incoming) = incoming else {
                continue;
            };

            // Échange atomique : débit du sortant, crédit de l'entrant,
            // planning muté en place.
            stats::debit(
                &mut scheduler.stats,
                &outgoing,
                date,
                scheduler.start,
                &scheduler.holidays,
            );
            stats::credit(
                &mut scheduler.stats,
                &incoming,
                date,
                scheduler.start,
                &scheduler.holidays,
            );
            if let Some(pair) = scheduler.schedule.get_mut(&date) {
                pair[slot] = incoming;
            }
            swapped += 1;
        }
    }

    swapped
}

/// Sous sa propre cible : jours spéciaux sur un jour spécial, total sinon.
fn under_target(
    scheduler: &Scheduler,
    targets: &BTreeMap<PersonId, Target>,
    person: &PersonId,
    special: bool,
) -> bool {
    let Some(target) = targets.get(person) else {
        return false;
    };
    let (total, special_days) = util::load_key(&scheduler.stats, person);
    if special {
        special_days < target.special
    } else {
        total < target.total
    }
}

fn build_targets(scheduler: &Scheduler) -> BTreeMap<PersonId, Target> {
    let n = scheduler.roster.len() as i64;
    let total_slots = scheduler.num_days() * 2;
    let special_slots = scheduler.special_day_count() * 2;
    let (total_base, total_rem) = (total_slots / n, total_slots % n);
    let (special_base, special_rem) = (special_slots / n, special_slots % n);

    scheduler
        .roster
        .iter()
        .enumerate()
        .map(|(i, person)| {
            let i = i as i64;
            (
                person.clone(),
                Target {
                    total: (total_base + i64::from(i < total_rem)) as u32,
                    special: (special_base + i64::from(i < special_rem)) as u32,
                },
            )
        })
        .collect()
}

/// Écarts max − min des deux métriques sur l'ensemble du roster.
fn spreads(scheduler: &Scheduler) -> (u32, u32) {
    let mut min_total = u32::MAX;
    let mut max_total = 0u32;
    let mut min_special = u32::MAX;
    let mut max_special = 0u32;

    for person in scheduler.roster.iter() {
        let (total, special_days) = util::load_key(&scheduler.stats, person);
        min_total = min_total.min(total);
        max_total = max_total.max(total);
        min_special = min_special.min(special_days);
        max_special = max_special.max(special_days);
    }

    (max_total - min_total, max_special - min_special)
}
