use super::{stats, util, Scheduler};
use crate::model::PersonId;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Affectation initiale gloutonne : 2 personnes par jour, départage par
/// charge croissante, statistiques mises à jour au fil de l'eau pour que
/// l'éligibilité du jour suivant reflète la charge courante.
///
/// L'ordre de parcours des jours est chronologique par défaut ; une graine
/// optionnelle le mélange de façon reproductible.
pub(super) fn assign_initial(scheduler: &mut Scheduler) {
    let mut days: Vec<NaiveDate> = scheduler
        .start
        .iter_days()
        .take_while(|d| *d <= scheduler.end)
        .collect();
    if let Some(seed) = scheduler.opts.shuffle_seed {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        days.shuffle(&mut rng);
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        days = days.len(),
        roster = scheduler.roster.len(),
        shuffled = scheduler.opts.shuffle_seed.is_some(),
        "initial assignment start"
    );

    for date in days {
        let first = pick_one(scheduler, date, None);
        stats::credit(
            &mut scheduler.stats,
            &first,
            date,
            scheduler.start,
            &scheduler.holidays,
        );
        let second = pick_one(scheduler, date, Some(&first));
        stats::credit(
            &mut scheduler.stats,
            &second,
            date,
            scheduler.start,
            &scheduler.holidays,
        );
        scheduler.schedule.insert(date, [first, second]);
    }

    #[cfg(feature = "logging")]
    tracing::debug!(days = scheduler.schedule.len(), "initial assignment done");
}

/// Échelle de relâchement : plafond hebdomadaire d'abord, adjacence ensuite,
/// et en dernier recours tout le roster moins la personne déjà retenue pour
/// ce jour. Avec un roster d'au moins 2, le dernier barreau fournit toujours
/// un candidat.
fn pick_one(scheduler: &Scheduler, date: NaiveDate, taken: Option<&PersonId>) -> PersonId {
    let week = util::week_index(scheduler.start, date);
    let rungs = [
        (scheduler.opts.weekly_cap, scheduler.opts.avoid_consecutive),
        (None, scheduler.opts.avoid_consecutive),
        (None, false),
    ];

    for (cap, check_adjacency) in rungs {
        let chosen = scheduler
            .roster
            .iter()
            .filter(|p| taken != Some(*p))
            .filter(|p| util::is_available(&scheduler.stats, p, week, cap))
            .filter(|p| !check_adjacency || !util::is_consecutive(&scheduler.stats, p, date))
            .min_by_key(|p| util::load_key(&scheduler.stats, p));
        if let Some(person) = chosen {
            return person.clone();
        }
    }

    unreachable!("relaxation ladder exhausted with roster >= 2")
}
