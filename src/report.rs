use crate::model::Plan;
use crate::scheduler::Outcome;

/// Permet de customiser le rendu du rapport (console, mail, etc.).
/// Le plan est consommé en lecture seule : aucune logique de planification
/// ne vit ici.
pub trait ReportRenderer {
    fn render(&self, plan: &Plan, outcome: Option<&Outcome>) -> String;
}

/// Rendu texte en trois sections : planning par date, planning par
/// personne, statistiques d'affectation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn render(&self, plan: &Plan, outcome: Option<&Outcome>) -> String {
        let mut out = String::new();

        out.push_str("Schedule by Date:\n");
        for (date, pair) in &plan.days {
            let marker = if plan.is_special(*date) { " *" } else { "" };
            out.push_str(&format!(
                "{}: {}, {}{marker}\n",
                date.format("%Y-%m-%d"),
                pair[0],
                pair[1]
            ));
        }

        out.push_str("\nSchedule by Person:\n");
        for (person, stats) in &plan.stats {
            let dates = stats
                .dates
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("{person}: {dates}\n"));
        }

        out.push_str("\nAssignment Statistics:\n");
        for (person, stats) in &plan.stats {
            out.push_str(&format!(
                "{person}: Total: {}, Special Days: {}\n",
                stats.total, stats.special_days
            ));
        }

        out.push_str("\nOverall Statistics:\n");
        out.push_str(&format!(
            "Total number of standbys: {}\n",
            plan.total_shifts()
        ));
        out.push_str(&format!(
            "Total number of special days: {}\n",
            plan.special_day_count()
        ));

        if let Some(outcome) = outcome {
            out.push_str(&format!(
                "Rebalancing: {} after {} pass(es), {} swap(s) (spread total={}, special={})\n",
                if outcome.converged {
                    "converged"
                } else {
                    "budget exhausted"
                },
                outcome.passes,
                outcome.swaps,
                outcome.total_spread,
                outcome.special_spread
            ));
        }

        out
    }
}
