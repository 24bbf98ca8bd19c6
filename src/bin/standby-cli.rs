#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use standby::{
    audit_plan, io, JsonStorage, ReportRenderer, Roster, ScheduleOptions, Scheduler, Storage,
    TextReport,
};
use std::collections::BTreeSet;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification d'astreinte (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un planning équitable (2 personnes par jour)
    Generate {
        /// Premier jour (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Dernier jour inclus (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// liste "nom1,nom2,..."
        #[arg(long, conflicts_with = "people_csv")]
        people: Option<String>,
        /// CSV de personnes (header `name`)
        #[arg(long)]
        people_csv: Option<String>,
        /// liste "YYYY-MM-DD,YYYY-MM-DD,..."
        #[arg(long)]
        holidays: Option<String>,
        /// Fichier de jours fériés (une date par ligne, `#` pour commenter)
        #[arg(long)]
        holidays_file: Option<String>,
        /// Parcourt les jours en ordre mélangé reproductible
        #[arg(long)]
        seed: Option<u64>,
        /// Budget de passes du rééquilibrage
        #[arg(long, default_value_t = 64)]
        max_passes: u32,
        /// Plafond d'affectations par fenêtre de 7 jours
        #[arg(long, default_value_t = 2)]
        weekly_cap: u32,
        #[arg(long)]
        no_weekly_cap: bool,
        /// Autorise deux jours consécutifs pour une même personne
        #[arg(long)]
        allow_consecutive: bool,
        /// Sauvegarde du plan complet (JSON)
        #[arg(long)]
        out_json: Option<String>,
        /// Export CSV du planning
        #[arg(long)]
        out_csv: Option<String>,
        /// Export CSV des statistiques par personne
        #[arg(long)]
        stats_csv: Option<String>,
        /// N'imprime pas le rapport texte
        #[arg(long)]
        quiet: bool,
    },

    /// Vérifier les invariants d'un plan sauvegardé
    Check {
        /// Fichier JSON produit par `generate --out-json`
        #[arg(long)]
        plan: String,
        #[arg(long, default_value_t = 2)]
        weekly_cap: u32,
        #[arg(long)]
        no_weekly_cap: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            start,
            end,
            people,
            people_csv,
            holidays,
            holidays_file,
            seed,
            max_passes,
            weekly_cap,
            no_weekly_cap,
            allow_consecutive,
            out_json,
            out_csv,
            stats_csv,
            quiet,
        } => {
            let start = io::parse_date(&start)?;
            let end = io::parse_date(&end)?;

            let roster = if let Some(list) = people {
                Roster::from_names(
                    list.split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty()),
                )
            } else if let Some(path) = people_csv {
                Roster::new(io::import_people_csv(path)?)
            } else {
                bail!("no roster provided: use --people or --people-csv");
            };

            let mut holiday_set = BTreeSet::new();
            if let Some(list) = holidays {
                holiday_set.extend(io::parse_holidays(&list)?);
            }
            if let Some(path) = holidays_file {
                holiday_set.extend(io::import_holidays_file(path)?);
            }

            let opts = ScheduleOptions {
                weekly_cap: if no_weekly_cap {
                    None
                } else {
                    Some(weekly_cap)
                },
                avoid_consecutive: !allow_consecutive,
                max_passes,
                shuffle_seed: seed,
            };

            let (plan, outcome) = Scheduler::run(start, end, roster, holiday_set, opts)?;

            if let Some(path) = out_json {
                JsonStorage::open(&path)?.save(&plan)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &plan)?;
            }
            if let Some(path) = stats_csv {
                io::export_stats_csv(path, &plan)?;
            }
            if !quiet {
                print!("{}", TextReport.render(&plan, Some(&outcome)));
            }

            if outcome.converged {
                0
            } else {
                eprintln!(
                    "Warning: spread target not reached after {} pass(es) (total={}, special={})",
                    outcome.passes, outcome.total_spread, outcome.special_spread
                );
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }

        Commands::Check {
            plan,
            weekly_cap,
            no_weekly_cap,
        } => {
            let plan = JsonStorage::open(&plan)?.load()?;
            let cap = if no_weekly_cap {
                None
            } else {
                Some(weekly_cap)
            };
            let violations = audit_plan(&plan, cap);
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!("- {:?}: {}", v.kind, v.detail);
                }
                2
            }
        }
    };

    std::process::exit(code);
}
