#![forbid(unsafe_code)]
//! Standby — génération locale de plannings d'astreinte équitables (sans BD).
//!
//! - 2 personnes par jour sur une plage de dates inclusive.
//! - Affectation gloutonne sous contraintes, puis rééquilibrage par échanges.
//! - Le planning est la source de vérité ; les statistiques en dérivent.
//! - Export JSON/CSV ; rendu texte en dehors du cœur.

pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use model::{is_special, DayPair, PersonId, PersonStats, Plan, Roster};
pub use report::{ReportRenderer, TextReport};
pub use scheduler::{
    audit_plan, Outcome, SchedError, ScheduleOptions, Scheduler, Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage};
