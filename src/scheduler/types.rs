use thiserror::Error;

/// Options de planification (les contraintes débrayables sont des options,
/// pas des variantes codées en dur).
#[derive(Debug, Clone, Copy)]
pub struct ScheduleOptions {
    /// Plafond d'affectations par fenêtre de 7 jours. `None` désactive.
    pub weekly_cap: Option<u32>,
    /// Interdit (au mieux) deux jours consécutifs pour une même personne.
    pub avoid_consecutive: bool,
    /// Budget d'itérations du rééquilibrage.
    pub max_passes: u32,
    /// Graine pour parcourir les jours en ordre mélangé reproductible.
    /// `None` = ordre chronologique.
    pub shuffle_seed: Option<u64>,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            weekly_cap: Some(2),
            avoid_consecutive: true,
            max_passes: 64,
            shuffle_seed: None,
        }
    }
}

/// Bilan d'un rééquilibrage. Épuiser le budget n'est pas une erreur :
/// le planning reste complet, seul l'écart atteint est rapporté.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub converged: bool,
    /// Passes effectuées (hors vérification initiale du critère d'arrêt).
    pub passes: u32,
    pub swaps: u32,
    /// Écart max − min des totaux sur le roster.
    pub total_spread: u32,
    /// Écart max − min des jours spéciaux sur le roster.
    pub special_spread: u32,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end must not be before start")]
    InvalidRange,
    #[error("insufficient roster: need at least 2 people, got {0}")]
    InsufficientRoster(usize),
    #[error("invalid person name: {0}")]
    InvalidPerson(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
