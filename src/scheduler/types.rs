use crate::model::{MemberId, ShiftAssignment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Que faire quand aucun bloc complet ne peut être placé sur un jour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fallback {
    /// Bloc d'un jour pour le membre courant de la rotation.
    #[default]
    SingleDay,
    /// Jour laissé sans astreinte, signalé comme trou de couverture.
    Skip,
}

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct ScheduleOptions {
    pub min_block_days: u32,
    pub max_block_days: u32,
    /// Nombre de tirages de membre autorisés par membre disponible.
    pub attempts_per_member: u32,
    pub fallback: Fallback,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            min_block_days: 3,
            max_block_days: 5,
            attempts_per_member: 2,
            fallback: Fallback::SingleDay,
        }
    }
}

impl ScheduleOptions {
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.min_block_days == 0 {
            return Err(SchedError::InvalidOptions("min_block_days must be > 0"));
        }
        if self.max_block_days < self.min_block_days {
            return Err(SchedError::InvalidOptions(
                "max_block_days must be >= min_block_days",
            ));
        }
        if self.attempts_per_member == 0 {
            return Err(SchedError::InvalidOptions("attempts_per_member must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapReason {
    /// Tous les membres sont en congés ce jour-là.
    NobodyAvailable,
    /// Recherche bornée épuisée avec `Fallback::Skip`.
    SearchExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub date: NaiveDate,
    pub reason: GapReason,
}

/// Résultat d'une génération : blocs ordonnés, trous, charge finale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub assignments: Vec<ShiftAssignment>,
    pub gaps: Vec<CoverageGap>,
    /// Heures cumulées par membre, dans l'ordre de l'équipe.
    pub hours: Vec<(MemberId, f64)>,
}

impl Schedule {
    pub fn hours_of(&self, member: &MemberId) -> Option<f64> {
        self.hours
            .iter()
            .find(|(id, _)| id == member)
            .map(|(_, h)| *h)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    Overlap,         // deux blocs partagent un jour
    TimeOff,         // membre en congés sur un jour du bloc
    OutsideWindow,   // jour hors fenêtre
    UnknownMember,   // membre absent de l'équipe
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub member: MemberId,
    pub date: NaiveDate,
    /// Index du bloc fautif dans la séquence auditée.
    pub assignment: usize,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid window: end {end} is before start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),
    #[error("invalid input record: {0}")]
    InvalidInputRecord(String),
    #[error("scheduling loop exceeded {0} iterations")]
    IterationLimit(usize),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
