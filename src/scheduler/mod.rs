mod block;
mod conflicts;
mod lengths;
mod types;
mod util;

pub use lengths::{BlockLengthSource, CycleBlockLength, FixedBlockLength, RandomBlockLength};
pub use types::{
    Conflict, ConflictKind, CoverageGap, Fallback, GapReason, SchedError, Schedule,
    ScheduleOptions,
};

use crate::model::{
    ExistingShift, Member, MemberId, SchedulingWindow, ShiftAssignment, TimeOffInterval,
};
use crate::source::TeamSource;

/// Générateur d'astreintes par blocs équilibrés en heures.
///
/// Sans état entre deux appels : tout l'état de rotation est local à une
/// génération, la source de longueurs est fournie par l'appelant.
#[derive(Debug, Default, Clone)]
pub struct BlockScheduler {
    options: ScheduleOptions,
}

impl BlockScheduler {
    pub fn new(options: ScheduleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Cœur de l'algorithme, sans aucune E/S : les congés et astreintes
    /// existantes sont fournis par l'appelant.
    pub fn plan(
        &self,
        members: &[Member],
        window: &SchedulingWindow,
        time_off: &[TimeOffInterval],
        shifts: &[ExistingShift],
        lengths: &mut dyn BlockLengthSource,
    ) -> Result<Schedule, SchedError> {
        block::plan(self, members, window, time_off, shifts, lengths)
    }

    /// Charge une fois les données de l'équipe via `source`, puis planifie.
    pub fn generate_schedule(
        &self,
        source: &dyn TeamSource,
        window: &SchedulingWindow,
        lengths: &mut dyn BlockLengthSource,
    ) -> Result<Schedule, SchedError> {
        window.validate()?;
        let members = source.team_members(&window.team);
        if members.is_empty() {
            return Ok(Schedule::default());
        }
        let ids: Vec<MemberId> = members.iter().map(|m| m.id.clone()).collect();
        let time_off = source.approved_time_off(&ids, window);
        let shifts: Vec<ExistingShift> = ids
            .iter()
            .flat_map(|id| source.existing_shifts(id, window))
            .collect();
        self.plan(&members, window, &time_off, &shifts, lengths)
    }

    /// Vérifie une séquence de blocs (chevauchements, congés, fenêtre).
    pub fn audit(
        &self,
        assignments: &[ShiftAssignment],
        members: &[Member],
        window: &SchedulingWindow,
        time_off: &[TimeOffInterval],
    ) -> Result<Vec<Conflict>, SchedError> {
        conflicts::audit(assignments, members, window, time_off)
    }
}

/// Génération avec les options par défaut (blocs de 3 à 5 jours).
pub fn generate_schedule(
    source: &dyn TeamSource,
    window: &SchedulingWindow,
    lengths: &mut dyn BlockLengthSource,
) -> Result<Schedule, SchedError> {
    BlockScheduler::default().generate_schedule(source, window, lengths)
}
