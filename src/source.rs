//! Collaborateurs de l'application hôte : lecture des données d'équipe et
//! écriture des blocs générés.

use crate::model::{
    ExistingShift, Member, MemberId, Roster, SchedulingWindow, ShiftAssignment, TeamId,
    TimeOffInterval,
};

/// Lecture seule des données nécessaires à une génération.
pub trait TeamSource {
    fn team_members(&self, team: &TeamId) -> Vec<Member>;
    /// Congés approuvés des membres donnés qui recoupent la fenêtre.
    fn approved_time_off(
        &self,
        members: &[MemberId],
        window: &SchedulingWindow,
    ) -> Vec<TimeOffInterval>;
    fn existing_shifts(&self, member: &MemberId, window: &SchedulingWindow) -> Vec<ExistingShift>;
}

/// Persistance des blocs générés. L'appelant doit écrire tout ou rien.
pub trait ShiftSink {
    fn persist_shifts(&mut self, shifts: &[ShiftAssignment]) -> anyhow::Result<()>;
}

impl TeamSource for Roster {
    fn team_members(&self, team: &TeamId) -> Vec<Member> {
        self.members
            .iter()
            .filter(|m| &m.team == team)
            .cloned()
            .collect()
    }

    fn approved_time_off(
        &self,
        members: &[MemberId],
        window: &SchedulingWindow,
    ) -> Vec<TimeOffInterval> {
        self.time_off
            .iter()
            .filter(|t| t.is_approved() && members.contains(&t.member))
            // les intervalles inversés remontent pour être rejetés
            .filter(|t| t.end < t.start || (t.start <= window.end && t.end >= window.start))
            .cloned()
            .collect()
    }

    fn existing_shifts(&self, member: &MemberId, window: &SchedulingWindow) -> Vec<ExistingShift> {
        let (from, to) = window.instant_bounds();
        self.shifts
            .iter()
            .filter(|s| &s.member == member)
            // les enregistrements corrompus remontent pour être rejetés
            .filter(|s| s.end < s.start || (s.start >= from && s.end <= to))
            .cloned()
            .collect()
    }
}

impl ShiftSink for Roster {
    fn persist_shifts(&mut self, shifts: &[ShiftAssignment]) -> anyhow::Result<()> {
        self.shifts
            .extend(shifts.iter().map(ShiftAssignment::to_existing_shift));
        Ok(())
    }
}
