//! Charge d'astreinte (en heures) de chaque membre.

use crate::model::{ExistingShift, Member, MemberId, SchedulingWindow};
use crate::scheduler::SchedError;
use chrono::{DateTime, Utc};

/// Heures accumulées par `member` sur les astreintes contenues dans
/// `[from, to]` (début >= from et fin <= to). Les astreintes à cheval sur une
/// borne sont ignorées.
pub fn accumulated_hours(
    member: &MemberId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    shifts: &[ExistingShift],
) -> Result<f64, SchedError> {
    let mut total = 0.0;
    for shift in shifts.iter().filter(|s| &s.member == member) {
        if shift.end < shift.start {
            return Err(SchedError::InvalidInputRecord(format!(
                "shift for {} ends ({}) before it starts ({})",
                member,
                shift.end.to_rfc3339(),
                shift.start.to_rfc3339()
            )));
        }
        if shift.start >= from && shift.end <= to {
            total += shift.duration_hours();
        }
    }
    Ok(total)
}

/// Compteur d'heures tenu en mémoire pendant une génération.
///
/// Les index sont ceux de la liste de membres fournie à [`LoadTracker::seed`].
#[derive(Debug, Clone)]
pub struct LoadTracker {
    hours: Vec<f64>,
}

impl LoadTracker {
    /// Charge initiale de chaque membre, calculée une seule fois.
    pub fn seed(
        members: &[Member],
        window: &SchedulingWindow,
        shifts: &[ExistingShift],
    ) -> Result<Self, SchedError> {
        let (from, to) = window.instant_bounds();
        let hours = members
            .iter()
            .map(|m| accumulated_hours(&m.id, from, to, shifts))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { hours })
    }

    pub fn hours(&self, index: usize) -> f64 {
        self.hours[index]
    }

    pub fn add_days(&mut self, index: usize, days: i64) {
        self.hours[index] += (days * 24) as f64;
    }

    /// Index des membres triés par heures croissantes ; à égalité, l'ordre
    /// de l'équipe est conservé.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.hours.len()).collect();
        order.sort_by(|a, b| self.hours[*a].total_cmp(&self.hours[*b]).then(a.cmp(b)));
        order
    }

    pub fn snapshot(&self, members: &[Member]) -> Vec<(MemberId, f64)> {
        members
            .iter()
            .zip(&self.hours)
            .map(|(m, h)| (m.id.clone(), *h))
            .collect()
    }
}
