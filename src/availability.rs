//! Indisponibilités des membres (congés approuvés), au jour près.

use crate::model::{Member, MemberId, SchedulingWindow, TimeOffInterval};
use crate::scheduler::SchedError;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Jours d'absence par membre, restreints à la fenêtre de planification.
#[derive(Debug, Clone, Default)]
pub struct Unavailability {
    by_member: HashMap<MemberId, BTreeSet<NaiveDate>>,
}

impl Unavailability {
    /// Jours d'absence d'un membre ; `None` si le membre n'est pas dans l'équipe.
    pub fn dates(&self, member: &MemberId) -> Option<&BTreeSet<NaiveDate>> {
        self.by_member.get(member)
    }

    pub fn is_off(&self, member: &MemberId, date: NaiveDate) -> bool {
        self.by_member
            .get(member)
            .is_some_and(|days| days.contains(&date))
    }

    /// Vrai si le membre est disponible sur tout `[start, end)`.
    pub fn is_free(&self, member: &MemberId, start: NaiveDate, end: NaiveDate) -> bool {
        match self.by_member.get(member) {
            Some(days) if start < end => days.range(start..end).next().is_none(),
            _ => true,
        }
    }

    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }
}

/// Calcule les jours d'absence de chaque membre de l'équipe.
///
/// Seules les demandes approuvées des membres de l'équipe sont prises en
/// compte ; chaque intervalle est tronqué à la fenêtre et ignoré s'il ne la
/// recoupe pas. Chaque membre reçoit une entrée, éventuellement vide.
pub fn resolve(
    members: &[Member],
    window: &SchedulingWindow,
    time_off: &[TimeOffInterval],
) -> Result<Unavailability, SchedError> {
    let mut by_member: HashMap<MemberId, BTreeSet<NaiveDate>> =
        HashMap::with_capacity(members.len());
    for member in members {
        if by_member.insert(member.id.clone(), BTreeSet::new()).is_some() {
            return Err(SchedError::InvalidInputRecord(format!(
                "duplicate member id {}",
                member.id
            )));
        }
    }

    for interval in time_off.iter().filter(|i| i.is_approved()) {
        let Some(days) = by_member.get_mut(&interval.member) else {
            continue;
        };
        if interval.end < interval.start {
            return Err(SchedError::InvalidInputRecord(format!(
                "time off for {} ends ({}) before it starts ({})",
                interval.member, interval.end, interval.start
            )));
        }

        let from = interval.start.max(window.start);
        let to = interval.end.min(window.end);
        if from > to {
            continue;
        }
        days.extend(from.iter_days().take_while(|d| *d <= to));
    }

    Ok(Unavailability { by_member })
}
