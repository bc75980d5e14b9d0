use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::scheduler::SchedError;

/// Identifiant fort pour Member
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant d'équipe (fourni par l'application hôte)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membre d'astreinte, rattaché à exactement une équipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub handle: String,
    pub display_name: String,
    pub team: TeamId,
}

impl Member {
    pub fn new<H: Into<String>, D: Into<String>>(handle: H, display_name: D, team: TeamId) -> Self {
        Self {
            id: MemberId::random(),
            handle: handle.into(),
            display_name: display_name.into(),
            team,
        }
    }
}

/// Statut d'une demande de congés. Seules les demandes `Approved` bloquent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeOffStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl FromStr for TimeOffStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" | "denied" => Ok(Self::Rejected),
            other => Err(format!("unknown time-off status: {other}")),
        }
    }
}

/// Congés d'un membre, bornes incluses `[start, end]`, au jour près.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffInterval {
    pub member: MemberId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub status: TimeOffStatus,
}

impl TimeOffInterval {
    /// Congés déjà approuvés.
    pub fn approved(member: MemberId, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            member,
            start,
            end,
            status: TimeOffStatus::Approved,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == TimeOffStatus::Approved
    }
}

/// Astreinte déjà enregistrée, utilisée uniquement pour la charge initiale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingShift {
    pub member: MemberId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ExistingShift {
    /// Durée en heures (négative si l'enregistrement est corrompu).
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

/// Bloc d'astreinte généré : `[start, end)` en jours calendaires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub member: MemberId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ShiftAssignment {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn hours(&self) -> f64 {
        (self.days() * 24) as f64
    }

    /// Vrai si `date` tombe dans le bloc.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take_while(move |d| *d < self.end)
    }

    /// Jours calendaires touchés par une astreinte enregistrée ; une fin
    /// après minuit compte le jour entamé.
    pub fn from_existing(shift: &ExistingShift) -> Self {
        let start = shift.start.date_naive();
        let mut end = shift.end.date_naive();
        if shift.end > midnight_utc(end) || end <= start {
            end = end.succ_opt().unwrap_or(end);
        }
        Self {
            member: shift.member.clone(),
            start,
            end,
        }
    }

    /// Partie du bloc comprise dans la fenêtre, `None` si elle est vide.
    pub fn clipped_to(&self, window: &SchedulingWindow) -> Option<Self> {
        let start = self.start.max(window.start);
        let end = match window.end.succ_opt() {
            Some(after) => self.end.min(after),
            None => self.end,
        };
        (start < end).then(|| Self {
            member: self.member.clone(),
            start,
            end,
        })
    }

    /// Conversion en astreinte persistée (minuit UTC aux deux bornes).
    pub fn to_existing_shift(&self) -> ExistingShift {
        ExistingShift {
            member: self.member.clone(),
            start: midnight_utc(self.start),
            end: midnight_utc(self.end),
        }
    }
}

/// Fenêtre de planification, bornes incluses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingWindow {
    pub team: TeamId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SchedulingWindow {
    pub fn new(team: TeamId, start: NaiveDate, end: NaiveDate) -> Result<Self, SchedError> {
        let window = Self { team, start, end };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.end < self.start {
            return Err(SchedError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Nombre de jours couverts (bornes incluses).
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Lendemain de `end` : borne exclusive des blocs.
    pub fn end_exclusive(&self) -> Result<NaiveDate, SchedError> {
        self.end
            .succ_opt()
            .ok_or_else(|| anyhow::anyhow!("date overflow after window end {}", self.end).into())
    }

    /// Bornes horaires utilisées pour la charge existante : minuit UTC du
    /// premier jour et minuit UTC du dernier jour.
    pub fn instant_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (midnight_utc(self.start), midnight_utc(self.end))
    }
}

pub(crate) fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

pub(crate) fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// Données de l'hôte, sérialisées dans un fichier JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub time_off: Vec<TimeOffInterval>,
    #[serde(default)]
    pub shifts: Vec<ExistingShift>,
}

impl Roster {
    pub fn find_member_by_handle<'a>(&'a self, handle: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.handle == handle)
    }
    pub fn find_member_by_id<'a>(&'a self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().find(|m| &m.id == id)
    }
}
