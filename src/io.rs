use crate::model::{
    ExistingShift, Member, Roster, ShiftAssignment, TeamId, TimeOffInterval, TimeOffStatus,
};
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV: header `handle,display_name,team`
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let handle = rec.get(0).context("missing handle")?.trim();
        let display = rec.get(1).context("missing display_name")?.trim();
        let team = rec.get(2).context("missing team")?.trim();
        if handle.is_empty() || display.is_empty() || team.is_empty() {
            bail!("invalid member row (empty)");
        }
        out.push(Member::new(handle, display, TeamId::new(team)));
    }
    Ok(out)
}

/// Import de congés: header `handle,start,end[,status]` (dates `YYYY-MM-DD`).
/// Sans statut, la demande est considérée comme approuvée.
pub fn import_time_off_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
) -> anyhow::Result<Vec<TimeOffInterval>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let handle = rec.get(0).context("missing handle")?.trim();
        let member = roster
            .find_member_by_handle(handle)
            .with_context(|| format!("unknown member handle: {handle}"))?;
        let start = parse_date(rec.get(1).context("missing start")?.trim())?;
        let end = parse_date(rec.get(2).context("missing end")?.trim())?;
        if end < start {
            bail!("time off for {handle} ends before it starts");
        }
        let status = match rec.get(3).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<TimeOffStatus>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid status for handle {handle}"))?,
            _ => TimeOffStatus::Approved,
        };
        out.push(TimeOffInterval {
            member: member.id.clone(),
            start,
            end,
            status,
        });
    }
    Ok(out)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Import d'astreintes existantes: header `handle,start,end` (RFC3339 UTC)
pub fn import_shifts_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
) -> anyhow::Result<Vec<ExistingShift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let handle = rec.get(0).context("missing handle")?.trim();
        let member = roster
            .find_member_by_handle(handle)
            .with_context(|| format!("unknown member handle: {handle}"))?;
        let start: DateTime<Utc> = rec
            .get(1)
            .context("missing start")?
            .trim()
            .parse()
            .context("start RFC3339")?;
        let end: DateTime<Utc> = rec
            .get(2)
            .context("missing end")?
            .trim()
            .parse()
            .context("end RFC3339")?;
        if end < start {
            bail!("shift for {handle} ends before it starts");
        }
        out.push(ExistingShift {
            member: member.id.clone(),
            start,
            end,
        });
    }
    Ok(out)
}

#[derive(Serialize)]
struct AssignmentRow<'a> {
    handle: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    days: i64,
}

fn rows<'a>(roster: &'a Roster, assignments: &'a [ShiftAssignment]) -> Vec<AssignmentRow<'a>> {
    assignments
        .iter()
        .map(|a| AssignmentRow {
            handle: roster
                .find_member_by_id(&a.member)
                .map(|m| m.handle.as_str())
                .unwrap_or(a.member.as_str()),
            start: a.start,
            end: a.end,
            days: a.days(),
        })
        .collect()
}

/// Export JSON des blocs générés (jolie mise en forme)
pub fn export_assignments_json<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    assignments: &[ShiftAssignment],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(&rows(roster, assignments))?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des blocs générés: header `handle,start,end,days` (fin exclue)
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    assignments: &[ShiftAssignment],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows(roster, assignments) {
        w.serialize(row)?;
    }
    w.flush()?;
    Ok(())
}
