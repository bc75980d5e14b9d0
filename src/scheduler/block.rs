use super::{
    BlockLengthSource, BlockScheduler, CoverageGap, Fallback, GapReason, SchedError, Schedule,
};
use crate::availability::{self, Unavailability};
use crate::load::LoadTracker;
use crate::model::{
    add_days, ExistingShift, Member, SchedulingWindow, ShiftAssignment, TimeOffInterval,
};
use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Curseur de rotation : jamais remis à zéro, réduit modulo la taille de la
/// liste du jour à chaque usage.
struct Rotation(usize);

impl Rotation {
    fn pick<'a>(&self, available: &[&'a IndexedMember<'a>]) -> &'a IndexedMember<'a> {
        available[self.0 % available.len()]
    }
    fn advance(&mut self) {
        self.0 += 1;
    }
}

struct IndexedMember<'a> {
    index: usize,
    member: &'a Member,
}

pub(super) fn plan(
    scheduler: &BlockScheduler,
    members: &[Member],
    window: &SchedulingWindow,
    time_off: &[TimeOffInterval],
    shifts: &[ExistingShift],
    lengths: &mut dyn BlockLengthSource,
) -> Result<Schedule, SchedError> {
    window.validate()?;
    scheduler.options.validate()?;
    if members.is_empty() {
        debug!(team = %window.team, "no members, nothing to schedule");
        return Ok(Schedule::default());
    }

    let unavailable = availability::resolve(members, window, time_off)?;
    let mut load = LoadTracker::seed(members, window, shifts)?;
    let indexed: Vec<IndexedMember> = members
        .iter()
        .enumerate()
        .map(|(index, member)| IndexedMember { index, member })
        .collect();

    let limit_end = window.end_exclusive()?;
    let max_iterations = (window.len_days() as usize).saturating_mul(members.len());
    let mut iterations = 0usize;

    let mut ranked = load.ranking();
    let mut rotation = Rotation(0);
    let mut schedule = Schedule::default();
    let mut current = window.start;

    while current <= window.end {
        iterations += 1;
        if iterations > max_iterations {
            return Err(SchedError::IterationLimit(max_iterations));
        }

        let available: Vec<&IndexedMember> = ranked
            .iter()
            .map(|i| &indexed[*i])
            .filter(|m| !unavailable.is_off(&m.member.id, current))
            .collect();

        if available.is_empty() {
            warn!(date = %current, "coverage gap: every member is off");
            schedule.gaps.push(CoverageGap {
                date: current,
                reason: GapReason::NobodyAvailable,
            });
            current = next_day(current)?;
            continue;
        }

        let (selected, block_end) = match find_block(
            scheduler,
            &available,
            &unavailable,
            current,
            limit_end,
            &mut rotation,
            lengths,
        )? {
            Some(found) => found,
            None => match scheduler.options.fallback {
                Fallback::SingleDay => {
                    let selected = rotation.pick(&available);
                    warn!(
                        date = %current,
                        member = %selected.member.id,
                        "no full block fits, assigning a single day"
                    );
                    (selected, next_day(current)?)
                }
                Fallback::Skip => {
                    warn!(date = %current, "no full block fits, leaving the day uncovered");
                    schedule.gaps.push(CoverageGap {
                        date: current,
                        reason: GapReason::SearchExhausted,
                    });
                    rotation.advance();
                    current = next_day(current)?;
                    continue;
                }
            },
        };

        let days = (block_end - current).num_days();
        debug!(
            member = %selected.member.id,
            start = %current,
            end = %block_end,
            days,
            "block assigned"
        );
        schedule.assignments.push(ShiftAssignment {
            member: selected.member.id.clone(),
            start: current,
            end: block_end,
        });
        load.add_days(selected.index, days);
        current = block_end;
        rotation.advance();
        ranked = load.ranking();
    }

    schedule.hours = load.snapshot(members);
    info!(
        team = %window.team,
        blocks = schedule.assignments.len(),
        gaps = schedule.gaps.len(),
        "schedule generated"
    );
    Ok(schedule)
}

/// Recherche bornée d'un bloc sans congés à partir de `current`.
///
/// Le bloc candidat est raccourci par la fin à chaque conflit ; sous la
/// longueur minimale, on passe au membre suivant de la rotation avec un
/// nouveau tirage. Renvoie `None` une fois le nombre de tirages de membre
/// épuisé.
fn find_block<'a>(
    scheduler: &BlockScheduler,
    available: &[&'a IndexedMember<'a>],
    unavailable: &Unavailability,
    current: NaiveDate,
    limit_end: NaiveDate,
    rotation: &mut Rotation,
    lengths: &mut dyn BlockLengthSource,
) -> Result<Option<(&'a IndexedMember<'a>, NaiveDate)>, SchedError> {
    let opts = scheduler.options;
    let max_picks = (opts.attempts_per_member as usize).saturating_mul(available.len());

    let mut selected = rotation.pick(available);
    let mut length = draw(lengths, opts.min_block_days, opts.max_block_days);
    let mut picks = 1usize;

    loop {
        let end = block_end(current, length, limit_end)?;
        if unavailable.is_free(&selected.member.id, current, end) {
            return Ok(Some((selected, end)));
        }

        length -= 1;
        if length < opts.min_block_days {
            if picks >= max_picks {
                return Ok(None);
            }
            rotation.advance();
            selected = rotation.pick(available);
            length = draw(lengths, opts.min_block_days, opts.max_block_days);
            picks += 1;
        }
    }
}

fn draw(lengths: &mut dyn BlockLengthSource, min: u32, max: u32) -> u32 {
    lengths.draw(min, max).clamp(min, max)
}

fn block_end(current: NaiveDate, length: u32, limit_end: NaiveDate) -> Result<NaiveDate, SchedError> {
    let end = add_days(current, i64::from(length))
        .with_context(|| format!("date overflow adding {length} days to {current}"))?;
    Ok(end.min(limit_end))
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, SchedError> {
    Ok(date.succ_opt().context("date overflow")?)
}
