use super::{util, Conflict, ConflictKind, SchedError};
use crate::availability;
use crate::model::{Member, SchedulingWindow, ShiftAssignment, TimeOffInterval};

pub(super) fn audit(
    assignments: &[ShiftAssignment],
    members: &[Member],
    window: &SchedulingWindow,
    time_off: &[TimeOffInterval],
) -> Result<Vec<Conflict>, SchedError> {
    window.validate()?;
    let unavailable = availability::resolve(members, window, time_off)?;
    let mut out = Vec::new();

    for (idx, a) in assignments.iter().enumerate() {
        if !util::is_member(members, &a.member) {
            out.push(Conflict {
                member: a.member.clone(),
                date: a.start,
                assignment: idx,
                kind: ConflictKind::UnknownMember,
            });
        }

        for date in a.dates() {
            if !window.contains(date) {
                out.push(Conflict {
                    member: a.member.clone(),
                    date,
                    assignment: idx,
                    kind: ConflictKind::OutsideWindow,
                });
            } else if unavailable.is_off(&a.member, date) {
                out.push(Conflict {
                    member: a.member.clone(),
                    date,
                    assignment: idx,
                    kind: ConflictKind::TimeOff,
                });
            }
        }

        for b in assignments.iter().skip(idx + 1) {
            if let Some(date) = util::first_shared_day(a, b) {
                out.push(Conflict {
                    member: b.member.clone(),
                    date,
                    assignment: idx,
                    kind: ConflictKind::Overlap,
                });
            }
        }
    }

    Ok(out)
}
