use crate::model::{Member, MemberId, ShiftAssignment};
use chrono::NaiveDate;

pub(super) fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub(super) fn first_shared_day(a: &ShiftAssignment, b: &ShiftAssignment) -> Option<NaiveDate> {
    if overlaps(a.start, a.end, b.start, b.end) {
        Some(a.start.max(b.start))
    } else {
        None
    }
}

pub(super) fn is_member(members: &[Member], id: &MemberId) -> bool {
    members.iter().any(|m| &m.id == id)
}
