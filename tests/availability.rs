#![forbid(unsafe_code)]
use astreinte_blocs::{
    availability, Member, MemberId, SchedError, SchedulingWindow, TeamId, TimeOffInterval,
    TimeOffStatus,
};
use chrono::NaiveDate;

#[test]
fn approved_time_off_is_clipped_to_window() {
    let members = vec![member("a"), member("b")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let time_off = vec![
        TimeOffInterval::approved(MemberId::new("a"), d(2025, 2, 27), d(2025, 3, 4)),
        TimeOffInterval::approved(MemberId::new("b"), d(2025, 3, 8), d(2025, 3, 15)),
    ];

    let off = availability::resolve(&members, &window, &time_off).unwrap();
    let a: Vec<_> = off.dates(&MemberId::new("a")).unwrap().iter().copied().collect();
    let b: Vec<_> = off.dates(&MemberId::new("b")).unwrap().iter().copied().collect();
    assert_eq!(a, vec![d(2025, 3, 3), d(2025, 3, 4)]);
    assert_eq!(b, vec![d(2025, 3, 8), d(2025, 3, 9)]);
    assert!(off.is_off(&MemberId::new("a"), d(2025, 3, 4)));
    assert!(!off.is_off(&MemberId::new("a"), d(2025, 3, 5)));
}

#[test]
fn every_member_gets_an_entry() {
    let members = vec![member("a"), member("b"), member("c")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let off = availability::resolve(&members, &window, &[]).unwrap();
    assert_eq!(off.len(), 3);
    for m in &members {
        assert!(off.dates(&m.id).unwrap().is_empty());
    }
}

#[test]
fn pending_rejected_and_foreign_requests_are_ignored() {
    let members = vec![member("a")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let mut pending = TimeOffInterval::approved(MemberId::new("a"), d(2025, 3, 4), d(2025, 3, 5));
    pending.status = TimeOffStatus::Pending;
    let mut rejected = pending.clone();
    rejected.status = TimeOffStatus::Rejected;
    let foreign = TimeOffInterval::approved(MemberId::new("zed"), d(2025, 3, 4), d(2025, 3, 5));

    let off = availability::resolve(&members, &window, &[pending, rejected, foreign]).unwrap();
    assert!(off.dates(&MemberId::new("a")).unwrap().is_empty());
    assert!(off.dates(&MemberId::new("zed")).is_none());
}

#[test]
fn interval_outside_window_is_skipped() {
    let members = vec![member("a")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let time_off = vec![TimeOffInterval::approved(
        MemberId::new("a"),
        d(2025, 3, 10),
        d(2025, 3, 12),
    )];
    let off = availability::resolve(&members, &window, &time_off).unwrap();
    assert!(off.dates(&MemberId::new("a")).unwrap().is_empty());
}

#[test]
fn inverted_interval_is_rejected() {
    let members = vec![member("a")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let time_off = vec![TimeOffInterval::approved(
        MemberId::new("a"),
        d(2025, 3, 6),
        d(2025, 3, 4),
    )];
    let err = availability::resolve(&members, &window, &time_off).unwrap_err();
    assert!(matches!(err, SchedError::InvalidInputRecord(_)));
}

#[test]
fn duplicate_member_ids_are_rejected() {
    let members = vec![member("a"), member("a")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let err = availability::resolve(&members, &window, &[]).unwrap_err();
    assert!(matches!(err, SchedError::InvalidInputRecord(_)));
}

#[test]
fn is_free_checks_half_open_range() {
    let members = vec![member("a")];
    let window = window(d(2025, 3, 3), d(2025, 3, 9));
    let time_off = vec![TimeOffInterval::approved(
        MemberId::new("a"),
        d(2025, 3, 6),
        d(2025, 3, 6),
    )];
    let off = availability::resolve(&members, &window, &time_off).unwrap();
    let a = MemberId::new("a");
    assert!(off.is_free(&a, d(2025, 3, 3), d(2025, 3, 6)));
    assert!(!off.is_free(&a, d(2025, 3, 3), d(2025, 3, 7)));
    assert!(off.is_free(&a, d(2025, 3, 7), d(2025, 3, 10)));
}

fn member(id: &str) -> Member {
    Member {
        id: MemberId::new(id),
        handle: id.to_string(),
        display_name: id.to_uppercase(),
        team: TeamId::new("ops"),
    }
}

fn window(start: NaiveDate, end: NaiveDate) -> SchedulingWindow {
    SchedulingWindow::new(TeamId::new("ops"), start, end).unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}
