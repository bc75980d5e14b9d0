#![forbid(unsafe_code)]
use astreinte_blocs::{
    BlockScheduler, ConflictKind, FixedBlockLength, Member, MemberId, SchedulingWindow,
    ShiftAssignment, TeamId, TimeOffInterval,
};
use chrono::NaiveDate;

#[test]
fn generated_schedule_audits_clean() {
    let members = team(&["a", "b", "c"]);
    let time_off = vec![TimeOffInterval::approved(MemberId::new("c"), d(6), d(10))];
    let window = window(3, 20);
    let scheduler = BlockScheduler::default();
    let schedule = scheduler
        .plan(&members, &window, &time_off, &[], &mut FixedBlockLength(4))
        .unwrap();

    let conflicts = scheduler
        .audit(&schedule.assignments, &members, &window, &time_off)
        .unwrap();
    assert!(conflicts.is_empty(), "{conflicts:?}");
}

#[test]
fn detects_overlap_time_off_and_out_of_window() {
    let members = team(&["a", "b"]);
    let time_off = vec![TimeOffInterval::approved(MemberId::new("b"), d(6), d(6))];
    let window = window(3, 9);
    let assignments = vec![
        block("a", 3, 6),
        block("b", 5, 8), // chevauche a le 5, b en congés le 6
        block("a", 8, 11), // déborde le 10
        block("zed", 9, 10),
    ];

    let conflicts = BlockScheduler::default()
        .audit(&assignments, &members, &window, &time_off)
        .unwrap();

    let kinds = |kind: ConflictKind| conflicts.iter().filter(|c| c.kind == kind).count();
    assert_eq!(kinds(ConflictKind::Overlap), 2);
    assert_eq!(kinds(ConflictKind::TimeOff), 1);
    assert_eq!(kinds(ConflictKind::OutsideWindow), 1);
    assert_eq!(kinds(ConflictKind::UnknownMember), 1);

    let time_off_hit = conflicts
        .iter()
        .find(|c| c.kind == ConflictKind::TimeOff)
        .unwrap();
    assert_eq!(time_off_hit.member, MemberId::new("b"));
    assert_eq!(time_off_hit.date, d(6));
    assert_eq!(time_off_hit.assignment, 1);
}

#[test]
fn straddling_block_is_clipped_to_window() {
    let window = window(5, 9);
    assert_eq!(block("a", 3, 8).clipped_to(&window), Some(block("a", 5, 8)));
    assert_eq!(block("a", 8, 13).clipped_to(&window), Some(block("a", 8, 10)));
    assert_eq!(block("a", 3, 12).clipped_to(&window), Some(block("a", 5, 10)));
    assert_eq!(block("a", 1, 5).clipped_to(&window), None);
    assert_eq!(block("a", 10, 12).clipped_to(&window), None);

    let members = team(&["a", "b"]);
    let clipped: Vec<_> = [block("a", 3, 8), block("b", 8, 13)]
        .iter()
        .filter_map(|a| a.clipped_to(&window))
        .collect();
    let conflicts = BlockScheduler::default()
        .audit(&clipped, &members, &window, &[])
        .unwrap();
    assert!(conflicts.is_empty(), "{conflicts:?}");
}

fn team(ids: &[&str]) -> Vec<Member> {
    ids.iter()
        .map(|id| Member {
            id: MemberId::new(id),
            handle: id.to_string(),
            display_name: id.to_uppercase(),
            team: TeamId::new("ops"),
        })
        .collect()
}

fn block(member: &str, start: u32, end: u32) -> ShiftAssignment {
    ShiftAssignment {
        member: MemberId::new(member),
        start: d(start),
        end: d(end),
    }
}

fn window(start: u32, end: u32) -> SchedulingWindow {
    SchedulingWindow::new(TeamId::new("ops"), d(start), d(end)).unwrap()
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}
