#![forbid(unsafe_code)]
//! Astreinte par blocs — génération d'astreintes équilibrées pour une équipe.
//!
//! - Blocs de 3 à 5 jours pour limiter les passations.
//! - Équilibrage sur les heures d'astreinte cumulées, rotation entre ex aequo.
//! - Congés approuvés toujours respectés ; trous de couverture signalés.
//! - Tirage des longueurs injecté (graine maîtrisée, tests déterministes).
//! - Stockage fichiers (JSON/CSV) en remplacement de l'application hôte.

pub mod availability;
pub mod io;
pub mod load;
pub mod model;
pub mod scheduler;
pub mod source;
pub mod storage;

pub use availability::Unavailability;
pub use load::LoadTracker;
pub use model::{
    ExistingShift, Member, MemberId, Roster, SchedulingWindow, ShiftAssignment, TeamId,
    TimeOffInterval, TimeOffStatus,
};
pub use scheduler::{
    generate_schedule, BlockLengthSource, BlockScheduler, Conflict, ConflictKind, CoverageGap,
    CycleBlockLength, Fallback, FixedBlockLength, GapReason, RandomBlockLength, SchedError,
    Schedule, ScheduleOptions,
};
pub use source::{ShiftSink, TeamSource};
pub use storage::{JsonStorage, RosterSink, Storage};
