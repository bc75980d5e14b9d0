#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use astreinte_blocs::{
    io,
    load::LoadTracker,
    model::{Roster, SchedulingWindow, ShiftAssignment, TeamId},
    scheduler::{BlockScheduler, ConflictKind, Fallback, RandomBlockLength, ScheduleOptions},
    source::{ShiftSink, TeamSource},
    storage::{JsonStorage, RosterSink, Storage},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'astreinte par blocs (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FallbackArg {
    SingleDay,
    Skip,
}

impl From<FallbackArg> for Fallback {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::SingleDay => Fallback::SingleDay,
            FallbackArg::Skip => Fallback::Skip,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des membres depuis un CSV
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Importer des congés depuis un CSV
    ImportTimeOff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des astreintes existantes depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Générer les blocs d'astreinte d'une équipe
    Generate {
        #[arg(long)]
        team: String,
        /// YYYY-MM-DD, inclus
        #[arg(long)]
        start: NaiveDate,
        /// YYYY-MM-DD, inclus
        #[arg(long)]
        end: NaiveDate,
        /// Graine du tirage des longueurs de bloc
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 3)]
        min_block: u32,
        #[arg(long, default_value_t = 5)]
        max_block: u32,
        #[arg(long, default_value_t = 2)]
        attempts_per_member: u32,
        #[arg(long, value_enum, default_value_t = FallbackArg::SingleDay)]
        fallback: FallbackArg,
        /// N'enregistre pas les blocs générés
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Lister les astreintes enregistrées
    List {
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier les astreintes enregistrées sur une fenêtre
    Check {
        #[arg(long)]
        team: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Afficher la charge (heures) de chaque membre sur une fenêtre
    Hours {
        #[arg(long)]
        team: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    let mut roster = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::ImportMembers { csv } => {
            let members = io::import_members_csv(csv)?;
            roster.members.extend(members);
            storage.save(&roster)?;
            0
        }
        Commands::ImportTimeOff { csv } => {
            let time_off = io::import_time_off_csv(csv, &roster)?;
            roster.time_off.extend(time_off);
            storage.save(&roster)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv, &roster)?;
            roster.shifts.extend(shifts);
            storage.save(&roster)?;
            0
        }
        Commands::Generate {
            team,
            start,
            end,
            seed,
            min_block,
            max_block,
            attempts_per_member,
            fallback,
            dry_run,
            out_json,
            out_csv,
        } => {
            let window = SchedulingWindow::new(TeamId::new(team), start, end)?;
            let scheduler = BlockScheduler::new(ScheduleOptions {
                min_block_days: min_block,
                max_block_days: max_block,
                attempts_per_member,
                fallback: fallback.into(),
            });
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut lengths = RandomBlockLength::new(rng);
            let schedule = scheduler.generate_schedule(&roster, &window, &mut lengths)?;

            for a in &schedule.assignments {
                println!("{} → {} | {}", a.start, a.end, handle_of(&roster, a));
            }
            for gap in &schedule.gaps {
                eprintln!("gap: {} ({:?})", gap.date, gap.reason);
            }
            if let Some(path) = out_json {
                io::export_assignments_json(path, &roster, &schedule.assignments)?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &roster, &schedule.assignments)?;
            }
            if !dry_run {
                RosterSink::new(&storage, &mut roster)
                    .persist_shifts(&schedule.assignments)
                    .context("persisting generated shifts")?;
            }
            // Code 2 = WARNING/INCOMPLETE
            if schedule.gaps.is_empty() {
                0
            } else {
                2
            }
        }
        Commands::List { team, out_csv } => {
            let team = team.map(TeamId::new);
            let mut listed: Vec<ShiftAssignment> = roster
                .shifts
                .iter()
                .filter(|s| match &team {
                    Some(t) => roster.find_member_by_id(&s.member).is_some_and(|m| &m.team == t),
                    None => true,
                })
                .map(ShiftAssignment::from_existing)
                .collect();
            listed.sort_by_key(|a| a.start);
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &roster, &listed)?;
            }
            for a in &listed {
                println!("{} → {} | {}", a.start, a.end, handle_of(&roster, a));
            }
            0
        }
        Commands::Check {
            team,
            start,
            end,
            report,
        } => {
            let window = SchedulingWindow::new(TeamId::new(team), start, end)?;
            let members = roster.team_members(&window.team);
            let assignments: Vec<ShiftAssignment> = roster
                .shifts
                .iter()
                .filter(|s| members.iter().any(|m| m.id == s.member))
                .map(ShiftAssignment::from_existing)
                .filter_map(|a| a.clipped_to(&window))
                .collect();
            let conflicts = BlockScheduler::default().audit(
                &assignments,
                &members,
                &window,
                &roster.time_off,
            )?;
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["member_id", "date", "assignment", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.member.as_str(),
                            c.date.to_string().as_str(),
                            c.assignment.to_string().as_str(),
                            match c.kind {
                                ConflictKind::Overlap => "overlap",
                                ConflictKind::TimeOff => "time_off",
                                ConflictKind::OutsideWindow => "outside_window",
                                ConflictKind::UnknownMember => "unknown_member",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
        Commands::Hours { team, start, end } => {
            let window = SchedulingWindow::new(TeamId::new(team), start, end)?;
            let members = roster.team_members(&window.team);
            let tracker = LoadTracker::seed(&members, &window, &roster.shifts)?;
            for (member, (_, hours)) in members.iter().zip(tracker.snapshot(&members)) {
                println!("{} | {:.1}h", member.handle, hours);
            }
            0
        }
    };

    std::process::exit(code);
}

fn handle_of<'a>(roster: &'a Roster, a: &'a ShiftAssignment) -> &'a str {
    roster
        .find_member_by_id(&a.member)
        .map(|m| m.handle.as_str())
        .unwrap_or(a.member.as_str())
}
