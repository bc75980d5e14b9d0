use crate::model::{Roster, ShiftAssignment};
use crate::source::ShiftSink;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un roster depuis un support.
    fn load(&self) -> anyhow::Result<Roster>;
    /// Sauvegarde de manière atomique.
    fn save(&self, roster: &Roster) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self { path: path.as_ref().to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Roster vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Roster> {
        if !self.path.exists() {
            return Ok(Roster::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Roster> {
        let data = fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let roster: Roster = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(roster)
    }

    fn save(&self, roster: &Roster) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(roster)?;
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

/// Persistance tout-ou-rien : le roster complet, blocs ajoutés, est réécrit
/// d'un seul rename. En cas d'échec le fichier d'origine reste intact.
pub struct RosterSink<'a> {
    storage: &'a JsonStorage,
    roster: &'a mut Roster,
}

impl<'a> RosterSink<'a> {
    pub fn new(storage: &'a JsonStorage, roster: &'a mut Roster) -> Self {
        Self { storage, roster }
    }
}

impl ShiftSink for RosterSink<'_> {
    fn persist_shifts(&mut self, shifts: &[ShiftAssignment]) -> anyhow::Result<()> {
        let mut next = self.roster.clone();
        next.persist_shifts(shifts)?;
        self.storage.save(&next)?;
        *self.roster = next;
        Ok(())
    }
}
