//! Output tree layout, scaffolding and manual topic import.
//!
//! ```text
//! <output>/
//!   common/
//!   <lang>/
//!     commands/<shard>/r_command_<name>.dita
//!     classes/c_class_<name>.dita
//!     environments/c_environment_<stem>.dita
//!     frontmatter/ glossary/ out/ arguments/ support/ temp/
//!     *.ditamap
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, SynthError};
use crate::maps::command_href;

const TOPIC_AREAS: &[&str] = &[
    "commands",
    "classes",
    "environments",
    "frontmatter",
    "glossary",
    "out",
    "arguments",
    "support",
    "temp",
];

/// Paths of one language tree under an output root.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    lang: String,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, lang: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            lang: lang.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// `<output>/<lang>`
    pub fn language_dir(&self) -> PathBuf {
        self.root.join(&self.lang)
    }

    pub fn command_topic(&self, name: &str) -> PathBuf {
        self.language_dir().join(command_href(name))
    }

    pub fn class_topic(&self, name: &str) -> PathBuf {
        self.language_dir().join("classes").join(format!("c_class_{name}.dita"))
    }

    pub fn environment_topic(&self, stem: &str) -> PathBuf {
        self.language_dir()
            .join("environments")
            .join(format!("c_environment_{stem}.dita"))
    }

    pub fn map(&self, file_name: &str) -> PathBuf {
        self.language_dir().join(file_name)
    }

    /// Creates the common area, the topic areas and the `a`..`z` command
    /// shards. Existing directories are kept.
    pub fn scaffold(&self) -> Result<()> {
        let common = self.root.join("common");
        fs::create_dir_all(&common).map_err(SynthError::io(&common))?;

        let language = self.language_dir();
        for area in TOPIC_AREAS {
            let dir = language.join(area);
            fs::create_dir_all(&dir).map_err(SynthError::io(&dir))?;
        }
        for shard in 'a'..='z' {
            let dir = language.join("commands").join(shard.to_string());
            fs::create_dir_all(&dir).map_err(SynthError::io(&dir))?;
        }
        debug!(path = %language.display(), "Scaffolded output tree");
        Ok(())
    }
}

/// Outcome of a manual topic import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub copied: usize,
    /// Files whose generated counterpart was at least as new.
    pub kept: usize,
}

/// Copies manually curated topics over the build tree.
///
/// A file only replaces its generated counterpart when the curated copy is
/// newer; missing targets are always copied.
pub fn import_manual_topics(from: &Path, to: &Path) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|source| SynthError::Walk {
            path: from.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);

        if !is_newer(entry.path(), &target)? {
            stats.kept += 1;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(SynthError::io(parent))?;
        }
        fs::copy(entry.path(), &target).map_err(SynthError::io(&target))?;
        stats.copied += 1;
    }

    info!(
        from = %from.display(),
        copied = stats.copied,
        kept = stats.kept,
        "Imported manual topics"
    );
    Ok(stats)
}

fn is_newer(source: &Path, target: &Path) -> Result<bool> {
    let source_modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .map_err(SynthError::io(source))?;
    match fs::metadata(target).and_then(|m| m.modified()) {
        Ok(target_modified) => Ok(source_modified > target_modified),
        Err(_) => Ok(true),
    }
}
