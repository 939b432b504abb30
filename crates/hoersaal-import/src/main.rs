//! `hoersaal-import`: load lecture exports into the Hörsaal store.
//!
//! # Usage
//!
//! ```text
//! hoersaal-import --db sqlite3.db import --data data
//! hoersaal-import --db sqlite3.db fuse
//! ```
//!
//! `import` expects `<data>/meta/*.json` metadata files and, for each, an
//! optional transcript `<data>/timestamped/<same stem>.<any extension>`.

mod stem;
mod transcript;

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hoersaal_core::lecture::{LectureImport, NewLecture};
use hoersaal_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hoersaal-import", about = "Load lecture exports into the Hörsaal store")]
struct Args {
  /// SQLite database file; created if missing.
  #[arg(long, default_value = "sqlite3.db", env = "HOERSAAL_STORE_PATH")]
  db: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Import metadata and transcripts from an export directory.
  Import {
    /// Directory containing `meta/` and `timestamped/`.
    #[arg(long, default_value = "data")]
    data: PathBuf,
  },
  /// Rebuild the fused (sentence-level) transcript table.
  Fuse,
}

// ─── Metadata file ────────────────────────────────────────────────────────────

/// Shape of a `meta/*.json` file.
#[derive(Debug, Deserialize)]
struct MetaFile {
  titel:   String,
  thema:   String,
  #[serde(default)]
  tags:    Option<Vec<String>>,
  #[serde(default)]
  wichtig: Option<Vec<String>>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let store = SqliteStore::open(&args.db)
    .await
    .with_context(|| format!("failed to open store at {}", args.db.display()))?;

  match args.command {
    Command::Import { data } => {
      let batch = collect(&data)?;
      let summary = store.import(batch).await.context("import failed")?;
      tracing::info!(
        lectures = summary.lectures,
        excerpts = summary.excerpts,
        "import completed"
      );
    }
    Command::Fuse => {
      store
        .rebuild_fused_excerpts()
        .await
        .context("fusing excerpts failed")?;
    }
  }

  Ok(())
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// Read every usable lecture from `data`. Files whose name does not identify
/// a lecture are skipped with a warning; unreadable files abort.
fn collect(data: &Path) -> Result<Vec<LectureImport>> {
  let meta_dir = data.join("meta");
  let transcript_dir = data.join("timestamped");

  let mut batch = Vec::new();
  for meta_path in sorted_files(&meta_dir)? {
    if meta_path.extension().is_none_or(|ext| ext != "json") {
      continue;
    }
    let Some(stem) = meta_path.file_stem().and_then(|s| s.to_str()) else {
      continue;
    };
    let Some(key) = stem::parse(stem) else {
      tracing::warn!(file = %meta_path.display(), "cannot identify lecture from file name, skipping");
      continue;
    };

    let raw = fs::read_to_string(&meta_path)
      .with_context(|| format!("reading {}", meta_path.display()))?;
    let meta: MetaFile = serde_json::from_str(&raw)
      .with_context(|| format!("parsing {}", meta_path.display()))?;

    let excerpts = match find_transcript(&transcript_dir, stem)? {
      Some(path) => {
        let raw = fs::read_to_string(&path)
          .with_context(|| format!("reading {}", path.display()))?;
        transcript::parse(&raw)
      }
      None => {
        tracing::debug!(stem, "no transcript");
        Vec::new()
      }
    };

    batch.push(LectureImport {
      lecture: NewLecture {
        lecture_number: key.lecture_number,
        part_number:    key.part_number,
        given_name:     key.given_name,
        titel:          meta.titel,
        thema:          meta.thema,
        tags:           meta.tags.unwrap_or_default(),
        wichtig:        meta.wichtig.unwrap_or_default(),
      },
      excerpts,
    });
  }

  Ok(batch)
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut files = fs::read_dir(dir)
    .with_context(|| format!("listing {}", dir.display()))?
    .map(|entry| entry.map(|e| e.path()))
    .collect::<std::io::Result<Vec<_>>>()
    .with_context(|| format!("listing {}", dir.display()))?;
  files.retain(|p| p.is_file());
  files.sort();
  Ok(files)
}

/// The first file in `dir` whose stem is exactly `stem`, whatever its
/// extension. A missing directory means no transcripts.
fn find_transcript(dir: &Path, stem: &str) -> Result<Option<PathBuf>> {
  if !dir.is_dir() {
    return Ok(None);
  }
  Ok(
    sorted_files(dir)?
      .into_iter()
      .find(|p| p.file_stem().and_then(|s| s.to_str()) == Some(stem)),
  )
}
