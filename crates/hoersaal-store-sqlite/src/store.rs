//! [`SqliteStore`]: the SQLite implementation of [`LectureStore`].

use std::path::Path;

use hoersaal_core::{
  fuse::fuse,
  lecture::{Excerpt, FusedExcerpt, LectureImport, LectureRow},
  store::LectureStore,
};
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use crate::{
  Error, Result,
  encode::{
    EXCERPT_COLUMNS, EncodedLecture, LECTURE_COLUMNS, excerpt_from_row,
    lecture_from_row,
  },
  schema::{KEY_INDEX, SCHEMA},
};

/// Counts of rows written by [`SqliteStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
  pub lectures: usize,
  pub excerpts: usize,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lecture store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted, and
/// concurrent calls are serialised on its worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Insert lectures with their excerpts in a single transaction.
  ///
  /// Fails with [`Error::DuplicateLecture`] if any `(number, part)` is
  /// already stored; nothing from the batch is kept in that case. The unique
  /// key index is created here rather than on open, so a database that
  /// already holds duplicates can be read but not imported into.
  pub async fn import(&self, batch: Vec<LectureImport>) -> Result<ImportSummary> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(KEY_INDEX)?;
        let mut summary = ImportSummary::default();

        for LectureImport { lecture, excerpts } in batch {
          let l = EncodedLecture::from(lecture);

          let taken = tx
            .query_row(
              "SELECT 1 FROM lectures WHERE lecture_number = ?1 AND part_number = ?2",
              rusqlite::params![l.lecture_number, l.part_number],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if taken {
            // Dropping `tx` rolls the batch back.
            return Ok(Err((l.lecture_number, l.part_number)));
          }

          tx.execute(
            "INSERT INTO lectures (
               lecture_number, part_number, given_name, titel, thema, tags, wichtig
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
              l.lecture_number,
              l.part_number,
              l.given_name,
              l.titel,
              l.thema,
              l.tags,
              l.wichtig,
            ],
          )?;
          let lecture_id = tx.last_insert_rowid();

          {
            let mut stmt = tx.prepare_cached(
              "INSERT INTO lecture_excerpts (lecture_id, text, start_time, end_time)
               VALUES (?1, ?2, ?3, ?4)",
            )?;
            for e in &excerpts {
              stmt.execute(rusqlite::params![
                lecture_id,
                e.text,
                e.start_time,
                e.end_time
              ])?;
            }
          }

          summary.lectures += 1;
          summary.excerpts += excerpts.len();
        }

        tx.commit()?;
        Ok(Ok(summary))
      })
      .await?;

    let summary =
      outcome.map_err(|(number, part)| Error::DuplicateLecture { number, part })?;
    debug!(?summary, "import committed");
    Ok(summary)
  }

  /// Recompute `fused_lecture_excerpts` from `lecture_excerpts`.
  ///
  /// The table is replaced wholesale, so running this twice yields the same
  /// rows. Returns the number of fused sentences written.
  pub async fn rebuild_fused_excerpts(&self) -> Result<usize> {
    let select = format!(
      "SELECT {EXCERPT_COLUMNS} FROM lecture_excerpts
       ORDER BY lecture_id, start_time, id"
    );

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let excerpts = {
          let mut stmt = tx.prepare(&select)?;
          stmt
            .query_map([], excerpt_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        let sentences = fuse(&excerpts);

        tx.execute("DELETE FROM fused_lecture_excerpts", [])?;
        {
          let mut stmt = tx.prepare_cached(
            "INSERT INTO fused_lecture_excerpts (lecture_id, text, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for s in &sentences {
            stmt.execute(rusqlite::params![
              s.lecture_id,
              s.text,
              s.start_time,
              s.end_time
            ])?;
          }
        }

        tx.commit()?;
        Ok(sentences.len())
      })
      .await?;

    info!(sentences = written, "fused excerpts rebuilt");
    Ok(written)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Fused sentences of a lecture, in start-time order.
  pub async fn fused_excerpts(&self, lecture_id: i64) -> Result<Vec<FusedExcerpt>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT lecture_id, text, start_time, end_time
           FROM fused_lecture_excerpts
           WHERE lecture_id = ?1
           ORDER BY start_time, id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![lecture_id], |row| {
            Ok(FusedExcerpt {
              lecture_id: row.get(0)?,
              text:       row.get(1)?,
              start_time: row.get(2)?,
              end_time:   row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── LectureStore impl ───────────────────────────────────────────────────────

impl LectureStore for SqliteStore {
  type Error = Error;

  async fn find_lecture(&self, number: u32, part: u32) -> Result<Option<LectureRow>> {
    let sql = format!(
      "SELECT {LECTURE_COLUMNS} FROM lectures
       WHERE lecture_number = ?1 AND part_number = ?2
       ORDER BY id
       LIMIT 1"
    );

    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![number, part], lecture_from_row)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn find_excerpts(&self, lecture_id: i64) -> Result<Vec<Excerpt>> {
    let sql = format!(
      "SELECT {EXCERPT_COLUMNS} FROM lecture_excerpts
       WHERE lecture_id = ?1
       ORDER BY start_time, id"
    );

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![lecture_id], excerpt_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}
