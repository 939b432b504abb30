//! Lecture resolution: route parameters in, view model out.
//!
//! [`Resolver::resolve`] has three outcomes:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | lecture and excerpts read, fields decoded | `Ok(ResolvedView::Found)` |
//! | no row for `(number, part)` | `Ok(ResolvedView::NotFound)` |
//! | store failure/timeout, corrupt field | `Err(Error)` |
//!
//! The excerpt query is only issued once the lecture row is in hand, since it
//! is keyed by the row's identity.

use std::{future::Future, sync::Arc, time::Duration};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
  Error, Result, codec,
  lecture::{Excerpt, LectureRow},
  store::{ForeignExcerpt, LectureStore},
};

/// Part number assumed when the route does not name one.
pub const DEFAULT_PART: u32 = 1;

/// Upper bound on a single store call before it counts as unavailable.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Template name for a resolved lecture.
pub const LECTURE_VIEW: &str = "lecture";

/// Template name for a lecture that does not exist.
pub const LECTURE_NOT_FOUND_VIEW: &str = "lecture-not-found";

// ─── Request ─────────────────────────────────────────────────────────────────

/// Normalised route parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureRequest {
  pub number: u32,
  pub part:   u32,
  /// Display-only; never part of the lookup key.
  pub name:   Option<String>,
}

impl LectureRequest {
  pub fn new(number: u32, part: Option<u32>, name: Option<String>) -> Self {
    Self { number, part: part.unwrap_or(DEFAULT_PART), name }
  }
}

// ─── View models ─────────────────────────────────────────────────────────────

/// Everything the `lecture` template renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LectureView {
  pub id:             i64,
  pub lecture_number: u32,
  pub part_number:    u32,
  pub given_name:     String,
  pub titel:          String,
  pub thema:          String,
  pub tags:           Vec<String>,
  pub wichtig:        Vec<String>,
  pub name:           Option<String>,
  pub excerpts:       Vec<Excerpt>,
}

/// The identifiers that were asked for, echoed by `lecture-not-found`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
  pub number: String,
  pub part:   String,
  pub name:   Option<String>,
}

impl NotFoundView {
  /// Build from raw route segments that never reached the store.
  pub fn raw(number: String, part: Option<String>, name: Option<String>) -> Self {
    Self {
      number,
      part: part.unwrap_or_else(|| DEFAULT_PART.to_string()),
      name,
    }
  }
}

impl From<LectureRequest> for NotFoundView {
  fn from(request: LectureRequest) -> Self {
    Self {
      number: request.number.to_string(),
      part:   request.part.to_string(),
      name:   request.name,
    }
  }
}

/// A view model tagged with the template it targets.
///
/// Serialises as the inner model, so it can be handed to a template directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedView {
  Found(LectureView),
  NotFound(NotFoundView),
}

impl ResolvedView {
  pub fn view_name(&self) -> &'static str {
    match self {
      Self::Found(_) => LECTURE_VIEW,
      Self::NotFound(_) => LECTURE_NOT_FOUND_VIEW,
    }
  }
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Resolves lecture requests against a [`LectureStore`].
///
/// Cloning is cheap; the store is shared.
pub struct Resolver<S> {
  store:   Arc<S>,
  timeout: Duration,
}

impl<S> Clone for Resolver<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), timeout: self.timeout }
  }
}

impl<S: LectureStore> Resolver<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, timeout: DEFAULT_STORE_TIMEOUT }
  }

  /// Override the per-call store timeout.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Resolve `(number, part)` to a view model. `part` defaults to
  /// [`DEFAULT_PART`]; `name` is carried through for display.
  pub async fn resolve(
    &self,
    number: u32,
    part: Option<u32>,
    name: Option<String>,
  ) -> Result<ResolvedView> {
    let request = LectureRequest::new(number, part, name);

    let lookup = self.store.find_lecture(request.number, request.part);
    let Some(row) = self.bounded(lookup).await? else {
      debug!(number = request.number, part = request.part, "lecture not found");
      return Ok(ResolvedView::NotFound(request.into()));
    };

    let excerpts = self.bounded(self.store.find_excerpts(row.id)).await?;
    if let Some(stray) = excerpts.iter().find(|e| e.lecture_id != row.id) {
      return Err(Error::store(ForeignExcerpt {
        excerpt_id: stray.id,
        expected:   row.id,
        actual:     stray.lecture_id,
      }));
    }

    let tags = decode_field("tags", &row, row.tags.as_deref())?;
    let wichtig = decode_field("wichtig", &row, row.wichtig.as_deref())?;

    debug!(
      lecture_id = row.id,
      excerpts = excerpts.len(),
      "lecture resolved"
    );

    Ok(ResolvedView::Found(LectureView {
      id: row.id,
      lecture_number: row.lecture_number,
      part_number: row.part_number,
      given_name: row.given_name,
      titel: row.titel,
      thema: row.thema,
      tags,
      wichtig,
      name: request.name,
      excerpts,
    }))
  }

  /// Await a store call, mapping its failure or expiry to
  /// [`Error::StoreUnavailable`].
  async fn bounded<T, E>(
    &self,
    call: impl Future<Output = Result<T, E>>,
  ) -> Result<T>
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match tokio::time::timeout(self.timeout, call).await {
      Ok(result) => result.map_err(Error::store),
      Err(elapsed) => {
        warn!(timeout = ?self.timeout, "store call timed out");
        Err(Error::store(elapsed))
      }
    }
  }
}

fn decode_field(
  field: &'static str,
  row: &LectureRow,
  raw: Option<&str>,
) -> Result<Vec<String>> {
  codec::decode(raw.unwrap_or_default()).map_err(|source| Error::CorruptField {
    field,
    lecture_id: row.id,
    source,
  })
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use thiserror::Error;

  use super::*;

  // ─── Test double ────────────────────────────────────────────────────────────

  #[derive(Debug, Error)]
  #[error("simulated outage")]
  struct Outage;

  #[derive(Clone, Copy, PartialEq, Eq)]
  enum Fault {
    Lecture,
    Excerpts,
    HangExcerpts,
  }

  #[derive(Default)]
  struct MemoryStore {
    lectures:      Vec<LectureRow>,
    excerpts:      Vec<Excerpt>,
    fault:         Option<Fault>,
    excerpt_calls: AtomicUsize,
  }

  impl LectureStore for MemoryStore {
    type Error = Outage;

    async fn find_lecture(
      &self,
      number: u32,
      part: u32,
    ) -> Result<Option<LectureRow>, Outage> {
      if self.fault == Some(Fault::Lecture) {
        return Err(Outage);
      }
      Ok(
        self
          .lectures
          .iter()
          .find(|l| l.lecture_number == number && l.part_number == part)
          .cloned(),
      )
    }

    async fn find_excerpts(&self, lecture_id: i64) -> Result<Vec<Excerpt>, Outage> {
      self.excerpt_calls.fetch_add(1, Ordering::SeqCst);
      match self.fault {
        Some(Fault::Excerpts) => Err(Outage),
        Some(Fault::HangExcerpts) => std::future::pending().await,
        _ => Ok(
          self
            .excerpts
            .iter()
            .filter(|e| e.lecture_id == lecture_id)
            .cloned()
            .collect(),
        ),
      }
    }
  }

  fn lecture(id: i64, number: u32, part: u32) -> LectureRow {
    LectureRow {
      id,
      lecture_number: number,
      part_number: part,
      given_name: format!("Vorlesung {number}"),
      titel: "Betriebssysteme".into(),
      thema: "Speicherverwaltung".into(),
      tags: Some(r#"["a","b"]"#.into()),
      wichtig: Some(r#"["Klausurrelevant"]"#.into()),
    }
  }

  fn excerpt(id: i64, lecture_id: i64, text: &str) -> Excerpt {
    Excerpt {
      id,
      lecture_id,
      text: text.into(),
      start_time: format!("00:00:{id:02}"),
      end_time: format!("00:00:{:02}", id + 1),
    }
  }

  fn resolver(store: MemoryStore) -> Resolver<MemoryStore> {
    Resolver::new(Arc::new(store))
  }

  fn found(view: ResolvedView) -> LectureView {
    match view {
      ResolvedView::Found(v) => v,
      other => panic!("expected found view, got {other:?}"),
    }
  }

  // ─── Found ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn found_view_carries_row_and_decoded_lists() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(1, 4, 1), lecture(7, 5, 2)],
      excerpts: vec![
        excerpt(1, 7, "Hallo."),
        excerpt(2, 1, "Anderes."),
        excerpt(3, 7, "Weiter."),
      ],
      ..Default::default()
    });

    let view = r.resolve(5, Some(2), Some("intro".into())).await.unwrap();
    assert_eq!(view.view_name(), LECTURE_VIEW);

    let v = found(view);
    assert_eq!(v.id, 7);
    assert_eq!(v.lecture_number, 5);
    assert_eq!(v.part_number, 2);
    assert_eq!(v.titel, "Betriebssysteme");
    assert_eq!(v.thema, "Speicherverwaltung");
    assert_eq!(v.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(v.wichtig, vec!["Klausurrelevant".to_string()]);
    assert_eq!(v.name.as_deref(), Some("intro"));
    assert_eq!(v.excerpts.len(), 2);
    assert!(v.excerpts.iter().all(|e| e.lecture_id == v.id));
  }

  #[tokio::test]
  async fn lecture_without_excerpts_has_empty_sequence() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(3, 2, 1)],
      ..Default::default()
    });

    let v = found(r.resolve(2, Some(1), None).await.unwrap());
    assert!(v.excerpts.is_empty());
  }

  #[tokio::test]
  async fn absent_lists_decode_to_empty() {
    let mut row = lecture(1, 1, 1);
    row.tags = None;
    row.wichtig = Some(String::new());
    let r = resolver(MemoryStore { lectures: vec![row], ..Default::default() });

    let v = found(r.resolve(1, None, None).await.unwrap());
    assert!(v.tags.is_empty());
    assert!(v.wichtig.is_empty());
  }

  #[tokio::test]
  async fn omitted_part_resolves_like_part_one() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(1, 5, 1), lecture(2, 5, 2)],
      excerpts: vec![excerpt(1, 1, "Eins.")],
      ..Default::default()
    });

    let defaulted = r.resolve(5, None, Some("x".into())).await.unwrap();
    let explicit = r.resolve(5, Some(1), Some("x".into())).await.unwrap();
    assert_eq!(defaulted, explicit);
    assert_eq!(found(defaulted).part_number, 1);
  }

  // ─── Not found ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_lecture_echoes_request() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(1, 5, 1)],
      ..Default::default()
    });

    let view = r.resolve(5, Some(2), Some("intro".into())).await.unwrap();
    assert_eq!(view.view_name(), LECTURE_NOT_FOUND_VIEW);
    assert_eq!(
      view,
      ResolvedView::NotFound(NotFoundView {
        number: "5".into(),
        part:   "2".into(),
        name:   Some("intro".into()),
      })
    );
    assert_eq!(r.store().excerpt_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn missing_lecture_with_omitted_part_echoes_part_one() {
    let r = resolver(MemoryStore::default());

    let view = r.resolve(9, None, None).await.unwrap();
    assert_eq!(
      view,
      ResolvedView::NotFound(NotFoundView {
        number: "9".into(),
        part:   "1".into(),
        name:   None,
      })
    );
  }

  // ─── Faults ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn lecture_lookup_failure_is_a_fault() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(1, 5, 1)],
      fault: Some(Fault::Lecture),
      ..Default::default()
    });

    let err = r.resolve(5, None, None).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)), "{err:?}");
  }

  #[tokio::test]
  async fn excerpt_failure_is_a_fault_not_a_miss() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(1, 5, 1)],
      fault: Some(Fault::Excerpts),
      ..Default::default()
    });

    let err = r.resolve(5, Some(1), None).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)), "{err:?}");
    assert_eq!(r.store().excerpt_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn hanging_store_times_out_as_unavailable() {
    let r = resolver(MemoryStore {
      lectures: vec![lecture(1, 5, 1)],
      fault: Some(Fault::HangExcerpts),
      ..Default::default()
    })
    .with_timeout(Duration::from_millis(20));

    let err = r.resolve(5, Some(1), None).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)), "{err:?}");
  }

  #[tokio::test]
  async fn corrupt_tags_are_reported_not_emptied() {
    let mut row = lecture(4, 5, 1);
    row.tags = Some("['a', 'b']".into());
    let r = resolver(MemoryStore { lectures: vec![row], ..Default::default() });

    let err = r.resolve(5, Some(1), None).await.unwrap_err();
    match err {
      Error::CorruptField { field, lecture_id, .. } => {
        assert_eq!(field, "tags");
        assert_eq!(lecture_id, 4);
      }
      other => panic!("expected CorruptField, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn corrupt_wichtig_is_reported() {
    let mut row = lecture(4, 5, 1);
    row.wichtig = Some("{".into());
    let r = resolver(MemoryStore { lectures: vec![row], ..Default::default() });

    let err = r.resolve(5, Some(1), None).await.unwrap_err();
    assert!(
      matches!(err, Error::CorruptField { field: "wichtig", .. }),
      "{err:?}"
    );
  }

  #[tokio::test]
  async fn excerpt_of_another_lecture_is_a_fault() {
    struct Leaky(MemoryStore);

    impl LectureStore for Leaky {
      type Error = Outage;

      async fn find_lecture(
        &self,
        number: u32,
        part: u32,
      ) -> Result<Option<LectureRow>, Outage> {
        self.0.find_lecture(number, part).await
      }

      async fn find_excerpts(&self, _lecture_id: i64) -> Result<Vec<Excerpt>, Outage> {
        Ok(self.0.excerpts.clone())
      }
    }

    let r = Resolver::new(Arc::new(Leaky(MemoryStore {
      lectures: vec![lecture(1, 5, 1)],
      excerpts: vec![excerpt(1, 1, "Ok."), excerpt(2, 99, "Fremd.")],
      ..Default::default()
    })));

    let err = r.resolve(5, None, None).await.unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable(_)), "{err:?}");
  }
}
