//! Merge transcript fragments into whole sentences.
//!
//! Speech-to-text output splits sentences across several timed fragments.
//! Unterminated fragments of one lecture are collected into a running
//! sentence. A fragment ending with `.`, `?` or `!` is complete on its own:
//! it first flushes the running sentence, then becomes a row by itself. Each
//! row spans from its first fragment's start to its last fragment's end.

use crate::lecture::{Excerpt, FusedExcerpt};

const TERMINATORS: [char; 3] = ['.', '?', '!'];

struct Pending {
  lecture_id: i64,
  text:       String,
  start_time: String,
  end_time:   String,
}

impl Pending {
  fn start(e: &Excerpt) -> Self {
    Self {
      lecture_id: e.lecture_id,
      text:       e.text.trim().to_owned(),
      start_time: e.start_time.clone(),
      end_time:   e.end_time.clone(),
    }
  }

  fn extend(&mut self, e: &Excerpt) {
    let text = e.text.trim();
    if !text.is_empty() {
      if !self.text.is_empty() {
        self.text.push(' ');
      }
      self.text.push_str(text);
    }
    self.end_time.clone_from(&e.end_time);
  }

  fn finish(self) -> Option<FusedExcerpt> {
    (!self.text.is_empty()).then_some(FusedExcerpt {
      lecture_id: self.lecture_id,
      text:       self.text,
      start_time: self.start_time,
      end_time:   self.end_time,
    })
  }
}

/// Fuse `excerpts` into sentences.
///
/// The input must be ordered by lecture, then start time, which is the order
/// the store yields them in. Fragments are never merged across lectures, and
/// an unterminated tail is kept as a sentence of its own.
pub fn fuse(excerpts: &[Excerpt]) -> Vec<FusedExcerpt> {
  let mut out = Vec::new();
  let mut pending: Option<Pending> = None;

  for e in excerpts {
    if pending.as_ref().is_some_and(|p| p.lecture_id != e.lecture_id) {
      out.extend(pending.take().and_then(Pending::finish));
    }

    if e.text.trim_end().ends_with(TERMINATORS) {
      out.extend(pending.take().and_then(Pending::finish));
      out.extend(Pending::start(e).finish());
      continue;
    }

    match pending.as_mut() {
      Some(p) => p.extend(e),
      None => pending = Some(Pending::start(e)),
    }
  }

  out.extend(pending.and_then(Pending::finish));
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frag(lecture_id: i64, text: &str, start: &str, end: &str) -> Excerpt {
    Excerpt {
      id: 0,
      lecture_id,
      text: text.into(),
      start_time: start.into(),
      end_time: end.into(),
    }
  }

  #[test]
  fn joins_unterminated_fragments() {
    let fused = fuse(&[
      frag(1, "Heute geht es", "00:00", "00:02"),
      frag(1, " um", "00:02", "00:03"),
      frag(1, "Paging", "00:03", "00:04"),
    ]);

    assert_eq!(fused, vec![FusedExcerpt {
      lecture_id: 1,
      text:       "Heute geht es um Paging".into(),
      start_time: "00:00".into(),
      end_time:   "00:04".into(),
    }]);
  }

  #[test]
  fn terminated_fragment_is_its_own_row() {
    let fused = fuse(&[
      frag(1, "Heute geht es", "00:00", "00:02"),
      frag(1, " um Paging.", "00:02", "00:04"),
      frag(1, "Fragen?", "00:04", "00:05"),
    ]);

    assert_eq!(fused, vec![
      FusedExcerpt {
        lecture_id: 1,
        text:       "Heute geht es".into(),
        start_time: "00:00".into(),
        end_time:   "00:02".into(),
      },
      FusedExcerpt {
        lecture_id: 1,
        text:       "um Paging.".into(),
        start_time: "00:02".into(),
        end_time:   "00:04".into(),
      },
      FusedExcerpt {
        lecture_id: 1,
        text:       "Fragen?".into(),
        start_time: "00:04".into(),
        end_time:   "00:05".into(),
      },
    ]);
  }

  #[test]
  fn unterminated_tail_is_flushed() {
    let fused = fuse(&[
      frag(1, "Das war's.", "00:00", "00:01"),
      frag(1, "Bis zum", "00:01", "00:02"),
      frag(1, "nächsten Mal", "00:02", "00:03"),
    ]);

    assert_eq!(fused.len(), 2);
    assert_eq!(fused[1].text, "Bis zum nächsten Mal");
    assert_eq!(fused[1].start_time, "00:01");
    assert_eq!(fused[1].end_time, "00:03");
  }

  #[test]
  fn never_merges_across_lectures() {
    let fused = fuse(&[
      frag(1, "Ende ohne Punkt", "00:09", "00:10"),
      frag(2, "Neuer Anfang!", "00:00", "00:01"),
    ]);

    assert_eq!(fused.len(), 2);
    assert_eq!((fused[0].lecture_id, fused[0].text.as_str()), (1, "Ende ohne Punkt"));
    assert_eq!(fused[0].end_time, "00:10");
    assert_eq!((fused[1].lecture_id, fused[1].text.as_str()), (2, "Neuer Anfang!"));
  }

  #[test]
  fn blank_fragments_produce_nothing() {
    assert!(fuse(&[]).is_empty());
    assert!(fuse(&[frag(1, "   ", "00:00", "00:01")]).is_empty());
  }
}
