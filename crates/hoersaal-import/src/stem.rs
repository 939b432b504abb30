//! Lecture identity from export file names.
//!
//! Exports are named `Vorlesung 5 - Teil 2 - Paging`, optionally prefixed
//! with `Zusammenfassung - `. Older exports deviate from that layout, so a
//! lenient pass looks for `Vorlesung N` and `Teil M` anywhere in the name.

use std::sync::LazyLock;

use regex::Regex;

static STRICT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^(?:Zusammenfassung\s*-\s*)?Vorlesung\s*(\d+)\s*-\s*Teil\s*(\d+)\s*-\s*(.+)",
  )
  .expect("valid regex")
});
static LECTURE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"Vorlesung\s*(\d+)").expect("valid regex"));
static PART: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"Teil\s*(\d+)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemKey {
  pub lecture_number: u32,
  pub part_number:    u32,
  pub given_name:     String,
}

/// Parse a file stem. Returns `None` if no lecture and part number can be
/// found, or if either is zero.
pub fn parse(stem: &str) -> Option<StemKey> {
  let key = strict(stem).or_else(|| lenient(stem))?;
  (key.lecture_number > 0 && key.part_number > 0).then_some(key)
}

fn strict(stem: &str) -> Option<StemKey> {
  let caps = STRICT.captures(stem)?;
  Some(StemKey {
    lecture_number: caps[1].parse().ok()?,
    part_number:    caps[2].parse().ok()?,
    given_name:     caps[3].trim().to_owned(),
  })
}

fn lenient(stem: &str) -> Option<StemKey> {
  let lecture_number = LECTURE.captures(stem)?[1].parse().ok()?;
  let part_number = PART.captures(stem)?[1].parse().ok()?;

  // The name is whatever follows the last dash, minus stray markers.
  let tail = stem.rsplit('-').next().unwrap_or(stem);
  let tail = LECTURE.replace_all(tail, "");
  let tail = PART.replace_all(&tail, "");
  let given_name = tail.trim_matches([' ', '-']).to_owned();

  Some(StemKey { lecture_number, part_number, given_name })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(number: u32, part: u32, name: &str) -> Option<StemKey> {
    Some(StemKey {
      lecture_number: number,
      part_number:    part,
      given_name:     name.to_owned(),
    })
  }

  #[test]
  fn standard_layout() {
    assert_eq!(parse("Vorlesung 5 - Teil 2 - Paging"), key(5, 2, "Paging"));
    assert_eq!(
      parse("Vorlesung 12 - Teil 1 - Threads - Teil A"),
      key(12, 1, "Threads - Teil A")
    );
  }

  #[test]
  fn summary_prefix() {
    assert_eq!(
      parse("Zusammenfassung - Vorlesung 3 - Teil 1 - Einführung"),
      key(3, 1, "Einführung")
    );
  }

  #[test]
  fn tight_spacing() {
    assert_eq!(parse("Vorlesung7-Teil3-Deadlocks"), key(7, 3, "Deadlocks"));
  }

  #[test]
  fn lenient_layout_uses_last_chunk() {
    assert_eq!(
      parse("BS Teil 2 Vorlesung 4 - Speicher"),
      key(4, 2, "Speicher")
    );
    assert_eq!(parse("Aufnahme - Vorlesung 4 Teil 2"), key(4, 2, ""));
  }

  #[test]
  fn unusable_names() {
    assert_eq!(parse("Notizen"), None);
    assert_eq!(parse("Vorlesung 4 - Speicher"), None);
    assert_eq!(parse("Vorlesung 0 - Teil 1 - Leer"), None);
    assert_eq!(parse("Vorlesung 1 - Teil 0 - Leer"), None);
  }
}
