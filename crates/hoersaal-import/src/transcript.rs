//! Timestamped transcript files.
//!
//! One header line, then `start;end;text` records. Fields may be wrapped in
//! double quotes (doubling `""` for a literal quote), which also lets the
//! text contain `;` or line breaks. Records with fewer than three fields are
//! ignored; extra fields are dropped.

use hoersaal_core::lecture::NewExcerpt;

/// Parse a transcript file's contents into excerpts, in file order.
pub fn parse(input: &str) -> Vec<NewExcerpt> {
  let body = match input.split_once('\n') {
    Some((_header, rest)) => rest,
    None => "",
  };

  records(body)
    .into_iter()
    .filter(|r| r.len() >= 3)
    .map(|mut r| {
      r.truncate(3);
      let text = r.pop().unwrap_or_default();
      let end_time = r.pop().unwrap_or_default();
      let start_time = r.pop().unwrap_or_default();
      NewExcerpt { text, start_time, end_time }
    })
    .collect()
}

fn records(input: &str) -> Vec<Vec<String>> {
  let mut out = Vec::new();
  let mut record = Vec::new();
  let mut field = String::new();
  let mut quoted = false;
  let mut chars = input.chars().peekable();

  while let Some(c) = chars.next() {
    match (quoted, c) {
      (true, '"') if chars.peek() == Some(&'"') => {
        chars.next();
        field.push('"');
      }
      (true, '"') => quoted = false,
      (true, c) => field.push(c),
      (false, '"') => quoted = true,
      (false, ';') => record.push(std::mem::take(&mut field)),
      (false, '\n') => {
        record.push(std::mem::take(&mut field));
        out.push(std::mem::take(&mut record));
      }
      (false, '\r') => {}
      (false, c) => field.push(c),
    }
  }

  if !field.is_empty() || !record.is_empty() {
    record.push(field);
    out.push(record);
  }
  out
}
