//! The US-numbering-plan phone codec.
//!
//! Stored form is E.164 (`+15551234567`), with an `x1234` suffix when an
//! extension is present. Logical form is the international display format
//! (`+1 555-123-4567`, extensions shown as ` ext. 1234`). Both directions
//! are parse-or-passthrough: a value that does not look like a US number is
//! returned unchanged, never rejected, so legacy data survives round-trips.

use crate::passthrough;

/// A parsed ten-digit US number plus optional extension.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UsNumber {
  /// Exactly ten ASCII digits.
  national:  String,
  extension: Option<String>,
}

impl UsNumber {
  /// Machine-readable storage form: `+1XXXXXXXXXX` (`xN` suffix for
  /// extensions).
  fn e164(&self) -> String {
    match &self.extension {
      Some(ext) => format!("+1{}x{ext}", self.national),
      None => format!("+1{}", self.national),
    }
  }

  /// Human-readable international form: `+1 555-123-4567` (` ext. N` for
  /// extensions).
  fn international(&self) -> String {
    let (area, rest) = self.national.split_at(3);
    let (exchange, line) = rest.split_at(3);
    match &self.extension {
      Some(ext) => format!("+1 {area}-{exchange}-{line} ext. {ext}"),
      None => format!("+1 {area}-{exchange}-{line}"),
    }
  }
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Split off a trailing extension introduced by `ext`, `ext.`, `x` or `#`.
fn split_extension(s: &str) -> (&str, Option<&str>) {
  let lower = s.to_ascii_lowercase();
  if let Some(pos) = lower.find("ext") {
    let rest = s[pos + 3..].trim_start_matches(['.', ':', ' ']);
    return (&s[..pos], Some(rest));
  }
  if let Some(pos) = lower.rfind(['x', '#']) {
    return (&s[..pos], Some(s[pos + 1..].trim()));
  }
  (s, None)
}

fn parse(raw: &str) -> Option<UsNumber> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }

  let (main, ext) = split_extension(trimmed);

  let extension = match ext {
    Some(e) => {
      if e.is_empty() || !e.bytes().all(|b| b.is_ascii_digit()) {
        return None;
      }
      Some(e.to_string())
    }
    None => None,
  };

  let mut digits = String::new();
  let mut has_plus = false;
  for (i, c) in main.trim().char_indices() {
    match c {
      '0'..='9' => digits.push(c),
      '+' if i == 0 => has_plus = true,
      ' ' | '-' | '.' | '(' | ')' | '/' => {}
      _ => return None,
    }
  }

  // A leading +1 or bare 1 country prefix is allowed; anything else must be
  // the ten national digits.
  let national = match (has_plus, digits.len()) {
    (true, 11) if digits.starts_with('1') => &digits[1..],
    (false, 11) if digits.starts_with('1') => &digits[1..],
    (false, 10) => &digits[..],
    _ => return None,
  };

  // Area codes never start with 0 or 1.
  if national.starts_with('0') || national.starts_with('1') {
    return None;
  }

  Some(UsNumber {
    national:  national.to_string(),
    extension,
  })
}

// ─── Codec surface ───────────────────────────────────────────────────────────

/// Reformat to the E.164 storage form; passthrough when unparseable.
pub fn encode(raw: &str) -> String {
  match parse(raw) {
    Some(n) => n.e164(),
    None => {
      passthrough::note("phone", raw);
      raw.to_string()
    }
  }
}

/// Reformat stored text to the international display form; passthrough when
/// unparseable. The empty string is returned as-is without being treated as
/// a parse failure.
pub fn decode(raw: &str) -> String {
  if raw.is_empty() {
    return String::new();
  }
  match parse(raw) {
    Some(n) => n.international(),
    None => {
      passthrough::note("phone", raw);
      raw.to_string()
    }
  }
}
