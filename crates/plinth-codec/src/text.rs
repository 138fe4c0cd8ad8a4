//! Plain-text field helpers: trimming and length checks.
//!
//! Storage decode/encode for text kinds is the identity; only the
//! form-input path strips whitespace before the usual checks run.

use plinth_core::schema::FieldDef;

/// Strip surrounding whitespace from raw user input.
pub fn clean(raw: &str) -> String { raw.trim().to_string() }

/// Check `value` against the field's length cap, if any. Counts characters,
/// not bytes.
pub fn check_length(def: &FieldDef, value: &str) -> Option<String> {
  let max = def.max_length? as usize;
  let len = value.chars().count();
  if len > max {
    Some(format!(
      "ensure this value has at most {max} characters (it has {len})"
    ))
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use plinth_core::schema::FieldDef;

  use super::*;

  #[test]
  fn clean_strips_whitespace() {
    assert_eq!(clean("  hello \n"), "hello");
  }

  #[test]
  fn length_check_counts_characters() {
    let def = FieldDef::trimmed("name").with_max_length(3);
    assert!(check_length(&def, "abc").is_none());
    let msg = check_length(&def, "abcd").unwrap();
    assert!(msg.contains("at most 3"));
    assert!(msg.contains("it has 4"));
    // Multibyte characters count once each.
    assert!(check_length(&def, "äöü").is_none());
  }

  #[test]
  fn fields_without_a_cap_accept_anything() {
    let def = FieldDef::trimmed("notes");
    assert!(check_length(&def, &"x".repeat(10_000)).is_none());
  }
}
