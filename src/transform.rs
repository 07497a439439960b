//! # Transform Module
//!
//! Pure text transformations behind the mutation commands. Each function
//! returns [`Cow::Borrowed`] when it has nothing to change, so callers can tell
//! a no-op from a rewrite without comparing strings.
//!
//! Line handling differs on purpose between the transformations:
//! - prefix and comment stripping and insertion walk `\n`-terminated lines and
//!   keep every line ending as it was
//! - the year replacement splits on `\n` and rejoins with a single `\n`, which
//!   reproduces the input exactly

use std::borrow::Cow;

/// Removes every line that starts with `prefix`, anywhere in the content.
pub fn strip_prefixed_lines<'a>(content: &'a str, prefix: &str) -> Cow<'a, str> {
  if !content.split_inclusive('\n').any(|line| line.starts_with(prefix)) {
    return Cow::Borrowed(content);
  }

  Cow::Owned(
    content
      .split_inclusive('\n')
      .filter(|line| !line.starts_with(prefix))
      .collect(),
  )
}

/// Removes the leading run of `#` lines and whitespace-only lines.
///
/// Stripping stops at the first line that is neither; that line and every
/// line after it are kept whatever they contain.
pub fn strip_leading_comments(content: &str) -> Cow<'_, str> {
  let offset: usize = content
    .split_inclusive('\n')
    .take_while(|line| is_leading_comment_line(line))
    .map(str::len)
    .sum();

  Cow::Borrowed(&content[offset..])
}

fn is_leading_comment_line(line: &str) -> bool {
  line.starts_with('#') || (!line.is_empty() && line.chars().all(char::is_whitespace))
}

/// Replaces every occurrence of `from` with `to` within the first
/// `header_lines` lines.
///
/// The match is a plain substring match, so `2023` inside `120234` is
/// replaced too. Lines past the window are re-emitted unchanged.
pub fn replace_year_in_header<'a>(content: &'a str, from: &str, to: &str, header_lines: usize) -> Cow<'a, str> {
  if from.is_empty() || from == to {
    return Cow::Borrowed(content);
  }

  let mut changed = false;
  let lines: Vec<Cow<'_, str>> = content
    .split('\n')
    .enumerate()
    .map(|(index, line)| {
      if index < header_lines && line.contains(from) {
        changed = true;
        Cow::Owned(line.replace(from, to))
      } else {
        Cow::Borrowed(line)
      }
    })
    .collect();

  if changed {
    Cow::Owned(lines.join("\n"))
  } else {
    Cow::Borrowed(content)
  }
}

/// Inserts `text` verbatim before line `line` (0-indexed).
///
/// A line index past the end appends the text. When the content does not end
/// with a newline, one is added before appending so the last line stays
/// intact.
pub fn insert_at_line<'a>(content: &'a str, text: &str, line: usize) -> Cow<'a, str> {
  if text.is_empty() {
    return Cow::Borrowed(content);
  }

  let offset: usize = content.split_inclusive('\n').take(line).map(str::len).sum();
  let mut output = String::with_capacity(content.len() + text.len() + 1);

  if offset == content.len() && !content.is_empty() && !content.ends_with('\n') {
    output.push_str(content);
    output.push('\n');
    output.push_str(text);
  } else {
    output.push_str(&content[..offset]);
    output.push_str(text);
    output.push_str(&content[offset..]);
  }

  Cow::Owned(output)
}
