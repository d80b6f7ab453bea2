//! Line-oriented unified diffs between snapshot versions.

use similar::{ChangeTag, TextDiff};

/// Lines of unchanged context shown around each change.
const CONTEXT_LINES: usize = 1;

/// Generate a unified diff from `previous` to `current`.
///
/// The header carries fixed labels and no timestamps, so the output is
/// stable for identical inputs. Identical inputs produce an empty string.
pub fn diff(previous: &str, current: &str) -> String {
    let diff = TextDiff::from_lines(previous, current);
    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_LINES);

    let mut output = String::new();
    for (idx, hunk) in unified.iter_hunks().enumerate() {
        if idx == 0 {
            output.push_str("--- Previous\n");
            output.push_str("+++ Current\n");
        }
        output.push_str(&format!("{}\n", hunk.header()));

        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };

            output.push_str(sign);
            output.push_str(change.value());
            if !change.value().ends_with('\n') {
                output.push('\n');
            }
        }
    }

    output
}
