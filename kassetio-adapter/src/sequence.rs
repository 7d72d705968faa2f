//! File-sequence templates and on-disk frame-range discovery.
//!
//! A sequence template is a path whose file name contains a single run of
//! `#` placeholder characters standing in for the frame number, padded to
//! the run length (`cat.####.exr` → `cat.0001.exr`).

use std::path::Path;

/// Sentinel used to materialize an example path from a template. Chosen so
/// its decimal text cannot collide with a real padded frame number.
const SENTINEL_FRAME: i64 = 9_999_999;

/// Locates the placeholder run in `template`'s file-name component,
/// returning its byte range. `None` when there is no run, or more than
/// one.
fn placeholder_run(template: &str) -> Option<(usize, usize)> {
    let name_start = template.rfind('/').map_or(0, |sep| sep + 1);
    let name = template[name_start..].as_bytes();

    let mut run = None;
    let mut index = 0;
    while index < name.len() {
        if name[index] == b'#' {
            let start = index;
            while index < name.len() && name[index] == b'#' {
                index += 1;
            }
            if run.is_some() {
                return None;
            }
            run = Some((name_start + start, name_start + index));
        } else {
            index += 1;
        }
    }
    run
}

/// Whether `path` is a recognizable file-sequence template.
#[must_use]
pub fn is_file_sequence(path: &str) -> bool {
    placeholder_run(path).is_some()
}

/// Substitutes `frame` into a template, zero-padding to the placeholder
/// run's length when `padded`. A non-template input passes through
/// unchanged.
#[must_use]
pub fn resolve_file_sequence(template: &str, frame: i64, padded: bool) -> String {
    let Some((start, end)) = placeholder_run(template) else {
        return template.to_string();
    };
    let width = end - start;
    let frame_text = if padded {
        format!("{frame:0width$}")
    } else {
        frame.to_string()
    };
    format!("{}{}{}", &template[..start], frame_text, &template[end..])
}

/// Strict whole-substring frame parse: optional leading `-`, then digits
/// only. Anything else (including a `+` sign or stray characters) is not a
/// frame.
fn parse_frame(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Finds the inclusive min/max frame numbers of a sequence on disk.
///
/// Globs the template's directory for files matching the template's
/// prefix and suffix, parsing the in-between text as a frame number.
/// Best-effort discovery: a missing directory, unparsable neighbours, or
/// no matching files at all are a normal `None`, never an error.
#[must_use]
pub fn find_frame_range(sequence_template: &str) -> Option<(i64, i64)> {
    if !is_file_sequence(sequence_template) {
        return None;
    }

    // Materialize an example path from the sentinel, then split at the
    // sentinel's text to recover the literal prefix/suffix for matching.
    let sentinel_text = SENTINEL_FRAME.to_string();
    let example = resolve_file_sequence(sequence_template, SENTINEL_FRAME, true);

    let split = example.find(&sentinel_text)?;
    let (prefix, rest) = example.split_at(split);
    let suffix = &rest[sentinel_text.len()..];
    if suffix.contains(&sentinel_text) {
        return None;
    }

    let directory = Path::new(prefix).parent()?;
    let entries = std::fs::read_dir(directory).ok()?;

    let mut min_frame = i64::MAX;
    let mut max_frame = i64::MIN;

    for entry in entries.flatten() {
        let is_file = entry
            .file_type()
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        let path = entry.path();
        let Some(path_text) = path.to_str() else {
            continue;
        };

        if path_text.len() <= prefix.len() + suffix.len()
            || !path_text.starts_with(prefix)
            || !path_text.ends_with(suffix)
        {
            continue;
        }

        let frame_text = &path_text[prefix.len()..path_text.len() - suffix.len()];
        if let Some(frame) = parse_frame(frame_text) {
            min_frame = min_frame.min(frame);
            max_frame = max_frame.max(frame);
        }
    }

    (min_frame <= max_frame).then_some((min_frame, max_frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;

    #[test]
    fn template_recognition() {
        assert!(is_file_sequence("/renders/cat.####.exr"));
        assert!(is_file_sequence("cat.#.exr"));
        assert!(!is_file_sequence("/renders/cat.0001.exr"));
        // Two separate runs are ambiguous.
        assert!(!is_file_sequence("/renders/cat.##.##.exr"));
        // Placeholders in a directory component don't make a sequence.
        assert!(!is_file_sequence("/renders/####/cat.exr"));
    }

    #[test]
    fn resolve_pads_to_run_length() {
        assert_eq!(
            resolve_file_sequence("/renders/cat.####.exr", 7, true),
            "/renders/cat.0007.exr"
        );
        assert_eq!(
            resolve_file_sequence("/renders/cat.####.exr", 7, false),
            "/renders/cat.7.exr"
        );
        assert_eq!(
            resolve_file_sequence("/renders/cat.##.exr", 12345, true),
            "/renders/cat.12345.exr"
        );
    }

    #[test]
    fn resolve_passes_non_templates_through() {
        assert_eq!(
            resolve_file_sequence("/renders/cat.exr", 7, true),
            "/renders/cat.exr"
        );
    }

    #[test]
    fn strict_frame_parse() {
        assert_eq!(parse_frame("0001"), Some(1));
        assert_eq!(parse_frame("-5"), Some(-5));
        assert_eq!(parse_frame("+5"), None);
        assert_eq!(parse_frame(""), None);
        assert_eq!(parse_frame("1a"), None);
        assert_eq!(parse_frame(" 1"), None);
    }

    #[test]
    fn frame_range_of_a_sequence_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        for frame in 1..=10 {
            File::create(dir.path().join(format!("cat.{frame:04}.exr"))).unwrap();
        }
        // Neighbours that must not contribute frames.
        File::create(dir.path().join("cat.notaframe.exr")).unwrap();
        File::create(dir.path().join("other.0099.exr")).unwrap();

        let template = dir.path().join("cat.####.exr");
        assert_eq!(find_frame_range(template.to_str().unwrap()), Some((1, 10)));
    }

    #[test]
    fn unpadded_frames_still_match() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("cat.7.exr")).unwrap();
        File::create(dir.path().join("cat.1234567.exr")).unwrap();

        let template = dir.path().join("cat.####.exr");
        assert_eq!(
            find_frame_range(template.to_str().unwrap()),
            Some((7, 1_234_567))
        );
    }

    #[test]
    fn no_matching_files_is_no_range() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("cat.####.exr");
        assert_eq!(find_frame_range(template.to_str().unwrap()), None);
    }

    #[test]
    fn missing_directory_is_no_range() {
        assert_eq!(find_frame_range("/nonexistent/dir/cat.####.exr"), None);
    }

    #[test]
    fn non_template_is_no_range() {
        assert_eq!(find_frame_range("/renders/cat.0001.exr"), None);
    }
}
