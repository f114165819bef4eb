//! Separator-aware path normalization.
//!
//! Selectors compare pattern base paths against the filesystem rendering of a
//! document URI, so both sides have to agree on separators and on how `.` and
//! `..` segments collapse. These helpers are pure string transforms: nothing
//! here touches the filesystem.

/// Normalize a path using the platform separator.
pub fn normalize(path: &str) -> String {
    normalize_with(path, std::path::MAIN_SEPARATOR)
}

/// Normalize a path, rendering with the given separator.
///
/// Both `/` and `\` are treated as separators on input. Repeated separators
/// collapse, `.` segments drop, `..` segments pop their parent (leading `..`
/// is kept for relative paths and clamped at the root for absolute ones).
/// Windows drive prefixes (`C:`) and UNC roots (`//server/share`) are
/// preserved, as is a trailing separator.
pub fn normalize_with(path: &str, separator: char) -> String {
    if path.is_empty() {
        return ".".to_owned();
    }

    let bytes = path.as_bytes();
    let mut rest = path;
    let mut drive: Option<&str> = None;
    let mut rooted = false;
    let mut unc = false;

    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        drive = Some(&path[..2]);
        rest = &path[2..];
        if rest.starts_with(is_separator) {
            rooted = true;
        }
    } else if bytes.len() >= 2 && is_separator(bytes[0] as char) && is_separator(bytes[1] as char) {
        rooted = true;
        unc = true;
        rest = &path[2..];
    } else if rest.starts_with(is_separator) {
        rooted = true;
    }

    let trailing = rest.chars().last().is_some_and(is_separator);

    let mut segments: Vec<&str> = Vec::new();
    // Segments below the floor are never popped by `..`: the leading run of
    // `..` in a relative path, and the server/share root of a UNC path.
    let mut floor = 0;
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.len() > floor {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                    floor = segments.len();
                }
            }
            other => {
                segments.push(other);
                if unc && floor < 2 {
                    floor = segments.len();
                }
            }
        }
    }

    let mut out = String::with_capacity(path.len());
    if let Some(drive) = drive {
        out.push_str(drive);
    }
    if unc {
        out.push(separator);
        out.push(separator);
    } else if rooted {
        out.push(separator);
    }
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(segment);
    }

    if segments.is_empty() && !rooted {
        // "a/.." and bare "C:" resolve to the current directory.
        out.push('.');
    }
    if trailing && !out.ends_with(separator) {
        out.push(separator);
    }
    out
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}
