//! Filesystem path masking.
//!
//! Matches Windows drive and UNC paths and POSIX absolute paths. The whole
//! input must be a path; paths embedded in larger text are not matched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::base::RegexMasking;

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:[a-zA-Z]:|\\\\[\w-]+\\[\w-]+\$?|/[^/\x00]+)+(\\[^\\/:*?"<>|]*)*(\\?)?$"#)
        .expect("hard-coded path pattern must compile")
});

/// Masks filesystem paths, optionally keeping the final segment visible.
#[derive(Clone, Copy, Debug)]
pub struct PathMaskingOperator {
    keep_last_segment: bool,
}

impl PathMaskingOperator {
    /// Creates the operator. With `keep_last_segment` the file name (or,
    /// for a directory path, the final directory name) is appended after
    /// the mask.
    pub fn new(keep_last_segment: bool) -> Self {
        Self { keep_last_segment }
    }
}

impl Default for PathMaskingOperator {
    fn default() -> Self {
        Self::new(true)
    }
}

/// The final path segment: the file name when the path ends in one, the
/// final directory name otherwise. A bare drive root comes back whole.
fn final_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['\\', '/']);
    if trimmed.is_empty() {
        return path;
    }
    match trimmed.rfind(['\\', '/']) {
        Some(idx) => &trimmed[idx + 1..],
        None => path,
    }
}

impl RegexMasking for PathMaskingOperator {
    fn pattern(&self) -> &Regex {
        &PATH_PATTERN
    }

    fn preprocess_mask(&self, mask: &str, found: &Captures<'_>) -> String {
        if self.keep_last_segment {
            format!("{mask}{}", final_segment(&found[0]))
        } else {
            mask.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::MaskingOperator;

    const MASK: &str = r"***\";

    fn masked(input: &str, keep_last_segment: bool) -> String {
        let outcome = PathMaskingOperator::new(keep_last_segment).mask(input, MASK);
        if outcome.matched {
            outcome.result
        } else {
            input.to_string()
        }
    }

    #[test]
    fn windows_file_path() {
        assert_eq!(masked(r"C:\Users\Admin\Secret\File.dll", false), r"***\");
        assert_eq!(
            masked(r"C:\Users\Admin\Secret\File.dll", true),
            r"***\File.dll"
        );
        assert_eq!(
            masked(r"C:\Users\Admin\Secret\Hidden\File.dll", true),
            r"***\File.dll"
        );
    }

    #[test]
    fn windows_directory_path() {
        assert_eq!(masked(r"C:\Users\Admin\Secret\Hidden", false), r"***\");
        assert_eq!(masked(r"C:\Users\Admin\Secret\Hidden", true), r"***\Hidden");
        assert_eq!(masked(r"C:\Users\Admin\Secret", true), r"***\Secret");
        assert_eq!(masked(r"C:\Users\", true), r"***\Users");
    }

    #[test]
    fn posix_path() {
        assert_eq!(
            masked("/home/i_use_arch_linux_btw", true),
            r"***\i_use_arch_linux_btw"
        );
        assert_eq!(masked("/home/i_use_arch_linux_btw", false), r"***\");
    }

    #[test]
    fn bare_drive_root_keeps_the_whole_match() {
        assert_eq!(masked(r"C:\", true), r"***\C:\");
        assert_eq!(masked(r"C:\", false), r"***\");
    }

    #[test]
    fn non_paths_are_untouched() {
        assert_eq!(masked("File.txt", false), "File.txt");
        assert_eq!(masked("This is not a path", false), "This is not a path");
    }
}
