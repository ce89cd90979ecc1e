//! Construction lookups in the model's zone geometry files.

use std::fs;
use std::path::Path;

use crate::{AppError, AppResult};

const ZONES_DIR: &str = "../zones";
const GEOMETRY_EXTENSION: &str = "geo";

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn contains_word(line: &str, word: &str) -> bool {
    line.match_indices(word).any(|(start, _)| {
        let before = line[..start].chars().next_back();
        let after = line[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Number of lines across `<work_dir>/../zones/*.geo` that contain `word` as
/// a whole word. A model without a zones directory has no matches.
pub fn count_geometry_matches(work_dir: &Path, word: &str) -> AppResult<usize> {
    if word.is_empty() {
        return Ok(0);
    }
    let zones = work_dir.join(ZONES_DIR);
    if !zones.is_dir() {
        return Ok(0);
    }

    let entries = fs::read_dir(&zones).map_err(AppError::model_file("list", &zones))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(AppError::model_file("list", &zones))?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == GEOMETRY_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut count = 0;
    for path in paths {
        let bytes = fs::read(&path).map_err(AppError::model_file("read", &path))?;
        count += String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| contains_word(line, word))
            .count();
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_words_only() {
        assert!(contains_word("*surf,wall,VERT,-,-,-,ext_wall,OPAQUE", "ext_wall"));
        assert!(!contains_word("ext_wall_2", "ext_wall"));
        assert!(!contains_word("my_ext_wall", "ext_wall"));
        assert!(contains_word("ext_wall_2 ext_wall", "ext_wall"));
        assert!(!contains_word("", "ext_wall"));
    }
}
