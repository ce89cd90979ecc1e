//! File name classification.
//!
//! These patterns decide which files survive a run, so they are matched
//! exactly and in this priority order.

/// Extension of exported tabular data; renamed to `<variant>.csv`.
pub const TABLE_EXTENSION: &str = ".csv";
/// Extension of secondary data files kept under their own name.
pub const DATA_EXTENSION: &str = ".dat";
pub const SCRATCH_EXTENSION: &str = ".scratch";
/// Engine leftovers that are deleted outright.
pub const JUNK_PREFIXES: [&str; 2] = ["fort.", "graphic."];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// `<variant>.*`, moved into the results directory unchanged.
    VariantResult,
    /// `*.csv`, renamed to `<variant>.csv` inside the results directory.
    Table,
    /// `*.dat`, moved into the results directory unchanged.
    Data,
    /// `*.scratch`, moved into the scratch archive.
    Scratch,
    /// Deleted.
    Junk,
    Untouched,
}

pub fn classify(file_name: &str, variant: &str) -> Classification {
    let variant_prefix = file_name
        .strip_prefix(variant)
        .is_some_and(|rest| rest.starts_with('.'));

    if variant_prefix {
        Classification::VariantResult
    } else if file_name.ends_with(TABLE_EXTENSION) {
        Classification::Table
    } else if file_name.ends_with(DATA_EXTENSION) {
        Classification::Data
    } else if file_name.ends_with(SCRATCH_EXTENSION) {
        Classification::Scratch
    } else if JUNK_PREFIXES.iter().any(|p| file_name.starts_with(p)) {
        Classification::Junk
    } else {
        Classification::Untouched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order() {
        assert_eq!(classify("X.res", "X"), Classification::VariantResult);
        // Variant prefix wins over every extension rule.
        assert_eq!(classify("X.csv", "X"), Classification::VariantResult);
        assert_eq!(classify("X.scratch", "X"), Classification::VariantResult);
        assert_eq!(classify("data.csv", "X"), Classification::Table);
        assert_eq!(classify("trace.dat", "X"), Classification::Data);
        assert_eq!(classify("op.scratch", "X"), Classification::Scratch);
        assert_eq!(classify("fort.12", "X"), Classification::Junk);
        assert_eq!(classify("graphic.3", "X"), Classification::Junk);
        assert_eq!(classify("house.cfg", "X"), Classification::Untouched);
    }

    #[test]
    fn variant_prefix_needs_separator() {
        assert_eq!(classify("XY.res", "X"), Classification::Untouched);
        assert_eq!(classify("X_bps.scratch", "X"), Classification::Scratch);
        assert_eq!(classify("X", "X"), Classification::Untouched);
    }

    #[test]
    fn junk_prefix_needs_dot() {
        assert_eq!(classify("fortran.txt", "X"), Classification::Untouched);
        assert_eq!(classify("graphics", "X"), Classification::Untouched);
    }
}
