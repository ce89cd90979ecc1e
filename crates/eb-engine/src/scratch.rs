//! Scratch file naming and scanning.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const SCRATCH_EXTENSION: &str = "scratch";

/// Printed by the simulator when a run completes.
pub const CPU_TIME_MARKER: &str = "CPU time:";

/// `<label>_<operation>.scratch`
pub fn scratch_file_name(label: &str, operation: &str) -> String {
    format!("{}_{}.{}", label, operation, SCRATCH_EXTENSION)
}

/// First line of the scratch file containing [`CPU_TIME_MARKER`], trimmed.
///
/// Engine output is not guaranteed to be UTF-8; lines are decoded lossily.
pub fn find_cpu_time(path: &Path) -> io::Result<Option<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        if line.contains(CPU_TIME_MARKER) {
            return Ok(Some(line.trim().to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_label_and_operation() {
        assert_eq!(scratch_file_name("ctl", "bps"), "ctl_bps.scratch");
        assert_eq!(scratch_file_name("house", "set_mgp"), "house_set_mgp.scratch");
    }

    #[test]
    fn finds_marker_in_non_utf8_output() {
        let path = std::env::temp_dir().join(format!(
            "eb_engine_scan_{}.scratch",
            std::process::id()
        ));
        let mut content = b"Simulation started\n\xff\xfe garbage\n".to_vec();
        content.extend_from_slice(b"  CPU time: 12.5s \nbye\n");
        std::fs::write(&path, content).unwrap();

        let found = find_cpu_time(&path).unwrap();
        assert_eq!(found.as_deref(), Some("CPU time: 12.5s"));
        let _ = std::fs::remove_file(path);
    }
}
