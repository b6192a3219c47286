//! Samples the resident memory of the running process. This is a whole
//! process figure rather than the allocations made by a single search, so
//! it is only meaningful when the algorithms are run one after another.

use std::fs;

/// Current resident set size in bytes, read from /proc/self/status. Returns
/// None on platforms without procfs, or if the file can't be parsed
pub fn resident_memory() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

/// Pull the VmRSS line out of a /proc status file. The kernel reports this
/// in kB
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;

    let mut fields = line["VmRSS:".len()..].split_whitespace();
    let value: u64 = fields.next()?.parse().ok()?;

    match fields.next() {
        Some("kB") | None => Some(value * 1024),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tsea-router\nVmPeak:\t  20000 kB\nVmRSS:\t    1234 kB\nThreads:\t4\n";

        assert_eq!(parse_vm_rss(status), Some(1234 * 1024));
    }

    #[test]
    fn test_parse_vm_rss_missing() {
        assert_eq!(parse_vm_rss("Name:\tsea-router\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\tlots kB\n"), None);
    }

    /// Any Linux process has a non-zero resident set
    #[cfg(target_os = "linux")]
    #[test]
    fn test_resident_memory_linux() {
        let memory = resident_memory();

        assert!(matches!(memory, Some(bytes) if bytes > 0));
    }
}
