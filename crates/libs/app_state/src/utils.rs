use std::path::Path;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Converts a path to a POSIX-style string, replacing backslashes with forward slashes.
#[must_use]
pub fn to_posix_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[must_use]
pub const fn mb_to_bytes(mb: u64) -> u64 {
    mb.saturating_mul(BYTES_PER_MB)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn posix_string_uses_forward_slashes() {
        let path: PathBuf = ["photos", "original", "2025", "03"].iter().collect();
        assert_eq!(to_posix_string(&path), "photos/original/2025/03");
        assert_eq!(to_posix_string(Path::new(r"photos\original")), "photos/original");
    }

    #[test]
    fn megabytes_are_binary() {
        assert_eq!(mb_to_bytes(0), 0);
        assert_eq!(mb_to_bytes(30), 30 * 1024 * 1024);
        assert_eq!(mb_to_bytes(u64::MAX), u64::MAX);
    }
}
