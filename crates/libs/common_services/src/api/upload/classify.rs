//! Content sniffing for uploads.
//!
//! The verdict trusts the leading bytes first and the client's file extension second, so a
//! stream that sniffs ambiguously still gets accepted when it is named like an image.

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Sniffed type, `None` when the prefix is inconclusive.
    pub mime: Option<&'static str>,
    pub accepted: bool,
}

/// Classifies an upload from its first bytes (at most 512 are looked at) and its client name.
#[must_use]
pub fn classify(head: &[u8], file_name: &str) -> Classification {
    let mime = sniff_mime(head);
    let sniffed_image = mime.is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m));
    Classification {
        mime,
        accepted: sniffed_image || has_allowed_extension(file_name),
    }
}

#[must_use]
pub fn sniff_mime(head: &[u8]) -> Option<&'static str> {
    if head.is_empty() {
        return None;
    }
    infer::get(head)
        .map(|kind| kind.mime_type())
        .or_else(|| looks_like_text(head).then_some(TEXT_PLAIN))
}

/// UTF-8 without binary control bytes. A multi-byte character cut off by the prefix boundary
/// still counts as text.
fn looks_like_text(head: &[u8]) -> bool {
    let valid = match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    };
    valid
        && !head
            .iter()
            .any(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0C | 0x1B))
}

fn has_allowed_extension(file_name: &str) -> bool {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    base.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}
