use super::EntityId;

/// Identifier encoded in the last path segment of a reference URL.
///
/// Trailing slashes are ignored; anything but ASCII digits in the final
/// segment (or an empty input) yields `None`.
pub fn reference_id(url: &str) -> Option<EntityId> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;

    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    segment.parse().ok()
}
