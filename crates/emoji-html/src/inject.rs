//! Build-time injection of pre-rendered results into the page shell

/// Opening tag of the results container; markup goes right after it
pub const CONTAINER_MARKER: &str = "<ul class=\"emojis-container\">";

/// Insert `markup` after the container marker.
///
/// Returns the template unchanged (with a warning) when the marker is absent.
pub fn inject_markup(template: &str, markup: &str) -> String {
    if !template.contains(CONTAINER_MARKER) {
        tracing::warn!("Container marker {} not found; page left unchanged", CONTAINER_MARKER);
        return template.to_string();
    }
    template.replacen(CONTAINER_MARKER, &format!("{}\n      {}", CONTAINER_MARKER, markup), 1)
}
