/// Trim a fully qualified type path down to the bare type name, for use
/// as a component's default log label.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
