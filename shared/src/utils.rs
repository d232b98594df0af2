use ulid::Ulid;

pub fn generate_ulid() -> String {
    Ulid::new().to_string()
}

/// Canonical (uppercase) form of a ULID, or `None` if `id` is not one.
/// Cart item ids are always stored canonical.
pub fn canonical_ulid(id: &str) -> Option<String> {
    Ulid::from_string(id).ok().map(|ulid| ulid.to_string())
}
