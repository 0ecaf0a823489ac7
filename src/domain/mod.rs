//! Domain name normalization utilities.
//!
//! Every name that enters the result store goes through [`normalize`], so the
//! store key for `Mail.Example.com.` and `mail.example.com` is the same.
//!
//! Key functions:
//! - `normalize()` - lowercases and strips whitespace and the trailing root dot
//! - `subdomain()` - builds `<label>.<target>` from a wordlist entry
//! - `base_label()` - the target without its last label (`example` for `example.com`)
//! - `is_subdomain_of()` - label-aligned suffix check

/// Normalizes a domain name for use as a result store key.
///
/// Lowercases, trims surrounding whitespace and removes a single trailing dot
/// (the DNS root), so PTR answers like `mail.example.com.` match forward names.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.to_ascii_lowercase()
}

/// Builds the fully-qualified candidate for a wordlist entry.
pub fn subdomain(label: &str, target: &str) -> String {
    format!("{}.{}", label.trim(), target)
}

/// Returns the target without its last dot-separated label.
///
/// `example.com` becomes `example`, `example.co.uk` becomes `example.co`.
/// A name without dots is returned unchanged.
pub fn base_label(target: &str) -> &str {
    match target.rsplit_once('.') {
        Some((base, _suffix)) => base,
        None => target,
    }
}

/// Checks whether `name` is `parent` itself or one of its subdomains.
///
/// Comparison is label-aligned: `mail.example.com` is under `example.com`,
/// `notexample.com` is not.
pub fn is_subdomain_of(name: &str, parent: &str) -> bool {
    if name == parent {
        return true;
    }
    name.len() > parent.len()
        && name.ends_with(parent)
        && name.as_bytes()[name.len() - parent.len() - 1] == b'.'
}
