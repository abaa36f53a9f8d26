use rand::Rng;
use thiserror::Error;
use url::Url;

/// Prefix every short link starts with. Fixed at process start.
pub const DEFAULT_BASE_URL: &str = "localhost/";

/// Length of a freshly generated identifier.
pub const SHORT_ID_LENGTH: usize = 5;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The only error the widget ever surfaces to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenError {
    #[error("Please enter a valid url")]
    InvalidUrl,
}

/// Generates a random lowercase alphanumeric string of the given length.
///
/// Each character is an independent uniform draw; collisions between
/// generated identifiers are possible and not handled.
pub fn generate_random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Checks whether the input is an absolute http(s) address.
///
/// The host must contain a dot and end in an alphabetic label of at
/// least two characters; anything after the host is restricted to plain
/// path/query/fragment characters. Never panics; malformed input is
/// simply rejected.
pub fn is_valid_url(candidate: &str) -> bool {
    let rest = match candidate
        .strip_prefix("http://")
        .or_else(|| candidate.strip_prefix("https://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    // The host runs up to the first character that cannot appear in one.
    let host_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '-'))
        .unwrap_or(rest.len());
    let (host, tail) = rest.split_at(host_end);

    let tld = match host.rsplit_once('.') {
        Some((name, tld)) if !name.is_empty() => tld,
        _ => return false,
    };
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    if !tail.chars().all(is_allowed_tail_char) {
        return false;
    }

    // The candidate must also parse as an absolute URL with a host.
    matches!(Url::parse(candidate), Ok(url) if url.host_str().is_some())
}

fn is_allowed_tail_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '/' | '_' | '-' | '.' | '~' | ':' | '@' | '?' | '#' | '=' | '&' | '%' | '+'
        )
}
