use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Computes the canonical form of a URL
///
/// # Normalization Steps
///
/// 1. If `base` is given, resolve `raw` as a relative reference against it
///    (standard scheme/authority/path inheritance rules)
/// 2. Otherwise parse `raw` as an absolute URL, assuming `http` when no
///    scheme is present
/// 3. Strip the fragment component
///
/// Two URLs denoting the same resource modulo fragment and default scheme
/// normalize to an identical value, and normalization is idempotent.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
/// * `base` - Optional base URL for resolving relative references
///
/// # Returns
///
/// * `Ok(Url)` - The canonical URL
/// * `Err(UrlError)` - The input cannot be parsed as a URL reference at all
pub fn normalize_url(raw: &str, base: Option<&Url>) -> UrlResult<Url> {
    let trimmed = raw.trim();

    let mut url = match base {
        Some(base) => base.join(trimmed).map_err(|e| malformed(trimmed, e))?,
        None => match Url::parse(trimmed) {
            Ok(url) => url,
            // No scheme present, force the default one
            Err(ParseError::RelativeUrlWithoutBase) => {
                let with_scheme = format!("http://{}", trimmed);
                Url::parse(&with_scheme).map_err(|e| malformed(trimmed, e))?
            }
            Err(e) => return Err(malformed(trimmed, e)),
        },
    };

    url.set_fragment(None);

    Ok(url)
}

fn malformed(input: &str, source: ParseError) -> UrlError {
    UrlError::Malformed {
        input: input.to_string(),
        message: source.to_string(),
    }
}
