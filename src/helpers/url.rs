//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/images/logo.svg") // -> "/blog/images/logo.svg"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Link to a post page, `/post/{uid}`
pub fn post_url(config: &SiteConfig, uid: &str) -> String {
    url_for(config, &format!("post/{}", encode_segment(uid)))
}

/// Link to the listing with `pages` pages loaded
pub fn listing_url(config: &SiteConfig, pages: usize) -> String {
    if pages <= 1 {
        url_for(config, "")
    } else {
        url_for(config, &format!("page/{}/", pages))
    }
}

/// Encode a single URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/images/logo.svg"), "/blog/images/logo.svg");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&SiteConfig::default(), ""), "/");
    }

    #[test]
    fn test_post_url() {
        let config = SiteConfig::default();
        assert_eq!(
            post_url(&config, "como-utilizar-hooks"),
            "/post/como-utilizar-hooks"
        );
        assert_eq!(post_url(&config, "a/b c"), "/post/a%2Fb%20c");
    }

    #[test]
    fn test_listing_url() {
        let config = SiteConfig::default();
        assert_eq!(listing_url(&config, 1), "/");
        assert_eq!(listing_url(&config, 3), "/page/3/");
    }
}
