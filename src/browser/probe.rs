//! Display labels derived from the user-agent and platform strings.

use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

/// Browser name, version and platform as shown to the user.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct BrowserDescriptor {
    pub name: String,
    pub version: String,
    pub platform: String,
}

/// The raw environment strings the probe reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub user_agent: String,
    pub platform: String,
}

impl Environment {
    pub fn new(user_agent: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
        }
    }
}

/// Computes the descriptor once, on mount, and never again.
#[derive(Debug, Default)]
pub struct BrowserInfo {
    descriptor: OnceLock<BrowserDescriptor>,
}

impl BrowserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, env: &Environment) -> &BrowserDescriptor {
        self.descriptor
            .get_or_init(|| probe(&env.user_agent, &env.platform))
    }

    /// `None` until mounted.
    pub fn get(&self) -> Option<&BrowserDescriptor> {
        self.descriptor.get()
    }
}

/// Derives the browser descriptor. Case-sensitive substring checks, first
/// match wins, so Chrome (whose UA also says "Safari") is tested before
/// Safari.
pub fn probe(user_agent: &str, platform: &str) -> BrowserDescriptor {
    let (name, version) = detect_browser(user_agent);
    BrowserDescriptor {
        name: name.to_string(),
        version: truncate_version(&version).to_string(),
        platform: detect_platform(platform).to_string(),
    }
}

fn detect_browser(ua: &str) -> (&'static str, String) {
    if ua.contains("Firefox") {
        ("Firefox", version_after(ua, "Firefox"))
    } else if ua.contains("Chrome") {
        ("Chrome", version_after(ua, "Chrome"))
    } else if ua.contains("Safari") {
        // Safari puts its release number behind "Version/", not "Safari/"
        ("Safari", version_after(ua, "Version"))
    } else if ua.contains("MSIE") || ua.contains("Trident") {
        ("Internet Explorer", version_after(ua, "MSIE"))
    } else {
        (UNKNOWN, UNKNOWN.to_string())
    }
}

/// Text following `marker` and its one-character separator ('/' or ' ').
fn version_after(ua: &str, marker: &str) -> String {
    match ua.find(marker) {
        // skip the single separator character after the marker
        Some(index) => ua[index + marker.len()..].chars().skip(1).collect(),
        None => UNKNOWN.to_string(),
    }
}

fn detect_platform(platform: &str) -> &'static str {
    if platform.contains("Win") {
        "Windows"
    } else if platform.contains("Mac") {
        "MacOS"
    } else if platform.contains("Linux") {
        "Linux"
    } else if platform.contains("Android") {
        "Android"
    } else if platform.contains("iPhone") || platform.contains("iPad") {
        "iOS"
    } else {
        UNKNOWN
    }
}

fn truncate_version(raw: &str) -> &str {
    raw.split(char::is_whitespace).next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15";
    const FIREFOX_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:115.0) Gecko/20100101 Firefox/115.0";
    const IE_UA: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";

    #[test]
    fn test_chrome_is_not_mistaken_for_safari() {
        let descriptor = probe(CHROME_UA, "Win32");
        assert_eq!(descriptor.name, "Chrome");
        assert_eq!(descriptor.version, "120.0.0.0");
        assert_eq!(descriptor.platform, "Windows");
    }

    #[test]
    fn test_firefox() {
        let descriptor = probe(FIREFOX_UA, "Linux x86_64");
        assert_eq!(descriptor.name, "Firefox");
        assert_eq!(descriptor.version, "115.0");
        assert_eq!(descriptor.platform, "Linux");

        let bare = probe("Firefox/115.0", "");
        assert_eq!(bare.name, "Firefox");
        assert_eq!(bare.version, "115.0");
    }

    #[test]
    fn test_safari_reads_version_marker() {
        let descriptor = probe(SAFARI_UA, "MacIntel");
        assert_eq!(descriptor.name, "Safari");
        assert_eq!(descriptor.version, "17.2");
        assert_eq!(descriptor.platform, "MacOS");
    }

    #[test]
    fn test_safari_without_version_marker() {
        let descriptor = probe("AppleWebKit/605.1.15 Safari/605.1.15", "iPhone");
        assert_eq!(descriptor.name, "Safari");
        assert_eq!(descriptor.version, UNKNOWN);
        assert_eq!(descriptor.platform, "iOS");
    }

    #[test]
    fn test_internet_explorer() {
        let descriptor = probe(IE_UA, "Win32");
        assert_eq!(descriptor.name, "Internet Explorer");
        assert_eq!(descriptor.version, "8.0;");

        let trident_only = probe("Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0)", "Win32");
        assert_eq!(trident_only.name, "Internet Explorer");
        assert_eq!(trident_only.version, UNKNOWN);
    }

    #[test]
    fn test_unknown_browser() {
        let descriptor = probe("curl/8.4.0", "");
        assert_eq!(descriptor.name, UNKNOWN);
        assert_eq!(descriptor.version, UNKNOWN);
        assert_eq!(descriptor.platform, UNKNOWN);
    }

    #[test]
    fn test_platform_order() {
        assert_eq!(probe("", "MacIntel").platform, "MacOS");
        assert_eq!(probe("", "Linux armv8l").platform, "Linux");
        assert_eq!(probe("", "Android").platform, "Android");
        assert_eq!(probe("", "iPad").platform, "iOS");
        assert_eq!(probe("", "Win64").platform, "Windows");
        assert_eq!(probe("", "macintel").platform, UNKNOWN);
    }

    #[test]
    fn test_version_truncation() {
        assert_eq!(truncate_version("91.0 (Edition Foo)"), "91.0");
        assert_eq!(truncate_version("91.0\tx"), "91.0");
        assert_eq!(truncate_version(""), "");
        assert_eq!(probe("Firefox/91.0 (Edition Foo)", "").version, "91.0");
    }

    #[test]
    fn test_marker_at_end_of_string() {
        assert_eq!(probe("Chrome", "").version, "");
    }

    #[test]
    fn test_multibyte_separator() {
        assert_eq!(probe("Firefox\u{00b7}115.0", "").version, "115.0");
        assert_eq!(probe("Mozilla Chrome\u{2014}120.0 Safari", "").version, "120.0");
    }

    #[test]
    fn test_mount_computes_once() {
        let info = BrowserInfo::new();
        assert!(info.get().is_none());

        let first = info.mount(&Environment::new(CHROME_UA, "MacIntel")).clone();
        let second = info.mount(&Environment::new(FIREFOX_UA, "Linux"));
        assert_eq!(&first, second);
        assert_eq!(second.name, "Chrome");
    }
}
