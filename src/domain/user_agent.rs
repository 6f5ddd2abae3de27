//! User-agent classification.
//!
//! A pure, deterministic mapping from a raw `User-Agent` string to device
//! type, operating system, and browser. Classification runs once, in the
//! click worker, and the result is stored with the click; it is never
//! recomputed from the raw string later.
//!
//! Matching order matters for overlapping signatures: Edge and Opera UA
//! strings also carry Chrome tokens, Chrome strings carry Safari tokens, and
//! Android strings carry Linux tokens. The more specific token always wins.

use serde::{Deserialize, Serialize};

/// Device category derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    Unknown,
}

/// Operating system derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    Macos,
    Linux,
    Android,
    Ios,
    Unknown,
}

/// Browser family derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Opera,
    Unknown,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Unknown => "unknown",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "desktop" => DeviceType::Desktop,
            "mobile" => DeviceType::Mobile,
            "tablet" => DeviceType::Tablet,
            _ => DeviceType::Unknown,
        }
    }
}

impl Os {
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Macos => "macos",
            Os::Linux => "linux",
            Os::Android => "android",
            Os::Ios => "ios",
            Os::Unknown => "unknown",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "windows" => Os::Windows,
            "macos" => Os::Macos,
            "linux" => Os::Linux,
            "android" => Os::Android,
            "ios" => Os::Ios,
            _ => Os::Unknown,
        }
    }
}

impl Browser {
    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Safari => "safari",
            Browser::Edge => "edge",
            Browser::Opera => "opera",
            Browser::Unknown => "unknown",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "chrome" => Browser::Chrome,
            "firefox" => Browser::Firefox,
            "safari" => Browser::Safari,
            "edge" => Browser::Edge,
            "opera" => Browser::Opera,
            _ => Browser::Unknown,
        }
    }
}

/// Classified user-agent triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub device_type: DeviceType,
    pub os: Os,
    pub browser: Browser,
}

impl UserAgentInfo {
    pub const UNKNOWN: UserAgentInfo = UserAgentInfo {
        device_type: DeviceType::Unknown,
        os: Os::Unknown,
        browser: Browser::Unknown,
    };
}

/// Classifies a raw user-agent string.
///
/// Total and deterministic: unparseable input degrades to `unknown` per
/// field rather than failing.
pub fn classify(user_agent: &str) -> UserAgentInfo {
    let ua = user_agent.to_ascii_lowercase();
    if ua.trim().is_empty() {
        return UserAgentInfo::UNKNOWN;
    }

    let browser = classify_browser(&ua);
    let os = classify_os(&ua);
    let device_type = classify_device(&ua, os, browser);

    UserAgentInfo {
        device_type,
        os,
        browser,
    }
}

/// Browser detection. Edge and Opera carry Chrome tokens, and Chrome carries
/// a Safari token, so the checks run most-specific first.
fn classify_browser(ua: &str) -> Browser {
    if ua.contains("edg/") || ua.contains("edga/") || ua.contains("edgios/") || ua.contains("edge/")
    {
        Browser::Edge
    } else if ua.contains("opr/") || ua.contains("opera") {
        Browser::Opera
    } else if ua.contains("firefox/") || ua.contains("fxios/") {
        Browser::Firefox
    } else if ua.contains("chrome/") || ua.contains("crios/") || ua.contains("chromium/") {
        Browser::Chrome
    } else if ua.contains("safari/") {
        Browser::Safari
    } else {
        Browser::Unknown
    }
}

/// OS detection. Android UAs contain "linux" and iOS UAs contain
/// "like mac os x", so Android and iOS are checked before Linux and macOS.
fn classify_os(ua: &str) -> Os {
    if ua.contains("windows") {
        Os::Windows
    } else if ua.contains("android") {
        Os::Android
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        Os::Ios
    } else if ua.contains("mac os x") || ua.contains("macintosh") {
        Os::Macos
    } else if ua.contains("linux") || ua.contains("x11") {
        Os::Linux
    } else {
        Os::Unknown
    }
}

/// Device detection. Tablet signals win over mobile signals: an Android UA
/// without the "mobile" token is a tablet by convention, as is any iPad.
fn classify_device(ua: &str, os: Os, browser: Browser) -> DeviceType {
    let is_android_tablet = ua.contains("android") && !ua.contains("mobile");

    if ua.contains("ipad") || ua.contains("tablet") || is_android_tablet {
        DeviceType::Tablet
    } else if ua.contains("mobi")
        || ua.contains("iphone")
        || ua.contains("ipod")
        || ua.contains("android")
    {
        DeviceType::Mobile
    } else if os != Os::Unknown || browser != Browser::Unknown {
        DeviceType::Desktop
    } else {
        DeviceType::Unknown
    }
}
