//! Device classification from raw user-agent strings.

use woothee::parser::Parser;

use super::DeviceType;

/// Phone-class tokens that mark a signature as mobile even when the parser
/// cannot place it in a known family.
const MOBILE_MARKERS: [&str; 6] = [
    "iPhone",
    "iPod",
    "Mobile",
    "Windows Phone",
    "BlackBerry",
    "Opera Mini",
];

/// Tablets report phone-like tokens (`iPad` Safari carries `Mobile/15E148`,
/// woothee files them under `smartphone`) but are not phone-class.
fn is_tablet(ua: &str) -> bool {
    ua.contains("iPad")
        || ua.contains("Tablet")
        || (ua.contains("Android") && !ua.contains("Mobile"))
}

/// Derives a [`DeviceType`] from an optional user-agent string.
///
/// - absent, empty or blank → [`DeviceType::Unknown`]
/// - phone-class device detected → [`DeviceType::Mobile`]
/// - anything else, including tablets and unparseable signatures →
///   [`DeviceType::Desktop`]
#[must_use]
pub fn classify(user_agent: Option<&str>) -> DeviceType {
    let ua = match user_agent {
        Some(s) if !s.trim().is_empty() => s,
        _ => return DeviceType::Unknown,
    };

    if is_tablet(ua) {
        return DeviceType::Desktop;
    }

    let parsed_mobile = Parser::new()
        .parse(ua)
        .is_some_and(|result| result.category == "smartphone" || result.category == "mobilephone");

    if parsed_mobile || MOBILE_MARKERS.iter().any(|marker| ua.contains(marker)) {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}
