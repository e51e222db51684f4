use url::Url;

use crate::error::{ScrapeError, ScrapeResult};

/// Canonical redirect prefix for Udemy Freebies coupons.
pub const FREEBIES_OUT_BASE: &str = "https://www.udemyfreebies.com/out/";

/// Udemy course page prefix used to build coupon links from course slugs.
pub const UDEMY_COURSE_BASE: &str = "https://www.udemy.com/course/";

/// Resolve a scraped `href` the way a rendered DOM reports it: absolute.
pub fn resolve_href(base: &str, href: &str) -> ScrapeResult<String> {
    let invalid = |reason: String| ScrapeError::InvalidLink {
        link: href.to_string(),
        reason,
    };
    let base = Url::parse(base).map_err(|e| invalid(format!("bad base {}: {}", base, e)))?;
    let resolved = base.join(href).map_err(|e| invalid(e.to_string()))?;
    Ok(resolved.to_string())
}

/// Everything after the last `/`, empty when the link ends in a slash.
pub fn trailing_segment(link: &str) -> &str {
    link.rsplit('/').next().unwrap_or(link)
}

/// Rewrite a tracking link into the canonical `/out/<id>` redirect.
pub fn canonical_out_link(link: &str) -> String {
    format!("{}{}", FREEBIES_OUT_BASE, trailing_segment(link))
}

/// Build an enrollment link carrying the coupon code.
pub fn udemy_coupon_link(course_slug: &str, coupon_code: &str) -> String {
    format!("{}{}/?couponCode={}", UDEMY_COURSE_BASE, course_slug, coupon_code)
}
