//! Display helpers shared by the JSON views and the CLI.

use rust_decimal::prelude::ToPrimitive;
use techstore_core::Rating;

/// Default thumbnail width in pixels for product cards.
pub const CARD_IMAGE_WIDTH: u32 = 400;

const FULL_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Render a rating as five stars, e.g. `★★★★☆` for 4.8.
///
/// Only whole stars are filled.
#[must_use]
pub fn format_stars(rating: Rating) -> String {
    let max = Rating::MAX_STARS;
    let full = rating.value().floor().to_u32().unwrap_or(0).min(max);
    let mut stars = String::with_capacity(max as usize * FULL_STAR.len_utf8());
    for i in 0..max {
        stars.push(if i < full { FULL_STAR } else { EMPTY_STAR });
    }
    stars
}

/// Ask the image CDN for a compressed rendition `width` pixels wide.
///
/// URLs from other hosts are returned unchanged.
#[must_use]
pub fn optimized_image_url(url: &str, width: u32) -> String {
    if url.contains("pexels.com") {
        format!("{url}?auto=compress&cs=tinysrgb&w={width}")
    } else {
        url.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(Rating::from_tenths(48).unwrap()), "★★★★☆");
        assert_eq!(format_stars(Rating::from_tenths(42).unwrap()), "★★★★☆");
        assert_eq!(format_stars(Rating::from_tenths(50).unwrap()), "★★★★★");
        assert_eq!(format_stars(Rating::ZERO), "☆☆☆☆☆");
    }

    #[test]
    fn test_optimized_image_url() {
        assert_eq!(
            optimized_image_url("https://images.pexels.com/photos/1/pexels-photo-1.jpeg", 400),
            "https://images.pexels.com/photos/1/pexels-photo-1.jpeg?auto=compress&cs=tinysrgb&w=400"
        );
        assert_eq!(
            optimized_image_url("https://example.com/a.png", 400),
            "https://example.com/a.png"
        );
    }
}
