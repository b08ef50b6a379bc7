use scraper::{ElementRef, Html};

use crate::consts;

/// Collects cover-like image sources, in document order, up to `limit`.
pub(crate) fn covers(document: &Html, limit: usize) -> Vec<String> {
    document
        .select(&consts::IMAGE_SELECTOR)
        .filter_map(|image| {
            let source = image.value().attr("src")?.trim();
            (!source.is_empty() && is_cover(image, source)).then(|| source.to_string())
        })
        .take(limit)
        .collect()
}

fn is_cover(image: ElementRef<'_>, source: &str) -> bool {
    let width = dimension(image.value().attr("width"));
    let height = dimension(image.value().attr("height"));
    // Only reject on size when both dimensions are declared.
    let thumbnail = match (width, height) {
        (Some(width), Some(height)) => {
            let floor = i64::from(consts::MIN_COVER_DIMENSION);
            width < floor || height < floor
        },
        _ => false,
    };
    !thumbnail && !consts::ICON_REGEX.is_match(source)
}

/// Reads a declared dimension the lenient way browsers do: an optional sign
/// then leading digits only (`"120px"` is 120, `"-5"` is -5). Missing, zero
/// or non-numeric values are unknown.
fn dimension(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let pixels = digits[..end].parse::<i64>().ok()?;
    let pixels = if value.starts_with('-') { -pixels } else { pixels };
    (pixels != 0).then_some(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn html(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[rstest]
    #[case(Some("120"), Some(120))]
    #[case(Some("120px"), Some(120))]
    #[case(Some(" 64 "), Some(64))]
    #[case(Some("-5"), Some(-5))]
    #[case(Some("+64"), Some(64))]
    #[case(Some("-"), None)]
    #[case(Some("0"), None)]
    #[case(Some("auto"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_dimension(#[case] value: Option<&str>, #[case] expected: Option<i64>) {
        assert_eq!(dimension(value), expected);
    }

    #[rstest]
    #[case(r#"<img src="a.jpg" width="16" height="200">"#, false)]
    #[case(r#"<img src="a.jpg" width="200" height="39">"#, false)]
    #[case(r#"<img src="a.jpg" width="40" height="40">"#, true)]
    #[case(r#"<img src="a.jpg" width="-5" height="200">"#, false)]
    // A single declared dimension is not enough to reject.
    #[case(r#"<img src="a.jpg" width="10">"#, true)]
    #[case(r#"<img src="a.jpg" height="10">"#, true)]
    #[case(r#"<img src="a.jpg">"#, true)]
    #[case(r#"<img src="img/site-LOGO.png">"#, false)]
    #[case(r#"<img src="favicon.ico">"#, false)]
    #[case(r#"<img src="ui/sprite-sheet.png" width="300" height="300">"#, false)]
    #[case(r#"<img src="icons/star.svg">"#, false)]
    #[case(r#"<img src="">"#, false)]
    #[case(r#"<img alt="no source">"#, false)]
    fn test_single_image(#[case] body: &str, #[case] kept: bool) {
        assert_eq!(!covers(&html(body), 6).is_empty(), kept);
    }

    #[test]
    fn keeps_document_order_and_limit() {
        let body = (1..=10).map(|i| format!(r#"<img src="c{i}.jpg">"#)).collect::<String>();
        let found = covers(&html(&body), 6);
        assert_eq!(found, vec!["c1.jpg", "c2.jpg", "c3.jpg", "c4.jpg", "c5.jpg", "c6.jpg"]);
    }

    #[test]
    fn skips_rejected_before_counting() {
        let body = r#"
            <img src="logo.png"><img src="a.jpg" width="20" height="20">
            <img src="one.jpg"><img src="two.jpg" width="300" height="450">
        "#;
        assert_eq!(covers(&html(body), 2), vec!["one.jpg", "two.jpg"]);
    }

    #[test]
    fn zero_limit() {
        assert!(covers(&html(r#"<img src="a.jpg">"#), 0).is_empty());
    }
}
