use std::fmt;

/// Text shown when a vendor found no text at all.
pub const NO_TEXT_RECOGNIZED: &str = "no text recognized";

/// Uniform result of a recognition call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionResult {
    /// Recognized text, one entry per line or block, in vendor order.
    Text(Vec<String>),
    /// Matched labels, in vendor order. May be empty.
    Tags(Vec<Tag>),
    /// The vendor answered successfully but recognized no text.
    NoText,
}

impl RecognitionResult {
    /// Build a text result, falling back to [`RecognitionResult::NoText`] when
    /// no line carries content.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.iter().all(|l| l.trim().is_empty()) {
            RecognitionResult::NoText
        } else {
            RecognitionResult::Text(lines)
        }
    }

    /// Recognized lines joined with newlines, or the sentinel text.
    ///
    /// Returns `None` for tag results.
    pub fn text(&self) -> Option<String> {
        match self {
            RecognitionResult::Text(lines) => Some(lines.join("\n")),
            RecognitionResult::NoText => Some(NO_TEXT_RECOGNIZED.to_string()),
            RecognitionResult::Tags(_) => None,
        }
    }

    /// Tags of this result, or `None` for text results.
    pub fn tags(&self) -> Option<&[Tag]> {
        match self {
            RecognitionResult::Tags(tags) => Some(tags),
            _ => None,
        }
    }
}

impl fmt::Display for RecognitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionResult::Tags(tags) => {
                for (idx, tag) in tags.iter().enumerate() {
                    if idx != 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {:.3}", tag.keyword, tag.score)?;
                }
                Ok(())
            }
            RecognitionResult::Text(lines) => write!(f, "{}", lines.join("\n")),
            RecognitionResult::NoText => f.write_str(NO_TEXT_RECOGNIZED),
        }
    }
}

/// One matched label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Label text as reported by the vendor.
    pub keyword: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

impl Tag {
    /// Build a tag from a vendor confidence on the given scale.
    pub fn new(keyword: impl Into<String>, confidence: f64, scale: ConfidenceScale) -> Self {
        Self {
            keyword: keyword.into(),
            score: scale.normalize(confidence),
        }
    }
}

/// Scale a vendor reports confidence on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceScale {
    /// Already in `[0, 1]`.
    Unit,
    /// In `[0, 100]`.
    Percent,
}

impl ConfidenceScale {
    /// Normalize a raw confidence into `[0, 1]`.
    ///
    /// Values outside the scale are clamped, `NaN` becomes `0`.
    pub fn normalize(self, raw: f64) -> f64 {
        let v = match self {
            ConfidenceScale::Unit => raw,
            ConfidenceScale::Percent => raw / 100.0,
        };

        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ConfidenceScale::Percent, 87.5, 0.875; "percent")]
    #[test_case(ConfidenceScale::Unit, 0.42, 0.42; "unit")]
    #[test_case(ConfidenceScale::Percent, 120.0, 1.0; "clamped high")]
    #[test_case(ConfidenceScale::Unit, -0.1, 0.0; "clamped low")]
    #[test_case(ConfidenceScale::Unit, f64::NAN, 0.0; "nan")]
    fn test_normalize(scale: ConfidenceScale, raw: f64, expected: f64) {
        assert!((scale.normalize(raw) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_from_lines_empty_is_sentinel() {
        let res = RecognitionResult::from_lines(Vec::<String>::new());
        assert_eq!(res, RecognitionResult::NoText);
        assert_eq!(res.text().as_deref(), Some(NO_TEXT_RECOGNIZED));
    }

    #[test]
    fn test_from_lines_keeps_order() {
        let res = RecognitionResult::from_lines(["first", "second"]);
        assert_eq!(res.text().as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_empty_tags_are_not_an_error() {
        let res = RecognitionResult::Tags(vec![]);
        assert_eq!(res.tags(), Some(&[][..]));
        assert_eq!(res.to_string(), "");
    }
}
