//! Width labels for the dimension-label overlay

use kerb_core::{KerbError, Result};
use kerb_street::Alignment;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthLabel {
    pub text: String,
    pub width: f32,
    /// Width-axis center, measured from the left edge of the first label
    pub center: f32,
}

/// Pair label texts with widths, left to right.
///
/// Mismatched lengths abort this call only.
pub fn width_labels<S: AsRef<str>>(texts: &[S], widths: &[f32]) -> Result<Vec<WidthLabel>> {
    if texts.len() != widths.len() {
        error!(
            texts = texts.len(),
            widths = widths.len(),
            "label texts and widths differ in length"
        );
        return Err(KerbError::MismatchedArrays {
            left: "texts".into(),
            left_len: texts.len(),
            right: "widths".into(),
            right_len: widths.len(),
        });
    }
    let mut running = 0.0;
    Ok(texts
        .iter()
        .zip(widths)
        .map(|(text, &width)| {
            let label = WidthLabel {
                text: text.as_ref().to_string(),
                width,
                center: running + width / 2.0,
            };
            running += width;
            label
        })
        .collect())
}

/// Default labels for an aligned corridor: one per segment, in meters
pub fn alignment_labels(alignment: &Alignment) -> Vec<WidthLabel> {
    alignment
        .slots
        .iter()
        .map(|slot| WidthLabel {
            text: format_meters(slot.width),
            width: slot.width,
            center: slot.center,
        })
        .collect()
}

fn format_meters(width: f32) -> String {
    if (width - width.round()).abs() < 1e-3 {
        format!("{}m", width.round() as i64)
    } else {
        format!("{:.1}m", width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_texts_and_widths() {
        let labels = width_labels(&["walk", "lane"], &[3.0, 3.5]).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].text, "lane");
        assert!((labels[1].center - 4.75).abs() < 1e-5);
    }

    #[test]
    fn test_mismatch_is_an_error() {
        let result = width_labels(&["walk"], &[3.0, 3.5]);
        assert!(matches!(
            result,
            Err(KerbError::MismatchedArrays { left_len: 1, right_len: 2, .. })
        ));
    }

    #[test]
    fn test_meter_formatting() {
        assert_eq!(format_meters(3.0), "3m");
        assert_eq!(format_meters(3.5), "3.5m");
    }
}
