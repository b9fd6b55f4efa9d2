//! Header block decoding: feature checks and declared bounds.
use log::debug;
use osmblock_core::Bound;

use crate::block::HeaderBlock;
use crate::error::DecodeError;

/// Required features this decoder can honour.
pub const SUPPORTED_FEATURES: &[&str] = &["DenseNodes"];

/// Scale of header bounding boxes: nanodegrees to degrees.
const BBOX_SCALE: f64 = 1.0e-9;

/// Check the required features and convert the header's bounds.
///
/// An empty feature list places no restrictions on the reader. The bound's
/// origin is always `origin`; the header's own `source` is only logged.
pub(crate) fn decode_header(header: &HeaderBlock, origin: &str) -> Result<Bound, DecodeError> {
    if let Some(feature) = header
        .required_features
        .iter()
        .find(|feature| !SUPPORTED_FEATURES.contains(&feature.as_str()))
    {
        return Err(DecodeError::UnsupportedFeature {
            feature: feature.clone(),
        });
    }
    if !header.optional_features.is_empty() {
        debug!(
            "Header lists optional features: {}",
            header.optional_features.join(", ")
        );
    }
    if let Some(program) = &header.writing_program {
        debug!("File written by {program}");
    }
    if let Some(source) = &header.source {
        debug!("File data source: {source}");
    }

    let bbox = header.bbox;
    Ok(Bound {
        right: degrees(bbox.right),
        left: degrees(bbox.left),
        top: degrees(bbox.top),
        bottom: degrees(bbox.bottom),
        origin: origin.to_owned(),
    })
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "nanodegree bounds are converted to floating degrees"
)]
const fn degrees(nanodegrees: i64) -> f64 {
    nanodegrees as f64 * BBOX_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::HeaderBBox;
    use rstest::rstest;

    fn header(features: &[&str]) -> HeaderBlock {
        HeaderBlock {
            bbox: HeaderBBox {
                left: 0,
                right: 1_000_000_000,
                top: 500_000_000,
                bottom: -500_000_000,
            },
            required_features: features.iter().map(|&name| name.to_owned()).collect(),
            ..HeaderBlock::default()
        }
    }

    #[rstest]
    fn scales_bounds_to_degrees() {
        let bound = decode_header(&header(&[]), "test").expect("header decodes");
        assert_eq!(
            (bound.right, bound.left, bound.top, bound.bottom),
            (1.0, 0.0, 0.5, -0.5)
        );
        assert_eq!(bound.origin, "test");
    }

    #[rstest]
    fn accepts_dense_nodes_feature() {
        assert!(decode_header(&header(&["DenseNodes"]), "test").is_ok());
    }

    #[rstest]
    #[case(&["HistoricalInformation"], "HistoricalInformation")]
    #[case(&["DenseNodes", "Sort.Type_then_ID"], "Sort.Type_then_ID")]
    fn rejects_unknown_required_features(#[case] features: &[&str], #[case] offending: &str) {
        let err = decode_header(&header(features), "test").expect_err("feature rejected");
        assert_eq!(
            err,
            DecodeError::UnsupportedFeature {
                feature: offending.to_owned(),
            }
        );
    }

    #[rstest]
    fn header_source_does_not_replace_origin() {
        let block = HeaderBlock {
            writing_program: Some("osmium/1.16".into()),
            source: Some("survey 2024".into()),
            ..header(&["DenseNodes"])
        };
        let bound = decode_header(&block, "test").expect("header decodes");
        assert_eq!(bound.origin, "test");
    }

    #[rstest]
    fn ignores_unknown_optional_features() {
        let block = HeaderBlock {
            optional_features: vec!["LocationsOnWays".into()],
            ..header(&[])
        };
        assert!(decode_header(&block, "test").is_ok());
    }
}
