//! Input validation for untyped callers
//!
//! Hosts that receive parameters as loose JSON-like values (request bodies,
//! scripting bridges, the command line) go through this module. It checks the
//! shape of each parameter, normalizes case, and hands typed values to
//! [`QueryService`].

use crate::error::{EModelError, Result};
use crate::query::QueryService;
use crate::types::{Bandwidth, BitrateMode, ConfigurationInfo, LossPattern, QualityMetric, Selection};
use serde_json::Value;
use tracing::debug;

/// Non-empty text, or `None` for any other shape
fn required_text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Values that count as "no loss pattern given"
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn check_shapes<'a>(
    bandwidth: Option<&'a Value>,
    mode: Option<&'a Value>,
    loss: Option<&'a Value>,
) -> Result<(&'a str, &'a str, Option<&'a str>)> {
    let bandwidth = required_text(bandwidth).ok_or(EModelError::MissingBandwidth)?;
    let mode = required_text(mode).ok_or(EModelError::MissingMode)?;

    let loss = match loss {
        None => None,
        Some(value) if is_unset(value) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => return Err(EModelError::InvalidLossTypeShape),
    };

    Ok((bandwidth, mode, loss))
}

/// Validate raw parameters against a specific service's table
pub fn normalize_and_validate_with(
    service: &QueryService,
    bandwidth: Option<&Value>,
    mode: Option<&Value>,
    loss: Option<&Value>,
) -> Result<Selection> {
    let result = check_shapes(bandwidth, mode, loss).and_then(|(bandwidth, mode, loss)| {
        let bandwidth: Bandwidth = bandwidth.parse()?;
        let mode: BitrateMode = mode.parse()?;
        let loss = loss.map(str::parse::<LossPattern>).transpose()?;

        service.ensure_configured(bandwidth, mode)?;
        Ok(Selection {
            bandwidth,
            mode,
            loss,
        })
    });

    if let Err(e) = &result {
        debug!("Rejected query parameters [{}]: {}", e.code(), e);
    }
    result
}

/// Validate and normalize raw bandwidth, mode and optional loss pattern
///
/// # Errors
///
/// Shape errors are reported before value errors, bandwidth before mode
/// before loss pattern.
pub fn normalize_and_validate(
    bandwidth: Option<&Value>,
    mode: Option<&Value>,
    loss: Option<&Value>,
) -> Result<Selection> {
    normalize_and_validate_with(&QueryService::new(), bandwidth, mode, loss)
}

/// Interpret a raw bitrate as whole kbps
///
/// Accepts numbers and decimal text (`[+]digits[.digits]`); fractional parts
/// are truncated. Anything that cannot name a non-negative bitrate yields
/// `None`.
pub fn parse_bitrate(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(whole) => u32::try_from(whole).ok(),
            None => n.as_f64().and_then(truncate_kbps),
        },
        Value::String(s) => parse_bitrate_text(s),
        _ => None,
    }
}

fn parse_bitrate_text(text: &str) -> Option<u32> {
    let text = text.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };

    let is_digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || fraction.is_some_and(|f| !is_digits(f)) {
        return None;
    }
    whole.parse().ok()
}

fn truncate_kbps(value: f64) -> Option<u32> {
    let whole = value.trunc();
    (whole.is_finite() && whole >= 0.0 && whole <= f64::from(u32::MAX)).then(|| whole as u32)
}

/// Metrics for every bitrate of the selected pair
pub fn list_metrics(
    bandwidth: Option<&Value>,
    mode: Option<&Value>,
    loss: Option<&Value>,
) -> Result<Vec<QualityMetric>> {
    let service = QueryService::new();
    let sel = normalize_and_validate_with(&service, bandwidth, mode, loss)?;
    service.list_metrics(sel.bandwidth, sel.mode, sel.loss)
}

/// Metric for one bitrate; an unknown or unparseable bitrate is `Ok(None)`
pub fn metric_at_bitrate(
    bandwidth: Option<&Value>,
    mode: Option<&Value>,
    bitrate: &Value,
    loss: Option<&Value>,
) -> Result<Option<QualityMetric>> {
    let service = QueryService::new();
    let sel = normalize_and_validate_with(&service, bandwidth, mode, loss)?;

    match parse_bitrate(bitrate) {
        Some(kbps) => service.metric_at_bitrate(sel.bandwidth, sel.mode, kbps, sel.loss),
        None => {
            debug!("Unparseable bitrate {} treated as not found", bitrate);
            Ok(None)
        }
    }
}

/// Bitrates available for the selected pair
pub fn supported_bitrates(bandwidth: Option<&Value>, mode: Option<&Value>) -> Result<Vec<u32>> {
    let service = QueryService::new();
    let sel = normalize_and_validate_with(&service, bandwidth, mode, None)?;
    service.supported_bitrates(sel.bandwidth, sel.mode)
}

/// One descriptor per populated pair
pub fn available_configurations() -> Vec<ConfigurationInfo> {
    QueryService::new().available_configurations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CoefficientStore, SWB_VBR};
    use serde_json::json;

    #[test]
    fn test_normalizes_case() {
        let sel = normalize_and_validate(
            Some(&json!("SWB")),
            Some(&json!("Vbr")),
            Some(&json!("BURSTY")),
        )
        .unwrap();
        assert_eq!(
            sel,
            Selection {
                bandwidth: Bandwidth::SuperWideband,
                mode: BitrateMode::Variable,
                loss: Some(LossPattern::Bursty),
            }
        );
    }

    #[test]
    fn test_unset_loss_values() {
        for loss in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            let sel = normalize_and_validate(Some(&json!("wb")), Some(&json!("cbr")), Some(&loss))
                .unwrap();
            assert_eq!(sel.loss, None, "loss value {loss}");
        }
        let sel = normalize_and_validate(Some(&json!("wb")), Some(&json!("cbr")), None).unwrap();
        assert_eq!(sel.loss, None);
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            normalize_and_validate(None, Some(&json!("vbr")), None),
            Err(EModelError::MissingBandwidth)
        );
        assert_eq!(
            normalize_and_validate(Some(&json!("")), Some(&json!("vbr")), None),
            Err(EModelError::MissingBandwidth)
        );
        assert_eq!(
            normalize_and_validate(Some(&json!("swb")), Some(&json!(123)), None),
            Err(EModelError::MissingMode)
        );
        assert_eq!(
            normalize_and_validate(Some(&json!("swb")), Some(&json!("vbr")), Some(&json!(true))),
            Err(EModelError::InvalidLossTypeShape)
        );
        assert_eq!(
            normalize_and_validate(Some(&json!("swb")), Some(&json!("vbr")), Some(&json!(["random"]))),
            Err(EModelError::InvalidLossTypeShape)
        );
    }

    #[test]
    fn test_shape_checked_before_value() {
        // bad bandwidth value, bad loss shape: shape wins
        assert_eq!(
            normalize_and_validate(Some(&json!("xx")), Some(&json!("vbr")), Some(&json!(1))),
            Err(EModelError::InvalidLossTypeShape)
        );
        assert_eq!(
            normalize_and_validate(Some(&json!("xx")), Some(&json!("yy")), Some(&json!("zz"))),
            Err(EModelError::unsupported_bandwidth("xx"))
        );
        assert_eq!(
            normalize_and_validate(Some(&json!("swb")), Some(&json!("yy")), Some(&json!("zz"))),
            Err(EModelError::unsupported_mode("yy"))
        );
    }

    #[test]
    fn test_configuration_not_found() {
        static PARTIAL: CoefficientStore =
            CoefficientStore::from_tables([[&SWB_VBR, &[]], [&[], &[]], [&[], &[]]]);
        let service = QueryService::with_store(&PARTIAL);

        assert!(normalize_and_validate_with(&service, Some(&json!("swb")), Some(&json!("vbr")), None)
            .is_ok());
        assert_eq!(
            normalize_and_validate_with(&service, Some(&json!("NB")), Some(&json!("cbr")), None),
            Err(EModelError::configuration_not_found(
                Bandwidth::Narrowband,
                BitrateMode::Constant
            ))
        );
    }

    #[test]
    fn test_parse_bitrate() {
        assert_eq!(parse_bitrate(&json!(25)), Some(25));
        assert_eq!(parse_bitrate(&json!(25.9)), Some(25));
        assert_eq!(parse_bitrate(&json!("25")), Some(25));
        assert_eq!(parse_bitrate(&json!(" 16 ")), Some(16));
        assert_eq!(parse_bitrate(&json!("25.7")), Some(25));
        assert_eq!(parse_bitrate(&json!(-5)), None);
        assert_eq!(parse_bitrate(&json!("abc")), None);
        assert_eq!(parse_bitrate(&json!(null)), None);
        assert_eq!(parse_bitrate(&json!(true)), None);
        assert_eq!(parse_bitrate(&json!(1e12)), None);
        assert_eq!(parse_bitrate(&json!("1e1")), None);
    }

    #[test]
    fn test_parse_bitrate_text_forms() {
        assert_eq!(parse_bitrate(&json!("+16")), Some(16));
        assert_eq!(parse_bitrate(&json!("007")), Some(7));
        assert_eq!(parse_bitrate(&json!("40.00")), Some(40));

        for text in ["1e1", "inf", "NaN", "0x10", "-16", "25.", ".5", "2 5", "25kbps", "+", "99999999999"] {
            assert_eq!(parse_bitrate(&json!(text)), None, "bitrate text {text:?}");
        }
    }

    #[test]
    fn test_exponent_text_is_not_found() {
        let metric = metric_at_bitrate(Some(&json!("nb")), Some(&json!("cbr")), &json!("1e1"), None)
            .unwrap();
        assert!(metric.is_none());
    }

    #[test]
    fn test_configuration_not_found_reports_canonical_names() {
        static EMPTY: CoefficientStore =
            CoefficientStore::from_tables([[&[], &[]], [&[], &[]], [&[], &[]]]);
        let service = QueryService::with_store(&EMPTY);

        let err = normalize_and_validate_with(&service, Some(&json!("NB")), Some(&json!("CBR")), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No configuration found for bandwidth: nb, mode: cbr"
        );
    }

    #[test]
    fn test_metric_at_bitrate_text_input() {
        let metric = metric_at_bitrate(
            Some(&json!("wb")),
            Some(&json!("vbr")),
            &json!("12"),
            Some(&json!("random")),
        )
        .unwrap()
        .unwrap();
        assert_eq!(metric.bitrate, 12);
        assert_eq!(metric.impairment, 23.29505705);
        assert_eq!(metric.loss_factor, 22.2151863);

        let missing =
            metric_at_bitrate(Some(&json!("wb")), Some(&json!("vbr")), &json!("fast"), None)
                .unwrap();
        assert!(missing.is_none());
    }
}
