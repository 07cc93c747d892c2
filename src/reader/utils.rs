//! # 限定属性读取函数
//!
//! 读取 `xml:id`、`xml:lang`、`xml:space` 和 `ttp:cellResolution`，
//! 并按各自的规则校验和回退。

use imsc_model::{
    CellResolution, Diagnostic, DiagnosticKind, Severity, WhiteSpaceHandling, namespaces,
};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{
    constants::{ATTR_CELL_RESOLUTION, ATTR_ID, ATTR_LANG, ATTR_SPACE},
    state::report,
};
use crate::tree::XmlElement;

static CELL_RESOLUTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+) (\d+)$").expect("未能编译 CELL_RESOLUTION_REGEX"));

/// `xml:id`
pub(super) fn get_id(element: &XmlElement) -> Option<&str> {
    element.attribute(Some(namespaces::XML), ATTR_ID)
}

/// `xml:lang`，不做任何校验。
pub(super) fn get_lang(element: &XmlElement) -> Option<&str> {
    element.attribute(Some(namespaces::XML), ATTR_LANG)
}

/// `xml:space`。无法识别的取值记为错误，并按缺省处理。
pub(super) fn get_space(
    element: &XmlElement,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<WhiteSpaceHandling> {
    let raw = element.attribute(Some(namespaces::XML), ATTR_SPACE)?;
    if let Ok(space) = raw.parse::<WhiteSpaceHandling>() {
        Some(space)
    } else {
        report(
            diagnostics,
            Severity::Error,
            DiagnosticKind::InvalidEnumAttribute,
            format!("bad xml:space value '{raw}'"),
        );
        None
    }
}

/// `ttp:cellResolution`。
///
/// 属性缺失时原样返回 `current`；语法错误时记录错误并同样返回 `current`。
pub(super) fn get_cell_resolution(
    element: &XmlElement,
    current: CellResolution,
    diagnostics: &mut Vec<Diagnostic>,
) -> CellResolution {
    let Some(raw) = element.attribute(Some(namespaces::TTML_PARAMETER), ATTR_CELL_RESOLUTION)
    else {
        return current;
    };

    let parsed = CELL_RESOLUTION_REGEX.captures(raw).and_then(|caps| {
        let columns = caps[1].parse::<u32>().ok()?;
        let rows = caps[2].parse::<u32>().ok()?;
        Some(CellResolution { columns, rows })
    });

    parsed.unwrap_or_else(|| {
        report(
            diagnostics,
            Severity::Error,
            DiagnosticKind::MalformedCellResolution,
            format!("invalid cellResolution syntax '{raw}'"),
        );
        current
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tt_with_cell_resolution(value: &str) -> XmlElement {
        XmlElement::ttml("tt").with_attribute(
            Some(namespaces::TTML_PARAMETER),
            ATTR_CELL_RESOLUTION,
            value,
        )
    }

    #[test]
    fn test_get_cell_resolution() {
        let mut diagnostics = Vec::new();
        let default = CellResolution::default();

        let cr = get_cell_resolution(&tt_with_cell_resolution("40 24"), default, &mut diagnostics);
        assert_eq!(cr, CellResolution { columns: 40, rows: 24 });
        assert!(diagnostics.is_empty());

        let cr = get_cell_resolution(&XmlElement::ttml("tt"), default, &mut diagnostics);
        assert_eq!(cr, CellResolution { columns: 32, rows: 15 });
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_get_cell_resolution_rejects_bad_syntax() {
        for bad in ["bad", "40", "40  24", "40 24 1", "-1 5", "99999999999 1", "40,24"] {
            let mut diagnostics = Vec::new();
            let cr = get_cell_resolution(
                &tt_with_cell_resolution(bad),
                CellResolution::default(),
                &mut diagnostics,
            );
            assert_eq!(cr, CellResolution::default(), "input: {bad}");
            assert_eq!(diagnostics.len(), 1, "input: {bad}");
            assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedCellResolution);
            assert_eq!(diagnostics[0].severity, Severity::Error);
        }
    }

    #[test]
    fn test_cell_resolution_attribute_must_be_in_parameter_namespace() {
        let mut diagnostics = Vec::new();
        let element = XmlElement::ttml("tt").with_attribute(None, ATTR_CELL_RESOLUTION, "40 24");
        let cr = get_cell_resolution(&element, CellResolution::default(), &mut diagnostics);
        assert_eq!(cr, CellResolution::default());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_get_space() {
        let mut diagnostics = Vec::new();
        let preserve =
            XmlElement::ttml("p").with_attribute(Some(namespaces::XML), ATTR_SPACE, "preserve");
        assert_eq!(
            get_space(&preserve, &mut diagnostics),
            Some(WhiteSpaceHandling::Preserve)
        );
        assert_eq!(get_space(&XmlElement::ttml("p"), &mut diagnostics), None);
        assert!(diagnostics.is_empty());

        let bad = XmlElement::ttml("p").with_attribute(Some(namespaces::XML), ATTR_SPACE, "keep");
        assert_eq!(get_space(&bad, &mut diagnostics), None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::InvalidEnumAttribute);
    }

    #[test]
    fn test_get_id_and_lang_are_namespace_qualified() {
        let element = XmlElement::ttml("region")
            .with_attribute(None, ATTR_ID, "plain")
            .with_attribute(Some(namespaces::XML), ATTR_ID, "r1")
            .with_attribute(Some(namespaces::XML), ATTR_LANG, "not a real tag");

        assert_eq!(get_id(&element), Some("r1"));
        assert_eq!(get_lang(&element), Some("not a real tag"));
        assert_eq!(get_lang(&XmlElement::ttml("p")), None);
    }
}
