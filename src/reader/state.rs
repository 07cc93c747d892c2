//! # 转换状态

use imsc_model::{
    CellResolution, Diagnostic, DiagnosticKind, Document, ReaderOptions, Severity,
    WhiteSpaceHandling,
};
use tracing::{error, warn};

use super::utils::{get_lang, get_space};
use crate::tree::XmlElement;

/// 一次转换独占的可变状态。
#[derive(Debug)]
pub(super) struct ConversionContext<'a> {
    /// 正在构建的文档
    pub(super) document: Document,
    /// 当前生效的单元格网格，在根元素上确定一次。
    pub(super) cell_resolution: CellResolution,
    pub(super) options: &'a ReaderOptions,
    /// 按发生顺序记录的诊断
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl<'a> ConversionContext<'a> {
    pub(super) fn new(options: &'a ReaderOptions) -> Self {
        Self {
            document: Document::new(),
            cell_resolution: options.default_cell_resolution,
            options,
            diagnostics: Vec::new(),
        }
    }

    pub(super) fn report(
        &mut self,
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) {
        report(&mut self.diagnostics, severity, kind, message);
    }

    pub(super) fn into_document(mut self) -> Document {
        self.document.set_cell_resolution(self.cell_resolution);
        self.document
    }
}

/// 记录一条诊断，并同时输出到 `tracing`。
pub(super) fn report(
    diagnostics: &mut Vec<Diagnostic>,
    severity: Severity,
    kind: DiagnosticKind,
    message: impl Into<String>,
) {
    let message = message.into();
    match severity {
        Severity::Warning => warn!(?kind, "{message}"),
        Severity::Error | Severity::Fatal => error!(?kind, %severity, "{message}"),
    }
    diagnostics.push(Diagnostic {
        severity,
        kind,
        message,
    });
}

/// 沿元素树向下传递的可继承属性。
///
/// 每一层都按值计算自己的版本，兄弟子树之间互不影响。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct InheritedAttributes {
    pub(super) space: WhiteSpaceHandling,
    pub(super) lang: String,
}

impl InheritedAttributes {
    /// 元素自身的 `xml:space` / `xml:lang` 优先，否则沿用继承值。
    pub(super) fn resolve(&self, element: &XmlElement, diagnostics: &mut Vec<Diagnostic>) -> Self {
        Self {
            space: get_space(element, diagnostics).unwrap_or(self.space),
            lang: get_lang(element).map_or_else(|| self.lang.clone(), str::to_owned),
        }
    }
}
