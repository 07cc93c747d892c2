use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use crate::Document;

/// 诊断的严重程度。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    /// 伴随转换失败记录，此时不会产生文档。
    Fatal,
}

/// 诊断所描述的问题类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// 根元素不是 `tt`。
    RootMismatch,
    /// 第二个 `head`、`body` 或 `layout`。
    DuplicateSingleton,
    /// `region` 缺少 `xml:id`。
    MissingRequiredId,
    /// `head` 或 `layout` 下出现了不认识的子元素。
    UnknownChild,
    /// `region` 属性引用了不存在的区域。
    UnresolvedRegionRef,
    /// 枚举型属性（`xml:space`）的取值无法识别。
    InvalidEnumAttribute,
    /// `ttp:cellResolution` 不是两个整数。
    MalformedCellResolution,
    /// 非法的样式值（仅在 [`StyleErrorPolicy::SkipProperty`](crate::StyleErrorPolicy) 下作为诊断出现）。
    MalformedStyleValue,
    /// `tt` 上没有 `xml:lang`。
    MissingLang,
    /// 同一个区域 ID 被定义了多次。
    DuplicateRegionId,
}

/// 转换过程中记录的一条诊断信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// 转换成功后的结果：文档以及按发生顺序排列的诊断。
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDocument {
    /// 某一类诊断出现的次数。
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// 是否记录了错误级别（或更严重）的诊断。
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity >= Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}
