use std::str::Utf8Error;

use quick_xml::{Error as QuickXmlErrorMain, events::attributes::AttrError as QuickXmlAttrError};
use thiserror::Error;

use crate::{DocumentId, ElementKind, StyleProperty};

/// 定义 IMSC 文档转换过程中可能发生的各种错误。
///
/// 只有这里列出的情况会中止整个转换；其余结构性问题都会以
/// [`Diagnostic`](crate::Diagnostic) 的形式记录下来并继续处理。
#[derive(Error, Debug)]
pub enum ConvertError {
    /// XML 解析错误，来自 `quick-xml` 库。
    #[error("XML error: {0}")]
    Xml(#[from] QuickXmlErrorMain),
    /// XML 属性解析错误，来自 `quick-xml` 库。
    #[error("XML attribute error: {0}")]
    Attribute(#[from] QuickXmlAttrError),
    /// 名称或命名空间不是有效的 UTF-8。
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),
    /// 元素或属性使用了未声明的命名空间前缀。
    #[error("unbound namespace prefix '{0}'")]
    UnboundPrefix(String),
    /// 文档中没有任何元素。
    #[error("document has no root element")]
    MissingRoot,
    /// 根元素不是 `tt`。
    #[error("a tt element is not the root element (found {found})")]
    RootMismatch {
        /// 实际遇到的根元素限定名。
        found: String,
    },
    /// 已识别的样式属性的值不符合该属性的语法。
    #[error("malformed value '{value}' for {property}: {source}")]
    MalformedStyleValue {
        /// 出错的样式属性。
        property: StyleProperty,
        /// 原始属性文本。
        value: String,
        /// 语法错误详情。
        #[source]
        source: StyleValueError,
    },
    /// 元素嵌套超过了配置的最大深度。
    #[error("element nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep {
        /// 配置的最大深度。
        max_depth: usize,
    },
    /// 文档模型拒绝了一次操作。
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// 违反文档模型约定时返回的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// 对象属于另一个文档。
    #[error("object belongs to document {found:?}, expected {expected:?}")]
    ForeignDocument {
        /// 目标文档。
        expected: DocumentId,
        /// 对象所属的文档。
        found: DocumentId,
    },
    /// 只有 `body` 元素可以作为文档的根内容元素。
    #[error("a {0} element cannot be the document body")]
    NotABody(ElementKind),
    /// 样式值的类型与样式属性不匹配。
    #[error("{property} does not accept a {found} value")]
    StyleTypeMismatch {
        /// 目标样式属性。
        property: StyleProperty,
        /// 传入值的类型名。
        found: &'static str,
    },
}

/// 样式属性文本不符合其语法时返回的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleValueError {
    /// 不是 `<数字><单位>` 形式的长度。
    #[error("'{0}' is not a valid length")]
    Length(String),
    /// 需要两个以空白分隔的长度。
    #[error("expected two lengths, found '{0}'")]
    LengthPair(String),
    /// 无法识别的颜色表达式。
    #[error("'{0}' is not a valid color")]
    Color(String),
    /// 不是有效的十进制数。
    #[error("'{0}' is not a valid number")]
    Number(String),
    /// 不在该属性允许的关键字列表中。
    #[error("'{value}' is not a recognized {property} keyword")]
    Keyword {
        /// 原始文本。
        value: String,
        /// 样式属性的本地名。
        property: &'static str,
    },
}
