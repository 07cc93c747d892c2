//! # IMSC 文档读取器
//!
//! 把命名空间感知的元素树转换为 `imsc_model` 文档模型。
//! 大部分结构问题只记录诊断并继续；根元素不是 `tt`、
//! 样式取值非法（默认策略下）和嵌套过深会中止转换。

mod constants;
mod handlers;
mod state;
mod styles;
mod utils;

use imsc_model::{ConvertError, Diagnostic, Document, ParsedDocument, ReaderOptions};
use tracing::debug;

use self::state::ConversionContext;
use crate::tree::{XmlElement, parse_element_tree};

/// 将元素树转换为文档。
///
/// # 返回
///
/// * `Ok(ParsedDocument)` - 转换得到的文档，以及按发生顺序记录的诊断。
/// * `Err(ConvertError)` - 转换被中止，不产生文档。
///
/// # Errors
///
/// * `ConvertError::RootMismatch` - 根元素不是 `{http://www.w3.org/ns/ttml}tt`
/// * `ConvertError::MalformedStyleValue` - 已识别的样式属性取值不合语法
/// * `ConvertError::NestingTooDeep` - 内容元素嵌套超过 `options.max_nesting_depth`
pub fn convert(root: &XmlElement, options: &ReaderOptions) -> Result<ParsedDocument, ConvertError> {
    let mut diagnostics = Vec::new();
    let document = convert_with_diagnostics(root, options, &mut diagnostics)?;
    Ok(ParsedDocument {
        document,
        diagnostics,
    })
}

/// 与 [`convert`] 相同，但诊断写入调用方提供的列表。
///
/// 转换失败时，失败前记录的诊断（包括 `Severity::Fatal` 级别的根元素错误）
/// 仍然保留在 `diagnostics` 中。
///
/// # Errors
///
/// 与 [`convert`] 相同。
pub fn convert_with_diagnostics(
    root: &XmlElement,
    options: &ReaderOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Document, ConvertError> {
    let mut context = ConversionContext::new(options);
    let result = handlers::process_tt(root, &mut context);
    diagnostics.append(&mut context.diagnostics);
    result?;

    let document = context.into_document();
    debug!(
        regions = document.region_count(),
        has_body = document.body().is_some(),
        "IMSC 文档转换完成"
    );
    Ok(document)
}

/// 解析 IMSC / TTML 文本并转换为文档。
///
/// # Errors
///
/// 除 [`convert`] 的错误外，输入不是格式良好的 XML 时返回 `ConvertError::Xml`
/// 等解析错误。
pub fn read_imsc(content: &str, options: &ReaderOptions) -> Result<ParsedDocument, ConvertError> {
    let root = parse_element_tree(content, options.max_nesting_depth)?;
    convert(&root, options)
}
