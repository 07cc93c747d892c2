//! # IMSC 读取器 - 结构遍历
//!
//! 自顶向下、深度优先地遍历元素树，单遍完成：
//! 检查 `head`/`body`/`layout` 的唯一性，向下传递 `xml:space` 与 `xml:lang`，
//! 构建模型节点，解析区域引用，并对每个节点提取样式。
//!
//! 区域引用只会在访问到该元素时，按文档中*已经*登记的区域解析一次。
//! 因此 `head` 必须在文档顺序上位于 `body` 之前，引用才能被解析。

use imsc_model::{
    ContentElement, ConvertError, DiagnosticKind, ElementKind, Region, Severity, namespaces,
};
use tracing::debug;

use super::{
    constants::{
        ATTR_REGION, TAG_BODY, TAG_DIV, TAG_HEAD, TAG_LAYOUT, TAG_P, TAG_REGION, TAG_SPAN, TAG_TT,
    },
    state::{ConversionContext, InheritedAttributes},
    styles::extract_styles,
    utils::{get_cell_resolution, get_id, get_lang, get_space},
};
use crate::tree::{QualifiedName, XmlElement};

/// 处理根元素 `tt`。
pub(super) fn process_tt(
    root: &XmlElement,
    ctx: &mut ConversionContext<'_>,
) -> Result<(), ConvertError> {
    if !root.name.is(namespaces::TTML, TAG_TT) {
        ctx.report(
            Severity::Fatal,
            DiagnosticKind::RootMismatch,
            format!("a tt element is not the root element (found {})", root.name),
        );
        return Err(ConvertError::RootMismatch {
            found: root.name.to_string(),
        });
    }

    let space = get_space(root, &mut ctx.diagnostics).unwrap_or_default();
    let lang = if let Some(lang) = get_lang(root) {
        lang.to_owned()
    } else {
        ctx.report(
            Severity::Warning,
            DiagnosticKind::MissingLang,
            "xml:lang not specified on tt",
        );
        String::new()
    };
    let inherited = InheritedAttributes { space, lang };

    ctx.cell_resolution = get_cell_resolution(root, ctx.cell_resolution, &mut ctx.diagnostics);

    let mut has_head = false;
    let mut has_body = false;

    for child in &root.children {
        if child.name.is(namespaces::TTML, TAG_HEAD) {
            if has_head {
                ctx.report(
                    Severity::Error,
                    DiagnosticKind::DuplicateSingleton,
                    "more than one head element present",
                );
            } else {
                has_head = true;
                process_head(child, &inherited, ctx)?;
            }
        } else if child.name.is(namespaces::TTML, TAG_BODY) {
            if has_body {
                ctx.report(
                    Severity::Error,
                    DiagnosticKind::DuplicateSingleton,
                    "more than one body element present",
                );
            } else {
                has_body = true;
                if let Some(body) = process_content_element(child, &inherited, ctx, 1)? {
                    ctx.document.set_body(body)?;
                }
            }
        }
    }

    Ok(())
}

fn process_head(
    element: &XmlElement,
    inherited: &InheritedAttributes,
    ctx: &mut ConversionContext<'_>,
) -> Result<(), ConvertError> {
    let inherited = inherited.resolve(element, &mut ctx.diagnostics);
    let mut has_layout = false;

    for child in &element.children {
        if child.name.is(namespaces::TTML, TAG_LAYOUT) {
            if has_layout {
                ctx.report(
                    Severity::Error,
                    DiagnosticKind::DuplicateSingleton,
                    "multiple layout elements",
                );
            } else {
                has_layout = true;
                process_layout(child, &inherited, ctx)?;
            }
        } else {
            ctx.report(
                Severity::Warning,
                DiagnosticKind::UnknownChild,
                format!("unexpected child of head: {}", child.name),
            );
        }
    }

    Ok(())
}

fn process_layout(
    element: &XmlElement,
    inherited: &InheritedAttributes,
    ctx: &mut ConversionContext<'_>,
) -> Result<(), ConvertError> {
    let inherited = inherited.resolve(element, &mut ctx.diagnostics);

    for child in &element.children {
        if child.name.is(namespaces::TTML, TAG_REGION) {
            let Some(region) = process_region(child, &inherited, ctx)? else {
                continue;
            };
            // 同 ID 的区域直接覆盖，后定义者生效
            if let Some(previous) = ctx.document.put_region(region)? {
                ctx.report(
                    Severity::Warning,
                    DiagnosticKind::DuplicateRegionId,
                    format!("region '{}' is defined more than once", previous.id()),
                );
            }
        } else {
            ctx.report(
                Severity::Warning,
                DiagnosticKind::UnknownChild,
                format!("unexpected child of layout: {}", child.name),
            );
        }
    }

    Ok(())
}

/// 构建区域但不插入文档，插入由调用方负责。
fn process_region(
    element: &XmlElement,
    inherited: &InheritedAttributes,
    ctx: &mut ConversionContext<'_>,
) -> Result<Option<Region>, ConvertError> {
    let Some(id) = get_id(element) else {
        ctx.report(
            Severity::Error,
            DiagnosticKind::MissingRequiredId,
            "region must have an id",
        );
        return Ok(None);
    };

    let mut region = Region::new(id, &ctx.document);

    let own = inherited.resolve(element, &mut ctx.diagnostics);
    region.set_space(own.space);
    region.set_lang(own.lang);

    extract_styles(
        element,
        &mut region,
        ctx.options.style_error_policy,
        &mut ctx.diagnostics,
    )?;

    Ok(Some(region))
}

fn content_kind(name: &QualifiedName) -> Option<ElementKind> {
    if name.namespace() != Some(namespaces::TTML) {
        return None;
    }
    match name.local_name() {
        TAG_BODY => Some(ElementKind::Body),
        TAG_DIV => Some(ElementKind::Div),
        TAG_P => Some(ElementKind::P),
        TAG_SPAN => Some(ElementKind::Span),
        _ => None,
    }
}

/// 把 `body`、`div`、`p` 或 `span` 转换为内容元素。
///
/// 其它标签返回 `None`，并且不会访问其后代：整棵子树被丢弃，而不是提升到父元素。
fn process_content_element(
    element: &XmlElement,
    inherited: &InheritedAttributes,
    ctx: &mut ConversionContext<'_>,
    depth: usize,
) -> Result<Option<ContentElement>, ConvertError> {
    let Some(kind) = content_kind(&element.name) else {
        debug!("丢弃无法识别的内容元素 {} 及其子树", element.name);
        return Ok(None);
    };

    let max_depth = ctx.options.max_nesting_depth;
    if depth > max_depth {
        return Err(ConvertError::NestingTooDeep { max_depth });
    }

    let mut node = ContentElement::new(kind, &ctx.document);

    let own = inherited.resolve(element, &mut ctx.diagnostics);
    node.set_space(own.space);
    node.set_lang(own.lang.clone());

    for child in &element.children {
        if let Some(child_node) = process_content_element(child, &own, ctx, depth + 1)? {
            node.push_child(child_node)?;
        }
    }

    process_region_reference(element, &mut node, ctx)?;

    extract_styles(
        element,
        &mut node,
        ctx.options.style_error_policy,
        &mut ctx.diagnostics,
    )?;

    Ok(Some(node))
}

/// 按文档中当前已登记的区域解析 `region` 属性，不做延迟解析。
fn process_region_reference(
    element: &XmlElement,
    node: &mut ContentElement,
    ctx: &mut ConversionContext<'_>,
) -> Result<(), ConvertError> {
    let Some(region_id) = element.attribute(None, ATTR_REGION) else {
        return Ok(());
    };

    if let Some(region) = ctx.document.get_region(region_id) {
        node.set_region(region)?;
    } else {
        ctx.report(
            Severity::Warning,
            DiagnosticKind::UnresolvedRegionRef,
            format!("element references unknown region '{region_id}'"),
        );
    }

    Ok(())
}
