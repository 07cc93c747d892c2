//! # IMSC 读取器 - 常量定义
//!
//! 转换时用到的元素本地名和属性本地名。命名空间见 `imsc_model::namespaces`。

pub(super) const TAG_TT: &str = "tt";
pub(super) const TAG_HEAD: &str = "head";
pub(super) const TAG_LAYOUT: &str = "layout";
pub(super) const TAG_REGION: &str = "region";
pub(super) const TAG_BODY: &str = "body";
pub(super) const TAG_DIV: &str = "div";
pub(super) const TAG_P: &str = "p";
pub(super) const TAG_SPAN: &str = "span";

pub(super) const ATTR_ID: &str = "id";
pub(super) const ATTR_LANG: &str = "lang";
pub(super) const ATTR_SPACE: &str = "space";
pub(super) const ATTR_CELL_RESOLUTION: &str = "cellResolution";
/// 无命名空间的 `region` 属性
pub(super) const ATTR_REGION: &str = "region";
