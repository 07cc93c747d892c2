use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::CellResolution;

/// 默认允许的最大元素嵌套深度。
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// 遇到已识别样式属性的非法取值时的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StyleErrorPolicy {
    #[default]
    /// 中止整个转换，不产生文档。
    Abort,
    /// 记录一条错误诊断并跳过该属性，其余内容照常转换。
    SkipProperty,
}

/// IMSC 读取选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
pub struct ReaderOptions {
    /// 允许的最大元素嵌套深度，超出时转换失败。
    pub max_nesting_depth: usize,
    /// 非法样式值的处理策略。
    pub style_error_policy: StyleErrorPolicy,
    /// 根元素没有（或写错了）`ttp:cellResolution` 时使用的网格。
    pub default_cell_resolution: CellResolution,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            style_error_policy: StyleErrorPolicy::Abort,
            default_cell_resolution: CellResolution::default(),
        }
    }
}
