//! IMSC 文档中使用的 XML 命名空间 URI。

/// TTML 元素命名空间。
pub const TTML: &str = "http://www.w3.org/ns/ttml";
/// TTML 样式属性命名空间（`tts:`）。
pub const TTML_STYLING: &str = "http://www.w3.org/ns/ttml#styling";
/// TTML 参数属性命名空间（`ttp:`）。
pub const TTML_PARAMETER: &str = "http://www.w3.org/ns/ttml#parameter";
/// 内建的 `xml:` 前缀命名空间。
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
