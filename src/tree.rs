//! # 命名空间感知的元素树
//!
//! 转换器的输入。[`parse_element_tree`] 使用 `quick-xml` 的 `NsReader`
//! 从字符串构建这棵树；调用方也可以直接手动构造。

use std::{fmt, str};

use imsc_model::{ConvertError, namespaces};
use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
    name::ResolveResult,
};
use tracing::error;

/// 由命名空间 URI 和本地名组成的限定名。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    namespace: Option<String>,
    local_name: String,
}

impl QualifiedName {
    pub fn new(namespace: Option<&str>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            local_name: local_name.into(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// 判断是否为 `{namespace}local_name`。
    #[must_use]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub name: QualifiedName,
    pub value: String,
}

/// 一个元素：限定名、按文档顺序排列的属性和子元素。文本节点不会被保留。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: QualifiedName,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    #[must_use]
    pub const fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 在 TTML 命名空间中创建元素。
    #[must_use]
    pub fn ttml(local_name: &str) -> Self {
        Self::new(QualifiedName::new(Some(namespaces::TTML), local_name))
    }

    /// 追加一个属性。`namespace` 为 `None` 表示无前缀属性。
    #[must_use]
    pub fn with_attribute(
        mut self,
        namespace: Option<&str>,
        local_name: &str,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push(XmlAttribute {
            name: QualifiedName::new(namespace, local_name),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// 按限定名查找属性值。
    #[must_use]
    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| {
                attr.name.namespace() == namespace && attr.name.local_name() == local_name
            })
            .map(|attr| attr.value.as_str())
    }
}

/// 把 XML 文本解析为元素树。
///
/// `max_depth` 限制元素嵌套深度（根元素深度为 1）。
///
/// # Errors
///
/// * `ConvertError::Xml` / `ConvertError::Attribute` - 输入不是格式良好的 XML
/// * `ConvertError::UnboundPrefix` - 使用了未声明的命名空间前缀
/// * `ConvertError::NestingTooDeep` - 嵌套深度超过 `max_depth`
/// * `ConvertError::MissingRoot` - 文档中没有元素
pub fn parse_element_tree(content: &str, max_depth: usize) -> Result<XmlElement, ConvertError> {
    let mut reader = NsReader::from_str(content);
    reader.config_mut().trim_text(true);
    reader.config_mut().expand_empty_elements = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_resolved_event();
        let (ns, event) = match event {
            Ok(resolved) => resolved,
            Err(e) => {
                error!(
                    "XML 解析错误，位置 {}: {}。无法继续解析",
                    reader.error_position(),
                    e
                );
                return Err(ConvertError::Xml(e));
            }
        };

        match event {
            Event::Start(e) => {
                if stack.len() >= max_depth {
                    return Err(ConvertError::NestingTooDeep { max_depth });
                }
                let name = resolve_name(&ns, e.local_name().as_ref())?;
                let element = read_attributes(&reader, &e, XmlElement::new(name))?;
                stack.push(element);
            }
            Event::End(_) => {
                // quick-xml 默认校验结束标签与开始标签匹配，这里一定有对应元素
                let Some(element) = stack.pop() else {
                    continue;
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or(ConvertError::MissingRoot)
}

fn read_attributes(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    mut element: XmlElement,
) -> Result<XmlElement, ConvertError> {
    for attr in start.attributes() {
        let attr = attr?;
        // 跳过 xmlns / xmlns:* 声明
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let name = resolve_name(&ns, local.as_ref())?;
        let value = attr.decode_and_unescape_value(reader.decoder())?;
        element.attributes.push(XmlAttribute {
            name,
            value: value.into_owned(),
        });
    }
    Ok(element)
}

fn resolve_name(ns: &ResolveResult<'_>, local_name: &[u8]) -> Result<QualifiedName, ConvertError> {
    let local_name = str::from_utf8(local_name)?;
    let namespace = match ns {
        ResolveResult::Bound(namespace) => Some(str::from_utf8(namespace.as_ref())?),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) if prefix.as_slice() == b"xml" => Some(namespaces::XML),
        ResolveResult::Unknown(prefix) => {
            return Err(ConvertError::UnboundPrefix(
                String::from_utf8_lossy(prefix).into_owned(),
            ));
        }
    };
    Ok(QualifiedName::new(namespace, local_name))
}
