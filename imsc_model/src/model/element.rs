use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::{Document, DocumentId, ModelError, Region, Stylable, StyleMap};

/// `xml:space` 的取值。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WhiteSpaceHandling {
    #[default]
    Default,
    Preserve,
}

/// 内容元素的种类。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Body,
    Div,
    P,
    Span,
}

/// `body`、`div`、`p` 或 `span` 元素。
///
/// 子元素按文档顺序存放。区域引用只保存区域 ID，
/// 区域本身归 [`Document`] 所有。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    kind: ElementKind,
    doc_id: DocumentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    space: WhiteSpaceHandling,
    lang: String,
    #[serde(skip_serializing_if = "StyleMap::is_empty", default)]
    styles: StyleMap,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    children: Vec<ContentElement>,
}

impl ContentElement {
    /// 创建一个绑定到 `doc` 的空元素。
    #[must_use]
    pub fn new(kind: ElementKind, doc: &Document) -> Self {
        Self {
            kind,
            doc_id: doc.id(),
            region: None,
            space: WhiteSpaceHandling::default(),
            lang: String::new(),
            styles: StyleMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    #[must_use]
    pub const fn doc_id(&self) -> DocumentId {
        self.doc_id
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// 在子元素序列末尾追加一个元素。
    ///
    /// # Errors
    ///
    /// 子元素属于另一个文档时返回 [`ModelError::ForeignDocument`]。
    pub fn push_child(&mut self, child: Self) -> Result<(), ModelError> {
        if child.doc_id != self.doc_id {
            return Err(ModelError::ForeignDocument {
                expected: self.doc_id,
                found: child.doc_id,
            });
        }
        self.children.push(child);
        Ok(())
    }

    /// 元素引用的区域 ID。
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// 将元素关联到一个区域。
    ///
    /// # Errors
    ///
    /// 区域属于另一个文档时返回 [`ModelError::ForeignDocument`]。
    pub fn set_region(&mut self, region: &Region) -> Result<(), ModelError> {
        if region.doc_id() != self.doc_id {
            return Err(ModelError::ForeignDocument {
                expected: self.doc_id,
                found: region.doc_id(),
            });
        }
        self.region = Some(region.id().to_owned());
        Ok(())
    }

    #[must_use]
    pub const fn space(&self) -> WhiteSpaceHandling {
        self.space
    }

    pub const fn set_space(&mut self, space: WhiteSpaceHandling) {
        self.space = space;
    }

    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = lang.into();
    }

    /// 深度优先、先序遍历以该元素为根的整棵子树。
    pub fn descendants(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

impl Stylable for ContentElement {
    fn style_map(&self) -> &StyleMap {
        &self.styles
    }

    fn style_map_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_space_handling_values() {
        assert_eq!(
            "preserve".parse::<WhiteSpaceHandling>().unwrap(),
            WhiteSpaceHandling::Preserve
        );
        assert_eq!(
            "default".parse::<WhiteSpaceHandling>().unwrap(),
            WhiteSpaceHandling::Default
        );
        assert!("PRESERVE".parse::<WhiteSpaceHandling>().is_err());
        assert!("collapse".parse::<WhiteSpaceHandling>().is_err());
    }

    #[test]
    fn test_push_child_keeps_document_order() {
        let doc = Document::new();
        let mut div = ContentElement::new(ElementKind::Div, &doc);
        div.push_child(ContentElement::new(ElementKind::P, &doc))
            .unwrap();
        div.push_child(ContentElement::new(ElementKind::Span, &doc))
            .unwrap();

        let kinds: Vec<_> = div.children().iter().map(ContentElement::kind).collect();
        assert_eq!(kinds, vec![ElementKind::P, ElementKind::Span]);
    }

    #[test]
    fn test_push_child_from_other_document_is_rejected() {
        let doc = Document::new();
        let other = Document::new();
        let mut div = ContentElement::new(ElementKind::Div, &doc);

        let err = div
            .push_child(ContentElement::new(ElementKind::P, &other))
            .unwrap_err();
        assert!(matches!(err, ModelError::ForeignDocument { .. }));
        assert!(div.children().is_empty());
    }

    #[test]
    fn test_set_region_requires_same_document() {
        let doc = Document::new();
        let other = Document::new();
        let mut p = ContentElement::new(ElementKind::P, &doc);

        assert!(p.set_region(&Region::new("r1", &other)).is_err());
        assert_eq!(p.region(), None);

        p.set_region(&Region::new("r1", &doc)).unwrap();
        assert_eq!(p.region(), Some("r1"));
    }

    #[test]
    fn test_descendants_preorder() {
        let doc = Document::new();
        let mut body = ContentElement::new(ElementKind::Body, &doc);
        let mut div = ContentElement::new(ElementKind::Div, &doc);
        div.push_child(ContentElement::new(ElementKind::P, &doc))
            .unwrap();
        body.push_child(div).unwrap();
        body.push_child(ContentElement::new(ElementKind::Div, &doc))
            .unwrap();

        let kinds: Vec<_> = body.descendants().map(ContentElement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Body,
                ElementKind::Div,
                ElementKind::P,
                ElementKind::Div
            ]
        );
    }
}
