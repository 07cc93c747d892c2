use serde::{Deserialize, Serialize};

use crate::{Document, DocumentId, Stylable, StyleMap, WhiteSpaceHandling};

/// 一个具名的呈现区域，由 `<layout>` 中的 `<region>` 定义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    id: String,
    doc_id: DocumentId,
    space: WhiteSpaceHandling,
    lang: String,
    #[serde(skip_serializing_if = "StyleMap::is_empty", default)]
    styles: StyleMap,
}

impl Region {
    /// 创建一个属于 `doc` 的区域。区域需要通过 [`Document::put_region`] 插入文档。
    #[must_use]
    pub fn new(id: impl Into<String>, doc: &Document) -> Self {
        Self {
            id: id.into(),
            doc_id: doc.id(),
            space: WhiteSpaceHandling::default(),
            lang: String::new(),
            styles: StyleMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn doc_id(&self) -> DocumentId {
        self.doc_id
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
}

impl Stylable for Region {
    fn style_map(&self) -> &StyleMap {
        &self.styles
    }

    fn style_map_mut(&mut self) -> &mut StyleMap {
        &mut self.styles
    }
}
