use std::{
    collections::HashMap,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

use crate::{ContentElement, ElementKind, ModelError, Region};

/// 文档的唯一标识，用于把区域和内容元素绑定到所属文档。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// `ttp:cellResolution` 声明的单元格网格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellResolution {
    pub columns: u32,
    pub rows: u32,
}

impl Default for CellResolution {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 15,
        }
    }
}

/// 转换得到的文档：区域表加上唯一的 `body`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    cell_resolution: CellResolution,
    regions: HashMap<String, Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<ContentElement>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: DocumentId::next(),
            cell_resolution: CellResolution::default(),
            regions: HashMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    #[must_use]
    pub const fn body(&self) -> Option<&ContentElement> {
        self.body.as_ref()
    }

    /// 设置文档的 `body`。
    ///
    /// # Errors
    ///
    /// - 元素不是 `body` 时返回 [`ModelError::NotABody`]。
    /// - 元素属于另一个文档时返回 [`ModelError::ForeignDocument`]。
    pub fn set_body(&mut self, body: ContentElement) -> Result<(), ModelError> {
        if body.kind() != ElementKind::Body {
            return Err(ModelError::NotABody(body.kind()));
        }
        self.check_owner(body.doc_id())?;
        self.body = Some(body);
        Ok(())
    }

    /// 插入区域。同 ID 的旧区域会被替换并返回。
    ///
    /// # Errors
    ///
    /// 区域属于另一个文档时返回 [`ModelError::ForeignDocument`]。
    pub fn put_region(&mut self, region: Region) -> Result<Option<Region>, ModelError> {
        self.check_owner(region.doc_id())?;
        Ok(self.regions.insert(region.id().to_owned(), region))
    }

    #[must_use]
    pub fn get_region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub const fn cell_resolution(&self) -> CellResolution {
        self.cell_resolution
    }

    pub const fn set_cell_resolution(&mut self, cell_resolution: CellResolution) {
        self.cell_resolution = cell_resolution;
    }

    fn check_owner(&self, found: DocumentId) -> Result<(), ModelError> {
        if found == self.id {
            Ok(())
        } else {
            Err(ModelError::ForeignDocument {
                expected: self.id,
                found,
            })
        }
    }
}
