use std::sync::Arc;

use crate::{error::CatalogError, model::CatalogEntry};

/// 目录抽象：core 不关心商品数据来自文件/数据库/网络。
///
/// 约定：一次 `snapshot` 调用返回的序列在这次构建期间保持不变。
pub trait Catalog: Send + Sync {
    fn snapshot(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}

impl Catalog for Vec<CatalogEntry> {
    fn snapshot(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.clone())
    }
}

impl Catalog for [CatalogEntry] {
    fn snapshot(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        Ok(self.to_vec())
    }
}

impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    fn snapshot(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        (**self).snapshot()
    }
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn snapshot(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        (**self).snapshot()
    }
}
