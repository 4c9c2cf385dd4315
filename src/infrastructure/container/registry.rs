//! 注册表：定义与 Bean 的存储
//!
//! 只负责存取，校验与索引规则在注册器和自动索引器中实现。

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

use super::bean::Bean;
use crate::errors::BoxError;

/// 标识符
///
/// Bean 名、定义名、类型名、接口名和构造参数名共用同一个命名空间，
/// 构造注入正是依靠这一点按参数名或声明类型查找依赖。
pub type Identifier = String;

/// 零参数工厂
pub type FactoryFn = Arc<dyn Fn() -> std::result::Result<Bean, BoxError> + Send + Sync>;

/// 延迟构建规则
#[derive(Clone)]
pub enum Definition {
    /// 零参数工厂
    Factory(FactoryFn),
    /// 按名称引用的已登记类
    Type(Identifier),
}

impl Definition {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> std::result::Result<Bean, BoxError> + Send + Sync + 'static,
    {
        Definition::Factory(Arc::new(factory))
    }

    pub fn of_type(name: impl Into<Identifier>) -> Self {
        Definition::Type(name.into())
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            Definition::Type(name) => Some(name),
            Definition::Factory(_) => None,
        }
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, Definition::Factory(_))
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Factory(_) => f.write_str("Factory(..)"),
            Definition::Type(name) => f.debug_tuple("Type").field(name).finish(),
        }
    }
}

impl From<&str> for Definition {
    fn from(name: &str) -> Self {
        Definition::Type(name.to_string())
    }
}

impl From<String> for Definition {
    fn from(name: String) -> Self {
        Definition::Type(name)
    }
}

/// 定义与 Bean 两张映射表
#[derive(Default)]
pub struct Registry {
    definitions: DashMap<Identifier, Definition>,
    beans: DashMap<Identifier, Bean>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definition(&self, id: &str) -> Option<Definition> {
        self.definitions.get(id).map(|entry| entry.value().clone())
    }

    pub fn has_definition(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn insert_definition(&self, id: impl Into<Identifier>, definition: Definition) {
        self.definitions.insert(id.into(), definition);
    }

    /// 仅在标识符未被占用时写入，返回是否写入
    pub fn insert_definition_if_absent(
        &self,
        id: impl Into<Identifier>,
        definition: impl FnOnce() -> Definition,
    ) -> bool {
        let mut inserted = false;
        self.definitions.entry(id.into()).or_insert_with(|| {
            inserted = true;
            definition()
        });
        inserted
    }

    /// 取出非空 Bean；`Data(Null)` 视为未设置
    pub fn bean(&self, id: &str) -> Option<Bean> {
        self.beans
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(|bean| !bean.is_absent())
    }

    pub fn has_bean(&self, id: &str) -> bool {
        self.bean(id).is_some()
    }

    pub fn insert_bean(&self, id: impl Into<Identifier>, bean: Bean) {
        self.beans.insert(id.into(), bean);
    }

    /// 空值槽位同样视为未占用
    pub fn insert_bean_if_absent(&self, id: impl Into<Identifier>, bean: &Bean) -> bool {
        match self.beans.entry(id.into()) {
            Entry::Occupied(mut entry) if entry.get().is_absent() => {
                entry.insert(bean.clone());
                true
            }
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(bean.clone());
                true
            }
        }
    }

    pub fn definition_ids(&self) -> Vec<Identifier> {
        let mut ids: Vec<_> = self.definitions.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn bean_ids(&self) -> Vec<Identifier> {
        let mut ids: Vec<_> = self.beans.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn bean_count(&self) -> usize {
        self.beans.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let registry = Registry::new();

        assert!(registry.insert_definition_if_absent("Logger", || Definition::of_type("FileLogger")));
        assert!(!registry.insert_definition_if_absent("Logger", || Definition::of_type("NullLogger")));
        assert_eq!(
            registry.definition("Logger").unwrap().type_name(),
            Some("FileLogger")
        );

        registry.insert_definition("Logger", Definition::of_type("NullLogger"));
        assert_eq!(
            registry.definition("Logger").unwrap().type_name(),
            Some("NullLogger")
        );
    }

    #[test]
    fn test_null_bean_counts_as_unset() {
        let registry = Registry::new();
        registry.insert_bean("feature.flag", Bean::Data(serde_json::Value::Null));

        assert!(!registry.has_bean("feature.flag"));
        assert_eq!(registry.bean_count(), 1);

        registry.insert_bean("feature.flag", Bean::from(true));
        assert!(registry.has_bean("feature.flag"));
    }

    #[test]
    fn test_sorted_ids() {
        let registry = Registry::new();
        registry.insert_bean("b", Bean::from(1i64));
        registry.insert_bean("a", Bean::from(2i64));
        registry.insert_definition("z", Definition::of_type("Z"));
        registry.insert_definition("y", Definition::factory(|| Ok(Bean::from("y"))));

        assert_eq!(registry.bean_ids(), vec!["a", "b"]);
        assert_eq!(registry.definition_ids(), vec!["y", "z"]);
    }
}
