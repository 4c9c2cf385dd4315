//! 解析：缓存查找，未命中时构建并缓存

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::trace;

use super::bean::Bean;
use super::Container;
use crate::errors::{ContainerError, Result};

impl Container {
    /// 解析标识符
    ///
    /// 1. 已有 Bean 直接返回
    /// 2. 有定义则按定义构建
    /// 3. 标识符本身是已登记的类则直接构建
    /// 4. 否则返回 `None`
    ///
    /// 新构建的值经 `set` 缓存，同时按其类型层次自动索引。
    pub fn get(&self, id: &str) -> Result<Option<Bean>> {
        self.stats.total_resolutions.fetch_add(1, Ordering::Relaxed);

        if let Some(bean) = self.registry.bean(id) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            trace!(id, "Bean cache hit");
            return Ok(Some(bean));
        }

        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);

        let bean = if let Some(definition) = self.registry.definition(id) {
            self.create_from_definition(id, &definition)?
        } else if self.catalog.is_class(id) {
            self.create_from_class(id)?
        } else {
            return Ok(None);
        };

        self.set(id, bean.clone())?;
        Ok((!bean.is_absent()).then_some(bean))
    }

    /// 解析并向下转型为具体类型
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Option<Arc<T>>> {
        match self.get(id)? {
            Some(bean) => bean
                .downcast::<T>()
                .map(Some)
                .ok_or_else(|| ContainerError::TypeMismatch {
                    id: id.to_string(),
                    expected: std::any::type_name::<T>().to_string(),
                    actual: bean.type_name().to_string(),
                }),
            None => Ok(None),
        }
    }

    /// 解析数据值并反序列化
    pub fn get_value<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>> {
        match self.get(id)? {
            Some(bean) => bean
                .deserialize::<T>()
                .map(Some)
                .ok_or_else(|| ContainerError::TypeMismatch {
                    id: id.to_string(),
                    expected: std::any::type_name::<T>().to_string(),
                    actual: bean.type_name().to_string(),
                }),
            None => Ok(None),
        }
    }

    /// 标识符能否被解析（不触发构建）
    pub fn contains(&self, id: &str) -> bool {
        self.registry.has_bean(id)
            || self.registry.has_definition(id)
            || self.catalog.is_class(id)
    }

    pub fn get_stats(&self) -> ContainerStats {
        ContainerStats {
            total_resolutions: self.stats.total_resolutions.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.stats.cache_misses.load(Ordering::Relaxed),
            definitions: self.registry.definition_count(),
            beans: self.registry.bean_count(),
        }
    }

    pub fn reset_stats(&self) {
        self.stats.total_resolutions.store(0, Ordering::Relaxed);
        self.stats.cache_hits.store(0, Ordering::Relaxed);
        self.stats.cache_misses.store(0, Ordering::Relaxed);
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerStats {
    pub total_resolutions: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub definitions: usize,
    pub beans: usize,
}

impl ContainerStats {
    pub fn total(&self) -> usize {
        self.total_resolutions
    }

    /// 缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total() as f64
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} resolutions, {:.1}% cache hit rate, {} definitions, {} beans",
            self.total_resolutions,
            self.hit_rate() * 100.0,
            self.definitions,
            self.beans
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::container::{Instance, TypeDescriptor};
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug)]
    struct Counter {
        id: usize,
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let container = Container::new();
        assert!(container.get("nothing.here").unwrap().is_none());
        assert!(!container.contains("nothing.here"));
    }

    #[test]
    fn test_factory_called_once() {
        let container = Container::new();
        let created = Arc::new(AtomicUsize::new(0));
        let created_clone = created.clone();

        container.declare_type(TypeDescriptor::class("Counter"));
        container
            .register_factory("counter", move || {
                let id = created_clone.fetch_add(1, Ordering::SeqCst);
                Ok(Instance::new("Counter", Counter { id }).into())
            })
            .unwrap();

        let first = container.get("counter").unwrap().unwrap();
        let second = container.get("counter").unwrap().unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(container.get_as::<Counter>("counter").unwrap().unwrap().id, 0);
        // 工厂产出的对象同样按类型索引
        assert!(container.get("Counter").unwrap().unwrap().ptr_eq(&first));
    }

    #[test]
    fn test_factory_returning_null_is_absent() {
        let container = Container::new();
        container
            .register_factory("maybe", || Ok(Bean::Data(serde_json::Value::Null)))
            .unwrap();

        assert!(container.get("maybe").unwrap().is_none());
    }

    #[test]
    fn test_typed_helpers() {
        let container = Container::new();
        container.set("limits", json!({"max": 5})).unwrap();
        container.set("name", "acme").unwrap();

        let limits: serde_json::Map<String, serde_json::Value> =
            container.get_value("limits").unwrap().unwrap();
        assert_eq!(limits["max"], 5);

        assert!(matches!(
            container.get_as::<Counter>("name"),
            Err(ContainerError::TypeMismatch { .. })
        ));
        assert!(matches!(
            container.get_value::<u32>("name"),
            Err(ContainerError::TypeMismatch { .. })
        ));
        assert_eq!(container.get_value::<String>("missing").unwrap(), None);
    }

    #[test]
    fn test_stats() {
        let container = Container::new();
        container.set("a", 1i64).unwrap();

        for _ in 0..4 {
            container.get("a").unwrap();
        }
        container.get("b").unwrap();

        let stats = container.get_stats();
        assert_eq!(stats.total(), 5);
        assert_eq!(stats.cache_hits, 4);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.beans, 1);
        assert!((stats.hit_rate() - 0.8).abs() < f64::EPSILON);
        assert!(stats.summary().contains("80.0%"));

        container.reset_stats();
        assert_eq!(container.get_stats().total(), 0);
    }

    #[test]
    fn test_stats_serialize() {
        let container = Container::new();
        container.set("a", 1i64).unwrap();
        container.get("a").unwrap();

        let value = serde_json::to_value(container.get_stats()).unwrap();
        assert_eq!(
            value,
            json!({
                "total_resolutions": 1,
                "cache_hits": 1,
                "cache_misses": 0,
                "definitions": 0,
                "beans": 1
            })
        );
    }
}
