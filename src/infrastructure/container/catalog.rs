//! 类型目录
//!
//! 以显式登记的描述符代替运行时反射，回答"类型是否存在"、
//! "祖先链"、"实现了哪些接口"以及子类型判断。

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::bean::Bean;
use super::descriptor::TypeDescriptor;
use super::registry::Identifier;

#[derive(Default)]
pub struct TypeCatalog {
    types: RwLock<HashMap<Identifier, Arc<TypeDescriptor>>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记描述符，同名覆盖
    pub fn declare(&self, descriptor: TypeDescriptor) {
        let name = descriptor.name().to_string();
        self.types.write().insert(name, Arc::new(descriptor));
    }

    pub fn descriptor(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.read().get(name).cloned()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.descriptor(name)
            .map(|descriptor| descriptor.is_class())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// 从类型自身开始沿父类型向上
    ///
    /// 未登记的父类型会被包含并终止遍历；重复出现的名称同样终止遍历。
    pub fn ancestors(&self, name: &str) -> Vec<Identifier> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(name.to_string());

        while let Some(type_name) = current.take() {
            if !seen.insert(type_name.clone()) {
                break;
            }
            current = self
                .descriptor(&type_name)
                .and_then(|descriptor| descriptor.parent().map(str::to_string));
            chain.push(type_name);
        }

        chain
    }

    /// 类型及其祖先实现的全部接口，含接口继承的接口，按发现顺序去重
    pub fn interfaces(&self, name: &str) -> Vec<Identifier> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        let mut pending: Vec<Identifier> = Vec::new();

        for ancestor in self.ancestors(name) {
            if let Some(descriptor) = self.descriptor(&ancestor) {
                pending.extend(descriptor.interfaces().iter().cloned());
            }
        }

        let mut index = 0;
        while index < pending.len() {
            let interface = pending[index].clone();
            index += 1;

            if interface == name || !seen.insert(interface.clone()) {
                continue;
            }
            if let Some(descriptor) = self.descriptor(&interface) {
                pending.extend(descriptor.interfaces().iter().cloned());
            }
            found.push(interface);
        }

        found
    }

    /// `parent` 是 `child` 的严格祖先或 `child` 实现的接口
    pub fn is_subtype(&self, child: &str, parent: &str) -> bool {
        if child == parent {
            return false;
        }
        self.ancestors(child).iter().any(|ancestor| ancestor == parent)
            || self.interfaces(child).iter().any(|interface| interface == parent)
    }

    /// Bean 是否为 `id` 所指类型（或其子类型）的实例
    pub fn is_instance(&self, bean: &Bean, id: &str) -> bool {
        match bean.as_instance() {
            Some(instance) => instance.type_name() == id || self.is_subtype(instance.type_name(), id),
            None => false,
        }
    }
}
