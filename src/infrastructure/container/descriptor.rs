//! 类型描述符
//!
//! Rust 没有运行时反射，每个可注入类型在登记时显式提供：
//! - 父类型与实现的接口（用于自动索引和子类型校验）
//! - 按声明顺序排列的构造参数（名称、声明类型、是否可选）
//! - 由已解析参数构建实例的构造函数

use serde::de::DeserializeOwned;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::bean::Bean;
use super::registry::Identifier;
use crate::errors::{ContainerError, Result};

/// 构造函数：由已解析参数构建实例
pub type ConstructFn =
    Arc<dyn Fn(&Arguments) -> Result<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// 类型类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// 可实例化的类
    Class,
    /// 接口，只作为标识符参与索引和校验
    Interface,
}

/// 构造参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Identifier,
    pub declared_type: Option<Identifier>,
    pub optional: bool,
}

impl Parameter {
    pub fn required(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<Identifier>) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }

    pub fn typed(mut self, declared_type: impl Into<Identifier>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    name: Identifier,
    kind: TypeKind,
    parent: Option<Identifier>,
    interfaces: Vec<Identifier>,
    parameters: Vec<Parameter>,
    constructor: Option<ConstructFn>,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            parent: None,
            interfaces: Vec::new(),
            parameters: Vec::new(),
            constructor: None,
        }
    }

    pub fn interface(name: impl Into<Identifier>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(name)
        }
    }

    pub fn extends(mut self, parent: impl Into<Identifier>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// 类：实现的接口；接口：继承的接口
    pub fn implements(mut self, interface: impl Into<Identifier>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn required(self, name: impl Into<Identifier>) -> Self {
        self.param(Parameter::required(name))
    }

    pub fn required_typed(
        self,
        name: impl Into<Identifier>,
        declared_type: impl Into<Identifier>,
    ) -> Self {
        self.param(Parameter::required(name).typed(declared_type))
    }

    pub fn optional(self, name: impl Into<Identifier>) -> Self {
        self.param(Parameter::optional(name))
    }

    pub fn constructor<T, F>(mut self, build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(move |args: &Arguments| {
            let value = build(args)?;
            Ok(Arc::new(value) as Arc<dyn Any + Send + Sync>)
        }));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn interfaces(&self) -> &[Identifier] {
        &self.interfaces
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub(crate) fn construct_fn(&self) -> Option<ConstructFn> {
        self.constructor.clone()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("interfaces", &self.interfaces)
            .field("parameters", &self.parameters)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

/// 可注入类型
///
/// 实现者提供自身的描述符，配合 `Container::declare::<T>()` 使用。
pub trait Injectable: Any + Send + Sync + Sized {
    const TYPE_NAME: &'static str;

    fn descriptor() -> TypeDescriptor;
}

/// 传给构造函数的已解析参数，按声明顺序排列
#[derive(Debug)]
pub struct Arguments {
    class: Identifier,
    values: Vec<(Identifier, Bean)>,
}

impl Arguments {
    pub(crate) fn new(class: impl Into<Identifier>) -> Self {
        Self {
            class: class.into(),
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: impl Into<Identifier>, bean: Bean) {
        self.values.push((name.into(), bean));
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按位置取参数
    pub fn get(&self, index: usize) -> Option<&Bean> {
        self.values.get(index).map(|(_, bean)| bean)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(param, _)| param == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn bean(&self, name: &str) -> Result<&Bean> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, bean)| bean)
            .ok_or_else(|| ContainerError::MissingArgument {
                class: self.class.clone(),
                parameter: name.to_string(),
            })
    }

    pub fn object<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let bean = self.bean(name)?;
        bean.downcast::<T>()
            .ok_or_else(|| ContainerError::TypeMismatch {
                id: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: bean.type_name().to_string(),
            })
    }

    pub fn value<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let bean = self.bean(name)?;
        bean.deserialize::<T>()
            .ok_or_else(|| ContainerError::TypeMismatch {
                id: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: bean.type_name().to_string(),
            })
    }
}
