//! 类型描述符

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::entity::{Entity, EntityObject};

/// 命名空间分隔符
pub const NAMESPACE_SEPARATOR: &str = "::";

/// 泛型实体基类名称
pub const ENTITY_BASE: &str = "Entity";

/// 类型标识
///
/// 以 `TypeId` 判等，名称仅用于展示。
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Concrete,
    Abstract,
    Generic,
}

/// 基类描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseType {
    pub name: &'static str,
    pub type_args: Vec<TypeKey>,
}

impl BaseType {
    /// 非泛型基类
    pub fn plain(name: &'static str) -> Self {
        Self {
            name,
            type_args: Vec::new(),
        }
    }

    /// 泛型基类实例
    pub fn generic(name: &'static str, type_args: Vec<TypeKey>) -> Self {
        Self { name, type_args }
    }

    /// `Entity<T>`
    pub fn entity_of<T: ?Sized + 'static>() -> Self {
        Self::generic(ENTITY_BASE, vec![TypeKey::of::<T>()])
    }

    pub fn is_generic(&self) -> bool {
        !self.type_args.is_empty()
    }
}

/// 构造一个默认实例
pub type Constructor = fn() -> Box<dyn EntityObject>;

/// 类型描述符：名称、种类、祖先链以及构造函数
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub key: TypeKey,
    /// 全限定名，如 `strata_auth_core::role_menu::RoleMenu`
    pub full_name: &'static str,
    pub kind: TypeKind,
    /// 祖先链，近者在前
    pub bases: Vec<BaseType>,
    pub constructor: Option<Constructor>,
}

impl TypeDescriptor {
    /// 根据实体 trait 的声明生成描述符
    ///
    /// 祖先链为 `LAYERS...` 之后接 `Entity<T::Base>`。
    pub fn of<T: Entity>() -> Self {
        let mut bases: Vec<BaseType> = T::LAYERS.iter().copied().map(BaseType::plain).collect();
        bases.push(BaseType::entity_of::<T::Base>());

        Self {
            key: TypeKey::of::<T>(),
            full_name: std::any::type_name::<T>(),
            kind: TypeKind::Concrete,
            bases,
            constructor: Some(construct::<T>),
        }
    }

    /// 短名称，即全限定名最后一段
    pub fn name(&self) -> &'static str {
        short_name(self.full_name)
    }

    /// 创建一个默认实例
    pub fn instantiate(&self) -> Option<Box<dyn EntityObject>> {
        self.constructor.map(|construct| construct())
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeDescriptor {}

fn construct<T: Entity>() -> Box<dyn EntityObject> {
    Box::new(T::default())
}

/// 取全限定名最后一段
pub fn short_name(full_name: &str) -> &str {
    full_name
        .rsplit(NAMESPACE_SEPARATOR)
        .next()
        .unwrap_or(full_name)
}
