//! 实体类型判定

use crate::descriptor::{TypeDescriptor, TypeKind};

/// 是否实体类型
///
/// 抽象类型、泛型类型以及没有基类的类型都不是实体。其余类型沿祖先链
/// 逐级查找，存在一个单参数泛型基类且参数就是自身时才是实体。
pub fn is_entity(candidate: &TypeDescriptor) -> bool {
    if candidate.kind != TypeKind::Concrete || candidate.bases.is_empty() {
        return false;
    }

    candidate
        .bases
        .iter()
        .any(|base| matches!(base.type_args.as_slice(), [arg] if *arg == candidate.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{BaseType, TypeKey};

    struct Role;
    struct AdminRole;
    struct Pair;

    fn descriptor<T: 'static>(kind: TypeKind, bases: Vec<BaseType>) -> TypeDescriptor {
        TypeDescriptor {
            key: TypeKey::of::<T>(),
            full_name: std::any::type_name::<T>(),
            kind,
            bases,
            constructor: None,
        }
    }

    #[test]
    fn test_direct_self_referential_base() {
        let role = descriptor::<Role>(TypeKind::Concrete, vec![BaseType::entity_of::<Role>()]);
        assert!(is_entity(&role));
    }

    #[test]
    fn test_through_abstract_layers() {
        let role = descriptor::<Role>(
            TypeKind::Concrete,
            vec![
                BaseType::plain("CommonEntityBase"),
                BaseType::plain("AuditedEntity"),
                BaseType::entity_of::<Role>(),
            ],
        );
        assert!(is_entity(&role));
    }

    #[test]
    fn test_subclass_of_entity_is_not_entity() {
        let admin = descriptor::<AdminRole>(
            TypeKind::Concrete,
            vec![BaseType::plain("Role"), BaseType::entity_of::<Role>()],
        );
        assert!(!is_entity(&admin));
    }

    #[test]
    fn test_abstract_and_generic_rejected() {
        let bases = vec![BaseType::entity_of::<Role>()];
        assert!(!is_entity(&descriptor::<Role>(TypeKind::Abstract, bases.clone())));
        assert!(!is_entity(&descriptor::<Role>(TypeKind::Generic, bases)));
    }

    #[test]
    fn test_no_base_rejected() {
        assert!(!is_entity(&descriptor::<Role>(TypeKind::Concrete, Vec::new())));
    }

    #[test]
    fn test_multi_parameter_base_rejected() {
        let pair = descriptor::<Pair>(
            TypeKind::Concrete,
            vec![BaseType::generic(
                "Link",
                vec![TypeKey::of::<Pair>(), TypeKey::of::<Role>()],
            )],
        );
        assert!(!is_entity(&pair));
    }
}
