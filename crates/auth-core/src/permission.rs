//! 操作权限
//!
//! 权限以整数持久化，各标志位的取值固定，不得重新编号。

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// 操作权限标志
    ///
    /// `ALL` 是独立的通配位：置位后任何检查都通过，但 `INSERT | UPDATE | DELETE`
    /// 并不隐含 `ALL`。`0x10` 保留给将来的内置权限，自定义权限从 `0x20` 开始。
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PermissionFlags: i32 {
        /// 所有权限
        const ALL     = 1;
        /// 添加权限
        const INSERT  = 2;
        /// 修改权限
        const UPDATE  = 4;
        /// 删除权限
        const DELETE  = 8;
        const CUSTOM1 = 0x20;
        const CUSTOM2 = 0x40;
        const CUSTOM3 = 0x80;
        const CUSTOM4 = 0x100;
        const CUSTOM5 = 0x200;
        const CUSTOM6 = 0x400;
        const CUSTOM7 = 0x800;
        const CUSTOM8 = 0x1000;
    }
}

/// (标志, 名称, 描述)
const NAMED: [(PermissionFlags, &str, &str); 12] = [
    (PermissionFlags::ALL, "All", "所有"),
    (PermissionFlags::INSERT, "Insert", "添加"),
    (PermissionFlags::UPDATE, "Update", "修改"),
    (PermissionFlags::DELETE, "Delete", "删除"),
    (PermissionFlags::CUSTOM1, "Custom1", "自定义1"),
    (PermissionFlags::CUSTOM2, "Custom2", "自定义2"),
    (PermissionFlags::CUSTOM3, "Custom3", "自定义3"),
    (PermissionFlags::CUSTOM4, "Custom4", "自定义4"),
    (PermissionFlags::CUSTOM5, "Custom5", "自定义5"),
    (PermissionFlags::CUSTOM6, "Custom6", "自定义6"),
    (PermissionFlags::CUSTOM7, "Custom7", "自定义7"),
    (PermissionFlags::CUSTOM8, "Custom8", "自定义8"),
];

impl PermissionFlags {
    /// 无权限
    pub const NONE: Self = Self::empty();

    /// 从持久化的整数还原，保留未知位
    pub const fn from_value(value: i32) -> Self {
        Self::from_bits_retain(value)
    }

    /// 持久化用的整数值
    pub const fn value(self) -> i32 {
        self.bits()
    }

    /// 检查是否拥有 `flag`
    ///
    /// 无权限时总是失败，拥有 `ALL` 时总是通过，否则要求 `flag` 的每一位都存在。
    pub fn check(self, flag: Self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.contains(Self::ALL) {
            return true;
        }
        self.contains(flag)
    }

    /// 添加权限
    #[must_use]
    pub fn grant(self, flag: Self) -> Self {
        self | flag
    }

    /// 删除权限
    ///
    /// 只有 `flag` 的每一位都存在时才清除，否则保持不变。
    #[must_use]
    pub fn revoke(self, flag: Self) -> Self {
        if self.contains(flag) {
            self.difference(flag)
        } else {
            self
        }
    }

    /// 各已命名标志位的描述
    pub fn descriptions(self) -> Vec<&'static str> {
        if self.is_empty() {
            return vec!["无"];
        }
        NAMED
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, _, description)| *description)
            .collect()
    }
}

impl fmt::Display for PermissionFlags {
    /// `None`、`All`、`Insert, Update`；未命名的位以数值附在末尾
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }

        let mut parts: Vec<String> = NAMED
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, name, _)| name.to_string())
            .collect();

        let unknown = self.bits() & !Self::all().bits();
        if unknown != 0 {
            parts.push(unknown.to_string());
        }

        f.write_str(&parts.join(", "))
    }
}

impl From<PermissionFlags> for i32 {
    fn from(flags: PermissionFlags) -> Self {
        flags.bits()
    }
}

impl From<i32> for PermissionFlags {
    fn from(value: i32) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values_are_fixed() {
        assert_eq!(PermissionFlags::NONE.value(), 0);
        assert_eq!(PermissionFlags::ALL.value(), 1);
        assert_eq!(PermissionFlags::INSERT.value(), 2);
        assert_eq!(PermissionFlags::UPDATE.value(), 4);
        assert_eq!(PermissionFlags::DELETE.value(), 8);
        assert_eq!(PermissionFlags::CUSTOM1.value(), 0x20);
        assert_eq!(PermissionFlags::CUSTOM2.value(), 0x40);
        assert_eq!(PermissionFlags::CUSTOM8.value(), 0x1000);
    }

    #[test]
    fn test_check() {
        let insert = PermissionFlags::NONE.grant(PermissionFlags::INSERT);
        assert!(insert.check(PermissionFlags::INSERT));
        assert!(!insert.check(PermissionFlags::DELETE));
        assert!(!insert.check(PermissionFlags::INSERT | PermissionFlags::UPDATE));

        let all = PermissionFlags::NONE.grant(PermissionFlags::ALL);
        assert!(all.check(PermissionFlags::DELETE));
        assert!(all.check(PermissionFlags::CUSTOM8));

        assert!(!PermissionFlags::NONE.check(PermissionFlags::NONE));
        assert!(!PermissionFlags::NONE.check(PermissionFlags::INSERT));
    }

    #[test]
    fn test_all_is_not_implied() {
        let crud = PermissionFlags::INSERT | PermissionFlags::UPDATE | PermissionFlags::DELETE;
        assert!(!crud.contains(PermissionFlags::ALL));
        assert!(!crud.check(PermissionFlags::CUSTOM1));
    }

    #[test]
    fn test_revoke_requires_full_subset() {
        let insert = PermissionFlags::INSERT;
        assert_eq!(
            insert.revoke(PermissionFlags::INSERT | PermissionFlags::UPDATE),
            PermissionFlags::INSERT
        );

        let both = PermissionFlags::INSERT | PermissionFlags::UPDATE;
        assert_eq!(both.revoke(PermissionFlags::UPDATE), PermissionFlags::INSERT);
        assert_eq!(both.revoke(both), PermissionFlags::NONE);

        let with_reserved = PermissionFlags::from_value(0x10 | 2);
        assert_eq!(with_reserved.revoke(PermissionFlags::INSERT).value(), 0x10);
    }

    #[test]
    fn test_display() {
        assert_eq!(PermissionFlags::NONE.to_string(), "None");
        assert_eq!(PermissionFlags::ALL.to_string(), "All");
        assert_eq!(
            (PermissionFlags::INSERT | PermissionFlags::UPDATE).to_string(),
            "Insert, Update"
        );
        assert_eq!(PermissionFlags::from_value(0x10 | 2).to_string(), "Insert, 16");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(PermissionFlags::NONE.descriptions(), vec!["无"]);
        assert_eq!(
            (PermissionFlags::ALL | PermissionFlags::CUSTOM1).descriptions(),
            vec!["所有", "自定义1"]
        );
    }

    #[test]
    fn test_integer_round_trip_keeps_unknown_bits() {
        let flags = PermissionFlags::from(0x10 | 0x20);
        assert_eq!(i32::from(flags), 0x30);
    }
}
