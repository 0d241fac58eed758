//! Role → Permission table
//!
//! 静态 RBAC 表：每个角色对应一组固定权限，进程内只构建一次，之后只读。
//!
//! ## 规则
//! - 表是扁平的：admin 也是逐项列出的，没有隐式超级权限
//! - 表中不存在的角色没有任何权限 (fail-closed)
//! - 无法识别的角色名同样没有任何权限
//!
//! | Role | Permissions |
//! |------|-------------|
//! | admin | 全部 12 项 |
//! | manager | 除 manage-users / manage-settings 外全部 |
//! | technician | view-orders, view-repairs, manage-repairs |
//! | sales | view-orders, manage-orders, view-repairs, view-content, manage-inventory |
//! | receptionist | view-orders, view-repairs, view-content |

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use shared::models::{Permission, Role, RoleDescription};

/// Ordered permission set (stable iteration for API output)
pub type PermissionSet = BTreeSet<Permission>;

static EMPTY: PermissionSet = BTreeSet::new();

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewOrders,
    Permission::ManageOrders,
    Permission::ViewRepairs,
    Permission::ManageRepairs,
    Permission::AssignRepairs,
    Permission::ViewUsers,
    Permission::ManageUsers,
    Permission::ViewContent,
    Permission::ManageContent,
    Permission::ViewReports,
    Permission::ManageSettings,
    Permission::ManageInventory,
];

const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ViewOrders,
    Permission::ManageOrders,
    Permission::ViewRepairs,
    Permission::ManageRepairs,
    Permission::AssignRepairs,
    Permission::ViewUsers,
    Permission::ViewContent,
    Permission::ManageContent,
    Permission::ViewReports,
    Permission::ManageInventory,
];

const TECHNICIAN_PERMISSIONS: &[Permission] = &[
    Permission::ViewOrders,
    Permission::ViewRepairs,
    Permission::ManageRepairs,
];

const SALES_PERMISSIONS: &[Permission] = &[
    Permission::ViewOrders,
    Permission::ManageOrders,
    Permission::ViewRepairs,
    Permission::ViewContent,
    Permission::ManageInventory,
];

const RECEPTIONIST_PERMISSIONS: &[Permission] = &[
    Permission::ViewOrders,
    Permission::ViewRepairs,
    Permission::ViewContent,
];

/// Immutable mapping from role to its permission set
///
/// Lookups for a role missing from the map return the empty set, so a
/// partial map never grants anything by accident.
#[derive(Debug, Clone, Default)]
pub struct RolePermissionMap {
    roles: HashMap<Role, PermissionSet>,
}

impl RolePermissionMap {
    /// Build a map from `(role, permissions)` pairs
    ///
    /// Repeated roles merge their permissions.
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let mut roles: HashMap<Role, PermissionSet> = HashMap::new();
        for (role, permissions) in entries {
            roles.entry(role).or_default().extend(permissions);
        }
        Self { roles }
    }

    /// The shop's built-in table
    pub fn builtin() -> Self {
        Self::from_entries([
            (Role::Admin, ADMIN_PERMISSIONS.iter().copied()),
            (Role::Manager, MANAGER_PERMISSIONS.iter().copied()),
            (Role::Technician, TECHNICIAN_PERMISSIONS.iter().copied()),
            (Role::Sales, SALES_PERMISSIONS.iter().copied()),
            (Role::Receptionist, RECEPTIONIST_PERMISSIONS.iter().copied()),
        ])
    }

    /// Permissions granted to `role` (empty when unmapped)
    pub fn permissions(&self, role: Role) -> &PermissionSet {
        self.roles.get(&role).unwrap_or(&EMPTY)
    }

    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.permissions(role).contains(&permission)
    }

    /// `true` if `role` holds at least one of `permissions`; an empty list is never satisfied
    pub fn has_any_permission(&self, role: Role, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(role, *p))
    }

    /// Whether `role` has an entry at all
    pub fn contains_role(&self, role: Role) -> bool {
        self.roles.contains_key(&role)
    }
}

static ROLE_PERMISSIONS: LazyLock<RolePermissionMap> = LazyLock::new(RolePermissionMap::builtin);

/// Process-wide table used by the route guards
pub fn role_permissions() -> &'static RolePermissionMap {
    &ROLE_PERMISSIONS
}

/// 检查角色是否拥有指定权限
pub fn has_permission(role: Role, permission: Permission) -> bool {
    ROLE_PERMISSIONS.has_permission(role, permission)
}

/// 获取角色的全部权限
pub fn permissions_for_role(role: Role) -> &'static PermissionSet {
    ROLE_PERMISSIONS.permissions(role)
}

/// 检查角色是否拥有任一指定权限
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    ROLE_PERMISSIONS.has_any_permission(role, permissions)
}

/// Resolve a stored or token-carried role name; unknown names get nothing
pub fn permissions_for_role_name(name: &str) -> &'static PermissionSet {
    match name.parse::<Role>() {
        Ok(role) => permissions_for_role(role),
        Err(_) => &EMPTY,
    }
}

/// Role panel data: every role with the permissions it grants
pub fn describe_roles() -> Vec<RoleDescription> {
    Role::all()
        .iter()
        .map(|role| RoleDescription {
            role: *role,
            display_name: role.display_name().to_string(),
            permissions: permissions_for_role(*role).iter().copied().collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technician_can_manage_repairs_but_not_users() {
        assert!(has_permission(Role::Technician, Permission::ManageRepairs));
        assert!(!has_permission(Role::Technician, Permission::ManageUsers));
    }

    #[test]
    fn test_receptionist_any_of() {
        assert!(has_any_permission(
            Role::Receptionist,
            &[
                Permission::ViewOrders,
                Permission::ViewRepairs,
                Permission::ViewUsers
            ]
        ));
        assert!(!has_permission(Role::Receptionist, Permission::ManageOrders));
    }

    #[test]
    fn test_every_role_is_mapped() {
        for role in Role::all() {
            assert!(role_permissions().contains_role(*role), "{role} unmapped");
            assert!(!permissions_for_role(*role).is_empty());
        }
    }

    #[test]
    fn test_sets_are_within_the_permission_universe() {
        let universe: PermissionSet = Permission::all().iter().copied().collect();
        for role in Role::all() {
            assert!(permissions_for_role(*role).is_subset(&universe));
        }
    }

    #[test]
    fn test_admin_holds_everything_explicitly() {
        let admin = permissions_for_role(Role::Admin);
        assert_eq!(admin.len(), Permission::all().len());
        for role in Role::all() {
            assert!(
                admin.is_superset(permissions_for_role(*role)),
                "admin is missing permissions of {role}"
            );
        }
    }

    #[test]
    fn test_only_admin_manages_users_and_settings() {
        for role in Role::all() {
            let expected = *role == Role::Admin;
            assert_eq!(has_permission(*role, Permission::ManageUsers), expected);
            assert_eq!(has_permission(*role, Permission::ManageSettings), expected);
        }
    }

    #[test]
    fn test_empty_any_list_is_false() {
        for role in Role::all() {
            assert!(!has_any_permission(*role, &[]));
        }
    }

    #[test]
    fn test_any_of_two_is_logical_or() {
        for role in Role::all() {
            for a in Permission::all() {
                for b in Permission::all() {
                    assert_eq!(
                        has_any_permission(*role, &[*a, *b]),
                        has_permission(*role, *a) || has_permission(*role, *b)
                    );
                }
            }
        }
    }

    #[test]
    fn test_lookups_are_deterministic() {
        for role in Role::all() {
            assert_eq!(permissions_for_role(*role), permissions_for_role(*role));
            for p in Permission::all() {
                assert_eq!(has_permission(*role, *p), has_permission(*role, *p));
            }
        }
    }

    #[test]
    fn test_unmapped_role_is_denied_everything() {
        let partial = RolePermissionMap::from_entries([(
            Role::Admin,
            vec![Permission::ViewOrders, Permission::ManageUsers],
        )]);

        assert!(!partial.contains_role(Role::Sales));
        assert!(partial.permissions(Role::Sales).is_empty());
        for p in Permission::all() {
            assert!(!partial.has_permission(Role::Sales, *p));
        }
        assert!(!partial.has_any_permission(Role::Sales, Permission::all()));
        assert!(partial.has_permission(Role::Admin, Permission::ManageUsers));
    }

    #[test]
    fn test_from_entries_merges_repeated_roles() {
        let map = RolePermissionMap::from_entries([
            (Role::Sales, vec![Permission::ViewOrders]),
            (Role::Sales, vec![Permission::ManageOrders]),
        ]);
        assert_eq!(map.permissions(Role::Sales).len(), 2);
    }

    #[test]
    fn test_unknown_role_name_is_denied() {
        assert!(permissions_for_role_name("owner").is_empty());
        assert!(permissions_for_role_name("").is_empty());
        assert_eq!(
            permissions_for_role_name("technician"),
            permissions_for_role(Role::Technician)
        );
    }

    #[test]
    fn test_describe_roles_covers_every_role() {
        let described = describe_roles();
        assert_eq!(described.len(), Role::all().len());
        let sales = described
            .iter()
            .find(|d| d.role == Role::Sales)
            .expect("sales described");
        assert!(sales.permissions.contains(&Permission::ManageInventory));
        assert!(!sales.permissions.contains(&Permission::ViewUsers));
    }
}
