//! First-run seed data
//!
//! 首次启动时写入默认导航菜单和内置 admin 角色。表非空时跳过，
//! 重复调用是幂等的。

use shared::models::MenuType;
use shared::permission::{LevelSet, format_grant};
use shared::MenuTree;
use sqlx::SqlitePool;

use super::repository::{RepoResult, menu};

struct TopSeed {
    name: &'static str,
    label: &'static str,
    icon: &'static str,
    route: Option<&'static str>,
    children: &'static [SubSeed],
}

struct SubSeed {
    name: &'static str,
    label: &'static str,
    route: &'static str,
}

/// Default navigation tree for a fresh console
const DEFAULT_MENUS: &[TopSeed] = &[
    TopSeed {
        name: "dashboard",
        label: "Dashboard",
        icon: "dashboard",
        route: Some("/dashboard"),
        children: &[],
    },
    TopSeed {
        name: "operations",
        label: "Operations",
        icon: "anchor",
        route: None,
        children: &[
            SubSeed {
                name: "ports",
                label: "Ports",
                route: "/operations/ports",
            },
            SubSeed {
                name: "terminals",
                label: "Terminals",
                route: "/operations/terminals",
            },
            SubSeed {
                name: "berths",
                label: "Berths",
                route: "/operations/berths",
            },
        ],
    },
    TopSeed {
        name: "partners",
        label: "Partners",
        icon: "customers",
        route: None,
        children: &[
            SubSeed {
                name: "customers",
                label: "Customers",
                route: "/partners/customers",
            },
            SubSeed {
                name: "contracts",
                label: "Contracts",
                route: "/partners/contracts",
            },
        ],
    },
    TopSeed {
        name: "settings",
        label: "Settings",
        icon: "settings",
        route: None,
        children: &[
            SubSeed {
                name: "menus",
                label: "Menu Builder",
                route: "/settings/menus",
            },
            SubSeed {
                name: "roles",
                label: "Roles & Permissions",
                route: "/settings/roles",
            },
            SubSeed {
                name: "backup",
                label: "Database Backup",
                route: "/settings/backup",
            },
        ],
    },
];

/// Seed default menus and the built-in admin role on first run
pub async fn ensure_defaults(pool: &SqlitePool) -> RepoResult<()> {
    seed_menus(pool).await?;
    seed_admin_role(pool).await?;
    Ok(())
}

async fn seed_menus(pool: &SqlitePool) -> RepoResult<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_node")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    for (i, top) in DEFAULT_MENUS.iter().enumerate() {
        let parent = menu::create(
            pool,
            shared::models::MenuNodeCreate {
                name: top.name.to_string(),
                label: top.label.to_string(),
                icon: Some(top.icon.to_string()),
                route: top.route.map(str::to_string),
                menu_type: MenuType::Top,
                parent_id: None,
                sort_order: Some(i as i32 + 1),
            },
        )
        .await?;

        for (j, child) in top.children.iter().enumerate() {
            menu::create(
                pool,
                shared::models::MenuNodeCreate {
                    name: child.name.to_string(),
                    label: child.label.to_string(),
                    icon: None,
                    route: Some(child.route.to_string()),
                    menu_type: MenuType::Sub,
                    parent_id: Some(parent.id),
                    sort_order: Some(j as i32 + 1),
                },
            )
            .await?;
        }
    }

    tracing::info!(menus = DEFAULT_MENUS.len(), "Seeded default navigation menus");
    Ok(())
}

async fn seed_admin_role(pool: &SqlitePool) -> RepoResult<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM role")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    // Grant every level on every current menu target
    let nodes = menu::find_all(pool).await?;
    let tree = MenuTree::build(&nodes);
    let permissions: Vec<String> = tree
        .targets()
        .iter()
        .map(|target| format_grant(target, LevelSet::all()))
        .collect();
    let permissions_json =
        serde_json::to_string(&permissions).unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        "INSERT INTO role (name, display_name, description, permissions, is_system) \
         VALUES ('admin', 'Administrator', 'Built-in administrator role', ?, 1)",
    )
    .bind(&permissions_json)
    .execute(pool)
    .await?;

    tracing::info!(grants = permissions.len(), "Seeded built-in admin role");
    Ok(())
}
