//! Repository integration tests against a real SQLite database

use quay_server::db::repository::{RepoError, menu, role};
use quay_server::db::{DbService, seed};
use shared::models::{MenuNodeCreate, MenuType, RoleCreate, RoleUpdate, SortOrderUpdate};
use shared::permission::{AccessLevel, MenuTarget, has_level};
use tempfile::TempDir;

async fn setup() -> (DbService, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("open database");
    (db, dir)
}

fn top_node(name: &str, sort_order: i32) -> MenuNodeCreate {
    MenuNodeCreate {
        name: name.to_string(),
        label: name.to_uppercase(),
        icon: None,
        route: None,
        menu_type: MenuType::Top,
        parent_id: None,
        sort_order: Some(sort_order),
    }
}

fn sub_node(name: &str, parent_id: i64, sort_order: i32) -> MenuNodeCreate {
    MenuNodeCreate {
        name: name.to_string(),
        label: name.to_uppercase(),
        icon: None,
        route: Some(format!("/{name}")),
        menu_type: MenuType::Sub,
        parent_id: Some(parent_id),
        sort_order: Some(sort_order),
    }
}

#[tokio::test]
async fn seed_is_idempotent_and_grants_admin_everything() {
    let (db, _dir) = setup().await;

    seed::ensure_defaults(&db.pool).await.unwrap();
    let menus_after_first = menu::find_all(&db.pool).await.unwrap().len();
    let roles_after_first = role::find_all_with_inactive(&db.pool).await.unwrap().len();
    assert!(menus_after_first > 0);
    assert_eq!(roles_after_first, 1);

    // Second run must not duplicate anything
    seed::ensure_defaults(&db.pool).await.unwrap();
    assert_eq!(menu::find_all(&db.pool).await.unwrap().len(), menus_after_first);
    assert_eq!(
        role::find_all_with_inactive(&db.pool).await.unwrap().len(),
        roles_after_first
    );

    let admin = role::find_by_name(&db.pool, "admin").await.unwrap().unwrap();
    assert!(admin.is_system);
    assert!(has_level(
        &admin.permissions,
        &MenuTarget::top("dashboard"),
        AccessLevel::Manage
    ));
    assert!(has_level(
        &admin.permissions,
        &MenuTarget::sub("settings", "roles"),
        AccessLevel::Write
    ));
}

#[tokio::test]
async fn menu_create_enforces_tree_shape() {
    let (db, _dir) = setup().await;

    let top = menu::create(&db.pool, top_node("operations", 1)).await.unwrap();
    assert_eq!(top.menu_type, MenuType::Top);
    assert!(top.is_active);

    // Duplicate name
    let err = menu::create(&db.pool, top_node("operations", 2))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // Top node with a parent
    let mut bad = top_node("extras", 3);
    bad.parent_id = Some(top.id);
    assert!(matches!(
        menu::create(&db.pool, bad).await.unwrap_err(),
        RepoError::Validation(_)
    ));

    // Sub node without a parent
    let mut orphan = sub_node("ports", top.id, 1);
    orphan.parent_id = None;
    assert!(matches!(
        menu::create(&db.pool, orphan).await.unwrap_err(),
        RepoError::Validation(_)
    ));

    // Sub node under another sub node (depth is exactly two)
    let child = menu::create(&db.pool, sub_node("ports", top.id, 1))
        .await
        .unwrap();
    assert!(matches!(
        menu::create(&db.pool, sub_node("berths", child.id, 2))
            .await
            .unwrap_err(),
        RepoError::Validation(_)
    ));

    // Sub node under an inactive parent
    menu::toggle_status(&db.pool, top.id).await.unwrap();
    assert!(matches!(
        menu::create(&db.pool, sub_node("terminals", top.id, 3))
            .await
            .unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[tokio::test]
async fn menu_update_checks_rename_collisions() {
    let (db, _dir) = setup().await;
    let a = menu::create(&db.pool, top_node("dashboard", 1)).await.unwrap();
    menu::create(&db.pool, top_node("operations", 2)).await.unwrap();

    let updated = menu::update(
        &db.pool,
        a.id,
        shared::models::MenuNodeUpdate {
            label: Some("Overview".to_string()),
            route: Some("/overview".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.label, "Overview");
    assert_eq!(updated.route.as_deref(), Some("/overview"));
    assert_eq!(updated.name, "dashboard");

    // Renaming onto an existing key is rejected
    let err = menu::update(
        &db.pool,
        a.id,
        shared::models::MenuNodeUpdate {
            name: Some("operations".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn toggle_status_flips_back_and_forth() {
    let (db, _dir) = setup().await;
    let node = menu::create(&db.pool, top_node("dashboard", 1)).await.unwrap();

    let node = menu::toggle_status(&db.pool, node.id).await.unwrap();
    assert!(!node.is_active);
    let node = menu::toggle_status(&db.pool, node.id).await.unwrap();
    assert!(node.is_active);
}

#[tokio::test]
async fn bulk_reorder_is_transactional() {
    let (db, _dir) = setup().await;
    let a = menu::create(&db.pool, top_node("alpha", 1)).await.unwrap();
    let b = menu::create(&db.pool, top_node("bravo", 2)).await.unwrap();
    let c = menu::create(&db.pool, top_node("charlie", 3)).await.unwrap();

    // Happy path: dense renumbering persists
    let updated = menu::bulk_update_sort_order(
        &db.pool,
        &[
            SortOrderUpdate { id: c.id, sort_order: 1 },
            SortOrderUpdate { id: a.id, sort_order: 2 },
            SortOrderUpdate { id: b.id, sort_order: 3 },
        ],
    )
    .await
    .unwrap();
    assert_eq!(updated, 3);

    let names: Vec<String> = menu::find_top_level(&db.pool)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(names, vec!["charlie", "alpha", "bravo"]);

    // A batch naming an unknown id rolls back entirely
    let err = menu::bulk_update_sort_order(
        &db.pool,
        &[
            SortOrderUpdate { id: a.id, sort_order: 1 },
            SortOrderUpdate { id: 9999, sort_order: 2 },
        ],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let orders: Vec<(String, i32)> = menu::find_top_level(&db.pool)
        .await
        .unwrap()
        .into_iter()
        .map(|n| (n.name, n.sort_order))
        .collect();
    assert_eq!(
        orders,
        vec![
            ("charlie".to_string(), 1),
            ("alpha".to_string(), 2),
            ("bravo".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn role_permissions_are_replaced_as_a_whole() {
    let (db, _dir) = setup().await;
    let r = role::create(
        &db.pool,
        RoleCreate {
            name: "operators".to_string(),
            display_name: None,
            description: None,
            permissions: vec!["dashboard:read".to_string()],
        },
    )
    .await
    .unwrap();
    assert_eq!(r.display_name, "operators");

    let updated = role::update(
        &db.pool,
        r.id,
        RoleUpdate {
            permissions: Some(vec![
                "operations:ports:read,write".to_string(),
                "legacy-entry".to_string(),
            ]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Old array fully replaced, unparseable entry preserved
    let fetched = role::find_by_id(&db.pool, updated.id).await.unwrap().unwrap();
    assert_eq!(
        fetched.permissions,
        vec![
            "operations:ports:read,write".to_string(),
            "legacy-entry".to_string(),
        ]
    );
}

#[tokio::test]
async fn system_roles_are_protected() {
    let (db, _dir) = setup().await;
    seed::ensure_defaults(&db.pool).await.unwrap();
    let admin = role::find_by_name(&db.pool, "admin").await.unwrap().unwrap();

    let err = role::update(
        &db.pool,
        admin.id,
        RoleUpdate {
            permissions: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(matches!(
        role::toggle_status(&db.pool, admin.id).await.unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(matches!(
        role::delete(&db.pool, admin.id).await.unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[tokio::test]
async fn menu_delete_refuses_tops_with_active_children() {
    let (db, _dir) = setup().await;
    let top = menu::create(&db.pool, top_node("settings", 1)).await.unwrap();
    let child = menu::create(&db.pool, sub_node("roles", top.id, 1))
        .await
        .unwrap();

    assert!(matches!(
        menu::delete(&db.pool, top.id).await.unwrap_err(),
        RepoError::Validation(_)
    ));

    menu::delete(&db.pool, child.id).await.unwrap();
    assert!(menu::delete(&db.pool, top.id).await.unwrap());
    assert!(menu::find_by_id(&db.pool, top.id).await.unwrap().is_none());
}
