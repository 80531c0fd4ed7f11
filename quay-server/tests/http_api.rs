//! End-to-end API tests: real server on a loopback port, driven through
//! the console client crate (including its editor and reorder state
//! machines).

use quay_client::{ClientError, EditorState, NetworkClient, PermissionEditor, ReorderBoard};
use quay_server::{Config, ServerState, api};
use shared::models::{MenuNodeCreate, MenuType, RoleCreate};
use shared::permission::{AccessLevel, MenuTarget};
use tempfile::TempDir;

async fn spawn_server() -> (NetworkClient, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).await.expect("state");
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (NetworkClient::new(&format!("http://{addr}")), dir)
}

#[tokio::test]
async fn seeded_menus_and_tree_are_served() {
    let (client, _dir) = spawn_server().await;

    let menus = client.list_menus().await.unwrap();
    assert!(!menus.is_empty());

    let tree = client.menu_tree().await.unwrap();
    let root_names: Vec<&str> = tree.roots().iter().map(|r| r.node.name.as_str()).collect();
    assert_eq!(
        root_names,
        vec!["dashboard", "operations", "partners", "settings"]
    );

    let settings = &tree.roots()[3];
    let child_names: Vec<&str> = settings.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(child_names, vec!["menus", "roles", "backup"]);
}

#[tokio::test]
async fn menu_validation_errors_surface_with_codes() {
    let (client, _dir) = spawn_server().await;

    let bad = MenuNodeCreate {
        name: "Berth Planning".to_string(), // uppercase + whitespace
        label: "Berth Planning".to_string(),
        icon: None,
        route: None,
        menu_type: MenuType::Top,
        parent_id: None,
        sort_order: None,
    };
    match client.create_menu(&bad).await.unwrap_err() {
        ClientError::Api { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "E0002");
        }
        other => panic!("expected API error, got {other:?}"),
    }

    match client.get_role(424242).await.unwrap_err() {
        ClientError::Api { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code, "E0003");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_toggle_and_list_top_menus() {
    let (client, _dir) = spawn_server().await;

    let created = client
        .create_menu(&MenuNodeCreate {
            name: "vessels".to_string(),
            label: "Vessels".to_string(),
            icon: Some("ship".to_string()),
            route: None,
            menu_type: MenuType::Top,
            parent_id: None,
            sort_order: Some(99),
        })
        .await
        .unwrap();
    assert_eq!(created.menu_type, MenuType::Top);

    let tops = client.list_top_menus().await.unwrap();
    assert!(tops.iter().any(|n| n.name == "vessels"));

    let updated = client
        .update_menu(
            created.id,
            &shared::models::MenuNodeUpdate {
                label: Some("Vessel Calls".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "Vessel Calls");

    // Deactivated nodes drop out of the top-level (parent-candidate) list
    let toggled = client.toggle_menu_status(created.id).await.unwrap();
    assert!(!toggled.is_active);
    let tops = client.list_top_menus().await.unwrap();
    assert!(!tops.iter().any(|n| n.name == "vessels"));

    // ...and their children are orphaned out of the tree, not errors
    let tree = client.menu_tree().await.unwrap();
    assert!(!tree.roots().iter().any(|r| r.node.name == "vessels"));
}

#[tokio::test]
async fn drag_reorder_commits_dense_orders() {
    let (client, _dir) = spawn_server().await;

    let tops = client.list_top_menus().await.unwrap();
    assert_eq!(tops.len(), 4);
    let mut board = ReorderBoard::load(tops);

    // Drag "settings" (index 3) to the front
    board.apply_move(3, 0).unwrap();
    assert!(board.has_unsaved_changes());

    let resp = client.commit_reorder(&mut board).await.unwrap();
    assert_eq!(resp.updated, 4);
    assert!(!board.has_unsaved_changes());

    let tops = client.list_top_menus().await.unwrap();
    let names: Vec<&str> = tops.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["settings", "dashboard", "operations", "partners"]);
    let orders: Vec<i32> = tops.iter().map(|n| n.sort_order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn role_crud_over_http() {
    let (client, _dir) = spawn_server().await;

    let role = client
        .create_role(&RoleCreate {
            name: "gate-clerks".to_string(),
            display_name: None,
            description: None,
            permissions: vec!["partners:customers:read".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(role.display_name, "gate-clerks");

    let updated = client
        .update_role(
            role.id,
            &shared::models::RoleUpdate {
                display_name: Some("Gate Clerks".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.display_name, "Gate Clerks");
    assert_eq!(updated.permissions, role.permissions);

    // Seeded admin + the new role
    let roles = client.list_roles(true).await.unwrap();
    assert_eq!(roles.len(), 2);
}

#[tokio::test]
async fn permission_editor_roundtrip_against_live_server() {
    let (client, _dir) = spawn_server().await;

    let role = client
        .create_role(&RoleCreate {
            name: "berth-planners".to_string(),
            display_name: Some("Berth Planners".to_string()),
            description: None,
            permissions: vec![],
        })
        .await
        .unwrap();

    let tree = client.menu_tree().await.unwrap();
    let mut editor = PermissionEditor::new();
    editor.select_role(role.clone(), tree).unwrap();

    editor
        .toggle(&MenuTarget::top("dashboard"), AccessLevel::Read, true)
        .unwrap();
    editor
        .toggle(
            &MenuTarget::sub("operations", "berths"),
            AccessLevel::Write,
            true,
        )
        .unwrap();
    assert_eq!(editor.state(), EditorState::Dirty);

    let saved = client.save_editor(&mut editor).await.unwrap();
    assert_eq!(editor.state(), EditorState::RoleLoaded);
    assert!(saved.permissions.contains(&"dashboard:read".to_string()));
    assert!(
        saved
            .permissions
            .contains(&"operations:berths:write".to_string())
    );

    // The persisted array is the new baseline: whole-array replace stuck
    let fetched = client.get_role(role.id).await.unwrap();
    let mut expected = saved.permissions.clone();
    let mut actual = fetched.permissions.clone();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn editor_save_failure_keeps_pending_state() {
    let (client, _dir) = spawn_server().await;

    let role = client
        .create_role(&RoleCreate {
            name: "doomed".to_string(),
            display_name: None,
            description: None,
            permissions: vec![],
        })
        .await
        .unwrap();

    let tree = client.menu_tree().await.unwrap();
    let mut editor = PermissionEditor::new();
    let mut phantom = role.clone();
    phantom.id = 424242; // save will 404
    editor.select_role(phantom, tree).unwrap();
    editor
        .toggle(&MenuTarget::top("dashboard"), AccessLevel::Read, true)
        .unwrap();

    let err = client.save_editor(&mut editor).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));

    // Dirty retained with the same pending array for retry
    assert_eq!(editor.state(), EditorState::Dirty);
    assert_eq!(editor.pending(), &["dashboard:read".to_string()]);
}
