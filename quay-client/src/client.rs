//! 统一客户端实现
//!
//! HTTP 网络客户端，封装控制台后端的 REST 接口。成功响应是裸 JSON，
//! 错误响应是 `{ "code": "...", "message": "..." }` 结构。

use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::MenuTree;
use shared::models::{
    BatchUpdateResponse, BulkOrderUpdate, MenuNode, MenuNodeCreate, MenuNodeUpdate, Role,
    RoleCreate, RoleUpdate, SortOrderUpdate,
};

use crate::editor::PermissionEditor;
use crate::error::{ClientError, ClientResult};
use crate::reorder::ReorderBoard;

/// Server error response body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// 网络客户端 (HTTP)
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
    base_url: String,
}

impl NetworkClient {
    /// 创建新的网络客户端
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let (code, message) = match resp.json::<ErrorBody>().await {
            Ok(body) => (body.code, body.message),
            Err(_) => ("unknown".to_string(), format!("HTTP {status}")),
        };
        tracing::debug!(status = %status, code = %code, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    // ========== Menus ==========

    /// GET /api/menus - 全量菜单节点 (所有类型与状态)
    pub async fn list_menus(&self) -> ClientResult<Vec<MenuNode>> {
        let resp = self.client.get(self.url("/api/menus")).send().await?;
        Self::handle(resp).await
    }

    /// GET /api/menus?type=top - 活跃顶级节点 (父节点候选)
    pub async fn list_top_menus(&self) -> ClientResult<Vec<MenuNode>> {
        let resp = self
            .client
            .get(self.url("/api/menus"))
            .query(&[("type", "top")])
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// GET /api/menus/tree - 两级导航树
    pub async fn menu_tree(&self) -> ClientResult<MenuTree> {
        let resp = self.client.get(self.url("/api/menus/tree")).send().await?;
        Self::handle(resp).await
    }

    /// POST /api/menus
    pub async fn create_menu(&self, payload: &MenuNodeCreate) -> ClientResult<MenuNode> {
        let resp = self
            .client
            .post(self.url("/api/menus"))
            .json(payload)
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// PUT /api/menus/{id}
    pub async fn update_menu(&self, id: i64, payload: &MenuNodeUpdate) -> ClientResult<MenuNode> {
        let resp = self
            .client
            .put(self.url(&format!("/api/menus/{id}")))
            .json(payload)
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// PATCH /api/menus/{id}/toggle-status
    pub async fn toggle_menu_status(&self, id: i64) -> ClientResult<MenuNode> {
        let resp = self
            .client
            .patch(self.url(&format!("/api/menus/{id}/toggle-status")))
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// PATCH /api/menus/bulk-update-order - 整批排序提交
    pub async fn bulk_update_order(
        &self,
        updates: &[SortOrderUpdate],
    ) -> ClientResult<BatchUpdateResponse> {
        let resp = self
            .client
            .patch(self.url("/api/menus/bulk-update-order"))
            .json(&BulkOrderUpdate {
                updates: updates.to_vec(),
            })
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// Commit a reorder board: send the full batch, promote the board's
    /// baseline on success. On failure the working sequence is retained
    /// so the user may retry or discard.
    pub async fn commit_reorder(
        &self,
        board: &mut ReorderBoard,
    ) -> ClientResult<BatchUpdateResponse> {
        let updates = board.compute_updates();
        let resp = self.bulk_update_order(&updates).await?;
        board.commit_succeeded();
        Ok(resp)
    }

    // ========== Roles ==========

    /// GET /api/roles - 角色列表 (`all` 含停用角色)
    pub async fn list_roles(&self, all: bool) -> ClientResult<Vec<Role>> {
        let mut req = self.client.get(self.url("/api/roles"));
        if all {
            req = req.query(&[("all", "true")]);
        }
        let resp = req.send().await?;
        Self::handle(resp).await
    }

    /// GET /api/roles/{id}
    pub async fn get_role(&self, id: i64) -> ClientResult<Role> {
        let resp = self
            .client
            .get(self.url(&format!("/api/roles/{id}")))
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// POST /api/roles
    pub async fn create_role(&self, payload: &RoleCreate) -> ClientResult<Role> {
        let resp = self
            .client
            .post(self.url("/api/roles"))
            .json(payload)
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// PUT /api/roles/{id}
    pub async fn update_role(&self, id: i64, payload: &RoleUpdate) -> ClientResult<Role> {
        let resp = self
            .client
            .put(self.url(&format!("/api/roles/{id}")))
            .json(payload)
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// PUT /api/roles/{id}/permissions - 整组替换权限数组
    pub async fn save_role_permissions(
        &self,
        id: i64,
        permissions: &[String],
    ) -> ClientResult<Role> {
        let resp = self
            .client
            .put(self.url(&format!("/api/roles/{id}/permissions")))
            .json(&permissions)
            .send()
            .await?;
        Self::handle(resp).await
    }

    /// Drive a permission editor through its save transition: the pending
    /// array is PUT as a whole; success promotes it to the baseline,
    /// failure leaves the editor `Dirty` with the same pending array.
    pub async fn save_editor(&self, editor: &mut PermissionEditor) -> ClientResult<Role> {
        let role_id = editor.role().ok_or(ClientError::Editor(
            crate::editor::EditorError::NoRoleSelected,
        ))?;
        let role_id = role_id.id;
        let payload = editor.begin_save()?;

        match self.save_role_permissions(role_id, &payload).await {
            Ok(role) => {
                editor
                    .save_succeeded()
                    .expect("editor must be in Saving state");
                Ok(role)
            }
            Err(e) => {
                editor.save_failed().expect("editor must be in Saving state");
                Err(e)
            }
        }
    }
}
