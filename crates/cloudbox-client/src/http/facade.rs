//! [`RemoteFacade`] over the REST API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use cloudbox_core::config::api::ApiConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_core::types::{FileId, FolderId, ShareId};
use cloudbox_entity::{FileEntry, FolderEntry, SearchResults, ShareLink, SharedFile};

use super::ApiClient;
use crate::dto::request::{
    CreateFolderBody, CreateShareBody, MoveFileBody, MoveFolderBody, RenameBody, move_target,
};
use crate::facade::{FileContent, FileUpload, RemoteFacade, UploadReceipt};
use crate::session::Session;

fn flag(value: bool) -> Option<String> {
    Some(value.to_string())
}

fn id_param(id: Option<FolderId>) -> Option<String> {
    id.map(|id| id.to_string())
}

/// Talks to the backend over HTTP using the token of one [`Session`].
#[derive(Debug, Clone)]
pub struct HttpFacade {
    api: ApiClient,
}

impl HttpFacade {
    /// Build a facade for `session`. The session's base URL wins over the
    /// configured one.
    pub fn new(config: &ApiConfig, session: Session) -> AppResult<Self> {
        let api = ApiClient::new(config, &session.base_url, session.token)?;
        Ok(Self { api })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> AppResult<T> {
        let url = self.api.url(path, query)?;
        self.api.send(self.api.request(Method::GET, url)).await
    }

    async fn put_json<B: serde::Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.api.url(path, &[])?;
        self.api
            .send(self.api.request(Method::PUT, url).json(body))
            .await
    }

    async fn fetch(&self, path: &str) -> AppResult<FileContent> {
        let url = self.api.url(path, &[])?;
        self.api.fetch(self.api.request(Method::GET, url)).await
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> AppResult<()> {
        let url = self.api.url(path, query)?;
        self.api.send_unit(self.api.request(method, url)).await
    }
}

#[async_trait]
impl RemoteFacade for HttpFacade {
    #[instrument(skip(self))]
    async fn list_files(&self, parent: Option<FolderId>) -> AppResult<Vec<FileEntry>> {
        let files: Vec<FileEntry> = self
            .get("files/", &[("folder_id", id_param(parent))])
            .await?;
        Ok(files.into_iter().filter(|f| !f.is_deleted).collect())
    }

    #[instrument(skip(self))]
    async fn list_folders(&self, parent: Option<FolderId>) -> AppResult<Vec<FolderEntry>> {
        let folders: Vec<FolderEntry> = self
            .get("folders/", &[("parent_id", id_param(parent))])
            .await?;
        Ok(folders.into_iter().filter(|f| !f.is_deleted).collect())
    }

    #[instrument(skip(self))]
    async fn get_folder(&self, id: FolderId) -> AppResult<FolderEntry> {
        self.get(&format!("folders/{id}"), &[]).await
    }

    #[instrument(skip(self))]
    async fn get_file(&self, id: FileId) -> AppResult<FileEntry> {
        self.get(&format!("files/{id}"), &[]).await
    }

    #[instrument(skip(self))]
    async fn create_folder(&self, name: &str, parent: Option<FolderId>) -> AppResult<FolderEntry> {
        let url = self.api.url("folders/", &[])?;
        let body = CreateFolderBody {
            name,
            parent_id: parent,
        };
        self.api
            .send(self.api.request(Method::POST, url).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn rename_file(&self, id: FileId, name: &str) -> AppResult<FileEntry> {
        self.put_json(&format!("files/{id}"), &RenameBody { name })
            .await
    }

    #[instrument(skip(self))]
    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<FolderEntry> {
        self.put_json(&format!("folders/{id}"), &RenameBody { name })
            .await
    }

    #[instrument(skip(self))]
    async fn move_file(&self, id: FileId, target: Option<FolderId>) -> AppResult<FileEntry> {
        let body = MoveFileBody {
            folder_id: move_target(target),
        };
        self.put_json(&format!("files/{id}"), &body).await
    }

    #[instrument(skip(self))]
    async fn move_folder(
        &self,
        id: FolderId,
        target: Option<FolderId>,
    ) -> AppResult<FolderEntry> {
        let body = MoveFolderBody {
            parent_id: move_target(target),
        };
        self.put_json(&format!("folders/{id}"), &body).await
    }

    #[instrument(skip(self))]
    async fn delete_file(&self, id: FileId, permanent: bool) -> AppResult<()> {
        self.call(
            Method::DELETE,
            &format!("files/{id}"),
            &[("permanent", flag(permanent))],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_folder(&self, id: FolderId, permanent: bool) -> AppResult<()> {
        self.call(
            Method::DELETE,
            &format!("folders/{id}"),
            &[("permanent", flag(permanent)), ("recursive", flag(true))],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn restore_file(&self, id: FileId) -> AppResult<()> {
        self.call(Method::POST, &format!("files/{id}/restore"), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn restore_folder(&self, id: FolderId) -> AppResult<()> {
        self.call(Method::POST, &format!("folders/{id}/restore"), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn list_trashed_files(&self) -> AppResult<Vec<FileEntry>> {
        let files: Vec<FileEntry> = self
            .get("files/", &[("show_deleted", flag(true))])
            .await?;
        Ok(files.into_iter().filter(|f| f.is_deleted).collect())
    }

    #[instrument(skip(self))]
    async fn list_trashed_folders(&self) -> AppResult<Vec<FolderEntry>> {
        let folders: Vec<FolderEntry> = self
            .get("folders/", &[("show_deleted", flag(true))])
            .await?;
        Ok(folders.into_iter().filter(|f| f.is_deleted).collect())
    }

    #[instrument(skip(self))]
    async fn create_share(
        &self,
        file: FileId,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<ShareLink> {
        let url = self.api.url(&format!("shares/{file}"), &[])?;
        self.api
            .send(
                self.api
                    .request(Method::POST, url)
                    .json(&CreateShareBody { expires_at }),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn list_shares(&self, file: Option<FileId>) -> AppResult<Vec<ShareLink>> {
        self.get("shares/", &[("file_id", file.map(|id| id.to_string()))])
            .await
    }

    #[instrument(skip(self))]
    async fn delete_share(&self, id: ShareId) -> AppResult<()> {
        self.call(Method::DELETE, &format!("shares/{id}"), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, scope: Option<FolderId>) -> AppResult<SearchResults> {
        self.get(
            "search",
            &[("q", Some(term.to_string())), ("folder_id", id_param(scope))],
        )
        .await
    }

    #[instrument(skip(self, upload), fields(name = %upload.name, size = upload.bytes.len()))]
    async fn upload_file(&self, upload: FileUpload) -> AppResult<UploadReceipt> {
        let mut part = Part::bytes(upload.bytes).file_name(upload.name);
        if let Some(mime) = upload.mime_type.as_deref() {
            part = part.mime_str(mime).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid MIME type '{mime}'"),
                    e,
                )
            })?;
        }
        let mut form = Form::new().part("file", part);
        if let Some(folder) = upload.folder_id {
            form = form.text("folder_id", folder.to_string());
        }

        let url = self.api.url("files/upload", &[])?;
        self.api
            .send(self.api.request(Method::POST, url).multipart(form))
            .await
    }

    #[instrument(skip(self))]
    async fn download_file(&self, id: FileId) -> AppResult<FileContent> {
        self.fetch(&format!("files/{id}/download")).await
    }

    #[instrument(skip(self))]
    async fn open_shared(&self, token: &str) -> AppResult<SharedFile> {
        self.get(&format!("shares/public/{}", share_token(token)?), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn download_shared(&self, token: &str) -> AppResult<FileContent> {
        self.fetch(&format!("shares/public/{}/download", share_token(token)?))
            .await
    }
}

/// Tokens are URL-safe; anything else would change the request path.
fn share_token(token: &str) -> AppResult<&str> {
    let token = token.trim();
    let url_safe = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    if token.is_empty() || !token.chars().all(url_safe) {
        return Err(AppError::validation(format!("Invalid share token '{token}'")));
    }
    Ok(token)
}
