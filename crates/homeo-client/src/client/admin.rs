//! Admin product CRUD.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use super::ApiClient;
use crate::error::ApiError;
use crate::types::ProductForm;

impl ApiClient {
    /// `POST /api/admin/products` with the form as multipart data.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Io`] if an image file cannot be read.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status.
    pub async fn create_product(&self, form: &ProductForm) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "admin", "products"])?;
        let body = build_multipart(form).await?;
        self.send_checked(self.client.post(url).multipart(body), "Failed to save product")
            .await?;
        tracing::info!(name = %form.name, "product created");
        Ok(())
    }

    /// `PUT /api/admin/products/<id>` with the form as multipart data.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::create_product`], plus [`ApiError::InvalidRequest`]
    /// when `id` is blank.
    pub async fn update_product(&self, id: &str, form: &ProductForm) -> Result<(), ApiError> {
        let id = require_id(id, "update")?;
        let url = self.endpoint(&["api", "admin", "products", id])?;
        let body = build_multipart(form).await?;
        self.send_checked(self.client.put(url).multipart(body), "Failed to save product")
            .await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(())
    }

    /// `DELETE /api/admin/products/<id>`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidRequest`] when `id` is blank.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status.
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let id = require_id(id, "delete")?;
        let url = self.endpoint(&["api", "admin", "products", id])?;
        self.send_checked(self.client.delete(url), "Failed to delete product")
            .await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}

fn require_id<'a>(id: &'a str, action: &str) -> Result<&'a str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidRequest(format!(
            "cannot {action} product: invalid product id"
        )));
    }
    Ok(id)
}

async fn build_multipart(form: &ProductForm) -> Result<Form, ApiError> {
    let fields = form
        .text_fields()
        .map_err(|source| ApiError::Encode {
            context: "product form".to_owned(),
            source,
        })?;

    let mut body = Form::new();
    for (name, value) in fields {
        body = body.text(name, value);
    }
    for path in &form.image_files {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.clone(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_mime(path))?;
        body = body.part("images", part);
    }
    Ok(body)
}

pub(crate) fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
