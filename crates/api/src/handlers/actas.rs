//! Handlers for tally-sheet ("acta") photos: upload, the caller's uploads
//! and short-lived read URLs.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use escrutinio_core::acta::{
    acta_storage_path, compress_acta, validate_upload, ORIGIN_VOLUNTEER, OUTPUT_CONTENT_TYPE,
};
use escrutinio_core::error::CoreError;
use escrutinio_core::types::DbId;
use escrutinio_db::models::foto::{CreateFotoMesa, FotoMesa};
use escrutinio_db::repositories::{FotoRepo, MesaRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the table id.
const FIELD_MESA: &str = "mesa_id";

/// Multipart field carrying the image.
const FIELD_FILE: &str = "file";

#[derive(Debug, Serialize)]
pub struct ActaUrl {
    pub url: String,
    pub expira_en_segundos: u64,
}

struct UploadForm {
    mesa_id: DbId,
    bytes: Vec<u8>,
    content_type: Option<String>,
}

/// POST /api/v1/actas
///
/// Multipart with `mesa_id` and `file`. The image is validated and
/// recompressed before it is stored, then the photo row is inserted. If the
/// insert fails the stored object is left in place.
pub async fn upload_acta(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<FotoMesa>>)> {
    let form = read_upload_form(multipart).await?;
    validate_upload(&form.bytes, form.content_type.as_deref())?;

    let mesa = MesaRepo::find_by_id(&state.pool, form.mesa_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mesa",
            id: form.mesa_id,
        }))?;

    let raw_len = form.bytes.len();
    let acta = tokio::task::spawn_blocking(move || compress_acta(&form.bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("Compression task failed: {e}")))??;

    let storage_path = acta_storage_path(user.user_id, mesa.id, Utc::now());
    let stored_len = acta.bytes.len();
    state
        .blobs
        .put(&storage_path, acta.bytes, OUTPUT_CONTENT_TYPE)
        .await?;

    let foto = FotoRepo::create(
        &state.pool,
        &CreateFotoMesa {
            mesa_id: mesa.id,
            usuario_id: user.user_id,
            origen: ORIGIN_VOLUNTEER.to_string(),
            storage_path: storage_path.clone(),
        },
    )
    .await
    .inspect_err(|e| {
        tracing::error!(%storage_path, error = %e, "Acta stored but photo record failed");
    })?;

    tracing::info!(
        mesa_id = mesa.id,
        user_id = user.user_id,
        %storage_path,
        raw_len,
        stored_len,
        quality = acta.quality,
        "Acta uploaded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: foto })))
}

/// GET /api/v1/actas/mias
pub async fn mis_actas(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FotoMesa>>>> {
    let data = FotoRepo::list_by_usuario(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/actas/{id}/url
///
/// Uploaders see their own photos; operators and admins see any.
pub async fn acta_url(
    State(state): State<AppState>,
    user: AuthUser,
    Path(foto_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActaUrl>>> {
    let foto = FotoRepo::find_by_id(&state.pool, foto_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Acta",
            id: foto_id,
        }))?;

    if foto.usuario_id != user.user_id && !user.role.can_digitize() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not allowed to view this acta".into(),
        )));
    }

    let ttl = state.config.storage.signed_url_ttl;
    let url = state.blobs.signed_url(&foto.storage_path, ttl).await?;
    Ok(Json(DataResponse {
        data: ActaUrl {
            url,
            expira_en_segundos: ttl.as_secs(),
        },
    }))
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut mesa_id = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FIELD_MESA) => {
                let text = field.text().await?;
                let text = text.trim();
                if !text.is_empty() {
                    mesa_id = Some(text.parse::<DbId>().map_err(|_| {
                        AppError::BadRequest(format!("Invalid mesa_id '{text}'"))
                    })?);
                }
            }
            Some(FIELD_FILE) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((bytes.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let mesa_id =
        mesa_id.ok_or_else(|| AppError::BadRequest("Debe seleccionar una mesa".into()))?;
    let (bytes, content_type) =
        file.ok_or_else(|| AppError::BadRequest("Debe seleccionar una imagen".into()))?;

    Ok(UploadForm {
        mesa_id,
        bytes,
        content_type,
    })
}
