use crate::{
    AppState,
    auth::{self, AuthUser, Claims},
    error::{AppError, on_conflict},
    ingest::{self, FieldMap},
    models::{
        Category, ChangeStatusRequest, CreateNews, CreateSubmission, CreateUser, DashboardStats,
        LoginResponse, LoginUser, News, NewsFilter, Submission, SubmissionFilter, Tag, UpdateNews,
        UpdateSubmission, UpdateUser, User,
    },
    validation::{self, LoginPayload, NamePayload},
};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Allowed editorial kinds for a news record.
const ALLOWED_KINDS: [&str; 2] = ["news", "article"];

/// Allowed publication states for a news record.
const ALLOWED_STATUSES: [&str; 2] = ["draft", "published"];

/// Every handler responds with a status code plus the API's JSON envelope.
type ApiResult = Result<(StatusCode, Json<Value>), AppError>;

// --- Pipeline Helpers ---

/// ingest_form
///
/// The request-ingestion pipeline shared by every multipart endpoint: reject
/// non-multipart bodies with 422 before touching the stream, then extract the
/// fields (storing file parts through the configured backend) and reconstruct
/// indexed array fields. The result feeds schema validation in the handler.
async fn ingest_form(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<FieldMap, AppError> {
    let multipart = multipart.map_err(|_| AppError::NotMultipart)?;
    let fields = ingest::collect_fields(
        multipart,
        &state.storage,
        Some(&state.config.upload_prefix),
    )
    .await?;
    Ok(ingest::reconstruct_arrays(fields)?)
}

/// Parses a path id, mapping failures onto the per-entity 400 message.
fn parse_id(id: &str, entity: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId(entity))
}

/// Guards the admin-only endpoints (user management).
fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.role == "admin" {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Restricts a free-form field to an allow-list, reported as a 400.
fn check_allowed(
    value: &str,
    allowed: &[&str],
    label: &str,
) -> Result<(), AppError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid {label}. Allowed values are: {}",
            allowed.join(", ")
        )))
    }
}

// --- Auth Handlers ---

/// login
///
/// [Public Route] Validates the credentials against the stored argon2 hash and
/// answers with the user fragment plus a signed 48-hour JWT. Unknown email and
/// wrong password are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 422, description = "Invalid credentials or payload")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    validation::validate_payload(&payload)?;

    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth::verify_password(&password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = auth::issue_token(&Claims::new(&user), &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        user: LoginUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
        token,
    }))
}

// --- News Handlers ---

/// get_news_list
///
/// [Public Route] Lists published news with search and category filtering.
/// Drafts are excluded unconditionally at the repository layer.
#[utoipa::path(
    get,
    path = "/news",
    params(NewsFilter),
    responses((status = 200, description = "Published news", body = [News]))
)]
pub async fn get_news_list(
    State(state): State<AppState>,
    Query(filter): Query<NewsFilter>,
) -> ApiResult {
    let news = state.repo.list_news(filter).await?;

    if news.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No news found", "data": [] })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "News fetched successfully", "data": news })),
    ))
}

/// get_news_details
///
/// [Public Route] Retrieves a single news record by ID.
#[utoipa::path(
    get,
    path = "/news/{id}",
    params(("id" = String, Path, description = "News ID")),
    responses(
        (status = 200, description = "Found", body = News),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_news_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "News")?;
    let news = state.repo.get_news(id).await?.ok_or(AppError::NotFound("News"))?;
    Ok((StatusCode::OK, Json(json!({ "data": news }))))
}

/// get_dashboard_news
///
/// [Authenticated Route] Lists every news record, drafts included, for the
/// editorial dashboard.
#[utoipa::path(
    get,
    path = "/dashboard/news",
    responses((status = 200, description = "All news", body = [News]))
)]
pub async fn get_dashboard_news(
    _user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult {
    let news = state.repo.list_all_news().await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "News fetched successfully", "data": news })),
    ))
}

/// create_news
///
/// [Authenticated Route] Creates a news record from a multipart form. Runs the
/// full ingestion pipeline: the `image` file part is stored through the storage
/// backend, indexed `tags[i]` fields are reconstructed into an ordered list, and
/// the normalized map is schema-validated before anything is persisted.
/// New records default to the `draft` state.
#[utoipa::path(
    post,
    path = "/dashboard/news",
    responses(
        (status = 201, description = "Created", body = News),
        (status = 422, description = "Not multipart or validation failed")
    )
)]
pub async fn create_news(
    _user: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_news(&fields)?;

    let kind = payload.kind.unwrap_or_else(|| "news".to_string());
    check_allowed(&kind, &ALLOWED_KINDS, "kind")?;
    let status = payload.status.unwrap_or_else(|| "draft".to_string());
    check_allowed(&status, &ALLOWED_STATUSES, "status")?;

    let input = CreateNews {
        name: payload.name.unwrap_or_default(),
        author_name: payload.author_name.unwrap_or_default(),
        short_description: payload.short_description,
        long_description: payload.long_description,
        publish_date: payload.publish_date,
        // The uploaded file wins over a pasted URL when both are present.
        image_url: payload.image.or(payload.image_url),
        category: payload
            .category
            .as_deref()
            .and_then(|c| Uuid::parse_str(c).ok()),
        tags: payload
            .tags
            .unwrap_or_default()
            .iter()
            .filter_map(|t| Uuid::parse_str(t).ok())
            .collect(),
        kind,
        status,
    };

    let news = state.repo.create_news(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": news, "message": "News created successfully." })),
    ))
}

/// update_news
///
/// [Authenticated Route] Updates a news record from a multipart form via the
/// same ingestion pipeline as creation; only the supplied fields change.
#[utoipa::path(
    put,
    path = "/dashboard/news/{id}",
    params(("id" = String, Path, description = "News ID")),
    responses(
        (status = 200, description = "Updated", body = News),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_news(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_news(&fields)?;

    let id = parse_id(&id, "News")?;

    if let Some(kind) = &payload.kind {
        check_allowed(kind, &ALLOWED_KINDS, "kind")?;
    }
    if let Some(status) = &payload.status {
        check_allowed(status, &ALLOWED_STATUSES, "status")?;
    }

    let input = UpdateNews {
        name: payload.name,
        author_name: payload.author_name,
        short_description: payload.short_description,
        long_description: payload.long_description,
        publish_date: payload.publish_date,
        image_url: payload.image.or(payload.image_url),
        category: payload
            .category
            .as_deref()
            .and_then(|c| Uuid::parse_str(c).ok()),
        tags: payload.tags.map(|tags| {
            tags.iter()
                .filter_map(|t| Uuid::parse_str(t).ok())
                .collect()
        }),
        kind: payload.kind,
        status: payload.status,
    };

    let news = state
        .repo
        .update_news(id, input)
        .await?
        .ok_or(AppError::NotFound("News"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "News updated successfully", "data": news })),
    ))
}

/// delete_news
///
/// [Authenticated Route] Removes a news record. The stored image is deliberately
/// left in place; storage holds no back-references to records.
#[utoipa::path(
    delete,
    path = "/dashboard/news/{id}",
    params(("id" = String, Path, description = "News ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_news(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "News")?;
    if state.repo.delete_news(id).await? {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Record deleted successfully." })),
        ))
    } else {
        Err(AppError::NotFound("News"))
    }
}

/// change_news_status
///
/// [Authenticated Route] Publishes or retracts a news record.
#[utoipa::path(
    patch,
    path = "/dashboard/news/{id}/status",
    params(("id" = String, Path, description = "News ID")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Updated", body = News),
        (status = 404, description = "Not Found")
    )
)]
pub async fn change_news_status(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChangeStatusRequest>,
) -> ApiResult {
    let id = parse_id(&id, "News")?;
    check_allowed(&payload.status, &ALLOWED_STATUSES, "status")?;

    let news = state
        .repo
        .set_news_status(id, &payload.status)
        .await?
        .ok_or(AppError::NotFound("News"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "News status updated successfully.", "data": news })),
    ))
}

// --- Category Handlers ---

/// get_categories
///
/// [Public Route] Lists all categories, newest first.
#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "Categories", body = [Category]))
)]
pub async fn get_categories(State(state): State<AppState>) -> ApiResult {
    let categories = state.repo.list_categories().await?;

    if categories.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No categories found", "data": [] })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Categories fetched successfully", "data": categories })),
    ))
}

/// get_category_details
///
/// [Public Route] Retrieves a single category by ID.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Found", body = Category),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_category_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "Category")?;
    let category = state
        .repo
        .get_category(id)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Category fetched successfully", "data": category })),
    ))
}

/// create_category
///
/// [Authenticated Route] Creates a category from a multipart form (the dashboard
/// submits every form the same way). Names are unique.
#[utoipa::path(
    post,
    path = "/dashboard/categories",
    responses(
        (status = 201, description = "Created", body = Category),
        (status = 400, description = "Duplicate name"),
        (status = 422, description = "Not multipart or validation failed")
    )
)]
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_name(&fields)?;

    let category = state
        .repo
        .create_category(&payload.name.unwrap_or_default())
        .await
        .map_err(|e| on_conflict(e, "Category name must be unique."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Category created successfully.", "data": category })),
    ))
}

/// update_category
///
/// [Authenticated Route] Renames a category (JSON body).
#[utoipa::path(
    put,
    path = "/dashboard/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    request_body = NamePayload,
    responses(
        (status = 200, description = "Updated", body = Category),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NamePayload>,
) -> ApiResult {
    let id = parse_id(&id, "Category")?;
    validation::validate_payload(&payload)?;

    let category = state
        .repo
        .update_category(id, &payload.name.unwrap_or_default())
        .await
        .map_err(|e| on_conflict(e, "Category name must be unique."))?
        .ok_or(AppError::NotFound("Category"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Category updated successfully.", "data": category })),
    ))
}

/// delete_category
///
/// [Authenticated Route] Deletes a category unless a news record references it.
#[utoipa::path(
    delete,
    path = "/dashboard/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Category in use"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "Category")?;

    if state.repo.category_in_use(id).await? {
        return Err(AppError::BadRequest(
            "Category is associated with news. Cannot delete.".to_string(),
        ));
    }

    if state.repo.delete_category(id).await? {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Category deleted successfully." })),
        ))
    } else {
        Err(AppError::NotFound("Category"))
    }
}

// --- Tag Handlers ---

/// get_tags
///
/// [Public Route] Lists all tags, newest first.
#[utoipa::path(
    get,
    path = "/tags",
    responses((status = 200, description = "Tags", body = [Tag]))
)]
pub async fn get_tags(State(state): State<AppState>) -> ApiResult {
    let tags = state.repo.list_tags().await?;

    if tags.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No tags found", "data": [] })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Tags fetched successfully", "data": tags })),
    ))
}

/// get_tag_details
///
/// [Public Route] Retrieves a single tag by ID.
#[utoipa::path(
    get,
    path = "/tags/{id}",
    params(("id" = String, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Found", body = Tag),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_tag_details(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "Tag")?;
    let tag = state.repo.get_tag(id).await?.ok_or(AppError::NotFound("Tag"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Tag fetched successfully", "data": tag })),
    ))
}

/// create_tag
///
/// [Authenticated Route] Creates a tag (JSON body).
#[utoipa::path(
    post,
    path = "/dashboard/tags",
    request_body = NamePayload,
    responses(
        (status = 201, description = "Created", body = Tag),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_tag(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<NamePayload>,
) -> ApiResult {
    validation::validate_payload(&payload)?;

    let tag = state
        .repo
        .create_tag(&payload.name.unwrap_or_default())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Tag created successfully.", "data": tag })),
    ))
}

/// update_tag
///
/// [Authenticated Route] Renames a tag (JSON body).
#[utoipa::path(
    put,
    path = "/dashboard/tags/{id}",
    params(("id" = String, Path, description = "Tag ID")),
    request_body = NamePayload,
    responses(
        (status = 200, description = "Updated", body = Tag),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_tag(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NamePayload>,
) -> ApiResult {
    let id = parse_id(&id, "Tag")?;
    validation::validate_payload(&payload)?;

    let tag = state
        .repo
        .update_tag(id, &payload.name.unwrap_or_default())
        .await?
        .ok_or(AppError::NotFound("Tag"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Tag updated successfully.", "data": tag })),
    ))
}

/// delete_tag
///
/// [Authenticated Route] Deletes a tag.
#[utoipa::path(
    delete,
    path = "/dashboard/tags/{id}",
    params(("id" = String, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_tag(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "Tag")?;
    if state.repo.delete_tag(id).await? {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Tag deleted successfully." })),
        ))
    } else {
        Err(AppError::NotFound("Tag"))
    }
}

// --- User Handlers (Admin) ---

/// get_users
///
/// [Admin Route] Lists all portal accounts, stripped of credential material.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "Users", body = [User]))
)]
pub async fn get_users(user: AuthUser, State(state): State<AppState>) -> ApiResult {
    require_admin(&user)?;

    let users: Vec<User> = state
        .repo
        .list_users()
        .await?
        .into_iter()
        .map(|record| record.into_public())
        .collect();

    if users.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No users found", "data": [] })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Users fetched successfully", "data": users })),
    ))
}

/// get_user_details
///
/// [Admin Route] Retrieves a single account by ID.
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Found", body = User),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_user_details(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    require_admin(&user)?;

    let id = parse_id(&id, "User")?;
    let record = state
        .repo
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok((StatusCode::OK, Json(json!({ "data": record.into_public() }))))
}

/// create_user
///
/// [Admin Route] Creates a portal account from a multipart form (the avatar
/// rides in as a file part). The password is argon2-hashed before the record is
/// built; the clear text never reaches the repository.
#[utoipa::path(
    post,
    path = "/admin/users",
    responses(
        (status = 201, description = "Created", body = User),
        (status = 422, description = "Not multipart or validation failed")
    )
)]
pub async fn create_user(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    require_admin(&user)?;

    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_user(&fields, false)?;

    let password_hash = auth::hash_password(&payload.password.unwrap_or_default())?;

    let input = CreateUser {
        name: payload.name.unwrap_or_default(),
        email: payload.email.unwrap_or_default(),
        role: payload.role.unwrap_or_else(|| "publisher".to_string()),
        password_hash,
        image: payload.image,
        mobile: payload.mobile,
    };

    let record = state
        .repo
        .create_user(input)
        .await
        .map_err(|e| on_conflict(e, "Email must be unique."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": record.into_public(), "message": "User created successfully." })),
    ))
}

/// update_user
///
/// [Admin Route] Updates an account from a multipart form. A missing password
/// keeps the stored hash.
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Updated", body = User),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    require_admin(&user)?;

    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_user(&fields, true)?;

    let id = parse_id(&id, "User")?;

    let password_hash = match payload.password {
        Some(password) => Some(auth::hash_password(&password)?),
        None => None,
    };

    let input = UpdateUser {
        name: payload.name,
        email: payload.email,
        role: payload.role,
        password_hash,
        image: payload.image,
        mobile: payload.mobile,
    };

    let record = state
        .repo
        .update_user(id, input)
        .await
        .map_err(|e| on_conflict(e, "Email must be unique."))?
        .ok_or(AppError::NotFound("User"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "data": record.into_public(), "message": "Data updated successfully." })),
    ))
}

/// delete_user
///
/// [Admin Route] Removes a portal account.
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    require_admin(&user)?;

    let id = parse_id(&id, "User")?;
    if state.repo.delete_user(id).await? {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Record deleted successfully." })),
        ))
    } else {
        Err(AppError::NotFound("User"))
    }
}

// --- Submission Handlers ---

/// create_submission
///
/// [Public Route] Accepts the reader contact form (multipart). The submission
/// schema is strict: fields outside the allow-list are rejected.
#[utoipa::path(
    post,
    path = "/submissions",
    responses(
        (status = 201, description = "Created", body = Submission),
        (status = 422, description = "Not multipart or validation failed")
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_submission(&fields)?;

    let input = CreateSubmission {
        name: payload.name.unwrap_or_default(),
        mobile: payload.mobile.unwrap_or_default(),
        email: payload.email,
        title: payload.title.unwrap_or_default(),
        message: payload.message.unwrap_or_default(),
    };

    let submission = state.repo.create_submission(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Submission created successfully", "data": submission })),
    ))
}

/// get_submissions
///
/// [Authenticated Route] Lists submissions with per-column filters.
#[utoipa::path(
    get,
    path = "/dashboard/submissions",
    params(SubmissionFilter),
    responses((status = 200, description = "Submissions", body = [Submission]))
)]
pub async fn get_submissions(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<SubmissionFilter>,
) -> ApiResult {
    let submissions = state.repo.list_submissions(filter).await?;

    if submissions.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No Submissions found", "data": [] })),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Submissions fetched successfully", "data": submissions })),
    ))
}

/// get_submission_details
///
/// [Authenticated Route] Retrieves a single submission by ID.
#[utoipa::path(
    get,
    path = "/dashboard/submissions/{id}",
    params(("id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Found", body = Submission),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_submission_details(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "Submission")?;
    let submission = state
        .repo
        .get_submission(id)
        .await?
        .ok_or(AppError::NotFound("Submission"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Submission fetched successfully", "data": submission })),
    ))
}

/// update_submission
///
/// [Authenticated Route] Updates a submission from a multipart form; only the
/// supplied fields change.
#[utoipa::path(
    put,
    path = "/dashboard/submissions/{id}",
    params(("id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Updated", body = Submission),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_submission(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let fields = ingest_form(&state, multipart).await?;
    let payload = validation::validate_submission(&fields)?;

    let id = parse_id(&id, "Submission")?;

    let input = UpdateSubmission {
        name: payload.name,
        mobile: payload.mobile,
        email: payload.email,
        title: payload.title,
        message: payload.message,
    };

    let submission = state
        .repo
        .update_submission(id, input)
        .await?
        .ok_or(AppError::NotFound("Submission"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Submission updated successfully", "data": submission })),
    ))
}

/// delete_submission
///
/// [Authenticated Route] Removes a submission.
#[utoipa::path(
    delete,
    path = "/dashboard/submissions/{id}",
    params(("id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_submission(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "Submission")?;
    if state.repo.delete_submission(id).await? {
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "Submission deleted successfully" })),
        ))
    } else {
        Err(AppError::NotFound("Submission"))
    }
}

// --- Dashboard Handlers ---

/// get_dashboard_stats
///
/// [Authenticated Route] Compiles the dashboard counters in one response.
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses((status = 200, description = "Stats", body = DashboardStats))
)]
pub async fn get_dashboard_stats(
    _user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult {
    let stats = state.repo.get_stats().await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Statistics fetched successfully", "data": stats })),
    ))
}
