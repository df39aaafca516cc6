use crate::models::{
    Category, CreateNews, CreateSubmission, CreateUser, DashboardStats, News, NewsFilter,
    Submission, SubmissionFilter, Tag, UpdateNews, UpdateSubmission, UpdateUser, UserRecord,
};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (Postgres, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's asynchronous task
/// boundaries. Every method surfaces its database error so the handler layer can
/// map it; nothing is swallowed here.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- News ---
    // Public listing with filtering. Must restrict to status = 'published'.
    async fn list_news(&self, filter: NewsFilter) -> Result<Vec<News>, sqlx::Error>;
    // Dashboard access: retrieves all records regardless of status.
    async fn list_all_news(&self) -> Result<Vec<News>, sqlx::Error>;
    async fn get_news(&self, id: Uuid) -> Result<Option<News>, sqlx::Error>;
    async fn create_news(&self, input: CreateNews) -> Result<News, sqlx::Error>;
    // Partial update: only supplied columns change.
    async fn update_news(&self, id: Uuid, input: UpdateNews) -> Result<Option<News>, sqlx::Error>;
    async fn delete_news(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    // Editorial action: flips the status field ('draft' / 'published').
    async fn set_news_status(&self, id: Uuid, status: &str) -> Result<Option<News>, sqlx::Error>;

    // --- Categories ---
    async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error>;
    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, sqlx::Error>;
    // Unique violations propagate for the handler's 400 mapping.
    async fn create_category(&self, name: &str) -> Result<Category, sqlx::Error>;
    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>, sqlx::Error>;
    async fn delete_category(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    // True when any news record references the category (delete guard).
    async fn category_in_use(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Tags ---
    async fn list_tags(&self) -> Result<Vec<Tag>, sqlx::Error>;
    async fn get_tag(&self, id: Uuid) -> Result<Option<Tag>, sqlx::Error>;
    async fn create_tag(&self, name: &str) -> Result<Tag, sqlx::Error>;
    async fn update_tag(&self, id: Uuid, name: &str) -> Result<Option<Tag>, sqlx::Error>;
    async fn delete_tag(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Users ---
    async fn list_users(&self) -> Result<Vec<UserRecord>, sqlx::Error>;
    // Also used by the AuthUser extractor on every authenticated request.
    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn create_user(&self, input: CreateUser) -> Result<UserRecord, sqlx::Error>;
    async fn update_user(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> Result<Option<UserRecord>, sqlx::Error>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Submissions ---
    async fn list_submissions(
        &self,
        filter: SubmissionFilter,
    ) -> Result<Vec<Submission>, sqlx::Error>;
    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, sqlx::Error>;
    async fn create_submission(
        &self,
        input: CreateSubmission,
    ) -> Result<Submission, sqlx::Error>;
    async fn update_submission(
        &self,
        id: Uuid,
        input: UpdateSubmission,
    ) -> Result<Option<Submission>, sqlx::Error>;
    async fn delete_submission(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Dashboard ---
    // Compiles all counters for the dashboard in one call.
    async fn get_stats(&self) -> Result<DashboardStats, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
/// Queries use sqlx's runtime API so the crate builds without a reachable
/// database; parameterization goes through bind values throughout.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NEWS_COLUMNS: &str = "id, name, author_name, short_description, long_description, \
     publish_date, image_url, category, tags, kind, status, created_at, updated_at";

const USER_COLUMNS: &str =
    "id, name, email, role, password_hash, image, mobile, created_at, updated_at";

const SUBMISSION_COLUMNS: &str =
    "id, name, mobile, email, title, message, created_at, updated_at";

#[async_trait]
impl Repository for PostgresRepository {
    // --- NEWS ---

    /// list_news
    ///
    /// Implements flexible search/filtering using QueryBuilder for safe
    /// parameterization. Strictly enforces `status = 'published'` in the base
    /// query so drafts never leak onto the public routes.
    async fn list_news(&self, filter: NewsFilter) -> Result<Vec<News>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE status = 'published' "
        ));

        if let Some(category) = filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }

        if let Some(kind) = filter.kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind);
        }

        if let Some(search) = filter.search {
            // Case-insensitive search across name, descriptions and author.
            let pattern = format!("%{}%", search);
            builder.push(" AND (name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR short_description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR long_description ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR author_name ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC");

        builder.build_query_as::<News>().fetch_all(&self.pool).await
    }

    /// list_all_news
    ///
    /// Dashboard listing: all records, drafts first so pending work is on top.
    async fn list_all_news(&self) -> Result<Vec<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news ORDER BY status ASC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_news(&self, id: Uuid) -> Result<Option<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(&format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// create_news
    ///
    /// Inserts a new record; the id and timestamps are produced here so the
    /// returned row is complete.
    async fn create_news(&self, input: CreateNews) -> Result<News, sqlx::Error> {
        sqlx::query_as::<_, News>(&format!(
            "INSERT INTO news (id, name, author_name, short_description, long_description, \
             publish_date, image_url, category, tags, kind, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW()) \
             RETURNING {NEWS_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(input.author_name)
        .bind(input.short_description)
        .bind(input.long_description)
        .bind(input.publish_date)
        .bind(input.image_url)
        .bind(input.category)
        .bind(input.tags)
        .bind(input.kind)
        .bind(input.status)
        .fetch_one(&self.pool)
        .await
    }

    /// update_news
    ///
    /// Uses PostgreSQL `COALESCE` to only change the columns the caller actually
    /// supplied, keeping the rest of the row intact.
    async fn update_news(&self, id: Uuid, input: UpdateNews) -> Result<Option<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(&format!(
            "UPDATE news SET \
                name = COALESCE($2, name), \
                author_name = COALESCE($3, author_name), \
                short_description = COALESCE($4, short_description), \
                long_description = COALESCE($5, long_description), \
                publish_date = COALESCE($6, publish_date), \
                image_url = COALESCE($7, image_url), \
                category = COALESCE($8, category), \
                tags = COALESCE($9, tags), \
                kind = COALESCE($10, kind), \
                status = COALESCE($11, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {NEWS_COLUMNS}"
        ))
        .bind(id)
        .bind(input.name)
        .bind(input.author_name)
        .bind(input.short_description)
        .bind(input.long_description)
        .bind(input.publish_date)
        .bind(input.image_url)
        .bind(input.category)
        .bind(input.tags)
        .bind(input.kind)
        .bind(input.status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_news(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_news_status(&self, id: Uuid, status: &str) -> Result<Option<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(&format!(
            "UPDATE news SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {NEWS_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    // --- CATEGORIES ---

    async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// create_category
    ///
    /// The `categories.name` column carries a unique constraint; violations
    /// propagate so the handler can answer 400.
    async fn create_category(&self, name: &str) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name, created_at, updated_at) \
             VALUES ($1, $2, NOW(), NOW()) RETURNING id, name, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn category_in_use(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM news WHERE category = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    // --- TAGS ---

    async fn list_tags(&self) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_tag(&self, id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_tag(&self, name: &str) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, name, created_at, updated_at) \
             VALUES ($1, $2, NOW(), NOW()) RETURNING id, name, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_tag(&self, id: Uuid, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_tag(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- USERS ---

    async fn list_users(&self) -> Result<Vec<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_user(&self, input: CreateUser) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (id, name, email, role, password_hash, image, mobile, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW()) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(input.email)
        .bind(input.role)
        .bind(input.password_hash)
        .bind(input.image)
        .bind(input.mobile)
        .fetch_one(&self.pool)
        .await
    }

    /// update_user
    ///
    /// COALESCE keeps the stored password hash when the update form omitted the
    /// password.
    async fn update_user(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                role = COALESCE($4, role), \
                password_hash = COALESCE($5, password_hash), \
                image = COALESCE($6, image), \
                mobile = COALESCE($7, mobile), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(input.name)
        .bind(input.email)
        .bind(input.role)
        .bind(input.password_hash)
        .bind(input.image)
        .bind(input.mobile)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- SUBMISSIONS ---

    /// list_submissions
    ///
    /// Each query parameter filters its own column, case-insensitively.
    async fn list_submissions(
        &self,
        filter: SubmissionFilter,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE TRUE "
        ));

        let columns = [
            ("name", filter.name),
            ("email", filter.email),
            ("mobile", filter.mobile),
            ("title", filter.title),
            ("message", filter.message),
        ];
        for (column, value) in columns {
            if let Some(value) = value {
                builder.push(format!(" AND {column} ILIKE "));
                builder.push_bind(format!("%{}%", value));
            }
        }

        builder.push(" ORDER BY created_at DESC");

        builder
            .build_query_as::<Submission>()
            .fetch_all(&self.pool)
            .await
    }

    async fn get_submission(&self, id: Uuid) -> Result<Option<Submission>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_submission(
        &self,
        input: CreateSubmission,
    ) -> Result<Submission, sqlx::Error> {
        sqlx::query_as::<_, Submission>(&format!(
            "INSERT INTO submissions (id, name, mobile, email, title, message, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW()) RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(input.mobile)
        .bind(input.email)
        .bind(input.title)
        .bind(input.message)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_submission(
        &self,
        id: Uuid,
        input: UpdateSubmission,
    ) -> Result<Option<Submission>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(&format!(
            "UPDATE submissions SET \
                name = COALESCE($2, name), \
                mobile = COALESCE($3, mobile), \
                email = COALESCE($4, email), \
                title = COALESCE($5, title), \
                message = COALESCE($6, message), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(id)
        .bind(input.name)
        .bind(input.mobile)
        .bind(input.email)
        .bind(input.title)
        .bind(input.message)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_submission(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- DASHBOARD ---

    /// get_stats
    ///
    /// Compiles all counters for the dashboard in a single call; the counts run
    /// concurrently over the pool.
    async fn get_stats(&self) -> Result<DashboardStats, sqlx::Error> {
        let count = |sql: &'static str| {
            let pool = self.pool.clone();
            async move {
                sqlx::query_scalar::<_, i64>(sql)
                    .fetch_one(&pool)
                    .await
            }
        };

        let (total_categories, total_users, total_submissions, total_tags) = tokio::try_join!(
            count("SELECT COUNT(*) FROM categories"),
            count("SELECT COUNT(*) FROM users"),
            count("SELECT COUNT(*) FROM submissions"),
            count("SELECT COUNT(*) FROM tags"),
        )?;
        let (total_articles, total_news) = tokio::try_join!(
            count("SELECT COUNT(*) FROM news WHERE kind = 'article'"),
            count("SELECT COUNT(*) FROM news WHERE kind = 'news'"),
        )?;

        Ok(DashboardStats {
            total_categories,
            total_users,
            total_submissions,
            total_tags,
            total_articles,
            total_news,
        })
    }
}
