use anyhow::Context;
use axum::extract::State;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::schema::{
    DetailResponseBody, ListItem, ListParams, ListResponseBody, PostResponseBody,
    SaveRequestBody, UpdateRequestBody, Writer,
};
use crate::app::envelope::Resp;
use crate::app::error::{AppError, AppResult};
use crate::app::extractor::{PathParam, Payload, QueryParams};
use crate::app::token::SessionUser;
use crate::app::AppState;
use crate::domain::board::NewPost;

#[tracing::instrument(name = "Save board", skip(state, session_user, body), fields(user_id = session_user.id))]
pub async fn save(
    session_user: SessionUser,
    State(state): State<AppState>,
    Payload(body): Payload<SaveRequestBody>,
) -> AppResult<Resp<PostResponseBody>> {
    let post = NewPost::try_from(body).map_err(AppError::BadRequest)?;

    let id = sqlx::query(
        r#"insert into board_tb (title, content, user_id, created_at) values (?, ?, ?, ?)"#,
    )
    .bind(post.title.as_ref())
    .bind(post.content.as_ref())
    .bind(session_user.id)
    .bind(Utc::now())
    .execute(&state.db)
    .await
    .context("Failed to insert the new board.")?
    .last_insert_rowid();

    Ok(Resp::ok(PostResponseBody {
        id,
        title: post.title.to_string(),
        content: post.content.to_string(),
    }))
}

#[tracing::instrument(name = "Update board", skip(state, session_user, body), fields(user_id = session_user.id))]
pub async fn update(
    session_user: SessionUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    Payload(body): Payload<UpdateRequestBody>,
) -> AppResult<Resp<PostResponseBody>> {
    let post = NewPost::try_from(body).map_err(AppError::BadRequest)?;

    let owner_id = find_owner(&state.db, id).await?;
    ensure_owner(&session_user, owner_id)?;

    sqlx::query(r#"update board_tb set title = ?, content = ? where id = ?"#)
        .bind(post.title.as_ref())
        .bind(post.content.as_ref())
        .bind(id)
        .execute(&state.db)
        .await
        .context("Failed to update the board.")?;

    Ok(Resp::ok(PostResponseBody {
        id,
        title: post.title.to_string(),
        content: post.content.to_string(),
    }))
}

#[tracing::instrument(name = "Delete board", skip(state, session_user), fields(user_id = session_user.id))]
pub async fn delete(
    session_user: SessionUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Resp<()>> {
    let owner_id = find_owner(&state.db, id).await?;
    ensure_owner(&session_user, owner_id)?;

    sqlx::query(r#"delete from board_tb where id = ?"#)
        .bind(id)
        .execute(&state.db)
        .await
        .context("Failed to delete the board.")?;

    Ok(Resp::empty())
}

#[tracing::instrument(name = "List boards", skip(state))]
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Resp<ListResponseBody>> {
    let page_size = i64::from(state.page_size);
    let offset = i64::from(params.page) * page_size;

    let total: i64 = sqlx::query_scalar(r#"select count(*) from board_tb"#)
        .fetch_one(&state.db)
        .await
        .context("Failed to count boards.")?;

    let boards = sqlx::query_as::<_, ListItem>(
        r#"select id, title from board_tb order by id desc limit ? offset ?"#,
    )
    .bind(page_size)
    .bind(offset)
    .fetch_all(&state.db)
    .await
    .context("Failed to fetch a page of boards.")?;

    Ok(Resp::ok(ListResponseBody {
        boards,
        page: params.page,
        first: params.page == 0,
        last: offset + page_size >= total,
    }))
}

#[derive(sqlx::FromRow)]
struct DetailRow {
    id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    user_id: i64,
    username: String,
}

#[tracing::instrument(name = "Board detail", skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Resp<DetailResponseBody>> {
    let row = sqlx::query_as::<_, DetailRow>(
        r#"
            select b.id, b.title, b.content, b.created_at, u.id as user_id, u.username
            from board_tb b inner join user_tb u on b.user_id = u.id
            where b.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await
    .context("Failed to fetch the board.")?
    .ok_or_else(|| not_found(id))?;

    Ok(Resp::ok(DetailResponseBody {
        id: row.id,
        title: row.title,
        content: row.content,
        created_at: row.created_at,
        writer: Writer {
            id: row.user_id,
            username: row.username,
        },
    }))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Board {} does not exist.", id))
}

#[tracing::instrument(name = "Find board owner", skip(db))]
async fn find_owner(db: &SqlitePool, id: i64) -> AppResult<i64> {
    sqlx::query_scalar::<_, i64>(r#"select user_id from board_tb where id = ?"#)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch the board owner.")?
        .ok_or_else(|| not_found(id))
}

fn ensure_owner(session_user: &SessionUser, owner_id: i64) -> AppResult<()> {
    if session_user.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission to modify this board.".to_owned(),
        ))
    }
}
