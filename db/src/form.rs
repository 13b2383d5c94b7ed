use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::form::{FormChanges, FormCreate},
    models::form::TestimonialForm,
};

/// Inserts a pure template row: placeholder content, unpublished.
pub async fn insert_form<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: FormCreate,
) -> Res<TestimonialForm> {
    sqlx::query_as::<_, TestimonialForm>(
        r#"
        INSERT INTO testimonial_forms (project_id, embed_key, form_config)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.project_id)
    .bind(data.embed_key)
    .bind(data.form_config)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Resolves a form only when the caller belongs to the organization that
/// owns the form's project.
pub async fn get_form_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    form_id: Uuid,
    caller: &str,
) -> Res<Option<TestimonialForm>> {
    sqlx::query_as::<_, TestimonialForm>(
        r#"
        SELECT f.*
        FROM testimonial_forms f
        JOIN projects p ON p.id = f.project_id
        JOIN organization_memberships m ON m.organization_id = p.organization_id
        JOIN users u ON u.id = m.user_id
        WHERE f.id = $1 AND u.external_id = $2
        "#,
    )
    .bind(form_id)
    .bind(caller)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Public lookup by embed key, no membership involved.
pub async fn get_form_by_embed_key<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    embed_key: &str,
) -> Res<Option<TestimonialForm>> {
    sqlx::query_as::<_, TestimonialForm>("SELECT * FROM testimonial_forms WHERE embed_key = $1")
        .bind(embed_key)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn list_forms_for_project<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    project_id: Uuid,
) -> Res<Vec<TestimonialForm>> {
    sqlx::query_as::<_, TestimonialForm>(
        "SELECT * FROM testimonial_forms WHERE project_id = $1 ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_form<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    form_id: Uuid,
    changes: FormChanges,
) -> Res<TestimonialForm> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE testimonial_forms SET ");
    {
        let mut set = qb.separated(", ");
        set.push("updated_at = now()");
        if let Some(form_config) = changes.form_config {
            set.push("form_config = ").push_bind_unseparated(form_config);
        }
        if let Some(name) = changes.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = changes.email {
            set.push("email = ").push_bind_unseparated(email);
        }
        if let Some(company) = changes.company {
            set.push("company = ").push_bind_unseparated(company);
        }
        if let Some(role) = changes.role {
            set.push("role = ").push_bind_unseparated(role);
        }
        if let Some(rating) = changes.rating {
            set.push("rating = ").push_bind_unseparated(rating);
        }
        if let Some(content) = changes.content {
            set.push("content = ").push_bind_unseparated(content);
        }
        if let Some(custom_fields) = changes.custom_fields {
            set.push("custom_fields = ")
                .push_bind_unseparated(custom_fields);
        }
        if let Some(published) = changes.published {
            set.push("published = ").push_bind_unseparated(published);
        }
    }
    qb.push(" WHERE id = ");
    qb.push_bind(form_id);
    qb.push(" RETURNING *");

    qb.build_query_as::<TestimonialForm>()
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn delete_form<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    form_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM testimonial_forms WHERE id = $1")
        .bind(form_id)
        .execute(executor)
        .await
        .map(|done| done.rows_affected())
        .map_err(AppError::from)
}
