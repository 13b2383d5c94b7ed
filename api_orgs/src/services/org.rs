use common::{
    error::{AppError, Res},
    jwt::SessionClaims,
    misc::OrgRole,
};
use db::{
    dtos::org::OrgCreate,
    models::{
        org::{MemberRow, Membership, Organization},
        user::User,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

/// Resolves the caller's mirrored user record. A session token for a user
/// the webhook has not delivered yet cannot act on anything.
pub async fn current_user(pool: &PgPool, claims: &SessionClaims) -> Res<User> {
    db::user::get_user_by_external_id(pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("No local record for this user".to_string()))
}

/// Creates an organization and its founding owner membership in one
/// transaction, so no organization can exist without a member.
pub async fn create_org(pool: &PgPool, claims: &SessionClaims, name: String, slug: String) -> Res<Organization> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name", "must not be empty"));
    }
    if slug.trim().is_empty() {
        return Err(AppError::validation("slug", "must not be empty"));
    }
    let user = current_user(pool, claims).await?;

    let slug_taken = db::org::exists_org_by_slug(pool, &slug).await?;
    if slug_taken {
        return Err(AppError::BadRequest("Slug already exists".to_string()));
    }

    let mut tx = pool.begin().await?;
    let org = db::org::insert_org(&mut *tx, OrgCreate { name, slug }).await?;
    db::org::insert_membership(&mut *tx, org.id, user.id, OrgRole::Owner).await?;
    tx.commit().await?;

    Ok(org)
}

pub async fn list_orgs(pool: &PgPool, claims: &SessionClaims) -> Res<Vec<Organization>> {
    db::org::list_orgs_for_user(pool, &claims.sub).await
}

pub async fn get_org(pool: &PgPool, claims: &SessionClaims, org_id: Uuid) -> Res<Organization> {
    db::org::get_org_for_user(pool, org_id, &claims.sub)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn rename_org(
    pool: &PgPool,
    claims: &SessionClaims,
    org_id: Uuid,
    name: Option<String>,
) -> Res<Organization> {
    let org = get_org(pool, claims, org_id).await?;
    let Some(name) = name else {
        // nothing to change
        return Ok(org);
    };
    if name.trim().is_empty() {
        return Err(AppError::validation("name", "must not be empty"));
    }
    db::org::update_org_name(pool, org.id, &name).await
}

pub async fn delete_org(pool: &PgPool, claims: &SessionClaims, org_id: Uuid) -> Res<Uuid> {
    let org = get_org(pool, claims, org_id).await?;
    db::org::delete_org(pool, org.id).await?;
    Ok(org.id)
}

pub async fn list_members(
    pool: &PgPool,
    claims: &SessionClaims,
    org_id: Uuid,
) -> Res<Vec<MemberRow>> {
    let org = get_org(pool, claims, org_id).await?;
    db::org::list_members(pool, org.id).await
}

pub async fn add_member(
    pool: &PgPool,
    claims: &SessionClaims,
    org_id: Uuid,
    email: String,
    role: String,
) -> Res<Membership> {
    let role = OrgRole::from_str(&role)?;
    let org = get_org(pool, claims, org_id).await?;

    let user = db::user::get_user_by_email(pool, &email)
        .await?
        .ok_or(AppError::NotFound)?;

    if db::org::get_membership(pool, org.id, user.id).await?.is_some() {
        return Err(AppError::BadRequest(
            "User is already a member of this organization".to_string(),
        ));
    }

    db::org::insert_membership(pool, org.id, user.id, role).await
}

pub async fn remove_member(
    pool: &PgPool,
    claims: &SessionClaims,
    org_id: Uuid,
    user_id: Uuid,
) -> Res<()> {
    let org = get_org(pool, claims, org_id).await?;
    let removed = db::org::delete_membership(pool, org.id, user_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
