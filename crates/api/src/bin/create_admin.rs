//! Bootstrap a moderator account.
//!
//! ```text
//! create-admin <email> <password> [admin|viewer]
//! ```
//!
//! Reads `DATABASE_URL` (and `.env`), applies pending migrations and inserts
//! the account with an Argon2id password hash. The role defaults to `admin`.

use anyhow::{bail, Context};
use classhopper_api::auth::password::{
    hash_password, validate_password_strength, MIN_PASSWORD_LENGTH,
};
use classhopper_core::roles::{ROLE_ADMIN, VALID_ROLES};
use classhopper_db::models::admin_user::CreateAdminUser;
use classhopper_db::repositories::AdminUserRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_admin=info,classhopper_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password)) = (args.next(), args.next()) else {
        bail!("usage: create-admin <email> <password> [admin|viewer]");
    };
    let role = args.next().unwrap_or_else(|| ROLE_ADMIN.to_string());

    if !VALID_ROLES.contains(&role.as_str()) {
        bail!("role must be one of: {}", VALID_ROLES.join(", "));
    }
    validate_password_strength(&password, MIN_PASSWORD_LENGTH).map_err(anyhow::Error::msg)?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = classhopper_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    classhopper_db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    if AdminUserRepo::find_by_email(&pool, &email).await?.is_some() {
        bail!("an account for {email} already exists");
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    let user = AdminUserRepo::create(
        &pool,
        &CreateAdminUser {
            email,
            password_hash,
            role,
        },
    )
    .await
    .context("failed to create account")?;

    tracing::info!(
        user_id = user.id,
        email = %user.email,
        role = %user.role,
        "Moderator account created",
    );
    Ok(())
}
