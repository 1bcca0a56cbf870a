use anyhow::Result;

/// Ensure an admin account exists (created on first start with an empty
/// user table; registration handles everyone else)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "cambiar123".to_string(),
            email: None,
            full_name: Some("Administrador".to_string()),
            is_admin: true,
        };

        let admin_id = service::create(admin_dto).await?;

        tracing::warn!("Default admin user created (username: admin, id: {})", admin_id);
        tracing::warn!("Change the default password immediately");
    }

    Ok(())
}
