use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};

use super::repository;
use crate::system::auth::password;

/// Create a new account (registration and admin-created users go through here)
pub async fn create(dto: CreateUserDto) -> Result<String> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        return Err(anyhow::anyhow!("El nombre de usuario no puede estar vacío"));
    }

    if repository::get_by_username(&username).await?.is_some() {
        return Err(anyhow::anyhow!("El nombre de usuario ya existe"));
    }

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("El email no es válido"));
        }
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username,
        email: dto.email,
        full_name: dto.full_name,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user_id)
}

pub async fn update(dto: UpdateUserDto) -> Result<()> {
    let mut user = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Usuario no encontrado"))?;

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("El email no es válido"));
        }
    }

    user.email = dto.email;
    user.full_name = dto.full_name;
    user.is_active = dto.is_active;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Change a password: owners verify the old one, admins may reset anyone's
pub async fn change_password(dto: ChangePasswordDto, requester_id: &str) -> Result<()> {
    repository::get_by_id(&dto.user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Usuario no encontrado"))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Solicitante no encontrado"))?;

    if dto.user_id != requester_id {
        if !requester.is_admin {
            return Err(anyhow::anyhow!("Permiso denegado"));
        }
        // Admin reset: old password not required
    } else {
        let old_password = dto
            .old_password
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Se requiere la contraseña actual"))?;
        let current_hash = repository::get_password_hash(&dto.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Hash de contraseña no encontrado"))?;

        if !password::verify_password(old_password, &current_hash)? {
            return Err(anyhow::anyhow!("La contraseña actual no es correcta"));
        }
    }

    password::validate_password_strength(&dto.new_password)?;
    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(&dto.user_id, &new_hash).await?;

    Ok(())
}

/// Verify login credentials; None on unknown user or wrong password
pub async fn verify_credentials(username: &str, password_input: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("La cuenta está desactivada"));
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Hash de contraseña no encontrado"))?;

    if !password::verify_password(password_input, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&user.id).await;

    Ok(Some(user))
}
