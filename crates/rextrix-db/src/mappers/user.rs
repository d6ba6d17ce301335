//! User model -> entity

use rextrix_core::{DomainError, Snowflake, User};

use super::parse_column;
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: Snowflake::new(model.id),
            email: model.email,
            user_type: parse_column("user_type", &model.user_type)?,
            status: parse_column("status", &model.status)?,
            display_name: model.display_name,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
