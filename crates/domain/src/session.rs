use log::warn;

use crate::{ReadError, User, UserID};

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn get_current_user(&self) -> Result<Option<User>, ReadError>;

    /// Identifier of the signed-in user, or [`UserID::nil`] if there is none.
    async fn get_current_user_id(&self) -> UserID {
        match self.get_current_user().await {
            Ok(Some(user)) => user.id,
            Ok(None) => UserID::nil(),
            Err(err) => {
                warn!("falling back to anonymous user: {err}");
                UserID::nil()
            }
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_current_user(&self) -> Result<Option<User>, ReadError>;
}
