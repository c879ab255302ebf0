use voltdesk_core::{AppError, AppResult};

use crate::{USER_NO_PICTURE, UserImage};

use super::*;

impl UserEditor {
    /// Loads the tracked record and repopulates the surface.
    ///
    /// The image fetch starts only after the record fetch resolved; the
    /// refund slices load alongside it with no ordering between them, each
    /// writing its own slice. Image and refund failures are logged and the
    /// load still succeeds; a missing record fails with `NotFound` after
    /// surfacing the message. Every invocation fully replaces prior state.
    pub async fn load(&mut self) -> AppResult<()> {
        let Some(user_id) = self.current_user_id.clone() else {
            return Ok(());
        };

        let user = match self.users.fetch_user(&user_id).await {
            Ok(user) => user,
            Err(error) => {
                let message_key = match &error {
                    AppError::NotFound(_) => "users.user_not_found",
                    _ => "general.unexpected_error_backend",
                };
                self.messenger
                    .error(message_key, Some(error.to_string()))
                    .await;
                return Err(error);
            }
        };

        self.form.bind_from_entity(&user);
        self.user = Some(user);

        let (image, refund) = tokio::join!(
            self.users.fetch_user_image(&user_id),
            self.fetch_refund_slices(&user_id),
        );
        self.apply_image(image);
        self.apply_refund_slices(refund);
        self.form.mark_pristine();

        Ok(())
    }

    /// Reloads the tracked record.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.load().await
    }

    fn apply_image(&mut self, fetched: AppResult<Option<UserImage>>) {
        let image = match fetched {
            Ok(Some(UserImage {
                image: Some(image), ..
            })) if !image.is_empty() => image,
            Ok(_) => USER_NO_PICTURE.to_owned(),
            Err(error) => {
                tracing::warn!(error = %error, "user image fetch failed, using placeholder");
                USER_NO_PICTURE.to_owned()
            }
        };
        self.form.set_loaded_image(image);
    }
}
