use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::client::api::{ApiError, CvApi};
use crate::i18n::Catalog;
use crate::store::FormStore;

/// Where the user lands when there is no CV to edit.
pub const CREATE_ENTRY_PATH: &str = "/cvgen";
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Loaded { user_id: Uuid },
    NotFound { redirect: Redirect },
    Failed { message: String },
}

impl EditState {
    /// Banner text for the non-loaded states.
    pub fn user_message(&self, catalog: &Catalog) -> Option<String> {
        match self {
            EditState::Loaded { .. } => None,
            EditState::NotFound { .. } => Some(catalog.t("edit.notFound")),
            EditState::Failed { .. } => Some(catalog.t("edit.fetchFailed")),
        }
    }
}

/// Fetches the user's CV and loads it into the store for editing.
///
/// A missing CV schedules nothing by itself: the caller gets a
/// [`EditState::NotFound`] with the redirect to perform, usually through
/// [`schedule_redirect`].
pub async fn load_for_edit(
    api: &dyn CvApi,
    store: &FormStore,
    user_id: Uuid,
    redirect_delay: Duration,
) -> EditState {
    match api.fetch_cv(user_id).await {
        Ok(fetched) => {
            info!(user_id = %fetched.user_id, "Loaded CV for editing");
            store.replace_form_data(fetched.cv).await;
            store.set_user_id(Some(fetched.user_id)).await;
            store.set_progress(None).await;
            store.clear_form_errors();
            EditState::Loaded { user_id: fetched.user_id }
        }
        Err(ApiError::NotFound) => {
            warn!(%user_id, "No CV to edit; redirecting to creation");
            EditState::NotFound {
                redirect: Redirect {
                    to: CREATE_ENTRY_PATH.to_string(),
                    after: redirect_delay,
                },
            }
        }
        Err(e) => {
            error!(%user_id, error = %e, "Failed to fetch CV");
            EditState::Failed { message: e.to_string() }
        }
    }
}

/// Runs `navigate` once the redirect delay elapsed. Aborting the handle
/// (e.g. the page went away) cancels the redirect.
pub fn schedule_redirect<F>(redirect: Redirect, navigate: F) -> JoinHandle<()>
where
    F: FnOnce(String) + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(redirect.after).await;
        navigate(redirect.to);
    })
}
