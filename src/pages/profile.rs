use classifieds_ui_state::ModalState;

use crate::auth::SessionStore;
use crate::error::{Error, Result};
use crate::events::PlatformEvent;
use crate::files::PendingFile;
use crate::forms::ProfileForm;
use crate::pages::Route;
use crate::settings::{Settings, SettingsStore};
use crate::users::{UserProfile, UsersClient};

/// Profile editing, preferences and account deletion
pub struct ProfilePage {
    users: UsersClient,
    session: SessionStore,
    settings: SettingsStore,
    profile: Option<UserProfile>,
    form: ProfileForm,
    delete_modal: ModalState,
    saving: bool,
    error: Option<String>,
}

impl ProfilePage {
    pub fn new(users: UsersClient, session: SessionStore, settings: SettingsStore) -> Self {
        Self {
            users,
            session,
            settings,
            profile: None,
            form: ProfileForm::default(),
            delete_modal: ModalState::new(),
            saving: false,
            error: None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Edit the form in place
    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    pub fn set_avatar(&mut self, avatar: Option<PendingFile>) {
        self.form.avatar = avatar;
    }

    pub fn delete_modal(&self) -> &ModalState {
        &self.delete_modal
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Fetch the profile and adopt its language, currency and city
    pub async fn load(&mut self) -> Result<()> {
        match self.users.me().await {
            Ok(profile) => {
                self.apply(profile);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load profile: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn save(&mut self) -> Result<()> {
        if let Some(first) = self.form.errors().into_iter().next() {
            self.error = Some(first.message.clone());
            return Err(Error::validation(first.message));
        }
        if !self.form.is_dirty() {
            return Ok(());
        }

        self.saving = true;
        let result = self.users.update(&self.form.to_update()).await;
        self.saving = false;

        match result {
            Ok(profile) => {
                self.apply(profile);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save profile: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn ask_delete_account(&mut self) {
        self.delete_modal.open();
    }

    pub fn cancel_delete_account(&mut self) {
        self.delete_modal.close();
    }

    /// Delete the account once the user confirmed in the modal. Signs out on
    /// success.
    pub async fn delete_account(&mut self) -> Result<Route> {
        if !self.delete_modal.is_open() {
            return Err(Error::validation("Confirm account deletion first"));
        }

        match self.users.delete().await {
            Ok(()) => {
                self.delete_modal.close();
                self.session.clear();
                self.profile = None;
                self.form = ProfileForm::default();
                Ok(Route::Home)
            }
            Err(e) => {
                log::error!("Failed to delete account: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn handle(&mut self, event: &PlatformEvent) {
        if let PlatformEvent::KeyDown(key) = event {
            self.delete_modal.handle_key(key);
        }
    }

    /// Preferences changed elsewhere, e.g. the header's currency picker
    pub fn on_settings_changed(&mut self, settings: &Settings) {
        self.form.language = settings.language;
        self.form.currency = settings.currency;
    }

    fn apply(&mut self, profile: UserProfile) {
        let settings = Settings::from_profile(&profile, &self.settings.get());
        self.form = ProfileForm::from_profile(&profile, &settings);
        self.settings.replace(settings);
        self.profile = Some(profile);
    }
}
