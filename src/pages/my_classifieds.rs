use classifieds_ui_state::ModalState;

use crate::classifieds::{Classified, ClassifiedsClient};
use crate::error::{Error, Result};
use crate::events::PlatformEvent;
use crate::feed::{ListingFeed, LoadOutcome};
use crate::pages::{ListingTab, MineSource};
use crate::settings::{relabel_currency, Settings};
use crate::types::ClassifiedId;

/// Listing management for the signed-in user
pub struct MyClassifiedsPage {
    feed: ListingFeed<MineSource>,
    classifieds: ClassifiedsClient,
    tab: ListingTab,
    delete_modal: ModalState,
    pending_delete: Option<ClassifiedId>,
    notice: Option<String>,
}

impl MyClassifiedsPage {
    pub fn new(source: MineSource, page_size: u32) -> Self {
        let classifieds = source.classifieds.clone();
        Self {
            feed: ListingFeed::new(source, page_size),
            classifieds,
            tab: ListingTab::All,
            delete_modal: ModalState::new(),
            pending_delete: None,
            notice: None,
        }
    }

    pub fn tab(&self) -> ListingTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ListingTab) {
        self.tab = tab;
    }

    pub fn visible(&self) -> Vec<&Classified> {
        let tab = self.tab;
        self.feed.state().filtered(|item| tab.matches(item))
    }

    pub fn feed(&self) -> &ListingFeed<MineSource> {
        &self.feed
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref().or_else(|| self.feed.error())
    }

    pub fn delete_modal(&self) -> &ModalState {
        &self.delete_modal
    }

    pub async fn load(&mut self) -> LoadOutcome {
        self.feed.load().await
    }

    pub async fn on_identity_changed(&mut self) -> LoadOutcome {
        self.pending_delete = None;
        self.delete_modal.close();
        self.feed.on_identity_changed().await
    }

    pub fn on_settings_changed(&mut self, settings: &Settings) {
        relabel_currency(self.feed.state_mut().items_mut(), settings.currency);
    }

    pub async fn handle(&mut self, event: &PlatformEvent) -> Option<LoadOutcome> {
        match event {
            PlatformEvent::SentinelVisible => self.feed.on_sentinel_visible().await,
            PlatformEvent::PopState => Some(self.feed.on_history_navigation().await),
            PlatformEvent::KeyDown(key) => {
                if self.delete_modal.handle_key(key) {
                    self.pending_delete = None;
                }
                None
            }
            PlatformEvent::Resize { .. } => None,
        }
    }

    /// Show or hide a listing. Only its active flag changes locally, and only
    /// to what the server returned.
    pub async fn set_active(&mut self, id: ClassifiedId, active: bool) -> Result<()> {
        match self.classifieds.set_active(id, active).await {
            Ok(updated) => {
                self.notice = None;
                self.feed
                    .state_mut()
                    .update(&id, |item| item.is_active = updated.is_active);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to change listing {}: {}", id, e);
                self.notice = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Open the confirmation modal for deleting `id`
    pub fn ask_delete(&mut self, id: ClassifiedId) {
        self.pending_delete = Some(id);
        self.delete_modal.open();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.delete_modal.close();
    }

    /// Delete the listing the modal was opened for
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let id = self
            .pending_delete
            .filter(|_| self.delete_modal.is_open())
            .ok_or_else(|| Error::validation("Nothing to delete"))?;

        match self.classifieds.delete(id).await {
            Ok(()) => {
                self.notice = None;
                self.feed.state_mut().remove(&id);
                self.cancel_delete();
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete listing {}: {}", id, e);
                self.notice = Some(e.user_message());
                Err(e)
            }
        }
    }
}
