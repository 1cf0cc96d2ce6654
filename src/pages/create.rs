use classifieds_ui_state::{Direction, ImageList, ImageSource, TagSet};
use std::path::Path;

use crate::classifieds::{Classified, ClassifiedsClient, NewClassified};
use crate::error::{Error, Result};
use crate::files::PendingFile;
use crate::forms::{ClassifiedFields, FormSnapshot, FormStateChannel, SubmitRequests};
use crate::pages::Route;
use crate::settings::SettingsStore;
use crate::tags::{Tag, TagsClient};
use crate::types::{ClassifiedId, Currency};

/// The classified creation (and editing) form.
///
/// Every change republishes a [`FormSnapshot`] on the page's
/// [`FormStateChannel`], which is how a submit button elsewhere on screen
/// learns whether publishing is allowed.
pub struct CreateClassifiedPage {
    classifieds: ClassifiedsClient,
    tags_client: TagsClient,
    channel: FormStateChannel,
    requests: SubmitRequests,
    fields: ClassifiedFields,
    tags: TagSet,
    known_tags: Vec<Tag>,
    images: ImageList<PendingFile>,
    editing: Option<ClassifiedId>,
    submitting: bool,
    error: Option<String>,
    created: Option<Classified>,
}

impl CreateClassifiedPage {
    pub fn new(classifieds: ClassifiedsClient, tags_client: TagsClient, settings: &SettingsStore) -> Self {
        let (channel, requests) = FormStateChannel::new();
        let mut page = Self {
            classifieds,
            tags_client,
            channel,
            requests,
            fields: ClassifiedFields {
                currency: settings.currency(),
                city: settings.get().city,
                ..Default::default()
            },
            tags: TagSet::new(),
            known_tags: Vec::new(),
            images: ImageList::new(),
            editing: None,
            submitting: false,
            error: None,
            created: None,
        };
        page.sync();
        page
    }

    /// Opens the form on an existing listing
    pub fn for_edit(
        classifieds: ClassifiedsClient,
        tags_client: TagsClient,
        settings: &SettingsStore,
        existing: &Classified,
    ) -> Self {
        let mut page = Self::new(classifieds, tags_client, settings);
        page.editing = Some(existing.id);
        page.fields = ClassifiedFields {
            title: existing.title.clone(),
            description: existing.description.clone(),
            price: existing.price.to_string(),
            currency: existing.currency,
            city: existing.city.clone(),
        };
        for tag in &existing.tags {
            if let Err(e) = page.tags.insert(tag) {
                log::warn!("Dropping tag {:?} of listing {}: {}", tag, existing.id, e);
            }
        }
        page.images = ImageList::from_remote(existing.images.iter().cloned());
        page.sync();
        page
    }

    /// Handle for the submit button
    pub fn channel(&self) -> FormStateChannel {
        self.channel.clone()
    }

    pub fn fields(&self) -> &ClassifiedFields {
        &self.fields
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn images(&self) -> &ImageList<PendingFile> {
        &self.images
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The listing the last successful submit produced
    pub fn created(&self) -> Option<&Classified> {
        self.created.as_ref()
    }

    pub fn publish_disabled(&self) -> bool {
        self.channel.publish_disabled()
    }

    pub fn set_title(&mut self, title: &str) {
        self.fields.title = title.to_string();
        self.sync();
    }

    pub fn set_description(&mut self, description: &str) {
        self.fields.description = description.to_string();
        self.sync();
    }

    pub fn set_price(&mut self, price: &str) {
        self.fields.price = price.to_string();
        self.sync();
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.fields.currency = currency;
        self.sync();
    }

    pub fn set_city(&mut self, city: Option<String>) {
        self.fields.city = city;
        self.sync();
    }

    /// Adds a tag. Returns `false` for a tag that was already chosen.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool> {
        match self.tags.insert(tag) {
            Ok(added) => {
                self.error = None;
                Ok(added)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(Error::validation(e))
            }
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Fetch the known tags used for recommendations
    pub async fn load_tags(&mut self) -> Result<()> {
        match self.tags_client.list().await {
            Ok(tags) => {
                self.known_tags = tags;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load tags: {}", e);
                Err(e)
            }
        }
    }

    /// Known tags not chosen yet
    pub fn recommended_tags(&self) -> Vec<&str> {
        self.tags
            .recommended(self.known_tags.iter().map(|tag| tag.name.as_str()))
    }

    /// Attaches a selected file. Anything that is not an image is refused
    /// with an inline message.
    pub fn attach(&mut self, file: PendingFile) -> Result<usize> {
        if !file.is_image() {
            let message = format!("{} is not an image", file.file_name);
            self.error = Some(message.clone());
            return Err(Error::validation(message));
        }

        let preview = file.preview_url();
        let index = self.images.push_pending(preview, file);
        self.images.mark_ready(index);
        self.error = None;
        self.sync();
        Ok(index)
    }

    pub async fn attach_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let file = PendingFile::from_path(path).await?;
        self.attach(file)
    }

    pub fn shift_image(&mut self, index: usize, direction: Direction) {
        self.images.shift(index, direction);
        self.sync();
    }

    /// Drag and drop
    pub fn move_image(&mut self, from: usize, to: usize) {
        self.images.move_to(from, to);
        self.sync();
    }

    pub fn delete_image(&mut self, index: usize) {
        self.images.delete(index);
        self.sync();
    }

    /// Make the image at `index` the main one
    pub fn promote_image(&mut self, index: usize) {
        self.images.promote(index);
        self.sync();
    }

    /// Submits the form.
    ///
    /// While publishing is disabled nothing is sent. On success the
    /// attachments are discarded and the caller should navigate to the
    /// returned route; on failure everything entered is kept.
    pub async fn submit(&mut self) -> Result<Route> {
        if self.submitting {
            return Err(Error::validation("Already submitting"));
        }
        if self.publish_disabled() {
            let message = "Fill in all required fields and add at least one image";
            self.error = Some(message.to_string());
            return Err(Error::validation(message));
        }

        let classified = NewClassified {
            title: self.fields.title.trim().to_string(),
            description: self.fields.description.trim().to_string(),
            price: self.fields.price_value()?,
            currency: self.fields.currency,
            city: self.fields.city.clone(),
            tags: self.tags.to_vec(),
            images: self.images.sources().into_iter().cloned().collect(),
        };

        self.submitting = true;
        self.error = None;
        let result = match self.editing {
            Some(id) => self.classifieds.update(id, &classified).await,
            None => self.classifieds.create(&classified).await,
        };
        self.submitting = false;

        match result {
            Ok(created) => {
                log::info!("Saved listing {}", created.id);
                self.created = Some(created);
                self.images.clear();
                self.tags.clear();
                self.fields = ClassifiedFields {
                    currency: self.fields.currency,
                    city: self.fields.city.clone(),
                    ..Default::default()
                };
                self.editing = None;
                self.sync();
                Ok(Route::MyClassifieds)
            }
            Err(e) => {
                log::error!("Failed to save listing: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Runs a submit queued by the submit button, if there is one
    pub async fn process_submit_request(&mut self) -> Option<Result<Route>> {
        self.requests.try_next()?;
        Some(self.submit().await)
    }

    fn sync(&mut self) {
        let images: Vec<ImageSource<PendingFile>> =
            self.images.sources().into_iter().cloned().collect();
        self.channel.publish(FormSnapshot {
            valid: self.fields.is_valid(),
            images,
            fields: self.fields.clone(),
        });
    }
}
