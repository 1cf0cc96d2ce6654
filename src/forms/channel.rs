//! Shared readiness state between the creation form and its submit button.
//!
//! The image list and the field validation each publish their slice into one
//! [`FormSnapshot`]. The submit button lives elsewhere in the page and only
//! talks to the [`FormStateChannel`]: it reads the derived publish-disabled
//! flag and sends [`SubmitRequest`]s back to whoever owns the form.

use classifieds_ui_state::ImageSource;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::error::{Error, Result};
use crate::files::PendingFile;
use crate::forms::ClassifiedFields;

/// Everything the submit button needs to know about the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    /// All required fields are valid
    pub valid: bool,
    /// Attached images in display order
    pub images: Vec<ImageSource<PendingFile>>,
    pub fields: ClassifiedFields,
}

impl FormSnapshot {
    pub fn publish_disabled(&self) -> bool {
        !(self.valid && !self.images.is_empty())
    }
}

/// A request from the submit button to submit the form as it was seen
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub snapshot: FormSnapshot,
}

/// Receiving half of the submit queue, held by the form owner
pub struct SubmitRequests {
    rx: mpsc::UnboundedReceiver<SubmitRequest>,
}

impl SubmitRequests {
    /// Next pending request without waiting
    pub fn try_next(&mut self) -> Option<SubmitRequest> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next request. `None` once every channel handle is gone.
    pub async fn next(&mut self) -> Option<SubmitRequest> {
        self.rx.recv().await
    }
}

/// Cloneable handle to the form state
#[derive(Clone)]
pub struct FormStateChannel {
    state: Arc<watch::Sender<FormSnapshot>>,
    submit: mpsc::UnboundedSender<SubmitRequest>,
}

impl FormStateChannel {
    pub fn new() -> (Self, SubmitRequests) {
        let (state, _) = watch::channel(FormSnapshot::default());
        let (submit, rx) = mpsc::unbounded_channel();
        let channel = Self {
            state: Arc::new(state),
            submit,
        };
        (channel, SubmitRequests { rx })
    }

    /// Stores `snapshot`. Publishing an unchanged snapshot does nothing and
    /// returns `false`, so subscribers that republish cannot loop.
    pub fn publish(&self, snapshot: FormSnapshot) -> bool {
        self.state.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            let was_disabled = current.publish_disabled();
            *current = snapshot;
            if was_disabled != current.publish_disabled() {
                log::debug!("Publish disabled: {}", current.publish_disabled());
            }
            true
        })
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().clone()
    }

    pub fn publish_disabled(&self) -> bool {
        self.state.borrow().publish_disabled()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.state.subscribe()
    }

    /// Queues a submit of the current snapshot. Refused while publishing is
    /// disabled.
    pub fn request_submit(&self) -> Result<()> {
        let snapshot = self.snapshot();
        if snapshot.publish_disabled() {
            return Err(Error::validation(
                "Fill in all required fields and add at least one image",
            ));
        }
        self.submit
            .send(SubmitRequest { snapshot })
            .map_err(|_| Error::general("The form is no longer open"))
    }
}
