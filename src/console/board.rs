//! Generic listing board for plain (un-enriched) resource tables —
//! doctors, insurers, patients, users.

use serde::de::DeserializeOwned;

use crate::backend::{FetchError, ResourceClient, Transport};

/// Listing controller: holds the rows of the last successful full refetch
/// and a modal-open flag for the child form.
pub struct Board<T, R> {
    client: ResourceClient<T, R>,
    rows: Vec<T>,
    form_open: bool,
}

impl<T, R> Board<T, R>
where
    T: DeserializeOwned,
    R: Transport,
{
    pub fn new(client: ResourceClient<T, R>) -> Self {
        Self {
            client,
            rows: Vec::new(),
            form_open: false,
        }
    }

    /// Full list refetch. Repeated calls are not deduplicated or debounced;
    /// each runs its own fetch. A failed load leaves an empty board, never
    /// a blocked screen.
    pub async fn refresh(&mut self) {
        self.rows = self.client.list_all().await;
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Child-form success callback: close the modal and refetch everything.
    /// Never a local patch/merge of the changed record.
    pub async fn on_form_saved(&mut self) {
        self.form_open = false;
        self.refresh().await;
    }

    /// Delete a record, then refetch. Errors propagate so the view can
    /// show them; the board keeps its last rows on failure.
    pub async fn delete(&mut self, id: i64) -> Result<(), FetchError> {
        self.client.delete(id).await?;
        self.refresh().await;
        Ok(())
    }
}
