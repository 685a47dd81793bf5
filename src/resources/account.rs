use crate::api::endpoints::ACCOUNT_PROFILE;
use crate::api::executor::{Executor, NoBody};
use crate::error::Result;
use crate::resources::JsonObject;
use crate::transport::HttpTransport;

pub struct Account<'a, T> {
    executor: &'a Executor<T>,
}

impl<'a, T: HttpTransport> Account<'a, T> {
    pub(crate) fn new(executor: &'a Executor<T>) -> Self {
        Self { executor }
    }

    /// Profile of the account the credentials belong to.
    pub async fn profile(&self) -> Result<JsonObject> {
        self.executor.call::<NoBody, _>(&ACCOUNT_PROFILE, &[], None).await
    }
}
