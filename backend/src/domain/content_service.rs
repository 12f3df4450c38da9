//! Content publishing and engagement service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{ContentRepository, ContentService, ProfileRepository};
use crate::domain::service_errors::{map_content_error, map_profile_error};
use crate::domain::{
    Actor, Content, ContentCounters, ContentDraft, CounterChange, Error, NewContent,
};

#[derive(Clone)]
pub struct ContentServiceImpl<C, P> {
    content: Arc<C>,
    profiles: Arc<P>,
}

impl<C, P> ContentServiceImpl<C, P> {
    pub fn new(content: Arc<C>, profiles: Arc<P>) -> Self {
        Self { content, profiles }
    }
}

#[async_trait]
impl<C, P> ContentService for ContentServiceImpl<C, P>
where
    C: ContentRepository,
    P: ProfileRepository,
{
    async fn create(&self, actor: &Actor, draft: ContentDraft) -> Result<Content, Error> {
        if !actor.is_performer() {
            return Err(Error::forbidden("only performers can post content"));
        }
        let profile = self
            .profiles
            .find_by_id(&draft.profile_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("Profile not found"))?;
        if profile.user_id != actor.id {
            return Err(Error::forbidden("profile belongs to another performer"));
        }

        let new_content = NewContent::from_draft(actor.id, draft)
            .map_err(|err| Error::invalid_request(format!("invalid content: {err}")))?;
        let content = self
            .content
            .insert(&new_content)
            .await
            .map_err(map_content_error)?;
        info!(content_id = %content.id, profile_id = %content.profile_id, "content published");
        Ok(content)
    }

    async fn list(&self, actor: &Actor, profile_id: Option<Uuid>) -> Result<Vec<Content>, Error> {
        if actor.is_performer() {
            let profile = self
                .profiles
                .find_by_user(&actor.id)
                .await
                .map_err(map_profile_error)?
                .ok_or_else(|| Error::not_found("Profile not found"))?;
            return self
                .content
                .list_by_profile(&profile.id, true)
                .await
                .map_err(map_content_error);
        }

        let profile_id =
            profile_id.ok_or_else(|| Error::invalid_request("profileId is required"))?;
        self.content
            .list_by_profile(&profile_id, false)
            .await
            .map_err(map_content_error)
    }

    async fn delete(&self, actor: &Actor, id: &Uuid) -> Result<(), Error> {
        if !actor.is_performer() {
            return Err(Error::forbidden("only performers can delete content"));
        }
        let content = self
            .content
            .find_by_id(id)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| Error::not_found("Content not found"))?;
        if content.user_id != actor.id {
            return Err(Error::forbidden("content belongs to another performer"));
        }
        let removed = self.content.delete(id).await.map_err(map_content_error)?;
        if !removed {
            return Err(Error::not_found("Content not found"));
        }
        info!(content_id = %id, "content deleted");
        Ok(())
    }

    async fn engage(
        &self,
        actor: &Actor,
        id: &Uuid,
        change: CounterChange,
    ) -> Result<ContentCounters, Error> {
        if !actor.is_client() {
            return Err(Error::forbidden("only clients can view or like content"));
        }
        self.content
            .apply_counter(id, change)
            .await
            .map_err(map_content_error)?
            .ok_or_else(|| Error::not_found("Content not found"))
    }
}

#[cfg(test)]
#[path = "content_service_tests.rs"]
mod tests;
