//! Async driver for a comment thread.
//!
//! The thread itself is synchronous and hands out render tickets. The
//! controller renders them without holding the lock and feeds the results
//! back; results that were superseded in the meantime are dropped by the
//! thread.

use crate::model::{
    CommentBody, CommentEditId, CommentThread, CommentUser, RawComment, RenderTicket, ThreadError,
};
use crate::render::CommentRenderer;
use crate::traits::AvatarProvider;
use futures::future::join_all;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

/// Drives a [`CommentThread`] with a renderer and an avatar provider.
#[derive(Clone)]
pub struct ThreadController {
    thread: Arc<TokioMutex<CommentThread>>,
    renderer: Arc<CommentRenderer>,
    avatars: Arc<dyn AvatarProvider>,
}

impl ThreadController {
    pub fn new(
        thread: CommentThread,
        renderer: Arc<CommentRenderer>,
        avatars: Arc<dyn AvatarProvider>,
    ) -> Self {
        Self {
            thread: Arc::new(TokioMutex::new(thread)),
            renderer,
            avatars,
        }
    }

    /// Shared handle to the thread, for reading its state.
    pub fn thread(&self) -> Arc<TokioMutex<CommentThread>> {
        Arc::clone(&self.thread)
    }

    /// Append a persisted comment, render its body and resolve its avatar.
    pub async fn add_comment(&self, raw: RawComment) -> Result<CommentEditId, ThreadError> {
        let user = raw.user.clone();
        let ticket = self.thread.lock().await.push(raw)?;
        let id = ticket.edit_id;

        if let Some(user) = user {
            self.resolve_avatar(id, &user).await;
        }
        self.render(vec![ticket]).await;
        Ok(id)
    }

    /// Replace the snapshot of a persisted comment.
    pub async fn update_comment(&self, raw: RawComment) -> Result<(), ThreadError> {
        let ticket = self.thread.lock().await.update_comment(raw)?;
        self.render(ticket.into_iter().collect()).await;
        Ok(())
    }

    pub async fn start_edit(&self, id: CommentEditId) -> Result<(), ThreadError> {
        self.thread.lock().await.start_edit(id)
    }

    pub async fn cancel_edit(&self, id: CommentEditId) -> Result<(), ThreadError> {
        let tickets = self.thread.lock().await.cancel_edit(id)?;
        self.render(tickets).await;
        Ok(())
    }

    pub async fn set_body(&self, id: CommentEditId, body: CommentBody) -> Result<(), ThreadError> {
        let ticket = self.thread.lock().await.set_body(id, body)?;
        self.render(ticket.into_iter().collect()).await;
        Ok(())
    }

    /// Show a placeholder for a reply being posted.
    pub async fn begin_reply(
        &self,
        input: String,
        is_draft: bool,
        current_user: &CommentUser,
    ) -> CommentEditId {
        self.thread
            .lock()
            .await
            .begin_reply(input, is_draft, current_user)
    }

    /// Show a placeholder while an edit of `id` is being saved.
    pub async fn begin_edit(
        &self,
        id: CommentEditId,
        input: String,
        current_user: &CommentUser,
    ) -> Result<CommentEditId, ThreadError> {
        self.thread.lock().await.begin_edit(id, input, current_user)
    }

    /// Replace a placeholder with the comment the server returned.
    pub async fn complete_temporary(
        &self,
        id: CommentEditId,
        raw: RawComment,
    ) -> Result<CommentEditId, ThreadError> {
        let user = raw.user.clone();
        let persisted_id = CommentEditId::Persisted(raw.id);
        let ticket = self.thread.lock().await.complete_temporary(id, raw)?;

        if let Some(user) = user {
            self.resolve_avatar(persisted_id, &user).await;
        }
        self.render(ticket.into_iter().collect()).await;
        Ok(persisted_id)
    }

    pub async fn abort_temporary(&self, id: CommentEditId) -> Result<(), ThreadError> {
        self.thread.lock().await.abort_temporary(id)
    }

    /// Render tickets concurrently and apply the results.
    async fn render(&self, tickets: Vec<RenderTicket>) {
        if tickets.is_empty() {
            return;
        }

        let rendered = join_all(
            tickets
                .iter()
                .map(|ticket| self.renderer.render(&ticket.request)),
        )
        .await;

        let mut thread = self.thread.lock().await;
        for (ticket, body) in tickets.iter().zip(rendered) {
            thread.apply_rendered(ticket.edit_id, ticket.generation, body);
        }
    }

    async fn resolve_avatar(&self, id: CommentEditId, user: &CommentUser) {
        let Some(icon) = self.avatars.avatars(user).await.into_iter().next() else {
            return;
        };

        if let Err(e) = self.thread.lock().await.set_author_icon(id, Some(icon)) {
            debug!("Skipping avatar for {}: {}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentView, DisplayBody, TemporaryIdPool};
    use crate::traits::{
        EmojiCache, GitHubAvatarProvider, LookupError, NoOpAvatarProvider, NoOpObserver,
        RemoteRepository,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    /// Answers after a delay, so renders that need it finish last.
    struct SlowRepository;

    #[async_trait]
    impl RemoteRepository for SlowRepository {
        fn host(&self) -> &str {
            "github.com"
        }

        fn owner(&self) -> &str {
            "octocat"
        }

        fn repository_name(&self) -> &str {
            "hello"
        }

        async fn get_lines(
            &self,
            _sha: &str,
            _path: &str,
            _start_line: u32,
            _end_line: u32,
        ) -> Result<Option<String>, LookupError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(Some("fn main() {}".to_string()))
        }
    }

    fn user() -> CommentUser {
        CommentUser {
            login: "alice".to_string(),
            url: "https://github.com/alice".to_string(),
            avatar_url: Some("https://avatars.example.com/u/1".to_string()),
            special_display_name: None,
        }
    }

    fn raw(id: u64, body: &str) -> RawComment {
        RawComment {
            id,
            body: body.to_string(),
            user: Some(user()),
            created_at: Utc::now(),
            is_draft: false,
            can_edit: true,
            can_delete: true,
            reactions: None,
            special_display_body_postfix: None,
        }
    }

    fn controller(avatars: Arc<dyn AvatarProvider>) -> ThreadController {
        let renderer = CommentRenderer::new(Arc::new(EmojiCache::default()))
            .with_repository(Arc::new(SlowRepository));
        let thread = CommentThread::new(
            "thread-1",
            "src/lib.rs",
            Arc::new(NoOpObserver),
            TemporaryIdPool::new(),
        );
        ThreadController::new(thread, Arc::new(renderer), avatars)
    }

    async fn preview(controller: &ThreadController, id: CommentEditId) -> String {
        let thread = controller.thread();
        let thread = thread.lock().await;
        match thread.get(id).map(|comment| comment.body()) {
            Some(DisplayBody::Markdown(text)) => text.to_string(),
            other => panic!("expected markdown body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_comment_renders_and_sets_avatar() {
        let controller = controller(Arc::new(GitHubAvatarProvider::new(40)));
        let id = controller.add_comment(raw(1, "hi :tada:")).await.unwrap();

        assert_eq!(id, CommentEditId::Persisted(1));
        assert_eq!(preview(&controller, id).await, "hi 🎉");

        let thread = controller.thread();
        let thread = thread.lock().await;
        let author = thread.get(id).unwrap().author();
        assert_eq!(
            author.icon.as_deref(),
            Some("https://avatars.example.com/u/1?s=40")
        );
    }

    #[tokio::test]
    async fn test_latest_body_wins_over_slower_render() {
        let controller = controller(Arc::new(NoOpAvatarProvider));
        let id = controller.add_comment(raw(1, "first")).await.unwrap();

        let slow = format!(
            "see https://github.com/octocat/hello/blob/{}/src/main.rs#L1",
            SHA
        );
        let (first, second) = tokio::join!(
            controller.set_body(id, CommentBody::Plain(slow)),
            controller.set_body(id, CommentBody::Plain("final".to_string())),
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(preview(&controller, id).await, "final");
    }

    #[tokio::test]
    async fn test_cancel_edit_restores_rendered_original() {
        let controller = controller(Arc::new(NoOpAvatarProvider));
        let id = controller.add_comment(raw(1, "original")).await.unwrap();

        controller.start_edit(id).await.unwrap();
        controller
            .set_body(id, CommentBody::Plain("draft".to_string()))
            .await
            .unwrap();
        controller.cancel_edit(id).await.unwrap();

        assert_eq!(preview(&controller, id).await, "original");
    }

    #[tokio::test]
    async fn test_reply_flow() {
        let controller = controller(Arc::new(NoOpAvatarProvider));
        controller.add_comment(raw(1, "question")).await.unwrap();

        let temporary = controller
            .begin_reply("answer".to_string(), false, &user())
            .await;
        assert_eq!(preview(&controller, temporary).await, "answer");

        let persisted = controller
            .complete_temporary(temporary, raw(2, "answer"))
            .await
            .unwrap();
        assert_eq!(persisted, CommentEditId::Persisted(2));

        let thread = controller.thread();
        let thread = thread.lock().await;
        assert_eq!(thread.len(), 2);
        assert!(thread.get(temporary).is_none());
    }

    #[tokio::test]
    async fn test_reply_completed_after_refresh_is_not_duplicated() {
        let controller = controller(Arc::new(NoOpAvatarProvider));
        let temporary = controller
            .begin_reply("answer".to_string(), false, &user())
            .await;
        controller.add_comment(raw(2, "answer")).await.unwrap();

        let persisted = controller
            .complete_temporary(temporary, raw(2, "answer!"))
            .await
            .unwrap();

        assert_eq!(persisted, CommentEditId::Persisted(2));
        assert_eq!(controller.thread().lock().await.len(), 1);
        assert_eq!(preview(&controller, persisted).await, "answer!");
    }

    #[tokio::test]
    async fn test_aborted_edit_restores_original() {
        let controller = controller(Arc::new(NoOpAvatarProvider));
        let id = controller.add_comment(raw(1, "original")).await.unwrap();

        let temporary = controller
            .begin_edit(id, "changed".to_string(), &user())
            .await
            .unwrap();
        controller.abort_temporary(temporary).await.unwrap();

        assert_eq!(preview(&controller, id).await, "original");
    }

    #[tokio::test]
    async fn test_unknown_comment() {
        let controller = controller(Arc::new(NoOpAvatarProvider));
        let missing = CommentEditId::Persisted(9);

        assert_eq!(
            controller.start_edit(missing).await,
            Err(ThreadError::NotFound(missing))
        );
        assert_eq!(
            controller.update_comment(raw(9, "x")).await,
            Err(ThreadError::NotFound(missing))
        );
    }
}
