use chrono::Utc;
use sensei_context::PageFetcher;
use sensei_llm::{ChatClient, Message};
use sensei_persist::{HistoryStore, ThreadMetadata, Turn};
use sensei_search::SearchClient;
use sensei_types::{
    Category, EventSender, ModelsConfig, NewThreadInfo, SearchResultSet, TurnConfig, TurnEvent,
    TurnInput, TurnMetadata,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::builder::OrchestratorBuilder;
use crate::error::TurnError;
use crate::slug::{create_slug, thread_name};
use crate::{answer, enrichment, history, media, related};

/// Runs one conversational search turn end to end.
///
/// Cheap to clone; every collaborator is shared behind an `Arc`.
#[derive(Clone)]
pub struct Orchestrator {
    fast: Arc<dyn ChatClient>,
    capable: Arc<dyn ChatClient>,
    search: Arc<dyn SearchClient>,
    pages: Arc<dyn PageFetcher>,
    store: Arc<dyn HistoryStore>,
    models: ModelsConfig,
    config: TurnConfig,
}

impl Orchestrator {
    pub(crate) fn new(
        fast: Arc<dyn ChatClient>,
        capable: Arc<dyn ChatClient>,
        search: Arc<dyn SearchClient>,
        pages: Arc<dyn PageFetcher>,
        store: Arc<dyn HistoryStore>,
        models: ModelsConfig,
        config: TurnConfig,
    ) -> Self {
        Self {
            fast,
            capable,
            search,
            pages,
            store,
            models,
            config,
        }
    }

    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    pub fn store(&self) -> &Arc<dyn HistoryStore> {
        &self.store
    }

    /// Run the turn on a background task and return its event stream.
    ///
    /// A failed turn ends with exactly one `app_error` event; the receiver
    /// closes when the turn is over.
    pub fn spawn_run(&self, input: TurnInput) -> mpsc::Receiver<TurnEvent> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let orchestrator = self.clone();

        tokio::spawn(async move {
            let thread_id = input.thread_id.clone();

            if let Err(e) = orchestrator.run(input, tx.clone()).await {
                match &e {
                    TurnError::AccessDenied { user_id, .. } => {
                        tracing::warn!(thread_id = %thread_id, user_id = %user_id, "Access denied");
                    }
                    TurnError::ChannelClosed => {
                        tracing::warn!(thread_id = %thread_id, "Client went away, turn abandoned");
                        return;
                    }
                    _ => {
                        tracing::error!(thread_id = %thread_id, "Turn failed: {:#}", e);
                    }
                }

                let _ = tx.send(TurnEvent::app_error(e.client_message())).await;
            }
        });

        rx
    }

    /// Run one turn, emitting events on `event_tx` as they become available.
    pub async fn run(&self, input: TurnInput, event_tx: EventSender) -> Result<(), TurnError> {
        let TurnInput {
            thread_id,
            user_id,
            query,
        } = input;
        let started = Instant::now();
        tracing::info!(thread_id = %thread_id, "Turn started");

        let (recent, existing) = tokio::join!(
            self.store
                .load_recent_turns(&thread_id, self.config.history_window),
            self.store.get_thread_metadata(&thread_id),
        );

        let existing = existing?;
        if let Some(metadata) = &existing {
            if !metadata.is_owned_by(&user_id) {
                return Err(TurnError::AccessDenied { thread_id, user_id });
            }
        }

        let recent = recent.unwrap_or_else(|e| {
            tracing::warn!(thread_id = %thread_id, "Failed to load history, continuing without it: {}", e);
            Vec::new()
        });

        let mut messages = history::to_messages(&recent, self.config.include_assistant_history);
        messages.push(Message::human(query.as_str()));
        let now = Utc::now();

        let enriched = enrichment::enrich(
            self.fast.as_ref(),
            &self.models.fast,
            &messages,
            &query,
            self.config.classify_queries,
            now,
        )
        .await?;

        let turn_metadata = enriched
            .tags
            .as_ref()
            .map(TurnMetadata::from)
            .unwrap_or_default();

        let results = if enriched.needs_search() {
            let (results, sent) = tokio::join!(
                self.search.search(&enriched.search_query, &[Category::General]),
                event_tx.send(TurnEvent::Metadata(turn_metadata)),
            );
            sent?;
            results?
        } else {
            tracing::info!(thread_id = %thread_id, "No search needed");
            SearchResultSet::empty()
        };

        let web_results = results.web_results();
        let top = &results.general[..results.general.len().min(self.config.top_k_pages)];

        let (sent, pages) = tokio::join!(
            event_tx.send(TurnEvent::WebResults(web_results.clone())),
            self.pages.fetch_pages(top),
        );
        sent?;

        let answer = answer::stream_answer(
            self.capable.as_ref(),
            &self.models.capable,
            &messages,
            &query,
            &pages,
            now,
            &event_tx,
        );

        let mediums = async {
            let tags = match enriched.tags {
                Some(tags) => tags,
                None => {
                    media::classify_media(self.fast.as_ref(), &self.models.fast, &messages, &query)
                        .await
                }
            };
            let mediums = media::fetch_media(self.search.as_ref(), &enriched.search_query, &tags)
                .await
                .mediums();
            event_tx
                .send(TurnEvent::MediumResults(mediums.clone()))
                .await?;
            Ok::<_, TurnError>(mediums)
        };

        let related_questions = related::gen_related(
            self.fast.as_ref(),
            &self.models.fast,
            &query,
            &pages,
            self.config.related_context_chars,
            self.config.max_related_questions,
        );

        let (answer, mediums, related_questions) = tokio::join!(answer, mediums, related_questions);
        let answer = answer?;
        let mediums = mediums?;

        event_tx
            .send(TurnEvent::RelatedQuestions(related_questions.clone()))
            .await?;

        if existing.is_none() {
            let metadata = ThreadMetadata {
                thread_id: thread_id.clone(),
                name: thread_name(&query, self.config.thread_name_chars),
                user_id: user_id.clone(),
                created_at: Utc::now(),
                slug: create_slug(&query),
                related_questions,
            };
            let info = NewThreadInfo {
                created_at: metadata.created_at,
                slug: metadata.slug.clone(),
                name: metadata.name.clone(),
            };

            let (sent, saved) = tokio::join!(
                event_tx.send(TurnEvent::ThreadMetadata(info)),
                self.store.save_thread_metadata(&metadata),
            );
            if let Err(e) = saved {
                tracing::error!(thread_id = %thread_id, slug = %metadata.slug, "Failed to save thread metadata: {}", e);
            }
            sent?;
        }

        let turn = Turn::new(thread_id.as_str(), query.as_str(), answer)
            .with_web_results(web_results)
            .with_mediums(mediums)
            .with_metadata(Some(turn_metadata));

        if let Err(e) = self.store.append_turn(turn).await {
            tracing::error!(thread_id = %thread_id, "Failed to save turn: {}", e);
        }

        tracing::info!(
            thread_id = %thread_id,
            duration_ms = started.elapsed().as_millis() as u64,
            "Turn completed"
        );
        Ok(())
    }
}
