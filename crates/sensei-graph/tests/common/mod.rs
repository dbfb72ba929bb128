#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use futures::stream;
use sensei_context::PageFetcher;
use sensei_llm::{ChatClient, ChatRequest, ChatResponse, EventStream, StreamEvent};
use sensei_persist::{HistoryStore, InMemoryHistoryStore, PersistError, ThreadMetadata, Turn};
use sensei_search::{SearchClient, SearchError};
use sensei_types::{Category, SearchResult, SearchResultSet, TurnEvent};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const CLASSIFY_MARKER: &str = "Classify the user's latest query";
pub const REWRITE_MARKER: &str = "Write the single best web search query";
pub const RELATED_MARKER: &str = "follow-up questions";

/// Chat client that answers each kind of request from a script.
///
/// `None` for a non-streaming reply means the provider returned an empty body.
pub struct ScriptedChat {
    pub rewrite: Option<String>,
    pub classification: Option<String>,
    pub related: Option<String>,
    pub answer: Vec<String>,
    pub requests: Mutex<Vec<ChatRequest>>,
    pub streams: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChat {
    pub fn new() -> Self {
        Self {
            rewrite: Some("capital of France".to_string()),
            classification: Some(
                "SEARCH_NEEDED:YES, SEARCH_IMAGE:NO, SEARCH_VIDEO:NO, CONTENT_VIOLATION:NO, MATH:NO"
                    .to_string(),
            ),
            related: Some(
                "1. What is the population of Paris?\n2. When did Paris become the capital?\n3. What are the main landmarks in Paris?\n4. An extra one?"
                    .to_string(),
            ),
            answer: vec![
                "The capital of France ".to_string(),
                "is Paris".to_string(),
                "[1].".to_string(),
            ],
            requests: Mutex::new(Vec::new()),
            streams: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rewrite(mut self, reply: Option<&str>) -> Self {
        self.rewrite = reply.map(str::to_string);
        self
    }

    pub fn with_classification(mut self, reply: Option<&str>) -> Self {
        self.classification = reply.map(str::to_string);
        self
    }

    pub fn with_related(mut self, reply: Option<&str>) -> Self {
        self.related = reply.map(str::to_string);
        self
    }

    pub fn with_answer(mut self, fragments: &[&str]) -> Self {
        self.answer = fragments.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Prompts of non-streaming requests containing `marker`
    pub fn prompts_with(&self, marker: &str) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.messages[0].content().to_string())
            .filter(|p| p.contains(marker))
            .collect()
    }

    pub fn stream_count(&self) -> usize {
        self.streams.lock().unwrap().len()
    }

    /// System prompt of the first answer request
    pub fn answer_prompt(&self) -> String {
        self.streams.lock().unwrap()[0].messages[0].content().to_string()
    }
}

fn response(content: Option<String>) -> ChatResponse {
    ChatResponse {
        content,
        usage: None,
        finish_reason: Some("stop".to_string()),
        raw: serde_json::Value::Null,
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let prompt = request.messages[0].content().to_string();
        self.requests.lock().unwrap().push(request);

        if prompt.contains(CLASSIFY_MARKER) {
            Ok(response(self.classification.clone()))
        } else if prompt.contains(REWRITE_MARKER) {
            Ok(response(self.rewrite.clone()))
        } else if prompt.contains(RELATED_MARKER) {
            match &self.related {
                Some(text) => Ok(response(Some(text.clone()))),
                None => bail!("related questions model unavailable"),
            }
        } else {
            bail!("unexpected prompt: {prompt}")
        }
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<EventStream> {
        self.streams.lock().unwrap().push(request);

        let mut events: Vec<Result<StreamEvent>> = self
            .answer
            .iter()
            .map(|content| {
                Ok(StreamEvent::Message {
                    content: content.clone(),
                })
            })
            .collect();
        events.push(Ok(StreamEvent::Done {
            finish_reason: Some("stop".to_string()),
        }));

        Ok(Box::pin(stream::iter(events)))
    }
}

/// Search client serving fixed buckets and recording every call.
pub struct FakeSearch {
    pub results: SearchResultSet,
    pub calls: Mutex<Vec<(String, Vec<Category>)>>,
}

impl FakeSearch {
    pub fn new(results: SearchResultSet) -> Self {
        Self {
            results,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Category>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for FakeSearch {
    async fn search(&self, query: &str, categories: &[Category]) -> sensei_search::Result<SearchResultSet> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), categories.to_vec()));

        let mut set = SearchResultSet::empty();
        for category in categories {
            *set.bucket_mut(*category) = self.results.bucket(*category).to_vec();
        }
        Ok(set)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Search client that always fails.
pub struct DownSearch;

#[async_trait]
impl SearchClient for DownSearch {
    async fn search(&self, _query: &str, _categories: &[Category]) -> sensei_search::Result<SearchResultSet> {
        Err(SearchError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

/// Serves general results but fails every media search.
pub struct MediaDownSearch {
    pub inner: FakeSearch,
}

impl MediaDownSearch {
    pub fn new(results: SearchResultSet) -> Self {
        Self {
            inner: FakeSearch::new(results),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Category>)> {
        self.inner.calls()
    }
}

#[async_trait]
impl SearchClient for MediaDownSearch {
    async fn search(&self, query: &str, categories: &[Category]) -> sensei_search::Result<SearchResultSet> {
        if categories.iter().any(|c| *c != Category::General) {
            self.inner
                .calls
                .lock()
                .unwrap()
                .push((query.to_string(), categories.to_vec()));
            return Err(SearchError::Status {
                status: 502,
                body: "media engine down".to_string(),
            });
        }
        self.inner.search(query, categories).await
    }

    fn name(&self) -> &'static str {
        "media-down"
    }
}

/// Delegates reads to the in-memory store and rejects every write.
#[derive(Default)]
pub struct WritesFail(pub InMemoryHistoryStore);

fn write_refused() -> PersistError {
    PersistError::Internal("store is read-only".to_string())
}

#[async_trait]
impl HistoryStore for WritesFail {
    async fn load_recent_turns(&self, thread_id: &str, limit: usize) -> sensei_persist::Result<Vec<Turn>> {
        self.0.load_recent_turns(thread_id, limit).await
    }

    async fn load_turns(&self, thread_id: &str) -> sensei_persist::Result<Vec<Turn>> {
        self.0.load_turns(thread_id).await
    }

    async fn append_turn(&self, _turn: Turn) -> sensei_persist::Result<()> {
        Err(write_refused())
    }

    async fn get_thread_metadata(&self, thread_id: &str) -> sensei_persist::Result<Option<ThreadMetadata>> {
        self.0.get_thread_metadata(thread_id).await
    }

    async fn put_thread_metadata(&self, _metadata: &ThreadMetadata) -> sensei_persist::Result<()> {
        Err(write_refused())
    }

    async fn put_slug(&self, _slug: &str, _thread_id: &str) -> sensei_persist::Result<()> {
        Err(write_refused())
    }

    async fn thread_id_by_slug(&self, slug: &str) -> sensei_persist::Result<Option<String>> {
        self.0.thread_id_by_slug(slug).await
    }

    fn backend(&self) -> &'static str {
        "read-only"
    }
}

/// Page fetcher backed by a url → text map. Unknown urls read as empty.
#[derive(Default)]
pub struct FakePages {
    pub pages: HashMap<String, String>,
}

impl FakePages {
    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for FakePages {
    async fn fetch_pages(&self, results: &[SearchResult]) -> Vec<String> {
        results
            .iter()
            .map(|r| self.pages.get(&r.url).cloned().unwrap_or_default())
            .collect()
    }
}

pub fn france_result() -> SearchResult {
    SearchResult::new(Category::General, "https://example.com/france")
        .with_title("France")
        .with_content("Paris is the capital of France.")
}

pub fn general(results: Vec<SearchResult>) -> SearchResultSet {
    SearchResultSet {
        general: results,
        ..SearchResultSet::empty()
    }
}

pub async fn seed_thread(store: &InMemoryHistoryStore, thread_id: &str, owner: &str) {
    let metadata = ThreadMetadata {
        thread_id: thread_id.to_string(),
        name: "What is the capital of France?".to_string(),
        user_id: owner.to_string(),
        created_at: chrono::Utc::now(),
        slug: "what-is-the-capital-of-france-seeded".to_string(),
        related_questions: vec![],
    };
    store.save_thread_metadata(&metadata).await.unwrap();
    store
        .append_turn(Turn::new(thread_id, "What is the capital of France?", "Paris[1]."))
        .await
        .unwrap();
}

pub async fn collect(mut rx: mpsc::Receiver<TurnEvent>) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

pub fn answer_text(events: &[TurnEvent]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            TurnEvent::Answer(fragment) => Some(fragment.as_str()),
            _ => None,
        })
        .collect()
}

pub fn names(events: &[TurnEvent]) -> Vec<&'static str> {
    events.iter().map(TurnEvent::name).collect()
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
