use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use mitra_core::{ui_strings, Language, Message, MessageOrigin, Topic, TriageEngine};
use mitra_observability::AppMetrics;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Simulated response latency standing in for a real inference call. A
/// production backend call would replace the sleep and add timeout/retry
/// policy at that boundary.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown session id: {0}")]
    UnknownSession(String),
    #[error("session registry is full (capacity {0})")]
    RegistryFull(usize),
}

#[derive(Default)]
struct SessionLog {
    messages: Vec<Message>,
    pending: bool,
    next_id: u64,
    reply_task: Option<JoinHandle<()>>,
}

struct SessionInner {
    session_id: String,
    language: Language,
    engine: Arc<TriageEngine>,
    metrics: Arc<AppMetrics>,
    reply_delay: Duration,
    log: Mutex<SessionLog>,
}

/// One chat conversation: a language choice, an append-only message log and
/// the Idle/Awaiting send guard. State is owned by this object alone; the
/// UI re-reads `messages()` after every mutation. Dropping the session
/// cancels any in-flight reply so completions never touch a disposed log.
pub struct ChatSession {
    inner: Arc<SessionInner>,
}

impl ChatSession {
    pub fn start(language_code: &str, engine: Arc<TriageEngine>, metrics: Arc<AppMetrics>) -> Self {
        Self::start_with_delay(language_code, engine, metrics, DEFAULT_REPLY_DELAY)
    }

    pub fn start_with_delay(
        language_code: &str,
        engine: Arc<TriageEngine>,
        metrics: Arc<AppMetrics>,
        reply_delay: Duration,
    ) -> Self {
        let language = Language::from_code(language_code);
        let session_id = Uuid::new_v4().to_string();

        let inner = Arc::new(SessionInner {
            session_id,
            language,
            engine,
            metrics,
            reply_delay,
            log: Mutex::new(SessionLog::default()),
        });

        let strings = ui_strings(language);
        {
            let mut log = inner.log.lock();
            append_message(
                &mut log,
                MessageOrigin::Assistant,
                strings.greeting.to_string(),
                false,
                strings
                    .quick_replies
                    .iter()
                    .map(|label| label.to_string())
                    .collect(),
                false,
            );
        }

        inner.metrics.inc_session();
        info!(
            session_id = %inner.session_id,
            language = language.as_code(),
            "session started"
        );

        Self { inner }
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    pub fn language(&self) -> Language {
        self.inner.language
    }

    /// Snapshot of the ordered log, greeting first.
    pub fn messages(&self) -> Vec<Message> {
        self.inner.log.lock().messages.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.log.lock().pending
    }

    /// Appends the user message and schedules the assistant reply as one
    /// deferred unit of work. Silent no-op on blank input or while a reply
    /// is already pending; the caller observes the outcome only through the
    /// log.
    pub fn send(&self, text: &str) {
        let _ = self.send_checked(text);
    }

    /// Same operation as `send`, reporting whether the message was accepted
    /// so boundary layers can echo the outcome without treating the no-op
    /// as an error.
    pub fn send_checked(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!(session_id = %self.inner.session_id, "blank input ignored");
            return false;
        }

        let mut log = self.inner.log.lock();
        if log.pending {
            debug!(
                session_id = %self.inner.session_id,
                "send ignored while a reply is pending"
            );
            return false;
        }

        append_message(
            &mut log,
            MessageOrigin::User,
            trimmed.to_string(),
            false,
            Vec::new(),
            false,
        );
        log.pending = true;

        let inner = Arc::clone(&self.inner);
        let text = trimmed.to_string();
        // The lock is held until after the handle is stored, so the task
        // cannot observe the log before the Awaiting transition completes.
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.reply_delay).await;

            let started = Instant::now();
            let response = inner.engine.triage(&text);
            inner.metrics.observe_engine_latency(started.elapsed());
            inner.metrics.inc_message();
            match response.topic {
                Topic::Emergency => inner.metrics.inc_emergency(),
                Topic::Default => inner.metrics.inc_fallback(),
                _ => {}
            }

            let mut log = inner.log.lock();
            append_message(
                &mut log,
                MessageOrigin::Assistant,
                response.body,
                response.emergency,
                response.quick_replies,
                response.show_actions,
            );
            log.pending = false;

            info!(
                session_id = %inner.session_id,
                topic = ?response.topic,
                emergency = response.emergency,
                "assistant reply appended"
            );
        });
        log.reply_task = Some(handle);
        true
    }

    /// A tapped quick reply is an ordinary send of its label.
    pub fn select_quick_reply(&self, label: &str) {
        self.send(label);
    }

    /// Awaits the in-flight reply, if any. Returns immediately when the
    /// session is idle.
    pub async fn wait_for_reply(&self) {
        let handle = self.inner.log.lock().reply_task.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.log.lock().reply_task.take() {
            handle.abort();
        }
    }
}

fn append_message(
    log: &mut SessionLog,
    origin: MessageOrigin,
    text: String,
    emergency: bool,
    quick_replies: Vec<String>,
    show_actions: bool,
) -> u64 {
    log.next_id += 1;
    let id = log.next_id;
    log.messages.push(Message {
        id,
        text,
        origin,
        emergency,
        quick_replies,
        show_actions,
        at: Utc::now(),
    });
    id
}
