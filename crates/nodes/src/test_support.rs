//! In-memory doubles for the ports, shared by the tests in this crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{
    ContentDraft, ContentPlan, ContentRequest, ContentSession, ContentType, Feedback,
    KeywordExtractor, LlmError, LlmProvider, ModelName, PreferenceStore, ReadabilityScorer,
    RequestId, SessionStore, StorageError, Timestamp, Topic,
};

/// Replays canned completions in order and records every prompt it receives.
pub(crate) struct ScriptedLlm {
    model: ModelName,
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub(crate) fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub(crate) fn failing(error: LlmError) -> Self {
        Self::from_results([Err(error)])
    }

    pub(crate) fn from_results(
        replies: impl IntoIterator<Item = Result<String, LlmError>>,
    ) -> Self {
        Self {
            model: ModelName::new("scripted").unwrap(),
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyCompletion))
    }

    fn model_name(&self) -> &ModelName {
        &self.model
    }
}

pub(crate) struct FixedKeywords(pub(crate) Vec<String>);

impl KeywordExtractor for FixedKeywords {
    fn extract_keywords(&self, _text: &str) -> Vec<String> {
        self.0.clone()
    }
}

pub(crate) struct FixedReadability(pub(crate) f64);

impl ReadabilityScorer for FixedReadability {
    fn flesch_reading_ease(&self, _text: &str) -> f64 {
        self.0
    }
}

/// Session store backed by a `Vec`; optionally fails every write.
#[derive(Default)]
pub(crate) struct MemorySessions {
    pub(crate) sessions: Vec<ContentSession>,
    pub(crate) fail_writes: bool,
}

impl MemorySessions {
    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io {
                path: "memory".into(),
                message: "disk full".into(),
            });
        }
        Ok(())
    }
}

impl SessionStore for MemorySessions {
    fn append(&mut self, session: ContentSession) -> Result<(), StorageError> {
        self.check_writable()?;
        self.sessions.push(session);
        Ok(())
    }

    fn attach_feedback(
        &mut self,
        request_id: RequestId,
        mut feedback: Feedback,
    ) -> Result<bool, StorageError> {
        self.check_writable()?;
        match self.sessions.iter_mut().find(|s| s.request_id() == request_id) {
            Some(session) => {
                feedback.received_at = Some(Timestamp::now());
                session.feedback = Some(feedback);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn sessions(&self) -> &[ContentSession] {
        &self.sessions
    }
}

/// Records every feedback it is asked to learn from; optionally fails instead.
#[derive(Default)]
pub(crate) struct RecordingPreferences {
    pub(crate) learned: std::sync::Arc<Mutex<Vec<Feedback>>>,
    pub(crate) fail_writes: bool,
}

impl PreferenceStore for RecordingPreferences {
    fn learn_from_feedback(&mut self, feedback: &Feedback) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io {
                path: "preferences".into(),
                message: "disk full".into(),
            });
        }
        if feedback.approved {
            self.learned.lock().unwrap().push(feedback.clone());
        }
        Ok(())
    }
}

pub(crate) fn request(topic: &str) -> ContentRequest {
    ContentRequest::new(Topic::new(topic).unwrap(), ContentType::BlogPost)
}

pub(crate) fn plan(topic: &str) -> ContentPlan {
    ContentPlan {
        request_id: RequestId::new_random(),
        title: format!("All about {topic}"),
        outline: vec![],
        target_keywords: vec![],
        word_count_target: 800,
        tone: "professional".into(),
        key_messages: vec![],
        research_notes: Default::default(),
    }
}

pub(crate) fn draft(topic: &str) -> ContentDraft {
    ContentDraft {
        request_id: RequestId::new_random(),
        title: format!("All about {topic}"),
        content: format!("# {topic}\n\nA short piece on {topic}."),
        meta_description: None,
        tags: vec![],
        word_count: 7,
        readability_score: Some(65.0),
    }
}
