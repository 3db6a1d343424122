//! Content history: the append-only list of completed sessions.

use std::path::{Path, PathBuf};

use pipeline::{ContentSession, Feedback, RequestId, SessionStore, StorageError, Timestamp};
use tracing::{debug, info};

use crate::file::JsonFile;

/// File name used inside the data directory.
pub const HISTORY_FILE_NAME: &str = "content_history.json";

/// [`SessionStore`] persisted as a single JSON array.
#[derive(Debug)]
pub struct ContentHistory {
    file: JsonFile,
    sessions: Vec<ContentSession>,
}

impl ContentHistory {
    /// Opens the history at `path`. A missing or unreadable file starts an
    /// empty history; nothing is written until the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = JsonFile::new(path);
        let sessions: Vec<ContentSession> = file.load_or(Vec::new);
        info!(path = %file.path().display(), sessions = sessions.len(), "content history loaded");
        Self { file, sessions }
    }

    /// Opens `HISTORY_FILE_NAME` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::open(data_dir.as_ref().join(HISTORY_FILE_NAME))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl SessionStore for ContentHistory {
    fn append(&mut self, session: ContentSession) -> Result<(), StorageError> {
        debug!(request_id = %session.request_id(), "appending content session");
        self.sessions.push(session);
        self.file.save(&self.sessions)
    }

    fn attach_feedback(
        &mut self,
        request_id: RequestId,
        mut feedback: Feedback,
    ) -> Result<bool, StorageError> {
        let Some(session) = self
            .sessions
            .iter_mut()
            .find(|s| s.request_id() == request_id)
        else {
            debug!(%request_id, "no session to attach feedback to");
            return Ok(false);
        };

        feedback.received_at = Some(Timestamp::now());
        session.feedback = Some(feedback);
        self.file.save(&self.sessions)?;
        Ok(true)
    }

    fn sessions(&self) -> &[ContentSession] {
        &self.sessions
    }
}
