//! # Media Module
//!
//! Video lessons attached to a training: manual uploads and AI-generation
//! requests. Nothing is uploaded or generated here. A request is validated
//! and turned into a [`VideoRecord`]; the generation delay is cosmetic and
//! handled by the caller with a progress ticker.

use crate::{Timestamp, TrainflowError, TrainingId};
use serde::{Deserialize, Serialize};

/// Placeholder location for generated videos.
pub const GENERATED_VIDEO_PLACEHOLDER: &str = "/api/generated-video-placeholder.mp4";

/// Where a video came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VideoSource {
    Manual {
        video_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<String>,
    },
    AiGenerated {
        video_url: String,
        prompt: String,
        style: String,
        voice: String,
        language: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Uploaded,
    Generated,
}

/// A video attached to a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Creation time in milliseconds doubles as the id.
    pub id: u64,
    pub training_id: TrainingId,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub source: VideoSource,
    pub status: VideoStatus,
    pub created_at: Timestamp,
}

// =============================================================================
// MANUAL UPLOAD
// =============================================================================

/// The manual upload tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualUpload {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub video_file: Option<String>,
    pub thumbnail_file: Option<String>,
}

impl ManualUpload {
    /// Turn the upload into a record. A video file is required.
    pub fn into_record(
        self,
        training_id: TrainingId,
        created_at: Timestamp,
    ) -> Result<VideoRecord, TrainflowError> {
        let video_url = self
            .video_file
            .filter(|f| !f.is_empty())
            .ok_or(TrainflowError::MissingVideoFile)?;

        Ok(VideoRecord {
            id: created_at.as_millis(),
            training_id,
            title: self.title,
            description: self.description,
            duration: self.duration,
            source: VideoSource::Manual {
                video_url,
                thumbnail_url: self.thumbnail_file,
            },
            status: VideoStatus::Uploaded,
            created_at,
        })
    }
}

// =============================================================================
// AI GENERATION
// =============================================================================

/// The AI generation tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiVideoRequest {
    pub topic: String,
    pub duration_minutes: u32,
    pub style: String,
    pub voice: String,
    pub language: String,
    pub prompt: String,
}

impl Default for AiVideoRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            duration_minutes: 15,
            style: "professional".to_string(),
            voice: "narrator".to_string(),
            language: "portuguese".to_string(),
            prompt: String::new(),
        }
    }
}

impl AiVideoRequest {
    /// Topic and prompt must both be present before generation starts.
    pub fn validate(&self) -> Result<(), TrainflowError> {
        if self.topic.is_empty() || self.prompt.is_empty() {
            return Err(TrainflowError::MissingGenerationInput);
        }
        Ok(())
    }

    /// Turn a finished generation into a record.
    pub fn into_record(
        self,
        training_id: TrainingId,
        created_at: Timestamp,
    ) -> Result<VideoRecord, TrainflowError> {
        self.validate()?;
        Ok(VideoRecord {
            id: created_at.as_millis(),
            training_id,
            description: format!("AI-generated video about {}", self.topic),
            duration: format!("{} minutes", self.duration_minutes),
            title: self.topic,
            source: VideoSource::AiGenerated {
                video_url: GENERATED_VIDEO_PLACEHOLDER.to_string(),
                prompt: self.prompt,
                style: self.style,
                voice: self.voice,
                language: self.language,
            },
            status: VideoStatus::Generated,
            created_at,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
