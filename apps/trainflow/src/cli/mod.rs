//! # TrainFlow CLI Module
//!
//! This module implements the CLI interface for TrainFlow.
//!
//! ## Available Commands
//!
//! - `wizard` - Replay a training-creation script and print the record
//! - `exam` - Grade one or more attempts at an exam
//! - `login` - Demo sign-in
//! - `register` - Demo sign-up
//! - `generate-video` - AI video generation with a progress bar
//! - `upload-video` - Attach a manually uploaded video
//! - `catalog` - Show templates, employees and dashboard counts

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trainflow_core::{Role, TrainflowError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// TrainFlow - corporate training prototype
///
/// Build trainings with a step-gated wizard and grade exams from the
/// command line.
#[derive(Parser, Debug)]
#[command(name = "trainflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to trainflow.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Account type accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Admin,
    Employee,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::Employee => Role::Employee,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a wizard script (JSON or TOML) and submit it
    Wizard {
        /// Path to the script file
        #[arg(short, long)]
        script: PathBuf,
    },

    /// Grade exam attempts
    Exam {
        /// Exam file (JSON); the sample safety exam when omitted
        #[arg(short, long)]
        exam: Option<PathBuf>,

        /// Answers as question=option pairs, e.g. 1=1,2=1,3=2.
        /// Repeat to retake after a failed attempt.
        #[arg(short, long, required = true)]
        answers: Vec<String>,
    },

    /// Sign in with the demo account flow
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Create a demo account
    Register {
        /// Company name shown as the display name
        #[arg(long, default_value = "")]
        company: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(long)]
        confirm: String,

        #[arg(short, long, value_enum, default_value = "admin")]
        role: RoleArg,
    },

    /// Generate a video lesson with AI (cosmetic progress, Ctrl+C cancels)
    GenerateVideo {
        /// Training the video belongs to
        #[arg(short, long, default_value = "1")]
        training: u64,

        #[arg(long)]
        topic: String,

        #[arg(long)]
        prompt: String,

        /// Length in minutes
        #[arg(short, long, default_value = "15")]
        duration: u32,

        #[arg(long, default_value = "professional")]
        style: String,

        #[arg(long, default_value = "narrator")]
        voice: String,

        #[arg(long, default_value = "portuguese")]
        language: String,
    },

    /// Attach a manually uploaded video
    UploadVideo {
        /// Training the video belongs to
        #[arg(short, long, default_value = "1")]
        training: u64,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Display duration, e.g. "12:30"
        #[arg(short, long, default_value = "")]
        duration: String,

        /// Video file name
        #[arg(short, long)]
        file: Option<String>,

        /// Thumbnail file name
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Show the sample catalog and dashboard counts
    Catalog,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli, config: &Config) -> Result<(), TrainflowError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Wizard { script }) => cmd_wizard(&script, json_mode),
        Some(Commands::Exam { exam, answers }) => {
            cmd_exam(config, exam.as_deref(), &answers, json_mode)
        }
        Some(Commands::Login { email, password }) => cmd_login(email, password, json_mode),
        Some(Commands::Register {
            company,
            email,
            password,
            confirm,
            role,
        }) => cmd_register(company, email, password, confirm, role.into(), json_mode),
        Some(Commands::GenerateVideo {
            training,
            topic,
            prompt,
            duration,
            style,
            voice,
            language,
        }) => {
            let request = trainflow_core::AiVideoRequest {
                topic,
                duration_minutes: duration,
                style,
                voice,
                language,
                prompt,
            };
            cmd_generate_video(config, training, request, json_mode).await
        }
        Some(Commands::UploadVideo {
            training,
            title,
            description,
            duration,
            file,
            thumbnail,
        }) => {
            let upload = trainflow_core::ManualUpload {
                title,
                description,
                duration,
                video_file: file,
                thumbnail_file: thumbnail,
            };
            cmd_upload_video(training, upload, json_mode)
        }
        Some(Commands::Catalog) | None => cmd_catalog(json_mode),
    }
}
