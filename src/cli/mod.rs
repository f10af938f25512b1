//! CLI module for qapflow
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// qapflow - Move Quality Assurance Plans through the multi-level review workflow
#[derive(Parser, Debug)]
#[command(name = "qapflow")]
#[command(version)]
#[command(about = "A CLI tool for moving Quality Assurance Plans through a multi-level review workflow")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new QAP store in the current directory
    Init {
        /// Force initialization even if .qapflow already exists
        #[arg(long)]
        force: bool,
    },

    /// Register a workflow participant
    UserAdd {
        /// Unique username
        username: String,

        /// Role (requestor, production, quality, technical, head,
        /// technical-head, plant-head, admin)
        #[arg(long)]
        role: String,

        /// Comma-separated plant codes (e.g. "p4,p5")
        #[arg(long, default_value = "")]
        plants: String,
    },

    /// Create a new draft record
    New {
        /// Record title
        #[arg(long)]
        title: String,

        /// Customer the plan is prepared for
        #[arg(long)]
        customer: String,

        /// Plant code (e.g. p2, p4, p5)
        #[arg(long)]
        plant: String,

        /// Path to a JSON file with the specification rows
        #[arg(long)]
        specs: Option<PathBuf>,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// Submit a draft for level-2 review
    Submit {
        /// Record ID
        id: String,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// Record a review response at the record's current level
    Review {
        /// Record ID
        id: String,

        /// Acknowledge the record as-is
        #[arg(long)]
        acknowledge: bool,

        /// Per-row comment in "index:text" form (repeatable)
        #[arg(long = "comment")]
        comments: Vec<String>,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// Advance a record toward a target level
    Advance {
        /// Record ID
        id: String,

        /// Target: 3, 4, 5, final-comments, level-3-final or level-4-final
        #[arg(long)]
        to: String,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// Approve a record at plant head level
    Approve {
        /// Record ID
        id: String,

        /// Optional approval comment
        #[arg(long)]
        comments: Option<String>,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// Reject a record at plant head level
    Reject {
        /// Record ID
        id: String,

        /// Optional rejection comment
        #[arg(long)]
        comments: Option<String>,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// Reopen a submitted or finished record for editing
    Reopen {
        /// Record ID
        id: String,

        /// Acting user
        #[arg(long = "as")]
        as_user: String,
    },

    /// List records, restricted to what the acting user may see
    List {
        /// Acting user (omit for an unrestricted operator view)
        #[arg(long = "as")]
        as_user: Option<String>,

        /// Filter by status (e.g. level-2, approved)
        #[arg(long)]
        status: Option<String>,

        /// Filter by plant code
        #[arg(long)]
        plant: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details of a specific record
    Show {
        /// Record ID
        id: String,

        /// Acting user (omit for an unrestricted operator view)
        #[arg(long = "as")]
        as_user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Turnaround analytics over approved records
    Metrics {
        /// Restrict to one plant
        #[arg(long)]
        plant: Option<String>,

        /// Average a single level's turnaround
        #[arg(long)]
        level: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
