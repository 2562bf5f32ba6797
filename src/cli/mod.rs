//! CLI definitions and entry point.

use crate::config::ViewMode;
use crate::gantt::GroupBy;
use crate::i18n::Language;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Local-first issue tracker (single JSON document, Gantt layout)
#[derive(Parser, Debug)]
#[command(name = "ct", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory (auto-discover .capitask/ if not set)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Interface language for this invocation
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a capitask workspace with seed data
    Init {
        /// Overwrite an existing workspace
        #[arg(long)]
        force: bool,
    },

    /// Create a new issue in the backlog
    Create(CreateArgs),

    /// Update an issue's fields
    Update(UpdateArgs),

    /// Move an issue to another status column
    Move {
        /// Issue ID
        id: String,
        /// Target status ("To Do", "In Progress", "Done")
        status: String,
    },

    /// List backlog issues (board or list view)
    List(ListArgs),

    /// Show issue details
    Show {
        /// Issue ID
        id: String,
    },

    /// Add a comment to an issue
    Comment {
        /// Issue ID
        id: String,
        /// Comment text
        text: String,
        /// Comment author
        #[arg(long, default_value = "Admin")]
        author: String,
    },

    /// Link two issues with a typed relation
    Link(RelationArgs),

    /// Remove a typed relation between two issues
    Unlink(RelationArgs),

    /// Show the active sprint board
    Sprint(SprintArgs),

    /// Export sprint issues as CSV
    Export(ExportArgs),

    /// Render the Gantt timeline for active issues
    Gantt(GanttArgs),

    /// Get or set persisted preferences
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Issue title
    pub title: String,

    /// Issue type (Task, Bug, Story)
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Priority (High, Medium, Low)
    #[arg(long)]
    pub priority: Option<String>,

    /// Story points (0-100)
    #[arg(long)]
    pub points: Option<i64>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Assignee
    #[arg(long)]
    pub assignee: Option<String>,

    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Issue ID
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Issue type (Task, Bug, Story)
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Priority (High, Medium, Low)
    #[arg(long)]
    pub priority: Option<String>,

    /// Status ("To Do", "In Progress", "Done")
    #[arg(long)]
    pub status: Option<String>,

    /// Story points (0-100)
    #[arg(long)]
    pub points: Option<i64>,

    /// Due date (YYYY-MM-DD, empty string clears)
    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by substring of title or id
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by issue type
    #[arg(long = "type", value_name = "TYPE")]
    pub issue_type: Option<String>,

    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Rendering mode (overrides the stored preference)
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,
}

#[derive(Args, Debug)]
pub struct RelationArgs {
    /// Source issue ID
    pub a: String,

    /// Target issue ID
    pub b: String,

    /// Relation type (related, blocks, subtask)
    #[arg(long = "type", value_name = "TYPE", default_value = "related")]
    pub relation_type: String,
}

#[derive(Args, Debug)]
pub struct SprintArgs {
    /// Filter sprint issues by title substring
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by field (id, title, priority, status)
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GanttArgs {
    /// Grouping mode for rows
    #[arg(long, value_enum, default_value_t = GroupBy::Assignee)]
    pub group_by: GroupBy,

    /// Draw relation arrows between bars
    #[arg(long)]
    pub arrows: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the stored preferences
    Show,

    /// Set the interface language preference
    SetLang {
        #[arg(value_enum)]
        lang: Language,
    },

    /// Set the backlog view mode preference
    SetView {
        #[arg(value_enum)]
        view: ViewMode,
    },
}
