use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cardz", bin_name = "cardz", version)]
#[command(about = "Flashcards for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $CARDZ_DIR, then the platform data dir)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, edit and delete groups
    #[command(subcommand, alias = "g", display_order = 1)]
    Group(GroupCommands),

    /// Add, list, edit and delete flashcards
    #[command(subcommand, alias = "c", display_order = 2)]
    Card(CardCommands),

    /// Study flashcards interactively
    #[command(alias = "s", display_order = 3)]
    Study {
        /// Group to study (index, id or name); all cards if omitted
        group: Option<String>,

        /// Keep creation order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Find and remove flashcards whose group is gone
    #[command(display_order = 10)]
    Doctor {
        /// Remove what was found
        #[arg(long)]
        fix: bool,
    },

    /// Get or set configuration
    #[command(display_order = 11)]
    Config {
        /// Configuration key (shuffle, preview_width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Create a group
    #[command(alias = "n")]
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// List groups with their card counts
    #[command(alias = "ls")]
    List,

    /// Rename a group or change its description
    #[command(alias = "e")]
    Edit {
        /// Index, id or name of the group
        group: String,

        #[arg(short, long)]
        name: Option<String>,

        /// New description; an empty string clears it
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a group and all of its flashcards
    #[command(alias = "rm")]
    Delete {
        /// Index, id or name of the group
        group: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Add flashcards to a group; repeat -q/-a for several cards
    #[command(alias = "n")]
    Add {
        /// Index, id or name of the group
        group: String,

        #[arg(short = 'q', long = "question", required = true)]
        questions: Vec<String>,

        #[arg(short = 'a', long = "answer", required = true)]
        answers: Vec<String>,
    },

    /// List flashcards
    #[command(alias = "ls")]
    List {
        /// Only cards of this group
        #[arg(short, long)]
        group: Option<String>,

        /// Case-insensitive text to find in question or answer
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Edit a flashcard
    #[command(alias = "e")]
    Edit {
        /// Index or id of the card
        card: String,

        #[arg(short, long)]
        question: Option<String>,

        #[arg(short, long)]
        answer: Option<String>,

        /// Move the card to another group
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Delete a flashcard
    #[command(alias = "rm")]
    Delete {
        /// Index or id of the card
        card: String,
    },
}
