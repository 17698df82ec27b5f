use clap::{Args, Parser, Subcommand};
use linker_core::models::LinkDraft;

#[derive(Parser, Debug)]
#[command(name = "linker")]
#[command(about = "Local link index with ranked fuzzy picking", long_about = None)]
pub struct Cli {
    /// Path to a config file (toml, json, yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Search terms; without any, every link is listed by usefulness
    pub terms: Vec<String>,
    /// Print ranked matches as JSON instead of opening the picker
    #[arg(long, default_value_t = false, conflicts_with = "print")]
    pub json: bool,
    /// Print ranked matches as lines instead of opening the picker
    #[arg(long, default_value_t = false)]
    pub print: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a link to the index
    Add(AddArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// URL or path to store
    pub url: String,
    /// Title for the link
    #[arg(short = 'n', long, default_value = "")]
    pub title: String,
    /// Free-text comment
    #[arg(short, long, default_value = "")]
    pub comment: String,
    /// Tags (comma-separated or repeated)
    #[arg(short, long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Label as key=value (repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<String>,
}

impl From<AddArgs> for LinkDraft {
    fn from(args: AddArgs) -> Self {
        LinkDraft {
            url: args.url,
            title: args.title,
            comment: args.comment,
            tags: args.tags,
            labels: args.labels,
        }
    }
}
