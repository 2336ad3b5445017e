use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "clipstore")]
#[command(about = "A small SQLite-backed store for clipboard entries")]
#[command(long_about = "clipstore - clipboard entries in SQLite

Creates the `entries` table in db/clipboard.db and stores clipboard items
in it. Entries can be flagged as encrypted with a key; their content is
only shown again through `clipstore reveal` with the same key.

QUICK START:
  clipstore init                     Create the entries table
  clipstore add \"hello\"              Store an entry, prints its id
  echo hi | clipstore add --id a1    Store stdin under a chosen id
  clipstore add \"pin 1234\" --key k   Store an encrypted entry
  clipstore list                     List stored entries

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file, or
    /// 'pretty' when unset.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Database file [default: db/clipboard.db]
    #[arg(long, global = true, env = "CLIPSTORE_DB", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Config file [default: clipstore.yaml, if present]
    #[arg(long, global = true, env = "CLIPSTORE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Logs go to stderr. `CLIPSTORE_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the entries table
    ///
    /// Runs the CREATE TABLE statement against the database file. By
    /// default an existing table is an error, so running init twice
    /// fails the second time. Pass --if-not-exists to make reruns a no-op.
    ///
    /// Prints nothing on success unless --output json is given.
    ///
    /// # Examples
    ///
    ///   clipstore init
    ///   clipstore init --if-not-exists
    ///   clipstore --database /tmp/clips.db init
    Init(InitArgs),

    /// Store a new entry
    ///
    /// Content is taken from the argument, or read from stdin when the
    /// argument is missing or '-'. Passing --key flags the entry as
    /// encrypted; its content is then only shown by 'clipstore reveal'.
    ///
    /// # Examples
    ///
    ///   clipstore add "hello"
    ///   clipstore add "hello" --id a1
    ///   pbpaste | clipstore add
    ///   clipstore add "pin 1234" --key hunter2
    #[command(alias = "a")]
    Add(AddArgs),

    /// Show an entry by ID
    ///
    /// Content of encrypted entries is withheld; use 'clipstore reveal'.
    Get {
        /// Entry ID
        id: String,
    },

    /// Show the content of an encrypted entry
    ///
    /// # Examples
    ///
    ///   clipstore reveal a1 --key hunter2
    Reveal {
        /// Entry ID
        id: String,

        /// Key the entry was stored with
        #[arg(short, long)]
        key: String,
    },

    /// List stored entries
    ///
    /// Entries are listed in the order they were added, with a one-line
    /// preview of plain content.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Replace an entry's content
    ///
    /// The entry becomes encrypted when --key is given and plain otherwise.
    Update(UpdateArgs),

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID
        id: String,
    },

    /// Show the columns of the entries table
    Schema,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   clipstore completions bash > ~/.local/share/bash-completion/completions/clipstore
    ///   clipstore completions zsh > ~/.zsh/completions/_clipstore
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Succeed without changes when the table already exists
    #[arg(long)]
    pub if_not_exists: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Entry content ('-' or missing reads stdin)
    pub content: Option<String>,

    /// Entry ID [default: random UUID]
    #[arg(long)]
    pub id: Option<String>,

    /// Flag the entry as encrypted with this key
    #[arg(short, long)]
    pub key: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of entries to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Number of entries to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entry ID
    pub id: String,

    /// New content ('-' or missing reads stdin)
    pub content: Option<String>,

    /// Flag the entry as encrypted with this key
    #[arg(short, long)]
    pub key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["clipstore", "init"]).unwrap();
        match cli.command {
            Commands::Init(args) => assert!(!args.if_not_exists),
            _ => panic!("expected init"),
        }

        let cli = Cli::try_parse_from(["clipstore", "init", "--if-not-exists"]).unwrap();
        assert!(matches!(cli.command, Commands::Init(InitArgs { if_not_exists: true })));
    }

    #[test]
    fn test_parse_add_with_key() {
        let cli = Cli::try_parse_from(["clipstore", "add", "hello", "--id", "a1", "-k", "s"])
            .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.content.as_deref(), Some("hello"));
                assert_eq!(args.id.as_deref(), Some("a1"));
                assert_eq!(args.key.as_deref(), Some("s"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "clipstore", "list", "-o", "json", "--database", "x.db", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.database, Some(PathBuf::from("x.db")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_reveal_requires_key() {
        assert!(Cli::try_parse_from(["clipstore", "reveal", "a1"]).is_err());
    }
}
