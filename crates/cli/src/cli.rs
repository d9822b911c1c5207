use clap::{Parser, Subcommand};

/// Command-line clients for the toki MCP data tools.
///
/// Each subcommand builds a JSON-RPC request, POSTs it to the local MCP
/// server, and pretty-prints the unwrapped result.
#[derive(Parser, Debug)]
#[command(name = "toki", about = "Command-line clients for the toki MCP data tools")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/toki/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Endpoint URL override (also settable via MCP_URL)
    #[arg(long)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tools an MCP endpoint exposes
    Tools {
        /// Service endpoint to ask: bigquery, firestore, or looker
        #[arg(long, default_value = "bigquery")]
        service: String,
    },

    /// BigQuery export tools
    #[command(subcommand)]
    Bigquery(BigqueryCommand),

    /// Firestore document tools
    #[command(subcommand)]
    Firestore(FirestoreCommand),

    /// Looker BI tools
    #[command(subcommand)]
    Looker(LookerCommand),
}

#[derive(Subcommand, Debug)]
pub enum BigqueryCommand {
    /// Execute a SQL query and export the results
    Query {
        /// SQL to execute
        sql: String,

        /// Export format: csv, json, or parquet
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// List available tables
    Tables,

    /// Download an exported file
    Download {
        /// Download URL printed by a previous query
        url: String,

        /// Output file (defaults to the last URL segment)
        output: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FirestoreCommand {
    /// Get documents by path
    Get {
        /// Document paths like users/user123
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Add a document to a collection
    Add {
        /// Collection ID
        collection: String,

        /// JSON object with the document data
        data: String,

        /// Optional document ID
        #[arg(long)]
        id: Option<String>,
    },

    /// Query a collection with an optional filter
    Query {
        /// Collection ID to query
        collection: String,

        /// Filter in field=value form
        #[arg(long = "where")]
        filter: Option<String>,

        /// Maximum documents to return
        #[arg(long)]
        limit: Option<u64>,
    },

    /// List collections, optionally under a parent document
    Collections {
        /// Parent document path (root collections if omitted)
        parent: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LookerCommand {
    /// List LookML models
    Models,

    /// List explores in a model, or the fields of one explore
    Explore {
        /// LookML model name
        model: String,

        /// Explore to describe (lists dimensions and measures)
        explore: Option<String>,
    },

    /// Run a query against an explore
    Query {
        /// LookML model name
        model: String,

        /// Explore name
        explore: String,

        /// Comma-separated list of fields
        fields: String,

        /// JSON object of filters
        #[arg(long)]
        filters: Option<String>,

        /// Comma-separated list of sort fields
        #[arg(long)]
        sorts: Option<String>,

        /// Row limit
        #[arg(long)]
        limit: Option<u64>,

        /// Show the generated SQL instead of running the query
        #[arg(long)]
        sql: bool,

        /// Show the Looker URL instead of running the query
        #[arg(long)]
        url: bool,
    },

    /// Search or run saved looks
    #[command(subcommand)]
    Looks(LooksCommand),

    /// Search or create dashboards
    #[command(subcommand)]
    Dashboards(DashboardsCommand),
}

#[derive(Subcommand, Debug)]
pub enum LooksCommand {
    /// List/search looks
    List {
        /// Search by title
        #[arg(long)]
        title: Option<String>,

        /// Max results
        #[arg(long, default_value = "20")]
        limit: u64,
    },

    /// Run a look
    Run {
        /// Look ID to run
        look_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DashboardsCommand {
    /// List/search dashboards
    List {
        /// Search by title
        #[arg(long)]
        title: Option<String>,

        /// Max results
        #[arg(long, default_value = "20")]
        limit: u64,
    },

    /// Create a dashboard
    Create {
        /// Dashboard title
        #[arg(long)]
        title: String,

        /// Dashboard description
        #[arg(long)]
        description: Option<String>,
    },
}
