//! Clap derive structures for the `coupons` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// coupons -- admin console for discount coupons
#[derive(Debug, Parser)]
#[command(
    name = "coupons",
    version,
    about = "Manage discount coupons from the command line",
    long_about = "Admin console for a coupon backend.\n\n\
        List, create, view, update, delete and apply coupons. List paging\n\
        follows the backend's page metadata.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "COUPONS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "COUPONS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "COUPONS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "COUPONS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "COUPONS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List one page of coupons
    #[command(alias = "ls")]
    List(PageArgs),

    /// Show a single coupon
    #[command(alias = "get")]
    Show {
        /// Coupon code
        code: String,
    },

    /// Create a coupon
    Create(CouponFormArgs),

    /// Update an existing coupon
    Update {
        /// Code of the coupon to update
        #[arg(id = "target", value_name = "CODE")]
        code: String,

        #[command(flatten)]
        form: CouponFormArgs,

        /// Drop the stored age groups before adding any --age-group
        #[arg(long)]
        clear_age_groups: bool,
    },

    /// Delete a coupon, then show the page it was listed on
    #[command(alias = "rm")]
    Delete {
        /// Coupon code
        code: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Compute a user's discounted price with a coupon
    Apply(ApplyArgs),

    /// Print random coupon codes
    GenerateCode {
        /// How many codes to print
        #[arg(long, short = 'n', default_value = "1")]
        count: u32,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Page selection. Values are read leniently: anything that does not start
/// with a positive integer falls back to the default.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<String>,

    /// Coupons per page
    #[arg(long, short = 'l')]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CouponTypeArg {
    Flat,
    Percentage,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Plain,
    AgeGroup,
    Dfs,
}

/// Coupon fields. On update, only the given fields change.
#[derive(Debug, Args)]
pub struct CouponFormArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Coupon code (at most 6 characters)
    #[arg(long, conflicts_with = "generate_code")]
    pub code: Option<String>,

    /// Use a random 6-character code
    #[arg(long)]
    pub generate_code: bool,

    /// Discount type
    #[arg(long = "type", value_name = "TYPE")]
    pub coupon_type: Option<CouponTypeArg>,

    /// Discount amount
    #[arg(long)]
    pub discount: Option<String>,

    /// First valid day (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last valid day (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Who the coupon applies to
    #[arg(long)]
    pub category: Option<CategoryArg>,

    /// Age range START-END for age-group coupons (repeatable)
    #[arg(long = "age-group", value_name = "START-END")]
    pub age_groups: Vec<String>,

    /// Comma-separated day list for DFS coupons (e.g. "1,3,5")
    #[arg(long)]
    pub dfs: Option<String>,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Coupon code
    #[arg(long, default_value = "")]
    pub code: String,

    /// Product price
    #[arg(long, default_value = "")]
    pub price: String,

    /// Id of the user buying the product
    #[arg(long, default_value = "")]
    pub user_id: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the loaded configuration
    Show,

    /// Print the configuration file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
