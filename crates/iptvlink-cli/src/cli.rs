use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use iptvlink_core::ReportProfile;
use iptvlink_core::compare::DEFAULT_COMPARE_LIMIT;
use iptvlink_core::featured::DEFAULT_FEATURED_FILE;
use iptvlink_core::sanitize::DEFAULT_SAMPLE_IDS;
use iptvlink_core::split::{DEFAULT_OUTPUT_DIR, DEFAULT_PARTS};
use iptvlink_core::stats::{LONG_DESCRIPTION_CHARS, LONG_WORD_CHARS};
use iptvlink_core::url::PORTAL_LOAD_URL;

use crate::config;

/// Developer tools for the IPTV Link client app
#[derive(Parser)]
#[command(name = "iptvlink")]
#[command(about = "Debug and massage data for the IPTV Link client app", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "iptvlink_core=trace")
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch OMDb ratings for a list of movie titles
    Ratings {
        /// Line-delimited list of titles
        #[arg(short, long, default_value = "movies.txt")]
        input: PathBuf,

        /// Where to write the title -> rating map
        #[arg(short, long, default_value = "ratings.json")]
        output: PathBuf,

        /// OMDb API key, prompted for when absent
        #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Write featured.json from this week's TMDB trending movies
    Featured {
        #[arg(short, long, default_value = DEFAULT_FEATURED_FILE)]
        output: PathBuf,

        /// TMDB API key, prompted for when absent
        #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Handshake with the portal and print its VOD categories
    Categories {
        /// Portal load.php endpoint
        #[arg(long, env = "IPTVLINK_PORTAL_URL", default_value = PORTAL_LOAD_URL)]
        portal_url: String,

        /// MAC address presented to the portal
        #[arg(long, env = "IPTVLINK_PORTAL_MAC")]
        mac: Option<String>,
    },

    /// Generate poster imagesets for the iOS asset catalog
    Assets {
        /// Directory holding poster_<n>.webp / .jpg
        #[arg(long, default_value = config::DEFAULT_POSTER_SOURCE_DIR)]
        source_dir: PathBuf,

        /// Assets.xcassets directory
        #[arg(long, default_value = config::DEFAULT_ASSETS_DIR)]
        assets_dir: PathBuf,

        #[arg(long, default_value_t = 1)]
        first: u32,

        #[arg(long, default_value_t = 15)]
        last: u32,
    },

    /// Print per-category statistics of a cached search index
    Analyze {
        #[command(flatten)]
        cache: CacheArgs,

        /// Categories to analyze
        #[arg(short, long = "category", default_values = ["6", "45"])]
        categories: Vec<String>,

        /// Statistics to include
        #[arg(long, value_enum, default_value_t = Profile::Full)]
        profile: Profile,

        /// Prefix of each report label
        #[arg(long, default_value = "Category")]
        label: String,
    },

    /// Compare one category between two cached search indexes
    Compare {
        /// Reference cache (e.g. simulator)
        #[arg(long, env = "IPTVLINK_SIM_CACHE", default_value = config::DEFAULT_SIM_CACHE)]
        left: PathBuf,

        /// Cache under test (e.g. Apple TV)
        #[arg(long, env = "IPTVLINK_DEVICE_CACHE", default_value = config::DEFAULT_DEVICE_CACHE)]
        right: PathBuf,

        #[arg(short, long, default_value = "6")]
        category: String,

        /// Shared records compared field by field
        #[arg(long, default_value_t = DEFAULT_COMPARE_LIMIT)]
        limit: usize,
    },

    /// Split a cached search index into chunk files
    Split {
        #[command(flatten)]
        cache: CacheArgs,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_PARTS)]
        parts: usize,
    },

    /// List descriptions at or above a length threshold
    LongDescriptions {
        #[command(flatten)]
        cache: CacheArgs,

        #[arg(short, long, default_value = "6")]
        category: String,

        #[arg(long, default_value_t = LONG_DESCRIPTION_CHARS)]
        min_chars: usize,
    },

    /// List unbreakable words at or above a length threshold
    LongWords {
        #[command(flatten)]
        cache: CacheArgs,

        #[arg(short, long, default_value = "6")]
        category: String,

        #[arg(long, default_value_t = LONG_WORD_CHARS)]
        min_len: usize,
    },

    /// Report description lengths before and after sanitizing
    VerifySanitization {
        #[command(flatten)]
        cache: CacheArgs,

        #[arg(short, long, default_value = "6")]
        category: String,

        /// Record ids to show in full
        #[arg(long = "sample", default_values = DEFAULT_SAMPLE_IDS)]
        samples: Vec<String>,
    },
}

/// Location of the cached search index
#[derive(Args)]
pub struct CacheArgs {
    /// Path to search_index.json
    #[arg(long = "cache", env = "IPTVLINK_CACHE", default_value = config::DEFAULT_DEVICE_CACHE)]
    pub path: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Lengths, word size, non-ASCII and missing images
    Compact,
    /// Everything, including empty fields, durations and dates
    Full,
}

impl From<Profile> for ReportProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Compact => ReportProfile::Compact,
            Profile::Full => ReportProfile::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let cli = Cli::try_parse_from(["iptvlink", "analyze", "--cache", "idx.json"]).unwrap();
        match cli.command {
            Commands::Analyze { cache, categories, profile, label } => {
                assert_eq!(cache.path, PathBuf::from("idx.json"));
                assert_eq!(categories, vec!["6", "45"]);
                assert!(profile == Profile::Full);
                assert_eq!(label, "Category");
            }
            _ => panic!("Expected analyze command"),
        }
    }

    #[test]
    fn test_parse_split_parts() {
        let cli = Cli::try_parse_from(["iptvlink", "split", "--cache", "idx.json", "-p", "4"]).unwrap();
        match cli.command {
            Commands::Split { parts, output_dir, .. } => {
                assert_eq!(parts, 4);
                assert_eq!(output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
            }
            _ => panic!("Expected split command"),
        }
    }

    #[test]
    fn test_parse_verify_samples_default() {
        let cli = Cli::try_parse_from(["iptvlink", "verify-sanitization", "--cache", "x.json"]).unwrap();
        match cli.command {
            Commands::VerifySanitization { samples, category, .. } => {
                assert_eq!(samples, vec!["22365", "47548"]);
                assert_eq!(category, "6");
            }
            _ => panic!("Expected verify-sanitization command"),
        }
    }
}
