//! Command tree and the mapping from each command to its endpoint.
//!
//! DESIGN
//! ======
//! Parsing and endpoint selection are pure; `main` owns the only I/O. That
//! keeps every command testable without a backend.

use std::collections::BTreeMap;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use wire::endpoints::{self, collection, factcheck, news, sources, statistics};
use wire::{Endpoint, FactCheckFilter, NewSource, NewSourceGroup, PostFilter, SourceType, StatsProvider, Verdict};

use crate::CliError;

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

#[derive(Parser, Debug)]
#[command(name = "factdesk-cli", about = "Fact-check backend API CLI")]
pub struct Cli {
    #[arg(long, env = "FACTDESK_API_URL", default_value = "http://localhost:8095/api")]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backend health probe.
    Health,
    #[command(subcommand)]
    Sources(SourcesCommand),
    #[command(subcommand)]
    Collect(CollectCommand),
    #[command(subcommand)]
    Posts(PostsCommand),
    #[command(subcommand)]
    Factcheck(FactcheckCommand),
    #[command(subcommand)]
    Stats(StatsCommand),
    #[command(subcommand)]
    News(NewsCommand),
}

#[derive(Subcommand, Debug)]
pub enum SourcesCommand {
    List {
        /// Only sources of this group.
        #[arg(long)]
        group: Option<String>,
    },
    Get {
        id: String,
    },
    Create(CreateSourceArgs),
    Delete {
        id: String,
    },
    /// Source groups owned by a user.
    Groups {
        #[arg(long, env = "FACTDESK_USER_ID", default_value = "default")]
        user: String,
    },
    Group {
        id: String,
    },
    CreateGroup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, env = "FACTDESK_USER_ID", default_value = "default")]
        user: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateSourceArgs {
    /// facebook, news, rss, statistics, official_publication
    #[arg(long = "type")]
    pub source_type: String,
    #[arg(long)]
    pub identifier: String,
    /// Source group id (see `sources groups`).
    #[arg(long)]
    pub group: String,
    #[arg(long)]
    pub name: Option<String>,
    /// Collector config as a JSON object.
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long, default_value_t = false)]
    pub inactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum CollectCommand {
    Trigger {
        source_id: String,
        #[arg(long)]
        max_posts: Option<u32>,
    },
    Status {
        source_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostsCommand {
    List {
        #[arg(long)]
        source_id: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long)]
        offset: Option<u32>,
    },
    Get {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FactcheckCommand {
    Run {
        post_id: String,
        /// Restrict reference search to these sources.
        #[arg(long = "source")]
        sources: Vec<String>,
    },
    Get {
        post_id: String,
    },
    List {
        #[arg(long)]
        post_id: Option<String>,
        #[arg(long)]
        verdict: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Eurostat,
    Ksh,
}

impl From<Provider> for StatsProvider {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Eurostat => Self::Eurostat,
            Provider::Ksh => Self::Ksh,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    Search {
        #[arg(long, value_enum)]
        provider: Provider,
        query: String,
    },
    Dataset {
        #[arg(long, value_enum)]
        provider: Provider,
        code: String,
    },
    Collect {
        #[arg(long, value_enum)]
        provider: Provider,
        code: String,
        /// EUROSTAT dimension filter, e.g. `geo=HU`; repeatable.
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// KSH data source name.
        #[arg(long)]
        ksh_source: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NewsFeed {
    Mti,
    Rss,
    Kozlony,
}

#[derive(Subcommand, Debug)]
pub enum NewsCommand {
    /// List the MTI feed types.
    MtiFeeds,
    Mti {
        feed_type: String,
        #[arg(long)]
        max_items: Option<u32>,
    },
    Rss {
        feed_url: String,
        #[arg(long)]
        max_items: Option<u32>,
    },
    RssValidate {
        feed_url: String,
    },
    Kozlony {
        #[arg(long)]
        max_items: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
    },
    Search {
        #[arg(long, value_enum)]
        feed: NewsFeed,
        query: String,
        /// Only for `kozlony`.
        #[arg(long)]
        year: Option<i32>,
    },
}

// =============================================================================
// ENDPOINT SELECTION
// =============================================================================

/// The single backend call a command performs.
pub fn endpoint_for(command: &Command) -> Result<Endpoint, CliError> {
    Ok(match command {
        Command::Health => endpoints::health(),
        Command::Sources(cmd) => match cmd {
            SourcesCommand::List { group: None } => sources::list(),
            SourcesCommand::List { group: Some(group) } => sources::list_in_group(group),
            SourcesCommand::Get { id } => sources::get(id),
            SourcesCommand::Create(args) => sources::create(&new_source(args)?)?,
            SourcesCommand::Delete { id } => sources::delete(id),
            SourcesCommand::Groups { user } => sources::groups(user),
            SourcesCommand::Group { id } => sources::group(id),
            SourcesCommand::CreateGroup { name, description, user } => sources::create_group(
                user,
                &NewSourceGroup { name: name.clone(), description: description.clone() },
            )?,
        },
        Command::Collect(cmd) => match cmd {
            CollectCommand::Trigger { source_id, max_posts } => collection::trigger(source_id, *max_posts),
            CollectCommand::Status { source_id } => collection::status(source_id),
        },
        Command::Posts(cmd) => match cmd {
            PostsCommand::List { source_id, limit, offset } => collection::posts(&PostFilter {
                source_id: source_id.clone(),
                limit: Some(*limit),
                offset: *offset,
            }),
            PostsCommand::Get { id } => collection::post(id),
        },
        Command::Factcheck(cmd) => match cmd {
            FactcheckCommand::Run { post_id, sources } => {
                factcheck::run(post_id, (!sources.is_empty()).then_some(sources.as_slice()))
            }
            FactcheckCommand::Get { post_id } => factcheck::result(post_id),
            FactcheckCommand::List { post_id, verdict, limit } => factcheck::list(&FactCheckFilter {
                post_id: post_id.clone(),
                verdict: verdict.clone().map(Verdict::from),
                limit: Some(*limit),
            }),
        },
        Command::Stats(cmd) => stats_endpoint(cmd)?,
        Command::News(cmd) => match cmd {
            NewsCommand::MtiFeeds => news::mti_feeds(),
            NewsCommand::Mti { feed_type, max_items } => news::mti_collect(feed_type, *max_items),
            NewsCommand::Rss { feed_url, max_items } => news::rss_collect(feed_url, *max_items),
            NewsCommand::RssValidate { feed_url } => news::rss_validate(feed_url),
            NewsCommand::Kozlony { max_items, year } => news::kozlony_collect(*max_items, *year),
            NewsCommand::Search { feed, query, year } => match feed {
                NewsFeed::Mti => news::mti_search(query),
                NewsFeed::Rss => news::rss_search(query),
                NewsFeed::Kozlony => news::kozlony_search(query, *year),
            },
        },
    })
}

fn stats_endpoint(cmd: &StatsCommand) -> Result<Endpoint, CliError> {
    Ok(match cmd {
        StatsCommand::Search { provider, query } => statistics::search((*provider).into(), query),
        StatsCommand::Dataset { provider, code } => statistics::dataset((*provider).into(), code),
        StatsCommand::Collect { provider: Provider::Eurostat, code, filters, .. } => {
            let filters = parse_filters(filters)?;
            statistics::collect_eurostat(code, (!filters.is_empty()).then_some(&filters))
        }
        StatsCommand::Collect { provider: Provider::Ksh, code, ksh_source, .. } => {
            statistics::collect_ksh(code, ksh_source.as_deref())
        }
    })
}

fn new_source(args: &CreateSourceArgs) -> Result<NewSource, CliError> {
    let config = match args.config.as_deref() {
        Some(raw) => Some(serde_json::from_str::<Map<String, Value>>(raw)?),
        None => None,
    };
    Ok(NewSource {
        source_type: SourceType::from(args.source_type.clone()),
        identifier: args.identifier.clone(),
        source_group_id: args.group.clone(),
        name: args.name.clone(),
        config,
        is_active: Some(!args.inactive),
        schedule: None,
    })
}

/// `key=value` pairs grouped by key; a key may repeat.
fn parse_filters(raw: &[String]) -> Result<BTreeMap<String, Vec<String>>, CliError> {
    let mut filters: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .filter(|(k, v)| !k.trim().is_empty() && !v.trim().is_empty())
            .ok_or_else(|| CliError::InvalidFilter(pair.clone()))?;
        filters.entry(key.trim().to_owned()).or_default().push(value.trim().to_owned());
    }
    Ok(filters)
}
