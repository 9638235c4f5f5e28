use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oxigraph::model::NamedNode;

use search_form_sync::{
    CliArgs, ClientConfig, FormSession, FormsClient, LoggingConfig, QueryParams, SourceQuery,
    init_logging, vocab,
};

#[derive(Parser)]
#[command(
    name = "search-form-sync",
    about = "Sync RDF-backed search-query forms with flat query parameters",
    version
)]
struct Cli {
    #[command(flatten)]
    connection: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a form session and print its query-parameter projection as JSON
    Project {
        /// Form definition uuid
        #[arg(long, value_name = "UUID")]
        form: String,
        /// REST id of an existing search query
        #[arg(long, value_name = "ID", requires = "query_uri")]
        query_id: Option<String>,
        /// Subject IRI of that search query
        #[arg(long, value_name = "URI", requires = "query_id")]
        query_uri: Option<String>,
    },
    /// Merge KEY=VALUE parameters into a session's source graph
    Merge {
        #[arg(long, value_name = "UUID")]
        form: String,
        #[arg(long, value_name = "ID", requires = "query_uri")]
        query_id: Option<String>,
        #[arg(long, value_name = "URI", requires = "query_id")]
        query_uri: Option<String>,
        /// Clear the source graph first (overwrite instead of accumulate)
        #[arg(long)]
        reset: bool,
        /// PUT the merged source graph back to the service
        #[arg(long, requires = "query_id")]
        save: bool,
        /// Parameters, each as KEY=VALUE (comma-join multiple values)
        #[arg(value_name = "KEY=VALUE", required = true)]
        params: Vec<String>,
    },
    /// Delete a search query resource
    Remove {
        #[arg(long, value_name = "ID")]
        query_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = Cli::parse();
    let config = ClientConfig::from_args(cli.connection)?;
    let client = FormsClient::new(&config)?;

    match cli.command {
        Command::Project {
            form,
            query_id,
            query_uri,
        } => {
            let source = source_query(query_id, query_uri)?;
            let session = FormSession::load(&client, &form, source).await?;
            let projected = session.project()?;
            println!("{}", serde_json::to_string_pretty(&projected)?);
        }
        Command::Merge {
            form,
            query_id,
            query_uri,
            reset,
            save,
            params,
        } => {
            let source = source_query(query_id, query_uri)?;
            let session = FormSession::load(&client, &form, source).await?;
            if reset {
                session.reset_source()?;
            }
            session.merge(&parse_params(&params)?)?;
            if save {
                let id = session
                    .query_id()
                    .context("--save needs an existing query (--query-id)")?;
                session.save(&client, id).await?;
                tracing::info!(query_id = id, "source data saved");
            } else {
                print!("{}", session.store().dump_graph_ntriples(vocab::SOURCE_GRAPH)?);
            }
        }
        Command::Remove { query_id } => {
            client.remove_source_data(&query_id).await?;
            tracing::info!(query_id, "source data removed");
        }
    }

    Ok(())
}

fn source_query(id: Option<String>, uri: Option<String>) -> Result<SourceQuery> {
    match (id, uri) {
        (Some(id), Some(uri)) => Ok(SourceQuery::Existing {
            id,
            uri: NamedNode::new(&uri).with_context(|| format!("invalid query URI {uri:?}"))?,
        }),
        (None, None) => Ok(SourceQuery::Fresh),
        // clap's `requires` already enforces the pairing; keep the guard
        // for programmatic construction.
        _ => anyhow::bail!("--query-id and --query-uri must be given together"),
    }
}

fn parse_params(pairs: &[String]) -> Result<QueryParams> {
    let mut params = QueryParams::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got {pair:?}"))?;
        params.set(key, value);
    }
    Ok(params)
}
