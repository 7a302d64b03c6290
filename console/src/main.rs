use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::dedup::remove_duplicates;
use search_core::paginator::paginate;
use search_core::request_queue::RequestQueue;
use search_core::timing::LogDuration;
use search_core::{DocumentStatus, EngineConfig, ExecutionPolicy, SearchServer, StopWords};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: i32,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search-console")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (JSON / JSONL file or a directory of them)
    #[arg(long)]
    input: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Remove documents whose vocabulary repeats an earlier one
    #[arg(long, default_value_t = false)]
    dedupe: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for one or more queries
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query text; repeat for several queries
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Only documents with this status
        #[arg(long, default_value = "active")]
        status: String,
        /// Rank on the worker pool
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Print results in pages of this size instead of JSON
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show which query words a document contains
    Match {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: i32,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    results: &'a [search_core::Document],
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    id: i32,
    words: Vec<&'a str>,
    status: DocumentStatus,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, queries, status, parallel, page_size } => {
            let server = load_server(&corpus)?;
            let status = parse_status(&status)?;
            search(&server, &queries, status, policy(parallel), page_size)
        }
        Commands::Match { corpus, query, id, parallel } => {
            let server = load_server(&corpus)?;
            let (words, status) = server.match_document_with(policy(parallel), &query, id)?;
            println!("{}", serde_json::to_string(&MatchOutput { id, words, status })?);
            Ok(())
        }
    }
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}

fn parse_status(status: &str) -> Result<DocumentStatus> {
    serde_json::from_value(serde_json::Value::String(status.to_lowercase()))
        .with_context(|| format!("unknown document status {status:?}"))
}

fn search(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    policy: ExecutionPolicy,
    page_size: Option<usize>,
) -> Result<()> {
    let _timer = LogDuration::new("search");
    let mut requests = RequestQueue::new(server).with_policy(policy);
    for query in queries {
        let results = requests.add_find_request_by_status(query, status)?;
        match page_size {
            Some(size) => {
                for page in &paginate(&results, size)? {
                    println!("{page}");
                    println!("Page break");
                }
            }
            None => println!("{}", serde_json::to_string(&SearchOutput { query, results: &results })?),
        }
    }
    tracing::info!(queries = queries.len(), no_result = requests.no_result_requests(), "queries answered");
    Ok(())
}

fn load_server(args: &CorpusArgs) -> Result<SearchServer> {
    let config = match &args.config {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(f))?
        }
        None => EngineConfig::default(),
    };
    let mut server = SearchServer::with_config(StopWords::parse(&args.stop_words)?, config)?;

    let _timer = LogDuration::new("load documents");
    for file in input_files(Path::new(&args.input)) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut server)?;
        } else {
            load_json(&file, &mut server)?;
        }
    }
    tracing::info!(num_docs = server.document_count(), "ingested documents");

    if args.dedupe {
        let removed = remove_duplicates(&mut server);
        tracing::info!(removed = removed.len(), num_docs = server.document_count(), "duplicates removed");
    }
    Ok(server)
}

fn input_files(input_path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    files
}

fn load_jsonl(file: &Path, server: &mut SearchServer) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)?;
        ingest_doc(doc, server)?;
    }
    Ok(())
}

fn load_json(file: &Path, server: &mut SearchServer) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                ingest_doc(doc, server)?;
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            ingest_doc(doc, server)?;
        }
        _ => {}
    }
    Ok(())
}

fn ingest_doc(doc: InputDoc, server: &mut SearchServer) -> Result<()> {
    server
        .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
        .with_context(|| format!("adding document {}", doc.id))
}
