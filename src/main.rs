use clap::Parser;
use resumatch::cli::commands::{Cli, Commands};
use resumatch::domain::entities::vector_entry::EntryMetadata;
use resumatch::domain::values::entry_kind::EntryKind;
use resumatch::ResuMatch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rm = match ResuMatch::open(&cli.config) {
        Ok(rm) => rm,
        Err(e) => {
            eprintln!("Error opening store: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(rm, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(rm: ResuMatch, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Add { json } => {
            let (embedding, metadata) = parse_entry(&json)?;
            rm.add(&embedding, &metadata)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Update { id, json } => {
            let (embedding, metadata) = parse_entry(&json)?;
            rm.update(&id, &embedding, &metadata)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Delete { id } => {
            rm.delete_by_id(&id)?;
            println!("Deleted {id}");
        }
        Commands::Get { id } => {
            let entry = rm.get(&id)?.ok_or_else(|| format!("No entry with id {id}"))?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        Commands::Search { embedding, top_k } => {
            let query: Vec<f32> = serde_json::from_str(&embedding)?;
            let results = rm.search(&query, top_k)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::List { entry_type } => {
            let entries = rm.list(entry_type.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Ingest { kind, text, id } => {
            let kind: EntryKind = kind.parse().map_err(|e: String| e)?;
            let metadata = rm.ingest(kind, id, text).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Match { text, kind, top_k } => {
            let kind = kind
                .map(|k| k.parse::<EntryKind>())
                .transpose()
                .map_err(|e: String| e)?;
            let results = rm.match_text(&text, kind, top_k).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Select { job_id, max, threshold } => {
            match job_id {
                Some(job_id) => {
                    let report = rm.select_candidates(&job_id, max, threshold)?;
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                None => {
                    let reports = rm.select_all_candidates(max, threshold)?;
                    println!("{}", serde_json::to_string_pretty(&reports)?);
                }
            }
        }
        Commands::Stats => {
            let stats = rm.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            let skipped = rm.skipped_rows();
            if skipped > 0 {
                eprintln!("{skipped} unreadable rows were skipped");
            }
        }
    }
    Ok(())
}

fn parse_entry(json: &str) -> Result<(Vec<f32>, EntryMetadata), Box<dyn std::error::Error>> {
    let data: serde_json::Value = serde_json::from_str(json)?;
    let metadata = EntryMetadata::from_json(&data)?;
    let raw = data
        .get("embedding")
        .cloned()
        .ok_or("Missing required field: embedding")?;
    let embedding: Vec<f32> = serde_json::from_value(raw)?;
    Ok((embedding, metadata))
}
