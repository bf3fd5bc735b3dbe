use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use llm_output_format_gen::codec::schema_utils::state_format_schema;
use llm_output_format_gen::config::{BASE_URL_VAR, TOP_LEVEL_KEY_VAR};
use llm_output_format_gen::{AppConfig, Edit, EditorState, FieldList, Generator};

#[derive(Parser)]
#[command(version, about = "JSON Schema generator for LLM JSON formatted output")]
struct Cli {
    /// Origin and path that share links point at.
    #[arg(long, global = true, env = BASE_URL_VAR)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the schema and share link for a field list.
    Generate {
        /// JSON array of fields.
        #[arg(long, conflicts_with = "from_url")]
        input: Option<PathBuf>,
        /// Share link (or bare query) to start from.
        #[arg(long)]
        from_url: Option<String>,
        #[arg(long, env = TOP_LEVEL_KEY_VAR)]
        top_level_key: Option<String>,
    },
    /// Print the field list and top-level key stored in a share link.
    Decode { url: String },
    /// Apply a JSON array of edit events to a share link.
    Edit {
        #[arg(long, default_value = "")]
        from_url: String,
        #[arg(long)]
        edits: PathBuf,
    },
    /// Print the JSON Schema of the `items` share-link parameter.
    StateSchema,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let generator = Generator::new(config);

    match cli.command {
        Command::Generate { input, from_url, top_level_key } => {
            let mut editor = match (input, from_url) {
                (Some(path), _) => {
                    let fields: FieldList = serde_json::from_str(&fs::read_to_string(path)?)?;
                    EditorState { fields, ..generator.empty_state() }
                }
                (None, Some(url)) => generator.hydrate(&url),
                (None, None) => generator.empty_state(),
            };
            if let Some(key) = top_level_key {
                editor = editor.with_top_level_key(key);
            }

            let out = generator.generate(&editor)?;
            println!("{}", out.schema);
            println!();
            println!("🔗 {}", out.share_url);
        }
        Command::Decode { url } => {
            let editor = generator.hydrate(&url);
            println!("topLevelKey: {}", editor.top_level_key);
            println!("{}", serde_json::to_string_pretty(&editor.fields)?);
        }
        Command::Edit { from_url, edits } => {
            let edits: Vec<Edit> = serde_json::from_str(&fs::read_to_string(edits)?)?;
            let editor = edits
                .iter()
                .fold(generator.hydrate(&from_url), |editor, edit| editor.apply(edit));
            let out = generator.generate(&editor)?;
            println!("{}", out.share_url);
        }
        Command::StateSchema => {
            println!("{}", serde_json::to_string_pretty(&state_format_schema()?)?);
        }
    }

    Ok(())
}
