use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_gallery::query::{self, ALL_TAGS};
use prompt_gallery::storage::FileSystemStorage;
use prompt_gallery::{Gallery, GalleryConfig, PromptFields, PromptRecord, Theme};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory for locally saved prompts and preferences
    #[arg(long, env = "PROMPT_GALLERY_DATA_DIR", default_value = prompt_gallery::config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Static seed catalog (JSON array of prompts)
    #[arg(long, env = "PROMPT_GALLERY_SEED", default_value = prompt_gallery::seed::DEFAULT_SEED_PATH)]
    seed: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List prompts, optionally filtered
    List {
        /// Only prompts carrying this tag ("all" for no filter)
        #[arg(long, default_value = ALL_TAGS)]
        tag: String,
        /// Case-insensitive text to look for in title, prompt and tags
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List every tag in use
    Tags,
    /// Print one prompt in full
    Show { index: usize },
    /// Add a prompt at the top of the gallery
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        image: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Edit a prompt; omitted fields keep their current value
    Edit {
        index: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        /// Pass an empty string to clear the image
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a prompt
    Delete { index: usize },
    /// Show or change the UI theme (light, dark, toggle)
    Theme { value: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Use `RUST_LOG=info` (or debug, trace, etc.) to control log level
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    tracing::debug!(args = ?args, "Starting prompt gallery");

    let config = GalleryConfig {
        data_dir: args.data_dir,
        seed_path: args.seed,
    };
    let mut gallery = config
        .open()
        .await
        .with_context(|| format!("Failed to open gallery in '{}'", config.data_dir.display()))?;

    run(&mut gallery, args.command)
}

fn run(gallery: &mut Gallery<FileSystemStorage>, command: Command) -> Result<()> {
    match command {
        Command::List { tag, search } => {
            for (index, record) in gallery.view(&tag, &search) {
                print_summary(index, record);
            }
        }
        Command::Tags => {
            for tag in gallery.distinct_tags() {
                println!("{}", tag);
            }
        }
        Command::Show { index } => {
            let record = gallery.get(index)?;
            println!("title:  {}", record.title);
            println!("image:  {}", record.display_image());
            println!("tags:   {}", query::join_tags(&record.tags));
            println!();
            println!("{}", record.prompt);
        }
        Command::Add {
            title,
            prompt,
            image,
            tags,
        } => {
            let index = gallery.create(PromptFields::new(title, prompt, image, tags))?;
            print_summary(index, gallery.get(index)?);
        }
        Command::Edit {
            index,
            title,
            prompt,
            image,
            tags,
        } => {
            let current = PromptFields::from_record(gallery.get(index)?);
            let form = PromptFields {
                title: title.unwrap_or(current.title),
                prompt: prompt.unwrap_or(current.prompt),
                image: image.unwrap_or(current.image),
                tags: tags.unwrap_or(current.tags),
            };
            gallery.update(index, form)?;
            print_summary(index, gallery.get(index)?);
        }
        Command::Delete { index } => {
            let removed = gallery.delete(index)?;
            println!("Deleted '{}'", removed.title);
        }
        Command::Theme { value } => {
            let theme = match value.as_deref() {
                None => gallery.theme(),
                Some("toggle") => gallery.toggle_theme()?,
                Some(label) => {
                    let theme: Theme = label.parse().map_err(anyhow::Error::msg)?;
                    gallery.set_theme(theme)?;
                    theme
                }
            };
            println!("{}", theme);
        }
    }
    Ok(())
}

fn print_summary(index: usize, record: &PromptRecord) {
    let title = if record.title.is_empty() {
        "Untitled"
    } else {
        record.title.as_str()
    };
    if record.tags.is_empty() {
        println!("{:>3}  {}", index, title);
    } else {
        println!("{:>3}  {}  [{}]", index, title, query::join_tags(&record.tags));
    }
}
