use clap::{Args, Parser, Subcommand};
use storyweave::{models::catalog, Config, PreferenceSet, ResultSet, StoryService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate short stories from a prompt or from preferences alone.
#[derive(Debug, Parser)]
#[command(name = "storyweave", version, about)]
struct Cli {
    /// Print the result set as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stories built around a prompt
    Search {
        prompt: String,
        #[command(flatten)]
        filters: Filters,
        #[arg(long)]
        theme: Option<String>,
    },
    /// Surprise stories from preferences only
    Generate {
        #[command(flatten)]
        filters: Filters,
        /// May be repeated
        #[arg(long = "theme")]
        themes: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct Filters {
    /// Number of stories wanted
    #[arg(long)]
    count: Option<u32>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    tone: Option<String>,
    /// short, medium or long
    #[arg(long)]
    length: Option<String>,
    /// 1 (focused) to 10 (wild)
    #[arg(long)]
    creativity: Option<i32>,
}

impl Filters {
    fn into_preferences(self) -> PreferenceSet {
        PreferenceSet {
            genre: self.genre,
            tone: self.tone,
            length: self.length,
            theme: None,
            themes: None,
            creativity: self.creativity,
            count: self.count,
        }
    }
}

fn warn_unknown_ids(prefs: &PreferenceSet) {
    if let Some(genre) = prefs.genre.as_deref().filter(|g| !catalog::is_known_genre(g)) {
        tracing::warn!("Unknown genre '{}', sending as-is", genre);
    }
    if let Some(tone) = prefs.tone.as_deref().filter(|t| !catalog::is_known_tone(t)) {
        tracing::warn!("Unknown tone '{}', sending as-is", tone);
    }
    if let Some(length) = prefs.length.as_deref().filter(|l| !catalog::is_known_length(l)) {
        tracing::warn!("Unknown length '{}', medium limits apply", length);
    }
    for theme in prefs.normalized_themes() {
        if !catalog::is_known_theme(&theme) {
            tracing::debug!("Custom theme '{}'", theme);
        }
    }
}

fn print_stories(result: &ResultSet, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("No stories returned.");
        return Ok(());
    }

    for story in &result.stories {
        match &story.model {
            Some(model) => println!("## {} ({})\n", story.title, model),
            None => println!("## {}\n", story.title),
        }
        println!("{}\n", story.content);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storyweave=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    let service = StoryService::new(&config)?;

    tracing::info!("Loaded configuration - endpoint: {}", service.endpoint());

    let result = match cli.command {
        Command::Search {
            prompt,
            filters,
            theme,
        } => {
            let mut prefs = filters.into_preferences();
            prefs.theme = theme;
            warn_unknown_ids(&prefs);
            service.search(&prompt, &prefs).await?
        }
        Command::Generate { filters, themes } => {
            let mut prefs = filters.into_preferences();
            prefs.themes = Some(themes);
            warn_unknown_ids(&prefs);
            service.generate(&prefs).await?
        }
    };

    print_stories(&result, cli.json)
}
