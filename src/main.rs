#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use anyhow::Result;
    use clap::Parser;
    use hdb_search_ui::prefs::{load_preferences, save_preferences, FileStore};
    use hdb_search_ui::search::{
        HttpSuggestionSource, Key, Panel, SearchSession, SearchView, UiEvent,
    };
    use hdb_search_ui::{SearchPreferences, UiConfig};
    use std::path::PathBuf;
    use std::time::Duration;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    /// Type a query into the HDB flat search box and show what it suggests
    #[derive(Debug, Parser)]
    #[command(name = "hdb-search", version)]
    struct Cli {
        /// Text to type into the search box
        query: String,

        /// Town filter; defaults to the stored preference
        #[arg(long)]
        town: Option<String>,

        /// Flat type filter; defaults to the stored preference
        #[arg(long)]
        flat_type: Option<String>,

        /// Pick the Nth suggestion (1-based) with the arrow keys and Enter
        #[arg(long)]
        select: Option<usize>,

        /// Site origin serving the suggestion endpoint
        #[arg(long, env = "HDB_BASE_URL")]
        base_url: Option<String>,

        /// JSON file overriding the page settings
        #[arg(long, env = "HDB_CONFIG")]
        config: Option<PathBuf>,

        /// File standing in for browser local storage
        #[arg(long, default_value = ".hdb-search/storage.json")]
        storage: PathBuf,

        /// Delay between typed characters, in milliseconds
        #[arg(long, default_value_t = 80)]
        keystroke_ms: u64,
    }

    /// Prints what the page would show
    #[derive(Default)]
    struct TerminalView {
        panel: Panel,
        query: String,
    }

    impl SearchView for TerminalView {
        fn render_panel(&mut self, panel: &Panel) {
            self.panel = panel.clone();
        }

        fn set_query(&mut self, text: &str) {
            self.query = text.to_string();
        }

        fn clear_filters(&mut self) {}

        fn submit_form(&mut self) {
            println!("🔎 Submitting search for {:?}", self.query);
        }

        fn navigate(&mut self, url: &str) {
            println!("➡️  Opening {}", url);
        }
    }

    impl TerminalView {
        fn print_panel(&self) {
            if !self.panel.visible {
                println!("(no suggestions shown)");
                return;
            }
            if let Some(message) = self.panel.content.message() {
                println!("{}", message);
                return;
            }
            for (i, row) in self.panel.content.rows().iter().enumerate() {
                let marker = if self.panel.active == Some(i) { '>' } else { ' ' };
                println!("{} {}. {} ({})", marker, i + 1, row.title, row.price);
                println!("     {}", row.detail);
            }
        }
    }

    pub async fn run() -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        let cli = Cli::parse();

        let mut config = match &cli.config {
            Some(path) => UiConfig::from_file(path)?,
            None => UiConfig::default(),
        };
        if let Some(base_url) = cli.base_url.clone() {
            config.base_url = base_url;
        }

        let mut store = FileStore::new(&cli.storage);
        let stored = load_preferences(&store, &config.preferences_key);
        let town = cli.town.clone().or_else(|| stored.town().map(str::to_string));
        let flat_type = cli
            .flat_type
            .clone()
            .or_else(|| stored.flat_type().map(str::to_string));
        info!(
            "Filters: town={} flat_type={}",
            town.as_deref().unwrap_or("(any)"),
            flat_type.as_deref().unwrap_or("(any)")
        );

        let source = HttpSuggestionSource::new(&config)?;
        info!("Querying {}", source.endpoint());
        let mut session = SearchSession::new(&config, source, TerminalView::default());

        let mut typed = String::new();
        for ch in cli.query.chars() {
            typed.push(ch);
            session.handle(UiEvent::Input(typed.clone()));
            tokio::time::sleep(Duration::from_millis(cli.keystroke_ms)).await;
        }
        session.settle().await;
        session.view().print_panel();

        if let Some(n) = cli.select.filter(|&n| n > 0) {
            for _ in 0..n {
                session.handle(UiEvent::Key(Key::ArrowDown));
            }
            session.view().print_panel();
            session.handle(UiEvent::Key(Key::Enter));
        }

        let prefs = SearchPreferences::from_form(town.as_deref(), flat_type.as_deref());
        save_preferences(&mut store, &config.preferences_key, &prefs)?;
        info!("💾 Saved search preferences to {}", store.path().display());

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
