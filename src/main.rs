use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::DefaultTerminal;

use idpc_autocomplete::ControllerOptions;
use idpc_autocomplete::config::load_config;

mod app;
mod widgets;

use app::App;

/// How long to wait for terminal input before polling lookups again
const TICK: Duration = Duration::from_millis(30);

/// Address bound to each field when the config file binds none
const DEFAULT_OUTPUT_FIELDS: &[&str] = &["line_1", "line_2", "line_3", "post_town", "postcode"];

/// Interactive UK address finder backed by the Ideal Postcodes API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial search text
    query: Option<String>,

    /// Config file (defaults to ~/.config/idpc-autocomplete/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API key, overriding the config file
    #[arg(short = 'k', long, env = "IDPC_API_KEY")]
    api_key: Option<String>,

    /// Verify the API key before searching
    #[arg(long)]
    check_key: bool,

    /// Title case the post town, e.g. "LONDON" becomes "London"
    #[arg(long)]
    titleize_post_town: bool,

    /// Drop the organisation name from the address lines
    #[arg(long)]
    remove_organisation: bool,

    /// Restrict results to these outward codes, e.g. "SW1A,EN1"
    #[arg(long, value_delimiter = ',')]
    postcode_outward: Vec<String>,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    init_logging();

    let args = Args::parse();

    // Load and validate config before the terminal switches modes
    let options = resolve_options(&args)?;
    let app = App::new(options, args.query.as_deref()).wrap_err("Failed to start autocomplete")?;

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(terminal, app);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    let app = result?;
    app.print_address();
    Ok(())
}

/// Merge the config file with command line overrides
fn resolve_options(args: &Args) -> Result<ControllerOptions> {
    let mut options = load_config(args.config.as_deref())?;

    if let Some(api_key) = &args.api_key {
        options.api_key = api_key.clone();
    }
    options.check_key |= args.check_key;
    options.titleize_post_town |= args.titleize_post_town;
    options.remove_organisation |= args.remove_organisation;
    if !args.postcode_outward.is_empty() {
        options.search_filters.postcode_outward = args.postcode_outward.clone();
    }
    if options.output_fields.is_empty() {
        for attribute in DEFAULT_OUTPUT_FIELDS {
            options = options.with_output(attribute, format!("#{}", attribute).as_str());
        }
    }

    options.validate()?;
    Ok(options)
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<App> {
    loop {
        app.tick();

        // Render the UI
        terminal.draw(|frame| app.render(frame))?;

        // Handle events
        if event::poll(TICK)? {
            match event::read()? {
                // Only process key press events (avoid duplicates)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(app)
}

/// Log to a file in debug builds; the terminal belongs to the UI
#[cfg(debug_assertions)]
fn init_logging() {
    use std::fs::OpenOptions;
    use std::io::Write;

    let path = std::env::temp_dir().join("idpc-autocomplete.log");
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("idpc_autocomplete=debug"),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    })
    .init();
}

#[cfg(not(debug_assertions))]
fn init_logging() {}
