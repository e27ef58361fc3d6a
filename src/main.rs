// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::{Read, Write};
use std::path::PathBuf;

use tarjama::app_config::{self, Config, TranslationProvider};
use tarjama::{Controller, Language, LanguagePair};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Ollama,
    #[value(name = "openai")]
    OpenAI,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
        }
    }
}

/// CLI Wrapper for Language to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    Arabic,
    English,
}

impl From<CliLanguage> for Language {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Arabic => Language::Arabic,
            CliLanguage::English => Language::English,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every translating command
#[derive(Args, Debug)]
struct CommonArgs {
    /// Source language (defaults to the configuration, Arabic out of the box)
    #[arg(short, long, value_enum)]
    source_language: Option<CliLanguage>,

    /// Target language (defaults to the configuration, English out of the box)
    #[arg(short, long, value_enum)]
    target_language: Option<CliLanguage>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "TARJAMA_CONFIG")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Args, Debug)]
struct TextArgs {
    /// Text to translate; read from stdin when omitted or "-"
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Also save the translation to a file
    #[arg(long)]
    save: bool,

    /// File to save to instead of a temporary file (implies --save)
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct FileArgs {
    /// UTF-8 text file to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Where to write the translation (default: a new temporary file)
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text given as an argument or on stdin
    Text(TextArgs),

    /// Translate a text file and save the result
    File(FileArgs),

    /// Check that the configured backend answers for both directions
    Check(CommonArgs),

    /// Generate shell completions for tarjama
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tarjama - Arabic <-> English translator
///
/// Splits text into sentence-aligned chunks and translates each chunk with a
/// machine-translation backend (Ollama or an OpenAI-compatible server).
#[derive(Parser, Debug)]
#[command(name = "tarjama")]
#[command(version)]
#[command(about = "Arabic <-> English text and file translator")]
#[command(long_about = "tarjama translates text and UTF-8 text files between Arabic and English.

EXAMPLES:
    tarjama text \"مرحبا بالعالم\"                   # Arabic to English (default)
    tarjama text -s english -t arabic \"Hello.\"      # English to Arabic
    echo \"Hello.\" | tarjama text -s english -t arabic
    tarjama file notes.txt                          # Save translation to a temp file
    tarjama file notes.txt -o notes.en.txt          # Save to a chosen path
    tarjama check -p openai                         # Test the backend connection
    tarjama completions bash > tarjama.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", ""),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tarjama", &mut std::io::stdout());
            Ok(())
        }
        Commands::Text(args) => run_text(args).await,
        Commands::File(args) => run_file(args).await,
        Commands::Check(args) => run_check(args).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

/// Load the configuration, apply command line overrides and build the controller
fn prepare(common: &CommonArgs) -> Result<(Controller, LanguagePair)> {
    if let Some(level) = common.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(provider) = &common.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(source) = common.source_language {
        config.source_language = Language::from(source).code().to_string();
    }
    if let Some(target) = common.target_language {
        config.target_language = Language::from(target).code().to_string();
    }
    if let Some(level) = common.log_level {
        config.log_level = level.into();
    }

    config.validate().context("Configuration validation failed")?;

    if common.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let pair = config.language_pair()?;
    let controller = Controller::with_config(config)?.show_progress(!common.no_progress);
    Ok((controller, pair))
}

async fn run_text(args: TextArgs) -> Result<()> {
    let (controller, pair) = prepare(&args.common)?;

    let text = match args.text.as_deref() {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read text from stdin")?;
            buffer
        }
    };

    if args.save || args.output.is_some() {
        if let Some(saved) = controller.translate_and_save(&text, pair, args.output.as_deref()).await? {
            println!("{}", saved.preview);
            info!("Translation file: {}", saved.output_path.display());
        }
    } else {
        let translated = controller.translate_text(&text, pair).await;
        if !translated.is_empty() {
            println!("{}", translated);
        }
    }

    Ok(())
}

async fn run_file(args: FileArgs) -> Result<()> {
    let (controller, pair) = prepare(&args.common)?;

    match controller
        .translate_file(Some(&args.input_path), pair, args.output.as_deref())
        .await?
    {
        Some(saved) => {
            println!("{}", saved.preview);
            info!("Translation file: {}", saved.output_path.display());
        }
        None => info!("Nothing to translate in {:?}", args.input_path),
    }

    Ok(())
}

async fn run_check(args: CommonArgs) -> Result<()> {
    let (controller, _) = prepare(&args)?;
    let provider = controller.config().translation.provider;

    controller.check_connection().await?;
    info!(
        "{} backend reachable at {}",
        provider.display_name(),
        controller.config().translation.get_endpoint()
    );
    Ok(())
}
