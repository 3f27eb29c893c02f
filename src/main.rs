use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wcloud_studio::{
    export, ExportFormat, InputMode, LineParser, Pipeline, Settings, TextTokenizer, WordCloud,
};

/// Turn a frequency list (or raw text) into a word cloud image.
///
/// Each input line holds a term and a weight, separated by a tab, a colon or
/// whitespace. Weights may be integers, decimals, percentages (`50.4%`) or
/// fractions (`1/4`).
#[derive(Parser, Debug)]
#[clap(name = "wcloud", version, about)]
struct Args {
    /// Input file; reads stdin when omitted
    #[clap(value_parser)]
    input: Option<PathBuf>,

    /// Where to write the image
    #[clap(short, long, value_parser, default_value = "wordcloud.png")]
    output: PathBuf,

    /// Treat the input as prose and count words
    #[clap(long, action)]
    raw: bool,

    /// Extra stop words for --raw, one per line
    #[clap(long, value_parser)]
    stop_words: Option<PathBuf>,

    /// JSON settings file; flags below override it
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// png, jpeg, svg or pdf; guessed from --output when omitted
    #[clap(short, long, value_parser)]
    format: Option<String>,

    #[clap(long, value_parser)]
    width: Option<u32>,

    #[clap(long, value_parser)]
    height: Option<u32>,

    #[clap(long, value_parser)]
    background: Option<String>,

    /// viridis, Pastel1, plasma, Set2, coolwarm, hot, autumn or rainbow
    #[clap(long, value_parser)]
    colormap: Option<String>,

    #[clap(long, value_parser)]
    min_font_size: Option<f32>,

    #[clap(long, value_parser)]
    max_font_size: Option<f32>,

    #[clap(long, value_parser)]
    max_words: Option<usize>,

    /// Multiplier applied to every weight after filtering
    #[clap(long, value_parser)]
    scale: Option<f64>,

    /// Drop terms whose normalized weight is below this
    #[clap(long, value_parser)]
    min_frequency: Option<f64>,

    #[clap(long, value_parser)]
    font: Option<PathBuf>,

    #[clap(long, value_parser)]
    quality: Option<u8>,

    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Print statistics about the final frequencies
    #[clap(long, action)]
    stats: bool,

    /// Print the final frequencies as JSON and skip rendering
    #[clap(long, action)]
    dump_json: bool,

    /// Report every input line that could not be parsed
    #[clap(long, action)]
    check: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_json_file(path)
                .with_context(|| format!("Unable to load settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(value) = self.width {
            settings.width = value;
        }
        if let Some(value) = self.height {
            settings.height = value;
        }
        if let Some(value) = &self.background {
            settings.background_color = value.clone();
        }
        if let Some(value) = &self.colormap {
            settings.colormap = value.clone();
        }
        if let Some(value) = self.min_font_size {
            settings.min_font_size = value;
        }
        if let Some(value) = self.max_font_size {
            settings.max_font_size = value;
        }
        if let Some(value) = self.max_words {
            settings.max_words = value;
        }
        if let Some(value) = self.scale {
            settings.scale = value;
        }
        if let Some(value) = self.min_frequency {
            settings.min_frequency = value;
        }
        if let Some(value) = &self.font {
            settings.font = Some(value.clone());
        }
        if let Some(value) = self.quality {
            settings.quality = value;
        }
        if let Some(value) = self.seed {
            settings.random_state = value;
        }

        settings.format = match &self.format {
            Some(name) => name.parse()?,
            None => ExportFormat::from_path(&self.output).unwrap_or(settings.format),
        };

        settings.validate()?;
        Ok(settings)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Unable to read {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Unable to read stdin")?;
                Ok(text)
            }
        }
    }

    fn tokenizer(&self) -> Result<TextTokenizer> {
        let mut tokenizer = TextTokenizer::default().with_default_stop_words();

        if let Some(path) = &self.stop_words {
            let extra = fs::read_to_string(path)
                .with_context(|| format!("Unable to read stop words from {}", path.display()))?;
            tokenizer.filter.extend(
                extra
                    .lines()
                    .map(|line| line.trim().to_lowercase())
                    .filter(|line| !line.is_empty()),
            );
        }

        Ok(tokenizer)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.settings()?;
    let text = args.read_input()?;

    if text.trim().is_empty() {
        anyhow::bail!("Please enter data to generate a word cloud");
    }

    let mode = if args.raw {
        InputMode::RawText
    } else {
        InputMode::FrequencyList
    };

    if args.check && mode == InputMode::FrequencyList {
        let report = LineParser::default().parse_report(&text);
        for (line, issue) in &report.issues {
            eprintln!("line {line}: {issue}");
        }
        eprintln!(
            "{} recognized, {} skipped",
            report.weights.len(),
            report.dropped()
        );
    }

    let pipeline = Pipeline::new(args.tokenizer()?);
    let outcome = pipeline.run(&text, mode, &settings)?;

    if args.stats {
        println!("{}", outcome.statistics);
    }

    if args.dump_json {
        println!("{}", serde_json::to_string_pretty(&outcome.weights)?);
        return Ok(());
    }

    let now = Instant::now();
    let wordcloud = WordCloud::from_settings(&settings)?;
    let words = wordcloud.layout(&outcome.weights, &settings)?;
    let image = wordcloud.render(&words, &settings)?;
    let bytes = export::encode(&words, &image, &settings)?;

    fs::write(&args.output, bytes)
        .with_context(|| format!("Unable to write {}", args.output.display()))?;

    tracing::info!(
        output = %args.output.display(),
        words = words.len(),
        elapsed_ms = now.elapsed().as_millis() as u64,
        "word cloud written"
    );

    Ok(())
}
