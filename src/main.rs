use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storyboard_engine::showcase;
use storyboard_engine::templates::PromptLanguage;
use storyboard_engine::{AppConfig, ContentGenerator, ContentPack};

#[derive(Parser)]
#[command(name = "storyboard-engine")]
#[command(about = "AI Short-Drama Storyboard & Prompt Generator", long_about = None)]
struct Cli {
    /// Config file (defaults to ./storyboard.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Content pack with vocabulary tables and templates (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pack: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header, storyboard, image prompts and motion formula
    Demo {
        /// Number of scenes
        #[arg(short, long)]
        scenes: Option<usize>,
    },
    /// Print a storyboard table
    Storyboard {
        /// Number of scenes
        #[arg(short, long)]
        scenes: Option<usize>,
    },
    /// Print an image prompt pair
    ImagePrompt {
        /// Which prompt(s) to print
        #[arg(long, value_enum, default_value_t = LangChoice::Both)]
        lang: LangChoice,
    },
    /// Print an image-to-video motion formula
    VideoPrompt,
    /// List the vocabulary tables of the active content pack
    Vocab {
        /// Print the whole pack as an editable TOML file instead
        #[arg(long)]
        dump: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LangChoice {
    En,
    Zh,
    Both,
}

impl LangChoice {
    fn languages(self) -> &'static [PromptLanguage] {
        match self {
            LangChoice::En => &[PromptLanguage::En],
            LangChoice::Zh => &[PromptLanguage::Zh],
            LangChoice::Both => &[PromptLanguage::En, PromptLanguage::Zh],
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load config")?;

    let pack_path = cli.pack.or_else(|| config.generation.content_pack.clone());
    let pack = match pack_path {
        Some(path) => ContentPack::from_toml_file(&path)
            .with_context(|| format!("Failed to load content pack: {}", path.display()))?,
        None => ContentPack::default(),
    };

    let seed = cli.seed.or(config.generation.seed);
    let production = config.production.clone();
    let mut generator = match seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            ContentGenerator::from_seed(production, pack, seed)?
        }
        None => ContentGenerator::from_entropy(production, pack)?,
    };
    let default_scenes = config.generation.scene_count;

    match cli.command {
        Some(Commands::Storyboard { scenes }) => {
            println!(
                "{}",
                generator.generate_storyboard(scenes.unwrap_or(default_scenes))
            );
        }
        Some(Commands::ImagePrompt { lang }) => {
            let prompt = generator.generate_image_prompt();
            print!("{}", showcase::image_prompt_blocks(&prompt, lang.languages()));
        }
        Some(Commands::VideoPrompt) => {
            println!("{}", generator.generate_video_prompt());
        }
        Some(Commands::Demo { scenes }) => {
            print_showcase(&mut generator, scenes.unwrap_or(default_scenes));
        }
        Some(Commands::Vocab { dump }) => print_vocab(generator.pack(), dump)?,
        None => print_showcase(&mut generator, default_scenes),
    }

    Ok(())
}

fn print_showcase(generator: &mut ContentGenerator, scene_count: usize) {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
    print!(
        "{}",
        showcase::render(generator, scene_count, &generated_at.to_string())
    );
}

fn print_vocab(pack: &ContentPack, dump: bool) -> Result<()> {
    if dump {
        print!("{}", pack.to_toml()?);
        return Ok(());
    }
    println!("Content pack v{} ({})", pack.version, pack.fingerprint()?);
    for (name, vocabulary) in pack.vocabulary.named() {
        println!("  {:<28} {}", name, vocabulary.entries().len());
    }
    Ok(())
}
