//! CLI for LensCoach - camera settings and example photos for a scene.

use clap::{Args, Parser, Subcommand, ValueEnum};
use lenscoach::catalog::{self, CssVariables, ThemeController};
use lenscoach::{
    Brand, Credential, ExampleImage, HttpProviderFactory, PhotoProvider, ProviderConfig,
    ProviderFactory, ProviderKind, RequestOutcome, Session,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lenscoach")]
#[command(about = "Camera settings and example photos for a shooting scenario (Gemini, OpenAI)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenes
    Scenes,

    /// List the colour themes
    Themes,

    /// Print the CSS variables of a theme
    Theme {
        /// Theme id (e.g. sky-dark)
        id: String,
    },

    /// Recommend camera settings for a scene
    Suggest(SuggestArgs),

    /// Check that an API key is accepted by the provider
    Check(ProviderArgs),
}

#[derive(Args)]
struct ProviderArgs {
    /// Provider to use
    #[arg(short, long, value_enum, default_value = "google")]
    provider: ProviderArg,

    /// API key. Falls back to GOOGLE_API_KEY / OPENAI_API_KEY
    #[arg(long)]
    api_key: Option<String>,
}

impl ProviderArgs {
    fn kind(&self) -> ProviderKind {
        self.provider.into()
    }

    fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(self.kind().env_var()).ok())
    }
}

#[derive(Args)]
struct SuggestArgs {
    /// Scene id or name (see `lenscoach scenes`)
    scene: String,

    #[command(flatten)]
    provider: ProviderArgs,

    /// Camera brand (Any, Canon, Nikon, Sony, Fujifilm, Panasonic)
    #[arg(short, long, default_value = "Any")]
    brand: Brand,

    /// Camera model (e.g. "A7 IV", "R5")
    #[arg(short, long)]
    model: Option<String>,

    /// Directory to save example images into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    Google,
    Openai,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Google => ProviderKind::Google,
            ProviderArg::Openai => ProviderKind::OpenAi,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scenes => list_scenes(cli.json)?,
        Commands::Themes => list_themes(cli.json)?,
        Commands::Theme { id } => show_theme(&id, cli.json)?,
        Commands::Suggest(args) => suggest(args, cli.json).await?,
        Commands::Check(args) => check(args, cli.json).await?,
    }

    Ok(())
}

fn list_scenes(json_output: bool) -> anyhow::Result<()> {
    let scenes = catalog::scenes();
    if json_output {
        println!("{}", serde_json::to_string_pretty(scenes)?);
    } else {
        for scene in scenes {
            println!("  {:<32} {}", scene.id, scene.name);
        }
    }
    Ok(())
}

fn list_themes(json_output: bool) -> anyhow::Result<()> {
    let themes = catalog::themes();
    if json_output {
        let list: Vec<_> = themes
            .iter()
            .map(|t| serde_json::json!({ "id": t.id, "name": t.name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for (i, theme) in themes.iter().enumerate() {
            let default = if i == 0 { " (default)" } else { "" };
            println!("  {:<14} {}{}", theme.id, theme.name, default);
        }
    }
    Ok(())
}

fn show_theme(id: &str, json_output: bool) -> anyhow::Result<()> {
    let mut controller = ThemeController::new(CssVariables::new());
    let theme = controller.set_active(id)?;

    if json_output {
        let variables: serde_json::Map<String, serde_json::Value> = theme
            .colors
            .iter()
            .map(|(name, _)| {
                let value = controller.sink().get(name).unwrap_or_default();
                (name.to_string(), value.into())
            })
            .collect();
        let result = serde_json::json!({
            "id": theme.id,
            "name": theme.name,
            "variables": variables,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", controller.sink().to_css());
    }
    Ok(())
}

async fn suggest(args: SuggestArgs, json_output: bool) -> anyhow::Result<()> {
    let Some(scene) = catalog::find_scene(&args.scene) else {
        anyhow::bail!("Unknown scene '{}' (see `lenscoach scenes`)", args.scene);
    };

    let mut session = Session::default();
    if let Some(secs) = args.timeout {
        session = session.with_timeout(Duration::from_secs(secs));
    }

    session.select_provider(args.provider.kind());
    session.set_credential_input(&args.provider.api_key().unwrap_or_default());
    if let Some(message) = session.snapshot().credential_error {
        anyhow::bail!("{message} (pass --api-key or set {})", args.provider.kind().env_var());
    }
    session.save_credential();

    session.set_brand(args.brand);
    if let Some(model) = &args.model {
        session.set_model_input(model);
        if let Some(message) = session.snapshot().model_error {
            anyhow::bail!("{message}");
        }
    }

    if let Some(pending) = session.select_scene(scene) {
        pending.settled().await;
    }
    let snapshot = session.snapshot();

    let images: &[ExampleImage] = match &snapshot.images {
        Some(RequestOutcome::Success(images)) => images.as_slice(),
        _ => &[],
    };
    let mut saved = Vec::new();
    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)?;
        for (i, image) in images.iter().enumerate() {
            let path = dir.join(format!("{}-{}.{}", scene.id, i + 1, image.format.extension()));
            image.save(&path)?;
            saved.push(path);
        }
    }

    let settings = match &snapshot.settings {
        Some(RequestOutcome::Success(settings)) => settings,
        Some(RequestOutcome::Failure(reason)) => {
            if json_output {
                let result = serde_json::json!({
                    "success": false,
                    "scene": scene.name,
                    "error": reason,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            anyhow::bail!("{}", reason.message);
        }
        _ => anyhow::bail!("Settings request did not complete"),
    };

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "scene": scene.name,
            "provider": snapshot.provider,
            "brand": snapshot.brand,
            "settings": settings,
            "example_images": images.len(),
            "saved": saved.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} ({})\n", scene.name, snapshot.provider.label());
        for (label, value, explanation) in settings.rows() {
            println!("  {label:<14} {value}");
            println!("  {:<14} {explanation}", "");
        }
        println!("\n  Lens: {}", settings.lens_recommendation);
        println!("  Tip:  {}", settings.general_tip);
        if let Some(tip) = &settings.brand_specific_tip {
            println!("  {} tip: {tip}", snapshot.brand);
        }
        println!("\nExample images: {}", images.len());
        for path in &saved {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

async fn check(args: ProviderArgs, json_output: bool) -> anyhow::Result<()> {
    let kind = args.kind();
    let mut config = ProviderConfig::new(kind);
    if let Some(credential) = args.api_key().and_then(|key| Credential::new(kind, key)) {
        config = config.with_credential(credential);
    }

    let provider = HttpProviderFactory::new().connect(&config)?;
    let result = provider.health_check().await;

    if json_output {
        let output = serde_json::json!({
            "provider": kind,
            "name": provider.name(),
            "ok": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &result {
            Ok(()) => println!("✓ {} key accepted", provider.name()),
            Err(e) => println!("✗ {}: {e}", provider.name()),
        }
    }

    result?;
    Ok(())
}
