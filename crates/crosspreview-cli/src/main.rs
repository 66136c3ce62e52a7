//! Command-line previewer: parses a SwiftUI view file and writes an HTML
//! preview, or the parsed view tree as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use crosspreview_config::{Backend, Config, RenderSettings, Theme as ThemeSetting};
use crosspreview_engine::{
    BackendChoice, ParseResult, RenderOptions, SwiftUiParser, Theme, render_error_banner,
    render_page, render_with,
};
use std::{fs, path::PathBuf, process};

#[derive(Debug, Parser)]
#[command(name = "crosspreview", version, about = "Render a SwiftUI view file as HTML")]
struct Cli {
    /// Path to the .swift file
    input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the parse result as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Emit only the rendered tree and banner, without the page wrapper
    #[arg(long, conflicts_with = "json")]
    fragment: bool,

    /// Parser backend: auto, structural or fallback
    #[arg(long)]
    backend: Option<BackendChoice>,

    /// Config file to use instead of ~/.config/crosspreview/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug detail
    #[arg(short, long)]
    verbose: bool,
}

fn backend_choice(backend: Backend) -> BackendChoice {
    match backend {
        Backend::Auto => BackendChoice::Auto,
        Backend::Structural => BackendChoice::Structural,
        Backend::Fallback => BackendChoice::Fallback,
    }
}

fn render_options(settings: &RenderSettings) -> RenderOptions {
    RenderOptions {
        default_padding: settings.default_padding,
        default_spacing: settings.default_spacing,
        max_repeat: settings.max_repeat,
        theme: match settings.theme {
            ThemeSetting::Light => Theme::Light,
            ThemeSetting::Dark => Theme::Dark,
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let Some(path) = &cli.config else {
        log::debug!("Config path: {}", Config::config_path().display());
        return Ok(Config::load()?.unwrap_or_default());
    };
    let config_path = Config::expand_path(path).unwrap_or_else(|| path.clone());
    Config::load_from_path(&config_path)?.with_context(|| {
        format!("Config file '{}' does not exist", config_path.display())
    })
}

fn output(cli: &Cli, result: &ParseResult, options: &RenderOptions) -> Result<String> {
    if cli.json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    if cli.fragment {
        let tree = result
            .root()
            .map(|root| render_with(root, options))
            .unwrap_or_default();
        return Ok(format!("{}{tree}", render_error_banner(result.errors())));
    }
    Ok(render_page(result, options))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = load_config(&cli)?;
    let choice = cli.backend.unwrap_or(backend_choice(config.backend));
    let options = render_options(&config.render);

    let input = Config::expand_path(&cli.input).unwrap_or_else(|| cli.input.clone());
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    let mut parser = SwiftUiParser::new(choice)?;
    log::debug!("Parsing {} with the {} backend", input.display(), parser.backend_name());
    let result = parser.parse(&source);
    for error in result.errors() {
        log::warn!("{error}");
    }

    let rendered = output(&cli, &result, &options)?;
    match &cli.output {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("Wrote preview to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if result.root().is_none() {
        process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "crosspreview",
            "View.swift",
            "--backend",
            "fallback",
            "--fragment",
            "-o",
            "out.html",
        ])
        .unwrap();
        assert_eq!(cli.backend, Some(BackendChoice::Fallback));
        assert!(cli.fragment);
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn json_and_fragment_conflict() {
        assert!(Cli::try_parse_from(["crosspreview", "a.swift", "--json", "--fragment"]).is_err());
    }

    #[test]
    fn settings_map_to_render_options() {
        let settings = RenderSettings {
            max_repeat: 3,
            theme: ThemeSetting::Dark,
            ..RenderSettings::default()
        };
        let options = render_options(&settings);
        assert_eq!(options.max_repeat, 3);
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(backend_choice(Backend::Structural), BackendChoice::Structural);
    }
}
