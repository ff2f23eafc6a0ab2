// Copyright (c) 2026 rezky_nightky

mod cell;
mod config;
mod countdown;
mod error;
mod font;
mod frame;
mod palette;
mod terminal;
mod timespec;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};

use crate::config::{color_enabled_stderr, color_enabled_stdout, Args, DisplayConfig};
use crate::countdown::{CountdownEngine, Outcome};
use crate::error::TimerError;
use crate::terminal::{restore_terminal_best_effort, Bell, Screen, Terminal, Ticker};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn fail(err: TimerError) -> ! {
    log::debug!("rejected input: {:?}", err);
    if color_enabled_stderr() {
        eprintln!("\x1b[31m{}\x1b[0m", err);
    } else {
        eprintln!("{}", err);
    }
    std::process::exit(1);
}

fn quit_notice(color: bool) -> &'static str {
    if color {
        "\x1b[31mQuitting...\x1b[0m"
    } else {
        "Quitting..."
    }
}

fn init_logging() {
    let env = env_logger::Env::new().filter_or(config::LOG_ENV, "warn");
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();
}

fn install_cancel_handlers(cancel: &Arc<AtomicBool>) {
    #[cfg(unix)]
    {
        for sig in [SIGINT, SIGTERM, SIGHUP] {
            if let Err(e) = signal_hook::flag::register(sig, Arc::clone(cancel)) {
                log::warn!("failed to install handler for signal {}: {}", sig, e);
            }
        }
    }

    #[cfg(windows)]
    {
        let flag = Arc::clone(cancel);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    init_logging();

    let cancel = Arc::new(AtomicBool::new(false));
    install_cancel_handlers(&cancel);

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_fonts {
        print!("{}", font::catalog_listing(color_enabled_stdout()));
        return Ok(());
    }

    let face = font::require(&args.font).unwrap_or_else(|e| fail(e));

    let raw = match args.duration.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fail(TimerError::MissingArgument),
    };

    let target = timespec::parse(&raw, &Local::now()).unwrap_or_else(|e| fail(e));
    log::info!(
        "target {} ({} s), font {}",
        target.instant.with_timezone(&Local),
        target.total_seconds(),
        face.name
    );

    let display = DisplayConfig::new(args.message);
    let thresholds = display.thresholds;
    let engine = CountdownEngine::new(target, &thresholds, !args.no_bell);

    let outcome = {
        let term = Terminal::new()?;
        let mut screen = Screen::new(term, face, display);
        screen.show_label()?;
        let mut ticks = Ticker::new(Arc::clone(&cancel));
        engine.run(&mut ticks, &mut screen, &mut Bell)
    };

    match outcome? {
        Outcome::Cancelled => {
            log::info!(
                "cancelled (signal: {})",
                cancel.load(Ordering::SeqCst)
            );
            println!("{}", quit_notice(color_enabled_stdout()));
        }
    }

    Ok(())
}
