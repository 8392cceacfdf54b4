//! Command-line arguments.

use crate::core::constants::MAX_PLAYERS;

pub const USAGE: &str = "\
Slither - local multiplayer snake for the terminal

Usage: slither [options]

Options:
  --players N     Number of snakes (1-8), overrides the config file
  --print-config  Print the effective config as JSON and exit
  --init-config   Write the default config to ~/.slither/config.json and exit
  --version       Show version information
  --help          Show this help message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliAction {
    Play,
    PrintConfig,
    InitConfig,
    Version,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliOptions {
    pub action: CliAction,
    pub players: Option<usize>,
}

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        action: CliAction::Play,
        players: None,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--help" | "-h" => options.action = CliAction::Help,
            "--version" | "-v" => options.action = CliAction::Version,
            "--print-config" => options.action = CliAction::PrintConfig,
            "--init-config" => options.action = CliAction::InitConfig,
            "--players" | "-p" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--players needs a value".to_string())?;
                let players: usize = value
                    .as_ref()
                    .parse()
                    .map_err(|_| format!("Invalid player count: {}", value.as_ref()))?;
                if players == 0 || players > MAX_PLAYERS {
                    return Err(format!("Player count must be between 1 and {MAX_PLAYERS}"));
                }
                options.players = Some(players);
            }
            other => return Err(format!("Unknown command: {}", other)),
        }
    }

    Ok(options)
}
