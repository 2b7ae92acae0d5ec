// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use clap::{Args, Parser};

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "gopher")]
#[command(about = "🐹 Browse Gopher space from your terminal")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
      help_template = "{about}\nVersion: {bin} {version} 💻\n\nProvide a host to connect to. Or no arguments to use the configured home.\nUSAGE 📓:\n  gopher [\x1b[32mhost\x1b[0m] [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
  )]
pub struct CLIArg {
    #[arg(name = "host", help = "Gopher server to connect to.")]
    pub maybe_host: Option<String>,

    #[arg(long, short = 'p', help = "Port of the Gopher server.")]
    pub port: Option<u16>,

    #[arg(long, short = 's', help = "Selector of the home page.")]
    pub selector: Option<String>,

    #[arg(
        long,
        short = 't',
        help = "Give up on a fetch after this many seconds. Default is to wait forever."
    )]
    pub timeout_secs: Option<u64>,

    #[arg(
        long,
        short = 'c',
        help = "Path to a JSON config file. Default is `r3bl-gopher/config.json` in the user config folder."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        short = 'd',
        help = "Fetch the home page once, print it as plain text, and exit."
    )]
    pub dump: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging."
    )]
    pub enable_logging: bool,
}
