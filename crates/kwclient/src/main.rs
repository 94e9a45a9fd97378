//
// main.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! kwclient
//!
//! Encodes and decodes Jupyter wire messages from the command line.
#![allow(missing_docs)]

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use kwire::jupyter_messages::JupyterMsg;
use kwire::requests::{self, CursorPos, HistoryOptions, Request};
use kwire::{OutboundMessage, Session, WireMessage};
use kwshared::message_type::MessageType;
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod frames;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The key used to sign and verify messages; empty for unsigned messages
    #[arg(short, long, env = "KWIRE_KEY", default_value_t = String::new(), hide_env_values = true)]
    key: String,

    /// The username to put in message headers. Defaults to the current user.
    #[arg(short, long)]
    username: Option<String>,

    /// The log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a request and print its frames as a JSON array
    Encode {
        /// Routing identities to place before the delimiter
        #[arg(short, long)]
        ident: Vec<String>,

        /// Metadata for the message, as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,

        /// Binary buffers to attach, hex encoded
        #[arg(short, long)]
        buffer: Vec<String>,

        #[command(subcommand)]
        request: RequestCommand,
    },

    /// Verify and decode a JSON array of frames
    Decode {
        /// The file to read the frames from. Optional; if not provided, the
        /// frames are read from stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List the known message types
    Types,
}

#[derive(Subcommand, Debug)]
enum RequestCommand {
    /// An execute_request
    Execute {
        /// The code to execute
        #[arg(short, long)]
        code: String,

        /// Execute as quietly as possible
        #[arg(long)]
        silent: bool,

        /// Don't record the code in the kernel's history
        #[arg(long)]
        no_store_history: bool,

        /// Don't let the kernel prompt for input
        #[arg(long)]
        no_stdin: bool,

        /// Abort the execution queue if an error occurs
        #[arg(long)]
        stop_on_error: bool,
    },

    /// An inspect_request
    Inspect {
        #[command(flatten)]
        cursor: CursorArgs,

        /// The detail level (0 or 1)
        #[arg(short, long, default_value_t = 0)]
        detail: u8,
    },

    /// A complete_request
    Complete {
        #[command(flatten)]
        cursor: CursorArgs,
    },

    /// A history_request
    History {
        /// The access type: range, tail or search
        #[arg(short, long)]
        access_type: String,

        #[arg(long)]
        output: bool,

        #[arg(long)]
        raw: bool,

        #[arg(long)]
        unique: bool,

        #[arg(long, allow_negative_numbers = true)]
        session: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        start: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        stop: Option<i64>,

        #[arg(short, long)]
        n: Option<u32>,

        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// An is_complete_request
    IsComplete {
        #[arg(short, long)]
        code: String,
    },

    /// A comm_info_request
    CommInfo {
        /// Only report comms with this target name
        #[arg(short, long)]
        target_name: Option<String>,
    },

    /// A kernel_info_request
    KernelInfo,

    /// A shutdown_request
    Shutdown {
        /// Ask the kernel to prepare for a restart
        #[arg(short, long)]
        restart: bool,
    },

    /// An interrupt_request
    Interrupt,

    /// An input_reply
    InputReply {
        /// The text the user entered
        #[arg(short, long)]
        value: String,
    },
}

#[derive(ClapArgs, Debug)]
struct CursorArgs {
    /// The code containing the cursor
    #[arg(short, long)]
    code: String,

    /// The cursor offset, in characters. Defaults to the end of the code.
    #[arg(short, long, conflicts_with_all = ["line", "column"])]
    pos: Option<usize>,

    /// The zero-based line of the cursor
    #[arg(long, requires = "column")]
    line: Option<usize>,

    /// The zero-based column of the cursor
    #[arg(long, requires = "line")]
    column: Option<usize>,
}

impl CursorArgs {
    fn cursor(&self) -> CursorPos {
        match (self.pos, self.line, self.column) {
            (Some(pos), _, _) => CursorPos::Offset(pos),
            (None, Some(line), Some(column)) => CursorPos::LineColumn { line, column },
            _ => CursorPos::Offset(self.code.chars().count()),
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(log_level: Option<&str>) {
    // Derive the log level: command line first, then RUST_LOG, then "warn"
    let log_level = match log_level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
    };

    // Match the log level to a `LevelFilter`
    let log_level = match log_level.as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => {
            eprintln!("Invalid log level '{}'; using 'warn'", log_level);
            LevelFilter::Warn
        }
    };

    // Logs go to stderr so they never mix with the JSON on stdout
    if let Err(err) = TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize terminal logging: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), anyhow::Error> {
    let session = Session::new(args.key);
    debug!("Using {:?}", session);

    match args.command {
        Commands::Encode {
            ident,
            metadata,
            buffer,
            request,
        } => {
            let username = args.username.unwrap_or_else(current_username);
            let mut message = outbound_message(request)?.with_idents(ident);
            if let Some(metadata) = metadata {
                let metadata: serde_json::Value =
                    serde_json::from_str(&metadata).context("Metadata is not valid JSON")?;
                message = message.with_metadata(metadata);
            }
            let buffers = buffer
                .iter()
                .map(|b| hex::decode(b).with_context(|| format!("Buffer '{}' is not valid hex", b)))
                .collect::<Result<Vec<_>, _>>()?;
            message = message.with_buffers(buffers);

            let wire = WireMessage::encode(&session, &username, message)?;
            debug!("Encoded message {}", wire.msg_id);
            println!(
                "{}",
                serde_json::to_string_pretty(&frames::frames_to_json(&wire.frames))?
            );
        }
        Commands::Decode { file } => {
            let mut input = String::new();
            match file {
                Some(path) => {
                    File::open(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?
                        .read_to_string(&mut input)?;
                }
                None => {
                    io::stdin().read_to_string(&mut input)?;
                }
            }
            let value: serde_json::Value =
                serde_json::from_str(&input).context("Input is not valid JSON")?;
            let frame_list = frames::frames_from_json(&value)?;

            let (idents, message) = WireMessage::from_frames(&session, frame_list)
                .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;
            debug!("Decoded message with {} identities", idents.0.len());

            println!("{}", serde_json::to_string_pretty(&message)?);
            println!("{:#?}", JupyterMsg::from(message));
        }
        Commands::Types => {
            for msg_type in MessageType::ALL {
                let marker = if msg_type.is_listenable() { "*" } else { " " };
                println!("{} {}", marker, msg_type);
            }
            println!();
            println!("* = may be listened for");
        }
    }
    Ok(())
}

fn outbound_message(request: RequestCommand) -> Result<OutboundMessage, anyhow::Error> {
    fn from<R: Request>(request: R) -> Result<OutboundMessage, anyhow::Error> {
        debug!("Building {} for the {:?} channel", R::MSG_TYPE, R::CHANNEL);
        Ok(OutboundMessage::from_request(&request)?)
    }

    match request {
        RequestCommand::Execute {
            code,
            silent,
            no_store_history,
            no_stdin,
            stop_on_error,
        } => from(
            requests::execute_request(code)
                .silent(silent)
                .store_history(!no_store_history)
                .allow_stdin(!no_stdin)
                .stop_on_error(stop_on_error),
        ),
        RequestCommand::Inspect { cursor, detail } => {
            let pos = cursor.cursor();
            from(requests::inspect_request(cursor.code, pos, detail)?)
        }
        RequestCommand::Complete { cursor } => {
            let pos = cursor.cursor();
            from(requests::complete_request(cursor.code, pos)?)
        }
        RequestCommand::History {
            access_type,
            output,
            raw,
            unique,
            session,
            start,
            stop,
            n,
            pattern,
        } => from(requests::history_request(
            &access_type,
            HistoryOptions {
                output,
                raw,
                unique,
                session,
                start,
                stop,
                n,
                pattern,
            },
        )?),
        RequestCommand::IsComplete { code } => from(requests::is_complete_request(code)),
        RequestCommand::CommInfo { target_name } => {
            from(requests::comm_info_request(target_name.as_deref()))
        }
        RequestCommand::KernelInfo => from(requests::kernel_info_request()),
        RequestCommand::Shutdown { restart } => from(requests::shutdown_request(restart)),
        RequestCommand::Interrupt => from(requests::interrupt_request()),
        RequestCommand::InputReply { value } => from(requests::input_reply(value)),
    }
}

/// The name of the user running the tool, for message headers.
fn current_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| String::from("kernel"))
}
