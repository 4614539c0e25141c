//! Core logic of the `odata-json` command-line tool.
//!
//! ```text
//! odata-json parse [--metadata <file>] [--content-type <value>] [--strict] [--recognize-dates]
//! odata-json serialize [--content-type <value>] [--data-service-version <v>]
//! ```
//!
//! The payload is read from stdin by the binary and handed to [`run`].

use std::path::PathBuf;

use odata_edm::{EdmError, EdmModel};

use crate::codec::{CodecOptions, JsonCodec, ParseContext, SerializeContext};
use crate::content_type::ContentType;
use crate::error::CodecError;

pub const USAGE: &str = "usage: odata-json <parse|serialize> [--metadata <file>] \
[--content-type <value>] [--data-service-version <v>] [--strict] [--recognize-dates]";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Model(EdmError),
    Codec(CodecError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(e) => write!(f, "{e}\n{USAGE}"),
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Json(e) => write!(f, "{e}"),
            CliError::Model(e) => write!(f, "metadata: {e}"),
            CliError::Codec(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<EdmError> for CliError {
    fn from(e: EdmError) -> Self {
        CliError::Model(e)
    }
}

impl From<CodecError> for CliError {
    fn from(e: CodecError) -> Self {
        CliError::Codec(e)
    }
}

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Parse,
    Serialize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub options: CodecOptions,
    pub metadata: Option<PathBuf>,
    pub content_type: Option<ContentType>,
    pub data_service_version: Option<String>,
}

/// Parse command-line arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Err(CliError::Usage("missing command".to_string()));
    };
    let command = match command.as_ref() {
        "parse" => Command::Parse,
        "serialize" => Command::Serialize,
        other => return Err(CliError::Usage(format!("unknown command {other:?}"))),
    };
    let mut parsed = CliArgs {
        command,
        options: CodecOptions::default(),
        metadata: None,
        content_type: None,
        data_service_version: None,
    };
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        match arg {
            "--strict" => parsed.options.strict = true,
            "--recognize-dates" => parsed.options.recognize_dates = true,
            "--metadata" | "--content-type" | "--data-service-version" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("{arg} needs a value")))?;
                let value = value.as_ref();
                match arg {
                    "--metadata" => parsed.metadata = Some(PathBuf::from(value)),
                    "--content-type" => parsed.content_type = Some(ContentType::parse(value)),
                    _ => parsed.data_service_version = Some(value.to_string()),
                }
            }
            other => return Err(CliError::Usage(format!("unknown option {other:?}"))),
        }
    }
    Ok(parsed)
}

// ── Commands ──────────────────────────────────────────────────────────────

/// Load a model document from `path`.
pub fn load_model(path: &std::path::Path) -> Result<EdmModel, CliError> {
    let text = std::fs::read_to_string(path)?;
    Ok(EdmModel::from_json_str(&text)?)
}

/// Annotate a payload; returns pretty-printed JSON.
pub fn parse_payload(
    input: &str,
    model: Option<&EdmModel>,
    args: &CliArgs,
) -> Result<String, CliError> {
    let ctx = ParseContext {
        metadata: model,
        content_type: args.content_type.clone(),
        recognize_dates: None,
    };
    let value = JsonCodec::new(args.options).parse(input, &ctx)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Strip a payload for writing. `None` when the content type is not JSON.
pub fn serialize_payload(input: &str, args: &CliArgs) -> Result<Option<String>, CliError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let mut ctx = SerializeContext {
        content_type: args.content_type.clone(),
        data_service_version: args.data_service_version.clone(),
    };
    Ok(JsonCodec::new(args.options).serialize(&value.into(), &mut ctx)?)
}

/// Run the command named in `args` against `input`.
pub fn run(input: &str, args: &CliArgs) -> Result<Option<String>, CliError> {
    match args.command {
        Command::Parse => {
            let model = args.metadata.as_deref().map(load_model).transpose()?;
            parse_payload(input, model.as_ref(), args).map(Some)
        }
        Command::Serialize => serialize_payload(input, args),
    }
}
