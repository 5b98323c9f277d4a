//! Serve subcommand - the analysis web form.

use crate::analyze::{AnalysisArgs, YoutubeAnalyzer, build_analyzer};
use crate::analyzer::AnalyzerConfig;
use crate::config::ModelConfig;
use crate::present::present;
use crate::web::{Reply, route};
use eyre::{Result, WrapErr, eyre};
use moodops_yt::youtube::FetchConfig;
use std::io::Read;
use std::time::Instant;
use tiny_http::{Header, Request, Response, Server, StatusCode};

pub const DEFAULT_BIND: &str = "127.0.0.1:7860";

/// Largest request body read, in bytes
const MAX_BODY: u64 = 64 * 1024;

/// CLI arguments for the web form.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    #[command(flatten)]
    pub model: crate::cli::ModelArgs,
}

/// Resolved configuration for the web form.
#[derive(Debug)]
pub struct Config {
    pub bind: String,
    pub fetch: FetchConfig,
    pub analyzer: AnalyzerConfig,
    pub model: ModelConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        args.analysis.analyzer.chunk.validate()?;

        Ok(Self {
            bind: args.bind,
            fetch: args.analysis.fetch,
            analyzer: args.analysis.analyzer,
            model: args.model.try_into()?,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    let mut analyzer = build_analyzer(&config.model, config.fetch, config.analyzer)?;

    let server = Server::http(&config.bind)
        .map_err(|e| eyre!(e))
        .wrap_err_with(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(addr = %config.bind, "serving web form");

    // One request at a time: the model session needs exclusive access
    for request in server.incoming_requests() {
        if let Err(e) = handle(&mut analyzer, request) {
            tracing::warn!(error = %e, "failed to handle request");
        }
    }

    Ok(())
}

fn handle(analyzer: &mut YoutubeAnalyzer, mut request: Request) -> Result<()> {
    let s = Instant::now();

    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY)
        .read_to_string(&mut body)
        .wrap_err("failed to read request body")?;

    let reply = route(&method, &url, &body, |input, format| {
        present(analyzer, input, format)
    });

    let d = s.elapsed();
    tracing::info!(
        %method,
        path = url.split('?').next().unwrap_or_default(),
        status = reply.status,
        duration = %crate::config::format_secs(d.as_secs_f32()),
        "request served"
    );

    request
        .respond(into_response(reply)?)
        .wrap_err("failed to send response")
}

fn into_response(reply: Reply) -> Result<Response<std::io::Cursor<Vec<u8>>>> {
    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|()| eyre!("invalid content type: {}", reply.content_type))?;

    Ok(Response::from_string(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header))
}
