//! `podq`: read pod API output line by line and query it.
//!
//! Reads from a file, stdin or a plain TCP connection, frames the bytes into
//! lines, parses JSON out of them and prints the requested fields.

use std::{
    fs::File,
    io::{self, Write},
    net::TcpStream,
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::Parser as _;
use podjson::{
    ByteSource, Line, LineReader, LineReaderOptions, Node, Parser, ParserOptions, SurrogateMode,
    TransportError, escape::escape_bytes, extract::embedded_object, find_by_name, find_in,
    transport::Blocking,
};
use tracing_subscriber::EnvFilter;

/// Query JSON served by a social pod.
#[derive(Debug, clap::Parser)]
#[command(name = "podq", version, about)]
struct Cli {
    /// File to read; stdin when omitted.
    input: Option<PathBuf>,

    /// Read from a plain TCP connection (`host:port`) instead of a file.
    #[arg(long, conflicts_with = "input")]
    connect: Option<String>,

    /// Print the first member with this name; repeatable.
    #[arg(short, long = "field", value_name = "NAME")]
    fields: Vec<String>,

    /// Seconds to wait for each read.
    #[arg(long, default_value_t = 20)]
    timeout: u64,

    /// Timed-out reads to retry before giving up.
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Longest accepted line in bytes.
    #[arg(long, value_name = "BYTES")]
    max_line: Option<usize>,

    /// Deepest accepted container nesting.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Decode surrogate pairs the way older pod clients did.
    #[arg(long)]
    legacy_surrogates: bool,

    /// Reject documents whose containers are not all closed.
    #[arg(long)]
    strict: bool,

    /// Treat every line as one page of a listing, stopping at an empty page.
    #[arg(long, conflicts_with = "extract")]
    pages: bool,

    /// Parse the object assigned after MARKER in an HTML page.
    #[arg(long, value_name = "MARKER")]
    extract: Option<String>,

    /// Print each input line escaped for a JSON string instead of parsing.
    #[arg(long, conflicts_with_all = ["pages", "extract", "fields"])]
    escape: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn parser(&self) -> Parser {
        let defaults = ParserOptions::default();
        Parser::new(ParserOptions {
            surrogate_mode: if self.legacy_surrogates {
                SurrogateMode::Legacy
            } else {
                SurrogateMode::Standard
            },
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            strict_containers: self.strict,
        })
    }

    fn reader(&self) -> LineReader {
        let defaults = LineReaderOptions::default();
        LineReader::with_options(LineReaderOptions {
            max_line_length: self.max_line.or(defaults.max_line_length),
            ..defaults
        })
    }

    fn source(&self) -> Result<Box<dyn ByteSource>> {
        if let Some(addr) = &self.connect {
            let stream =
                TcpStream::connect(addr).with_context(|| format!("connecting to {addr}"))?;
            tracing::info!(%addr, "connected");
            return Ok(Box::new(stream));
        }
        match &self.input {
            Some(path) => {
                let file =
                    File::open(path).with_context(|| format!("opening {}", path.display()))?;
                Ok(Box::new(Blocking(file)))
            }
            None => Ok(Box::new(Blocking(io::stdin()))),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Reads every line from `source`, retrying a timed-out read up to
/// `retries` times in a row.
fn read_lines(
    reader: &mut LineReader,
    source: &mut dyn ByteSource,
    timeout: Duration,
    retries: u32,
) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    let mut stalls = 0;
    loop {
        match reader.read_line(source, timeout) {
            Ok(Some(line)) => {
                stalls = 0;
                lines.push(line);
            }
            Ok(None) => return Ok(lines),
            Err(TransportError::Timeout(waited)) if stalls < retries => {
                stalls += 1;
                tracing::warn!(?waited, attempt = stalls, "read timed out, retrying");
            }
            Err(err) => return Err(err).context("reading input"),
        }
    }
}

/// What the input was turned into.
enum Document {
    Single(Node),
    Pages(Vec<Node>),
}

impl Document {
    fn find(&self, name: &str) -> Option<&Node> {
        match self {
            Self::Single(root) => find_by_name(root, name),
            Self::Pages(pages) => find_in(pages, name),
        }
    }

    fn into_node(self) -> Node {
        match self {
            Self::Single(root) => root,
            Self::Pages(pages) => Node::Array(pages),
        }
    }
}

fn build(cli: &Cli, lines: &[Line]) -> Result<Document> {
    let parser = cli.parser();

    if cli.pages {
        let mut pages = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let page = parser
                .parse_append(&mut pages, line)
                .with_context(|| format!("parsing page on line {}", i + 1))?;
            if page.is_empty_container() {
                pages.pop();
                break;
            }
        }
        tracing::debug!(pages = pages.len(), "collected pages");
        return Ok(Document::Pages(pages));
    }

    if let Some(marker) = &cli.extract {
        for line in lines {
            if let Some(object) = embedded_object(line, marker.as_bytes()) {
                let root = parser
                    .parse(object)
                    .with_context(|| format!("parsing object after {marker:?}"))?;
                return Ok(Document::Single(root));
            }
        }
        bail!("no object found after {marker:?}");
    }

    let text = bstr::join("\n", lines);
    let root = parser.parse(&text).context("parsing input")?;
    Ok(Document::Single(root))
}

fn print_json(out: &mut impl Write, node: &Node, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, node)?;
    } else {
        serde_json::to_writer(&mut *out, node)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<ExitCode> {
    let mut source = cli.source()?;
    let mut reader = cli.reader();
    let lines = read_lines(
        &mut reader,
        source.as_mut(),
        Duration::from_secs(cli.timeout),
        cli.retries,
    )?;

    if cli.escape {
        for (i, line) in lines.iter().enumerate() {
            let escaped =
                escape_bytes(line).with_context(|| format!("line {} is not UTF-8", i + 1))?;
            writeln!(out, "{escaped}")?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let document = build(cli, &lines)?;
    if cli.fields.is_empty() {
        print_json(out, &document.into_node(), cli.pretty)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut missing = false;
    for name in &cli.fields {
        match document.find(name) {
            Some(node) => print_json(out, node, cli.pretty)?,
            None => {
                tracing::warn!(field = %name, "field not found");
                missing = true;
            }
        }
    }
    Ok(if missing {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    run(&cli, &mut stdout)
}
