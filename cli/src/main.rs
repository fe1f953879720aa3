use crate::cli::{Args, Command};
use anyhow::{Context, bail};
use clap::Parser;
use oxrdf::Graph;
use oxrdfio::{RdfFormat, RdfParser};
use shacl2datalog::{TranslateOptions, translate_graph};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{Read, Write, stdin, stdout};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    init_tracing();
    let matches = Args::parse();
    match matches.command {
        Command::Translate {
            file,
            format,
            base,
            output,
            include,
            permissive,
        } => {
            let format = if let Some(format) = format {
                rdf_format_from_name(&format)?
            } else if let Some(file) = &file {
                rdf_format_from_path(file)?
            } else {
                bail!("The --format option must be set when reading from stdin")
            };
            let mut parser = RdfParser::from_format(format);
            if let Some(base) = base {
                parser = parser
                    .with_base_iri(&base)
                    .with_context(|| format!("Invalid base IRI {base}"))?;
            }

            let graph = if let Some(file) = &file {
                let reader = File::open(file)
                    .with_context(|| format!("Error while opening file {}", file.display()))?;
                parse_graph(parser, reader)
                    .with_context(|| format!("Error while parsing file {}", file.display()))?
            } else {
                parse_graph(parser, stdin().lock()).context("Error while parsing stdin")?
            };
            debug!(triples = graph.len(), "shapes graph loaded");

            let mut options = TranslateOptions::default();
            if let Some(include) = include {
                options = options.with_include(include);
            }
            if permissive {
                options = options.permissive();
            }
            let program = translate_graph(&graph, &options)
                .context("Error while translating the shapes graph")?;
            info!(rules = program.len(), "shapes graph translated");

            let text = program.to_string();
            if let Some(output) = output {
                write_atomically(&output, text.as_bytes())
                    .with_context(|| format!("Error while writing file {}", output.display()))?;
            } else {
                let mut stdout = stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
            Ok(())
        }
    }
}

/// Logs go to stderr, filtered with `RUST_LOG` and only warnings by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_graph(parser: RdfParser, reader: impl Read) -> anyhow::Result<Graph> {
    let mut graph = Graph::new();
    for quad in parser.for_reader(reader) {
        graph.insert(quad?.as_ref());
    }
    Ok(graph)
}

/// Writes into a temporary file next to `path` then moves it over `path`.
fn write_atomically(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_name() {
        assert_eq!(rdf_format_from_name("ttl").unwrap(), RdfFormat::Turtle);
        assert_eq!(
            rdf_format_from_name("application/n-triples").unwrap(),
            RdfFormat::NTriples
        );
        assert!(rdf_format_from_name("docx").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            rdf_format_from_path(Path::new("shapes.ttl")).unwrap(),
            RdfFormat::Turtle
        );
        assert!(rdf_format_from_path(Path::new("shapes")).is_err());
    }
}
