//! Command implementations for the decode CLI.
//!
//! Each `run_*` function takes a built [`Index`] and returns the response
//! for one command; `main.rs` parses arguments, builds the index once and
//! emits the response. Keeping the commands free of argument parsing and
//! output lets them be tested directly.
//!
//! ## Error Handling
//!
//! All functions return `Result<T, CliError>`. Core errors convert with `?`
//! and keep their own exit codes.

use std::path::Path;

use tracing::{debug, info};

use decode_core::config::Config;
use decode_core::coverage::coverage;
use decode_core::files::collect_files;
use decode_core::index::Index;
use decode_core::language::Languages;
use decode_core::reference::Reference;
use decode_core::rewrite::{render, rewrite, LinkSegment};
use decode_ruby::Ruby;

use crate::error::CliError;
use crate::output::{CoverageResponse, DefinitionInfo, DocsResponse, LinkInfo, ListResponse, LookupResponse};

// ============================================================================
// Setup
// ============================================================================

/// The languages the CLI indexes.
pub fn languages() -> Languages {
    Languages::new().with(Ruby::new())
}

/// Load configuration from `explicit`, or from `.decode/config.toml` under
/// `root` when no path is given.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, CliError> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::load_from_project(root)?,
    };
    debug!(?config, "loaded configuration");
    Ok(config)
}

/// Discover and index every source file under `root`.
pub fn build_index(root: &Path, config: &Config) -> Result<Index, CliError> {
    let filter = config.file_filter()?;
    let files = collect_files(root, &filter)?;
    let mut index = Index::new(languages());
    let published = index.update(&files)?;
    info!(
        root = %root.display(),
        files = files.len(),
        definitions = published,
        "built index"
    );
    Ok(index)
}

// ============================================================================
// Commands
// ============================================================================

/// Compute documentation coverage against `threshold`, or the configured
/// threshold when none is given.
pub fn run_coverage(index: &Index, config: &Config, threshold: Option<f64>) -> Result<CoverageResponse, CliError> {
    let threshold = threshold.unwrap_or(config.coverage.threshold);
    if !(0.0..=100.0).contains(&threshold) {
        return Err(CliError::invalid_args(format!(
            "threshold must be between 0 and 100, got {}",
            threshold
        )));
    }
    let report = coverage(index, &config.container_policy());
    Ok(CoverageResponse::new(report, threshold))
}

/// Resolve `text` from the root, or from inside the definition named by
/// `relative_to`.
///
/// The reference is parsed in the scope definition's language, else in
/// `language` when given, else by [`Languages::parse_reference`].
pub fn run_lookup(
    index: &Index,
    text: &str,
    relative_to: Option<&str>,
    language: Option<&str>,
) -> Result<LookupResponse, CliError> {
    let scope = relative_to
        .map(|name| index.get(name).ok_or_else(|| CliError::not_found(name)))
        .transpose()?;

    let reference: Reference = match (scope, language) {
        (Some(scope), _) => index.reference_for(scope, text),
        (None, Some(language)) => index.languages().fetch(language)?.reference_for(text),
        (None, None) => index.languages().parse_reference(text),
    };

    let found = index
        .lookup(&reference, scope)
        .ok_or_else(|| CliError::not_found(text))?;
    Ok(LookupResponse::new(text, found))
}

/// List definitions in lexical order, optionally only those beneath the
/// definition named `under`.
pub fn run_list(index: &Index, under: Option<&str>) -> Result<ListResponse, CliError> {
    let path: Vec<String> = match under {
        Some(name) => index
            .get(name)
            .ok_or_else(|| CliError::not_found(name))?
            .full_path()
            .to_vec(),
        None => Vec::new(),
    };

    let mut definitions = Vec::new();
    index.trie().each(path.as_slice(), |_, ids| {
        definitions.extend(
            ids.iter()
                .filter_map(|&id| index.definition(id))
                .map(DefinitionInfo::from_definition),
        );
    });
    Ok(ListResponse::new(definitions))
}

/// Structured documentation of the definition with qualified name `name`,
/// with `{Reference}` links resolved.
pub fn run_docs(index: &Index, name: &str) -> Result<DocsResponse, CliError> {
    let definition = index.get(name).ok_or_else(|| CliError::not_found(name))?;
    let documentation = definition.id().and_then(|id| index.documentation(id));

    let Some(documentation) = documentation else {
        return Ok(DocsResponse::new(definition, None, Vec::new(), Vec::new()));
    };

    let (text, links) = match documentation.text() {
        Some(text) => {
            let segments = rewrite(index, definition, &text);
            let links = segments
                .iter()
                .filter_map(|segment| match segment {
                    LinkSegment::Link {
                        reference,
                        qualified_name,
                        ..
                    } => Some(LinkInfo {
                        reference: reference.clone(),
                        target: qualified_name.clone(),
                    }),
                    LinkSegment::Text { .. } => None,
                })
                .collect();
            let rendered = render(&segments, |reference, resolved| match resolved {
                Some(qualified_name) => qualified_name.to_string(),
                None => format!("{{{}}}", reference),
            });
            (Some(rendered), links)
        }
        None => (None, Vec::new()),
    };

    Ok(DocsResponse::new(
        definition,
        text,
        links,
        documentation.children.clone(),
    ))
}

// ============================================================================
// Tests
// ============================================================================
