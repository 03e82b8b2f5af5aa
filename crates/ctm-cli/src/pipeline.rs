//! One monitoring run: collect, trace, report

use crate::config::Config;
use crate::error::PipelineError;
use ctm_mapping::{read_mapping_file, BacklogSource, IssueLinks, TestBacklogEntry};
use ctm_testreport::{ReportKind, TestSuite, XunitReader};
use ctm_trace::report::{
    render_markdown, write_html_report, write_json_report, write_mapping_export, write_report, HtmlOptions,
    MarkdownOptions,
};
use ctm_trace::{
    backfill_placeholders, build_traces, filter_delivery, unsuccessful_trace_count, CommentCache, DeliveryInfo, Trace,
    CACHE_FILE_NAME,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Report name for all traces
pub const ALL_REPORT: &str = "ctm_report_all";

/// Options not carried by the configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Also write the discovered mapping as a mapping file
    pub export_mapping: bool,
}

/// Outcome of a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// All traces, including delivery placeholders
    pub traces: Vec<Trace>,
    /// Traces of the configured delivery
    pub delivery: Vec<Trace>,
    /// Files written, in order
    pub written: Vec<PathBuf>,
}

/// Add `suites` to `merged`, dropping empty and already known suites
pub fn merge_suites(merged: &mut Vec<TestSuite>, suites: Vec<TestSuite>) {
    for suite in suites {
        if suite.is_empty() {
            tracing::info!("Skipping empty test suite '{}'", suite.name);
            continue;
        }
        if merged.iter().any(|known| known.same_suite_as(&suite)) {
            tracing::debug!("Skipping duplicate test suite '{}'", suite.name);
            continue;
        }
        merged.push(suite);
    }
}

fn collect_entries(config: &Config, links: &IssueLinks) -> Result<Vec<TestBacklogEntry>, PipelineError> {
    if let Some(mapping) = config.mapping_file() {
        return Ok(read_mapping_file(mapping, links)?);
    }

    let mut entries = Vec::new();
    for source in &config.sourcecode {
        let scanner = source.language.scanner();
        entries.extend(scanner.scan(&source.coordinates(), links)?);
    }
    Ok(entries)
}

fn collect_suites(config: &Config) -> Result<Vec<TestSuite>, PipelineError> {
    let reader = XunitReader::new();
    let mut suites = Vec::new();

    for report in &config.test_report {
        match report.kind.parse::<ReportKind>() {
            Ok(ReportKind::XunitXml) => merge_suites(&mut suites, reader.read_dir(&report.local)?),
            Err(kind) => tracing::error!(
                "Test report type '{}' of {} is not supported (supported: {})",
                kind,
                report.local.display(),
                ReportKind::supported().join(", ")
            ),
        }
    }

    Ok(suites)
}

struct ReportSet<'a> {
    name: String,
    title: String,
    delivery: Option<DeliveryInfo>,
    traces: &'a [Trace],
}

fn write_report_set(
    out_dir: &Path,
    set: &ReportSet<'_>,
    links: &IssueLinks,
    options: RunOptions,
    written: &mut Vec<PathBuf>,
) -> Result<(), PipelineError> {
    let html = out_dir.join(format!("{}.html", set.name));
    let html_options = HtmlOptions {
        title: set.title.clone(),
        delivery: set.delivery.clone(),
        generated_at: None,
    };
    write_html_report(&html, set.traces, links, &html_options)?;
    written.push(html);

    let json = out_dir.join(format!("{}.json", set.name));
    write_json_report(&json, set.traces, links)?;
    written.push(json);

    let markdown = out_dir.join(format!("{}.md", set.name));
    let markdown_options = MarkdownOptions {
        verbose: true,
        delivery_version: set.delivery.as_ref().map(|d| d.version.clone()),
        generated_at: None,
    };
    write_report(&markdown, &render_markdown(set.traces, links, &markdown_options))?;
    written.push(markdown);

    if options.export_mapping {
        let mapping = out_dir.join(format!("{}-traceability-mapping.json", set.name));
        write_mapping_export(&mapping, set.traces)?;
        written.push(mapping);
    }

    Ok(())
}

fn log_pending_links(config: &Config, traces: &[Trace]) -> Result<(), PipelineError> {
    let trackers = [
        (BacklogSource::GitHub, config.github.create_links),
        (BacklogSource::Jira, config.jira.create_links),
    ];
    if trackers.iter().all(|(_, enabled)| !enabled) {
        return Ok(());
    }

    let cache = CommentCache::load(&config.work_dir.join(CACHE_FILE_NAME))?;
    for (source, enabled) in trackers {
        if !enabled {
            continue;
        }
        let pending = cache.pending(traces, source);
        tracing::info!("{} {} backlog items are not yet linked to their test results", pending.len(), source);
        for reference in pending {
            tracing::debug!("Not yet linked: {}", reference);
        }
    }
    Ok(())
}

/// Run the monitor once and write all reports to the output directory
pub fn run(config: &Config, options: RunOptions) -> Result<RunSummary, PipelineError> {
    let started = Instant::now();
    let links = config.issue_links();
    let requested = config.delivery_items();
    let delivery_name = if requested.is_empty() {
        None
    } else {
        Some(config.delivery_report_name()?)
    };

    let entries = collect_entries(config, &links)?;
    let suites = collect_suites(config)?;

    let mut traces = build_traces(&suites, &entries);
    if traces.is_empty() {
        tracing::warn!("No traces found: no executed test refers to a backlog item");
    }

    let delivery = if requested.is_empty() {
        Vec::new()
    } else {
        let delivery = filter_delivery(&traces, &requested);
        backfill_placeholders(&mut traces, &delivery);
        delivery
    };

    let mut written = Vec::new();
    let all = ReportSet {
        name: ALL_REPORT.to_string(),
        title: String::new(),
        delivery: None,
        traces: &traces,
    };
    write_report_set(&config.output_dir, &all, &links, options, &mut written)?;

    if let Some(name) = delivery_name {
        let set = ReportSet {
            name,
            title: "Delivery Software Requirement Test Report".to_string(),
            delivery: Some(DeliveryInfo {
                program: config.delivery.program.clone(),
                version: config.delivery.version.clone(),
            }),
            traces: &delivery,
        };
        write_report_set(&config.output_dir, &set, &links, options, &mut written)?;
    }

    log_pending_links(config, &traces)?;

    let failing = unsuccessful_trace_count(&traces);
    if failing > 0 {
        tracing::warn!("{} of {} requirements are not tested successfully", failing, traces.len());
    } else {
        tracing::info!("All {} requirements are tested successfully", traces.len());
    }
    tracing::info!(reports = written.len(), "Run took {:?}", started.elapsed());

    Ok(RunSummary {
        traces,
        delivery,
        written,
    })
}
