use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;

use kmerge_engine::merge_lists;
use kmerge_list::{ListError, ListGuard, NodeArena, NodeId, RenderStyle};

use crate::cli::*;
use crate::config::{ensure_sorted, DemoConfig};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    colored::control::set_override(config.color);

    match cli.command {
        Command::Demo(args) => {
            let style = style_for(config.show_identities && !args.no_identities);
            cmd_merge(&config.lists, style, cli.format)
        }
        Command::Merge(args) => {
            let lists = args
                .lists
                .iter()
                .map(|arg| parse_list(arg))
                .collect::<anyhow::Result<Vec<_>>>()?;
            ensure_sorted(&lists)?;
            let style = style_for(config.show_identities && !args.no_identities);
            cmd_merge(&lists, style, cli.format)
        }
    }
}

fn style_for(show_identities: bool) -> RenderStyle {
    if show_identities {
        RenderStyle::WithIdentity
    } else {
        RenderStyle::ValuesOnly
    }
}

/// Parse `1,4,5`, optionally wrapped in one pair of brackets, into a list.
///
/// A blank argument or `[]` is the empty list. Empty elements are rejected.
fn parse_list(arg: &str) -> anyhow::Result<Vec<i64>> {
    let trimmed = arg.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(str::trim)
        .map(|s| {
            if s.is_empty() {
                bail!("empty list element in {arg:?}");
            }
            s.parse::<i64>()
                .with_context(|| format!("invalid list element {s:?} in {arg:?}"))
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct MergeReport {
    inputs: Vec<Vec<i64>>,
    merged: Vec<i64>,
    nodes: usize,
    #[serde(skip)]
    rendered_inputs: Vec<String>,
    #[serde(skip)]
    rendered_merged: String,
}

fn cmd_merge(lists: &[Vec<i64>], style: RenderStyle, format: OutputFormat) -> anyhow::Result<()> {
    let report = merge_report(lists, style)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("{}", "input to merge".bold());
            for line in &report.rendered_inputs {
                println!("{line}");
            }
            println!("\n{}", "output".bold());
            println!("{}", report.rendered_merged);
            println!("{} {} node(s) merged", "✓".green(), report.nodes);
        }
    }
    Ok(())
}

/// Build the lists, merge them and capture both sides for display.
///
/// All nodes are freed when the guard leaves scope, including on error.
fn merge_report(lists: &[Vec<i64>], style: RenderStyle) -> anyhow::Result<MergeReport> {
    let total: usize = lists.iter().map(Vec::len).sum();
    let mut arena = NodeArena::with_capacity(total);
    let mut scope = ListGuard::new(&mut arena);

    let heads: Vec<Option<NodeId>> = lists
        .iter()
        .map(|values| {
            let head = scope.make_list(values.iter().copied());
            scope.track(head)
        })
        .collect();

    let rendered_inputs = heads
        .iter()
        .map(|head| render(&scope, *head, style))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let head = merge_lists(&mut *scope, heads).context("merging lists")?;
    scope.track(head);

    Ok(MergeReport {
        inputs: lists.to_vec(),
        merged: scope.to_vec(head)?,
        nodes: scope.list_len(head)?,
        rendered_inputs,
        rendered_merged: render(&scope, head, style)?,
    })
}

/// Render a list; on a cycle, report it on stderr and keep the partial text.
fn render(
    arena: &NodeArena<i64>,
    head: Option<NodeId>,
    style: RenderStyle,
) -> anyhow::Result<String> {
    match arena.render_with(head, style) {
        Ok(text) => Ok(text),
        Err(ListError::CycleDetected { node, partial }) => {
            eprintln!(
                "{} circular linked list detected at node {}; printing aborted",
                "PANIC:".red().bold(),
                node
            );
            Ok(partial)
        }
        Err(e) => Err(e.into()),
    }
}
