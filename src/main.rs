use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use fullerene_clusters::cli::{Cli, Command, OutputFormat};
use fullerene_clusters::policy::{
  AppearanceCounter, ClusterListing, Policy, SixClusterDetector, ValidClusterEntry, ValidClusterFilter,
};
use fullerene_clusters::{Clustering, Decoder, PartitionTable, all_partitions, next_graph};

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
  if debug {
    tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()))
      .with_writer(std::io::stderr)
      .init();
  }
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
  match path {
    Some(path) => {
      let file = File::open(path).with_context(|| format!("can't open {}", path.display()))?;
      Ok(Box::new(file))
    }
    None => Ok(Box::new(io::stdin().lock())),
  }
}

fn spinner(enabled: bool) -> Result<ProgressBar> {
  if !enabled {
    return Ok(ProgressBar::hidden());
  }
  let pb = ProgressBar::new_spinner();
  pb.set_style(ProgressStyle::with_template("[read ] {spinner} {pos} graphs {elapsed_precise} {wide_msg}")?);
  Ok(pb)
}

fn plural(n: usize) -> &'static str {
  if n == 1 { "" } else { "s" }
}

/// Feed every graph of the stream to `policy`, calling `after_each` once the
/// graph has been observed.
fn drive<P: Policy>(
  decoder: &mut Decoder<Box<dyn Read>>,
  policy: &mut P,
  pb: &ProgressBar,
  mut after_each: impl FnMut(&mut P) -> Result<()>,
) -> Result<()> {
  let mut number = 0;
  loop {
    let graph = next_graph(decoder).with_context(|| format!("failed to read graph {}", number + 1))?;
    let Some(graph) = graph else {
      break;
    };
    number += 1;
    let clustering = Clustering::identify(&graph);
    policy.observe(number, &graph, &clustering)?;
    after_each(policy)?;
    pb.inc(1);
  }
  pb.finish_with_message("✔ end of stream");
  Ok(())
}

fn write_graph_numbers(out: &mut impl Write, numbers: &[usize]) -> Result<()> {
  if !numbers.is_empty() {
    writeln!(out, "{}", numbers.iter().join(" "))?;
  }
  Ok(())
}

#[derive(Serialize)]
struct PartitionLine {
  ordinal: usize,
  parts: Vec<usize>,
}

#[derive(Serialize)]
struct ValidClustersReport {
  graphs_read: usize,
  valid: usize,
  entries: Vec<ValidClusterEntry>,
}

fn print_partitions(out: &mut impl Write, format: OutputFormat) -> Result<()> {
  match format {
    OutputFormat::Text => {
      for p in all_partitions() {
        writeln!(out, "partition {:2}: {}", p.ordinal, p)?;
      }
    }
    OutputFormat::Json => {
      let lines: Vec<_> = all_partitions()
        .iter()
        .map(|p| PartitionLine { ordinal: p.ordinal, parts: p.parts() })
        .collect();
      serde_json::to_writer_pretty(&mut *out, &lines)?;
      writeln!(out)?;
    }
  }
  Ok(())
}

fn main() -> Result<()> {
  let args = Cli::parse();
  init_tracing(args.debug);

  let stdout = io::stdout();
  let mut out = BufWriter::new(stdout.lock());

  let open = || -> Result<(Decoder<Box<dyn Read>>, ProgressBar)> {
    Ok((Decoder::new(open_input(args.input.as_deref())?), spinner(args.progress)?))
  };

  match args.command {
    Command::Partitions => {
      print_partitions(&mut out, args.format)?;
      out.flush()?;
    }

    Command::Appearances { partition } => {
      let mut counter = AppearanceCounter::new(partition)?;
      let (mut decoder, pb) = open()?;
      eprintln!("Looking for appearances of partition {}: {}", partition, counter.partition);
      drive(&mut decoder, &mut counter, &pb, |_| Ok(()))?;
      match args.format {
        OutputFormat::Text => write_graph_numbers(&mut out, &counter.matches)?,
        OutputFormat::Json => {
          serde_json::to_writer_pretty(&mut out, &counter)?;
          writeln!(out)?;
        }
      }
      out.flush()?;
      eprintln!("Read {} graph{}.", counter.graphs_read, plural(counter.graphs_read));
      eprintln!(
        "Found {} appearance{} of partition {}.",
        counter.matches.len(),
        plural(counter.matches.len()),
        partition
      );
    }

    Command::ValidClusters { count } => {
      let mut filter = ValidClusterFilter::new();
      let (mut decoder, pb) = open()?;
      drive(&mut decoder, &mut filter, &pb, |_| Ok(()))?;
      let entries = filter.entries();
      match args.format {
        OutputFormat::Text => {
          for entry in &entries {
            let key = entry.frequencies.iter().join(",");
            if count {
              writeln!(out, "{}: {}", key, entry.count)?;
            } else {
              writeln!(out, "{}", key)?;
            }
          }
        }
        OutputFormat::Json => {
          let report = ValidClustersReport {
            graphs_read: filter.graphs_read(),
            valid: filter.valid(),
            entries,
          };
          serde_json::to_writer_pretty(&mut out, &report)?;
          writeln!(out)?;
        }
      }
      out.flush()?;
      eprintln!("Read {} graph{}.", filter.graphs_read(), plural(filter.graphs_read()));
      eprintln!("Found {} valid cluster{}.", filter.valid(), plural(filter.valid()));
    }

    Command::SixCluster => {
      let mut detector = SixClusterDetector::new();
      let (mut decoder, pb) = open()?;
      drive(&mut decoder, &mut detector, &pb, |_| Ok(()))?;
      match args.format {
        OutputFormat::Text => write_graph_numbers(&mut out, &detector.matches)?,
        OutputFormat::Json => {
          serde_json::to_writer_pretty(&mut out, &detector)?;
          writeln!(out)?;
        }
      }
      out.flush()?;
      eprintln!("Read {} graph{}.", detector.graphs_read, plural(detector.graphs_read));
      eprintln!(
        "Found {} graph{} with a 6-cluster.",
        detector.matches.len(),
        plural(detector.matches.len())
      );
    }

    Command::Clusters => {
      let mut listing = ClusterListing::new();
      let (mut decoder, pb) = open()?;
      let format = args.format;
      drive(&mut decoder, &mut listing, &pb, |listing| {
        for report in listing.drain() {
          match format {
            OutputFormat::Text => {
              let partition = report
                .partition
                .and_then(|ordinal| PartitionTable::global().get(ordinal).ok())
                .map(|p| format!("partition {}: {}", p.ordinal, p))
                .unwrap_or_else(|| "no partition of 12".to_string());
              writeln!(
                out,
                "graph {}: {} vertices, degrees {}, {}",
                report.number,
                report.vertex_count,
                report.degrees.iter().join(" "),
                partition
              )?;
              for cluster in &report.clusters {
                writeln!(
                  out,
                  "  cluster [{}] degrees [{}]{}",
                  cluster.members.iter().join(" "),
                  cluster.degrees.iter().join(" "),
                  if cluster.valid { "" } else { " invalid" }
                )?;
              }
            }
            OutputFormat::Json => {
              serde_json::to_writer(&mut out, &report)?;
              writeln!(out)?;
            }
          }
        }
        Ok(())
      })?;
      out.flush()?;
      eprintln!("Read {} graph{}.", listing.graphs_read(), plural(listing.graphs_read()));
    }
  }

  Ok(())
}
