//! Whole-corpus publishing: every topic and map of one language tree.

use std::path::PathBuf;

use interface_dita_builder::InterfaceModel;
use interface_dita_core::xml::Document;
use interface_dita_core::{Command, DonorSet};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::concept::{class_topic, environment_topic};
use crate::document::write_document;
use crate::error::Result;
use crate::inheritance::SynthWarning;
use crate::layout::{ImportStats, Layout, import_manual_topics};
use crate::maps::{classes_map, commands_map, environments_map, inheritance_map, relations_map};
use crate::topic::{TopicContext, render_command};

/// Publishing knobs that do not affect topic content.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Worker threads for command topics; adaptive when unset or zero.
    pub jobs: Option<usize>,
    /// Directory of curated topics copied over the generated tree.
    pub manual_topics: Option<PathBuf>,
}

/// A command topic that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicFailure {
    pub command: String,
    pub error: String,
}

/// What a publishing run wrote and what it skipped.
#[derive(Debug, Default, Serialize)]
pub struct PublishSummary {
    pub topics: usize,
    pub classes: usize,
    pub environments: usize,
    pub donors: usize,
    pub maps: Vec<PathBuf>,
    pub failures: Vec<TopicFailure>,
    pub warnings: Vec<SynthWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportStats>,
}

/// Writes every command, class and environment topic and every map.
///
/// A command whose topic cannot be rendered or written is reported in
/// [`PublishSummary::failures`] and the run goes on.
pub fn publish(
    model: &InterfaceModel,
    layout: &Layout,
    context: &TopicContext,
    options: &PublishOptions,
) -> Result<PublishSummary> {
    layout.scaffold()?;

    let commands: Vec<&Command> = model.commands.iter().collect();
    let jobs = options
        .jobs
        .filter(|jobs| *jobs > 0)
        .unwrap_or_else(|| default_parallel_jobs(commands.len()));
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let write_one = |command: &Command| -> Result<(DonorSet, Vec<SynthWarning>)> {
        let rendered = render_command(command, &model.commands, context)?;
        write_document(&rendered.document, &layout.command_topic(&command.name))?;
        Ok((rendered.donors, rendered.warnings))
    };

    let results: Vec<(&str, Result<(DonorSet, Vec<SynthWarning>)>)> = pool.install(|| {
        commands
            .par_iter()
            .map(|command| (command.name.as_str(), write_one(command)))
            .collect()
    });

    let mut summary = PublishSummary::default();
    // Donors referenced by a failed topic are still keyed as long as they exist.
    let mut donors: DonorSet = model
        .donors
        .iter()
        .filter(|donor| model.commands.contains(donor))
        .map(String::from)
        .collect();
    for (command, result) in results {
        match result {
            Ok((topic_donors, warnings)) => {
                summary.topics += 1;
                donors.merge(topic_donors);
                summary.warnings.extend(warnings);
            }
            Err(err) => {
                warn!(command = %command, error = %err, "Skipping command topic");
                summary.failures.push(TopicFailure {
                    command: command.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }
    summary.donors = donors.len();

    for name in model.class_names() {
        write_document(&class_topic(name, layout.lang()), &layout.class_topic(name))?;
        summary.classes += 1;
    }
    for stem in model.environment_names() {
        write_document(&environment_topic(stem, layout.lang()), &layout.environment_topic(stem))?;
        summary.environments += 1;
    }

    summary.maps = write_maps(model, layout, &donors)?;

    if let Some(manual) = &options.manual_topics {
        summary.import = Some(import_manual_topics(manual, layout.root())?);
    }

    info!(
        topics = summary.topics,
        failures = summary.failures.len(),
        donors = summary.donors,
        jobs,
        "Published topics"
    );
    Ok(summary)
}

fn write_maps(model: &InterfaceModel, layout: &Layout, donors: &DonorSet) -> Result<Vec<PathBuf>> {
    let lang = layout.lang();
    let user: Vec<&str> = model
        .commands
        .iter()
        .filter(|c| !c.is_system)
        .map(|c| c.name.as_str())
        .collect();
    let system: Vec<&str> = model
        .commands
        .iter()
        .filter(|c| c.is_system)
        .map(|c| c.name.as_str())
        .collect();

    let mut documents: Vec<(String, Document)> = vec![
        ("inheritance.ditamap".to_string(), inheritance_map(donors, lang)),
        ("relations.ditamap".to_string(), relations_map(&model.relations, lang)),
        ("environments.ditamap".to_string(), environments_map(model.environment_names(), lang)),
        ("classes.ditamap".to_string(), classes_map(model.class_names(), lang)),
    ];
    let indexes = [
        ("full_commands", commands_map("Full Commands", model.commands.names(), lang)),
        ("user_commands", commands_map("User Commands", user, lang)),
        ("system_commands", commands_map("System Commands", system, lang)),
    ];
    // Both extensions carry the same index.
    for (stem, document) in indexes {
        documents.push((format!("{stem}.ditamap"), document.clone()));
        documents.push((format!("{stem}.xml"), document));
    }

    let mut written = Vec::with_capacity(documents.len());
    for (file_name, document) in documents {
        let path = layout.map(&file_name);
        write_document(&document, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn default_parallel_jobs(command_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    let adaptive_cap = if command_count >= 500 { 8 } else { 12 };
    cpu_count.min(adaptive_cap).max(1).min(command_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parallel_jobs_bounds() {
        assert_eq!(default_parallel_jobs(0), 1);
        assert_eq!(default_parallel_jobs(1), 1);
        assert!(default_parallel_jobs(4000) <= 8);
        assert!(default_parallel_jobs(100) <= 12);
    }
}
