//! Plain-text summary of aggregated results

use crate::collections::ModelCollection;
use perfgraph_decode::ModeVocabulary;

/// Character limit of one chat message, minus room for the closing fence
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 3850 - 3;

const FENCE: &str = "```";

/// One tab-separated line per instance
///
/// Columns: model, method, identifier, propagation mode, problem instance,
/// mean throughput.
#[must_use]
pub fn summary_lines(collection: &ModelCollection, vocabulary: &ModeVocabulary) -> Vec<String> {
    let mut lines = Vec::new();
    for model in collection.models() {
        for method in model.methods() {
            for group in method.groups() {
                for series in group.collections() {
                    let mode = vocabulary.label_or_value(series.propagation_mode());
                    for instance in series.instances() {
                        lines.push(format!(
                            "{}\t{}\t{}\t{}\t{}\t{}",
                            model.name(),
                            method.name(),
                            group.identifier(),
                            mode,
                            instance.problem_instance(),
                            instance.mean()
                        ));
                    }
                }
            }
        }
    }
    lines
}

/// Split lines into code-fenced messages of at most `max_len` bytes
///
/// The optional header precedes the first fence. A single line that does
/// not fit an empty message is sent on its own. No lines, no messages.
#[must_use]
pub fn chunk_messages(header: Option<&str>, lines: &[String], max_len: usize) -> Vec<String> {
    let mut messages = Vec::new();
    if lines.is_empty() {
        return messages;
    }

    let mut current = match header {
        Some(header) => format!("{header}\n{FENCE}"),
        None => FENCE.to_string(),
    };
    let mut has_lines = false;

    for line in lines {
        let closing = 1 + FENCE.len();
        if has_lines && current.len() + 1 + line.len() + closing > max_len {
            current.push('\n');
            current.push_str(FENCE);
            messages.push(std::mem::replace(&mut current, FENCE.to_string()));
        }
        current.push('\n');
        current.push_str(line);
        has_lines = true;
    }

    current.push('\n');
    current.push_str(FENCE);
    messages.push(current);

    tracing::debug!(messages = messages.len(), lines = lines.len(), "Chunked summary");
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{BenchmarkRecord, RejectionTally};
    use perfgraph_decode::{NameDecoder, Settings};
    use pretty_assertions::assert_eq;

    fn lines(n: usize, width: usize) -> Vec<String> {
        (0..n).map(|i| format!("{i:0width$}")).collect()
    }

    #[test]
    fn summary_lists_every_instance() {
        let settings = Settings::default();
        let decoder = NameDecoder::new(&settings);
        let mut models = ModelCollection::new();
        models
            .extend_records(
                vec![
                    BenchmarkRecord::new("Tree/Lookup/0/1/100", 5000.0),
                    BenchmarkRecord::new("Tree/Lookup/0/1/100", 7000.0),
                    BenchmarkRecord::new("Tree/Lookup/0/0/50", 4200.5),
                ],
                &decoder,
                &mut RejectionTally::default(),
            )
            .unwrap();

        assert_eq!(
            summary_lines(&models, settings.propagation_modes()),
            vec![
                "Tree\tLookup\tLookup/0\ti2o\t50\t4200.5".to_string(),
                "Tree\tLookup\tLookup/0\to2i\t100\t6000".to_string(),
            ]
        );
    }

    #[test]
    fn no_lines_no_messages() {
        assert!(chunk_messages(Some("header"), &[], 100).is_empty());
    }

    #[test]
    fn single_message_with_header() {
        let messages = chunk_messages(Some("*nightly*"), &lines(2, 3), 100);
        assert_eq!(messages, vec!["*nightly*\n```\n000\n001\n```".to_string()]);
    }

    #[test]
    fn messages_respect_limit() {
        let input = lines(50, 9);
        let messages = chunk_messages(None, &input, 64);

        assert!(messages.len() > 1);
        for message in &messages {
            assert!(message.len() <= 64, "{message:?} is too long");
            assert!(message.starts_with(FENCE));
            assert!(message.ends_with(FENCE));
        }

        let joined: Vec<&str> = messages
            .iter()
            .flat_map(|m| m.lines())
            .filter(|l| *l != FENCE)
            .collect();
        assert_eq!(joined, input.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn oversized_line_gets_own_message() {
        let input = vec!["short".to_string(), "x".repeat(40), "tail".to_string()];
        let messages = chunk_messages(None, &input, 20);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], format!("```\n{}\n```", "x".repeat(40)));
    }
}
